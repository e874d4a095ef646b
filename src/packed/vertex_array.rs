//! Vertex coordinate run

use super::{codes, read_run, DecodeMode, PackedRun};
use crate::error::Result;
use crate::io::dxf::{DxfStreamWriter, DxfStreamWriterExt};
use crate::tags::Tag;
use crate::types::Vector3;
use std::ops::{Deref, DerefMut};

/// Mesh vertices in stream order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VertexArray(Vec<Vector3>);

impl VertexArray {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn into_vec(self) -> Vec<Vector3> {
        self.0
    }
}

impl PackedRun for VertexArray {
    const COUNTER_CODE: i32 = codes::VERTEX_COUNT;
    const VALUE_CODE: i32 = codes::VERTEX;

    fn counter_value(&self) -> usize {
        self.0.len()
    }

    /// Three coordinate tags per vertex
    fn tag_count(&self) -> usize {
        self.0.len() * 3
    }

    fn decode_run(tags: &[Tag], start_index: usize, mode: DecodeMode) -> Result<(Self, usize)> {
        let run = read_run(tags, start_index, Self::COUNTER_CODE, Self::VALUE_CODE, 1, mode)?;
        let vertices = run.iter().map(Tag::expect_point3).collect::<Result<Vec<_>>>()?;
        Ok((Self(vertices), run.len()))
    }

    fn export_dxf<W: DxfStreamWriter + ?Sized>(&self, writer: &mut W) -> Result<()> {
        writer.write_count(Self::COUNTER_CODE, self.counter_value())?;
        for vertex in &self.0 {
            writer.write_point3d(Self::VALUE_CODE, *vertex)?;
        }
        Ok(())
    }
}

impl Deref for VertexArray {
    type Target = Vec<Vector3>;

    fn deref(&self) -> &Vec<Vector3> {
        &self.0
    }
}

impl DerefMut for VertexArray {
    fn deref_mut(&mut self) -> &mut Vec<Vector3> {
        &mut self.0
    }
}

impl From<Vec<Vector3>> for VertexArray {
    fn from(vertices: Vec<Vector3>) -> Self {
        Self(vertices)
    }
}

impl FromIterator<Vector3> for VertexArray {
    fn from_iter<I: IntoIterator<Item = Vector3>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Decode the vertex run starting at `start_index` (lenient)
pub fn create_vertex_array(tags: &[Tag], start_index: usize) -> Result<VertexArray> {
    VertexArray::decode(tags, start_index, DecodeMode::Lenient)
}
