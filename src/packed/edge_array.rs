//! Edge and edge crease runs

use super::{codes, index_value, length_mismatch, read_run, DecodeMode, PackedRun};
use crate::error::Result;
use crate::io::dxf::{DxfStreamWriter, DxfStreamWriterExt};
use crate::tags::Tag;
use std::ops::{Deref, DerefMut};

// ============================================================================
// Mesh Edge
// ============================================================================

/// An edge in a mesh, defined by two vertex indices.
///
/// The pair is stored in stream order even though edges are undirected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MeshEdge {
    /// Index of the start vertex.
    pub start: u32,
    /// Index of the end vertex.
    pub end: u32,
}

impl MeshEdge {
    /// Creates a new edge between two vertices.
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Returns true if this edge connects the given vertices (in either direction).
    pub fn connects(&self, v1: u32, v2: u32) -> bool {
        (self.start == v1 && self.end == v2) || (self.start == v2 && self.end == v1)
    }

    /// Returns the other vertex of this edge.
    pub fn other_vertex(&self, vertex: u32) -> Option<u32> {
        if self.start == vertex {
            Some(self.end)
        } else if self.end == vertex {
            Some(self.start)
        } else {
            None
        }
    }
}

impl From<(u32, u32)> for MeshEdge {
    fn from((start, end): (u32, u32)) -> Self {
        Self::new(start, end)
    }
}

impl From<[u32; 2]> for MeshEdge {
    fn from([start, end]: [u32; 2]) -> Self {
        Self::new(start, end)
    }
}

// ============================================================================
// Edge Array
// ============================================================================

/// Mesh edges; the `94` counter holds the edge count
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeArray(Vec<MeshEdge>);

impl EdgeArray {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn into_vec(self) -> Vec<MeshEdge> {
        self.0
    }
}

impl PackedRun for EdgeArray {
    const COUNTER_CODE: i32 = codes::EDGE_COUNT;
    const VALUE_CODE: i32 = codes::INDEX;

    fn counter_value(&self) -> usize {
        self.0.len()
    }

    /// Two index tags per edge
    fn tag_count(&self) -> usize {
        self.0.len() * 2
    }

    fn decode_run(tags: &[Tag], start_index: usize, mode: DecodeMode) -> Result<(Self, usize)> {
        let run = read_run(tags, start_index, Self::COUNTER_CODE, Self::VALUE_CODE, 2, mode)?;
        let pairs = run.chunks_exact(2);
        if !pairs.remainder().is_empty() {
            // an unpaired trailing index cannot form an edge
            length_mismatch(mode, Self::COUNTER_CODE, run.len() + 1, run.len())?;
        }

        let mut edges = Vec::with_capacity(run.len() / 2);
        for pair in pairs {
            edges.push(MeshEdge::new(index_value(&pair[0])?, index_value(&pair[1])?));
        }
        Ok((Self(edges), run.len()))
    }

    fn export_dxf<W: DxfStreamWriter + ?Sized>(&self, writer: &mut W) -> Result<()> {
        writer.write_count(Self::COUNTER_CODE, self.counter_value())?;
        for edge in &self.0 {
            writer.write_i64(Self::VALUE_CODE, edge.start.into())?;
            writer.write_i64(Self::VALUE_CODE, edge.end.into())?;
        }
        Ok(())
    }
}

impl Deref for EdgeArray {
    type Target = Vec<MeshEdge>;

    fn deref(&self) -> &Vec<MeshEdge> {
        &self.0
    }
}

impl DerefMut for EdgeArray {
    fn deref_mut(&mut self) -> &mut Vec<MeshEdge> {
        &mut self.0
    }
}

impl From<Vec<MeshEdge>> for EdgeArray {
    fn from(edges: Vec<MeshEdge>) -> Self {
        Self(edges)
    }
}

impl FromIterator<MeshEdge> for EdgeArray {
    fn from_iter<I: IntoIterator<Item = MeshEdge>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// ============================================================================
// Crease Array
// ============================================================================

/// Edge crease values; `creases[i]` applies to `edges[i]`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreaseArray(Vec<f64>);

impl CreaseArray {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.0
    }
}

impl PackedRun for CreaseArray {
    const COUNTER_CODE: i32 = codes::CREASE_COUNT;
    const VALUE_CODE: i32 = codes::CREASE;

    fn counter_value(&self) -> usize {
        self.0.len()
    }

    fn tag_count(&self) -> usize {
        self.0.len()
    }

    fn decode_run(tags: &[Tag], start_index: usize, mode: DecodeMode) -> Result<(Self, usize)> {
        let run = read_run(tags, start_index, Self::COUNTER_CODE, Self::VALUE_CODE, 1, mode)?;
        let creases = run.iter().map(Tag::expect_float).collect::<Result<Vec<_>>>()?;
        Ok((Self(creases), run.len()))
    }

    fn export_dxf<W: DxfStreamWriter + ?Sized>(&self, writer: &mut W) -> Result<()> {
        writer.write_count(Self::COUNTER_CODE, self.counter_value())?;
        for &crease in &self.0 {
            writer.write_double(Self::VALUE_CODE, crease)?;
        }
        Ok(())
    }
}

impl Deref for CreaseArray {
    type Target = Vec<f64>;

    fn deref(&self) -> &Vec<f64> {
        &self.0
    }
}

impl DerefMut for CreaseArray {
    fn deref_mut(&mut self) -> &mut Vec<f64> {
        &mut self.0
    }
}

impl From<Vec<f64>> for CreaseArray {
    fn from(creases: Vec<f64>) -> Self {
        Self(creases)
    }
}

impl FromIterator<f64> for CreaseArray {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Decode the edge run starting at `start_index` (lenient)
pub fn create_edge_array(tags: &[Tag], start_index: usize) -> Result<EdgeArray> {
    EdgeArray::decode(tags, start_index, DecodeMode::Lenient)
}

/// Decode the crease run starting at `start_index` (lenient)
pub fn create_crease_array(tags: &[Tag], start_index: usize) -> Result<CreaseArray> {
    CreaseArray::decode(tags, start_index, DecodeMode::Lenient)
}
