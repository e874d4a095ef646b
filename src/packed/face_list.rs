//! Face list run: a flat sequence of count-prefixed index lists

use super::width::Face;
use super::{codes, index_value, length_mismatch, read_run, DecodeMode, PackedRun};
use crate::error::{DxfError, Result};
use crate::io::dxf::{DxfStreamWriter, DxfStreamWriterExt};
use crate::tags::Tag;
use std::ops::{Deref, DerefMut};

/// Mesh faces in stream order
///
/// Encoded as a single run of `90` tags where each face contributes its
/// vertex count followed by its indices; the `93` counter holds the total
/// number of those tags, not the number of faces.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FaceList(Vec<Face>);

impl FaceList {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append a face given its vertex indices
    pub fn add(&mut self, indices: &[u32]) {
        self.0.push(Face::new(indices));
    }

    pub fn into_vec(self) -> Vec<Face> {
        self.0
    }
}

impl PackedRun for FaceList {
    const COUNTER_CODE: i32 = codes::FACE_LIST_SIZE;
    const VALUE_CODE: i32 = codes::INDEX;

    fn counter_value(&self) -> usize {
        self.tag_count()
    }

    /// One count tag plus one tag per index, summed over all faces
    fn tag_count(&self) -> usize {
        self.0.iter().map(|face| 1 + face.len()).sum()
    }

    fn decode_run(tags: &[Tag], start_index: usize, mode: DecodeMode) -> Result<(Self, usize)> {
        let run = read_run(tags, start_index, Self::COUNTER_CODE, Self::VALUE_CODE, 1, mode)?;
        let mut faces = Vec::new();
        let mut indices = Vec::new();
        let mut cursor = 0;

        while cursor < run.len() {
            let count_tag = &run[cursor];
            let count = count_tag.expect_int()?;
            let count = usize::try_from(count).map_err(|_| DxfError::InvalidValue {
                code: count_tag.code,
                value: count,
            })?;
            cursor += 1;

            let end = cursor.saturating_add(count).min(run.len());
            if end - cursor < count {
                // declared and found are vertex counts of this face
                length_mismatch(mode, Self::COUNTER_CODE, count, end - cursor)?;
            }

            indices.clear();
            for tag in &run[cursor..end] {
                indices.push(index_value(tag)?);
            }
            faces.push(Face::new(&indices));
            cursor = end;
        }

        Ok((Self(faces), run.len()))
    }

    fn export_dxf<W: DxfStreamWriter + ?Sized>(&self, writer: &mut W) -> Result<()> {
        writer.write_count(Self::COUNTER_CODE, self.counter_value())?;
        for face in &self.0 {
            writer.write_count(Self::VALUE_CODE, face.len())?;
            for index in face {
                writer.write_i64(Self::VALUE_CODE, index.into())?;
            }
        }
        Ok(())
    }
}

impl Deref for FaceList {
    type Target = Vec<Face>;

    fn deref(&self) -> &Vec<Face> {
        &self.0
    }
}

impl DerefMut for FaceList {
    fn deref_mut(&mut self) -> &mut Vec<Face> {
        &mut self.0
    }
}

impl From<Vec<Face>> for FaceList {
    fn from(faces: Vec<Face>) -> Self {
        Self(faces)
    }
}

impl FromIterator<Face> for FaceList {
    fn from_iter<I: IntoIterator<Item = Face>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Decode the face list run starting at `start_index` (lenient)
pub fn create_face_list(tags: &[Tag], start_index: usize) -> Result<FaceList> {
    FaceList::decode(tags, start_index, DecodeMode::Lenient)
}
