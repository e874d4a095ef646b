//! Minimal-width storage for face vertex indices

use std::fmt;

/// Storage class for a face's vertex indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IndexWidth {
    /// `u8`, indices up to 255
    Narrow,
    /// `u16`, indices up to 65535
    Medium,
    /// `u32`
    Wide,
}

impl IndexWidth {
    /// Largest index the width can hold
    pub const fn max_value(self) -> u32 {
        match self {
            IndexWidth::Narrow => u8::MAX as u32,
            IndexWidth::Medium => u16::MAX as u32,
            IndexWidth::Wide => u32::MAX,
        }
    }

    /// Bytes per stored index
    pub const fn bytes(self) -> usize {
        match self {
            IndexWidth::Narrow => 1,
            IndexWidth::Medium => 2,
            IndexWidth::Wide => 4,
        }
    }

    /// Smallest width that holds `value`
    pub const fn for_value(value: u32) -> Self {
        if value <= u8::MAX as u32 {
            IndexWidth::Narrow
        } else if value <= u16::MAX as u32 {
            IndexWidth::Medium
        } else {
            IndexWidth::Wide
        }
    }
}

/// Smallest width that holds every value; empty input selects `Narrow`
pub fn select_width(values: &[u32]) -> IndexWidth {
    IndexWidth::for_value(values.iter().copied().max().unwrap_or(0))
}

/// One face: vertex indices packed at the width its largest index needs
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Face {
    Narrow(Vec<u8>),
    Medium(Vec<u16>),
    Wide(Vec<u32>),
}

impl Face {
    /// Pack `indices` at the width selected for them
    pub fn new(indices: &[u32]) -> Self {
        match select_width(indices) {
            IndexWidth::Narrow => Face::Narrow(indices.iter().map(|&i| i as u8).collect()),
            IndexWidth::Medium => Face::Medium(indices.iter().map(|&i| i as u16).collect()),
            IndexWidth::Wide => Face::Wide(indices.to_vec()),
        }
    }

    /// Storage width of this face
    pub fn width(&self) -> IndexWidth {
        match self {
            Face::Narrow(_) => IndexWidth::Narrow,
            Face::Medium(_) => IndexWidth::Medium,
            Face::Wide(_) => IndexWidth::Wide,
        }
    }

    /// Number of vertices of this face
    pub fn len(&self) -> usize {
        match self {
            Face::Narrow(v) => v.len(),
            Face::Medium(v) => v.len(),
            Face::Wide(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Vertex index at `position`
    pub fn get(&self, position: usize) -> Option<u32> {
        match self {
            Face::Narrow(v) => v.get(position).map(|&i| i.into()),
            Face::Medium(v) => v.get(position).map(|&i| i.into()),
            Face::Wide(v) => v.get(position).copied(),
        }
    }

    /// Iterate over the vertex indices
    pub fn iter(&self) -> FaceIter<'_> {
        FaceIter {
            face: self,
            front: 0,
            back: self.len(),
        }
    }

    /// Vertex indices widened to `u32`
    pub fn to_vec(&self) -> Vec<u32> {
        self.iter().collect()
    }

    /// Append a vertex index, widening the storage when it does not fit
    pub fn push(&mut self, index: u32) {
        if IndexWidth::for_value(index) > self.width() {
            let mut indices = self.to_vec();
            indices.push(index);
            *self = Face::new(&indices);
            return;
        }
        match self {
            Face::Narrow(v) => v.push(index as u8),
            Face::Medium(v) => v.push(index as u16),
            Face::Wide(v) => v.push(index),
        }
    }

    /// Bytes used by the index storage
    pub fn storage_bytes(&self) -> usize {
        self.len() * self.width().bytes()
    }
}

impl Default for Face {
    fn default() -> Self {
        Face::Narrow(Vec::new())
    }
}

impl From<&[u32]> for Face {
    fn from(indices: &[u32]) -> Self {
        Face::new(indices)
    }
}

impl From<Vec<u32>> for Face {
    fn from(indices: Vec<u32>) -> Self {
        Face::new(&indices)
    }
}

impl<const N: usize> From<[u32; N]> for Face {
    fn from(indices: [u32; N]) -> Self {
        Face::new(&indices)
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a Face {
    type Item = u32;
    type IntoIter = FaceIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over a face's vertex indices as `u32`
#[derive(Debug, Clone)]
pub struct FaceIter<'a> {
    face: &'a Face,
    front: usize,
    back: usize,
}

impl Iterator for FaceIter<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        if self.front >= self.back {
            return None;
        }
        let index = self.face.get(self.front);
        self.front += 1;
        index
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.back - self.front;
        (n, Some(n))
    }
}

impl DoubleEndedIterator for FaceIter<'_> {
    fn next_back(&mut self) -> Option<u32> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        self.face.get(self.back)
    }
}

impl ExactSizeIterator for FaceIter<'_> {}

/// Pack face indices at their minimal width
pub fn face_to_array(indices: &[u32]) -> Face {
    Face::new(indices)
}
