//! Ordered, indexable tag stream

use super::tag::{Tag, TagValue};
use crate::error::{DxfError, Result};
use crate::io::dxf::{DxfStreamReader, DxfStreamWriter, DxfStreamWriterExt, DxfTextReader, GroupCodeValueType};
use crate::types::{Vector2, Vector3};
use std::ops::{Deref, Range};

/// An ordered sequence of tags
///
/// Coordinates are held as compiled point tags: a `10/20/30` triplet is a
/// single [`TagValue::Point3`] tag at code 10.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tags(Vec<Tag>);

impl Tags {
    /// Create an empty tag stream
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Wrap tags that are already compiled
    pub fn from_vec(tags: Vec<Tag>) -> Self {
        Self(tags)
    }

    /// Parse DXF tag text into a compiled tag stream
    pub fn from_text(text: &str) -> Result<Self> {
        Self::from_reader(&mut DxfTextReader::new(text.as_bytes()))
    }

    /// Read every remaining pair from `reader` into a compiled tag stream
    pub fn from_reader<R: DxfStreamReader + ?Sized>(reader: &mut R) -> Result<Self> {
        let mut flat = Vec::new();
        while let Some(pair) = reader.read_pair()? {
            flat.push(Tag::from_pair(&pair)?);
        }
        Self::compile_points(flat)
    }

    /// Fold flat coordinate tags into point tags
    ///
    /// An x coordinate must be followed by its y coordinate; the z
    /// coordinate is optional and yields a 3D point when present.
    pub fn compile_points<I>(flat: I) -> Result<Self>
    where
        I: IntoIterator<Item = Tag>,
    {
        let mut source = flat.into_iter().peekable();
        let mut tags = Vec::new();

        while let Some(tag) = source.next() {
            let x = match (GroupCodeValueType::coordinate_axis(tag.code), &tag.value) {
                (Some(0), TagValue::Float(x)) => *x,
                _ => {
                    tags.push(tag);
                    continue;
                }
            };

            let code = tag.code;
            let y = match source.next_if(|t| t.code == code + 10) {
                Some(t) => t.expect_float()?,
                None => {
                    return Err(DxfError::Parse(format!(
                        "Missing y coordinate for point code {}",
                        code
                    )))
                }
            };
            let value = match source.next_if(|t| t.code == code + 20) {
                Some(t) => TagValue::Point3(Vector3::new(x, y, t.expect_float()?)),
                None => TagValue::Point2(Vector2::new(x, y)),
            };
            tags.push(Tag::new(code, value));
        }

        Ok(Self(tags))
    }

    /// Index of the first tag with `code`
    pub fn tag_index(&self, code: i32) -> Option<usize> {
        self.tag_index_from(code, 0)
    }

    /// Index of the first tag with `code` at or after `start`
    pub fn tag_index_from(&self, code: i32, start: usize) -> Option<usize> {
        self.0
            .get(start..)?
            .iter()
            .position(|t| t.code == code)
            .map(|i| i + start)
    }

    /// True if any tag has `code`
    pub fn has_tag(&self, code: i32) -> bool {
        self.tag_index(code).is_some()
    }

    /// First tag with `code`
    pub fn get_first_tag(&self, code: i32) -> Option<&Tag> {
        self.0.iter().find(|t| t.code == code)
    }

    /// Value of the first tag with `code`
    pub fn get_first_value(&self, code: i32) -> Option<&TagValue> {
        self.get_first_tag(code).map(|t| &t.value)
    }

    /// Replace the value of the first tag with `code`, or append a new tag
    pub fn set_first(&mut self, code: i32, value: TagValue) {
        match self.0.iter_mut().find(|t| t.code == code) {
            Some(tag) => tag.value = value,
            None => self.0.push(Tag::new(code, value)),
        }
    }

    /// Append a tag
    pub fn push(&mut self, tag: Tag) {
        self.0.push(tag);
    }

    /// Replace the tags in `range` with `replacement`
    pub fn splice<I>(&mut self, range: Range<usize>, replacement: I)
    where
        I: IntoIterator<Item = Tag>,
    {
        self.0.splice(range, replacement);
    }

    /// Number of code/value pairs these tags occupy in a file
    pub fn flat_len(&self) -> usize {
        self.0.iter().map(Tag::flat_len).sum()
    }

    /// Consume the stream, returning its tags
    pub fn into_vec(self) -> Vec<Tag> {
        self.0
    }

    /// Write every tag, expanding points into coordinate pairs
    pub fn export_dxf<W: DxfStreamWriter + ?Sized>(&self, writer: &mut W) -> Result<()> {
        writer.write_tags(&self.0)
    }
}

impl Deref for Tags {
    type Target = [Tag];

    fn deref(&self) -> &[Tag] {
        &self.0
    }
}

impl FromIterator<Tag> for Tags {
    fn from_iter<I: IntoIterator<Item = Tag>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Tags {
    type Item = Tag;
    type IntoIter = std::vec::IntoIter<Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Tags {
    type Item = &'a Tag;
    type IntoIter = std::slice::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
