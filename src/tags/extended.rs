//! Entity tags grouped by subclass

use super::tag::Tag;
use super::tag_list::Tags;
use super::{SUBCLASS_MARKER, XDATA_MARKER};
use crate::error::Result;
use crate::io::dxf::DxfStreamWriter;

/// One entity's tags split into subclasses and XDATA groups
///
/// Subclass 0 holds the tags before the first `100` marker (entity type,
/// handle, owner). Every following subclass starts with its own `100`
/// marker tag. XDATA groups start at a `1001` application tag and run to
/// the next one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtendedTags {
    subclasses: Vec<Tags>,
    xdata: Vec<Tags>,
}

impl ExtendedTags {
    /// Parse one entity's tag text
    pub fn from_text(text: &str) -> Result<Self> {
        Ok(Self::from_tags(Tags::from_text(text)?))
    }

    /// Group a compiled tag stream
    pub fn from_tags(tags: Tags) -> Self {
        let mut subclasses = vec![Tags::new()];
        let mut xdata: Vec<Tags> = Vec::new();

        for tag in tags {
            if tag.code == XDATA_MARKER {
                xdata.push(Tags::new());
            } else if tag.code == SUBCLASS_MARKER && xdata.is_empty() {
                subclasses.push(Tags::new());
            }
            match xdata.last_mut() {
                Some(group) => group.push(tag),
                None => {
                    let last = subclasses.len() - 1;
                    subclasses[last].push(tag);
                }
            }
        }

        Self { subclasses, xdata }
    }

    /// Tags before the first subclass marker
    pub fn noclass(&self) -> &Tags {
        &self.subclasses[0]
    }

    /// Entity type name from the leading `0` tag
    pub fn dxftype(&self) -> Option<&str> {
        self.noclass().first().filter(|t| t.code == 0)?.as_str()
    }

    /// All subclasses, `noclass` included at index 0
    pub fn subclasses(&self) -> &[Tags] {
        &self.subclasses
    }

    /// Position of the subclass whose marker is `name`
    pub fn subclass_index(&self, name: &str) -> Option<usize> {
        self.subclasses
            .iter()
            .position(|s| s.first().is_some_and(|t| is_marker(t, name)))
    }

    /// Subclass by marker name
    pub fn subclass(&self, name: &str) -> Option<&Tags> {
        self.subclass_index(name).map(|i| &self.subclasses[i])
    }

    /// Mutable subclass by marker name
    pub fn subclass_mut(&mut self, name: &str) -> Option<&mut Tags> {
        let index = self.subclass_index(name)?;
        Some(&mut self.subclasses[index])
    }

    /// Append a new subclass; `tags` should start with its marker
    pub fn push_subclass(&mut self, tags: Tags) {
        self.subclasses.push(tags);
    }

    /// XDATA groups in stream order
    pub fn xdata(&self) -> &[Tags] {
        &self.xdata
    }

    /// XDATA group for an application name
    pub fn xdata_for(&self, appid: &str) -> Option<&Tags> {
        self.xdata
            .iter()
            .find(|g| g.first().and_then(Tag::as_str) == Some(appid))
    }

    /// Number of code/value pairs of the whole entity
    pub fn flat_len(&self) -> usize {
        self.subclasses
            .iter()
            .chain(&self.xdata)
            .map(Tags::flat_len)
            .sum()
    }

    /// Write all subclasses followed by XDATA
    pub fn export_dxf<W: DxfStreamWriter + ?Sized>(&self, writer: &mut W) -> Result<()> {
        for group in self.subclasses.iter().chain(&self.xdata) {
            group.export_dxf(writer)?;
        }
        Ok(())
    }
}

fn is_marker(tag: &Tag, name: &str) -> bool {
    tag.code == SUBCLASS_MARKER && tag.as_str() == Some(name)
}
