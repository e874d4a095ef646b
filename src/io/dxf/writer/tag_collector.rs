//! In-memory tag writer

use super::stream_writer::DxfStreamWriter;
use crate::error::Result;
use crate::tags::{Tag, TagValue};

/// A [`DxfStreamWriter`] that collects flat tags instead of writing text
///
/// Points arrive as one tag per coordinate, exactly as they would appear in
/// a DXF file. Use [`Tags::compile_points`](crate::tags::Tags::compile_points)
/// to fold them back into point tags.
#[derive(Debug, Default, Clone)]
pub struct TagCollector {
    tags: Vec<Tag>,
}

impl TagCollector {
    /// Create an empty collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Tags collected so far
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Consume the collector, returning the collected tags
    pub fn into_tags(self) -> Vec<Tag> {
        self.tags
    }

    /// Collect the flat tags an exporter writes
    pub fn dxftags<F>(export: F) -> Result<Vec<Tag>>
    where
        F: FnOnce(&mut TagCollector) -> Result<()>,
    {
        let mut collector = TagCollector::new();
        export(&mut collector)?;
        Ok(collector.into_tags())
    }

    fn push(&mut self, code: i32, value: TagValue) -> Result<()> {
        self.tags.push(Tag::new(code, value));
        Ok(())
    }
}

impl DxfStreamWriter for TagCollector {
    fn write_string(&mut self, code: i32, value: &str) -> Result<()> {
        self.push(code, TagValue::Str(value.to_string()))
    }

    fn write_i16(&mut self, code: i32, value: i16) -> Result<()> {
        self.push(code, TagValue::Int(value.into()))
    }

    fn write_i32(&mut self, code: i32, value: i32) -> Result<()> {
        self.push(code, TagValue::Int(value.into()))
    }

    fn write_i64(&mut self, code: i32, value: i64) -> Result<()> {
        self.push(code, TagValue::Int(value))
    }

    fn write_double(&mut self, code: i32, value: f64) -> Result<()> {
        self.push(code, TagValue::Float(value))
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}
