//! DXF stream writer trait and common helpers

use crate::error::Result;
use crate::io::dxf::GroupCodeValueType;
use crate::tags::{Tag, TagValue};
use crate::types::{Vector2, Vector3};

/// Trait for writing DXF code/value pairs
pub trait DxfStreamWriter {
    /// Write a code/value pair with a string value
    fn write_string(&mut self, code: i32, value: &str) -> Result<()>;

    /// Write a code/value pair with an i16 value
    fn write_i16(&mut self, code: i32, value: i16) -> Result<()>;

    /// Write a code/value pair with an i32 value
    fn write_i32(&mut self, code: i32, value: i32) -> Result<()>;

    /// Write a code/value pair with an i64 value
    fn write_i64(&mut self, code: i32, value: i64) -> Result<()>;

    /// Write a code/value pair with a double value
    fn write_double(&mut self, code: i32, value: f64) -> Result<()>;

    /// Flush the writer
    fn flush(&mut self) -> Result<()>;
}

/// Extension trait for convenient writing operations
pub trait DxfStreamWriterExt: DxfStreamWriter {
    /// Write a 2D point (codes 10/20 or similar)
    fn write_point2d(&mut self, x_code: i32, point: Vector2) -> Result<()> {
        self.write_double(x_code, point.x)?;
        self.write_double(x_code + 10, point.y)?;
        Ok(())
    }

    /// Write a 3D point (codes 10/20/30 or similar)
    fn write_point3d(&mut self, x_code: i32, point: Vector3) -> Result<()> {
        self.write_double(x_code, point.x)?;
        self.write_double(x_code + 10, point.y)?;
        self.write_double(x_code + 20, point.z)?;
        Ok(())
    }

    /// Write a count as a 32-bit counter tag
    fn write_count(&mut self, code: i32, count: usize) -> Result<()> {
        let value = i32::try_from(count)
            .map_err(|_| format!("Count {} overflows counter tag {}", count, code))?;
        self.write_i32(code, value)
    }

    /// Write a typed tag, choosing the integer width from its group code
    fn write_tag(&mut self, tag: &Tag) -> Result<()> {
        match &tag.value {
            TagValue::Str(s) => self.write_string(tag.code, s),
            TagValue::Float(v) => self.write_double(tag.code, *v),
            TagValue::Point2(p) => self.write_point2d(tag.code, *p),
            TagValue::Point3(p) => self.write_point3d(tag.code, *p),
            TagValue::Int(v) => match value_type_for_code(tag.code) {
                GroupCodeValueType::Int16 | GroupCodeValueType::Byte | GroupCodeValueType::Bool => {
                    match i16::try_from(*v) {
                        Ok(v) => self.write_i16(tag.code, v),
                        Err(_) => self.write_i64(tag.code, *v),
                    }
                }
                GroupCodeValueType::Int32 => match i32::try_from(*v) {
                    Ok(v) => self.write_i32(tag.code, v),
                    Err(_) => self.write_i64(tag.code, *v),
                },
                _ => self.write_i64(tag.code, *v),
            },
        }
    }

    /// Write a sequence of typed tags
    fn write_tags<'a, I>(&mut self, tags: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a Tag>,
    {
        for tag in tags {
            self.write_tag(tag)?;
        }
        Ok(())
    }
}

// Auto-implement the extension trait for all stream writers
impl<T: DxfStreamWriter + ?Sized> DxfStreamWriterExt for T {}

/// Helper to determine value type from code for writing
pub fn value_type_for_code(code: i32) -> GroupCodeValueType {
    GroupCodeValueType::from_code(code)
}
