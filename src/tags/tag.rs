//! Single group-code/value pair

use crate::error::{DxfError, Result};
use crate::io::dxf::{DxfCodePair, GroupCodeValueType};
use crate::types::{Vector2, Vector3};
use std::fmt;

/// The value half of a tag
#[derive(Debug, Clone, PartialEq)]
pub enum TagValue {
    /// Any integer-valued code (16, 32 and 64 bit, bytes and booleans)
    Int(i64),
    /// Floating-point scalar
    Float(f64),
    /// Text, handles and binary chunks
    Str(String),
    /// Compiled x/y point
    Point2(Vector2),
    /// Compiled x/y/z point
    Point3(Vector3),
}

impl TagValue {
    /// Short name of the value shape, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            TagValue::Int(_) => "integer",
            TagValue::Float(_) => "float",
            TagValue::Str(_) => "string",
            TagValue::Point2(_) => "2d point",
            TagValue::Point3(_) => "3d point",
        }
    }
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagValue::Int(v) => write!(f, "{}", v),
            TagValue::Float(v) => write!(f, "{}", v),
            TagValue::Str(s) => f.write_str(s),
            TagValue::Point2(p) => write!(f, "{}", p),
            TagValue::Point3(p) => write!(f, "{}", p),
        }
    }
}

/// A DXF tag: group code plus typed value
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    pub code: i32,
    pub value: TagValue,
}

impl Tag {
    /// Create a new tag
    pub fn new(code: i32, value: TagValue) -> Self {
        Self { code, value }
    }

    /// Integer tag
    pub fn int(code: i32, value: i64) -> Self {
        Self::new(code, TagValue::Int(value))
    }

    /// Floating-point tag
    pub fn float(code: i32, value: f64) -> Self {
        Self::new(code, TagValue::Float(value))
    }

    /// String tag
    pub fn string(code: i32, value: impl Into<String>) -> Self {
        Self::new(code, TagValue::Str(value.into()))
    }

    /// 3D point tag
    pub fn point3(code: i32, point: Vector3) -> Self {
        Self::new(code, TagValue::Point3(point))
    }

    /// Type a raw code/value pair according to its group code
    pub fn from_pair(pair: &DxfCodePair) -> Result<Self> {
        let value_type = pair.value_type();
        let value = if value_type.is_integer() {
            TagValue::Int(pair.as_int().ok_or_else(|| invalid_value(pair, "integer"))?)
        } else if value_type == GroupCodeValueType::Double {
            TagValue::Float(pair.as_double().ok_or_else(|| invalid_value(pair, "float"))?)
        } else {
            TagValue::Str(pair.value_string.clone())
        };
        Ok(Self::new(pair.code, value))
    }

    pub fn as_int(&self) -> Option<i64> {
        match self.value {
            TagValue::Int(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self.value {
            TagValue::Float(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.value {
            TagValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_point3(&self) -> Option<Vector3> {
        match self.value {
            TagValue::Point3(p) => Some(p),
            _ => None,
        }
    }

    /// Integer value, or a type mismatch error
    pub fn expect_int(&self) -> Result<i64> {
        self.as_int().ok_or_else(|| self.mismatch("integer"))
    }

    /// Float value, or a type mismatch error
    pub fn expect_float(&self) -> Result<f64> {
        self.as_float().ok_or_else(|| self.mismatch("float"))
    }

    /// 3D point value, or a type mismatch error
    pub fn expect_point3(&self) -> Result<Vector3> {
        self.as_point3().ok_or_else(|| self.mismatch("3d point"))
    }

    /// Number of code/value pairs this tag occupies in a file
    pub fn flat_len(&self) -> usize {
        match self.value {
            TagValue::Point2(_) => 2,
            TagValue::Point3(_) => 3,
            _ => 1,
        }
    }

    fn mismatch(&self, expected: &'static str) -> DxfError {
        DxfError::TypeMismatch {
            code: self.code,
            expected,
            found: self.value.kind(),
        }
    }
}

fn invalid_value(pair: &DxfCodePair, expected: &str) -> DxfError {
    DxfError::Parse(format!(
        "Invalid {} value '{}' for group code {} at line {}",
        expected, pair.value_string, pair.code, pair.line
    ))
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.code, self.value)
    }
}
