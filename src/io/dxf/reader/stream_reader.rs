//! DXF stream reader trait and raw code/value pairs

use crate::error::Result;
use crate::io::dxf::GroupCodeValueType;

/// A raw DXF code/value pair, before typing into a [`Tag`](crate::tags::Tag)
#[derive(Debug, Clone, PartialEq)]
pub struct DxfCodePair {
    /// The DXF group code
    pub code: i32,

    /// String representation of the value
    pub value_string: String,

    /// Source line of the code, for diagnostics
    pub line: usize,
}

impl DxfCodePair {
    /// Create a new code/value pair
    pub fn new(code: i32, value_string: String) -> Self {
        Self {
            code,
            value_string,
            line: 0,
        }
    }

    /// The value type implied by the group code
    pub fn value_type(&self) -> GroupCodeValueType {
        GroupCodeValueType::from_code(self.code)
    }

    /// Get value as integer
    pub fn as_int(&self) -> Option<i64> {
        self.value_string.trim().parse::<i64>().ok()
    }

    /// Get value as double
    pub fn as_double(&self) -> Option<f64> {
        self.value_string.trim().parse::<f64>().ok()
    }
}

/// Trait for reading DXF code/value pairs from a stream
pub trait DxfStreamReader {
    /// Read the next code/value pair
    fn read_pair(&mut self) -> Result<Option<DxfCodePair>>;

    /// Peek at the next code without consuming it
    fn peek_code(&mut self) -> Result<Option<i32>>;

    /// Push a pair back to be read again on next read_pair call
    fn push_back(&mut self, pair: DxfCodePair);
}
