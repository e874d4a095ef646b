//! Value types associated with DXF group code ranges

/// The kind of value a DXF group code carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupCodeValueType {
    /// Text value
    String,
    /// Double precision floating-point value (coordinates, distances, angles)
    Double,
    /// 8-bit integer stored in a 16-bit slot (codes 280-289)
    Byte,
    /// 16-bit integer value
    Int16,
    /// 32-bit integer value
    Int32,
    /// 64-bit integer value
    Int64,
    /// Boolean flag stored as 0/1 (codes 290-299)
    Bool,
    /// Hexadecimal handle string
    Handle,
    /// Hexadecimal binary chunk
    Binary,
    /// Code outside every known range
    Unknown,
}

impl GroupCodeValueType {
    /// Determine the value type for a group code
    pub fn from_code(code: i32) -> Self {
        match code {
            0..=4 | 6..=9 => Self::String,
            5 | 105 => Self::Handle,
            10..=59 => Self::Double,
            60..=79 => Self::Int16,
            90..=99 => Self::Int32,
            100..=102 => Self::String,
            110..=149 => Self::Double,
            160..=169 => Self::Int64,
            170..=179 => Self::Int16,
            210..=239 => Self::Double,
            270..=279 => Self::Int16,
            280..=289 => Self::Byte,
            290..=299 => Self::Bool,
            300..=309 => Self::String,
            310..=319 => Self::Binary,
            320..=369 => Self::Handle,
            370..=389 => Self::Int16,
            390..=399 => Self::Handle,
            400..=409 => Self::Int16,
            410..=419 => Self::String,
            420..=429 => Self::Int32,
            430..=439 => Self::String,
            440..=459 => Self::Int32,
            460..=469 => Self::Double,
            470..=479 => Self::String,
            480..=481 => Self::Handle,
            999 => Self::String,
            1000..=1003 | 1005..=1009 => Self::String,
            1004 => Self::Binary,
            1010..=1059 => Self::Double,
            1060..=1070 => Self::Int16,
            1071 => Self::Int32,
            _ => Self::Unknown,
        }
    }

    /// True for the integer-valued types
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            Self::Byte | Self::Int16 | Self::Int32 | Self::Int64 | Self::Bool
        )
    }

    /// Coordinate axis (0 = x, 1 = y, 2 = z) of a point group code
    ///
    /// Only codes that open a compiled point tag are considered: 10-18,
    /// 110-112 and 1010-1013 with their y (+10) and z (+20) companions.
    pub fn coordinate_axis(code: i32) -> Option<usize> {
        Self::point_base_code(code).map(|base| ((code - base) / 10) as usize)
    }

    /// The x code of the point that `code` belongs to
    pub fn point_base_code(code: i32) -> Option<i32> {
        let is_base = |c: i32| {
            (10..=18).contains(&c) || (110..=112).contains(&c) || (1010..=1013).contains(&c)
        };
        [code, code - 10, code - 20].into_iter().find(|&c| is_base(c))
    }
}
