//! Packed mesh sub-records
//!
//! A MESH entity stores its geometry as four counted runs of flat tags
//! inside the `AcDbSubDMesh` subclass:
//!
//! ```text
//!  92 <vertex count>      10/20/30 per vertex
//!  93 <face list size>    90 <n> 90 <i0> .. 90 <in-1>  per face
//!  94 <edge count>        90 <start> 90 <end>          per edge
//!  95 <crease count>      140 <crease>                 per edge
//! ```
//!
//! Each run type implements [`PackedRun`]. Decoding starts at the first
//! value tag (the index just after the counter) and reads the contiguous
//! tags of the run's value code, capped at the length the counter declares.

mod edge_array;
mod face_list;
mod vertex_array;
mod width;

pub use edge_array::{create_crease_array, create_edge_array, CreaseArray, EdgeArray, MeshEdge};
pub use face_list::{create_face_list, FaceList};
pub use vertex_array::{create_vertex_array, VertexArray};
pub use width::{face_to_array, select_width, Face, FaceIter, IndexWidth};

use crate::error::{DxfError, Result};
use crate::io::dxf::DxfStreamWriter;
use crate::tags::Tag;

/// Group codes of the packed sub-records
pub mod codes {
    /// Vertex count
    pub const VERTEX_COUNT: i32 = 92;
    /// Face list size, in tokens
    pub const FACE_LIST_SIZE: i32 = 93;
    /// Edge count
    pub const EDGE_COUNT: i32 = 94;
    /// Edge crease count
    pub const CREASE_COUNT: i32 = 95;
    /// Vertex coordinates (x; y and z at +10 and +20)
    pub const VERTEX: i32 = 10;
    /// Face and edge integers
    pub const INDEX: i32 = 90;
    /// Edge crease value
    pub const CREASE: i32 = 140;
}

/// How decoding treats counters that disagree with their runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeMode {
    /// Decode whatever is present and log a warning
    #[default]
    Lenient,
    /// Fail with [`DxfError::MalformedLength`]
    Strict,
}

/// A counted run of same-coded value tags
pub trait PackedRun: Sized {
    /// Code of the counter tag preceding the run
    const COUNTER_CODE: i32;

    /// Code shared by every value tag of the run
    const VALUE_CODE: i32;

    /// Value written into the counter tag
    fn counter_value(&self) -> usize;

    /// Number of flat value tags following the counter
    fn tag_count(&self) -> usize;

    /// Decode the run whose first value tag is at `start_index`
    ///
    /// Returns the decoded run and the number of value tags consumed.
    fn decode_run(tags: &[Tag], start_index: usize, mode: DecodeMode) -> Result<(Self, usize)>;

    /// Decode the run whose first value tag is at `start_index`
    fn decode(tags: &[Tag], start_index: usize, mode: DecodeMode) -> Result<Self> {
        Self::decode_run(tags, start_index, mode).map(|(run, _)| run)
    }

    /// Write the counter tag followed by the value tags
    fn export_dxf<W: DxfStreamWriter + ?Sized>(&self, writer: &mut W) -> Result<()>;
}

/// The contiguous tags with `code` starting at `start_index`
pub fn value_run(tags: &[Tag], start_index: usize, code: i32) -> &[Tag] {
    let rest = tags.get(start_index..).unwrap_or(&[]);
    let len = rest.iter().take_while(|t| t.code == code).count();
    &rest[..len]
}

/// Value of the counter tag just before `start_index`, if it has `counter_code`
pub fn counter_at(tags: &[Tag], start_index: usize, counter_code: i32) -> Result<Option<usize>> {
    let tag = match start_index.checked_sub(1).and_then(|i| tags.get(i)) {
        Some(tag) if tag.code == counter_code => tag,
        _ => return Ok(None),
    };
    let value = tag.expect_int()?;
    usize::try_from(value)
        .map(Some)
        .map_err(|_| DxfError::InvalidValue { code: tag.code, value })
}

/// The value tags of a counted run
///
/// `tokens_per_item` converts the counter value into a tag count. Without
/// a counter tag the whole contiguous run is returned.
pub(crate) fn read_run(
    tags: &[Tag],
    start_index: usize,
    counter_code: i32,
    value_code: i32,
    tokens_per_item: usize,
    mode: DecodeMode,
) -> Result<&[Tag]> {
    let contiguous = value_run(tags, start_index, value_code);
    let declared = match counter_at(tags, start_index, counter_code)? {
        Some(count) => count.saturating_mul(tokens_per_item),
        None => return Ok(contiguous),
    };
    if contiguous.len() != declared {
        length_mismatch(mode, counter_code, declared, contiguous.len())?;
    }
    Ok(&contiguous[..declared.min(contiguous.len())])
}

/// Apply the decode policy to a counter/run disagreement
pub(crate) fn length_mismatch(
    mode: DecodeMode,
    code: i32,
    declared: usize,
    actual: usize,
) -> Result<()> {
    match mode {
        DecodeMode::Lenient => {
            log::warn!(
                "Counter {} declares {} tags but {} are present, decoding what is available",
                code,
                declared,
                actual
            );
            Ok(())
        }
        DecodeMode::Strict => Err(DxfError::MalformedLength {
            code,
            declared,
            actual,
        }),
    }
}

/// Vertex index held by an integer tag
pub(crate) fn index_value(tag: &Tag) -> Result<u32> {
    let value = tag.expect_int()?;
    u32::try_from(value).map_err(|_| DxfError::InvalidValue {
        code: tag.code,
        value,
    })
}
