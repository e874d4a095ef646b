//! Typed DXF tags and tag streams
//!
//! A tag is one group-code/value pair. [`Tags`] is an ordered, indexable
//! stream of tags with coordinate triplets folded into point tags, and
//! [`ExtendedTags`] groups one entity's tags by subclass marker.

mod extended;
mod tag;
mod tag_list;

pub use extended::ExtendedTags;
pub use tag::{Tag, TagValue};
pub use tag_list::Tags;

/// Subclass marker group code
pub const SUBCLASS_MARKER: i32 = 100;

/// Group code that opens an XDATA group
pub const XDATA_MARKER: i32 = 1001;
