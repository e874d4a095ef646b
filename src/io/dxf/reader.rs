//! DXF tag text reading

mod stream_reader;
mod text_reader;

pub use stream_reader::{DxfCodePair, DxfStreamReader};
pub use text_reader::DxfTextReader;
