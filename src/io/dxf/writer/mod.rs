//! DXF tag writing

mod stream_writer;
mod tag_collector;
mod text_writer;

pub use stream_writer::{value_type_for_code, DxfStreamWriter, DxfStreamWriterExt};
pub use tag_collector::TagCollector;
pub use text_writer::DxfTextWriter;
