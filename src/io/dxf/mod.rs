//! DXF tag text reading and writing

mod group_code_value;
mod reader;
mod writer;

pub use group_code_value::GroupCodeValueType;
pub use reader::{DxfCodePair, DxfStreamReader, DxfTextReader};
pub use writer::{value_type_for_code, DxfStreamWriter, DxfStreamWriterExt, DxfTextWriter, TagCollector};
