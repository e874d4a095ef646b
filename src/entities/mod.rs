//! CAD entity types and traits

use crate::error::Result;
use crate::io::dxf::DxfStreamWriter;
use crate::tags::ExtendedTags;
use crate::types::Handle;

pub mod mesh;

pub use mesh::{Mesh, MeshData, MeshDataEdit, MESH_SUBCLASS};

/// Subclass marker of the tags common to all entities
pub const ENTITY_SUBCLASS: &str = "AcDbEntity";

/// Base trait for entities backed by their DXF tags
pub trait Entity {
    /// DXF type name, as written in the leading `0` tag
    fn entity_type(&self) -> &'static str;

    /// The entity's tags grouped by subclass
    fn extended_tags(&self) -> &ExtendedTags;

    /// Get the entity's unique handle (5), null when absent
    fn handle(&self) -> Handle {
        hex_handle(self.extended_tags(), 5)
    }

    /// Get the owner handle (330), null when absent
    fn owner(&self) -> Handle {
        hex_handle(self.extended_tags(), 330)
    }

    /// Get the entity's layer name (8), `0` when absent
    fn layer(&self) -> &str {
        self.extended_tags()
            .subclass(ENTITY_SUBCLASS)
            .and_then(|tags| tags.get_first_tag(8))
            .and_then(|tag| tag.as_str())
            .unwrap_or("0")
    }

    /// Write all tags of the entity
    fn export_dxf<W: DxfStreamWriter + ?Sized>(&self, writer: &mut W) -> Result<()>
    where
        Self: Sized,
    {
        self.extended_tags().export_dxf(writer)
    }
}

fn hex_handle(tags: &ExtendedTags, code: i32) -> Handle {
    tags.noclass()
        .get_first_tag(code)
        .and_then(|tag| tag.as_str())
        .and_then(Handle::from_hex)
        .unwrap_or(Handle::NULL)
}
