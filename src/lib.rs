//! # acadmesh
//!
//! A pure Rust codec for the packed geometry of DXF `MESH` entities.
//!
//! A SubD mesh stores its vertices, faces, edges and edge creases as four
//! counted runs inside the `AcDbSubDMesh` subclass. This library decodes
//! those runs into typed arrays, lets callers edit them, and writes them
//! back in place while leaving every other tag of the entity untouched.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use acadmesh::entities::Mesh;
//!
//! let text = std::fs::read_to_string("mesh.dxf")?;
//! let mut mesh = Mesh::from_text(&text)?;
//!
//! let data = mesh.data()?;
//! println!("{} vertices, {} faces", data.vertices.len(), data.faces.len());
//!
//! mesh.edit_with(|data| {
//!     data.optimize(6);
//!     Ok(())
//! })?;
//!
//! std::fs::write("mesh_out.dxf", mesh.to_text()?)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! - [`io`] - ASCII tag reading and writing
//! - [`tags`] - typed tags, compiled point tags and subclass grouping
//! - [`packed`] - the four packed run codecs and compact face storage
//! - [`entities`] - the `MESH` entity and its edit sessions

#![allow(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod entities;
pub mod error;
pub mod io;
pub mod packed;
pub mod tags;
pub mod types;

// Re-export commonly used types
pub use error::{DxfError, Result};
pub use types::{Handle, Vector2, Vector3};

// Re-export entity types
pub use entities::{Entity, Mesh, MeshData, MeshDataEdit};

// Re-export packed data types
pub use packed::{
    CreaseArray, DecodeMode, EdgeArray, Face, FaceList, IndexWidth, MeshEdge, PackedRun,
    VertexArray,
};

// Re-export tag types
pub use tags::{ExtendedTags, Tag, TagValue, Tags};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
