//! Shared test utilities for acadmesh integration tests.
//!
//! Test crates import this via `mod common;`.

#![allow(dead_code)]

use acadmesh::entities::Mesh;
use acadmesh::io::TagCollector;
use acadmesh::tags::Tag;

/// Tag text of the 56-vertex SubD mesh sample.
pub const SUBD_MESH: &str = include_str!("../fixtures/subd_mesh.dxf");

/// The sample mesh, decoded leniently.
pub fn sample_mesh() -> Mesh {
    Mesh::from_text(SUBD_MESH).expect("sample mesh should parse")
}

/// Flat tags of the sample's `AcDbSubDMesh` subclass.
pub fn sample_subclass_tags() -> Vec<Tag> {
    let mesh = sample_mesh();
    let tags = mesh.mesh_tags().expect("mesh subclass");
    TagCollector::dxftags(|w| tags.export_dxf(w)).expect("collect tags")
}

/// Count the code/value pairs of tag text.
pub fn pair_count(text: &str) -> usize {
    text.lines().count() / 2
}

/// Build a flat integer run: the counter tag followed by `90` values.
pub fn index_run(counter_code: i32, counter: i64, values: &[i64]) -> Vec<Tag> {
    let mut tags = vec![Tag::int(counter_code, counter)];
    tags.extend(values.iter().map(|&v| Tag::int(90, v)));
    tags
}

/// An entity text with only the mesh subclass and the given runs.
pub fn mesh_text(runs: &str) -> String {
    format!("0\nMESH\n100\nAcDbEntity\n8\n0\n100\nAcDbSubDMesh\n71\n2\n72\n0\n91\n0\n{runs}90\n0\n")
}
