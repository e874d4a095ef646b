//! Integration tests for decoding, encoding and editing MESH packed data.

mod common;

use acadmesh::entities::{Entity, Mesh, MeshData};
use acadmesh::error::DxfError;
use acadmesh::io::TagCollector;
use acadmesh::packed::{
    create_crease_array, create_edge_array, create_face_list, create_vertex_array, DecodeMode,
    Face, IndexWidth, MeshEdge, PackedRun,
};
use acadmesh::tags::{Tag, Tags};
use acadmesh::types::{Handle, Vector3};
use common::*;

// ===========================================================================
// Sample decoding
// ===========================================================================

#[test]
fn test_sample_run_lengths() {
    let data = sample_mesh().data().unwrap();

    assert_eq!(data.vertices.len(), 56);
    assert_eq!(data.faces.len(), 54);
    assert_eq!(data.edges.len(), 108);
    assert_eq!(data.edge_crease_values.len(), 108);
}

#[test]
fn test_sample_values() {
    let data = sample_mesh().data().unwrap();

    assert_eq!(
        data.vertices[0],
        Vector3::new(284.7875769672455, 754.2780370501814, 64.23540699023241)
    );
    assert_eq!(
        data.vertices[55],
        Vector3::new(713.9110759108594, 342.1009506564315, 42.82360466015493)
    );
    assert_eq!(data.faces[0].to_vec(), vec![2, 10, 8, 0]);
    assert_eq!(data.edges[0], MeshEdge::new(2, 10));
    assert_eq!(data.edges[107], MeshEdge::new(47, 53));
    assert!(data.edge_crease_values.iter().all(|&c| c == 0.0));
}

#[test]
fn test_sample_faces_use_narrow_storage() {
    let data = sample_mesh().data().unwrap();
    assert!(data.faces.iter().all(|f| f.width() == IndexWidth::Narrow));
    assert!(data.faces.iter().all(|f| f.len() == 4));
}

#[test]
fn test_sample_strict_decode_matches_lenient() {
    let mesh = sample_mesh();
    let lenient = mesh.data().unwrap();
    let strict = mesh.with_decode_mode(DecodeMode::Strict).data().unwrap();
    assert_eq!(lenient, strict);
}

#[test]
fn test_sample_entity_properties() {
    let mesh = sample_mesh();
    assert_eq!(mesh.handle(), Handle::new(0x2E2));
    assert_eq!(mesh.owner(), Handle::new(0x1F));
    assert_eq!(mesh.layer(), "0");
    assert_eq!(mesh.subdivision_levels(), 3);
}

// ===========================================================================
// Encoding
// ===========================================================================

#[test]
fn test_face_run_tag_count() {
    let data = sample_mesh().data().unwrap();
    let tags = TagCollector::dxftags(|w| data.faces.export_dxf(w)).unwrap();

    assert_eq!(tags.len(), 271);
    assert_eq!(tags[0], Tag::int(93, 270));
    assert_eq!(tags[1], Tag::int(90, 4));
    assert_eq!(tags[2], Tag::int(90, 2));
}

#[test]
fn test_edge_run_tag_count() {
    let data = sample_mesh().data().unwrap();
    let tags = TagCollector::dxftags(|w| data.edges.export_dxf(w)).unwrap();

    assert_eq!(tags.len(), 217);
    assert_eq!(tags[0], Tag::int(94, 108));
}

#[test]
fn test_crease_and_vertex_run_tag_counts() {
    let data = sample_mesh().data().unwrap();

    let creases = TagCollector::dxftags(|w| data.edge_crease_values.export_dxf(w)).unwrap();
    assert_eq!(creases.len(), 109);
    assert_eq!(creases[0], Tag::int(95, 108));

    let vertices = TagCollector::dxftags(|w| data.vertices.export_dxf(w)).unwrap();
    assert_eq!(vertices.len(), 1 + 3 * 56);
    assert_eq!(vertices[0], Tag::int(92, 56));
    assert_eq!(vertices[1], Tag::float(10, 284.7875769672455));
}

#[test]
fn test_reencode_reproduces_subclass() {
    let original = sample_subclass_tags();
    let mut mesh = sample_mesh();
    mesh.edit_with(|_| Ok(())).unwrap();

    let tags = mesh.mesh_tags().unwrap();
    let reencoded = TagCollector::dxftags(|w| tags.export_dxf(w)).unwrap();
    assert_eq!(reencoded, original);
    assert_eq!(original.len(), 771);
}

#[test]
fn test_override_count_survives_edit() {
    let mut mesh = sample_mesh();
    mesh.edit_with(|data| {
        data.faces.clear();
        Ok(())
    })
    .unwrap();

    let tags = mesh.mesh_tags().unwrap();
    assert_eq!(tags.last(), Some(&Tag::int(90, 0)));
    assert_eq!(tags.get_first_tag(93), Some(&Tag::int(93, 0)));
}

#[test]
fn test_text_round_trip() {
    let mesh = sample_mesh();
    let text = mesh.to_text().unwrap();

    assert_eq!(pair_count(&text), pair_count(SUBD_MESH));
    assert_eq!(Mesh::from_text(&text).unwrap(), mesh);
}

// ===========================================================================
// Run helpers
// ===========================================================================

#[test]
fn test_run_helpers_decode_at_value_index() {
    let tags = sample_mesh().mesh_tags().unwrap().clone();

    let vertices = create_vertex_array(&tags, tags.tag_index(92).unwrap() + 1).unwrap();
    let faces = create_face_list(&tags, tags.tag_index(93).unwrap() + 1).unwrap();
    let edges = create_edge_array(&tags, tags.tag_index(94).unwrap() + 1).unwrap();
    let creases = create_crease_array(&tags, tags.tag_index(95).unwrap() + 1).unwrap();

    assert_eq!(
        (vertices.len(), faces.len(), edges.len(), creases.len()),
        (56, 54, 108, 108)
    );
}

#[test]
fn test_short_face_run() {
    // counter says 6 tokens, only 4 follow
    let mut tags = index_run(93, 6, &[3, 0, 1, 2]);
    tags.push(Tag::int(94, 0));

    let faces = create_face_list(&tags, 1).unwrap();
    assert_eq!(faces.len(), 1);
    assert_eq!(faces[0].to_vec(), vec![0, 1, 2]);

    let err = acadmesh::packed::FaceList::decode(&tags, 1, DecodeMode::Strict).unwrap_err();
    assert!(matches!(
        err,
        DxfError::MalformedLength { code: 93, declared: 6, actual: 4 }
    ));
}

#[test]
fn test_wide_face_indices() {
    let tags = index_run(93, 4, &[3, 70000, 255, 256]);
    let faces = create_face_list(&tags, 1).unwrap();

    assert_eq!(faces[0].width(), IndexWidth::Wide);
    assert_eq!(faces[0].to_vec(), vec![70000, 255, 256]);
}

#[test]
fn test_negative_counter_rejected() {
    let tags = index_run(94, -1, &[0, 1]);
    assert!(matches!(
        create_edge_array(&tags, 1),
        Err(DxfError::InvalidValue { code: 94, value: -1 })
    ));
}

// ===========================================================================
// Edit sessions
// ===========================================================================

#[test]
fn test_edit_session_commit() {
    let mut mesh = Mesh::new();
    {
        let mut data = mesh.edit_data().unwrap();
        data.add_face(&[
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(1.0, 1.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
        ])
        .unwrap();
        for i in 0..4 {
            data.add_edge_crease(i, (i + 1) % 4, 1.5);
        }
        data.commit().unwrap();
    }

    let data = mesh.data().unwrap();
    assert_eq!(data.vertices.len(), 4);
    assert_eq!(data.faces[0], Face::from([0, 1, 2, 3]));
    assert_eq!(data.edges.len(), 4);
    assert_eq!(data.edge_crease_values.len(), 4);
}

#[test]
fn test_edit_session_discard() {
    let mut mesh = sample_mesh();
    let before = mesh.clone();
    {
        let mut data = mesh.edit_data().unwrap();
        data.vertices.clear();
        data.discard();
    }
    assert_eq!(mesh, before);
}

fn require_faces(data: &MeshData) -> acadmesh::Result<()> {
    if data.faces.is_empty() {
        return Err(DxfError::Custom("mesh has no faces".into()));
    }
    Ok(())
}

fn clear_then_fail(mesh: &mut Mesh) -> acadmesh::Result<()> {
    let mut data = mesh.edit_data()?;
    data.vertices.clear();
    data.faces.clear();
    require_faces(&data)?;
    data.commit()
}

#[test]
fn test_edit_session_error_return_does_not_write() {
    let mut mesh = sample_mesh();
    let before = mesh.clone();

    assert!(clear_then_fail(&mut mesh).is_err());
    assert_eq!(mesh, before);

    let data = mesh.data().unwrap();
    assert_eq!(data.vertices.len(), 56);
    assert_eq!(data.faces.len(), 54);
}

#[test]
fn test_edit_session_dropped_does_not_write() {
    let mut mesh = sample_mesh();
    let before = mesh.clone();
    {
        let mut data = mesh.edit_data().unwrap();
        data.edges.clear();
    }
    assert_eq!(mesh, before);
}

#[test]
fn test_edit_session_panic_does_not_write() {
    let mut mesh = sample_mesh();
    let before = mesh.clone();

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let mut data = mesh.edit_data().unwrap();
        data.vertices.clear();
        panic!("edit aborted");
    }));

    assert!(result.is_err());
    assert_eq!(mesh, before);
}

#[test]
fn test_edit_with_failure_does_not_write() {
    let mut mesh = sample_mesh();
    let before = mesh.clone();

    let err = mesh
        .edit_with(|data| {
            data.edges.clear();
            Err::<(), _>(DxfError::Custom("rejected".into()))
        })
        .unwrap_err();

    assert_eq!(err.to_string(), "rejected");
    assert_eq!(mesh, before);
}

#[test]
fn test_optimize_through_edit() {
    let mut mesh = Mesh::new();
    let square = [
        Vector3::new(0.0, 0.0, 0.0),
        Vector3::new(1.0, 0.0, 0.0),
        Vector3::new(1.0, 1.0, 0.0),
    ];
    let removed = mesh
        .edit_with(|data| {
            data.add_face(&square)?;
            data.add_face(&square)?;
            Ok(data.optimize(4))
        })
        .unwrap();

    assert_eq!(removed, 3);
    let data = mesh.data().unwrap();
    assert_eq!(data.vertices.len(), 3);
    assert_eq!(data.faces[0], data.faces[1]);
}

// ===========================================================================
// Malformed entities
// ===========================================================================

#[test]
fn test_strict_crease_mismatch() {
    let text = mesh_text("92\n0\n93\n0\n94\n1\n90\n0\n90\n1\n95\n2\n140\n1.0\n140\n2.0\n");
    let mesh = Mesh::from_text(&text).unwrap();
    assert_eq!(mesh.data().unwrap().edge_crease_values.len(), 2);

    let err = mesh.with_decode_mode(DecodeMode::Strict).data().unwrap_err();
    assert!(matches!(err, DxfError::CreaseCountMismatch { edges: 1, creases: 2 }));
}

#[test]
fn test_string_in_index_run() {
    let text = mesh_text("93\n2\n90\n1\n90\nabc\n");
    let err = Mesh::from_text(&text).unwrap_err();
    assert!(matches!(err, DxfError::Parse(_)));
}

#[test]
fn test_missing_runs_decode_empty() {
    let mesh = Mesh::from_text(&mesh_text("")).unwrap();
    assert_eq!(mesh.data().unwrap(), MeshData::default());
}

#[test]
fn test_compiled_vertex_tags() {
    let tags = Tags::from_text("92\n1\n10\n1.0\n20\n2.0\n30\n3.0\n").unwrap();
    assert_eq!(tags.len(), 2);
    assert_eq!(tags[1], Tag::point3(10, Vector3::new(1.0, 2.0, 3.0)));
}
