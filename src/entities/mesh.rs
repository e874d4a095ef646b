//! Mesh (SubD mesh) entity implementation.
//!
//! A MESH entity keeps its geometry as packed runs inside the
//! `AcDbSubDMesh` subclass. [`Mesh`] owns the entity's tags;
//! [`MeshData`] is the decoded, editable form of the four runs. Edits go
//! through [`Mesh::edit_data`] or [`Mesh::edit_with`], which re-encode the
//! runs and splice them back in place of the old ones.

use crate::entities::{Entity, ENTITY_SUBCLASS};
use crate::error::{DxfError, Result};
use crate::io::dxf::{DxfStreamWriter, DxfTextWriter, TagCollector};
use crate::packed::{
    codes, value_run, CreaseArray, DecodeMode, EdgeArray, Face, FaceList, MeshEdge, PackedRun,
    VertexArray,
};
use crate::tags::{ExtendedTags, Tag, TagValue, Tags};
use crate::types::Vector3;
use ahash::RandomState;
use indexmap::IndexSet;
use std::ops::{Deref, DerefMut, Range};

/// Subclass marker of the mesh-specific tags
pub const MESH_SUBCLASS: &str = "AcDbSubDMesh";

const VERSION_CODE: i32 = 71;
const BLEND_CREASE_CODE: i32 = 72;
const SUBDIVISION_LEVELS_CODE: i32 = 91;
const OVERRIDE_COUNT_CODE: i32 = 90;

const PACKED_COUNTERS: [i32; 4] = [
    codes::VERTEX_COUNT,
    codes::FACE_LIST_SIZE,
    codes::EDGE_COUNT,
    codes::CREASE_COUNT,
];

/// Highest rounding precision honoured by [`MeshData::optimize`]
pub const MAX_OPTIMIZE_PRECISION: u32 = 15;

// ============================================================================
// Mesh Data
// ============================================================================

/// Decoded packed data of a MESH entity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    /// Mesh vertices.
    pub vertices: VertexArray,
    /// Faces as vertex index lists.
    pub faces: FaceList,
    /// Edges as vertex index pairs.
    pub edges: EdgeArray,
    /// One crease value per edge, by position.
    pub edge_crease_values: CreaseArray,
}

impl MeshData {
    /// Creates empty mesh data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes the packed runs of an `AcDbSubDMesh` subclass.
    pub fn decode(tags: &[Tag], mode: DecodeMode) -> Result<Self> {
        Self::decode_with_span(tags, mode).map(|(data, _)| data)
    }

    /// Decodes the packed runs and returns the tag range they occupy.
    ///
    /// Only tags before the override count are searched. Without any packed
    /// counter the range is empty and sits just before the override count, or
    /// at the end of the subclass.
    pub fn decode_with_span(tags: &[Tag], mode: DecodeMode) -> Result<(Self, Range<usize>)> {
        let limit = packed_limit(tags);
        let tags = &tags[..limit];
        let mut cursor = 0;
        let mut span = None;

        let data = MeshData {
            vertices: decode_section(tags, &mut cursor, &mut span, mode)?,
            faces: decode_section(tags, &mut cursor, &mut span, mode)?,
            edges: decode_section(tags, &mut cursor, &mut span, mode)?,
            edge_crease_values: decode_section(tags, &mut cursor, &mut span, mode)?,
        };

        let creases = data.edge_crease_values.len();
        if creases > 0 && creases != data.edges.len() {
            match mode {
                DecodeMode::Lenient => log::warn!(
                    "Mesh has {} edges but {} crease values",
                    data.edges.len(),
                    creases
                ),
                DecodeMode::Strict => {
                    return Err(DxfError::CreaseCountMismatch {
                        edges: data.edges.len(),
                        creases,
                    })
                }
            }
        }

        log::debug!(
            "Decoded mesh data: {} vertices, {} faces, {} edges, {} creases",
            data.vertices.len(),
            data.faces.len(),
            data.edges.len(),
            creases
        );

        let span = span.unwrap_or(limit..limit);
        Ok((data, span))
    }

    /// Number of flat tags the packed runs occupy, counters included.
    pub fn tag_count(&self) -> usize {
        4 + self.vertices.tag_count()
            + self.faces.tag_count()
            + self.edges.tag_count()
            + self.edge_crease_values.tag_count()
    }

    /// Writes all four runs in stream order.
    pub fn export_dxf<W: DxfStreamWriter + ?Sized>(&self, writer: &mut W) -> Result<()> {
        self.vertices.export_dxf(writer)?;
        self.faces.export_dxf(writer)?;
        self.edges.export_dxf(writer)?;
        self.edge_crease_values.export_dxf(writer)
    }

    /// Encodes all four runs as compiled tags.
    pub fn to_tags(&self) -> Result<Tags> {
        let flat = TagCollector::dxftags(|w| self.export_dxf(w))?;
        Tags::compile_points(flat)
    }

    /// Appends the vertices of a face and the face itself, returns the face index.
    ///
    /// Fails without changes when the new vertices would not be addressable
    /// by 32-bit indices.
    pub fn add_face(&mut self, vertices: &[Vector3]) -> Result<usize> {
        let total = self.vertices.len().saturating_add(vertices.len());
        let base = match (u32::try_from(self.vertices.len()), u32::try_from(total)) {
            (Ok(base), Ok(_)) => base,
            _ => {
                return Err(DxfError::Custom(format!(
                    "Mesh vertex count {} exceeds the 32-bit index range",
                    total
                )))
            }
        };
        self.vertices.extend_from_slice(vertices);
        let indices: Vec<u32> = (base..).take(vertices.len()).collect();
        self.faces.add(&indices);
        Ok(self.faces.len() - 1)
    }

    /// Appends an edge together with its crease value.
    pub fn add_edge_crease(&mut self, start: u32, end: u32, crease: f64) {
        self.edges.push(MeshEdge::new(start, end));
        self.edge_crease_values.push(crease);
    }

    /// Merges vertices that are equal when rounded to `precision` decimal
    /// places and remaps face and edge indices. Returns the number of
    /// vertices removed.
    ///
    /// `precision` is capped at [`MAX_OPTIMIZE_PRECISION`]. The first vertex
    /// of each group is kept. Indices that do not refer to an existing vertex
    /// are left unchanged.
    pub fn optimize(&mut self, precision: u32) -> usize {
        let scale = 10f64.powi(precision.min(MAX_OPTIMIZE_PRECISION) as i32);
        let mut keys: IndexSet<[u64; 3], RandomState> = IndexSet::with_hasher(RandomState::new());
        let mut unique = Vec::with_capacity(self.vertices.len());

        let remap: Vec<usize> = self
            .vertices
            .iter()
            .map(|v| {
                // adding 0.0 folds -0.0 into 0.0
                let key = v.to_array().map(|c| ((c * scale).round() + 0.0).to_bits());
                let (index, inserted) = keys.insert_full(key);
                if inserted {
                    unique.push(*v);
                }
                index
            })
            .collect();

        let removed = self.vertices.len() - unique.len();
        if removed == 0 {
            return 0;
        }

        let map = |i: u32| {
            remap
                .get(i as usize)
                .and_then(|&j| u32::try_from(j).ok())
                .unwrap_or(i)
        };
        for face in self.faces.iter_mut() {
            let indices: Vec<u32> = face.iter().map(map).collect();
            *face = Face::new(&indices);
        }
        for edge in self.edges.iter_mut() {
            *edge = MeshEdge::new(map(edge.start), map(edge.end));
        }
        *self.vertices = unique;

        log::debug!("Merged {} coincident mesh vertices", removed);
        removed
    }
}

/// Decodes the next run of type `T` at or after `cursor`, widening `span`
/// over its counter and values.
fn decode_section<T: PackedRun + Default>(
    tags: &[Tag],
    cursor: &mut usize,
    span: &mut Option<Range<usize>>,
    mode: DecodeMode,
) -> Result<T> {
    let counter = match tags[*cursor..].iter().position(|t| t.code == T::COUNTER_CODE) {
        Some(offset) => *cursor + offset,
        None => return Ok(T::default()),
    };

    let (run, consumed) = T::decode_run(tags, counter + 1, mode)?;
    let end = counter + 1 + consumed;
    *span = Some(match span.take() {
        Some(previous) => previous.start..end,
        None => counter..end,
    });
    *cursor = end;
    Ok(run)
}

/// Index of the override count (90) that closes the packed data, or the
/// end of the subclass when there is none.
///
/// Runs are skipped by their declared length, so the `90` values of face
/// and edge runs are not mistaken for it. Override data after this tag
/// reuses codes 91 and 92.
fn packed_limit(tags: &[Tag]) -> usize {
    let mut index = 0;
    while let Some(tag) = tags.get(index) {
        let (value_code, per_item) = match tag.code {
            codes::VERTEX_COUNT => (codes::VERTEX, 1),
            codes::FACE_LIST_SIZE => (codes::INDEX, 1),
            codes::EDGE_COUNT => (codes::INDEX, 2),
            codes::CREASE_COUNT => (codes::CREASE, 1),
            OVERRIDE_COUNT_CODE => return index,
            _ => {
                index += 1;
                continue;
            }
        };
        index += 1;
        let run = value_run(tags, index, value_code).len();
        let declared = tag
            .as_int()
            .and_then(|n| usize::try_from(n).ok())
            .map_or(run, |n| n.saturating_mul(per_item));
        index += run.min(declared);
    }
    tags.len()
}

// ============================================================================
// Mesh Entity
// ============================================================================

/// Mesh (SubDMesh) entity.
///
/// # Example
///
/// ```ignore
/// use acadmesh::entities::Mesh;
/// use acadmesh::types::Vector3;
///
/// let mut mesh = Mesh::new();
/// {
///     let mut data = mesh.edit_data()?;
///     data.add_face(&[
///         Vector3::new(0.0, 0.0, 0.0),
///         Vector3::new(1.0, 0.0, 0.0),
///         Vector3::new(1.0, 1.0, 0.0),
///     ])?;
///     data.commit()?;
/// }
/// assert_eq!(mesh.data()?.faces.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    tags: ExtendedTags,
    decode_mode: DecodeMode,
}

impl Mesh {
    /// Creates a new empty mesh on layer `0`.
    pub fn new() -> Self {
        let data = Tags::from_vec(vec![
            Tag::string(0, "MESH"),
            Tag::string(100, ENTITY_SUBCLASS),
            Tag::string(8, "0"),
            Tag::string(100, MESH_SUBCLASS),
            Tag::int(VERSION_CODE, 2),
            Tag::int(BLEND_CREASE_CODE, 0),
            Tag::int(SUBDIVISION_LEVELS_CODE, 0),
            Tag::int(codes::VERTEX_COUNT, 0),
            Tag::int(codes::FACE_LIST_SIZE, 0),
            Tag::int(codes::EDGE_COUNT, 0),
            Tag::int(codes::CREASE_COUNT, 0),
            Tag::int(OVERRIDE_COUNT_CODE, 0),
        ]);
        Self {
            tags: ExtendedTags::from_tags(data),
            decode_mode: DecodeMode::default(),
        }
    }

    /// Parses the tag text of one MESH entity.
    pub fn from_text(text: &str) -> Result<Self> {
        Self::from_tags(ExtendedTags::from_text(text)?)
    }

    /// Wraps grouped tags, checking the entity type and mesh subclass.
    pub fn from_tags(tags: ExtendedTags) -> Result<Self> {
        match tags.dxftype() {
            Some("MESH") => {}
            other => {
                return Err(DxfError::InvalidEntityType(
                    other.unwrap_or("<missing>").to_string(),
                ))
            }
        }
        if tags.subclass(MESH_SUBCLASS).is_none() {
            return Err(DxfError::MissingSubclass(MESH_SUBCLASS.to_string()));
        }
        Ok(Self {
            tags,
            decode_mode: DecodeMode::default(),
        })
    }

    /// Sets how packed runs with inconsistent counters are decoded.
    pub fn with_decode_mode(mut self, mode: DecodeMode) -> Self {
        self.decode_mode = mode;
        self
    }

    /// Decode mode used by [`data`](Self::data) and the edit methods.
    pub fn decode_mode(&self) -> DecodeMode {
        self.decode_mode
    }

    /// The `AcDbSubDMesh` subclass tags.
    pub fn mesh_tags(&self) -> Result<&Tags> {
        self.tags
            .subclass(MESH_SUBCLASS)
            .ok_or_else(|| DxfError::MissingSubclass(MESH_SUBCLASS.to_string()))
    }

    fn mesh_tags_mut(&mut self) -> Result<&mut Tags> {
        self.tags
            .subclass_mut(MESH_SUBCLASS)
            .ok_or_else(|| DxfError::MissingSubclass(MESH_SUBCLASS.to_string()))
    }

    /// First tag with `code` ahead of the override count.
    fn int_property(&self, code: i32) -> Option<i64> {
        let tags = self.mesh_tags().ok()?;
        tags[..packed_limit(tags)]
            .iter()
            .find(|t| t.code == code)?
            .as_int()
    }

    /// Replaces a mesh property, inserting it before the packed runs when absent.
    fn set_int_property(&mut self, code: i32, value: i64) -> Result<()> {
        let tags = self.mesh_tags_mut()?;
        let limit = packed_limit(tags);
        let tag = Tag::int(code, value);

        let head = &tags[..limit];
        let range = match head.iter().position(|t| t.code == code) {
            Some(index) => index..index + 1,
            None => {
                let at = head
                    .iter()
                    .position(|t| PACKED_COUNTERS.contains(&t.code))
                    .unwrap_or(limit);
                at..at
            }
        };
        tags.splice(range, [tag]);
        Ok(())
    }

    /// Mesh object version (71), 2 when absent.
    pub fn version(&self) -> i16 {
        self.int_property(VERSION_CODE).map_or(2, |v| v as i16)
    }

    pub fn set_version(&mut self, version: i16) -> Result<()> {
        self.set_int_property(VERSION_CODE, version.into())
    }

    /// Whether creases blend at vertices (72).
    pub fn blend_crease(&self) -> bool {
        self.int_property(BLEND_CREASE_CODE).is_some_and(|v| v != 0)
    }

    pub fn set_blend_crease(&mut self, blend: bool) -> Result<()> {
        self.set_int_property(BLEND_CREASE_CODE, blend as i64)
    }

    /// Number of subdivision levels (91), 0 when absent.
    pub fn subdivision_levels(&self) -> i32 {
        self.int_property(SUBDIVISION_LEVELS_CODE).map_or(0, |v| v as i32)
    }

    pub fn set_subdivision_levels(&mut self, levels: i32) -> Result<()> {
        self.set_int_property(SUBDIVISION_LEVELS_CODE, levels.into())
    }

    /// Sets the layer name (8) in the `AcDbEntity` subclass.
    pub fn set_layer(&mut self, layer: &str) -> Result<()> {
        let tags = self
            .tags
            .subclass_mut(ENTITY_SUBCLASS)
            .ok_or_else(|| DxfError::MissingSubclass(ENTITY_SUBCLASS.to_string()))?;
        tags.set_first(8, TagValue::Str(layer.to_string()));
        Ok(())
    }

    /// Decodes a snapshot of the packed data.
    pub fn data(&self) -> Result<MeshData> {
        MeshData::decode(self.mesh_tags()?, self.decode_mode)
    }

    /// Opens an edit session on the packed data.
    ///
    /// The session holds the mesh exclusively until it ends. Changes are
    /// written back only by [`MeshDataEdit::commit`]; a session dropped
    /// without a commit, including one left through `?`, writes nothing.
    pub fn edit_data(&mut self) -> Result<MeshDataEdit<'_>> {
        let (data, span) = MeshData::decode_with_span(self.mesh_tags()?, self.decode_mode)?;
        Ok(MeshDataEdit {
            mesh: self,
            data,
            span,
            modified: false,
            finished: false,
        })
    }

    /// Runs `edit` on the decoded data and writes it back if `edit` succeeds.
    ///
    /// When `edit` fails the entity tags are left untouched.
    pub fn edit_with<T, F>(&mut self, edit: F) -> Result<T>
    where
        F: FnOnce(&mut MeshData) -> Result<T>,
    {
        let (mut data, span) = MeshData::decode_with_span(self.mesh_tags()?, self.decode_mode)?;
        let output = edit(&mut data)?;
        self.write_data(&data, span)?;
        Ok(output)
    }

    /// Replaces the packed runs in `span` with the encoding of `data`.
    fn write_data(&mut self, data: &MeshData, span: Range<usize>) -> Result<()> {
        let encoded = data.to_tags()?;
        let tags = self.mesh_tags_mut()?;
        if span.end > tags.len() {
            return Err(DxfError::Custom(format!(
                "Packed data range {:?} outside mesh subclass of {} tags",
                span,
                tags.len()
            )));
        }
        tags.splice(span, encoded);
        log::debug!("Committed mesh data ({} tags)", data.tag_count());
        Ok(())
    }

    /// Writes the entity as ASCII DXF tag text.
    pub fn to_text(&self) -> Result<String> {
        let mut writer = DxfTextWriter::new(Vec::new());
        self.tags.export_dxf(&mut writer)?;
        String::from_utf8(writer.into_inner()).map_err(|e| DxfError::Custom(e.to_string()))
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for Mesh {
    fn entity_type(&self) -> &'static str {
        "MESH"
    }

    fn extended_tags(&self) -> &ExtendedTags {
        &self.tags
    }
}

// ============================================================================
// Edit Session
// ============================================================================

/// An open edit session on a mesh's packed data.
///
/// Dereferences to [`MeshData`]. Only [`commit`](Self::commit) writes the
/// changes back; dropping the session or calling [`discard`](Self::discard)
/// leaves the entity untouched.
#[derive(Debug)]
#[must_use = "mesh data changes are only written by `commit`"]
pub struct MeshDataEdit<'a> {
    mesh: &'a mut Mesh,
    data: MeshData,
    span: Range<usize>,
    modified: bool,
    finished: bool,
}

impl MeshDataEdit<'_> {
    /// Writes the edited data back into the entity tags.
    pub fn commit(mut self) -> Result<()> {
        self.finished = true;
        self.mesh.write_data(&self.data, self.span.clone())
    }

    /// Ends the session without writing.
    pub fn discard(mut self) {
        self.finished = true;
    }
}

impl Deref for MeshDataEdit<'_> {
    type Target = MeshData;

    fn deref(&self) -> &MeshData {
        &self.data
    }
}

impl DerefMut for MeshDataEdit<'_> {
    fn deref_mut(&mut self) -> &mut MeshData {
        self.modified = true;
        &mut self.data
    }
}

impl Drop for MeshDataEdit<'_> {
    fn drop(&mut self) {
        if self.modified && !self.finished && !std::thread::panicking() {
            log::warn!("Mesh data edit dropped without commit, changes discarded");
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Handle;

    const SAMPLE: &str = include_str!("../../tests/fixtures/subd_mesh.dxf");

    fn triangle() -> [Vector3; 3] {
        [
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn test_new_mesh_is_empty() {
        let mesh = Mesh::new();
        let data = mesh.data().unwrap();
        assert_eq!(data, MeshData::new());
        assert_eq!(mesh.version(), 2);
        assert!(!mesh.blend_crease());
        assert_eq!(mesh.subdivision_levels(), 0);
        assert_eq!(mesh.layer(), "0");
    }

    #[test]
    fn test_sample_properties() {
        let mesh = Mesh::from_text(SAMPLE).unwrap();
        assert_eq!(mesh.handle(), Handle::new(0x2E2));
        assert_eq!(mesh.owner(), Handle::new(0x1F));
        assert_eq!(mesh.version(), 2);
        assert!(!mesh.blend_crease());
        assert_eq!(mesh.subdivision_levels(), 3);
    }

    #[test]
    fn test_sample_data_counts() {
        let mesh = Mesh::from_text(SAMPLE).unwrap();
        let data = mesh.data().unwrap();
        assert_eq!(data.vertices.len(), 56);
        assert_eq!(data.faces.len(), 54);
        assert_eq!(data.edges.len(), 108);
        assert_eq!(data.edge_crease_values.len(), 108);
    }

    #[test]
    fn test_sample_span_covers_packed_runs() {
        let mesh = Mesh::from_text(SAMPLE).unwrap();
        let tags = mesh.mesh_tags().unwrap();
        let (_, span) = MeshData::decode_with_span(tags, DecodeMode::Strict).unwrap();

        assert_eq!(span.start, tags.tag_index(92).unwrap());
        // the override count is the only tag after the runs
        assert_eq!(span.end, tags.len() - 1);
    }

    #[test]
    fn test_edit_commit() {
        let mut mesh = Mesh::new();
        {
            let mut data = mesh.edit_data().unwrap();
            data.add_face(&triangle()).unwrap();
            data.add_edge_crease(0, 1, 2.0);
            data.commit().unwrap();
        }

        let data = mesh.data().unwrap();
        assert_eq!(data.vertices.len(), 3);
        assert_eq!(data.faces[0].to_vec(), vec![0, 1, 2]);
        assert_eq!(*data.edge_crease_values, vec![2.0]);
        // override count stays behind the runs
        let tags = mesh.mesh_tags().unwrap();
        assert_eq!(tags.last(), Some(&Tag::int(90, 0)));
    }

    #[test]
    fn test_edit_dropped_without_commit_writes_nothing() {
        let mut mesh = Mesh::new();
        let before = mesh.clone();
        {
            let mut data = mesh.edit_data().unwrap();
            data.add_face(&triangle()).unwrap();
        }
        assert_eq!(mesh, before);
        assert!(mesh.data().unwrap().faces.is_empty());
    }

    #[test]
    fn test_edit_discard() {
        let mut mesh = Mesh::new();
        let before = mesh.clone();
        {
            let mut data = mesh.edit_data().unwrap();
            data.add_face(&triangle()).unwrap();
            data.discard();
        }
        assert_eq!(mesh, before);
    }

    #[test]
    fn test_edit_with_error_leaves_tags() {
        let mut mesh = Mesh::from_text(SAMPLE).unwrap();
        let before = mesh.clone();

        let result: Result<()> = mesh.edit_with(|data| {
            data.vertices.clear();
            Err(DxfError::Custom("abort".into()))
        });

        assert!(result.is_err());
        assert_eq!(mesh, before);
    }

    #[test]
    fn test_edit_with_commits() {
        let mut mesh = Mesh::from_text(SAMPLE).unwrap();
        let removed = mesh
            .edit_with(|data| {
                data.faces.truncate(10);
                Ok(data.faces.len())
            })
            .unwrap();

        assert_eq!(removed, 10);
        let data = mesh.data().unwrap();
        assert_eq!(data.faces.len(), 10);
        assert_eq!(data.vertices.len(), 56);
        assert_eq!(data.edges.len(), 108);
    }

    #[test]
    fn test_properties_keep_position() {
        let mut mesh = Mesh::new();
        mesh.set_subdivision_levels(2).unwrap();
        mesh.set_blend_crease(true).unwrap();
        mesh.set_version(3).unwrap();
        assert_eq!(mesh.version(), 3);
        assert_eq!(mesh.subdivision_levels(), 2);
        assert!(mesh.blend_crease());

        let tags = mesh.mesh_tags().unwrap();
        assert!(tags.tag_index(91).unwrap() < tags.tag_index(92).unwrap());
    }

    #[test]
    fn test_missing_property_inserted_before_runs() {
        let text = "0\nMESH\n100\nAcDbEntity\n100\nAcDbSubDMesh\n92\n0\n93\n0\n94\n0\n95\n0\n";
        let mut mesh = Mesh::from_text(text).unwrap();
        assert_eq!(mesh.subdivision_levels(), 0);

        mesh.set_subdivision_levels(4).unwrap();
        let tags = mesh.mesh_tags().unwrap();
        assert_eq!(tags[1], Tag::int(91, 4));
    }

    #[test]
    fn test_subclass_without_runs() {
        let text = "0\nMESH\n100\nAcDbEntity\n100\nAcDbSubDMesh\n71\n2\n90\n0\n";
        let mut mesh = Mesh::from_text(text).unwrap();
        assert_eq!(mesh.data().unwrap(), MeshData::new());

        mesh.edit_with(|data| {
            data.add_face(&triangle()).unwrap();
            Ok(())
        })
        .unwrap();

        let tags = mesh.mesh_tags().unwrap();
        assert_eq!(tags.tag_index(92), Some(2));
        assert_eq!(tags.last(), Some(&Tag::int(90, 0)));
        assert_eq!(mesh.data().unwrap().faces.len(), 1);
    }

    #[test]
    fn test_rejects_other_entities() {
        let err = Mesh::from_text("0\nLINE\n100\nAcDbEntity\n").unwrap_err();
        assert!(matches!(err, DxfError::InvalidEntityType(ref t) if t == "LINE"));

        let err = Mesh::from_text("0\nMESH\n100\nAcDbEntity\n").unwrap_err();
        assert!(matches!(err, DxfError::MissingSubclass(_)));
    }

    #[test]
    fn test_strict_crease_count() {
        let text = "0\nMESH\n100\nAcDbSubDMesh\n92\n0\n93\n0\n94\n2\n90\n0\n90\n1\n90\n1\n90\n2\n95\n1\n140\n0.5\n";
        let lenient = Mesh::from_text(text).unwrap();
        assert_eq!(lenient.data().unwrap().edge_crease_values.len(), 1);

        let strict = lenient.with_decode_mode(DecodeMode::Strict);
        assert!(matches!(
            strict.data(),
            Err(DxfError::CreaseCountMismatch { edges: 2, creases: 1 })
        ));
    }

    #[test]
    fn test_optimize_merges_vertices() {
        let mut data = MeshData::new();
        data.add_face(&triangle()).unwrap();
        data.add_face(&[
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(1.0, 1.0, 0.0),
            Vector3::new(0.0, 1.0000001, 0.0),
        ])
        .unwrap();
        data.add_edge_crease(1, 5, 0.0);

        let removed = data.optimize(6);
        assert_eq!(removed, 2);
        assert_eq!(data.vertices.len(), 4);
        assert_eq!(data.faces[1].to_vec(), vec![1, 3, 2]);
        assert_eq!(data.edges[0], MeshEdge::new(1, 2));
    }

    #[test]
    fn test_optimize_caps_precision() {
        let mut data = MeshData::new();
        data.add_face(&[
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(2.0, 0.0, 0.0),
            Vector3::new(1.0, -0.0, 0.0),
        ])
        .unwrap();

        assert_eq!(data.optimize(u32::MAX), 1);
        assert_eq!(data.vertices.len(), 2);
        assert_eq!(data.faces[0].to_vec(), vec![0, 1, 0]);
    }

    #[test]
    fn test_add_face_returns_index() {
        let mut data = MeshData::new();
        assert_eq!(data.add_face(&triangle()).unwrap(), 0);
        assert_eq!(data.add_face(&triangle()).unwrap(), 1);
        assert_eq!(data.faces[1].to_vec(), vec![3, 4, 5]);
    }

    #[test]
    fn test_override_data_ignored() {
        // no 91 and no 92 before the override count; the override block
        // carries a 91 sub-entity marker and a 92 property count
        let text = "0\nMESH\n100\nAcDbEntity\n100\nAcDbSubDMesh\n71\n2\n\
                    93\n0\n94\n0\n95\n0\n90\n1\n91\n7\n92\n1\n90\n0\n63\n1\n";
        let mut mesh = Mesh::from_text(text).unwrap().with_decode_mode(DecodeMode::Strict);

        assert_eq!(mesh.subdivision_levels(), 0);
        assert_eq!(mesh.data().unwrap(), MeshData::new());

        mesh.set_subdivision_levels(2).unwrap();
        mesh.edit_with(|data| data.add_face(&triangle())).unwrap();

        let tags = mesh.mesh_tags().unwrap();
        assert_eq!(tags[2], Tag::int(91, 2));
        assert_eq!(tags[3], Tag::int(92, 3));
        let overrides = tags.tag_index(95).unwrap() + 1;
        assert_eq!(tags[overrides], Tag::int(90, 1));
        assert_eq!(tags[overrides + 1], Tag::int(91, 7));
        assert_eq!(tags[overrides + 2], Tag::int(92, 1));
        assert_eq!(mesh.subdivision_levels(), 2);
        assert_eq!(mesh.data().unwrap().vertices.len(), 3);
    }

    #[test]
    fn test_to_text_round_trip() {
        let mesh = Mesh::from_text(SAMPLE).unwrap();
        let text = mesh.to_text().unwrap();
        let reread = Mesh::from_text(&text).unwrap();
        assert_eq!(reread, mesh);
    }
}
