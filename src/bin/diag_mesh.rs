//! Diagnostic: decode the packed data of a MESH entity and check that
//! re-encoding it reproduces the original tags.
//!
//! Usage: `diag_mesh <mesh.dxf> [--strict]`

use acadmesh::entities::{Entity, Mesh};
use acadmesh::packed::{DecodeMode, IndexWidth};
use anyhow::{bail, Context};
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut path = None;
    let mut mode = DecodeMode::Lenient;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--strict" => mode = DecodeMode::Strict,
            _ => path = Some(PathBuf::from(arg)),
        }
    }
    let Some(path) = path else {
        bail!("usage: diag_mesh <mesh.dxf> [--strict]");
    };

    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("reading {}", path.display()))?;
    let mesh = Mesh::from_text(&text)
        .with_context(|| format!("parsing {}", path.display()))?
        .with_decode_mode(mode);

    let data = mesh.data().context("decoding packed data")?;
    println!("Mesh {} on layer {}", mesh.handle(), mesh.layer());
    println!(
        "  version={} blend_crease={} levels={}",
        mesh.version(),
        mesh.blend_crease(),
        mesh.subdivision_levels()
    );
    println!("  vertices: {}", data.vertices.len());
    println!("  faces:    {}", data.faces.len());
    println!("  edges:    {}", data.edges.len());
    println!("  creases:  {}", data.edge_crease_values.len());

    for width in [IndexWidth::Narrow, IndexWidth::Medium, IndexWidth::Wide] {
        let count = data.faces.iter().filter(|f| f.width() == width).count();
        if count > 0 {
            println!("  {:?} faces: {}", width, count);
        }
    }

    let mut reencoded = mesh.clone();
    reencoded.edit_with(|_| Ok(())).context("re-encoding packed data")?;
    if reencoded == mesh {
        println!("Re-encode: OK ({} tags)", data.tag_count());
    } else {
        log::warn!("Re-encoded tags differ from the input");
        println!("Re-encode: DIFF");
        std::process::exit(1);
    }
    Ok(())
}
