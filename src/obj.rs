//! Wavefront OBJ export of every chunk surface in world space.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use contour_map::Grid;

/// Writes one `o` group per non-empty chunk. Vertices are offset by the chunk
/// origin; face indices are 1-based across the whole file.
pub fn write_obj<W: Write>(grid: &Grid, out: &mut W) -> io::Result<()> {
    writeln!(out, "# contour map {}x{} chunks", grid.chunk_resolution(), grid.chunk_resolution())?;
    let mut base = 1usize;
    for chunk in grid.chunks() {
        let surface = chunk.surface();
        if surface.is_empty() {
            continue;
        }
        let coord = chunk.coord();
        let origin = chunk.origin();
        writeln!(out, "o chunk_{}_{}", coord.cx, coord.cy)?;
        for v in surface.vertices {
            writeln!(out, "v {} {} {}", v.x + origin.x, v.y + origin.y, v.z)?;
        }
        for tri in surface.indices.chunks_exact(3) {
            writeln!(
                out,
                "f {} {} {}",
                base + tri[0] as usize,
                base + tri[1] as usize,
                base + tri[2] as usize
            )?;
        }
        base += surface.vertices.len();
    }
    Ok(())
}

pub fn save_obj(grid: &Grid, path: impl AsRef<Path>) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write_obj(grid, &mut out)?;
    out.flush()
}
