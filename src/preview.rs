//! Text output: the occupancy field and a per-chunk mesh summary.

use std::fmt::Write as _;

use contour_map::Grid;

/// One line per cell row, highest `y` first; `#` is occupied.
pub fn ascii_field(grid: &Grid) -> String {
    let n = grid.cells_per_side();
    let mut s = String::with_capacity((n + 1) * n);
    for gy in (0..n).rev() {
        for gx in 0..n {
            s.push(if grid.cell_state(gx, gy) == Some(true) { '#' } else { '.' });
        }
        s.push('\n');
    }
    s
}

pub fn chunk_summary(grid: &Grid) -> String {
    let mut s = String::new();
    for chunk in grid.chunks() {
        let coord = chunk.coord();
        let surface = chunk.surface();
        let _ = writeln!(
            s,
            "chunk ({}, {}): cells={} verts={} tris={}",
            coord.cx,
            coord.cy,
            chunk.cells().occupied_count(),
            surface.vertices.len(),
            surface.triangle_count()
        );
    }
    let _ = writeln!(
        s,
        "total: verts={} tris={}",
        grid.total_vertices(),
        grid.total_triangles()
    );
    s
}
