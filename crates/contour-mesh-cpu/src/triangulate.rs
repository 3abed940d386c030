use std::time::Instant;

use contour_chunk::{Cell, ChunkCells};

use crate::cases::case_code;
use crate::neighbors::ChunkNeighbors;
use crate::surface::SurfaceCache;

/// Rebuilds `surface` from `cells`, stitching against whichever neighbors are
/// present. Ghost cells are rebuilt from the neighbors' live state on every
/// call, so nothing needs invalidating when a neighbor is edited.
///
/// Neighbors must share `cells`' resolution and size.
pub fn triangulate_chunk(
    cells: &ChunkCells,
    neighbors: &ChunkNeighbors<'_>,
    surface: &mut SurfaceCache,
) {
    let t0 = Instant::now();
    let res = cells.resolution();
    debug_assert!(
        [neighbors.x, neighbors.y, neighbors.xy]
            .iter()
            .flatten()
            .all(|n| n.resolution() == res)
    );
    if surface.resolution() != res {
        surface.resize(res);
    }
    surface.clear();

    let mut sweep = Sweep {
        cells: cells.cells(),
        res,
        offset: cells.chunk_size(),
        neighbors,
        surface,
        ghost_x: Cell::default(),
    };
    sweep.fill_first_row_cache();
    sweep.triangulate_cell_rows();
    if let Some(yn) = neighbors.y {
        sweep.triangulate_gap_row(yn);
    }

    let ms = t0.elapsed().as_millis();
    log::debug!(
        target: "perf",
        "ms={} mesher_triangulate res={} verts={} tris={} nx={} ny={} nxy={}",
        ms,
        res,
        surface.vertices().len(),
        surface.indices().len() / 3,
        neighbors.x.is_some(),
        neighbors.y.is_some(),
        neighbors.xy.is_some()
    );
}

struct Sweep<'a, 's> {
    cells: &'a [Cell],
    res: usize,
    /// Translation applied to ghost cells: one chunk size.
    offset: f32,
    neighbors: &'a ChunkNeighbors<'a>,
    surface: &'s mut SurfaceCache,
    /// Ghost of the x neighbor's column 0 at the row currently being cached.
    ghost_x: Cell,
}

impl Sweep<'_, '_> {
    fn fill_first_row_cache(&mut self) {
        let cells = self.cells;
        self.cache_first_corner(&cells[0]);
        for i in 0..self.res - 1 {
            self.cache_next_edge_and_corner(i, &cells[i], &cells[i + 1]);
        }
        let neighbors = self.neighbors;
        if let Some(xn) = neighbors.x {
            self.ghost_x = Cell::x_ghost_of(xn.cell(0, 0), self.offset);
            let ghost = self.ghost_x;
            self.cache_next_edge_and_corner(self.res - 1, &cells[self.res - 1], &ghost);
        }
    }

    fn triangulate_cell_rows(&mut self) {
        let cells = self.cells;
        let neighbors = self.neighbors;
        let res = self.res;
        for y in 0..res - 1 {
            let mut i = y * res;
            self.surface.prepare_cache_for_next_row();
            self.cache_first_corner(&cells[i + res]);
            self.cache_next_middle_edge(&cells[i], &cells[i + res]);
            for x in 0..res - 1 {
                let a = &cells[i];
                let b = &cells[i + 1];
                let c = &cells[i + res];
                let d = &cells[i + res + 1];
                self.cache_next_edge_and_corner(x, c, d);
                self.cache_next_middle_edge(b, d);
                self.triangulate_cell(x, a, b, c, d);
                i += 1;
            }
            if let Some(xn) = neighbors.x {
                self.triangulate_gap_cell(xn, i, y);
            }
        }
    }

    /// Last column of row `y` against the x neighbor's column 0. `i` is the
    /// index of the row's last real cell.
    fn triangulate_gap_cell(&mut self, xn: &ChunkCells, i: usize, y: usize) {
        let cells = self.cells;
        let prev = self.ghost_x;
        self.ghost_x = Cell::x_ghost_of(xn.cell(0, y + 1), self.offset);
        let next = self.ghost_x;
        let c = &cells[i + self.res];
        self.cache_next_edge_and_corner(self.res - 1, c, &next);
        self.cache_next_middle_edge(&prev, &next);
        self.triangulate_cell(self.res - 1, &cells[i], &prev, c, &next);
    }

    /// Extra row of cells between this chunk's last row and the y neighbor's
    /// row 0, closed by the corner cell when the diagonal neighbor exists.
    fn triangulate_gap_row(&mut self, yn: &ChunkCells) {
        let cells = self.cells;
        let res = self.res;
        self.surface.prepare_cache_for_next_row();
        let offset = (res - 1) * res;

        let mut ghost_y = Cell::y_ghost_of(yn.cell(0, 0), self.offset);
        self.cache_first_corner(&ghost_y);
        self.cache_next_middle_edge(&cells[offset], &ghost_y);
        for x in 0..res - 1 {
            let prev = ghost_y;
            ghost_y = Cell::y_ghost_of(yn.cell(x + 1, 0), self.offset);
            self.cache_next_edge_and_corner(x, &prev, &ghost_y);
            self.cache_next_middle_edge(&cells[offset + x + 1], &ghost_y);
            self.triangulate_cell(x, &cells[offset + x], &cells[offset + x + 1], &prev, &ghost_y);
        }

        let neighbors = self.neighbors;
        if let (Some(_), Some(xyn)) = (neighbors.x, neighbors.xy) {
            let corner = Cell::xy_ghost_of(xyn.cell(0, 0), self.offset);
            let ghost_x = self.ghost_x;
            self.cache_next_edge_and_corner(res - 1, &ghost_y, &corner);
            self.cache_next_middle_edge(&ghost_x, &corner);
            self.triangulate_cell(res - 1, &cells[offset + res - 1], &ghost_x, &ghost_y, &corner);
        }
    }

    #[inline]
    fn cache_first_corner(&mut self, cell: &Cell) {
        if cell.state {
            self.surface.cache_first_corner(cell);
        }
    }

    #[inline]
    fn cache_next_edge_and_corner(&mut self, i: usize, x_min: &Cell, x_max: &Cell) {
        if x_min.state != x_max.state {
            self.surface.cache_x_edge(i, x_min);
        }
        if x_max.state {
            self.surface.cache_next_corner(i, x_max);
        }
    }

    #[inline]
    fn cache_next_middle_edge(&mut self, y_min: &Cell, y_max: &Cell) {
        self.surface.prepare_cache_for_next_cell();
        if y_min.state != y_max.state {
            self.surface.cache_y_edge(y_min);
        }
    }

    #[inline]
    fn triangulate_cell(&mut self, i: usize, a: &Cell, b: &Cell, c: &Cell, d: &Cell) {
        let code = case_code(a.state, b.state, c.state, d.state);
        if code != 0 {
            self.surface.add_case(i, code);
        }
    }
}
