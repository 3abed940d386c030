//! Chunked occupancy map: owns the chunks, wires their neighbors and routes
//! stencil edits to the chunks they touch.
#![forbid(unsafe_code)]

mod config;
mod error;

pub use config::MapConfig;
pub use error::MapError;

use contour_chunk::{ChunkCells, ChunkCoord};
use contour_edit::{EditSession, Stencil};
use contour_geom::Vec2;
use contour_mesh_cpu::{ChunkNeighbors, ChunkSurface, SurfaceCache, triangulate_chunk};

/// Coordinates further out than this cannot touch any map and are clamped
/// before conversion so stencil arithmetic stays in range.
const MAX_CELL_COORD: f64 = 1.0e12;

/// Arena indices of the chunks a chunk stitches against.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NeighborIds {
    pub x: Option<usize>,
    pub y: Option<usize>,
    pub xy: Option<usize>,
}

impl NeighborIds {
    #[inline]
    fn any(&self, mut f: impl FnMut(usize) -> bool) -> bool {
        [self.x, self.y, self.xy].into_iter().flatten().any(|j| f(j))
    }
}

#[derive(Clone, Debug)]
pub struct Chunk {
    coord: ChunkCoord,
    origin: Vec2,
    cells: ChunkCells,
    surface: SurfaceCache,
    neighbors: NeighborIds,
}

impl Chunk {
    #[inline]
    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }

    /// World position of the chunk's local origin; surface vertices are
    /// relative to it.
    #[inline]
    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    #[inline]
    pub fn cells(&self) -> &ChunkCells {
        &self.cells
    }

    #[inline]
    pub fn neighbors(&self) -> NeighborIds {
        self.neighbors
    }

    /// Triangle list from the last triangulation of this chunk.
    #[inline]
    pub fn surface(&self) -> ChunkSurface<'_> {
        self.surface.surface()
    }
}

/// What an edit touched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EditOutcome {
    /// Global cell the stencil was centred on, if the point was usable.
    pub center: Option<(i64, i64)>,
    /// Chunks whose cells the stencil pass visited.
    pub visited: Vec<ChunkCoord>,
    /// Chunks with at least one changed cell.
    pub changed: Vec<ChunkCoord>,
    pub changed_cells: usize,
    pub retriangulated: Vec<ChunkCoord>,
}

impl EditOutcome {
    #[inline]
    pub fn is_noop(&self) -> bool {
        self.visited.is_empty()
    }
}

#[derive(Clone, Debug)]
pub struct Grid {
    chunks: Vec<Chunk>,
    chunk_resolution: usize,
    cell_resolution: usize,
    map_size: f32,
    chunk_size: f32,
    cell_size: f32,
}

impl Grid {
    pub fn new(config: &MapConfig) -> Result<Self, MapError> {
        config.validate()?;
        let c = config.chunk_resolution;
        let r = config.cell_resolution;
        let chunk_size = config.chunk_size();
        let half = config.map_size * 0.5;

        let mut chunks = Vec::with_capacity(c * c);
        for cy in 0..c {
            for cx in 0..c {
                let has_x = cx + 1 < c;
                let has_y = cy + 1 < c;
                let neighbors = NeighborIds {
                    x: has_x.then(|| cy * c + cx + 1),
                    y: has_y.then(|| (cy + 1) * c + cx),
                    xy: (has_x && has_y).then(|| (cy + 1) * c + cx + 1),
                };
                chunks.push(Chunk {
                    coord: ChunkCoord::new(cx, cy),
                    origin: Vec2::new(
                        cx as f32 * chunk_size - half,
                        cy as f32 * chunk_size - half,
                    ),
                    cells: ChunkCells::new(r, chunk_size)?,
                    surface: SurfaceCache::new(r),
                    neighbors,
                });
            }
        }

        let mut grid = Self {
            chunks,
            chunk_resolution: c,
            cell_resolution: r,
            map_size: config.map_size,
            chunk_size,
            cell_size: config.cell_size(),
        };
        grid.triangulate_all();
        log::info!(
            "grid ready: {}x{} chunks of {}x{} cells, map_size={} cell_size={}",
            c,
            c,
            r,
            r,
            grid.map_size,
            grid.cell_size
        );
        Ok(grid)
    }

    #[inline]
    pub fn chunk_resolution(&self) -> usize {
        self.chunk_resolution
    }

    #[inline]
    pub fn cell_resolution(&self) -> usize {
        self.cell_resolution
    }

    #[inline]
    pub fn map_size(&self) -> f32 {
        self.map_size
    }

    #[inline]
    pub fn chunk_size(&self) -> f32 {
        self.chunk_size
    }

    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Cells per map side.
    #[inline]
    pub fn cells_per_side(&self) -> usize {
        self.chunk_resolution * self.cell_resolution
    }

    #[inline]
    fn index(&self, cx: usize, cy: usize) -> usize {
        cy * self.chunk_resolution + cx
    }

    #[inline]
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub fn chunk(&self, cx: usize, cy: usize) -> Option<&Chunk> {
        if cx < self.chunk_resolution && cy < self.chunk_resolution {
            Some(&self.chunks[self.index(cx, cy)])
        } else {
            None
        }
    }

    /// Global cell containing `point`, or `None` for non-finite input. The
    /// result may lie outside the map.
    pub fn cell_coord_of(&self, point: impl Into<Vec2>) -> Option<(i64, i64)> {
        let p = point.into();
        if !p.is_finite() {
            return None;
        }
        let half = self.map_size as f64 * 0.5;
        let to_cell = |v: f32| {
            ((v as f64 + half) / self.cell_size as f64)
                .floor()
                .clamp(-MAX_CELL_COORD, MAX_CELL_COORD) as i64
        };
        Some((to_cell(p.x), to_cell(p.y)))
    }

    pub fn cell_state(&self, gx: usize, gy: usize) -> Option<bool> {
        let r = self.cell_resolution;
        self.chunk(gx / r, gy / r)
            .map(|chunk| chunk.cells.state(gx % r, gy % r))
    }

    /// Applies `stencil` centred on the cell under `point`. A no-op when the
    /// stencil cannot reach any cell of the map.
    pub fn apply_stencil(&mut self, point: impl Into<Vec2>, stencil: Stencil) -> EditOutcome {
        let point = point.into();
        match self.cell_coord_of(point) {
            Some(cell) => self.apply_stencil_at_cell(cell, stencil),
            None => {
                log::trace!(target: "edit", "ignoring non-finite edit point {:?}", point);
                EditOutcome::default()
            }
        }
    }

    /// Applies the session's current brush at `point`.
    pub fn apply_session(&mut self, point: impl Into<Vec2>, session: &EditSession) -> EditOutcome {
        self.apply_stencil(point, session.stencil())
    }

    /// Overwrites one cell, addressed in global cell coordinates.
    pub fn set_cell(&mut self, gx: usize, gy: usize, state: bool) -> EditOutcome {
        let stencil = Stencil::from_step(contour_edit::StencilKind::Square, state, 0);
        self.apply_stencil_at_cell((gx as i64, gy as i64), stencil)
    }

    /// Applies `stencil` centred on global cell `(cx, cy)`.
    ///
    /// Every touched chunk is mutated before any chunk is re-triangulated, so
    /// ghost cells never read a half-applied edit. Chunks are rebuilt when
    /// their own cells changed or when a neighbor they stitch against did.
    pub fn apply_stencil_at_cell(&mut self, (cx, cy): (i64, i64), stencil: Stencil) -> EditOutcome {
        let mut outcome = EditOutcome {
            center: Some((cx, cy)),
            ..EditOutcome::default()
        };
        let r = stencil.radius() as i64;
        let total = self.cells_per_side() as i64;
        if cx.saturating_add(r) < 0
            || cy.saturating_add(r) < 0
            || cx.saturating_sub(r) >= total
            || cy.saturating_sub(r) >= total
        {
            log::trace!(target: "edit", "stencil at cell ({}, {}) r={} misses the map", cx, cy, r);
            return outcome;
        }

        let res = self.cell_resolution as i64;
        let (x0, x1) = self.chunk_span(cx - r, cx + r);
        let (y0, y1) = self.chunk_span(cy - r, cy + r);

        let mut dirty = vec![false; self.chunks.len()];
        for iy in y0..=y1 {
            for ix in x0..=x1 {
                let i = self.index(ix, iy);
                let local = stencil.with_center(cx - ix as i64 * res, cy - iy as i64 * res);
                let chunk = &mut self.chunks[i];
                let changed = chunk.cells.apply_stencil(&local);
                outcome.visited.push(chunk.coord);
                if changed > 0 {
                    dirty[i] = true;
                    outcome.changed.push(chunk.coord);
                    outcome.changed_cells += changed;
                }
            }
        }

        // Chunks left of and below the range read the changed cells as ghosts.
        for iy in y0.saturating_sub(1)..=y1 {
            for ix in x0.saturating_sub(1)..=x1 {
                let i = self.index(ix, iy);
                if dirty[i] || self.chunks[i].neighbors.any(|j| dirty[j]) {
                    self.retriangulate(i);
                    outcome.retriangulated.push(self.chunks[i].coord);
                }
            }
        }

        log::debug!(
            target: "edit",
            "stencil {:?} fill={} r={} at cell ({}, {}): visited={} changed_cells={} rebuilt={}",
            stencil.kind(),
            stencil.fill(),
            r,
            cx,
            cy,
            outcome.visited.len(),
            outcome.changed_cells,
            outcome.retriangulated.len()
        );
        outcome
    }

    /// Chunk index range covering global cells `lo..=hi`, clamped to the map.
    #[inline]
    fn chunk_span(&self, lo: i64, hi: i64) -> (usize, usize) {
        let res = self.cell_resolution as i64;
        let last = self.chunk_resolution as i64 - 1;
        let start = lo.div_euclid(res).clamp(0, last);
        let end = hi.div_euclid(res).clamp(0, last);
        (start as usize, end as usize)
    }

    fn retriangulate(&mut self, i: usize) {
        let mut surface = std::mem::take(&mut self.chunks[i].surface);
        {
            let chunk = &self.chunks[i];
            let cells_of = |j: Option<usize>| j.map(|j| &self.chunks[j].cells);
            let neighbors = ChunkNeighbors::new(
                cells_of(chunk.neighbors.x),
                cells_of(chunk.neighbors.y),
                cells_of(chunk.neighbors.xy),
            );
            triangulate_chunk(&chunk.cells, &neighbors, &mut surface);
        }
        self.chunks[i].surface = surface;
    }

    /// Rebuilds every chunk's surface from scratch.
    pub fn triangulate_all(&mut self) {
        for i in 0..self.chunks.len() {
            self.retriangulate(i);
        }
    }

    pub fn total_vertices(&self) -> usize {
        self.chunks.iter().map(|c| c.surface.vertices().len()).sum()
    }

    pub fn total_triangles(&self) -> usize {
        self.chunks.iter().map(|c| c.surface().triangle_count()).sum()
    }
}
