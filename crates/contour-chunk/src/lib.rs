//! Chunk cell storage and the chunk-local stencil pass.
#![forbid(unsafe_code)]

mod cell;

pub use cell::Cell;

use contour_edit::Stencil;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ChunkError {
    #[error("chunk resolution must be at least 1")]
    ZeroResolution,
    #[error("chunk size must be positive and finite, got {0}")]
    NonPositiveSize(f32),
}

/// Position of a chunk inside the map, in chunk units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkCoord {
    pub cx: usize,
    pub cy: usize,
}

impl ChunkCoord {
    #[inline]
    pub const fn new(cx: usize, cy: usize) -> Self {
        Self { cx, cy }
    }
}

impl From<(usize, usize)> for ChunkCoord {
    fn from(value: (usize, usize)) -> Self {
        Self::new(value.0, value.1)
    }
}

/// Row-major `resolution × resolution` block of cells.
#[derive(Clone, Debug)]
pub struct ChunkCells {
    resolution: usize,
    cell_size: f32,
    cells: Vec<Cell>,
}

impl ChunkCells {
    pub fn new(resolution: usize, chunk_size: f32) -> Result<Self, ChunkError> {
        if resolution == 0 {
            return Err(ChunkError::ZeroResolution);
        }
        if !(chunk_size > 0.0) || !chunk_size.is_finite() {
            return Err(ChunkError::NonPositiveSize(chunk_size));
        }
        let cell_size = chunk_size / resolution as f32;
        let mut cells = Vec::with_capacity(resolution * resolution);
        for y in 0..resolution {
            for x in 0..resolution {
                cells.push(Cell::new(x, y, cell_size));
            }
        }
        Ok(Self {
            resolution,
            cell_size,
            cells,
        })
    }

    #[inline]
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    #[inline]
    pub fn chunk_size(&self) -> f32 {
        self.cell_size * self.resolution as f32
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.resolution + x
    }

    #[inline]
    pub fn cell(&self, x: usize, y: usize) -> &Cell {
        &self.cells[self.idx(x, y)]
    }

    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline]
    pub fn state(&self, x: usize, y: usize) -> bool {
        self.cell(x, y).state
    }

    #[inline]
    pub fn set_state(&mut self, x: usize, y: usize, state: bool) {
        let i = self.idx(x, y);
        self.cells[i].state = state;
    }

    pub fn fill(&mut self, state: bool) {
        for c in &mut self.cells {
            c.state = state;
        }
    }

    /// Row-major snapshot of occupancy.
    pub fn states(&self) -> Vec<bool> {
        self.cells.iter().map(|c| c.state).collect()
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.state).count()
    }

    /// Runs `stencil` over the part of its bounding box that falls inside
    /// this chunk. The stencil's center must already be in local cell
    /// coordinates. Returns the number of cells whose state changed.
    pub fn apply_stencil(&mut self, stencil: &Stencil) -> usize {
        let last = self.resolution as i64 - 1;
        let x_start = stencil.x_start().max(0);
        let x_end = stencil.x_end().min(last);
        let y_start = stencil.y_start().max(0);
        let y_end = stencil.y_end().min(last);
        if x_start > x_end || y_start > y_end {
            return 0;
        }
        let mut changed = 0;
        for y in y_start..=y_end {
            let mut i = self.idx(x_start as usize, y as usize);
            for x in x_start..=x_end {
                let cell = &mut self.cells[i];
                let next = stencil.decide(x, y, cell.state);
                if next != cell.state {
                    cell.state = next;
                    changed += 1;
                }
                i += 1;
            }
        }
        changed
    }
}
