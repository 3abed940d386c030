use contour_chunk::Cell;
use contour_geom::Vec3;

use crate::cases::{self, Slot};

/// Read-only view of a chunk's triangle list, valid until its next rebuild.
#[derive(Clone, Copy, Debug)]
pub struct ChunkSurface<'a> {
    pub vertices: &'a [Vec3],
    pub indices: &'a [u32],
}

impl ChunkSurface<'_> {
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Output buffers plus the ping-pong row caches that let neighbouring cells
/// share vertex indices.
///
/// `*_min` holds the row already swept, `*_max` the row being cached. Slots
/// for unoccupied corners or non-crossing edges keep stale values; the case
/// table never reads them.
#[derive(Default, Clone, Debug)]
pub struct SurfaceCache {
    vertices: Vec<Vec3>,
    indices: Vec<u32>,
    corners_min: Vec<u32>,
    corners_max: Vec<u32>,
    x_edges_min: Vec<u32>,
    x_edges_max: Vec<u32>,
    y_edge_min: u32,
    y_edge_max: u32,
}

impl SurfaceCache {
    pub fn new(resolution: usize) -> Self {
        let mut s = Self::default();
        s.resize(resolution);
        s
    }

    /// Sizes the row caches for a chunk of `resolution` cells per side.
    pub fn resize(&mut self, resolution: usize) {
        self.corners_min.resize(resolution + 1, 0);
        self.corners_max.resize(resolution + 1, 0);
        self.x_edges_min.resize(resolution, 0);
        self.x_edges_max.resize(resolution, 0);
    }

    #[inline]
    pub fn resolution(&self) -> usize {
        self.x_edges_max.len()
    }

    /// Clears output but retains capacity for reuse across rebuilds.
    #[inline]
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    #[inline]
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    #[inline]
    pub fn surface(&self) -> ChunkSurface<'_> {
        ChunkSurface {
            vertices: &self.vertices,
            indices: &self.indices,
        }
    }

    #[inline]
    fn push_vertex(&mut self, p: contour_geom::Vec2) -> u32 {
        let i = self.vertices.len() as u32;
        self.vertices.push(p.extend(0.0));
        i
    }

    pub fn cache_first_corner(&mut self, cell: &Cell) {
        self.corners_max[0] = self.push_vertex(cell.center);
    }

    pub fn cache_next_corner(&mut self, i: usize, cell: &Cell) {
        self.corners_max[i + 1] = self.push_vertex(cell.center);
    }

    pub fn cache_x_edge(&mut self, i: usize, cell: &Cell) {
        self.x_edges_max[i] = self.push_vertex(cell.x_edge);
    }

    pub fn cache_y_edge(&mut self, cell: &Cell) {
        self.y_edge_max = self.push_vertex(cell.y_edge);
    }

    #[inline]
    pub fn prepare_cache_for_next_cell(&mut self) {
        self.y_edge_min = self.y_edge_max;
    }

    #[inline]
    pub fn prepare_cache_for_next_row(&mut self) {
        std::mem::swap(&mut self.corners_min, &mut self.corners_max);
        std::mem::swap(&mut self.x_edges_min, &mut self.x_edges_max);
    }

    #[inline]
    fn slot_index(&self, i: usize, slot: Slot) -> u32 {
        match slot {
            Slot::A => self.corners_min[i],
            Slot::B => self.corners_min[i + 1],
            Slot::C => self.corners_max[i],
            Slot::D => self.corners_max[i + 1],
            Slot::Ab => self.x_edges_min[i],
            Slot::Cd => self.x_edges_max[i],
            Slot::Ac => self.y_edge_min,
            Slot::Bd => self.y_edge_max,
        }
    }

    /// Emits the polygons for `code` in column `i` as triangle fans.
    pub fn add_case(&mut self, i: usize, code: u8) {
        for poly in cases::polygons(code) {
            let first = self.slot_index(i, poly[0]);
            for w in poly[1..].windows(2) {
                let b = self.slot_index(i, w[0]);
                let c = self.slot_index(i, w[1]);
                self.indices.extend_from_slice(&[first, b, c]);
            }
        }
    }
}
