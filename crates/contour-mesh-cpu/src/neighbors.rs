use contour_chunk::ChunkCells;

/// Borrowed boundary sources for stitching: right (`x`), below (`y`) and
/// diagonal (`xy`). `None` on the map edge.
#[derive(Clone, Copy, Debug, Default)]
pub struct ChunkNeighbors<'a> {
    pub x: Option<&'a ChunkCells>,
    pub y: Option<&'a ChunkCells>,
    pub xy: Option<&'a ChunkCells>,
}

impl<'a> ChunkNeighbors<'a> {
    #[inline]
    pub const fn none() -> Self {
        Self {
            x: None,
            y: None,
            xy: None,
        }
    }

    #[inline]
    pub const fn new(
        x: Option<&'a ChunkCells>,
        y: Option<&'a ChunkCells>,
        xy: Option<&'a ChunkCells>,
    ) -> Self {
        Self { x, y, xy }
    }
}
