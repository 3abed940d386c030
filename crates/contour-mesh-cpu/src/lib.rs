//! CPU marching-squares triangulation of chunked occupancy fields.
#![forbid(unsafe_code)]

pub mod cases;
mod neighbors;
mod surface;
mod triangulate;

pub use neighbors::ChunkNeighbors;
pub use surface::{ChunkSurface, SurfaceCache};
pub use triangulate::triangulate_chunk;
