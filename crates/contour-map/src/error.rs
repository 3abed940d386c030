use contour_chunk::ChunkError;
use contour_edit::StencilError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MapError {
    #[error("chunk resolution must be at least 1")]
    ZeroChunkResolution,
    #[error("map size must be positive and finite, got {0}")]
    NonPositiveMapSize(f32),
    #[error("invalid chunk: {0}")]
    Chunk(#[from] ChunkError),
    #[error("invalid stencil: {0}")]
    Stencil(#[from] StencilError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Toml(#[from] toml::de::Error),
}
