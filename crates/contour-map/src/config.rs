use std::fs;
use std::path::Path;

use contour_chunk::ChunkError;
use serde::Deserialize;

use crate::error::MapError;

/// Map dimensions. The map is square, centred on the origin, and split into
/// `chunk_resolution²` chunks of `cell_resolution²` cells each.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MapConfig {
    pub map_size: f32,
    pub cell_resolution: usize,
    pub chunk_resolution: usize,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            map_size: 2.0,
            cell_resolution: 8,
            chunk_resolution: 2,
        }
    }
}

impl MapConfig {
    pub fn validate(&self) -> Result<(), MapError> {
        if self.chunk_resolution == 0 {
            return Err(MapError::ZeroChunkResolution);
        }
        if !(self.map_size > 0.0) || !self.map_size.is_finite() {
            return Err(MapError::NonPositiveMapSize(self.map_size));
        }
        if self.cell_resolution == 0 {
            return Err(ChunkError::ZeroResolution.into());
        }
        Ok(())
    }

    #[inline]
    pub fn chunk_size(&self) -> f32 {
        self.map_size / self.chunk_resolution as f32
    }

    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.chunk_size() / self.cell_resolution as f32
    }

    pub fn from_toml_str(s: &str) -> Result<Self, MapError> {
        let cfg: MapConfig = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, MapError> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }
}
