use std::path::PathBuf;

use thiserror::Error;

use crate::utils::ChunkCoord;

/// Out-of-range lookups into the chunk grid.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorldError {
    #[error("chunk {chunk:?} is outside the world grid")]
    ChunkOutOfBounds { chunk: ChunkCoord },
    #[error("height {y} is outside the chunk column")]
    HeightOutOfBounds { y: i32 },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Error, Debug)]
pub enum TextureError {
    #[error("failed to read texture {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode texture {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("tile {name} is {width}x{height}, atlas tiles are {tile_size}x{tile_size}")]
    TileSize {
        name: String,
        width: u32,
        height: u32,
        tile_size: u32,
    },
    #[error("atlas needs at least one tile")]
    EmptyAtlas,
    #[error("failed to write atlas: {0}")]
    Encode(#[from] image::ImageError),
}
