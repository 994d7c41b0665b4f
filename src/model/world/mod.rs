pub mod biome;
pub mod block;
pub mod chunk;
pub mod grid;
pub mod noise;
pub mod terrain;

pub use biome::{BiomeId, BiomeParams, BiomePreset, BiomeTable};
pub use block::{Block, BlockId, Face};
pub use chunk::{Chunk, CHUNK_HEIGHT, CHUNK_SIZE, CUBE_SIZE};
pub use grid::{World, WorldStats, CHUNKS_PER_AXIS, WORLD_SIZE};
pub use terrain::{TerrainConfig, TerrainGenerator};
