// MODEL: world data and the camera looking at it
pub mod camera;
pub mod world;

pub use camera::{Camera, RayHit};
pub use world::{Block, BlockId, Chunk, Face, World, CHUNK_HEIGHT, CHUNK_SIZE};
