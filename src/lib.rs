//! Chunked voxel world core: Perlin terrain with biome blending, a fixed grid
//! of chunks with a per-block occlusion cache, and frustum-culled face
//! submission for a Minecraft-style renderer.

pub mod config;
pub mod error;
pub mod logging;
pub mod utils;

// MVC Architecture
pub mod controller;
pub mod model;
pub mod view;

pub use config::AppConfig;
pub use controller::{FrameInput, FrameLoop};
pub use error::{ConfigError, TextureError, WorldError};
pub use model::world::{BlockId, Face, TerrainGenerator, World};
pub use model::Camera;
pub use utils::{BlockCoord, ChunkCoord, WorldCoord};
pub use view::{render_world, FaceSink, FrameStats, Frustum, RenderContext};
