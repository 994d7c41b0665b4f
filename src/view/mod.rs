// VIEW: culling, face submission and textures
pub mod cube;
pub mod frustum;
pub mod render;
pub mod texture;

pub use frustum::{Frustum, FrustumPlane, Plane, Visibility};
pub use render::{render_world, BlockTextures, FaceBatch, FaceSink, FrameStats, RenderConfig, RenderContext};
pub use texture::{ImageTextureProvider, TextureAtlas, TextureHandle, TextureProvider};
