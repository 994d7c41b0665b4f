// render.rs - per-frame world traversal
//
// One call per frame, strictly in this order:
//   1. rebuild the frustum from the camera matrices
//   2. per chunk: distance reject, then frustum reject (Inside skips step 3b)
//   3. per block: (a) skip air and fully occluded blocks, (b) frustum test the cube
//   4. submit every non-occluded face with the texture for (block id, face)
//
// Nothing here outlives the frame except the occlusion flags cached in the world.

use std::collections::BTreeMap;
use std::path::PathBuf;

use glam::{Mat4, Vec3Swizzles};
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use super::cube::{block_model, face_vertices};
use super::frustum::{Frustum, Visibility};
use super::texture::{TextureHandle, TextureProvider};
use crate::model::world::chunk::N_BLOCKS_PER_CHUNK;
use crate::model::world::{BlockId, Face, World};
use crate::model::Camera;
use crate::utils::{chunk_half_extents, BlockCoord, Mesh};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Horizontal distance from the camera beyond which chunks are skipped.
    pub render_distance: f32,
    pub frustum_culling: bool,
    pub texture_dir: PathBuf,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            render_distance: 64.0,
            frustum_culling: true,
            texture_dir: PathBuf::from("assets/textures"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlockTextures {
    pub stone: TextureHandle,
    pub dirt: TextureHandle,
    pub grass_top: TextureHandle,
    pub grass_side: TextureHandle,
}

impl BlockTextures {
    pub const FILES: [&'static str; 4] = ["stone", "dirt", "grass_top", "grass_side"];
}

/// Texture handles and settings shared by every frame, owned by the frame loop.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub textures: BlockTextures,
    pub config: RenderConfig,
}

impl RenderContext {
    /// Loads `<texture_dir>/<name>.png` for every block texture. A texture that
    /// fails to load keeps the invalid handle and its faces are drawn untextured.
    pub fn load<P: TextureProvider>(provider: &mut P, config: RenderConfig) -> Self {
        let mut handles = [TextureHandle::INVALID; 4];
        for (handle, name) in handles.iter_mut().zip(BlockTextures::FILES) {
            let path = config.texture_dir.join(format!("{name}.png"));
            match provider.load(&path) {
                Ok(loaded) => *handle = loaded,
                Err(err) => warn!(%err, texture = name, "texture unavailable, drawing untextured"),
            }
        }

        let [stone, dirt, grass_top, grass_side] = handles;
        Self::with_textures(
            BlockTextures {
                stone,
                dirt,
                grass_top,
                grass_side,
            },
            config,
        )
    }

    pub fn with_textures(textures: BlockTextures, config: RenderConfig) -> Self {
        Self { textures, config }
    }

    /// Texture for one face of a block; `None` for air or an invalid handle.
    pub fn texture_for(&self, id: BlockId, face: Face) -> Option<TextureHandle> {
        let t = &self.textures;
        let handle = match (id, face) {
            (BlockId::Air, _) => return None,
            (BlockId::Stone, _) => t.stone,
            (BlockId::Dirt, _) => t.dirt,
            (BlockId::Grass, Face::Top) => t.grass_top,
            (BlockId::Grass, Face::Bottom) => t.dirt,
            (BlockId::Grass, _) => t.grass_side,
        };
        handle.is_valid().then_some(handle)
    }
}

/// Receives one call per visible face: the block's model transform, which
/// face of the unit cube, and the texture to bind.
pub trait FaceSink {
    fn draw_face(&mut self, model: &Mat4, face: Face, texture: Option<TextureHandle>);
}

/// Collects drawn faces into one vertex list per texture, ready for upload.
#[derive(Debug, Default)]
pub struct FaceBatch {
    meshes: BTreeMap<Option<TextureHandle>, Mesh>,
    faces: usize,
}

impl FaceBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.meshes.values_mut().for_each(|mesh| mesh.vertices.clear());
        self.faces = 0;
    }

    pub fn face_count(&self) -> usize {
        self.faces
    }

    pub fn mesh(&self, texture: Option<TextureHandle>) -> Option<&Mesh> {
        self.meshes.get(&texture).filter(|mesh| !mesh.is_empty())
    }

    pub fn meshes(&self) -> impl Iterator<Item = (Option<TextureHandle>, &Mesh)> + '_ {
        self.meshes
            .iter()
            .filter(|(_, mesh)| !mesh.is_empty())
            .map(|(texture, mesh)| (*texture, mesh))
    }
}

impl FaceSink for FaceBatch {
    fn draw_face(&mut self, model: &Mat4, face: Face, texture: Option<TextureHandle>) {
        self.meshes
            .entry(texture)
            .or_default()
            .push_transformed(face_vertices(face), model);
        self.faces += 1;
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FrameStats {
    /// Blocks with at least one face submitted.
    pub visible_cubes: usize,
    pub faces_drawn: usize,
    pub untextured_faces: usize,
    pub chunks_rendered: usize,
    pub chunks_distance_culled: usize,
    pub chunks_frustum_culled: usize,
    /// Block slots iterated in chunks that survived culling.
    pub blocks_visited: usize,
    pub blocks_occluded: usize,
    pub blocks_frustum_culled: usize,
}

/// Draws one frame of `world` as seen from `camera` into `sink`.
pub fn render_world<S: FaceSink>(
    world: &mut World,
    ctx: &RenderContext,
    camera: &Camera,
    sink: &mut S,
) -> FrameStats {
    let frustum = Frustum::update(&camera.projection(), &camera.view());
    let half = chunk_half_extents();
    let cull_distance = ctx.config.render_distance + half.xz().length();
    let mut stats = FrameStats::default();

    for chunk_idx in 0..world.chunks().len() {
        let chunk = &world.chunks()[chunk_idx];
        let position = chunk.position();
        let center = position.center();

        if center.xz().distance(camera.eye.xz()) > cull_distance {
            stats.chunks_distance_culled += 1;
            continue;
        }

        let visibility = if ctx.config.frustum_culling {
            frustum.classify(center, half)
        } else {
            Visibility::Inside
        };
        if visibility == Visibility::Outside {
            stats.chunks_frustum_culled += 1;
            continue;
        }

        stats.chunks_rendered += 1;
        if chunk.is_empty() {
            continue;
        }

        for block_idx in 0..N_BLOCKS_PER_CHUNK {
            stats.blocks_visited += 1;
            let id = world.chunks()[chunk_idx].block_at(block_idx).id;
            if id.is_air() {
                continue;
            }

            let pos = BlockCoord::from_block_idx(block_idx).to_world_coord(&position);
            let Some(neighbors) = world.neighbor_flags(pos) else {
                continue;
            };
            if neighbors.iter().all(|&n| n) {
                stats.blocks_occluded += 1;
                continue;
            }

            if visibility == Visibility::Intersecting && !frustum.is_cube_visible(pos.to_world_pos()) {
                stats.blocks_frustum_culled += 1;
                continue;
            }

            let model = block_model(pos);
            for face in Face::ALL {
                if neighbors[face.index()] {
                    continue;
                }
                let texture = ctx.texture_for(id, face);
                if texture.is_none() {
                    stats.untextured_faces += 1;
                }
                sink.draw_face(&model, face, texture);
                stats.faces_drawn += 1;
            }
            stats.visible_cubes += 1;
        }
    }

    trace!(?stats, "frame rendered");
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::camera::CameraConfig;
    use crate::model::world::CHUNKS_PER_AXIS;
    use crate::utils::{ChunkCoord, WorldCoord};
    use crate::view::frustum::FrustumPlane;
    use glam::Vec3;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<(WorldCoord, Face, Option<TextureHandle>)>,
    }

    impl FaceSink for Recorder {
        fn draw_face(&mut self, model: &Mat4, face: Face, texture: Option<TextureHandle>) {
            let center = model.transform_point3(Vec3::ZERO);
            self.calls.push((WorldCoord::from_world_pos(center), face, texture));
        }
    }

    fn textured() -> RenderContext {
        RenderContext::with_textures(
            BlockTextures {
                stone: TextureHandle(1),
                dirt: TextureHandle(2),
                grass_top: TextureHandle(3),
                grass_side: TextureHandle(4),
            },
            RenderConfig::default(),
        )
    }

    fn camera(eye: Vec3, yaw_degrees: f32, pitch_degrees: f32) -> Camera {
        Camera::from_config(&CameraConfig {
            position: eye,
            yaw_degrees,
            pitch_degrees,
            ..CameraConfig::default()
        })
    }

    fn single_block(at: WorldCoord, id: BlockId) -> World {
        World::from_fn(|p| if p == at { id } else { BlockId::Air })
    }

    #[test]
    fn grass_uses_top_side_and_bottom_textures() {
        let ctx = textured();
        assert_eq!(ctx.texture_for(BlockId::Grass, Face::Top), Some(TextureHandle(3)));
        assert_eq!(ctx.texture_for(BlockId::Grass, Face::Bottom), Some(TextureHandle(2)));
        for face in [Face::Left, Face::Right, Face::Front, Face::Back] {
            assert_eq!(ctx.texture_for(BlockId::Grass, face), Some(TextureHandle(4)));
        }
        for face in Face::ALL {
            assert_eq!(ctx.texture_for(BlockId::Stone, face), Some(TextureHandle(1)));
            assert_eq!(ctx.texture_for(BlockId::Dirt, face), Some(TextureHandle(2)));
            assert_eq!(ctx.texture_for(BlockId::Air, face), None);
        }
    }

    #[test]
    fn floating_block_draws_all_six_faces() {
        let block = WorldCoord(0, 40, 0);
        let mut world = single_block(block, BlockId::Stone);
        let mut sink = Recorder::default();

        let stats = render_world(&mut world, &textured(), &camera(Vec3::new(0.5, 40.5, 10.0), -90.0, 0.0), &mut sink);

        assert_eq!(stats.visible_cubes, 1);
        assert_eq!(stats.faces_drawn, 6);
        assert_eq!(stats.untextured_faces, 0);
        assert_eq!(sink.calls.len(), 6);
        assert!(sink.calls.iter().all(|(pos, _, tex)| *pos == block && *tex == Some(TextureHandle(1))));
    }

    #[test]
    fn face_batch_collects_vertices_per_texture() {
        let block = WorldCoord(2, 30, -3);
        let mut world = single_block(block, BlockId::Grass);
        let mut batch = FaceBatch::new();

        render_world(&mut world, &textured(), &camera(Vec3::new(2.5, 30.5, 8.0), -90.0, 0.0), &mut batch);

        assert_eq!(batch.face_count(), 6);
        assert_eq!(batch.mesh(Some(TextureHandle(3))).map(|m| m.vertices.len()), Some(6));
        assert_eq!(batch.mesh(Some(TextureHandle(4))).map(|m| m.vertices.len()), Some(24));
        for (_, mesh) in batch.meshes() {
            for v in &mesh.vertices {
                assert!((2.0..=3.0).contains(&v.pos[0]) && (30.0..=31.0).contains(&v.pos[1]));
                assert!((-3.0..=-2.0).contains(&v.pos[2]));
            }
        }

        batch.clear();
        assert_eq!(batch.face_count(), 0);
        assert_eq!(batch.meshes().count(), 0);
    }

    #[test]
    fn buried_blocks_submit_nothing() {
        let mut world = World::from_fn(|p| if p.1 <= 20 { BlockId::Stone } else { BlockId::Air });
        let buried = WorldCoord(0, 10, 0);
        let mut sink = Recorder::default();

        let stats = render_world(&mut world, &textured(), &camera(Vec3::new(0.5, 25.0, 20.5), -90.0, -30.0), &mut sink);

        assert_eq!(world.is_occluded(buried), Some(true));
        assert!(stats.blocks_occluded > 0);
        assert!(stats.faces_drawn > 0);
        assert!(sink.calls.iter().all(|(pos, _, _)| *pos != buried));
        for (pos, face, _) in &sink.calls {
            assert!(!world.is_solid(pos.offset(*face)), "face {face:?} of {pos:?} is covered");
        }
    }

    #[test]
    fn chunks_beyond_the_far_plane_are_never_visited() {
        let mut world = World::from_fn(|p| if p.1 <= 20 { BlockId::Stone } else { BlockId::Air });
        let ctx = RenderContext::with_textures(
            textured().textures,
            RenderConfig {
                render_distance: 1000.0,
                ..RenderConfig::default()
            },
        );
        let above = camera(Vec3::new(0.0, 200.0, 0.0), -90.0, -90.0);

        let frustum = Frustum::update(&above.projection(), &above.view());
        assert_eq!(
            frustum.culling_plane(ChunkCoord(4, 4).center(), chunk_half_extents()),
            Some(FrustumPlane::Far)
        );

        let mut sink = Recorder::default();
        let stats = render_world(&mut world, &ctx, &above, &mut sink);
        assert_eq!(stats.chunks_frustum_culled, (CHUNKS_PER_AXIS * CHUNKS_PER_AXIS) as usize);
        assert_eq!(stats.blocks_visited, 0);
        assert!(sink.calls.is_empty());
        assert_eq!(world.stats().cache_fills, 0);
    }

    #[test]
    fn distance_cull_keeps_nearby_chunks() {
        let mut world = World::empty();
        let ctx = RenderContext::with_textures(
            BlockTextures::default(),
            RenderConfig {
                render_distance: 10.0,
                frustum_culling: false,
                ..RenderConfig::default()
            },
        );
        let stats = render_world(&mut world, &ctx, &camera(Vec3::new(0.5, 40.5, 0.5), -90.0, 0.0), &mut Recorder::default());
        assert_eq!(stats.chunks_rendered, 4);
        assert_eq!(stats.chunks_distance_culled, 60);
        assert_eq!(stats.blocks_visited, 0);
    }

    #[test]
    fn invalid_textures_render_untextured() {
        let mut world = single_block(WorldCoord(0, 40, 0), BlockId::Dirt);
        let ctx = RenderContext::with_textures(BlockTextures::default(), RenderConfig::default());
        let mut sink = Recorder::default();

        let stats = render_world(&mut world, &ctx, &camera(Vec3::new(0.5, 40.5, 10.0), -90.0, 0.0), &mut sink);

        assert_eq!(stats.faces_drawn, 6);
        assert_eq!(stats.untextured_faces, 6);
        assert!(sink.calls.iter().all(|(_, _, tex)| tex.is_none()));
    }

    #[test]
    fn second_frame_reuses_the_occlusion_cache() {
        let mut world = World::from_fn(|p| if p.1 <= 5 { BlockId::Dirt } else { BlockId::Air });
        let ctx = textured();
        let eye = camera(Vec3::new(0.5, 12.0, 6.0), -90.0, -20.0);

        let first = render_world(&mut world, &ctx, &eye, &mut Recorder::default());
        let fills = world.stats().cache_fills;
        let second = render_world(&mut world, &ctx, &eye, &mut Recorder::default());

        assert_eq!(first, second);
        assert_eq!(world.stats().cache_fills, fills);
    }
}
