use std::time::Duration;

use tracing::{debug, info};

use super::hud::{DebugOverlay, HudData};
use crate::config::AppConfig;
use crate::model::world::{TerrainGenerator, World};
use crate::model::Camera;
use crate::view::{render_world, FaceBatch, FrameStats, RenderContext, TextureProvider};

/// Reach of the crosshair ray.
pub const RAYCAST_DISTANCE: f32 = 10.0;

/// Frames counted over each elapsed second.
#[derive(Debug, Default)]
pub struct FpsCounter {
    frames: u32,
    window_start: Duration,
    fps: f32,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one frame at time `now` and returns the last full-second rate.
    pub fn tick(&mut self, now: Duration) -> f32 {
        self.frames += 1;
        if now.saturating_sub(self.window_start) >= Duration::from_secs(1) {
            self.fps = self.frames as f32;
            self.frames = 0;
            self.window_start = now;
        }
        self.fps
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }
}

/// Camera input gathered by the windowing layer since the last frame.
#[derive(Debug, Default, Clone, Copy)]
pub struct FrameInput {
    /// Mouse offset in pixels, y up.
    pub look: (f32, f32),
    /// -1..1 along the view direction.
    pub forward: f32,
    /// -1..1 along the camera's right vector.
    pub right: f32,
    /// Seconds since the previous frame.
    pub dt: f32,
}

pub struct FrameOutput {
    pub stats: FrameStats,
    pub hud: Vec<String>,
}

/// Owns the world and everything needed to draw it, one `frame` call per frame.
pub struct FrameLoop {
    pub world: World,
    pub generator: TerrainGenerator,
    pub render: RenderContext,
    pub camera: Camera,
    fps: FpsCounter,
    overlay: DebugOverlay,
    batch: FaceBatch,
}

impl FrameLoop {
    /// Generates the world (blocking) and loads the block textures.
    pub fn new<P: TextureProvider>(config: &AppConfig, provider: &mut P) -> Self {
        let generator = TerrainGenerator::with_config(config.terrain.clone());
        let world = World::generate(&generator);
        let render = RenderContext::load(provider, config.render.clone());
        let camera = Camera::from_config(&config.camera);
        Self::from_parts(world, generator, render, camera)
    }

    pub fn from_parts(world: World, generator: TerrainGenerator, render: RenderContext, camera: Camera) -> Self {
        Self {
            world,
            generator,
            render,
            camera,
            fps: FpsCounter::new(),
            overlay: DebugOverlay::default(),
            batch: FaceBatch::new(),
        }
    }

    /// Faces submitted by the last frame, grouped by texture.
    pub fn batch(&self) -> &FaceBatch {
        &self.batch
    }

    /// input, then frustum rebuild and traversal, then overlay text.
    pub fn frame(&mut self, input: FrameInput, now: Duration) -> FrameOutput {
        let fps = self.fps.tick(now);

        let (dx, dy) = input.look;
        self.camera.rotate(dx, dy);
        self.camera.move_local(input.forward, input.right, input.dt);

        self.batch.clear();
        let stats = render_world(&mut self.world, &self.render, &self.camera, &mut self.batch);

        let looking_at = self.world.raycast(&self.camera, RAYCAST_DISTANCE).map(|hit| hit.block);
        let hud = self.overlay.lines(
            &self.generator.config.biomes,
            &HudData {
                camera: &self.camera,
                visible_cubes: stats.visible_cubes,
                fps,
                looking_at,
            },
        );
        debug!(visible = stats.visible_cubes, faces = stats.faces_drawn, fps, "frame");

        FrameOutput { stats, hud }
    }

    pub fn shutdown(self) {
        info!(fps = self.fps.fps(), "shutting down");
        self.world.cleanup();
    }
}
