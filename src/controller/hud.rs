use crate::model::world::BiomeTable;
use crate::model::Camera;
use crate::utils::{ChunkCoord, WorldCoord};

/// Per-frame values shown in the overlay.
pub struct HudData<'a> {
    pub camera: &'a Camera,
    pub visible_cubes: usize,
    pub fps: f32,
    /// Block under the crosshair, if the view ray hit one.
    pub looking_at: Option<WorldCoord>,
}

/// Debug text lines, top to bottom. Drawing the text is up to the caller.
pub struct DebugOverlay {
    build_info: String,
}

impl Default for DebugOverlay {
    fn default() -> Self {
        Self::new(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
    }
}

impl DebugOverlay {
    pub fn new(build_name: &str, build_version: &str) -> Self {
        Self {
            build_info: format!("{build_name} {build_version}"),
        }
    }

    pub fn lines(&self, biomes: &BiomeTable, data: &HudData) -> Vec<String> {
        let eye = data.camera.eye;
        let chunk = ChunkCoord::from_world_pos(eye);

        let mut lines = vec![
            format!("Current biome: {}", biomes.current_biome_text(eye.x, eye.z)),
            format!("Chunk coordinates: X:{} Z:{}", chunk.0, chunk.1),
            format!("World coordinates: X:{:.1} Y:{:.1} Z:{:.1}", eye.x, eye.y, eye.z),
            format!("Visible Cubes: {}", data.visible_cubes),
            format!("FPS: {:.1}", data.fps),
            self.build_info.clone(),
        ];
        if let Some(block) = data.looking_at {
            lines.push(format!("Block coordinates: X:{} Y:{} Z:{}", block.0, block.1, block.2));
        }
        lines
    }
}
