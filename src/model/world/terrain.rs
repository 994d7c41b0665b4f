// terrain.rs - height-map terrain
//
// Every column is generated from one height sample:
//   1. the biome table blends Plains/Hills parameters for the column
//   2. a 4-octave Perlin sum shaped by those parameters gives the height
//   3. the column is filled bottom-up: stone, dirt layers, one grass block, air
//
// The result is final; chunks are never regenerated.

use serde::{Deserialize, Serialize};

use super::biome::{BiomeId, BiomeParams, BiomeTable};
use super::block::BlockId;
use super::chunk::{Chunk, CHUNK_HEIGHT, CHUNK_SIZE};
use super::noise::octave_noise;
use crate::utils::BlockCoord;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    pub octaves: u32,
    /// Surface level where the height noise is zero.
    pub base_height: f32,
    /// Dirt blocks between the grass and the stone.
    pub dirt_layers: i32,
    pub biomes: BiomeTable,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            octaves: 4,
            base_height: 32.0,
            dirt_layers: 3,
            biomes: BiomeTable::default(),
        }
    }
}

pub struct TerrainGenerator {
    pub config: TerrainConfig,
}

impl Default for TerrainGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl TerrainGenerator {
    pub fn new() -> Self {
        Self {
            config: TerrainConfig::default(),
        }
    }

    pub fn with_config(config: TerrainConfig) -> Self {
        Self { config }
    }

    pub fn biome_params(&self, x: f32, z: f32) -> BiomeParams {
        self.config.biomes.params(x, z)
    }

    /// Octave sum times the blended height scale. Pure; defined for all x, z.
    pub fn terrain_height(&self, x: f32, z: f32) -> f32 {
        let p = self.biome_params(x, z);
        octave_noise(x, z, self.config.octaves, p.frequency, p.amplitude, p.persistence) * p.height_scale
    }

    /// Y of the grass block of a column, inside the chunk column.
    pub fn surface_height(&self, x: i32, z: i32) -> i32 {
        let h = self.config.base_height + self.terrain_height(x as f32, z as f32);
        (h.floor() as i32).clamp(0, CHUNK_HEIGHT - 1)
    }

    /// Block at height `y` of a column whose surface is at `height`.
    pub fn column_block(&self, y: i32, height: i32) -> BlockId {
        if y > height {
            BlockId::Air
        } else if y == height {
            BlockId::Grass
        } else if y >= height - self.config.dirt_layers {
            BlockId::Dirt
        } else {
            BlockId::Stone
        }
    }

    pub fn biome_at(&self, x: f32, z: f32) -> BiomeId {
        let biomes = &self.config.biomes;
        biomes.biome_for_blend(biomes.blend_factor(x, z))
    }

    pub fn current_biome_text(&self, x: f32, z: f32) -> &str {
        self.config.biomes.current_biome_text(x, z)
    }

    /// Fill every column of `chunk` from the height function.
    pub fn populate_chunk(&self, chunk: &mut Chunk) {
        let position = chunk.position();
        let center = position.center();
        chunk.set_biome(self.biome_at(center.x, center.z));

        let corner = position.to_world_coord();
        for z in 0..CHUNK_SIZE {
            for x in 0..CHUNK_SIZE {
                let height = self.surface_height(corner.0 + x, corner.2 + z);

                for y in 0..=height {
                    let block = self.column_block(y, height);
                    chunk.set_block(&BlockCoord(x as usize, y as usize, z as usize), block);
                }
            }
        }
    }
}
