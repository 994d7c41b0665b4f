use std::time::Instant;

use tracing::{debug, info};

use super::block::{Block, BlockId, Face};
use super::chunk::{Chunk, CHUNK_HEIGHT, CHUNK_SIZE};
use super::terrain::TerrainGenerator;
use crate::error::WorldError;
use crate::model::camera::{Camera, RayHit};
use crate::utils::{BlockCoord, ChunkCoord, WorldCoord};

pub const CHUNKS_PER_AXIS: i32 = 8;
/// World edge length in blocks.
pub const WORLD_SIZE: i32 = CHUNKS_PER_AXIS * CHUNK_SIZE;

/// Counters for the occlusion cache, mostly useful in tests and benches.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WorldStats {
    /// Neighbour lookups done while filling occlusion caches.
    pub neighbor_lookups: u64,
    pub cache_fills: u64,
    pub cache_invalidations: u64,
}

/// The loaded world: CHUNKS_PER_AXIS^2 chunks stored flat, indexed `a * N + b`.
pub struct World {
    chunks: Vec<Chunk>,
    stats: WorldStats,
}

impl World {
    /// Allocates the grid with every chunk full of air.
    pub fn empty() -> Self {
        let mut chunks = Vec::with_capacity((CHUNKS_PER_AXIS * CHUNKS_PER_AXIS) as usize);
        for a in 0..CHUNKS_PER_AXIS {
            for b in 0..CHUNKS_PER_AXIS {
                chunks.push(Chunk::new_empty(ChunkCoord(a, b)));
            }
        }
        Self {
            chunks,
            stats: WorldStats::default(),
        }
    }

    /// Builds every chunk from the terrain height function. Runs once, blocking.
    pub fn generate(generator: &TerrainGenerator) -> Self {
        let start = Instant::now();
        let mut world = Self::empty();
        for chunk in world.chunks.iter_mut() {
            generator.populate_chunk(chunk);
        }
        info!(
            chunks = world.chunks.len(),
            solid_blocks = world.solid_block_count(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "world generated"
        );
        world
    }

    /// Builds a world by asking `f` for every block position.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(WorldCoord) -> BlockId,
    {
        let mut world = Self::empty();
        for chunk in world.chunks.iter_mut() {
            let position = chunk.position();
            for z in 0..CHUNK_SIZE as usize {
                for y in 0..CHUNK_HEIGHT as usize {
                    for x in 0..CHUNK_SIZE as usize {
                        let local = BlockCoord(x, y, z);
                        let id = f(local.to_world_coord(&position));
                        if !id.is_air() {
                            chunk.set_block(&local, id);
                        }
                    }
                }
            }
        }
        world
    }

    /// Releases every chunk. Consumes the world, so it can only happen once.
    pub fn cleanup(self) {
        info!(chunks = self.chunks.len(), "world released");
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub fn chunk(&self, coord: ChunkCoord) -> Option<&Chunk> {
        coord.grid_idx().map(|idx| &self.chunks[idx])
    }

    pub fn stats(&self) -> WorldStats {
        self.stats
    }

    pub fn solid_block_count(&self) -> usize {
        self.chunks.iter().map(Chunk::solid_count).sum()
    }

    /// Chunk slot and local coordinates of a block, or why it has none.
    pub fn locate(&self, pos: WorldCoord) -> Result<(usize, BlockCoord), WorldError> {
        let chunk = pos.to_chunk_coord();
        let idx = chunk
            .grid_idx()
            .ok_or(WorldError::ChunkOutOfBounds { chunk })?;
        let local = pos
            .to_block_coord()
            .ok_or(WorldError::HeightOutOfBounds { y: pos.1 })?;
        Ok((idx, local))
    }

    pub fn block(&self, pos: WorldCoord) -> Option<&Block> {
        let (idx, local) = self.locate(pos).ok()?;
        Some(self.chunks[idx].get_block(&local))
    }

    /// Block id at `pos`; positions outside the world read as air.
    pub fn block_id(&self, pos: WorldCoord) -> BlockId {
        self.block(pos).map(|b| b.id).unwrap_or(BlockId::Air)
    }

    pub fn is_solid(&self, pos: WorldCoord) -> bool {
        self.block_id(pos).is_solid()
    }

    /// Writes a block and drops the occlusion cache of it and its six neighbours.
    /// Returns the id that was replaced.
    pub fn set_block(&mut self, pos: WorldCoord, id: BlockId) -> Result<BlockId, WorldError> {
        let (idx, local) = self.locate(pos).inspect_err(|err| {
            debug!(?pos, %err, "rejected block edit");
        })?;
        let old = self.chunks[idx].set_block(&local, id);
        self.stats.cache_invalidations += 1;

        for face in Face::ALL {
            if let Ok((n_idx, n_local)) = self.locate(pos.offset(face)) {
                self.chunks[n_idx].get_block_mut(&n_local).invalidate_neighbors();
                self.stats.cache_invalidations += 1;
            }
        }
        Ok(old)
    }

    /// Per-face "touches a solid block" flags, computed on first query and
    /// cached in the block. `None` for positions outside the world.
    pub fn neighbor_flags(&mut self, pos: WorldCoord) -> Option<[bool; 6]> {
        let (idx, local) = self.locate(pos).ok()?;
        if let Some(flags) = self.chunks[idx].get_block(&local).neighbor_flags() {
            return Some(flags);
        }

        let mut flags = [false; 6];
        for face in Face::ALL {
            self.stats.neighbor_lookups += 1;
            flags[face.index()] = self.is_solid(pos.offset(face));
        }
        self.chunks[idx].get_block_mut(&local).set_neighbor_flags(flags);
        self.stats.cache_fills += 1;
        Some(flags)
    }

    /// True when all six faces of the block touch solid blocks.
    pub fn is_occluded(&mut self, pos: WorldCoord) -> Option<bool> {
        self.neighbor_flags(pos).map(|flags| flags.iter().all(|&n| n))
    }

    /// First solid block along the camera's view ray.
    pub fn raycast(&self, camera: &Camera, max_distance: f32) -> Option<RayHit> {
        camera.raycast(max_distance, |coord| self.is_solid(coord))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ground_world(top: i32) -> World {
        World::from_fn(|p| if p.1 <= top { BlockId::Stone } else { BlockId::Air })
    }

    #[test]
    fn grid_order_matches_chunk_positions() {
        let world = World::empty();
        assert_eq!(world.chunks().len(), (CHUNKS_PER_AXIS * CHUNKS_PER_AXIS) as usize);
        for (idx, chunk) in world.chunks().iter().enumerate() {
            assert_eq!(chunk.position().grid_idx(), Some(idx));
        }
    }

    #[test]
    fn chunk_lookup_is_bounds_checked() {
        let world = World::empty();
        assert!(world.chunk(ChunkCoord(0, 0)).is_some());
        assert!(world.chunk(ChunkCoord(7, 7)).is_some());
        assert!(world.chunk(ChunkCoord(8, 0)).is_none());
        assert!(world.chunk(ChunkCoord(0, -1)).is_none());
    }

    #[test]
    fn locate_reports_why_a_block_is_missing() {
        let world = World::empty();
        assert_eq!(
            world.locate(WorldCoord(WORLD_SIZE / 2, 0, 0)),
            Err(WorldError::ChunkOutOfBounds { chunk: ChunkCoord(8, 4) })
        );
        assert_eq!(
            world.locate(WorldCoord(0, -1, 0)),
            Err(WorldError::HeightOutOfBounds { y: -1 })
        );
        assert_eq!(
            world.locate(WorldCoord(0, CHUNK_HEIGHT, 0)),
            Err(WorldError::HeightOutOfBounds { y: CHUNK_HEIGHT })
        );
        assert!(world.block(WorldCoord(-64, 0, 63)).is_some());
        assert!(world.block(WorldCoord(-65, 0, 0)).is_none());
    }

    #[test]
    fn get_block_resolves_through_chunk_and_local_coords() {
        let world = World::from_fn(|p| if p == WorldCoord(-3, 7, 20) { BlockId::Dirt } else { BlockId::Air });
        let pos = WorldCoord(-3, 7, 20);
        let chunk = world.chunk(pos.to_chunk_coord()).unwrap();
        let local = pos.to_block_coord().unwrap();
        assert_eq!(chunk.get_block(&local).id, BlockId::Dirt);
        assert_eq!(world.block_id(pos), BlockId::Dirt);
        assert_eq!(world.solid_block_count(), 1);
    }

    #[test]
    fn outside_positions_read_as_air() {
        let world = ground_world(10);
        assert_eq!(world.block_id(WorldCoord(0, -1, 0)), BlockId::Air);
        assert_eq!(world.block_id(WorldCoord(500, 5, 0)), BlockId::Air);
        assert_eq!(world.block_id(WorldCoord(0, 5, 0)), BlockId::Stone);
    }

    #[test]
    fn occlusion_cache_is_filled_once() {
        let mut world = ground_world(20);
        let pos = WorldCoord(5, 10, 5);

        let before = world.stats().neighbor_lookups;
        let first = world.neighbor_flags(pos).unwrap();
        let after_first = world.stats().neighbor_lookups;
        let second = world.neighbor_flags(pos).unwrap();
        let after_second = world.stats().neighbor_lookups;

        assert_eq!(first, second);
        assert_eq!(first, [true; 6]);
        assert!(after_first - before <= 6 && after_first > before);
        assert_eq!(after_second, after_first);
        assert_eq!(world.is_occluded(pos), Some(true));
    }

    #[test]
    fn surface_and_world_edges_are_not_occluded() {
        let mut world = ground_world(20);

        let surface = world.neighbor_flags(WorldCoord(0, 20, 0)).unwrap();
        assert!(!surface[Face::Top.index()]);
        assert!(surface[Face::Bottom.index()]);

        let edge = world.neighbor_flags(WorldCoord(-64, 5, 0)).unwrap();
        assert!(!edge[Face::Left.index()]);
        assert!(edge[Face::Right.index()]);

        let floor = world.neighbor_flags(WorldCoord(3, 0, 3)).unwrap();
        assert!(!floor[Face::Bottom.index()]);

        assert_eq!(world.is_occluded(WorldCoord(0, 200, 0)), None);
    }

    #[test]
    fn edits_invalidate_block_and_neighbors() {
        let mut world = ground_world(20);
        let pos = WorldCoord(2, 10, 2);
        assert_eq!(world.is_occluded(pos), Some(true));

        let above = pos.offset(Face::Top);
        assert_eq!(world.set_block(above, BlockId::Air), Ok(BlockId::Stone));
        assert!(!world.block(pos).unwrap().checked_neighbors());

        let flags = world.neighbor_flags(pos).unwrap();
        assert!(!flags[Face::Top.index()]);
        assert_eq!(world.is_occluded(pos), Some(false));

        world.set_block(above, BlockId::Dirt).unwrap();
        assert_eq!(world.is_occluded(pos), Some(true));
    }

    #[test]
    fn edits_outside_the_world_fail() {
        let mut world = World::empty();
        assert_eq!(
            world.set_block(WorldCoord(0, 64, 0), BlockId::Stone),
            Err(WorldError::HeightOutOfBounds { y: 64 })
        );
        assert!(world.set_block(WorldCoord(1000, 0, 0), BlockId::Stone).is_err());
    }

    #[test]
    fn generated_world_has_grass_surface() {
        let generator = TerrainGenerator::new();
        let world = World::generate(&generator);
        for (x, z) in [(0, 0), (-64, -64), (63, 63), (-10, 25)] {
            let h = generator.surface_height(x, z);
            assert_eq!(world.block_id(WorldCoord(x, h, z)), BlockId::Grass, "column ({x}, {z})");
            assert_eq!(world.block_id(WorldCoord(x, h + 1, z)), BlockId::Air);
        }
        world.cleanup();
    }
}
