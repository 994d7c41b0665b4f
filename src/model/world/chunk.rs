use super::biome::BiomeId;
use super::block::{Block, BlockId};
use crate::utils::{BlockCoord, ChunkCoord};

pub const CHUNK_SIZE: i32 = 16;
pub const CHUNK_HEIGHT: i32 = 64;
/// Edge length of one block in world units.
pub const CUBE_SIZE: f32 = 1.0;
pub const N_BLOCKS_PER_CHUNK: usize = (CHUNK_SIZE * CHUNK_HEIGHT * CHUNK_SIZE) as usize;

/// A CHUNK_SIZE x CHUNK_HEIGHT x CHUNK_SIZE column of blocks. Never resized.
#[derive(Clone)]
pub struct Chunk {
    blocks: Vec<Block>,
    position: ChunkCoord,
    biome: BiomeId,

    // tracks number of air blocks so empty chunks can be skipped
    n_empty_blocks: usize,
}

impl Chunk {
    /// creates a new chunk full of air
    pub fn new_empty(position: ChunkCoord) -> Self {
        Self {
            blocks: vec![Block::AIR; N_BLOCKS_PER_CHUNK],
            position,
            biome: BiomeId::Plains,
            n_empty_blocks: N_BLOCKS_PER_CHUNK,
        }
    }

    pub fn position(&self) -> ChunkCoord {
        self.position
    }

    pub fn biome(&self) -> BiomeId {
        self.biome
    }

    pub fn set_biome(&mut self, biome: BiomeId) {
        self.biome = biome;
    }

    pub fn is_empty(&self) -> bool {
        self.n_empty_blocks == N_BLOCKS_PER_CHUNK
    }

    pub fn solid_count(&self) -> usize {
        N_BLOCKS_PER_CHUNK - self.n_empty_blocks
    }

    pub fn get_block(&self, coord: &BlockCoord) -> &Block {
        &self.blocks[coord.get_block_idx()]
    }

    pub fn get_block_mut(&mut self, coord: &BlockCoord) -> &mut Block {
        &mut self.blocks[coord.get_block_idx()]
    }

    pub fn block_at(&self, idx: usize) -> &Block {
        &self.blocks[idx]
    }

    /// Replaces the block id and returns the old one. Does not touch any
    /// neighbour cache; the world grid handles invalidation.
    pub fn set_block(&mut self, coord: &BlockCoord, new: BlockId) -> BlockId {
        let target = &mut self.blocks[coord.get_block_idx()];
        let old = target.id;

        if old.is_air() && !new.is_air() {
            self.n_empty_blocks -= 1;
        } else if !old.is_air() && new.is_air() {
            self.n_empty_blocks += 1;
        }

        *target = Block::new(new);
        old
    }

    pub fn iter(&self) -> impl Iterator<Item = (BlockCoord, &Block)> + '_ {
        self.blocks
            .iter()
            .enumerate()
            .map(|(idx, block)| (BlockCoord::from_block_idx(idx), block))
    }
}
