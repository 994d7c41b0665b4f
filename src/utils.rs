use bytemuck::{Pod, Zeroable};
use glam::{IVec3, Mat4, Vec3};

use crate::model::world::{Face, CHUNKS_PER_AXIS, CHUNK_HEIGHT, CHUNK_SIZE, CUBE_SIZE};

/// Chunk index offset that puts grid index (N/2, N/2) at the world origin.
const HALF_AXIS: i32 = CHUNKS_PER_AXIS / 2;

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub pos: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
}

impl Mesh {
    pub fn empty() -> Self {
        Self { vertices: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Appends face vertices moved by `model` (normals by its rotation part).
    pub fn push_transformed(&mut self, vertices: &[Vertex], model: &Mat4) {
        for v in vertices {
            let pos = model.transform_point3(Vec3::from(v.pos));
            let normal = model.transform_vector3(Vec3::from(v.normal)).normalize_or_zero();
            self.vertices.push(Vertex {
                pos: pos.to_array(),
                normal: normal.to_array(),
                uv: v.uv,
            });
        }
    }

    /// Raw bytes ready for a vertex buffer upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

/// Integer coordinates of a block in world space.
#[derive(Debug, Eq, Hash, PartialEq, Clone, Copy)]
pub struct WorldCoord(pub i32, pub i32, pub i32);

impl WorldCoord {
    /// World position to the block containing it.
    pub fn from_world_pos(pos: Vec3) -> Self {
        WorldCoord(
            (pos.x / CUBE_SIZE).floor() as i32,
            (pos.y / CUBE_SIZE).floor() as i32,
            (pos.z / CUBE_SIZE).floor() as i32,
        )
    }

    /// Centre of the block in world space.
    pub fn to_world_pos(&self) -> Vec3 {
        Vec3::new(
            (self.0 as f32 + 0.5) * CUBE_SIZE,
            (self.1 as f32 + 0.5) * CUBE_SIZE,
            (self.2 as f32 + 0.5) * CUBE_SIZE,
        )
    }

    /// Grid index of the chunk holding this block. May lie outside the grid.
    pub fn to_chunk_coord(&self) -> ChunkCoord {
        ChunkCoord(
            self.0.div_euclid(CHUNK_SIZE) + HALF_AXIS,
            self.2.div_euclid(CHUNK_SIZE) + HALF_AXIS,
        )
    }

    /// Chunk-local coordinates, `None` when `y` leaves the column.
    pub fn to_block_coord(&self) -> Option<BlockCoord> {
        if !(0..CHUNK_HEIGHT).contains(&self.1) {
            return None;
        }
        Some(BlockCoord(
            self.0.rem_euclid(CHUNK_SIZE) as usize,
            self.1 as usize,
            self.2.rem_euclid(CHUNK_SIZE) as usize,
        ))
    }

    pub fn offset(&self, face: Face) -> WorldCoord {
        let d = face.offset();
        WorldCoord(self.0 + d.x, self.1 + d.y, self.2 + d.z)
    }

    pub fn to_ivec3(&self) -> IVec3 {
        IVec3::new(self.0, self.1, self.2)
    }
}

impl From<IVec3> for WorldCoord {
    fn from(v: IVec3) -> Self {
        WorldCoord(v.x, v.y, v.z)
    }
}

/// Index `(a, b)` of a chunk in the world grid.
#[derive(Debug, Eq, Hash, PartialEq, Clone, Copy)]
pub struct ChunkCoord(pub i32, pub i32);

impl ChunkCoord {
    /// Chunk containing a world position.
    pub fn from_world_pos(pos: Vec3) -> Self {
        let span = CHUNK_SIZE as f32 * CUBE_SIZE;
        ChunkCoord(
            ((pos.x / span).floor() as i32).saturating_add(HALF_AXIS),
            ((pos.z / span).floor() as i32).saturating_add(HALF_AXIS),
        )
    }

    /// Minimum corner of the chunk in world block coordinates (y = 0).
    pub fn to_world_coord(&self) -> WorldCoord {
        WorldCoord((self.0 - HALF_AXIS) * CHUNK_SIZE, 0, (self.1 - HALF_AXIS) * CHUNK_SIZE)
    }

    /// Centre of the chunk's bounding box in world space.
    pub fn center(&self) -> Vec3 {
        let corner = self.to_world_coord();
        Vec3::new(
            corner.0 as f32 * CUBE_SIZE,
            0.0,
            corner.2 as f32 * CUBE_SIZE,
        ) + chunk_half_extents()
    }

    pub fn in_bounds(&self) -> bool {
        (0..CHUNKS_PER_AXIS).contains(&self.0) && (0..CHUNKS_PER_AXIS).contains(&self.1)
    }

    /// Position in the flat chunk array, `None` outside the grid.
    pub fn grid_idx(&self) -> Option<usize> {
        self.in_bounds()
            .then(|| (self.0 * CHUNKS_PER_AXIS + self.1) as usize)
    }
}

/// Half size of a chunk's bounding box.
pub fn chunk_half_extents() -> Vec3 {
    Vec3::new(
        CHUNK_SIZE as f32 * CUBE_SIZE,
        CHUNK_HEIGHT as f32 * CUBE_SIZE,
        CHUNK_SIZE as f32 * CUBE_SIZE,
    ) * 0.5
}

/// Chunk-local block coordinates (x, z in 0..CHUNK_SIZE, y in 0..CHUNK_HEIGHT).
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct BlockCoord(pub usize, pub usize, pub usize);

impl BlockCoord {
    pub fn get_block_idx(&self) -> usize {
        self.0 + self.1 * CHUNK_SIZE as usize + self.2 * CHUNK_SIZE as usize * CHUNK_HEIGHT as usize
    }

    pub fn from_block_idx(idx: usize) -> Self {
        let size = CHUNK_SIZE as usize;
        let height = CHUNK_HEIGHT as usize;
        BlockCoord(idx % size, (idx / size) % height, idx / (size * height))
    }

    /// World coordinates of this block inside `chunk`.
    pub fn to_world_coord(&self, chunk: &ChunkCoord) -> WorldCoord {
        let corner = chunk.to_world_coord();
        WorldCoord(
            corner.0 + self.0 as i32,
            self.1 as i32,
            corner.2 + self.2 as i32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_round_trip_through_world_coords() {
        for a in 0..CHUNKS_PER_AXIS {
            for b in 0..CHUNKS_PER_AXIS {
                let chunk = ChunkCoord(a, b);
                let corner = chunk.to_world_coord();
                for lx in [0, 1, 7, CHUNK_SIZE - 1] {
                    for lz in [0, 5, CHUNK_SIZE - 1] {
                        let p = WorldCoord(corner.0 + lx, 10, corner.2 + lz);
                        assert_eq!(p.to_chunk_coord(), chunk, "block {p:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn local_coords_stay_in_range_for_negative_blocks() {
        for x in -70..70 {
            for z in [-33, -16, -1, 0, 15, 16, 63] {
                let local = WorldCoord(x, 5, z).to_block_coord().unwrap();
                assert!(local.0 < CHUNK_SIZE as usize);
                assert!(local.2 < CHUNK_SIZE as usize);
                assert_eq!(local.1, 5);
            }
        }
        assert_eq!(WorldCoord(-1, 0, -17).to_block_coord(), Some(BlockCoord(15, 0, 15)));
    }

    #[test]
    fn height_outside_column_has_no_local_coords() {
        assert_eq!(WorldCoord(0, -1, 0).to_block_coord(), None);
        assert_eq!(WorldCoord(0, CHUNK_HEIGHT, 0).to_block_coord(), None);
        assert!(WorldCoord(0, CHUNK_HEIGHT - 1, 0).to_block_coord().is_some());
    }

    #[test]
    fn world_origin_is_the_middle_chunk() {
        assert_eq!(ChunkCoord::from_world_pos(Vec3::new(0.2, 3.0, 0.7)), ChunkCoord(4, 4));
        assert_eq!(ChunkCoord::from_world_pos(Vec3::new(-0.5, 0.0, -0.5)), ChunkCoord(3, 3));
        assert_eq!(ChunkCoord(4, 4).to_world_coord(), WorldCoord(0, 0, 0));
        assert_eq!(ChunkCoord(0, 0).to_world_coord(), WorldCoord(-64, 0, -64));
    }

    #[test]
    fn far_positions_fall_outside_the_grid() {
        let far = ChunkCoord::from_world_pos(Vec3::new(1.0e11, 0.0, -1.0e11));
        assert_eq!(far, ChunkCoord(i32::MAX, i32::MIN + HALF_AXIS));
        assert!(!far.in_bounds());
        assert_eq!(far.grid_idx(), None);

        let edge = ChunkCoord::from_world_pos(Vec3::new(f32::MAX, 0.0, f32::MIN));
        assert_eq!(edge.grid_idx(), None);
        let block = WorldCoord::from_world_pos(Vec3::new(1.0e11, 5.0, -1.0e11));
        assert_eq!(block.to_chunk_coord().grid_idx(), None);
    }

    #[test]
    fn world_pos_floors_into_blocks() {
        assert_eq!(WorldCoord::from_world_pos(Vec3::new(1.9, 2.0, 0.1)), WorldCoord(1, 2, 0));
        assert_eq!(WorldCoord::from_world_pos(Vec3::new(-0.5, 0.5, -1.0)), WorldCoord(-1, 0, -1));
        assert_eq!(WorldCoord(3, 4, -2).to_world_pos(), Vec3::new(3.5, 4.5, -1.5));
    }

    #[test]
    fn block_index_is_invertible() {
        for idx in [0, 1, 17, 1023, 4096, 16383] {
            assert_eq!(BlockCoord::from_block_idx(idx).get_block_idx(), idx);
        }
    }

    #[test]
    fn grid_index_rejects_outside_chunks() {
        assert_eq!(ChunkCoord(0, 0).grid_idx(), Some(0));
        assert_eq!(ChunkCoord(1, 2).grid_idx(), Some((CHUNKS_PER_AXIS + 2) as usize));
        assert_eq!(ChunkCoord(-1, 0).grid_idx(), None);
        assert_eq!(ChunkCoord(0, CHUNKS_PER_AXIS).grid_idx(), None);
    }

    #[test]
    fn mesh_moves_vertices_and_exposes_raw_bytes() {
        let quad = [Vertex {
            pos: [0.5, 0.0, 0.0],
            normal: [1.0, 0.0, 0.0],
            uv: [0.25, 0.75],
        }; 3];
        let mut mesh = Mesh::empty();
        assert!(mesh.is_empty());

        mesh.push_transformed(&quad, &Mat4::from_translation(Vec3::new(2.0, 3.0, 4.0)));
        assert_eq!(mesh.vertices.len(), 3);
        assert_eq!(mesh.vertices[0].pos, [2.5, 3.0, 4.0]);
        assert_eq!(mesh.vertices[0].normal, [1.0, 0.0, 0.0]);
        assert_eq!(mesh.vertices[0].uv, [0.25, 0.75]);
        assert_eq!(mesh.as_bytes().len(), 3 * std::mem::size_of::<Vertex>());
    }

    #[test]
    fn chunk_center_sits_mid_column() {
        let c = ChunkCoord(4, 4).center();
        assert_eq!(c, Vec3::new(8.0, 32.0, 8.0));
    }
}
