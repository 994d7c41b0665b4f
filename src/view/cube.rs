use glam::{Mat4, Vec3};

use crate::model::world::{Face, CUBE_SIZE};
use crate::utils::{Vertex, WorldCoord};

pub const VERTICES_PER_FACE: usize = 6;

const fn v(pos: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Vertex {
    Vertex { pos, normal, uv }
}

/// Two triangles per face of a unit cube centred on the origin, indexed by
/// `Face::index()`.
pub const CUBE_FACES: [[Vertex; VERTICES_PER_FACE]; 6] = [
    // right (+X)
    [
        v([0.5, -0.5, -0.5], [1.0, 0.0, 0.0], [0.0, 1.0]),
        v([0.5, -0.5, 0.5], [1.0, 0.0, 0.0], [1.0, 1.0]),
        v([0.5, 0.5, 0.5], [1.0, 0.0, 0.0], [1.0, 0.0]),
        v([0.5, 0.5, 0.5], [1.0, 0.0, 0.0], [1.0, 0.0]),
        v([0.5, 0.5, -0.5], [1.0, 0.0, 0.0], [0.0, 0.0]),
        v([0.5, -0.5, -0.5], [1.0, 0.0, 0.0], [0.0, 1.0]),
    ],
    // left (-X)
    [
        v([-0.5, -0.5, -0.5], [-1.0, 0.0, 0.0], [0.0, 1.0]),
        v([-0.5, -0.5, 0.5], [-1.0, 0.0, 0.0], [1.0, 1.0]),
        v([-0.5, 0.5, 0.5], [-1.0, 0.0, 0.0], [1.0, 0.0]),
        v([-0.5, 0.5, 0.5], [-1.0, 0.0, 0.0], [1.0, 0.0]),
        v([-0.5, 0.5, -0.5], [-1.0, 0.0, 0.0], [0.0, 0.0]),
        v([-0.5, -0.5, -0.5], [-1.0, 0.0, 0.0], [0.0, 1.0]),
    ],
    // top (+Y)
    [
        v([-0.5, 0.5, -0.5], [0.0, 1.0, 0.0], [0.0, 0.0]),
        v([0.5, 0.5, -0.5], [0.0, 1.0, 0.0], [1.0, 0.0]),
        v([0.5, 0.5, 0.5], [0.0, 1.0, 0.0], [1.0, 1.0]),
        v([0.5, 0.5, 0.5], [0.0, 1.0, 0.0], [1.0, 1.0]),
        v([-0.5, 0.5, 0.5], [0.0, 1.0, 0.0], [0.0, 1.0]),
        v([-0.5, 0.5, -0.5], [0.0, 1.0, 0.0], [0.0, 0.0]),
    ],
    // bottom (-Y)
    [
        v([-0.5, -0.5, -0.5], [0.0, -1.0, 0.0], [0.0, 1.0]),
        v([0.5, -0.5, -0.5], [0.0, -1.0, 0.0], [1.0, 1.0]),
        v([0.5, -0.5, 0.5], [0.0, -1.0, 0.0], [1.0, 0.0]),
        v([0.5, -0.5, 0.5], [0.0, -1.0, 0.0], [1.0, 0.0]),
        v([-0.5, -0.5, 0.5], [0.0, -1.0, 0.0], [0.0, 0.0]),
        v([-0.5, -0.5, -0.5], [0.0, -1.0, 0.0], [0.0, 1.0]),
    ],
    // front (+Z)
    [
        v([-0.5, -0.5, 0.5], [0.0, 0.0, 1.0], [0.0, 1.0]),
        v([0.5, -0.5, 0.5], [0.0, 0.0, 1.0], [1.0, 1.0]),
        v([0.5, 0.5, 0.5], [0.0, 0.0, 1.0], [1.0, 0.0]),
        v([0.5, 0.5, 0.5], [0.0, 0.0, 1.0], [1.0, 0.0]),
        v([-0.5, 0.5, 0.5], [0.0, 0.0, 1.0], [0.0, 0.0]),
        v([-0.5, -0.5, 0.5], [0.0, 0.0, 1.0], [0.0, 1.0]),
    ],
    // back (-Z)
    [
        v([-0.5, -0.5, -0.5], [0.0, 0.0, -1.0], [0.0, 1.0]),
        v([0.5, -0.5, -0.5], [0.0, 0.0, -1.0], [1.0, 1.0]),
        v([0.5, 0.5, -0.5], [0.0, 0.0, -1.0], [1.0, 0.0]),
        v([0.5, 0.5, -0.5], [0.0, 0.0, -1.0], [1.0, 0.0]),
        v([-0.5, 0.5, -0.5], [0.0, 0.0, -1.0], [0.0, 0.0]),
        v([-0.5, -0.5, -0.5], [0.0, 0.0, -1.0], [0.0, 1.0]),
    ],
];

pub fn face_vertices(face: Face) -> &'static [Vertex; VERTICES_PER_FACE] {
    &CUBE_FACES[face.index()]
}

/// Model transform placing the unit cube over a world block.
pub fn block_model(block: WorldCoord) -> Mat4 {
    Mat4::from_translation(block.to_world_pos()) * Mat4::from_scale(Vec3::splat(CUBE_SIZE))
}
