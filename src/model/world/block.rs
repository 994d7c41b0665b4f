use glam::IVec3;
use serde::{Deserialize, Serialize};

#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockId {
    #[default]
    Air = 0,
    Grass = 1,
    Dirt = 2,
    Stone = 3,
}

impl BlockId {
    pub fn is_air(self) -> bool {
        self == BlockId::Air
    }

    pub fn is_solid(self) -> bool {
        !self.is_air()
    }
}

/// Cube faces in the order the face geometry table uses.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Face {
    Right = 0,  // +X
    Left = 1,   // -X
    Top = 2,    // +Y
    Bottom = 3, // -Y
    Front = 4,  // +Z
    Back = 5,   // -Z
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::Right,
        Face::Left,
        Face::Top,
        Face::Bottom,
        Face::Front,
        Face::Back,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Step to the neighbouring block across this face.
    pub fn offset(self) -> IVec3 {
        match self {
            Face::Right => IVec3::X,
            Face::Left => IVec3::NEG_X,
            Face::Top => IVec3::Y,
            Face::Bottom => IVec3::NEG_Y,
            Face::Front => IVec3::Z,
            Face::Back => IVec3::NEG_Z,
        }
    }

    pub fn normal(self) -> [f32; 3] {
        self.offset().as_vec3().to_array()
    }
}

/// A voxel plus its lazily computed neighbour solidity.
///
/// `neighbors[face]` is only meaningful once `checked_neighbors` is set; the
/// grid fills it on first query and clears it when the block or one of its
/// six neighbours is edited.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Block {
    pub id: BlockId,
    checked_neighbors: bool,
    neighbors: [bool; 6],
}

impl Block {
    pub const AIR: Block = Block::new(BlockId::Air);

    pub const fn new(id: BlockId) -> Self {
        Self {
            id,
            checked_neighbors: false,
            neighbors: [false; 6],
        }
    }

    pub fn is_air(&self) -> bool {
        self.id.is_air()
    }

    pub fn is_solid(&self) -> bool {
        self.id.is_solid()
    }

    pub fn checked_neighbors(&self) -> bool {
        self.checked_neighbors
    }

    /// Cached neighbour flags, `None` until computed.
    pub fn neighbor_flags(&self) -> Option<[bool; 6]> {
        self.checked_neighbors.then_some(self.neighbors)
    }

    pub fn set_neighbor_flags(&mut self, flags: [bool; 6]) {
        self.neighbors = flags;
        self.checked_neighbors = true;
    }

    pub fn invalidate_neighbors(&mut self) {
        self.checked_neighbors = false;
        self.neighbors = [false; 6];
    }

    /// True when the cache says every face touches a solid block.
    pub fn fully_occluded(&self) -> bool {
        self.checked_neighbors && self.neighbors.iter().all(|&n| n)
    }
}
