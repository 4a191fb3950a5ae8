//! Crop - Block positions and crop states for fast wheat growth

/// Integer block coordinates in a named world
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlockPos {
    pub world: String,
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub fn new(world: impl Into<String>, x: i32, y: i32, z: i32) -> Self {
        Self {
            world: world.into(),
            x,
            y,
            z,
        }
    }

    /// The neighbouring block across `face`
    pub fn relative(&self, face: BlockFace) -> Self {
        let (dx, dy, dz) = face.offset();
        Self {
            world: self.world.clone(),
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        }
    }
}

impl core::fmt::Display for BlockPos {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}({}, {}, {})", self.world, self.x, self.y, self.z)
    }
}

/// Face of a block that was clicked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockFace {
    Up,
    Down,
    North,
    South,
    East,
    West,
}

impl BlockFace {
    /// Unit offset toward the neighbour on this face
    pub fn offset(&self) -> (i32, i32, i32) {
        match self {
            BlockFace::Up => (0, 1, 0),
            BlockFace::Down => (0, -1, 0),
            BlockFace::North => (0, 0, -1),
            BlockFace::South => (0, 0, 1),
            BlockFace::East => (1, 0, 0),
            BlockFace::West => (-1, 0, 0),
        }
    }
}

/// Item held by a player at interaction time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeldItem {
    pub material: String,
}

impl HeldItem {
    pub fn new(material: impl Into<String>) -> Self {
        Self {
            material: material.into(),
        }
    }

    /// Wheat seeds under either the current or the legacy material name
    pub fn is_wheat_seeds(&self) -> bool {
        self.material.eq_ignore_ascii_case("wheat_seeds") || self.material.eq_ignore_ascii_case("seeds")
    }
}

/// Current state of an ageable block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CropState {
    pub material: String,
    pub age: u8,
    pub max_age: u8,
}

impl CropState {
    pub fn new(material: impl Into<String>, age: u8, max_age: u8) -> Self {
        Self {
            material: material.into(),
            age,
            max_age,
        }
    }

    /// Wheat under either the current or the legacy block name
    pub fn is_wheat(&self) -> bool {
        self.material.eq_ignore_ascii_case("wheat") || self.material.eq_ignore_ascii_case("crops")
    }

    pub fn is_ripe(&self) -> bool {
        self.age >= self.max_age
    }
}
