/// Largest width or height a world may have, in tiles.
pub const MAX_WORLD_DIMENSION: u32 = 4096;

/// Number of districts a tile can be assigned to (ids `0..DISTRICT_COUNT`).
pub const DISTRICT_COUNT: usize = 8;

/// Zoned and road tiles carry a level in `1..=MAX_TILE_LEVEL`.
pub const MAX_TILE_LEVEL: u8 = 3;

pub const STARTING_MONEY: i32 = 250;
pub const STARTING_HAPPINESS: f32 = 0.5;

// Terrain noise
pub const TERRAIN_OCTAVES: i32 = 4;
pub const TERRAIN_PERSISTENCE: f32 = 0.5;
pub const TERRAIN_LACUNARITY: f32 = 2.0;

/// Attempts per hub when searching for a random land tile.
pub const HUB_PLACEMENT_ATTEMPTS: usize = 64;

/// Low nibble of `Tile::variation` holds the road connection mask.
pub const ROAD_MASK_BITS: u8 = 0x0F;
