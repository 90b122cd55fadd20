use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{MAX_TILE_LEVEL, ROAD_MASK_BITS};
use crate::stats::Stats;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[repr(u8)]
pub enum Terrain {
    Water = 0,
    Sand = 1,
    #[default]
    Grass = 2,
}

impl Terrain {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Terrain::Water),
            1 => Some(Terrain::Sand),
            2 => Some(Terrain::Grass),
            _ => None,
        }
    }

    /// Classify a normalized height against the water and sand thresholds.
    ///
    /// Both thresholds are clamped to [0, 1]. A sand level below the water
    /// level collapses the sand band, it never puts sand under water.
    pub fn from_height(height: f32, water_level: f32, sand_level: f32) -> Self {
        let water = water_level.clamp(0.0, 1.0);
        let sand = sand_level.clamp(0.0, 1.0);
        if height < water {
            Terrain::Water
        } else if height < water.max(sand) {
            Terrain::Sand
        } else {
            Terrain::Grass
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[repr(u8)]
pub enum Overlay {
    #[default]
    None = 0,
    Road = 1,
    Residential = 2,
    Commercial = 3,
    Industrial = 4,
    Park = 5,
}

impl Overlay {
    pub const MAX: u8 = Overlay::Park as u8;

    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Overlay::None),
            1 => Some(Overlay::Road),
            2 => Some(Overlay::Residential),
            3 => Some(Overlay::Commercial),
            4 => Some(Overlay::Industrial),
            5 => Some(Overlay::Park),
            _ => None,
        }
    }

    pub fn is_zone(self) -> bool {
        matches!(
            self,
            Overlay::Residential | Overlay::Commercial | Overlay::Industrial
        )
    }

    pub fn is_road(self) -> bool {
        self == Overlay::Road
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub terrain: Terrain,
    pub overlay: Overlay,
    /// Normalized elevation in [0, 1].
    pub height: f32,
    /// Stable per-tile random bits. Road tiles keep their connection mask in
    /// the low nibble.
    pub variation: u8,
    pub level: u8,
    pub occupants: u16,
    pub district: u8,
}

impl Default for Tile {
    fn default() -> Self {
        Self {
            terrain: Terrain::Grass,
            overlay: Overlay::None,
            height: 0.0,
            variation: 0,
            level: 1,
            occupants: 0,
            district: 0,
        }
    }
}

impl Tile {
    /// Clear whatever is built on the tile.
    pub fn clear_overlay(&mut self) {
        self.overlay = Overlay::None;
        self.level = 1;
        self.occupants = 0;
    }

    /// Set the overlay and bring level/occupants into the range that overlay
    /// allows. Zones keep their occupants, roads and everything else drop them.
    pub fn set_overlay_normalized(&mut self, overlay: Overlay, level: u8, occupants: u16) {
        self.overlay = overlay;
        if overlay.is_zone() {
            self.level = level.clamp(1, MAX_TILE_LEVEL);
            self.occupants = occupants;
        } else if overlay.is_road() {
            self.level = level.clamp(1, MAX_TILE_LEVEL);
            self.occupants = 0;
        } else {
            self.level = 1;
            self.occupants = 0;
        }
    }

    #[inline]
    pub fn road_mask(&self) -> u8 {
        self.variation & ROAD_MASK_BITS
    }
}

/// Row-major tile grid plus the world-wide counters saved alongside it.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct WorldGrid {
    pub tiles: Vec<Tile>,
    pub width: usize,
    pub height: usize,
    pub seed: u64,
    pub stats: Stats,
}

impl WorldGrid {
    pub fn new(width: usize, height: usize, seed: u64) -> Self {
        Self {
            tiles: vec![Tile::default(); width * height],
            width,
            height,
            seed,
            stats: Stats::default(),
        }
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    #[inline]
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> &Tile {
        &self.tiles[self.index(x, y)]
    }

    #[inline]
    pub fn get_mut(&mut self, x: usize, y: usize) -> &mut Tile {
        let idx = self.index(x, y);
        &mut self.tiles[idx]
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Returns up to 4 cardinal neighbors and the count of valid entries.
    /// Use `&result[..count]` to iterate over valid neighbors.
    pub fn neighbors4(&self, x: usize, y: usize) -> ([(usize, usize); 4], usize) {
        let mut result = [(0, 0); 4];
        let mut count = 0;
        if x > 0 {
            result[count] = (x - 1, y);
            count += 1;
        }
        if x + 1 < self.width {
            result[count] = (x + 1, y);
            count += 1;
        }
        if y > 0 {
            result[count] = (x, y - 1);
            count += 1;
        }
        if y + 1 < self.height {
            result[count] = (x, y + 1);
            count += 1;
        }
        (result, count)
    }

    fn is_road_at(&self, x: isize, y: isize) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        let (x, y) = (x as usize, y as usize);
        self.in_bounds(x, y) && self.get(x, y).overlay.is_road()
    }

    /// Road connection mask for the tile at (x, y):
    /// bit 0 north (y-1), bit 1 east (x+1), bit 2 south (y+1), bit 3 west (x-1).
    pub fn compute_road_mask(&self, x: usize, y: usize) -> u8 {
        let (x, y) = (x as isize, y as isize);
        let mut mask = 0u8;
        if self.is_road_at(x, y - 1) {
            mask |= 1 << 0;
        }
        if self.is_road_at(x + 1, y) {
            mask |= 1 << 1;
        }
        if self.is_road_at(x, y + 1) {
            mask |= 1 << 2;
        }
        if self.is_road_at(x - 1, y) {
            mask |= 1 << 3;
        }
        mask
    }

    /// Rewrite the connection mask of every road tile. Non-road tiles keep
    /// their variation bits untouched.
    pub fn recompute_road_masks(&mut self) {
        for y in 0..self.height {
            for x in 0..self.width {
                if !self.get(x, y).overlay.is_road() {
                    continue;
                }
                let mask = self.compute_road_mask(x, y);
                let tile = self.get_mut(x, y);
                tile.variation = (tile.variation & !ROAD_MASK_BITS) | mask;
            }
        }
    }

    pub fn count_overlay(&self, overlay: Overlay) -> usize {
        self.tiles.iter().filter(|t| t.overlay == overlay).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_from_u8_rejects_unknown() {
        for v in 0..=Overlay::MAX {
            assert_eq!(Overlay::from_u8(v).map(|o| o as u8), Some(v));
        }
        assert_eq!(Overlay::from_u8(6), None);
        assert_eq!(Overlay::from_u8(255), None);
    }

    #[test]
    fn test_terrain_from_height_thresholds() {
        assert_eq!(Terrain::from_height(0.10, 0.35, 0.42), Terrain::Water);
        assert_eq!(Terrain::from_height(0.35, 0.35, 0.42), Terrain::Sand);
        assert_eq!(Terrain::from_height(0.41, 0.35, 0.42), Terrain::Sand);
        assert_eq!(Terrain::from_height(0.42, 0.35, 0.42), Terrain::Grass);
    }

    #[test]
    fn test_terrain_from_height_sand_below_water_has_no_sand_band() {
        assert_eq!(Terrain::from_height(0.30, 0.40, 0.20), Terrain::Water);
        assert_eq!(Terrain::from_height(0.40, 0.40, 0.20), Terrain::Grass);
    }

    #[test]
    fn test_terrain_from_height_clamps_thresholds() {
        // water level above 1 clamps to 1: everything below 1 is water
        assert_eq!(Terrain::from_height(0.99, 3.0, 4.0), Terrain::Water);
        assert_eq!(Terrain::from_height(0.0, -1.0, -1.0), Terrain::Grass);
    }

    #[test]
    fn test_set_overlay_normalized() {
        let mut tile = Tile::default();
        tile.set_overlay_normalized(Overlay::Residential, 9, 40);
        assert_eq!((tile.level, tile.occupants), (3, 40));

        tile.set_overlay_normalized(Overlay::Road, 0, 40);
        assert_eq!((tile.level, tile.occupants), (1, 0));

        tile.set_overlay_normalized(Overlay::Park, 3, 12);
        assert_eq!((tile.level, tile.occupants), (1, 0));
    }

    #[test]
    fn test_road_masks_cross() {
        let mut grid = WorldGrid::new(3, 3, 0);
        for (x, y) in [(1, 0), (0, 1), (1, 1), (2, 1), (1, 2)] {
            grid.get_mut(x, y).overlay = Overlay::Road;
        }
        grid.get_mut(1, 1).variation = 0xA0;
        grid.recompute_road_masks();

        assert_eq!(grid.get(1, 1).road_mask(), 0b1111);
        assert_eq!(grid.get(1, 1).variation & 0xF0, 0xA0, "high bits preserved");
        assert_eq!(grid.get(1, 0).road_mask(), 0b0100, "north arm connects south");
        assert_eq!(grid.get(2, 1).road_mask(), 0b1000, "east arm connects west");
        assert_eq!(grid.get(1, 2).road_mask(), 0b0001, "south arm connects north");
        assert_eq!(grid.get(0, 1).road_mask(), 0b0010, "west arm connects east");
    }

    #[test]
    fn test_road_masks_leave_non_roads_alone() {
        let mut grid = WorldGrid::new(2, 1, 0);
        grid.get_mut(0, 0).overlay = Overlay::Road;
        grid.get_mut(1, 0).variation = 0x3C;
        grid.recompute_road_masks();
        assert_eq!(grid.get(1, 0).variation, 0x3C);
        assert_eq!(grid.get(0, 0).road_mask(), 0);
    }

    #[test]
    fn test_neighbors4_corner() {
        let grid = WorldGrid::new(4, 4, 0);
        let (_, count) = grid.neighbors4(0, 0);
        assert_eq!(count, 2);
        let (_, count) = grid.neighbors4(2, 2);
        assert_eq!(count, 4);
    }
}
