//! Deterministic baseline world generation.
//!
//! `generate_world` is a pure function of `(width, height, seed, config)`.
//! Save files store only the difference against its output, so any change to
//! the steps below (or their RNG draw order) invalidates existing saves.
//!
//! Steps:
//! 1. fBm height field, classified into water/sand/grass.
//! 2. Per-tile variation bits.
//! 3. Hubs on random land tiles, joined by A* roads that avoid water.
//! 4. Zones and parks rolled on land tiles bordering a road.
//! 5. Road masks and stats.

use pathfinding::prelude::astar;

use crate::config::HUB_PLACEMENT_ATTEMPTS;
use crate::grid::{Overlay, Terrain, WorldGrid};
use crate::sim_rng::SimRng;
use crate::terrain_generation::{generate_heightfield, GenerationConfig};

const MAX_HUBS: i32 = 64;
const MAX_EXTRA_CONNECTIONS: i32 = 256;

pub fn generate_world(width: usize, height: usize, seed: u64, cfg: &GenerationConfig) -> WorldGrid {
    let mut grid = WorldGrid::new(width, height, seed);
    if width == 0 || height == 0 {
        return grid;
    }

    let heights = generate_heightfield(width, height, seed, cfg.terrain_scale);
    for (tile, &h) in grid.tiles.iter_mut().zip(heights.iter()) {
        tile.height = h;
        tile.terrain = cfg.classify(h);
    }

    let mut rng = SimRng::from_seed_u64(seed);
    for tile in &mut grid.tiles {
        tile.variation = rng.byte();
    }

    let hubs = place_hubs(&grid, &mut rng, cfg.hubs.clamp(0, MAX_HUBS) as usize);
    for &(x, y) in &hubs {
        lay_road(&mut grid, (x, y));
    }
    for pair in hubs.windows(2) {
        connect(&mut grid, pair[0], pair[1]);
    }
    if hubs.len() >= 2 {
        for _ in 0..cfg.extra_connections.clamp(0, MAX_EXTRA_CONNECTIONS) {
            let a = rng.below(hubs.len() as u32) as usize;
            let b = rng.below(hubs.len() as u32) as usize;
            if a != b {
                connect(&mut grid, hubs[a], hubs[b]);
            }
        }
    }

    roll_zones(&mut grid, &mut rng, cfg);

    grid.recompute_road_masks();
    grid.stats.roads = grid.count_overlay(Overlay::Road) as i32;
    grid.stats.parks = grid.count_overlay(Overlay::Park) as i32;
    grid
}

fn place_hubs(grid: &WorldGrid, rng: &mut SimRng, count: usize) -> Vec<(usize, usize)> {
    let mut hubs = Vec::with_capacity(count);
    for _ in 0..count {
        for _ in 0..HUB_PLACEMENT_ATTEMPTS {
            let x = rng.below(grid.width as u32) as usize;
            let y = rng.below(grid.height as u32) as usize;
            if grid.get(x, y).terrain != Terrain::Water && !hubs.contains(&(x, y)) {
                hubs.push((x, y));
                break;
            }
        }
    }
    hubs
}

fn lay_road(grid: &mut WorldGrid, (x, y): (usize, usize)) {
    let tile = grid.get_mut(x, y);
    if tile.terrain == Terrain::Water {
        return;
    }
    tile.set_overlay_normalized(Overlay::Road, 1, 0);
}

/// Carve the shortest land-only road between two hubs. Hubs separated by
/// water stay disconnected.
fn connect(grid: &mut WorldGrid, from: (usize, usize), to: (usize, usize)) {
    let path = astar(
        &from,
        |&(x, y)| {
            let (neighbors, count) = grid.neighbors4(x, y);
            neighbors[..count]
                .iter()
                .filter(|&&(nx, ny)| grid.get(nx, ny).terrain != Terrain::Water)
                .map(|&n| (n, 1u32))
                .collect::<Vec<_>>()
        },
        |&(x, y)| (x.abs_diff(to.0) + y.abs_diff(to.1)) as u32,
        |&p| p == to,
    );

    if let Some((cells, _cost)) = path {
        for cell in cells {
            lay_road(grid, cell);
        }
    }
}

fn roll_zones(grid: &mut WorldGrid, rng: &mut SimRng, cfg: &GenerationConfig) {
    const ZONES: [Overlay; 3] = [
        Overlay::Residential,
        Overlay::Commercial,
        Overlay::Industrial,
    ];

    for y in 0..grid.height {
        for x in 0..grid.width {
            let tile = grid.get(x, y);
            if tile.terrain == Terrain::Water || tile.overlay != Overlay::None {
                continue;
            }
            let (neighbors, count) = grid.neighbors4(x, y);
            let touches_road = neighbors[..count]
                .iter()
                .any(|&(nx, ny)| grid.get(nx, ny).overlay.is_road());
            if !touches_road {
                continue;
            }

            let roll = rng.unit();
            if roll < cfg.zone_chance {
                let zone = ZONES[rng.below(ZONES.len() as u32) as usize];
                grid.get_mut(x, y).set_overlay_normalized(zone, 1, 0);
            } else if roll < cfg.zone_chance + cfg.park_chance {
                grid.get_mut(x, y).set_overlay_normalized(Overlay::Park, 1, 0);
            }
        }
    }
}
