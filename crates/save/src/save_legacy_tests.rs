// ---------------------------------------------------------------------------
// save_legacy_tests – every historical version loads into the current model
// ---------------------------------------------------------------------------

use simulation::{generate_world, GenerationConfig, Overlay, SimConfig, Terrain, WorldGrid};

use crate::file_header::MAGIC;
use crate::height::dequantize_height;
use crate::save_api::{encode_world, load_world_from_bytes, save_world_to_bytes};
use crate::save_version::SaveVersion;

fn edited_world() -> (WorldGrid, GenerationConfig) {
    // road layout must match the default baseline so v1 re-saves cleanly
    let gen = GenerationConfig {
        zone_chance: 0.3,
        ..GenerationConfig::default()
    };
    let mut world = generate_world(32, 24, 1001, &gen);
    let land: Vec<usize> = (0..world.tiles.len())
        .filter(|&i| world.tiles[i].terrain != Terrain::Water)
        .take(40)
        .collect();
    world.tiles[land[0]].set_overlay_normalized(Overlay::Residential, 3, 25);
    world.tiles[land[1]].set_overlay_normalized(Overlay::Road, 2, 0);
    world.tiles[land[2]].set_overlay_normalized(Overlay::Park, 1, 0);
    world.tiles[land[39]].clear_overlay();
    world.recompute_road_masks();
    world.stats.day = 40;
    world.stats.population = 130;
    (world, gen)
}

#[test]
fn test_v1_concrete_four_by_four() {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&MAGIC);
    bytes.extend_from_slice(&1u32.to_le_bytes());
    bytes.extend_from_slice(&4u32.to_le_bytes());
    bytes.extend_from_slice(&4u32.to_le_bytes());
    bytes.extend_from_slice(&9u64.to_le_bytes());
    // stats: day, population, housing, jobs, employed, happiness, money, roads, parks
    for v in [3i32, 0, 0, 0, 0] {
        bytes.extend_from_slice(&v.to_le_bytes());
    }
    bytes.extend_from_slice(&0.5f32.to_le_bytes());
    for v in [250i32, 1, 0] {
        bytes.extend_from_slice(&v.to_le_bytes());
    }
    for i in 0..16u8 {
        let overlay = if i == 5 { 1u8 } else { 0 };
        bytes.push(2); // grass
        bytes.push(overlay);
        bytes.extend_from_slice(&0.5f32.to_le_bytes());
        bytes.push(i);
        bytes.push(1);
        bytes.extend_from_slice(&0u16.to_le_bytes());
    }

    let loaded = load_world_from_bytes(&bytes).unwrap();
    assert_eq!(loaded.version, SaveVersion::V1);
    assert_eq!(loaded.report.steps_applied, 6);
    assert_eq!((loaded.grid.width, loaded.grid.height, loaded.grid.seed), (4, 4, 9));
    assert_eq!(loaded.grid.tiles[5].overlay, Overlay::Road);
    assert_eq!(loaded.grid.tiles[5].road_mask(), 0, "isolated road");
    assert!(loaded.grid.tiles.iter().all(|t| t.district == 0));
    assert!(!loaded.sim.district_policies_enabled);
    assert_eq!(loaded.sim, SimConfig::default());
    assert_eq!(loaded.generation, GenerationConfig::default());
    assert_eq!(loaded.grid.stats.day, 3);
    assert_eq!(loaded.grid.stats.roads, 1);
}

#[test]
fn test_every_version_restores_overlay_edits() {
    let (world, gen) = edited_world();
    let sim = SimConfig::default();
    for version in SaveVersion::ALL {
        let bytes = encode_world(version, &world, &gen, &sim).unwrap();
        let loaded = load_world_from_bytes(&bytes).unwrap();
        assert_eq!(loaded.version, version);
        assert_eq!(loaded.grid, world, "{version:?}");
        assert_eq!(loaded.report.final_version, SaveVersion::CURRENT);
        if version.has_generation_config() {
            assert_eq!(loaded.generation, gen, "{version:?}");
        }
    }
}

#[test]
fn test_height_edits_need_v5() {
    let (mut world, gen) = edited_world();
    let idx = world
        .tiles
        .iter()
        .position(|t| t.terrain == Terrain::Grass && t.overlay == Overlay::None)
        .unwrap();
    world.tiles[idx].height = 0.97;
    let sim = SimConfig::default();

    let v4 = load_world_from_bytes(&encode_world(SaveVersion::V4, &world, &gen, &sim).unwrap())
        .unwrap();
    assert_ne!(v4.grid.tiles[idx].height, 0.97, "v4 has no height diffs");

    for version in [SaveVersion::V5, SaveVersion::V6, SaveVersion::V7] {
        let loaded =
            load_world_from_bytes(&encode_world(version, &world, &gen, &sim).unwrap()).unwrap();
        let h = loaded.grid.tiles[idx].height;
        assert!((h - 0.97).abs() <= 0.5 / 65535.0 + f32::EPSILON, "{version:?}: {h}");
        assert_eq!(h, dequantize_height(crate::height::quantize_height(0.97)));
    }
}

#[test]
fn test_flooded_tile_loses_overlay() {
    let (mut world, gen) = edited_world();
    let idx = world
        .tiles
        .iter()
        .position(|t| t.overlay == Overlay::Residential)
        .unwrap();
    world.tiles[idx].height = 0.0;

    let bytes = save_world_to_bytes(&world, &gen, &SimConfig::default()).unwrap();
    let loaded = load_world_from_bytes(&bytes).unwrap();
    let tile = loaded.grid.tiles[idx];
    assert_eq!(tile.terrain, Terrain::Water);
    assert_eq!(tile.overlay, Overlay::None);
    assert_eq!(tile.occupants, 0);
    assert!(loaded
        .grid
        .tiles
        .iter()
        .all(|t| t.terrain != Terrain::Water || t.overlay == Overlay::None));
}

#[test]
fn test_flooded_road_is_removed_on_load() {
    let (mut world, gen) = edited_world();
    let idx = world
        .tiles
        .iter()
        .position(|t| t.overlay == Overlay::Road && t.level == 2)
        .unwrap();
    world.tiles[idx].height = 0.0;

    let bytes = save_world_to_bytes(&world, &gen, &SimConfig::default()).unwrap();
    let loaded = load_world_from_bytes(&bytes).unwrap();
    let tile = loaded.grid.tiles[idx];
    assert_eq!(tile.terrain, Terrain::Water);
    assert_eq!(tile.overlay, Overlay::None);
    assert_eq!(tile.level, 1);
    assert_eq!(tile.occupants, 0);
}

#[test]
fn test_v6_drops_districts_and_policies() {
    let (mut world, gen) = edited_world();
    world.tiles[3].district = 6;
    world.tiles[100].district = 2;
    let mut sim = SimConfig {
        tax_commercial: 7,
        district_policies_enabled: true,
        ..SimConfig::default()
    };
    sim.district_policies[6].park_maintenance_mult = 2.0;

    let v6 = load_world_from_bytes(&encode_world(SaveVersion::V6, &world, &gen, &sim).unwrap())
        .unwrap();
    assert!(v6.grid.tiles.iter().all(|t| t.district == 0));
    assert_eq!(v6.sim.tax_commercial, 7);
    assert!(!v6.sim.district_policies_enabled);
    assert_eq!(v6.sim.district_policies, SimConfig::default().district_policies);

    let v7 = load_world_from_bytes(&encode_world(SaveVersion::V7, &world, &gen, &sim).unwrap())
        .unwrap();
    assert_eq!(v7.grid.tiles[3].district, 6);
    assert_eq!(v7.grid.tiles[100].district, 2);
    assert_eq!(v7.sim, sim);
}

#[test]
fn test_resave_is_byte_identical() {
    let (mut world, gen) = edited_world();
    world.tiles[7].district = 4;
    world.tiles[8].height = 0.9;
    let sim = SimConfig {
        district_policies_enabled: true,
        ..SimConfig::default()
    };

    let first = save_world_to_bytes(&world, &gen, &sim).unwrap();
    let loaded = load_world_from_bytes(&first).unwrap();
    let second = save_world_to_bytes(&loaded.grid, &loaded.generation, &loaded.sim).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_legacy_resave_upgrades_to_current() {
    let (world, gen) = edited_world();
    let sim = SimConfig::default();
    for version in SaveVersion::ALL {
        let legacy = load_world_from_bytes(&encode_world(version, &world, &gen, &sim).unwrap())
            .unwrap();
        let bytes = save_world_to_bytes(&legacy.grid, &legacy.generation, &legacy.sim).unwrap();
        assert_eq!(&bytes[8..12], &SaveVersion::CURRENT.as_u32().to_le_bytes());
        let current = load_world_from_bytes(&bytes).unwrap();
        assert_eq!(current.grid, legacy.grid, "{version:?}");
        assert_eq!(current.report.steps_applied, 0);
    }
}

#[test]
fn test_out_of_range_sim_config_clamped_on_load() {
    let (world, gen) = edited_world();
    let sim = SimConfig {
        tick_seconds: 1000.0,
        park_influence_radius: -5,
        tax_residential: 500,
        ..SimConfig::default()
    };
    let loaded = load_world_from_bytes(&save_world_to_bytes(&world, &gen, &sim).unwrap()).unwrap();
    assert_eq!(loaded.sim.tick_seconds, 60.0);
    assert_eq!(loaded.sim.park_influence_radius, 0);
    assert_eq!(loaded.sim.tax_residential, 100);
}
