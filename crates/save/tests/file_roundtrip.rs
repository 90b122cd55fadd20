//! End-to-end checks of the on-disk save API.

use std::fs;
use std::path::PathBuf;

use save::{
    load_world_binary, parse_header, read_save_summary, save_world_binary, CrcStatus, SaveError,
    SaveVersion, HEADER_SIZE,
};
use simulation::{generate_world, GenerationConfig, Overlay, SimConfig, WorldGrid};

fn test_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from(format!("/tmp/isocity_file_roundtrip_{}", name));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn city() -> (WorldGrid, GenerationConfig, SimConfig) {
    let gen = GenerationConfig {
        hubs: 7,
        extra_connections: 4,
        ..GenerationConfig::default()
    };
    let mut world = generate_world(64, 48, 0xC0FFEE, &gen);
    for i in (0..world.tiles.len()).step_by(37) {
        if world.tiles[i].overlay == Overlay::None {
            world.tiles[i].set_overlay_normalized(Overlay::Commercial, 2, 6);
            world.tiles[i].district = (i % 8) as u8;
        }
    }
    world.recompute_road_masks();
    world.stats.day = 365;
    world.stats.money = -20;
    let mut sim = SimConfig {
        district_policies_enabled: true,
        maintenance_road: 3,
        ..SimConfig::default()
    };
    sim.district_policies[5].tax_industrial_mult = 0.25;
    (world, gen, sim)
}

#[test]
fn save_and_load_file() {
    let dir = test_dir("basic");
    let path = dir.join("city.bin");
    let (world, gen, sim) = city();

    save_world_binary(&world, &gen, &sim, &path).unwrap();
    let loaded = load_world_binary(&path).unwrap();

    assert_eq!(loaded.version, SaveVersion::CURRENT);
    assert_eq!(loaded.grid, world);
    assert_eq!(loaded.generation, gen);
    assert_eq!(loaded.sim, sim);
    assert_eq!(loaded.report.steps_applied, 0);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn overwrite_replaces_previous_save() {
    let dir = test_dir("overwrite");
    let path = dir.join("city.bin");
    let (mut world, gen, sim) = city();

    save_world_binary(&world, &gen, &sim, &path).unwrap();
    world.stats.day = 366;
    save_world_binary(&world, &gen, &sim, &path).unwrap();

    assert_eq!(load_world_binary(&path).unwrap().grid.stats.day, 366);
    let leftovers: Vec<_> = fs::read_dir(&dir).unwrap().collect();
    assert_eq!(leftovers.len(), 1, "only the save itself remains");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn header_and_summary_agree_with_world() {
    let dir = test_dir("summary");
    let path = dir.join("city.bin");
    let (world, gen, sim) = city();
    save_world_binary(&world, &gen, &sim, &path).unwrap();

    let bytes = fs::read(&path).unwrap();
    let header = parse_header(&bytes[..HEADER_SIZE]).unwrap();
    assert_eq!((header.width, header.height, header.seed), (64, 48, 0xC0FFEE));

    let summary = read_save_summary(&path, true).unwrap();
    assert_eq!(summary.crc, CrcStatus::Valid);
    assert_eq!(summary.stats, world.stats);
    assert_eq!(summary.sim, Some(sim));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn corrupted_file_is_rejected() {
    let dir = test_dir("corrupted");
    let path = dir.join("city.bin");
    let (world, gen, sim) = city();
    save_world_binary(&world, &gen, &sim, &path).unwrap();

    let mut bytes = fs::read(&path).unwrap();
    let mid = bytes.len() / 2;
    bytes[mid] ^= 0x40;
    fs::write(&path, &bytes).unwrap();

    match load_world_binary(&path) {
        Err(SaveError::ChecksumMismatch { stored, computed }) => assert_ne!(stored, computed),
        other => panic!("unexpected: {other:?}"),
    }
    assert!(matches!(
        read_save_summary(&path, true).unwrap().crc,
        CrcStatus::Mismatch { .. }
    ));

    let _ = fs::remove_dir_all(&dir);
}
