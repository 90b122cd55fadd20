// ---------------------------------------------------------------------------
// Save migration: any parsed body -> the current in-memory world
// ---------------------------------------------------------------------------
//
// Older versions simply lack fields. Each upgrade step names the default it
// fills in; the defaults themselves are applied while restoring the body.

use bevy::prelude::*;
use simulation::{generate_world, GenerationConfig, SimConfig, WorldGrid};

use crate::diff::{apply_height_diffs, apply_tile_diffs, HeightDiff, TileDiff};
use crate::file_header::SaveHeader;
use crate::save_body::SaveBody;
use crate::save_version::SaveVersion;

/// A single upgrade: data at `from` becomes data at `from + 1`.
struct MigrationStep {
    from: SaveVersion,
    description: &'static str,
}

const MIGRATION_STEPS: [MigrationStep; 6] = [
    MigrationStep {
        from: SaveVersion::V1,
        description: "v1->v2: generation config set to defaults, tiles kept as stored",
    },
    MigrationStep {
        from: SaveVersion::V2,
        description: "v2->v3: no stored checksum",
    },
    MigrationStep {
        from: SaveVersion::V3,
        description: "v3->v4: fixed-width diffs read as a delta list",
    },
    MigrationStep {
        from: SaveVersion::V4,
        description: "v4->v5: heights taken from the baseline",
    },
    MigrationStep {
        from: SaveVersion::V5,
        description: "v5->v6: simulation config set to defaults",
    },
    MigrationStep {
        from: SaveVersion::V6,
        description: "v6->v7: every tile in district 0, district policies disabled",
    },
];

/// Result of bringing a save up to the current version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationReport {
    /// The version the save file was written at.
    pub original_version: SaveVersion,
    /// Always `SaveVersion::CURRENT`.
    pub final_version: SaveVersion,
    pub steps_applied: u32,
    /// Descriptions of each step that was applied, in order.
    pub step_descriptions: Vec<&'static str>,
}

impl MigrationReport {
    fn for_version(original: SaveVersion) -> Self {
        let step_descriptions: Vec<&'static str> = MIGRATION_STEPS
            .iter()
            .filter(|s| s.from >= original)
            .map(|s| s.description)
            .collect();
        Self {
            original_version: original,
            final_version: SaveVersion::CURRENT,
            steps_applied: step_descriptions.len() as u32,
            step_descriptions,
        }
    }
}

/// A world restored from disk together with the configs it was saved with.
#[derive(Debug, Clone)]
pub struct LoadedWorld {
    pub grid: WorldGrid,
    pub generation: GenerationConfig,
    pub sim: SimConfig,
    pub version: SaveVersion,
    pub report: MigrationReport,
}

fn replay_diffs(
    header: &SaveHeader,
    generation: &GenerationConfig,
    tile_diffs: &[TileDiff],
    height_diffs: &[HeightDiff],
) -> WorldGrid {
    let mut grid = generate_world(
        header.width as usize,
        header.height as usize,
        header.seed,
        generation,
    );
    // tile diffs first so a flooded tile always ends up cleared
    apply_tile_diffs(&mut grid, tile_diffs);
    apply_height_diffs(&mut grid, height_diffs, generation);
    grid
}

/// Restore `body` onto a fresh world, filling anything the version did not
/// store with its default.
pub(crate) fn restore(header: &SaveHeader, body: SaveBody) -> LoadedWorld {
    let version = body.version();

    let (mut grid, generation, sim) = match body {
        SaveBody::V1(b) => {
            let mut grid =
                WorldGrid::new(header.width as usize, header.height as usize, header.seed);
            grid.tiles = b.tiles;
            grid.stats = b.stats;
            (grid, GenerationConfig::default(), SimConfig::default())
        }
        SaveBody::V2(b) | SaveBody::V3(b) | SaveBody::V4(b) => {
            let mut grid = replay_diffs(header, &b.generation, &b.tile_diffs, &[]);
            grid.stats = b.stats;
            (grid, b.generation, SimConfig::default())
        }
        SaveBody::V5(b) => {
            let mut grid = replay_diffs(header, &b.generation, &b.tile_diffs, &b.height_diffs);
            grid.stats = b.stats;
            (grid, b.generation, SimConfig::default())
        }
        SaveBody::V6(b) => {
            let mut grid = replay_diffs(header, &b.generation, &b.tile_diffs, &b.height_diffs);
            grid.stats = b.stats;
            let sim = SimConfig {
                district_policies_enabled: false,
                district_policies: SimConfig::default().district_policies,
                ..b.sim.clamped()
            };
            (grid, b.generation, sim)
        }
        SaveBody::V7(b) => {
            let mut grid = replay_diffs(header, &b.generation, &b.tile_diffs, &b.height_diffs);
            grid.stats = b.stats;
            (grid, b.generation, b.sim.clamped())
        }
    };

    grid.recompute_road_masks();

    let report = MigrationReport::for_version(version);
    if report.steps_applied > 0 {
        info!(
            "Migrated save from {:?} to {:?} ({} steps)",
            report.original_version, report.final_version, report.steps_applied
        );
        for step in &report.step_descriptions {
            debug!("  {step}");
        }
    }

    LoadedWorld {
        grid,
        generation,
        sim,
        version,
        report,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_form_contiguous_chain() {
        for (i, step) in MIGRATION_STEPS.iter().enumerate() {
            assert_eq!(step.from, SaveVersion::ALL[i], "step {i} out of order");
        }
        assert_eq!(MIGRATION_STEPS.len() + 1, SaveVersion::ALL.len());
    }

    #[test]
    fn test_report_for_each_version() {
        for (i, v) in SaveVersion::ALL.iter().enumerate() {
            let report = MigrationReport::for_version(*v);
            assert_eq!(report.original_version, *v);
            assert_eq!(report.final_version, SaveVersion::CURRENT);
            assert_eq!(report.steps_applied as usize, SaveVersion::ALL.len() - 1 - i);
            assert_eq!(report.step_descriptions.len(), report.steps_applied as usize);
        }
    }

    #[test]
    fn test_current_version_needs_no_steps() {
        let report = MigrationReport::for_version(SaveVersion::CURRENT);
        assert_eq!(report.steps_applied, 0);
        assert!(report.step_descriptions.is_empty());
    }

    #[test]
    fn test_v1_report_mentions_districts() {
        let report = MigrationReport::for_version(SaveVersion::V1);
        assert!(report
            .step_descriptions
            .last()
            .is_some_and(|d| d.contains("district 0")));
    }
}
