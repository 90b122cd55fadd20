use std::path::PathBuf;

use bevy::prelude::*;
use simulation::{GenerationConfig, SimConfig, WorldGrid};

use crate::save_api::{load_world_binary, save_world_binary};
use crate::save_version::SaveVersion;

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Request to write the current `WorldGrid` to `path`.
#[derive(Event, Debug, Clone)]
pub struct SaveGameEvent {
    pub path: PathBuf,
}

/// Request to replace the current world with the save at `path`.
#[derive(Event, Debug, Clone)]
pub struct LoadGameEvent {
    pub path: PathBuf,
}

/// Fired once per handled save or load request.
#[derive(Event, Debug, Clone, PartialEq)]
pub enum SaveLoadOutcome {
    Saved { path: PathBuf },
    Loaded { path: PathBuf, version: SaveVersion },
    Failed { path: PathBuf, message: String },
}

// ---------------------------------------------------------------------------
// Plugin
// ---------------------------------------------------------------------------

pub struct SavePlugin;

impl Plugin for SavePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SaveGameEvent>()
            .add_event::<LoadGameEvent>()
            .add_event::<SaveLoadOutcome>()
            .add_systems(
                Update,
                (handle_save_events, handle_load_events.after(handle_save_events)),
            );
    }
}

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

/// Saves the world for every pending request. Missing configs fall back to
/// their defaults; a missing world is reported as a failure.
fn handle_save_events(
    mut events: EventReader<SaveGameEvent>,
    world: Option<Res<WorldGrid>>,
    generation: Option<Res<GenerationConfig>>,
    sim: Option<Res<SimConfig>>,
    mut outcomes: EventWriter<SaveLoadOutcome>,
) {
    for event in events.read() {
        let path = event.path.clone();
        let Some(world) = world.as_deref() else {
            warn!("Save requested for {} but no world is loaded", path.display());
            outcomes.send(SaveLoadOutcome::Failed {
                path,
                message: "no world loaded".to_string(),
            });
            continue;
        };
        let generation = generation.as_deref().copied().unwrap_or_default();
        let default_sim = SimConfig::default();
        let sim = sim.as_deref().unwrap_or(&default_sim);

        match save_world_binary(world, &generation, sim, &path) {
            Ok(()) => {
                outcomes.send(SaveLoadOutcome::Saved { path });
            }
            Err(e) => {
                error!("Failed to save {}: {e}", path.display());
                outcomes.send(SaveLoadOutcome::Failed {
                    path,
                    message: e.to_string(),
                });
            }
        }
    }
}

/// Loads each requested save and swaps the restored resources in. With
/// several requests in one frame the last successful load wins.
fn handle_load_events(
    mut events: EventReader<LoadGameEvent>,
    mut commands: Commands,
    mut outcomes: EventWriter<SaveLoadOutcome>,
) {
    for event in events.read() {
        let path = event.path.clone();
        match load_world_binary(&path) {
            Ok(loaded) => {
                let version = loaded.version;
                commands.insert_resource(loaded.grid);
                commands.insert_resource(loaded.generation);
                commands.insert_resource(loaded.sim);
                outcomes.send(SaveLoadOutcome::Loaded { path, version });
            }
            Err(e) => {
                error!("Failed to load {}: {e}", path.display());
                outcomes.send(SaveLoadOutcome::Failed {
                    path,
                    message: e.to_string(),
                });
            }
        }
    }
}
