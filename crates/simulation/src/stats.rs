use serde::{Deserialize, Serialize};

use crate::config::{STARTING_HAPPINESS, STARTING_MONEY};

/// City-wide counters stored with every save.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub day: i32,
    pub population: i32,
    pub housing_capacity: i32,
    pub jobs_capacity: i32,
    pub employed: i32,
    pub happiness: f32,
    pub money: i32,
    pub roads: i32,
    pub parks: i32,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            day: 0,
            population: 0,
            housing_capacity: 0,
            jobs_capacity: 0,
            employed: 0,
            happiness: STARTING_HAPPINESS,
            money: STARTING_MONEY,
            roads: 0,
            parks: 0,
        }
    }
}
