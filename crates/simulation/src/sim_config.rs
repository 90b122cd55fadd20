// ---------------------------------------------------------------------------
// SimConfig: economy and tick tuning persisted with the world
// ---------------------------------------------------------------------------

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::DISTRICT_COUNT;
use crate::district_policies::{default_district_policies, DistrictPolicy};

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    pub tick_seconds: f32,
    pub park_influence_radius: i32,
    /// Zones only grow when the road network reaches the map edge.
    pub require_outside_connection: bool,

    pub tax_residential: i32,
    pub tax_commercial: i32,
    pub tax_industrial: i32,
    pub maintenance_road: i32,
    pub maintenance_park: i32,
    pub tax_happiness_per_capita: f32,

    pub residential_desirability_weight: f32,
    pub commercial_desirability_weight: f32,
    pub industrial_desirability_weight: f32,

    pub district_policies_enabled: bool,
    pub district_policies: [DistrictPolicy; DISTRICT_COUNT],
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_seconds: 0.5,
            park_influence_radius: 6,
            require_outside_connection: true,
            tax_residential: 1,
            tax_commercial: 2,
            tax_industrial: 2,
            maintenance_road: 1,
            maintenance_park: 1,
            tax_happiness_per_capita: 0.02,
            residential_desirability_weight: 0.70,
            commercial_desirability_weight: 0.80,
            industrial_desirability_weight: 0.80,
            district_policies_enabled: false,
            district_policies: default_district_policies(),
        }
    }
}

impl SimConfig {
    /// Copy with every field forced into its playable range. Values read from
    /// disk go through this before they reach the simulation.
    pub fn clamped(&self) -> Self {
        let money = |v: i32| v.clamp(0, 100);
        let weight = |v: f32| v.clamp(0.0, 4.0);
        let mut policies = self.district_policies;
        for p in &mut policies {
            *p = p.clamped();
        }
        Self {
            tick_seconds: self.tick_seconds.clamp(0.01, 60.0),
            park_influence_radius: self.park_influence_radius.clamp(0, 64),
            require_outside_connection: self.require_outside_connection,
            tax_residential: money(self.tax_residential),
            tax_commercial: money(self.tax_commercial),
            tax_industrial: money(self.tax_industrial),
            maintenance_road: money(self.maintenance_road),
            maintenance_park: money(self.maintenance_park),
            tax_happiness_per_capita: self.tax_happiness_per_capita.clamp(0.0, 1.0),
            residential_desirability_weight: weight(self.residential_desirability_weight),
            commercial_desirability_weight: weight(self.commercial_desirability_weight),
            industrial_desirability_weight: weight(self.industrial_desirability_weight),
            district_policies_enabled: self.district_policies_enabled,
            district_policies: policies,
        }
    }
}
