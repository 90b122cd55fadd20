//! Per-district economic multipliers.
//!
//! Each of the `DISTRICT_COUNT` districts scales the city-wide tax and
//! maintenance rates by its own multipliers. The multipliers only apply when
//! `SimConfig::district_policies_enabled` is set.

use serde::{Deserialize, Serialize};

use crate::config::DISTRICT_COUNT;

pub const MIN_POLICY_MULTIPLIER: f32 = 0.0;
pub const MAX_POLICY_MULTIPLIER: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistrictPolicy {
    pub tax_residential_mult: f32,
    pub tax_commercial_mult: f32,
    pub tax_industrial_mult: f32,
    pub road_maintenance_mult: f32,
    pub park_maintenance_mult: f32,
}

impl Default for DistrictPolicy {
    fn default() -> Self {
        Self {
            tax_residential_mult: 1.0,
            tax_commercial_mult: 1.0,
            tax_industrial_mult: 1.0,
            road_maintenance_mult: 1.0,
            park_maintenance_mult: 1.0,
        }
    }
}

impl DistrictPolicy {
    /// Copy with every multiplier clamped into
    /// [`MIN_POLICY_MULTIPLIER`, `MAX_POLICY_MULTIPLIER`].
    pub fn clamped(self) -> Self {
        let c = |v: f32| v.clamp(MIN_POLICY_MULTIPLIER, MAX_POLICY_MULTIPLIER);
        Self {
            tax_residential_mult: c(self.tax_residential_mult),
            tax_commercial_mult: c(self.tax_commercial_mult),
            tax_industrial_mult: c(self.tax_industrial_mult),
            road_maintenance_mult: c(self.road_maintenance_mult),
            park_maintenance_mult: c(self.park_maintenance_mult),
        }
    }
}

pub fn default_district_policies() -> [DistrictPolicy; DISTRICT_COUNT] {
    [DistrictPolicy::default(); DISTRICT_COUNT]
}
