//! Geological area profiles.
//!
//! Each leaseable area type carries the full economic fingerprint of its
//! setting: discovery odds, cost multipliers per spend category, reserve
//! potential, productivity, decline, crude quality mix, and exit cost.

use serde::{Deserialize, Serialize};

/// Spend categories that geographic multipliers apply to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CostCategory {
    Lease,
    Seismic,
    ExplorationWell,
    DevelopmentWell,
    Facility,
    DailyOpex,
}

/// Crude oil quality grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OilQuality {
    Light,
    Medium,
    Heavy,
}

impl OilQuality {
    pub fn name(&self) -> &'static str {
        match self {
            OilQuality::Light => "light",
            OilQuality::Medium => "medium",
            OilQuality::Heavy => "heavy",
        }
    }
}

/// Leaseable geological setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AreaType {
    /// Well-understood onshore basin with existing infrastructure.
    ProvenBasin,
    /// Shallow-water continental shelf.
    ShallowShelf,
    /// Underexplored onshore frontier acreage.
    OnshoreFrontier,
    /// Deepwater slope play — expensive, high-impact.
    Deepwater,
}

impl AreaType {
    /// All area types in catalog order.
    pub const ALL: [AreaType; 4] = [
        AreaType::ProvenBasin,
        AreaType::ShallowShelf,
        AreaType::OnshoreFrontier,
        AreaType::Deepwater,
    ];

    pub fn profile(&self) -> &'static GeoProfile {
        match self {
            AreaType::ProvenBasin => &PROVEN_BASIN,
            AreaType::ShallowShelf => &SHALLOW_SHELF,
            AreaType::OnshoreFrontier => &ONSHORE_FRONTIER,
            AreaType::Deepwater => &DEEPWATER,
        }
    }
}

/// Relative weight of each crude grade in an area. Weights sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QualityWeights {
    pub light: f64,
    pub medium: f64,
    pub heavy: f64,
}

/// Static economic profile of a geological area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoProfile {
    pub name: &'static str,
    /// Base probability of discovery before seismic quality adjustments.
    pub base_discovery_probability: f64,
    pub lease_multiplier: f64,
    pub seismic_multiplier: f64,
    pub exploration_well_multiplier: f64,
    pub development_well_multiplier: f64,
    pub facility_multiplier: f64,
    pub opex_multiplier: f64,
    /// Recoverable reserve range, barrels.
    pub reserve_min_bbl: f64,
    pub reserve_max_bbl: f64,
    /// Scales per-well daily output.
    pub productivity_multiplier: f64,
    /// Annual production decline rate.
    pub decline_rate: f64,
    pub quality_weights: QualityWeights,
    /// Days from sanction to first oil.
    pub time_to_first_oil_days: u32,
    /// $/bbl premium (positive) or discount (negative) against benchmark.
    pub price_adjustment: f64,
    /// End-of-life plugging and decommissioning cost.
    pub abandonment_cost: f64,
}

impl GeoProfile {
    /// Multiplier for a spend category.
    pub fn multiplier(&self, category: CostCategory) -> f64 {
        match category {
            CostCategory::Lease => self.lease_multiplier,
            CostCategory::Seismic => self.seismic_multiplier,
            CostCategory::ExplorationWell => self.exploration_well_multiplier,
            CostCategory::DevelopmentWell => self.development_well_multiplier,
            CostCategory::Facility => self.facility_multiplier,
            CostCategory::DailyOpex => self.opex_multiplier,
        }
    }

    /// Midpoint of the reserve range, used for speculative economics.
    pub fn reserve_midpoint(&self) -> f64 {
        (self.reserve_min_bbl + self.reserve_max_bbl) / 2.0
    }
}

pub static PROVEN_BASIN: GeoProfile = GeoProfile {
    name: "Proven Basin",
    base_discovery_probability: 0.45,
    lease_multiplier: 1.0,
    seismic_multiplier: 1.0,
    exploration_well_multiplier: 1.0,
    development_well_multiplier: 1.0,
    facility_multiplier: 1.0,
    opex_multiplier: 1.0,
    reserve_min_bbl: 30_000_000.0,
    reserve_max_bbl: 120_000_000.0,
    productivity_multiplier: 1.0,
    decline_rate: 0.12,
    quality_weights: QualityWeights {
        light: 0.3,
        medium: 0.5,
        heavy: 0.2,
    },
    time_to_first_oil_days: 540,
    price_adjustment: 0.0,
    abandonment_cost: 20_000_000.0,
};

pub static SHALLOW_SHELF: GeoProfile = GeoProfile {
    name: "Shallow Shelf",
    base_discovery_probability: 0.30,
    lease_multiplier: 1.3,
    seismic_multiplier: 1.2,
    exploration_well_multiplier: 1.4,
    development_well_multiplier: 1.3,
    facility_multiplier: 1.5,
    opex_multiplier: 1.4,
    reserve_min_bbl: 60_000_000.0,
    reserve_max_bbl: 250_000_000.0,
    productivity_multiplier: 1.3,
    decline_rate: 0.10,
    quality_weights: QualityWeights {
        light: 0.4,
        medium: 0.4,
        heavy: 0.2,
    },
    time_to_first_oil_days: 720,
    price_adjustment: 1.5,
    abandonment_cost: 45_000_000.0,
};

pub static ONSHORE_FRONTIER: GeoProfile = GeoProfile {
    name: "Onshore Frontier",
    base_discovery_probability: 0.18,
    lease_multiplier: 0.6,
    seismic_multiplier: 0.9,
    exploration_well_multiplier: 0.8,
    development_well_multiplier: 0.8,
    facility_multiplier: 0.9,
    opex_multiplier: 0.9,
    reserve_min_bbl: 20_000_000.0,
    reserve_max_bbl: 300_000_000.0,
    productivity_multiplier: 0.8,
    decline_rate: 0.15,
    quality_weights: QualityWeights {
        light: 0.2,
        medium: 0.5,
        heavy: 0.3,
    },
    time_to_first_oil_days: 600,
    price_adjustment: -2.0,
    abandonment_cost: 15_000_000.0,
};

pub static DEEPWATER: GeoProfile = GeoProfile {
    name: "Deepwater",
    base_discovery_probability: 0.22,
    lease_multiplier: 2.5,
    seismic_multiplier: 1.8,
    exploration_well_multiplier: 2.8,
    development_well_multiplier: 2.4,
    facility_multiplier: 2.8,
    opex_multiplier: 2.2,
    reserve_min_bbl: 150_000_000.0,
    reserve_max_bbl: 800_000_000.0,
    productivity_multiplier: 2.2,
    decline_rate: 0.08,
    quality_weights: QualityWeights {
        light: 0.5,
        medium: 0.4,
        heavy: 0.1,
    },
    time_to_first_oil_days: 1280,
    price_adjustment: 2.5,
    abandonment_cost: 120_000_000.0,
};
