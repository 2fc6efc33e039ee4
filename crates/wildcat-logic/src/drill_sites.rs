//! Drill-site modifiers.
//!
//! Where the exploration well lands on the mapped structure shifts both the
//! chance of success and the well cost. A site must be picked before the
//! drilling gate can be approved.

use serde::{Deserialize, Serialize};

/// Candidate exploration well location on the mapped prospect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DrillSite {
    /// Crest of the structure — best odds, tighter drilling window.
    CrestalHigh,
    /// Mid-flank terrace — the neutral choice.
    FlankTerrace,
    /// Step-out toward the basin — cheaper, riskier.
    StepOut,
}

/// Static modifiers for a drill site.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SiteSpec {
    pub name: &'static str,
    /// Added to the probability of success (percentage points as fraction).
    pub probability_modifier: f64,
    /// Scales the exploration well cost.
    pub cost_factor: f64,
}

impl DrillSite {
    pub const ALL: [DrillSite; 3] = [
        DrillSite::CrestalHigh,
        DrillSite::FlankTerrace,
        DrillSite::StepOut,
    ];

    pub fn spec(&self) -> &'static SiteSpec {
        match self {
            DrillSite::CrestalHigh => &CRESTAL_HIGH,
            DrillSite::FlankTerrace => &FLANK_TERRACE,
            DrillSite::StepOut => &STEP_OUT,
        }
    }
}

static CRESTAL_HIGH: SiteSpec = SiteSpec {
    name: "Crestal high",
    probability_modifier: 0.05,
    cost_factor: 1.10,
};

static FLANK_TERRACE: SiteSpec = SiteSpec {
    name: "Flank terrace",
    probability_modifier: 0.0,
    cost_factor: 1.0,
};

static STEP_OUT: SiteSpec = SiteSpec {
    name: "Basinward step-out",
    probability_modifier: -0.04,
    cost_factor: 0.85,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flank_terrace_is_neutral() {
        let s = DrillSite::FlankTerrace.spec();
        assert_eq!(s.probability_modifier, 0.0);
        assert_eq!(s.cost_factor, 1.0);
    }

    #[test]
    fn test_modifiers_are_small() {
        for site in DrillSite::ALL {
            let s = site.spec();
            assert!(s.probability_modifier.abs() <= 0.10);
            assert!(s.cost_factor > 0.5 && s.cost_factor < 1.5);
        }
    }
}
