//! The fixed project timeline — nine periods, five stage gates.
//!
//! The sequence is compiled in and never changes at runtime. Each period
//! carries a lifecycle phase tag, an optional stage gate, and an optional
//! nominal duration used for display and for the decision-log day stamps.

use serde::{Deserialize, Serialize};

/// Project lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Exploration,
    Appraisal,
    Development,
    Construction,
    Startup,
    Production,
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Exploration => "Exploration",
            Phase::Appraisal => "Appraisal",
            Phase::Development => "Development",
            Phase::Construction => "Construction",
            Phase::Startup => "Startup",
            Phase::Production => "Production",
        }
    }
}

/// Identifier for each stage-gate decision point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GateId {
    /// Commit to the seismic acquisition program.
    SeismicProgram,
    /// Commit to drilling the exploration well.
    ExplorationWell,
    /// Confirm the appraisal results and move to planning.
    AppraisalProgram,
    /// Final investment decision on the development plan.
    FinalInvestment,
    /// Confirm readiness to start production.
    StartupReadiness,
}

impl GateId {
    /// All gates in timeline order.
    pub const ALL: [GateId; 5] = [
        GateId::SeismicProgram,
        GateId::ExplorationWell,
        GateId::AppraisalProgram,
        GateId::FinalInvestment,
        GateId::StartupReadiness,
    ];
}

/// One slot in the project timeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Period {
    /// Ordinal position, 0-based.
    pub index: usize,
    pub phase: Phase,
    pub name: &'static str,
    /// The stage gate bound to this period, if any.
    pub gate: Option<GateId>,
    /// Nominal duration in days. The final production period is open-ended.
    pub duration_days: Option<u32>,
}

/// The complete timeline. Periods are totally ordered by `index`.
pub const PERIODS: [Period; 9] = [
    Period {
        index: 0,
        phase: Phase::Exploration,
        name: "Basin screening & leasing",
        gate: None,
        duration_days: Some(90),
    },
    Period {
        index: 1,
        phase: Phase::Exploration,
        name: "Seismic campaign",
        gate: Some(GateId::SeismicProgram),
        duration_days: Some(120),
    },
    Period {
        index: 2,
        phase: Phase::Exploration,
        name: "Exploration drilling",
        gate: Some(GateId::ExplorationWell),
        duration_days: Some(150),
    },
    Period {
        index: 3,
        phase: Phase::Appraisal,
        name: "Appraisal program",
        gate: Some(GateId::AppraisalProgram),
        duration_days: Some(180),
    },
    Period {
        index: 4,
        phase: Phase::Development,
        name: "Development planning",
        gate: None,
        duration_days: Some(240),
    },
    Period {
        index: 5,
        phase: Phase::Development,
        name: "Project sanction",
        gate: Some(GateId::FinalInvestment),
        duration_days: Some(60),
    },
    Period {
        index: 6,
        phase: Phase::Construction,
        name: "Facilities construction",
        gate: None,
        duration_days: Some(540),
    },
    Period {
        index: 7,
        phase: Phase::Startup,
        name: "Commissioning & startup",
        gate: Some(GateId::StartupReadiness),
        duration_days: Some(90),
    },
    Period {
        index: 8,
        phase: Phase::Production,
        name: "First oil & production",
        gate: None,
        duration_days: None,
    },
];

/// Index of the appraisal period, the re-entry point for successful
/// dry-hole recovery drilling.
pub const APPRAISAL_PERIOD: usize = 3;

/// Index of the exploration-drilling period, the re-entry point for the
/// relocation recovery branch.
pub const DRILLING_PERIOD: usize = 2;

/// Index of the final, open-ended production period.
pub const PRODUCTION_PERIOD: usize = 8;

/// Look up a period by index.
pub fn period(index: usize) -> Option<&'static Period> {
    PERIODS.get(index)
}

/// The period a gate is bound to. Every gate is bound to exactly one period.
pub fn gate_period(gate: GateId) -> &'static Period {
    PERIODS
        .iter()
        .find(|p| p.gate == Some(gate))
        .expect("every gate is bound to a period")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_periods_are_ordered() {
        for (i, p) in PERIODS.iter().enumerate() {
            assert_eq!(p.index, i);
        }
    }

    #[test]
    fn test_every_gate_bound_to_one_period() {
        for gate in GateId::ALL {
            let count = PERIODS.iter().filter(|p| p.gate == Some(gate)).count();
            assert_eq!(count, 1, "{:?} must appear exactly once", gate);
        }
    }

    #[test]
    fn test_phase_ordering_is_monotonic() {
        // Phases appear in lifecycle order along the timeline.
        let order = |ph: Phase| match ph {
            Phase::Exploration => 0,
            Phase::Appraisal => 1,
            Phase::Development => 2,
            Phase::Construction => 3,
            Phase::Startup => 4,
            Phase::Production => 5,
        };
        for pair in PERIODS.windows(2) {
            assert!(order(pair[0].phase) <= order(pair[1].phase));
        }
    }

    #[test]
    fn test_reentry_points() {
        assert_eq!(PERIODS[APPRAISAL_PERIOD].phase, Phase::Appraisal);
        assert_eq!(PERIODS[DRILLING_PERIOD].gate, Some(GateId::ExplorationWell));
        assert!(PERIODS[PRODUCTION_PERIOD].duration_days.is_none());
    }
}
