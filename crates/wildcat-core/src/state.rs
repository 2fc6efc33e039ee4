//! The project state aggregate.
//!
//! Everything decided or discovered so far lives in one place, mutated
//! exclusively by the progression engine's action handlers. The fields the
//! original UI tracked as independent reactive values are consolidated here
//! so probability, interpretation, and facts can never drift apart.

use std::collections::BTreeMap;

use serde::Serialize;

use wildcat_logic::costs;
use wildcat_logic::drill_sites::DrillSite;
use wildcat_logic::gates::FactKey;
use wildcat_logic::geology::{AreaType, GeoProfile, OilQuality};
use wildcat_logic::interp::SeismicInterpretation;
use wildcat_logic::roles::Role;
use wildcat_logic::seismic::{SeismicContractor, SeismicPackage};
use wildcat_logic::timeline::{self, GateId, Period};

use crate::error::ActionError;
use crate::journal::{DecisionLog, NotificationFeed};

/// Well classification for the drilling ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WellCategory {
    Exploration,
    Appraisal,
    Production,
}

/// Counters for one well category. `attempted == successful + dry` always:
/// [`WellLedger::record`] is the only mutator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WellCounters {
    pub attempted: u32,
    pub successful: u32,
    pub dry: u32,
}

/// Per-category well outcome ledger. Outcomes are immutable once recorded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WellLedger {
    pub exploration: WellCounters,
    pub appraisal: WellCounters,
    pub production: WellCounters,
}

impl WellLedger {
    /// Record one resolved well outcome.
    pub fn record(&mut self, category: WellCategory, success: bool) {
        let counters = match category {
            WellCategory::Exploration => &mut self.exploration,
            WellCategory::Appraisal => &mut self.appraisal,
            WellCategory::Production => &mut self.production,
        };
        counters.attempted += 1;
        if success {
            counters.successful += 1;
        } else {
            counters.dry += 1;
        }
    }

    pub fn counters(&self, category: WellCategory) -> WellCounters {
        match category {
            WellCategory::Exploration => self.exploration,
            WellCategory::Appraisal => self.appraisal,
            WellCategory::Production => self.production,
        }
    }
}

/// The approved development scenario.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DevelopmentPlan {
    pub well_count: u32,
    pub estimated_cost: f64,
    pub estimated_daily_bbl: f64,
    pub npv: f64,
}

/// Running production totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ProductionStats {
    /// Plateau daily rate at startup, bbl/day, before decline.
    pub daily_rate_bbl: f64,
    pub cumulative_bbl: f64,
    pub days_elapsed: u32,
}

/// The single mutable aggregate for one project run.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectState {
    pub period_index: usize,
    /// Project day stamp, advanced by period durations and production ticks.
    pub day: u32,

    // Selections
    pub area: Option<AreaType>,
    pub package: Option<SeismicPackage>,
    pub contractor: Option<SeismicContractor>,
    pub drill_site: Option<DrillSite>,

    // Facts
    pub lease_secured: bool,
    pub seismic_complete: bool,
    pub permit_obtained: bool,
    pub oil_discovered: bool,
    pub appraisal_complete: bool,
    pub financing_secured: bool,
    pub facility_complete: bool,
    pub safety_review_complete: bool,

    // Discovered data
    pub interpretation: Option<SeismicInterpretation>,
    pub reserve_estimate_bbl: Option<f64>,
    pub oil_quality: Option<OilQuality>,
    pub probability_of_success: Option<f64>,
    pub development_plan: Option<DevelopmentPlan>,

    // Money
    pub budget: f64,
    pub total_spent: f64,
    pub total_revenue: f64,

    // Operations
    pub wells: WellLedger,
    pub production: ProductionStats,

    // Recovery branch
    pub farmed_out: bool,

    // People & record
    pub team: Vec<Role>,
    /// Per-gate approval toggles; scoped by gate id and never reset, even
    /// when a gate is revisited through the recovery branch.
    pub approvals: BTreeMap<GateId, BTreeMap<Role, bool>>,
    pub decisions: DecisionLog,
    pub notifications: NotificationFeed,
}

impl ProjectState {
    /// Fresh state for a run with the given team.
    pub fn new(team: Vec<Role>) -> Self {
        Self {
            period_index: 0,
            day: 0,
            area: None,
            package: None,
            contractor: None,
            drill_site: None,
            lease_secured: false,
            seismic_complete: false,
            permit_obtained: false,
            oil_discovered: false,
            appraisal_complete: false,
            financing_secured: false,
            facility_complete: false,
            safety_review_complete: false,
            interpretation: None,
            reserve_estimate_bbl: None,
            oil_quality: None,
            probability_of_success: None,
            development_plan: None,
            budget: costs::INITIAL_BUDGET,
            total_spent: 0.0,
            total_revenue: 0.0,
            wells: WellLedger::default(),
            production: ProductionStats::default(),
            farmed_out: false,
            team,
            approvals: BTreeMap::new(),
            decisions: DecisionLog::new(),
            notifications: NotificationFeed::new(),
        }
    }

    /// The current timeline period.
    pub fn period(&self) -> &'static Period {
        timeline::period(self.period_index).expect("period index stays within the timeline")
    }

    /// The active area's profile, if an area is selected.
    pub fn geo(&self) -> Option<&'static GeoProfile> {
        self.area.map(|a| a.profile())
    }

    /// Whether a boolean project fact currently holds.
    pub fn fact(&self, key: FactKey) -> bool {
        match key {
            FactKey::AreaSelected => self.area.is_some(),
            FactKey::LeaseSecured => self.lease_secured,
            FactKey::SeismicComplete => self.seismic_complete,
            FactKey::PermitObtained => self.permit_obtained,
            FactKey::OilDiscovered => self.oil_discovered,
            FactKey::AppraisalComplete => self.appraisal_complete,
            FactKey::DevelopmentPlanApproved => self.development_plan.is_some(),
            FactKey::FinancingSecured => self.financing_secured,
            FactKey::FacilityComplete => self.facility_complete,
            FactKey::SafetyReviewComplete => self.safety_review_complete,
        }
    }

    /// Deduct a cost, validating affordability strictly before mutating.
    /// Rejected actions leave budget and spend untouched.
    pub fn try_spend(&mut self, cost: f64) -> Result<(), ActionError> {
        if cost > self.budget {
            return Err(ActionError::Unaffordable {
                cost,
                budget: self.budget,
            });
        }
        self.budget -= cost;
        self.total_spent += cost;
        Ok(())
    }

    /// Signature count a role has toggled on for a gate.
    pub fn approval_count(&self, gate: GateId) -> usize {
        self.approvals
            .get(&gate)
            .map(|by_role| by_role.values().filter(|approved| **approved).count())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wildcat_logic::timeline::GateId;

    #[test]
    fn test_well_ledger_invariant() {
        let mut ledger = WellLedger::default();
        let outcomes = [true, false, false, true, true];
        for (i, success) in outcomes.iter().enumerate() {
            let cat = match i % 3 {
                0 => WellCategory::Exploration,
                1 => WellCategory::Appraisal,
                _ => WellCategory::Production,
            };
            ledger.record(cat, *success);
            for c in [
                ledger.exploration,
                ledger.appraisal,
                ledger.production,
            ] {
                assert_eq!(c.attempted, c.successful + c.dry);
            }
        }
        assert_eq!(
            ledger.exploration.attempted
                + ledger.appraisal.attempted
                + ledger.production.attempted,
            outcomes.len() as u32
        );
    }

    #[test]
    fn test_try_spend_rejects_not_clamps() {
        let mut state = ProjectState::new(vec![Role::Geologist]);
        state.budget = 100.0;
        let err = state.try_spend(250.0).unwrap_err();
        assert_eq!(
            err,
            ActionError::Unaffordable {
                cost: 250.0,
                budget: 100.0
            }
        );
        assert_eq!(state.budget, 100.0);
        assert_eq!(state.total_spent, 0.0);
    }

    #[test]
    fn test_try_spend_tracks_both_sides() {
        let mut state = ProjectState::new(vec![Role::Geologist]);
        state.try_spend(1_000_000.0).unwrap();
        assert_eq!(state.budget, costs::INITIAL_BUDGET - 1_000_000.0);
        assert_eq!(state.total_spent, 1_000_000.0);
    }

    #[test]
    fn test_facts_reflect_fields() {
        let mut state = ProjectState::new(vec![Role::Geologist]);
        assert!(!state.fact(FactKey::AreaSelected));
        state.area = Some(AreaType::ProvenBasin);
        assert!(state.fact(FactKey::AreaSelected));
        assert!(!state.fact(FactKey::DevelopmentPlanApproved));
        state.development_plan = Some(DevelopmentPlan {
            well_count: 8,
            estimated_cost: 1.0,
            estimated_daily_bbl: 1.0,
            npv: 1.0,
        });
        assert!(state.fact(FactKey::DevelopmentPlanApproved));
    }

    #[test]
    fn test_approval_count() {
        let mut state = ProjectState::new(vec![Role::Geologist, Role::FinanceAnalyst]);
        assert_eq!(state.approval_count(GateId::SeismicProgram), 0);
        state
            .approvals
            .entry(GateId::SeismicProgram)
            .or_default()
            .insert(Role::Geologist, true);
        state
            .approvals
            .entry(GateId::SeismicProgram)
            .or_default()
            .insert(Role::FinanceAnalyst, false);
        assert_eq!(state.approval_count(GateId::SeismicProgram), 1);
    }
}
