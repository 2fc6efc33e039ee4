//! Dry-hole recovery sub-machine.
//!
//! Entered when the exploration well draw resolves dry. Four mutually
//! exclusive, affordability-gated ways out: retry the same lease, bring in
//! a farm-out partner, relocate to fresh acreage, or abandon. Success on a
//! drilling path re-enters the timeline at the appraisal period; relocation
//! returns to the drilling gate instead for a fresh decision.

use rand::Rng;

use wildcat_logic::costs;
use wildcat_logic::finance;
use wildcat_logic::geology::{AreaType, CostCategory};
use wildcat_logic::interp;
use wildcat_logic::seismic::SeismicPackage;
use wildcat_logic::timeline::{GateId, APPRAISAL_PERIOD, DRILLING_PERIOD};

use crate::engine::{EndReason, GateOutcome, ProjectEngine, RunState};
use crate::error::ActionError;
use crate::journal::Severity;
use crate::state::WellCategory;

impl ProjectEngine {
    fn ensure_dry_hole(&mut self, action: &'static str) -> Result<(), ActionError> {
        if self.run_state != RunState::DryHole {
            return Err(self.refuse(action, ActionError::WrongState(action)));
        }
        Ok(())
    }

    /// Drill again on the same lease. The chance of success scales down
    /// from the last known probability on every retry.
    pub fn retry_drill(&mut self) -> Result<GateOutcome, ActionError> {
        const ACTION: &str = "retry drilling";
        self.ensure_dry_hole(ACTION)?;
        let cost = self.exploration_well_cost();
        self.spend_or_refuse(ACTION, cost)?;

        let scaled = self
            .state
            .probability_of_success
            .map_or(0.0, |p| p * costs::RETRY_PROBABILITY_FACTOR);
        // A retry explicitly recomputes the probability downward.
        self.state.probability_of_success = Some(scaled);
        log::info!("retry drill at {:.0}% chance", scaled * 100.0);

        let struck_oil = self.rng.gen_bool(scaled.clamp(0.0, costs::PROBABILITY_CAP));
        self.state.wells.record(WellCategory::Exploration, struck_oil);
        self.record_decision(
            "Recovery: retry well".to_string(),
            cost,
            if struck_oil { "discovery" } else { "dry again" },
            "Repeat dry hole".to_string(),
            "Retry on the same lease",
        );
        if struck_oil {
            self.register_discovery();
            self.reenter_at_appraisal();
            Ok(GateOutcome::Discovery)
        } else {
            self.notify(Severity::Warning, "Dry again. The prospect keeps its secret.");
            Ok(GateOutcome::DryHole)
        }
    }

    /// Bring in a farm-out partner: a cash injection of half the current
    /// budget, a halved well cost, and a probability boost — in exchange
    /// for most of the upside. One deal per lease.
    pub fn farm_out(&mut self) -> Result<GateOutcome, ActionError> {
        const ACTION: &str = "farm out";
        self.ensure_dry_hole(ACTION)?;
        if self.state.farmed_out {
            return Err(self.refuse(ACTION, ActionError::FarmOutExhausted));
        }

        let contribution = self.state.budget * 0.5;
        // Validate the whole deal before mutating anything: the partner's
        // cash plus the current budget must cover the carried well share.
        let boosted = self
            .state
            .probability_of_success
            .map_or(costs::FARM_OUT_PROBABILITY_BONUS, |p| {
                (p + costs::FARM_OUT_PROBABILITY_BONUS).min(costs::PROBABILITY_CAP)
            });
        let cost = self.exploration_well_cost() * costs::FARM_OUT_WELL_COST_FACTOR;
        if cost > self.state.budget + contribution {
            let budget = self.state.budget;
            return Err(self.refuse(ACTION, ActionError::Unaffordable { cost, budget }));
        }

        self.state.budget += contribution;
        self.state.farmed_out = true;
        self.state.probability_of_success = Some(boosted);
        self.notify(
            Severity::Info,
            format!(
                "Farm-out signed: partner contributes ${:.1}M for 40% of the field.",
                contribution / 1_000_000.0
            ),
        );
        self.state
            .try_spend(cost)
            .expect("affordability was validated against the combined funds");

        log::info!("farm-out drill at {:.0}% chance", boosted * 100.0);
        let struck_oil = self.rng.gen_bool(boosted);
        self.state.wells.record(WellCategory::Exploration, struck_oil);
        self.record_decision(
            "Recovery: farm-out well".to_string(),
            cost,
            if struck_oil { "discovery — 60% retained" } else { "dry again" },
            "Diluted equity, shared risk".to_string(),
            "Partner carry on the retry well",
        );
        if struck_oil {
            // register_discovery applies the reserve retention haircut.
            self.register_discovery();
            self.reenter_at_appraisal();
            Ok(GateOutcome::Discovery)
        } else {
            self.notify(Severity::Warning, "Dry again, on the partner's dollar too.");
            Ok(GateOutcome::DryHole)
        }
    }

    /// Walk away from the lease and start over on new acreage with a
    /// fast-track survey. Discovery-dependent fields reset; the probability
    /// is recomputed fresh for the new setting. Control returns to the
    /// drilling gate, not the appraisal period.
    pub fn relocate(&mut self, new_area: AreaType) -> Result<f64, ActionError> {
        const ACTION: &str = "relocate";
        self.ensure_dry_hole(ACTION)?;
        let geo = new_area.profile();
        let package = SeismicPackage::FastTrack2d;
        let lease_cost = finance::cost_with_geo_multiplier(
            costs::lease_bundle(),
            CostCategory::Lease,
            Some(geo),
        ) * costs::RELOCATION_LEASE_FACTOR;
        let survey_cost = finance::cost_with_geo_multiplier(
            package.spec().acquisition_cost + package.spec().processing_cost,
            CostCategory::Seismic,
            Some(geo),
        );
        let cost = lease_cost + survey_cost;
        self.spend_or_refuse(ACTION, cost)?;

        self.state.area = Some(new_area);
        self.state.lease_secured = true;
        self.state.package = Some(package);
        self.state.contractor = None;
        self.state.drill_site = None;
        self.state.oil_discovered = false;
        self.state.reserve_estimate_bbl = None;
        self.state.oil_quality = None;
        self.state.farmed_out = false;
        self.state.seismic_complete = true;
        self.state.interpretation =
            Some(interp::generate_interpretation(package, geo, &mut self.rng));
        // Fresh acreage, fresh odds: no contractor on a fast-track shoot.
        self.state.probability_of_success = Some(finance::compute_discovery_probability(
            package.spec().quality_score,
            0.0,
            geo.base_discovery_probability,
            &self.state.team,
            &mut self.rng,
        ));

        self.state.period_index = DRILLING_PERIOD;
        self.run_state = RunState::Playing;
        self.record_decision(
            "Recovery: relocate".to_string(),
            cost,
            "lease and fast-track survey on new acreage",
            "Sunk cost on abandoned lease".to_string(),
            geo.name,
        );
        self.notify(
            Severity::Info,
            format!("Relocated to {}. Back to the drilling decision.", geo.name),
        );
        self.open_gate_now(GateId::ExplorationWell);
        Ok(cost)
    }

    /// Walk away from the project entirely.
    pub fn abandon(&mut self) -> Result<(), ActionError> {
        const ACTION: &str = "abandon";
        self.ensure_dry_hole(ACTION)?;
        self.record_decision(
            "Recovery: abandon project".to_string(),
            0.0,
            "project terminated after dry hole",
            String::new(),
            "Remaining budget does not justify further attempts",
        );
        self.notify(Severity::Warning, "Project abandoned.");
        log::info!("project abandoned after dry hole");
        self.run_state = RunState::Ended(EndReason::Abandoned);
        self.open_gate = None;
        self.pending_advance = None;
        Ok(())
    }

    fn reenter_at_appraisal(&mut self) {
        self.state.period_index = APPRAISAL_PERIOD;
        self.run_state = RunState::Playing;
        let period = self.state.period();
        self.notify(
            Severity::Success,
            format!("{} — {}", period.phase.name(), period.name),
        );
        if let Some(gate) = period.gate {
            if gate.spec().auto_open_on_entry {
                self.open_gate_now(gate);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wildcat_logic::roles::Role;
    use wildcat_logic::seismic::SeismicContractor;
    use wildcat_logic::drill_sites::DrillSite;

    /// Drive a seeded engine to the dry-hole state. Seed 3 is known to
    /// come up dry on the first exploration well.
    fn dry_hole_engine() -> ProjectEngine {
        for seed in 0..200 {
            let mut engine = ProjectEngine::new(Some(seed));
            engine
                .start_run(vec![Role::Geologist, Role::Geophysicist, Role::DrillingEngineer])
                .unwrap();
            engine.select_area(AreaType::ProvenBasin).unwrap();
            engine.secure_lease().unwrap();
            engine.request_advance().unwrap();
            engine.select_package(SeismicPackage::Standard3d).unwrap();
            engine
                .select_contractor(SeismicContractor::PetroServ)
                .unwrap();
            for role in [Role::Geologist, Role::Geophysicist, Role::DrillingEngineer] {
                engine
                    .toggle_approval(GateId::SeismicProgram, role, true)
                    .unwrap();
            }
            engine.approve_gate("shoot it", false).unwrap();
            engine.update(costs::ADVANCE_DELAY_SECS + 0.1);
            engine.obtain_permit().unwrap();
            engine.select_drill_site(DrillSite::StepOut).unwrap();
            for role in [Role::Geologist, Role::Geophysicist, Role::DrillingEngineer] {
                engine
                    .toggle_approval(GateId::ExplorationWell, role, true)
                    .unwrap();
            }
            let outcome = engine.approve_gate("the closure maps clean", false).unwrap();
            if outcome == GateOutcome::DryHole {
                return engine;
            }
        }
        panic!("no seed in range produced a dry hole");
    }

    #[test]
    fn test_dry_hole_enters_recovery_state() {
        let engine = dry_hole_engine();
        assert_eq!(engine.run_state(), RunState::DryHole);
        assert!(engine.open_gate().is_none());
        assert!(!engine.advance_pending());
        assert_eq!(engine.state().wells.exploration.dry, 1);
        assert_eq!(
            engine.state().wells.exploration.attempted,
            engine.state().wells.exploration.successful + engine.state().wells.exploration.dry
        );
    }

    #[test]
    fn test_playing_actions_refused_in_dry_hole() {
        let mut engine = dry_hole_engine();
        assert!(engine.request_advance().is_err());
        assert!(engine.obtain_permit().is_err());
    }

    #[test]
    fn test_recovery_actions_refused_while_playing() {
        let mut engine = ProjectEngine::new(Some(1));
        engine.start_run(vec![Role::Geologist]).unwrap();
        assert!(matches!(
            engine.retry_drill(),
            Err(ActionError::WrongState(_))
        ));
        assert!(matches!(engine.abandon(), Err(ActionError::WrongState(_))));
    }

    #[test]
    fn test_retry_scales_probability_down() {
        let mut engine = dry_hole_engine();
        let before = engine.state().probability_of_success.unwrap();
        let _ = engine.retry_drill().unwrap();
        let after = engine.state().probability_of_success.unwrap();
        assert!((after - before * costs::RETRY_PROBABILITY_FACTOR).abs() < 1e-12);
    }

    #[test]
    fn test_retry_outcomes_route_correctly() {
        let mut engine = dry_hole_engine();
        match engine.retry_drill().unwrap() {
            GateOutcome::Discovery => {
                assert_eq!(engine.run_state(), RunState::Playing);
                assert_eq!(engine.state().period_index, APPRAISAL_PERIOD);
                assert!(engine.state().oil_discovered);
                // The appraisal gate reopens on entry.
                assert_eq!(engine.open_gate(), Some(GateId::AppraisalProgram));
            }
            GateOutcome::DryHole => {
                assert_eq!(engine.run_state(), RunState::DryHole);
                assert_eq!(engine.state().wells.exploration.dry, 2);
            }
            GateOutcome::Advancing => panic!("retry never reports a plain advance"),
        }
    }

    #[test]
    fn test_farm_out_terms() {
        let mut engine = dry_hole_engine();
        let budget_before = engine.state().budget;
        let p_before = engine.state().probability_of_success.unwrap();
        let full_cost = engine.exploration_well_cost();
        let outcome = engine.farm_out().unwrap();
        let state = engine.state();
        assert!(state.farmed_out);
        // Injection of 50% of budget, then half the well cost deducted.
        let expected_budget = budget_before * 1.5 - full_cost * 0.5;
        assert!((state.budget - expected_budget).abs() < 1.0);
        if outcome == GateOutcome::Discovery {
            // Retention haircut: the estimate sits inside 60% of the range.
            let geo = AreaType::ProvenBasin.profile();
            let reserves = state.reserve_estimate_bbl.unwrap();
            assert!(reserves <= geo.reserve_max_bbl * costs::FARM_OUT_RESERVE_RETENTION);
        } else {
            // Probability keeps the +8pp boost for a follow-up retry.
            let p_now = state.probability_of_success.unwrap();
            assert!((p_now - (p_before + costs::FARM_OUT_PROBABILITY_BONUS)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_farm_out_only_once() {
        let mut engine = dry_hole_engine();
        if engine.farm_out().unwrap() == GateOutcome::DryHole {
            assert_eq!(engine.farm_out(), Err(ActionError::FarmOutExhausted));
        }
    }

    #[test]
    fn test_relocate_to_deepwater() {
        let mut engine = dry_hole_engine();
        let budget_before = engine.state().budget;
        let cost = engine.relocate(AreaType::Deepwater).unwrap();

        let geo = AreaType::Deepwater.profile();
        let expected = costs::lease_bundle() * geo.lease_multiplier * costs::RELOCATION_LEASE_FACTOR
            + (1_800_000.0 + 700_000.0) * geo.seismic_multiplier;
        assert!((cost - expected).abs() < 1e-6);
        assert!((engine.state().budget - (budget_before - expected)).abs() < 1e-6);

        let state = engine.state();
        assert_eq!(state.area, Some(AreaType::Deepwater));
        assert!(!state.oil_discovered);
        assert!(state.reserve_estimate_bbl.is_none());
        assert!(state.drill_site.is_none());
        // Back at the drilling gate, not the appraisal period.
        assert_eq!(state.period_index, DRILLING_PERIOD);
        assert_eq!(engine.run_state(), RunState::Playing);
        assert_eq!(engine.open_gate(), Some(GateId::ExplorationWell));
        // Fresh probability for the new setting, within bounds.
        let p = state.probability_of_success.unwrap();
        assert!((0.0..=costs::PROBABILITY_CAP).contains(&p));
    }

    #[test]
    fn test_relocation_preserves_approval_records() {
        let mut engine = dry_hole_engine();
        let approvals_before = engine.state().approvals.clone();
        assert!(!approvals_before.is_empty());
        engine.relocate(AreaType::OnshoreFrontier).unwrap();
        assert_eq!(engine.state().approvals, approvals_before);
    }

    #[test]
    fn test_abandon_is_terminal() {
        let mut engine = dry_hole_engine();
        engine.abandon().unwrap();
        assert_eq!(engine.run_state(), RunState::Ended(EndReason::Abandoned));
        assert!(engine.retry_drill().is_err());
    }

    #[test]
    fn test_unaffordable_recovery_leaves_state() {
        let mut engine = dry_hole_engine();
        engine.state.budget = 1_000.0;
        let err = engine.retry_drill().unwrap_err();
        assert!(matches!(err, ActionError::Unaffordable { .. }));
        assert_eq!(engine.state().budget, 1_000.0);
        assert_eq!(engine.state().wells.exploration.attempted, 1);
        assert_eq!(engine.run_state(), RunState::DryHole);
    }
}
