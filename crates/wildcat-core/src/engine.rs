//! Progression engine — the top-level state machine.
//!
//! Sole mutator of [`ProjectState`]. Every period action validates its
//! preconditions first and mutates second; a refused action surfaces an
//! error notification and leaves no partially-applied state. The deferred
//! period advance and the production cash-flow tick both live inside
//! [`ProjectEngine::update`] and stop the instant the owning state is left.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use wildcat_logic::costs;
use wildcat_logic::drill_sites::DrillSite;
use wildcat_logic::finance;
use wildcat_logic::geology::{AreaType, CostCategory, OilQuality};
use wildcat_logic::interp;
use wildcat_logic::roles::{BonusKind, InsightContext, Role};
use wildcat_logic::seismic::{self, SeismicContractor, SeismicPackage};
use wildcat_logic::timeline::{self, GateId, PERIODS, PRODUCTION_PERIOD};

use crate::error::ActionError;
use crate::evaluator;
use crate::journal::{DecisionRecord, Notification, Severity};
use crate::state::{DevelopmentPlan, ProjectState, WellCategory};

/// Top-level run state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Team composition not yet fixed.
    Setup,
    /// Advancing through the period sequence.
    Playing,
    /// The exploration well came up dry; recovery sub-machine active.
    DryHole,
    /// Terminal. The run stops advancing; state remains readable.
    Ended(EndReason),
}

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    GateRejected(GateId),
    Abandoned,
}

/// What a gate approval led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    /// Approval taken; the period advance is scheduled.
    Advancing,
    /// The exploration well found oil; advance scheduled.
    Discovery,
    /// The exploration well came up dry; recovery sub-machine entered.
    DryHole,
}

/// The progression engine. One instance per run.
///
/// Fields are crate-visible so the recovery sub-machine in
/// [`crate::recovery`] can extend the same owner; outside the crate the
/// snapshot accessors are the only window in.
pub struct ProjectEngine {
    pub(crate) state: ProjectState,
    pub(crate) run_state: RunState,
    pub(crate) open_gate: Option<GateId>,
    /// Seconds until the scheduled post-approval advance fires.
    pub(crate) pending_advance: Option<f64>,
    pub(crate) tick_accumulator: f64,
    pub(crate) rng: StdRng,
}

impl ProjectEngine {
    /// Create an engine in setup. A seed makes the run reproducible.
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            state: ProjectState::new(Vec::new()),
            run_state: RunState::Setup,
            open_gate: None,
            pending_advance: None,
            tick_accumulator: 0.0,
            rng: seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64),
        }
    }

    /// Discard the run and return to setup, cancelling any scheduled work.
    pub fn reset(&mut self, seed: Option<u64>) {
        *self = Self::new(seed);
    }

    // ── Snapshot accessors ──────────────────────────────────────────────

    /// Read-only snapshot of everything the presentation layer renders.
    pub fn state(&self) -> &ProjectState {
        &self.state
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn open_gate(&self) -> Option<GateId> {
        self.open_gate
    }

    /// Whether a post-approval advance is currently scheduled.
    pub fn advance_pending(&self) -> bool {
        self.pending_advance.is_some()
    }

    /// Advisory insights from the current team for a decision context.
    pub fn team_advice(&self, ctx: InsightContext) -> Vec<(Role, &'static str)> {
        self.state
            .team
            .iter()
            .map(|role| (*role, role.insight(ctx)))
            .collect()
    }

    // ── Setup ───────────────────────────────────────────────────────────

    /// Fix the team and begin the first period.
    pub fn start_run(&mut self, team: Vec<Role>) -> Result<(), ActionError> {
        if self.run_state != RunState::Setup {
            return Err(self.refuse("start", ActionError::WrongState("starting a run")));
        }
        if team.is_empty() {
            return Err(self.refuse("start", ActionError::EmptyTeam));
        }
        log::info!("run started with team of {}", team.len());
        self.state = ProjectState::new(team);
        self.run_state = RunState::Playing;
        self.notify(Severity::Info, "Project launched. Screen the basins and secure acreage.");
        Ok(())
    }

    // ── Period actions ──────────────────────────────────────────────────

    /// Choose the geological area to pursue. One-shot while a lease is held.
    pub fn select_area(&mut self, area: AreaType) -> Result<(), ActionError> {
        const ACTION: &str = "select area";
        self.ensure_playing(ACTION)?;
        if self.state.lease_secured {
            return Err(self.refuse(ACTION, ActionError::LeaseAlreadyHeld));
        }
        if self.state.period_index != 0 {
            return Err(self.refuse(ACTION, ActionError::WrongPeriod(ACTION)));
        }
        self.state.area = Some(area);
        self.notify(
            Severity::Info,
            format!("Target area selected: {}", area.profile().name),
        );
        Ok(())
    }

    /// Acquire the lease bundle (bonus, environmental study, application).
    /// The area lease multiplier applies to the whole bundle.
    pub fn secure_lease(&mut self) -> Result<f64, ActionError> {
        const ACTION: &str = "secure lease";
        self.ensure_playing(ACTION)?;
        let geo = match self.state.geo() {
            Some(geo) => geo,
            None => {
                return Err(self.refuse(
                    ACTION,
                    ActionError::MissingPrerequisite("a geological area must be selected"),
                ))
            }
        };
        if self.state.lease_secured {
            return Err(self.refuse(ACTION, ActionError::AlreadyDone("the lease is held")));
        }
        let cost =
            finance::cost_with_geo_multiplier(costs::lease_bundle(), CostCategory::Lease, Some(geo));
        self.spend_or_refuse(ACTION, cost)?;
        self.state.lease_secured = true;
        self.notify(
            Severity::Success,
            format!("Lease secured on {} acreage.", geo.name),
        );
        self.maybe_open_gate();
        Ok(cost)
    }

    /// Choose the seismic acquisition package.
    pub fn select_package(&mut self, package: SeismicPackage) -> Result<(), ActionError> {
        const ACTION: &str = "select seismic package";
        self.ensure_playing(ACTION)?;
        if self.state.seismic_complete {
            return Err(self.refuse(ACTION, ActionError::AlreadyDone("the survey is shot")));
        }
        self.state.package = Some(package);
        self.notify(
            Severity::Info,
            format!("Seismic package selected: {}", package.spec().name),
        );
        self.maybe_open_gate();
        Ok(())
    }

    /// Choose the seismic contractor.
    pub fn select_contractor(&mut self, contractor: SeismicContractor) -> Result<(), ActionError> {
        const ACTION: &str = "select seismic contractor";
        self.ensure_playing(ACTION)?;
        if self.state.seismic_complete {
            return Err(self.refuse(ACTION, ActionError::AlreadyDone("the survey is shot")));
        }
        self.state.contractor = Some(contractor);
        self.notify(
            Severity::Info,
            format!("Contractor selected: {}", contractor.spec().name),
        );
        self.maybe_open_gate();
        Ok(())
    }

    /// Obtain the regulatory drilling permit.
    pub fn obtain_permit(&mut self) -> Result<f64, ActionError> {
        const ACTION: &str = "obtain drilling permit";
        self.ensure_playing(ACTION)?;
        if !self.state.lease_secured {
            return Err(self.refuse(
                ACTION,
                ActionError::MissingPrerequisite("a lease must be held"),
            ));
        }
        if self.state.permit_obtained {
            return Err(self.refuse(ACTION, ActionError::AlreadyDone("the permit is granted")));
        }
        self.spend_or_refuse(ACTION, costs::DRILLING_PERMIT)?;
        self.state.permit_obtained = true;
        self.notify(Severity::Success, "Drilling permit granted.");
        self.maybe_open_gate();
        Ok(costs::DRILLING_PERMIT)
    }

    /// Commission an additional interpretation study. Refines the existing
    /// report in place and raises the probability of success — bounded,
    /// never regenerated, never above the cap.
    pub fn additional_study(&mut self) -> Result<(), ActionError> {
        const ACTION: &str = "commission additional study";
        self.ensure_playing(ACTION)?;
        if self.state.interpretation.is_none() {
            return Err(self.refuse(
                ACTION,
                ActionError::MissingPrerequisite("a seismic interpretation must exist"),
            ));
        }
        self.spend_or_refuse(ACTION, costs::ADDITIONAL_STUDY)?;
        let mut gain = 0.0;
        if let Some(interpretation) = self.state.interpretation.as_mut() {
            gain = interp::refine_interpretation(interpretation, &mut self.rng).volumetric_gain;
        }
        if let Some(p) = self.state.probability_of_success {
            self.state.probability_of_success =
                Some((p + gain * 0.25).min(costs::PROBABILITY_CAP));
        }
        self.notify(Severity::Info, "Interpretation refined by additional study.");
        Ok(())
    }

    /// Choose the exploration well location.
    pub fn select_drill_site(&mut self, site: DrillSite) -> Result<(), ActionError> {
        const ACTION: &str = "select drill site";
        self.ensure_playing(ACTION)?;
        if !self.state.seismic_complete {
            return Err(self.refuse(
                ACTION,
                ActionError::MissingPrerequisite("the seismic survey must be complete"),
            ));
        }
        self.state.drill_site = Some(site);
        self.notify(
            Severity::Info,
            format!("Drill site selected: {}", site.spec().name),
        );
        self.maybe_open_gate();
        Ok(())
    }

    /// Drill one appraisal well. Two successful penetrations complete the
    /// appraisal program and firm up the reserve estimate.
    pub fn drill_appraisal_well(&mut self) -> Result<bool, ActionError> {
        const ACTION: &str = "drill appraisal well";
        self.ensure_playing(ACTION)?;
        if self.state.period_index != timeline::APPRAISAL_PERIOD {
            return Err(self.refuse(ACTION, ActionError::WrongPeriod(ACTION)));
        }
        if !self.state.oil_discovered {
            return Err(self.refuse(
                ACTION,
                ActionError::MissingPrerequisite("a discovery must exist to appraise"),
            ));
        }
        let geo = self.state.geo().expect("discovery implies a selected area");
        let cost = finance::apply_cost_discount(
            finance::cost_with_geo_multiplier(
                costs::APPRAISAL_WELL,
                CostCategory::ExplorationWell,
                Some(geo),
            ),
            BonusKind::WellCost,
            &self.state.team,
        );
        self.spend_or_refuse(ACTION, cost)?;

        let success = self.rng.gen_bool(0.85);
        self.state.wells.record(WellCategory::Appraisal, success);
        if success {
            // Each penetration nudges the volumetric toward its real value.
            if let Some(estimate) = self.state.reserve_estimate_bbl {
                let revision: f64 = self.rng.gen_range(0.92..1.12);
                self.state.reserve_estimate_bbl = Some(estimate * revision);
            }
            if self.state.wells.appraisal.successful >= 2 {
                self.state.appraisal_complete = true;
                self.notify(Severity::Success, "Appraisal program complete.");
            } else {
                self.notify(Severity::Success, "Appraisal well flowed on test.");
            }
        } else {
            self.notify(Severity::Warning, "Appraisal well missed the reservoir.");
        }
        self.maybe_open_gate();
        Ok(success)
    }

    /// Work up a development scenario and compute its NPV.
    pub fn plan_development(&mut self, well_count: u32) -> Result<(), ActionError> {
        const ACTION: &str = "plan development";
        self.ensure_playing(ACTION)?;
        if !(4..=5).contains(&self.state.period_index) {
            return Err(self.refuse(ACTION, ActionError::WrongPeriod(ACTION)));
        }
        if !self.state.appraisal_complete {
            return Err(self.refuse(
                ACTION,
                ActionError::MissingPrerequisite("the appraisal program must be complete"),
            ));
        }
        if !(1..=40).contains(&well_count) {
            return Err(self.refuse(
                ACTION,
                ActionError::MissingPrerequisite("a well count between 1 and 40"),
            ));
        }
        let geo = self.state.geo().expect("appraisal implies a selected area");
        let reserves = self
            .state
            .reserve_estimate_bbl
            .expect("appraisal implies a reserve estimate");
        let daily = finance::estimate_daily_production(well_count, geo, &self.state.team);
        let breakdown = finance::compute_npv(
            reserves,
            well_count,
            daily,
            geo,
            &self.state.team,
            self.state.total_spent,
        );
        self.state.development_plan = Some(DevelopmentPlan {
            well_count,
            estimated_cost: breakdown.development_capital,
            estimated_daily_bbl: daily,
            npv: breakdown.npv,
        });
        self.notify(
            Severity::Info,
            format!(
                "Development plan: {} wells, NPV ${:.0}M.",
                well_count,
                breakdown.npv / 1_000_000.0
            ),
        );
        Ok(())
    }

    /// Arrange project financing against the plan.
    pub fn secure_financing(&mut self) -> Result<(), ActionError> {
        const ACTION: &str = "secure financing";
        self.ensure_playing(ACTION)?;
        if !(4..=5).contains(&self.state.period_index) {
            return Err(self.refuse(ACTION, ActionError::WrongPeriod(ACTION)));
        }
        if self.state.development_plan.is_none() {
            return Err(self.refuse(
                ACTION,
                ActionError::MissingPrerequisite("a development plan must exist"),
            ));
        }
        if self.state.financing_secured {
            return Err(self.refuse(ACTION, ActionError::AlreadyDone("financing is arranged")));
        }
        self.spend_or_refuse(ACTION, costs::FINANCING_ARRANGEMENT)?;
        self.state.financing_secured = true;
        self.notify(Severity::Success, "Project financing secured.");
        self.maybe_open_gate();
        Ok(())
    }

    /// Execute the sanctioned plan: spend the development capital, drill
    /// the production wells, and hand the facility to commissioning.
    pub fn execute_development(&mut self) -> Result<(), ActionError> {
        const ACTION: &str = "execute development";
        self.ensure_playing(ACTION)?;
        if self.state.period_index != 6 {
            return Err(self.refuse(ACTION, ActionError::WrongPeriod(ACTION)));
        }
        if self.state.facility_complete {
            return Err(self.refuse(ACTION, ActionError::AlreadyDone("the facility is built")));
        }
        let plan = match self.state.development_plan {
            Some(plan) => plan,
            None => {
                return Err(self.refuse(
                    ACTION,
                    ActionError::MissingPrerequisite("a sanctioned development plan"),
                ))
            }
        };
        let geo = self.state.geo().expect("a sanctioned plan implies an area");
        let capital = finance::development_capital(plan.well_count, geo, &self.state.team);
        self.spend_or_refuse(ACTION, capital)?;

        let mut flowing = 0;
        for _ in 0..plan.well_count {
            let success = self.rng.gen_bool(0.92);
            self.state.wells.record(WellCategory::Production, success);
            if success {
                flowing += 1;
            }
        }
        self.state.facility_complete = true;
        self.notify(
            Severity::Success,
            format!(
                "Development executed: {} of {} wells ready for production.",
                flowing, plan.well_count
            ),
        );
        self.maybe_open_gate();
        Ok(())
    }

    /// Close out the pre-startup safety review.
    pub fn complete_safety_review(&mut self) -> Result<(), ActionError> {
        const ACTION: &str = "complete safety review";
        self.ensure_playing(ACTION)?;
        if self.state.period_index != 7 {
            return Err(self.refuse(ACTION, ActionError::WrongPeriod(ACTION)));
        }
        if !self.state.facility_complete {
            return Err(self.refuse(
                ACTION,
                ActionError::MissingPrerequisite("the facility must be complete"),
            ));
        }
        if self.state.safety_review_complete {
            return Err(self.refuse(ACTION, ActionError::AlreadyDone("the review is closed")));
        }
        self.spend_or_refuse(ACTION, costs::SAFETY_REVIEW)?;
        self.state.safety_review_complete = true;
        self.notify(Severity::Success, "Safety review closed out.");
        self.maybe_open_gate();
        Ok(())
    }

    // ── Approvals & gates ───────────────────────────────────────────────

    /// Toggle one team member's signature on a gate. Records are scoped per
    /// gate and survive recovery-branch revisits.
    pub fn toggle_approval(
        &mut self,
        gate: GateId,
        role: Role,
        approve: bool,
    ) -> Result<(), ActionError> {
        if !self.state.team.contains(&role) {
            return Err(self.refuse("toggle approval", ActionError::RoleNotOnTeam(role.name())));
        }
        self.state
            .approvals
            .entry(gate)
            .or_default()
            .insert(role, approve);
        log::debug!("{} approval for {:?}: {}", role.name(), gate, approve);
        Ok(())
    }

    /// Explicitly advance: open the current period's gate, or move straight
    /// to the next period when the current one has none.
    pub fn request_advance(&mut self) -> Result<(), ActionError> {
        const ACTION: &str = "advance";
        self.ensure_playing(ACTION)?;
        if self.pending_advance.is_some() {
            return Err(self.refuse(ACTION, ActionError::WrongState("an advance is scheduled")));
        }
        match self.state.period().gate {
            Some(gate) => {
                if self.open_gate.is_some() {
                    return Err(self.refuse(ACTION, ActionError::AlreadyDone("the gate is open")));
                }
                self.open_gate_now(gate);
                Ok(())
            }
            None => {
                if self.state.period_index + 1 >= PERIODS.len() {
                    return Err(self.refuse(ACTION, ActionError::WrongState("the final period")));
                }
                self.advance_period();
                Ok(())
            }
        }
    }

    /// Approve the open gate. Requires satisfied requirements, a quorum
    /// (missing required roles may be overridden with explicit
    /// acknowledgment; a signature shortfall may not), and a non-empty
    /// justification.
    pub fn approve_gate(
        &mut self,
        justification: &str,
        override_missing_roles: bool,
    ) -> Result<GateOutcome, ActionError> {
        const ACTION: &str = "approve gate";
        let gate = match self.open_gate {
            Some(gate) => gate,
            None => return Err(self.refuse(ACTION, ActionError::NoOpenGate)),
        };
        if justification.trim().is_empty() {
            return Err(self.refuse(ACTION, ActionError::JustificationRequired));
        }
        let evaluation = evaluator::evaluate(gate, &self.state);
        if !evaluation.can_proceed {
            return Err(self.refuse(
                ACTION,
                ActionError::RequirementsNotMet(evaluation.missing_requirements),
            ));
        }
        let quorum = evaluator::check_role_quorum(gate, &self.state.team, &self.state.approvals);
        if !quorum.permits_approval(override_missing_roles) {
            let detail = if quorum.current_signature_count < quorum.required_signature_count {
                format!(
                    "{} of {} signatures",
                    quorum.current_signature_count, quorum.required_signature_count
                )
            } else {
                let names: Vec<&str> = quorum
                    .missing_required_roles
                    .iter()
                    .map(|r| r.name())
                    .collect();
                format!("missing required roles: {}", names.join(", "))
            };
            return Err(self.refuse(ACTION, ActionError::QuorumNotMet(detail)));
        }

        let cost = self.gate_cost(gate);
        self.spend_or_refuse(ACTION, cost)?;

        let spec = gate.spec();
        log::info!("gate approved: {} (${:.0})", spec.name, cost);
        let outcome = match gate {
            GateId::SeismicProgram => {
                self.run_survey();
                GateOutcome::Advancing
            }
            GateId::ExplorationWell => self.resolve_exploration_well(),
            GateId::AppraisalProgram => {
                self.notify(Severity::Success, "Appraisal results accepted. Moving to planning.");
                GateOutcome::Advancing
            }
            GateId::FinalInvestment => {
                self.notify(Severity::Success, "Project sanctioned. Construction begins.");
                GateOutcome::Advancing
            }
            GateId::StartupReadiness => {
                self.notify(Severity::Success, "Startup readiness confirmed.");
                GateOutcome::Advancing
            }
        };

        let risk_summary: Vec<&str> = spec.risks.iter().map(|r| r.name).collect();
        let decision_outcome = match outcome {
            GateOutcome::Advancing => "approved",
            GateOutcome::Discovery => "approved — discovery",
            GateOutcome::DryHole => "approved — dry hole",
        };
        self.record_decision(
            format!("Approved: {}", spec.name),
            cost,
            decision_outcome,
            risk_summary.join(", "),
            justification,
        );

        self.open_gate = None;
        if outcome != GateOutcome::DryHole {
            // Display delay before the period rolls over; cancellable by reset.
            self.pending_advance = Some(costs::ADVANCE_DELAY_SECS);
        }
        Ok(outcome)
    }

    /// Reject the open gate. Always succeeds and ends the run.
    pub fn reject_gate(&mut self, justification: &str) -> Result<(), ActionError> {
        let gate = match self.open_gate {
            Some(gate) => gate,
            None => return Err(self.refuse("reject gate", ActionError::NoOpenGate)),
        };
        let spec = gate.spec();
        log::info!("gate rejected: {}", spec.name);
        self.record_decision(
            format!("Rejected: {}", spec.name),
            0.0,
            "rejected — project terminated",
            String::new(),
            justification,
        );
        self.notify(
            Severity::Warning,
            format!("{} rejected. The project will not proceed.", spec.name),
        );
        self.open_gate = None;
        self.pending_advance = None;
        self.run_state = RunState::Ended(EndReason::GateRejected(gate));
        Ok(())
    }

    // ── Scheduled behaviors ─────────────────────────────────────────────

    /// Advance the engine's clock. Fires the deferred period advance and,
    /// during the production period, accrues one production day per tick.
    pub fn update(&mut self, delta_secs: f64) {
        if let Some(remaining) = self.pending_advance {
            let remaining = remaining - delta_secs;
            if remaining <= 0.0 {
                self.pending_advance = None;
                self.advance_period();
            } else {
                self.pending_advance = Some(remaining);
            }
        }

        if self.run_state == RunState::Playing && self.state.period_index == PRODUCTION_PERIOD {
            self.tick_accumulator += delta_secs;
            while self.tick_accumulator >= costs::PRODUCTION_TICK_SECS {
                self.tick_accumulator -= costs::PRODUCTION_TICK_SECS;
                self.production_tick();
            }
        } else {
            // Guaranteed teardown: no orphaned ticks outside production.
            self.tick_accumulator = 0.0;
        }
    }

    fn production_tick(&mut self) {
        let geo = match self.state.geo() {
            Some(geo) => geo,
            None => return,
        };
        // The daily rate steps down by the annual decline once per year.
        let years_on = (self.state.production.days_elapsed / 365) as i32;
        let rate = self.state.production.daily_rate_bbl * (1.0 - geo.decline_rate).powi(years_on);
        let gross = rate * (costs::BASE_OIL_PRICE + geo.price_adjustment);
        let opex = finance::apply_cost_discount(
            costs::BASE_DAILY_OPEX * geo.opex_multiplier,
            BonusKind::OpexReduction,
            &self.state.team,
        );
        self.state.production.cumulative_bbl += rate;
        self.state.production.days_elapsed += 1;
        self.state.day += 1;
        self.state.total_revenue += gross;
        // Net cash flow may be negative on a given day; this is the one
        // budget mutation without an affordability guard.
        self.state.budget += gross - opex;
    }

    // ── Internal transitions ────────────────────────────────────────────

    pub(crate) fn advance_period(&mut self) {
        if let Some(days) = self.state.period().duration_days {
            self.state.day += days;
        }
        self.state.period_index += 1;
        let period = self.state.period();
        log::info!("entered period {}: {}", period.index, period.name);
        self.notify(
            Severity::Info,
            format!("{} — {}", period.phase.name(), period.name),
        );
        if let Some(gate) = period.gate {
            if gate.spec().auto_open_on_entry {
                self.open_gate_now(gate);
            }
        }
        if period.index == PRODUCTION_PERIOD {
            self.start_production();
        }
    }

    fn start_production(&mut self) {
        let geo = match self.state.geo() {
            Some(geo) => geo,
            None => return,
        };
        let flowing = self.state.wells.production.successful;
        self.state.production.daily_rate_bbl =
            finance::estimate_daily_production(flowing, geo, &self.state.team);
        self.notify(
            Severity::Success,
            format!(
                "First oil! {} wells on stream at {:.0} bbl/day.",
                flowing, self.state.production.daily_rate_bbl
            ),
        );
    }

    pub(crate) fn open_gate_now(&mut self, gate: GateId) {
        self.open_gate = Some(gate);
        self.notify(
            Severity::Info,
            format!("Decision gate open: {}", gate.spec().name),
        );
    }

    /// Open the current period's gate once its prerequisites hold.
    fn maybe_open_gate(&mut self) {
        if self.run_state != RunState::Playing
            || self.open_gate.is_some()
            || self.pending_advance.is_some()
        {
            return;
        }
        if let Some(gate) = self.state.period().gate {
            if evaluator::evaluate(gate, &self.state).can_proceed {
                self.open_gate_now(gate);
            }
        }
    }

    fn run_survey(&mut self) {
        let geo = self.state.geo().expect("gate requirements guarantee an area");
        let package = self
            .state
            .package
            .expect("gate requirements guarantee a package");
        let contractor = self
            .state
            .contractor
            .expect("gate requirements guarantee a contractor");
        let interpretation = interp::generate_interpretation(package, geo, &mut self.rng);
        let probability = finance::compute_discovery_probability(
            package.spec().quality_score,
            contractor.spec().quality_modifier,
            geo.base_discovery_probability,
            &self.state.team,
            &mut self.rng,
        );
        self.state.interpretation = Some(interpretation);
        self.state.seismic_complete = true;
        self.state.probability_of_success = Some(probability);
        self.notify(
            Severity::Success,
            format!(
                "Seismic survey processed. Chance of success {:.0}%.",
                probability * 100.0
            ),
        );
    }

    fn resolve_exploration_well(&mut self) -> GateOutcome {
        let probability = self
            .state
            .probability_of_success
            .expect("gate requirements guarantee a probability");
        let site_mod = self
            .state
            .drill_site
            .map_or(0.0, |site| site.spec().probability_modifier);
        let chance = (probability + site_mod).clamp(0.0, costs::PROBABILITY_CAP);
        let struck_oil = self.rng.gen_bool(chance);
        self.state.wells.record(WellCategory::Exploration, struck_oil);
        if struck_oil {
            self.register_discovery();
            GateOutcome::Discovery
        } else {
            log::info!("exploration well dry at {:.0}% chance", chance * 100.0);
            self.notify(
                Severity::Warning,
                "Dry hole. The well found no movable hydrocarbons.",
            );
            self.run_state = RunState::DryHole;
            GateOutcome::DryHole
        }
    }

    pub(crate) fn register_discovery(&mut self) {
        let geo = self.state.geo().expect("a drilled well implies an area");
        let mut reserves = self
            .rng
            .gen_range(geo.reserve_min_bbl..=geo.reserve_max_bbl);
        if self.state.farmed_out {
            reserves *= costs::FARM_OUT_RESERVE_RETENTION;
        }
        let quality = self.sample_quality();
        self.state.oil_discovered = true;
        self.state.reserve_estimate_bbl = Some(reserves);
        self.state.oil_quality = Some(quality);
        self.notify(
            Severity::Success,
            format!(
                "Discovery! Estimated {:.0} million barrels of {} crude.",
                reserves / 1_000_000.0,
                quality.name()
            ),
        );
    }

    fn sample_quality(&mut self) -> OilQuality {
        let geo = self.state.geo().expect("sampling quality requires an area");
        let w = geo.quality_weights;
        let draw: f64 = self.rng.gen_range(0.0..(w.light + w.medium + w.heavy));
        if draw < w.light {
            OilQuality::Light
        } else if draw < w.light + w.medium {
            OilQuality::Medium
        } else {
            OilQuality::Heavy
        }
    }

    /// Cost deducted when a gate is approved.
    fn gate_cost(&self, gate: GateId) -> f64 {
        let base = gate.spec().base_cost;
        match gate {
            GateId::SeismicProgram => {
                let (Some(package), Some(contractor), Some(geo)) =
                    (self.state.package, self.state.contractor, self.state.geo())
                else {
                    return base;
                };
                base + finance::apply_cost_discount(
                    seismic::program_cost(package, contractor, geo),
                    BonusKind::SeismicCost,
                    &self.state.team,
                )
            }
            GateId::ExplorationWell => base + self.exploration_well_cost(),
            _ => base,
        }
    }

    pub(crate) fn exploration_well_cost(&self) -> f64 {
        let geo = self.state.geo();
        let base =
            finance::cost_with_geo_multiplier(costs::EXPLORATION_WELL, CostCategory::ExplorationWell, geo);
        let site = self
            .state
            .drill_site
            .map_or(1.0, |site| site.spec().cost_factor);
        let farm = if self.state.farmed_out {
            costs::FARM_OUT_WELL_COST_FACTOR
        } else {
            1.0
        };
        finance::apply_cost_discount(base * site * farm, BonusKind::WellCost, &self.state.team)
    }

    // ── Shared helpers ──────────────────────────────────────────────────

    fn ensure_playing(&mut self, action: &'static str) -> Result<(), ActionError> {
        if self.run_state != RunState::Playing {
            return Err(self.refuse(action, ActionError::WrongState(action)));
        }
        Ok(())
    }

    pub(crate) fn spend_or_refuse(&mut self, action: &'static str, cost: f64) -> Result<(), ActionError> {
        match self.state.try_spend(cost) {
            Ok(()) => Ok(()),
            Err(err) => Err(self.refuse(action, err)),
        }
    }

    /// Refusal path shared by every handler: log, notify, hand the error back.
    pub(crate) fn refuse(&mut self, action: &'static str, err: ActionError) -> ActionError {
        log::warn!("{} refused: {}", action, err);
        self.notify(Severity::Error, format!("Cannot {}: {}", action, err));
        err
    }

    pub(crate) fn notify(&mut self, severity: Severity, message: impl Into<String>) {
        self.state.notifications.push(Notification {
            message: message.into(),
            severity,
            period: self.state.period_index,
            day: self.state.day,
        });
    }

    pub(crate) fn record_decision(
        &mut self,
        action: String,
        cost: f64,
        outcome: &str,
        risk_summary: String,
        justification: &str,
    ) {
        self.state.decisions.push(DecisionRecord {
            action,
            cost,
            outcome: outcome.to_string(),
            risk_summary,
            justification: justification.to_string(),
            day: self.state.day,
        });
    }
}
