//! Gate evaluation.
//!
//! Walks a gate's requirement list in catalog order, collecting every unmet
//! item rather than short-circuiting, so the caller can present a complete
//! list. Quorum checking is separate: missing required roles can be
//! overridden with explicit acknowledgment, an unmet signature count never.

use std::collections::BTreeMap;

use wildcat_logic::finance;
use wildcat_logic::gates::Requirement;
use wildcat_logic::roles::Role;
use wildcat_logic::timeline::GateId;

use crate::state::ProjectState;

/// Result of a gate requirement evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct GateEvaluation {
    pub can_proceed: bool,
    /// Every unmet requirement, in gate order, then unmet gate extras.
    pub missing_requirements: Vec<String>,
}

/// Result of a role quorum check.
#[derive(Debug, Clone, PartialEq)]
pub struct QuorumCheck {
    pub required_roles_met: bool,
    pub missing_required_roles: Vec<Role>,
    pub recommended_missing: Vec<Role>,
    /// Declared minimum clamped to team size.
    pub required_signature_count: usize,
    pub current_signature_count: usize,
}

impl QuorumCheck {
    /// Whether approval may proceed, honoring an explicit override for
    /// missing required roles only.
    pub fn permits_approval(&self, override_missing_roles: bool) -> bool {
        (self.required_roles_met || override_missing_roles)
            && self.current_signature_count >= self.required_signature_count
    }
}

fn fmt_money(amount: f64) -> String {
    if amount >= 1_000_000.0 {
        format!("${:.1}M", amount / 1_000_000.0)
    } else {
        format!("${:.0}", amount)
    }
}

/// Evaluate a gate's requirements against the current project state.
pub fn evaluate(gate: GateId, state: &ProjectState) -> GateEvaluation {
    let spec = gate.spec();
    let mut missing = Vec::new();

    for requirement in spec.requirements {
        match requirement {
            Requirement::BudgetAtLeast(amount) => {
                if state.budget < *amount {
                    missing.push(format!(
                        "budget of at least {} (currently {})",
                        fmt_money(*amount),
                        fmt_money(state.budget)
                    ));
                }
            }
            Requirement::Fact(key) => {
                if !state.fact(*key) {
                    missing.push(key.description().to_string());
                }
            }
            Requirement::ProbabilityCalculated => {
                if state.probability_of_success.is_none() {
                    missing.push("probability of success calculated".to_string());
                }
            }
            Requirement::ReservesEstimated => {
                if state.reserve_estimate_bbl.is_none() {
                    missing.push("reserve estimate available".to_string());
                }
            }
            Requirement::PreliminaryNpv(threshold) => {
                // Speculative recomputation under placeholder assumptions;
                // no area selected means nothing to screen against.
                let met = state.geo().is_some_and(|geo| {
                    finance::preliminary_npv(geo, &state.team, state.total_spent) >= *threshold
                });
                if !met {
                    missing.push(format!(
                        "preliminary NPV of at least {}",
                        fmt_money(*threshold)
                    ));
                }
            }
            Requirement::NpvApproved(threshold) => {
                // Reads the already-computed plan NPV, never a fresh run.
                let met = state
                    .development_plan
                    .is_some_and(|plan| plan.npv >= *threshold);
                if !met {
                    missing.push(format!(
                        "approved development plan NPV of at least {}",
                        fmt_money(*threshold)
                    ));
                }
            }
        }
    }

    // Gate-specific preconditions outside the declared requirement list.
    match gate {
        GateId::SeismicProgram => {
            if state.package.is_none() {
                missing.push("seismic package selected".to_string());
            }
            if state.contractor.is_none() {
                missing.push("seismic contractor selected".to_string());
            }
        }
        GateId::ExplorationWell => {
            if state.drill_site.is_none() {
                missing.push("drill site selected".to_string());
            }
        }
        _ => {}
    }

    GateEvaluation {
        can_proceed: missing.is_empty(),
        missing_requirements: missing,
    }
}

/// Check the role-approval quorum for a gate.
pub fn check_role_quorum(
    gate: GateId,
    team: &[Role],
    approvals: &BTreeMap<GateId, BTreeMap<Role, bool>>,
) -> QuorumCheck {
    let roles = &gate.spec().roles;

    let missing_required_roles: Vec<Role> = roles
        .required
        .iter()
        .copied()
        .filter(|role| !team.contains(role))
        .collect();
    let recommended_missing: Vec<Role> = roles
        .recommended
        .iter()
        .copied()
        .filter(|role| !team.contains(role))
        .collect();

    // A team smaller than the nominal quorum can never be blocked forever.
    let required_signature_count = roles.min_signatures.min(team.len());
    let current_signature_count = approvals
        .get(&gate)
        .map(|by_role| by_role.values().filter(|approved| **approved).count())
        .unwrap_or(0);

    QuorumCheck {
        required_roles_met: missing_required_roles.is_empty(),
        missing_required_roles,
        recommended_missing,
        required_signature_count,
        current_signature_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wildcat_logic::geology::AreaType;

    fn base_state() -> ProjectState {
        ProjectState::new(vec![Role::Geologist, Role::Geophysicist])
    }

    #[test]
    fn test_all_unmet_items_collected() {
        let state = base_state();
        let result = evaluate(GateId::SeismicProgram, &state);
        assert!(!result.can_proceed);
        // Area, lease, package, contractor all missing; budget is fine.
        assert_eq!(result.missing_requirements.len(), 4);
        // Requirement order first, extras appended after.
        assert_eq!(result.missing_requirements[0], "geological area selected");
        assert_eq!(
            result.missing_requirements[2],
            "seismic package selected"
        );
    }

    #[test]
    fn test_budget_requirement_message() {
        let mut state = base_state();
        state.area = Some(AreaType::ProvenBasin);
        state.lease_secured = true;
        state.package = Some(wildcat_logic::seismic::SeismicPackage::Standard3d);
        state.contractor = Some(wildcat_logic::seismic::SeismicContractor::PetroServ);
        state.budget = 1_000_000.0;
        let result = evaluate(GateId::SeismicProgram, &state);
        assert_eq!(result.missing_requirements.len(), 1);
        assert!(result.missing_requirements[0].starts_with("budget of at least $10.0M"));
    }

    #[test]
    fn test_npv_approved_reads_stored_plan() {
        let mut state = base_state();
        state.development_plan = Some(crate::state::DevelopmentPlan {
            well_count: 10,
            estimated_cost: 250_000_000.0,
            estimated_daily_bbl: 25_000.0,
            npv: -5_000_000.0,
        });
        let result = evaluate(GateId::FinalInvestment, &state);
        assert!(result
            .missing_requirements
            .iter()
            .any(|m| m.contains("development plan NPV")));
    }

    #[test]
    fn test_quorum_clamps_to_team_size() {
        // ExplorationWell nominally demands 3 signatures.
        let team = [Role::Geologist];
        let check = check_role_quorum(GateId::ExplorationWell, &team, &BTreeMap::new());
        assert_eq!(check.required_signature_count, 1);
    }

    #[test]
    fn test_quorum_counts_only_positive_toggles() {
        let team = [Role::Geologist, Role::DrillingEngineer, Role::FinanceAnalyst];
        let mut approvals = BTreeMap::new();
        let by_role: &mut BTreeMap<Role, bool> =
            approvals.entry(GateId::ExplorationWell).or_default();
        by_role.insert(Role::Geologist, true);
        by_role.insert(Role::DrillingEngineer, false);
        let check = check_role_quorum(GateId::ExplorationWell, &team, &approvals);
        assert_eq!(check.current_signature_count, 1);
        assert_eq!(check.required_signature_count, 3);
        assert!(check.required_roles_met);
        assert!(!check.permits_approval(false));
    }

    #[test]
    fn test_override_covers_roles_not_signatures() {
        let team = [Role::FinanceAnalyst];
        let mut approvals: BTreeMap<GateId, BTreeMap<Role, bool>> = BTreeMap::new();
        approvals
            .entry(GateId::ExplorationWell)
            .or_default()
            .insert(Role::FinanceAnalyst, true);
        let check = check_role_quorum(GateId::ExplorationWell, &team, &approvals);
        // Geologist and drilling engineer are absent from the team.
        assert!(!check.required_roles_met);
        assert_eq!(check.missing_required_roles.len(), 2);
        // Signature quorum (clamped to 1) is met, so the override suffices.
        assert!(!check.permits_approval(false));
        assert!(check.permits_approval(true));
    }

    #[test]
    fn test_override_never_covers_signature_shortfall() {
        let team = [Role::Geologist, Role::DrillingEngineer, Role::FinanceAnalyst];
        let check = check_role_quorum(GateId::ExplorationWell, &team, &BTreeMap::new());
        assert!(check.required_roles_met);
        assert!(!check.permits_approval(true));
    }
}
