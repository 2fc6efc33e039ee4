//! Team role catalog.
//!
//! Roles are immutable archetypes chosen once at setup. Each carries a set
//! of named fractional bonuses — same-named bonuses stack additively across
//! the team — and a handful of advisory insights keyed to where the project
//! currently stands.

use serde::{Deserialize, Serialize};

use crate::timeline::GateId;

/// Named skill bonus a role can contribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BonusKind {
    /// Added to the combined discovery probability.
    DiscoveryBoost,
    /// Discount on seismic program cost.
    SeismicCost,
    /// Discount on well construction cost.
    WellCost,
    /// Discount on facility construction cost.
    FacilityCost,
    /// Discount on daily operating expenditure.
    OpexReduction,
    /// Uplift on per-well production rate.
    ProductionUplift,
}

/// Team archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    Geologist,
    Geophysicist,
    DrillingEngineer,
    ReservoirEngineer,
    FacilitiesEngineer,
    FinanceAnalyst,
    OperationsManager,
    HseAdvisor,
}

/// Context a role insight can be keyed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsightContext {
    /// A timeline period by index.
    Period(usize),
    /// A stage gate.
    Gate(GateId),
}

impl Role {
    /// All roles in catalog order.
    pub const ALL: [Role; 8] = [
        Role::Geologist,
        Role::Geophysicist,
        Role::DrillingEngineer,
        Role::ReservoirEngineer,
        Role::FacilitiesEngineer,
        Role::FinanceAnalyst,
        Role::OperationsManager,
        Role::HseAdvisor,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Role::Geologist => "Geologist",
            Role::Geophysicist => "Geophysicist",
            Role::DrillingEngineer => "Drilling Engineer",
            Role::ReservoirEngineer => "Reservoir Engineer",
            Role::FacilitiesEngineer => "Facilities Engineer",
            Role::FinanceAnalyst => "Finance Analyst",
            Role::OperationsManager => "Operations Manager",
            Role::HseAdvisor => "HSE Advisor",
        }
    }

    /// The fractional bonuses this role contributes.
    pub fn bonuses(&self) -> &'static [(BonusKind, f64)] {
        match self {
            Role::Geologist => &[(BonusKind::DiscoveryBoost, 0.05)],
            Role::Geophysicist => &[
                (BonusKind::DiscoveryBoost, 0.03),
                (BonusKind::SeismicCost, 0.10),
            ],
            Role::DrillingEngineer => &[(BonusKind::WellCost, 0.12)],
            Role::ReservoirEngineer => &[
                (BonusKind::ProductionUplift, 0.08),
                (BonusKind::OpexReduction, 0.03),
            ],
            Role::FacilitiesEngineer => &[(BonusKind::FacilityCost, 0.10)],
            Role::FinanceAnalyst => &[(BonusKind::OpexReduction, 0.05)],
            Role::OperationsManager => &[
                (BonusKind::OpexReduction, 0.08),
                (BonusKind::ProductionUplift, 0.04),
            ],
            Role::HseAdvisor => &[(BonusKind::FacilityCost, 0.03)],
        }
    }

    /// The fraction this role contributes to one bonus, 0 if it doesn't.
    pub fn bonus(&self, kind: BonusKind) -> f64 {
        self.bonuses()
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, v)| *v)
            .unwrap_or(0.0)
    }

    /// Advisory line for the given context. The most specific match wins;
    /// every role has a general fallback line.
    pub fn insight(&self, ctx: InsightContext) -> &'static str {
        match (self, ctx) {
            (Role::Geologist, InsightContext::Period(0)) => {
                "Basin maturity matters more than acreage price. Proven basins trade upside for certainty."
            }
            (Role::Geologist, InsightContext::Gate(GateId::ExplorationWell)) => {
                "A dry hole is data too, but only if we can afford the next decision."
            }
            (Role::Geophysicist, InsightContext::Gate(GateId::SeismicProgram)) => {
                "Cheap seismic is expensive. Resolution gaps come back as drilling risk."
            }
            (Role::Geophysicist, InsightContext::Period(2)) => {
                "Amplitude anomalies are suggestions, not promises. Check the fault seal."
            }
            (Role::DrillingEngineer, InsightContext::Gate(GateId::ExplorationWell)) => {
                "Crestal locations drill tight windows. Budget contingency for losses."
            }
            (Role::ReservoirEngineer, InsightContext::Period(3)) => {
                "Two appraisal penetrations minimum before I trust any volumetric."
            }
            (Role::FacilitiesEngineer, InsightContext::Gate(GateId::FinalInvestment)) => {
                "Facility scope locks here. Changes after sanction cost triple."
            }
            (Role::FinanceAnalyst, InsightContext::Gate(GateId::FinalInvestment)) => {
                "The NPV holds only at the price deck we assumed. Stress the downside."
            }
            (Role::FinanceAnalyst, InsightContext::Period(4)) => {
                "Financing terms improve with every appraisal well we can show."
            }
            (Role::OperationsManager, InsightContext::Gate(GateId::StartupReadiness)) => {
                "Commissioning shortcuts show up as downtime in year one."
            }
            (Role::HseAdvisor, InsightContext::Gate(GateId::StartupReadiness)) => {
                "No first oil without a closed-out safety case. Non-negotiable."
            }
            (Role::Geologist, _) => "Geology does not negotiate. Respect the closure.",
            (Role::Geophysicist, _) => "Trust the data where it is good and say where it is not.",
            (Role::DrillingEngineer, _) => "Every day on the rig is a day of spend. Plan the well, drill the plan.",
            (Role::ReservoirEngineer, _) => "Recovery factor assumptions deserve more scrutiny than they get.",
            (Role::FacilitiesEngineer, _) => "Design for the field we found, not the field we hoped for.",
            (Role::FinanceAnalyst, _) => "Capital has alternatives. This project must beat them.",
            (Role::OperationsManager, _) => "Uptime is earned in the details nobody celebrates.",
            (Role::HseAdvisor, _) => "Schedule pressure is how incidents start.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bonus_lookup() {
        assert_eq!(Role::Geologist.bonus(BonusKind::DiscoveryBoost), 0.05);
        assert_eq!(Role::Geologist.bonus(BonusKind::WellCost), 0.0);
    }

    #[test]
    fn test_bonus_fractions_are_sane() {
        for role in Role::ALL {
            for (_, v) in role.bonuses() {
                assert!(*v > 0.0 && *v < 0.5, "{}: {}", role.name(), v);
            }
        }
    }

    #[test]
    fn test_shared_bonus_names_exist() {
        // The catalog intentionally exercises additive stacking.
        let discovery: Vec<Role> = Role::ALL
            .iter()
            .copied()
            .filter(|r| r.bonus(BonusKind::DiscoveryBoost) > 0.0)
            .collect();
        assert!(discovery.len() >= 2);
        let opex: Vec<Role> = Role::ALL
            .iter()
            .copied()
            .filter(|r| r.bonus(BonusKind::OpexReduction) > 0.0)
            .collect();
        assert!(opex.len() >= 2);
    }

    #[test]
    fn test_every_role_has_fallback_insight() {
        for role in Role::ALL {
            assert!(!role.insight(InsightContext::Period(99)).is_empty());
        }
    }

    #[test]
    fn test_specific_insight_overrides_fallback() {
        let specific = Role::Geologist.insight(InsightContext::Period(0));
        let fallback = Role::Geologist.insight(InsightContext::Period(6));
        assert_ne!(specific, fallback);
    }
}
