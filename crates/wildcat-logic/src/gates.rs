//! Stage-gate catalog.
//!
//! Each gate bundles everything the decision board sees: the ordered
//! requirement list, the risk register, the key questions a justification
//! should answer, and the role-approval quorum. Requirement order defines
//! the order of the missing-items list the evaluator reports.

use serde::{Deserialize, Serialize};

use crate::costs;
use crate::roles::Role;
use crate::timeline::GateId;

/// Boolean project facts a requirement can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FactKey {
    AreaSelected,
    LeaseSecured,
    SeismicComplete,
    PermitObtained,
    OilDiscovered,
    AppraisalComplete,
    DevelopmentPlanApproved,
    FinancingSecured,
    FacilityComplete,
    SafetyReviewComplete,
}

impl FactKey {
    pub fn description(&self) -> &'static str {
        match self {
            FactKey::AreaSelected => "geological area selected",
            FactKey::LeaseSecured => "exploration lease secured",
            FactKey::SeismicComplete => "seismic survey completed",
            FactKey::PermitObtained => "drilling permit obtained",
            FactKey::OilDiscovered => "hydrocarbons discovered",
            FactKey::AppraisalComplete => "appraisal program completed",
            FactKey::DevelopmentPlanApproved => "development plan approved",
            FactKey::FinancingSecured => "project financing secured",
            FactKey::FacilityComplete => "production facility complete",
            FactKey::SafetyReviewComplete => "safety review complete",
        }
    }
}

/// One entry in a gate's requirement list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Requirement {
    /// Current budget must be at least this amount.
    BudgetAtLeast(f64),
    /// The named project fact must be truthy.
    Fact(FactKey),
    /// A probability of success has been computed.
    ProbabilityCalculated,
    /// A reserve estimate exists.
    ReservesEstimated,
    /// Speculative NPV under placeholder assumptions meets the threshold.
    PreliminaryNpv(f64),
    /// The approved development plan's NPV meets the threshold.
    NpvApproved(f64),
}

/// Severity of a gate risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskSeverity {
    Low,
    Medium,
    High,
    Critical,
}

/// One entry in a gate's risk register.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Risk {
    pub name: &'static str,
    pub severity: RiskSeverity,
    pub impact: &'static str,
}

/// Role-approval quorum for a gate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoleRequirement {
    pub required: &'static [Role],
    pub recommended: &'static [Role],
    /// Nominal minimum signature count; clamped to team size at evaluation.
    pub min_signatures: usize,
}

/// Static description of a stage gate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GateSpec {
    pub id: GateId,
    pub name: &'static str,
    /// Fixed decision cost deducted at approval, before any side-effect
    /// program costs (survey, well, development capital) priced dynamically.
    pub base_cost: f64,
    pub requirements: &'static [Requirement],
    pub risks: &'static [Risk],
    pub key_questions: &'static [&'static str],
    pub roles: RoleRequirement,
    /// Whether entering the gate's period opens the gate immediately.
    pub auto_open_on_entry: bool,
}

impl GateId {
    pub fn spec(&self) -> &'static GateSpec {
        match self {
            GateId::SeismicProgram => &SEISMIC_PROGRAM,
            GateId::ExplorationWell => &EXPLORATION_WELL,
            GateId::AppraisalProgram => &APPRAISAL_PROGRAM,
            GateId::FinalInvestment => &FINAL_INVESTMENT,
            GateId::StartupReadiness => &STARTUP_READINESS,
        }
    }
}

static SEISMIC_PROGRAM: GateSpec = GateSpec {
    id: GateId::SeismicProgram,
    name: "Seismic Program Decision",
    base_cost: 0.0,
    requirements: &[
        Requirement::Fact(FactKey::AreaSelected),
        Requirement::Fact(FactKey::LeaseSecured),
        Requirement::BudgetAtLeast(10_000_000.0),
    ],
    risks: &[
        Risk {
            name: "Acquisition weather window",
            severity: RiskSeverity::Low,
            impact: "Standby day rates accrue if the crew waits on weather.",
        },
        Risk {
            name: "Imaging below salt",
            severity: RiskSeverity::Medium,
            impact: "Poor illumination could leave the trap geometry ambiguous.",
        },
        Risk {
            name: "No drillable prospect",
            severity: RiskSeverity::High,
            impact: "The full program cost is sunk if interpretation finds no closure.",
        },
    ],
    key_questions: &[
        "Does the package resolution match the expected trap style?",
        "Is the contractor crew proven in this environment?",
        "What does the program cost leave for the drilling decision?",
    ],
    roles: RoleRequirement {
        required: &[Role::Geophysicist],
        recommended: &[Role::Geologist, Role::FinanceAnalyst],
        min_signatures: 2,
    },
    auto_open_on_entry: false,
};

static EXPLORATION_WELL: GateSpec = GateSpec {
    id: GateId::ExplorationWell,
    name: "Exploration Well Decision",
    base_cost: 0.0,
    requirements: &[
        Requirement::Fact(FactKey::SeismicComplete),
        Requirement::Fact(FactKey::PermitObtained),
        Requirement::ProbabilityCalculated,
        Requirement::PreliminaryNpv(0.0),
        Requirement::BudgetAtLeast(15_000_000.0),
    ],
    risks: &[
        Risk {
            name: "Dry hole",
            severity: RiskSeverity::Critical,
            impact: "The well cost is sunk and the project enters recovery.",
        },
        Risk {
            name: "Drilling overrun",
            severity: RiskSeverity::Medium,
            impact: "Hole problems could add weeks of rig time.",
        },
        Risk {
            name: "Shallow gas hazard",
            severity: RiskSeverity::High,
            impact: "An unmapped gas pocket endangers the rig and the schedule.",
        },
    ],
    key_questions: &[
        "Is the chance of success defensible against the mapped closure?",
        "Can the budget absorb a dry hole and still fund a recovery path?",
        "Why this drill site over the alternatives?",
    ],
    roles: RoleRequirement {
        required: &[Role::Geologist, Role::DrillingEngineer],
        recommended: &[Role::Geophysicist, Role::FinanceAnalyst],
        min_signatures: 3,
    },
    auto_open_on_entry: false,
};

static APPRAISAL_PROGRAM: GateSpec = GateSpec {
    id: GateId::AppraisalProgram,
    name: "Appraisal Completion Review",
    base_cost: 0.0,
    requirements: &[
        Requirement::Fact(FactKey::OilDiscovered),
        Requirement::ReservesEstimated,
        Requirement::Fact(FactKey::AppraisalComplete),
        Requirement::BudgetAtLeast(30_000_000.0),
    ],
    risks: &[
        Risk {
            name: "Reservoir compartmentalization",
            severity: RiskSeverity::High,
            impact: "Sealed faults could strand reserves the estimate counts.",
        },
        Risk {
            name: "Downgrade on appraisal",
            severity: RiskSeverity::Medium,
            impact: "Appraisal wells may shrink the recoverable volume.",
        },
    ],
    key_questions: &[
        "Do the appraisal penetrations support the volumetric range?",
        "Is the fluid quality consistent across the field?",
        "What remains unknown that development planning must carry?",
    ],
    roles: RoleRequirement {
        required: &[Role::ReservoirEngineer],
        recommended: &[Role::Geologist, Role::DrillingEngineer],
        min_signatures: 2,
    },
    auto_open_on_entry: true,
};

static FINAL_INVESTMENT: GateSpec = GateSpec {
    id: GateId::FinalInvestment,
    name: "Final Investment Decision",
    base_cost: 0.0,
    requirements: &[
        Requirement::Fact(FactKey::DevelopmentPlanApproved),
        Requirement::NpvApproved(0.0),
        Requirement::Fact(FactKey::FinancingSecured),
        Requirement::BudgetAtLeast(100_000_000.0),
    ],
    risks: &[
        Risk {
            name: "Oil price collapse",
            severity: RiskSeverity::Critical,
            impact: "A sustained low price deck could turn the NPV negative.",
        },
        Risk {
            name: "Construction cost inflation",
            severity: RiskSeverity::High,
            impact: "Yard and steel escalation erodes the sanction economics.",
        },
        Risk {
            name: "Schedule slip to first oil",
            severity: RiskSeverity::Medium,
            impact: "Every quarter of delay defers the entire revenue stream.",
        },
    ],
    key_questions: &[
        "Does the plan NPV clear the hurdle at a conservative price deck?",
        "Is the well count matched to the appraised reserve volume?",
        "Are financing covenants compatible with the construction schedule?",
    ],
    roles: RoleRequirement {
        required: &[Role::FinanceAnalyst, Role::FacilitiesEngineer],
        recommended: &[Role::ReservoirEngineer, Role::OperationsManager],
        min_signatures: 4,
    },
    auto_open_on_entry: false,
};

static STARTUP_READINESS: GateSpec = GateSpec {
    id: GateId::StartupReadiness,
    name: "Startup Readiness Review",
    base_cost: costs::COMMISSIONING,
    requirements: &[
        Requirement::Fact(FactKey::FacilityComplete),
        Requirement::Fact(FactKey::SafetyReviewComplete),
        Requirement::BudgetAtLeast(5_000_000.0),
    ],
    risks: &[
        Risk {
            name: "Commissioning trip",
            severity: RiskSeverity::Medium,
            impact: "Early equipment trips delay stable production.",
        },
        Risk {
            name: "Process safety incident",
            severity: RiskSeverity::Critical,
            impact: "A startup incident could shut the field before first oil.",
        },
    ],
    key_questions: &[
        "Is every safety-case action closed out?",
        "Is the operations team staffed for continuous production?",
    ],
    roles: RoleRequirement {
        required: &[Role::OperationsManager, Role::HseAdvisor],
        recommended: &[Role::FacilitiesEngineer],
        min_signatures: 3,
    },
    auto_open_on_entry: true,
};
