//! Action error taxonomy.
//!
//! Every error here is recoverable: the action is refused before any
//! mutation and the engine surfaces the message as an error notification.
//! Terminal outcomes (rejection, abandonment) are run states, not errors.

use thiserror::Error;

/// Why an action was refused.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ActionError {
    /// The action's cost exceeds the current budget.
    #[error("insufficient funds: ${cost:.0} required, ${budget:.0} available")]
    Unaffordable { cost: f64, budget: f64 },

    /// A required prior fact or selection is missing.
    #[error("prerequisite not met: {0}")]
    MissingPrerequisite(&'static str),

    /// The action has already been performed and cannot repeat.
    #[error("already done: {0}")]
    AlreadyDone(&'static str),

    /// The action is not available in the current period.
    #[error("{0} is not available in the current period")]
    WrongPeriod(&'static str),

    /// The action is not available in the current run state.
    #[error("{0} is not available right now")]
    WrongState(&'static str),

    /// A gate action was called with no gate open.
    #[error("no gate is open")]
    NoOpenGate,

    /// Gate requirements are unmet; the full list is collected, not
    /// short-circuited.
    #[error("gate requirements unmet: {}", .0.join("; "))]
    RequirementsNotMet(Vec<String>),

    /// Role approvals are insufficient for the gate.
    #[error("approval quorum not met: {0}")]
    QuorumNotMet(String),

    /// Gate approval needs a written justification.
    #[error("a written justification is required")]
    JustificationRequired,

    /// A run cannot start without a team.
    #[error("team composition is empty")]
    EmptyTeam,

    /// An approval was toggled for a role not on the team.
    #[error("{0} is not on the team")]
    RoleNotOnTeam(&'static str),

    /// Area re-selection attempted while a lease is held.
    #[error("a lease is already held on the selected area")]
    LeaseAlreadyHeld,

    /// Only one farm-out deal is available per lease.
    #[error("a farm-out partner has already been brought in")]
    FarmOutExhausted,
}
