//! Base cost constants. All amounts in USD unless noted.
//!
//! Geographic multipliers from [`crate::geology`] scale these per area;
//! role bonuses from [`crate::roles`] discount them per team.

/// Starting budget for a new project.
pub const INITIAL_BUDGET: f64 = 500_000_000.0;

// ── Leasing bundle ──────────────────────────────────────────────────────
// The lease bonus, environmental baseline study, and license application
// are acquired together; the area lease multiplier applies to the summed
// bundle, not the bonus line item alone.

pub const LEASE_BONUS: f64 = 2_000_000.0;
pub const ENVIRONMENTAL_STUDY: f64 = 500_000.0;
pub const PERMIT_APPLICATION: f64 = 1_000_000.0;

/// The full leasing bundle before the area multiplier.
pub fn lease_bundle() -> f64 {
    LEASE_BONUS + ENVIRONMENTAL_STUDY + PERMIT_APPLICATION
}

// ── Drilling & facilities ───────────────────────────────────────────────

/// Regulatory drilling permit, obtained once per company.
pub const DRILLING_PERMIT: f64 = 1_500_000.0;
pub const EXPLORATION_WELL: f64 = 18_000_000.0;
pub const APPRAISAL_WELL: f64 = 12_000_000.0;
pub const DEVELOPMENT_WELL: f64 = 10_000_000.0;
pub const FACILITY: f64 = 150_000_000.0;
pub const COMMISSIONING: f64 = 5_000_000.0;
pub const SAFETY_REVIEW: f64 = 2_000_000.0;
pub const FINANCING_ARRANGEMENT: f64 = 3_000_000.0;
pub const ADDITIONAL_STUDY: f64 = 1_500_000.0;

// ── Production economics ────────────────────────────────────────────────

/// Benchmark oil price, $/bbl. Area profiles apply a premium or discount.
pub const BASE_OIL_PRICE: f64 = 75.0;
/// Field-wide operating cost per production day before area multipliers.
pub const BASE_DAILY_OPEX: f64 = 120_000.0;
/// Nominal output of one production well, bbl/day.
pub const BASE_WELL_DAILY_RATE: f64 = 2_500.0;
/// Annual discount rate for NPV.
pub const DISCOUNT_RATE: f64 = 0.10;
/// Cash-flow projection horizon in years.
pub const PROJECTION_YEARS: u32 = 20;

// ── Recovery branch ─────────────────────────────────────────────────────

/// Lease-bundle discount when relocating after a dry hole.
pub const RELOCATION_LEASE_FACTOR: f64 = 0.75;
/// Each retry on the same lease scales the last known probability down.
pub const RETRY_PROBABILITY_FACTOR: f64 = 0.85;
/// Probability bonus from a farm-out partner's technical contribution.
pub const FARM_OUT_PROBABILITY_BONUS: f64 = 0.08;
/// Share of sampled reserves retained after a farm-out success.
pub const FARM_OUT_RESERVE_RETENTION: f64 = 0.60;
/// Well-cost share carried by the acting company after a farm-out.
pub const FARM_OUT_WELL_COST_FACTOR: f64 = 0.50;

// ── Hard ceilings ───────────────────────────────────────────────────────

/// No configuration may display or use a success probability above this.
pub const PROBABILITY_CAP: f64 = 0.95;
/// Interpretation confidence scores never refine above this.
pub const CONFIDENCE_CAP: f64 = 0.95;

// ── Engine pacing ───────────────────────────────────────────────────────

/// Display delay between gate approval and the period advance, seconds.
pub const ADVANCE_DELAY_SECS: f64 = 2.0;
/// One production tick accrues one day of production.
pub const PRODUCTION_TICK_SECS: f64 = 1.0;
/// Recent-history length of the notification feed.
pub const NOTIFICATION_CAP: usize = 15;
