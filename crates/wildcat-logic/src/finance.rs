//! Financial model — geo-multiplied costs, role bonuses, discovery
//! probability, and the discounted cash-flow projection.
//!
//! Everything here is a pure function. The one stochastic input, the
//! discovery-probability jitter, comes from an explicit random source so
//! callers control determinism.

use rand::Rng;

use crate::costs;
use crate::geology::{CostCategory, GeoProfile};
use crate::roles::{BonusKind, Role};

/// Apply an area's cost multiplier to a base cost.
///
/// With no profile the multiplier defaults to 1.0.
pub fn cost_with_geo_multiplier(
    base_cost: f64,
    category: CostCategory,
    geo: Option<&GeoProfile>,
) -> f64 {
    base_cost * geo.map_or(1.0, |g| g.multiplier(category))
}

/// Sum a named bonus across the team. Additive stacking: two roles each
/// granting 10% yield 20%, not 21%.
pub fn aggregate_role_bonus(kind: BonusKind, team: &[Role]) -> f64 {
    team.iter().map(|role| role.bonus(kind)).sum()
}

/// Scale a base value up by the team's aggregated bonus.
pub fn apply_role_bonus(base_value: f64, kind: BonusKind, team: &[Role]) -> f64 {
    base_value * (1.0 + aggregate_role_bonus(kind, team))
}

/// Scale a cost down by the team's aggregated discount, as a single
/// combined multiplicative factor.
pub fn apply_cost_discount(base_cost: f64, kind: BonusKind, team: &[Role]) -> f64 {
    base_cost * (1.0 - aggregate_role_bonus(kind, team))
}

/// Combined probability of discovery.
///
/// `(quality_score + contractor_modifier + geo_base) / 2`, plus the team's
/// discovery boost, plus a symmetric ±5 pp jitter sampled exactly once per
/// call. Hard-capped: the result is always within [0, 0.95].
pub fn compute_discovery_probability(
    seismic_quality_score: f64,
    contractor_quality_mod: f64,
    geo_base_probability: f64,
    team: &[Role],
    rng: &mut impl Rng,
) -> f64 {
    let combined = (seismic_quality_score + contractor_quality_mod + geo_base_probability) / 2.0;
    let boost = aggregate_role_bonus(BonusKind::DiscoveryBoost, team);
    let jitter = rng.gen_range(-0.05..=0.05);
    (combined + boost + jitter).clamp(0.0, costs::PROBABILITY_CAP)
}

/// Line-item breakdown of an NPV calculation, for display and audit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NpvBreakdown {
    pub development_capital: f64,
    pub annual_revenue_year_one: f64,
    pub annual_opex_year_one: f64,
    pub discounted_cash_flow: f64,
    pub discounted_abandonment: f64,
    pub npv: f64,
}

/// Development capital for a well count and facility in an area, net of the
/// engineering team's cost discounts.
pub fn development_capital(well_count: u32, geo: &GeoProfile, team: &[Role]) -> f64 {
    let wells = cost_with_geo_multiplier(
        costs::DEVELOPMENT_WELL * well_count as f64,
        CostCategory::DevelopmentWell,
        Some(geo),
    );
    let facility = cost_with_geo_multiplier(costs::FACILITY, CostCategory::Facility, Some(geo));
    apply_cost_discount(wells, BonusKind::WellCost, team)
        + apply_cost_discount(facility, BonusKind::FacilityCost, team)
}

/// Expected field output for a well count, bbl/day.
pub fn estimate_daily_production(well_count: u32, geo: &GeoProfile, team: &[Role]) -> f64 {
    apply_role_bonus(
        costs::BASE_WELL_DAILY_RATE * well_count as f64 * geo.productivity_multiplier,
        BonusKind::ProductionUplift,
        team,
    )
}

/// Twenty-year discounted net present value of a development scenario.
///
/// Year `y` net cash is `(revenue − opex) × (1 − decline)^y`, discounted at
/// the fixed annual rate. Production stops once cumulative volume exhausts
/// `reserves` (the final year is pro-rated). Development capital and the
/// discounted terminal abandonment cost are subtracted, along with spend to
/// date. Pure: callable speculatively with no shared state.
pub fn compute_npv(
    reserves: f64,
    well_count: u32,
    daily_production: f64,
    geo: &GeoProfile,
    team: &[Role],
    cumulative_spend: f64,
) -> NpvBreakdown {
    let capital = development_capital(well_count, geo, team);

    let annual_revenue =
        daily_production * 365.0 * (costs::BASE_OIL_PRICE + geo.price_adjustment);
    let annual_opex = apply_cost_discount(
        costs::BASE_DAILY_OPEX * 365.0 * geo.opex_multiplier,
        BonusKind::OpexReduction,
        team,
    );
    let annual_volume = daily_production * 365.0;

    let mut discounted = 0.0;
    let mut produced = 0.0;
    for year in 1..=costs::PROJECTION_YEARS {
        let decline = (1.0 - geo.decline_rate).powi(year as i32);
        let volume = annual_volume * decline;
        if produced >= reserves {
            break;
        }
        // Pro-rate the year that crosses the reserve ceiling.
        let fraction = ((reserves - produced) / volume).min(1.0);
        produced += volume * fraction;
        let net = (annual_revenue - annual_opex) * decline * fraction;
        discounted += net / (1.0 + costs::DISCOUNT_RATE).powi(year as i32);
    }

    let abandonment = geo.abandonment_cost
        / (1.0 + costs::DISCOUNT_RATE).powi(costs::PROJECTION_YEARS as i32);

    NpvBreakdown {
        development_capital: capital,
        annual_revenue_year_one: annual_revenue,
        annual_opex_year_one: annual_opex,
        discounted_cash_flow: discounted,
        discounted_abandonment: abandonment,
        npv: -cumulative_spend - capital + discounted - abandonment,
    }
}

/// Placeholder well count for the pre-discovery NPV screen.
pub const PRELIMINARY_WELL_COUNT: u32 = 6;

/// Speculative NPV before any discovery, using placeholder assumptions:
/// six wells at base rate and the area's reserve midpoint.
pub fn preliminary_npv(geo: &GeoProfile, team: &[Role], cumulative_spend: f64) -> f64 {
    let daily = estimate_daily_production(PRELIMINARY_WELL_COUNT, geo, team);
    compute_npv(
        geo.reserve_midpoint(),
        PRELIMINARY_WELL_COUNT,
        daily,
        geo,
        team,
        cumulative_spend,
    )
    .npv
}
