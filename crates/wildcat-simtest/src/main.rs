//! Wildcat Headless Simulation Harness
//!
//! Validates the pure domain logic and plays scripted runs end to end —
//! no UI, no networking, everything in-process.
//!
//! Usage:
//!   cargo run -p wildcat-simtest
//!   cargo run -p wildcat-simtest -- --verbose

use rand::rngs::StdRng;
use rand::SeedableRng;

use wildcat_core::{GateOutcome, ProjectEngine, RunState};
use wildcat_logic::costs;
use wildcat_logic::drill_sites::DrillSite;
use wildcat_logic::finance;
use wildcat_logic::geology::AreaType;
use wildcat_logic::interp;
use wildcat_logic::roles::{BonusKind, InsightContext, Role};
use wildcat_logic::seismic::{SeismicContractor, SeismicPackage};
use wildcat_logic::timeline::{GateId, PERIODS, PRODUCTION_PERIOD};

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn check(name: &str, passed: bool, detail: String) -> TestResult {
    TestResult {
        name: name.to_string(),
        passed,
        detail,
    }
}

fn main() {
    env_logger::init();
    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== Wildcat Simulation Harness ===\n");

    let mut results = Vec::new();

    // 1. Catalog consistency
    results.extend(validate_catalog(verbose));

    // 2. Financial model sweep
    results.extend(validate_financial_model(verbose));

    // 3. Interpretation generator sweep
    results.extend(validate_interpretation(verbose));

    // 4. Scripted happy-path run
    results.extend(play_happy_path(verbose));

    // 5. Scripted dry-hole recovery run
    results.extend(play_dry_hole_recovery(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Catalog ──────────────────────────────────────────────────────────

fn validate_catalog(verbose: bool) -> Vec<TestResult> {
    if verbose {
        println!("[catalog] {} periods, {} gates", PERIODS.len(), GateId::ALL.len());
    }
    let mut results = Vec::new();

    results.push(check(
        "timeline ordering",
        PERIODS.iter().enumerate().all(|(i, p)| p.index == i),
        format!("{} periods totally ordered", PERIODS.len()),
    ));

    let gates_bound = GateId::ALL.iter().all(|gate| {
        PERIODS.iter().filter(|p| p.gate == Some(*gate)).count() == 1
    });
    results.push(check(
        "gate binding",
        gates_bound,
        "every gate bound to exactly one period".to_string(),
    ));

    let weights_ok = AreaType::ALL.iter().all(|area| {
        let w = area.profile().quality_weights;
        ((w.light + w.medium + w.heavy) - 1.0).abs() < 1e-9
    });
    results.push(check(
        "quality weights",
        weights_ok,
        "oil-quality weights sum to 1 in every area".to_string(),
    ));

    let sensitivities_ok = SeismicPackage::ALL.iter().all(|pkg| {
        let s = pkg.spec().sensitivity;
        [
            s.structural_clarity,
            s.amplitude_confidence,
            s.fault_resolution,
            s.depth_accuracy,
        ]
        .iter()
        .all(|v| (0.0..=1.0).contains(v))
    });
    results.push(check(
        "package sensitivity",
        sensitivities_ok,
        "all interpretation sensitivities within [0,1]".to_string(),
    ));

    let quorums_ok = GateId::ALL
        .iter()
        .all(|gate| gate.spec().roles.min_signatures >= 1 && !gate.spec().requirements.is_empty());
    results.push(check(
        "gate quorums",
        quorums_ok,
        "every gate declares requirements and a signature minimum".to_string(),
    ));

    results
}

// ── 2. Financial model ──────────────────────────────────────────────────

fn validate_financial_model(verbose: bool) -> Vec<TestResult> {
    let mut results = Vec::new();

    let bundle = costs::lease_bundle();
    results.push(check(
        "lease bundle",
        (bundle - 3_500_000.0).abs() < 1e-6,
        format!("bundle = ${:.1}M", bundle / 1_000_000.0),
    ));

    // Additive stacking across every bonus kind and role pair.
    let kinds = [
        BonusKind::DiscoveryBoost,
        BonusKind::SeismicCost,
        BonusKind::WellCost,
        BonusKind::FacilityCost,
        BonusKind::OpexReduction,
        BonusKind::ProductionUplift,
    ];
    let mut additive = true;
    for kind in kinds {
        for a in Role::ALL {
            for b in Role::ALL {
                if a == b {
                    continue;
                }
                let separate = finance::aggregate_role_bonus(kind, &[a])
                    + finance::aggregate_role_bonus(kind, &[b]);
                let together = finance::aggregate_role_bonus(kind, &[a, b]);
                if (separate - together).abs() > 1e-12 {
                    additive = false;
                }
            }
        }
    }
    results.push(check(
        "bonus additivity",
        additive,
        "bonus({A,B}) == bonus({A}) + bonus({B}) for all pairs".to_string(),
    ));

    // Probability cap and floor across a wide random sweep.
    let mut rng = StdRng::seed_from_u64(1);
    let mut bounded = true;
    let mut max_seen: f64 = 0.0;
    for _ in 0..5_000 {
        let p = finance::compute_discovery_probability(
            1.0,
            0.5,
            1.0,
            &[Role::Geologist, Role::Geophysicist],
            &mut rng,
        );
        let q = finance::compute_discovery_probability(0.0, -0.5, 0.0, &[], &mut rng);
        max_seen = max_seen.max(p);
        if !(0.0..=0.95).contains(&p) || !(0.0..=0.95).contains(&q) {
            bounded = false;
        }
    }
    results.push(check(
        "probability bounds",
        bounded,
        format!("5,000 samples within [0, 0.95], max {:.3}", max_seen),
    ));

    // NPV purity: identical inputs, identical output.
    let geo = AreaType::ProvenBasin.profile();
    let team = [Role::FinanceAnalyst, Role::DrillingEngineer];
    let first = finance::compute_npv(80_000_000.0, 10, 25_000.0, geo, &team, 40_000_000.0);
    let second = finance::compute_npv(80_000_000.0, 10, 25_000.0, geo, &team, 40_000_000.0);
    results.push(check(
        "NPV idempotence",
        first == second,
        format!("NPV = ${:.0}M on both runs", first.npv / 1_000_000.0),
    ));

    if verbose {
        println!(
            "[finance] proven-basin 10-well scenario NPV ${:.0}M, capital ${:.0}M",
            first.npv / 1_000_000.0,
            first.development_capital / 1_000_000.0
        );
    }

    results
}

// ── 3. Interpretation generator ─────────────────────────────────────────

fn validate_interpretation(verbose: bool) -> Vec<TestResult> {
    let mut results = Vec::new();
    let mut rng = StdRng::seed_from_u64(5);

    let mut bounds_ok = true;
    let mut dhi_gated = true;
    let mut dhi_seen = 0usize;
    for _ in 0..2_000 {
        for pkg in SeismicPackage::ALL {
            let report =
                interp::generate_interpretation(pkg, AreaType::Deepwater.profile(), &mut rng);
            if report.geometry.depth_uncertainty_m < 0.0 {
                bounds_ok = false;
            }
            for c in [
                report.confidence.structural,
                report.confidence.volumetric,
                report.confidence.fluid,
            ] {
                if !(0.0..=1.0).contains(&c) {
                    bounds_ok = false;
                }
            }
            if report.indicators.dhi_present {
                dhi_seen += 1;
                if !pkg.spec().supports_dhi() || report.indicators.dhi_types.is_empty() {
                    dhi_gated = false;
                }
            } else if !report.indicators.dhi_types.is_empty() {
                dhi_gated = false;
            }
        }
    }
    results.push(check(
        "interpretation bounds",
        bounds_ok,
        "confidences in [0,1], depth uncertainty never negative".to_string(),
    ));
    results.push(check(
        "DHI gating",
        dhi_gated && dhi_seen > 0,
        format!("{} DHI reports, all from DHI-capable packages", dhi_seen),
    ));

    if verbose {
        let sample = interp::generate_interpretation(
            SeismicPackage::HighRes3d,
            AreaType::ProvenBasin.profile(),
            &mut rng,
        );
        println!(
            "[interp] sample report: {}",
            serde_json::to_string_pretty(&sample).unwrap_or_default()
        );
    }

    results
}

// ── 4. Happy path ───────────────────────────────────────────────────────

const FULL_TEAM: [Role; 8] = [
    Role::Geologist,
    Role::Geophysicist,
    Role::DrillingEngineer,
    Role::ReservoirEngineer,
    Role::FacilitiesEngineer,
    Role::FinanceAnalyst,
    Role::OperationsManager,
    Role::HseAdvisor,
];

fn sign_all(engine: &mut ProjectEngine, gate: GateId) {
    for role in FULL_TEAM {
        let _ = engine.toggle_approval(gate, role, true);
    }
}

fn settle(engine: &mut ProjectEngine) {
    engine.update(costs::ADVANCE_DELAY_SECS + 0.1);
}

/// Play through leasing, seismic, and drilling. Returns the engine and the
/// drilling outcome.
fn drive_to_drill(seed: u64) -> Option<(ProjectEngine, GateOutcome)> {
    let mut engine = ProjectEngine::new(Some(seed));
    engine.start_run(FULL_TEAM.to_vec()).ok()?;
    engine.select_area(AreaType::ProvenBasin).ok()?;
    engine.secure_lease().ok()?;
    engine.request_advance().ok()?;
    engine.select_package(SeismicPackage::Standard3d).ok()?;
    engine.select_contractor(SeismicContractor::PetroServ).ok()?;
    sign_all(&mut engine, GateId::SeismicProgram);
    engine.approve_gate("program sized to the prospect", false).ok()?;
    settle(&mut engine);
    engine.obtain_permit().ok()?;
    engine.select_drill_site(DrillSite::FlankTerrace).ok()?;
    sign_all(&mut engine, GateId::ExplorationWell);
    let outcome = engine
        .approve_gate("chance of success clears the hurdle", false)
        .ok()?;
    Some((engine, outcome))
}

fn play_happy_path(verbose: bool) -> Vec<TestResult> {
    let mut results = Vec::new();

    let mut found = None;
    for seed in 0..200 {
        if let Some((mut engine, outcome)) = drive_to_drill(seed) {
            if outcome == GateOutcome::Discovery {
                settle(&mut engine);
                found = Some((engine, seed));
                break;
            }
        }
    }
    let (mut engine, seed) = match found {
        Some(pair) => pair,
        None => {
            results.push(check(
                "happy path",
                false,
                "no seed produced a first-well discovery".to_string(),
            ));
            return results;
        }
    };

    let mut ok = true;
    let mut detail = String::new();

    while !engine.state().appraisal_complete {
        if engine.drill_appraisal_well().is_err() {
            ok = false;
            detail = "appraisal drilling failed".to_string();
            break;
        }
    }
    if ok {
        sign_all(&mut engine, GateId::AppraisalProgram);
        ok = engine.approve_gate("volumes confirmed", false).is_ok();
        settle(&mut engine);
    }
    if ok {
        ok = engine.plan_development(10).is_ok()
            && engine.secure_financing().is_ok()
            && engine.request_advance().is_ok()
            && engine.request_advance().is_ok();
        sign_all(&mut engine, GateId::FinalInvestment);
        ok = ok && engine.approve_gate("sanction case holds", false).is_ok();
        settle(&mut engine);
    }
    if ok {
        ok = engine.execute_development().is_ok() && engine.request_advance().is_ok();
        ok = ok && engine.complete_safety_review().is_ok();
        sign_all(&mut engine, GateId::StartupReadiness);
        ok = ok && engine.approve_gate("ready for first oil", false).is_ok();
        settle(&mut engine);
    }
    if ok {
        ok = engine.state().period_index == PRODUCTION_PERIOD
            && engine.run_state() == RunState::Playing;
        for _ in 0..365 {
            engine.update(costs::PRODUCTION_TICK_SECS);
        }
        let state = engine.state();
        ok = ok && state.production.days_elapsed == 365 && state.total_revenue > 0.0;
        detail = format!(
            "seed {}: first oil on day {}, year-one output {:.1} MMbbl, budget ${:.0}M",
            seed,
            state.day - 365,
            state.production.cumulative_bbl / 1_000_000.0,
            state.budget / 1_000_000.0
        );
        if verbose {
            println!("[happy] {}", detail);
            println!(
                "[happy] decision log: {} entries, notifications retained: {}",
                state.decisions.len(),
                state.notifications.len()
            );
            for (role, line) in engine.team_advice(InsightContext::Period(PRODUCTION_PERIOD)) {
                println!("[happy] {}: {}", role.name(), line);
            }
        }
    }

    results.push(check("happy path", ok, detail));
    results
}

// ── 5. Dry-hole recovery ────────────────────────────────────────────────

fn play_dry_hole_recovery(verbose: bool) -> Vec<TestResult> {
    let mut results = Vec::new();

    let mut found = None;
    for seed in 0..200 {
        if let Some((engine, outcome)) = drive_to_drill(seed) {
            if outcome == GateOutcome::DryHole {
                found = Some((engine, seed));
                break;
            }
        }
    }
    let (mut engine, seed) = match found {
        Some(pair) => pair,
        None => {
            results.push(check(
                "dry-hole recovery",
                false,
                "no seed produced a dry hole".to_string(),
            ));
            return results;
        }
    };

    let in_recovery = engine.run_state() == RunState::DryHole;
    let budget_before = engine.state().budget;
    let relocated = engine.relocate(AreaType::Deepwater);
    let ok = in_recovery
        && relocated.is_ok()
        && engine.state().area == Some(AreaType::Deepwater)
        && !engine.state().oil_discovered
        && engine.state().period_index == 2
        && engine.open_gate() == Some(GateId::ExplorationWell)
        && engine.run_state() == RunState::Playing;

    let detail = format!(
        "seed {}: relocated for ${:.1}M, back at the drilling gate",
        seed,
        (budget_before - engine.state().budget) / 1_000_000.0
    );
    if verbose {
        println!("[recovery] {}", detail);
    }
    results.push(check("dry-hole recovery", ok, detail));
    results
}
