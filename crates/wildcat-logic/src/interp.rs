//! Seismic interpretation generation.
//!
//! A survey produces one structured interpretation report. Fields are
//! sampled independently against the package's sensitivity vector, except
//! where one finding gates another (DHI sub-types exist only under a
//! sampled parent flag, which itself requires the package deliverable).
//! The risk list is derived from the sampled fields by a fixed ordered
//! rule set, never sampled directly.

use rand::Rng;
use serde::Serialize;

use crate::costs::CONFIDENCE_CAP;
use crate::geology::GeoProfile;
use crate::seismic::SeismicPackage;

/// Trap style the interpretation maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TrapType {
    AnticlinalFourWay,
    FaultBounded,
    Stratigraphic,
    SaltFlank,
}

impl TrapType {
    pub fn name(&self) -> &'static str {
        match self {
            TrapType::AnticlinalFourWay => "four-way anticlinal closure",
            TrapType::FaultBounded => "fault-bounded closure",
            TrapType::Stratigraphic => "stratigraphic pinch-out",
            TrapType::SaltFlank => "salt-flank trap",
        }
    }
}

/// Top-seal verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SealAssessment {
    Competent,
    Marginal,
    Compromised,
}

/// Structural findings of the survey.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructuralFindings {
    pub closure_identified: bool,
    /// Mapped closure area, km². Zero when no closure was found.
    pub closure_area_km2: f64,
    pub trap_type: TrapType,
    pub four_way_closure: bool,
}

/// Direct and indirect hydrocarbon indicators.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HydrocarbonIndicators {
    pub amplitude_anomaly: bool,
    /// Relative anomaly strength, [0,1]. Zero without an anomaly.
    pub anomaly_strength: f64,
    pub flat_spot: bool,
    pub bright_spot: bool,
    pub dhi_present: bool,
    pub dhi_types: Vec<&'static str>,
}

/// Reservoir geometry estimates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReservoirGeometry {
    pub depth_m: f64,
    pub depth_uncertainty_m: f64,
    pub thickness_m: f64,
}

/// Faulting and seal findings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FaultAssessment {
    pub fault_count: u32,
    pub seal: SealAssessment,
}

/// Interpreter confidence per discipline, each in [0,1].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfidenceScores {
    pub structural: f64,
    pub volumetric: f64,
    pub fluid: f64,
}

/// The structured report a seismic execution produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeismicInterpretation {
    pub structure: StructuralFindings,
    pub indicators: HydrocarbonIndicators,
    pub geometry: ReservoirGeometry,
    pub faults: FaultAssessment,
    pub confidence: ConfidenceScores,
    /// Derived by the threshold rules in [`derive_risks`]; rule order
    /// defines list order.
    pub risks: Vec<&'static str>,
}

const DHI_TYPE_POOL: [&str; 4] = [
    "Amplitude-versus-offset anomaly",
    "Gas chimney",
    "Phase reversal at contact",
    "Velocity sag",
];

/// Generate an interpretation from a package shot over an area.
///
/// Deterministic for a given random source.
pub fn generate_interpretation(
    package: SeismicPackage,
    geo: &GeoProfile,
    rng: &mut impl Rng,
) -> SeismicInterpretation {
    let s = package.spec().sensitivity;

    let closure_identified = rng.gen_bool(s.structural_clarity);
    let closure_area_km2 = if closure_identified {
        rng.gen_range(8.0..120.0)
    } else {
        0.0
    };
    let trap_type = match rng.gen_range(0..4) {
        0 => TrapType::AnticlinalFourWay,
        1 => TrapType::FaultBounded,
        2 => TrapType::Stratigraphic,
        _ => TrapType::SaltFlank,
    };
    let four_way_closure =
        closure_identified && trap_type == TrapType::AnticlinalFourWay && rng.gen_bool(0.7);

    let amplitude_anomaly = rng.gen_bool(s.amplitude_confidence);
    let anomaly_strength = if amplitude_anomaly {
        rng.gen_range(0.2..1.0)
    } else {
        0.0
    };
    let flat_spot = rng.gen_bool(s.amplitude_confidence * 0.5);
    let bright_spot = rng.gen_bool(s.amplitude_confidence * 0.6);

    // DHIs require the processing deliverable; sub-types require the flag.
    let dhi_present = package.spec().supports_dhi() && rng.gen_bool(s.amplitude_confidence * 0.7);
    let dhi_types = if dhi_present {
        let count = rng.gen_range(1..=DHI_TYPE_POOL.len());
        DHI_TYPE_POOL[..count].to_vec()
    } else {
        Vec::new()
    };

    let depth_m = rng.gen_range(1_500.0..4_500.0);
    // Better depth accuracy shrinks the error bar; never below zero.
    let depth_uncertainty_m = (300.0 * (1.0 - s.depth_accuracy) * rng.gen_range(0.5..1.5)).max(0.0);
    let thickness_m = rng.gen_range(10.0..150.0);

    let fault_count = {
        // Coarser fault resolution hides faults rather than revealing them.
        let visible = (8.0 * s.fault_resolution) as u32;
        rng.gen_range(0..=visible.max(1))
    };
    let seal = if fault_count > 5 {
        SealAssessment::Compromised
    } else if fault_count > 2 {
        SealAssessment::Marginal
    } else {
        SealAssessment::Competent
    };

    let confidence = ConfidenceScores {
        structural: (s.structural_clarity * rng.gen_range(0.7..1.0)).clamp(0.0, 1.0),
        volumetric: (s.depth_accuracy * rng.gen_range(0.6..1.0)).clamp(0.0, 1.0),
        fluid: (s.amplitude_confidence * rng.gen_range(0.6..1.0)).clamp(0.0, 1.0),
    };

    let mut interpretation = SeismicInterpretation {
        structure: StructuralFindings {
            closure_identified,
            closure_area_km2,
            trap_type,
            four_way_closure,
        },
        indicators: HydrocarbonIndicators {
            amplitude_anomaly,
            anomaly_strength,
            flat_spot,
            bright_spot,
            dhi_present,
            dhi_types,
        },
        geometry: ReservoirGeometry {
            depth_m,
            depth_uncertainty_m,
            thickness_m,
        },
        faults: FaultAssessment { fault_count, seal },
        confidence,
        risks: Vec::new(),
    };
    interpretation.risks = derive_risks(&interpretation, geo);
    interpretation
}

/// Fixed ordered threshold rules that assemble the risk list.
pub fn derive_risks(interp: &SeismicInterpretation, geo: &GeoProfile) -> Vec<&'static str> {
    let mut risks = Vec::new();
    if !interp.structure.closure_identified {
        risks.push("No mapped closure — trap presence unproven");
    }
    if interp.geometry.depth_uncertainty_m > 100.0 {
        risks.push("Depth conversion uncertainty exceeds 100 m");
    }
    if interp.faults.seal == SealAssessment::Compromised {
        risks.push("Fault density threatens top-seal integrity");
    } else if interp.faults.seal == SealAssessment::Marginal {
        risks.push("Seal effectiveness uncertain across mapped faults");
    }
    if !interp.indicators.dhi_present && !interp.indicators.amplitude_anomaly {
        risks.push("No hydrocarbon indicators observed");
    }
    if interp.geometry.thickness_m < 20.0 {
        risks.push("Thin reservoir section near economic cutoff");
    }
    if interp.confidence.volumetric < 0.4 {
        risks.push("Volumetric confidence below planning threshold");
    }
    if geo.base_discovery_probability < 0.25 {
        risks.push("Frontier setting — limited calibration wells");
    }
    risks
}

/// Outcome of an additional interpretation study.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StudyOutcome {
    /// Improvement applied to the volumetric confidence score.
    pub volumetric_gain: f64,
}

/// Additional study: mutate an existing interpretation in place.
///
/// Bounded improvement — each confidence score gains a sampled increment
/// but never exceeds the 0.95 ceiling, and the depth error bar shrinks but
/// never goes below zero. The interpretation is refined, not regenerated.
pub fn refine_interpretation(
    interp: &mut SeismicInterpretation,
    rng: &mut impl Rng,
) -> StudyOutcome {
    let before = interp.confidence.volumetric;
    interp.confidence.structural =
        (interp.confidence.structural + rng.gen_range(0.05..0.15)).min(CONFIDENCE_CAP);
    interp.confidence.volumetric =
        (interp.confidence.volumetric + rng.gen_range(0.05..0.15)).min(CONFIDENCE_CAP);
    interp.confidence.fluid =
        (interp.confidence.fluid + rng.gen_range(0.05..0.15)).min(CONFIDENCE_CAP);
    interp.geometry.depth_uncertainty_m = (interp.geometry.depth_uncertainty_m * 0.7).max(0.0);

    StudyOutcome {
        volumetric_gain: interp.confidence.volumetric - before,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geology::AreaType;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample(package: SeismicPackage, seed: u64) -> SeismicInterpretation {
        let mut rng = StdRng::seed_from_u64(seed);
        generate_interpretation(package, AreaType::ProvenBasin.profile(), &mut rng)
    }

    #[test]
    fn test_deterministic_given_seed() {
        assert_eq!(
            sample(SeismicPackage::Standard3d, 99),
            sample(SeismicPackage::Standard3d, 99)
        );
    }

    #[test]
    fn test_bounds_hold_across_samples() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..500 {
            for pkg in SeismicPackage::ALL {
                let i =
                    generate_interpretation(pkg, AreaType::Deepwater.profile(), &mut rng);
                assert!(i.geometry.depth_uncertainty_m >= 0.0);
                for c in [i.confidence.structural, i.confidence.volumetric, i.confidence.fluid] {
                    assert!((0.0..=1.0).contains(&c), "confidence {}", c);
                }
            }
        }
    }

    #[test]
    fn test_dhi_requires_deliverable() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..500 {
            let i = generate_interpretation(
                SeismicPackage::Regional2d,
                AreaType::ProvenBasin.profile(),
                &mut rng,
            );
            assert!(!i.indicators.dhi_present);
            assert!(i.indicators.dhi_types.is_empty());
        }
    }

    #[test]
    fn test_dhi_types_gated_by_flag() {
        let mut rng = StdRng::seed_from_u64(12);
        for _ in 0..500 {
            let i = generate_interpretation(
                SeismicPackage::HighRes3d,
                AreaType::ProvenBasin.profile(),
                &mut rng,
            );
            if i.indicators.dhi_present {
                assert!(!i.indicators.dhi_types.is_empty());
            } else {
                assert!(i.indicators.dhi_types.is_empty());
            }
        }
    }

    #[test]
    fn test_closure_area_zero_without_closure() {
        let mut rng = StdRng::seed_from_u64(13);
        for _ in 0..500 {
            let i = generate_interpretation(
                SeismicPackage::FastTrack2d,
                AreaType::OnshoreFrontier.profile(),
                &mut rng,
            );
            if !i.structure.closure_identified {
                assert_eq!(i.structure.closure_area_km2, 0.0);
            }
        }
    }

    #[test]
    fn test_risk_rule_order() {
        // Construct a report that trips every rule and check ordering.
        let mut interp = sample(SeismicPackage::FastTrack2d, 1);
        interp.structure.closure_identified = false;
        interp.geometry.depth_uncertainty_m = 180.0;
        interp.faults.seal = SealAssessment::Compromised;
        interp.indicators.dhi_present = false;
        interp.indicators.amplitude_anomaly = false;
        interp.geometry.thickness_m = 12.0;
        interp.confidence.volumetric = 0.1;
        let risks = derive_risks(&interp, AreaType::OnshoreFrontier.profile());
        assert_eq!(risks[0], "No mapped closure — trap presence unproven");
        assert_eq!(risks[1], "Depth conversion uncertainty exceeds 100 m");
        assert_eq!(risks[2], "Fault density threatens top-seal integrity");
        assert_eq!(*risks.last().unwrap(), "Frontier setting — limited calibration wells");
    }

    #[test]
    fn test_refinement_is_bounded() {
        let mut rng = StdRng::seed_from_u64(21);
        let mut interp = sample(SeismicPackage::Standard3d, 21);
        for _ in 0..50 {
            refine_interpretation(&mut interp, &mut rng);
        }
        assert!(interp.confidence.structural <= CONFIDENCE_CAP);
        assert!(interp.confidence.volumetric <= CONFIDENCE_CAP);
        assert!(interp.confidence.fluid <= CONFIDENCE_CAP);
        assert!(interp.geometry.depth_uncertainty_m >= 0.0);
    }

    #[test]
    fn test_refinement_mutates_in_place() {
        let mut rng = StdRng::seed_from_u64(22);
        let mut interp = sample(SeismicPackage::Standard3d, 22);
        let structural_before = interp.confidence.structural;
        let trap_before = interp.structure.trap_type;
        refine_interpretation(&mut interp, &mut rng);
        // Confidence moves; the sampled findings themselves do not.
        assert!(interp.confidence.structural >= structural_before);
        assert_eq!(interp.structure.trap_type, trap_before);
    }
}
