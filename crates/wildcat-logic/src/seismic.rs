//! Seismic package and contractor catalogs.
//!
//! A survey is the combination of a package (what is acquired and how it is
//! processed) and a contractor (who shoots it). The package drives the
//! interpretation quality; the contractor adds a modifier on top.

use serde::{Deserialize, Serialize};

use crate::geology::{CostCategory, GeoProfile};

/// Qualitative label for a package's resolving power.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QualityTag {
    Reconnaissance,
    Standard,
    High,
    FastTrack,
}

/// How well a package resolves each aspect of the subsurface, [0,1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InterpretationSensitivity {
    pub structural_clarity: f64,
    pub amplitude_confidence: f64,
    pub fault_resolution: f64,
    pub depth_accuracy: f64,
}

/// Deliverable line item that unlocks direct-hydrocarbon-indicator analysis.
pub const DHI_DELIVERABLE: &str = "Direct hydrocarbon indicators";

/// Static description of a seismic acquisition package.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PackageSpec {
    pub name: &'static str,
    pub acquisition_cost: f64,
    pub processing_cost: f64,
    pub quality: QualityTag,
    /// Contribution to the combined discovery probability.
    pub quality_score: f64,
    pub sensitivity: InterpretationSensitivity,
    pub deliverables: &'static [&'static str],
    pub acquisition_days: u32,
}

impl PackageSpec {
    /// Whether the processing scope can produce DHI analysis at all.
    pub fn supports_dhi(&self) -> bool {
        self.deliverables.contains(&DHI_DELIVERABLE)
    }
}

/// Seismic acquisition package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeismicPackage {
    /// Sparse regional 2D grid.
    Regional2d,
    /// Full-fold 3D volume, standard processing.
    Standard3d,
    /// High-density 3D with pre-stack depth migration.
    HighRes3d,
    /// Reduced-scope reconnaissance shoot used when relocating.
    FastTrack2d,
}

impl SeismicPackage {
    pub const ALL: [SeismicPackage; 4] = [
        SeismicPackage::Regional2d,
        SeismicPackage::Standard3d,
        SeismicPackage::HighRes3d,
        SeismicPackage::FastTrack2d,
    ];

    pub fn spec(&self) -> &'static PackageSpec {
        match self {
            SeismicPackage::Regional2d => &REGIONAL_2D,
            SeismicPackage::Standard3d => &STANDARD_3D,
            SeismicPackage::HighRes3d => &HIGH_RES_3D,
            SeismicPackage::FastTrack2d => &FAST_TRACK_2D,
        }
    }
}

static REGIONAL_2D: PackageSpec = PackageSpec {
    name: "Regional 2D grid",
    acquisition_cost: 2_800_000.0,
    processing_cost: 1_200_000.0,
    quality: QualityTag::Reconnaissance,
    quality_score: 0.08,
    sensitivity: InterpretationSensitivity {
        structural_clarity: 0.45,
        amplitude_confidence: 0.25,
        fault_resolution: 0.30,
        depth_accuracy: 0.40,
    },
    deliverables: &["Time-migrated sections", "Regional structure maps"],
    acquisition_days: 45,
};

static STANDARD_3D: PackageSpec = PackageSpec {
    name: "Standard 3D volume",
    acquisition_cost: 6_500_000.0,
    processing_cost: 3_000_000.0,
    quality: QualityTag::Standard,
    quality_score: 0.15,
    sensitivity: InterpretationSensitivity {
        structural_clarity: 0.70,
        amplitude_confidence: 0.55,
        fault_resolution: 0.60,
        depth_accuracy: 0.65,
    },
    deliverables: &[
        "Depth-converted volume",
        "Horizon and fault interpretation",
        DHI_DELIVERABLE,
    ],
    acquisition_days: 75,
};

static HIGH_RES_3D: PackageSpec = PackageSpec {
    name: "High-resolution 3D",
    acquisition_cost: 11_000_000.0,
    processing_cost: 5_000_000.0,
    quality: QualityTag::High,
    quality_score: 0.22,
    sensitivity: InterpretationSensitivity {
        structural_clarity: 0.85,
        amplitude_confidence: 0.75,
        fault_resolution: 0.80,
        depth_accuracy: 0.85,
    },
    deliverables: &[
        "Pre-stack depth migration",
        "Horizon and fault interpretation",
        "Quantitative amplitude analysis",
        DHI_DELIVERABLE,
    ],
    acquisition_days: 110,
};

static FAST_TRACK_2D: PackageSpec = PackageSpec {
    name: "Fast-track 2D reconnaissance",
    acquisition_cost: 1_800_000.0,
    processing_cost: 700_000.0,
    quality: QualityTag::FastTrack,
    quality_score: 0.05,
    sensitivity: InterpretationSensitivity {
        structural_clarity: 0.35,
        amplitude_confidence: 0.20,
        fault_resolution: 0.25,
        depth_accuracy: 0.30,
    },
    deliverables: &["Brute-stack sections"],
    acquisition_days: 20,
};

/// Static description of a survey contractor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContractorSpec {
    pub name: &'static str,
    pub day_rate: f64,
    pub mobilization_cost: f64,
    /// Additive adjustment to the package quality score. Can be negative.
    pub quality_modifier: f64,
}

/// Seismic acquisition contractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeismicContractor {
    /// Mid-tier crew, reliable turnaround.
    PetroServ,
    /// Premium crew with proprietary broadband source.
    MeridianGeo,
    /// Budget crew; older equipment costs some fidelity.
    NordicSurvey,
}

impl SeismicContractor {
    pub const ALL: [SeismicContractor; 3] = [
        SeismicContractor::PetroServ,
        SeismicContractor::MeridianGeo,
        SeismicContractor::NordicSurvey,
    ];

    pub fn spec(&self) -> &'static ContractorSpec {
        match self {
            SeismicContractor::PetroServ => &PETRO_SERV,
            SeismicContractor::MeridianGeo => &MERIDIAN_GEO,
            SeismicContractor::NordicSurvey => &NORDIC_SURVEY,
        }
    }
}

static PETRO_SERV: ContractorSpec = ContractorSpec {
    name: "PetroServ",
    day_rate: 85_000.0,
    mobilization_cost: 1_200_000.0,
    quality_modifier: 0.02,
};

static MERIDIAN_GEO: ContractorSpec = ContractorSpec {
    name: "Meridian Geophysical",
    day_rate: 120_000.0,
    mobilization_cost: 2_000_000.0,
    quality_modifier: 0.05,
};

static NORDIC_SURVEY: ContractorSpec = ContractorSpec {
    name: "Nordic Survey Partners",
    day_rate: 60_000.0,
    mobilization_cost: 800_000.0,
    quality_modifier: -0.03,
};

/// Total cost of shooting and processing a survey in a given area.
///
/// The geographic seismic multiplier applies to the package scope; the
/// contractor's mobilization and day rate are charged as quoted.
pub fn program_cost(
    package: SeismicPackage,
    contractor: SeismicContractor,
    geo: &GeoProfile,
) -> f64 {
    let pkg = package.spec();
    let con = contractor.spec();
    let scope = (pkg.acquisition_cost + pkg.processing_cost) * geo.multiplier(CostCategory::Seismic);
    scope + con.mobilization_cost + con.day_rate * pkg.acquisition_days as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geology::AreaType;

    #[test]
    fn test_sensitivities_within_unit_interval() {
        for pkg in SeismicPackage::ALL {
            let s = pkg.spec().sensitivity;
            for v in [
                s.structural_clarity,
                s.amplitude_confidence,
                s.fault_resolution,
                s.depth_accuracy,
            ] {
                assert!((0.0..=1.0).contains(&v), "{}: {}", pkg.spec().name, v);
            }
        }
    }

    #[test]
    fn test_dhi_support() {
        assert!(!SeismicPackage::Regional2d.spec().supports_dhi());
        assert!(SeismicPackage::Standard3d.spec().supports_dhi());
        assert!(SeismicPackage::HighRes3d.spec().supports_dhi());
        assert!(!SeismicPackage::FastTrack2d.spec().supports_dhi());
    }

    #[test]
    fn test_program_cost_baseline_area() {
        // Proven Basin multiplier is 1.0, so the cost is the plain sum.
        let cost = program_cost(
            SeismicPackage::Standard3d,
            SeismicContractor::PetroServ,
            AreaType::ProvenBasin.profile(),
        );
        let expected = 6_500_000.0 + 3_000_000.0 + 1_200_000.0 + 85_000.0 * 75.0;
        assert!((cost - expected).abs() < 1e-6);
    }

    #[test]
    fn test_program_cost_scales_scope_only() {
        let geo = AreaType::Deepwater.profile();
        let cost = program_cost(
            SeismicPackage::Regional2d,
            SeismicContractor::NordicSurvey,
            geo,
        );
        let scope = (2_800_000.0 + 1_200_000.0) * geo.seismic_multiplier;
        let expected = scope + 800_000.0 + 60_000.0 * 45.0;
        assert!((cost - expected).abs() < 1e-6);
    }

    #[test]
    fn test_contractor_modifier_can_be_negative() {
        assert!(SeismicContractor::NordicSurvey.spec().quality_modifier < 0.0);
    }
}
