//! # Pile Cap Design
//!
//! Runs the full design pipeline for one pile cap:
//!
//! ```text
//! grid → envelope → footing → {flexure → reinforcement} + {shear}
//!                           → pile resistance → critical-section sums
//! ```
//!
//! Load cases come from an injected [`LoadCaseRepository`]; nothing here
//! reads a shared "current" list. Non-fatal findings (plan mismatch, failed
//! checks, resistance exceedances) are collected as [`DesignWarning`]s on the
//! report. Fatal problems (bad geometry, inadequate flexural section) are
//! returned as errors.
//!
//! ## Example
//!
//! ```rust
//! use pilecap_core::calculations::pile_cap::{design_pile_cap, PileCapInput};
//! use pilecap_core::loads::DefaultLoadCases;
//! use pilecap_core::project::GlobalSettings;
//!
//! let input = PileCapInput::new("PC-1");
//! let report = design_pile_cap(&input, &DefaultLoadCases, &GlobalSettings::default()).unwrap();
//!
//! assert_eq!(report.piles.len(), 12);
//! assert_eq!(report.load_case_count, 11);
//! ```

use serde::{Deserialize, Serialize};

use super::critical_sections::{critical_section_sums, CriticalSections};
use super::envelope::{compute_pile_envelope, EnvelopeWeights, PileEnvelopeEntry};
use super::flexure::{flexural_check, FlexuralResult};
use super::footing::{FootingGeometry, FoundationSummary};
use super::pile_capacity::{check_pile_resistance, PileResistanceCheck};
use super::reinforcement::{size_reinforcement, ReinforcementResult};
use super::shear::{shear_checks, OneWayStatus, ShearChecks};
use crate::errors::CalcResult;
use crate::geometry::PileGrid;
use crate::loads::{validate_load_cases, InMemoryLoadCases, LoadCase, LoadCaseRepository};
use crate::params::{plan_discrepancy, DesignParameters, FootingDimensions, PlanDiscrepancy};
use crate::project::GlobalSettings;

/// Input for one pile cap design.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Pier 3 Footing",
///   "grid": { "n_x": 4, "s_x": 8.0, "n_y": 3, "s_y": 8.0 },
///   "params": { "fc": 5.5, "footing_thickness": 9.0 },
///   "footing": { "length_ft": 40.0, "width_ft": 24.0 },
///   "load_cases": [
///     { "name": "Strength I", "dc_factor": 1.25, "fz": 9500.0, "mx": 12000.0 }
///   ]
/// }
/// ```
///
/// An empty `load_cases` list means "use the published defaults".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PileCapInput {
    /// User label (e.g., "Pier 3 Footing")
    pub label: String,

    /// Pile layout
    #[serde(default)]
    pub grid: PileGrid,

    /// Materials, geometry and site data
    #[serde(default)]
    pub params: DesignParameters,

    /// Caller-supplied footing plan
    #[serde(default)]
    pub footing: FootingDimensions,

    /// Column-base load cases for this cap
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub load_cases: Vec<LoadCase>,
}

impl PileCapInput {
    /// Create an input with the default grid, parameters and footing.
    pub fn new(label: impl Into<String>) -> Self {
        PileCapInput {
            label: label.into(),
            grid: PileGrid::default(),
            params: DesignParameters::default(),
            footing: FootingDimensions::default(),
            load_cases: Vec::new(),
        }
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        self.params.validate()?;
        self.footing.validate()?;
        validate_load_cases(&self.load_cases)?;
        Ok(())
    }

    /// Repository over this item's cases, falling back to the defaults.
    pub fn load_case_repository(&self) -> InMemoryLoadCases {
        InMemoryLoadCases::with_cases(self.load_cases.clone())
    }
}

/// A non-fatal design finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum DesignWarning {
    /// The two footing plan derivations disagree
    PlanDiscrepancy(PlanDiscrepancy),
    /// The repository yielded no load cases; forces are all zero
    NoLoadCases,
    /// One-way shear capacity does not exceed the demand
    OneWayShearInadequate { ratio: f64 },
    /// Punching capacity at the worst corner pile does not exceed the demand
    PunchingShearFails { demand_capacity_ratio: f64 },
    /// Largest Pmax exceeds φc × Rn
    PileCompressionExceeded { demand: f64, capacity: f64 },
    /// Largest uplift exceeds φu × Rs
    PileUpliftExceeded { demand: f64, capacity: f64 },
    /// Rn is above what the pile can be driven to
    DrivingResistanceExceeded { nominal: f64, driving: f64 },
}

impl std::fmt::Display for DesignWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DesignWarning::PlanDiscrepancy(d) => write!(f, "{}", d),
            DesignWarning::NoLoadCases => write!(f, "no load cases supplied; pile forces are zero"),
            DesignWarning::OneWayShearInadequate { ratio } => {
                write!(f, "one-way shear inadequate: φVc/Vu = {:.3}", ratio)
            }
            DesignWarning::PunchingShearFails { demand_capacity_ratio } => {
                write!(f, "punching shear fails at corner pile: Vu/φVn = {:.3}", demand_capacity_ratio)
            }
            DesignWarning::PileCompressionExceeded { demand, capacity } => {
                write!(f, "pile compression {:.1} k exceeds factored resistance {:.1} k", demand, capacity)
            }
            DesignWarning::PileUpliftExceeded { demand, capacity } => {
                write!(f, "pile uplift {:.1} k exceeds factored side friction {:.1} k", demand, capacity)
            }
            DesignWarning::DrivingResistanceExceeded { nominal, driving } => {
                write!(f, "nominal bearing {:.1} k exceeds maximum driving resistance {:.1} k", nominal, driving)
            }
        }
    }
}

/// Everything the pipeline produced for one pile cap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PileCapReport {
    pub label: String,
    /// Number of load cases analyzed
    pub load_case_count: usize,
    /// Piles with their force envelopes
    pub piles: Vec<PileEnvelopeEntry>,
    /// Weights on the overhang-derived plan used by the envelope
    pub envelope_weights: EnvelopeWeights,
    pub summary: FoundationSummary,
    /// Section properties on the caller-supplied plan
    pub footing: FootingGeometry,
    pub flexural: FlexuralResult,
    pub reinforcement: ReinforcementResult,
    pub shear: ShearChecks,
    pub resistance: PileResistanceCheck,
    pub critical_sections: CriticalSections,
    pub warnings: Vec<DesignWarning>,
}

impl PileCapReport {
    /// Shear checks and pile resistance all satisfied
    pub fn passes(&self) -> bool {
        self.shear.one_way.status == OneWayStatus::Adequate && self.shear.punching.status.passed() && self.resistance.passes()
    }
}

/// Design one pile cap.
///
/// # Errors
///
/// - `CalcError::InvalidInput` for bad parameters or load cases
/// - `CalcError::InvalidGeometry` for a bad pile grid
/// - `CalcError::DegenerateGeometry` when a section has no depth
/// - `CalcError::ReinforcementUnderflow` when the footing cannot develop the moment
pub fn design_pile_cap(input: &PileCapInput, repository: &dyn LoadCaseRepository, settings: &GlobalSettings) -> CalcResult<PileCapReport> {
    input.params.validate()?;
    input.footing.validate()?;

    let load_cases = repository.load_cases();
    validate_load_cases(&load_cases)?;

    let span = tracing::debug_span!("design_pile_cap", label = %input.label);
    let _guard = span.enter();

    let params = &input.params;
    let mut warnings = Vec::new();

    if let Some(discrepancy) = plan_discrepancy(params, &input.footing, settings.plan_tolerance_ft) {
        tracing::warn!(
            derived_length = discrepancy.overhang_plan.length_ft,
            derived_width = discrepancy.overhang_plan.width_ft,
            supplied_length = discrepancy.supplied_plan.length_ft,
            supplied_width = discrepancy.supplied_plan.width_ft,
            "footing plan derivations disagree"
        );
        warnings.push(DesignWarning::PlanDiscrepancy(discrepancy));
    }
    if load_cases.is_empty() {
        warnings.push(DesignWarning::NoLoadCases);
    }

    let coordinates = input.grid.generate()?;
    let piles = compute_pile_envelope(&coordinates, &load_cases, params);
    let envelope_weights = EnvelopeWeights::from_params(params);

    let summary = FoundationSummary::new(params);
    let footing = FootingGeometry::new(params, &input.footing);

    let flexural = flexural_check(&piles, params)?;
    let reinforcement = size_reinforcement(&flexural, params, &input.footing)?;
    let shear = shear_checks(&piles, params, &input.footing)?;
    let resistance = check_pile_resistance(&piles, params);
    let critical_sections = critical_section_sums(&piles, params, &footing)?;

    if shear.one_way.status == OneWayStatus::Inadequate {
        warnings.push(DesignWarning::OneWayShearInadequate { ratio: shear.one_way.ratio });
    }
    if !shear.punching.status.passed() {
        warnings.push(DesignWarning::PunchingShearFails {
            demand_capacity_ratio: shear.punching.demand_capacity_ratio,
        });
    }
    if !resistance.compression_ok {
        warnings.push(DesignWarning::PileCompressionExceeded {
            demand: resistance.max_compression,
            capacity: resistance.factored_compression,
        });
    }
    if !resistance.uplift_ok {
        warnings.push(DesignWarning::PileUpliftExceeded {
            demand: resistance.max_uplift,
            capacity: resistance.factored_uplift,
        });
    }
    if resistance.exceeds_driving_resistance {
        warnings.push(DesignWarning::DrivingResistanceExceeded {
            nominal: params.nominal_pile_bearing_capacity,
            driving: params.max_pile_driving_resistance,
        });
    }

    tracing::debug!(piles = piles.len(), warnings = warnings.len(), "pile cap designed");

    Ok(PileCapReport {
        label: input.label.clone(),
        load_case_count: load_cases.len(),
        piles,
        envelope_weights,
        summary,
        footing,
        flexural,
        reinforcement,
        shear,
        resistance,
        critical_sections,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CalcError;
    use crate::loads::DefaultLoadCases;
    use crate::params::PlanSource;

    /// Repository that never yields anything
    struct EmptyRepository;

    impl LoadCaseRepository for EmptyRepository {
        fn load_cases(&self) -> Vec<LoadCase> {
            Vec::new()
        }
    }

    fn matching_plan_input() -> PileCapInput {
        let mut input = PileCapInput::new("PC-1");
        input.footing = FootingDimensions {
            length_ft: 12.25,
            width_ft: 19.25,
        };
        input
    }

    #[test]
    fn test_default_design_runs() {
        let input = PileCapInput::new("PC-1");
        let report = design_pile_cap(&input, &DefaultLoadCases, &GlobalSettings::default()).unwrap();

        assert_eq!(report.label, "PC-1");
        assert_eq!(report.piles.len(), 12);
        assert_eq!(report.load_case_count, 11);
        assert!(report.piles.iter().all(|p| p.forces.as_ref().map(|f| f.cases.len()) == Some(11)));
        assert_eq!(report.flexural.plan.source, PlanSource::OverhangDerived);
        assert_eq!(report.footing.plan.source, PlanSource::CallerSupplied);
        assert_eq!(report.shear.punching.corner_piles, vec![1, 3, 10, 12]);
        assert_eq!(report.critical_sections.sections.len(), 4);
    }

    #[test]
    fn test_default_plans_disagree() {
        let input = PileCapInput::new("PC-1");
        let report = design_pile_cap(&input, &DefaultLoadCases, &GlobalSettings::default()).unwrap();
        assert!(report
            .warnings
            .iter()
            .any(|w| matches!(w, DesignWarning::PlanDiscrepancy(_))));
    }

    #[test]
    fn test_matching_plans_no_discrepancy() {
        let report = design_pile_cap(&matching_plan_input(), &DefaultLoadCases, &GlobalSettings::default()).unwrap();
        assert!(!report
            .warnings
            .iter()
            .any(|w| matches!(w, DesignWarning::PlanDiscrepancy(_))));
    }

    #[test]
    fn test_tolerance_from_settings() {
        let settings = GlobalSettings {
            plan_tolerance_ft: 100.0,
            ..Default::default()
        };
        let report = design_pile_cap(&PileCapInput::new("PC-1"), &DefaultLoadCases, &settings).unwrap();
        assert!(!report
            .warnings
            .iter()
            .any(|w| matches!(w, DesignWarning::PlanDiscrepancy(_))));
    }

    #[test]
    fn test_item_cases_used_through_repository() {
        let mut input = matching_plan_input();
        input.load_cases = vec![LoadCase::new("Only").with_fz(1200.0)];
        let repo = input.load_case_repository();
        let report = design_pile_cap(&input, &repo, &GlobalSettings::default()).unwrap();
        assert_eq!(report.load_case_count, 1);
        let forces = report.piles[0].forces.as_ref().unwrap();
        assert_eq!(forces.max.load_case, "Only");
    }

    #[test]
    fn test_empty_repository_is_not_an_error() {
        let report = design_pile_cap(&matching_plan_input(), &EmptyRepository, &GlobalSettings::default()).unwrap();
        assert_eq!(report.load_case_count, 0);
        assert!(report.piles.iter().all(|p| p.forces.is_none()));
        assert!(report.warnings.contains(&DesignWarning::NoLoadCases));
    }

    #[test]
    fn test_invalid_grid_propagates() {
        let mut input = PileCapInput::new("Bad");
        input.grid.n_x = 0;
        let err = design_pile_cap(&input, &DefaultLoadCases, &GlobalSettings::default()).unwrap_err();
        assert!(matches!(err, CalcError::InvalidGeometry { .. }));
    }

    #[test]
    fn test_degenerate_section_propagates() {
        let mut input = matching_plan_input();
        input.params.footing_thickness = 1.5;
        let err = design_pile_cap(&input, &DefaultLoadCases, &GlobalSettings::default()).unwrap_err();
        assert!(matches!(err, CalcError::DegenerateGeometry { .. }));
    }

    #[test]
    fn test_invalid_load_case_rejected() {
        let mut input = matching_plan_input();
        input.load_cases = vec![LoadCase::new("A"), LoadCase::new("A")];
        let repo = input.load_case_repository();
        let err = design_pile_cap(&input, &repo, &GlobalSettings::default()).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_input_json_defaults() {
        let json = r#"{ "label": "PC-9" }"#;
        let input: PileCapInput = serde_json::from_str(json).unwrap();
        assert_eq!(input, PileCapInput::new("PC-9"));
    }

    #[test]
    fn test_warning_serialization() {
        let warning = DesignWarning::OneWayShearInadequate { ratio: 0.8 };
        let json = serde_json::to_string(&warning).unwrap();
        assert!(json.contains("\"kind\":\"OneWayShearInadequate\""));
        assert!(warning.to_string().contains("0.800"));
    }
}
