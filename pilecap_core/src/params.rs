//! # Design Parameters and Footing Plan
//!
//! Material, geometry, and site inputs for one pile cap, plus the two ways the
//! footing plan size can be obtained.
//!
//! ## Two Plan Derivations
//!
//! | Source | Size | Feeds |
//! |--------|------|-------|
//! | [`PlanSource::OverhangDerived`] | column + 2 × overhang | pile-force envelope weights, flexural check |
//! | [`PlanSource::CallerSupplied`] | explicit length × width | footing weights/section, reinforcement, shear |
//!
//! The two are never merged. [`plan_discrepancy`] reports when they differ by
//! more than a tolerance so the engineer can see which size drove which check.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Material, geometry, and site inputs for a pile cap.
///
/// Units follow the published input form: plan dimensions, elevations, and
/// thicknesses in feet; cover, bar sizes, pile size, and embedment in inches;
/// strengths in ksi; unit weights in kcf; resistances in kips.
///
/// ## JSON Example
///
/// ```json
/// {
///   "fc": 5.5, "fy": 60.0, "cover": 4.5,
///   "col_x_dim": 9.0, "col_y_dim": 16.0,
///   "footing_thickness": 9.0, "pile_overhang": 1.625,
///   "ground_elev": 73.4, "footing_top_elev": 70.4, "water_elev": 68.0,
///   "soil_weight": 0.115, "seal_thickness": 0.0
/// }
/// ```
///
/// Omitted fields take their [`Default`] values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignParameters {
    /// Concrete compressive strength f'c (ksi)
    pub fc: f64,
    /// Reinforcement yield strength fy (ksi)
    pub fy: f64,
    /// Clear cover to bottom bars (in)
    pub cover: f64,
    /// Column plan dimension along x (ft)
    pub col_x_dim: f64,
    /// Column plan dimension along y (ft)
    pub col_y_dim: f64,
    /// Column centroid offset from the pile-group centroid along x (ft)
    pub ecc_x: f64,
    /// Column centroid offset from the pile-group centroid along y (ft)
    pub ecc_y: f64,
    /// Footing thickness (ft)
    pub footing_thickness: f64,
    /// Pile embedment into the footing (in)
    pub pile_embedment: f64,
    /// Distance from column face to footing edge (ft)
    pub pile_overhang: f64,
    /// Ground surface elevation (ft)
    pub ground_elev: f64,
    /// Top of footing elevation (ft)
    pub footing_top_elev: f64,
    /// Water table elevation (ft)
    pub water_elev: f64,
    /// Soil unit weight (kcf)
    pub soil_weight: f64,
    /// Seal course thickness (ft)
    pub seal_thickness: f64,
    /// Pile size used for punching perimeter and flexural depth (in)
    pub pile_size: f64,
    /// Pile diameter used for the horizontal-force lever arm (in)
    pub pile_diameter: f64,
    /// Longitudinal bottom bar diameter (in)
    pub bar_size_long: f64,
    /// Transverse bottom bar diameter (in)
    pub bar_size_trans: f64,
    /// Footing plan centroid offset from the pile-group centroid along x (ft)
    pub footing_offset_x: f64,
    /// Footing plan centroid offset from the pile-group centroid along y (ft)
    pub footing_offset_y: f64,
    /// Maximum pile driving resistance (kips)
    pub max_pile_driving_resistance: f64,
    /// Boring log the pile resistances come from
    pub boring: String,
    /// Pile tip elevation (ft)
    pub pile_tip_elevation: f64,
    /// Nominal pile bearing resistance R_n (kips)
    pub nominal_pile_bearing_capacity: f64,
    /// Ultimate soil side friction R_s available to resist uplift (kips)
    pub soil_ultimate_side_friction: f64,
    /// Resistance factor for compression
    pub comp_reduction_factor: f64,
    /// Resistance factor for uplift
    pub uplift_reduction_factor: f64,
}

impl Default for DesignParameters {
    fn default() -> Self {
        DesignParameters {
            fc: 5.5,
            fy: 60.0,
            cover: 4.5,
            col_x_dim: 9.0,
            col_y_dim: 16.0,
            ecc_x: 0.0,
            ecc_y: 0.0,
            footing_thickness: 9.0,
            pile_embedment: 12.0,
            pile_overhang: 1.625,
            ground_elev: 73.4,
            footing_top_elev: 70.4,
            water_elev: 68.0,
            soil_weight: 0.115,
            seal_thickness: 0.0,
            pile_size: 15.0,
            pile_diameter: 12.0,
            bar_size_long: 1.0,
            bar_size_trans: 1.0,
            footing_offset_x: 0.0,
            footing_offset_y: 0.0,
            max_pile_driving_resistance: 225.0,
            boring: "P41-1".to_string(),
            pile_tip_elevation: -8.4,
            nominal_pile_bearing_capacity: 225.0,
            soil_ultimate_side_friction: 100.0,
            comp_reduction_factor: 0.75,
            uplift_reduction_factor: 0.6,
        }
    }
}

impl DesignParameters {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        positive("fc", self.fc)?;
        positive("fy", self.fy)?;
        non_negative("cover", self.cover)?;
        non_negative("col_x_dim", self.col_x_dim)?;
        non_negative("col_y_dim", self.col_y_dim)?;
        non_negative("footing_thickness", self.footing_thickness)?;
        non_negative("pile_embedment", self.pile_embedment)?;
        non_negative("pile_overhang", self.pile_overhang)?;
        non_negative("soil_weight", self.soil_weight)?;
        non_negative("seal_thickness", self.seal_thickness)?;
        non_negative("pile_size", self.pile_size)?;
        non_negative("pile_diameter", self.pile_diameter)?;
        non_negative("bar_size_long", self.bar_size_long)?;
        non_negative("bar_size_trans", self.bar_size_trans)?;
        non_negative("nominal_pile_bearing_capacity", self.nominal_pile_bearing_capacity)?;
        non_negative("soil_ultimate_side_friction", self.soil_ultimate_side_friction)?;
        for (field, value) in [
            ("ecc_x", self.ecc_x),
            ("ecc_y", self.ecc_y),
            ("ground_elev", self.ground_elev),
            ("footing_top_elev", self.footing_top_elev),
            ("water_elev", self.water_elev),
            ("footing_offset_x", self.footing_offset_x),
            ("footing_offset_y", self.footing_offset_y),
            ("pile_tip_elevation", self.pile_tip_elevation),
        ] {
            if !value.is_finite() {
                return Err(CalcError::invalid_input(field, value.to_string(), "Value must be finite"));
            }
        }
        for (field, value) in [
            ("comp_reduction_factor", self.comp_reduction_factor),
            ("uplift_reduction_factor", self.uplift_reduction_factor),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(CalcError::invalid_input(field, value.to_string(), "Resistance factor must be between 0 and 1"));
            }
        }
        Ok(())
    }

    /// Footing plan sized from the column plus the overhang on each side.
    pub fn overhang_plan(&self) -> FootingPlan {
        FootingPlan {
            length_ft: self.col_x_dim + 2.0 * self.pile_overhang,
            width_ft: self.col_y_dim + 2.0 * self.pile_overhang,
            source: PlanSource::OverhangDerived,
        }
    }

    /// Pile diameter in feet
    pub fn pile_diameter_ft(&self) -> f64 {
        self.pile_diameter / 12.0
    }

    /// Pile size in feet
    pub fn pile_size_ft(&self) -> f64 {
        self.pile_size / 12.0
    }
}

fn positive(field: &str, value: f64) -> CalcResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CalcError::invalid_input(field, value.to_string(), "Must be a positive number"));
    }
    Ok(())
}

fn non_negative(field: &str, value: f64) -> CalcResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(CalcError::invalid_input(field, value.to_string(), "Cannot be negative"));
    }
    Ok(())
}

/// Caller-supplied footing plan dimensions (ft).
///
/// `length_ft` runs along x, `width_ft` along y.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FootingDimensions {
    pub length_ft: f64,
    pub width_ft: f64,
}

impl Default for FootingDimensions {
    fn default() -> Self {
        FootingDimensions {
            length_ft: 40.0,
            width_ft: 24.0,
        }
    }
}

impl FootingDimensions {
    /// Validate the plan size.
    pub fn validate(&self) -> CalcResult<()> {
        positive("footing_length", self.length_ft)?;
        positive("footing_width", self.width_ft)?;
        Ok(())
    }

    /// Plan area (ft²)
    pub fn area_ft2(&self) -> f64 {
        self.length_ft * self.width_ft
    }

    /// Tag these dimensions as a caller-supplied plan
    pub fn plan(&self) -> FootingPlan {
        FootingPlan {
            length_ft: self.length_ft,
            width_ft: self.width_ft,
            source: PlanSource::CallerSupplied,
        }
    }
}

/// Where a footing plan size came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlanSource {
    /// Column dimension plus twice the pile overhang
    OverhangDerived,
    /// Length and width entered by the caller
    CallerSupplied,
}

impl PlanSource {
    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            PlanSource::OverhangDerived => "column + 2 x overhang",
            PlanSource::CallerSupplied => "caller-supplied length x width",
        }
    }
}

/// A footing plan size with its provenance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FootingPlan {
    /// Plan dimension along x (ft)
    pub length_ft: f64,
    /// Plan dimension along y (ft)
    pub width_ft: f64,
    /// Which derivation produced this size
    pub source: PlanSource,
}

impl FootingPlan {
    /// Plan area (ft²)
    pub fn area_ft2(&self) -> f64 {
        self.length_ft * self.width_ft
    }
}

/// Disagreement between the overhang-derived and caller-supplied plans.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanDiscrepancy {
    pub overhang_plan: FootingPlan,
    pub supplied_plan: FootingPlan,
    /// Supplied minus derived length (ft)
    pub length_difference_ft: f64,
    /// Supplied minus derived width (ft)
    pub width_difference_ft: f64,
    pub tolerance_ft: f64,
}

impl std::fmt::Display for PlanDiscrepancy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "footing plan mismatch: {:.2} x {:.2} ft ({}) feeds pile forces and flexure, \
             {:.2} x {:.2} ft ({}) feeds weights, reinforcement and shear (tolerance {:.2} ft)",
            self.overhang_plan.length_ft,
            self.overhang_plan.width_ft,
            self.overhang_plan.source.display_name(),
            self.supplied_plan.length_ft,
            self.supplied_plan.width_ft,
            self.supplied_plan.source.display_name(),
            self.tolerance_ft,
        )
    }
}

/// Compare the two plan derivations.
///
/// Returns `Some` when either dimension differs by more than `tolerance_ft`.
pub fn plan_discrepancy(params: &DesignParameters, dims: &FootingDimensions, tolerance_ft: f64) -> Option<PlanDiscrepancy> {
    let overhang_plan = params.overhang_plan();
    let supplied_plan = dims.plan();
    let length_difference_ft = supplied_plan.length_ft - overhang_plan.length_ft;
    let width_difference_ft = supplied_plan.width_ft - overhang_plan.width_ft;

    if length_difference_ft.abs() > tolerance_ft || width_difference_ft.abs() > tolerance_ft {
        Some(PlanDiscrepancy {
            overhang_plan,
            supplied_plan,
            length_difference_ft,
            width_difference_ft,
            tolerance_ft,
        })
    } else {
        None
    }
}
