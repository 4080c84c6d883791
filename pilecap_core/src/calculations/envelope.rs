//! # Pile Force Envelope
//!
//! Rigid-cap elastic distribution of column loads to the piles, and the
//! per-pile governing maximum and minimum across all load cases.
//!
//! ## Method
//!
//! For each load case the column reactions are moved to the pile-group
//! centroid and the footing, soil, and water weights are added:
//!
//! ```text
//! Fz' = fz + (W_footing + W_soil,axial - W_water) × dc
//! Mx' = mx - fy(t - d_pile) + fz(y_col - ȳ) + W_m × dc × (y_ftg - ȳ)
//! My' = my + fx(t - d_pile) + fz(x̄ - x_col) + W_m × dc × (x̄ - x_ftg)
//! W_m = W_footing - W_water + W_soil,moment
//! ```
//!
//! and each pile takes
//!
//! ```text
//! P = Fz'/n + Mx'(y - ȳ)/Ix + My'(x - x̄)/Iy
//! ```
//!
//! An inertia term is zero when its denominator is zero (collinear groups).
//!
//! Weights use the overhang-derived plan (column + 2 × overhang). For
//! strength-level cases (dc > 1) the soil weight is rescaled from the 1.25
//! factor already carried by dc to 1.30 (axial) and 1.35 (moment).
//!
//! ## Example
//!
//! ```rust
//! use pilecap_core::calculations::envelope::compute_pile_envelope;
//! use pilecap_core::geometry::{generate_piles, LayoutMode};
//! use pilecap_core::loads::LoadCase;
//! use pilecap_core::params::DesignParameters;
//!
//! let piles = generate_piles(2, 8.0, 2, 8.0, LayoutMode::Centered).unwrap();
//! let cases = vec![LoadCase::new("Service I").with_fz(1000.0)];
//! let params = DesignParameters {
//!     footing_thickness: 0.0,
//!     soil_weight: 0.0,
//!     water_elev: 100.0,
//!     ..Default::default()
//! };
//!
//! let envelope = compute_pile_envelope(&piles, &cases, &params);
//! let forces = envelope[0].forces.as_ref().unwrap();
//! assert!((forces.max.value - 250.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use crate::geometry::{GroupProperties, PileCoordinate};
use crate::loads::LoadCase;
use crate::params::{DesignParameters, FootingPlan};
use crate::units::{Feet, SqFt, CONCRETE_UNIT_WEIGHT, WATER_UNIT_WEIGHT};

/// Soil-weight rescale applied to the axial term of strength-level cases (1.30/1.25)
pub const SOIL_AXIAL_STRENGTH_RATIO: f64 = 1.30 / 1.25;

/// Soil-weight rescale applied to the moment weight term of strength-level cases (1.35/1.25)
pub const SOIL_MOMENT_STRENGTH_RATIO: f64 = 1.35 / 1.25;

// ============================================================================
// Result Types
// ============================================================================

/// The three contributions that make up a pile force.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ForceComponents {
    /// Fz'/n (kips)
    pub axial: f64,
    /// Mx'(y - ȳ)/Ix (kips)
    pub moment_x: f64,
    /// My'(x - x̄)/Iy (kips)
    pub moment_y: f64,
}

impl ForceComponents {
    /// Total pile force
    pub fn total(&self) -> f64 {
        self.axial + self.moment_x + self.moment_y
    }
}

/// Pile force under one load case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseForce {
    pub load_case: String,
    /// Pile force, positive in compression (kips)
    pub force: f64,
    pub components: ForceComponents,
}

/// The governing force on a pile and the case that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoverningForce {
    pub load_case: String,
    pub value: f64,
    pub components: ForceComponents,
}

impl From<&CaseForce> for GoverningForce {
    fn from(case: &CaseForce) -> Self {
        GoverningForce {
            load_case: case.load_case.clone(),
            value: case.force,
            components: case.components,
        }
    }
}

/// Forces on one pile across every load case.
///
/// ## JSON Example
///
/// ```json
/// {
///   "cases": [
///     { "load_case": "Fz Maximum", "force": 812.4,
///       "components": { "axial": 701.3, "moment_x": 60.1, "moment_y": 51.0 } }
///   ],
///   "max": { "load_case": "Fz Maximum", "value": 812.4, "components": { "axial": 701.3, "moment_x": 60.1, "moment_y": 51.0 } },
///   "min": { "load_case": "Fz Maximum", "value": 812.4, "components": { "axial": 701.3, "moment_x": 60.1, "moment_y": 51.0 } }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PileForces {
    /// One entry per load case, in caller order
    pub cases: Vec<CaseForce>,
    /// Pmax
    pub max: GoverningForce,
    /// Pmin
    pub min: GoverningForce,
}

/// A pile coordinate with its force envelope attached alongside.
///
/// `forces` is `None` when there were no load cases to analyze.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PileEnvelopeEntry {
    pub pile: PileCoordinate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forces: Option<PileForces>,
}

impl PileEnvelopeEntry {
    /// Pmax, or 0 when the pile carries no forces
    pub fn pmax(&self) -> f64 {
        self.forces.as_ref().map_or(0.0, |f| f.max.value)
    }

    /// Pmin, or 0 when the pile carries no forces
    pub fn pmin(&self) -> f64 {
        self.forces.as_ref().map_or(0.0, |f| f.min.value)
    }
}

/// Footing weights used by the envelope, all on the overhang-derived plan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvelopeWeights {
    pub plan: FootingPlan,
    /// Concrete footing weight (kips)
    pub footing: f64,
    /// Soil above the footing (kips)
    pub soil: f64,
    /// Buoyancy of the submerged footing (kips)
    pub water: f64,
}

impl EnvelopeWeights {
    /// Compute the weights for a set of parameters.
    pub fn from_params(params: &DesignParameters) -> Self {
        let plan = params.overhang_plan();
        let area = SqFt(plan.area_ft2());
        let soil_depth = (params.ground_elev - params.footing_top_elev - params.footing_thickness).max(0.0);
        let water_depth = (params.footing_top_elev - params.water_elev).max(0.0);

        EnvelopeWeights {
            plan,
            footing: CONCRETE_UNIT_WEIGHT.weight_of(area, Feet(params.footing_thickness)).value(),
            soil: params.soil_weight * area.0 * soil_depth,
            water: WATER_UNIT_WEIGHT.weight_of(area, Feet(water_depth)).value(),
        }
    }
}

/// Column loads moved to the pile-group centroid for one load case.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdjustedLoads {
    /// Fz' (kips)
    pub fz: f64,
    /// Mx' (kip-ft)
    pub mx: f64,
    /// My' (kip-ft)
    pub my: f64,
}

impl AdjustedLoads {
    /// Adjust one load case for the weights and the column/footing eccentricities.
    pub fn for_case(case: &LoadCase, params: &DesignParameters, group: &GroupProperties, weights: &EnvelopeWeights) -> Self {
        let dc = case.dc_factor;
        let (soil_axial, soil_moment) = if case.is_strength_level() {
            (weights.soil * SOIL_AXIAL_STRENGTH_RATIO, weights.soil * SOIL_MOMENT_STRENGTH_RATIO)
        } else {
            (weights.soil, weights.soil)
        };

        let col_x = group.centroid_x + params.ecc_x;
        let col_y = group.centroid_y + params.ecc_y;
        let ftg_x = group.centroid_x + params.footing_offset_x;
        let ftg_y = group.centroid_y + params.footing_offset_y;

        let lever = params.footing_thickness - params.pile_diameter_ft();
        let w_moment = weights.footing - weights.water + soil_moment;

        AdjustedLoads {
            fz: case.fz + (weights.footing + soil_axial - weights.water) * dc,
            mx: case.mx - case.fy * lever
                + case.fz * (col_y - group.centroid_y)
                + w_moment * dc * (ftg_y - group.centroid_y),
            my: case.my + case.fx * lever
                + case.fz * (group.centroid_x - col_x)
                + w_moment * dc * (group.centroid_x - ftg_x),
        }
    }

    /// Distribute to one pile.
    pub fn distribute(&self, pile: &PileCoordinate, group: &GroupProperties) -> ForceComponents {
        let moment_x = if group.ix == 0.0 {
            0.0
        } else {
            self.mx * (pile.y_ft - group.centroid_y) / group.ix
        };
        let moment_y = if group.iy == 0.0 {
            0.0
        } else {
            self.my * (pile.x_ft - group.centroid_x) / group.iy
        };
        ForceComponents {
            axial: self.fz / group.count as f64,
            moment_x,
            moment_y,
        }
    }
}

// ============================================================================
// Calculation
// ============================================================================

/// Compute the force envelope for every pile.
///
/// Returns the piles in input order, each with its forces attached. When
/// either input is empty the piles come back with no forces.
///
/// Pmax/Pmin use strict comparisons, so ties go to the first case in
/// `load_cases` order.
pub fn compute_pile_envelope(piles: &[PileCoordinate], load_cases: &[LoadCase], params: &DesignParameters) -> Vec<PileEnvelopeEntry> {
    let group = match GroupProperties::from_piles(piles) {
        Some(group) if !load_cases.is_empty() => group,
        _ => {
            tracing::debug!(piles = piles.len(), cases = load_cases.len(), "nothing to distribute");
            return piles
                .iter()
                .map(|&pile| PileEnvelopeEntry { pile, forces: None })
                .collect();
        }
    };

    let weights = EnvelopeWeights::from_params(params);
    let adjusted: Vec<(&LoadCase, AdjustedLoads)> = load_cases
        .iter()
        .map(|case| (case, AdjustedLoads::for_case(case, params, &group, &weights)))
        .collect();

    tracing::debug!(
        piles = group.count,
        cases = load_cases.len(),
        footing = weights.footing,
        soil = weights.soil,
        water = weights.water,
        "computing pile force envelope"
    );

    piles
        .iter()
        .map(|&pile| {
            let cases: Vec<CaseForce> = adjusted
                .iter()
                .map(|(case, loads)| {
                    let components = loads.distribute(&pile, &group);
                    CaseForce {
                        load_case: case.name.clone(),
                        force: components.total(),
                        components,
                    }
                })
                .collect();
            PileEnvelopeEntry {
                pile,
                forces: governing(cases),
            }
        })
        .collect()
}

fn governing(cases: Vec<CaseForce>) -> Option<PileForces> {
    let first = cases.first()?;
    let mut max = first;
    let mut min = first;
    for case in &cases[1..] {
        if case.force > max.force {
            max = case;
        }
        if case.force < min.force {
            min = case;
        }
    }
    let (max, min) = (GoverningForce::from(max), GoverningForce::from(min));
    Some(PileForces { cases, max, min })
}
