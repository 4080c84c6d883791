//! # Footing Weights and Section Properties
//!
//! Weights and depths of the footing on the caller-supplied plan, plus the
//! foundation summary quantities reported alongside the design.

use serde::{Deserialize, Serialize};

use crate::params::{DesignParameters, FootingDimensions, FootingPlan};
use crate::units::{Feet, Inches, SqFt, CONCRETE_UNIT_WEIGHT, WATER_UNIT_WEIGHT};

/// Footing section properties and gravity loads.
///
/// ## JSON Example
///
/// ```json
/// {
///   "plan": { "length_ft": 40.0, "width_ft": 24.0, "source": "CallerSupplied" },
///   "thickness_ft": 9.0,
///   "effective_depth_ft": 7.5417,
///   "shear_depth_ft": 6.7875,
///   "column_area_ft2": 144.0,
///   "self_weight": 1296.0,
///   "soil_weight": 0.0,
///   "water_weight": 449.28
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FootingGeometry {
    pub plan: FootingPlan,
    pub thickness_ft: f64,
    /// Depth to the bottom bar layer, less a pile-diameter allowance (ft)
    pub effective_depth_ft: f64,
    /// 0.9 × effective depth (ft)
    pub shear_depth_ft: f64,
    /// Column gross area (ft²)
    pub column_area_ft2: f64,
    /// Footing plus seal weight (kips)
    pub self_weight: f64,
    /// Soil over the footing outside the column (kips)
    pub soil_weight: f64,
    /// Buoyancy over the submerged height (kips)
    pub water_weight: f64,
}

impl FootingGeometry {
    /// Compute the section properties on the caller-supplied plan.
    pub fn new(params: &DesignParameters, dims: &FootingDimensions) -> Self {
        let plan = dims.plan();
        let area = SqFt(plan.area_ft2());
        let t = params.footing_thickness;

        let thickness_in: Inches = Feet(t).into();
        let above_piles: Feet = Inches(thickness_in.0 - params.pile_diameter).into();
        let cover: Feet = Inches(params.cover).into();
        let bar: Feet = Inches(params.bar_size_long.max(params.bar_size_trans)).into();
        let effective_depth_ft = above_piles.0 - cover.0 - bar.0;

        let column_area_ft2 = params.col_x_dim * params.col_y_dim;

        let self_weight = CONCRETE_UNIT_WEIGHT.weight_of(area, Feet(t)).value()
            + CONCRETE_UNIT_WEIGHT.weight_of(area, Feet(params.seal_thickness)).value();

        let soil_height = (params.ground_elev - params.footing_top_elev).max(0.0);
        let soil_weight = (area.0 - column_area_ft2) * params.soil_weight * soil_height;

        let water_top = params.water_elev.min(params.ground_elev.max(params.footing_top_elev));
        let footing_bottom = params.footing_top_elev - t - params.seal_thickness;
        let submerged = (water_top - footing_bottom).max(0.0);
        let water_weight = WATER_UNIT_WEIGHT.weight_of(area, Feet(submerged)).value();

        FootingGeometry {
            plan,
            thickness_ft: t,
            effective_depth_ft,
            shear_depth_ft: 0.9 * effective_depth_ft,
            column_area_ft2,
            self_weight,
            soil_weight,
            water_weight,
        }
    }
}

/// Summary quantities for the foundation record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FoundationSummary {
    /// Gross footing area on the overhang-derived plan (ft²)
    pub gross_area_ft2: f64,
    /// Footing top minus ground plus embedment (ft)
    pub depth_to_pile_tip_ft: f64,
}

impl FoundationSummary {
    pub fn new(params: &DesignParameters) -> Self {
        FoundationSummary {
            gross_area_ft2: params.overhang_plan().area_ft2(),
            depth_to_pile_tip_ft: params.footing_top_elev - params.ground_elev + params.pile_embedment,
        }
    }
}
