//! # Reinforcement Sizing
//!
//! Required bottom steel from the rectangular stress block:
//!
//! ```text
//! Mu/ft = Mu / D
//! As    = 0.85 (f'c/fy) D t (1 - √(1 - 4 Mu/ft / (1.7 × 0.9 × f'c × 144 × de²)))
//! de    = t - pile_size/12 - cover/12 - 1.41/12
//! ```
//!
//! D is the caller-supplied footing length for the x axis and width for the
//! y axis. The 1.41 in term is the diameter of a #11 bar.
//!
//! A negative radicand means no amount of steel develops the moment and is
//! returned as [`CalcError::ReinforcementUnderflow`].

use serde::{Deserialize, Serialize};

use super::flexure::{Axis, AxisFlexure, FlexuralResult};
use crate::errors::{CalcError, CalcResult};
use crate::params::{DesignParameters, FootingDimensions};
use crate::units::{Feet, Inches};

/// Diameter of the #11 bar assumed for the flexural depth (in)
pub const NO_11_BAR_DIAMETER_IN: f64 = 1.41;

/// Strength reduction factor for flexure
pub const PHI_FLEXURE: f64 = 0.9;

/// Effective flexural depth de (ft), measured above the pile tops.
///
/// Shared by the reinforcement sizing and the punching shear check.
pub fn flexural_depth_ft(params: &DesignParameters) -> f64 {
    let pile: Feet = Inches(params.pile_size).into();
    let cover: Feet = Inches(params.cover).into();
    let bar: Feet = Inches(NO_11_BAR_DIAMETER_IN).into();
    params.footing_thickness - pile.0 - cover.0 - bar.0
}

/// Required steel along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisSteel {
    pub axis: Axis,
    /// Footing dimension the moment is spread over (ft)
    pub width_ft: f64,
    /// Ultimate moment per foot of footing (kip-ft/ft)
    pub moment_per_ft: f64,
    /// 1 - 4 Mu/ft / (1.7 φ f'c 144 de²)
    pub radicand: f64,
    /// Required steel area
    pub required_steel_area: f64,
}

/// Required reinforcement on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReinforcementResult {
    /// de (ft)
    pub effective_depth_ft: f64,
    pub x: AxisSteel,
    pub y: AxisSteel,
}

/// Size the bottom reinforcement for both axes.
///
/// A moment at or below zero (self weight relieves the cantilever) needs no
/// steel and yields an area of 0.
///
/// # Errors
///
/// - `CalcError::DegenerateGeometry` when de is not positive
/// - `CalcError::ReinforcementUnderflow` when the section cannot develop the moment
pub fn size_reinforcement(flexural: &FlexuralResult, params: &DesignParameters, dims: &FootingDimensions) -> CalcResult<ReinforcementResult> {
    let de = flexural_depth_ft(params);
    if de <= 0.0 {
        return Err(CalcError::degenerate_geometry(
            "size_reinforcement",
            format!("Effective depth {:.3} ft is not positive; footing too thin for the pile size and cover", de),
        ));
    }

    let x = axis_steel(&flexural.x, params, dims.length_ft, de)?;
    let y = axis_steel(&flexural.y, params, dims.width_ft, de)?;

    tracing::debug!(de, as_x = x.required_steel_area, as_y = y.required_steel_area, "sized reinforcement");

    Ok(ReinforcementResult {
        effective_depth_ft: de,
        x,
        y,
    })
}

fn axis_steel(flexure: &AxisFlexure, params: &DesignParameters, width_ft: f64, de: f64) -> CalcResult<AxisSteel> {
    let moment_per_ft = flexure.ultimate_moment / width_ft;
    let demand = moment_per_ft.max(0.0);
    let radicand = 1.0 - 4.0 * demand / (1.7 * PHI_FLEXURE * params.fc * 144.0 * de.powi(2));

    if radicand < 0.0 {
        return Err(CalcError::ReinforcementUnderflow {
            axis: flexure.axis.label().to_string(),
            moment_per_ft,
            radicand,
        });
    }

    let required_steel_area = 0.85 * (params.fc / params.fy) * width_ft * params.footing_thickness * (1.0 - radicand.sqrt());

    Ok(AxisSteel {
        axis: flexure.axis,
        width_ft,
        moment_per_ft,
        radicand,
        required_steel_area,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::PlanSource;

    fn axis_with_moment(axis: Axis, ultimate_moment: f64) -> AxisFlexure {
        AxisFlexure {
            axis,
            plan_dimension_ft: 20.0,
            column_dimension_ft: 9.0,
            edge_distance_ft: 5.5,
            critical_distance_ft: 3.875,
            positive_piles: vec![],
            negative_piles: vec![],
            pile_force: 0.0,
            pile_moment: ultimate_moment,
            footing_moment: 0.0,
            surcharge_moment: 0.0,
            total_moment: ultimate_moment,
            strength_moment: ultimate_moment,
            service_moment: ultimate_moment,
            ultimate_moment,
        }
    }

    fn flexural(mx: f64, my: f64) -> FlexuralResult {
        FlexuralResult {
            plan: DesignParameters::default().overhang_plan(),
            x: axis_with_moment(Axis::X, mx),
            y: axis_with_moment(Axis::Y, my),
        }
    }

    #[test]
    fn test_default_flexural_depth() {
        let de = flexural_depth_ft(&DesignParameters::default());
        assert!((de - (9.0 - 15.0 / 12.0 - 4.5 / 12.0 - 1.41 / 12.0)).abs() < 1e-12);
    }

    #[test]
    fn test_zero_moment_needs_no_steel() {
        let result = size_reinforcement(&flexural(0.0, 0.0), &DesignParameters::default(), &FootingDimensions::default()).unwrap();
        assert_eq!(result.x.radicand, 1.0);
        assert_eq!(result.x.required_steel_area, 0.0);
        assert_eq!(result.y.required_steel_area, 0.0);
    }

    #[test]
    fn test_negative_moment_needs_no_steel() {
        let result = size_reinforcement(&flexural(-500.0, -10.0), &DesignParameters::default(), &FootingDimensions::default()).unwrap();
        assert!(result.x.moment_per_ft < 0.0);
        assert_eq!(result.x.required_steel_area, 0.0);
    }

    #[test]
    fn test_steel_area_formula() {
        let params = DesignParameters::default();
        let dims = FootingDimensions::default();
        let result = size_reinforcement(&flexural(8000.0, 3000.0), &params, &dims).unwrap();

        let de = flexural_depth_ft(&params);
        let mu = 8000.0 / 40.0;
        let radicand = 1.0 - 4.0 * mu / (1.7 * 0.9 * 5.5 * 144.0 * de * de);
        let expected = 0.85 * (5.5 / 60.0) * 40.0 * 9.0 * (1.0 - radicand.sqrt());

        assert!((result.x.moment_per_ft - 200.0).abs() < 1e-12);
        assert!((result.x.required_steel_area - expected).abs() < 1e-9);
        assert!((result.y.moment_per_ft - 125.0).abs() < 1e-12);
        assert!(result.y.required_steel_area > 0.0);
        assert!(result.y.required_steel_area < result.x.required_steel_area);
    }

    #[test]
    fn test_underflow_surfaces_axis() {
        let err = size_reinforcement(&flexural(100.0, 1.0e7), &DesignParameters::default(), &FootingDimensions::default()).unwrap_err();
        match err {
            CalcError::ReinforcementUnderflow { axis, radicand, .. } => {
                assert_eq!(axis, "y");
                assert!(radicand < 0.0);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_thin_footing_is_degenerate() {
        let params = DesignParameters {
            footing_thickness: 1.5,
            ..Default::default()
        };
        let result = size_reinforcement(&flexural(10.0, 10.0), &params, &FootingDimensions::default());
        assert!(matches!(result, Err(CalcError::DegenerateGeometry { .. })));
    }

    #[test]
    fn test_steel_spread_over_supplied_plan() {
        let flex = flexural(10.0, 10.0);
        assert_eq!(flex.plan.source, PlanSource::OverhangDerived);
        let result = size_reinforcement(&flex, &DesignParameters::default(), &FootingDimensions::default()).unwrap();
        // Steel is spread over the caller-supplied plan, not the flexural plan
        assert_eq!(result.x.width_ft, 40.0);
        assert_eq!(result.y.width_ft, 24.0);
    }
}
