//! # Flexural Check
//!
//! Design moment at the critical section on each axis of the footing.
//!
//! Piles lying strictly beyond a column face push the cantilevered footing
//! up; the larger side governs. The footing self weight and the seal
//! surcharge on the cantilever relieve that moment:
//!
//! ```text
//! edge     = (D - c) / 2
//! crit     = edge - overhang
//! M_pile   = max(ΣPmax beyond +face, ΣPmax beyond -face) × crit
//! M_self   = D × t × 0.150 × edge² / 2
//! M_sur    = D × seal × γ_soil × edge² / 2
//! Strength = M_pile - 0.9 (M_self + M_sur)
//! Service  = M_pile - 1.0 (M_self + M_sur)
//! Mu       = max(Strength, Service)
//! ```
//!
//! D is the footing plan dimension along the axis; [`flexural_check`] uses
//! the overhang-derived plan, [`flexural_check_with_plan`] takes either one.

use serde::{Deserialize, Serialize};

use super::envelope::PileEnvelopeEntry;
use crate::errors::{CalcError, CalcResult};
use crate::geometry::GroupProperties;
use crate::params::{DesignParameters, FootingPlan};
use crate::units::CONCRETE_UNIT_WEIGHT;

/// Load factor on the relieving weights for the Strength I moment
pub const STRENGTH_WEIGHT_FACTOR: f64 = 0.9;

/// Load factor on the relieving weights for the Service I moment
pub const SERVICE_WEIGHT_FACTOR: f64 = 1.0;

/// Footing plan axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub fn label(&self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Flexural results along one axis. Moments in kip-ft, forces in kips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisFlexure {
    pub axis: Axis,
    /// Footing plan dimension along the axis (ft)
    pub plan_dimension_ft: f64,
    /// Column dimension along the axis (ft)
    pub column_dimension_ft: f64,
    /// Column face to footing edge (ft)
    pub edge_distance_ft: f64,
    /// Column face to critical section (ft)
    pub critical_distance_ft: f64,
    /// Pile numbers beyond the positive column face
    pub positive_piles: Vec<usize>,
    /// Pile numbers beyond the negative column face
    pub negative_piles: Vec<usize>,
    /// Governing ΣPmax
    pub pile_force: f64,
    pub pile_moment: f64,
    pub footing_moment: f64,
    pub surcharge_moment: f64,
    pub total_moment: f64,
    pub strength_moment: f64,
    pub service_moment: f64,
    /// max(strength, service)
    pub ultimate_moment: f64,
}

/// Flexural check on both axes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlexuralResult {
    /// Plan the moments were computed on
    pub plan: FootingPlan,
    pub x: AxisFlexure,
    pub y: AxisFlexure,
}

impl FlexuralResult {
    /// Results for one axis
    pub fn axis(&self, axis: Axis) -> &AxisFlexure {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
        }
    }
}

/// Flexural check on the overhang-derived plan.
///
/// # Errors
///
/// `CalcError::DegenerateGeometry` when `envelope` is empty.
pub fn flexural_check(envelope: &[PileEnvelopeEntry], params: &DesignParameters) -> CalcResult<FlexuralResult> {
    flexural_check_with_plan(envelope, params, params.overhang_plan())
}

/// Flexural check on an explicit plan.
pub fn flexural_check_with_plan(envelope: &[PileEnvelopeEntry], params: &DesignParameters, plan: FootingPlan) -> CalcResult<FlexuralResult> {
    let piles: Vec<_> = envelope.iter().map(|e| e.pile).collect();
    let group = GroupProperties::from_piles(&piles)
        .ok_or_else(|| CalcError::degenerate_geometry("flexural_check", "No piles to resist the column load"))?;

    let x = axis_flexure(Axis::X, envelope, params, &group, plan.length_ft, params.col_x_dim);
    let y = axis_flexure(Axis::Y, envelope, params, &group, plan.width_ft, params.col_y_dim);

    tracing::debug!(
        source = ?plan.source,
        mu_x = x.ultimate_moment,
        mu_y = y.ultimate_moment,
        "flexural check"
    );

    Ok(FlexuralResult { plan, x, y })
}

fn axis_flexure(
    axis: Axis,
    envelope: &[PileEnvelopeEntry],
    params: &DesignParameters,
    group: &GroupProperties,
    plan_dimension_ft: f64,
    column_dimension_ft: f64,
) -> AxisFlexure {
    let edge = (plan_dimension_ft - column_dimension_ft) / 2.0;
    let crit = edge - params.pile_overhang;

    let centroid = match axis {
        Axis::X => group.centroid_x,
        Axis::Y => group.centroid_y,
    };
    let face_pos = centroid + column_dimension_ft / 2.0;
    let face_neg = centroid - column_dimension_ft / 2.0;

    let coordinate = |entry: &PileEnvelopeEntry| match axis {
        Axis::X => entry.pile.x_ft,
        Axis::Y => entry.pile.y_ft,
    };

    let mut positive_piles = Vec::new();
    let mut negative_piles = Vec::new();
    let mut sum_pos = 0.0;
    let mut sum_neg = 0.0;
    for entry in envelope {
        let c = coordinate(entry);
        if c > face_pos {
            positive_piles.push(entry.pile.number);
            sum_pos += entry.pmax();
        } else if c < face_neg {
            negative_piles.push(entry.pile.number);
            sum_neg += entry.pmax();
        }
    }

    let pile_force = sum_pos.max(sum_neg);
    let pile_moment = pile_force * crit;
    let cantilever = edge.powi(2) / 2.0;
    let footing_moment = plan_dimension_ft * params.footing_thickness * CONCRETE_UNIT_WEIGHT.0 * cantilever;
    let surcharge_moment = plan_dimension_ft * params.seal_thickness * params.soil_weight * cantilever;
    let relief = footing_moment + surcharge_moment;

    let strength_moment = pile_moment - STRENGTH_WEIGHT_FACTOR * relief;
    let service_moment = pile_moment - SERVICE_WEIGHT_FACTOR * relief;

    AxisFlexure {
        axis,
        plan_dimension_ft,
        column_dimension_ft,
        edge_distance_ft: edge,
        critical_distance_ft: crit,
        positive_piles,
        negative_piles,
        pile_force,
        pile_moment,
        footing_moment,
        surcharge_moment,
        total_moment: pile_moment + relief,
        strength_moment,
        service_moment,
        ultimate_moment: strength_moment.max(service_moment),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::envelope::compute_pile_envelope;
    use crate::geometry::{generate_piles, LayoutMode, PileCoordinate};
    use crate::loads::LoadCase;
    use crate::params::PlanSource;

    fn uniform_envelope(n_x: usize, n_y: usize, s: f64, fz: f64) -> Vec<PileEnvelopeEntry> {
        let piles = generate_piles(n_x, s, n_y, s, LayoutMode::Centered).unwrap();
        let params = DesignParameters {
            footing_thickness: 0.0,
            soil_weight: 0.0,
            water_elev: 100.0,
            ..Default::default()
        };
        compute_pile_envelope(&piles, &[LoadCase::new("G").with_fz(fz)], &params)
    }

    #[test]
    fn test_zero_piles_is_degenerate() {
        let result = flexural_check(&[], &DesignParameters::default());
        assert!(matches!(result, Err(CalcError::DegenerateGeometry { .. })));
    }

    #[test]
    fn test_overhang_plan_has_zero_critical_distance() {
        let envelope = uniform_envelope(4, 3, 8.0, 1200.0);
        let params = DesignParameters::default();
        let result = flexural_check(&envelope, &params).unwrap();

        assert_eq!(result.plan.source, PlanSource::OverhangDerived);
        assert!((result.x.edge_distance_ft - 1.625).abs() < 1e-12);
        assert!(result.x.critical_distance_ft.abs() < 1e-12);
        assert!(result.x.pile_moment.abs() < 1e-9);
        // Only the relieving weights remain, so strength governs
        assert!(result.x.ultimate_moment < 0.0);
        assert_eq!(result.x.ultimate_moment, result.x.strength_moment);
    }

    #[test]
    fn test_face_grouping_and_moments_with_supplied_plan() {
        // 4 × 3 grid at 8 ft: x = -12, -4, 4, 12; column 9 ft wide -> faces at ±4.5
        let envelope = uniform_envelope(4, 3, 8.0, 1200.0);
        let params = DesignParameters::default();
        let plan = FootingPlan {
            length_ft: 30.0,
            width_ft: 22.0,
            source: PlanSource::CallerSupplied,
        };
        let result = flexural_check_with_plan(&envelope, &params, plan).unwrap();

        assert_eq!(result.x.positive_piles, vec![10, 11, 12]);
        assert_eq!(result.x.negative_piles, vec![1, 2, 3]);
        assert!((result.x.pile_force - 300.0).abs() < 1e-9);

        let edge = (30.0 - 9.0) / 2.0;
        let crit = edge - 1.625;
        assert!((result.x.pile_moment - 300.0 * crit).abs() < 1e-9);
        let m_self = 30.0 * 9.0 * 0.150 * edge * edge / 2.0;
        assert!((result.x.footing_moment - m_self).abs() < 1e-9);
        assert!((result.x.strength_moment - (300.0 * crit - 0.9 * m_self)).abs() < 1e-9);
        assert!((result.x.service_moment - (300.0 * crit - m_self)).abs() < 1e-9);
        assert!((result.x.total_moment - (300.0 * crit + m_self)).abs() < 1e-9);

        // y = -8, 0, 8; column 16 ft -> faces at ±8, piles on a face belong to neither side
        assert!(result.y.positive_piles.is_empty());
        assert!(result.y.negative_piles.is_empty());
        assert_eq!(result.y.pile_force, 0.0);
    }

    #[test]
    fn test_surcharge_moment() {
        let envelope = uniform_envelope(2, 2, 8.0, 400.0);
        let params = DesignParameters {
            seal_thickness: 2.0,
            ..Default::default()
        };
        let result = flexural_check(&envelope, &params).unwrap();
        let edge = result.y.edge_distance_ft;
        let expected = 19.25 * 2.0 * 0.115 * edge * edge / 2.0;
        assert!((result.y.surcharge_moment - expected).abs() < 1e-9);
    }

    #[test]
    fn test_larger_side_governs() {
        let params = DesignParameters {
            col_x_dim: 2.0,
            ..Default::default()
        };
        let piles = vec![PileCoordinate::new(1, -5.0, 0.0), PileCoordinate::new(2, 5.0, 0.0)];
        let cases = vec![LoadCase::new("M").with_fz(100.0).with_my(250.0)];
        let envelope = compute_pile_envelope(&piles, &cases, &params);
        let result = flexural_check(&envelope, &params).unwrap();
        assert!((result.x.pile_force - envelope[1].pmax()).abs() < 1e-9);
        assert!(envelope[1].pmax() > envelope[0].pmax());
    }
}
