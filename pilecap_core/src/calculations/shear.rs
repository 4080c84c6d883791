//! # Shear Checks
//!
//! One-way (beam) shear across the footing and two-way (punching) shear
//! around the most heavily loaded corner pile.
//!
//! ## One-Way Shear
//!
//! ```text
//! Vu  = max Pmax over all piles
//! φVc = 0.9 × 0.0316 × λ × √f'c(psi) × b(in) × dv(in) / 1000,  λ = 1.0
//! ```
//!
//! with b the caller-supplied footing width and dv the footing shear depth.
//! The section is adequate only when φVc/Vu exceeds 1.
//!
//! ## Punching Shear at a Corner Pile
//!
//! ```text
//! dv  = de (in)
//! b0  = min(4 (ps + dv/12), ps + 2 (dv/24 + overhang))   (ft)
//! Vn  = min((0.063 + 0.126/βc) √f'c b0 dv, 0.126 √f'c b0 dv),  βc = 2.0, f'c in ksi
//! φVn = 0.9 Vn
//! ```

use serde::{Deserialize, Serialize};

use super::envelope::PileEnvelopeEntry;
use super::footing::FootingGeometry;
use super::reinforcement::flexural_depth_ft;
use crate::errors::{CalcError, CalcResult};
use crate::geometry::GroupProperties;
use crate::params::{DesignParameters, FootingDimensions};
use crate::units::{Feet, Inches, Ksi, Psi};

/// Strength reduction factor for shear
pub const PHI_SHEAR: f64 = 0.9;

/// Concrete density modification factor (normal weight)
pub const LAMBDA: f64 = 1.0;

/// Ratio of long to short side of the loaded area for punching
pub const BETA_C: f64 = 2.0;

/// One-way shear outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OneWayStatus {
    Adequate,
    Inadequate,
}

/// Punching shear outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PunchingStatus {
    #[serde(rename = "PASS")]
    Pass,
    #[serde(rename = "FAIL")]
    Fail,
}

impl PunchingStatus {
    pub fn passed(&self) -> bool {
        matches!(self, PunchingStatus::Pass)
    }
}

/// One-way shear check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OneWayShearResult {
    /// Vu = max Pmax (kips)
    pub vu: f64,
    /// Section width (in)
    pub width_in: f64,
    /// Shear depth (in)
    pub shear_depth_in: f64,
    /// φVc (kips)
    pub phi_vc: f64,
    /// φVc/Vu, infinite when Vu ≤ 0
    pub ratio: f64,
    pub status: OneWayStatus,
}

/// Punching shear check around a corner pile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PunchingShearResult {
    /// Corner pile numbers
    pub corner_piles: Vec<usize>,
    /// Largest corner Pmax (kips)
    pub vu: f64,
    /// dv (in)
    pub effective_depth_in: f64,
    /// b0 (ft)
    pub critical_perimeter_ft: f64,
    /// Vn (kips)
    pub nominal_capacity: f64,
    /// φVn (kips)
    pub design_capacity: f64,
    /// Vu/φVn
    pub demand_capacity_ratio: f64,
    pub status: PunchingStatus,
}

/// Both shear checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShearChecks {
    pub one_way: OneWayShearResult,
    pub punching: PunchingShearResult,
}

/// Run the one-way and punching shear checks.
///
/// # Errors
///
/// `CalcError::DegenerateGeometry` when `envelope` is empty.
pub fn shear_checks(envelope: &[PileEnvelopeEntry], params: &DesignParameters, dims: &FootingDimensions) -> CalcResult<ShearChecks> {
    let piles: Vec<_> = envelope.iter().map(|e| e.pile).collect();
    let group = GroupProperties::from_piles(&piles)
        .ok_or_else(|| CalcError::degenerate_geometry("shear_checks", "No piles to check"))?;

    let footing = FootingGeometry::new(params, dims);
    let one_way = one_way_shear(envelope, params, &footing);
    let punching = punching_shear(envelope, params, &group);

    tracing::debug!(
        one_way_ratio = one_way.ratio,
        punching_dc = punching.demand_capacity_ratio,
        "shear checks"
    );

    Ok(ShearChecks { one_way, punching })
}

/// One-way shear on the caller-supplied footing section.
pub fn one_way_shear(envelope: &[PileEnvelopeEntry], params: &DesignParameters, footing: &FootingGeometry) -> OneWayShearResult {
    let vu = envelope.iter().map(PileEnvelopeEntry::pmax).fold(f64::NEG_INFINITY, f64::max);
    let vu = if vu.is_finite() { vu } else { 0.0 };

    let fc: Psi = Ksi(params.fc).into();
    let width_in: Inches = Feet(footing.plan.width_ft).into();
    let shear_depth_in: Inches = Feet(footing.shear_depth_ft).into();
    let phi_vc = PHI_SHEAR * 0.0316 * LAMBDA * fc.0.sqrt() * width_in.0 * shear_depth_in.0 / 1000.0;

    let ratio = if vu <= 0.0 { f64::INFINITY } else { phi_vc / vu };
    let status = if ratio > 1.0 {
        OneWayStatus::Adequate
    } else {
        OneWayStatus::Inadequate
    };

    OneWayShearResult {
        vu,
        width_in: width_in.0,
        shear_depth_in: shear_depth_in.0,
        phi_vc,
        ratio,
        status,
    }
}

/// Punching shear around the most heavily loaded corner pile.
pub fn punching_shear(envelope: &[PileEnvelopeEntry], params: &DesignParameters, group: &GroupProperties) -> PunchingShearResult {
    let corners: Vec<&PileEnvelopeEntry> = envelope.iter().filter(|e| group.is_corner(&e.pile)).collect();
    let vu = corners.iter().map(|e| e.pmax()).fold(f64::NEG_INFINITY, f64::max);
    let vu = if vu.is_finite() { vu } else { 0.0 };

    let dv_in: Inches = Feet(flexural_depth_ft(params)).into();
    let half_dv: Feet = Inches(0.5 * dv_in.0).into();
    let ps = params.pile_size_ft();

    let b0 = (4.0 * (ps + 2.0 * half_dv.0)).min(ps + 2.0 * (half_dv.0 + params.pile_overhang));
    let b0_in: Inches = Feet(b0).into();

    let sqrt_fc = params.fc.sqrt();
    let vn1 = (0.063 + 0.126 / BETA_C) * sqrt_fc * b0_in.0 * dv_in.0;
    let vn2 = 0.126 * sqrt_fc * b0_in.0 * dv_in.0;
    let vn = vn1.min(vn2);
    let phi_vn = PHI_SHEAR * vn;

    let demand_capacity_ratio = if phi_vn == 0.0 { f64::INFINITY } else { vu / phi_vn };
    let status = if phi_vn > vu {
        PunchingStatus::Pass
    } else {
        PunchingStatus::Fail
    };

    PunchingShearResult {
        corner_piles: corners.iter().map(|e| e.pile.number).collect(),
        vu,
        effective_depth_in: dv_in.0,
        critical_perimeter_ft: b0,
        nominal_capacity: vn,
        design_capacity: phi_vn,
        demand_capacity_ratio,
        status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::envelope::{compute_pile_envelope, CaseForce, ForceComponents, GoverningForce, PileForces};
    use crate::geometry::{generate_piles, LayoutMode, PileCoordinate};
    use crate::loads::LoadCase;

    fn entry(number: usize, x: f64, y: f64, pmax: f64) -> PileEnvelopeEntry {
        let governing = GoverningForce {
            load_case: "A".to_string(),
            value: pmax,
            components: ForceComponents {
                axial: pmax,
                ..Default::default()
            },
        };
        PileEnvelopeEntry {
            pile: PileCoordinate::new(number, x, y),
            forces: Some(PileForces {
                cases: vec![CaseForce {
                    load_case: "A".to_string(),
                    force: pmax,
                    components: governing.components,
                }],
                max: governing.clone(),
                min: governing,
            }),
        }
    }

    #[test]
    fn test_empty_envelope_is_degenerate() {
        let result = shear_checks(&[], &DesignParameters::default(), &FootingDimensions::default());
        assert!(matches!(result, Err(CalcError::DegenerateGeometry { .. })));
    }

    #[test]
    fn test_one_way_capacity() {
        let params = DesignParameters::default();
        let dims = FootingDimensions::default();
        let footing = FootingGeometry::new(&params, &dims);
        let result = one_way_shear(&[entry(1, 0.0, 0.0, 500.0)], &params, &footing);

        let expected = 0.9 * 0.0316 * 5500f64.sqrt() * (24.0 * 12.0) * (footing.shear_depth_ft * 12.0) / 1000.0;
        assert!((result.phi_vc - expected).abs() < 1e-9);
        assert!((result.width_in - 288.0).abs() < 1e-12);
        assert!((result.ratio - expected / 500.0).abs() < 1e-12);
    }

    #[test]
    fn test_one_way_ratio_of_one_is_inadequate() {
        let params = DesignParameters::default();
        let footing = FootingGeometry::new(&params, &FootingDimensions::default());
        let capacity = one_way_shear(&[entry(1, 0.0, 0.0, 1.0)], &params, &footing).phi_vc;

        let at_capacity = one_way_shear(&[entry(1, 0.0, 0.0, capacity)], &params, &footing);
        assert_eq!(at_capacity.ratio, 1.0);
        assert_eq!(at_capacity.status, OneWayStatus::Inadequate);

        let below = one_way_shear(&[entry(1, 0.0, 0.0, capacity * 0.99)], &params, &footing);
        assert_eq!(below.status, OneWayStatus::Adequate);
    }

    #[test]
    fn test_one_way_zero_demand_is_infinite_ratio() {
        let params = DesignParameters::default();
        let footing = FootingGeometry::new(&params, &FootingDimensions::default());
        let result = one_way_shear(&[entry(1, 0.0, 0.0, -20.0)], &params, &footing);
        assert!(result.ratio.is_infinite());
        assert_eq!(result.status, OneWayStatus::Adequate);
    }

    #[test]
    fn test_punching_uses_worst_corner() {
        let piles = [
            entry(1, -8.0, -8.0, 300.0),
            entry(2, -8.0, 8.0, 450.0),
            entry(3, 0.0, 0.0, 900.0),
            entry(4, 8.0, -8.0, 200.0),
            entry(5, 8.0, 8.0, 100.0),
        ];
        let piles_only: Vec<_> = piles.iter().map(|e| e.pile).collect();
        let group = GroupProperties::from_piles(&piles_only).unwrap();
        let result = punching_shear(&piles, &DesignParameters::default(), &group);

        assert_eq!(result.corner_piles, vec![1, 2, 4, 5]);
        assert_eq!(result.vu, 450.0);
    }

    #[test]
    fn test_punching_capacity_default() {
        let params = DesignParameters::default();
        let piles = generate_piles(4, 8.0, 3, 8.0, LayoutMode::Centered).unwrap();
        let envelope = compute_pile_envelope(&piles, &[LoadCase::new("G").with_fz(6000.0)], &params);
        let group = GroupProperties::from_piles(&piles).unwrap();
        let result = punching_shear(&envelope, &params, &group);

        let dv = flexural_depth_ft(&params) * 12.0;
        let dv2 = 0.5 * dv / 12.0;
        let b0 = (4.0 * (1.25 + 2.0 * dv2)).min(1.25 + 2.0 * (dv2 + 1.625));
        let vn = 0.126 * 5.5f64.sqrt() * b0 * 12.0 * dv;

        assert!((result.effective_depth_in - dv).abs() < 1e-9);
        assert!((result.critical_perimeter_ft - b0).abs() < 1e-9);
        // βc = 2 makes both expressions equal
        assert!((result.nominal_capacity - vn).abs() < 1e-6);
        assert!((result.design_capacity - 0.9 * vn).abs() < 1e-6);
        assert!((result.demand_capacity_ratio - result.vu / result.design_capacity).abs() < 1e-12);
        assert_eq!(result.status, PunchingStatus::Pass);
    }

    #[test]
    fn test_punching_fails_when_demand_exceeds_capacity() {
        let params = DesignParameters::default();
        let piles = [entry(1, 0.0, 0.0, 1.0e6)];
        let group = GroupProperties::from_piles(&[piles[0].pile]).unwrap();
        let result = punching_shear(&piles, &params, &group);
        assert_eq!(result.status, PunchingStatus::Fail);
        assert!(result.demand_capacity_ratio > 1.0);
    }

    #[test]
    fn test_shear_checks_combined() {
        let params = DesignParameters::default();
        let piles = generate_piles(4, 8.0, 3, 8.0, LayoutMode::Centered).unwrap();
        let envelope = compute_pile_envelope(&piles, &crate::loads::DEFAULT_LOAD_CASES, &params);
        let checks = shear_checks(&envelope, &params, &FootingDimensions::default()).unwrap();
        assert_eq!(checks.punching.corner_piles, vec![1, 3, 10, 12]);
        assert!(checks.one_way.vu > 0.0);
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(serde_json::to_string(&PunchingStatus::Pass).unwrap(), "\"PASS\"");
        assert_eq!(serde_json::to_string(&OneWayStatus::Inadequate).unwrap(), "\"Inadequate\"");
    }
}
