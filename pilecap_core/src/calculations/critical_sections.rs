//! # Critical-Section Sums
//!
//! Pile-by-pile shear and moment on each side of the column, the way a hand
//! check sums reactions across a failure plane.
//!
//! For each axis and each side of the column:
//!
//! - **Shear** is taken on a plane one shear depth beyond the column face. A
//!   pile whose centre lies more than half a pile size beyond the plane counts
//!   in full; a pile straddling the plane counts for the fraction of its
//!   footprint beyond it:
//!
//!   ```text
//!   fraction = (ps/2 + d) / ps    for |d| < ps/2
//!   ```
//!
//!   The weight of the footing outboard of the plane is subtracted.
//! - **Moment** is taken about the column face: Σ P × d for piles beyond the
//!   face, less the cantilevered footing self weight.
//!
//! Pile reactions are the envelope Pmax values. Distances are measured from
//! the pile-group centroid; the footing edges follow the caller-supplied plan
//! shifted by the footing offsets.
//!
//! These sums are a re-derivation of the pile-by-pile method, not the legacy
//! worksheet's procedure: that worksheet placed its shear planes at the outer
//! pile line less the shear depth and applied a second pass of footing loads,
//! and neither convention is reproduced here.

use serde::{Deserialize, Serialize};

use super::envelope::PileEnvelopeEntry;
use super::flexure::Axis;
use super::footing::FootingGeometry;
use crate::errors::{CalcError, CalcResult};
use crate::geometry::GroupProperties;
use crate::params::DesignParameters;
use crate::units::CONCRETE_UNIT_WEIGHT;

/// Side of the column a section sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Negative,
    Positive,
}

impl Side {
    fn sign(&self) -> f64 {
        match self {
            Side::Negative => -1.0,
            Side::Positive => 1.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Side::Negative => "negative",
            Side::Positive => "positive",
        }
    }
}

/// Shear and moment on one side of the column along one axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionSums {
    pub axis: Axis,
    pub side: Side,
    /// Column face coordinate (ft)
    pub column_face_ft: f64,
    /// Shear plane coordinate (ft)
    pub shear_plane_ft: f64,
    /// Piles contributing to the shear, in full or in part
    pub shear_piles: Vec<usize>,
    /// Pile reactions beyond the shear plane (kips)
    pub pile_shear: f64,
    /// Footing weight outboard of the shear plane (kips)
    pub footing_shear: f64,
    /// Net shear (kips)
    pub shear: f64,
    /// Moment of pile reactions about the column face (kip-ft)
    pub pile_moment: f64,
    /// Cantilevered footing self-weight moment (kip-ft)
    pub footing_moment: f64,
    /// Net moment (kip-ft)
    pub moment: f64,
}

/// Critical-section sums for both axes and both sides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriticalSections {
    /// x negative, x positive, y negative, y positive
    pub sections: Vec<SectionSums>,
}

impl CriticalSections {
    /// Section with the largest net shear
    pub fn governing_shear(&self) -> Option<&SectionSums> {
        self.sections.iter().fold(None, |best: Option<&SectionSums>, s| match best {
            Some(b) if b.shear >= s.shear => Some(b),
            _ => Some(s),
        })
    }

    /// Section with the largest net moment
    pub fn governing_moment(&self) -> Option<&SectionSums> {
        self.sections.iter().fold(None, |best: Option<&SectionSums>, s| match best {
            Some(b) if b.moment >= s.moment => Some(b),
            _ => Some(s),
        })
    }

    /// Both sides along one axis
    pub fn for_axis(&self, axis: Axis) -> impl Iterator<Item = &SectionSums> {
        self.sections.iter().filter(move |s| s.axis == axis)
    }
}

/// Fraction of a pile's reaction acting beyond a plane.
///
/// `d` is the signed distance from the plane to the pile centre, positive
/// outboard.
pub fn prorated_fraction(d: f64, pile_size_ft: f64) -> f64 {
    let half = pile_size_ft / 2.0;
    if d.abs() < half {
        (half + d) / pile_size_ft
    } else if d > 0.0 {
        1.0
    } else {
        0.0
    }
}

/// Sum shear and moment at the critical sections.
///
/// # Errors
///
/// `CalcError::DegenerateGeometry` when `envelope` is empty.
pub fn critical_section_sums(envelope: &[PileEnvelopeEntry], params: &DesignParameters, footing: &FootingGeometry) -> CalcResult<CriticalSections> {
    let piles: Vec<_> = envelope.iter().map(|e| e.pile).collect();
    let group = GroupProperties::from_piles(&piles)
        .ok_or_else(|| CalcError::degenerate_geometry("critical_section_sums", "No piles to sum"))?;

    let mut sections = Vec::with_capacity(4);
    for axis in [Axis::X, Axis::Y] {
        for side in [Side::Negative, Side::Positive] {
            sections.push(section(axis, side, envelope, params, footing, &group));
        }
    }

    tracing::debug!(count = sections.len(), "critical-section sums");
    Ok(CriticalSections { sections })
}

fn section(
    axis: Axis,
    side: Side,
    envelope: &[PileEnvelopeEntry],
    params: &DesignParameters,
    footing: &FootingGeometry,
    group: &GroupProperties,
) -> SectionSums {
    let (centroid, column, offset, along, across) = match axis {
        Axis::X => (
            group.centroid_x,
            params.col_x_dim,
            params.footing_offset_x,
            footing.plan.length_ft,
            footing.plan.width_ft,
        ),
        Axis::Y => (
            group.centroid_y,
            params.col_y_dim,
            params.footing_offset_y,
            footing.plan.width_ft,
            footing.plan.length_ft,
        ),
    };
    let sign = side.sign();
    let column_face_ft = centroid + sign * column / 2.0;
    let shear_plane_ft = column_face_ft + sign * footing.shear_depth_ft;
    let edge = centroid + offset + sign * along / 2.0;

    let ps = params.pile_size_ft();
    let mut shear_piles = Vec::new();
    let mut pile_shear = 0.0;
    let mut pile_moment = 0.0;
    for entry in envelope {
        let coordinate = match axis {
            Axis::X => entry.pile.x_ft,
            Axis::Y => entry.pile.y_ft,
        };

        let fraction = prorated_fraction(sign * (coordinate - shear_plane_ft), ps);
        if fraction > 0.0 {
            shear_piles.push(entry.pile.number);
            pile_shear += entry.pmax() * fraction;
        }

        let arm = sign * (coordinate - column_face_ft);
        if arm > 0.0 {
            pile_moment += entry.pmax() * arm;
        }
    }

    let strip = CONCRETE_UNIT_WEIGHT.0 * footing.thickness_ft * across;
    let beyond_plane = (sign * (edge - shear_plane_ft)).max(0.0);
    let beyond_face = (sign * (edge - column_face_ft)).max(0.0);
    let footing_shear = strip * beyond_plane;
    let footing_moment = strip * beyond_face.powi(2) / 2.0;

    SectionSums {
        axis,
        side,
        column_face_ft,
        shear_plane_ft,
        shear_piles,
        pile_shear,
        footing_shear,
        shear: pile_shear - footing_shear,
        pile_moment,
        footing_moment,
        moment: pile_moment - footing_moment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::envelope::compute_pile_envelope;
    use crate::geometry::{generate_piles, LayoutMode};
    use crate::loads::LoadCase;
    use crate::params::FootingDimensions;

    fn uniform_envelope() -> Vec<PileEnvelopeEntry> {
        // x = -12, -4, 4, 12; y = -8, 0, 8; 100 kips each
        let piles = generate_piles(4, 8.0, 3, 8.0, LayoutMode::Centered).unwrap();
        let params = DesignParameters {
            footing_thickness: 0.0,
            soil_weight: 0.0,
            water_elev: 100.0,
            ..Default::default()
        };
        compute_pile_envelope(&piles, &[LoadCase::new("G").with_fz(1200.0)], &params)
    }

    fn footing_with_shear_depth(shear_depth_ft: f64) -> FootingGeometry {
        let mut footing = FootingGeometry::new(&DesignParameters::default(), &FootingDimensions::default());
        footing.shear_depth_ft = shear_depth_ft;
        footing
    }

    #[test]
    fn test_prorated_fraction() {
        assert_eq!(prorated_fraction(0.0, 1.25), 0.5);
        assert!((prorated_fraction(0.3125, 1.25) - 0.75).abs() < 1e-12);
        assert!((prorated_fraction(-0.3125, 1.25) - 0.25).abs() < 1e-12);
        assert_eq!(prorated_fraction(2.0, 1.25), 1.0);
        assert_eq!(prorated_fraction(-2.0, 1.25), 0.0);
    }

    #[test]
    fn test_pile_on_shear_plane_counts_half() {
        let params = DesignParameters::default();
        // Face at 4.5, plane at 12.0 through the outer pile row
        let footing = footing_with_shear_depth(7.5);
        let sums = critical_section_sums(&uniform_envelope(), &params, &footing).unwrap();
        let x_pos = &sums.sections[1];

        assert_eq!((x_pos.axis, x_pos.side), (Axis::X, Side::Positive));
        assert!((x_pos.shear_plane_ft - 12.0).abs() < 1e-12);
        assert_eq!(x_pos.shear_piles, vec![10, 11, 12]);
        assert!((x_pos.pile_shear - 150.0).abs() < 1e-9);

        // 40 ft plan: edge at 20, 8 ft beyond the plane, strip 0.15 × 9 × 24
        let strip = 0.15 * 9.0 * 24.0;
        assert!((x_pos.footing_shear - strip * 8.0).abs() < 1e-9);
        assert!((x_pos.shear - (150.0 - strip * 8.0)).abs() < 1e-9);
    }

    #[test]
    fn test_moment_about_column_face() {
        let params = DesignParameters::default();
        let footing = footing_with_shear_depth(7.5);
        let sums = critical_section_sums(&uniform_envelope(), &params, &footing).unwrap();
        let x_neg = &sums.sections[0];

        // Piles at x = -12 are 7.5 ft beyond the -4.5 face
        assert!((x_neg.pile_moment - 300.0 * 7.5).abs() < 1e-9);
        let strip = 0.15 * 9.0 * 24.0;
        assert!((x_neg.footing_moment - strip * 15.5 * 15.5 / 2.0).abs() < 1e-9);
        assert!((x_neg.moment - (x_neg.pile_moment - x_neg.footing_moment)).abs() < 1e-12);
    }

    #[test]
    fn test_symmetric_sides_match() {
        let params = DesignParameters::default();
        let footing = FootingGeometry::new(&params, &FootingDimensions::default());
        let sums = critical_section_sums(&uniform_envelope(), &params, &footing).unwrap();
        let x: Vec<_> = sums.for_axis(Axis::X).collect();
        assert_eq!(x.len(), 2);
        assert!((x[0].shear - x[1].shear).abs() < 1e-9);
        assert!((x[0].moment - x[1].moment).abs() < 1e-9);
        assert!(sums.governing_shear().is_some());
        assert!(sums.governing_moment().is_some());
    }

    #[test]
    fn test_empty_envelope_is_degenerate() {
        let params = DesignParameters::default();
        let footing = FootingGeometry::new(&params, &FootingDimensions::default());
        assert!(matches!(
            critical_section_sums(&[], &params, &footing),
            Err(CalcError::DegenerateGeometry { .. })
        ));
    }
}
