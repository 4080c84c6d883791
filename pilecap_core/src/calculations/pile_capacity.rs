//! # Pile Axial Resistance
//!
//! Compares the governing pile reactions against the factored geotechnical
//! resistance of a single pile:
//!
//! - compression: max Pmax ≤ φc × Rn
//! - uplift: max(-Pmin) ≤ φu × Rs
//!
//! The nominal bearing resistance is also compared against the maximum
//! driving resistance; a pile cannot be driven to a resistance above it.

use serde::{Deserialize, Serialize};

use super::envelope::PileEnvelopeEntry;
use crate::params::DesignParameters;

/// Axial resistance check for the pile group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PileResistanceCheck {
    /// Boring log the resistances were taken from
    pub boring: String,
    /// Pile tip elevation (ft)
    pub tip_elevation_ft: f64,

    /// Largest Pmax (kips)
    pub max_compression: f64,
    /// Pile carrying the largest Pmax
    pub max_compression_pile: Option<usize>,
    /// φc × Rn (kips)
    pub factored_compression: f64,
    pub compression_ratio: f64,
    pub compression_ok: bool,

    /// Largest uplift, -Pmin, or 0 when every pile stays in compression (kips)
    pub max_uplift: f64,
    /// Pile carrying the largest uplift
    pub max_uplift_pile: Option<usize>,
    /// φu × Rs (kips)
    pub factored_uplift: f64,
    pub uplift_ratio: f64,
    pub uplift_ok: bool,

    /// Rn exceeds the maximum driving resistance
    pub exceeds_driving_resistance: bool,
}

impl PileResistanceCheck {
    /// Both limit states satisfied
    pub fn passes(&self) -> bool {
        self.compression_ok && self.uplift_ok
    }
}

fn demand_ratio(demand: f64, capacity: f64) -> f64 {
    if demand <= 0.0 {
        0.0
    } else if capacity <= 0.0 {
        f64::INFINITY
    } else {
        demand / capacity
    }
}

/// Check the envelope against the factored pile resistances.
pub fn check_pile_resistance(envelope: &[PileEnvelopeEntry], params: &DesignParameters) -> PileResistanceCheck {
    let mut max_compression = 0.0;
    let mut max_compression_pile = None;
    let mut max_uplift = 0.0;
    let mut max_uplift_pile = None;

    for entry in envelope.iter().filter(|e| e.forces.is_some()) {
        if max_compression_pile.is_none() || entry.pmax() > max_compression {
            max_compression = entry.pmax();
            max_compression_pile = Some(entry.pile.number);
        }
        let uplift = -entry.pmin();
        if uplift > max_uplift {
            max_uplift = uplift;
            max_uplift_pile = Some(entry.pile.number);
        }
    }

    let factored_compression = params.comp_reduction_factor * params.nominal_pile_bearing_capacity;
    let factored_uplift = params.uplift_reduction_factor * params.soil_ultimate_side_friction;
    let exceeds_driving_resistance = params.nominal_pile_bearing_capacity > params.max_pile_driving_resistance;

    let check = PileResistanceCheck {
        boring: params.boring.clone(),
        tip_elevation_ft: params.pile_tip_elevation,
        max_compression,
        max_compression_pile,
        factored_compression,
        compression_ratio: demand_ratio(max_compression, factored_compression),
        compression_ok: max_compression <= factored_compression,
        max_uplift,
        max_uplift_pile,
        factored_uplift,
        uplift_ratio: demand_ratio(max_uplift, factored_uplift),
        uplift_ok: max_uplift <= factored_uplift,
        exceeds_driving_resistance,
    };

    if !check.compression_ok {
        tracing::warn!(
            demand = check.max_compression,
            capacity = check.factored_compression,
            pile = ?check.max_compression_pile,
            "pile compression exceeds factored resistance"
        );
    }
    if !check.uplift_ok {
        tracing::warn!(
            demand = check.max_uplift,
            capacity = check.factored_uplift,
            pile = ?check.max_uplift_pile,
            "pile uplift exceeds factored side friction"
        );
    }
    if exceeds_driving_resistance {
        tracing::warn!(
            nominal = params.nominal_pile_bearing_capacity,
            driving = params.max_pile_driving_resistance,
            "nominal bearing resistance exceeds maximum driving resistance"
        );
    }

    check
}
