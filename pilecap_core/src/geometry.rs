//! # Pile Group Geometry
//!
//! Generates rectangular pile layouts and derives the group properties the
//! rigid-cap method needs (centroid, unit-area moments of inertia, bounding box).
//!
//! ## Layout Strategies
//!
//! - [`LayoutMode::Centered`] - grid centered on the origin, so the pile-group
//!   centroid is (0, 0). This is the layout used by the design pipeline.
//! - [`LayoutMode::Origin`] - first pile at (0, 0), coordinates increasing with
//!   index. Kept for layouts surveyed from a corner pile.
//!
//! Numbering is row-major over the x index: pile `i * n_y + j + 1` sits at
//! column `i`, row `j`.
//!
//! ## Example
//!
//! ```rust
//! use pilecap_core::geometry::{generate_piles, LayoutMode};
//!
//! let piles = generate_piles(3, 8.0, 2, 8.0, LayoutMode::Centered).unwrap();
//! assert_eq!(piles.len(), 6);
//! assert_eq!(piles[0].number, 1);
//! assert_eq!((piles[0].x_ft, piles[0].y_ft), (-8.0, -4.0));
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Decimal places kept on generated coordinates (hundredths of a foot)
pub const COORDINATE_DECIMALS: i32 = 2;

/// Round a coordinate to generation precision.
pub fn round_coordinate(value: f64) -> f64 {
    let scale = 10f64.powi(COORDINATE_DECIMALS);
    (value * scale).round() / scale
}

/// How a rectangular grid is positioned relative to the origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LayoutMode {
    /// Grid centered on (0, 0)
    #[default]
    Centered,
    /// Pile 1 at (0, 0), coordinates increasing with index
    Origin,
}

impl LayoutMode {
    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            LayoutMode::Centered => "Centered on origin",
            LayoutMode::Origin => "Anchored at origin",
        }
    }
}

/// A single pile position in plan.
///
/// ## JSON Example
///
/// ```json
/// { "number": 1, "x_ft": -8.0, "y_ft": -4.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PileCoordinate {
    /// 1-based pile number (stable ordering)
    pub number: usize,

    /// X coordinate (ft)
    pub x_ft: f64,

    /// Y coordinate (ft)
    pub y_ft: f64,
}

impl PileCoordinate {
    /// Create a pile coordinate, rounding the position to generation precision
    pub fn new(number: usize, x_ft: f64, y_ft: f64) -> Self {
        PileCoordinate {
            number,
            x_ft: round_coordinate(x_ft),
            y_ft: round_coordinate(y_ft),
        }
    }
}

/// Rectangular grid definition.
///
/// ## JSON Example
///
/// ```json
/// { "n_x": 4, "s_x": 8.0, "n_y": 3, "s_y": 8.0, "mode": "Centered" }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PileGrid {
    /// Number of piles along x
    pub n_x: usize,
    /// Spacing along x (ft)
    pub s_x: f64,
    /// Number of piles along y
    pub n_y: usize,
    /// Spacing along y (ft)
    pub s_y: f64,
    /// Grid placement strategy
    #[serde(default)]
    pub mode: LayoutMode,
}

impl PileGrid {
    /// Generate the pile coordinates for this grid
    pub fn generate(&self) -> CalcResult<Vec<PileCoordinate>> {
        generate_piles(self.n_x, self.s_x, self.n_y, self.s_y, self.mode)
    }
}

impl Default for PileGrid {
    fn default() -> Self {
        PileGrid {
            n_x: 4,
            s_x: 8.0,
            n_y: 3,
            s_y: 8.0,
            mode: LayoutMode::Centered,
        }
    }
}

/// Generate a rectangular pile grid.
///
/// # Errors
///
/// `CalcError::InvalidGeometry` when a count is zero or a spacing is not a
/// positive finite number. No partial grid is ever returned.
pub fn generate_piles(n_x: usize, s_x: f64, n_y: usize, s_y: f64, mode: LayoutMode) -> CalcResult<Vec<PileCoordinate>> {
    validate_count("n_x", n_x)?;
    validate_count("n_y", n_y)?;
    validate_spacing("s_x", s_x)?;
    validate_spacing("s_y", s_y)?;

    let (x_origin, y_origin) = match mode {
        LayoutMode::Centered => (
            -((n_x - 1) as f64) * s_x / 2.0,
            -((n_y - 1) as f64) * s_y / 2.0,
        ),
        LayoutMode::Origin => (0.0, 0.0),
    };

    let mut piles = Vec::with_capacity(n_x * n_y);
    for i in 0..n_x {
        for j in 0..n_y {
            piles.push(PileCoordinate::new(
                i * n_y + j + 1,
                x_origin + i as f64 * s_x,
                y_origin + j as f64 * s_y,
            ));
        }
    }

    tracing::debug!(count = piles.len(), ?mode, "generated pile grid");
    Ok(piles)
}

fn validate_count(field: &str, n: usize) -> CalcResult<()> {
    if n < 1 {
        return Err(CalcError::invalid_geometry(field, n.to_string(), "Pile count must be at least 1"));
    }
    Ok(())
}

fn validate_spacing(field: &str, s: f64) -> CalcResult<()> {
    if !s.is_finite() || s <= 0.0 {
        return Err(CalcError::invalid_geometry(field, s.to_string(), "Spacing must be a positive number"));
    }
    Ok(())
}

/// Derived properties of a pile group.
///
/// Moments of inertia use the unit-pile-area convention:
/// `ix = Σ(y - ȳ)²` resists moment about the x axis, `iy = Σ(x - x̄)²`
/// resists moment about the y axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroupProperties {
    /// Number of piles
    pub count: usize,
    /// Centroid x̄ (ft)
    pub centroid_x: f64,
    /// Centroid ȳ (ft)
    pub centroid_y: f64,
    /// Σ(y - ȳ)² (ft²)
    pub ix: f64,
    /// Σ(x - x̄)² (ft²)
    pub iy: f64,
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl GroupProperties {
    /// Compute group properties, or `None` for an empty group
    pub fn from_piles(piles: &[PileCoordinate]) -> Option<Self> {
        if piles.is_empty() {
            return None;
        }

        let n = piles.len() as f64;
        let centroid_x = piles.iter().map(|p| p.x_ft).sum::<f64>() / n;
        let centroid_y = piles.iter().map(|p| p.y_ft).sum::<f64>() / n;
        let ix = piles.iter().map(|p| (p.y_ft - centroid_y).powi(2)).sum();
        let iy = piles.iter().map(|p| (p.x_ft - centroid_x).powi(2)).sum();

        let min_x = piles.iter().map(|p| p.x_ft).fold(f64::INFINITY, f64::min);
        let max_x = piles.iter().map(|p| p.x_ft).fold(f64::NEG_INFINITY, f64::max);
        let min_y = piles.iter().map(|p| p.y_ft).fold(f64::INFINITY, f64::min);
        let max_y = piles.iter().map(|p| p.y_ft).fold(f64::NEG_INFINITY, f64::max);

        Some(GroupProperties {
            count: piles.len(),
            centroid_x,
            centroid_y,
            ix,
            iy,
            min_x,
            max_x,
            min_y,
            max_y,
        })
    }

    /// Whether a pile sits on an extreme x AND an extreme y of the bounding box.
    ///
    /// Membership is compared at generation precision rather than with exact
    /// float equality.
    pub fn is_corner(&self, pile: &PileCoordinate) -> bool {
        let on = |a: f64, b: f64| round_coordinate(a) == round_coordinate(b);
        let x_extreme = on(pile.x_ft, self.min_x) || on(pile.x_ft, self.max_x);
        let y_extreme = on(pile.y_ft, self.min_y) || on(pile.y_ft, self.max_y);
        x_extreme && y_extreme
    }
}
