//! Published default load cases
//!
//! The eleven column-base reaction cases used whenever the caller has not
//! supplied its own set. Each case is the governing envelope of one reaction
//! component (max/min of Fx, Fy, Fz, Mx, My, Mz) from the superstructure model,
//! reported at service level.

use once_cell::sync::Lazy;

use super::LoadCase;

/// (name, fx, fy, fz, mx, my), all at dc factor 1.0
const DEFAULT_TABLE: [(&str, f64, f64, f64, f64, f64); 11] = [
    ("Fx Minimum", -131.0, 235.0, 7562.0, 9864.0, -4939.0),
    ("Fy Maximum", -119.0, 0.0, 8967.0, 18290.0, 6407.0),
    ("Fy Minimum", -33.0, 211.0, 5183.0, -15270.0, -1417.0),
    ("Fz Maximum", 227.0, 132.0, 7562.0, 5331.0, 8415.0),
    ("Fz Minimum", -228.0, 132.0, 7562.0, 5331.0, -8447.0),
    ("Mx Maximum", -119.0, 0.0, 8646.0, 10150.0, -13910.0),
    ("Mx Minimum", 118.0, 0.0, 8646.0, 10150.0, 13880.0),
    ("My Maximum", -228.0, 132.0, 7562.0, 5331.0, -8447.0),
    ("My Minimum", 227.0, 132.0, 7562.0, 5331.0, 8415.0),
    ("Mz Maximum", -89.0, 0.0, 8481.0, 25740.0, 4669.0),
    ("Mz Minimum", -89.0, 0.0, 6363.0, -25690.0, 4669.0),
];

/// Default load cases, in published order.
///
/// # Example
/// ```
/// use pilecap_core::loads::DEFAULT_LOAD_CASES;
///
/// assert_eq!(DEFAULT_LOAD_CASES.len(), 11);
/// assert_eq!(DEFAULT_LOAD_CASES[0].name, "Fx Minimum");
/// ```
pub static DEFAULT_LOAD_CASES: Lazy<Vec<LoadCase>> = Lazy::new(|| {
    DEFAULT_TABLE
        .iter()
        .map(|&(name, fx, fy, fz, mx, my)| {
            LoadCase::new(name)
                .with_shear(fx, fy)
                .with_fz(fz)
                .with_mx(mx)
                .with_my(my)
        })
        .collect()
});
