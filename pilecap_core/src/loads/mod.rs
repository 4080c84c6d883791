//! Foundation load cases
//!
//! Load cases are column-base reactions delivered to the pile cap by the
//! superstructure model: three forces and two moments about the footing
//! reference axes, plus the dc factor that tells the envelope engine whether
//! the case is a service-level or strength-level combination.
//!
//! # Overview
//!
//! - [`LoadCase`] - One named set of column-base reactions
//! - [`DEFAULT_LOAD_CASES`] - The published set of eleven governing cases
//! - [`LoadCaseRepository`] - Where the engine's caller gets its load cases from
//!
//! # Example
//!
//! ```
//! use pilecap_core::loads::{LoadCase, validate_load_cases};
//!
//! let cases = vec![
//!     LoadCase::new("Service I").with_fz(1000.0).with_mx(250.0),
//!     LoadCase::new("Strength I").with_dc_factor(1.25).with_fz(1400.0),
//! ];
//! assert!(validate_load_cases(&cases).is_ok());
//! ```

pub mod defaults;
pub mod repository;

pub use defaults::DEFAULT_LOAD_CASES;
pub use repository::{DefaultLoadCases, InMemoryLoadCases, LoadCaseRepository};

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

fn default_dc_factor() -> f64 {
    1.0
}

/// Column-base reactions for one load case.
///
/// Forces in kips, moments in kip-ft. A `dc_factor` of 1.0 or less marks a
/// service-level case; anything above 1.0 is treated as strength-level and
/// switches on the soil-weight scaling in the envelope engine.
///
/// # JSON Format
/// ```json
/// {
///   "name": "Fy Maximum",
///   "dc_factor": 1.0,
///   "fx": -119.0, "fy": 0.0, "fz": 8967.0,
///   "mx": 18290.0, "my": 6407.0
/// }
/// ```
///
/// `"load_case"` is accepted as an alias of `"name"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadCase {
    /// Case name, unique within a set
    #[serde(alias = "load_case")]
    pub name: String,

    /// Dead-load (DC) factor of the combination
    #[serde(default = "default_dc_factor")]
    pub dc_factor: f64,

    /// Horizontal force along x (kips)
    #[serde(default)]
    pub fx: f64,

    /// Horizontal force along y (kips)
    #[serde(default)]
    pub fy: f64,

    /// Vertical force, positive downward (kips)
    #[serde(default)]
    pub fz: f64,

    /// Moment about the x axis (kip-ft)
    #[serde(default)]
    pub mx: f64,

    /// Moment about the y axis (kip-ft)
    #[serde(default)]
    pub my: f64,
}

impl LoadCase {
    /// Create a service-level case with all components zero
    pub fn new(name: impl Into<String>) -> Self {
        LoadCase {
            name: name.into(),
            dc_factor: 1.0,
            fx: 0.0,
            fy: 0.0,
            fz: 0.0,
            mx: 0.0,
            my: 0.0,
        }
    }

    /// Set the dc factor (builder pattern)
    pub fn with_dc_factor(mut self, dc_factor: f64) -> Self {
        self.dc_factor = dc_factor;
        self
    }

    /// Set both horizontal forces (builder pattern)
    pub fn with_shear(mut self, fx: f64, fy: f64) -> Self {
        self.fx = fx;
        self.fy = fy;
        self
    }

    /// Set the vertical force (builder pattern)
    pub fn with_fz(mut self, fz: f64) -> Self {
        self.fz = fz;
        self
    }

    /// Set the moment about x (builder pattern)
    pub fn with_mx(mut self, mx: f64) -> Self {
        self.mx = mx;
        self
    }

    /// Set the moment about y (builder pattern)
    pub fn with_my(mut self, my: f64) -> Self {
        self.my = my;
        self
    }

    /// Whether the strength-level soil-weight scaling applies
    pub fn is_strength_level(&self) -> bool {
        self.dc_factor > 1.0
    }

    /// Validate a single case.
    pub fn validate(&self) -> CalcResult<()> {
        if self.name.trim().is_empty() {
            return Err(CalcError::invalid_input("name", "\"\"", "Load case name cannot be blank"));
        }
        if !self.dc_factor.is_finite() || self.dc_factor < 0.0 {
            return Err(CalcError::invalid_input(
                format!("{}.dc_factor", self.name),
                self.dc_factor.to_string(),
                "dc factor must be a non-negative number",
            ));
        }
        let components = [
            ("fx", self.fx),
            ("fy", self.fy),
            ("fz", self.fz),
            ("mx", self.mx),
            ("my", self.my),
        ];
        for (field, value) in components {
            if !value.is_finite() {
                return Err(CalcError::invalid_input(
                    format!("{}.{}", self.name, field),
                    value.to_string(),
                    "Load components must be finite",
                ));
            }
        }
        Ok(())
    }
}

/// Validate a set of cases: each case valid, names unique.
pub fn validate_load_cases(cases: &[LoadCase]) -> CalcResult<()> {
    let mut seen = HashSet::new();
    for case in cases {
        case.validate()?;
        if !seen.insert(case.name.as_str()) {
            return Err(CalcError::invalid_input(
                "name",
                case.name.clone(),
                "Load case names must be unique within a set",
            ));
        }
    }
    Ok(())
}
