//! # Pile Cap Calculations
//!
//! Each stage of the pile cap design lives in its own module and follows the
//! same shape:
//!
//! - plain `*Result` value types (JSON-serializable)
//! - a pure function taking slices and parameters, returning
//!   `CalcResult<*Result>` where the stage can fail
//!
//! No stage performs I/O or holds state, so any of them can run on its own
//! or concurrently with others.
//!
//! ## Stages
//!
//! - [`envelope`] - Rigid-cap pile forces and per-pile Pmax/Pmin
//! - [`footing`] - Footing weights, depths, and foundation summary
//! - [`flexure`] - Critical-section design moments
//! - [`reinforcement`] - Required bottom steel
//! - [`shear`] - One-way and corner-pile punching shear
//! - [`pile_capacity`] - Factored pile compression and uplift resistance
//! - [`critical_sections`] - Pile-by-pile shear and moment sums
//! - [`pile_cap`] - The full pipeline and its report

pub mod critical_sections;
pub mod envelope;
pub mod flexure;
pub mod footing;
pub mod pile_cap;
pub mod pile_capacity;
pub mod reinforcement;
pub mod shear;

// Re-export commonly used types
pub use envelope::{compute_pile_envelope, PileEnvelopeEntry, PileForces};
pub use flexure::{flexural_check, flexural_check_with_plan, Axis, FlexuralResult};
pub use footing::{FootingGeometry, FoundationSummary};
pub use pile_cap::{design_pile_cap, DesignWarning, PileCapInput, PileCapReport};
pub use reinforcement::{size_reinforcement, ReinforcementResult};
pub use shear::{shear_checks, OneWayStatus, PunchingStatus, ShearChecks};
