//! # pilecap_core - Pile Cap Design Engine
//!
//! `pilecap_core` distributes column loads to a group of piles under a rigid
//! concrete footing and checks the footing for flexure and shear using
//! AASHTO-style LRFD expressions. All inputs and outputs are
//! JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions over slices; load cases are injected
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Traceable**: Every result carries the intermediate quantities a
//!   checker needs, and each footing plan carries its provenance
//!
//! ## Quick Start
//!
//! ```rust
//! use pilecap_core::calculations::{design_pile_cap, PileCapInput};
//! use pilecap_core::loads::DefaultLoadCases;
//! use pilecap_core::project::GlobalSettings;
//!
//! let input = PileCapInput::new("Pier 3");
//! let report = design_pile_cap(&input, &DefaultLoadCases, &GlobalSettings::default()).unwrap();
//!
//! for pile in &report.piles {
//!     println!("pile {}: Pmax = {:.1} k", pile.pile.number, pile.pmax());
//! }
//! ```
//!
//! ## Modules
//!
//! - [`geometry`] - Pile grid generation and group properties
//! - [`loads`] - Load cases, defaults, and repositories
//! - [`params`] - Design parameters and footing plans
//! - [`calculations`] - Envelope, flexure, reinforcement, shear, and the full pipeline
//! - [`project`] - Project container, metadata, and settings
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types
//! - [`file_io`] - File operations with atomic saves and locking

pub mod calculations;
pub mod errors;
pub mod file_io;
pub mod geometry;
pub mod loads;
pub mod params;
pub mod project;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_project, save_project, FileLock};
pub use geometry::{generate_piles, LayoutMode, PileCoordinate, PileGrid};
pub use loads::{LoadCase, LoadCaseRepository};
pub use params::{DesignParameters, FootingDimensions, FootingPlan, PlanSource};
pub use project::{GlobalSettings, Project, ProjectMetadata};
