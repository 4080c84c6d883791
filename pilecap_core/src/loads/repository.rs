//! Load-case repositories
//!
//! The calculation functions never reach for a "current" load-case list on
//! their own; the caller resolves one through a [`LoadCaseRepository`] and
//! passes it down. Repositories are plain values, so parallel requests can
//! each hold their own.

use super::{LoadCase, DEFAULT_LOAD_CASES};

/// Source of the load cases for a design run.
pub trait LoadCaseRepository {
    /// The load cases to analyze, in caller order.
    ///
    /// Order matters: ties in the pile-force envelope resolve to the case
    /// that appears first.
    fn load_cases(&self) -> Vec<LoadCase>;
}

/// Always yields the published default cases.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultLoadCases;

impl LoadCaseRepository for DefaultLoadCases {
    fn load_cases(&self) -> Vec<LoadCase> {
        DEFAULT_LOAD_CASES.clone()
    }
}

/// Caller-supplied cases held in memory, falling back to the defaults while empty.
///
/// # Example
/// ```
/// use pilecap_core::loads::{InMemoryLoadCases, LoadCase, LoadCaseRepository};
///
/// let mut repo = InMemoryLoadCases::new();
/// assert_eq!(repo.load_cases().len(), 11); // defaults
///
/// let kept = repo.replace(vec![LoadCase::new("Strength I").with_fz(900.0), LoadCase::new("")]);
/// assert_eq!(kept, 1);
/// assert_eq!(repo.load_cases()[0].name, "Strength I");
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryLoadCases {
    cases: Vec<LoadCase>,
}

impl InMemoryLoadCases {
    /// Create an empty repository (reads yield the defaults)
    pub fn new() -> Self {
        InMemoryLoadCases { cases: Vec::new() }
    }

    /// Create a repository holding `cases` (blank-named cases dropped)
    pub fn with_cases(cases: Vec<LoadCase>) -> Self {
        let mut repo = InMemoryLoadCases::new();
        repo.replace(cases);
        repo
    }

    /// Replace the stored cases, dropping any with a blank name.
    ///
    /// Returns the number of cases kept.
    pub fn replace(&mut self, cases: Vec<LoadCase>) -> usize {
        let total = cases.len();
        self.cases = cases.into_iter().filter(|c| !c.name.trim().is_empty()).collect();
        tracing::debug!(kept = self.cases.len(), total, "stored load cases");
        self.cases.len()
    }

    /// Forget the stored cases (reads fall back to the defaults)
    pub fn clear(&mut self) {
        self.cases.clear();
    }

    /// Whether caller-supplied cases are stored
    pub fn has_custom_cases(&self) -> bool {
        !self.cases.is_empty()
    }
}

impl LoadCaseRepository for InMemoryLoadCases {
    fn load_cases(&self) -> Vec<LoadCase> {
        if self.cases.is_empty() {
            DEFAULT_LOAD_CASES.clone()
        } else {
            self.cases.clone()
        }
    }
}
