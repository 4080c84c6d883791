//! # Project Data Structures
//!
//! The `Project` struct is the root container for a job's pile cap designs.
//! Projects serialize to `.pcap` files as human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! Project
//! ├── meta: ProjectMetadata (version, engineer, job info, timestamps)
//! ├── settings: GlobalSettings (design code, plan tolerance)
//! └── items: HashMap<Uuid, PileCapInput> (all pile caps)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use pilecap_core::calculations::PileCapInput;
//! use pilecap_core::project::Project;
//!
//! let mut project = Project::new("Jane Engineer", "25-042", "State DOT");
//! let id = project.add_item(PileCapInput::new("Pier 3"));
//!
//! let json = serde_json::to_string_pretty(&project).unwrap();
//! assert!(json.contains("Pier 3"));
//! assert!(project.get_item(&id).is_some());
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::PileCapInput;

/// Current schema version for .pcap files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root project container.
///
/// Items are stored in a flat UUID-keyed map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Project metadata (version, engineer, job info)
    pub meta: ProjectMetadata,

    /// Global settings
    #[serde(default)]
    pub settings: GlobalSettings,

    /// All pile caps, keyed by UUID
    #[serde(default)]
    pub items: HashMap<Uuid, PileCapInput>,
}

impl Project {
    /// Create a new empty project.
    ///
    /// # Arguments
    ///
    /// * `engineer` - Name of the responsible engineer
    /// * `job_id` - Job/project number (e.g., "25-001")
    /// * `client` - Client name
    pub fn new(engineer: impl Into<String>, job_id: impl Into<String>, client: impl Into<String>) -> Self {
        let now = Utc::now();
        Project {
            meta: ProjectMetadata {
                version: SCHEMA_VERSION.to_string(),
                engineer: engineer.into(),
                job_id: job_id.into(),
                client: client.into(),
                created: now,
                modified: now,
            },
            settings: GlobalSettings::default(),
            items: HashMap::new(),
        }
    }

    /// Add a pile cap to the project.
    ///
    /// Returns the UUID assigned to the item.
    pub fn add_item(&mut self, item: PileCapInput) -> Uuid {
        let id = Uuid::new_v4();
        self.items.insert(id, item);
        self.touch();
        id
    }

    /// Remove a pile cap by UUID.
    ///
    /// Returns the removed item if it existed.
    pub fn remove_item(&mut self, id: &Uuid) -> Option<PileCapInput> {
        let item = self.items.remove(id);
        if item.is_some() {
            self.touch();
        }
        item
    }

    /// Get a pile cap by UUID.
    pub fn get_item(&self, id: &Uuid) -> Option<&PileCapInput> {
        self.items.get(id)
    }

    /// Get a mutable reference to a pile cap by UUID.
    ///
    /// Marks the project as modified when the item exists.
    pub fn get_item_mut(&mut self, id: &Uuid) -> Option<&mut PileCapInput> {
        if self.items.contains_key(id) {
            self.meta.modified = Utc::now();
            self.items.get_mut(id)
        } else {
            None
        }
    }

    /// Items sorted by label, for stable output.
    pub fn items_by_label(&self) -> Vec<(&Uuid, &PileCapInput)> {
        let mut items: Vec<_> = self.items.iter().collect();
        items.sort_by(|a, b| a.1.label.cmp(&b.1.label).then(a.0.cmp(b.0)));
        items
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

impl Default for Project {
    fn default() -> Self {
        Project::new("", "", "")
    }
}

/// Project metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Name of the responsible engineer
    pub engineer: String,

    /// Job/project number
    pub job_id: String,

    /// Client name
    pub client: String,

    /// When the project was created
    pub created: DateTime<Utc>,

    /// When the project was last modified
    pub modified: DateTime<Utc>,
}

fn default_plan_tolerance_ft() -> f64 {
    0.5
}

/// Global project settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalSettings {
    /// Design code label (e.g., "AASHTO LRFD 9th Ed.")
    pub code: String,

    /// Largest difference between the overhang-derived and caller-supplied
    /// footing plans before a warning is raised (ft)
    #[serde(default = "default_plan_tolerance_ft")]
    pub plan_tolerance_ft: f64,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        GlobalSettings {
            code: "AASHTO LRFD 9th Ed.".to_string(),
            plan_tolerance_ft: default_plan_tolerance_ft(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_creation() {
        let project = Project::new("John Doe", "25-001", "Acme Corp");
        assert_eq!(project.meta.engineer, "John Doe");
        assert_eq!(project.meta.job_id, "25-001");
        assert_eq!(project.meta.client, "Acme Corp");
        assert_eq!(project.meta.version, SCHEMA_VERSION);
        assert_eq!(project.settings.plan_tolerance_ft, 0.5);
    }

    #[test]
    fn test_project_serialization() {
        let mut project = Project::new("Jane Engineer", "25-042", "Test Client");
        project.add_item(PileCapInput::new("Pier 1"));
        let json = serde_json::to_string_pretty(&project).unwrap();

        assert!(json.contains("Jane Engineer"));
        assert!(json.contains("25-042"));
        assert!(json.contains("AASHTO"));

        let roundtrip: Project = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.meta.engineer, "Jane Engineer");
        assert_eq!(roundtrip.item_count(), 1);
    }

    #[test]
    fn test_add_remove_item() {
        let mut project = Project::new("Engineer", "25-001", "Client");

        let id = project.add_item(PileCapInput::new("PC-1"));
        assert_eq!(project.item_count(), 1);
        assert!(project.get_item(&id).is_some());

        let removed = project.remove_item(&id);
        assert_eq!(removed.map(|i| i.label), Some("PC-1".to_string()));
        assert_eq!(project.item_count(), 0);
        assert!(project.remove_item(&id).is_none());
    }

    #[test]
    fn test_get_item_mut_touches() {
        let mut project = Project::new("Engineer", "25-001", "Client");
        let id = project.add_item(PileCapInput::new("PC-1"));
        let before = project.meta.modified;
        if let Some(item) = project.get_item_mut(&id) {
            item.params.footing_thickness = 7.0;
        }
        assert!(project.meta.modified >= before);
        assert_eq!(project.get_item(&id).unwrap().params.footing_thickness, 7.0);
    }

    #[test]
    fn test_items_sorted_by_label() {
        let mut project = Project::new("Engineer", "25-001", "Client");
        project.add_item(PileCapInput::new("Pier 2"));
        project.add_item(PileCapInput::new("Pier 1"));
        let labels: Vec<_> = project.items_by_label().iter().map(|(_, i)| i.label.as_str()).collect();
        assert_eq!(labels, vec!["Pier 1", "Pier 2"]);
    }

    #[test]
    fn test_settings_tolerance_default_on_load() {
        let json = r#"{ "code": "AASHTO" }"#;
        let settings: GlobalSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.plan_tolerance_ft, 0.5);
    }
}
