//! Project records and the read-only catalog.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Catalog shipped with the site.
const BUILTIN_JSON: &str = include_str!("../data/projects.json");

/// Numeric project identifier, as used by `openModal(id)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(pub u32);

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A portfolio project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,

    /// Font Awesome classes for the modal header icon
    pub icon: String,

    pub title: String,

    /// Short labels shown as chips
    pub tags: Vec<String>,

    pub description: String,

    /// Bullet list of key features
    pub features: Vec<String>,

    /// Technology stack
    pub technologies: Vec<String>,
}

/// Static id → project mapping.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    projects: BTreeMap<ProjectId, Project>,
}

impl Catalog {
    /// The catalog embedded in the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_JSON)
    }

    /// Decode a catalog from a JSON array of project records.
    pub fn from_json(json: &str) -> Result<Self> {
        let records: Vec<Project> = serde_json::from_str(json)?;
        Self::from_projects(records)
    }

    /// Build a catalog, rejecting duplicate ids.
    pub fn from_projects(records: impl IntoIterator<Item = Project>) -> Result<Self> {
        let mut projects = BTreeMap::new();
        for project in records {
            let id = project.id;
            if projects.insert(id, project).is_some() {
                return Err(Error::DuplicateProject(id));
            }
        }
        Ok(Self { projects })
    }

    pub fn get(&self, id: ProjectId) -> Option<&Project> {
        self.projects.get(&id)
    }

    pub fn contains(&self, id: ProjectId) -> bool {
        self.projects.contains_key(&id)
    }

    /// Projects in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Project> {
        self.projects.values()
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}
