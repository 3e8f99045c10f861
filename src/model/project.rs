use serde::{Deserialize, Serialize};

use super::common::Identified;
use super::files::{Executable, ProjectFile};
use super::image::Image;

/// A project as returned by the backend, with its attachments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: u32,
    pub name: String,
    pub description: String,
    /// Free text, e.g. `"Rust, Postgres"`.
    pub technologies: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub files: Vec<ProjectFile>,
    #[serde(default)]
    pub executable: Vec<Executable>,
}

/// Body of a project create or update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectPayload {
    pub name: String,
    pub description: String,
    pub technologies: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}

impl Project {
    /// The editable subset of this project.
    pub fn payload(&self) -> ProjectPayload {
        ProjectPayload {
            name: self.name.clone(),
            description: self.description.clone(),
            technologies: self.technologies.clone(),
            year: self.year,
        }
    }
}

impl Identified for Project {
    fn id(&self) -> u32 {
        self.id
    }
}
