use serde::{Deserialize, Serialize};

use super::common::Identified;

/// An uploaded picture attached to a project or an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub id: u32,
    /// Path relative to the backend's asset origin, e.g. `static/images/a.png`.
    pub file_path: String,
    #[serde(default)]
    pub event_id: Option<u32>,
    #[serde(default)]
    pub project_id: Option<u32>,
}

impl Identified for Image {
    fn id(&self) -> u32 {
        self.id
    }
}
