use super::{report, require, FormMode};
use crate::client::ClubClient;
use crate::error::Result;
use crate::model::{Project, ProjectPayload};
use crate::views::Notice;

/// Create or edit a project.
#[derive(Debug, Clone, Default)]
pub struct ProjectForm {
    mode: FormMode,
    pub fields: ProjectPayload,
    notice: Option<Notice>,
}

impl ProjectForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn editing(project: &Project) -> Self {
        let mut form = Self::new();
        form.load(Some(project));
        form
    }

    /// Seed the form from a selected project, or go back to an empty create
    /// form when the selection is cleared.
    pub fn load(&mut self, project: Option<&Project>) {
        match project {
            Some(project) => {
                self.mode = FormMode::Edit(project.id);
                self.fields = project.payload();
            }
            None => {
                self.mode = FormMode::Create;
                self.fields = ProjectPayload::default();
            }
        }
        self.notice = None;
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn validate(&self) -> Result<()> {
        require("name", &self.fields.name)?;
        require("description", &self.fields.description)?;
        require("technologies", &self.fields.technologies)
    }

    /// POST in create mode, PUT in edit mode.
    pub async fn submit(&mut self, client: &ClubClient) -> Result<Project> {
        let result = match self.validate() {
            Err(e) => Err(e),
            Ok(()) => match self.mode {
                FormMode::Create => client.create_project(&self.fields).await,
                FormMode::Edit(id) => client.update_project(id, &self.fields).await,
            },
        };
        report(
            &mut self.notice,
            result,
            "Project saved.",
            "Error submitting project",
        )
    }
}
