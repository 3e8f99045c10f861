use tracing::debug;

use super::{report, require};
use crate::client::ClubClient;
use crate::error::{ClubError, Result};
use crate::model::{
    Event, Executable, Image, ImageOwner, Platform, Project, ProjectFile, UploadFile,
};
use crate::views::{Mount, Notice, Refresh};

/// Upload an image for a project or an event.
///
/// The two selectors are mutually exclusive: picking one clears the other.
/// `submit` checks the selection again before sending, so setting both ids
/// directly is still rejected without a request.
#[derive(Debug, Default)]
pub struct ImageUploadForm {
    pub file: Option<UploadFile>,
    pub project_id: Option<u32>,
    pub event_id: Option<u32>,
    projects: Vec<Project>,
    events: Vec<Event>,
    mount: Mount,
    notice: Option<Notice>,
}

impl ImageUploadForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Projects offered by the project selector.
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Events offered by the event selector.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Fill both selectors.
    pub async fn load_options(&mut self, client: &ClubClient) -> Result<Refresh> {
        let fetch = async { tokio::try_join!(client.list_projects(), client.list_events()) };
        match self.mount.run(fetch).await {
            None => Ok(Refresh::Cancelled),
            Some(Ok((projects, events))) => {
                debug!(
                    projects = projects.len(),
                    events = events.len(),
                    "loaded upload targets"
                );
                self.projects = projects;
                self.events = events;
                Ok(Refresh::Applied)
            }
            Some(Err(e)) => {
                self.notice = Some(Notice::error(format!(
                    "Error fetching projects and events: {e}"
                )));
                Err(e)
            }
        }
    }

    pub fn select_project(&mut self, id: Option<u32>) {
        self.project_id = id;
        self.event_id = None;
    }

    pub fn select_event(&mut self, id: Option<u32>) {
        self.event_id = id;
        self.project_id = None;
    }

    pub fn set_file(&mut self, file: UploadFile) {
        self.file = Some(file);
    }

    pub fn owner(&self) -> Result<ImageOwner> {
        ImageOwner::from_selection(self.project_id, self.event_id)
    }

    pub async fn submit(&mut self, client: &ClubClient) -> Result<Image> {
        let checked = self
            .file
            .clone()
            .ok_or(ClubError::MissingFile)
            .and_then(|file| Ok((self.owner()?, file)));

        let result = match checked {
            Err(e) => {
                self.notice = Some(Notice::error(
                    "Please select a file and a project or event.",
                ));
                return Err(e);
            }
            Ok((owner, file)) => client.upload_image(owner, file).await,
        };
        report(
            &mut self.notice,
            result,
            "Image uploaded successfully!",
            "Failed to upload image",
        )
    }
}

/// Upload a source archive for a project.
#[derive(Debug, Clone, Default)]
pub struct ArchiveUploadForm {
    pub project_id: Option<u32>,
    pub file: Option<UploadFile>,
    notice: Option<Notice>,
}

impl ArchiveUploadForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub async fn submit(&mut self, client: &ClubClient) -> Result<ProjectFile> {
        let result = match (self.project_id, self.file.clone()) {
            (None, _) => Err(ClubError::MissingField("project_id")),
            (_, None) => Err(ClubError::MissingFile),
            (Some(project_id), Some(file)) => client.upload_project_file(project_id, file).await,
        };
        report(
            &mut self.notice,
            result,
            "Archive uploaded successfully!",
            "Failed to upload archive",
        )
    }
}

/// Upload a build of a project for one platform.
#[derive(Debug, Clone, Default)]
pub struct ExecutableUploadForm {
    pub project_id: Option<u32>,
    pub version: String,
    pub platform: Platform,
    pub file: Option<UploadFile>,
    notice: Option<Notice>,
}

impl ExecutableUploadForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub async fn submit(&mut self, client: &ClubClient) -> Result<Executable> {
        let result = match (self.project_id, self.file.clone()) {
            (None, _) => Err(ClubError::MissingField("project_id")),
            (_, None) => Err(ClubError::MissingFile),
            (Some(project_id), Some(file)) => match require("version", &self.version) {
                Err(e) => Err(e),
                Ok(()) => {
                    client
                        .upload_executable(project_id, self.version.trim(), self.platform, file)
                        .await
                }
            },
        };
        report(
            &mut self.notice,
            result,
            "Executable uploaded successfully!",
            "Failed to upload executable",
        )
    }
}
