use strum_macros::EnumString;
use tracing::{info, warn};

use crate::client::ClubClient;
use crate::error::Result;
use crate::model::{Event, Executable, Image, ImageOwner, Project, ProjectFile};
use crate::views::{
    ArchiveUploadForm, EventForm, EventList, ExecutableUploadForm, GroupInfoForm, ImageList,
    ImageUploadForm, ProjectForm, ProjectList, Refresh,
};

/// Sections of the admin page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumString, strum_macros::Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum AdminView {
    #[default]
    Projects,
    Events,
    About,
    Images,
    Uploads,
}

/// The admin page: one list/form pair per resource and a view switcher.
///
/// Successful form submits fold the saved record into the matching list and
/// close the form. Uploads change what the backend embeds in projects and
/// events, so they refetch those collections.
#[derive(Debug, Default)]
pub struct AdminPage {
    view: AdminView,
    pub projects: ProjectList,
    pub project_form: Option<ProjectForm>,
    pub events: EventList,
    pub event_form: Option<EventForm>,
    pub about: GroupInfoForm,
    pub images: ImageList,
    pub image_upload: ImageUploadForm,
    pub archive_upload: ArchiveUploadForm,
    pub executable_upload: ExecutableUploadForm,
}

impl AdminPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AdminView {
        self.view
    }

    /// Show another section and load what it displays.
    pub async fn switch(&mut self, view: AdminView, client: &ClubClient) -> Result<Refresh> {
        info!(%view, "switching admin view");
        self.view = view;
        match view {
            AdminView::Projects => self.projects.refresh(client).await,
            AdminView::Events => self.events.refresh(client).await,
            AdminView::About => self.about.load(client).await,
            AdminView::Images => self.images.refresh(client).await,
            AdminView::Uploads => self.image_upload.load_options(client).await,
        }
    }

    // Projects

    pub fn new_project(&mut self) {
        self.project_form = Some(ProjectForm::new());
    }

    /// Open the form on a listed project. Returns false if it is not listed.
    pub fn edit_project(&mut self, id: u32) -> bool {
        self.project_form = self.projects.edit(id).map(|p| ProjectForm::editing(&p));
        self.project_form.is_some()
    }

    pub fn close_project_form(&mut self) {
        self.project_form = None;
    }

    /// Submit the open project form (a blank create form if none is open).
    pub async fn submit_project(&mut self, client: &ClubClient) -> Result<Project> {
        let form = self.project_form.get_or_insert_with(ProjectForm::new);
        let saved = form.submit(client).await?;
        self.projects.apply_saved(saved.clone());
        self.project_form = None;
        Ok(saved)
    }

    // Events

    pub fn new_event(&mut self) {
        self.event_form = Some(EventForm::new());
    }

    pub fn edit_event(&mut self, id: u32) -> bool {
        self.event_form = self.events.edit(id).map(|e| EventForm::editing(&e));
        self.event_form.is_some()
    }

    pub fn close_event_form(&mut self) {
        self.event_form = None;
    }

    pub async fn submit_event(&mut self, client: &ClubClient) -> Result<Event> {
        let form = self.event_form.get_or_insert_with(EventForm::new);
        let saved = form.submit(client).await?;
        self.events.apply_saved(saved.clone());
        self.event_form = None;
        Ok(saved)
    }

    // Images and uploads

    /// Point the image list at an owner and load its images.
    pub async fn show_images(
        &mut self,
        owner: Option<ImageOwner>,
        client: &ClubClient,
    ) -> Result<Refresh> {
        self.images.set_owner(owner);
        self.images.refresh(client).await
    }

    pub async fn upload_image(&mut self, client: &ClubClient) -> Result<Image> {
        let image = self.image_upload.submit(client).await?;
        self.refresh_collections(client).await;
        Ok(image)
    }

    pub async fn upload_archive(&mut self, client: &ClubClient) -> Result<ProjectFile> {
        let file = self.archive_upload.submit(client).await?;
        self.refresh_collections(client).await;
        Ok(file)
    }

    pub async fn upload_executable(&mut self, client: &ClubClient) -> Result<Executable> {
        let exe = self.executable_upload.submit(client).await?;
        self.refresh_collections(client).await;
        Ok(exe)
    }

    async fn refresh_collections(&mut self, client: &ClubClient) {
        if let Err(e) = self.projects.refresh(client).await {
            warn!(error = %e, "projects not refreshed after upload");
        }
        if let Err(e) = self.events.refresh(client).await {
            warn!(error = %e, "events not refreshed after upload");
        }
        if let Err(e) = self.images.refresh(client).await {
            warn!(error = %e, "images not refreshed after upload");
        }
    }
}
