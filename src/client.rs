use std::fmt;

use tracing::instrument;

use crate::api::{self, Backend};
use crate::config::Config;
use crate::error::Result;
use crate::model::*;

/// The main entry point for talking to the club backend.
///
/// `ClubClient` wraps a [`reqwest::Client`] together with the API base URL,
/// the asset origin and the admin API key. Every method is a single round
/// trip: no retries and no caching.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> clubsite::Result<()> {
/// use clubsite::{ClubClient, Config, ProjectPayload};
///
/// let config = Config::default().with_api_key("super_secret_api_key");
/// let client = ClubClient::new(&config);
///
/// let created = client
///     .create_project(&ProjectPayload {
///         name: "Alpha".into(),
///         description: "Our first project".into(),
///         technologies: "Rust".into(),
///         year: None,
///     })
///     .await?;
/// println!("created project {}", created.id);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ClubClient {
    http: reqwest::Client,
    base_url: String,
    asset_origin: String,
    api_key: Option<String>,
}

impl ClubClient {
    /// Create a new client with default HTTP settings.
    pub fn new(config: &Config) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Create a new client using the provided [`reqwest::Client`].
    ///
    /// Use this when you need to configure timeouts, proxies, headers, etc.
    pub fn with_client(client: reqwest::Client, config: &Config) -> Self {
        Self {
            http: client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            asset_origin: config.asset_origin.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    fn backend(&self) -> Backend<'_> {
        Backend {
            http: &self.http,
            base_url: &self.base_url,
            api_key: self.api_key.as_deref(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether admin calls can be made.
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Absolute URL of a stored asset given its server-relative path.
    pub fn asset_url(&self, file_path: &str) -> String {
        api::asset_url(&self.asset_origin, file_path)
    }

    /// Public download link for an executable.
    pub fn executable_download_url(&self, id: u32) -> String {
        self.backend().url(&api::files::executable_path(id))
    }

    // Projects

    /// Fetch all projects, in server order.
    #[instrument(skip(self))]
    pub async fn list_projects(&self) -> Result<Vec<Project>> {
        api::projects::list_projects(&self.backend()).await
    }

    #[instrument(skip(self))]
    pub async fn get_project(&self, id: u32) -> Result<Project> {
        api::projects::get_project(&self.backend(), id).await
    }

    #[instrument(skip(self, payload))]
    pub async fn create_project(&self, payload: &ProjectPayload) -> Result<Project> {
        api::projects::create_project(&self.backend(), payload).await
    }

    #[instrument(skip(self, payload))]
    pub async fn update_project(&self, id: u32, payload: &ProjectPayload) -> Result<Project> {
        api::projects::update_project(&self.backend(), id, payload).await
    }

    #[instrument(skip(self))]
    pub async fn delete_project(&self, id: u32) -> Result<Deleted> {
        api::projects::delete_project(&self.backend(), id).await
    }

    // Events

    /// Fetch all events, in server order.
    #[instrument(skip(self))]
    pub async fn list_events(&self) -> Result<Vec<Event>> {
        api::events::list_events(&self.backend()).await
    }

    #[instrument(skip(self))]
    pub async fn get_event(&self, id: u32) -> Result<Event> {
        api::events::get_event(&self.backend(), id).await
    }

    #[instrument(skip(self, payload))]
    pub async fn create_event(&self, payload: &EventPayload) -> Result<Event> {
        api::events::create_event(&self.backend(), payload).await
    }

    #[instrument(skip(self, payload))]
    pub async fn update_event(&self, id: u32, payload: &EventPayload) -> Result<Event> {
        api::events::update_event(&self.backend(), id, payload).await
    }

    #[instrument(skip(self))]
    pub async fn delete_event(&self, id: u32) -> Result<Deleted> {
        api::events::delete_event(&self.backend(), id).await
    }

    // Group info

    /// Fetch the group info, or `None` if the backend answers 404.
    #[instrument(skip(self))]
    pub async fn get_group_info(&self) -> Result<Option<GroupInfo>> {
        api::about::get_group_info(&self.backend()).await
    }

    #[instrument(skip(self, payload))]
    pub async fn create_group_info(&self, payload: &GroupInfoPayload) -> Result<GroupInfo> {
        api::about::create_group_info(&self.backend(), payload).await
    }

    #[instrument(skip(self, payload))]
    pub async fn update_group_info(&self, payload: &GroupInfoPayload) -> Result<GroupInfo> {
        api::about::update_group_info(&self.backend(), payload).await
    }

    // Images

    /// Upload an image attached to exactly one owner.
    #[instrument(skip(self, file))]
    pub async fn upload_image(&self, owner: ImageOwner, file: UploadFile) -> Result<Image> {
        api::gallery::upload_image(&self.backend(), owner, file).await
    }

    #[instrument(skip(self))]
    pub async fn list_images(&self, owner: ImageOwner) -> Result<Vec<Image>> {
        api::gallery::list_images(&self.backend(), owner).await
    }

    #[instrument(skip(self))]
    pub async fn list_project_images(&self, project_id: u32) -> Result<Vec<Image>> {
        self.list_images(ImageOwner::Project(project_id)).await
    }

    #[instrument(skip(self))]
    pub async fn list_event_images(&self, event_id: u32) -> Result<Vec<Image>> {
        self.list_images(ImageOwner::Event(event_id)).await
    }

    #[instrument(skip(self))]
    pub async fn delete_image(&self, id: u32) -> Result<Deleted> {
        api::gallery::delete_image(&self.backend(), id).await
    }

    // Project archives and executables

    /// Upload a source archive for a project.
    #[instrument(skip(self, file))]
    pub async fn upload_project_file(
        &self,
        project_id: u32,
        file: UploadFile,
    ) -> Result<ProjectFile> {
        api::files::upload_project_file(&self.backend(), project_id, file).await
    }

    #[instrument(skip(self))]
    pub async fn delete_project_file(&self, id: u32) -> Result<Deleted> {
        api::files::delete_project_file(&self.backend(), id).await
    }

    /// Download a source archive. Admin only.
    #[instrument(skip(self))]
    pub async fn download_project_file(&self, id: u32) -> Result<Vec<u8>> {
        api::files::download_project_file(&self.backend(), id).await
    }

    #[instrument(skip(self, file))]
    pub async fn upload_executable(
        &self,
        project_id: u32,
        version: &str,
        platform: Platform,
        file: UploadFile,
    ) -> Result<Executable> {
        api::files::upload_executable(&self.backend(), project_id, version, platform, file).await
    }

    #[instrument(skip(self))]
    pub async fn delete_executable(&self, id: u32) -> Result<Deleted> {
        api::files::delete_executable(&self.backend(), id).await
    }

    /// Download an executable. Public.
    #[instrument(skip(self))]
    pub async fn download_executable(&self, id: u32) -> Result<Vec<u8>> {
        api::files::download_executable(&self.backend(), id).await
    }
}

impl Default for ClubClient {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl fmt::Debug for ClubClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClubClient")
            .field("base_url", &self.base_url)
            .field("asset_origin", &self.asset_origin)
            .field("has_api_key", &self.api_key.is_some())
            .finish()
    }
}
