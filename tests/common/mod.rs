//! In-process stand-in for the club backend.
//!
//! Serves the same routes under `/api`, keeps records in memory, counts every
//! request it receives and guards admin routes with an `x-api-key` check.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use axum::{
    extract::{Multipart, Path, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use chrono::NaiveDate;
use clubsite::{
    ClubClient, Config, Deleted, Event, EventPayload, Executable, GroupInfo, GroupInfoPayload,
    Image, Platform, Project, ProjectFile, ProjectPayload,
};
use serde_json::json;

pub const TEST_API_KEY: &str = "test-api-key";

type Shared = Arc<Mutex<Store>>;
type Rejection = (StatusCode, Json<serde_json::Value>);
type Reply<T> = Result<Json<T>, Rejection>;

/// Everything the fake backend knows.
#[derive(Default)]
pub struct Store {
    next_id: u32,
    pub projects: Vec<Project>,
    pub events: Vec<Event>,
    pub about: Option<GroupInfo>,
    pub images: Vec<Image>,
    pub blobs: HashMap<u32, Vec<u8>>,
    /// Requests received so far, on any route.
    pub requests: usize,
    /// Answer `GET /about/` with this status instead of the real lookup.
    pub about_status: Option<StatusCode>,
    /// Make every admin delete fail with a 500.
    pub fail_deletes: bool,
    /// Hold every response back this long.
    pub delay: Option<Duration>,
}

impl Store {
    fn next_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    fn project_mut(&mut self, id: u32) -> Result<&mut Project, Rejection> {
        self.projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| not_found("Project not found"))
    }

    fn event_mut(&mut self, id: u32) -> Result<&mut Event, Rejection> {
        self.events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| not_found("Event not found"))
    }

    fn check_delete(&self) -> Result<(), Rejection> {
        if self.fail_deletes {
            return Err(reject(StatusCode::INTERNAL_SERVER_ERROR, "Database error"));
        }
        Ok(())
    }
}

/// A running fake backend bound to a random local port.
pub struct MockBackend {
    store: Shared,
    pub api_url: String,
    pub origin: String,
}

impl MockBackend {
    pub async fn start() -> Self {
        let store = Shared::default();
        let app = router(store.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        MockBackend {
            store,
            api_url: format!("http://{addr}/api"),
            origin: format!("http://{addr}"),
        }
    }

    pub fn config(&self) -> Config {
        Config {
            api_url: self.api_url.clone(),
            asset_origin: self.origin.clone(),
            ..Config::default()
        }
    }

    /// Admin client holding the right key.
    pub fn client(&self) -> ClubClient {
        ClubClient::new(&self.config().with_api_key(TEST_API_KEY))
    }

    /// Client without any key.
    pub fn public_client(&self) -> ClubClient {
        ClubClient::new(&self.config())
    }

    pub fn client_with_key(&self, key: &str) -> ClubClient {
        ClubClient::new(&self.config().with_api_key(key))
    }

    pub fn store(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap()
    }

    pub fn requests(&self) -> usize {
        self.store().requests
    }

    pub fn seed_project(&self, name: &str) -> Project {
        let mut store = self.store();
        let project = Project {
            id: store.next_id(),
            name: name.to_string(),
            description: format!("{name} description"),
            technologies: "Rust".to_string(),
            year: Some(2024),
            images: Vec::new(),
            files: Vec::new(),
            executable: Vec::new(),
        };
        store.projects.push(project.clone());
        project
    }

    pub fn seed_event(&self, name: &str, date: NaiveDate) -> Event {
        let mut store = self.store();
        let event = Event {
            id: store.next_id(),
            name: name.to_string(),
            date: date.and_hms_opt(18, 30, 0).unwrap(),
            description: format!("{name} description"),
            images: Vec::new(),
        };
        store.events.push(event.clone());
        event
    }

    pub fn seed_about(&self, payload: GroupInfoPayload) -> GroupInfo {
        let mut store = self.store();
        let info = GroupInfo {
            id: Some(store.next_id()),
            name: payload.name,
            description: payload.description,
            contact: payload.contact,
        };
        store.about = Some(info.clone());
        info
    }
}

fn reject(status: StatusCode, detail: &str) -> Rejection {
    (status, Json(json!({ "detail": detail })))
}

fn not_found(detail: &str) -> Rejection {
    reject(StatusCode::NOT_FOUND, detail)
}

fn bad_request(detail: impl std::fmt::Display) -> Rejection {
    reject(StatusCode::BAD_REQUEST, &detail.to_string())
}

fn router(store: Shared) -> Router {
    let admin = Router::new()
        .route("/projects/", post(create_project))
        .route("/projects/{id}", put(update_project).delete(delete_project))
        .route("/events/", post(create_event))
        .route("/events/{id}", put(update_event).delete(delete_event))
        .route("/about/", post(create_about).put(update_about))
        .route("/upload_image/", post(upload_image))
        .route("/images/{id}", axum::routing::delete(delete_image))
        .route("/projects/files/upload", post(upload_project_file))
        .route("/projects/files/{id}", axum::routing::delete(delete_project_file))
        .route("/projects/files/{id}/download", get(download_blob))
        .route("/projects/executables/upload", post(upload_executable))
        .route(
            "/projects/executables/{id}",
            axum::routing::delete(delete_executable),
        )
        .route_layer(middleware::from_fn(require_api_key));

    let api = Router::new()
        .route("/projects/", get(list_projects))
        .route("/projects/{id}", get(get_project))
        .route("/events/", get(list_events))
        .route("/events/{id}", get(get_event))
        .route("/about/", get(get_about))
        .route("/gallery/project/{id}", get(project_gallery))
        .route("/gallery/event/{id}", get(event_gallery))
        .route("/download/executable/{id}", get(download_blob))
        .nest("/admin", admin);

    Router::new()
        .nest("/api", api)
        .layer(middleware::from_fn_with_state(store.clone(), count_requests))
        .with_state(store)
}

async fn count_requests(State(store): State<Shared>, request: Request, next: Next) -> Response {
    let delay = {
        let mut store = store.lock().unwrap();
        store.requests += 1;
        store.delay
    };
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
    next.run(request).await
}

async fn require_api_key(request: Request, next: Next) -> Response {
    let provided = request
        .headers()
        .get("x-api-key")
        .and_then(|v| v.to_str().ok());
    if provided != Some(TEST_API_KEY) {
        return reject(StatusCode::UNAUTHORIZED, "Invalid API key").into_response();
    }
    next.run(request).await
}

// Projects

async fn list_projects(State(store): State<Shared>) -> Json<Vec<Project>> {
    Json(store.lock().unwrap().projects.clone())
}

async fn get_project(State(store): State<Shared>, Path(id): Path<u32>) -> Reply<Project> {
    let mut store = store.lock().unwrap();
    Ok(Json(store.project_mut(id)?.clone()))
}

async fn create_project(
    State(store): State<Shared>,
    Json(payload): Json<ProjectPayload>,
) -> Json<Project> {
    let mut store = store.lock().unwrap();
    let project = Project {
        id: store.next_id(),
        name: payload.name,
        description: payload.description,
        technologies: payload.technologies,
        year: payload.year,
        images: Vec::new(),
        files: Vec::new(),
        executable: Vec::new(),
    };
    store.projects.push(project.clone());
    Json(project)
}

async fn update_project(
    State(store): State<Shared>,
    Path(id): Path<u32>,
    Json(payload): Json<ProjectPayload>,
) -> Reply<Project> {
    let mut store = store.lock().unwrap();
    let project = store.project_mut(id)?;
    project.name = payload.name;
    project.description = payload.description;
    project.technologies = payload.technologies;
    project.year = payload.year;
    Ok(Json(project.clone()))
}

async fn delete_project(State(store): State<Shared>, Path(id): Path<u32>) -> Reply<Deleted> {
    let mut store = store.lock().unwrap();
    store.check_delete()?;
    store.project_mut(id)?;
    store.projects.retain(|p| p.id != id);
    store.images.retain(|i| i.project_id != Some(id));
    Ok(Json(Deleted {
        message: "Project deleted successfully".into(),
    }))
}

// Events

async fn list_events(State(store): State<Shared>) -> Json<Vec<Event>> {
    Json(store.lock().unwrap().events.clone())
}

async fn get_event(State(store): State<Shared>, Path(id): Path<u32>) -> Reply<Event> {
    let mut store = store.lock().unwrap();
    Ok(Json(store.event_mut(id)?.clone()))
}

async fn create_event(
    State(store): State<Shared>,
    Json(payload): Json<EventPayload>,
) -> Json<Event> {
    let mut store = store.lock().unwrap();
    let event = Event {
        id: store.next_id(),
        name: payload.name,
        date: payload.date.and_hms_opt(0, 0, 0).unwrap(),
        description: payload.description,
        images: Vec::new(),
    };
    store.events.push(event.clone());
    Json(event)
}

async fn update_event(
    State(store): State<Shared>,
    Path(id): Path<u32>,
    Json(payload): Json<EventPayload>,
) -> Reply<Event> {
    let mut store = store.lock().unwrap();
    let event = store.event_mut(id)?;
    event.name = payload.name;
    event.date = payload.date.and_hms_opt(0, 0, 0).unwrap();
    event.description = payload.description;
    Ok(Json(event.clone()))
}

async fn delete_event(State(store): State<Shared>, Path(id): Path<u32>) -> Reply<Deleted> {
    let mut store = store.lock().unwrap();
    store.check_delete()?;
    store.event_mut(id)?;
    store.events.retain(|e| e.id != id);
    store.images.retain(|i| i.event_id != Some(id));
    Ok(Json(Deleted {
        message: "Event deleted successfully".into(),
    }))
}

// Group info

async fn get_about(State(store): State<Shared>) -> Reply<GroupInfo> {
    let store = store.lock().unwrap();
    if let Some(status) = store.about_status {
        return Err(reject(status, "forced failure"));
    }
    store
        .about
        .clone()
        .map(Json)
        .ok_or_else(|| not_found("Group info not found"))
}

async fn create_about(
    State(store): State<Shared>,
    Json(payload): Json<GroupInfoPayload>,
) -> Reply<GroupInfo> {
    let mut store = store.lock().unwrap();
    if store.about.is_some() {
        return Err(bad_request("Group info already exists"));
    }
    let info = GroupInfo {
        id: Some(store.next_id()),
        name: payload.name,
        description: payload.description,
        contact: payload.contact,
    };
    store.about = Some(info.clone());
    Ok(Json(info))
}

async fn update_about(
    State(store): State<Shared>,
    Json(payload): Json<GroupInfoPayload>,
) -> Reply<GroupInfo> {
    let mut store = store.lock().unwrap();
    let info = store
        .about
        .as_mut()
        .ok_or_else(|| not_found("Group info not found"))?;
    info.name = payload.name;
    info.description = payload.description;
    info.contact = payload.contact;
    Ok(Json(info.clone()))
}

// Uploads

#[derive(Default)]
struct Upload {
    file_name: String,
    bytes: Vec<u8>,
    fields: HashMap<String, String>,
}

impl Upload {
    fn id_field(&self, name: &str) -> Result<Option<u32>, Rejection> {
        self.fields
            .get(name)
            .map(|v| v.parse::<u32>().map_err(bad_request))
            .transpose()
    }
}

async fn read_upload(mut multipart: Multipart) -> Result<Upload, Rejection> {
    let mut upload = Upload::default();
    while let Some(field) = multipart.next_field().await.map_err(bad_request)? {
        let name = field.name().unwrap_or_default().to_string();
        if name == "file" {
            upload.file_name = field.file_name().unwrap_or_default().to_string();
            upload.bytes = field.bytes().await.map_err(bad_request)?.to_vec();
        } else {
            let value = field.text().await.map_err(bad_request)?;
            upload.fields.insert(name, value);
        }
    }
    if upload.file_name.is_empty() {
        return Err(bad_request("No file provided"));
    }
    Ok(upload)
}

async fn upload_image(State(store): State<Shared>, multipart: Multipart) -> Reply<Image> {
    let upload = read_upload(multipart).await?;
    let project_id = upload.id_field("project_id")?;
    let event_id = upload.id_field("event_id")?;
    if project_id.is_some() == event_id.is_some() {
        return Err(bad_request("Provide either project_id or event_id"));
    }

    let mut store = store.lock().unwrap();
    let image = Image {
        id: store.next_id(),
        file_path: format!("static/images/{}", upload.file_name),
        event_id,
        project_id,
    };
    match (project_id, event_id) {
        (Some(id), _) => store.project_mut(id)?.images.push(image.clone()),
        (_, Some(id)) => store.event_mut(id)?.images.push(image.clone()),
        _ => unreachable!(),
    }
    store.images.push(image.clone());
    Ok(Json(image))
}

async fn project_gallery(State(store): State<Shared>, Path(id): Path<u32>) -> Json<Vec<Image>> {
    let store = store.lock().unwrap();
    Json(
        store
            .images
            .iter()
            .filter(|i| i.project_id == Some(id))
            .cloned()
            .collect(),
    )
}

async fn event_gallery(State(store): State<Shared>, Path(id): Path<u32>) -> Json<Vec<Image>> {
    let store = store.lock().unwrap();
    Json(
        store
            .images
            .iter()
            .filter(|i| i.event_id == Some(id))
            .cloned()
            .collect(),
    )
}

async fn delete_image(State(store): State<Shared>, Path(id): Path<u32>) -> Reply<Deleted> {
    let mut store = store.lock().unwrap();
    store.check_delete()?;
    if !store.images.iter().any(|i| i.id == id) {
        return Err(not_found("Image not found"));
    }
    store.images.retain(|i| i.id != id);
    for project in &mut store.projects {
        project.images.retain(|i| i.id != id);
    }
    for event in &mut store.events {
        event.images.retain(|i| i.id != id);
    }
    Ok(Json(Deleted {
        message: "Image deleted successfully".into(),
    }))
}

async fn upload_project_file(
    State(store): State<Shared>,
    multipart: Multipart,
) -> Reply<ProjectFile> {
    let upload = read_upload(multipart).await?;
    let project_id = upload
        .id_field("project_id")?
        .ok_or_else(|| bad_request("project_id is required"))?;

    let mut store = store.lock().unwrap();
    let file = ProjectFile {
        id: store.next_id(),
        file_path: format!("static/files/{}", upload.file_name),
        project_id: Some(project_id),
    };
    store.project_mut(project_id)?.files.push(file.clone());
    store.blobs.insert(file.id, upload.bytes);
    Ok(Json(file))
}

async fn delete_project_file(State(store): State<Shared>, Path(id): Path<u32>) -> Reply<Deleted> {
    let mut store = store.lock().unwrap();
    store.check_delete()?;
    let before: usize = store.projects.iter().map(|p| p.files.len()).sum();
    for project in &mut store.projects {
        project.files.retain(|f| f.id != id);
    }
    let after: usize = store.projects.iter().map(|p| p.files.len()).sum();
    if before == after {
        return Err(not_found("File not found"));
    }
    store.blobs.remove(&id);
    Ok(Json(Deleted {
        message: "File deleted successfully".into(),
    }))
}

async fn upload_executable(
    State(store): State<Shared>,
    multipart: Multipart,
) -> Reply<Executable> {
    let upload = read_upload(multipart).await?;
    let project_id = upload
        .id_field("project_id")?
        .ok_or_else(|| bad_request("project_id is required"))?;
    let version = upload
        .fields
        .get("version")
        .cloned()
        .ok_or_else(|| bad_request("version is required"))?;
    let platform: Platform = upload
        .fields
        .get("platform")
        .map(|p| p.parse::<Platform>().map_err(bad_request))
        .transpose()?
        .unwrap_or_default();

    let mut store = store.lock().unwrap();
    let exe = Executable {
        id: store.next_id(),
        file_path: format!("static/executables/{}", upload.file_name),
        version,
        platform,
        project_id: Some(project_id),
    };
    store.project_mut(project_id)?.executable.push(exe.clone());
    store.blobs.insert(exe.id, upload.bytes);
    Ok(Json(exe))
}

async fn delete_executable(State(store): State<Shared>, Path(id): Path<u32>) -> Reply<Deleted> {
    let mut store = store.lock().unwrap();
    store.check_delete()?;
    let before: usize = store.projects.iter().map(|p| p.executable.len()).sum();
    for project in &mut store.projects {
        project.executable.retain(|e| e.id != id);
    }
    let after: usize = store.projects.iter().map(|p| p.executable.len()).sum();
    if before == after {
        return Err(not_found("Executable not found"));
    }
    store.blobs.remove(&id);
    Ok(Json(Deleted {
        message: "Executable deleted successfully".into(),
    }))
}

async fn download_blob(State(store): State<Shared>, Path(id): Path<u32>) -> Response {
    match store.lock().unwrap().blobs.get(&id) {
        Some(bytes) => bytes.clone().into_response(),
        None => not_found("File not found").into_response(),
    }
}
