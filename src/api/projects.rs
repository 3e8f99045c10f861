use reqwest::Method;
use tracing::{debug, instrument};

use super::{Access, Backend};
use crate::error::Result;
use crate::model::{Deleted, Project, ProjectPayload};

#[instrument(skip(backend))]
pub(crate) async fn list_projects(backend: &Backend<'_>) -> Result<Vec<Project>> {
    let projects: Vec<Project> = super::get_json(backend, "/projects/", Access::Public).await?;
    debug!(count = projects.len(), "fetched projects");
    Ok(projects)
}

pub(crate) async fn get_project(backend: &Backend<'_>, id: u32) -> Result<Project> {
    super::get_json(backend, &format!("/projects/{id}"), Access::Public).await
}

#[instrument(skip(backend, payload), fields(name = %payload.name))]
pub(crate) async fn create_project(
    backend: &Backend<'_>,
    payload: &ProjectPayload,
) -> Result<Project> {
    super::send_json(backend, Method::POST, "/admin/projects/", payload).await
}

#[instrument(skip(backend, payload))]
pub(crate) async fn update_project(
    backend: &Backend<'_>,
    id: u32,
    payload: &ProjectPayload,
) -> Result<Project> {
    super::send_json(backend, Method::PUT, &format!("/admin/projects/{id}"), payload).await
}

#[instrument(skip(backend))]
pub(crate) async fn delete_project(backend: &Backend<'_>, id: u32) -> Result<Deleted> {
    super::delete(backend, &format!("/admin/projects/{id}")).await
}
