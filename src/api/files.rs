use tracing::instrument;

use super::{Access, Backend};
use crate::error::Result;
use crate::model::{Deleted, Executable, Platform, ProjectFile, UploadFile};

#[instrument(skip(backend, file), fields(file_name = %file.file_name))]
pub(crate) async fn upload_project_file(
    backend: &Backend<'_>,
    project_id: u32,
    file: UploadFile,
) -> Result<ProjectFile> {
    super::upload(
        backend,
        "/admin/projects/files/upload",
        file,
        vec![("project_id", project_id.to_string())],
    )
    .await
}

#[instrument(skip(backend))]
pub(crate) async fn delete_project_file(backend: &Backend<'_>, id: u32) -> Result<Deleted> {
    super::delete(backend, &format!("/admin/projects/files/{id}")).await
}

#[instrument(skip(backend))]
pub(crate) async fn download_project_file(backend: &Backend<'_>, id: u32) -> Result<Vec<u8>> {
    super::download(
        backend,
        &format!("/admin/projects/files/{id}/download"),
        Access::Admin,
    )
    .await
}

#[instrument(skip(backend, file), fields(file_name = %file.file_name))]
pub(crate) async fn upload_executable(
    backend: &Backend<'_>,
    project_id: u32,
    version: &str,
    platform: Platform,
    file: UploadFile,
) -> Result<Executable> {
    super::upload(
        backend,
        "/admin/projects/executables/upload",
        file,
        vec![
            ("project_id", project_id.to_string()),
            ("version", version.to_string()),
            ("platform", platform.to_string()),
        ],
    )
    .await
}

#[instrument(skip(backend))]
pub(crate) async fn delete_executable(backend: &Backend<'_>, id: u32) -> Result<Deleted> {
    super::delete(backend, &format!("/admin/projects/executables/{id}")).await
}

pub(crate) fn executable_path(id: u32) -> String {
    format!("/download/executable/{id}")
}

#[instrument(skip(backend))]
pub(crate) async fn download_executable(backend: &Backend<'_>, id: u32) -> Result<Vec<u8>> {
    super::download(backend, &executable_path(id), Access::Public).await
}
