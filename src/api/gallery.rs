use tracing::{debug, instrument};

use super::{Access, Backend};
use crate::error::Result;
use crate::model::{Deleted, Image, ImageOwner, UploadFile};

#[instrument(skip(backend, file), fields(file_name = %file.file_name))]
pub(crate) async fn upload_image(
    backend: &Backend<'_>,
    owner: ImageOwner,
    file: UploadFile,
) -> Result<Image> {
    let image: Image =
        super::upload(backend, "/admin/upload_image/", file, vec![owner.form_field()]).await?;
    debug!(id = image.id, path = %image.file_path, "image stored");
    Ok(image)
}

#[instrument(skip(backend))]
pub(crate) async fn list_images(backend: &Backend<'_>, owner: ImageOwner) -> Result<Vec<Image>> {
    let path = match owner {
        ImageOwner::Project(id) => format!("/gallery/project/{id}"),
        ImageOwner::Event(id) => format!("/gallery/event/{id}"),
    };
    super::get_json(backend, &path, Access::Public).await
}

#[instrument(skip(backend))]
pub(crate) async fn delete_image(backend: &Backend<'_>, id: u32) -> Result<Deleted> {
    super::delete(backend, &format!("/admin/images/{id}")).await
}
