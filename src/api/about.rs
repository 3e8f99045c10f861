use reqwest::Method;
use tracing::{debug, instrument};

use super::{Access, Backend};
use crate::error::Result;
use crate::model::{GroupInfo, GroupInfoPayload};

/// Fetch the singleton group info. A 404 means it has not been created yet;
/// any other failure is returned as an error.
#[instrument(skip(backend))]
pub(crate) async fn get_group_info(backend: &Backend<'_>) -> Result<Option<GroupInfo>> {
    match super::get_json(backend, "/about/", Access::Public).await {
        Ok(info) => Ok(Some(info)),
        Err(e) if e.is_not_found() => {
            debug!("group info does not exist yet");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

#[instrument(skip(backend, payload))]
pub(crate) async fn create_group_info(
    backend: &Backend<'_>,
    payload: &GroupInfoPayload,
) -> Result<GroupInfo> {
    super::send_json(backend, Method::POST, "/admin/about/", payload).await
}

#[instrument(skip(backend, payload))]
pub(crate) async fn update_group_info(
    backend: &Backend<'_>,
    payload: &GroupInfoPayload,
) -> Result<GroupInfo> {
    super::send_json(backend, Method::PUT, "/admin/about/", payload).await
}
