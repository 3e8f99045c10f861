use reqwest::Method;
use tracing::{debug, instrument};

use super::{Access, Backend};
use crate::error::Result;
use crate::model::{Deleted, Event, EventPayload};

#[instrument(skip(backend))]
pub(crate) async fn list_events(backend: &Backend<'_>) -> Result<Vec<Event>> {
    let events: Vec<Event> = super::get_json(backend, "/events/", Access::Public).await?;
    debug!(count = events.len(), "fetched events");
    Ok(events)
}

pub(crate) async fn get_event(backend: &Backend<'_>, id: u32) -> Result<Event> {
    super::get_json(backend, &format!("/events/{id}"), Access::Public).await
}

#[instrument(skip(backend, payload), fields(name = %payload.name, date = %payload.date))]
pub(crate) async fn create_event(backend: &Backend<'_>, payload: &EventPayload) -> Result<Event> {
    super::send_json(backend, Method::POST, "/admin/events/", payload).await
}

#[instrument(skip(backend, payload))]
pub(crate) async fn update_event(
    backend: &Backend<'_>,
    id: u32,
    payload: &EventPayload,
) -> Result<Event> {
    super::send_json(backend, Method::PUT, &format!("/admin/events/{id}"), payload).await
}

#[instrument(skip(backend))]
pub(crate) async fn delete_event(backend: &Backend<'_>, id: u32) -> Result<Deleted> {
    super::delete(backend, &format!("/admin/events/{id}")).await
}
