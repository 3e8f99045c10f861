//! List views: fetch a collection, render it, edit or delete single items.

use std::future::Future;

use tracing::{debug, error, warn};

use super::{Confirm, Mount, Notice};
use crate::client::ClubClient;
use crate::error::{ClubError, Result};
use crate::model::{Deleted, Event, Identified, Image, ImageOwner, Project};

/// Where a list view gets its items from and how it deletes them.
pub trait ListSource {
    type Item: Identified + Clone;

    /// Singular noun used in prompts and messages.
    const NOUN: &'static str;

    fn fetch(&self, client: &ClubClient) -> impl Future<Output = Result<Vec<Self::Item>>>;

    fn remove(&self, client: &ClubClient, id: u32) -> impl Future<Output = Result<Deleted>>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Projects;

impl ListSource for Projects {
    type Item = Project;
    const NOUN: &'static str = "project";

    async fn fetch(&self, client: &ClubClient) -> Result<Vec<Project>> {
        client.list_projects().await
    }

    async fn remove(&self, client: &ClubClient, id: u32) -> Result<Deleted> {
        client.delete_project(id).await
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Events;

impl ListSource for Events {
    type Item = Event;
    const NOUN: &'static str = "event";

    async fn fetch(&self, client: &ClubClient) -> Result<Vec<Event>> {
        client.list_events().await
    }

    async fn remove(&self, client: &ClubClient, id: u32) -> Result<Deleted> {
        client.delete_event(id).await
    }
}

/// Images of one owner. Without an owner the list is empty and nothing is
/// fetched.
#[derive(Debug, Clone, Copy, Default)]
pub struct Gallery {
    owner: Option<ImageOwner>,
}

impl ListSource for Gallery {
    type Item = Image;
    const NOUN: &'static str = "image";

    async fn fetch(&self, client: &ClubClient) -> Result<Vec<Image>> {
        match self.owner {
            Some(owner) => client.list_images(owner).await,
            None => Ok(Vec::new()),
        }
    }

    async fn remove(&self, client: &ClubClient, id: u32) -> Result<Deleted> {
        client.delete_image(id).await
    }
}

pub type ProjectList = ListView<Projects>;
pub type EventList = ListView<Events>;
pub type ImageList = ListView<Gallery>;

/// Result of a refresh that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    Applied,
    /// The view was unmounted while the fetch was in flight.
    Cancelled,
}

#[derive(Debug)]
pub enum DeleteOutcome {
    /// The user said no; nothing was sent.
    Declined,
    Removed(Deleted),
    /// The backend no longer knew the item; it was dropped locally as well.
    Gone,
    /// The delete failed for another reason and the list was refetched.
    Failed(ClubError),
}

/// A collection view that owns nothing beyond the raw list.
#[derive(Debug)]
pub struct ListView<S: ListSource> {
    source: S,
    items: Vec<S::Item>,
    mount: Mount,
    notice: Option<Notice>,
}

impl<S: ListSource + Default> Default for ListView<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S: ListSource> ListView<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            items: Vec::new(),
            mount: Mount::new(),
            notice: None,
        }
    }

    /// Items in the order the server returned them.
    pub fn items(&self) -> &[S::Item] {
        &self.items
    }

    pub fn mount(&self) -> &Mount {
        &self.mount
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    /// Replace the list with a fresh copy from the backend. On failure the
    /// previous list stays as it was.
    pub async fn refresh(&mut self, client: &ClubClient) -> Result<Refresh> {
        match self.mount.run(self.source.fetch(client)).await {
            None => {
                debug!(noun = S::NOUN, "view unmounted, discarding fetched list");
                Ok(Refresh::Cancelled)
            }
            Some(Ok(items)) => {
                self.items = items;
                Ok(Refresh::Applied)
            }
            Some(Err(e)) => {
                error!(noun = S::NOUN, error = %e, "failed to fetch list");
                self.notice = Some(Notice::error(format!("Could not load {}s: {e}", S::NOUN)));
                Err(e)
            }
        }
    }

    /// Hand a copy of the item to an edit form. No validation happens here.
    pub fn edit(&self, id: u32) -> Option<S::Item> {
        self.items.iter().find(|item| item.id() == id).cloned()
    }

    /// Fold a record returned by a create or update into the list.
    pub fn apply_saved(&mut self, saved: S::Item) {
        match self.items.iter_mut().find(|item| item.id() == saved.id()) {
            Some(slot) => *slot = saved,
            None => self.items.push(saved),
        }
    }

    /// Delete an item after the user confirms.
    pub async fn delete(
        &mut self,
        client: &ClubClient,
        id: u32,
        confirm: &impl Confirm,
    ) -> DeleteOutcome {
        let prompt = format!("Are you sure you want to delete this {}?", S::NOUN);
        if !confirm.confirm(&prompt) {
            return DeleteOutcome::Declined;
        }

        match self.source.remove(client, id).await {
            Ok(ack) => {
                self.items.retain(|item| item.id() != id);
                let text = if ack.message.is_empty() {
                    format!("Deleted {} {id}", S::NOUN)
                } else {
                    ack.message.clone()
                };
                self.notice = Some(Notice::info(text));
                DeleteOutcome::Removed(ack)
            }
            Err(e) if e.is_not_found() => {
                warn!(noun = S::NOUN, id, "item was already gone");
                self.items.retain(|item| item.id() != id);
                DeleteOutcome::Gone
            }
            Err(e) => {
                error!(noun = S::NOUN, id, error = %e, "delete failed");
                self.notice = Some(Notice::error(format!("Failed to delete {}: {e}", S::NOUN)));
                if let Err(refetch) = self.refresh(client).await {
                    warn!(error = %refetch, "could not refetch after failed delete");
                }
                DeleteOutcome::Failed(e)
            }
        }
    }
}

impl ImageList {
    pub fn for_owner(owner: Option<ImageOwner>) -> Self {
        Self::new(Gallery { owner })
    }

    pub fn owner(&self) -> Option<ImageOwner> {
        self.source.owner
    }

    /// Point the list at another owner. The old images are cleared; call
    /// [`refresh`](ListView::refresh) to load the new ones.
    pub fn set_owner(&mut self, owner: Option<ImageOwner>) {
        if self.source.owner != owner {
            self.source.owner = owner;
            self.items.clear();
        }
    }
}
