use reqwest::Method;
use tracing::{debug, error};

use super::{report, require};
use crate::client::ClubClient;
use crate::error::{ClubError, Result};
use crate::model::{GroupInfo, GroupInfoPayload};
use crate::views::{Mount, Notice, Refresh};

/// What the last `GET /about/` reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Presence {
    /// Not loaded yet, or the last load failed before any answer.
    #[default]
    Unknown,
    Absent,
    Present,
}

/// Create-or-update form for the singleton group info.
///
/// [`load`](Self::load) asks the backend first: a 404 puts the form in
/// create mode, an existing record puts it in update mode with the fields
/// filled in. Any other failure is reported as an error and the mode is left
/// alone, so a transient or auth failure is never mistaken for absence.
#[derive(Debug, Clone, Default)]
pub struct GroupInfoForm {
    presence: Presence,
    pub fields: GroupInfoPayload,
    mount: Mount,
    notice: Option<Notice>,
}

impl GroupInfoForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn presence(&self) -> Presence {
        self.presence
    }

    pub fn mount(&self) -> &Mount {
        &self.mount
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// PUT when a record exists, POST when the backend reported none. `None`
    /// until a load has succeeded: the form cannot tell which one applies.
    pub fn method(&self) -> Option<Method> {
        match self.presence {
            Presence::Present => Some(Method::PUT),
            Presence::Absent => Some(Method::POST),
            Presence::Unknown => None,
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self.presence {
            Presence::Present => "Update",
            Presence::Unknown | Presence::Absent => "Create",
        }
    }

    pub async fn load(&mut self, client: &ClubClient) -> Result<Refresh> {
        match self.mount.run(client.get_group_info()).await {
            None => {
                debug!("group info form unmounted, discarding group info");
                Ok(Refresh::Cancelled)
            }
            Some(Ok(Some(info))) => {
                self.fields = info.payload();
                self.presence = Presence::Present;
                Ok(Refresh::Applied)
            }
            Some(Ok(None)) => {
                self.presence = Presence::Absent;
                Ok(Refresh::Applied)
            }
            Some(Err(e)) => {
                error!(error = %e, "error fetching group info");
                self.notice = Some(Notice::error(format!("Could not load group info: {e}")));
                Err(e)
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        require("description", &self.fields.description)?;
        require("contact", &self.fields.contact)
    }

    /// Create or update, then adopt the saved record. After a successful
    /// submit the form is always in update mode. Without a successful
    /// [`load`](Self::load) nothing is sent.
    pub async fn submit(&mut self, client: &ClubClient) -> Result<GroupInfo> {
        let result = match self.validate() {
            Err(e) => Err(e),
            Ok(()) => match self.presence {
                Presence::Present => client.update_group_info(&self.fields).await,
                Presence::Absent => client.create_group_info(&self.fields).await,
                Presence::Unknown => Err(ClubError::GroupInfoNotLoaded),
            },
        };
        let saved = report(
            &mut self.notice,
            result,
            "Group info updated successfully!",
            "Failed to update group info",
        )?;
        self.fields = saved.payload();
        self.presence = Presence::Present;
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unloaded_form_has_no_method() {
        let form = GroupInfoForm::new();
        assert_eq!(form.presence(), Presence::Unknown);
        assert_eq!(form.method(), None);
    }

    #[tokio::test]
    async fn test_unloaded_submit_is_refused() {
        let mut form = GroupInfoForm::new();
        form.fields = GroupInfoPayload {
            name: "Robotics Club".into(),
            description: "We build robots.".into(),
            contact: "club@example.org".into(),
        };

        // The default client points at nothing; the refusal happens first.
        let err = form.submit(&ClubClient::default()).await.unwrap_err();
        assert!(matches!(err, ClubError::GroupInfoNotLoaded));
        assert_eq!(form.presence(), Presence::Unknown);
    }
}
