use chrono::NaiveDate;

use super::{report, require, FormMode};
use crate::client::ClubClient;
use crate::error::{ClubError, Result};
use crate::model::{Event, EventPayload, DATE_INPUT_FORMAT};
use crate::views::Notice;

/// Text fields of the event form. `date` holds what a date input shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFields {
    pub name: String,
    pub date: String,
    pub description: String,
}

impl EventFields {
    pub fn to_payload(&self) -> Result<EventPayload> {
        require("name", &self.name)?;
        require("date", &self.date)?;
        require("description", &self.description)?;

        let date = NaiveDate::parse_from_str(self.date.trim(), DATE_INPUT_FORMAT).map_err(
            |source| ClubError::InvalidDate {
                input: self.date.clone(),
                source,
            },
        )?;
        Ok(EventPayload {
            name: self.name.clone(),
            date,
            description: self.description.clone(),
        })
    }
}

/// Create or edit an event.
#[derive(Debug, Clone, Default)]
pub struct EventForm {
    mode: FormMode,
    pub fields: EventFields,
    notice: Option<Notice>,
}

impl EventForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn editing(event: &Event) -> Self {
        let mut form = Self::new();
        form.load(Some(event));
        form
    }

    /// Seed from an event, reformatting its timestamp to `YYYY-MM-DD`, or
    /// reset to an empty create form.
    pub fn load(&mut self, event: Option<&Event>) {
        match event {
            Some(event) => {
                self.mode = FormMode::Edit(event.id);
                self.fields = EventFields {
                    name: event.name.clone(),
                    date: event.date_input_value(),
                    description: event.description.clone(),
                };
            }
            None => {
                self.mode = FormMode::Create;
                self.fields = EventFields::default();
            }
        }
        self.notice = None;
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub async fn submit(&mut self, client: &ClubClient) -> Result<Event> {
        let result = match self.fields.to_payload() {
            Err(e) => Err(e),
            Ok(payload) => match self.mode {
                FormMode::Create => client.create_event(&payload).await,
                FormMode::Edit(id) => client.update_event(id, &payload).await,
            },
        };
        report(
            &mut self.notice,
            result,
            "Event saved.",
            "Error submitting event",
        )
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;

    use super::*;

    #[test]
    fn test_edit_mode_reformats_date() {
        let event = Event {
            id: 5,
            name: "Game jam".into(),
            date: NaiveDateTime::parse_from_str("2024-03-08T17:45:00", "%Y-%m-%dT%H:%M:%S")
                .unwrap(),
            description: "48h".into(),
            images: vec![],
        };

        let form = EventForm::editing(&event);
        assert_eq!(form.mode(), FormMode::Edit(5));
        assert_eq!(form.fields.date, "2024-03-08");
    }

    #[test]
    fn test_payload_validation() {
        let mut fields = EventFields {
            name: "Meetup".into(),
            date: "2024-13-40".into(),
            description: "d".into(),
        };
        assert!(matches!(
            fields.to_payload(),
            Err(ClubError::InvalidDate { .. })
        ));

        fields.date = "2024-12-04".into();
        let payload = fields.to_payload().unwrap();
        assert_eq!(payload.date, NaiveDate::from_ymd_opt(2024, 12, 4).unwrap());

        fields.name.clear();
        assert!(matches!(
            fields.to_payload(),
            Err(ClubError::MissingField("name"))
        ));
    }
}
