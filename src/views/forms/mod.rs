//! Form views. Each form either creates a new record or edits an existing
//! one, and a submit performs exactly one backend call.

mod event;
mod group_info;
mod project;
mod upload;

pub use event::*;
pub use group_info::*;
pub use project::*;
pub use upload::*;

use reqwest::Method;
use tracing::{error, info};

use super::Notice;
use crate::error::{ClubError, Result};

/// Whether a form creates a record or edits the one with the given id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Create,
    Edit(u32),
}

impl FormMode {
    pub fn method(&self) -> Method {
        match self {
            FormMode::Create => Method::POST,
            FormMode::Edit(_) => Method::PUT,
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self {
            FormMode::Create => "Create",
            FormMode::Edit(_) => "Update",
        }
    }
}

/// Equivalent of an input's `required` attribute.
pub(crate) fn require(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ClubError::MissingField(field));
    }
    Ok(())
}

/// Log the outcome of a submit and record the matching notice. Fields are
/// left untouched either way so a failed submit can be retried.
pub(crate) fn report<T>(
    notice: &mut Option<Notice>,
    result: Result<T>,
    success: &str,
    failure: &str,
) -> Result<T> {
    match result {
        Ok(value) => {
            info!("{success}");
            *notice = Some(Notice::info(success));
            Ok(value)
        }
        Err(e) => {
            error!(error = %e, "{failure}");
            *notice = Some(Notice::error(format!("{failure}: {e}")));
            Err(e)
        }
    }
}
