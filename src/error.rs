use std::path::PathBuf;

/// All errors that can occur while talking to the club backend.
#[derive(thiserror::Error, Debug)]
pub enum ClubError {
    /// HTTP request failed (network, DNS, TLS, etc.).
    #[error("http request failed for {url}: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    /// Server returned a non-success HTTP status code.
    #[error("unexpected status {status} for {url}: {body}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
        body: String,
    },

    /// Failed to read the response body.
    #[error("failed to read response body from {url}: {source}")]
    ResponseBody {
        url: String,
        source: reqwest::Error,
    },

    /// The response body was not the JSON shape we expected.
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        source: serde_json::Error,
    },

    /// An admin-scoped call was attempted without an API key configured.
    #[error("no API key configured for admin call to {url}")]
    MissingApiKey { url: String },

    /// An upload must name exactly one owner: a project or an event.
    #[error("an upload needs exactly one owner, a project or an event")]
    InvalidOwner,

    /// A required form field was left empty.
    #[error("required field `{0}` is empty")]
    MissingField(&'static str),

    /// An upload form was submitted without a file.
    #[error("no file selected for upload")]
    MissingFile,

    /// The group info form was submitted before loading the current record
    /// succeeded, so it cannot choose between create and update.
    #[error("group info has not been loaded; cannot tell whether to create or update")]
    GroupInfoNotLoaded,

    /// Date text did not match `YYYY-MM-DD`.
    #[error("invalid date `{input}`: {source}")]
    InvalidDate {
        input: String,
        source: chrono::ParseError,
    },

    /// Reading an upload or writing a download failed.
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A configuration value could not be used.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ClubError {
    /// HTTP status carried by this error, if the server answered at all.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            ClubError::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True only for a 404 answer. Every other failure, transport or status,
    /// returns false.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(reqwest::StatusCode::NOT_FOUND)
    }
}

pub type Result<T> = std::result::Result<T, ClubError>;
