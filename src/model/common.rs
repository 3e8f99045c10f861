use serde::{Deserialize, Serialize};

/// Acknowledgement returned by every admin delete endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deleted {
    #[serde(default)]
    pub message: String,
}

/// Records with a server-assigned numeric id.
pub trait Identified {
    fn id(&self) -> u32;
}
