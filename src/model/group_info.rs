use serde::{Deserialize, Serialize};

/// The singleton "about" record of the group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupInfo {
    #[serde(default)]
    pub id: Option<u32>,
    #[serde(default)]
    pub name: String,
    pub description: String,
    pub contact: String,
}

/// Body of a group info create or update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupInfoPayload {
    pub name: String,
    pub description: String,
    pub contact: String,
}

impl GroupInfo {
    pub fn payload(&self) -> GroupInfoPayload {
        GroupInfoPayload {
            name: self.name.clone(),
            description: self.description.clone(),
            contact: self.contact.clone(),
        }
    }
}
