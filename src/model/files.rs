use serde::{Deserialize, Serialize};
use strum_macros::EnumString;

use super::common::Identified;

/// A source archive (zip, tar, ...) attached to a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectFile {
    pub id: u32,
    pub file_path: String,
    #[serde(default)]
    pub project_id: Option<u32>,
}

/// A downloadable build of a project for one platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Executable {
    pub id: u32,
    #[serde(default)]
    pub file_path: String,
    pub version: String,
    pub platform: Platform,
    #[serde(default)]
    pub project_id: Option<u32>,
}

impl Identified for ProjectFile {
    fn id(&self) -> u32 {
        self.id
    }
}

impl Identified for Executable {
    fn id(&self) -> u32 {
        self.id
    }
}

/// Target platform of an [`Executable`]. The wire form is the display form.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    strum_macros::Display,
)]
#[strum(ascii_case_insensitive)]
pub enum Platform {
    #[default]
    Windows,
    Linux,
    #[serde(rename = "MacOS")]
    #[strum(serialize = "MacOS")]
    MacOs,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Windows, Platform::Linux, Platform::MacOs];
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_platform_strings() {
        assert_eq!(Platform::MacOs.to_string(), "MacOS");
        assert_eq!(Platform::from_str("macos").unwrap(), Platform::MacOs);
        assert_eq!(Platform::from_str("Linux").unwrap(), Platform::Linux);
        assert!(Platform::from_str("Amiga").is_err());
    }

    #[test]
    fn test_executable_from_json() {
        let exe: Executable = serde_json::from_str(
            r#"{"id":3,"file_path":"static/executables/a.exe","version":"1.2","platform":"MacOS","project_id":1}"#,
        )
        .unwrap();
        assert_eq!(exe.platform, Platform::MacOs);
        assert_eq!(exe.project_id, Some(1));
    }
}
