//! Rows served by the browse endpoints.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    pub format: String,

    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    pub id: String,
    pub repository: String,
    pub format: String,

    #[serde(default)]
    pub group: Option<String>,

    pub name: String,

    #[serde(default)]
    pub version: Option<String>,
}

impl Component {
    /// `group:name:version` with absent parts left out.
    pub fn coordinates(&self) -> String {
        let mut parts = Vec::new();
        if let Some(g) = self.group.as_deref() {
            parts.push(g);
        }
        parts.push(self.name.as_str());
        if let Some(v) = self.version.as_deref() {
            parts.push(v);
        }
        parts.join(":")
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub id: String,
    pub path: String,

    #[serde(default)]
    pub content_type: Option<String>,

    #[serde(default)]
    pub size: Option<u64>,
}

impl Asset {
    pub fn extension(&self) -> Option<&str> {
        let file = self.path.rsplit('/').next()?;
        let (_, ext) = file.rsplit_once('.')?;
        if ext.is_empty() { None } else { Some(ext) }
    }
}
