use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const DEFAULT_EDITION: &str = "OSS";

fn default_edition() -> String {
    DEFAULT_EDITION.to_string()
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub administrator: bool,
}

/// Server state values read by non-permission conditions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerState {
    #[serde(default)]
    pub user: Option<UserInfo>,

    #[serde(default = "default_edition")]
    pub edition: String,

    /// Server capability flags (e.g. `clm`, `usertoken`).
    #[serde(default)]
    pub capabilities: BTreeMap<String, bool>,
}

impl Default for ServerState {
    fn default() -> Self {
        Self {
            user: None,
            edition: default_edition(),
            capabilities: BTreeMap::new(),
        }
    }
}
