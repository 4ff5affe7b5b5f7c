use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::bookmarks::bookmark_key;
use crate::conditions::{Condition, Facts};
use crate::error::UiError;

pub const DEFAULT_WEIGHT: i32 = 100;

/// Header modes; each feature belongs to exactly one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Browse,
    Admin,
    User,
}

impl Mode {
    /// Header order.
    pub const ALL: [Mode; 3] = [Mode::Browse, Mode::Admin, Mode::User];

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Browse => "browse",
            Mode::Admin => "admin",
            Mode::User => "user",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Mode::Browse => "Browse",
            Mode::Admin => "Administration",
            Mode::User => "User",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = UiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "browse" => Ok(Mode::Browse),
            "admin" => Ok(Mode::Admin),
            "user" => Ok(Mode::User),
            other => Err(UiError::Config(format!(
                "unknown mode '{}' (expected browse, admin or user)",
                other
            ))),
        }
    }
}

/// Reference to the view factory that renders a feature.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewSpec {
    pub name: String,

    /// Mounting fetches data and completes asynchronously.
    #[serde(default)]
    pub loads_data: bool,
}

impl ViewSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            loads_data: false,
        }
    }

    pub fn loading(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            loads_data: true,
        }
    }
}

/// A navigable unit of the console, contributed by a plugin.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub path: String,
    pub text: String,
    pub mode: Mode,

    #[serde(default = "default_weight")]
    pub weight: i32,

    #[serde(default)]
    pub group: bool,

    pub view: ViewSpec,

    #[serde(default = "default_true")]
    pub visible: bool,

    #[serde(default = "default_condition")]
    pub condition: Condition,

    #[serde(default)]
    pub icon_name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default = "default_true")]
    pub authentication_required: bool,
}

fn default_weight() -> i32 {
    DEFAULT_WEIGHT
}

fn default_true() -> bool {
    true
}

fn default_condition() -> Condition {
    Condition::Always
}

impl Feature {
    pub fn new(path: impl Into<String>, text: impl Into<String>, mode: Mode) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
            mode,
            weight: DEFAULT_WEIGHT,
            group: false,
            view: ViewSpec::new("feature"),
            visible: true,
            condition: Condition::Always,
            icon_name: None,
            description: None,
            authentication_required: true,
        }
    }

    pub fn weight(mut self, weight: i32) -> Self {
        self.weight = weight;
        self
    }

    pub fn group(mut self) -> Self {
        self.group = true;
        self.view = ViewSpec::new("group");
        self
    }

    pub fn view(mut self, view: ViewSpec) -> Self {
        self.view = view;
        self
    }

    pub fn condition(mut self, condition: Condition) -> Self {
        self.condition = condition;
        self
    }

    pub fn icon(mut self, name: impl Into<String>) -> Self {
        self.icon_name = Some(name.into());
        self
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    /// Visible to anonymous users.
    pub fn public(mut self) -> Self {
        self.authentication_required = false;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Normalized registry key, also the menu part of a bookmark.
    pub fn key(&self) -> String {
        bookmark_key(&self.path)
    }

    /// The static flag, the authentication requirement and the condition
    /// folded into one condition; this is what gets watched.
    pub fn effective_condition(&self) -> Condition {
        if !self.visible {
            return Condition::Never;
        }
        if self.authentication_required {
            Condition::Authenticated.and(self.condition.clone())
        } else {
            self.condition.clone()
        }
    }

    pub fn is_visible(&self, facts: &dyn Facts) -> bool {
        if !self.visible {
            return false;
        }
        if self.authentication_required && !facts.is_authenticated() {
            return false;
        }
        self.condition.evaluate(facts)
    }
}
