//! Navigation, permission and feature-composition core of the repository
//! manager admin console.
//!
//! Plugins contribute [`model::Feature`] descriptors and snippet generators;
//! [`context::AppContext`] assembles them, loads permissions and server state
//! from the backend and drives the [`router::Router`].

pub mod bookmarks;
pub mod conditions;
pub mod config;
pub mod context;
pub mod drilldown;
pub mod error;
pub mod features;
pub mod model;
pub mod permissions;
pub mod plugins;
pub mod remote;
pub mod router;
pub mod snippets;
pub mod state;
pub mod tui;

mod tui_shell;

pub use error::UiError;

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;
