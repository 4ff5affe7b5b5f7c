//! Server state (current user, edition, capability flags).

use std::collections::BTreeSet;

use anyhow::Result;

use crate::conditions::{EDITION_KEY, USER_KEY};
use crate::error::UiError;
use crate::model::{ServerState, UserInfo};

pub trait StateSource {
    fn fetch_state(&self) -> Result<ServerState>;
}

#[derive(Debug, Default)]
pub struct StateStore {
    state: ServerState,
    loaded: bool,
}

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the changed state keys. On failure the previous state is kept.
    pub fn load<S: StateSource + ?Sized>(&mut self, source: &S) -> Result<BTreeSet<String>, UiError> {
        match source.fetch_state() {
            Ok(state) => Ok(self.replace(state)),
            Err(err) => {
                tracing::warn!(error = %format!("{:#}", err), "state load failed; keeping previous state");
                Err(UiError::backend(&err))
            }
        }
    }

    pub fn replace(&mut self, next: ServerState) -> BTreeSet<String> {
        let mut changed = BTreeSet::new();
        if self.state.user != next.user {
            changed.insert(USER_KEY.to_string());
        }
        if self.state.edition != next.edition {
            changed.insert(EDITION_KEY.to_string());
        }
        for key in self.state.capabilities.keys().chain(next.capabilities.keys()) {
            let before = self.state.capabilities.get(key).copied().unwrap_or(false);
            let after = next.capabilities.get(key).copied().unwrap_or(false);
            if before != after {
                changed.insert(key.clone());
            }
        }
        self.state = next;
        self.loaded = true;
        changed
    }

    pub fn reset(&mut self) -> BTreeSet<String> {
        let changed = self.replace(ServerState::default());
        self.loaded = false;
        changed
    }

    pub fn state(&self) -> &ServerState {
        &self.state
    }

    pub fn user(&self) -> Option<&UserInfo> {
        self.state.user.as_ref()
    }

    pub fn edition(&self) -> &str {
        &self.state.edition
    }

    pub fn capability(&self, key: &str) -> bool {
        self.state.capabilities.get(key).copied().unwrap_or(false)
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;
