//! Fail-closed store of the current user's permissions.

use std::collections::{BTreeSet, HashMap};

use anyhow::Result;

use crate::error::UiError;
use crate::model::Permission;

/// Backend seam for the permission list endpoint.
pub trait PermissionSource {
    fn fetch_permissions(&self) -> Result<Vec<Permission>>;
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PermissionDiff {
    /// Ids whose effective value changed.
    pub changed: BTreeSet<String>,
}

impl PermissionDiff {
    pub fn is_empty(&self) -> bool {
        self.changed.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.changed.contains(id)
    }
}

#[derive(Debug, Default)]
pub struct PermissionStore {
    permissions: HashMap<String, bool>,
    loaded: bool,
}

impl PermissionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches the full set and swaps it in. On failure the previous set
    /// stays in effect.
    pub fn load<S: PermissionSource + ?Sized>(&mut self, source: &S) -> Result<PermissionDiff, UiError> {
        let records = match source.fetch_permissions() {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!(error = %format!("{:#}", err), "permission load failed; keeping previous set");
                return Err(UiError::backend(&err));
            }
        };
        let diff = self.replace(records);
        tracing::info!(
            permissions = self.permissions.len(),
            changed = diff.changed.len(),
            "permissions loaded"
        );
        Ok(diff)
    }

    /// Replaces the whole set at once. Duplicate ids: last record wins.
    pub fn replace(&mut self, records: Vec<Permission>) -> PermissionDiff {
        let mut next = HashMap::with_capacity(records.len());
        for p in records {
            if let Some(prev) = next.insert(p.id.clone(), p.permitted) {
                if prev != p.permitted {
                    tracing::debug!(id = %p.id, "duplicate permission record; last one wins");
                }
            }
        }

        let diff = Self::diff(&self.permissions, &next);
        self.permissions = next;
        self.loaded = true;
        diff
    }

    /// Drops everything (sign-out, teardown). Nothing is granted afterwards.
    pub fn clear(&mut self) -> PermissionDiff {
        let diff = Self::diff(&self.permissions, &HashMap::new());
        self.permissions.clear();
        self.loaded = false;
        diff
    }

    pub fn is_permitted(&self, id: &str) -> bool {
        self.permissions.get(id).copied().unwrap_or(false)
    }

    /// Whether a load ever succeeded since the last clear.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn len(&self) -> usize {
        self.permissions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.permissions.is_empty()
    }

    /// Snapshot sorted by id.
    pub fn snapshot(&self) -> Vec<Permission> {
        let mut out: Vec<Permission> = self
            .permissions
            .iter()
            .map(|(id, permitted)| Permission {
                id: id.clone(),
                permitted: *permitted,
            })
            .collect();
        out.sort_by(|a, b| a.id.cmp(&b.id));
        out
    }

    fn diff(prev: &HashMap<String, bool>, next: &HashMap<String, bool>) -> PermissionDiff {
        let effective = |m: &HashMap<String, bool>, id: &str| m.get(id).copied().unwrap_or(false);
        let changed = prev
            .keys()
            .chain(next.keys())
            .filter(|id| effective(prev, id) != effective(next, id))
            .cloned()
            .collect();
        PermissionDiff { changed }
    }
}

#[cfg(test)]
#[path = "tests/permissions_tests.rs"]
mod tests;
