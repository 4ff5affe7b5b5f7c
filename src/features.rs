//! Registry of plugin-contributed features.

use std::collections::HashMap;

use crate::bookmarks::bookmark_key;
use crate::conditions::Facts;
use crate::error::UiError;
use crate::model::{Feature, Mode};

mod menu;
pub use self::menu::{MenuNode, flatten_menu};

/// Optional restriction for [`FeatureRegistry::list`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FeatureFilter {
    pub mode: Option<Mode>,
    /// `Some(true)` for groups only, `Some(false)` for leaves only.
    pub group: Option<bool>,
    /// Only strict descendants of this bookmark key.
    pub parent: Option<String>,
}

impl FeatureFilter {
    pub fn mode(mode: Mode) -> Self {
        Self {
            mode: Some(mode),
            ..Self::default()
        }
    }

    pub fn leaves(mut self) -> Self {
        self.group = Some(false);
        self
    }

    pub fn children_of(mut self, parent: &str) -> Self {
        self.parent = Some(bookmark_key(parent));
        self
    }

    pub fn matches(&self, feature: &Feature, key: &str) -> bool {
        if self.mode.is_some_and(|m| m != feature.mode) {
            return false;
        }
        if self.group.is_some_and(|g| g != feature.group) {
            return false;
        }
        match self.parent.as_deref() {
            Some(parent) => key
                .strip_prefix(parent)
                .is_some_and(|rest| rest.starts_with('/')),
            None => true,
        }
    }
}

#[derive(Debug, Default)]
pub struct FeatureRegistry {
    features: Vec<Feature>,
    keys: Vec<String>,
    by_key: HashMap<String, usize>,
    /// Indices into `features`, sorted by (weight, text); ties keep
    /// registration order.
    order: Vec<usize>,
}

impl FeatureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The first registration of a key is authoritative.
    pub fn register(&mut self, feature: Feature) -> Result<(), UiError> {
        let key = feature.key();
        if key.is_empty() {
            tracing::warn!(text = %feature.text, "rejecting feature with empty path");
            return Err(UiError::EmptyFeaturePath(feature.text));
        }
        if self.by_key.contains_key(&key) {
            tracing::warn!(path = %feature.path, key = %key, "duplicate feature path ignored");
            return Err(UiError::DuplicateFeature(feature.path));
        }

        let idx = self.features.len();
        let pos = self.order.partition_point(|&i| {
            let f = &self.features[i];
            (f.weight, f.text.as_str()) <= (feature.weight, feature.text.as_str())
        });
        tracing::debug!(key = %key, weight = feature.weight, "feature registered");
        self.order.insert(pos, idx);
        self.by_key.insert(key.clone(), idx);
        self.keys.push(key);
        self.features.push(feature);
        Ok(())
    }

    /// Longest registered prefix of `path` (segment-wise), if any.
    pub fn resolve(&self, path: &str) -> Option<&Feature> {
        let key = bookmark_key(path);
        if key.is_empty() {
            return None;
        }
        let segments: Vec<&str> = key.split('/').collect();
        (1..=segments.len()).rev().find_map(|n| {
            let prefix = segments[..n].join("/");
            self.by_key.get(&prefix).map(|&i| &self.features[i])
        })
    }

    pub fn get(&self, key: &str) -> Option<&Feature> {
        self.by_key.get(&bookmark_key(key)).map(|&i| &self.features[i])
    }

    /// Features ordered by weight, then text. The iterator is lazy and can
    /// be cloned to restart it.
    pub fn list<'a>(
        &'a self,
        filter: Option<&'a FeatureFilter>,
    ) -> impl Iterator<Item = &'a Feature> + Clone + 'a {
        self.order.iter().filter_map(move |&i| {
            let f = &self.features[i];
            match filter {
                Some(filter) if !filter.matches(f, &self.keys[i]) => None,
                _ => Some(f),
            }
        })
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Modes with at least one visible leaf, in header order.
    pub fn visible_modes(&self, facts: &dyn Facts) -> Vec<Mode> {
        Mode::ALL
            .into_iter()
            .filter(|&mode| self.first_visible(mode, facts).is_some())
            .collect()
    }

    /// Auto-navigation target of a mode.
    pub fn first_visible(&self, mode: Mode, facts: &dyn Facts) -> Option<&Feature> {
        let filter = FeatureFilter::mode(mode).leaves();
        self.list(None)
            .filter(|f| filter.matches(f, ""))
            .find(|f| f.is_visible(facts))
    }

    pub fn menu(&self, mode: Mode, facts: &dyn Facts) -> Vec<MenuNode> {
        let filter = FeatureFilter::mode(mode);
        menu::build(mode, self.list(Some(&filter)).filter(|f| f.is_visible(facts)))
    }
}

#[cfg(test)]
#[path = "tests/features_tests.rs"]
mod tests;
