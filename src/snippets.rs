//! Per-format "how do I depend on this" snippets for the component view.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::UiError;
use crate::model::{Asset, Component};

mod maven;
mod packages;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Snippet {
    pub display_name: String,
    pub snippet_text: String,
}

impl Snippet {
    pub fn new(display_name: impl Into<String>, snippet_text: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            snippet_text: snippet_text.into(),
        }
    }
}

pub type Generator = Box<dyn Fn(&Component, Option<&Asset>) -> Vec<Snippet>>;

#[derive(Default)]
pub struct SnippetController {
    generators: BTreeMap<String, Generator>,
}

impl std::fmt::Debug for SnippetController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnippetController")
            .field("formats", &self.formats())
            .finish()
    }
}

impl SnippetController {
    pub fn new() -> Self {
        Self::default()
    }

    /// The first generator registered for a format is kept.
    pub fn register_generator(
        &mut self,
        format: impl Into<String>,
        generator: impl Fn(&Component, Option<&Asset>) -> Vec<Snippet> + 'static,
    ) -> Result<(), UiError> {
        let format = format.into();
        if self.generators.contains_key(&format) {
            tracing::warn!(format = %format, "duplicate snippet generator ignored");
            return Err(UiError::DuplicateGenerator(format));
        }
        self.generators.insert(format, Box::new(generator));
        Ok(())
    }

    pub fn generate(&self, format: &str, component: &Component, asset: Option<&Asset>) -> Vec<Snippet> {
        match self.generators.get(format) {
            Some(generator) => generator(component, asset),
            None => {
                tracing::debug!(format, "no snippet generator registered");
                Vec::new()
            }
        }
    }

    pub fn formats(&self) -> Vec<&str> {
        self.generators.keys().map(String::as_str).collect()
    }
}

/// Built-in generators as `(format, generator)` pairs.
pub fn builtin_generators() -> Vec<(&'static str, Generator)> {
    vec![
        ("maven2", Box::new(maven::snippets) as Generator),
        ("npm", Box::new(packages::npm) as Generator),
        ("pypi", Box::new(packages::pypi) as Generator),
        ("nuget", Box::new(packages::nuget) as Generator),
        ("rubygems", Box::new(packages::rubygems) as Generator),
        ("docker", Box::new(packages::docker) as Generator),
    ]
}

#[cfg(test)]
#[path = "tests/snippets_tests.rs"]
mod tests;
