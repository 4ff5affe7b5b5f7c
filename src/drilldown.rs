//! Master/detail drilldown: a stack of master lists ending in one detail
//! panel, addressable through bookmark segments.

use serde::Serialize;

use crate::bookmarks::{Bookmark, encode_segment};
use crate::conditions::Facts;
use crate::error::UiError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Row {
    pub id: String,
    pub label: String,
    pub columns: Vec<String>,
}

impl Row {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            columns: Vec::new(),
        }
    }

    pub fn column(mut self, value: impl Into<String>) -> Self {
        self.columns.push(value.into());
        self
    }
}

pub trait Listable {
    fn title(&self) -> String;

    /// Rows of this panel given the selections made in the panels before it.
    fn rows(&self, parents: &[Row]) -> Vec<Row>;
}

pub trait Selectable: Listable {
    /// Model name used in "not found" warnings.
    fn kind(&self) -> &str;

    fn find(&self, parents: &[Row], id: &str) -> Option<Row> {
        self.rows(parents).into_iter().find(|r| r.id == id)
    }

    /// Breadcrumb text for a selected row.
    fn describe(&self, row: &Row) -> String {
        row.label.clone()
    }
}

pub trait Detailed {
    fn title(&self, selection: &[Row]) -> String;
    fn lines(&self, selection: &[Row]) -> Vec<String>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrilldownState {
    NoSelection,
    Selected { depth: usize },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Affordances {
    pub can_create: bool,
    pub can_delete: bool,
}

pub struct Drilldown {
    masters: Vec<Box<dyn Selectable>>,
    detail: Box<dyn Detailed>,
    selections: Vec<Row>,
    /// Prefix for the `:create` / `:delete` permission checks.
    permission: Option<String>,
}

impl std::fmt::Debug for Drilldown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Drilldown")
            .field("masters", &self.masters.len())
            .field("selections", &self.selections)
            .field("permission", &self.permission)
            .finish()
    }
}

impl Drilldown {
    pub fn new(masters: Vec<Box<dyn Selectable>>, detail: Box<dyn Detailed>) -> Self {
        Self {
            masters,
            detail,
            selections: Vec::new(),
            permission: None,
        }
    }

    pub fn with_permission(mut self, prefix: impl Into<String>) -> Self {
        self.permission = Some(prefix.into());
        self
    }

    pub fn state(&self) -> DrilldownState {
        match self.selections.len() {
            0 => DrilldownState::NoSelection,
            n => DrilldownState::Selected { depth: n - 1 },
        }
    }

    pub fn master_count(&self) -> usize {
        self.masters.len()
    }

    pub fn selections(&self) -> &[Row] {
        &self.selections
    }

    /// Selects `item` in master `depth` and clears every deeper selection.
    pub fn select(&mut self, depth: usize, item: Row) -> Result<(), UiError> {
        self.check_depth(depth)?;
        self.selections.truncate(depth);
        self.selections.push(item);
        Ok(())
    }

    /// Looks `id` up in master `depth` and selects it.
    pub fn select_id(&mut self, depth: usize, id: &str) -> Result<(), UiError> {
        self.check_depth(depth)?;
        let master = &self.masters[depth];
        match master.find(&self.selections[..depth], id) {
            Some(row) => self.select(depth, row),
            None => Err(UiError::ModelNotFound {
                kind: master.kind().to_string(),
                id: id.to_string(),
            }),
        }
    }

    pub fn clear(&mut self) {
        self.selections.clear();
    }

    /// Drops the deepest selection.
    pub fn back(&mut self) -> Option<Row> {
        self.selections.pop()
    }

    /// Index of the visible panel; `master_count()` when the detail shows.
    pub fn active_index(&self) -> usize {
        self.selections.len().min(self.masters.len())
    }

    pub fn is_detail_shown(&self) -> bool {
        !self.masters.is_empty() && self.selections.len() == self.masters.len()
    }

    pub fn active_title(&self) -> String {
        match self.masters.get(self.active_index()) {
            Some(m) => m.title(),
            None => self.detail.title(&self.selections),
        }
    }

    /// Rows of the visible master, empty while the detail is shown.
    pub fn active_rows(&self) -> Vec<Row> {
        match self.masters.get(self.active_index()) {
            Some(m) => m.rows(&self.selections),
            None => Vec::new(),
        }
    }

    pub fn detail_lines(&self) -> Option<Vec<String>> {
        if self.is_detail_shown() {
            Some(self.detail.lines(&self.selections))
        } else {
            None
        }
    }

    /// Root title, then one entry per selection.
    pub fn breadcrumb(&self) -> Vec<String> {
        let mut crumbs = Vec::with_capacity(self.selections.len() + 1);
        if let Some(root) = self.masters.first() {
            crumbs.push(root.title());
        }
        for (master, row) in self.masters.iter().zip(&self.selections) {
            crumbs.push(master.describe(row));
        }
        crumbs
    }

    pub fn bookmark_segments(&self) -> Vec<String> {
        self.selections.iter().map(|r| encode_segment(&r.id)).collect()
    }

    /// Restores the selections from segments 1.. of `bookmark`. Stops at the
    /// first id that can't be found, keeping what was restored before it.
    pub fn reselect(&mut self, bookmark: &Bookmark) -> Result<(), UiError> {
        let ids = bookmark.model_ids();
        let current: Vec<&str> = self.selections.iter().map(|r| r.id.as_str()).collect();
        if ids.iter().map(String::as_str).eq(current.iter().copied()) {
            return Ok(());
        }

        self.selections.clear();
        for (depth, id) in ids.iter().enumerate().take(self.masters.len()) {
            if let Err(err) = self.select_id(depth, id) {
                tracing::warn!(token = %bookmark, error = %err, "drilldown reselect stopped");
                return Err(err);
            }
        }
        Ok(())
    }

    /// "New" needs `<prefix>:create`; "delete" needs a root selection and
    /// `<prefix>:delete`. Without a prefix nothing is offered.
    pub fn affordances(&self, facts: &dyn Facts) -> Affordances {
        let Some(prefix) = self.permission.as_deref() else {
            return Affordances::default();
        };
        Affordances {
            can_create: facts.is_permitted(&format!("{}:create", prefix)),
            can_delete: !self.selections.is_empty()
                && facts.is_permitted(&format!("{}:delete", prefix)),
        }
    }

    fn check_depth(&self, depth: usize) -> Result<(), UiError> {
        if depth >= self.masters.len() || depth > self.selections.len() {
            return Err(UiError::InvalidDepth {
                depth,
                selected: self.selections.len(),
                masters: self.masters.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/drilldown_tests.rs"]
mod tests;
