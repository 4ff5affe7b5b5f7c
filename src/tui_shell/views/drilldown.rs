use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use super::*;

use crate::bookmarks::Bookmark;
use crate::drilldown::{Affordances, Detailed, Drilldown, Listable, Row, Selectable};
use crate::error::UiError;
use crate::model::{Asset, Component, Repository};
use crate::plugins::REPOSITORIES_PERMISSION;
use crate::remote::BrowseSource;
use crate::snippets::{Snippet, SnippetController};

/// Backend rows fetched so far by one drilldown view.
#[derive(Debug, Default)]
pub(in crate::tui_shell) struct BrowseData {
    repositories: Vec<Repository>,
    components: RefCell<BTreeMap<String, Vec<Component>>>,
    assets: RefCell<BTreeMap<String, Vec<Asset>>>,
    snippets: RefCell<BTreeMap<String, Vec<Snippet>>>,
}

impl BrowseData {
    pub(in crate::tui_shell) fn new(repositories: Vec<Repository>) -> Self {
        Self {
            repositories,
            ..Self::default()
        }
    }

    fn component(&self, id: &str) -> Option<Component> {
        self.components
            .borrow()
            .values()
            .flatten()
            .find(|c| c.id == id)
            .cloned()
    }

    fn ensure_components<B: BrowseSource + ?Sized>(&self, backend: &B, repository: &str) -> anyhow::Result<()> {
        if self.components.borrow().contains_key(repository) {
            return Ok(());
        }
        let rows = backend.components(repository)?;
        self.components.borrow_mut().insert(repository.to_string(), rows);
        Ok(())
    }

    fn ensure_component_detail<B: BrowseSource + ?Sized>(
        &self,
        backend: &B,
        snippets: &SnippetController,
        component_id: &str,
    ) -> anyhow::Result<()> {
        if self.assets.borrow().contains_key(component_id) {
            return Ok(());
        }
        let Some(component) = self.component(component_id) else {
            return Ok(());
        };
        let assets = backend.assets(component_id)?;
        let generated = snippets.generate(&component.format, &component, assets.first());
        self.snippets
            .borrow_mut()
            .insert(component_id.to_string(), generated);
        self.assets
            .borrow_mut()
            .insert(component_id.to_string(), assets);
        Ok(())
    }
}

struct RepositoryMaster(Rc<BrowseData>);

impl Listable for RepositoryMaster {
    fn title(&self) -> String {
        "Repositories".to_string()
    }

    fn rows(&self, _parents: &[Row]) -> Vec<Row> {
        self.0
            .repositories
            .iter()
            .map(|r| {
                Row::new(r.name.clone(), r.name.clone())
                    .column(r.format.clone())
                    .column(r.kind.clone())
            })
            .collect()
    }
}

impl Selectable for RepositoryMaster {
    fn kind(&self) -> &str {
        "repository"
    }
}

struct ComponentMaster(Rc<BrowseData>);

impl Listable for ComponentMaster {
    fn title(&self) -> String {
        "Components".to_string()
    }

    fn rows(&self, parents: &[Row]) -> Vec<Row> {
        let Some(repo) = parents.first() else {
            return Vec::new();
        };
        self.0
            .components
            .borrow()
            .get(&repo.id)
            .into_iter()
            .flatten()
            .map(|c| {
                Row::new(c.id.clone(), c.coordinates())
                    .column(c.format.clone())
            })
            .collect()
    }
}

impl Selectable for ComponentMaster {
    fn kind(&self) -> &str {
        "component"
    }
}

struct ComponentDetail(Rc<BrowseData>);

impl Detailed for ComponentDetail {
    fn title(&self, selection: &[Row]) -> String {
        selection.last().map(|r| r.label.clone()).unwrap_or_default()
    }

    fn lines(&self, selection: &[Row]) -> Vec<String> {
        let Some(row) = selection.last() else {
            return Vec::new();
        };
        let mut out = Vec::new();
        if let Some(c) = self.0.component(&row.id) {
            out.push(format!("repository: {}", c.repository));
            out.push(format!("format:     {}", c.format));
            out.push(format!("name:       {}", c.name));
            if let Some(g) = &c.group {
                out.push(format!("group:      {}", g));
            }
            if let Some(v) = &c.version {
                out.push(format!("version:    {}", v));
            }
        }

        out.push(String::new());
        out.push("Assets".to_string());
        match self.0.assets.borrow().get(&row.id) {
            Some(assets) if !assets.is_empty() => {
                for a in assets {
                    let size = a.size.map(|s| format!(" ({} bytes)", s)).unwrap_or_default();
                    out.push(format!("  {}{}", a.path, size));
                }
            }
            _ => out.push("  (none)".to_string()),
        }

        if let Some(snippets) = self.0.snippets.borrow().get(&row.id) {
            for s in snippets {
                out.push(String::new());
                out.push(s.display_name.clone());
                out.extend(s.snippet_text.lines().map(|l| format!("  {}", l)));
            }
        }
        out
    }
}

struct RepositoryDetail(Rc<BrowseData>);

impl Detailed for RepositoryDetail {
    fn title(&self, selection: &[Row]) -> String {
        selection.last().map(|r| r.label.clone()).unwrap_or_default()
    }

    fn lines(&self, selection: &[Row]) -> Vec<String> {
        let Some(row) = selection.last() else {
            return Vec::new();
        };
        let Some(r) = self.0.repositories.iter().find(|r| r.name == row.id) else {
            return Vec::new();
        };
        vec![
            format!("name:   {}", r.name),
            format!("format: {}", r.format),
            format!("type:   {}", r.kind),
            format!("url:    {}", r.url.as_deref().unwrap_or("-")),
        ]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::tui_shell) enum DrilldownKind {
    /// Repositories, their components, component detail with snippets.
    Browse,
    /// Repository administration list with a detail panel.
    Repositories,
}

impl DrilldownKind {
    pub(in crate::tui_shell) fn for_view(name: &str) -> Option<Self> {
        match name {
            "browse" => Some(DrilldownKind::Browse),
            "repositories" => Some(DrilldownKind::Repositories),
            _ => None,
        }
    }
}

pub(in crate::tui_shell) struct DrilldownView {
    key: String,
    /// `=filter` suffix of the bookmark's first segment, kept across selections.
    filter: Option<String>,
    kind: DrilldownKind,
    drilldown: Drilldown,
    data: Rc<BrowseData>,
    selected: usize,
    affordances: Affordances,
    updated_at: String,
}

impl DrilldownView {
    pub(in crate::tui_shell) fn new(key: String, kind: DrilldownKind, data: BrowseData) -> Self {
        let data = Rc::new(data);
        let drilldown = match kind {
            DrilldownKind::Browse => Drilldown::new(
                vec![
                    Box::new(RepositoryMaster(data.clone())),
                    Box::new(ComponentMaster(data.clone())),
                ],
                Box::new(ComponentDetail(data.clone())),
            ),
            DrilldownKind::Repositories => Drilldown::new(
                vec![Box::new(RepositoryMaster(data.clone()))],
                Box::new(RepositoryDetail(data.clone())),
            )
            .with_permission(REPOSITORIES_PERMISSION),
        };
        Self {
            key,
            filter: None,
            kind,
            drilldown,
            data,
            selected: 0,
            affordances: Affordances::default(),
            updated_at: now_ts(),
        }
    }

    pub(in crate::tui_shell) fn drilldown(&self) -> &Drilldown {
        &self.drilldown
    }

    pub(in crate::tui_shell) fn set_affordances(&mut self, affordances: Affordances) {
        self.affordances = affordances;
    }

    /// Fetches what selecting `id` at `depth` needs to show the next panel.
    pub(in crate::tui_shell) fn prepare(&self, depth: usize, id: &str, ctx: &AppContext) -> anyhow::Result<()> {
        match (self.kind, depth) {
            (DrilldownKind::Browse, 0) => self.data.ensure_components(ctx.backend(), id),
            (DrilldownKind::Browse, 1) => {
                self.data
                    .ensure_component_detail(ctx.backend(), ctx.snippets(), id)
            }
            _ => Ok(()),
        }
    }

    pub(in crate::tui_shell) fn select(&mut self, depth: usize, id: &str) -> Result<(), UiError> {
        self.drilldown.select_id(depth, id)?;
        self.selected = 0;
        Ok(())
    }

    /// Restores the selections encoded in `bookmark`, fetching as it goes.
    pub(in crate::tui_shell) fn reselect(&mut self, bookmark: &Bookmark, ctx: &AppContext) -> Result<(), UiError> {
        for (depth, id) in bookmark.model_ids().iter().enumerate() {
            if let Err(err) = self.prepare(depth, id, ctx) {
                return Err(UiError::backend(&err));
            }
        }
        self.filter = bookmark.filter().map(str::to_string);
        self.drilldown.reselect(bookmark)?;
        self.selected = 0;
        Ok(())
    }

    pub(in crate::tui_shell) fn bookmark(&self) -> Bookmark {
        let first = match &self.filter {
            Some(filter) => format!("{}={}", self.key, filter),
            None => self.key.clone(),
        };
        let mut segments = vec![first];
        segments.extend(self.drilldown.bookmark_segments());
        Bookmark::from_segments(segments)
    }
}

impl View for DrilldownView {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn title(&self) -> String {
        self.drilldown.breadcrumb().join(" > ")
    }

    fn updated_at(&self) -> &str {
        &self.updated_at
    }

    fn move_up(&mut self) {
        let len = self.drilldown.active_rows().len();
        view::move_cursor(&mut self.selected, len, false);
    }

    fn move_down(&mut self) {
        let len = self.drilldown.active_rows().len();
        view::move_cursor(&mut self.selected, len, true);
    }

    fn activate(&mut self) -> view::Activation {
        if self.drilldown.is_detail_shown() {
            return view::Activation::None;
        }
        match self.drilldown.active_rows().get(self.selected) {
            Some(row) => view::Activation::Select {
                depth: self.drilldown.active_index(),
                id: row.id.clone(),
            },
            None => view::Activation::None,
        }
    }

    fn back(&mut self) -> bool {
        if self.drilldown.back().is_some() {
            self.selected = 0;
            true
        } else {
            false
        }
    }

    fn render(&self, frame: &mut ratatui::Frame, area: Rect, ctx: &RenderCtx) {
        let inner = render_view_chrome(frame, self, area, ctx);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(inner);

        let flag = |on: bool, label: &'static str| {
            let style = if on {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Span::styled(label, style)
        };
        let toolbar = Line::from(vec![
            Span::styled(
                self.drilldown.active_title(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("   "),
            flag(self.affordances.can_create, "[new]"),
            Span::raw(" "),
            flag(self.affordances.can_delete, "[delete]"),
        ]);
        frame.render_widget(Paragraph::new(toolbar), chunks[0]);

        if let Some(lines) = self.drilldown.detail_lines() {
            let lines: Vec<Line> = lines.into_iter().map(Line::from).collect();
            frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), chunks[1]);
            return;
        }

        let rows = self.drilldown.active_rows();
        if rows.is_empty() {
            frame.render_widget(
                Paragraph::new("(empty)").style(Style::default().fg(Color::DarkGray)),
                chunks[1],
            );
            return;
        }
        let items: Vec<ListItem> = rows
            .iter()
            .map(|r| {
                let mut spans = vec![Span::raw(r.label.clone())];
                for c in &r.columns {
                    spans.push(Span::raw("  "));
                    spans.push(Span::styled(c.clone(), Style::default().fg(Color::Gray)));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();
        let mut state = ListState::default();
        state.select(Some(self.selected));
        let list = List::new(items).highlight_style(view::selected_style());
        frame.render_stateful_widget(list, chunks[1], &mut state);
    }
}

#[cfg(test)]
#[path = "../../tests/tui_shell/views/drilldown_tests.rs"]
mod tests;
