use std::time::Instant;

use super::*;

use crate::bookmarks::Bookmark;
use crate::context::StartReport;
use crate::error::UiError;
use crate::features::flatten_menu;
use crate::model::Mode;
use crate::router::{Displayed, MountTicket, Navigation};

use super::suggest::Suggestion;
use super::views::{BrowseData, DrilldownKind, DrilldownView, FeatureView, StatusView};

mod cmd_dispatch;
mod event_loop;
mod render;

pub(super) use self::event_loop::run_loop;

const AUTO_REFRESH: Duration = Duration::from_secs(60);
const MAX_NOTICES: usize = 4;

#[derive(Clone, Debug)]
struct MenuEntry {
    depth: usize,
    key: String,
    text: String,
    group: bool,
}

pub(super) struct App {
    ctx: AppContext,
    content: Box<dyn View>,

    menu: Vec<MenuEntry>,
    menu_selected: usize,
    focus: Focus,

    input: Input,
    suggestions: Vec<Suggestion>,
    suggestion_selected: usize,

    notices: Vec<Notice>,
    ts_mode: TimestampStyle,

    /// Navigation held back by unsaved changes, waiting for y/n.
    confirm_discard: Option<Bookmark>,

    last_refresh: Instant,
    quit: bool,
}

impl App {
    pub(super) fn new(ctx: AppContext, report: StartReport) -> Self {
        let ts_mode = ctx.config().shell.timestamps;
        let mut app = Self {
            ctx,
            content: Box::new(StatusView::for_displayed(&Displayed::Empty)),
            menu: Vec::new(),
            menu_selected: 0,
            focus: Focus::Content,
            input: Input::default(),
            suggestions: Vec::new(),
            suggestion_selected: 0,
            notices: Vec::new(),
            ts_mode,
            confirm_discard: None,
            last_refresh: Instant::now(),
            quit: false,
        };
        for err in report.errors {
            app.notify_error(&err);
        }
        app.apply(report.navigation);
        app
    }

    pub(super) fn shutdown(&mut self) {
        self.ctx.stop();
    }

    fn mode(&self) -> Mode {
        self.ctx.router().mode()
    }

    fn notify(&mut self, kind: NoticeKind, text: impl Into<String>) {
        let text = text.into();
        match kind {
            NoticeKind::Info => tracing::info!(notice = %text),
            NoticeKind::Warn => tracing::warn!(notice = %text),
            NoticeKind::Error => tracing::error!(notice = %text),
        }
        self.notices.push(Notice {
            at: now_ts(),
            kind,
            text,
        });
        if self.notices.len() > MAX_NOTICES {
            let drop = self.notices.len() - MAX_NOTICES;
            self.notices.drain(..drop);
        }
    }

    fn notify_error(&mut self, err: &UiError) {
        let kind = if err.is_programmer_error() {
            NoticeKind::Warn
        } else {
            NoticeKind::Error
        };
        self.notify(kind, err.to_string());
    }

    fn expire_notices(&mut self) {
        let ttl = self.ctx.config().shell.notification_secs as i64;
        if ttl == 0 {
            return;
        }
        let now = OffsetDateTime::now_utc();
        self.notices
            .retain(|n| age_secs(&n.at, now).is_none_or(|age| age < ttl));
    }

    fn rebuild_menu(&mut self) {
        let nodes = self.ctx.menu(self.mode());
        self.menu = flatten_menu(&nodes)
            .into_iter()
            .map(|(depth, n)| MenuEntry {
                depth,
                key: n.key.clone(),
                text: n.text.clone(),
                group: n.group,
            })
            .collect();

        let current = self.ctx.router().displayed().key().map(str::to_string);
        if let Some(i) = current.and_then(|k| self.menu.iter().position(|e| e.key == k)) {
            self.menu_selected = i;
        }
        self.menu_selected = self.menu_selected.min(self.menu.len().saturating_sub(1));
    }

    /// Brings the shell in line with a router outcome.
    fn apply(&mut self, nav: Navigation) {
        match nav {
            Navigation::Changed { displayed, ticket } => self.mount(&displayed, ticket),
            Navigation::Unchanged { bookmark } => {
                let Some(view) = self.content.as_any_mut().downcast_mut::<DrilldownView>() else {
                    return;
                };
                if let Err(err) = view.reselect(&bookmark, &self.ctx) {
                    self.notify_error(&err);
                }
                self.refresh_affordances();
            }
            Navigation::Blocked { pending } => {
                self.notify(
                    NoticeKind::Warn,
                    format!("unsaved changes; discard them and open '{}'? (y/n)", pending),
                );
                self.confirm_discard = Some(pending);
            }
        }
        self.rebuild_menu();
    }

    fn mount(&mut self, displayed: &Displayed, ticket: Option<MountTicket>) {
        let feature = displayed
            .mounted_key()
            .and_then(|k| self.ctx.registry().get(k))
            .cloned();
        let Some(feature) = feature else {
            self.content = Box::new(StatusView::for_displayed(displayed));
            return;
        };

        match DrilldownKind::for_view(&feature.view.name) {
            Some(kind) => {
                let repositories = match self.ctx.backend().repositories() {
                    Ok(rows) => rows,
                    Err(err) => {
                        self.notify_error(&UiError::backend(&err));
                        Vec::new()
                    }
                };
                let mut view = DrilldownView::new(feature.key(), kind, BrowseData::new(repositories));
                let bookmark = self.ctx.router().bookmark().clone();
                if let Err(err) = view.reselect(&bookmark, &self.ctx) {
                    self.notify_error(&err);
                }
                self.content = Box::new(view);
                self.refresh_affordances();
            }
            None => {
                self.content = Box::new(FeatureView::new(&feature, &self.ctx));
            }
        }

        if let Some(ticket) = ticket {
            if !self.ctx.complete_mount(&ticket) {
                tracing::debug!(key = ticket.key(), "mount superseded");
            }
        }
    }

    fn refresh_affordances(&mut self) {
        let facts = self.ctx.facts();
        if let Some(view) = self.content.as_any_mut().downcast_mut::<DrilldownView>() {
            let affordances = view.drilldown().affordances(&facts);
            view.set_affordances(affordances);
        }
    }

    fn navigate(&mut self, token: &str) {
        let nav = self.ctx.navigate_to(token);
        self.apply(nav);
    }

    fn change_mode(&mut self, mode: Mode) {
        if !self.ctx.visible_modes().contains(&mode) {
            self.notify(NoticeKind::Warn, format!("mode '{}' has no visible features", mode));
            return;
        }
        let nav = self.ctx.change_mode(mode);
        self.apply(nav);
    }

    fn refresh(&mut self) {
        let report = self.ctx.refresh();
        self.last_refresh = Instant::now();
        for err in &report.errors {
            self.notify_error(err);
        }
        if !report.flips.is_empty() {
            tracing::debug!(flips = report.flips.len(), "conditions changed");
        }
        match report.navigation {
            Some(nav) => self.apply(nav),
            None => {
                self.refresh_affordances();
                self.rebuild_menu();
            }
        }
    }

    fn confirm(&mut self, discard: bool) {
        let Some(pending) = self.confirm_discard.take() else {
            return;
        };
        if discard {
            if let Some(nav) = self.ctx.discard_and_continue() {
                self.apply(nav);
            }
        } else {
            self.ctx.cancel_pending();
            self.notify(NoticeKind::Info, format!("stayed; '{}' not opened", pending));
        }
    }

    fn activate(&mut self) {
        if self.focus == Focus::Menu {
            if let Some(entry) = self.menu.get(self.menu_selected) {
                let key = entry.key.clone();
                self.focus = Focus::Content;
                self.navigate(&key);
            }
            return;
        }

        match self.content.activate() {
            view::Activation::None => {}
            view::Activation::Navigate(key) => self.navigate(&key),
            view::Activation::Select { depth, id } => self.select(depth, &id),
        }
    }

    fn select(&mut self, depth: usize, id: &str) {
        let Some(view) = self.content.as_any_mut().downcast_mut::<DrilldownView>() else {
            return;
        };
        if let Err(err) = view.prepare(depth, id, &self.ctx) {
            self.notify_error(&UiError::backend(&err));
            return;
        }
        if let Err(err) = view.select(depth, id) {
            self.notify_error(&err);
            return;
        }
        let token = view.bookmark().token().to_string();
        self.navigate(&token);
    }

    fn back(&mut self) {
        if !self.content.back() {
            self.notify(NoticeKind::Info, "nothing to go back to");
            return;
        }
        let token = match self.content.as_any().downcast_ref::<DrilldownView>() {
            Some(view) => view.bookmark().token().to_string(),
            None => return,
        };
        self.navigate(&token);
    }

    fn move_selection(&mut self, down: bool) {
        match self.focus {
            Focus::Menu => view::move_cursor(&mut self.menu_selected, self.menu.len(), down),
            Focus::Content if down => self.content.move_down(),
            Focus::Content => self.content.move_up(),
        }
    }

    fn recompute_suggestions(&mut self) {
        if self.input.is_empty() {
            self.suggestions.clear();
            self.suggestion_selected = 0;
            return;
        }
        let facts = self.ctx.facts();
        let bookmarks: Vec<String> = self
            .ctx
            .registry()
            .list(None)
            .filter(|f| f.is_visible(&facts))
            .map(|f| f.key())
            .collect();
        self.suggestions = suggest::suggestions(&self.input.buf, &commands::command_defs(), &bookmarks);
        self.suggestion_selected = self
            .suggestion_selected
            .min(self.suggestions.len().saturating_sub(1));
    }

    fn apply_selected_suggestion(&mut self) {
        if let Some(s) = self.suggestions.get(self.suggestion_selected) {
            self.input.set(s.completion());
            self.recompute_suggestions();
        }
    }

    fn tick(&mut self) {
        self.expire_notices();
        let idle = self.input.is_empty() && self.confirm_discard.is_none();
        if idle && self.last_refresh.elapsed() >= AUTO_REFRESH {
            self.refresh();
        }
    }
}

#[cfg(test)]
#[path = "../tests/tui_shell/app_tests.rs"]
mod tests;
