use std::any::Any;
use std::io::{self, IsTerminal};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

use time::OffsetDateTime;
use time::format_description::FormatItem;
use time::format_description::well_known::Rfc3339;

use crate::config::TimestampStyle;
use crate::context::{AppContext, StartReport};

mod app;
use app::App;

mod commands;

mod input;
use input::Input;

mod suggest;

mod view;
use view::{RenderCtx, View, render_view_chrome};

mod views;

pub(crate) fn run(ctx: AppContext, report: StartReport) -> Result<()> {
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        anyhow::bail!("the console needs an interactive terminal (try `rapture menu` instead)");
    }

    let mut stdout = io::stdout();
    enable_raw_mode().context("enable raw mode")?;
    execute!(stdout, EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    terminal.clear().ok();

    let mut app = App::new(ctx, report);
    let res = app::run_loop(&mut terminal, &mut app);

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    app.shutdown();
    res
}

#[derive(Clone, Copy, Debug)]
pub(super) struct CommandDef {
    name: &'static str,
    aliases: &'static [&'static str],
    usage: &'static str,
    help: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum NoticeKind {
    Info,
    Warn,
    Error,
}

#[derive(Clone, Debug)]
struct Notice {
    at: String,
    kind: NoticeKind,
    text: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Focus {
    Menu,
    Content,
}

fn toggle_ts(style: TimestampStyle) -> TimestampStyle {
    match style {
        TimestampStyle::Relative => TimestampStyle::Absolute,
        TimestampStyle::Absolute => TimestampStyle::Relative,
    }
}

fn ts_ui_format() -> &'static [FormatItem<'static>] {
    time::macros::format_description!("[year]-[month]-[day] [hour]:[minute]:[second]")
}

fn now_ts() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "<time>".to_string())
}

fn fmt_ts_abs(ts: &str) -> Option<String> {
    let dt = OffsetDateTime::parse(ts, &Rfc3339).ok()?;
    dt.format(ts_ui_format()).ok()
}

fn fmt_since(ts: &str, now: OffsetDateTime) -> Option<String> {
    let dt = OffsetDateTime::parse(ts, &Rfc3339).ok()?;
    let secs = (now - dt).whole_seconds();
    if secs < 0 {
        return None;
    }
    let s = if secs < 60 {
        format!("{}s ago", secs)
    } else if secs < 3600 {
        format!("{}m ago", secs / 60)
    } else if secs < 48 * 3600 {
        format!("{}h ago", secs / 3600)
    } else {
        return None;
    };
    Some(s)
}

fn fmt_ts(ts: &str, ctx: &RenderCtx) -> String {
    let abs = || fmt_ts_abs(ts).unwrap_or_else(|| ts.to_string());
    match ctx.ts_mode {
        TimestampStyle::Relative => fmt_since(ts, ctx.now).unwrap_or_else(abs),
        TimestampStyle::Absolute => abs(),
    }
}

fn age_secs(ts: &str, now: OffsetDateTime) -> Option<i64> {
    let dt = OffsetDateTime::parse(ts, &Rfc3339).ok()?;
    Some((now - dt).whole_seconds())
}

fn server_label(base_url: &str) -> String {
    let s = base_url.trim_end_matches('/');
    s.strip_prefix("https://")
        .or_else(|| s.strip_prefix("http://"))
        .unwrap_or(s)
        .to_string()
}

#[cfg(test)]
#[path = "tests/tui_shell/format_tests.rs"]
mod tests;
