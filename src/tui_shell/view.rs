use std::any::Any;

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders};

use time::OffsetDateTime;

use crate::config::TimestampStyle;

#[derive(Clone, Copy, Debug)]
pub(super) struct RenderCtx {
    pub(super) now: OffsetDateTime,
    pub(super) ts_mode: TimestampStyle,
}

/// What activating a row in a content view asks the app to do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) enum Activation {
    None,
    Navigate(String),
    /// Drilldown selection at a depth; the app loads data and updates the
    /// bookmark.
    Select { depth: usize, id: String },
}

pub(super) trait View: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn title(&self) -> String;
    fn updated_at(&self) -> &str;

    fn move_up(&mut self) {}
    fn move_down(&mut self) {}

    fn activate(&mut self) -> Activation {
        Activation::None
    }

    /// Returns true when the view consumed the back action.
    fn back(&mut self) -> bool {
        false
    }

    fn render(&self, frame: &mut ratatui::Frame, area: Rect, ctx: &RenderCtx);
}

/// Draws the bordered frame with the view's title and refresh time; returns
/// the area left for the body.
pub(super) fn render_view_chrome(
    frame: &mut ratatui::Frame,
    view: &dyn View,
    area: Rect,
    ctx: &RenderCtx,
) -> Rect {
    let header = Line::from(vec![
        Span::styled(
            view.title(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(super::fmt_ts(view.updated_at(), ctx), Style::default().fg(Color::Gray)),
    ]);
    let outer = Block::default().borders(Borders::ALL).title(header);
    let inner = outer.inner(area);
    frame.render_widget(outer, area);
    inner
}

pub(super) fn selected_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

pub(super) fn move_cursor(selected: &mut usize, len: usize, down: bool) {
    if len == 0 {
        *selected = 0;
        return;
    }
    *selected = if down {
        (*selected + 1).min(len - 1)
    } else {
        selected.saturating_sub(1)
    };
}
