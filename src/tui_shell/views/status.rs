use super::*;

use crate::router::{Displayed, NotVisibleReason};

/// Content shown when no feature view is mounted.
#[derive(Debug)]
pub(in crate::tui_shell) struct StatusView {
    title: String,
    lines: Vec<String>,
    tone: Color,
    updated_at: String,
}

impl StatusView {
    pub(in crate::tui_shell) fn for_displayed(displayed: &Displayed) -> Self {
        let (title, lines, tone) = match displayed {
            Displayed::Empty => (
                "Nothing selected".to_string(),
                vec!["Pick a feature from the menu.".to_string()],
                Color::Gray,
            ),
            Displayed::NotFound { path } if path.is_empty() => (
                "Not found".to_string(),
                vec!["No feature is available to you.".to_string()],
                Color::Red,
            ),
            Displayed::NotFound { .. } => (
                "Not found".to_string(),
                displayed.error().map(|e| e.to_string()).into_iter().collect(),
                Color::Red,
            ),
            Displayed::NotVisible { text, reason, .. } => {
                let line = match reason {
                    NotVisibleReason::NotPermitted => displayed
                        .error()
                        .map(|e| e.to_string())
                        .unwrap_or_else(|| format!("'{}' is not available.", text)),
                    NotVisibleReason::NotAuthenticated => {
                        format!("'{}' requires you to sign in.", text)
                    }
                };
                ("Not available".to_string(), vec![line], Color::Yellow)
            }
            Displayed::Mounting { key, .. } => (
                "Loading".to_string(),
                vec![format!("Loading {}...", key)],
                Color::Gray,
            ),
            Displayed::Mounted { key } => (key.clone(), Vec::new(), Color::Gray),
        };
        Self {
            title,
            lines,
            tone,
            updated_at: now_ts(),
        }
    }
}

impl View for StatusView {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn title(&self) -> String {
        self.title.clone()
    }

    fn updated_at(&self) -> &str {
        &self.updated_at
    }

    fn render(&self, frame: &mut ratatui::Frame, area: Rect, ctx: &RenderCtx) {
        let inner = render_view_chrome(frame, self, area, ctx);
        let lines: Vec<Line> = self
            .lines
            .iter()
            .map(|l| Line::from(Span::styled(l.clone(), Style::default().fg(self.tone))))
            .collect();
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    }
}
