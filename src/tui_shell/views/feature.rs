use super::*;

use crate::features::FeatureFilter;
use crate::model::Feature;

/// Mounted view for features without a dedicated screen. Group features
/// list their visible children.
#[derive(Debug)]
pub(in crate::tui_shell) struct FeatureView {
    key: String,
    title: String,
    description: Option<String>,
    view_name: String,
    children: Vec<(String, String)>,
    selected: usize,
    updated_at: String,
}

impl FeatureView {
    pub(in crate::tui_shell) fn new(feature: &Feature, ctx: &AppContext) -> Self {
        let children = if feature.group {
            let filter = FeatureFilter::default().children_of(&feature.key());
            let facts = ctx.facts();
            ctx.registry()
                .list(Some(&filter))
                .filter(|f| f.is_visible(&facts))
                .map(|f| (f.key(), f.text.clone()))
                .collect()
        } else {
            Vec::new()
        };
        Self {
            key: feature.key(),
            title: feature.text.clone(),
            description: feature.description.clone(),
            view_name: feature.view.name.clone(),
            children,
            selected: 0,
            updated_at: now_ts(),
        }
    }
}

impl View for FeatureView {
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

    fn move_up(&mut self) {
        view::move_cursor(&mut self.selected, self.children.len(), false);
    }

    fn move_down(&mut self) {
        view::move_cursor(&mut self.selected, self.children.len(), true);
    }

    fn activate(&mut self) -> view::Activation {
        match self.children.get(self.selected) {
            Some((key, _)) => view::Activation::Navigate(key.clone()),
            None => view::Activation::None,
        }
    }

    fn render(&self, frame: &mut ratatui::Frame, area: Rect, ctx: &RenderCtx) {
        let inner = render_view_chrome(frame, self, area, ctx);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(inner);

        let mut head = vec![Line::from(Span::styled(
            format!("#{}  ({})", self.key, self.view_name),
            Style::default().fg(Color::DarkGray),
        ))];
        if let Some(d) = &self.description {
            head.push(Line::from(d.clone()));
        }
        frame.render_widget(Paragraph::new(head).wrap(Wrap { trim: true }), chunks[0]);

        if self.children.is_empty() {
            return;
        }
        let items: Vec<ListItem> = self
            .children
            .iter()
            .map(|(_, text)| ListItem::new(text.clone()))
            .collect();
        let mut state = ListState::default();
        state.select(Some(self.selected));
        let list = List::new(items)
            .block(Block::default().borders(Borders::TOP).title("Features"))
            .highlight_style(view::selected_style());
        frame.render_stateful_widget(list, chunks[1], &mut state);
    }
}
