use super::*;

pub(super) fn draw(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let notice_h = if app.notices.is_empty() {
        0
    } else {
        app.notices.len() as u16 + 1
    };
    let suggest_h = if app.suggestions.is_empty() {
        0
    } else {
        app.suggestions.len() as u16 + 2
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(notice_h),
            Constraint::Length(suggest_h),
            Constraint::Length(2),
        ])
        .split(area);

    draw_header(frame, app, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(30), Constraint::Min(0)])
        .split(chunks[1]);
    draw_menu(frame, app, body[0]);

    let ctx = RenderCtx {
        now: OffsetDateTime::now_utc(),
        ts_mode: app.ts_mode,
    };
    app.content.render(frame, body[1], &ctx);

    if !app.notices.is_empty() {
        draw_notices(frame, app, chunks[2], &ctx);
    }
    if !app.suggestions.is_empty() {
        draw_suggestions(frame, app, chunks[3]);
    }
    draw_input(frame, app, chunks[4]);

    if let Some(pending) = &app.confirm_discard {
        draw_confirm(frame, pending, area);
    }
}

fn draw_header(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let current = app.mode();
    let mut spans = vec![
        Span::styled(" Rapture ", Style::default().fg(Color::Black).bg(Color::White)),
        Span::raw("  "),
    ];
    for (i, mode) in app.ctx.visible_modes().into_iter().enumerate() {
        let style = if mode == current {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let fkey = Mode::ALL.iter().position(|m| *m == mode).unwrap_or(i) + 1;
        spans.push(Span::styled(format!("F{} {}", fkey, mode.title()), style));
        spans.push(Span::raw("  "));
    }

    spans.push(Span::styled(
        server_label(&app.ctx.config().backend.base_url),
        Style::default().fg(Color::DarkGray),
    ));
    spans.push(Span::raw("  "));
    match app.ctx.state().user() {
        Some(user) => spans.push(Span::styled(
            user.name.clone().unwrap_or_else(|| user.id.clone()),
            Style::default().fg(Color::Green),
        )),
        None => spans.push(Span::styled("(anonymous)", Style::default().fg(Color::Gray))),
    }
    if app.ctx.router().is_dirty() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled("[modified]", Style::default().fg(Color::Red)));
    }

    let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, area);
}

fn draw_menu(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let border = if app.focus == Focus::Menu {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(app.mode().title());

    let current = app.ctx.router().displayed().key();
    let items: Vec<ListItem> = app
        .menu
        .iter()
        .map(|e| {
            let mut style = Style::default();
            if e.group {
                style = style.add_modifier(Modifier::BOLD);
            }
            if current == Some(e.key.as_str()) {
                style = style.fg(Color::Yellow);
            }
            ListItem::new(Span::styled(format!("{}{}", "  ".repeat(e.depth), e.text), style))
        })
        .collect();

    let mut state = ListState::default();
    if app.focus == Focus::Menu && !app.menu.is_empty() {
        state.select(Some(app.menu_selected));
    }
    let list = List::new(items)
        .block(block)
        .highlight_style(view::selected_style());
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_notices(frame: &mut ratatui::Frame, app: &App, area: Rect, ctx: &RenderCtx) {
    let lines: Vec<Line> = app
        .notices
        .iter()
        .map(|n| {
            let color = match n.kind {
                NoticeKind::Info => Color::White,
                NoticeKind::Warn => Color::Yellow,
                NoticeKind::Error => Color::Red,
            };
            Line::from(vec![
                Span::styled(format!("{} ", fmt_ts(&n.at, ctx)), Style::default().fg(Color::Gray)),
                Span::styled(n.text.as_str(), Style::default().fg(color)),
            ])
        })
        .collect();
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::TOP)),
        area,
    );
}

fn draw_suggestions(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let lines: Vec<Line> = app
        .suggestions
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let style = if i == app.suggestion_selected {
                Style::default().bg(Color::DarkGray)
            } else {
                Style::default()
            };
            Line::from(vec![
                Span::styled(format!("{: <28}", s.label()), style.fg(Color::Yellow)),
                Span::styled(s.hint().to_string(), style.fg(Color::White)),
            ])
        })
        .collect();
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::TOP | Borders::BOTTOM)),
        area,
    );
}

fn draw_input(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let prompt = format!("{}>", app.mode());
    let mut spans = vec![
        Span::styled(prompt.clone(), Style::default().fg(Color::Cyan)),
        Span::raw(" "),
        Span::raw(app.input.buf.as_str()),
    ];
    if app.input.is_empty() {
        spans.push(Span::styled(
            "type a command, or `help`",
            Style::default().fg(Color::Gray).add_modifier(Modifier::DIM),
        ));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::TOP)),
        area,
    );

    if app.confirm_discard.is_none() {
        let x = area.x + (prompt.chars().count() + 1 + app.input.cursor) as u16;
        frame.set_cursor_position((x.min(area.right().saturating_sub(1)), area.y + 1));
    }
}

fn draw_confirm(frame: &mut ratatui::Frame, pending: &Bookmark, area: Rect) {
    let width = area.width.min(60);
    let rect = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + area.height.saturating_sub(5) / 2,
        width,
        height: 5.min(area.height),
    };
    let lines = vec![
        Line::from("You have unsaved changes."),
        Line::from(vec![
            Span::raw("Discard them and open "),
            Span::styled(pending.token().to_string(), Style::default().fg(Color::Yellow)),
            Span::raw("? (y/n)"),
        ]),
    ];
    frame.render_widget(ratatui::widgets::Clear, rect);
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: true }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title("Unsaved changes"),
        ),
        rect,
    );
}
