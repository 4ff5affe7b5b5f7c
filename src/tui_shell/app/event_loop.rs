use super::*;

pub(in crate::tui_shell) fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        app.tick();

        terminal
            .draw(|f| super::render::draw(f, app))
            .context("draw")?;
        if app.quit {
            return Ok(());
        }

        if event::poll(Duration::from_millis(50)).context("poll")? {
            match event::read().context("read event")? {
                Event::Key(k) if k.kind == KeyEventKind::Press => handle_key(app, k),
                _ => {}
            }
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit = true;
        return;
    }

    if app.confirm_discard.is_some() {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm(true),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.confirm(false),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Esc => {
            if !app.input.is_empty() {
                app.input.clear();
                app.recompute_suggestions();
            } else {
                app.back();
            }
        }

        KeyCode::Tab => {
            if app.suggestions.is_empty() {
                app.focus = match app.focus {
                    Focus::Menu => Focus::Content,
                    Focus::Content => Focus::Menu,
                };
            } else {
                app.apply_selected_suggestion();
            }
        }

        KeyCode::Enter => {
            if app.input.is_empty() {
                app.activate();
                return;
            }
            let line = app.input.take();
            app.suggestions.clear();
            app.suggestion_selected = 0;
            app.run_command(&line);
        }

        KeyCode::Up | KeyCode::Down => {
            let down = key.code == KeyCode::Down;
            if !app.suggestions.is_empty() {
                view::move_cursor(&mut app.suggestion_selected, app.suggestions.len(), down);
            } else if !app.input.is_empty() {
                if down {
                    app.input.history_down();
                } else {
                    app.input.history_up();
                }
            } else {
                app.move_selection(down);
            }
        }

        KeyCode::F(n @ 1..=3) => {
            let mode = Mode::ALL[usize::from(n - 1)];
            app.change_mode(mode);
        }

        KeyCode::Left => app.input.move_left(),
        KeyCode::Right => app.input.move_right(),
        KeyCode::Backspace => {
            app.input.backspace();
            app.recompute_suggestions();
        }
        KeyCode::Delete => {
            app.input.delete();
            app.recompute_suggestions();
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.input.insert_char(c);
            app.recompute_suggestions();
        }
        _ => {}
    }
}
