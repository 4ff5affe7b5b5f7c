use super::*;

impl App {
    pub(super) fn run_command(&mut self, line: &str) {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return;
        };
        let args: Vec<&str> = words.collect();

        let Some(cmd) = commands::find_command(name) else {
            self.notify(NoticeKind::Warn, format!("unknown command '{}' (try help)", name));
            return;
        };

        match cmd.name {
            "help" => self.cmd_help(&args),
            "go" => match args.first() {
                Some(token) => self.navigate(token),
                None => self.notify(NoticeKind::Warn, format!("usage: {}", cmd.usage)),
            },
            "mode" => match args.first().map(|m| m.parse::<Mode>()) {
                Some(Ok(mode)) => self.change_mode(mode),
                Some(Err(err)) => self.notify_error(&err),
                None => self.notify(NoticeKind::Warn, format!("usage: {}", cmd.usage)),
            },
            "back" => self.back(),
            "refresh" => {
                self.refresh();
                self.notify(NoticeKind::Info, "refreshed");
            }
            "edit" => {
                self.ctx.set_dirty(true);
                self.notify(NoticeKind::Info, "marked as modified");
            }
            "save" => {
                self.ctx.set_dirty(false);
                self.notify(NoticeKind::Info, "changes saved");
            }
            "snippets" => {
                let formats = self.ctx.snippets().formats().join(", ");
                self.notify(NoticeKind::Info, format!("snippet formats: {}", formats));
            }
            "time" => {
                self.ts_mode = toggle_ts(self.ts_mode);
            }
            "quit" => self.quit = true,
            other => tracing::debug!(command = other, "command without handler"),
        }
    }

    fn cmd_help(&mut self, args: &[&str]) {
        if let Some(name) = args.first() {
            match commands::find_command(name) {
                Some(c) => self.notify(NoticeKind::Info, format!("{}: {}", c.usage, c.help)),
                None => self.notify(NoticeKind::Warn, format!("unknown command '{}'", name)),
            }
            return;
        }
        let names: Vec<&str> = commands::command_defs().iter().map(|c| c.name).collect();
        self.notify(
            NoticeKind::Info,
            format!("commands: {}  (F1-F3 modes, Tab focus, Esc back)", names.join(" ")),
        );
    }
}
