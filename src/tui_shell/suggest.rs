use super::CommandDef;

pub(super) fn score_match(q: &str, candidate: &str) -> i32 {
    let q = q.to_lowercase();
    let c = candidate.to_lowercase();
    if q.is_empty() {
        return 1;
    }
    if c == q {
        return 100;
    }
    if c.starts_with(&q) {
        return 50 - (c.len() as i32 - q.len() as i32).min(40);
    }
    // bookmark keys: match on the last path segment too
    if c.rsplit('/').next().is_some_and(|last| last.starts_with(&q)) {
        return 30;
    }
    if c.contains(&q) {
        return 10;
    }
    0
}

/// Highest score first; ties keep alphabetical order.
pub(super) fn sort_scored_suggestions(scored: &mut [(i32, Suggestion)]) {
    scored.sort_by(|(sa, a), (sb, b)| sb.cmp(sa).then_with(|| a.label().cmp(b.label())));
}

#[derive(Clone, Debug)]
pub(super) enum Suggestion {
    Command(CommandDef),
    Bookmark(String),
}

impl Suggestion {
    pub(super) fn label(&self) -> &str {
        match self {
            Suggestion::Command(c) => c.name,
            Suggestion::Bookmark(key) => key,
        }
    }

    /// Text the input line is completed to.
    pub(super) fn completion(&self) -> String {
        match self {
            Suggestion::Command(c) => format!("{} ", c.name),
            Suggestion::Bookmark(key) => format!("go {}", key),
        }
    }

    pub(super) fn hint(&self) -> &str {
        match self {
            Suggestion::Command(c) => c.help,
            Suggestion::Bookmark(_) => "open feature",
        }
    }
}

/// Commands while typing the first word; bookmark keys after `go `.
pub(super) fn suggestions(
    line: &str,
    commands: &[CommandDef],
    bookmarks: &[String],
) -> Vec<Suggestion> {
    let line = line.trim_start();
    let mut scored: Vec<(i32, Suggestion)> = match line.split_once(' ') {
        None => commands
            .iter()
            .map(|c| {
                let best = std::iter::once(c.name)
                    .chain(c.aliases.iter().copied())
                    .map(|n| score_match(line, n))
                    .max()
                    .unwrap_or(0);
                (best, Suggestion::Command(*c))
            })
            .collect(),
        Some((cmd, rest)) if matches!(cmd, "go" | "open" | "g") => bookmarks
            .iter()
            .map(|k| (score_match(rest.trim(), k), Suggestion::Bookmark(k.clone())))
            .collect(),
        Some(_) => Vec::new(),
    };
    scored.retain(|(s, _)| *s > 0);
    sort_scored_suggestions(&mut scored);
    scored.into_iter().map(|(_, s)| s).take(8).collect()
}

#[cfg(test)]
#[path = "../tests/tui_shell/suggest_tests.rs"]
mod tests;
