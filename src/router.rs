//! Bookmark-driven navigation: resolves a token to a feature, checks its
//! conditions and decides what the content area shows.

use serde::Serialize;

use crate::bookmarks::Bookmark;
use crate::conditions::Facts;
use crate::config::RouterConfig;
use crate::error::UiError;
use crate::features::FeatureRegistry;
use crate::model::{Feature, Mode};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotVisibleReason {
    NotPermitted,
    /// The feature requires a signed-in user and there is none.
    NotAuthenticated,
}

/// What the content area currently shows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Displayed {
    Empty,
    NotFound {
        path: String,
    },
    NotVisible {
        key: String,
        text: String,
        reason: NotVisibleReason,
    },
    Mounting {
        key: String,
        seq: u64,
    },
    Mounted {
        key: String,
    },
}

impl Displayed {
    /// Key of the feature involved, if any.
    pub fn key(&self) -> Option<&str> {
        match self {
            Displayed::NotVisible { key, .. }
            | Displayed::Mounting { key, .. }
            | Displayed::Mounted { key } => Some(key),
            Displayed::Empty | Displayed::NotFound { .. } => None,
        }
    }

    /// The failure a not-found or not-permitted outcome stands for.
    pub fn error(&self) -> Option<UiError> {
        match self {
            Displayed::NotFound { path } if !path.is_empty() => {
                Some(UiError::NotFound { path: path.clone() })
            }
            Displayed::NotVisible {
                key,
                reason: NotVisibleReason::NotPermitted,
                ..
            } => Some(UiError::NotPermitted { path: key.clone() }),
            _ => None,
        }
    }

    /// Key of the feature whose view is (being) mounted.
    pub fn mounted_key(&self) -> Option<&str> {
        match self {
            Displayed::Mounting { key, .. } | Displayed::Mounted { key } => Some(key),
            _ => None,
        }
    }
}

/// Handed out when a data-loading view starts mounting; redeem it with
/// [`Router::complete_mount`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MountTicket {
    seq: u64,
    key: String,
}

impl MountTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Navigation {
    Changed {
        displayed: Displayed,
        ticket: Option<MountTicket>,
    },
    /// Same state as before; `bookmark` may carry new drilldown segments.
    Unchanged { bookmark: Bookmark },
    /// Unsaved changes; nothing happened.
    Blocked { pending: Bookmark },
}

impl Navigation {
    pub fn ticket(&self) -> Option<&MountTicket> {
        match self {
            Navigation::Changed { ticket, .. } => ticket.as_ref(),
            _ => None,
        }
    }

    pub fn is_changed(&self) -> bool {
        matches!(self, Navigation::Changed { .. })
    }
}

enum Target<'a> {
    Empty,
    NotFound(String),
    Hidden(&'a Feature, NotVisibleReason),
    Mount(&'a Feature),
}

#[derive(Debug)]
pub struct Router {
    config: RouterConfig,
    seq: u64,
    displayed: Displayed,
    bookmark: Bookmark,
    mode: Mode,
    dirty: bool,
    pending: Option<Bookmark>,
    mounts: u64,
}

impl Router {
    pub fn new(config: RouterConfig) -> Self {
        Self {
            config,
            seq: 0,
            displayed: Displayed::Empty,
            bookmark: Bookmark::default(),
            mode: Mode::Browse,
            dirty: false,
            pending: None,
            mounts: 0,
        }
    }

    pub fn navigate_to(
        &mut self,
        token: &str,
        registry: &FeatureRegistry,
        facts: &dyn Facts,
    ) -> Navigation {
        let bookmark = Bookmark::from_token(token);
        if self.dirty {
            let stays = registry
                .resolve(bookmark.path())
                .is_some_and(|f| self.displayed.mounted_key() == Some(f.key().as_str()));
            if !stays {
                tracing::debug!(token = %bookmark, "navigation blocked by unsaved changes");
                self.pending = Some(bookmark.clone());
                return Navigation::Blocked { pending: bookmark };
            }
        }
        self.go(bookmark, registry, facts)
    }

    /// Re-resolves the current bookmark against fresh facts. Ignores the
    /// unsaved-changes guard: a view that lost its permission must go.
    pub fn refresh(&mut self, registry: &FeatureRegistry, facts: &dyn Facts) -> Navigation {
        let bookmark = self.bookmark.clone();
        self.go(bookmark, registry, facts)
    }

    /// Switches the header mode and opens its first visible feature.
    pub fn change_mode(
        &mut self,
        mode: Mode,
        registry: &FeatureRegistry,
        facts: &dyn Facts,
    ) -> Navigation {
        let token = registry
            .first_visible(mode, facts)
            .map(|f| f.key())
            .unwrap_or_else(|| mode.as_str().to_string());
        let nav = self.navigate_to(&token, registry, facts);
        if !matches!(nav, Navigation::Blocked { .. }) {
            self.mode = mode;
        }
        nav
    }

    /// Returns false (and changes nothing) for stale tickets.
    pub fn complete_mount(&mut self, ticket: &MountTicket) -> bool {
        let current = matches!(
            &self.displayed,
            Displayed::Mounting { key, seq } if *seq == ticket.seq && *key == ticket.key
        );
        if !current || ticket.seq != self.seq {
            tracing::debug!(seq = ticket.seq, key = %ticket.key, current = self.seq, "stale mount ignored");
            return false;
        }
        self.displayed = Displayed::Mounted {
            key: ticket.key.clone(),
        };
        self.mounts += 1;
        tracing::debug!(key = %ticket.key, "view mounted");
        true
    }

    pub fn set_dirty(&mut self, dirty: bool) {
        self.dirty = dirty;
        if !dirty {
            self.pending = None;
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn pending(&self) -> Option<&Bookmark> {
        self.pending.as_ref()
    }

    /// Drops the unsaved changes and performs the blocked navigation.
    pub fn discard_and_continue(
        &mut self,
        registry: &FeatureRegistry,
        facts: &dyn Facts,
    ) -> Option<Navigation> {
        let pending = self.pending.take()?;
        self.dirty = false;
        Some(self.go(pending, registry, facts))
    }

    pub fn cancel_pending(&mut self) -> Option<Bookmark> {
        self.pending.take()
    }

    pub fn displayed(&self) -> &Displayed {
        &self.displayed
    }

    pub fn bookmark(&self) -> &Bookmark {
        &self.bookmark
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Number of views mounted so far.
    pub fn mount_count(&self) -> u64 {
        self.mounts
    }

    fn go(&mut self, bookmark: Bookmark, registry: &FeatureRegistry, facts: &dyn Facts) -> Navigation {
        let (bookmark, target) = self.target(bookmark, registry, facts);

        let unchanged = match (&target, &self.displayed) {
            (Target::Empty, Displayed::Empty) => true,
            (Target::NotFound(p), Displayed::NotFound { path }) => p == path,
            (Target::Hidden(f, r), Displayed::NotVisible { key, reason, .. }) => {
                f.key() == *key && r == reason
            }
            (Target::Mount(f), d) => d.mounted_key() == Some(f.key().as_str()),
            _ => false,
        };
        if unchanged {
            self.bookmark = bookmark.clone();
            return Navigation::Unchanged { bookmark };
        }

        self.seq += 1;
        self.dirty = false;
        self.pending = None;
        let mut ticket = None;
        self.displayed = match target {
            Target::Empty => Displayed::Empty,
            Target::NotFound(path) => Displayed::NotFound { path },
            Target::Hidden(f, reason) => {
                self.mode = f.mode;
                Displayed::NotVisible {
                    key: f.key(),
                    text: f.text.clone(),
                    reason,
                }
            }
            Target::Mount(f) => {
                self.mode = f.mode;
                if f.view.loads_data {
                    ticket = Some(MountTicket {
                        seq: self.seq,
                        key: f.key(),
                    });
                    Displayed::Mounting {
                        key: f.key(),
                        seq: self.seq,
                    }
                } else {
                    self.mounts += 1;
                    Displayed::Mounted { key: f.key() }
                }
            }
        };
        self.bookmark = bookmark;
        tracing::debug!(token = %self.bookmark, seq = self.seq, state = ?self.displayed, "navigated");

        Navigation::Changed {
            displayed: self.displayed.clone(),
            ticket,
        }
    }

    fn target<'a>(
        &self,
        bookmark: Bookmark,
        registry: &'a FeatureRegistry,
        facts: &dyn Facts,
    ) -> (Bookmark, Target<'a>) {
        if bookmark.path().trim().is_empty() {
            if !self.config.auto_select_first {
                return (bookmark, Target::Empty);
            }
            let first = registry.first_visible(self.mode, facts).or_else(|| {
                registry
                    .visible_modes(facts)
                    .into_iter()
                    .find_map(|m| registry.first_visible(m, facts))
            });
            return match first {
                Some(f) => (Bookmark::from_token(&f.key()), Target::Mount(f)),
                None => (bookmark, Target::NotFound(String::new())),
            };
        }

        let Some(feature) = registry.resolve(bookmark.path()) else {
            let path = bookmark.path().to_string();
            return (bookmark, Target::NotFound(path));
        };
        if feature.is_visible(facts) {
            return (bookmark, Target::Mount(feature));
        }
        let reason = if feature.authentication_required && !facts.is_authenticated() {
            NotVisibleReason::NotAuthenticated
        } else {
            NotVisibleReason::NotPermitted
        };
        (bookmark, Target::Hidden(feature, reason))
    }
}

#[cfg(test)]
#[path = "tests/router_tests.rs"]
mod tests;
