//! Explicit composition root: owns the stores, the registry, the watcher,
//! the snippet controller and the router, and wires them together.

use std::collections::BTreeMap;

use crate::conditions::{Condition, ConditionFlip, ConditionWatcher, FactChange, Facts, WatchHandle};
use crate::config::RaptureConfig;
use crate::error::UiError;
use crate::features::{FeatureRegistry, MenuNode};
use crate::model::Mode;
use crate::permissions::PermissionStore;
use crate::plugins::Plugin;
use crate::remote::Backend;
use crate::router::{MountTicket, Navigation, Router};
use crate::snippets::SnippetController;
use crate::state::StateStore;

/// [`Facts`] over the permission and state stores.
#[derive(Clone, Copy)]
pub struct FactView<'a> {
    permissions: &'a PermissionStore,
    state: &'a StateStore,
}

impl<'a> FactView<'a> {
    pub fn new(permissions: &'a PermissionStore, state: &'a StateStore) -> Self {
        Self { permissions, state }
    }
}

impl Facts for FactView<'_> {
    fn is_permitted(&self, id: &str) -> bool {
        self.permissions.is_permitted(id)
    }

    fn capability(&self, key: &str) -> bool {
        self.state.capability(key)
    }

    fn edition(&self) -> &str {
        self.state.edition()
    }

    fn is_authenticated(&self) -> bool {
        self.state.user().is_some()
    }
}

#[derive(Debug)]
pub struct StartReport {
    /// Programmer and backend errors hit while starting; none is fatal.
    pub errors: Vec<UiError>,
    pub navigation: Navigation,
}

#[derive(Debug, Default)]
pub struct RefreshReport {
    pub errors: Vec<UiError>,
    pub flips: Vec<ConditionFlip>,
    /// Set when a flip made the router re-resolve its bookmark.
    pub navigation: Option<Navigation>,
}

pub struct AppContext {
    config: RaptureConfig,
    backend: Box<dyn Backend>,
    permissions: PermissionStore,
    state: StateStore,
    registry: FeatureRegistry,
    watcher: ConditionWatcher,
    snippets: SnippetController,
    router: Router,
    watches: BTreeMap<String, WatchHandle>,
    started: bool,
}

impl AppContext {
    pub fn new(config: RaptureConfig, backend: Box<dyn Backend>) -> Self {
        let router = Router::new(config.router.clone());
        Self {
            config,
            backend,
            permissions: PermissionStore::new(),
            state: StateStore::new(),
            registry: FeatureRegistry::new(),
            watcher: ConditionWatcher::new(),
            snippets: SnippetController::new(),
            router,
            watches: BTreeMap::new(),
            started: false,
        }
    }

    /// Registers the plugins' contributions, loads the facts and opens the
    /// initial bookmark.
    pub fn start(&mut self, plugins: Vec<Box<dyn Plugin>>) -> StartReport {
        let mut errors = Vec::new();

        for plugin in &plugins {
            let mut added = 0usize;
            for feature in plugin.features() {
                match self.registry.register(feature) {
                    Ok(()) => added += 1,
                    Err(err) => errors.push(err),
                }
            }
            for (format, generator) in plugin.snippet_generators() {
                if let Err(err) = self.snippets.register_generator(format, generator) {
                    errors.push(err);
                }
            }
            tracing::debug!(plugin = plugin.name(), features = added, "plugin assembled");
        }

        let (change, load_errors) = self.load_facts();
        errors.extend(load_errors);
        tracing::debug!(changed = change.permissions.len() + change.state_keys.len(), "initial facts");

        let facts = FactView::new(&self.permissions, &self.state);
        for feature in self.registry.list(None) {
            let handle = self.watcher.watch(feature.effective_condition(), &facts);
            self.watches.insert(feature.key(), handle);
        }

        let token = self.config.router.initial_bookmark.clone().unwrap_or_default();
        let navigation = self.router.navigate_to(&token, &self.registry, &facts);
        self.started = true;

        tracing::info!(
            plugins = plugins.len(),
            features = self.registry.len(),
            formats = self.snippets.formats().len(),
            errors = errors.len(),
            "application context started"
        );
        StartReport { errors, navigation }
    }

    /// Tears down everything `start` built: facts, watched conditions, plugin
    /// contributions and the router, which goes back to `Empty`.
    pub fn stop(&mut self) {
        if !self.started {
            return;
        }
        self.permissions.clear();
        self.state.reset();
        self.watcher.clear();
        self.watches.clear();
        self.registry = FeatureRegistry::new();
        self.snippets = SnippetController::new();
        self.router = Router::new(self.config.router.clone());
        self.started = false;
        tracing::info!("application context stopped");
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Reloads state and permissions; conditions that flipped make the
    /// router re-resolve the current bookmark.
    pub fn refresh(&mut self) -> RefreshReport {
        let (change, errors) = self.load_facts();
        let facts = FactView::new(&self.permissions, &self.state);
        let flips = self.watcher.notify(&facts, &change);
        let navigation = if flips.is_empty() {
            None
        } else {
            Some(self.router.refresh(&self.registry, &facts))
        };
        RefreshReport {
            errors,
            flips,
            navigation,
        }
    }

    fn load_facts(&mut self) -> (FactChange, Vec<UiError>) {
        let mut change = FactChange::default();
        let mut errors = Vec::new();
        match self.state.load(self.backend.as_ref()) {
            Ok(keys) => change.state_keys = keys,
            Err(err) => errors.push(err),
        }
        match self.permissions.load(self.backend.as_ref()) {
            Ok(diff) => change.permissions = diff.changed,
            Err(err) => errors.push(err),
        }
        (change, errors)
    }

    pub fn navigate_to(&mut self, token: &str) -> Navigation {
        let facts = FactView::new(&self.permissions, &self.state);
        self.router.navigate_to(token, &self.registry, &facts)
    }

    pub fn change_mode(&mut self, mode: Mode) -> Navigation {
        let facts = FactView::new(&self.permissions, &self.state);
        self.router.change_mode(mode, &self.registry, &facts)
    }

    pub fn complete_mount(&mut self, ticket: &MountTicket) -> bool {
        self.router.complete_mount(ticket)
    }

    pub fn set_dirty(&mut self, dirty: bool) {
        self.router.set_dirty(dirty);
    }

    pub fn discard_and_continue(&mut self) -> Option<Navigation> {
        let facts = FactView::new(&self.permissions, &self.state);
        self.router.discard_and_continue(&self.registry, &facts)
    }

    pub fn cancel_pending(&mut self) {
        self.router.cancel_pending();
    }

    pub fn facts(&self) -> FactView<'_> {
        FactView::new(&self.permissions, &self.state)
    }

    pub fn menu(&self, mode: Mode) -> Vec<MenuNode> {
        self.registry.menu(mode, &self.facts())
    }

    pub fn visible_modes(&self) -> Vec<Mode> {
        self.registry.visible_modes(&self.facts())
    }

    /// Last watched visibility of a feature.
    pub fn is_feature_visible(&self, key: &str) -> Option<bool> {
        let handle = self.watches.get(key)?;
        self.watcher.is_satisfied(*handle)
    }

    pub fn config(&self) -> &RaptureConfig {
        &self.config
    }

    pub fn backend(&self) -> &dyn Backend {
        self.backend.as_ref()
    }

    pub fn permissions(&self) -> &PermissionStore {
        &self.permissions
    }

    pub fn state(&self) -> &StateStore {
        &self.state
    }

    pub fn registry(&self) -> &FeatureRegistry {
        &self.registry
    }

    pub fn snippets(&self) -> &SnippetController {
        &self.snippets
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Watches an extra condition against the current facts.
    pub fn watch(&mut self, condition: Condition) -> WatchHandle {
        let facts = FactView::new(&self.permissions, &self.state);
        self.watcher.watch(condition, &facts)
    }

    pub fn subscribe(&mut self, handle: WatchHandle, callback: impl FnMut(bool) + 'static) -> bool {
        self.watcher.subscribe(handle, callback)
    }

    pub fn unwatch(&mut self, handle: WatchHandle) -> bool {
        self.watcher.unwatch(handle)
    }
}

#[cfg(test)]
#[path = "tests/context_tests.rs"]
mod tests;
