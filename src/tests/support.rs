use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};
use std::rc::Rc;

use crate::conditions::Facts;
use crate::model::{Asset, Component, Feature, Mode, Permission, Repository, ServerState, UserInfo};
use crate::permissions::PermissionSource;
use crate::remote::BrowseSource;
use crate::state::StateSource;

#[derive(Clone, Debug)]
pub(crate) struct TestFacts {
    pub(crate) granted: HashSet<String>,
    pub(crate) capabilities: BTreeMap<String, bool>,
    pub(crate) edition: String,
    pub(crate) authenticated: bool,
}

impl Default for TestFacts {
    fn default() -> Self {
        Self {
            granted: HashSet::new(),
            capabilities: BTreeMap::new(),
            edition: "OSS".to_string(),
            authenticated: true,
        }
    }
}

impl TestFacts {
    pub(crate) fn granting(ids: &[&str]) -> Self {
        Self {
            granted: ids.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        }
    }

    pub(crate) fn anonymous() -> Self {
        Self {
            authenticated: false,
            ..Self::default()
        }
    }
}

impl Facts for TestFacts {
    fn is_permitted(&self, id: &str) -> bool {
        self.granted.contains(id)
    }

    fn capability(&self, key: &str) -> bool {
        self.capabilities.get(key).copied().unwrap_or(false)
    }

    fn edition(&self) -> &str {
        &self.edition
    }

    fn is_authenticated(&self) -> bool {
        self.authenticated
    }
}

pub(crate) fn feature(path: &str, weight: i32) -> Feature {
    let mode = path
        .split('/')
        .next()
        .and_then(|m| m.parse::<Mode>().ok())
        .unwrap_or(Mode::Admin);
    let text = path.rsplit('/').next().unwrap_or(path).to_string();
    Feature::new(path, text, mode).weight(weight)
}

#[derive(Debug, Default)]
pub(crate) struct FakeData {
    pub(crate) permissions: Vec<Permission>,
    pub(crate) state: ServerState,
    pub(crate) repositories: Vec<Repository>,
    pub(crate) components: BTreeMap<String, Vec<Component>>,
    pub(crate) assets: BTreeMap<String, Vec<Asset>>,
    pub(crate) down: bool,
}

/// In-memory backend; clones share the same data.
#[derive(Clone, Debug, Default)]
pub(crate) struct FakeBackend(pub(crate) Rc<RefCell<FakeData>>);

impl FakeBackend {
    pub(crate) fn grant(&self, ids: &[&str]) {
        self.0.borrow_mut().permissions = ids.iter().map(|id| Permission::granted(*id)).collect();
    }

    pub(crate) fn sign_in(&self, id: &str) {
        self.0.borrow_mut().state.user = Some(UserInfo {
            id: id.to_string(),
            name: None,
            administrator: false,
        });
    }

    pub(crate) fn sign_out(&self) {
        self.0.borrow_mut().state.user = None;
    }

    pub(crate) fn set_down(&self, down: bool) {
        self.0.borrow_mut().down = down;
    }

    fn check(&self) -> anyhow::Result<()> {
        if self.0.borrow().down {
            anyhow::bail!("connection refused");
        }
        Ok(())
    }
}

impl PermissionSource for FakeBackend {
    fn fetch_permissions(&self) -> anyhow::Result<Vec<Permission>> {
        self.check()?;
        Ok(self.0.borrow().permissions.clone())
    }
}

impl StateSource for FakeBackend {
    fn fetch_state(&self) -> anyhow::Result<ServerState> {
        self.check()?;
        Ok(self.0.borrow().state.clone())
    }
}

impl BrowseSource for FakeBackend {
    fn repositories(&self) -> anyhow::Result<Vec<Repository>> {
        self.check()?;
        Ok(self.0.borrow().repositories.clone())
    }

    fn components(&self, repository: &str) -> anyhow::Result<Vec<Component>> {
        self.check()?;
        Ok(self.0.borrow().components.get(repository).cloned().unwrap_or_default())
    }

    fn assets(&self, component_id: &str) -> anyhow::Result<Vec<Asset>> {
        self.check()?;
        Ok(self.0.borrow().assets.get(component_id).cloned().unwrap_or_default())
    }
}
