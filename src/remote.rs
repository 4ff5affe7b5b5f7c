use anyhow::{Context, Result};

use crate::config::BackendConfig;
use crate::model::{Asset, Component, Permission, Repository, ServerState};
use crate::permissions::PermissionSource;
use crate::state::StateSource;

mod http_client;

mod browse;
mod security;

pub const API_PREFIX: &str = "/service/rest/rapture";

/// Backend seam for the browse drilldown.
pub trait BrowseSource {
    fn repositories(&self) -> Result<Vec<Repository>>;
    fn components(&self, repository: &str) -> Result<Vec<Component>>;
    fn assets(&self, component_id: &str) -> Result<Vec<Asset>>;
}

/// Everything the console reads from the repository manager.
pub trait Backend: PermissionSource + StateSource + BrowseSource {}

impl<T: PermissionSource + StateSource + BrowseSource> Backend for T {}

pub struct RemoteClient {
    config: BackendConfig,
    client: reqwest::blocking::Client,
}

impl RemoteClient {
    pub fn new(config: BackendConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("rapture/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .context("build reqwest client")?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }
}

/// No backend at all: nothing is permitted, nobody is signed in.
#[derive(Clone, Copy, Debug, Default)]
pub struct OfflineBackend;

impl PermissionSource for OfflineBackend {
    fn fetch_permissions(&self) -> Result<Vec<Permission>> {
        Ok(Vec::new())
    }
}

impl StateSource for OfflineBackend {
    fn fetch_state(&self) -> Result<ServerState> {
        Ok(ServerState::default())
    }
}

impl BrowseSource for OfflineBackend {
    fn repositories(&self) -> Result<Vec<Repository>> {
        Ok(Vec::new())
    }

    fn components(&self, _repository: &str) -> Result<Vec<Component>> {
        Ok(Vec::new())
    }

    fn assets(&self, _component_id: &str) -> Result<Vec<Asset>> {
        Ok(Vec::new())
    }
}
