mod common;

use anyhow::Result;

use rapture::UiError;
use rapture::config::BackendConfig;
use rapture::model::Permission;
use rapture::permissions::{PermissionSource, PermissionStore};
use rapture::remote::{BrowseSource, RemoteClient};
use rapture::state::{StateSource, StateStore};

#[test]
fn permissions_and_state_are_read_from_the_backend() -> Result<()> {
    let guard = common::spawn_server(&common::admin_fixture(), None)?;
    let client = RemoteClient::new(guard.backend_config(None))?;

    let permissions = client.fetch_permissions()?;
    assert_eq!(permissions.len(), 4);

    let mut store = PermissionStore::new();
    let diff = store.load(&client)?;
    assert!(diff.contains("nexus:tasks:read"));
    assert!(store.is_permitted("nexus:tasks:read"));
    assert!(!store.is_permitted("nexus:users:read"));
    assert!(!store.is_permitted("nexus:never:mentioned"));

    let state = client.fetch_state()?;
    assert_eq!(state.user.as_ref().map(|u| u.id.as_str()), Some("admin"));
    assert_eq!(state.edition, "PRO");

    let mut states = StateStore::new();
    let changed = states.load(&client)?;
    assert!(changed.contains("user"));
    assert!(states.capability("clm"));
    assert!(!states.capability("usertoken"));
    Ok(())
}

#[test]
fn browse_endpoints_serve_repositories_components_and_assets() -> Result<()> {
    let guard = common::spawn_server(&common::admin_fixture(), None)?;
    let client = RemoteClient::new(guard.backend_config(None))?;

    let repos = client.repositories()?;
    let names: Vec<&str> = repos.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["maven-releases", "npm-proxy"]);
    assert_eq!(repos[1].kind, "proxy");

    let components = client.components("maven-releases")?;
    assert_eq!(components.len(), 1);
    assert_eq!(components[0].coordinates(), "org.example:demo:1.0.0");
    assert!(client.components("npm-proxy")?.is_empty());

    let assets = client.assets("c1")?;
    assert_eq!(assets.len(), 1);
    assert_eq!(assets[0].extension(), Some("jar"));
    assert!(client.assets("nope")?.is_empty());
    Ok(())
}

#[test]
fn bearer_token_is_required_when_configured() -> Result<()> {
    let guard = common::spawn_server(&common::admin_fixture(), Some("s3cret"))?;

    let anonymous = RemoteClient::new(guard.backend_config(None))?;
    let err = anonymous.fetch_permissions().unwrap_err();
    assert!(format!("{:#}", err).contains("unauthorized"), "{:#}", err);

    let wrong = RemoteClient::new(guard.backend_config(Some("guess")))?;
    assert!(wrong.fetch_state().is_err());

    let right = RemoteClient::new(guard.backend_config(Some("s3cret")))?;
    assert_eq!(right.fetch_permissions()?.len(), 4);
    Ok(())
}

#[test]
fn unreachable_backend_keeps_the_previous_permission_set() -> Result<()> {
    let client = RemoteClient::new(BackendConfig {
        base_url: common::dead_url()?,
        token: None,
        timeout_secs: 2,
        retries: 2,
    })?;

    let mut store = PermissionStore::new();
    store.replace(vec![Permission::granted("nexus:tasks:read")]);

    let err = store.load(&client).unwrap_err();
    assert!(matches!(err, UiError::BackendUnavailable(_)), "{:?}", err);
    assert!(store.is_permitted("nexus:tasks:read"));
    assert_eq!(store.len(), 1);
    Ok(())
}
