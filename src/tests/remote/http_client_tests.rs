use std::cell::Cell;

use super::*;

#[test]
fn status_errors_are_not_retried() {
    let calls = Cell::new(0);
    let err = with_retries("permissions", 3, || -> Result<()> {
        calls.set(calls.get() + 1);
        anyhow::bail!("forbidden")
    })
    .unwrap_err();
    assert_eq!(calls.get(), 1);
    assert_eq!(format!("{:#}", err), "permissions: forbidden");
}

#[test]
fn success_returns_immediately() {
    let calls = Cell::new(0);
    let v = with_retries("state", 3, || {
        calls.set(calls.get() + 1);
        Ok(7)
    })
    .unwrap();
    assert_eq!((v, calls.get()), (7, 1));
}

#[test]
fn backoff_doubles_then_levels_off() {
    let ms: Vec<u128> = (0..4).map(|i| backoff(i).as_millis()).collect();
    assert_eq!(ms, vec![200, 400, 800, 1600]);
    assert_eq!(backoff(5), backoff(64));
    assert_eq!(backoff(usize::MAX).as_millis(), 6400);
}

#[test]
fn url_joins_base_and_api_prefix() {
    let client = RemoteClient::new(BackendConfig {
        base_url: "http://localhost:8081/".to_string(),
        ..BackendConfig::default()
    })
    .unwrap();
    assert_eq!(
        client.url("/permissions"),
        "http://localhost:8081/service/rest/rapture/permissions"
    );
}
