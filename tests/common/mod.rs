use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use rapture::config::{BackendConfig, RaptureConfig};

pub struct ServerGuard {
    pub base_url: String,
    _dir: tempfile::TempDir,
    child: Child,
}

impl Drop for ServerGuard {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

impl ServerGuard {
    #[allow(dead_code)]
    pub fn backend_config(&self, token: Option<&str>) -> BackendConfig {
        BackendConfig {
            base_url: self.base_url.clone(),
            token: token.map(str::to_string),
            timeout_secs: 5,
            retries: 1,
        }
    }

    #[allow(dead_code)]
    pub fn config(&self) -> RaptureConfig {
        RaptureConfig {
            backend: self.backend_config(None),
            ..RaptureConfig::default()
        }
    }
}

/// An administrator with a handful of read permissions, two repositories
/// and one maven component with a jar.
pub fn admin_fixture() -> serde_json::Value {
    serde_json::json!({
        "permissions": [
            {"id": "nexus:tasks:read", "permitted": true},
            {"id": "nexus:repositories:read", "permitted": true},
            {"id": "nexus:repositories:create", "permitted": true},
            {"id": "nexus:users:read", "permitted": false}
        ],
        "state": {
            "user": {"id": "admin", "name": "Administrator", "administrator": true},
            "edition": "PRO",
            "capabilities": {"clm": true}
        },
        "repositories": [
            {"name": "maven-releases", "format": "maven2", "type": "hosted"},
            {"name": "npm-proxy", "format": "npm", "type": "proxy",
             "url": "http://localhost:8081/repository/npm-proxy"}
        ],
        "components": {
            "maven-releases": [
                {"id": "c1", "repository": "maven-releases", "format": "maven2",
                 "group": "org.example", "name": "demo", "version": "1.0.0"}
            ]
        },
        "assets": {
            "c1": [
                {"id": "a1", "path": "org/example/demo/1.0.0/demo-1.0.0.jar", "size": 2048}
            ]
        }
    })
}

pub fn spawn_server(fixture: &serde_json::Value, token: Option<&str>) -> Result<ServerGuard> {
    let dir = tempfile::tempdir().context("create server tempdir")?;
    let addr_file = dir.path().join("addr.txt");
    let fixture_file = dir.path().join("fixture.json");
    std::fs::write(&fixture_file, serde_json::to_vec_pretty(fixture)?)
        .context("write fixture")?;

    let mut cmd = Command::new(env!("CARGO_BIN_EXE_rapture-fixture-server"));
    cmd.args([
        "--addr",
        "127.0.0.1:0",
        "--addr-file",
        addr_file.to_str().unwrap(),
        "--fixture",
        fixture_file.to_str().unwrap(),
    ]);
    if let Some(token) = token {
        cmd.args(["--token", token]);
    }
    let child = cmd
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .context("spawn rapture-fixture-server")?;

    let base_url = read_addr_file(&addr_file)?;
    wait_for_healthz(&base_url)?;

    Ok(ServerGuard {
        base_url,
        _dir: dir,
        child,
    })
}

fn read_addr_file(addr_file: &std::path::Path) -> Result<String> {
    let start = Instant::now();
    loop {
        if start.elapsed() > Duration::from_secs(5) {
            anyhow::bail!("addr file not written at {}", addr_file.display());
        }

        if let Ok(s) = std::fs::read_to_string(addr_file) {
            let s = s.trim();
            if !s.is_empty() {
                return Ok(format!("http://{}", s));
            }
        }
        thread::sleep(Duration::from_millis(10));
    }
}

pub fn wait_for_healthz(base_url: &str) -> Result<()> {
    let client = reqwest::blocking::Client::new();
    let start = Instant::now();
    loop {
        if start.elapsed() > Duration::from_secs(5) {
            anyhow::bail!("server did not become healthy at {}/healthz", base_url);
        }
        match client.get(format!("{}/healthz", base_url)).send() {
            Ok(resp) if resp.status().is_success() => return Ok(()),
            _ => {
                thread::sleep(Duration::from_millis(50));
            }
        }
    }
}

/// A local URL nothing listens on.
#[allow(dead_code)]
pub fn dead_url() -> Result<String> {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").context("bind probe")?;
    let addr = listener.local_addr().context("probe addr")?;
    drop(listener);
    Ok(format!("http://{}", addr))
}
