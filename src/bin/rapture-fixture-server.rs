use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use clap::Parser;
use serde::Deserialize;

use rapture::model::{Asset, Component, Permission, Repository, ServerState, UserInfo};
use rapture::remote::API_PREFIX;

/// Canned backend data served by the fixture server.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct Fixture {
    permissions: Vec<Permission>,
    state: ServerState,
    repositories: Vec<Repository>,
    components: BTreeMap<String, Vec<Component>>,
    assets: BTreeMap<String, Vec<Asset>>,
}

struct AppState {
    fixture: Fixture,
    token: Option<String>,
}

#[derive(Parser)]
#[command(name = "rapture-fixture-server")]
#[command(about = "Serves canned permissions, state and browse data", long_about = None)]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8081")]
    addr: SocketAddr,

    /// Write bound address to this file (dev/test convenience)
    #[arg(long)]
    addr_file: Option<PathBuf>,

    /// Fixture file (JSON); a small demo data set is served without one
    #[arg(long)]
    fixture: Option<PathBuf>,

    /// Require this bearer token on API routes
    #[arg(long)]
    token: Option<String>,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let args = Args::parse();

    let fixture = match &args.fixture {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("read fixture {}", path.display()))?;
            serde_json::from_str(&raw).with_context(|| format!("parse fixture {}", path.display()))?
        }
        None => demo_fixture(),
    };
    let state = Arc::new(AppState {
        fixture,
        token: args.token,
    });

    let api = Router::new()
        .route("/permissions", get(permissions))
        .route("/state", get(server_state))
        .route("/repositories", get(repositories))
        .route("/repositories/:name/components", get(components))
        .route("/components/:id/assets", get(assets))
        .layer(middleware::from_fn_with_state(state.clone(), require_bearer));

    let app = Router::new()
        .route("/healthz", get(healthz))
        .nest(API_PREFIX, api)
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(args.addr)
        .await
        .with_context(|| format!("bind {}", args.addr))?;

    let local_addr = listener.local_addr().context("read listener local addr")?;
    eprintln!("rapture-fixture-server listening on {}", local_addr);

    if let Some(addr_file) = &args.addr_file {
        std::fs::write(addr_file, local_addr.to_string())
            .with_context(|| format!("write addr file {}", addr_file.display()))?;
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

async fn require_bearer(
    State(state): State<Arc<AppState>>,
    req: axum::extract::Request,
    next: Next,
) -> Response {
    let Some(expected) = state.token.as_deref() else {
        return next.run(req).await;
    };
    let presented = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));
    if presented != Some(expected) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({"error": "unauthorized"})),
        )
            .into_response();
    }
    next.run(req).await
}

async fn healthz() -> &'static str {
    "ok"
}

async fn permissions(State(state): State<Arc<AppState>>) -> Json<Vec<Permission>> {
    Json(state.fixture.permissions.clone())
}

async fn server_state(State(state): State<Arc<AppState>>) -> Json<ServerState> {
    Json(state.fixture.state.clone())
}

async fn repositories(State(state): State<Arc<AppState>>) -> Json<Vec<Repository>> {
    Json(state.fixture.repositories.clone())
}

async fn components(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Response {
    if !state.fixture.repositories.iter().any(|r| r.name == name) {
        return (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({"error": "repository not found"})),
        )
            .into_response();
    }
    let rows = state.fixture.components.get(&name).cloned().unwrap_or_default();
    Json(rows).into_response()
}

async fn assets(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> Json<Vec<Asset>> {
    Json(state.fixture.assets.get(&id).cloned().unwrap_or_default())
}

fn demo_fixture() -> Fixture {
    let granted = [
        "nexus:search:read",
        "nexus:component:add",
        "nexus:repositories:read",
        "nexus:repositories:create",
        "nexus:tasks:read",
    ];
    let component = Component {
        id: "c1".to_string(),
        repository: "maven-releases".to_string(),
        format: "maven2".to_string(),
        group: Some("org.example".to_string()),
        name: "demo".to_string(),
        version: Some("1.0.0".to_string()),
    };
    Fixture {
        permissions: granted.iter().map(|id| Permission::granted(*id)).collect(),
        state: ServerState {
            user: Some(UserInfo {
                id: "admin".to_string(),
                name: Some("Administrator".to_string()),
                administrator: true,
            }),
            ..ServerState::default()
        },
        repositories: vec![Repository {
            name: "maven-releases".to_string(),
            format: "maven2".to_string(),
            kind: "hosted".to_string(),
            url: Some("http://localhost:8081/repository/maven-releases".to_string()),
        }],
        components: BTreeMap::from([("maven-releases".to_string(), vec![component])]),
        assets: BTreeMap::from([(
            "c1".to_string(),
            vec![Asset {
                id: "a1".to_string(),
                path: "org/example/demo/1.0.0/demo-1.0.0.jar".to_string(),
                content_type: Some("application/java-archive".to_string()),
                size: Some(2048),
            }],
        )]),
    }
}
