use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use globset::Glob;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use rapture::config::{self, ENV_CONFIG, RaptureConfig};
use rapture::context::AppContext;
use rapture::features::flatten_menu;
use rapture::model::{Component, Mode};
use rapture::permissions::PermissionStore;
use rapture::plugins::default_plugins;
use rapture::remote::{Backend, OfflineBackend, RemoteClient};
use rapture::router::Displayed;
use rapture::snippets::{SnippetController, builtin_generators};

#[derive(Parser)]
#[command(name = "rapture")]
#[command(about = "Repository manager admin console", long_about = None)]
struct Cli {
    /// More log output (repeatable)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Config file (JSON)
    #[arg(long, global = true, env = ENV_CONFIG)]
    config: Option<PathBuf>,

    /// Backend base URL (overrides RAPTURE_URL and the config file)
    #[arg(long, global = true)]
    url: Option<String>,

    /// Bearer token (overrides RAPTURE_TOKEN and the config file)
    #[arg(long, global = true)]
    token: Option<String>,

    /// Run without a backend: nobody is signed in, nothing is permitted
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the menu of visible features
    Menu {
        /// Only this mode (browse, admin, user)
        #[arg(long)]
        mode: Option<Mode>,
        /// Glob over bookmark keys, e.g. 'admin/security/*'
        #[arg(long = "match")]
        pattern: Option<String>,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Navigate to a bookmark and print what would be displayed
    Open {
        bookmark: String,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Load and print the permission set of the current user
    Permissions {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Print dependency snippets for a component
    Snippets {
        /// Repository format (maven2, npm, pypi, nuget, rubygems, docker)
        format: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        group: Option<String>,
        #[arg(long)]
        version: Option<String>,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Launch the terminal console
    Tui,
}

#[derive(Serialize)]
struct MenuLine {
    mode: Mode,
    depth: usize,
    key: String,
    text: String,
    group: bool,
}

#[derive(Serialize)]
struct OpenResult<'a> {
    bookmark: &'a str,
    mode: Mode,
    displayed: &'a Displayed,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet, matches!(cli.command, Commands::Tui))?;

    let mut cfg = RaptureConfig::load(cli.config.as_deref())?;
    cfg.apply_env(|k| std::env::var(k).ok());
    cfg.apply_flags(cli.url, cli.token);
    cfg.validate()?;

    match cli.command {
        Commands::Menu {
            mode,
            pattern,
            json,
        } => {
            let matcher = match pattern {
                Some(p) => Some(
                    Glob::new(&p)
                        .with_context(|| format!("invalid glob '{}'", p))?
                        .compile_matcher(),
                ),
                None => None,
            };

            let mut ctx = AppContext::new(cfg.clone(), backend(&cfg, cli.offline)?);
            report_start_errors(&ctx.start(default_plugins()).errors);

            let modes = match mode {
                Some(m) => vec![m],
                None => ctx.visible_modes(),
            };
            let mut lines = Vec::new();
            for m in modes {
                let nodes = ctx.menu(m);
                for (depth, node) in flatten_menu(&nodes) {
                    if matcher.as_ref().is_some_and(|g| !g.is_match(&node.key)) {
                        continue;
                    }
                    lines.push(MenuLine {
                        mode: m,
                        depth,
                        key: node.key.clone(),
                        text: node.text.clone(),
                        group: node.group,
                    });
                }
            }

            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&lines).context("serialize menu json")?
                );
            } else {
                let mut last_mode = None;
                for l in &lines {
                    if last_mode != Some(l.mode) {
                        println!("{}", l.mode.title());
                        last_mode = Some(l.mode);
                    }
                    let indent = if matcher.is_some() { 0 } else { l.depth };
                    println!("  {}{:<28} #{}", "  ".repeat(indent), l.text, l.key);
                }
            }
            ctx.stop();
        }

        Commands::Open { bookmark, json } => {
            let mut ctx = AppContext::new(cfg.clone(), backend(&cfg, cli.offline)?);
            report_start_errors(&ctx.start(default_plugins()).errors);

            let nav = ctx.navigate_to(&bookmark);
            if let Some(ticket) = nav.ticket() {
                ctx.complete_mount(ticket);
            }

            let router = ctx.router();
            if json {
                let out = OpenResult {
                    bookmark: router.bookmark().token(),
                    mode: router.mode(),
                    displayed: router.displayed(),
                };
                println!(
                    "{}",
                    serde_json::to_string_pretty(&out).context("serialize open json")?
                );
            } else {
                println!("bookmark: {}", router.bookmark());
                println!("mode: {}", router.mode());
                match router.displayed() {
                    Displayed::Empty => println!("displayed: nothing"),
                    Displayed::NotFound { path } => println!("displayed: not found ({})", path),
                    Displayed::NotVisible { key, reason, .. } => {
                        println!("displayed: not visible ({}, {:?})", key, reason)
                    }
                    Displayed::Mounting { key, .. } => println!("displayed: mounting {}", key),
                    Displayed::Mounted { key } => println!("displayed: {}", key),
                }
                if let Some(err) = router.displayed().error() {
                    println!("error: {}", err);
                }
            }
            ctx.stop();
        }

        Commands::Permissions { json } => {
            let backend = backend(&cfg, cli.offline)?;
            let mut store = PermissionStore::new();
            store.load(backend.as_ref())?;
            let snapshot = store.snapshot();
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&snapshot).context("serialize permissions json")?
                );
            } else if snapshot.is_empty() {
                println!("No permissions");
            } else {
                for p in snapshot {
                    let mark = if p.permitted { "granted" } else { "denied" };
                    println!("{:<8} {}", mark, p.id);
                }
            }
        }

        Commands::Snippets {
            format,
            name,
            group,
            version,
            json,
        } => {
            let mut snippets = SnippetController::new();
            for (fmt, generator) in builtin_generators() {
                snippets.register_generator(fmt, generator)?;
            }
            let component = Component {
                id: name.clone(),
                repository: String::new(),
                format: format.clone(),
                group,
                name,
                version,
            };
            let generated = snippets.generate(&format, &component, None);
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&generated).context("serialize snippets json")?
                );
            } else if generated.is_empty() {
                println!(
                    "No snippets for format '{}' (known: {})",
                    format,
                    snippets.formats().join(", ")
                );
            } else {
                for s in generated {
                    println!("== {}", s.display_name);
                    println!("{}", s.snippet_text);
                    println!();
                }
            }
        }

        Commands::Tui => {
            let ctx = AppContext::new(cfg.clone(), backend(&cfg, cli.offline)?);
            rapture::tui::run(ctx, default_plugins())?;
        }
    }

    Ok(())
}

fn backend(cfg: &RaptureConfig, offline: bool) -> Result<Box<dyn Backend>> {
    if offline {
        return Ok(Box::new(OfflineBackend));
    }
    Ok(Box::new(RemoteClient::new(cfg.backend.clone())?))
}

fn report_start_errors(errors: &[rapture::UiError]) {
    for err in errors {
        eprintln!("warning: {}", err);
    }
}

fn init_tracing(verbose: u8, quiet: bool, to_file: bool) -> Result<()> {
    let level = match verbose {
        0 if quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("rapture={}", level)));

    if to_file {
        let dir = config::data_dir();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("create log dir {}", dir.display()))?;
        let path = dir.join("rapture.log");
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("open log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}
