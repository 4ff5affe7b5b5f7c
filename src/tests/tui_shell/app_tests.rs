use super::*;

use crate::config::RaptureConfig;
use crate::model::{Component, Repository};
use crate::plugins::default_plugins;
use crate::test_support::FakeBackend;

fn app(backend: &FakeBackend) -> App {
    let mut ctx = AppContext::new(RaptureConfig::default(), Box::new(backend.clone()));
    let report = ctx.start(default_plugins());
    App::new(ctx, report)
}

fn admin_backend() -> FakeBackend {
    let backend = FakeBackend::default();
    backend.sign_in("admin");
    backend.grant(&["nexus:tasks:read", "nexus:logging:read"]);
    {
        let mut data = backend.0.borrow_mut();
        data.repositories = vec![Repository {
            name: "maven-releases".to_string(),
            format: "maven2".to_string(),
            kind: "hosted".to_string(),
            url: None,
        }];
        data.components.insert(
            "maven-releases".to_string(),
            vec![Component {
                id: "c1".to_string(),
                repository: "maven-releases".to_string(),
                format: "maven2".to_string(),
                group: Some("org.example".to_string()),
                name: "demo".to_string(),
                version: Some("1.0.0".to_string()),
            }],
        );
    }
    backend
}

fn displayed_key(app: &App) -> Option<String> {
    app.ctx.router().displayed().key().map(str::to_string)
}

#[test]
fn starts_on_the_welcome_page() {
    let backend = admin_backend();
    let app = app(&backend);

    assert_eq!(displayed_key(&app).as_deref(), Some("browse/welcome"));
    assert!(app.content.as_any().downcast_ref::<FeatureView>().is_some());
    assert!(app.menu.iter().any(|e| e.key == "browse/welcome"));
    assert!(app.notices.is_empty());
}

#[test]
fn unsaved_changes_hold_navigation_until_confirmed() {
    let backend = admin_backend();
    let mut app = app(&backend);

    app.run_command("go admin/system/tasks");
    assert_eq!(displayed_key(&app).as_deref(), Some("admin/system/tasks"));
    assert!(
        app.menu
            .iter()
            .any(|e| e.key == "admin/system/tasks" && e.depth == 1)
    );

    app.run_command("edit");
    app.run_command("go admin/support/logging");
    assert_eq!(
        app.confirm_discard.as_ref().map(|b| b.token()),
        Some("admin/support/logging")
    );
    assert_eq!(displayed_key(&app).as_deref(), Some("admin/system/tasks"));

    app.confirm(false);
    assert!(app.confirm_discard.is_none());
    assert!(app.ctx.router().pending().is_none());
    assert!(app.ctx.router().is_dirty());

    app.run_command("go admin/support/logging");
    app.confirm(true);
    assert_eq!(displayed_key(&app).as_deref(), Some("admin/support/logging"));
    assert!(!app.ctx.router().is_dirty());
}

#[test]
fn drilldown_selection_updates_the_bookmark_without_remounting() {
    let backend = admin_backend();
    let mut app = app(&backend);

    app.navigate("browse/browse");
    assert_eq!(
        app.ctx.router().displayed(),
        &Displayed::Mounted {
            key: "browse/browse".to_string()
        }
    );
    assert!(app.content.as_any().downcast_ref::<DrilldownView>().is_some());
    let seq = app.ctx.router().seq();

    app.focus = Focus::Content;
    app.activate();
    assert_eq!(app.ctx.router().bookmark().token(), "browse/browse:maven-releases");
    assert_eq!(app.ctx.router().seq(), seq);

    app.back();
    assert_eq!(app.ctx.router().bookmark().token(), "browse/browse");
}

#[test]
fn losing_the_session_replaces_the_view() {
    let backend = admin_backend();
    let mut app = app(&backend);
    app.run_command("go admin/system/tasks");

    backend.sign_out();
    app.refresh();
    assert!(app.content.as_any().downcast_ref::<StatusView>().is_some());
    assert!(matches!(
        app.ctx.router().displayed(),
        Displayed::NotVisible { .. }
    ));
    assert_eq!(app.ctx.visible_modes(), vec![Mode::Browse]);
}

#[test]
fn bad_commands_become_warnings() {
    let backend = FakeBackend::default();
    let mut app = app(&backend);

    app.run_command("frobnicate");
    app.run_command("mode admin");
    let texts: Vec<&str> = app.notices.iter().map(|n| n.text.as_str()).collect();
    assert!(texts[0].starts_with("unknown command 'frobnicate'"));
    assert!(texts[1].contains("no visible features"));
    assert!(app.notices.iter().all(|n| n.kind == NoticeKind::Warn));
    assert_eq!(app.mode(), Mode::Browse);
}
