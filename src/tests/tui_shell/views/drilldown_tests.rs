use super::*;

use crate::config::RaptureConfig;
use crate::plugins::default_plugins;
use crate::test_support::{FakeBackend, TestFacts};

fn backend() -> FakeBackend {
    let backend = FakeBackend::default();
    backend.sign_in("admin");
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
        data.assets.insert(
            "c1".to_string(),
            vec![Asset {
                id: "a1".to_string(),
                path: "org/example/demo/1.0.0/demo-1.0.0.jar".to_string(),
                content_type: None,
                size: Some(10),
            }],
        );
    }
    backend
}

fn context(backend: &FakeBackend) -> AppContext {
    let mut ctx = AppContext::new(RaptureConfig::default(), Box::new(backend.clone()));
    ctx.start(default_plugins());
    ctx
}

fn drilldown_view(backend: &FakeBackend, kind: DrilldownKind) -> DrilldownView {
    let repositories = backend.0.borrow().repositories.clone();
    DrilldownView::new("browse/browse".to_string(), kind, BrowseData::new(repositories))
}

#[test]
fn browse_walks_repository_component_and_detail() {
    let backend = backend();
    let ctx = context(&backend);
    let mut view = drilldown_view(&backend, DrilldownKind::Browse);

    let rows = view.drilldown().active_rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].columns, vec!["maven2".to_string(), "hosted".to_string()]);
    assert_eq!(
        view.activate(),
        view::Activation::Select {
            depth: 0,
            id: "maven-releases".to_string()
        }
    );

    view.prepare(0, "maven-releases", &ctx).unwrap();
    view.select(0, "maven-releases").unwrap();
    let rows = view.drilldown().active_rows();
    assert_eq!(rows[0].label, "org.example:demo:1.0.0");

    view.prepare(1, "c1", &ctx).unwrap();
    view.select(1, "c1").unwrap();
    assert!(view.drilldown().is_detail_shown());
    assert_eq!(view.activate(), view::Activation::None);

    let lines = view.drilldown().detail_lines().unwrap();
    assert!(lines.contains(&"  org/example/demo/1.0.0/demo-1.0.0.jar (10 bytes)".to_string()));
    assert!(lines.iter().any(|l| l.contains("<artifactId>demo</artifactId>")));

    assert_eq!(view.bookmark().token(), "browse/browse:maven-releases:c1");
    assert_eq!(view.title(), "Repositories > maven-releases > org.example:demo:1.0.0");

    assert!(view.back());
    assert!(!view.drilldown().is_detail_shown());
    assert_eq!(view.bookmark().token(), "browse/browse:maven-releases");
}

#[test]
fn reselect_restores_selections_from_a_bookmark() {
    let backend = backend();
    let ctx = context(&backend);
    let mut view = drilldown_view(&backend, DrilldownKind::Browse);

    view.reselect(&Bookmark::from_token("browse/browse:maven-releases:c1"), &ctx)
        .unwrap();
    assert!(view.drilldown().is_detail_shown());
    assert_eq!(view.drilldown().selections().len(), 2);

    let mut other = drilldown_view(&backend, DrilldownKind::Browse);
    let err = other
        .reselect(&Bookmark::from_token("browse/browse:nope"), &ctx)
        .unwrap_err();
    assert_eq!(
        err,
        UiError::ModelNotFound {
            kind: "repository".to_string(),
            id: "nope".to_string()
        }
    );
    assert!(other.drilldown().selections().is_empty());
}

#[test]
fn backend_failure_while_preparing_is_reported() {
    let backend = backend();
    let ctx = context(&backend);
    let mut view = drilldown_view(&backend, DrilldownKind::Browse);

    backend.set_down(true);
    assert!(view.prepare(0, "maven-releases", &ctx).is_err());
    let err = view
        .reselect(&Bookmark::from_token("browse/browse:maven-releases"), &ctx)
        .unwrap_err();
    assert!(matches!(err, UiError::BackendUnavailable(_)));
}

#[test]
fn repositories_drilldown_offers_permitted_actions() {
    let backend = backend();
    let mut view = drilldown_view(&backend, DrilldownKind::Repositories);

    let facts = TestFacts::granting(&["nexus:repositories:create", "nexus:repositories:delete"]);
    let before = view.drilldown().affordances(&facts);
    assert!(before.can_create);
    assert!(!before.can_delete);

    view.select(0, "maven-releases").unwrap();
    assert!(view.drilldown().is_detail_shown());
    assert!(view.drilldown().affordances(&facts).can_delete);
    assert!(
        view.drilldown()
            .detail_lines()
            .unwrap()
            .contains(&"url:    -".to_string())
    );

    let read_only = TestFacts::granting(&["nexus:repositories:read"]);
    assert_eq!(view.drilldown().affordances(&read_only), Affordances::default());
}

#[test]
fn list_filter_survives_selection_changes() {
    let backend = backend();
    let ctx = context(&backend);
    let mut view = drilldown_view(&backend, DrilldownKind::Browse);

    view.reselect(&Bookmark::from_token("browse/browse=maven:maven-releases"), &ctx)
        .unwrap();
    assert_eq!(view.bookmark().token(), "browse/browse=maven:maven-releases");

    view.prepare(1, "c1", &ctx).unwrap();
    view.select(1, "c1").unwrap();
    assert_eq!(view.bookmark().token(), "browse/browse=maven:maven-releases:c1");
    assert_eq!(view.bookmark().filter(), Some("maven"));

    assert!(view.back());
    assert!(view.back());
    assert_eq!(view.bookmark().token(), "browse/browse=maven");

    view.reselect(&Bookmark::from_token("browse/browse"), &ctx).unwrap();
    assert_eq!(view.bookmark().filter(), None);
}
