use super::*;
use crate::conditions::Condition;
use crate::model::ViewSpec;
use crate::test_support::{TestFacts, feature};

fn registry() -> FeatureRegistry {
    let mut reg = FeatureRegistry::new();
    reg.register(feature("browse/welcome", 1).public()).unwrap();
    reg.register(feature("browse/browse", 2).view(ViewSpec::loading("browse")))
        .unwrap();
    reg.register(
        feature("admin/security/users", 1).condition(Condition::permitted("nexus:users:read")),
    )
    .unwrap();
    reg.register(feature("admin/system/tasks", 2)).unwrap();
    reg
}

fn router() -> Router {
    Router::new(RouterConfig::default())
}

#[test]
fn missing_path_on_empty_registry_is_not_found() {
    let mut r = router();
    let nav = r.navigate_to("missing/path", &FeatureRegistry::new(), &TestFacts::default());
    assert_eq!(
        nav,
        Navigation::Changed {
            displayed: Displayed::NotFound {
                path: "missing/path".to_string()
            },
            ticket: None,
        }
    );
    assert_eq!(r.seq(), 1);
}

#[test]
fn mounts_visible_feature_and_follows_mode() {
    let reg = registry();
    let mut r = router();
    let nav = r.navigate_to("admin/system/tasks", &reg, &TestFacts::default());
    assert!(nav.is_changed());
    assert!(nav.ticket().is_none());
    assert_eq!(
        r.displayed(),
        &Displayed::Mounted {
            key: "admin/system/tasks".to_string()
        }
    );
    assert_eq!(r.mode(), Mode::Admin);
    assert_eq!(r.mount_count(), 1);
}

#[test]
fn hidden_feature_reports_reason() {
    let reg = registry();
    let mut r = router();

    r.navigate_to("admin/security/users", &reg, &TestFacts::default());
    assert!(matches!(
        r.displayed(),
        Displayed::NotVisible { reason: NotVisibleReason::NotPermitted, .. }
    ));

    r.navigate_to("admin/system/tasks", &reg, &TestFacts::anonymous());
    assert!(matches!(
        r.displayed(),
        Displayed::NotVisible { reason: NotVisibleReason::NotAuthenticated, .. }
    ));
}

#[test]
fn not_found_and_not_permitted_map_to_errors() {
    let reg = registry();
    let mut r = router();

    r.navigate_to("admin/nothing", &reg, &TestFacts::default());
    assert_eq!(
        r.displayed().error(),
        Some(UiError::NotFound {
            path: "admin/nothing".to_string()
        })
    );

    r.navigate_to("admin/security/users", &reg, &TestFacts::default());
    assert_eq!(
        r.displayed().error(),
        Some(UiError::NotPermitted {
            path: "admin/security/users".to_string()
        })
    );

    r.navigate_to("admin/system/tasks", &reg, &TestFacts::anonymous());
    assert_eq!(r.displayed().error(), None);
    r.navigate_to("admin/system/tasks", &reg, &TestFacts::default());
    assert_eq!(r.displayed().error(), None);
}

#[test]
fn renavigating_is_idempotent() {
    let reg = registry();
    let facts = TestFacts::default();
    let mut r = router();
    r.navigate_to("admin/system/tasks", &reg, &facts);
    let seq = r.seq();

    let nav = r.navigate_to("Admin/System/Tasks:some-id", &reg, &facts);
    match nav {
        Navigation::Unchanged { bookmark } => assert_eq!(bookmark.model_ids(), vec!["some-id"]),
        other => panic!("expected unchanged, got {:?}", other),
    }
    assert_eq!(r.seq(), seq);
    assert_eq!(r.mount_count(), 1);
    assert_eq!(r.bookmark().token(), "Admin/System/Tasks:some-id");
}

#[test]
fn stale_mount_completion_is_ignored() {
    let reg = registry();
    let facts = TestFacts::default();
    let mut r = router();

    let first = r.navigate_to("browse/browse", &reg, &facts);
    let ticket = first.ticket().cloned().expect("loading view hands out a ticket");
    assert!(matches!(r.displayed(), Displayed::Mounting { .. }));

    r.navigate_to("admin/system/tasks", &reg, &facts);
    assert!(!r.complete_mount(&ticket));
    assert_eq!(
        r.displayed(),
        &Displayed::Mounted {
            key: "admin/system/tasks".to_string()
        }
    );

    let again = r.navigate_to("browse/browse", &reg, &facts);
    let fresh = again.ticket().cloned().unwrap();
    assert!(!r.complete_mount(&ticket));
    assert!(r.complete_mount(&fresh));
    assert!(!r.complete_mount(&fresh));
    assert_eq!(
        r.displayed(),
        &Displayed::Mounted {
            key: "browse/browse".to_string()
        }
    );
}

#[test]
fn empty_token_selects_first_visible_feature() {
    let reg = registry();
    let mut r = router();
    r.navigate_to("", &reg, &TestFacts::anonymous());
    assert_eq!(r.displayed().key(), Some("browse/welcome"));
    assert_eq!(r.bookmark().token(), "browse/welcome");

    let mut r = router();
    r.navigate_to("", &FeatureRegistry::new(), &TestFacts::default());
    assert_eq!(r.displayed(), &Displayed::NotFound { path: String::new() });
}

#[test]
fn empty_token_without_auto_select_stays_empty() {
    let reg = registry();
    let mut r = Router::new(RouterConfig {
        initial_bookmark: None,
        auto_select_first: false,
    });
    let nav = r.navigate_to("", &reg, &TestFacts::default());
    assert!(matches!(nav, Navigation::Unchanged { .. }));
    assert_eq!(r.displayed(), &Displayed::Empty);
}

#[test]
fn change_mode_opens_first_feature_of_mode() {
    let reg = registry();
    let mut r = router();
    r.change_mode(Mode::Admin, &reg, &TestFacts::granting(&["nexus:users:read"]));
    assert_eq!(r.displayed().key(), Some("admin/security/users"));
    assert_eq!(r.mode(), Mode::Admin);

    r.change_mode(Mode::User, &reg, &TestFacts::default());
    assert_eq!(r.displayed(), &Displayed::NotFound { path: "user".to_string() });
    assert_eq!(r.mode(), Mode::User);
}

#[test]
fn unsaved_changes_block_navigation() {
    let reg = registry();
    let facts = TestFacts::default();
    let mut r = router();
    r.navigate_to("admin/system/tasks", &reg, &facts);
    r.set_dirty(true);

    let seq = r.seq();
    let nav = r.navigate_to("browse/welcome", &reg, &facts);
    assert!(matches!(nav, Navigation::Blocked { .. }));
    assert_eq!(r.seq(), seq);
    assert_eq!(r.pending().map(|b| b.token()), Some("browse/welcome"));

    // staying on the same feature is not blocked
    assert!(matches!(
        r.navigate_to("admin/system/tasks:x", &reg, &facts),
        Navigation::Unchanged { .. }
    ));

    let nav = r.discard_and_continue(&reg, &facts).unwrap();
    assert!(nav.is_changed());
    assert!(!r.is_dirty());
    assert_eq!(r.displayed().key(), Some("browse/welcome"));
    assert!(r.discard_and_continue(&reg, &facts).is_none());
}

#[test]
fn cancel_keeps_dirty_view() {
    let reg = registry();
    let facts = TestFacts::default();
    let mut r = router();
    r.navigate_to("admin/system/tasks", &reg, &facts);
    r.set_dirty(true);
    r.navigate_to("browse/welcome", &reg, &facts);
    assert!(r.cancel_pending().is_some());
    assert!(r.is_dirty());
    assert_eq!(r.displayed().key(), Some("admin/system/tasks"));
}

#[test]
fn refresh_follows_permission_changes() {
    let reg = registry();
    let mut r = router();
    let granted = TestFacts::granting(&["nexus:users:read"]);
    r.navigate_to("admin/security/users", &reg, &granted);
    assert!(matches!(r.displayed(), Displayed::Mounted { .. }));

    assert!(matches!(r.refresh(&reg, &granted), Navigation::Unchanged { .. }));

    let nav = r.refresh(&reg, &TestFacts::default());
    assert!(nav.is_changed());
    assert!(matches!(r.displayed(), Displayed::NotVisible { .. }));

    r.refresh(&reg, &granted);
    assert!(matches!(r.displayed(), Displayed::Mounted { .. }));
    assert_eq!(r.mount_count(), 2);
}
