mod common;

use anyhow::Result;

use rapture::context::AppContext;
use rapture::model::Mode;
use rapture::plugins::default_plugins;
use rapture::remote::RemoteClient;
use rapture::router::{Displayed, Navigation, NotVisibleReason};

fn started(guard: &common::ServerGuard) -> Result<AppContext> {
    let cfg = guard.config();
    let client = RemoteClient::new(cfg.backend.clone())?;
    let mut ctx = AppContext::new(cfg, Box::new(client));
    let report = ctx.start(default_plugins());
    assert!(report.errors.is_empty(), "{:?}", report.errors);
    Ok(ctx)
}

#[test]
fn signed_in_admin_sees_permitted_features() -> Result<()> {
    let guard = common::spawn_server(&common::admin_fixture(), None)?;
    let mut ctx = started(&guard)?;

    assert_eq!(ctx.router().displayed().key(), Some("browse/welcome"));
    assert_eq!(ctx.visible_modes(), vec![Mode::Browse, Mode::Admin, Mode::User]);

    let nav = ctx.navigate_to("admin/system/tasks");
    assert!(nav.is_changed());
    assert_eq!(
        ctx.router().displayed(),
        &Displayed::Mounted {
            key: "admin/system/tasks".to_string()
        }
    );
    assert_eq!(ctx.router().mode(), Mode::Admin);

    ctx.navigate_to("admin/security/users");
    assert!(matches!(
        ctx.router().displayed(),
        Displayed::NotVisible {
            reason: NotVisibleReason::NotPermitted,
            ..
        }
    ));

    ctx.navigate_to("admin/nothing/here");
    assert_eq!(
        ctx.router().displayed(),
        &Displayed::NotFound {
            path: "admin/nothing/here".to_string()
        }
    );
    Ok(())
}

#[test]
fn data_loading_view_mounts_once_and_keeps_drilldown_segments() -> Result<()> {
    let guard = common::spawn_server(&common::admin_fixture(), None)?;
    let mut ctx = started(&guard)?;
    let mounts = ctx.router().mount_count();

    let nav = ctx.navigate_to("admin/repository/repositories");
    let ticket = nav.ticket().cloned().expect("loading view hands out a ticket");
    assert!(matches!(ctx.router().displayed(), Displayed::Mounting { .. }));
    assert!(ctx.complete_mount(&ticket));
    assert!(!ctx.complete_mount(&ticket));
    assert_eq!(ctx.router().mount_count(), mounts + 1);

    let nav = ctx.navigate_to("admin/repository/repositories:maven-releases");
    match nav {
        Navigation::Unchanged { bookmark } => {
            assert_eq!(bookmark.model_ids(), vec!["maven-releases".to_string()]);
        }
        other => panic!("expected unchanged navigation, got {:?}", other),
    }
    assert_eq!(ctx.router().mount_count(), mounts + 1);
    Ok(())
}

#[test]
fn change_mode_opens_the_first_visible_feature() -> Result<()> {
    let guard = common::spawn_server(&common::admin_fixture(), None)?;
    let mut ctx = started(&guard)?;

    let nav = ctx.change_mode(Mode::Admin);
    assert!(nav.is_changed());
    assert_eq!(ctx.router().mode(), Mode::Admin);
    assert_eq!(
        ctx.router().displayed().key(),
        Some("admin/repository/repositories")
    );

    ctx.change_mode(Mode::User);
    assert_eq!(ctx.router().displayed().key(), Some("user/account"));
    Ok(())
}
