use super::*;

fn at(s: &str) -> OffsetDateTime {
    OffsetDateTime::parse(s, &Rfc3339).unwrap()
}

#[test]
fn relative_timestamps() {
    let now = at("2024-05-01T12:00:00Z");
    assert_eq!(fmt_since("2024-05-01T11:59:55Z", now).as_deref(), Some("5s ago"));
    assert_eq!(fmt_since("2024-05-01T11:30:00Z", now).as_deref(), Some("30m ago"));
    assert_eq!(fmt_since("2024-05-01T02:00:00Z", now).as_deref(), Some("10h ago"));
    assert_eq!(fmt_since("2024-04-01T12:00:00Z", now), None);
    assert_eq!(fmt_since("2024-05-01T12:00:10Z", now), None);
}

#[test]
fn timestamp_style_falls_back_to_absolute() {
    let ctx = RenderCtx {
        now: at("2024-05-01T12:00:00Z"),
        ts_mode: TimestampStyle::Relative,
    };
    assert_eq!(fmt_ts("2024-04-01T08:30:00Z", &ctx), "2024-04-01 08:30:00");
    assert_eq!(fmt_ts("not a time", &ctx), "not a time");

    let abs = RenderCtx {
        ts_mode: toggle_ts(ctx.ts_mode),
        ..ctx
    };
    assert_eq!(fmt_ts("2024-05-01T11:59:55Z", &abs), "2024-05-01 11:59:55");
}

#[test]
fn server_label_strips_scheme() {
    assert_eq!(server_label("https://nexus.example.com/"), "nexus.example.com");
    assert_eq!(server_label("localhost:8081"), "localhost:8081");
}
