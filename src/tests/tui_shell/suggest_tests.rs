use super::*;
use crate::tui_shell::commands::command_defs;

fn labels(s: &[Suggestion]) -> Vec<&str> {
    s.iter().map(|x| x.label()).collect()
}

#[test]
fn exact_and_prefix_outrank_substring() {
    assert_eq!(score_match("go", "go"), 100);
    assert!(score_match("re", "refresh") > score_match("re", "admin/system/more"));
    assert_eq!(score_match("zz", "refresh"), 0);
}

#[test]
fn last_segment_matches_bookmarks() {
    assert_eq!(score_match("tasks", "admin/system/tasks"), 30);
}

#[test]
fn first_word_suggests_commands() {
    let out = suggestions("re", &command_defs(), &[]);
    assert_eq!(labels(&out), vec!["refresh"]);

    // alias hit
    let out = suggestions("q", &command_defs(), &[]);
    assert_eq!(out[0].label(), "quit");
}

#[test]
fn go_suggests_bookmarks() {
    let keys = vec![
        "admin/system/tasks".to_string(),
        "admin/security/users".to_string(),
        "browse/welcome".to_string(),
    ];
    let out = suggestions("go ta", &command_defs(), &keys);
    assert_eq!(labels(&out), vec!["admin/system/tasks"]);
    assert_eq!(out[0].completion(), "go admin/system/tasks");

    let out = suggestions("go admin", &command_defs(), &keys);
    // shorter keys rank higher among prefix matches
    assert_eq!(labels(&out), vec!["admin/system/tasks", "admin/security/users"]);
}

#[test]
fn ties_sort_alphabetically() {
    let a = CommandDef {
        name: "alpha",
        aliases: &[],
        usage: "",
        help: "",
    };
    let b = CommandDef {
        name: "beta",
        aliases: &[],
        usage: "",
        help: "",
    };
    let mut scored = vec![(10, Suggestion::Command(b)), (10, Suggestion::Command(a)), (20, Suggestion::Bookmark("z".into()))];
    sort_scored_suggestions(&mut scored);
    let order: Vec<&str> = scored.iter().map(|(_, s)| s.label()).collect();
    assert_eq!(order, vec!["z", "alpha", "beta"]);
}
