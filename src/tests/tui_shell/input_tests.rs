use super::*;

#[test]
fn edits_are_char_aware() {
    let mut input = Input::default();
    for c in "göo".chars() {
        input.insert_char(c);
    }
    input.move_left();
    input.backspace();
    assert_eq!(input.buf, "go");
    assert_eq!(input.cursor, 1);
    input.delete();
    assert_eq!(input.buf, "g");
    input.move_right();
    input.move_right();
    assert_eq!(input.cursor, 1);
}

#[test]
fn take_records_history_once() {
    let mut input = Input::default();
    input.set("go admin/system/tasks".to_string());
    assert_eq!(input.take(), "go admin/system/tasks");
    input.set("go admin/system/tasks ".to_string());
    input.take();
    input.set("refresh".to_string());
    input.take();
    assert!(input.is_empty());

    input.history_up();
    assert_eq!(input.buf, "refresh");
    input.history_up();
    assert_eq!(input.buf, "go admin/system/tasks");
    input.history_up();
    assert_eq!(input.buf, "go admin/system/tasks");
    input.history_down();
    assert_eq!(input.buf, "refresh");
    input.history_down();
    assert!(input.is_empty());
}
