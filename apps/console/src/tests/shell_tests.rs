use super::*;

use std::io::Cursor;

use storage::{IdStrategy, Storage};

fn run_script(script: &str) -> (ViewContext, String) {
    let mut ctx = ViewContext::new(Storage::seeded(IdStrategy::Sequential));
    let mut out = Vec::new();
    Shell::new(&mut ctx, Cursor::new(script.to_string()), &mut out)
        .run()
        .expect("shell run");
    (ctx, String::from_utf8(out).expect("utf8"))
}

#[test]
fn splits_quoted_words() {
    assert_eq!(
        split_words(r#"register "Jane Smith" jane@example.com '098 765'"#).expect("split"),
        ["register", "Jane Smith", "jane@example.com", "098 765"]
    );
    assert_eq!(split_words("   ").expect("split"), Vec::<String>::new());
    assert_eq!(split_words(r#"add-type """#).expect("split"), ["add-type", ""]);
    assert!(split_words("add-type \"Group").is_none());
}

#[test]
fn backslash_escapes_follow_shell_rules() {
    assert_eq!(
        split_words(r#"add-type "O\"Brien""#).expect("split"),
        ["add-type", "O\"Brien"]
    );
    assert_eq!(
        split_words(r"add-course Data\ Science").expect("split"),
        ["add-course", "Data Science"]
    );
}

#[test]
fn unbalanced_quote_is_reported_and_shell_continues() {
    let (ctx, out) = run_script("add-type \"Weekend\ntypes\nquit\n");
    assert!(out.contains("error: invalid quoting"));
    assert!(out.contains("Special"));
    assert_eq!(ctx.storage.revision(), 0);
}

#[test]
fn lists_seeded_course_types() {
    let (_, out) = run_script("types\nquit\n");
    assert!(out.contains("Individual"));
    assert!(out.contains("used in 0 course offerings"));
}

#[test]
fn validation_message_is_printed_and_nothing_changes() {
    let (ctx, out) = run_script("add-course hindi\n");
    assert!(out.contains("! A course with this name already exists"));
    assert_eq!(ctx.storage.revision(), 0);
}

#[test]
fn declined_delete_dispatches_nothing() {
    let (ctx, out) = run_script("delete-type ct3\nn\n");
    assert!(out.contains("Are you sure you want to delete this course type? [y/N]"));
    assert!(out.contains("cancelled"));
    assert!(ctx.snapshot().course_type(&"ct3".into()).is_some());
}

#[test]
fn blocked_delete_prints_notice() {
    let (ctx, out) = run_script("delete-course c1\ny\n");
    assert!(out.contains("notice: Cannot delete this course because it is used in course offerings."));
    assert!(ctx.snapshot().course(&"c1".into()).is_some());
}

#[test]
fn registers_with_default_offering_for_filter() {
    let (ctx, out) = run_script(
        "register \"Asha Rao\" asha@example.com 5551234 --type ct2\nstudents co2\n",
    );
    assert!(out.contains("registered student s3 as r2 on co2"));
    assert!(out.contains("Asha Rao"));
    assert_eq!(ctx.snapshot().registrations_for_offering(&"co2".into()), 1);
}

#[test]
fn edit_offering_keeps_unspecified_selection() {
    let (ctx, out) = run_script("edit-offering co2 --type ct3\n");
    assert!(out.contains("updated course offering co2"));
    let offering = ctx
        .snapshot()
        .course_offering(&"co2".into())
        .expect("offering");
    assert_eq!(offering.course_id.as_str(), "c2");
    assert_eq!(offering.course_type_id.as_str(), "ct3");
}

#[test]
fn unknown_command_reports_and_continues() {
    let (_, out) = run_script("enrol\ncourses\n");
    assert!(out.contains("error"));
    assert!(out.contains("Hindi"));
}

#[test]
fn dump_prints_snapshot_json() {
    let (_, out) = run_script("dump\n");
    assert!(out.contains("\"courseTypes\""));
    assert!(out.contains("\"registrationDate\": \"2023-04-15\""));
}
