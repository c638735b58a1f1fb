#![cfg(feature = "egui")]

use groller::console::MessageKind;
use groller::egui_app::{line_numbers, message_colors, xgc_syntax_job};

#[test]
fn syntax_job_covers_whole_text() {
    let script = "G01 X[10 * i] F100 ; cut\nfor i in frange(0, 3, 1):\n";
    let job = xgc_syntax_job(script);
    assert_eq!(job.text, script);
    assert!(job.sections.len() > 5);
}

#[test]
fn comment_gets_its_own_section() {
    let job = xgc_syntax_job("G21 ; metric");
    let last = job.sections.last().unwrap();
    assert_eq!(&job.text[last.byte_range.clone()], "; metric");
}

#[test]
fn gutter_numbers_are_right_aligned() {
    let text = "a\n".repeat(10);
    let numbers = line_numbers(&text);
    assert_eq!(numbers.lines().next(), Some(" 1"));
    assert_eq!(numbers.lines().last(), Some("10"));
    assert_eq!(line_numbers(""), "1");
}

#[test]
fn console_kinds_have_distinct_backgrounds() {
    let (_, ok) = message_colors(MessageKind::Success);
    let (_, err) = message_colors(MessageKind::Error);
    let (_, warn) = message_colors(MessageKind::Warning);
    assert_ne!(ok, err);
    assert_ne!(err, warn);
}
