#![cfg(feature = "egui")]

use camino::Utf8PathBuf;
use groller::console::MessageKind;
use groller::egui_app::{GrollerApp, PathAction};
use groller::settings::Settings;
use groller::workbench::Workbench;
use std::fs;
use tempfile::tempdir;

#[test]
fn open_prompt_loads_the_typed_path() {
    let tmp = tempdir().unwrap();
    let path = Utf8PathBuf::from_path_buf(tmp.path().join("job.xgc")).unwrap();
    fs::write(&path, "G21\n").unwrap();

    let mut app = GrollerApp::new(Workbench::new(Settings::default()));
    app.ask_path(PathAction::Open);
    app.prompt.as_mut().unwrap().path = path.to_string();
    assert!(app.confirm_prompt());
    assert!(app.prompt.is_none());
    assert_eq!(app.bench.source, "G21\n");
}

#[test]
fn save_without_path_asks_for_one() {
    let mut app = GrollerApp::new(Workbench::new(Settings::default()));
    app.save();
    assert_eq!(app.prompt.as_ref().map(|p| p.action), Some(PathAction::SaveAs));
}

#[test]
fn empty_prompt_reports_on_console() {
    let mut app = GrollerApp::new(Workbench::new(Settings::default()));
    app.ask_path(PathAction::SaveOutput);
    assert!(!app.confirm_prompt());
    assert!(app.bench.console.lines().iter().any(|l| l.kind == MessageKind::Error));
}
