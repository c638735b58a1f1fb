use camino::Utf8PathBuf;
use groller::compiler::FAILED_OUTPUT;
use groller::console::MessageKind;
use groller::parser::MemSource;
use groller::settings::Settings;
use groller::workbench::Workbench;
use std::fs;
use tempfile::tempdir;

fn utf8(path: std::path::PathBuf) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(path).unwrap()
}

#[test]
fn open_edit_save_and_compile() {
    let tmp = tempdir().unwrap();
    let script = utf8(tmp.path().join("part.xgc"));
    fs::write(&script, "G21\n\tG00 X1\n").unwrap();

    let mut wb = Workbench::new(Settings::default());
    wb.open_file(&script).unwrap();
    // Tabs become spaces on load.
    assert_eq!(wb.source, "G21\n    G00 X1\n");
    assert!(!wb.dirty);

    wb.set_source("G21\nG00 X1 Y2\n".to_string());
    assert!(wb.dirty);
    assert!(wb.title().ends_with("part.xgc*"));
    wb.save().unwrap();
    assert!(!wb.dirty);
    assert_eq!(fs::read_to_string(&script).unwrap(), "G21\nG00 X1 Y2\n");

    assert!(wb.compile());
    assert_eq!(wb.output, "G21\nG00 X1.000 Y2.000\n");
    let out = wb.default_output_path().unwrap();
    assert_eq!(out, utf8(tmp.path().join("part.nc")));
    wb.save_output(&out).unwrap();
    assert_eq!(fs::read_to_string(&out).unwrap(), wb.output);
}

#[test]
fn failed_compile_shows_failure_text() {
    let mut wb = Workbench::new(Settings::default());
    wb.set_source("G01 X[1 +]".to_string());
    assert!(!wb.compile());
    assert_eq!(wb.output, FAILED_OUTPUT);
    assert!(wb.console.lines().iter().any(|l| l.kind == MessageKind::Error));
    wb.reset_console();
    assert_eq!(wb.console.lines().len(), 2);
}

#[test]
fn save_without_path_is_an_error() {
    let mut wb = Workbench::new(Settings::default());
    wb.set_source("G21".to_string());
    assert!(wb.save().is_err());
    assert!(wb.save_output("/nonexistent/out.nc").is_err());
}

#[test]
fn open_from_memory_and_new_file() {
    let mut src = MemSource::new();
    src.insert("mem/drill.xgc", "G81.1 X0 Y0 Z-1 R1 F50\nG80\n");
    let mut wb = Workbench::new(Settings::default());
    wb.open_from(&mut src, "mem/drill.xgc").unwrap();
    assert_eq!(wb.path.as_deref().map(|p| p.as_str()), Some("mem/drill.xgc"));
    assert!(wb.compile());
    assert!(wb.output.starts_with("G00 X0.000 Y0.000\n"));

    wb.new_file();
    assert!(wb.source.is_empty() && wb.output.is_empty() && wb.path.is_none());
    assert!(wb.open_from(&mut src, "mem/missing.xgc").is_err());
}

#[test]
fn report_puts_errors_on_the_console() {
    let mut wb = Workbench::new(Settings::default());
    let err = wb.open_file("/nonexistent/dir/x.xgc").unwrap_err();
    wb.report(&err);
    let last = &wb.console.lines()[wb.console.lines().len() - 2];
    assert_eq!(last.kind, MessageKind::Error);
    assert!(last.text.contains("Failed to read"));
}
