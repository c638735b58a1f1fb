use groller::console::{Console, MessageKind};
use groller::output::Precision;
use groller::settings::{G04Style, Settings};
use std::fs;
use tempfile::tempdir;

fn warnings(console: &Console) -> Vec<String> {
    console
        .lines()
        .iter()
        .filter(|l| l.kind == MessageKind::Warning)
        .map(|l| l.text.clone())
        .collect()
}

#[test]
fn full_settings_file_is_read() {
    let json = r#"{
        "comp_param": { "max_dec_prec": 4, "max_ang_prec": 1 },
        "transpiler": { "g04-style": "milliseconds" },
        "ui": { "tab_spaces": 2 }
    }"#;
    let settings = Settings::from_json(json).unwrap();
    let mut console = Console::default();
    assert_eq!(
        settings.precision(&mut console),
        Precision {
            position: 4,
            angular: 1
        }
    );
    assert!(warnings(&console).is_empty());
    assert_eq!(settings.transpiler.g04_style, G04Style::Milliseconds);
    assert_eq!(settings.ui.tab_spaces, 2);
    assert_eq!(settings.ui.window_width, 1600);
}

#[test]
fn missing_and_non_integer_precision_warn() {
    let settings = Settings::from_json(r#"{ "comp_param": { "max_dec_prec": "three" } }"#).unwrap();
    let mut console = Console::default();
    assert_eq!(settings.precision(&mut console), Precision::default());
    assert_eq!(
        warnings(&console),
        vec![
            "Warning: Max decimal precision is not an integer. Default value of 3 is used. [settings.json]"
                .to_string(),
            "Warning: Max angular precision not found. Default value of 2 is used. [settings.json]".to_string(),
        ]
    );
}

#[test]
fn fractional_precision_is_not_an_integer() {
    let settings = Settings::from_json(r#"{ "comp_param": { "max_dec_prec": 2.5, "max_ang_prec": 2 } }"#).unwrap();
    let mut console = Console::default();
    assert_eq!(settings.precision(&mut console).position, 3);
    assert_eq!(warnings(&console).len(), 1);
}

#[test]
fn save_then_load_from_disk() {
    let tmp = tempdir().unwrap();
    let path = camino::Utf8PathBuf::from_path_buf(tmp.path().join("settings.json")).unwrap();
    let mut settings = Settings::default();
    settings.transpiler.g04_style = G04Style::Milliseconds;
    settings.save(&path).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"g04-style\": \"milliseconds\""));
    assert_eq!(Settings::load(&path).unwrap(), settings);
}

#[test]
fn malformed_settings_fail_with_context() {
    let tmp = tempdir().unwrap();
    let path = camino::Utf8PathBuf::from_path_buf(tmp.path().join("settings.json")).unwrap();
    fs::write(&path, "{ not json").unwrap();
    let err = Settings::load(&path).unwrap_err();
    assert!(format!("{err:#}").contains("Invalid settings"));
    assert!(Settings::load(tmp.path().join("absent.json").to_str().unwrap()).is_err());
}

#[test]
fn missing_comp_param_section_warns_for_both_fields() {
    let settings = Settings::from_json(r#"{ "ui": { "tab_spaces": 4 } }"#).unwrap();
    let mut console = Console::default();
    assert_eq!(settings.precision(&mut console), Precision::default());
    assert_eq!(
        warnings(&console),
        vec![
            "Warning: Max decimal precision not found. Default value of 3 is used. [settings.json]".to_string(),
            "Warning: Max angular precision not found. Default value of 2 is used. [settings.json]".to_string(),
        ]
    );
}

#[test]
fn built_in_defaults_do_not_warn() {
    let mut console = Console::default();
    assert_eq!(Settings::default().precision(&mut console), Precision::default());
    assert!(warnings(&console).is_empty());
}

#[test]
fn oversized_precision_falls_back_to_default() {
    let settings =
        Settings::from_json(r#"{ "comp_param": { "max_dec_prec": 100000, "max_ang_prec": 18 } }"#).unwrap();
    let mut console = Console::default();
    let precision = settings.precision(&mut console);
    assert_eq!(precision, Precision::default());
    assert_eq!(
        warnings(&console),
        vec![
            "Warning: Max decimal precision is out of range (0 to 17). Default value of 3 is used. [settings.json]"
                .to_string(),
            "Warning: Max angular precision is out of range (0 to 17). Default value of 2 is used. [settings.json]"
                .to_string(),
        ]
    );
    let options = groller::CompileOptions::from_settings(&settings, &mut Console::default());
    let out = groller::xgc_to_gcode("G01 X1", &options).unwrap();
    assert_eq!(out.gcode, "G01 X1.000\n");
}
