use groller::compiler::{FAILED_OUTPUT, compile_to_console};
use groller::console::{Console, MessageKind};
use groller::output::Precision;
use groller::settings::{G04Style, Settings};
use groller::{CompileOptions, Stage, xgc_to_gcode};

fn compile(script: &str) -> String {
    xgc_to_gcode(script, &CompileOptions::default()).unwrap().gcode
}

#[test]
fn linear_move_is_rounded_to_position_precision() {
    assert_eq!(compile("G01 X10 Y5"), "G01 X10.000 Y5.000\n");
    assert_eq!(compile("G01 X1.23456 F250.5"), "G01 X1.235 F250.5\n");
}

#[test]
fn angular_words_use_angular_precision() {
    let options = CompileOptions {
        precision: Precision {
            position: 2,
            angular: 1,
        },
        ..Default::default()
    };
    let out = xgc_to_gcode("G00 X1 A12.345", &options).unwrap().gcode;
    assert_eq!(out, "G00 X1.00 A12.3\n");
}

#[test]
fn polar_mode_converts_radius_and_angle() {
    let script = "G16 X0 Y0\nG01 X10 Y90\nG01 Z-1\nG15\nG01 X10 Y90\n";
    assert_eq!(
        compile(script),
        "G01 X0.000 Y10.000\nG01 Z-1.000\nG01 X10.000 Y90.000\n"
    );
}

#[test]
fn polar_mode_with_offset_centre() {
    let out = compile("G16 X5 Y5\nG00 X2 Y180");
    assert_eq!(out, "G00 X3.000 Y5.000\n");
}

#[test]
fn polar_mode_requires_both_coordinates() {
    let err = xgc_to_gcode("G16 X0 Y0\nG01 X10", &CompileOptions::default()).unwrap_err();
    assert_eq!(err.stage, Stage::Runtime);
    assert_eq!(err.line, 2);
    assert_eq!(err.message, "G01 (polar mode) needs argument Y");
}

#[test]
fn enhanced_drilling_cycle_sequence() {
    let script = "G81.1 X1 Y2 Z-3 R1 F100 L2 P0.5\nX4\nG80\n";
    let expected = "\
G00 X1.000 Y2.000
G01 Z-3.000 F100
G04 P0.5
G00 Z1.000
G01 Z-3.000 F100
G04 P0.5
G00 Z1.000
G00 X4.000 Y2.000
G01 Z-3.000 F100
G04 P0.5
G00 Z1.000
G01 Z-3.000 F100
G04 P0.5
G00 Z1.000
";
    assert_eq!(compile(script), expected);
}

#[test]
fn drilling_cycle_errors() {
    let opts = CompileOptions::default();
    let err = xgc_to_gcode("G81.1 X1 Y2 Z-3", &opts).unwrap_err();
    assert_eq!(err.message, "G81.1 necessary parameter(s) missing: F, R");

    let err = xgc_to_gcode("G81.1 X1 Y2 Z-3 R1 F100 D2", &opts).unwrap_err();
    assert!(err.message.contains("\"D\" and \"A\""));

    let err = xgc_to_gcode("G81.1 X1 Y2 Z-3 R1 F100\nG80\nX5 Y5", &opts).unwrap_err();
    assert_eq!(err.line, 3);
    assert_eq!(err.message, "Canned cycle line (X,Y) appeared outside canned cycle");
}

#[test]
fn dwell_styles() {
    assert_eq!(compile("G04 P-500"), "G04 P0.5\n");
    assert_eq!(compile("G04 P2"), "G04 P2\n");
    let ms = CompileOptions {
        g04_style: G04Style::Milliseconds,
        ..Default::default()
    };
    assert_eq!(xgc_to_gcode("G04 P1.5", &ms).unwrap().gcode, "G04 P1500\n");
    assert_eq!(xgc_to_gcode("G04 P-250", &ms).unwrap().gcode, "G04 P250\n");
}

#[test]
fn spindle_and_program_end() {
    assert_eq!(compile("M03 S1000\nM05\nM30"), "M03 S1000\nM05\nM30\n");
    let err = xgc_to_gcode("G21\nM03 S1000.5", &CompileOptions::default()).unwrap_err();
    assert_eq!(err.stage, Stage::Runtime);
    assert_eq!(err.line, 2);
}

#[test]
fn modal_line_shares_one_output_line() {
    assert_eq!(compile("G17 G90 G21"), "G17 G90 G21\n");
    assert_eq!(compile("G15 G80\nG91"), "G91\n");
}

#[test]
fn unexpected_parameters_are_listed() {
    let err = xgc_to_gcode("G00 X1 F100 Q2", &CompileOptions::default()).unwrap_err();
    assert_eq!(err.message, "G00 contains unexpected parameter(s): F, Q");
}

#[test]
fn loops_and_expressions_drive_parameters() {
    let script = "\
depth = -2
for i in frange(0, 3, 1):
    G01 X[i * 10] Z[depth] F100
";
    assert_eq!(
        compile(script),
        "G01 X0.000 Z-2.000 F100\nG01 X10.000 Z-2.000 F100\nG01 X20.000 Z-2.000 F100\n"
    );
}

#[test]
fn trig_is_in_degrees() {
    assert_eq!(compile("G01 X[10 * cos(60)] Y[10 * sin(30)]"), "G01 X5.000 Y5.000\n");
}

#[test]
fn conditionals_pick_one_branch() {
    let script = "\
a = 3
if a > 5:
    G00 X1
elif a > 2:
    G00 X2
else:
    G00 X3
";
    assert_eq!(compile(script), "G00 X2.000\n");
}

#[test]
fn console_print_collects_values() {
    let out = xgc_to_gcode("x = 2.5\nconsole_print(x)\nconsole_print('done')", &CompileOptions::default()).unwrap();
    assert_eq!(out.prints, vec!["2.5".to_string(), "done".to_string()]);
    assert_eq!(out.gcode, "");
}

#[test]
fn errors_keep_source_line_numbers() {
    let script = "; header comment\n\nG21\n\n  ; indented comment\nG01 X\n";
    let err = xgc_to_gcode(script, &CompileOptions::default()).unwrap_err();
    assert_eq!(err.stage, Stage::Preprocess);
    assert_eq!(err.line, 6);
    assert_eq!(err.to_string(), format!("Line 6: {}", err.message));

    let err = xgc_to_gcode("G21\n\nx = 1 / 0", &CompileOptions::default()).unwrap_err();
    assert_eq!(err.stage, Stage::Runtime);
    assert_eq!(err.line, 3);
}

#[test]
fn console_reports_success() {
    let mut console = Console::default();
    let (out, ok) = compile_to_console("console_print(7)\nG00 X1", &Settings::default(), &mut console);
    assert!(ok);
    assert_eq!(out, "G00 X1.000\n");
    let lines = console.lines();
    assert_eq!(lines[2].text, "7");
    assert_eq!(lines[2].kind, MessageKind::Print);
    assert_eq!(lines[3].text, "Compilation Success!");
    assert_eq!(lines[3].kind, MessageKind::Success);
}

#[test]
fn console_reports_runtime_failure_after_prints() {
    let mut console = Console::default();
    let (out, ok) = compile_to_console("console_print('a')\nG01 Q1", &Settings::default(), &mut console);
    assert!(!ok);
    assert_eq!(out, FAILED_OUTPUT);
    let texts: Vec<&str> = console.lines().iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts[2], "a");
    assert_eq!(texts[3], "Runtime Error: Line 2:");
    assert_eq!(texts[4], "G01 contains unexpected parameter(s): Q");
}

#[test]
fn console_reports_preprocess_failure() {
    let mut console = Console::default();
    let (_, ok) = compile_to_console("G21\nG99 X1", &Settings::default(), &mut console);
    assert!(!ok);
    let lines = console.lines();
    assert_eq!(lines[2].text, "Preprocessor Error:");
    assert_eq!(lines[3].text, "Line 2: unsupported command G99");
    assert_eq!(lines[3].kind, MessageKind::Error);
}

#[test]
fn arc_moves_pass_parameters_through() {
    assert_eq!(compile("G02 X1 Y2 I0.5 J0 F100"), "G02 X1.000 Y2.000 I0.5 J0 F100\n");
    assert_eq!(compile("G03 X[2 * 3] R5"), "G03 X6.000 R5\n");

    let err = xgc_to_gcode("G03 X1 A2", &CompileOptions::default()).unwrap_err();
    assert_eq!(err.stage, Stage::Runtime);
    assert_eq!(err.message, "G03 contains unexpected parameter(s): A");
}

#[test]
fn tiny_and_huge_floats_use_exponent_form() {
    let out = xgc_to_gcode("console_print(cos(90))\nG02 X1 I[1e20]", &CompileOptions::default()).unwrap();
    assert_eq!(out.prints, vec!["6.123233995736766e-17".to_string()]);
    assert_eq!(out.gcode, "G02 X1.000 I1e+20\n");
}

#[test]
fn zero_repeat_drilling_only_positions() {
    assert_eq!(compile("G81.1 X1 Y2 Z-3 R1 F100 L0"), "G00 X1.000 Y2.000\n");
}

#[test]
fn drilling_repeat_count_is_validated() {
    let opts = CompileOptions::default();
    for script in ["G81.1 X1 Y2 Z-3 R1 F100 L1.5", "G81.1 X1 Y2 Z-3 R1 F100 L-1"] {
        let err = xgc_to_gcode(script, &opts).unwrap_err();
        assert_eq!(err.message, "G81.1 repeat count L must be a non-negative integer");
    }
    let err = xgc_to_gcode("G81.1 X1 Y2 Z-3 R1 F100 L10001", &opts).unwrap_err();
    assert_eq!(err.message, "G81.1 repeat count L must be at most 10000");
}

#[test]
fn y_only_canned_line_keeps_previous_x() {
    let out = compile("G81.1 X1 Y2 Z-3 R1 F100\nY7\n");
    let expected = "\
G00 X1.000 Y2.000
G01 Z-3.000 F100
G00 Z1.000
G00 X1.000 Y7.000
G01 Z-3.000 F100
G00 Z1.000
";
    assert_eq!(out, expected);
}

#[test]
fn polar_centre_needs_both_coordinates() {
    let opts = CompileOptions::default();
    let err = xgc_to_gcode("G16 X0", &opts).unwrap_err();
    assert_eq!(err.message, "G16 necessary parameter(s) missing: Y");
    let err = xgc_to_gcode("G16 Y0", &opts).unwrap_err();
    assert_eq!(err.message, "G16 necessary parameter(s) missing: X");
}

#[test]
fn frange_refuses_huge_ranges() {
    let err = xgc_to_gcode("for i in frange(0, 2000000, 1):\n    pass\n", &CompileOptions::default()).unwrap_err();
    assert_eq!(err.stage, Stage::Runtime);
    assert_eq!(err.message, "frange(): more than 1000000 elements");
}
