#![cfg(feature = "egui")]

use eframe::egui::{self, Align2, Key, Modifiers, RichText, TextEdit};

use crate::console::{APP_NAME, APP_VERSION};

use super::state::{GrollerApp, PathAction};
use super::text::{line_numbers, message_colors, xgc_syntax_job};

const PANE_WIDTH: f32 = 380.0;
const FONT_SIZE: f32 = 13.0;

#[derive(Default)]
struct Hotkeys {
    compile: bool,
    open: bool,
    save: bool,
    quit: bool,
}

fn read_hotkeys(ctx: &egui::Context) -> Hotkeys {
    // Consumed before the editor sees them, so Ctrl+Enter adds no newline.
    ctx.input_mut(|i| Hotkeys {
        compile: i.consume_key(Modifiers::COMMAND, Key::Enter),
        open: i.consume_key(Modifiers::COMMAND, Key::O),
        save: i.consume_key(Modifiers::COMMAND, Key::S),
        quit: i.consume_key(Modifiers::COMMAND, Key::Q),
    })
}

pub(super) fn update(app: &mut GrollerApp, ctx: &egui::Context, _frame: &mut eframe::Frame) {
    let keys = read_hotkeys(ctx);
    if keys.compile {
        app.compile();
    }
    if keys.open {
        app.ask_path(PathAction::Open);
    }
    if keys.save {
        app.save();
    }
    if keys.quit {
        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
    }

    menu_bar(app, ctx);
    console_pane(app, ctx);
    output_pane(app, ctx);
    editor_pane(app, ctx);
    path_prompt(app, ctx);
    about_window(app, ctx);

    let title = app.bench.title();
    if title != app.last_title {
        ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
        app.last_title = title;
    }
}

fn menu_bar(app: &mut GrollerApp, ctx: &egui::Context) {
    egui::TopBottomPanel::top("menu").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("New").clicked() {
                    app.bench.new_file();
                    ui.close();
                }
                if ui.add(egui::Button::new("Open…").shortcut_text("Ctrl+O")).clicked() {
                    app.ask_path(PathAction::Open);
                    ui.close();
                }
                if ui.add(egui::Button::new("Save").shortcut_text("Ctrl+S")).clicked() {
                    app.save();
                    ui.close();
                }
                if ui.button("Save As…").clicked() {
                    app.ask_path(PathAction::SaveAs);
                    ui.close();
                }
                if ui.button("Save G-code…").clicked() {
                    app.ask_path(PathAction::SaveOutput);
                    ui.close();
                }
                ui.separator();
                if ui.add(egui::Button::new("Exit").shortcut_text("Ctrl+Q")).clicked() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    ui.close();
                }
            });
            ui.menu_button("Help", |ui| {
                if ui.button("About").clicked() {
                    app.show_about = true;
                    ui.close();
                }
            });
        });
    });
}

fn console_pane(app: &mut GrollerApp, ctx: &egui::Context) {
    egui::SidePanel::left("console")
        .resizable(true)
        .default_width(PANE_WIDTH)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Compile").on_hover_text("Ctrl+Enter").clicked() {
                    app.compile();
                }
                if ui.button("Clear").clicked() {
                    app.bench.reset_console();
                }
            });
            ui.separator();
            egui::ScrollArea::vertical()
                .id_salt("console_scroll")
                .stick_to_bottom(true)
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    for line in app.bench.console.lines() {
                        let (fg, bg) = message_colors(line.kind);
                        let text = RichText::new(&line.text)
                            .monospace()
                            .size(FONT_SIZE)
                            .color(fg)
                            .background_color(bg);
                        ui.label(text);
                    }
                });
        });
}

fn gutter(ui: &mut egui::Ui, text: &str) {
    let numbers = RichText::new(line_numbers(text))
        .monospace()
        .size(FONT_SIZE)
        .weak();
    ui.label(numbers);
}

fn output_pane(app: &mut GrollerApp, ctx: &egui::Context) {
    egui::SidePanel::right("output")
        .resizable(true)
        .default_width(PANE_WIDTH)
        .show(ctx, |ui| {
            ui.label(RichText::new("G-code").strong());
            ui.separator();
            egui::ScrollArea::both()
                .id_salt("output_scroll")
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.horizontal_top(|ui| {
                        gutter(ui, &app.bench.output);
                        ui.add(egui::Label::new(xgc_syntax_job(&app.bench.output)).extend());
                    });
                });
        });
}

fn editor_pane(app: &mut GrollerApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::both()
            .id_salt("editor_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.horizontal_top(|ui| {
                    gutter(ui, &app.bench.source);
                    let mut text = app.bench.source.clone();
                    let resp = ui.add(
                        TextEdit::multiline(&mut text)
                            .code_editor()
                            .font(egui::FontId::monospace(FONT_SIZE))
                            .lock_focus(true)
                            .desired_width(f32::INFINITY)
                            .desired_rows(40),
                    );
                    if resp.changed() {
                        let text = app.bench.expand_tabs(&text);
                        app.bench.set_source(text);
                    }
                });
            });
    });
}

fn path_prompt(app: &mut GrollerApp, ctx: &egui::Context) {
    let mut confirm = false;
    let mut cancel = false;
    if let Some(prompt) = app.prompt.as_mut() {
        let title = prompt.action.label();
        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                let resp = ui.add(TextEdit::singleline(&mut prompt.path).desired_width(360.0));
                if resp.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter)) {
                    confirm = true;
                }
                ui.horizontal(|ui| {
                    if ui.button("OK").clicked() {
                        confirm = true;
                    }
                    if ui.button("Cancel").clicked() {
                        cancel = true;
                    }
                });
            });
    }
    if confirm {
        app.confirm_prompt();
    } else if cancel {
        app.prompt = None;
    }
}

fn about_window(app: &mut GrollerApp, ctx: &egui::Context) {
    egui::Window::new("About")
        .open(&mut app.show_about)
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.heading(format!("{APP_NAME} {APP_VERSION}"));
            ui.label("Compiles extended G-code (XGC) into plain G-code.");
            ui.label("Ctrl+Enter compiles the script.");
        });
}
