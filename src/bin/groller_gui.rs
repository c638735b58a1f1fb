#[cfg(feature = "egui")]
use anyhow::Result;
#[cfg(feature = "egui")]
use camino::Utf8PathBuf;
#[cfg(feature = "egui")]
use clap::Parser;

#[cfg(feature = "egui")]
#[derive(Parser, Debug)]
#[command(author, version, about = "Desktop editor for XGC scripts", long_about = None)]
struct Args {
    /// Script to open on start
    #[arg(value_name = "XGC_FILE")]
    file: Option<Utf8PathBuf>,

    /// settings.json to use (defaults to ./settings.json when present)
    #[arg(long, value_name = "SETTINGS_FILE")]
    settings: Option<Utf8PathBuf>,
}

#[cfg(feature = "egui")]
fn main() -> Result<()> {
    use eframe::egui;
    use groller::egui_app::GrollerApp;
    use groller::settings::{SETTINGS_FILE_NAME, Settings};
    use groller::workbench::Workbench;
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let local = Utf8PathBuf::from(SETTINGS_FILE_NAME);
    let loaded = match &args.settings {
        Some(path) => Settings::load(path),
        None if local.exists() => Settings::load(&local),
        None => Ok(Settings::default()),
    };
    // A broken settings file is shown on the console; the editor still starts.
    let (settings, settings_err) = match loaded {
        Ok(settings) => (settings, None),
        Err(err) => {
            tracing::error!(error = %format!("{err:#}"), "using default settings");
            (Settings::default(), Some(err))
        }
    };
    let size = [settings.ui.window_width as f32, settings.ui.window_height as f32];

    let mut bench = Workbench::new(settings);
    if let Some(err) = settings_err {
        bench.report(&err);
    }
    if let Some(file) = &args.file {
        if let Err(err) = bench.open_file(file) {
            bench.report(&err);
        }
    }
    let app = GrollerApp::new(bench);

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size(size)
        .with_title(app.bench.title());
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    eframe::run_native(
        "groller",
        options,
        Box::new(|cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::light());
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))?;
    Ok(())
}

#[cfg(not(feature = "egui"))]
fn main() {
    eprintln!("groller_gui requires the 'egui' feature. Try: cargo run --features egui --bin groller_gui -- <file>");
}
