use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use groller::batch::{collect_scripts, compile_all};
use groller::compiler::compile_to_console;
use groller::console::Console;
use groller::parser::{FsSource, ScriptSource, parse_script};
use groller::settings::{SETTINGS_FILE_NAME, Settings};
use groller::CompileOptions;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Compile extended G-code (XGC) scripts to G-code", long_about = None)]
struct Cli {
    /// settings.json to use (defaults to ./settings.json when present)
    #[arg(long, global = true, value_name = "SETTINGS_FILE")]
    settings: Option<Utf8PathBuf>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile one script; G-code goes to stdout unless -o is given
    Compile {
        #[arg(value_name = "XGC_FILE")]
        file: Utf8PathBuf,
        /// Write G-code to this file
        #[arg(short, long, value_name = "OUT_FILE")]
        output: Option<Utf8PathBuf>,
    },
    /// Report diagnostics without writing output
    Check {
        #[arg(value_name = "XGC_FILE")]
        file: Utf8PathBuf,
    },
    /// Print the parsed script as JSON
    Parse {
        #[arg(value_name = "XGC_FILE")]
        file: Utf8PathBuf,
    },
    /// Compile every .xgc file below a directory
    Batch {
        #[arg(value_name = "DIR")]
        dir: Utf8PathBuf,
        /// Put compiled files here instead of next to each script
        #[arg(long, value_name = "OUT_DIR")]
        out_dir: Option<Utf8PathBuf>,
    },
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_settings(explicit: Option<&Utf8Path>) -> Result<Settings> {
    if let Some(path) = explicit {
        return Settings::load(path);
    }
    let local = Utf8PathBuf::from(SETTINGS_FILE_NAME);
    if local.exists() {
        Settings::load(&local)
    } else {
        tracing::debug!("no settings.json found, using defaults");
        Ok(Settings::default())
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let settings = load_settings(cli.settings.as_deref())?;

    match cli.command {
        Command::Compile { file, output } => {
            let script = FsSource.read_to_string(&file)?;
            let mut console = Console::default();
            let (gcode, ok) = compile_to_console(&script, &settings, &mut console);
            eprint!("{}", console.render_plain());
            if !ok {
                return Ok(ExitCode::FAILURE);
            }
            match output {
                Some(out) => std::fs::write(out.as_std_path(), &gcode)
                    .with_context(|| format!("Failed to write {}", out))?,
                None => print!("{gcode}"),
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Check { file } => {
            let script = FsSource.read_to_string(&file)?;
            let mut console = Console::default();
            let (_, ok) = compile_to_console(&script, &settings, &mut console);
            eprint!("{}", console.render_plain());
            Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
        }
        Command::Parse { file } => {
            let script = FsSource.read_to_string(&file)?;
            match parse_script(&script) {
                Ok(program) => {
                    println!("{}", serde_json::to_string_pretty(&program)?);
                    Ok(ExitCode::SUCCESS)
                }
                Err(err) => {
                    eprintln!("{}: {}", file, err);
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Command::Batch { dir, out_dir } => {
            let mut console = Console::default();
            let options = CompileOptions::from_settings(&settings, &mut console);
            // Header plus rule means no settings warnings.
            if console.lines().len() > 2 {
                eprint!("{}", console.render_plain());
            }
            let inputs = collect_scripts(&dir)?;
            if inputs.is_empty() {
                eprintln!("No .xgc files found in {}", dir);
                return Ok(ExitCode::SUCCESS);
            }
            let outcomes = compile_all(&inputs, &options, out_dir.as_deref())?;
            let mut failed = 0;
            for outcome in &outcomes {
                match &outcome.result {
                    Ok(out) => println!("ok      {} -> {}", outcome.input, out),
                    Err(e) => {
                        failed += 1;
                        println!("FAILED  {}: {:#}", outcome.input, e);
                    }
                }
            }
            println!("{} compiled, {} failed", outcomes.len() - failed, failed);
            Ok(if failed == 0 { ExitCode::SUCCESS } else { ExitCode::FAILURE })
        }
    }
}
