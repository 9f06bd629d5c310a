//! BDs Calculator - Main entry point
//!
//! Launches the tabbed TUI, or runs one calculation headlessly when a
//! subcommand is given.

use std::io::stdout;
use std::path::Path;

use anyhow::Context;
use bdcalc::app::App;
use bdcalc::cli::{Cli, Commands};
use bdcalc::{Calculator, CalculatorConfig, SessionState, export_report, ui};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

/// Initialize logging. `RUST_LOG` overrides the default `warn` level.
fn init_logger() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Main application entry point
fn main() -> anyhow::Result<()> {
    init_logger();
    info!("BDs Calculator starting up");

    let cli = Cli::parse_args();
    debug!("CLI arguments parsed");

    if let Some(Commands::Validate { file }) = &cli.command {
        return validate_config(file);
    }

    let config = match &cli.config {
        Some(path) => {
            let config = CalculatorConfig::load_from_file(path)?;
            config
                .validate()
                .with_context(|| format!("Invalid configuration in {}", path.display()))?;
            config
        }
        None => CalculatorConfig::default(),
    };
    let calculator = Calculator::new(config);

    match &cli.command {
        Some(command) => run_headless(&cli, command, &calculator),
        None => {
            info!("No command specified, launching TUI");
            run_tui(calculator, cli.export.as_deref())
        }
    }
}

fn validate_config(path: &Path) -> anyhow::Result<()> {
    info!("Validating configuration file: {:?}", path);
    let result = CalculatorConfig::load_from_file(path)
        .and_then(|c| c.validate().map(|_| c).map_err(anyhow::Error::from));
    match result {
        Ok(config) => {
            println!("✓ Configuration file is valid: {:?}", config);
            Ok(())
        }
        Err(e) => {
            error!("Configuration validation failed: {:#}", e);
            eprintln!("✗ Configuration validation failed: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Run a subcommand's stages in one session and print each result
fn run_headless(cli: &Cli, command: &Commands, calculator: &Calculator) -> anyhow::Result<()> {
    let mut session = SessionState::new();
    let mut failed = false;

    for request in command.requests(calculator.config()) {
        let stage = request.stage();
        println!("{}", stage.heading());
        println!("  {}", ui::formula(stage, calculator.config()));

        match calculator.run(&mut session, &request) {
            Ok(result) => {
                for (label, value) in result.rows() {
                    println!("  {}: {}", label, value);
                }
            }
            Err(e) => {
                eprintln!("✗ {}", e);
                failed = true;
                break;
            }
        }
        println!();
    }

    if let Some(path) = &cli.export {
        let format = cli.report_format();
        let title = &calculator.config().report_title;
        let bytes = export_report(&session, title, format, path)
            .with_context(|| format!("Failed to export report to {}", path.display()))?;
        println!("✓ Report saved to {} ({} bytes)", path.display(), bytes);
    }

    if failed {
        std::process::exit(1);
    }
    Ok(())
}

/// Run the interactive calculator
fn run_tui(calculator: Calculator, report_path: Option<&Path>) -> anyhow::Result<()> {
    debug!("Initializing terminal for TUI mode");

    enable_raw_mode().context("Failed to enable raw mode")?;
    crossterm::execute!(stdout(), crossterm::terminal::EnterAlternateScreen)
        .context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut app = App::new(calculator, report_path);
    let result = app.run(&mut terminal);

    // Cleanup terminal (always attempt cleanup, even if app failed)
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(stdout(), crossterm::terminal::LeaveAlternateScreen);

    result
}
