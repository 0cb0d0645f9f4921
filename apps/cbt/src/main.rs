//! cbt - CMake/Make build orchestrator
//!
//! This is the main CLI application that drives configure, compile, and test
//! runs for CMake projects through the builder crate.

mod cli;
mod display;
mod error;
mod events;
mod logging;

use crate::cli::Cli;
use crate::display::OutputRenderer;
use crate::error::CliError;
use crate::events::EventHandler;
use cbt_builder::Builder;
use cbt_config::Config;
use cbt_events::EventReceiver;
use cbt_types::{BuildReport, ColorChoice, OutputFormat, Selection};
use clap::Parser;
use std::process;
use tokio::select;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Parse command line arguments first to check for JSON mode
    let cli = Cli::parse();
    let json_mode = cli.global.json;

    // Initialize tracing with JSON awareness
    init_tracing(json_mode, cli.global.verbose);

    // Run the application and handle errors
    if let Err(e) = run(cli).await {
        error!("Application error: {}", e);
        if !json_mode {
            eprintln!("Error: {e}");
        }
        process::exit(1);
    }
}

/// Main application logic
async fn run(cli: Cli) -> Result<(), CliError> {
    info!("Starting cbt v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration with proper precedence:
    // 1. Start with file config (or defaults)
    let mut config = Config::load_or_default(&cli.global.config).await?;

    // 2. Merge environment variables
    config.merge_env()?;

    // 3. Apply CLI flags (highest precedence)
    let selection = Selection::resolve(cli.debug, cli.release);
    let json_mode = cli.global.json || config.general.default_output == OutputFormat::Json;
    let color_choice = cli.global.color.unwrap_or(config.general.color);

    // Resolve the project root (defaults to the invocation directory)
    let project_dir = match cli.project_dir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    // Create event channel
    let (event_sender, event_receiver) = cbt_events::channel();

    let mut builder = Builder::new(project_dir)
        .with_config(&config)
        .with_event_sender(event_sender);
    if let Some(jobs) = cli.jobs {
        builder = builder.with_jobs(cbt_config::calculate_build_jobs(jobs));
    }

    // Create output renderer
    let renderer = OutputRenderer::new(json_mode, color_choice);

    // Create event handler
    let colors_enabled = match color_choice {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => console::Term::stdout().features().colors_supported(),
    };
    let mut event_handler = EventHandler::new(colors_enabled, cli.global.verbose, json_mode);

    // Execute the build with concurrent event handling
    let report =
        run_build_with_events(&builder, selection, event_receiver, &mut event_handler).await?;

    // Render final result
    renderer.render_report(&report)?;

    if !report.is_success() {
        return Err(CliError::BuildFailed {
            profiles: report.failed_profiles(),
        });
    }

    info!("Build completed successfully");
    Ok(())
}

/// Execute the build while handling events concurrently
async fn run_build_with_events(
    builder: &Builder,
    selection: Selection,
    mut event_receiver: EventReceiver,
    event_handler: &mut EventHandler,
) -> Result<BuildReport, CliError> {
    let mut build_future = Box::pin(builder.build(selection));

    // Handle events concurrently with the running build
    loop {
        select! {
            // Build completed
            result = &mut build_future => {
                // Drain any remaining events
                while let Ok(message) = event_receiver.try_recv() {
                    event_handler.handle_message(message);
                }
                return result.map_err(CliError::from);
            }

            // Event received
            message = event_receiver.recv() => {
                match message {
                    Some(message) => event_handler.handle_message(message),
                    None => { /* Channel closed: keep waiting for the build to finish */ }
                }
            }
        }
    }
}

/// Initialize tracing/logging
fn init_tracing(json_mode: bool, verbose_flag: bool) {
    // Check if verbose logging is enabled
    let verbose = std::env::var("RUST_LOG").is_ok() || verbose_flag;

    if json_mode {
        if verbose {
            // Machine consumers still get diagnostics, as JSON on stderr
            tracing_subscriber::fmt()
                .json()
                .with_writer(std::io::stderr)
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                        tracing_subscriber::EnvFilter::new("info,cbt=debug,cbt_builder=debug")
                    }),
                )
                .init();
        } else {
            // JSON mode: suppress console logging to avoid contaminating output
            tracing_subscriber::fmt()
                .with_writer(std::io::sink)
                .with_env_filter("off")
                .init();
        }
    } else if verbose {
        // Verbose mode: detailed logging to stderr
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                    tracing_subscriber::EnvFilter::new("info,cbt=debug,cbt_builder=debug")
                }),
            )
            .init();
    } else {
        // Normal mode: minimal logging to stderr
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                    tracing_subscriber::EnvFilter::new("warn,cbt=warn,cbt_builder=warn")
                }),
            )
            .init();
    }
}
