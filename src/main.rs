//! VibeMaster - tone analysis and MCP orchestration
//!
//! A CLI tool that classifies the vibe of a text with pluggable
//! detectors, and routes coding questions to the MCP servers configured
//! on this machine, merging their answers into one document.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (invalid arguments, detector failure, tool error, etc.)

mod analysis;
mod cli;
mod config;
mod detectors;
mod error;
mod models;
mod orchestrator;
mod registry;
mod repo;
mod report;
mod routing;
mod scanner;
mod tools;

use anyhow::{Context, Result};
use cli::{Args, Command};
use config::{Config, CONFIG_FILE};
use models::{Request, RequestKind};
use orchestrator::Session;
use serde_json::json;
use std::path::Path;
use tools::{get_tool_definitions, ToolCall, ToolExecutor};
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle init-config early (no logging needed)
    if matches!(args.command, Command::InitConfig) {
        return handle_init_config();
    }

    // Load configuration before logging so the config can raise verbosity
    let (mut config, load_warning) = load_config(&args)?;
    config.merge_with_args(&args);

    init_logging(&args, &config);
    if let Some(warning) = load_warning {
        warn!("{}", warning);
    }

    debug!("VibeMaster v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    match run(args, config).await {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle init-config: generate a default .vibemaster.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(CONFIG_FILE);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            CONFIG_FILE
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).with_context(|| format!("Failed to write {}", CONFIG_FILE))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE);
    println!("   Edit it to change host config paths, the catalogue and output format.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
///
/// Logs go to stderr; stdout carries command output only.
fn init_logging(args: &Args, config: &Config) {
    let level = if !args.quiet && config.general.verbose {
        tracing::Level::DEBUG
    } else {
        args.log_level()
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Load configuration from file or use defaults.
///
/// An explicit `--config` must load. Otherwise the working directory and
/// then the project root are tried; a broken file there falls back to
/// defaults and yields a warning to log once logging is up.
fn load_config(args: &Args) -> Result<(Config, Option<String>)> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        return Ok((Config::load(config_path)?, None));
    }

    // Try default locations
    let found = match Config::load_default() {
        Ok(None) => Config::load_from_project(&args.root),
        other => other,
    };

    match found {
        Ok(Some(config)) => Ok((config, None)),
        Ok(None) => Ok((Config::default(), None)),
        Err(e) => Ok((
            Config::default(),
            Some(format!("Failed to load config, using defaults: {:#}", e)),
        )),
    }
}

/// Run one subcommand. Returns the exit code.
async fn run(args: Args, config: Config) -> Result<i32> {
    let json_output = config.wants_json();

    let session = Session::initialize(&args.root, &config);
    debug!("Detectors: {}", session.detector_names().join(", "));
    if session.registry().is_empty() {
        warn!("No MCP providers known; orchestration will return empty answers");
    }

    match args.command {
        Command::Analyze { text } => {
            let result = session.analyze(&text).await?;
            if json_output {
                println!("{}", report::generate_json(&result)?);
            } else {
                print!("{}", report::render_analysis(&result));
            }
        }
        Command::Orchestrate { query, kind } => {
            let request = Request::query(query).with_kind(RequestKind::from(kind));
            let result = session.orchestrate(&request).await;
            if json_output {
                println!("{}", report::generate_json(&result)?);
            } else {
                print!("{}", result.answer);
            }
        }
        Command::Context { topic } => {
            let result = session.smart_context(&topic).await;
            if json_output {
                println!("{}", report::generate_json(&result)?);
            } else {
                print!("{}", result.answer);
            }
        }
        Command::Providers => {
            let (installed, available) = session.list_providers();
            if json_output {
                let listing = json!({ "installed": installed, "available": available });
                println!("{}", report::generate_json(&listing)?);
            } else {
                print!(
                    "{}",
                    report::render_provider_listing(&installed, &available)
                );
            }
        }
        Command::Stack { path } => {
            let path = path.unwrap_or_else(|| args.root.clone());
            let context = session.detect_stack(&path);
            if json_output {
                println!("{}", report::generate_json(&context)?);
            } else {
                print!("{}", report::render_project(&context));
            }
        }
        Command::Tools => {
            let definitions = get_tool_definitions();
            if json_output {
                println!("{}", report::generate_json(&definitions)?);
            } else {
                for tool in &definitions {
                    println!("{:<14} {}", tool.name, tool.description);
                }
            }
        }
        Command::Call { name, args: raw } => {
            let arguments = serde_json::from_str(&raw)
                .with_context(|| format!("Invalid arguments for tool {}", name))?;
            let call = ToolCall { name, arguments };

            info!("Calling tool: {}", call.name);
            let result = ToolExecutor::new(&session).execute(&call).await;

            if json_output {
                println!("{}", report::generate_json(&result)?);
            } else if result.is_error {
                eprintln!("{}", result.content);
            } else {
                println!("{}", result.content);
            }

            if result.is_error {
                return Ok(1);
            }
        }
        Command::InitConfig => handle_init_config()?,
    }

    Ok(0)
}
