//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use crate::models::RequestKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// VibeMaster - tone analysis and MCP orchestration for coding assistants
///
/// Classify the vibe of a text, or route a question to the MCP servers
/// configured on this machine and merge their answers.
///
/// Examples:
///   vibemaster analyze "hey, this looks awesome!!!"
///   vibemaster orchestrate "how to implement pagination in the API"
///   vibemaster context "error handling"
///   vibemaster providers --format json
///   vibemaster call detect_stack --args '{"path": "."}'
///   vibemaster init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file
    ///
    /// If not specified, looks for .vibemaster.toml in the current
    /// directory, then in the project root
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Project root used for stack and git detection
    #[arg(long, default_value = ".", value_name = "DIR", global = true)]
    pub root: PathBuf,

    /// MCP host configuration file to read (repeatable)
    ///
    /// Replaces the search paths from the config file. The first file
    /// that exists is used.
    #[arg(long, value_name = "FILE", global = true, env = "VIBEMASTER_HOST_CONFIG")]
    pub host_config: Vec<PathBuf>,

    /// Do not add the built-in provider catalogue to the registry
    #[arg(long, global = true)]
    pub no_catalogue: bool,

    /// Output format (text, json)
    #[arg(long, value_name = "FORMAT", global = true)]
    pub format: Option<FormatArg>,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Run in quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Classify the tone of a text
    Analyze {
        /// Text to analyze
        text: String,
    },

    /// Route a query to the installed MCP servers and merge the answers
    Orchestrate {
        /// Your question or request
        query: String,

        /// Type of request
        #[arg(long = "type", value_name = "TYPE", default_value = "query")]
        kind: RequestTypeArg,
    },

    /// Route "Provide context about: TOPIC" to the installed MCP servers
    Context {
        /// What you want context about
        topic: String,
    },

    /// List installed and available MCP servers
    Providers,

    /// Detect the technology stack of a project
    Stack {
        /// Project path (defaults to --root)
        path: Option<PathBuf>,
    },

    /// List the tools exposed to MCP hosts
    Tools,

    /// Call a tool by name with JSON arguments
    Call {
        /// Tool name
        name: String,

        /// Tool arguments as a JSON object
        #[arg(long, value_name = "JSON", default_value = "{}")]
        args: String,
    },

    /// Generate a default .vibemaster.toml configuration file
    InitConfig,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum FormatArg {
    /// Human-readable text (default)
    #[default]
    Text,
    /// JSON
    Json,
}

impl FormatArg {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormatArg::Text => "text",
            FormatArg::Json => "json",
        }
    }
}

/// Request type accepted by `orchestrate --type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum RequestTypeArg {
    #[default]
    Query,
    Implement,
    Debug,
    Explain,
}

impl From<RequestTypeArg> for RequestKind {
    fn from(arg: RequestTypeArg) -> Self {
        match arg {
            RequestTypeArg::Query => RequestKind::Query,
            RequestTypeArg::Implement => RequestKind::Implement,
            RequestTypeArg::Debug => RequestKind::Debug,
            RequestTypeArg::Explain => RequestKind::Explain,
        }
    }
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for init-config
        if matches!(self.command, Command::InitConfig) {
            return Ok(());
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Command::Call { ref args, .. } = self.command {
            match serde_json::from_str::<serde_json::Value>(args) {
                Ok(value) if value.is_object() => {}
                Ok(_) => return Err("Tool arguments must be a JSON object".to_string()),
                Err(e) => return Err(format!("Tool arguments are not valid JSON: {}", e)),
            }
        }

        // Validate project root
        if !self.root.exists() {
            return Err(format!(
                "Project root does not exist: {}",
                self.root.display()
            ));
        }
        if !self.root.is_dir() {
            return Err(format!(
                "Project root is not a directory: {}",
                self.root.display()
            ));
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args() -> Args {
        Args {
            command: Command::Providers,
            config: None,
            root: PathBuf::from("."),
            host_config: Vec::new(),
            no_catalogue: false,
            format: None,
            verbose: false,
            quiet: false,
        }
    }

    #[test]
    fn test_parse_orchestrate() {
        let args = Args::try_parse_from([
            "vibemaster",
            "orchestrate",
            "how to paginate",
            "--type",
            "implement",
            "--format",
            "json",
        ])
        .unwrap();

        match args.command {
            Command::Orchestrate { query, kind } => {
                assert_eq!(query, "how to paginate");
                assert_eq!(RequestKind::from(kind), RequestKind::Implement);
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert_eq!(args.format, Some(FormatArg::Json));
    }

    #[test]
    fn test_parse_repeated_host_config() {
        let args = Args::try_parse_from([
            "vibemaster",
            "--host-config",
            "a.json",
            "--host-config",
            "b.json",
            "providers",
        ])
        .unwrap();
        assert_eq!(
            args.host_config,
            vec![PathBuf::from("a.json"), PathBuf::from("b.json")]
        );
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_call_arguments() {
        let mut args = make_args();
        args.command = Command::Call {
            name: "analyze".to_string(),
            args: r#"{"text": "hi"}"#.to_string(),
        };
        assert!(args.validate().is_ok());

        args.command = Command::Call {
            name: "analyze".to_string(),
            args: "{not json".to_string(),
        };
        assert!(args.validate().is_err());

        args.command = Command::Call {
            name: "analyze".to_string(),
            args: "[1, 2]".to_string(),
        };
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_missing_root() {
        let mut args = make_args();
        args.root = PathBuf::from("/definitely/not/a/project");
        assert!(args.validate().is_err());

        args.command = Command::InitConfig;
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }
}
