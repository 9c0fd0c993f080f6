//! fmtrc CLI
//!
//! Command-line interface for inspecting formatter configuration

mod commands;
mod output;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use colored::Colorize;
use fmtrc_core::{Result, init_tracing, init_tracing_with_filter};
use std::io;
use std::path::PathBuf;
use tracing::error;

#[derive(Parser)]
#[command(name = "fmtrc")]
#[command(about = "fmtrc: resolve formatter options per file")]
#[command(version = fmtrc_core::VERSION)]
#[command(
    long_about = "fmtrc loads formatter configuration (.fmtrc, .fmtrc.json, .fmtrc.yaml, .fmtrc.toml\n\
or the \"fmtrc\" key of package.json) and shows the effective options for individual files.\n\
\n\
Examples:\n  \
fmtrc resolve README.md src/app.ts   # Effective options per file\n  \
fmtrc resolve --format json docs/a.md\n  \
fmtrc config validate                # Check the discovered configuration\n  \
fmtrc config init --format yaml      # Write a starter configuration"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path
    #[arg(
        short,
        long,
        global = true,
        help = "Path to configuration file (default: search upward from each file)"
    )]
    config: Option<PathBuf>,

    /// Verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Generate shell completion script
    #[arg(
        long,
        value_enum,
        help = "Generate completion script for specified shell"
    )]
    generate_completion: Option<Shell>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the effective options for one or more files
    Resolve {
        /// Files to resolve (need not exist)
        #[arg(required = true, help = "Files to resolve options for")]
        files: Vec<PathBuf>,

        /// Fill unset options with the formatter defaults
        #[arg(long, help = "Layer the result over the built-in formatter defaults")]
        defaults: bool,

        /// Output format
        #[arg(short, long, default_value = "human", help = "Output format")]
        format: OutputFormat,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show version information
    #[command(alias = "ver")]
    Version,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write a starter configuration file to the current directory
    Init {
        #[arg(long, default_value = "json", help = "Configuration file format")]
        format: ConfigFormat,

        #[arg(long, help = "Overwrite existing configuration file")]
        force: bool,
    },

    /// Validate a configuration file
    Validate {
        #[arg(help = "Path to configuration file (default: search for .fmtrc)")]
        path: Option<PathBuf>,
    },

    /// Print the normalized configuration
    Show,

    /// Print or write the JSON Schema for configuration files
    Schema {
        #[arg(short, long, help = "Write the schema to this file instead of stdout")]
        output: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Debug)]
enum OutputFormat {
    Human,
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ConfigFormat {
    Json,
    Yaml,
    Toml,
}

fn main() {
    let cli = Cli::parse();

    if let Some(shell) = cli.generate_completion {
        generate_completion_script(shell);
        return;
    }

    if !cli.no_color && std::env::var("NO_COLOR").is_err() {
        colored::control::set_override(true);
    } else {
        colored::control::set_override(false);
    }

    // RUST_LOG wins unless verbosity was asked for explicitly
    if cli.verbose == 0 && std::env::var("RUST_LOG").is_ok() {
        init_tracing();
    } else {
        let log_level = match cli.verbose {
            0 => "fmtrc=error", // Only errors by default
            1 => "fmtrc=warn",
            2 => "fmtrc=info",
            3 => "fmtrc=debug",
            _ => "fmtrc=trace",
        };
        init_tracing_with_filter(log_level);
    }

    if let Err(e) = run_command(cli) {
        error!("fmtrc failed: {}", e);
        std::process::exit(1);
    }
}

fn generate_completion_script(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}

fn run_command(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Resolve {
            files,
            defaults,
            format,
        }) => commands::resolve_command(files, cli.config, defaults, format),

        Some(Commands::Config { action }) => match action {
            ConfigAction::Init { format, force } => commands::config_init_command(format, force),
            ConfigAction::Validate { path } => {
                commands::config_validate_command(path.or(cli.config))
            }
            ConfigAction::Show => commands::config_show_command(cli.config),
            ConfigAction::Schema { output } => commands::config_schema_command(output),
        },

        Some(Commands::Version) => {
            println!("{} {}", "fmtrc".bold(), fmtrc_core::VERSION);
            Ok(())
        }

        None => {
            let _ = Cli::command().print_help();
            Ok(())
        }
    }
}
