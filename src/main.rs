//! Diagnostic CLI binary.
//!
//! This is a thin wrapper around the `crawl_rules` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use crawl_rules::config::DEFAULT_MAX_RECURSION_DEPTH;
use crawl_rules::initialization::init_logger;
use crawl_rules::ruleset::{http_header_fields_map_by_key, load_detection_rules};
use crawl_rules::{Config, DetectionIndex, Interpreter, LogFormat, LogLevel};

#[derive(Debug, Parser)]
#[command(
    name = "crawl_rules",
    version,
    about = "Evaluate crawl expressions and inspect detection rule indices"
)]
struct Cli {
    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Warn, global = true)]
    log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain, global = true)]
    log_format: LogFormat,

    /// Maximum expression nesting depth
    #[arg(long, default_value_t = DEFAULT_MAX_RECURSION_DEPTH, global = true)]
    max_depth: usize,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Parse and evaluate command expressions
    Eval {
        /// Expressions such as 'random(1, 10)' or 'time(rfc3339)'
        #[arg(required = true)]
        expressions: Vec<String>,

        /// Evaluate each expression this many times
        #[arg(long, default_value_t = 1)]
        repeat: usize,

        /// Print the parsed command tree instead of evaluating
        #[arg(long)]
        tree: bool,
    },
    /// Load detection rules and print the grouped signature indices as JSON
    Index {
        /// Rule file (.json, .yaml, .yml) or directory of rule files
        rules: PathBuf,

        /// Print only the header index for this header key
        #[arg(long)]
        header_key: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    let config = Config {
        log_level: cli.log_level.clone(),
        log_format: cli.log_format.clone(),
        max_recursion_depth: cli.max_depth,
        ..Default::default()
    };

    if let Err(e) = init_logger(&config) {
        eprintln!("crawl_rules error: {}", e);
        process::exit(1);
    }

    if let Err(e) = run(&config, cli.command) {
        eprintln!("crawl_rules error: {:#}", e);
        process::exit(1);
    }
}

fn run(config: &Config, command: CliCommand) -> Result<()> {
    config.validate().context("Invalid configuration")?;

    match command {
        CliCommand::Eval {
            expressions,
            repeat,
            tree,
        } => {
            let interpreter = Interpreter::from_config(config);
            for expr in &expressions {
                let node = interpreter
                    .parse(expr)
                    .with_context(|| format!("Failed to parse {:?}", expr))?;
                if tree {
                    println!("{}", serde_json::to_string_pretty(&node)?);
                    continue;
                }
                for _ in 0..repeat {
                    let value = interpreter
                        .interpret(&node)
                        .with_context(|| format!("Failed to evaluate {:?}", expr))?;
                    println!("{}", value);
                }
            }
        }
        CliCommand::Index { rules, header_key } => {
            let rules = load_detection_rules(&rules)
                .with_context(|| format!("Failed to load rules from {}", rules.display()))?;
            info!("Loaded {} detection rule(s)", rules.len());

            let output = match header_key {
                Some(key) => {
                    serde_json::to_string_pretty(&http_header_fields_map_by_key(&rules, &key))?
                }
                None => serde_json::to_string_pretty(&DetectionIndex::build(&rules))?,
            };
            println!("{}", output);
        }
    }

    Ok(())
}
