//! View Errors CLI - Bridge interface for non-Rust hosts
//!
//! Commands: has, classes, render
//! Error bags come in as JSON, results go out as JSON on stdout
//! Returns 2 when there is nothing to render (or the check is false)

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use view_errors::{BagStore, ErrorBag, ErrorsConfig, RenderRequest};

#[derive(Parser)]
#[command(name = "view-errors-cli")]
#[command(about = "View Errors CLI - form error classes and lists")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to an errors config JSON file (classes / messages)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether fields have errors
    Has {
        /// JSON error bags: {"bag": {"field": ["message"]}}
        #[arg(short, long)]
        errors: String,

        /// Require every key instead of any
        #[arg(long)]
        all: bool,

        /// Field keys
        keys: Vec<String>,
    },

    /// Field classes for a key
    Classes {
        /// JSON error bags
        #[arg(short, long)]
        errors: String,

        /// Field key
        #[arg(short, long)]
        key: String,

        /// Class spec, error token first (defaults to the field role)
        #[arg(short, long)]
        spec: Option<String>,

        /// Bare class list instead of a class attribute
        #[arg(long)]
        single: bool,
    },

    /// Render an error list
    Render {
        /// JSON error bags
        #[arg(short, long)]
        errors: String,

        /// Only these fields, in this order (repeatable)
        #[arg(short, long = "field")]
        fields: Vec<String>,

        /// Use the field list class instead of the whole-list class
        #[arg(long, requires = "fields")]
        field_list: bool,

        /// Summary message, "singular|plural" allowed
        #[arg(short, long, conflicts_with = "default_message")]
        message: Option<String>,

        /// Use the configured summary message
        #[arg(long)]
        default_message: bool,

        /// Wrapper class override
        #[arg(long)]
        class: Option<String>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match ErrorsConfig::load(path) {
            Ok(c) => c,
            Err(e) => {
                print_json(&serde_json::json!({"error": e.to_string()}));
                return ExitCode::FAILURE;
            }
        },
        None => ErrorsConfig::default(),
    };

    match cli.command {
        Commands::Has { errors, all, keys } => {
            let bag = match load_bag(&errors, config) {
                Ok(b) => b,
                Err(code) => return code,
            };
            let result = if all { bag.has_all(keys) } else { bag.has_any(keys) };
            print_json(&serde_json::json!({"result": result}));
            exit_for(result)
        }

        Commands::Classes { errors, key, spec, single } => {
            let bag = match load_bag(&errors, config) {
                Ok(b) => b,
                Err(code) => return code,
            };
            let result = bag.compose_classes(&key, spec.map(Into::into), single);
            print_json(&serde_json::json!({"result": result}));
            exit_for(result.is_some())
        }

        Commands::Render {
            errors,
            fields,
            field_list,
            message,
            default_message,
            class,
        } => {
            let mut bag = match load_bag(&errors, config) {
                Ok(b) => b,
                Err(code) => return code,
            };

            let mut request = if fields.is_empty() {
                RenderRequest::all()
            } else if field_list {
                RenderRequest::field(fields)
            } else {
                RenderRequest::keys(fields)
            };
            if let Some(message) = message {
                request = request.message(message);
            } else if default_message {
                request = request.default_message();
            }
            if let Some(class) = class {
                request = request.class(class);
            }

            let html = bag.render(request);
            print_json(&serde_json::json!({"html": html}));
            exit_for(html.is_some())
        }
    }
}

fn load_bag(errors: &str, config: ErrorsConfig) -> Result<ErrorBag, ExitCode> {
    match BagStore::from_json(errors) {
        Ok(bags) => {
            debug!(messages = bags.count(), "error bags parsed");
            Ok(ErrorBag::from_bags(bags, config))
        }
        Err(e) => {
            print_json(&serde_json::json!({"error": e.to_string()}));
            Err(ExitCode::FAILURE)
        }
    }
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(out) => println!("{}", out),
        Err(e) => eprintln!("failed to encode output: {}", e),
    }
}

fn exit_for(found: bool) -> ExitCode {
    if found {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(2)
    }
}
