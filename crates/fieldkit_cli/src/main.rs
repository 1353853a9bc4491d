//! fieldkit CLI
//!
//! Command-line tools for working with entity records stored as JSON
//! objects.
//!
//! # Commands
//!
//! - `inspect` - Show a record's fields, types and primary key
//! - `apply` - Apply tracked edits and print the resulting update/delete sets
//! - `validate` - Run validation rules against a record

mod commands;
mod error;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// fieldkit command-line record tools.
#[derive(Parser)]
#[command(name = "fieldkit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Class-like entity name, used to derive the module prefix
    #[arg(global = true, short, long)]
    class: Option<String>,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a record's fields, types and primary key
    Inspect {
        /// Path to the record (a JSON object)
        record: PathBuf,

        /// Also resolve this localized field
        #[arg(short, long)]
        localized: Option<String>,

        /// Language for the localized lookup
        #[arg(long, default_value = "en")]
        lang: String,

        /// Site default language for the localized lookup
        #[arg(long, default_value = "en")]
        default_lang: String,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Apply tracked edits and print the pending update and delete sets
    Apply {
        /// Path to the record (a JSON object)
        record: PathBuf,

        /// Tracked write, as `name=value` or `name:type=value`
        #[arg(short, long = "set")]
        sets: Vec<String>,

        /// Tracked removal
        #[arg(short, long = "delete")]
        deletes: Vec<String>,

        /// Report every written field, not only changed ones
        #[arg(short, long)]
        all: bool,

        /// Write the edited record here
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Run validation rules against a record
    Validate {
        /// Path to the record (a JSON object)
        record: PathBuf,

        /// Path to the rules (a JSON list)
        #[arg(short, long)]
        rules: PathBuf,

        /// Validation scenario
        #[arg(short, long, default_value = "")]
        scenario: String,

        /// Only validate these fields
        #[arg(long, value_delimiter = ',')]
        fields: Vec<String>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let class = cli.class.as_deref();
    match cli.command {
        Commands::Inspect {
            record,
            localized,
            lang,
            default_lang,
            format,
        } => {
            let localized = localized.map(|field| commands::inspect::Localized {
                field,
                lang,
                default_lang,
            });
            commands::inspect::run(&record, class, localized.as_ref(), &format)?;
        }
        Commands::Apply {
            record,
            sets,
            deletes,
            all,
            output,
            format,
        } => {
            commands::apply::run(
                &record,
                class,
                &sets,
                &deletes,
                !all,
                output.as_deref(),
                &format,
            )?;
        }
        Commands::Validate {
            record,
            rules,
            scenario,
            fields,
            format,
        } => {
            commands::validate::run(&record, class, &rules, &scenario, &fields, &format)?;
        }
        Commands::Version => {
            println!("fieldkit CLI v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
