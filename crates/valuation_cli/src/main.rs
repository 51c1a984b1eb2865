//! Valuation CLI - Company valuation from EBIT and Revenue
//!
//! Operational entry point for the valuation engine.
//!
//! # Commands
//!
//! - `valuation price --ebit <N> --revenue <N>` - Price a company
//! - `valuation calibrate` - Show the scaling factor and per-example ratios
//! - `valuation earnout` - Build a two-year earnout table
//! - `valuation linear --ebit <N> --revenue <N>` - Value with the linear model
//! - `valuation describe` - Explain the pricing model
//! - `valuation check` - Validate the configuration
//!
//! # Configuration
//!
//! Settings are read from `valuation.toml` (or `--config <path>`) when it
//! exists, then from `VALUATION__<SECTION>__<KEY>` environment variables.
//! Logs go to stderr so that JSON and CSV output can be piped.

use std::path::Path;

use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use valuation_core::math::rounding::Rounding;
use valuation_engine::pricing::EnginePreset;

mod commands;
mod config;
mod error;
mod output;

pub use error::{CliError, Result};

use crate::config::CliConfig;

/// Company valuation CLI
#[derive(Parser)]
#[command(name = "valuation")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "valuation.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a company from EBIT and Revenue
    Price {
        /// EBIT (Earnings Before Interest and Taxes)
        #[arg(short, long)]
        ebit: f64,

        /// Revenue
        #[arg(short, long)]
        revenue: f64,

        /// Engine preset (page, earnout); defaults to the configured preset
        #[arg(short, long)]
        preset: Option<EnginePreset>,

        /// Rounding (cents, integer, none); defaults to the preset's rounding
        #[arg(long)]
        rounding: Option<Rounding>,

        /// Output format (table, json, csv)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Show the scaling factor derived from the calibration examples
    Calibrate {
        /// Output format (table, json, csv)
        #[arg(short, long, default_value = "table")]
        format: String,

        /// Write the scaling factor as JSON to this file
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Build the earnout payment table for two consecutive years
    Earnout {
        /// Year-1 EBIT
        #[arg(long)]
        ebit1: f64,

        /// Year-1 Revenue
        #[arg(long)]
        revenue1: f64,

        /// Year-2 EBIT
        #[arg(long)]
        ebit2: f64,

        /// Year-2 Revenue
        #[arg(long)]
        revenue2: f64,

        /// Output format (table, json, csv)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Value a company with the linear model
    Linear {
        /// EBIT
        #[arg(short, long)]
        ebit: f64,

        /// Revenue
        #[arg(short, long)]
        revenue: f64,

        /// Include the anchor grid
        #[arg(long)]
        relations: bool,

        /// Output format (table, json, csv)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Explain how prices are computed
    Describe {
        /// Engine preset (page, earnout); defaults to the configured preset
        #[arg(short, long)]
        preset: Option<EnginePreset>,
    },

    /// Check the configuration and print the effective settings
    Check,
}

fn init_tracing(log_level: &str, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level))
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = Path::new(&cli.config);
    let config = CliConfig::load(config_path)?;

    init_tracing(&config.general.log_level, cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }
    debug!("Loaded configuration: {:?}", config);

    match cli.command {
        Commands::Price {
            ebit,
            revenue,
            preset,
            rounding,
            format,
        } => commands::price::run(&config, ebit, revenue, preset, rounding, &format),
        Commands::Calibrate { format, output } => {
            commands::calibrate::run(&config, &format, output.as_deref())
        }
        Commands::Earnout {
            ebit1,
            revenue1,
            ebit2,
            revenue2,
            format,
        } => commands::earnout::run(&config, (ebit1, revenue1), (ebit2, revenue2), &format),
        Commands::Linear {
            ebit,
            revenue,
            relations,
            format,
        } => commands::linear::run(&config, ebit, revenue, relations, &format),
        Commands::Describe { preset } => commands::describe::run(&config, preset),
        Commands::Check => commands::check::run(&config, config_path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_price() {
        let cli = Cli::try_parse_from([
            "valuation",
            "price",
            "--ebit",
            "230",
            "--revenue",
            "2300",
            "--preset",
            "earnout",
            "--rounding",
            "int",
        ])
        .unwrap();
        assert_eq!(cli.config, "valuation.toml");
        match cli.command {
            Commands::Price {
                ebit,
                revenue,
                preset,
                rounding,
                format,
            } => {
                assert_eq!((ebit, revenue), (230.0, 2300.0));
                assert_eq!(preset, Some(EnginePreset::Earnout));
                assert_eq!(rounding, Some(Rounding::Integer));
                assert_eq!(format, "table");
            }
            _ => panic!("expected price command"),
        }
    }

    #[test]
    fn test_unknown_preset_rejected() {
        let result = Cli::try_parse_from([
            "valuation", "price", "--ebit", "1", "--revenue", "1", "--preset", "dcf",
        ]);
        assert!(result.is_err());
    }
}
