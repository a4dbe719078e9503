//! Command-line parsing for the mandi price forecaster.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! prediction code. Dates and commodities are passed through as strings so the
//! prediction engine owns their validation.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::predict::DEFAULT_CROP_DURATION_DAYS;

/// Default number of days for `mandi range`.
pub const DEFAULT_RANGE_DAYS: i64 = 30;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "mandi", version, about = "Mandi commodity price forecaster")]
pub struct Cli {
    /// Model artifact path or http(s) URL (overrides MANDI_MODEL).
    #[arg(long, global = true, value_name = "PATH|URL")]
    pub model: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the commodities the model knows.
    Commodities(OutputArgs),
    /// Predict the modal price for one date.
    Predict(PredictArgs),
    /// Predict modal prices for consecutive days.
    Range(RangeArgs),
    /// Find the sowing date whose harvest lands on the price peak of the next year.
    Sow(SowArgs),
    /// Plot a previously exported forecast JSON.
    Plot(PlotArgs),
}

#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    /// Print the response as JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args, Clone)]
pub struct PredictArgs {
    /// Date to predict (YYYY-MM-DD).
    #[arg(short = 'd', long)]
    pub date: String,

    /// Commodity name, exactly as listed by `mandi commodities`.
    #[arg(short = 'c', long)]
    pub commodity: String,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args, Clone)]
pub struct RangeArgs {
    /// Commodity name, exactly as listed by `mandi commodities`.
    #[arg(short = 'c', long)]
    pub commodity: String,

    /// First forecast day (YYYY-MM-DD), inclusive.
    #[arg(short = 's', long = "start", value_name = "DATE")]
    pub start_date: String,

    /// Number of consecutive days to forecast.
    #[arg(short = 'n', long, default_value_t = DEFAULT_RANGE_DAYS, allow_negative_numbers = true)]
    pub days: i64,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Render an ASCII chart after the table.
    #[arg(long)]
    pub plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Export the forecast to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,

    /// Export the forecast to JSON (readable by `mandi plot`).
    #[arg(long = "export-json", value_name = "JSON")]
    pub export_json: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct SowArgs {
    /// Commodity name, exactly as listed by `mandi commodities`.
    #[arg(short = 'c', long)]
    pub commodity: String,

    /// Days from sowing to harvest.
    #[arg(long = "crop-duration", default_value_t = DEFAULT_CROP_DURATION_DAYS, allow_negative_numbers = true)]
    pub crop_duration_days: i64,

    /// Start the one-year search from this date instead of today (YYYY-MM-DD).
    #[arg(long, value_name = "DATE")]
    pub today: Option<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Options for plotting a saved forecast.
#[derive(Debug, Args, Clone)]
pub struct PlotArgs {
    /// Forecast JSON file produced by `mandi range --export-json`.
    #[arg(long, value_name = "JSON")]
    pub forecast: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn range_defaults() {
        let cli = Cli::parse_from(["mandi", "range", "-c", "Tomato", "--start", "2024-01-01"]);
        let Command::Range(args) = cli.command else {
            panic!("expected range");
        };
        assert_eq!(args.days, DEFAULT_RANGE_DAYS);
        assert!(!args.output.json);
        assert!(cli.model.is_none());
    }

    #[test]
    fn global_model_flag_after_subcommand() {
        let cli = Cli::parse_from([
            "mandi",
            "sow",
            "--commodity",
            "Onion",
            "--model",
            "artifact.json",
        ]);
        assert_eq!(cli.model.as_deref(), Some("artifact.json"));
        let Command::Sow(args) = cli.command else {
            panic!("expected sow");
        };
        assert_eq!(args.crop_duration_days, DEFAULT_CROP_DURATION_DAYS);
    }

    #[test]
    fn negative_days_reach_the_engine() {
        let cli = Cli::parse_from(["mandi", "range", "-c", "Tomato", "-s", "2024-01-01", "-n", "-3"]);
        let Command::Range(args) = cli.command else {
            panic!("expected range");
        };
        assert_eq!(args.days, -3);
    }
}
