//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and reads settings
//! - installs the log subscriber
//! - loads the model artifact once
//! - runs the requested command and prints reports/JSON
//! - writes optional exports

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::cli::{Cli, Command, OutputArgs, PlotArgs, PredictArgs, RangeArgs, SowArgs};
use crate::config::Settings;
use crate::error::AppError;
use crate::features::parse_date;
use crate::predict::Predictor;
use crate::report::{self, CommoditiesResponse, PriceResponse, RangeResponse};

pub mod pipeline;

/// Entry point for the `mandi` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let settings = Settings::from_env().with_model_override(cli.model.as_deref());
    init_tracing(&settings.log_filter);

    match cli.command {
        // Plotting a saved forecast does not need the model.
        Command::Plot(args) => handle_plot(args),
        Command::Commodities(args) => with_predictor(&settings, |p| handle_commodities(p, args)),
        Command::Predict(args) => with_predictor(&settings, |p| handle_predict(p, args)),
        Command::Range(args) => with_predictor(&settings, |p| handle_range(p, args)),
        Command::Sow(args) => with_predictor(&settings, |p| handle_sow(p, args)),
    }
}

/// Load the model once, then run `handler` against it.
fn with_predictor<F>(settings: &Settings, handler: F) -> Result<(), AppError>
where
    F: FnOnce(&Predictor) -> Result<(), AppError>,
{
    let predictor = pipeline::load_predictor(settings)?;
    handler(&predictor)
}

/// Log to stderr so stdout carries only reports and JSON.
///
/// `RUST_LOG` wins over the configured filter.
fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}

fn handle_commodities(predictor: &Predictor, args: OutputArgs) -> Result<(), AppError> {
    let commodities = predictor.commodities();
    if args.json {
        println!("{}", report::to_json(&CommoditiesResponse { commodities })?);
    } else {
        print!("{}", report::format_model_header(predictor.context()));
        print!("{}", report::format_commodities(commodities));
    }
    Ok(())
}

fn handle_predict(predictor: &Predictor, args: PredictArgs) -> Result<(), AppError> {
    let price = predictor.predict_price(&args.date, &args.commodity)?;
    if args.output.json {
        println!(
            "{}",
            report::to_json(&PriceResponse {
                predicted_modal_price: price
            })?
        );
    } else {
        print!("{}", report::format_price(&args.date, &args.commodity, price));
    }
    Ok(())
}

fn handle_range(predictor: &Predictor, args: RangeArgs) -> Result<(), AppError> {
    let series = predictor.predict_range(&args.start_date, &args.commodity, args.days)?;

    // Optional exports.
    if let Some(path) = &args.export {
        crate::io::write_forecast_csv(path, &args.commodity, &series)?;
        tracing::info!(path = %path.display(), "wrote forecast CSV");
    }
    if let Some(path) = &args.export_json {
        crate::io::write_forecast_json(path, predictor.context().name(), &args.commodity, &series)?;
        tracing::info!(path = %path.display(), "wrote forecast JSON");
    }

    if args.output.json {
        let body = RangeResponse {
            commodity: &args.commodity,
            predictions: &series,
        };
        println!("{}", report::to_json(&body)?);
        return Ok(());
    }

    print!("{}", report::format_model_header(predictor.context()));
    print!("{}", report::format_forecast_table(&args.commodity, &series));
    if args.plot {
        print!("{}", crate::plot::render_forecast_plot(&series, args.width, args.height));
    }
    Ok(())
}

fn handle_sow(predictor: &Predictor, args: SowArgs) -> Result<(), AppError> {
    let rec = match &args.today {
        Some(today) => {
            let today = parse_date(today)?;
            predictor.best_sowing_window_on(today, &args.commodity, args.crop_duration_days)?
        }
        None => predictor.best_sowing_window(&args.commodity, args.crop_duration_days)?,
    };

    if args.output.json {
        println!("{}", report::to_json(&rec)?);
    } else {
        print!("{}", report::format_model_header(predictor.context()));
        print!("{}", report::format_sowing(&rec));
    }
    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let forecast = crate::io::read_forecast_json(&args.forecast)?;

    println!("Forecast for {} ({})", forecast.commodity, forecast.model);
    print!(
        "{}",
        crate::plot::render_forecast_plot(&forecast.predictions, args.width, args.height)
    );
    Ok(())
}
