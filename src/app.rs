//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads the CSV and cleans it
//! - runs aggregation + seasonal decomposition
//! - builds the chart set and the static page
//! - serves the page (or prints the report)

use clap::Parser;

use crate::cli::{Command, SampleArgs, ServeArgs};
use crate::domain::DashConfig;
use crate::error::AppError;
use crate::web::AppContext;

pub mod pipeline;

/// Entry point for the `salesdash` binary.
pub fn run() -> Result<(), AppError> {
    // Optional .env for SALESDASH_CSV / RUST_LOG; absence is fine.
    dotenvy::dotenv().ok();

    // We want bare `salesdash` (and `salesdash --csv ...`) to behave like
    // `salesdash serve ...`. Clap requires a subcommand name, so we do a
    // small, explicit rewrite of the argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Serve(args) => {
            init_tracing(args.debug);
            handle_serve(args)
        }
        Command::Report(args) => {
            init_tracing(args.debug);
            handle_report(args)
        }
        Command::Sample(args) => {
            init_tracing(false);
            handle_sample(args)
        }
    }
}

fn init_tracing(debug: bool) {
    let default_filter = if debug {
        "sales_dash=debug,tower_http=debug"
    } else {
        "sales_dash=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn handle_serve(args: ServeArgs) -> Result<(), AppError> {
    let config = dash_config_from_args(&args);
    let build = pipeline::run_build(&config)?;

    // Summary goes to the terminal before binding, so a failed startup never
    // looks like a healthy server.
    print!(
        "{}",
        crate::report::format_run_summary(&build.ingest.stats, &build.monthly, &build.decomposition)
    );

    let ctx = AppContext {
        page: build.page,
        chart_count: build.charts.len(),
    };
    crate::web::serve(ctx, &config)
}

fn handle_report(args: ServeArgs) -> Result<(), AppError> {
    let config = dash_config_from_args(&args);
    let build = pipeline::run_build(&config)?;

    print!(
        "{}",
        crate::report::format_run_summary(&build.ingest.stats, &build.monthly, &build.decomposition)
    );
    println!(
        "{}",
        crate::report::format_top_products(&crate::agg::top_products(
            &build.ingest.records,
            config.top_n
        ))
    );
    Ok(())
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    let config = crate::data::SampleConfig {
        months: args.months,
        rows_per_month: args.rows_per_month,
        seed: args.seed,
        base: args.base,
        slope: args.slope,
        amplitude: args.amplitude,
        noise: args.noise,
        ..crate::data::SampleConfig::default()
    };

    let records = crate::data::generate_sample(&config)?;
    crate::data::write_sample_csv(&args.out, &records)?;
    println!(
        "Wrote {} rows over {} months to '{}'.",
        records.len(),
        config.months,
        args.out.display()
    );
    Ok(())
}

pub fn dash_config_from_args(args: &ServeArgs) -> DashConfig {
    let csv_path = args
        .csv
        .clone()
        .or_else(|| std::env::var("SALESDASH_CSV").ok().map(Into::into))
        .unwrap_or_else(|| "superstore.csv".into());

    DashConfig {
        csv_path,
        host: args.host.clone(),
        port: args.port,
        period: args.period,
        top_n: args.top,
        hist_bins: args.bins,
        debug: args.debug,
    }
}

/// Rewrite argv so `salesdash` defaults to `salesdash serve`.
///
/// Rules:
/// - `salesdash`                      -> `salesdash serve`
/// - `salesdash --csv data.csv ...`   -> `salesdash serve --csv data.csv ...`
/// - `salesdash --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("serve".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "serve" | "report" | "sample");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "serve flags".
    if arg1.starts_with('-') {
        argv.insert(1, "serve".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}
