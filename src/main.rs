//! CLI entry point for the bikeshare statistics explorer.
//!
//! Runs the interactive explore loop by default, or prints a one-shot report
//! for a city/month/day given on the command line.

use anyhow::Result;
use bikeshare_stats::{
    analyzers::build_report,
    config::CityConfig,
    filters::Selection,
    loader::load_data,
    output::{render_report, report_json},
    prompt::Prompter,
    session,
};
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bikeshare_stats")]
#[command(about = "Explore US bikeshare trip statistics", long_about = None)]
struct Cli {
    /// JSON file mapping city names to trip log paths
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactively pick filters and browse statistics (default)
    Explore,
    /// Print statistics for one selection and exit
    Report {
        /// City to analyze
        #[arg(long)]
        city: String,

        /// Month name (january-june) or "all"
        #[arg(long, default_value = "all")]
        month: String,

        /// Day of week or "all"
        #[arg(long, default_value = "all")]
        day: String,

        /// Emit the report as JSON instead of text
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// List configured cities and their trip log paths
    Cities,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/bikeshare_stats.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bikeshare_stats.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    // stderr stays quiet by default so log lines don't interleave with prompts
    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("warn".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let config = CityConfig::from_env(cli.config.as_deref())?;

    match cli.command.unwrap_or(Commands::Explore) {
        Commands::Explore => {
            let stdin = std::io::stdin();
            let mut prompter = Prompter::new(stdin.lock(), std::io::stdout());
            session::run(&mut prompter, &config)?;
        }
        Commands::Report {
            city,
            month,
            day,
            json,
        } => {
            let selection = Selection::resolve(&config, &city, &month, &day)?;
            let trips = load_data(&config, &selection)?;
            let report = build_report(&selection, &trips);

            if json {
                println!("{}", report_json(&report)?);
            } else {
                println!("{}", render_report(&report));
            }
        }
        Commands::Cities => {
            for (city, path) in config.iter() {
                println!("{city}: {}", path.display());
            }
        }
    }

    info!("Done");
    Ok(())
}
