mod engine;
mod models;
mod parser;
mod storage;
mod types;
mod validation;

use std::io::{stderr, stdout, BufWriter, Write};
use std::process::exit;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::engine::{DuplicatePolicy, ImportEngine};
use crate::storage::{DealStorage, ErrorStorage};

const USAGE: &str = "Usage: fx-deal-importer [input].csv [log_level:optional] [--match-timestamp] [--suppress-repeated-errors] > [deals].csv";

#[tokio::main]
async fn main() -> Result<()> {
    //NOTE: Only two switches so the arguments are parsed by hand, a larger surface would move to clap
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (flags, positional): (Vec<&String>, Vec<&String>) = args.iter().partition(|arg| arg.starts_with("--"));

    let Some(path) = positional.first() else {
        eprintln!("{USAGE}");
        eprintln!("Available log levels: error, warn, info, debug, trace (default: error)");
        exit(1);
    };

    let log_level = positional.get(1)
        .map(|s| parse_log_level(s)).unwrap_or(LevelFilter::ERROR);

    setup_logging(log_level);

    let mut duplicate_policy = DuplicatePolicy::IdOnly;
    let mut suppress_repeated_errors = false;

    for flag in flags {
        match flag.as_str() {
            "--match-timestamp" => duplicate_policy = DuplicatePolicy::IdAndTimestamp,
            "--suppress-repeated-errors" => suppress_repeated_errors = true,
            other => {
                eprintln!("Unknown option '{other}'");
                eprintln!("{USAGE}");
                exit(1);
            }
        }
    }

    let deal_storage = Arc::new(DealStorage::new());
    let error_storage = Arc::new(ErrorStorage::new());
    let engine = ImportEngine::new(deal_storage.clone(), error_storage.clone())
        .with_duplicate_policy(duplicate_policy)
        .with_error_suppression(suppress_repeated_errors);

    let timer = Instant::now();
    let summary = engine.run(path).await?;
    let duration = timer.elapsed();

    info!("Processed deals in: {duration:?}");
    info!("{} deals committed, {} error rows recorded", deal_storage.len(), error_storage.len());

    write_deals_to_stdout(&deal_storage)?;
    write_errors_to_stderr(&error_storage)?;

    eprintln!("CSV import completed. {summary}");

    Ok(())
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level);
            LevelFilter::ERROR
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: stdout carries the committed deals, so logging goes to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

fn write_deals_to_stdout(storage: &DealStorage) -> Result<()> {
    let mut deals: Vec<_> = storage.iter().map(|entry| entry.value().clone()).collect();
    deals.sort_by(|left, right| left.deal_id.cmp(&right.deal_id));

    let mut writer = csv::Writer::from_writer(BufWriter::new(stdout().lock()));

    // An empty run still gets a header line
    if deals.is_empty() {
        writer.write_record(["id", "from_currency", "to_currency", "timestamp", "amount"])?;
    }

    for deal in &deals {
        writer.serialize(deal)?;
    }

    writer.flush()?;

    Ok(())
}

fn write_errors_to_stderr(storage: &ErrorStorage) -> Result<()> {
    let errors = storage.all();

    if errors.is_empty() {
        return Ok(());
    }

    let mut output = BufWriter::new(stderr().lock());

    writeln!(output, "line,deal_id,reason,detail")?;

    for error in errors {
        writeln!(
            output,
            "{},{},{:?},{}",
            error.line,
            error.deal_id.unwrap_or_default(),
            error.reason,
            error.detail.unwrap_or_default().replace(',', ";")
        )?;
    }

    output.flush()?;

    Ok(())
}
