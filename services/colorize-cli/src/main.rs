//! Photo colorizer CLI.

use std::env;

use anyhow::Result;
use clap::Parser;
use colorize_cli::{run, Args};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Initialize tracing before the runtime so its setup is logged too
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // Logs go to stderr so `--data-uri` output stays clean.
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .json()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(threads) = args.worker_threads {
        info!("Configuring tokio runtime with {} worker threads", threads);
        runtime_builder.worker_threads(threads);
    } else if let Ok(threads_str) = env::var("TOKIO_WORKER_THREADS") {
        if let Ok(threads) = threads_str.parse::<usize>() {
            info!("Configuring tokio runtime with {} worker threads (from env)", threads);
            runtime_builder.worker_threads(threads);
        }
    }

    let runtime = runtime_builder.build()?;
    let report = runtime.block_on(run(&args))?;

    if let Some(uri) = report.data_uri {
        println!("{}", uri);
    }

    Ok(())
}
