use crate::{
    error::CliError,
    output::RecordWriter,
    shutdown::{ExitCode, ShutdownCoordinator},
};
use clap::Parser;
use commands::Commands;
use connectors::ariel::results::HttpWindowFetcher;
use engine_config::{env::EnvManager, settings::ariel::ArielSettings};
use engine_core::{
    scroller::{Advance, ResultScroller},
    settings::RefillMode,
};
use model::records::event::Event;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod commands;
mod error;
mod output;
mod shutdown;

#[derive(Parser)]
#[command(
    name = "ariel",
    version = "0.1.0",
    about = "Scroll the results of Ariel searches"
)]
struct Cli {
    #[arg(
        long,
        global = true,
        help = "Path to a .env file with ARIEL_* connection settings"
    )]
    env_file: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    // Records go to stdout, logs to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = load_settings(cli.env_file.as_deref())?;

    let shutdown = ShutdownCoordinator::new(CancellationToken::new());
    shutdown.register_handlers();
    let cancel = shutdown.cancel_token();

    match cli.command {
        Commands::Status { search_id } => {
            let client = settings.build_client()?;
            let info = client.search_status(&search_id, &cancel).await?;
            output::print_json(&info)?;
        }
        Commands::Results {
            search_id,
            count,
            window,
            strict,
            output,
        } => {
            let mut settings = settings;
            if let Some(window) = window {
                settings = settings.with_window(window);
            }
            if strict {
                settings = settings.with_mode(RefillMode::Strict);
            }

            let writer = RecordWriter::open(output.as_deref())?;
            scroll_results(&settings, &search_id, count, writer, &cancel).await?;
        }
    }

    if shutdown.is_shutdown_requested() {
        warn!("Stopped before the search was fully read");
        std::process::exit(ExitCode::ShutdownRequested.as_i32());
    }

    Ok(())
}

fn load_settings(env_file: Option<&str>) -> Result<ArielSettings, CliError> {
    let mut env = EnvManager::new();
    if let Some(path) = env_file {
        env.load_from_file(path)?;
    }
    Ok(ArielSettings::from_env(&env)?)
}

async fn scroll_results(
    settings: &ArielSettings,
    search_id: &str,
    count: Option<u64>,
    mut writer: RecordWriter,
    cancel: &CancellationToken,
) -> Result<(), CliError> {
    let client = settings.build_client()?;

    let mut scroller: ResultScroller<Event> = match count {
        Some(count) => {
            let fetcher = Arc::new(HttpWindowFetcher::new(client));
            ResultScroller::<Event>::open(fetcher, search_id, count, settings.scroll, cancel)
                .await?
        }
        None => {
            ResultScroller::<Event>::for_search(&client, search_id, settings.scroll, cancel)
                .await?
        }
    };

    info!(
        "Scrolling {} reported records of search {} in windows of {}",
        scroller.total_count(),
        search_id,
        scroller.window()
    );

    while !cancel.is_cancelled() {
        match scroller.advance(cancel).await {
            Advance::HasMore => writer.write(&scroller.next_record())?,
            Advance::Exhausted => break,
            Advance::FetchFailed(err) if err.is_cancelled() => break,
            Advance::FetchFailed(err) => {
                writer.finish()?;
                return Err(err.into());
            }
        }
    }

    let written = writer.finish()?;
    let metrics = scroller.metrics().snapshot();
    info!(
        "Wrote {} of {} reported records ({} windows fetched, {} fetch failures)",
        written,
        scroller.total_count(),
        metrics.windows_fetched,
        metrics.fetch_failures
    );

    Ok(())
}
