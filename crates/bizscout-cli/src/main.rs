mod extract;

use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "bizscout-cli")]
#[command(about = "Extract structured business records from Yelp listing pages")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Extract one listing page and print its record as JSON
    Extract {
        /// Listing page URL (also the record URL)
        url: String,
        /// Read the page HTML from this file instead of fetching it
        #[arg(long)]
        html_file: Option<PathBuf>,
        /// Skip the "Read more" and "Amenities and More" browser steps
        #[arg(long)]
        no_browser: bool,
        /// Print the record on a single line
        #[arg(long)]
        compact: bool,
    },
}

/// How long shutdown waits for abandoned blocking work, such as a browser
/// procedure that outlived its timeout.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(1);

fn main() -> anyhow::Result<()> {
    block_on_bounded(run(), SHUTDOWN_GRACE)?
}

/// Drives `future` to completion on a fresh runtime, then shuts the runtime
/// down without waiting more than `grace` for blocking tasks still running.
fn block_on_bounded<F: Future>(future: F, grace: Duration) -> anyhow::Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let output = runtime.block_on(future);
    runtime.shutdown_timeout(grace);
    Ok(output)
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = bizscout_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Extract {
            url,
            html_file,
            no_browser,
            compact,
        } => {
            let options = extract::ExtractOptions {
                html_file,
                no_browser,
                compact,
            };
            extract::run_extract(&config, &url, &options).await?;
        }
    }

    Ok(())
}
