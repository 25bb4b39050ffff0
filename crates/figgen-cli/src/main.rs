mod assets;
mod check;
mod config;
mod error;
mod fetch;
mod generate;
mod logging;

use clap::{Args, Parser, Subcommand};
use config::{Config, HttpSettings};
use error::PipelineResult;
use figgen_client::FigmaClient;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "figgen")]
#[command(about = "figgen: Figma designs to React + Tailwind components")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct GlobalArgs {
    /// Project root that receives json/, public/ and src/
    #[arg(long, global = true, env = "FIGGEN_ROOT", default_value = ".")]
    root: PathBuf,

    /// Figma personal access token
    #[arg(long, global = true, env = "FIGMA_ACCESS_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Key of the Figma file (the id in its URL)
    #[arg(long, global = true, env = "FIGMA_FILE_ID")]
    file_id: Option<String>,

    /// Figma API base URL
    #[arg(long, global = true, env = "FIGMA_API_BASE", default_value = figgen_client::DEFAULT_API_BASE)]
    api_base: String,

    /// Maximum concurrent downloads
    #[arg(long, global = true, default_value_t = 8)]
    concurrency: usize,

    /// Per-request timeout in seconds
    #[arg(long, global = true, default_value_t = 30)]
    timeout: u64,

    /// Retries for transient HTTP failures
    #[arg(long, global = true, default_value_t = 3)]
    retries: u32,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Download the file, render frames/components/instances to PNG and save a snapshot
    Fetch,

    /// Generate TSX components from the saved snapshot (no network)
    Generate,

    /// Export components and instances as SVG and generate icon components
    Assets,

    /// Check connectivity and summarize the file without writing anything
    Check,
}

#[tokio::main]
async fn main() {
    let env_file = dotenv_outcome(dotenvy::dotenv());

    let cli = Cli::parse();
    logging::init(cli.global.verbose);

    if let Err(e) = env_file {
        error!("failed to load .env: {e}");
        std::process::exit(1);
    }
    if let Err(e) = run(cli).await {
        error!("{e}");
        std::process::exit(1);
    }
}

/// A missing `.env` is fine; a present but unreadable or malformed one is not.
fn dotenv_outcome<T>(result: dotenvy::Result<T>) -> Result<(), dotenvy::Error> {
    match result {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(e),
    }
}

async fn run(cli: Cli) -> PipelineResult<()> {
    let g = cli.global;
    let http = HttpSettings {
        api_base: g.api_base,
        concurrency: g.concurrency,
        timeout: Duration::from_secs(g.timeout),
        retries: g.retries,
    };
    let cfg = Config::new(g.file_id, g.token, &g.root, http)?;

    match cli.command {
        Command::Fetch => {
            let api = FigmaClient::new(cfg.client_config()?)?;
            let summary = fetch::run(&cfg, &api).await?;
            info!(
                "fetch complete: {} of {} image(s) downloaded, {} failed, {} without url; snapshot at {}",
                summary.downloads.downloaded.len(),
                summary.renderable,
                summary.downloads.failed.len(),
                summary.downloads.skipped.len(),
                summary.snapshot.display()
            );
        }
        Command::Generate => {
            let summary = generate::run(&cfg)?;
            info!(
                "generate complete: {} file(s) written, {} node(s) skipped",
                summary.written.len(),
                summary.skipped
            );
        }
        Command::Assets => {
            let api = FigmaClient::new(cfg.client_config()?)?;
            let summary = assets::run(&cfg, &api).await?;
            info!(
                "assets complete: {} SVG(s), {} icon component(s)",
                summary.downloads.downloaded.len(),
                summary.icon_components.len()
            );
        }
        Command::Check => {
            let api = FigmaClient::new(cfg.client_config()?)?;
            let report = check::run(&cfg, &api).await?;
            info!("check complete: {} node(s) in \"{}\"", report.total(), report.name);
        }
    }

    Ok(())
}
