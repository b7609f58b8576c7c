use std::io::Read;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use nt_core::ParseResult;
use nt_parser::{unwrap_text, NewsParser};
use nt_web::geocoding::DEFAULT_NOMINATIM_URL;
use nt_web::{AppState, NominatimGeocoder};
use tracing::{info, Level};

#[derive(Parser, Debug)]
#[command(author, version, about = "Location-based news reports, parsed into articles", long_about = None)]
pub struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Parse a saved raw report and print its articles as JSON
    Parse {
        /// Report file to read. Reads stdin when omitted.
        file: Option<PathBuf>,
        /// Category the caller is interested in (repeatable). Not used for filtering.
        #[arg(long = "category")]
        categories: Vec<String>,
        /// Print JSON on a single line
        #[arg(long)]
        compact: bool,
    },
    /// Serve the news API over HTTP
    Serve(ServeArgs),
}

#[derive(clap::Args, Debug)]
struct ServeArgs {
    #[arg(long, env = "NT_ADDR", default_value = "0.0.0.0:8000")]
    addr: SocketAddr,
    #[arg(long, env = "NT_MODEL", default_value = nt_inference::DEFAULT_MODEL, help = "Report generator to use. Available models: openai (default), dummy")]
    model: String,
    #[arg(long, env = "NT_MODEL_NAME")]
    model_name: Option<String>,
    #[arg(long, env = "NT_MODEL_URL")]
    model_url: Option<String>,
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
    /// Where raw reports are archived: file or memory
    #[arg(long, env = "NT_ARCHIVE", default_value = "file")]
    archive: String,
    #[arg(long, env = "NT_ARCHIVE_DIR", default_value = "tmp")]
    archive_dir: PathBuf,
    #[arg(long, env = "NT_GEOCODER_URL", default_value = DEFAULT_NOMINATIM_URL)]
    geocoder_url: String,
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(level).init();
}

fn read_report(file: Option<&PathBuf>) -> anyhow::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read report from {}", path.display())),
        None => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("Failed to read report from stdin")?;
            Ok(raw)
        }
    }
}

fn parse_raw_report(raw: &str, categories: &[String]) -> ParseResult {
    let requested = (!categories.is_empty()).then_some(categories);
    NewsParser::default().parse(&unwrap_text(raw), requested)
}

async fn serve(args: ServeArgs) -> anyhow::Result<()> {
    let openai_configured = args
        .api_key
        .as_deref()
        .is_some_and(|key| !key.trim().is_empty());

    let config = nt_inference::Config {
        model: args.model,
        api_key: args.api_key,
        model_name: args.model_name,
        model_url: args.model_url,
    };
    let generator = nt_inference::create_model(Some(config))?;

    let archive = nt_storage::create_archive(&args.archive, &args.archive_dir)?;
    info!("💾 Archiving raw reports to {}", archive.location());

    let geocoder = Arc::new(NominatimGeocoder::new(&args.geocoder_url)?);
    info!("🗺️ Reverse geocoding with {}", args.geocoder_url);

    let state = AppState::new(generator, geocoder, archive).with_openai_configured(openai_configured);
    nt_web::serve(args.addr, state).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Parse {
            file,
            categories,
            compact,
        } => {
            let raw = read_report(file.as_ref())?;
            let result = parse_raw_report(&raw, &categories);
            info!(
                "📰 Found {} articles in {} categories",
                result.total_articles,
                result.categories.len()
            );
            let json = if compact {
                serde_json::to_string(&result)?
            } else {
                serde_json::to_string_pretty(&result)?
            };
            println!("{}", json);
        }
        Commands::Serve(args) => serve(args).await?,
    }

    Ok(())
}
