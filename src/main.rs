use alias_shortener::{config, server};
use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Alias-to-URL shortener HTTP server.
#[derive(Parser)]
#[command(name = "alias-shortener")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Load `.env.<ENV>` instead of `.env` (e.g. `local`, `prod`)
    #[arg(long, value_name = "ENV")]
    env: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let env_file = load_env_file(cli.env.as_deref())?;

    let config = config::load_from_env()?;
    init_tracing(&config.log_level, &config.log_format);

    if let Some(path) = env_file {
        tracing::info!("Loaded environment from {}", path.display());
    }
    config.print_summary();

    server::run(config).await
}

/// Loads `.env.<name>` when a name is given (it must exist), otherwise `.env` if present.
fn load_env_file(name: Option<&str>) -> Result<Option<std::path::PathBuf>> {
    match name {
        Some(name) => {
            let file = format!(".env.{name}");
            let path = dotenvy::from_filename(&file)
                .map_err(|e| anyhow::anyhow!("Failed to load {file}: {e}"))?;
            Ok(Some(path))
        }
        None => Ok(dotenvy::dotenv().ok()),
    }
}

fn init_tracing(log_level: &str, log_format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    if log_format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
