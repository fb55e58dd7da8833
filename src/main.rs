use anyhow::{Context, Result};
use ctfolio::{Config, generate_site};
use tracing::{debug, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();
    init_logging(&config)?;
    debug!("Configuration: {:?}", config);

    config.validate().context("Invalid configuration")?;

    let summary = generate_site(&config)
        .await
        .context("Failed to generate site")?;

    println!(
        "Generated: {} ({} challenges, {} write-ups, {} projects)",
        config.output.display(),
        summary.challenges,
        summary.writeups,
        summary.projects
    );
    if summary.fallbacks > 0 {
        println!(
            "{} write-up(s) could not be loaded and show an error page",
            summary.fallbacks
        );
    }
    if summary.images > 0 {
        info!("Copied {} image(s)", summary.images);
    }

    if !config.no_open {
        let index = config.output.join("index.html");
        if let Err(e) = open::that(&index) {
            warn!("Could not open {}: {}", index.display(), e);
        }
    }

    Ok(())
}

/// Initializes compact logging.
///
/// `RUST_LOG` directives take precedence over `--verbose` and `--quiet`.
fn init_logging(config: &Config) -> Result<()> {
    let directives = std::env::var("RUST_LOG").ok();
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(config.log_filter(directives.as_deref()))
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).context("Failed to set tracing subscriber")
}
