use anyhow::Result;
use armos_site::config::Config;
use armos_site::i18n::{TranslationTable, TranslationValidator};
use armos_site::server;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("armos_site=info".parse()?),
        )
        .init();

    info!("Starting ARMOS site");

    let config = Config::from_env()?;

    let report = TranslationValidator::validate(TranslationTable::get());
    for message in report.errors.iter().chain(report.warnings.iter()) {
        warn!("Translations: {}", message);
    }

    server::serve(&config).await
}
