mod config;
mod report;

use anyhow::{Context, Result};
use tracing::info;

use config::AppConfig;
use qa_db::Database;

fn main() -> Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "qa=info,qa_db=info".into()),
        )
        .init();

    let config = AppConfig::from_env()?;

    let db = Database::open(&config.db)
        .with_context(|| format!("opening {}", config.db.path.display()))?;

    if config.seed {
        if db.all_users()?.is_empty() {
            qa_db::seed::seed_demo(&db)?;
        } else {
            info!("Store already has users; skipping seed");
        }
    }

    let threads = report::log_forum(&db, config.report_format)?;
    info!(threads, "Report complete");
    Ok(())
}
