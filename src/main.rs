//! Library Store - maintenance entry point
//!
//! Loads both record files, reports what could not be loaded or linked, and
//! with `--rewrite` writes the normalised records back.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use library_store::{config::AppConfig, repository::Repository};

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("library_store={}", config.logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting Library Store v{}", env!("CARGO_PKG_VERSION"));

    let rewrite = std::env::args().skip(1).any(|arg| arg == "--rewrite");

    let repository = Repository::new(&config.storage);
    let (library, report) = repository.load_with_report()?;

    if !report.is_clean() {
        tracing::warn!("Load report: {}", serde_json::to_string(&report)?);
    }
    let inconsistencies = library.loan_inconsistencies();
    if !inconsistencies.is_empty() {
        tracing::warn!(
            "{} loan records disagree: {}",
            inconsistencies.len(),
            serde_json::to_string(&inconsistencies)?
        );
    }

    let on_loan = library
        .items()
        .filter(|item| item.current_borrower().is_some())
        .count();
    tracing::info!(
        "{} members, {} items, {} on loan, {} available",
        library.member_count(),
        library.item_count(),
        on_loan,
        library.available_items().len()
    );

    if rewrite {
        repository.save(&library)?;
        tracing::info!(
            "Rewrote {} and {}",
            config.storage.members_file.display(),
            config.storage.items_file.display()
        );
    }

    Ok(())
}
