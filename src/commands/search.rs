use anyhow::{Context, Result};

use crate::config::Config;
use crate::storage::{RecommendationStore, SqliteStore};

use super::build_pipeline;

/// Run the discovery pipeline once from the command line and persist the
/// results to the configured database.
pub async fn search(query: String, limit: usize, page: usize, append: bool) -> Result<()> {
    let config = Config::from_env()?;
    config.validate()?;

    println!("Searching for: \"{query}\" (limit {limit}, page {page})");
    println!("================================");

    let pipeline = build_pipeline(&config)?;
    let (results, has_more) = pipeline
        .run(&query, limit, page)
        .await
        .context("Pipeline run failed")?;

    if results.is_empty() {
        println!("\nNo recommendations found for \"{query}\"");
        return Ok(());
    }

    println!("\nFound {} recommendations:\n", results.len());
    for (i, rec) in results.iter().enumerate() {
        println!(
            "{}. {} ({:.1} / {}) — {}",
            i + 1,
            rec.name,
            rec.rating,
            rec.price_range,
            rec.category
        );
        println!("   {}", rec.quote);
        println!("   Source: {} | {}", rec.influencer, rec.address);
        println!();
    }
    if has_more {
        println!("More results available on page {}", page + 1);
    }

    if let Some(parent) = config.database.sqlite_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }
    let store = SqliteStore::open(&config.database.sqlite_path)
        .context("Failed to open recommendation database")?;
    let inserted = store
        .save(&results, append)
        .context("Failed to save recommendations")?;
    println!(
        "Saved {inserted} recommendations to {}",
        config.database.sqlite_path.display()
    );

    Ok(())
}
