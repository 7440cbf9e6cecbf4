//! Read-through demo
//!
//! Wires a shared cache the way a host process would: one instance built at
//! startup, a sweeper task, and a backend query served through the cache.
//!
//! Run with `cargo run --example read_through`.

use std::time::Duration;

use anyhow::Context;
use content_cache::{spawn_cleanup_task, CacheConfig, SharedCache, TtlTier};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone)]
struct Post {
    slug: String,
    title: String,
}

/// Stand-in for the content backend.
async fn fetch_published_posts(page: u32) -> anyhow::Result<Vec<Post>> {
    tokio::time::sleep(Duration::from_millis(50)).await;
    Ok((0..3)
        .map(|i| Post {
            slug: format!("post-{page}-{i}"),
            title: format!("Post {i} on page {page}"),
        })
        .collect())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "content_cache=debug,read_through=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = CacheConfig::from_env();
    config.validate().context("invalid cache configuration")?;
    info!(
        "Configuration loaded: capacity={}, cleanup_interval={}s",
        config.capacity, config.cleanup_interval
    );

    let cache: SharedCache<Vec<Post>> = SharedCache::from_config(&config);
    let sweeper = spawn_cleanup_task(cache.clone(), config.cleanup_interval_duration());

    for page in [1, 2, 1, 1, 2] {
        let key = format!("published_posts_page_{page}");
        let posts = cache
            .get_or_try_fetch(&key, TtlTier::Medium, ["blog"], || fetch_published_posts(page))
            .await?;
        info!(key = %key, first = %posts[0].slug, title = %posts[0].title, "served page");
    }

    // An admin edit touches one page family, then all blog content
    let removed = cache.invalidate_by_pattern_str("^published_posts_page_2")?;
    info!(removed, "invalidated page 2");
    let removed = cache.invalidate_by_tags(&["blog"]);
    info!(removed, "invalidated blog entries");

    let stats = serde_json::to_string_pretty(&cache.stats())?;
    println!("{stats}");

    sweeper.abort();
    Ok(())
}
