//! Ttl Store - A lightweight expiring key-value store
//!
//! Demo binary: keeps a session record in the store, bumps its visit
//! counter on every run, and reports what it found. Run it twice within
//! the TTL window to see the counter persist; wait the TTL out and the
//! session starts over.

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ttl_store::{CachedValue, Config, TtlStore};

/// State the demo persists between runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Session {
    visits: u64,
    last_seen: Option<DateTime<Utc>>,
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ttl_store=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ttl_store demo");

    // Load configuration from environment variables
    let config = Config::from_env();
    info!(
        "Configuration loaded: storage_path={}, default_ttl={}ms, max_store_bytes={:?}",
        config.storage_path.display(),
        config.default_ttl_ms,
        config.max_store_bytes
    );

    let store = TtlStore::from_config(&config)
        .with_context(|| format!("opening store at {}", config.storage_path.display()))?;

    let mut session = CachedValue::new(
        store.clone(),
        "session",
        Session {
            visits: 0,
            last_seen: None,
        },
    );

    match session.get().last_seen {
        Some(at) => info!(
            "Welcome back: visit {} (last seen {})",
            session.get().visits,
            at.to_rfc3339()
        ),
        None => info!("No session within the TTL window, starting fresh"),
    }

    session.set(Session {
        visits: session.get().visits + 1,
        last_seen: Some(Utc::now()),
    });

    let stats = store.stats();
    info!(
        "Session persisted: visits={}, lookups={}, hit_rate={:.2}",
        session.get().visits,
        stats.lookups(),
        stats.hit_rate()
    );

    Ok(())
}
