//! Stats command implementation

use anyhow::Result;

use learnit::config::Config;

use super::session::{open_store, print_notices, print_stats};

/// Start a session and print the rehydrated stats
pub async fn stats_command(config: &Config) -> Result<()> {
    let store = open_store(config);
    let mut rx = store.subscribe();

    // degraded stats are still worth showing
    if let Err(e) = store.start_session().await {
        eprintln!(
            "Warning: could not sync with {}: {}",
            config.api.base_url, e
        );
    }

    print_stats(&store.stats());
    print_notices(&mut rx);

    store.end_session();
    Ok(())
}
