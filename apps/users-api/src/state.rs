//! Shared application state.

use mongodb::{Client, Database};
use tracing::info;

/// Handed to every router builder at startup.
///
/// Cloning is cheap: the MongoDB client and database handles share one
/// connection pool.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub mongo_client: Client,
    pub db: Database,
}

impl AppState {
    /// Shut the shared connection pool down.
    ///
    /// Router clones of the client see the same pool, so this closes it for
    /// all of them; it waits for open cursors and sessions to be released.
    pub async fn close(self) {
        info!("Shutting down: closing MongoDB connections");
        self.mongo_client.shutdown().await;
        info!("MongoDB connection pool closed");
    }
}
