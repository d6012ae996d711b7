//! MongoDB connector and utilities
//!
//! Provides connection management and health probes.

mod config;
mod connector;
mod health;

pub use config::{FALLBACK_DATABASE, MongoConfig};
pub use connector::{connect_from_config, connect_from_config_with_retry, resolve_database};
pub use health::{HealthStatus, check_health, check_health_detailed, ping};

// Re-export MongoDB types for convenience
pub use mongodb::{Client, Collection, Database};
