//! Shared test utilities for domain testing
//!
//! - `TestMongo`: MongoDB container with automatic cleanup (feature: "mongo")
//! - `TestDataBuilder`: deterministic user data that passes validation (always available)
//! - `assertions`: custom assertion helpers (always available)
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::{TestMongo, TestDataBuilder};
//!
//! #[tokio::test]
//! #[ignore] // needs Docker
//! async fn my_mongo_test() {
//!     let mongo = TestMongo::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_test");
//!
//!     let db = mongo.database(&builder.database_name());
//!     let account = builder.account("main");
//!     let email = builder.email("main");
//! }
//! ```

#[cfg(feature = "mongo")]
mod mongo;

#[cfg(feature = "mongo")]
pub use mongo::TestMongo;

/// Longest account the users domain accepts.
const MAX_ACCOUNT_LEN: usize = 20;

/// Builder for test data with deterministic randomization
///
/// Values are derived from a seed so reruns produce the same data while
/// different tests do not collide on unique fields.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (generates seed from test name hash)
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_create_user");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Alphanumeric account of 4-20 characters, unique per (seed, suffix).
    ///
    /// Non-alphanumeric characters in `suffix` are dropped.
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let account = TestDataBuilder::new(1).account("main");
    /// assert!(account.len() <= 20);
    /// assert!(account.chars().all(|c| c.is_ascii_alphanumeric()));
    /// ```
    pub fn account(&self, suffix: &str) -> String {
        let mut account = format!("t{:08x}", self.seed as u32);
        account.extend(suffix.chars().filter(char::is_ascii_alphanumeric));
        account.truncate(MAX_ACCOUNT_LEN);
        account
    }

    /// Valid email address, unique per (seed, suffix).
    pub fn email(&self, suffix: &str) -> String {
        format!("test-{}-{}@example.com", self.seed, suffix)
    }

    /// Database name for tests sharing one MongoDB container.
    pub fn database_name(&self) -> String {
        format!("test_{}", self.seed)
    }
}

/// Test assertion helpers
pub mod assertions {
    /// Assert that an optional value is Some
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }
}
