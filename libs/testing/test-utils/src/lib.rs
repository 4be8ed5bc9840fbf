//! Shared test utilities for domain testing
//!
//! - `sessions`: signed session tokens and request headers for route tests (always available)
//! - `TestMongo`: MongoDB container with automatic cleanup (feature: "mongo")
//! - `TestDataBuilder`: deterministic test data generation (always available)
//!
//! # MongoDB Testing
//!
//! Add `features = ["mongo"]` to your dev-dependencies:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { workspace = true, features = ["mongo"] }
//! ```
//!
//! ```rust,ignore
//! use test_utils::TestMongo;
//!
//! #[tokio::test]
//! #[ignore = "requires Docker"]
//! async fn my_mongo_test() {
//!     let mongo = TestMongo::new().await;
//!     let repository = MongoPostRepository::new(mongo.cache("my_mongo_test"));
//! }
//! ```

#[cfg(feature = "mongo")]
mod mongo;

#[cfg(feature = "mongo")]
pub use mongo::TestMongo;

/// Session helpers for exercising gated routes.
pub mod sessions {
    use axum::http::{HeaderValue, header};
    use axum_helpers::{SessionConfig, SessionResolver, SessionTokens};

    /// Fixed 32-byte secret used by every test signer
    pub const TEST_SECRET: &str = "test-secret-test-secret-test-secret!";

    pub fn tokens() -> SessionTokens {
        let config = SessionConfig::new(TEST_SECRET).expect("test secret is long enough");
        SessionTokens::new(&config)
    }

    pub fn resolver() -> SessionResolver {
        SessionResolver::new(tokens())
    }

    /// A token for a user whose display name is `name`.
    pub fn token_for(tokens: &SessionTokens, name: &str) -> String {
        let subject = format!("gh-{}", name.to_lowercase());
        let email = format!("{}@example.com", name.to_lowercase());
        tokens
            .issue(&subject, name, &email, None)
            .expect("failed to sign test token")
    }

    /// `Cookie` header carrying a session for `name`.
    pub fn cookie_for(tokens: &SessionTokens, name: &str) -> (header::HeaderName, HeaderValue) {
        let value = format!("session_token={}", token_for(tokens, name));
        (
            header::COOKIE,
            HeaderValue::from_str(&value).expect("token is header-safe"),
        )
    }
}

/// Builder for test data with deterministic randomization
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
    /// let builder = TestDataBuilder::from_test_name("test_create_post");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Database name unique to this builder's test
    pub fn database_name(&self) -> String {
        format!("test_{}", self.seed)
    }

    /// A post title that passes validation
    pub fn title(&self, suffix: &str) -> String {
        format!("Post {} {}", self.seed % 10_000, suffix)
    }

    /// Generate a unique name for testing
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("my_test");
    /// let name = builder.name("user", "main");
    /// assert!(name.starts_with("test-user-"));
    /// ```
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }
}
