//! Shared test utilities for the store crates
//!
//! - `TestMongo`: throwaway MongoDB container wrapped in a `DocumentStore`
//! - `TestDataBuilder`: deterministic, per-test names and ids
//! - `assertions`: small assertion helpers
//!
//! ```rust,no_run
//! use test_utils::{TestDataBuilder, TestMongo};
//!
//! # async fn example() {
//! let mongo = TestMongo::new().await;
//! let builder = TestDataBuilder::from_test_name("create_product");
//! let collection = builder.collection("products");
//! assert!(mongo.store().is_healthy().await);
//! # let _ = collection;
//! # }
//! ```

mod mongo;

pub use mongo::TestMongo;

use uuid::Uuid;

/// Builder for test data with deterministic randomization
///
/// Seeds derive from the test name, so reruns produce the same values while
/// different tests never collide.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed from a hash of the test name
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// An id that is stable for this builder and unlikely to exist in the store
    pub fn id(&self) -> Uuid {
        let bytes = self.seed.to_le_bytes();
        let mut uuid_bytes = [0u8; 16];
        uuid_bytes[..8].copy_from_slice(&bytes);
        uuid_bytes[8..].copy_from_slice(&bytes);
        Uuid::from_bytes(uuid_bytes)
    }

    /// `test-<prefix>-<seed>-<suffix>`
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }

    /// Collection name scoped to this test, so tests sharing a database stay isolated
    pub fn collection(&self, base: &str) -> String {
        format!("{}_{:x}", base, self.seed)
    }
}

/// Test assertion helpers
pub mod assertions {
    use uuid::Uuid;

    pub fn assert_uuid_eq(actual: Uuid, expected: Uuid, context: &str) {
        assert_eq!(
            actual, expected,
            "{}: expected UUID {}, got {}",
            context, expected, actual
        );
    }

    /// Unwrap an `Err`, panicking with `context` on `Ok`
    pub fn assert_err<T: std::fmt::Debug, E>(result: Result<T, E>, context: &str) -> E {
        match result {
            Ok(value) => panic!("{}: expected Err, got Ok({:?})", context, value),
            Err(e) => e,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_is_deterministic() {
        let a = TestDataBuilder::from_test_name("same");
        let b = TestDataBuilder::from_test_name("same");

        assert_eq!(a.id(), b.id());
        assert_eq!(a.name("product", "main"), b.name("product", "main"));
        assert_eq!(a.collection("products"), b.collection("products"));
    }

    #[test]
    fn test_builder_differs_between_tests() {
        let a = TestDataBuilder::from_test_name("first");
        let b = TestDataBuilder::from_test_name("second");

        assert_ne!(a.id(), b.id());
        assert_ne!(a.collection("products"), b.collection("products"));
    }

    #[test]
    fn test_name_format() {
        let builder = TestDataBuilder::new(42);
        assert_eq!(builder.name("product", "main"), "test-product-42-main");
        assert_eq!(builder.collection("products"), "products_2a");
    }

    #[test]
    fn test_assert_err_returns_error() {
        let err = assertions::assert_err(Err::<(), _>("boom"), "should fail");
        assert_eq!(err, "boom");
    }

    #[test]
    #[should_panic(expected = "should fail")]
    fn test_assert_err_panics_on_ok() {
        assertions::assert_err(Ok::<_, ()>(1), "should fail");
    }
}
