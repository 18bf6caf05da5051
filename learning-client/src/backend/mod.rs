//! Learning API backend abstraction layer.
//!
//! Provides a trait-based interface over the learning service:
//! - HTTP backend for the deployed API
//! - Mock backend for testing

pub mod http;
pub mod mock;
pub mod traits;

pub use http::HttpLearningBackend;
pub use mock::MockLearningBackend;
pub use traits::LearningBackend;
