#![allow(dead_code)]
//! # Common Test Utilities
//!
//! Tracing setup shared by the integration tests in this crate. Mock
//! providers and store fixtures live in `frameforge-test-utils`.

use dotenvy::dotenv;
use std::sync::Once;

static INIT: Once = Once::new();

/// Initializes the tracing subscriber and loads .env for tests.
pub fn setup_tracing() {
    INIT.call_once(|| {
        dotenv().ok();
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}
