//! Common test infrastructure shared across integration tests.
//!
//! ```ignore
//! #[path = "common/mod.rs"]
//! mod common;
//! use common::{frames, init_tracing};
//! ```

use pinfall::Frame;

/// Installs a `tracing` subscriber that writes through the test harness.
///
/// Safe to call from every test; only the first call installs the subscriber.
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Builds a frame sequence from roll slices.
#[allow(dead_code)]
pub fn frames(rolls: &[&[u32]]) -> Vec<Frame> {
    rolls.iter().map(|r| Frame::from(*r)).collect()
}
