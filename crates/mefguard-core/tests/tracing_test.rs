//! Tests for logging setup and cancellation.

use std::sync::Mutex;

use mefguard_core::tracing::setup::init_tracing;
use mefguard_core::{Cancellable, CancellationToken};

/// Serializes tests that touch MEFGUARD_LOG.
static TRACING_MUTEX: Mutex<()> = Mutex::new(());

#[test]
fn test_init_with_filter_directives() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    std::env::set_var("MEFGUARD_LOG", "mefguard_analysis::fixes=debug,mefguard_core=warn");
    init_tracing();
    std::env::remove_var("MEFGUARD_LOG");
}

/// Repeated calls are no-ops.
#[test]
fn test_init_tracing_idempotent() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    init_tracing();
    init_tracing();
    tracing::info!("still alive");
}

/// Garbage filters fall back to the default instead of panicking.
#[test]
fn test_invalid_filter_fallback() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    std::env::set_var("MEFGUARD_LOG", "=[not a filter");
    init_tracing();
    std::env::remove_var("MEFGUARD_LOG");
}

#[test]
fn test_cancellation_shared_between_clones() {
    let token = CancellationToken::new();
    let clone = token.clone();
    assert!(!clone.is_cancelled());
    token.cancel();
    assert!(clone.is_cancelled());
    assert!(!CancellationToken::default().is_cancelled());
}
