//! Tests for the awaitguard tracing setup.

use std::sync::Mutex;

use awaitguard_core::tracing::init_tracing;

static TRACING_MUTEX: Mutex<()> = Mutex::new(());

#[test]
fn test_init_with_filter_env() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    std::env::set_var("AWAITGUARD_LOG", "awaitguard_analysis=debug,awaitguard_core=warn");
    init_tracing();
    std::env::remove_var("AWAITGUARD_LOG");
}

#[test]
fn test_init_tracing_idempotent() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    init_tracing();
    init_tracing();
    tracing::info!("still alive after repeated init");
}

#[test]
fn test_concurrent_init_does_not_panic() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    use rayon::prelude::*;
    (0..8).into_par_iter().for_each(|_| init_tracing());
}
