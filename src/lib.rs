#![doc(test(attr(deny(warnings))))]

//! SYSCOHADA accounting core: a double-entry ledger and the mapper that
//! turns its account balances into the OHADA income statement (compte de
//! résultat) and balance sheet (bilan actif / passif).

pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod errors;
pub mod ledger;
pub mod reporting;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("SYSCOHADA core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
