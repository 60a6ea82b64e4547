#![doc(test(attr(deny(warnings))))]

//! Saver Tracker keeps a ledger of recurring income and expenses, persists it
//! to a local key-value document and derives the potential monthly savings.

pub mod cli;
pub mod currency;
pub mod errors;
pub mod utils;

pub use errors::CliError;
pub use saver_config::{Config, ConfigManager};
pub use saver_core::{
    CoreError, CurrencyFormatter, DerivedSavings, KeyValueStorage, LedgerStore, MemoryStorage,
    PersistenceBridge, SavingsService,
};
pub use saver_domain::{ItemId, ItemKind, Ledger, LineItem, LineItemDraft, RecurrenceInterval};
pub use saver_storage_json::JsonKeyValueStorage;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing with the default filter directive.
pub fn init() {
    init_with_filter(&Config::default_log_filter());
}

/// Initializes global tracing, adding `directive` on top of `RUST_LOG`.
pub fn init_with_filter(directive: &str) {
    INIT_TRACING.call_once(|| {
        utils::init_tracing(directive);
        tracing::info!("Saver Tracker tracing initialized.");
    });
}
