//! saver-core
//!
//! Ledger store, savings calculation and the persistence bridge.
//! Depends on saver-domain. No terminal I/O; durable storage is injected through
//! [`storage::KeyValueStorage`].

pub mod error;
pub mod format;
pub mod ledger_store;
pub mod persistence;
pub mod savings_service;
pub mod storage;
pub mod time;


pub use error::CoreError;
pub use format::CurrencyFormatter;
pub use ledger_store::*;
pub use persistence::*;
pub use savings_service::*;
pub use storage::{KeyValueStorage, MemoryStorage};
pub use time::{Clock, SystemClock};
