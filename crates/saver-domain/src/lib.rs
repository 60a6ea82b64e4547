//! saver-domain
//!
//! Pure domain models (Ledger, LineItem, recurrence intervals).
//! No I/O, no CLI, no storage. Only data types and core enums.

pub mod common;
pub mod item;
pub mod ledger;
pub mod record;

pub use common::*;
pub use item::*;
pub use ledger::*;
pub use record::*;
