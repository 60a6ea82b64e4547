//! Line items and the raw form input used to create them.

use serde::{Deserialize, Serialize};

use crate::{common::*, record::LineItemRecord};

/// One recurring income or expense entry.
///
/// `amount` is a non-negative magnitude; the owning collection decides whether it
/// adds to or subtracts from savings. Items decoded from storage may carry a
/// non-finite amount, which the calculator treats as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LineItemRecord", into = "LineItemRecord")]
pub struct LineItem {
    pub id: ItemId,
    pub item_name: String,
    pub amount: f64,
    pub interval: RecurrenceInterval,
}

impl LineItem {
    pub fn new(item_name: impl Into<String>, amount: f64, interval: RecurrenceInterval) -> Self {
        Self {
            id: ItemId::new(),
            item_name: item_name.into(),
            amount,
            interval,
        }
    }

    pub fn has_finite_amount(&self) -> bool {
        self.amount.is_finite()
    }
}

/// Unvalidated field values for creating or editing a line item.
///
/// `amount` is kept as entered so the store can report a parse failure instead of
/// silently coercing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItemDraft {
    pub item_name: String,
    pub amount: String,
    pub interval: RecurrenceInterval,
}

impl LineItemDraft {
    pub fn new(item_name: impl Into<String>, amount: impl ToString) -> Self {
        Self {
            item_name: item_name.into(),
            amount: amount.to_string(),
            interval: RecurrenceInterval::Monthly,
        }
    }

    pub fn with_interval(mut self, interval: RecurrenceInterval) -> Self {
        self.interval = interval;
        self
    }
}
