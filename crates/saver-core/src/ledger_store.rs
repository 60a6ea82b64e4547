//! Validated mutations over a [`Ledger`], persisted after every change.

use chrono::{DateTime, Utc};
use saver_domain::{ItemId, ItemKind, Ledger, LineItem, LineItemDraft, RecurrenceInterval};
use tracing::debug;

use crate::{
    persistence::PersistenceBridge,
    savings_service::{DerivedSavings, SavingsService},
    storage::KeyValueStorage,
    time::{Clock, SystemClock},
    CoreError,
};

/// Owns the in-memory ledger and keeps durable storage in step with it.
///
/// Each mutation is applied to a working copy, saved through the bridge, and only
/// then becomes the current state. Rejected or failed mutations leave both the
/// ledger and storage untouched.
pub struct LedgerStore<S> {
    ledger: Ledger,
    bridge: PersistenceBridge<S>,
    clock: Box<dyn Clock>,
    revision: u64,
    last_saved: Option<DateTime<Utc>>,
    load_warnings: Vec<CoreError>,
}

impl<S: KeyValueStorage> LedgerStore<S> {
    /// Loads the ledger from storage, falling back to defaults per field.
    pub fn open(bridge: PersistenceBridge<S>) -> Self {
        Self::open_with_clock(bridge, Box::new(SystemClock))
    }

    pub fn open_with_clock(bridge: PersistenceBridge<S>, clock: Box<dyn Clock>) -> Self {
        let restored = bridge.restore();
        Self {
            ledger: restored.ledger,
            bridge,
            clock,
            revision: 0,
            last_saved: None,
            load_warnings: restored.recovered,
        }
    }

    /// Read-only view of the current state.
    pub fn snapshot(&self) -> &Ledger {
        &self.ledger
    }

    /// Recomputes the savings figures from the current state.
    pub fn savings(&self) -> DerivedSavings {
        SavingsService::compute(&self.ledger)
    }

    /// Number of committed mutations since the store was opened.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn last_saved(&self) -> Option<DateTime<Utc>> {
        self.last_saved
    }

    /// Fields that could not be decoded when the store was opened.
    pub fn load_warnings(&self) -> &[CoreError] {
        &self.load_warnings
    }

    pub fn bridge(&self) -> &PersistenceBridge<S> {
        &self.bridge
    }

    pub fn add_item(&mut self, kind: ItemKind, draft: LineItemDraft) -> Result<ItemId, CoreError> {
        let fields = ValidatedFields::from_draft(&draft)?;
        let item = LineItem::new(fields.item_name, fields.amount, fields.interval);
        let mut next = self.ledger.clone();
        let id = next.push_item(kind, item);
        ensure_representable(&next)?;
        self.commit(next)?;
        debug!(%kind, %id, "item added");
        Ok(id)
    }

    /// Replaces the name, amount and interval of the item with `id`, keeping its identifier.
    pub fn update_item(
        &mut self,
        kind: ItemKind,
        id: ItemId,
        draft: LineItemDraft,
    ) -> Result<(), CoreError> {
        if self.ledger.item(kind, id).is_none() {
            return Err(CoreError::ItemNotFound { kind, id });
        }
        let fields = ValidatedFields::from_draft(&draft)?;
        let mut next = self.ledger.clone();
        let item = next
            .item_mut(kind, id)
            .ok_or(CoreError::ItemNotFound { kind, id })?;
        item.item_name = fields.item_name;
        item.amount = fields.amount;
        item.interval = fields.interval;
        ensure_representable(&next)?;
        self.commit(next)?;
        debug!(%kind, %id, "item updated");
        Ok(())
    }

    /// Removes the item with `id`. Returns `Ok(false)` without writing when it is absent.
    pub fn delete_item(&mut self, kind: ItemKind, id: ItemId) -> Result<bool, CoreError> {
        let mut next = self.ledger.clone();
        if next.remove_item(kind, id).is_none() {
            debug!(%kind, %id, "delete skipped, item absent");
            return Ok(false);
        }
        self.commit(next)?;
        debug!(%kind, %id, "item deleted");
        Ok(true)
    }

    /// Sets the display currency. Any label is accepted.
    pub fn set_currency(&mut self, label: impl Into<String>) -> Result<(), CoreError> {
        let mut next = self.ledger.clone();
        next.currency_label = label.into();
        self.commit(next)?;
        debug!(currency = %self.ledger.currency_label, "currency changed");
        Ok(())
    }

    pub fn set_tax_rate(&mut self, percent: f64) -> Result<(), CoreError> {
        if !percent.is_finite() {
            return Err(CoreError::validation("tax rate must be a finite number"));
        }
        if percent < 0.0 {
            return Err(CoreError::validation("tax rate must not be negative"));
        }
        let mut next = self.ledger.clone();
        next.tax_rate_percent = percent;
        ensure_representable(&next)?;
        self.commit(next)?;
        debug!(percent, "tax rate changed");
        Ok(())
    }

    fn commit(&mut self, next: Ledger) -> Result<(), CoreError> {
        self.bridge.save(&next)?;
        self.ledger = next;
        self.revision += 1;
        self.last_saved = Some(self.clock.now());
        debug!(
            revision = self.revision,
            savings = self.savings().monthly_savings,
            "ledger committed"
        );
        Ok(())
    }
}

/// Parses user-entered amount text into a finite, non-negative decimal.
pub fn parse_amount(raw: &str) -> Result<f64, CoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CoreError::validation("amount is required"));
    }
    let value = trimmed
        .parse::<f64>()
        .map_err(|_| CoreError::validation(format!("amount `{trimmed}` is not a number")))?;
    if !value.is_finite() {
        return Err(CoreError::validation(format!(
            "amount `{trimmed}` is not a finite number"
        )));
    }
    if value < 0.0 {
        return Err(CoreError::validation("amount must not be negative"));
    }
    // `-0` passes the sign check above; store it as plain zero.
    Ok(if value == 0.0 { 0.0 } else { value })
}

fn ensure_representable(ledger: &Ledger) -> Result<(), CoreError> {
    if SavingsService::is_representable(ledger) {
        Ok(())
    } else {
        Err(CoreError::validation(
            "amounts are too large to total without overflowing",
        ))
    }
}

struct ValidatedFields {
    item_name: String,
    amount: f64,
    interval: RecurrenceInterval,
}

impl ValidatedFields {
    fn from_draft(draft: &LineItemDraft) -> Result<Self, CoreError> {
        let item_name = draft.item_name.trim();
        if item_name.is_empty() {
            return Err(CoreError::validation("item name must not be empty"));
        }
        let amount = parse_amount(&draft.amount)?;
        if draft.interval == RecurrenceInterval::Custom(0) {
            return Err(CoreError::validation(
                "custom interval must be at least one month",
            ));
        }
        let monthly = SavingsService::normalize(&LineItem::new(item_name, amount, draft.interval));
        if !monthly.is_finite() {
            return Err(CoreError::validation(format!(
                "amount `{}` is too large for a {} interval",
                draft.amount.trim(),
                draft.interval
            )));
        }
        Ok(Self {
            item_name: item_name.to_string(),
            amount,
            interval: draft.interval,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_amount_rejects_non_numeric_and_non_finite_text() {
        assert_eq!(parse_amount(" 42.5 ").unwrap(), 42.5);
        assert!(parse_amount("").unwrap_err().is_validation());
        assert!(parse_amount("abc").unwrap_err().is_validation());
        assert!(parse_amount("NaN").unwrap_err().is_validation());
        assert!(parse_amount("inf").unwrap_err().is_validation());
        assert!(parse_amount("-3").unwrap_err().is_validation());
    }

    #[test]
    fn negative_zero_amount_is_stored_as_zero() {
        let amount = parse_amount("-0").unwrap();
        assert_eq!(amount, 0.0);
        assert!(amount.is_sign_positive());
    }
}
