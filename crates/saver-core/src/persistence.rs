//! Mirrors a [`Ledger`] into four independent storage keys and rebuilds it at startup.

use saver_domain::{Ledger, LineItem, DEFAULT_CURRENCY};
use tracing::{debug, info, warn};

use crate::{storage::KeyValueStorage, CoreError};

pub const CURRENCY_KEY: &str = "currency";
pub const TAX_RATE_KEY: &str = "taxRate";
pub const INCOME_KEY: &str = "income";
pub const EXPENSES_KEY: &str = "expenses";

/// Result of a fault-tolerant load: the ledger plus every field that fell back
/// to its default.
#[derive(Debug)]
pub struct RestoredLedger {
    pub ledger: Ledger,
    pub recovered: Vec<CoreError>,
}

impl RestoredLedger {
    pub fn is_clean(&self) -> bool {
        self.recovered.is_empty()
    }
}

pub struct PersistenceBridge<S> {
    storage: S,
    default_currency: String,
}

impl<S: KeyValueStorage> PersistenceBridge<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            default_currency: DEFAULT_CURRENCY.to_string(),
        }
    }

    /// Overrides the currency label used when none is stored.
    pub fn with_default_currency(mut self, label: impl Into<String>) -> Self {
        self.default_currency = label.into();
        self
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn default_currency(&self) -> &str {
        &self.default_currency
    }

    /// Writes every field to its own key, overwriting prior values.
    ///
    /// Both payloads are encoded before the first write. Item lists go first and the
    /// currency label last, so an interrupted save can only leave stale settings.
    pub fn save(&self, ledger: &Ledger) -> Result<(), CoreError> {
        let income = encode_items(&ledger.income_items)?;
        let expenses = encode_items(&ledger.expense_items)?;
        self.storage.set(INCOME_KEY, &income)?;
        self.storage.set(EXPENSES_KEY, &expenses)?;
        self.storage
            .set(TAX_RATE_KEY, &ledger.tax_rate_percent.to_string())?;
        self.storage.set(CURRENCY_KEY, &ledger.currency_label)?;
        debug!(
            income = ledger.income_items.len(),
            expenses = ledger.expense_items.len(),
            "ledger saved"
        );
        Ok(())
    }

    pub fn load(&self) -> Ledger {
        self.restore().ledger
    }

    /// Reads each key independently. A missing, unreadable or malformed value is
    /// replaced by that field's default and reported in [`RestoredLedger::recovered`].
    pub fn restore(&self) -> RestoredLedger {
        let mut recovered = Vec::new();
        let mut ledger = Ledger::new(self.default_currency.clone());

        if let Some(label) = self.read(CURRENCY_KEY, &mut recovered) {
            ledger.currency_label = label;
        }
        if let Some(raw) = self.read(TAX_RATE_KEY, &mut recovered) {
            match decode_tax_rate(&raw) {
                Ok(rate) => ledger.tax_rate_percent = rate,
                Err(err) => recovered.push(err),
            }
        }
        if let Some(raw) = self.read(INCOME_KEY, &mut recovered) {
            match decode_items(INCOME_KEY, &raw) {
                Ok(items) => ledger.income_items = items,
                Err(err) => recovered.push(err),
            }
        }
        if let Some(raw) = self.read(EXPENSES_KEY, &mut recovered) {
            match decode_items(EXPENSES_KEY, &raw) {
                Ok(items) => ledger.expense_items = items,
                Err(err) => recovered.push(err),
            }
        }

        for err in &recovered {
            warn!("{err}; using default");
        }
        info!(
            income = ledger.income_items.len(),
            expenses = ledger.expense_items.len(),
            currency = %ledger.currency_label,
            "ledger loaded"
        );
        RestoredLedger { ledger, recovered }
    }

    fn read(&self, key: &str, recovered: &mut Vec<CoreError>) -> Option<String> {
        match self.storage.get(key) {
            Ok(value) => value,
            Err(err) => {
                recovered.push(CoreError::StorageDecode {
                    key: key.to_string(),
                    reason: err.to_string(),
                });
                None
            }
        }
    }
}

fn encode_items(items: &[LineItem]) -> Result<String, CoreError> {
    serde_json::to_string(items).map_err(|err| CoreError::Serde(err.to_string()))
}

/// Parses the stored item array. An empty string counts as an empty collection.
pub fn decode_items(key: &str, raw: &str) -> Result<Vec<LineItem>, CoreError> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(raw).map_err(|err| CoreError::StorageDecode {
        key: key.to_string(),
        reason: err.to_string(),
    })
}

pub fn decode_tax_rate(raw: &str) -> Result<f64, CoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    match trimmed.parse::<f64>() {
        Ok(rate) if rate.is_finite() && rate >= 0.0 => Ok(rate),
        _ => Err(CoreError::StorageDecode {
            key: TAX_RATE_KEY.to_string(),
            reason: format!("`{trimmed}` is not a non-negative number"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use saver_domain::{ItemKind, RecurrenceInterval};

    #[test]
    fn missing_keys_load_as_defaults() {
        let bridge = PersistenceBridge::new(MemoryStorage::new());
        let restored = bridge.restore();
        assert!(restored.is_clean());
        assert_eq!(restored.ledger, Ledger::default());
        assert_eq!(restored.ledger.currency_label, "PHP");
    }

    #[test]
    fn corrupt_field_does_not_block_the_rest() {
        let storage = MemoryStorage::with_entries([
            (CURRENCY_KEY, "USD"),
            (TAX_RATE_KEY, "twelve"),
            (INCOME_KEY, r#"[{"itemName":"Salary","amount":1000}]"#),
            (EXPENSES_KEY, "[{not json"),
        ]);
        let restored = PersistenceBridge::new(storage).restore();

        assert_eq!(restored.recovered.len(), 2);
        assert!(restored
            .recovered
            .iter()
            .all(|err| matches!(err, CoreError::StorageDecode { .. })));
        let ledger = restored.ledger;
        assert_eq!(ledger.currency_label, "USD");
        assert_eq!(ledger.tax_rate_percent, 0.0);
        assert_eq!(ledger.income_items.len(), 1);
        assert!(ledger.expense_items.is_empty());
    }

    #[test]
    fn negative_stored_tax_rate_is_rejected() {
        assert!(decode_tax_rate("-5").is_err());
        assert!(decode_tax_rate("NaN").is_err());
        assert_eq!(decode_tax_rate(" 12.5 ").unwrap(), 12.5);
        assert_eq!(decode_tax_rate("").unwrap(), 0.0);
    }

    #[test]
    fn save_writes_all_four_keys() {
        let bridge = PersistenceBridge::new(MemoryStorage::new());
        let mut ledger = Ledger::new("EUR");
        ledger.tax_rate_percent = 12.5;
        ledger.push_item(
            ItemKind::Expense,
            LineItem::new("Gym", 50.0, RecurrenceInterval::Weekly),
        );
        bridge.save(&ledger).expect("save");

        let entries = bridge.storage().entries().unwrap();
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[CURRENCY_KEY], "EUR");
        assert_eq!(entries[TAX_RATE_KEY], "12.5");
        assert_eq!(entries[INCOME_KEY], "[]");
        assert!(entries[EXPENSES_KEY].contains("\"itemName\":\"Gym\""));
        assert_eq!(bridge.load(), ledger);
    }

    #[test]
    fn configured_default_currency_applies_only_when_missing() {
        let bridge = PersistenceBridge::new(MemoryStorage::new()).with_default_currency("GBP");
        assert_eq!(bridge.load().currency_label, "GBP");

        bridge.storage().set(CURRENCY_KEY, "JPY").unwrap();
        assert_eq!(bridge.load().currency_label, "JPY");
    }
}
