use std::fs;

use saver_core::{
    persistence::{CURRENCY_KEY, TAX_RATE_KEY},
    KeyValueStorage, LedgerStore, PersistenceBridge,
};
use saver_domain::{ItemKind, LineItemDraft, RecurrenceInterval};
use saver_storage_json::{JsonKeyValueStorage, STORAGE_FILE_NAME};
use tempfile::tempdir;

#[test]
fn json_storage_sets_gets_and_removes_keys() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonKeyValueStorage::in_dir(dir.path().join("storage")).expect("create storage");

    assert_eq!(storage.get("currency").unwrap(), None);
    storage.set("currency", "USD").expect("set currency");
    storage.set("taxRate", "7.5").expect("set tax");
    assert_eq!(storage.get("currency").unwrap().as_deref(), Some("USD"));
    assert_eq!(storage.keys().unwrap(), vec!["currency", "taxRate"]);

    storage.remove("currency").expect("remove");
    assert_eq!(storage.get("currency").unwrap(), None);
    assert_eq!(
        storage.path().file_name().and_then(|name| name.to_str()),
        Some(STORAGE_FILE_NAME)
    );
    assert!(!storage.path().with_extension("json.tmp").exists());
}

#[test]
fn json_storage_round_trips_a_ledger_through_the_bridge() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonKeyValueStorage::in_dir(dir.path()).expect("create storage");
    let mut store = LedgerStore::open(PersistenceBridge::new(storage.clone()));
    store
        .add_item(ItemKind::Income, LineItemDraft::new("Salary", 50000))
        .unwrap();
    store
        .add_item(
            ItemKind::Expense,
            LineItemDraft::new("Groceries", 1500).with_interval(RecurrenceInterval::Weekly),
        )
        .unwrap();
    store.set_tax_rate(10.0).unwrap();
    store.set_currency("GBP").unwrap();

    let reopened = LedgerStore::open(PersistenceBridge::new(storage));
    assert!(reopened.load_warnings().is_empty());
    assert_eq!(reopened.snapshot(), store.snapshot());
    assert_eq!(reopened.savings().monthly_savings, 39000.0);
}

#[test]
fn json_storage_reads_values_written_by_earlier_revisions() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join(STORAGE_FILE_NAME);
    let document = serde_json::json!({
        "currency": "USD",
        "income": r#"[{"itemName":"Salary","amount":3000}]"#,
        "expenses": r#"[{"itemName":"Rent","amount":-1200}]"#,
    });
    fs::write(&path, document.to_string()).expect("write legacy document");

    let storage = JsonKeyValueStorage::at_path(&path).expect("open storage");
    let restored = PersistenceBridge::new(storage).restore();
    assert!(restored.is_clean());
    let ledger = restored.ledger;
    assert_eq!(ledger.currency_label, "USD");
    assert_eq!(ledger.tax_rate_percent, 0.0);
    assert_eq!(ledger.income_items[0].item_name, "Salary");
    assert_eq!(ledger.expense_items[0].amount, 1200.0);
}

#[test]
fn unreadable_document_loads_defaults_and_is_replaced_on_write() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonKeyValueStorage::in_dir(dir.path()).expect("create storage");
    fs::write(storage.path(), "{ this is not json").expect("write garbage");

    let mut store = LedgerStore::open(PersistenceBridge::new(storage.clone()));
    assert_eq!(store.load_warnings().len(), 4);
    assert!(store.snapshot().is_empty());
    assert_eq!(store.snapshot().currency_label, "PHP");

    store.set_currency("EUR").expect("write after corruption");
    assert_eq!(storage.get(CURRENCY_KEY).unwrap().as_deref(), Some("EUR"));
    assert_eq!(storage.get(TAX_RATE_KEY).unwrap().as_deref(), Some("0"));
    assert!(storage.path().with_extension("json.corrupt").exists());
}
