mod common;

use std::fs;

use saver_tracker::{ItemKind, KeyValueStorage, LineItemDraft, RecurrenceInterval};

use common::{reopen, setup_test_env};

#[test]
fn save_then_load_reproduces_the_ledger() {
    let (mut store, _) = setup_test_env();
    let salary = store
        .add_item(ItemKind::Income, LineItemDraft::new("Salary", 50000))
        .unwrap();
    store
        .add_item(
            ItemKind::Expense,
            LineItemDraft::new("Insurance", 600).with_interval(RecurrenceInterval::Custom(2)),
        )
        .unwrap();
    store.set_currency("EUR").unwrap();
    store.set_tax_rate(7.5).unwrap();

    let reopened = reopen(&store);
    assert!(reopened.load_warnings().is_empty());
    assert_eq!(reopened.snapshot(), store.snapshot());
    assert!(reopened.snapshot().item(ItemKind::Income, salary).is_some());
    assert_eq!(reopened.savings(), store.savings());
}

#[test]
fn storage_document_uses_the_four_keys() {
    let (mut store, _) = setup_test_env();
    store
        .add_item(ItemKind::Expense, LineItemDraft::new("Rent", 15000))
        .unwrap();

    let storage = store.bridge().storage();
    let raw = fs::read_to_string(storage.path()).expect("read storage document");
    let document: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
    for key in ["currency", "taxRate", "income", "expenses"] {
        assert!(document.get(key).is_some(), "missing `{key}`");
    }

    let expenses: serde_json::Value =
        serde_json::from_str(&storage.get("expenses").unwrap().unwrap()).unwrap();
    assert_eq!(expenses[0]["itemName"], "Rent");
    assert_eq!(expenses[0]["amount"], 15000.0);
    assert_eq!(expenses[0]["interval"], "Monthly");
}

#[test]
fn corrupt_key_falls_back_without_touching_the_others() {
    let (mut store, _) = setup_test_env();
    store
        .add_item(ItemKind::Income, LineItemDraft::new("Salary", 50000))
        .unwrap();
    store.set_tax_rate(10.0).unwrap();
    store
        .bridge()
        .storage()
        .set("expenses", "[{\"itemName\": 12")
        .unwrap();

    let reopened = reopen(&store);
    assert_eq!(reopened.load_warnings().len(), 1);
    assert!(reopened.snapshot().expense_items.is_empty());
    assert_eq!(reopened.snapshot().income_items.len(), 1);
    assert_eq!(reopened.snapshot().tax_rate_percent, 10.0);
}

#[test]
fn missing_storage_starts_from_defaults() {
    let (store, config_manager) = setup_test_env();
    assert!(store.snapshot().is_empty());
    assert_eq!(store.snapshot().currency_label, "PHP");
    assert_eq!(store.snapshot().tax_rate_percent, 0.0);
    assert!(!config_manager.config_path().exists());
}
