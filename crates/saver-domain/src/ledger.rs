//! Ledger aggregate holding both item collections and the display settings.

use std::cmp::Ordering;

use crate::{common::*, item::LineItem};

/// Currency label used when nothing has been stored yet.
pub const DEFAULT_CURRENCY: &str = "PHP";

#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
    pub income_items: Vec<LineItem>,
    pub expense_items: Vec<LineItem>,
    pub currency_label: String,
    pub tax_rate_percent: f64,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new(DEFAULT_CURRENCY)
    }
}

impl Ledger {
    pub fn new(currency_label: impl Into<String>) -> Self {
        Self {
            income_items: Vec::new(),
            expense_items: Vec::new(),
            currency_label: currency_label.into(),
            tax_rate_percent: 0.0,
        }
    }

    pub fn items(&self, kind: ItemKind) -> &[LineItem] {
        match kind {
            ItemKind::Income => &self.income_items,
            ItemKind::Expense => &self.expense_items,
        }
    }

    pub fn items_mut(&mut self, kind: ItemKind) -> &mut Vec<LineItem> {
        match kind {
            ItemKind::Income => &mut self.income_items,
            ItemKind::Expense => &mut self.expense_items,
        }
    }

    pub fn item(&self, kind: ItemKind, id: ItemId) -> Option<&LineItem> {
        self.items(kind).iter().find(|item| item.id == id)
    }

    pub fn item_mut(&mut self, kind: ItemKind, id: ItemId) -> Option<&mut LineItem> {
        self.items_mut(kind).iter_mut().find(|item| item.id == id)
    }

    pub fn push_item(&mut self, kind: ItemKind, item: LineItem) -> ItemId {
        let id = item.id;
        self.items_mut(kind).push(item);
        id
    }

    pub fn remove_item(&mut self, kind: ItemKind, id: ItemId) -> Option<LineItem> {
        let items = self.items_mut(kind);
        let index = items.iter().position(|item| item.id == id)?;
        Some(items.remove(index))
    }

    pub fn item_count(&self) -> usize {
        self.income_items.len() + self.expense_items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.item_count() == 0
    }

    /// Render order for a collection: descending by amount, non-finite amounts last.
    pub fn items_by_amount_desc(&self, kind: ItemKind) -> Vec<&LineItem> {
        let mut sorted: Vec<&LineItem> = self.items(kind).iter().collect();
        sorted.sort_by(|a, b| descending_amount(a.amount, b.amount));
        sorted
    }

    /// Items in `kind` whose identifier starts with `prefix`.
    pub fn find_by_prefix(&self, kind: ItemKind, prefix: &str) -> Vec<&LineItem> {
        self.items(kind)
            .iter()
            .filter(|item| item.id.matches_prefix(prefix))
            .collect()
    }
}

fn descending_amount(a: f64, b: f64) -> Ordering {
    match (a.is_finite(), b.is_finite()) {
        (true, true) => b.total_cmp(&a),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => Ordering::Equal,
    }
}
