//! Normalizes line items to a monthly basis and derives the savings figure.

use saver_domain::{ItemKind, Ledger, LineItem, RecurrenceInterval};

pub const DAYS_PER_MONTH: f64 = 30.0;
pub const WEEKS_PER_MONTH: f64 = 4.0;
pub const MONTHS_PER_YEAR: f64 = 12.0;

/// Figures derived from a ledger, each rounded to two decimal places.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedSavings {
    pub income_total: f64,
    pub expense_total: f64,
    pub tax_amount: f64,
    pub monthly_savings: f64,
}

impl DerivedSavings {
    pub fn total_for(&self, kind: ItemKind) -> f64 {
        match kind {
            ItemKind::Income => self.income_total,
            ItemKind::Expense => self.expense_total,
        }
    }
}

/// Stateless savings calculator.
pub struct SavingsService;

impl SavingsService {
    /// Monthly-equivalent amount for one item. Non-finite amounts contribute 0.
    ///
    /// `Custom(n)` multiplies by `n`, matching the stored data's historical meaning.
    pub fn normalize(item: &LineItem) -> f64 {
        if !item.amount.is_finite() {
            return 0.0;
        }
        match item.interval {
            RecurrenceInterval::Daily => item.amount * DAYS_PER_MONTH,
            RecurrenceInterval::Weekly => item.amount * WEEKS_PER_MONTH,
            RecurrenceInterval::Monthly => item.amount,
            RecurrenceInterval::Yearly => item.amount / MONTHS_PER_YEAR,
            RecurrenceInterval::Custom(months) => item.amount * f64::from(months),
        }
    }

    /// Sum of normalized amounts, added in ascending order so the result does not
    /// depend on the collection's order.
    pub fn total_monthly(items: &[LineItem]) -> f64 {
        let mut normalized: Vec<f64> = items.iter().map(Self::normalize).collect();
        normalized.sort_by(f64::total_cmp);
        normalized.into_iter().fold(0.0, |total, value| total + value)
    }

    pub fn compute(ledger: &Ledger) -> DerivedSavings {
        let raw = Self::unrounded(ledger);
        DerivedSavings {
            income_total: round_currency(raw.income_total),
            expense_total: round_currency(raw.expense_total),
            tax_amount: round_currency(raw.tax_amount),
            monthly_savings: round_currency(raw.monthly_savings),
        }
    }

    /// True when every figure of [`SavingsService::compute`] is representable, i.e.
    /// no total overflowed to infinity.
    pub fn is_representable(ledger: &Ledger) -> bool {
        let raw = Self::unrounded(ledger);
        [
            raw.income_total,
            raw.expense_total,
            raw.tax_amount,
            raw.monthly_savings,
        ]
        .iter()
        .all(|value| value.is_finite())
    }

    fn unrounded(ledger: &Ledger) -> DerivedSavings {
        let income = Self::total_monthly(&ledger.income_items);
        let expenses = Self::total_monthly(&ledger.expense_items);
        let rate = if ledger.tax_rate_percent.is_finite() {
            ledger.tax_rate_percent
        } else {
            0.0
        };
        let tax = income * rate / 100.0;
        DerivedSavings {
            income_total: income,
            expense_total: expenses,
            tax_amount: tax,
            monthly_savings: income - expenses - tax,
        }
    }

    pub fn compute_savings(ledger: &Ledger) -> f64 {
        Self::compute(ledger).monthly_savings
    }
}

/// Rounds to two decimal places, halves away from zero. Never returns `-0.0`.
pub fn round_currency(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(amount: f64, interval: RecurrenceInterval) -> LineItem {
        LineItem::new("item", amount, interval)
    }

    #[test]
    fn normalizes_each_interval() {
        assert_eq!(
            SavingsService::normalize(&item(100.0, RecurrenceInterval::Daily)),
            3000.0
        );
        assert_eq!(
            SavingsService::normalize(&item(250.0, RecurrenceInterval::Weekly)),
            1000.0
        );
        assert_eq!(
            SavingsService::normalize(&item(800.0, RecurrenceInterval::Monthly)),
            800.0
        );
        assert_eq!(
            SavingsService::normalize(&item(12000.0, RecurrenceInterval::Yearly)),
            1000.0
        );
    }

    #[test]
    fn custom_interval_multiplies_by_month_count() {
        assert_eq!(
            SavingsService::normalize(&item(500.0, RecurrenceInterval::Custom(3))),
            1500.0
        );
        assert_eq!(
            SavingsService::normalize(&item(500.0, RecurrenceInterval::Custom(1))),
            500.0
        );
    }

    #[test]
    fn non_finite_amounts_contribute_zero() {
        let items = vec![
            item(f64::NAN, RecurrenceInterval::Monthly),
            item(f64::INFINITY, RecurrenceInterval::Daily),
            item(40.0, RecurrenceInterval::Monthly),
        ];
        assert_eq!(SavingsService::normalize(&items[0]), 0.0);
        assert_eq!(SavingsService::total_monthly(&items), 40.0);
    }

    #[test]
    fn empty_collection_totals_positive_zero() {
        let total = SavingsService::total_monthly(&[]);
        assert_eq!(total, 0.0);
        assert!(total.is_sign_positive());
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        assert_eq!(round_currency(0.125), 0.13);
        assert_eq!(round_currency(0.375), 0.38);
        assert_eq!(round_currency(-2.5), -2.5);
        assert_eq!(round_currency(-0.125), -0.13);
        assert_eq!(round_currency(1000.0 / 3.0), 333.33);
        assert!(round_currency(-0.001).is_sign_positive());
        assert_eq!(round_currency(f64::NAN), 0.0);
    }
}
