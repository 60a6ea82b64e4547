//! Currency display helpers: symbols, digit grouping and the shell's formatter.

use saver_core::CurrencyFormatter;

/// Currency codes offered by the shell, with their display symbols.
pub const CURRENCY_OPTIONS: [(&str, &str); 5] = [
    ("PHP", "₱"),
    ("USD", "$"),
    ("EUR", "€"),
    ("GBP", "£"),
    ("JPY", "¥"),
];

pub const DEFAULT_PRECISION: usize = 2;

/// Symbol for a known code; unknown labels display as themselves.
pub fn symbol_for(code: &str) -> &str {
    let trimmed = code.trim();
    for (known, symbol) in CURRENCY_OPTIONS.iter() {
        if known.eq_ignore_ascii_case(trimmed) {
            return symbol;
        }
    }
    trimmed
}

/// Formats `value` with `precision` decimals and comma-grouped thousands.
pub fn format_number(value: f64, precision: usize) -> String {
    let mut body = format!("{:.*}", precision, value);
    if let Some(pos) = body.find('.') {
        let mut int_part = body[..pos].to_string();
        insert_grouping(&mut int_part, ',');
        body = format!("{}{}", int_part, &body[pos..]);
    } else {
        insert_grouping(&mut body, ',');
    }
    body
}

fn insert_grouping(int_part: &mut String, separator: char) {
    if let Some(digits) = int_part.strip_prefix('-') {
        *int_part = format!("-{}", group_digits(digits, separator));
    } else {
        *int_part = group_digits(int_part, separator);
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::new();
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
    }
    grouped
}

/// Formats an amount as `<symbol><grouped value>`, e.g. `₱30,000.00`.
pub fn format_currency(amount: f64, code: &str, precision: usize) -> String {
    if !amount.is_finite() {
        return format!("{}n/a", symbol_for(code));
    }
    let body = format_number(amount.abs(), precision);
    let sign = if amount < 0.0 && body.chars().any(|c| c.is_ascii_digit() && c != '0') {
        "-"
    } else {
        ""
    };
    format!("{}{}{}", sign, symbol_for(code), body)
}

/// [`CurrencyFormatter`] that prefixes the currency symbol.
#[derive(Debug, Clone, Copy)]
pub struct SymbolCurrencyFormatter {
    precision: usize,
}

impl SymbolCurrencyFormatter {
    pub fn new(precision: usize) -> Self {
        Self { precision }
    }

    pub fn precision(&self) -> usize {
        self.precision
    }
}

impl Default for SymbolCurrencyFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_PRECISION)
    }
}

impl CurrencyFormatter for SymbolCurrencyFormatter {
    fn format_amount(&self, amount: f64, currency: &str) -> String {
        format_currency(amount, currency, self.precision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_map_to_symbols() {
        assert_eq!(symbol_for("PHP"), "₱");
        assert_eq!(symbol_for("eur"), "€");
        assert_eq!(symbol_for("Doubloons"), "Doubloons");
    }

    #[test]
    fn numbers_are_grouped_by_thousands() {
        assert_eq!(format_number(1234567.891, 2), "1,234,567.89");
        assert_eq!(format_number(999.0, 0), "999");
        assert_eq!(format_number(-1500.5, 1), "-1,500.5");
    }

    #[test]
    fn formatter_prefixes_symbol() {
        let formatter = SymbolCurrencyFormatter::default();
        assert_eq!(formatter.format_amount(30000.0, "PHP"), "₱30,000.00");
        assert_eq!(formatter.format_amount(-12.5, "USD"), "-$12.50");
        assert_eq!(formatter.format_amount(-0.001, "USD"), "$0.00");
        assert_eq!(SymbolCurrencyFormatter::new(0).format_amount(1200.0, "JPY"), "¥1,200");
    }
}
