//! Stored JSON shape of a line item.
//!
//! `{ "id"?, "itemName", "amount", "interval"?, "customInterval"? }`. Records written
//! by earlier revisions may lack `id` and `interval`, may hold the amount as text,
//! or may hold `null` where a NaN was serialized.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    common::{ItemId, RecurrenceInterval},
    item::LineItem,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ItemId>,
    pub item_name: String,
    #[serde(default)]
    pub amount: Option<StoredNumber>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_interval: Option<StoredNumber>,
}

/// A numeric field that may have been stored as a number or as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredNumber {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl StoredNumber {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            StoredNumber::Integer(value) => Some(*value as f64),
            StoredNumber::Float(value) => Some(*value),
            StoredNumber::Text(raw) => raw.trim().parse::<f64>().ok(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Errors raised when a stored record cannot become a [`LineItem`].
pub enum RecordError {
    UnknownInterval(String),
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::UnknownInterval(name) => write!(f, "unknown interval `{name}`"),
        }
    }
}

impl std::error::Error for RecordError {}

impl TryFrom<LineItemRecord> for LineItem {
    type Error = RecordError;

    fn try_from(record: LineItemRecord) -> Result<Self, Self::Error> {
        let amount = record
            .amount
            .as_ref()
            .and_then(StoredNumber::as_f64)
            .map(f64::abs)
            .unwrap_or(f64::NAN);
        let interval = decode_interval(record.interval.as_deref(), record.custom_interval.as_ref())?;
        Ok(LineItem {
            id: record.id.unwrap_or_default(),
            item_name: record.item_name,
            amount,
            interval,
        })
    }
}

impl From<LineItem> for LineItemRecord {
    fn from(item: LineItem) -> Self {
        let amount = if item.amount.is_finite() {
            Some(StoredNumber::Float(item.amount))
        } else {
            None
        };
        Self {
            id: Some(item.id),
            item_name: item.item_name,
            amount,
            interval: Some(item.interval.wire_name().to_string()),
            custom_interval: item
                .interval
                .custom_months()
                .map(|months| StoredNumber::Integer(i64::from(months))),
        }
    }
}

fn decode_interval(
    name: Option<&str>,
    custom: Option<&StoredNumber>,
) -> Result<RecurrenceInterval, RecordError> {
    let Some(name) = name else {
        return Ok(RecurrenceInterval::Monthly);
    };
    match name.trim() {
        "" | "Monthly" => Ok(RecurrenceInterval::Monthly),
        "Daily" => Ok(RecurrenceInterval::Daily),
        "Weekly" => Ok(RecurrenceInterval::Weekly),
        "Yearly" => Ok(RecurrenceInterval::Yearly),
        "Custom" => {
            // A missing or non-positive month count falls back to one month.
            let months = custom
                .and_then(StoredNumber::as_f64)
                .filter(|value| value.is_finite() && *value >= 1.0 && *value <= u32::MAX as f64)
                .map(|value| value.trunc() as u32)
                .unwrap_or(1);
            Ok(RecurrenceInterval::Custom(months))
        }
        other => Err(RecordError::UnknownInterval(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_record_without_id_or_interval_as_monthly() {
        let item: LineItem =
            serde_json::from_str(r#"{"itemName":"Salary","amount":50000}"#).unwrap();
        assert_eq!(item.item_name, "Salary");
        assert_eq!(item.amount, 50000.0);
        assert_eq!(item.interval, RecurrenceInterval::Monthly);
    }

    #[test]
    fn decodes_text_null_and_negative_amounts() {
        let text: LineItem =
            serde_json::from_str(r#"{"itemName":"Gift","amount":"250.5"}"#).unwrap();
        assert_eq!(text.amount, 250.5);

        let null: LineItem = serde_json::from_str(r#"{"itemName":"Broken","amount":null}"#).unwrap();
        assert!(!null.has_finite_amount());

        let negated: LineItem =
            serde_json::from_str(r#"{"itemName":"Rent","amount":-15000}"#).unwrap();
        assert_eq!(negated.amount, 15000.0);
    }

    #[test]
    fn custom_interval_without_months_falls_back_to_one() {
        let item: LineItem = serde_json::from_str(
            r#"{"itemName":"Insurance","amount":1200,"interval":"Custom"}"#,
        )
        .unwrap();
        assert_eq!(item.interval, RecurrenceInterval::Custom(1));

        let item: LineItem = serde_json::from_str(
            r#"{"itemName":"Insurance","amount":1200,"interval":"Custom","customInterval":3}"#,
        )
        .unwrap();
        assert_eq!(item.interval, RecurrenceInterval::Custom(3));
    }

    #[test]
    fn unknown_interval_is_rejected() {
        let err = serde_json::from_str::<LineItem>(
            r#"{"itemName":"Odd","amount":1,"interval":"Hourly"}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Hourly"), "unexpected error: {err}");
    }

    #[test]
    fn encodes_identifier_and_custom_months() {
        let item = LineItem::new("Tuition", 3000.0, RecurrenceInterval::Custom(6));
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["id"], item.id.to_string());
        assert_eq!(json["itemName"], "Tuition");
        assert_eq!(json["interval"], "Custom");
        assert_eq!(json["customInterval"], 6);
        assert_eq!(json["amount"].as_f64(), Some(3000.0));
    }
}
