//! Identifiers and enums shared by savings primitives.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identifier assigned to a line item when it is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(Uuid);

impl ItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// First eight hex digits, used by list views.
    pub fn short(&self) -> String {
        let mut short = self.0.simple().to_string();
        short.truncate(8);
        short
    }

    /// Returns true when `prefix` (hex, dashes ignored) starts this identifier.
    pub fn matches_prefix(&self, prefix: &str) -> bool {
        let needle: String = prefix
            .chars()
            .filter(|c| *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        !needle.is_empty() && self.0.simple().to_string().starts_with(&needle)
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ItemId {
    type Err = uuid::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(value.trim()).map(Self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Identifies which ledger collection an item belongs to.
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Income,
    Expense,
}

impl ItemKind {
    pub const ALL: [ItemKind; 2] = [ItemKind::Income, ItemKind::Expense];

    pub fn as_str(self) -> &'static str {
        match self {
            ItemKind::Income => "income",
            ItemKind::Expense => "expense",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemKind {
    type Err = ParseKindError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" | "incomes" => Ok(ItemKind::Income),
            "expense" | "expenses" => Ok(ItemKind::Expense),
            _ => Err(ParseKindError(value.trim().to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseKindError(pub String);

impl fmt::Display for ParseKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown item type `{}` (use income or expense)", self.0)
    }
}

impl std::error::Error for ParseKindError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Enumerates how often a line item recurs.
pub enum RecurrenceInterval {
    Daily,
    Weekly,
    #[default]
    Monthly,
    Yearly,
    /// Number of months between occurrences.
    Custom(u32),
}

impl RecurrenceInterval {
    /// Name used in the stored `interval` field.
    pub fn wire_name(self) -> &'static str {
        match self {
            RecurrenceInterval::Daily => "Daily",
            RecurrenceInterval::Weekly => "Weekly",
            RecurrenceInterval::Monthly => "Monthly",
            RecurrenceInterval::Yearly => "Yearly",
            RecurrenceInterval::Custom(_) => "Custom",
        }
    }

    pub fn custom_months(self) -> Option<u32> {
        match self {
            RecurrenceInterval::Custom(months) => Some(months),
            _ => None,
        }
    }

    pub fn label(self) -> String {
        match self {
            RecurrenceInterval::Custom(1) => "Every month".into(),
            RecurrenceInterval::Custom(months) => format!("Every {months} months"),
            other => other.wire_name().into(),
        }
    }
}

impl fmt::Display for RecurrenceInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl FromStr for RecurrenceInterval {
    type Err = ParseIntervalError;

    /// Accepts `daily`, `weekly`, `monthly`, `yearly` and `custom:<months>`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        let interval = match normalized.as_str() {
            "daily" => RecurrenceInterval::Daily,
            "weekly" => RecurrenceInterval::Weekly,
            "monthly" => RecurrenceInterval::Monthly,
            "yearly" | "annual" | "annually" => RecurrenceInterval::Yearly,
            other => {
                let months = other
                    .strip_prefix("custom")
                    .map(|rest| rest.trim_start_matches([':', '=', ' ']))
                    .ok_or_else(|| ParseIntervalError(value.trim().to_string()))?;
                let months = months
                    .parse::<u32>()
                    .map_err(|_| ParseIntervalError(value.trim().to_string()))?;
                RecurrenceInterval::Custom(months)
            }
        };
        Ok(interval)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIntervalError(pub String);

impl fmt::Display for ParseIntervalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown interval `{}` (use daily, weekly, monthly, yearly or custom:<months>)",
            self.0
        )
    }
}

impl std::error::Error for ParseIntervalError {}
