use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Stores user-configurable shell preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_currency_value")]
    pub currency: String,
    #[serde(default = "Config::default_currency_options")]
    pub currency_options: Vec<String>,
    #[serde(default = "Config::default_currency_precision")]
    pub currency_precision: u8,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
    #[serde(default = "Config::default_log_filter")]
    pub log_filter: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional storage directory. Defaults to `<base>/storage`.
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: Self::default_currency_value(),
            currency_options: Self::default_currency_options(),
            currency_precision: Self::default_currency_precision(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            log_filter: Self::default_log_filter(),
            data_dir: None,
        }
    }
}

impl Config {
    pub const MAX_CURRENCY_PRECISION: u8 = 6;

    pub fn default_currency_value() -> String {
        "PHP".into()
    }

    pub fn default_currency_options() -> Vec<String> {
        ["PHP", "USD", "EUR", "GBP", "JPY"]
            .iter()
            .map(|code| code.to_string())
            .collect()
    }

    pub fn default_currency_precision() -> u8 {
        2
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn default_log_filter() -> String {
        "saver_tracker=info".into()
    }

    /// Precision clamped to a displayable range.
    pub fn effective_precision(&self) -> usize {
        usize::from(self.currency_precision.min(Self::MAX_CURRENCY_PRECISION))
    }

    /// The configured option matching `code` case-insensitively.
    pub fn currency_option(&self, code: &str) -> Option<&str> {
        self.currency_options
            .iter()
            .find(|option| option.eq_ignore_ascii_case(code.trim()))
            .map(String::as_str)
    }

    pub fn resolve_data_dir(&self, base: &Path) -> PathBuf {
        match &self.data_dir {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => base.join(path),
            None => base.join("storage"),
        }
    }
}
