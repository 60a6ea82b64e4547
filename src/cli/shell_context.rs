use dialoguer::theme::ColorfulTheme;
use saver_config::{Config, ConfigManager};
use saver_core::{LedgerStore, PersistenceBridge};
use saver_storage_json::JsonKeyValueStorage;
use tracing::info;

use crate::cli::{commands, io as cli_io, output};
use crate::currency::SymbolCurrencyFormatter;
use crate::errors::CliError;

use super::registry::{CommandEntry, CommandRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

/// Everything a command handler can reach: the ledger store, preferences and output helpers.
pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub store: LedgerStore<JsonKeyValueStorage>,
    pub config: Config,
    pub formatter: SymbolCurrencyFormatter,
    pub theme: ColorfulTheme,
    pub running: bool,
}

impl ShellContext {
    /// Builds a context whose storage lives under `config_manager`'s base directory.
    pub fn from_parts(
        mode: CliMode,
        config_manager: &ConfigManager,
        config: Config,
    ) -> Result<Self, CliError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        output::set_color_enabled(config.ui_color_enabled);

        let data_dir = config_manager.data_dir(&config);
        let storage = JsonKeyValueStorage::in_dir(&data_dir)?;
        info!(path = %storage.path().display(), "opening ledger storage");
        let bridge = PersistenceBridge::new(storage).with_default_currency(config.currency.clone());
        let store = LedgerStore::open(bridge);
        for warning in store.load_warnings() {
            cli_io::print_warning(format!("{warning}; using the default instead."));
        }

        Ok(Self {
            mode,
            registry,
            store,
            formatter: SymbolCurrencyFormatter::new(config.effective_precision()),
            config,
            theme: ColorfulTheme::default(),
            running: true,
        })
    }

    pub fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub fn prompt(&self) -> String {
        format!("saver [{}]> ", self.store.snapshot().currency_label)
    }
}
