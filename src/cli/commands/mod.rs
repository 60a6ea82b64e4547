pub mod items;
pub mod settings;
pub mod system;

use crate::cli::registry::CommandRegistry;

pub fn register_all(registry: &mut CommandRegistry) {
    for entry in items::definitions()
        .into_iter()
        .chain(settings::definitions())
        .chain(system::definitions())
    {
        registry.register(entry);
    }
}
