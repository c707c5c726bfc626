mod args;
pub mod budget;
pub mod config;
pub mod data;
pub mod summary;
pub mod system;
pub mod transaction;

use crate::cli::registry::CommandRegistry;

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    let groups = [
        system::definitions(),
        transaction::definitions(),
        summary::definitions(),
        budget::definitions(),
        data::definitions(),
        config::definitions(),
    ];
    for entry in groups.into_iter().flatten() {
        registry.register(entry);
    }
}
