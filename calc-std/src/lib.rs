//! Calculator Standard Library

pub mod operations;
pub mod commands;

use calc_plugin::{PluginCatalog, PluginRegistry};

/// Load the meta-commands (`menu`, `history`) into registry
pub fn load_commands(registry: PluginRegistry) -> PluginRegistry {
    registry
        .with_command(commands::Menu)
        .with_command(commands::History)
}

/// Load standard library into registry
pub fn load_standard_library(registry: PluginRegistry) -> PluginRegistry {
    load_commands(registry)
        .with_operation(operations::Addition)
        .with_operation(operations::Subtraction)
        .with_operation(operations::Multiplication)
        .with_operation(operations::Division)
}

/// Create registry with standard library
pub fn standard_registry() -> PluginRegistry {
    load_standard_library(PluginRegistry::new())
}

/// Entry points that `plugin.json` manifests may name
pub fn standard_catalog() -> PluginCatalog {
    PluginCatalog::new()
        .with_operation::<operations::Addition>("add")
        .with_operation::<operations::Subtraction>("subtract")
        .with_operation::<operations::Multiplication>("multiply")
        .with_operation::<operations::Division>("divide")
}
