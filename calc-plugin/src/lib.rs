//! Calculator Plugin System
//!
//! Provides traits for extending the calculator with custom:
//! - Operations (pure two-operand arithmetic)
//! - Commands (menu, history and other side effects)
//!
//! and the registry that maps names to them, filled either in code or by
//! scanning a plugin directory.

mod traits;
mod registry;
mod context;
mod catalog;
mod discovery;

pub use traits::{
    OperationPlugin, OperationMeta,
    CommandPlugin, CommandMeta,
    ArgMeta, UsageLine,
};
pub use registry::PluginRegistry;
pub use context::CommandContext;
pub use catalog::PluginCatalog;
pub use discovery::{
    PluginManifest, PluginLoadError, DiscoveryReport, LoadedPlugin, FailedPlugin,
    PLUGIN_API_VERSION, MANIFEST_FILE,
};

/// Re-export core types for plugin authors
pub mod prelude {
    pub use crate::{
        OperationPlugin, OperationMeta,
        CommandPlugin, CommandMeta,
        ArgMeta, UsageLine, PluginRegistry, CommandContext,
    };
    pub use calc_core::prelude::*;
}
