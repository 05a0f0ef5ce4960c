//! Compiled-in plugin catalog
//!
//! Plugin manifests name an entry point; the catalog maps that name to a
//! factory for an implementation linked into the binary.

use crate::OperationPlugin;
use std::collections::HashMap;
use std::sync::Arc;

type Factory = Box<dyn Fn() -> Arc<dyn OperationPlugin> + Send + Sync>;

/// Entry-point name -> operation factory
#[derive(Default)]
pub struct PluginCatalog {
    factories: HashMap<String, Factory>,
}

impl PluginCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_operation<O: OperationPlugin + Default + 'static>(mut self, entry: &str) -> Self {
        self.factories.insert(
            entry.to_lowercase(),
            Box::new(|| Arc::new(O::default()) as Arc<dyn OperationPlugin>),
        );
        self
    }

    /// Build a fresh instance for `entry`, `None` if nothing is linked under that name
    pub fn instantiate(&self, entry: &str) -> Option<Arc<dyn OperationPlugin>> {
        self.factories.get(&entry.to_lowercase()).map(|factory| factory())
    }

    /// Known entry points, sorted
    pub fn entries(&self) -> Vec<&str> {
        let mut entries: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        entries.sort_unstable();
        entries
    }
}
