//! Plugin discovery
//!
//! A plugin directory holds one subdirectory per operation. Each
//! subdirectory carries a `plugin.json` manifest:
//!
//! ```json
//! { "api_version": 1, "entry": "add", "name": "addition" }
//! ```
//!
//! `entry` selects an implementation from the [`PluginCatalog`]; `name` is
//! the registry name and defaults to the subdirectory name. A broken plugin
//! is skipped and reported; it never stops the others from loading.

use crate::{OperationPlugin, PluginCatalog, PluginRegistry};
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Manifest format understood by this build
pub const PLUGIN_API_VERSION: u32 = 1;

/// Manifest file expected in every plugin subdirectory
pub const MANIFEST_FILE: &str = "plugin.json";

/// Contents of `plugin.json`
#[derive(Debug, Clone, Deserialize)]
pub struct PluginManifest {
    pub api_version: u32,
    pub entry: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Error)]
pub enum PluginLoadError {
    #[error("Plugin directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("Failed to scan plugin directory '{}': {source}", path.display())]
    Scan {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("missing plugin.json")]
    MissingManifest,

    #[error("cannot read plugin.json: {0}")]
    ManifestUnreadable(#[source] std::io::Error),

    #[error("invalid plugin.json: {0}")]
    InvalidManifest(#[from] serde_json::Error),

    #[error("unsupported api_version {found} (expected {expected})")]
    UnsupportedApiVersion { found: u32, expected: u32 },

    #[error("unknown entry point '{0}'")]
    UnknownEntryPoint(String),
}

/// A plugin that loaded
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedPlugin {
    pub dir: String,
    pub name: String,
}

/// A plugin that did not
#[derive(Debug)]
pub struct FailedPlugin {
    pub dir: String,
    pub error: PluginLoadError,
}

/// Outcome of scanning one plugin directory
#[derive(Debug, Default)]
pub struct DiscoveryReport {
    pub loaded: Vec<LoadedPlugin>,
    pub failed: Vec<FailedPlugin>,
}

impl DiscoveryReport {
    pub fn loaded_names(&self) -> Vec<&str> {
        self.loaded.iter().map(|p| p.name.as_str()).collect()
    }
}

impl PluginRegistry {
    /// Scan the immediate subdirectories of `dir` and register every plugin
    /// that loads. Subdirectories are visited in name order, so when two
    /// manifests claim the same name the later one wins.
    ///
    /// A subdirectory that fails to load leaves no entry behind: any
    /// registration under its directory name is removed.
    pub fn discover(&mut self, dir: &Path, catalog: &PluginCatalog) -> Result<DiscoveryReport, PluginLoadError> {
        if !dir.is_dir() {
            warn!(path = %dir.display(), "Plugin directory not found.");
            return Err(PluginLoadError::DirectoryNotFound(dir.to_path_buf()));
        }

        let mut subdirs: Vec<PathBuf> = fs::read_dir(dir)
            .map_err(|source| PluginLoadError::Scan { path: dir.to_path_buf(), source })?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .collect();
        subdirs.sort();

        let mut report = DiscoveryReport::default();
        for path in subdirs {
            let Some(dir_name) = path.file_name().and_then(|n| n.to_str()).map(str::to_string) else {
                warn!(path = %path.display(), "skipping plugin directory with non UTF-8 name");
                continue;
            };

            match load_plugin(&path, &dir_name, catalog) {
                Ok((name, op)) => {
                    if self.register(&name, op).is_some() {
                        debug!(plugin = %name, "replaced existing registration");
                    }
                    info!(plugin = %name, dir = %dir_name, "plugin loaded");
                    report.loaded.push(LoadedPlugin { dir: dir_name, name });
                }
                Err(error) => {
                    if self.remove(&dir_name).is_some() {
                        debug!(plugin = %dir_name, "removed stale registration");
                    }
                    warn!(plugin = %dir_name, %error, "Failed to load plugin");
                    report.failed.push(FailedPlugin { dir: dir_name, error });
                }
            }
        }

        Ok(report)
    }
}

fn load_plugin(
    path: &Path,
    dir_name: &str,
    catalog: &PluginCatalog,
) -> Result<(String, Arc<dyn OperationPlugin>), PluginLoadError> {
    let raw = match fs::read_to_string(path.join(MANIFEST_FILE)) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => return Err(PluginLoadError::MissingManifest),
        Err(e) => return Err(PluginLoadError::ManifestUnreadable(e)),
    };

    let manifest: PluginManifest = serde_json::from_str(&raw)?;
    if manifest.api_version != PLUGIN_API_VERSION {
        return Err(PluginLoadError::UnsupportedApiVersion {
            found: manifest.api_version,
            expected: PLUGIN_API_VERSION,
        });
    }

    let op = catalog
        .instantiate(&manifest.entry)
        .ok_or_else(|| PluginLoadError::UnknownEntryPoint(manifest.entry.clone()))?;
    let name = manifest
        .name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| dir_name.to_string());
    Ok((name, op))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ArgMeta, OperationMeta};
    use calc_core::CalcError;
    use tempfile::TempDir;

    static ARGS: [ArgMeta; 2] = [ArgMeta::number("a", "first"), ArgMeta::number("b", "second")];

    #[derive(Default)]
    struct Plus;

    impl OperationPlugin for Plus {
        fn meta(&self) -> OperationMeta {
            OperationMeta { name: "plus", symbol: "+", description: "a + b", args: &ARGS, examples: &[] }
        }

        fn evaluate(&self, a: f64, b: f64) -> Result<f64, CalcError> {
            Ok(a + b)
        }
    }

    fn catalog() -> PluginCatalog {
        PluginCatalog::new().with_operation::<Plus>("plus")
    }

    fn plugin(root: &TempDir, dir: &str, manifest: Option<&str>) {
        let path = root.path().join(dir);
        fs::create_dir_all(&path).unwrap();
        if let Some(m) = manifest {
            fs::write(path.join(MANIFEST_FILE), m).unwrap();
        }
    }

    #[test]
    fn test_missing_directory_is_reported_not_fatal() {
        let root = TempDir::new().unwrap();
        let mut registry = PluginRegistry::new();
        let err = registry.discover(&root.path().join("nope"), &catalog()).unwrap_err();
        assert!(matches!(err, PluginLoadError::DirectoryNotFound(_)));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_empty_directory() {
        let root = TempDir::new().unwrap();
        let mut registry = PluginRegistry::new();
        let report = registry.discover(root.path(), &catalog()).unwrap();
        assert!(report.loaded.is_empty());
        assert!(report.failed.is_empty());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_one_good_one_bad() {
        let root = TempDir::new().unwrap();
        plugin(&root, "addition", Some(r#"{"api_version": 1, "entry": "plus"}"#));
        plugin(&root, "bad_plugin", None);

        let mut registry = PluginRegistry::new();
        let report = registry.discover(root.path(), &catalog()).unwrap();

        assert_eq!(report.loaded_names(), vec!["addition"]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].dir, "bad_plugin");
        assert!(matches!(report.failed[0].error, PluginLoadError::MissingManifest));
        assert_eq!(registry.operation_names(), vec!["addition"]);
        assert_eq!(registry.lookup("addition").unwrap().evaluate(2.0, 3.0).unwrap(), 5.0);
    }

    #[test]
    fn test_failed_plugin_removes_stale_entry() {
        let root = TempDir::new().unwrap();
        plugin(&root, "test_plugin", Some("{ not json"));

        let mut registry = PluginRegistry::new().with_operation(Plus);
        registry.register("test_plugin", Arc::new(Plus));

        let report = registry.discover(root.path(), &catalog()).unwrap();
        assert!(matches!(report.failed[0].error, PluginLoadError::InvalidManifest(_)));
        assert!(!registry.has_operation("test_plugin"));
        assert!(registry.has_operation("plus"));
    }

    #[test]
    fn test_manifest_errors() {
        let root = TempDir::new().unwrap();
        plugin(&root, "future", Some(r#"{"api_version": 2, "entry": "plus"}"#));
        plugin(&root, "unknown", Some(r#"{"api_version": 1, "entry": "warp"}"#));

        let mut registry = PluginRegistry::new();
        let report = registry.discover(root.path(), &catalog()).unwrap();
        assert!(registry.is_empty());
        assert!(matches!(
            report.failed[0].error,
            PluginLoadError::UnsupportedApiVersion { found: 2, expected: 1 }
        ));
        assert!(matches!(&report.failed[1].error, PluginLoadError::UnknownEntryPoint(e) if e == "warp"));
    }

    #[test]
    fn test_manifest_name_overrides_directory() {
        let root = TempDir::new().unwrap();
        plugin(&root, "add", Some(r#"{"api_version": 1, "entry": "plus", "name": "addition"}"#));

        let mut registry = PluginRegistry::new();
        let report = registry.discover(root.path(), &catalog()).unwrap();
        assert_eq!(report.loaded, vec![LoadedPlugin { dir: "add".into(), name: "addition".into() }]);
        assert!(registry.has_operation("addition"));
        assert!(!registry.has_operation("add"));
    }

    #[test]
    fn test_plain_files_are_ignored() {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join("README"), "not a plugin").unwrap();
        plugin(&root, "plus", Some(r#"{"api_version": 1, "entry": "plus"}"#));

        let mut registry = PluginRegistry::new();
        let report = registry.discover(root.path(), &catalog()).unwrap();
        assert_eq!(report.loaded_names(), vec!["plus"]);
        assert!(report.failed.is_empty());
    }
}
