//! Plugin-based calculator
//!
//! Reads configuration from the environment (and `.env`), loads operation
//! plugins from the plugin directory and the saved history, then runs the
//! interactive loop on the terminal.

mod config;
mod logging;
mod terminal;

use calc::{Calculator, Repl};
use calc_core::CalcError;
use calc_history::HistoryStore;
use calc_plugin::{PluginLoadError, PluginRegistry};
use config::Config;
use std::io::{self, ErrorKind};
use std::path::Path;
use terminal::Terminal;
use std::process::ExitCode;
use tracing::{debug, error, info, warn};

fn main() -> ExitCode {
    let dotenv = config::load_dotenv();
    let config = Config::from_env();
    let log_file = logging::init(&config);

    match dotenv {
        Ok(Some(path)) => debug!(path = %path.display(), "loaded .env"),
        Ok(None) => {}
        Err(e) => warn!(error = %e, "ignoring unreadable .env"),
    }

    info!("Application started in {} mode.", config.app_env);
    info!("Debug mode: {}", config.debug);
    debug!(?config, ?log_file, "configuration");

    match run(&config) {
        Ok(()) => {
            info!("Calculator session ended.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("An error occurred: {}", e);
            eprintln!("An error occurred: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> Result<(), CalcError> {
    info!("Starting the calculator.");

    let registry = load_plugins(&config.plugin_dir);
    let history = load_history(&config.history_file);
    let calculator = Calculator::new(registry, history)?;

    let terminal = Terminal::new()
        .map_err(|e| io::Error::new(ErrorKind::Other, format!("cannot open terminal: {}", e)))?;
    let stdout = io::stdout();
    Repl::new(calculator, terminal, stdout.lock()).run()?;
    Ok(())
}

fn load_plugins(dir: &Path) -> PluginRegistry {
    let mut registry = calc_std::load_commands(PluginRegistry::new());

    match registry.discover(dir, &calc_std::standard_catalog()) {
        Ok(report) => {
            for failed in &report.failed {
                println!("Failed to load plugin {}: {}", failed.dir, failed.error);
            }
            info!(plugins = ?report.loaded_names(), "plugins loaded");
        }
        Err(PluginLoadError::DirectoryNotFound(_)) => {
            println!("Plugin directory not found.");
        }
        Err(e) => {
            warn!(error = %e, "plugin discovery failed");
            println!("Error loading plugins: {}", e);
        }
    }

    if registry.operation_names().is_empty() {
        warn!("no operations available");
    }
    registry
}

fn load_history(path: &Path) -> HistoryStore {
    let mut history = HistoryStore::new(path);
    match history.load() {
        Ok(entries) => debug!(count = entries.len(), "history loaded"),
        Err(e) => {
            error!(error = %e, "history load failed");
            println!("Error loading history: {}", e);
        }
    }
    history
}

#[cfg(test)]
mod tests {
    use super::*;
    use calc_history::HistoryEntry;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_shipped_plugins_load() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../plugins");
        let registry = load_plugins(&dir);
        assert_eq!(
            registry.operation_names(),
            vec!["addition", "division", "multiplication", "subtraction"]
        );
        assert!(registry.has_command("menu"));
        assert!(registry.has_command("history"));
    }

    #[test]
    fn test_missing_plugin_directory_keeps_commands() {
        let dir = TempDir::new().unwrap();
        let registry = load_plugins(&dir.path().join("missing"));
        assert!(registry.is_empty());
        assert!(registry.has_command("menu"));
    }

    #[test]
    fn test_history_load_error_is_not_fatal() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.csv");
        fs::write(
            &path,
            "Operation,Operand 1,Operand 2,Result\naddition,1.0,1.0,2.0\nbroken\n",
        )
        .unwrap();

        let history = load_history(&path);
        assert_eq!(history.entries(), &[HistoryEntry::new("addition", 1.0, 1.0, 2.0)]);
    }
}
