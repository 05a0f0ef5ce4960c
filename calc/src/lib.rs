//! Plugin-based command-line calculator
//!
//! `Calculator` ties the pieces together: a plugin registry, a dispatcher
//! that runs operations on an isolated worker, and the persisted history.
//! `Repl` drives a `Calculator` from line-oriented input.

mod dispatch;
mod repl;
mod worker;

pub use dispatch::{Dispatcher, Evaluation};
pub use repl::{LineSource, ReaderInput, Repl, WELCOME, PROMPT};
pub use worker::Worker;

use calc_core::{CalcError, Operand};
use calc_history::{HistoryEntry, HistoryStore};
use calc_plugin::{CommandContext, PluginRegistry};
use std::io::Write;
use std::sync::Arc;
use tracing::debug;

/// One calculator session
pub struct Calculator {
    registry: Arc<PluginRegistry>,
    dispatcher: Dispatcher,
    history: HistoryStore,
}

impl Calculator {
    pub fn new(registry: PluginRegistry, history: HistoryStore) -> Result<Self, CalcError> {
        let registry = Arc::new(registry);
        Ok(Self {
            dispatcher: Dispatcher::new(registry.clone())?,
            registry,
            history,
        })
    }

    /// Session over the built-in operations and commands
    pub fn with_standard_library(history: HistoryStore) -> Result<Self, CalcError> {
        Self::new(calc_std::standard_registry(), history)
    }

    pub fn registry(&self) -> &PluginRegistry {
        &self.registry
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Compute `name` over `args` and record the computation.
    ///
    /// Only two-operand computations fit a history entry; other arities
    /// are computed and logged but not recorded.
    pub fn compute(&mut self, name: &str, args: &[Operand]) -> Result<f64, CalcError> {
        let eval = self.dispatcher.evaluate(name, args)?;
        if let [a, b] = *eval.operands.as_slice() {
            let entry = HistoryEntry::new(eval.operation, a, b, eval.result);
            if !self.history.append(entry)? {
                debug!("computation already in history");
            }
        }
        Ok(eval.result)
    }

    /// Run the meta-command `name`, writing its output to `out`
    pub fn run_command(&mut self, name: &str, args: &[&str], out: &mut dyn Write) -> Result<(), CalcError> {
        let command = self
            .registry
            .get_command(name)
            .ok_or_else(|| CalcError::unsupported(name))?;
        let mut ctx = CommandContext::new(&self.registry, &mut self.history, out);
        command.execute(args, &mut ctx)
    }
}
