//! Command Context

use calc_core::CalcError;
use calc_history::HistoryStore;
use crate::PluginRegistry;
use std::fmt::Display;
use std::io::Write;

/// Everything a command plugin may touch while it runs
pub struct CommandContext<'a> {
    pub registry: &'a PluginRegistry,
    pub history: &'a mut HistoryStore,
    pub out: &'a mut dyn Write,
}

impl<'a> CommandContext<'a> {
    pub fn new(registry: &'a PluginRegistry, history: &'a mut HistoryStore, out: &'a mut dyn Write) -> Self {
        Self { registry, history, out }
    }

    /// Write one line to the session output
    pub fn say(&mut self, line: impl Display) -> Result<(), CalcError> {
        writeln!(self.out, "{}", line)?;
        Ok(())
    }
}
