//! Plugin traits

use calc_core::CalcError;
use crate::CommandContext;
use serde::Serialize;

/// Metadata about an operand
#[derive(Debug, Clone, Serialize)]
pub struct ArgMeta {
    pub name: &'static str,
    pub typ: &'static str,
    pub description: &'static str,
}

impl ArgMeta {
    pub const fn number(name: &'static str, description: &'static str) -> Self {
        Self { name, typ: "Number", description }
    }
}

/// Metadata for an operation plugin
#[derive(Debug, Clone, Serialize)]
pub struct OperationMeta {
    pub name: &'static str,
    /// Infix symbol used when logging the computed expression
    pub symbol: &'static str,
    pub description: &'static str,
    pub args: &'static [ArgMeta],
    pub examples: &'static [&'static str],
}

/// Pure two-operand arithmetic
pub trait OperationPlugin: Send + Sync {
    fn meta(&self) -> OperationMeta;
    fn evaluate(&self, a: f64, b: f64) -> Result<f64, CalcError>;
}

/// One line of menu help
#[derive(Debug, Clone, Serialize)]
pub struct UsageLine {
    pub syntax: &'static str,
    pub description: &'static str,
}

impl UsageLine {
    pub const fn new(syntax: &'static str, description: &'static str) -> Self {
        Self { syntax, description }
    }
}

/// Metadata for a command plugin
#[derive(Debug, Clone, Serialize)]
pub struct CommandMeta {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static [UsageLine],
}

/// Meta-command (may touch history, writes to the session output)
pub trait CommandPlugin: Send + Sync {
    fn meta(&self) -> CommandMeta;
    fn execute(&self, args: &[&str], ctx: &mut CommandContext<'_>) -> Result<(), CalcError>;
}
