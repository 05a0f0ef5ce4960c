//! Operation dispatch
//!
//! Turns `(name, raw operands)` into a number: validate operand count,
//! convert operands, look the operation up, evaluate it on the worker.

use calc_core::{format_number, CalcError, Operand};
use calc_plugin::PluginRegistry;
use crate::worker::Worker;
use std::sync::Arc;
use tracing::{debug, info};

/// A successful evaluation
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub operation: String,
    pub operands: Vec<f64>,
    pub result: f64,
    /// Human-readable form, e.g. `5.0 + 5.0 = 10.0`
    pub expression: String,
}

/// Validates input and runs operations in isolation
pub struct Dispatcher {
    registry: Arc<PluginRegistry>,
    worker: Worker,
}

impl Dispatcher {
    pub fn new(registry: Arc<PluginRegistry>) -> Result<Self, CalcError> {
        Ok(Self {
            registry,
            worker: Worker::spawn()?,
        })
    }

    /// Evaluate `name` over `args`.
    ///
    /// More than two operands fold left: `((a op b) op c)`. A single
    /// operand is returned unchanged without calling the operation.
    pub fn evaluate(&self, name: &str, args: &[Operand]) -> Result<Evaluation, CalcError> {
        if args.is_empty() {
            return Err(CalcError::missing_operands(name));
        }

        let operands = args
            .iter()
            .map(Operand::to_f64)
            .collect::<Result<Vec<f64>, CalcError>>()?;

        let op = self
            .registry
            .lookup(name)
            .ok_or_else(|| CalcError::unsupported(name).with_similar(self.registry.find_similar(name)))?;
        let symbol = op.meta().symbol;

        debug!(operation = %name, ?operands, "dispatching");
        let job_operands = operands.clone();
        let result = self.worker.run(move || {
            let (first, rest) = job_operands
                .split_first()
                .ok_or_else(|| CalcError::internal("no operands"))?;
            rest.iter().try_fold(*first, |acc, b| op.evaluate(acc, *b))
        })?;
        if !result.is_finite() {
            return Err(CalcError::domain(format!("result of {} is not a finite number", name)));
        }

        let separator = format!(" {} ", symbol);
        let expression = format!(
            "{} = {}",
            operands
                .iter()
                .map(|n| format_number(*n))
                .collect::<Vec<_>>()
                .join(separator.as_str()),
            format_number(result)
        );
        info!(operation = %name, "{}", expression);

        Ok(Evaluation {
            operation: name.to_lowercase(),
            operands,
            result,
            expression,
        })
    }
}
