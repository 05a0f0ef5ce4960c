//! History entries

use calc_core::{format_number, HistoryError};
use csv::StringRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One past computation: `operation(operand1, operand2) = result`.
///
/// Equality is pointwise and exact, which is what duplicate suppression
/// relies on. A `NaN` field equals another `NaN`, so rows read back from a
/// hand-edited file still collapse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub operation: String,
    pub operand1: f64,
    pub operand2: f64,
    pub result: f64,
}

impl HistoryEntry {
    pub fn new(operation: impl Into<String>, operand1: f64, operand2: f64, result: f64) -> Self {
        Self {
            operation: operation.into(),
            operand1,
            operand2,
            result,
        }
    }

    /// Parse a CSV record. `line` is only used for error reporting.
    pub(crate) fn from_record(record: &StringRecord, line: u64) -> Result<Self, HistoryError> {
        if record.len() != 4 {
            return Err(HistoryError::malformed(
                line,
                format!("expected 4 fields, found {}", record.len()),
            ));
        }

        let number = |idx: usize, column: &str| -> Result<f64, HistoryError> {
            let raw = record.get(idx).unwrap_or_default().trim();
            raw.parse::<f64>().map_err(|_| {
                HistoryError::malformed(line, format!("{} '{}' is not a number", column, raw))
            })
        };

        Ok(Self {
            operation: record.get(0).unwrap_or_default().trim().to_string(),
            operand1: number(1, "Operand 1")?,
            operand2: number(2, "Operand 2")?,
            result: number(3, "Result")?,
        })
    }

    /// Table cells in column order
    pub(crate) fn cells(&self) -> [String; 4] {
        [
            self.operation.clone(),
            format_number(self.operand1),
            format_number(self.operand2),
            format_number(self.result),
        ]
    }
}

impl PartialEq for HistoryEntry {
    fn eq(&self, other: &Self) -> bool {
        self.operation == other.operation
            && same_number(self.operand1, other.operand1)
            && same_number(self.operand2, other.operand2)
            && same_number(self.result, other.result)
    }
}

fn same_number(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({}, {}) = {}",
            self.operation,
            format_number(self.operand1),
            format_number(self.operand2),
            format_number(self.result)
        )
    }
}
