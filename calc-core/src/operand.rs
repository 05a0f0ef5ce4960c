//! Raw operands as they arrive at the dispatcher
//!
//! The REPL hands over text tokens, library callers usually pass numbers.
//! Both are converted to `f64` before an operation sees them.

use crate::CalcError;
use std::fmt;

/// An operand before validation
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Number(f64),
    Text(String),
}

impl Operand {
    /// Convert to `f64`. Text is trimmed before parsing; `nan` and
    /// infinities are rejected.
    pub fn to_f64(&self) -> Result<f64, CalcError> {
        let value = match self {
            Operand::Number(n) => *n,
            Operand::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| CalcError::invalid_operand(s.as_str()))?,
        };
        if !value.is_finite() {
            return Err(CalcError::invalid_operand(self.to_string()));
        }
        Ok(value)
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Number(n) => f.write_str(&format_number(*n)),
            Operand::Text(s) => f.write_str(s),
        }
    }
}

macro_rules! operand_from_number {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Operand {
                fn from(n: $t) -> Self {
                    Operand::Number(n as f64)
                }
            }
        )*
    };
}

operand_from_number!(i32, i64, u32, u64, f32, f64);

impl From<&str> for Operand {
    fn from(s: &str) -> Self {
        Operand::Text(s.to_string())
    }
}

impl From<String> for Operand {
    fn from(s: String) -> Self {
        Operand::Text(s)
    }
}

/// Format a number the way results and history rows show it:
/// shortest round-trip digits, integral values keep a trailing `.0`.
pub fn format_number(value: f64) -> String {
    format!("{:?}", value)
}

/// Build a `Vec<Operand>` from mixed numbers and strings
#[macro_export]
macro_rules! operands {
    () => { ::std::vec::Vec::<$crate::Operand>::new() };
    ($($value:expr),+ $(,)?) => {
        vec![$($crate::Operand::from($value)),+]
    };
}
