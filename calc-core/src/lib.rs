//! Calculator Core - Fundamental types
//!
//! This crate provides the core types used throughout the calculator:
//! - `Operand`: Raw operands (numbers or text) before validation
//! - `CalcError`: Errors raised by dispatch, operations and commands
//! - `HistoryError`: Errors raised by the history store

mod error;
mod operand;

pub use error::{CalcError, HistoryError, codes};
pub use operand::{Operand, format_number};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{CalcError, HistoryError, Operand, format_number};
    pub use crate::error::codes;
}
