//! Arithmetic operations

mod arithmetic;

pub use arithmetic::{Addition, Subtraction, Multiplication, Division};
