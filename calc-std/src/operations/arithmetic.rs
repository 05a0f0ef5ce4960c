//! The four basic arithmetic operations

use calc_plugin::prelude::*;

#[derive(Debug, Default, Clone, Copy)]
pub struct Addition;
#[derive(Debug, Default, Clone, Copy)]
pub struct Subtraction;
#[derive(Debug, Default, Clone, Copy)]
pub struct Multiplication;
#[derive(Debug, Default, Clone, Copy)]
pub struct Division;

static BINARY_ARGS: [ArgMeta; 2] = [
    ArgMeta::number("num1", "Left operand"),
    ArgMeta::number("num2", "Right operand"),
];
static DIVISION_ARGS: [ArgMeta; 2] = [
    ArgMeta::number("num1", "Dividend"),
    ArgMeta::number("num2", "Divisor (must not be zero)"),
];

static ADDITION_EXAMPLES: [&str; 1] = ["addition 5 5"];
static SUBTRACTION_EXAMPLES: [&str; 1] = ["subtraction 10 4"];
static MULTIPLICATION_EXAMPLES: [&str; 1] = ["multiplication 3 4"];
static DIVISION_EXAMPLES: [&str; 2] = ["division 8 2", "division 1 3"];

impl OperationPlugin for Addition {
    fn meta(&self) -> OperationMeta {
        OperationMeta {
            name: "addition",
            symbol: "+",
            description: "Add two numbers",
            args: &BINARY_ARGS,
            examples: &ADDITION_EXAMPLES,
        }
    }

    fn evaluate(&self, a: f64, b: f64) -> Result<f64, CalcError> {
        Ok(a + b)
    }
}

impl OperationPlugin for Subtraction {
    fn meta(&self) -> OperationMeta {
        OperationMeta {
            name: "subtraction",
            symbol: "-",
            description: "Subtract the second number from the first",
            args: &BINARY_ARGS,
            examples: &SUBTRACTION_EXAMPLES,
        }
    }

    fn evaluate(&self, a: f64, b: f64) -> Result<f64, CalcError> {
        Ok(a - b)
    }
}

impl OperationPlugin for Multiplication {
    fn meta(&self) -> OperationMeta {
        OperationMeta {
            name: "multiplication",
            symbol: "x",
            description: "Multiply two numbers",
            args: &BINARY_ARGS,
            examples: &MULTIPLICATION_EXAMPLES,
        }
    }

    fn evaluate(&self, a: f64, b: f64) -> Result<f64, CalcError> {
        Ok(a * b)
    }
}

impl OperationPlugin for Division {
    fn meta(&self) -> OperationMeta {
        OperationMeta {
            name: "division",
            symbol: "/",
            description: "Divide the first number by the second",
            args: &DIVISION_ARGS,
            examples: &DIVISION_EXAMPLES,
        }
    }

    fn evaluate(&self, a: f64, b: f64) -> Result<f64, CalcError> {
        // -0.0 == 0.0, so both zeros are rejected
        if b == 0.0 {
            return Err(CalcError::DivisionByZero);
        }
        Ok(a / b)
    }
}
