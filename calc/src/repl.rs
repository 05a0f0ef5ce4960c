//! Read-evaluate-print loop
//!
//! One command per line: `<operation> <num1> <num2>`, `menu`,
//! `history show|clear|delete <n>` or `exit`. Every error is reported and
//! the loop goes on; only `exit` (or the end of input) stops it.
//!
//! Lines come from a [`LineSource`]: [`ReaderInput`] for any `BufRead`,
//! or a line editor in the binary.

use calc_core::{format_number, CalcError, Operand};
use crate::Calculator;
use std::io::{self, BufRead, ErrorKind, Write};
use tracing::{debug, warn};

pub const WELCOME: [&str; 2] = [
    "Welcome to the Plugin-Based Calculator!",
    "Type 'menu' to view options or 'exit' to quit.",
];

pub const PROMPT: &str = ">>> ";

const EXIT: &str = "exit";
const INVALID_COMMAND: &str = "Invalid command. Type 'menu' to see available commands.";
const INVALID_INPUT: &str = "Invalid input. Please enter numeric values.";

/// Supplies input lines to the REPL
pub trait LineSource {
    /// Show `prompt` and read the next line; `None` ends the session.
    ///
    /// `out` is the session output, for sources that do not draw the
    /// prompt themselves.
    fn next_line(&mut self, prompt: &str, out: &mut dyn Write) -> io::Result<Option<String>>;
}

/// Line source over a plain reader; the prompt goes to the session output
pub struct ReaderInput<R> {
    reader: R,
}

impl<R: BufRead> ReaderInput<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> LineSource for ReaderInput<R> {
    fn next_line(&mut self, prompt: &str, out: &mut dyn Write) -> io::Result<Option<String>> {
        write!(out, "{}", prompt)?;
        out.flush()?;

        let mut line = String::new();
        match self.reader.read_line(&mut line)? {
            0 => Ok(None),
            _ => Ok(Some(line)),
        }
    }
}

enum Flow {
    Continue,
    Exit,
}

/// Interactive session over a line source and an output sink
pub struct Repl<S, W> {
    calculator: Calculator,
    input: S,
    output: W,
}

impl<S: LineSource, W: Write> Repl<S, W> {
    pub fn new(calculator: Calculator, input: S, output: W) -> Self {
        Self { calculator, input, output }
    }

    pub fn calculator(&self) -> &Calculator {
        &self.calculator
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Run until `exit` or end of input.
    ///
    /// Only failures to read input or write output are returned.
    pub fn run(&mut self) -> io::Result<()> {
        for line in WELCOME {
            writeln!(self.output, "{}", line)?;
        }

        loop {
            match self.input.next_line(PROMPT, &mut self.output) {
                Ok(None) => {
                    debug!("end of input");
                    break;
                }
                Ok(Some(line)) => {
                    if let Flow::Exit = self.handle_line(line.trim())? {
                        break;
                    }
                }
                Err(e) if e.kind() == ErrorKind::InvalidData => {
                    warn!(error = %e, "unreadable input line");
                    writeln!(self.output, "Unexpected error: {}", e)?;
                }
                Err(e) => return Err(e),
            }
        }

        writeln!(self.output, "Goodbye!")?;
        self.output.flush()
    }

    fn handle_line(&mut self, line: &str) -> io::Result<Flow> {
        let mut tokens = line.split_whitespace();
        let Some(name) = tokens.next() else {
            return Ok(Flow::Continue);
        };
        let args: Vec<&str> = tokens.collect();

        if name == EXIT {
            return Ok(Flow::Exit);
        }

        let outcome = if self.calculator.registry().has_command(name) {
            self.calculator.run_command(name, &args, &mut self.output)
        } else if self.calculator.registry().has_operation(name) {
            let operands: Vec<Operand> = args.iter().map(|a| Operand::from(*a)).collect();
            match self.calculator.compute(name, &operands) {
                Ok(result) => {
                    writeln!(self.output, "Result: {}", format_number(result))?;
                    Ok(())
                }
                Err(e) => Err(e),
            }
        } else {
            debug!(command = %name, "invalid command");
            let err = CalcError::unsupported(name)
                .with_similar(self.calculator.registry().find_similar(name));
            writeln!(self.output, "{}", INVALID_COMMAND)?;
            if let Some(hint) = err.suggestion() {
                writeln!(self.output, "{}", hint)?;
            }
            return Ok(Flow::Continue);
        };

        if let Err(e) = outcome {
            self.report(&e)?;
        }
        Ok(Flow::Continue)
    }

    fn report(&mut self, err: &CalcError) -> io::Result<()> {
        warn!(code = err.code(), error = %err, suggestion = ?err.suggestion(), "command failed");
        let message = match err {
            e if e.is_validation() => INVALID_INPUT.to_string(),
            CalcError::Internal(msg) => format!("Unexpected error: {}", msg),
            // The session output itself failed; nothing sensible to print to
            CalcError::Io(e) => return Err(io::Error::new(e.kind(), e.to_string())),
            other => format!("Error: {}", other),
        };
        writeln!(self.output, "{}", message)
    }
}
