//! Line-editing terminal input

use calc::LineSource;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io::{self, ErrorKind, Write};
use tracing::debug;

/// Reads lines through `rustyline`, which draws the prompt and keeps
/// in-session recall of earlier lines
pub struct Terminal {
    editor: DefaultEditor,
}

impl Terminal {
    pub fn new() -> rustyline::Result<Self> {
        Ok(Self { editor: DefaultEditor::new()? })
    }
}

impl LineSource for Terminal {
    fn next_line(&mut self, prompt: &str, out: &mut dyn Write) -> io::Result<Option<String>> {
        // Pending session output must land before the editor draws the prompt
        out.flush()?;

        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Eof) => Ok(None),
            Err(ReadlineError::Interrupted) => {
                debug!("interrupted");
                Ok(None)
            }
            Err(ReadlineError::Io(e)) => Err(e),
            Err(e) => Err(io::Error::new(ErrorKind::Other, e.to_string())),
        }
    }
}
