//! Cooked-mode line prompts.

use std::io::{BufRead, Write};

use crate::CliError;

/// Questions answered with a line of text.
pub struct LinePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    /// Prompt reading from `input` and writing to `output`.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Ask `question`. A blank answer takes `default` (or the empty string).
    ///
    /// # Errors
    ///
    /// [`CliError::Input`] if input is closed before an answer.
    pub fn ask(&mut self, question: &str, default: Option<&str>) -> Result<String, CliError> {
        match default {
            Some(default) => write!(self.output, "{question} [{default}]: ")?,
            None => write!(self.output, "{question}: ")?,
        }
        self.output.flush()?;

        let Some(line) = self.read_line()? else {
            return Err(CliError::Input(format!("no answer to \"{question}\"")));
        };

        let answer = line.trim();
        if answer.is_empty() {
            Ok(default.unwrap_or_default().to_string())
        } else {
            Ok(answer.to_string())
        }
    }

    /// Collect lines until a blank line or end of input.
    pub fn ask_lines(&mut self, intro: &str) -> Result<String, CliError> {
        writeln!(self.output, "{intro}")?;
        self.output.flush()?;

        let mut lines = Vec::new();
        while let Some(line) = self.read_line()? {
            if line.trim().is_empty() {
                break;
            }
            lines.push(line);
        }
        Ok(lines.join("\n"))
    }

    /// Print one line of output.
    pub fn say(&mut self, message: &str) -> std::io::Result<()> {
        writeln!(self.output, "{message}")?;
        self.output.flush()
    }

    /// Output stream, for displays that draw their own lines.
    pub fn output_mut(&mut self) -> &mut W {
        &mut self.output
    }

    /// Output stream.
    pub fn output(&self) -> &W {
        &self.output
    }

    fn read_line(&mut self) -> Result<Option<String>, CliError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}
