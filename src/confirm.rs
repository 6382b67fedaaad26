//! Operator confirmation gate guarding destructive actions.
//!
//! Only an exact, case-insensitive `yes` proceeds. Everything else, including
//! an empty line, `y`, or end of input, takes the safe path.

use std::io::{self, BufRead, Write};

/// Prompt shown before deleting volumes.
pub const DELETE_PROMPT: &str = "\nDo you want to delete these volumes? (yes/no): ";

const AFFIRMATIVE: &str = "yes";

/// Source of operator consent for a destructive step.
pub trait Confirmation {
    /// Shows `prompt` and returns `true` only when the operator agrees.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the prompt cannot be written or the reply
    /// cannot be read.
    fn confirm(&mut self, prompt: &str) -> io::Result<bool>;
}

/// Returns `true` when `answer` is exactly `yes`, ignoring ASCII case and the
/// trailing line terminator.
#[must_use]
pub fn is_affirmative(answer: &str) -> bool {
    let line = answer
        .strip_suffix('\n')
        .map_or(answer, |rest| rest.strip_suffix('\r').unwrap_or(rest));
    line.eq_ignore_ascii_case(AFFIRMATIVE)
}

/// Interactive confirmation reading one line from `input`.
#[derive(Debug)]
pub struct ConsoleConfirmation<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsoleConfirmation<R, W> {
    /// Creates a gate reading from `input` and prompting on `output`.
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl ConsoleConfirmation<io::StdinLock<'static>, io::Stdout> {
    /// Creates a gate bound to the process's standard streams.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Confirmation for ConsoleConfirmation<R, W> {
    fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut answer = String::new();
        let read = self.input.read_line(&mut answer)?;
        if read == 0 {
            return Ok(false);
        }
        Ok(is_affirmative(&answer))
    }
}
