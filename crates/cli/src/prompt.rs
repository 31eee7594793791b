//! Line-based interactive prompts.

use std::io::{self, BufRead, Write};

/// Asks questions on `output` and reads answers from `input`.
///
/// Invalid answers are reported and the question is asked again. Running
/// out of input is an `UnexpectedEof` error.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed before an answer was given",
            ));
        }
        Ok(line.trim().to_ascii_lowercase())
    }

    /// Ask a y/n question.
    ///
    /// # Errors
    ///
    /// Returns `io::Error` if reading or writing fails or input ends.
    pub fn yes_no(&mut self, message: &str) -> io::Result<bool> {
        loop {
            match self.ask(&format!("{message} (y/n): "))?.as_str() {
                "y" => return Ok(true),
                "n" => return Ok(false),
                _ => writeln!(self.output, "Invalid input. Please enter 'y' or 'n'.")?,
            }
        }
    }

    /// Ask for a non-negative integer.
    ///
    /// # Errors
    ///
    /// Returns `io::Error` if reading or writing fails or input ends.
    pub fn count(&mut self, message: &str) -> io::Result<usize> {
        loop {
            let answer = self.ask(&format!("{message}: "))?;
            match answer.parse::<i64>() {
                Ok(n) if n < 0 => writeln!(self.output, "Please enter a non-negative integer.")?,
                Ok(n) => match usize::try_from(n) {
                    Ok(n) => return Ok(n),
                    Err(_) => writeln!(self.output, "That number is too large.")?,
                },
                Err(_) => writeln!(self.output, "Invalid input. Please enter a number.")?,
            }
        }
    }

    /// Ask whether to generate `entity` and, if so, how many.
    ///
    /// Returns 0 when the answer is "n".
    ///
    /// # Errors
    ///
    /// Returns `io::Error` if reading or writing fails or input ends.
    pub fn entity_count(&mut self, entity: &str) -> io::Result<usize> {
        if self.yes_no(&format!("Generate {entity}?"))? {
            self.count(&format!("How many {entity}"))
        } else {
            Ok(0)
        }
    }
}
