//! Line input for the conversation.

use std::io::{self, BufRead, Write};

/// Blocking source of input lines. `None` means the input has ended.
pub trait LineSource {
    fn read_line(&mut self) -> io::Result<Option<String>>;
}

/// Reads lines from any buffered reader, printing a prompt first.
pub struct PromptedLines<R, W> {
    reader: R,
    prompt_to: W,
    prompt: String,
}

impl<R: BufRead, W: Write> PromptedLines<R, W> {
    pub fn new(reader: R, prompt_to: W, prompt: impl Into<String>) -> Self {
        Self {
            reader,
            prompt_to,
            prompt: prompt.into(),
        }
    }
}

impl PromptedLines<io::StdinLock<'static>, io::Stdout> {
    /// Standard input with a `> ` prompt on standard output.
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock(), io::stdout(), "> ")
    }
}

impl<R: BufRead, W: Write> LineSource for PromptedLines<R, W> {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        self.prompt_to.write_all(self.prompt.as_bytes())?;
        self.prompt_to.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}
