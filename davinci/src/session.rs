//! Drive a bot over line input until it goes idle or the input ends.

use std::io::Write;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::bot::Bot;
use crate::io::lines::LineSource;
use crate::process::Status;

/// Why a session stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// Every process finished.
    Idle,
    /// Input ran out while a process was waiting for a line.
    EndOfInput,
}

/// Show output while the bot has some, feed it a line while it needs one.
///
/// Errors returned by the bot are printed as `error: ...` and the
/// conversation carries on with whatever process is now on top. Only
/// failures writing output or reading input end the session with an error.
pub fn run_session(
    bot: &mut Bot,
    lines: &mut impl LineSource,
    out: &mut impl Write,
) -> Result<SessionEnd> {
    loop {
        match bot.status() {
            Status::Idle => {
                debug!("session idle");
                return Ok(SessionEnd::Idle);
            }
            Status::HasOutput => match bot.get_output() {
                Ok(text) => {
                    writeln!(out, "{}", text.trim_end()).context("write output")?;
                }
                Err(err) => report(out, &err)?,
            },
            Status::NeedsInput => {
                out.flush().context("flush output")?;
                let Some(line) = lines.read_line().context("read input")? else {
                    debug!(depth = bot.depth(), "input ended");
                    return Ok(SessionEnd::EndOfInput);
                };
                if let Err(err) = bot.handle_input(&line) {
                    report(out, &err)?;
                }
            }
        }
    }
}

fn report(out: &mut impl Write, err: &crate::core::error::Error) -> Result<()> {
    warn!(error = %err, "process failed");
    writeln!(out, "error: {err}").context("write error")
}
