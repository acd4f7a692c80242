//! Read a time estimate for a leaf idea.

use tracing::debug;

use crate::core::error::Result;
use crate::core::path::IdeaPath;
use crate::core::span::{format_span, parse_span};
use crate::process::{Context, Process, Status};

pub struct TimeIdeaProcess {
    target: IdeaPath,
    /// Shown once, then the process ends.
    reply: Option<String>,
    /// Shown above the prompt after bad input.
    notice: Option<String>,
}

impl TimeIdeaProcess {
    pub fn new(target: IdeaPath) -> Self {
        Self {
            target,
            reply: None,
            notice: None,
        }
    }
}

impl Process for TimeIdeaProcess {
    fn name(&self) -> &'static str {
        "time-idea"
    }

    fn start(&mut self, ctx: &mut Context<'_>) -> Result<Status> {
        let idea = ctx.idea(&self.target)?;
        if !idea.is_leaf() {
            self.reply = Some(format!(
                "{} is made of {} parts; its time is their total, {}.",
                idea.name(),
                idea.children().len(),
                format_span(idea.duration())
            ));
        }
        Ok(Status::HasOutput)
    }

    fn output(&mut self, ctx: &mut Context<'_>) -> Result<(String, Status)> {
        if let Some(reply) = self.reply.take() {
            return Ok((reply, Status::Idle));
        }
        let idea = ctx.idea(&self.target)?;
        let mut text = String::new();
        if let Some(notice) = self.notice.take() {
            text.push_str(&notice);
            text.push('\n');
        }
        text.push_str(&format!(
            "How long will {} take? (e.g. 45m, 1.5h, 2d, 1h30m; a bare number is minutes; currently {}; blank to keep)",
            idea.name(),
            format_span(idea.duration())
        ));
        Ok((text, Status::NeedsInput))
    }

    fn handle_input(&mut self, ctx: &mut Context<'_>, line: &str) -> Result<Status> {
        if line.trim().is_empty() {
            return Ok(Status::Idle);
        }
        let span = match parse_span(line) {
            Ok(span) => span,
            Err(err) => {
                self.notice = Some(err.to_string());
                return Ok(Status::HasOutput);
            }
        };
        let idea = ctx.idea_mut(&self.target)?;
        idea.set_duration(span)?;
        debug!(path = %self.target, secs = span.as_secs_f64(), "set time estimate");
        self.reply = Some(format!("{} should take {}.", idea.name(), format_span(span)));
        Ok(Status::HasOutput)
    }
}
