//! Move ideas as codec text through the conversation itself.

use tracing::info;

use crate::core::error::Result;
use crate::core::path::IdeaPath;
use crate::process::{Context, Process, Status, idea_count};

/// Print the codec text for an idea and end.
pub struct ExportProcess {
    target: IdeaPath,
}

impl ExportProcess {
    pub fn new(target: IdeaPath) -> Self {
        Self { target }
    }
}

impl Process for ExportProcess {
    fn name(&self) -> &'static str {
        "export"
    }

    fn start(&mut self, ctx: &mut Context<'_>) -> Result<Status> {
        ctx.idea(&self.target)?;
        Ok(Status::HasOutput)
    }

    fn output(&mut self, ctx: &mut Context<'_>) -> Result<(String, Status)> {
        Ok((ctx.tree().encode(&self.target)?, Status::Idle))
    }
}

/// Read one line of codec text and splice it onto an idea.
pub struct ImportProcess {
    target: IdeaPath,
    reply: Option<String>,
}

impl ImportProcess {
    pub fn new(target: IdeaPath) -> Self {
        Self {
            target,
            reply: None,
        }
    }
}

impl Process for ImportProcess {
    fn name(&self) -> &'static str {
        "import"
    }

    fn start(&mut self, ctx: &mut Context<'_>) -> Result<Status> {
        ctx.idea(&self.target)?;
        Ok(Status::HasOutput)
    }

    fn output(&mut self, _ctx: &mut Context<'_>) -> Result<(String, Status)> {
        match self.reply.take() {
            Some(reply) => Ok((reply, Status::Idle)),
            None => Ok((
                "Paste exported ideas on one line (blank to cancel)".to_string(),
                Status::NeedsInput,
            )),
        }
    }

    fn handle_input(&mut self, ctx: &mut Context<'_>, line: &str) -> Result<Status> {
        if line.trim().is_empty() {
            return Ok(Status::Idle);
        }
        ctx.tree_mut().load(&self.target, line)?;
        let ideas = ctx.idea(&self.target)?.count();
        info!(path = %self.target, ideas, "imported ideas");
        self.reply = Some(format!("Imported {}.", idea_count(ideas)));
        Ok(Status::HasOutput)
    }
}
