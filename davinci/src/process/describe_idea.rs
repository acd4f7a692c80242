use crate::core::error::Result;
use crate::core::path::IdeaPath;
use crate::process::{Context, Process, Status};

/// Replace an idea's description with one line of input.
pub struct DescribeIdeaProcess {
    target: IdeaPath,
}

impl DescribeIdeaProcess {
    pub fn new(target: IdeaPath) -> Self {
        Self { target }
    }
}

impl Process for DescribeIdeaProcess {
    fn name(&self) -> &'static str {
        "describe-idea"
    }

    fn start(&mut self, ctx: &mut Context<'_>) -> Result<Status> {
        ctx.idea(&self.target)?;
        Ok(Status::HasOutput)
    }

    fn output(&mut self, ctx: &mut Context<'_>) -> Result<(String, Status)> {
        let idea = ctx.idea(&self.target)?;
        let current = match idea.description() {
            "" => "none".to_string(),
            text => format!("'{text}'"),
        };
        let text = format!(
            "Describe {} in one line (current description: {current}; blank to keep)",
            idea.name()
        );
        Ok((text, Status::NeedsInput))
    }

    fn handle_input(&mut self, ctx: &mut Context<'_>, line: &str) -> Result<Status> {
        let description = line.trim();
        if !description.is_empty() {
            ctx.idea_mut(&self.target)?.set_description(description);
        }
        Ok(Status::Idle)
    }
}
