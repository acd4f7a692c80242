//! Toggle tags on an idea.

use crate::core::error::Result;
use crate::core::path::IdeaPath;
use crate::process::{Context, Process, Status};

pub struct TagIdeaProcess {
    target: IdeaPath,
    reply: Option<String>,
}

impl TagIdeaProcess {
    pub fn new(target: IdeaPath) -> Self {
        Self {
            target,
            reply: None,
        }
    }
}

impl Process for TagIdeaProcess {
    fn name(&self) -> &'static str {
        "tag-idea"
    }

    fn start(&mut self, ctx: &mut Context<'_>) -> Result<Status> {
        ctx.idea(&self.target)?;
        Ok(Status::HasOutput)
    }

    fn output(&mut self, ctx: &mut Context<'_>) -> Result<(String, Status)> {
        if let Some(reply) = self.reply.take() {
            return Ok((reply, Status::Idle));
        }
        let idea = ctx.idea(&self.target)?;
        let tags: Vec<&str> = idea.tags().collect();
        let current = if tags.is_empty() {
            "none".to_string()
        } else {
            tags.join(" ")
        };
        let text = format!(
            "Tags for {} (current: {current}). Type tags separated by spaces to toggle them, or leave blank",
            idea.name()
        );
        Ok((text, Status::NeedsInput))
    }

    fn handle_input(&mut self, ctx: &mut Context<'_>, line: &str) -> Result<Status> {
        let words: Vec<&str> = line
            .split_whitespace()
            .map(|word| word.trim_start_matches('#'))
            .filter(|word| !word.is_empty())
            .collect();
        if words.is_empty() {
            return Ok(Status::Idle);
        }

        let idea = ctx.idea_mut(&self.target)?;
        let mut added = Vec::new();
        let mut removed = Vec::new();
        for word in words {
            if idea.toggle_tag(word) {
                added.push(word);
            } else {
                removed.push(word);
            }
        }

        let mut reply = Vec::new();
        if !added.is_empty() {
            reply.push(format!("Tagged: {}.", added.join(" ")));
        }
        if !removed.is_empty() {
            reply.push(format!("Untagged: {}.", removed.join(" ")));
        }
        self.reply = Some(reply.join(" "));
        Ok(Status::HasOutput)
    }
}
