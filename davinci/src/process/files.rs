//! Save an idea to a file, or load one from a file.
//!
//! Both processes ask for a path, do the work, report, and end. A blank path
//! means the configured save file.

use std::path::{Path, PathBuf};

use crate::core::error::Result;
use crate::core::path::IdeaPath;
use crate::io::store::{LoadOutcome, load_file, save_file};
use crate::process::{Context, Process, Status, idea_count};

pub struct SaveFileProcess {
    target: IdeaPath,
    reply: Option<String>,
}

impl SaveFileProcess {
    pub fn new(target: IdeaPath) -> Self {
        Self {
            target,
            reply: None,
        }
    }
}

impl Process for SaveFileProcess {
    fn name(&self) -> &'static str {
        "save-file"
    }

    fn start(&mut self, ctx: &mut Context<'_>) -> Result<Status> {
        ctx.idea(&self.target)?;
        Ok(Status::HasOutput)
    }

    fn output(&mut self, ctx: &mut Context<'_>) -> Result<(String, Status)> {
        if let Some(reply) = self.reply.take() {
            return Ok((reply, Status::Idle));
        }
        let text = format!(
            "Save to which file? (blank for {})",
            ctx.settings().save_path.display()
        );
        Ok((text, Status::NeedsInput))
    }

    fn handle_input(&mut self, ctx: &mut Context<'_>, line: &str) -> Result<Status> {
        let path = chosen_path(line, &ctx.settings().save_path);
        let saved = save_file(ctx.files(), &path, ctx.tree(), &self.target)?;
        self.reply = Some(format!(
            "Saved {} to {}.",
            idea_count(saved),
            path.display()
        ));
        Ok(Status::HasOutput)
    }
}

pub struct LoadFileProcess {
    target: IdeaPath,
    reply: Option<String>,
}

impl LoadFileProcess {
    pub fn new(target: IdeaPath) -> Self {
        Self {
            target,
            reply: None,
        }
    }
}

impl Process for LoadFileProcess {
    fn name(&self) -> &'static str {
        "load-file"
    }

    fn start(&mut self, ctx: &mut Context<'_>) -> Result<Status> {
        ctx.idea(&self.target)?;
        Ok(Status::HasOutput)
    }

    fn output(&mut self, ctx: &mut Context<'_>) -> Result<(String, Status)> {
        if let Some(reply) = self.reply.take() {
            return Ok((reply, Status::Idle));
        }
        let text = format!(
            "Load from which file? (blank for {})",
            ctx.settings().save_path.display()
        );
        Ok((text, Status::NeedsInput))
    }

    fn handle_input(&mut self, ctx: &mut Context<'_>, line: &str) -> Result<Status> {
        let path = chosen_path(line, &ctx.settings().save_path);
        let files = ctx.files();
        let reply = match load_file(files, &path, ctx.tree_mut(), &self.target)? {
            LoadOutcome::Loaded { ideas } => {
                format!("Loaded {} from {}.", idea_count(ideas), path.display())
            }
            LoadOutcome::Missing => {
                format!("There is no file at {}; nothing was loaded.", path.display())
            }
        };
        self.reply = Some(reply);
        Ok(Status::HasOutput)
    }
}

/// Blank input picks `default`; a leading `~` is the home directory.
fn chosen_path(line: &str, default: &Path) -> PathBuf {
    let line = line.trim();
    if line.is_empty() {
        return default.to_path_buf();
    }
    expand_home(line)
}

fn expand_home(raw: &str) -> PathBuf {
    let rest = match raw.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => return PathBuf::from(raw),
    };
    match dirs::home_dir() {
        Some(home) if rest.is_empty() => home,
        Some(home) => home.join(rest),
        None => PathBuf::from(raw),
    }
}
