//! Conversational processes and the protocol they follow.
//!
//! A [`Process`] is a small state machine bound to one idea. The
//! [`crate::bot::Bot`] stack drives it through [`Status`] transitions:
//! `start` once, then `output` while it has something to say and
//! `handle_input` while it waits for a line, until it reports `Idle` and is
//! popped (calling `finish`).

use std::path::PathBuf;

use crate::core::error::{Error, Result};
use crate::core::idea::Idea;
use crate::core::path::IdeaPath;
use crate::core::tree::IdeaTree;
use crate::io::files::TextFiles;

pub mod add_idea;
pub mod describe_idea;
pub mod files;
pub mod main_menu;
pub mod menu;
pub mod plan_idea;
pub mod tag_idea;
pub mod time_idea;
pub mod transfer;
pub mod work_on_idea;

pub use add_idea::AddIdeaProcess;
pub use describe_idea::DescribeIdeaProcess;
pub use files::{LoadFileProcess, SaveFileProcess};
pub use main_menu::MainMenuProcess;
pub use plan_idea::PlanIdeaProcess;
pub use tag_idea::TagIdeaProcess;
pub use time_idea::TimeIdeaProcess;
pub use transfer::{ExportProcess, ImportProcess};
pub use work_on_idea::WorkOnIdeaProcess;

/// Whose turn it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// A message is ready to be shown.
    HasOutput,
    /// Blocked until one line of input arrives.
    NeedsInput,
    /// Finished; the stack pops the process.
    Idle,
}

pub trait Process {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Called once when pushed. Returns the initial status.
    fn start(&mut self, ctx: &mut Context<'_>) -> Result<Status>;

    /// Only called while the process reported [`Status::HasOutput`].
    fn output(&mut self, ctx: &mut Context<'_>) -> Result<(String, Status)> {
        let _ = ctx;
        Err(Error::invalid_state(format!("{} has no output", self.name())))
    }

    /// Only called while the process reported [`Status::NeedsInput`].
    fn handle_input(&mut self, ctx: &mut Context<'_>, line: &str) -> Result<Status> {
        let _ = (ctx, line);
        Err(Error::invalid_state(format!("{} takes no input", self.name())))
    }

    /// Called once when the process is popped.
    fn finish(&mut self, ctx: &mut Context<'_>) -> Result<()> {
        let _ = ctx;
        Ok(())
    }
}

/// Presentation and persistence settings shared by all processes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub bar_width: usize,
    /// File used when the user leaves the save/load path blank.
    pub save_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bar_width: 30,
            save_path: PathBuf::from(".davincibot.json"),
        }
    }
}

/// Everything a process may touch during one call.
///
/// Processes pushed with [`Context::start_process`] are started by the stack
/// after the current call returns, in the order they were requested.
pub struct Context<'a> {
    tree: &'a mut IdeaTree,
    files: &'a dyn TextFiles,
    settings: &'a Settings,
    spawned: Vec<Box<dyn Process>>,
}

impl<'a> Context<'a> {
    pub fn new(tree: &'a mut IdeaTree, files: &'a dyn TextFiles, settings: &'a Settings) -> Self {
        Self {
            tree,
            files,
            settings,
            spawned: Vec::new(),
        }
    }

    pub fn tree(&self) -> &IdeaTree {
        &*self.tree
    }

    pub fn tree_mut(&mut self) -> &mut IdeaTree {
        &mut *self.tree
    }

    pub fn idea(&self, path: &IdeaPath) -> Result<&Idea> {
        self.tree.get(path)
    }

    pub fn idea_mut(&mut self, path: &IdeaPath) -> Result<&mut Idea> {
        self.tree.get_mut(path)
    }

    pub fn files(&self) -> &'a dyn TextFiles {
        self.files
    }

    pub fn settings(&self) -> &'a Settings {
        self.settings
    }

    pub fn start_process(&mut self, process: impl Process + 'static) {
        self.spawned.push(Box::new(process));
    }

    pub(crate) fn into_spawned(self) -> Vec<Box<dyn Process>> {
        self.spawned
    }
}

/// `"1 idea"`, `"3 ideas"`.
pub(crate) fn idea_count(n: usize) -> String {
    if n == 1 {
        "1 idea".to_string()
    } else {
        format!("{n} ideas")
    }
}
