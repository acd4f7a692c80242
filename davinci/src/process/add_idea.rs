//! Collect new child ideas, one per line, until the user types `quit`.

use tracing::{debug, info};

use crate::core::error::Result;
use crate::core::path::IdeaPath;
use crate::process::{Context, Process, Status};

const PROMPT: &str =
    "Enter as many ideas as you want, followed by ENTER. To stop entering ideas, type 'quit'";

pub struct AddIdeaProcess {
    target: IdeaPath,
    added: Vec<String>,
}

impl AddIdeaProcess {
    pub fn new(target: IdeaPath) -> Self {
        Self {
            target,
            added: Vec::new(),
        }
    }
}

impl Process for AddIdeaProcess {
    fn name(&self) -> &'static str {
        "add-idea"
    }

    fn start(&mut self, ctx: &mut Context<'_>) -> Result<Status> {
        ctx.idea(&self.target)?;
        Ok(Status::HasOutput)
    }

    fn output(&mut self, _ctx: &mut Context<'_>) -> Result<(String, Status)> {
        Ok((PROMPT.to_string(), Status::NeedsInput))
    }

    fn handle_input(&mut self, ctx: &mut Context<'_>, line: &str) -> Result<Status> {
        let name = line.trim();
        if name.eq_ignore_ascii_case("quit") {
            return Ok(Status::Idle);
        }
        if name.is_empty() {
            return Ok(Status::NeedsInput);
        }
        let id = ctx.tree_mut().add_child(&self.target, name)?;
        debug!(id, name, parent = %self.target, "added idea");
        self.added.push(name.to_string());
        Ok(Status::NeedsInput)
    }

    fn finish(&mut self, ctx: &mut Context<'_>) -> Result<()> {
        let parent = ctx.idea(&self.target)?;
        info!(
            parent = parent.name(),
            added = self.added.len(),
            children = parent.children().len(),
            "finished adding ideas"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tree::IdeaTree;
    use crate::process::Settings;
    use crate::test_support::MemoryFiles;

    #[test]
    fn lines_become_children_until_quit() {
        let mut tree = IdeaTree::new("root", "");
        let files = MemoryFiles::default();
        let settings = Settings::default();
        let mut ctx = Context::new(&mut tree, &files, &settings);

        let mut process = AddIdeaProcess::new(IdeaPath::root());
        assert_eq!(process.start(&mut ctx).unwrap(), Status::HasOutput);
        let (text, status) = process.output(&mut ctx).unwrap();
        assert!(text.contains("type 'quit'"));
        assert_eq!(status, Status::NeedsInput);

        for line in ["buy milk", "   ", "walk dog"] {
            assert_eq!(process.handle_input(&mut ctx, line).unwrap(), Status::NeedsInput);
        }
        assert_eq!(process.handle_input(&mut ctx, "QUIT").unwrap(), Status::Idle);
        process.finish(&mut ctx).unwrap();

        let names: Vec<&str> = tree.root().children().iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["buy milk", "walk dog"]);
    }

    #[test]
    fn start_rejects_dangling_path() {
        let mut tree = IdeaTree::new("root", "");
        let files = MemoryFiles::default();
        let settings = Settings::default();
        let mut ctx = Context::new(&mut tree, &files, &settings);

        let mut process = AddIdeaProcess::new(IdeaPath::root().child(3));
        assert!(process.start(&mut ctx).is_err());
    }
}
