//! Make progress on one idea: finish it, or descend into its parts.

use tracing::debug;

use crate::core::error::{Error, Result};
use crate::core::path::IdeaPath;
use crate::core::render::idea_line;
use crate::process::menu::{Choice, Menu, recover, screen, unrecognized_notice};
use crate::process::{Context, PlanIdeaProcess, Process, Status};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Quit,
    Done,
    Parts,
    Plan,
    Clear,
}

pub struct WorkOnIdeaProcess {
    target: IdeaPath,
    menu: Menu<Action>,
    notice: Option<String>,
}

impl WorkOnIdeaProcess {
    pub fn new(target: IdeaPath) -> Self {
        let menu = Menu::new(Action::Quit)
            .with_command("Mark this idea [done]", &["finish"], Action::Done)
            .with_command("Work on this idea's [parts]", &[], Action::Parts)
            .with_command("[Plan] this idea", &[], Action::Plan)
            .with_command("[Clear] finished parts", &[], Action::Clear);
        Self {
            target,
            menu,
            notice: None,
        }
    }

    fn run(&mut self, ctx: &mut Context<'_>, action: Action) -> Result<Status> {
        match action {
            Action::Quit => Ok(Status::Idle),
            Action::Done => {
                ctx.idea_mut(&self.target)?.set_progress(1.0)?;
                debug!(path = %self.target, "marked idea done");
                Ok(Status::Idle)
            }
            Action::Parts => {
                let unfinished: Vec<usize> = ctx
                    .idea(&self.target)?
                    .children()
                    .iter()
                    .enumerate()
                    .filter(|(_, child)| !child.is_finished())
                    .map(|(index, _)| index)
                    .collect();
                if unfinished.is_empty() {
                    return Err(Error::invalid_state("this idea has no unfinished parts"));
                }
                // Pushed last-first so the first part ends up on top.
                for index in unfinished.into_iter().rev() {
                    ctx.start_process(WorkOnIdeaProcess::new(self.target.child(index)));
                }
                Ok(Status::HasOutput)
            }
            Action::Plan => {
                ctx.start_process(PlanIdeaProcess::new(self.target.clone()));
                Ok(Status::HasOutput)
            }
            Action::Clear => {
                let removed = ctx.idea_mut(&self.target)?.clear_finished_children();
                self.notice = Some(match removed {
                    0 => "No finished parts to clear.".to_string(),
                    1 => "Cleared 1 finished part.".to_string(),
                    n => format!("Cleared {n} finished parts."),
                });
                Ok(Status::HasOutput)
            }
        }
    }
}

impl Process for WorkOnIdeaProcess {
    fn name(&self) -> &'static str {
        "work-on-idea"
    }

    fn start(&mut self, ctx: &mut Context<'_>) -> Result<Status> {
        ctx.idea(&self.target)?;
        Ok(Status::HasOutput)
    }

    fn output(&mut self, ctx: &mut Context<'_>) -> Result<(String, Status)> {
        let idea = ctx.idea(&self.target)?;
        let header = format!(
            "Working on idea {}:\n{}",
            idea.name(),
            idea_line(idea, ctx.settings().bar_width)
        );
        Ok((screen(&header, self.notice.take(), &self.menu), Status::NeedsInput))
    }

    fn handle_input(&mut self, ctx: &mut Context<'_>, line: &str) -> Result<Status> {
        match self.menu.choose(line) {
            Choice::Invoke(action) => {
                let result = self.run(ctx, action);
                recover(result, &mut self.notice)
            }
            Choice::Unrecognized(line) => {
                self.notice = Some(unrecognized_notice(&line));
                Ok(Status::HasOutput)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tree::IdeaTree;
    use crate::process::Settings;
    use crate::test_support::{MemoryFiles, tree_with_children};

    struct Fixture {
        tree: IdeaTree,
        files: MemoryFiles,
        settings: Settings,
    }

    impl Fixture {
        fn new(tree: IdeaTree) -> Self {
            Self {
                tree,
                files: MemoryFiles::default(),
                settings: Settings::default(),
            }
        }

        fn ctx(&mut self) -> Context<'_> {
            Context::new(&mut self.tree, &self.files, &self.settings)
        }
    }

    #[test]
    fn done_marks_leaf_finished_and_ends() {
        let mut fx = Fixture::new(tree_with_children(&["buy milk"]));
        let mut process = WorkOnIdeaProcess::new(IdeaPath::root().child(0));
        let mut ctx = fx.ctx();
        process.start(&mut ctx).unwrap();
        process.output(&mut ctx).unwrap();
        assert_eq!(process.handle_input(&mut ctx, "done").unwrap(), Status::Idle);
        assert!(fx.tree.root().children()[0].is_finished());
    }

    #[test]
    fn done_on_composite_shows_notice_and_stays() {
        let mut fx = Fixture::new(tree_with_children(&["a", "b"]));
        let mut process = WorkOnIdeaProcess::new(IdeaPath::root());
        let mut ctx = fx.ctx();
        process.start(&mut ctx).unwrap();
        process.output(&mut ctx).unwrap();
        assert_eq!(process.handle_input(&mut ctx, "1").unwrap(), Status::HasOutput);
        let (text, _) = process.output(&mut ctx).unwrap();
        assert!(text.starts_with("Can't do that: invalid state"), "{text}");
    }

    #[test]
    fn parts_spawns_unfinished_children_first_on_top() {
        let mut fx = Fixture::new(tree_with_children(&["a", "b", "c"]));
        fx.tree.root_mut().child_mut(1).unwrap().set_progress(1.0).unwrap();
        let mut process = WorkOnIdeaProcess::new(IdeaPath::root());
        let mut ctx = fx.ctx();
        process.start(&mut ctx).unwrap();
        process.output(&mut ctx).unwrap();
        assert_eq!(process.handle_input(&mut ctx, "parts").unwrap(), Status::HasOutput);

        let mut spawned = ctx.into_spawned();
        assert_eq!(spawned.len(), 2);
        let mut ctx = fx.ctx();
        // The last spawned process is the first one the user sees.
        let top = spawned.last_mut().unwrap();
        top.start(&mut ctx).unwrap();
        let (text, _) = top.output(&mut ctx).unwrap();
        assert!(text.starts_with("Working on idea a:"), "{text}");
    }

    #[test]
    fn clear_removes_finished_parts() {
        let mut fx = Fixture::new(tree_with_children(&["a", "b"]));
        fx.tree.root_mut().child_mut(0).unwrap().set_progress(1.0).unwrap();
        let mut process = WorkOnIdeaProcess::new(IdeaPath::root());
        let mut ctx = fx.ctx();
        process.start(&mut ctx).unwrap();
        process.output(&mut ctx).unwrap();
        process.handle_input(&mut ctx, "clear").unwrap();
        let (text, _) = process.output(&mut ctx).unwrap();
        assert!(text.starts_with("Cleared 1 finished part."));
        assert_eq!(fx.tree.root().children().len(), 1);
    }

    #[test]
    fn unknown_command_is_reported() {
        let mut fx = Fixture::new(tree_with_children(&["a"]));
        let mut process = WorkOnIdeaProcess::new(IdeaPath::root());
        let mut ctx = fx.ctx();
        process.start(&mut ctx).unwrap();
        process.output(&mut ctx).unwrap();
        assert_eq!(process.handle_input(&mut ctx, "dance").unwrap(), Status::HasOutput);
        let (text, status) = process.output(&mut ctx).unwrap();
        assert!(text.contains("I don't know the command 'dance'"));
        assert_eq!(status, Status::NeedsInput);
    }
}
