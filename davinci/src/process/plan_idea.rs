//! Planning menu for one idea.

use crate::core::error::Result;
use crate::core::path::IdeaPath;
use crate::core::render::idea_card;
use crate::process::menu::{Choice, Menu, recover, screen, unrecognized_notice};
use crate::process::{
    AddIdeaProcess, Context, DescribeIdeaProcess, Process, Status, TagIdeaProcess, TimeIdeaProcess,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Quit,
    Break,
    Time,
    Describe,
    Tag,
}

pub struct PlanIdeaProcess {
    target: IdeaPath,
    menu: Menu<Action>,
    notice: Option<String>,
}

impl PlanIdeaProcess {
    pub fn new(target: IdeaPath) -> Self {
        let menu = Menu::new(Action::Quit)
            .with_command("[Break] this idea into smaller ideas", &[], Action::Break)
            .with_command("Define a [time] estimate for this idea", &[], Action::Time)
            .with_command("[Describe] this idea", &[], Action::Describe)
            .with_command("[Tag] this idea", &[], Action::Tag);
        Self {
            target,
            menu,
            notice: None,
        }
    }

    fn run(&mut self, ctx: &mut Context<'_>, action: Action) -> Result<Status> {
        let target = self.target.clone();
        match action {
            Action::Quit => return Ok(Status::Idle),
            Action::Break => ctx.start_process(AddIdeaProcess::new(target)),
            Action::Time => ctx.start_process(TimeIdeaProcess::new(target)),
            Action::Describe => ctx.start_process(DescribeIdeaProcess::new(target)),
            Action::Tag => ctx.start_process(TagIdeaProcess::new(target)),
        }
        Ok(Status::HasOutput)
    }
}

impl Process for PlanIdeaProcess {
    fn name(&self) -> &'static str {
        "plan-idea"
    }

    fn start(&mut self, ctx: &mut Context<'_>) -> Result<Status> {
        ctx.idea(&self.target)?;
        Ok(Status::HasOutput)
    }

    fn output(&mut self, ctx: &mut Context<'_>) -> Result<(String, Status)> {
        let idea = ctx.idea(&self.target)?;
        let header = format!(
            "Planning for idea {}:\n{}",
            idea.name(),
            idea_card(idea, ctx.settings().bar_width)
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
