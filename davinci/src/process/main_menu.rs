//! Top-level menu bound to the root idea.

use crate::core::error::Result;
use crate::core::path::IdeaPath;
use crate::core::render::{TagFilter, outline};
use crate::process::menu::{Choice, Menu, recover, screen, unrecognized_notice};
use crate::process::{
    AddIdeaProcess, Context, ExportProcess, ImportProcess, LoadFileProcess, PlanIdeaProcess,
    Process, SaveFileProcess, Status, WorkOnIdeaProcess,
};

const GREETING: &str = "Hello, Mx. Da Vinci!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Quit,
    Add,
    Work,
    Plan,
    Show,
    Save,
    Load,
    Export,
    Import,
}

pub struct MainMenuProcess {
    menu: Menu<Action>,
    notice: Option<String>,
    greeted: bool,
}

impl Default for MainMenuProcess {
    fn default() -> Self {
        Self::new()
    }
}

impl MainMenuProcess {
    pub fn new() -> Self {
        let menu = Menu::new(Action::Quit)
            .with_command("[Add] new ideas", &[], Action::Add)
            .with_command("[Work] on your ideas", &[], Action::Work)
            .with_command("[Plan] the root idea", &[], Action::Plan)
            .with_command("[Show] the idea tree", &["tree"], Action::Show)
            .with_command("[Save] ideas to a file", &[], Action::Save)
            .with_command("[Load] ideas from a file", &[], Action::Load)
            .with_command("[Export] ideas as text", &[], Action::Export)
            .with_command("[Import] ideas from text", &[], Action::Import);
        Self {
            menu,
            notice: None,
            greeted: false,
        }
    }

    fn run(&mut self, ctx: &mut Context<'_>, action: Action) -> Result<Status> {
        let root = IdeaPath::root();
        match action {
            Action::Quit => return Ok(Status::Idle),
            Action::Add => ctx.start_process(AddIdeaProcess::new(root)),
            Action::Work => ctx.start_process(WorkOnIdeaProcess::new(root)),
            Action::Plan => ctx.start_process(PlanIdeaProcess::new(root)),
            Action::Show => {
                let tree = outline(
                    ctx.tree().root(),
                    ctx.settings().bar_width,
                    &TagFilter::default(),
                );
                self.notice = Some(tree.trim_end().to_string());
            }
            Action::Save => ctx.start_process(SaveFileProcess::new(root)),
            Action::Load => ctx.start_process(LoadFileProcess::new(root)),
            Action::Export => ctx.start_process(ExportProcess::new(root)),
            Action::Import => ctx.start_process(ImportProcess::new(root)),
        }
        Ok(Status::HasOutput)
    }
}

impl Process for MainMenuProcess {
    fn name(&self) -> &'static str {
        "main-menu"
    }

    fn start(&mut self, _ctx: &mut Context<'_>) -> Result<Status> {
        Ok(Status::HasOutput)
    }

    fn output(&mut self, ctx: &mut Context<'_>) -> Result<(String, Status)> {
        let mut header = String::new();
        if !self.greeted {
            self.greeted = true;
            header.push_str(GREETING);
            header.push('\n');
        }
        header.push_str(&format!(
            "What would you like to do with {}?",
            ctx.tree().root().name()
        ));
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
