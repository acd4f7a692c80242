//! The process stack that drives a conversation.
//!
//! [`Bot`] owns the idea tree and a stack of frames. The top frame is the
//! process currently talking; its last reported [`Status`] is the stack's
//! status. Processes finishing with `Idle` are popped automatically, and
//! processes they asked for are pushed afterwards in request order.

use tracing::{debug, warn};

use crate::core::error::{Error, Result};
use crate::core::tree::IdeaTree;
use crate::io::files::TextFiles;
use crate::process::{Context, Process, Settings, Status};

struct Frame {
    process: Box<dyn Process>,
    status: Status,
}

pub struct Bot {
    tree: IdeaTree,
    files: Box<dyn TextFiles>,
    settings: Settings,
    frames: Vec<Frame>,
}

impl Bot {
    pub fn new(tree: IdeaTree, files: Box<dyn TextFiles>, settings: Settings) -> Self {
        Self {
            tree,
            files,
            settings,
            frames: Vec::new(),
        }
    }

    pub fn tree(&self) -> &IdeaTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut IdeaTree {
        &mut self.tree
    }

    /// `Idle` when nothing is running, otherwise the top process's status.
    pub fn status(&self) -> Status {
        self.frames
            .last()
            .map_or(Status::Idle, |frame| frame.status)
    }

    /// Number of processes on the stack.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Start a top-level process. The stack must be idle.
    pub fn start_process(&mut self, process: impl Process + 'static) -> Result<Status> {
        if !self.frames.is_empty() {
            return Err(Error::invalid_state(format!(
                "cannot start {} while {} is running",
                process.name(),
                self.top_name()
            )));
        }
        self.push(Box::new(process))?;
        Ok(self.status())
    }

    pub fn get_output(&mut self) -> Result<String> {
        self.expect_status(Status::HasOutput, "get output")?;
        self.drive(|process, ctx| process.output(ctx))
    }

    pub fn handle_input(&mut self, line: &str) -> Result<()> {
        self.expect_status(Status::NeedsInput, "handle input")?;
        self.drive(|process, ctx| Ok(((), process.handle_input(ctx, line)?)))
    }

    /// Pop the top process, calling its `finish`.
    pub fn finish_current_process(&mut self) -> Result<()> {
        if self.frames.is_empty() {
            return Err(Error::invalid_state("no process is running"));
        }
        self.pop()
    }

    fn top_name(&self) -> &'static str {
        self.frames
            .last()
            .map_or("nothing", |frame| frame.process.name())
    }

    fn expect_status(&self, wanted: Status, action: &str) -> Result<()> {
        let status = self.status();
        if status == wanted {
            return Ok(());
        }
        Err(Error::invalid_state(format!(
            "cannot {action}: {} is {status:?}",
            self.top_name()
        )))
    }

    /// Run one call on the top process, then settle the stack.
    fn drive<T>(
        &mut self,
        call: impl FnOnce(&mut Box<dyn Process>, &mut Context<'_>) -> Result<(T, Status)>,
    ) -> Result<T> {
        let (result, spawned) = {
            let frame = self
                .frames
                .last_mut()
                .ok_or_else(|| Error::invalid_state("no process is running"))?;
            let mut ctx = Context::new(&mut self.tree, self.files.as_ref(), &self.settings);
            let result = call(&mut frame.process, &mut ctx);
            if let Ok((_, status)) = &result {
                frame.status = *status;
            }
            (result, ctx.into_spawned())
        };

        match result {
            Err(err) => {
                warn!(
                    process = self.top_name(),
                    discarded = spawned.len(),
                    error = %err,
                    "process failed; popping it"
                );
                self.pop_quietly();
                Err(err)
            }
            Ok((value, status)) => {
                if status == Status::Idle {
                    self.pop()?;
                }
                for child in spawned {
                    self.push(child)?;
                }
                Ok(value)
            }
        }
    }

    fn push(&mut self, mut process: Box<dyn Process>) -> Result<()> {
        debug!(
            process = process.name(),
            depth = self.frames.len() + 1,
            "starting process"
        );
        let mut ctx = Context::new(&mut self.tree, self.files.as_ref(), &self.settings);
        let result = process.start(&mut ctx);
        let spawned = ctx.into_spawned();

        let status = match result {
            Ok(status) => status,
            Err(err) => {
                let mut ctx = Context::new(&mut self.tree, self.files.as_ref(), &self.settings);
                if let Err(finish_err) = process.finish(&mut ctx) {
                    warn!(process = process.name(), error = %finish_err, "finish failed");
                }
                return Err(err);
            }
        };

        self.frames.push(Frame { process, status });
        if status == Status::Idle {
            self.pop()?;
        }
        for child in spawned {
            self.push(child)?;
        }
        Ok(())
    }

    fn pop(&mut self) -> Result<()> {
        let Some(mut frame) = self.frames.pop() else {
            return Ok(());
        };
        debug!(
            process = frame.process.name(),
            depth = self.frames.len(),
            "finishing process"
        );
        let mut ctx = Context::new(&mut self.tree, self.files.as_ref(), &self.settings);
        frame.process.finish(&mut ctx)
    }

    fn pop_quietly(&mut self) {
        if let Err(err) = self.pop() {
            warn!(error = %err, "finish failed");
        }
    }
}
