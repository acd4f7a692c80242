//! An idea tree together with the counter that numbers its ideas.

use crate::core::codec;
use crate::core::error::{Error, Result};
use crate::core::idea::{IdCounter, Idea, IdeaId};
use crate::core::path::IdeaPath;

/// Name of the idea a new user starts with.
pub const DEFAULT_ROOT_NAME: &str =
    "Do All the Vastly Impractical Nonsense Conceivable In (short) Bursts Of Time";
pub const DEFAULT_ROOT_DESCRIPTION: &str = "Here's the root of all your brilliant Ideas.";

#[derive(Debug, Clone, PartialEq)]
pub struct IdeaTree {
    root: Idea,
    ids: IdCounter,
}

impl IdeaTree {
    /// Fresh tree whose root takes id 0.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        let mut ids = IdCounter::new();
        let mut root = Idea::new(&mut ids, name);
        root.set_description(description);
        Self { root, ids }
    }

    pub fn root(&self) -> &Idea {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Idea {
        &mut self.root
    }

    pub fn ids(&self) -> &IdCounter {
        &self.ids
    }

    pub fn next_id(&self) -> IdeaId {
        self.ids.peek()
    }

    /// Total number of ideas.
    pub fn len(&self) -> usize {
        self.root.count()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_leaf()
    }

    pub fn get(&self, path: &IdeaPath) -> Result<&Idea> {
        path.resolve(&self.root)
            .ok_or_else(|| missing(path))
    }

    pub fn get_mut(&mut self, path: &IdeaPath) -> Result<&mut Idea> {
        path.resolve_mut(&mut self.root)
            .ok_or_else(|| missing(path))
    }

    /// Append a new leaf under the idea at `path`, returning its id.
    pub fn add_child(&mut self, path: &IdeaPath, name: impl Into<String>) -> Result<IdeaId> {
        let parent = path
            .resolve_mut(&mut self.root)
            .ok_or_else(|| missing(path))?;
        if self.ids.is_exhausted() {
            return Err(Error::invalid_state(format!(
                "no idea ids left: the counter is at {}",
                self.ids.peek()
            )));
        }
        Ok(parent.add_child(&mut self.ids, name).id())
    }

    /// Codec text for the subtree at `path`, carrying this tree's counter.
    pub fn encode(&self, path: &IdeaPath) -> Result<String> {
        codec::encode(self.get(path)?, &self.ids)
    }

    /// Decode `text` and splice it onto the idea at `path`.
    pub fn load(&mut self, path: &IdeaPath, text: &str) -> Result<()> {
        let target = path
            .resolve_mut(&mut self.root)
            .ok_or_else(|| missing(path))?;
        codec::load_into(text, target, &mut self.ids)
    }
}

impl Default for IdeaTree {
    fn default() -> Self {
        Self::new(DEFAULT_ROOT_NAME, DEFAULT_ROOT_DESCRIPTION)
    }
}

fn missing(path: &IdeaPath) -> Error {
    Error::invalid_state(format!("no idea at {path}"))
}
