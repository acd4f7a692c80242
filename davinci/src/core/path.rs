//! Child-index addresses of ideas inside a tree.

use std::fmt;

use crate::core::idea::Idea;

/// Sequence of child indices from the tree root. Empty means the root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct IdeaPath(Vec<usize>);

impl IdeaPath {
    pub fn root() -> Self {
        Self::default()
    }

    /// Address of the `index`-th child of this idea.
    pub fn child(&self, index: usize) -> Self {
        let mut steps = self.0.clone();
        steps.push(index);
        Self(steps)
    }

    pub fn resolve<'a>(&self, root: &'a Idea) -> Option<&'a Idea> {
        self.0
            .iter()
            .try_fold(root, |idea, &index| idea.child(index))
    }

    pub fn resolve_mut<'a>(&self, root: &'a mut Idea) -> Option<&'a mut Idea> {
        let mut idea = root;
        for &index in &self.0 {
            idea = idea.child_mut(index)?;
        }
        Some(idea)
    }
}

impl From<Vec<usize>> for IdeaPath {
    fn from(steps: Vec<usize>) -> Self {
        Self(steps)
    }
}

impl fmt::Display for IdeaPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("root")?;
        for index in &self.0 {
            write!(f, "/{index}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::idea::IdCounter;

    fn sample() -> Idea {
        let mut ids = IdCounter::new();
        let mut root = Idea::new(&mut ids, "root");
        root.add_child(&mut ids, "a").add_child(&mut ids, "a1");
        root.add_child(&mut ids, "b");
        root
    }

    #[test]
    fn resolve_walks_child_indices() {
        let root = sample();
        assert_eq!(IdeaPath::root().resolve(&root).map(Idea::name), Some("root"));
        let a1 = IdeaPath::root().child(0).child(0);
        assert_eq!(a1.resolve(&root).map(Idea::name), Some("a1"));
        assert_eq!(IdeaPath::from(vec![1]).resolve(&root).map(Idea::name), Some("b"));
    }

    #[test]
    fn resolve_missing_index_is_none() {
        let mut root = sample();
        let gone = IdeaPath::from(vec![1, 0]);
        assert!(gone.resolve(&root).is_none());
        assert!(gone.resolve_mut(&mut root).is_none());
    }

    #[test]
    fn display_lists_indices_from_root() {
        assert_eq!(IdeaPath::root().to_string(), "root");
        assert_eq!(IdeaPath::from(vec![0, 0]).to_string(), "root/0/0");
    }
}
