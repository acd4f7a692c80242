//! The idea node: identity, free-text fields, tags, and owned children.
//!
//! An idea with no children is a *leaf* and stores its own progress and
//! duration. An idea with children is *composite*; those attributes are
//! derived from its parts on every read (see [`crate::core::attribute`]).

use std::collections::BTreeSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::attribute::{self, Progress, Span};
use crate::core::error::Result;

/// Globally unique idea identifier.
pub type IdeaId = u64;

/// Issues idea ids in increasing order.
///
/// The counter is explicit state rather than a global so that a loaded tree
/// can resume numbering past its own ids and tests stay isolated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IdCounter {
    next: IdeaId,
}

impl IdCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Largest counter value a save file may carry.
    pub const MAX: IdeaId = IdeaId::MAX - 1;

    /// Return the next id and advance. Callers check [`IdCounter::is_exhausted`]
    /// first; past [`IdCounter::MAX`] the counter stops advancing.
    pub fn next_id(&mut self) -> IdeaId {
        let id = self.next;
        self.next = self.next.saturating_add(1);
        id
    }

    /// Handing out another id would push the counter past [`IdCounter::MAX`].
    pub fn is_exhausted(&self) -> bool {
        self.next >= Self::MAX
    }

    /// The id the next call to [`IdCounter::next_id`] will return.
    pub fn peek(&self) -> IdeaId {
        self.next
    }

    /// Move the high-water mark. Only the decode path should call this.
    pub fn reset_to(&mut self, next: IdeaId) {
        self.next = next;
    }
}

/// Outcome of [`Idea::has_tags`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HasTagsResult {
    /// Every queried tag is present.
    pub all: bool,
    /// At least one queried tag is present.
    pub some: bool,
    /// No queried tag is present.
    pub none: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Idea {
    id: IdeaId,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default, with = "tag_map")]
    tags: BTreeSet<String>,
    #[serde(default)]
    children: Vec<Idea>,
    #[serde(
        rename = "_progress",
        default,
        deserialize_with = "stored_progress::deserialize"
    )]
    pub(super) progress: f64,
    #[serde(rename = "_duration", default, with = "span_secs")]
    pub(super) duration: Duration,
}

impl Idea {
    /// Create an unstructured leaf idea with the next id from `ids`.
    pub fn new(ids: &mut IdCounter, name: impl Into<String>) -> Self {
        Self {
            id: ids.next_id(),
            name: name.into(),
            description: String::new(),
            tags: BTreeSet::new(),
            children: Vec::new(),
            progress: 0.0,
            duration: Duration::ZERO,
        }
    }

    pub fn id(&self) -> IdeaId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn children(&self) -> &[Idea] {
        &self.children
    }

    pub fn child(&self, index: usize) -> Option<&Idea> {
        self.children.get(index)
    }

    pub fn child_mut(&mut self, index: usize) -> Option<&mut Idea> {
        self.children.get_mut(index)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Append a new leaf child and return it.
    pub fn add_child(&mut self, ids: &mut IdCounter, name: impl Into<String>) -> &mut Idea {
        self.children.push(Idea::new(ids, name));
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// Stored progress for a leaf, mean of the parts for a composite.
    pub fn progress(&self) -> f64 {
        attribute::overall::<Progress>(self)
    }

    /// Set a leaf's progress. Fails on composites and outside `[0, 1]`.
    pub fn set_progress(&mut self, progress: f64) -> Result<()> {
        attribute::assign::<Progress>(self, progress)
    }

    /// Stored duration for a leaf, sum of the parts for a composite.
    pub fn duration(&self) -> Duration {
        attribute::overall::<Span>(self)
    }

    /// Set a leaf's duration. Fails on composites.
    pub fn set_duration(&mut self, duration: Duration) -> Result<()> {
        attribute::assign::<Span>(self, duration)
    }

    /// `duration * (1 - progress)`.
    pub fn remaining_duration(&self) -> Duration {
        let left = (1.0 - self.progress()).clamp(0.0, 1.0);
        Duration::try_from_secs_f64(self.duration().as_secs_f64() * left).unwrap_or(Duration::MAX)
    }

    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }

    /// Drop direct children that are fully done. Returns how many were removed.
    pub fn clear_finished_children(&mut self) -> usize {
        let before = self.children.len();
        self.children.retain(|child| !child.is_finished());
        before - self.children.len()
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Returns true if the tag was not already present.
    pub fn add_tag(&mut self, tag: impl Into<String>) -> bool {
        self.tags.insert(tag.into())
    }

    /// Returns true if the tag was present.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        self.tags.remove(tag)
    }

    /// Flip membership of `tag`, returning whether it is now present.
    pub fn toggle_tag(&mut self, tag: &str) -> bool {
        if self.tags.remove(tag) {
            false
        } else {
            self.tags.insert(tag.to_string());
            true
        }
    }

    /// Evaluate `all`/`some`/`none` for `tags` in one pass.
    pub fn has_tags<S: AsRef<str>>(&self, tags: &[S]) -> HasTagsResult {
        let mut all = true;
        let mut some = false;
        for tag in tags {
            if self.tags.contains(tag.as_ref()) {
                some = true;
            } else {
                all = false;
            }
        }
        HasTagsResult {
            all,
            some,
            none: !some,
        }
    }

    /// Take over `other`'s id and children in place.
    ///
    /// Name, description, tags and stored leaf values stay as they are. The
    /// node keeps its position in the tree, so anything addressing it sees
    /// the spliced data.
    pub fn splice_from(&mut self, other: Idea) {
        self.id = other.id;
        self.children = other.children;
    }

    /// Number of ideas in this subtree, including this one.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Idea::count).sum::<usize>()
    }

    /// Largest id in this subtree.
    pub fn max_id(&self) -> IdeaId {
        self.children
            .iter()
            .map(Idea::max_id)
            .fold(self.id, IdeaId::max)
    }
}

/// Tags travel as `{"tag": true}`; entries mapped to `false` are dropped.
mod tag_map {
    use std::collections::{BTreeMap, BTreeSet};

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(tags: &BTreeSet<String>, serializer: S) -> Result<S::Ok, S::Error> {
        let map: BTreeMap<&str, bool> = tags.iter().map(|tag| (tag.as_str(), true)).collect();
        map.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BTreeSet<String>, D::Error> {
        let map = BTreeMap::<String, bool>::deserialize(deserializer)?;
        Ok(map
            .into_iter()
            .filter_map(|(tag, on)| on.then_some(tag))
            .collect())
    }
}

mod stored_progress {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        let value = f64::deserialize(deserializer)?;
        if !(0.0..=1.0).contains(&value) {
            return Err(D::Error::custom(format!(
                "_progress {value} is outside [0, 1]"
            )));
        }
        Ok(value)
    }
}

/// Durations travel as fractional seconds.
mod span_secs {
    use std::time::Duration;

    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(duration.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs)
            .map_err(|err| D::Error::custom(format!("_duration {secs}: {err}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Error;

    fn idea(name: &str) -> (IdCounter, Idea) {
        let mut ids = IdCounter::new();
        let idea = Idea::new(&mut ids, name);
        (ids, idea)
    }

    #[test]
    fn ids_are_assigned_in_creation_order() {
        let (mut ids, mut root) = idea("root");
        let a = root.add_child(&mut ids, "a").id();
        let b = root.add_child(&mut ids, "b").id();
        assert_eq!((root.id(), a, b), (0, 1, 2));
        assert_eq!(ids.peek(), 3);
    }

    #[test]
    fn leaf_progress_starts_at_zero_and_is_settable() {
        let (_, mut leaf) = idea("leaf");
        assert_eq!(leaf.progress(), 0.0);
        leaf.set_progress(0.5).expect("set");
        assert_eq!(leaf.progress(), 0.5);
        leaf.set_progress(1.0).expect("set");
        assert_eq!(leaf.progress(), 1.0);
    }

    #[test]
    fn leaf_progress_rejects_out_of_range() {
        let (_, mut leaf) = idea("leaf");
        for bad in [-0.1, 1.1, -1.0, 2.0, f64::NAN] {
            let err = leaf.set_progress(bad).expect_err("out of range");
            assert!(matches!(err, Error::Validation(_)), "{bad}: {err}");
        }
        assert_eq!(leaf.progress(), 0.0);
    }

    #[test]
    fn each_leaf_keeps_its_own_progress() {
        let (mut ids, mut root) = idea("root");
        root.add_child(&mut ids, "a").set_progress(0.2).expect("a");
        root.add_child(&mut ids, "b").set_progress(0.9).expect("b");
        assert_eq!(root.children()[0].progress(), 0.2);
        assert_eq!(root.children()[1].progress(), 0.9);
    }

    #[test]
    fn composite_progress_is_mean_of_children() {
        let (mut ids, mut root) = idea("root");
        root.add_child(&mut ids, "a");
        root.add_child(&mut ids, "b");
        assert_eq!(root.progress(), 0.0);

        root.child_mut(0).unwrap().set_progress(0.5).unwrap();
        assert_eq!(root.progress(), 0.25);
        root.child_mut(1).unwrap().set_progress(0.5).unwrap();
        assert_eq!(root.progress(), 0.5);
        root.child_mut(0).unwrap().set_progress(1.0).unwrap();
        assert_eq!(root.progress(), 0.75);
        root.child_mut(1).unwrap().set_progress(1.0).unwrap();
        assert_eq!(root.progress(), 1.0);
    }

    #[test]
    fn composite_rejects_direct_assignment() {
        let (mut ids, mut root) = idea("root");
        root.add_child(&mut ids, "a");
        let err = root.set_progress(1.0).expect_err("composite");
        assert!(matches!(err, Error::InvalidState(_)));
        let err = root
            .set_duration(Duration::from_secs(60))
            .expect_err("composite");
        assert!(matches!(err, Error::InvalidState(_)));
    }

    #[test]
    fn nested_progress_recurses_through_subtrees() {
        let (mut ids, mut root) = idea("root");
        let group = root.add_child(&mut ids, "group");
        group.add_child(&mut ids, "g1").set_progress(1.0).unwrap();
        group.add_child(&mut ids, "g2");
        root.add_child(&mut ids, "solo").set_progress(0.5).unwrap();
        assert_eq!(root.children()[0].progress(), 0.5);
        assert_eq!(root.progress(), 0.5);
    }

    #[test]
    fn duration_sums_and_remaining_scales_by_progress() {
        let (mut ids, mut root) = idea("root");
        let a = root.add_child(&mut ids, "a");
        a.set_duration(Duration::from_secs(3600)).unwrap();
        a.set_progress(0.5).unwrap();
        root.add_child(&mut ids, "b")
            .set_duration(Duration::from_secs(1800))
            .unwrap();

        assert_eq!(root.duration(), Duration::from_secs(5400));
        // progress 0.25 over 90 minutes
        assert_eq!(root.remaining_duration(), Duration::from_secs(4050));
        assert_eq!(root.children()[0].remaining_duration(), Duration::from_secs(1800));
    }

    #[test]
    fn tag_operations_are_idempotent() {
        let (_, mut leaf) = idea("leaf");
        assert!(leaf.add_tag("todo"));
        assert!(!leaf.add_tag("todo"));
        assert!(leaf.has_tag("todo"));
        assert!(leaf.remove_tag("todo"));
        assert!(!leaf.remove_tag("todo"));
        assert!(!leaf.has_tag("todo"));
    }

    #[test]
    fn toggle_twice_restores_membership() {
        let (_, mut leaf) = idea("leaf");
        assert!(leaf.toggle_tag("urgent"));
        assert!(leaf.has_tag("urgent"));
        assert!(!leaf.toggle_tag("urgent"));
        assert!(!leaf.has_tag("urgent"));
    }

    #[test]
    fn has_tags_reports_all_some_none() {
        let (_, mut leaf) = idea("leaf");
        leaf.add_tag("a");
        leaf.add_tag("b");

        let both = leaf.has_tags(&["a", "b"]);
        assert_eq!(both, HasTagsResult { all: true, some: true, none: false });

        let partial = leaf.has_tags(&["a", "z"]);
        assert_eq!(partial, HasTagsResult { all: false, some: true, none: false });

        let missing = leaf.has_tags(&["y", "z"]);
        assert_eq!(missing, HasTagsResult { all: false, some: false, none: true });

        let empty: [&str; 0] = [];
        assert_eq!(leaf.has_tags(&empty), HasTagsResult { all: true, some: false, none: true });
    }

    #[test]
    fn splice_replaces_id_and_children_only() {
        let (mut ids, mut target) = idea("target");
        target.set_description("kept");
        target.add_tag("kept");

        let mut other = Idea::new(&mut ids, "other");
        other.add_child(&mut ids, "x");
        other.add_child(&mut ids, "y");
        let other_id = other.id();

        target.splice_from(other);
        assert_eq!(target.id(), other_id);
        assert_eq!(target.name(), "target");
        assert_eq!(target.description(), "kept");
        assert!(target.has_tag("kept"));
        let names: Vec<&str> = target.children().iter().map(Idea::name).collect();
        assert_eq!(names, vec!["x", "y"]);
    }

    #[test]
    fn clear_finished_children_keeps_open_parts() {
        let (mut ids, mut root) = idea("root");
        root.add_child(&mut ids, "done").set_progress(1.0).unwrap();
        root.add_child(&mut ids, "open").set_progress(0.3).unwrap();
        assert_eq!(root.clear_finished_children(), 1);
        assert_eq!(root.children().len(), 1);
        assert_eq!(root.children()[0].name(), "open");
    }

    #[test]
    fn count_and_max_id_cover_subtree() {
        let (mut ids, mut root) = idea("root");
        root.add_child(&mut ids, "a").add_child(&mut ids, "a1");
        root.add_child(&mut ids, "b");
        assert_eq!(root.count(), 4);
        assert_eq!(root.max_id(), 3);
    }
}
