//! Overall attributes: stored on leaves, derived on composites.
//!
//! `progress` and `duration` follow the same rule and differ only in how
//! child values combine and which values a leaf accepts. Both go through
//! [`overall`] and [`assign`]. Nothing is memoized; every read of a composite
//! walks its subtree.

use std::time::Duration;

use crate::core::error::{Error, Result};
use crate::core::idea::Idea;

pub(crate) trait OverallAttribute {
    type Value: Copy + std::fmt::Debug;

    /// Attribute name used in error messages.
    const NAME: &'static str;

    fn stored(idea: &Idea) -> Self::Value;
    fn store(idea: &mut Idea, value: Self::Value);

    /// Fold child values into the composite's value. `values` is never empty.
    fn combine(values: &[Self::Value]) -> Self::Value;

    fn in_bounds(value: Self::Value) -> bool;

    /// Human description of the accepted range.
    fn bounds() -> &'static str;
}

pub(crate) fn overall<A: OverallAttribute>(idea: &Idea) -> A::Value {
    if idea.is_leaf() {
        return A::stored(idea);
    }
    let values: Vec<A::Value> = idea.children().iter().map(overall::<A>).collect();
    A::combine(&values)
}

pub(crate) fn assign<A: OverallAttribute>(idea: &mut Idea, value: A::Value) -> Result<()> {
    if !idea.is_leaf() {
        return Err(Error::invalid_state(format!(
            "cannot set an aggregate attribute directly: {} of idea #{} is derived from its {} parts",
            A::NAME,
            idea.id(),
            idea.children().len()
        )));
    }
    if !A::in_bounds(value) {
        return Err(Error::validation(format!(
            "{} {:?} must be {}",
            A::NAME,
            value,
            A::bounds()
        )));
    }
    A::store(idea, value);
    Ok(())
}

/// Completion ratio; composites take the mean of their parts.
pub(crate) struct Progress;

impl OverallAttribute for Progress {
    type Value = f64;
    const NAME: &'static str = "progress";

    fn stored(idea: &Idea) -> f64 {
        idea.progress
    }

    fn store(idea: &mut Idea, value: f64) {
        idea.progress = value;
    }

    fn combine(values: &[f64]) -> f64 {
        values.iter().sum::<f64>() / values.len() as f64
    }

    fn in_bounds(value: f64) -> bool {
        (0.0..=1.0).contains(&value)
    }

    fn bounds() -> &'static str {
        "between 0 and 1"
    }
}

/// Estimated time; composites take the sum of their parts.
pub(crate) struct Span;

impl OverallAttribute for Span {
    type Value = Duration;
    const NAME: &'static str = "duration";

    fn stored(idea: &Idea) -> Duration {
        idea.duration
    }

    fn store(idea: &mut Idea, value: Duration) {
        idea.duration = value;
    }

    // Saturates at `Duration::MAX`; leaf estimates are unbounded.
    fn combine(values: &[Duration]) -> Duration {
        values
            .iter()
            .fold(Duration::ZERO, |total, value| total.saturating_add(*value))
    }

    // Duration cannot be negative.
    fn in_bounds(_value: Duration) -> bool {
        true
    }

    fn bounds() -> &'static str {
        "non-negative"
    }
}
