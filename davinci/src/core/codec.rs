//! Counter-prefixed JSON form of an idea tree.
//!
//! The text is the decimal id high-water mark followed immediately by the
//! tree as a JSON object, e.g. `3{"id":0,"name":"root",...}`. Restoring the
//! counter on load keeps new ideas from reusing ids already in the file.

use tracing::{debug, warn};

use crate::core::error::{Error, Result};
use crate::core::idea::{IdCounter, Idea, IdeaId};

/// A decoded tree with the counter value it was saved with.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    pub next_id: IdeaId,
    pub root: Idea,
}

pub fn encode(root: &Idea, ids: &IdCounter) -> Result<String> {
    let json = serde_json::to_string(root)
        .map_err(|err| Error::invalid_state(format!("serialize idea #{}: {err}", root.id())))?;
    Ok(format!("{}{}", ids.peek(), json))
}

pub fn decode(text: &str) -> Result<Decoded> {
    let text = text.trim();
    let (prefix, json) = split_counter(text)?;
    let next_id = prefix
        .parse::<IdeaId>()
        .map_err(|err| Error::parse(format!("id counter '{prefix}': {err}")))?;
    if next_id > IdCounter::MAX {
        return Err(Error::parse(format!(
            "id counter {next_id} leaves no room for new ideas"
        )));
    }
    let root: Idea =
        serde_json::from_str(json).map_err(|err| Error::parse(format!("idea JSON: {err}")))?;

    if next_id <= root.max_id() {
        warn!(
            next_id,
            max_id = root.max_id(),
            "saved id counter does not exceed ids in the tree"
        );
    }
    debug!(next_id, ideas = root.count(), "decoded idea tree");
    Ok(Decoded { next_id, root })
}

/// Decode `text`, restore the counter, and splice the tree onto `target`.
pub fn load_into(text: &str, target: &mut Idea, ids: &mut IdCounter) -> Result<()> {
    let Decoded { next_id, root } = decode(text)?;
    ids.reset_to(next_id);
    target.splice_from(root);
    Ok(())
}

fn split_counter(text: &str) -> Result<(&str, &str)> {
    let Some(json_start) = text.find('{') else {
        if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::parse("missing idea JSON after id counter"));
        }
        return Err(Error::parse("no idea JSON object found"));
    };
    let (prefix, json) = text.split_at(json_start);
    if prefix.is_empty() {
        return Err(Error::parse("missing id counter prefix"));
    }
    if !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::parse(format!(
            "id counter prefix '{prefix}' is not a decimal number"
        )));
    }
    Ok((prefix, json))
}
