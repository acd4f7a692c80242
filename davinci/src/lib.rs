//! Da Vinci Bot: a conversational planner for a tree of ideas.
//!
//! Ideas form a tree whose composite nodes derive progress and time from
//! their parts. A stack of small conversational processes edits the tree one
//! line of input at a time.
//!
//! - **[`core`]**: The idea tree, aggregation, the save codec, and rendering.
//!   No I/O.
//! - **[`process`]**: The process protocol, menus, and built-in processes.
//! - **[`bot`]**: The process stack.
//! - **[`io`]**: Files, line input, configuration.
//!
//! [`session`] drives a [`bot::Bot`] over line input for the CLI.

pub mod bot;
pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod process;
pub mod session;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use crate::core::error::{Error, Result};
