//! Deterministic, pure logic for the idea tree.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! data structures and return deterministic outputs suitable for tests.

pub(crate) mod attribute;
pub mod codec;
pub mod error;
pub mod idea;
pub mod path;
pub mod render;
pub mod span;
pub mod tree;
