//! I/O helpers: files, line input, configuration, and save/load.

pub mod config;
pub mod files;
pub mod init;
pub mod lines;
pub mod store;
