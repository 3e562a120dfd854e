//! Library surface of the `elev` command-line tool.
//!
//! The binary's argument parsing and command dispatch live in `main.rs`;
//! everything here is reusable and tested on its own.

pub mod config;
pub mod logging;
pub mod session;
pub mod summary;
