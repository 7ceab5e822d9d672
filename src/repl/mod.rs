//! Line-oriented front end driver.
//!
//! Reads source a line at a time and shows what the lexer or parser makes
//! of it. Used by the binary both interactively and for whole files.

pub mod config;
pub mod repl;
