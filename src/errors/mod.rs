//! Error types and error handling for the front end.
//!
//! This module defines the diagnostics produced while lexing and parsing:
//!
//! - Error structures with source position information
//! - One variant per failure kind (illegal input, missing token,
//!   missing prefix handler, bad integer literal)
//! - Error names and suggestions used by the caret display

pub mod errors;

#[cfg(test)]
mod tests;
