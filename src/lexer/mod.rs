//! Lexical analysis module.
//!
//! This module contains the lexer (tokenizer) that converts source text
//! into a stream of tokens for parsing. It handles:
//!
//! - Whitespace skipping
//! - Recognition of keywords, identifiers, integers and operators
//! - Two-character operators (`==`, `!=`) via one byte of lookahead
//! - Illegal characters, which become tokens rather than errors
//! - Token position tracking for error reporting

pub mod lexer;
pub mod tokens;
