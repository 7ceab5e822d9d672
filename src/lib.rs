#![allow(clippy::module_inception)]

use std::fmt::Write;

use crate::errors::errors::{Error, ErrorTip};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod repl;

/// Byte offset into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position(pub u32);

impl Position {
    pub fn null() -> Self {
        Position(0)
    }

    /// Offsets past `u32::MAX` saturate.
    pub fn from_offset(offset: usize) -> Self {
        Position(u32::try_from(offset).unwrap_or(u32::MAX))
    }
}

/// Finds the line that contains `position`.
///
/// Returns the 1-based line number, the text of that line (including its
/// trailing newline, if any) and the offset of `position` inside the line.
/// Offsets past the end of the source resolve to the end of the last line.
pub fn get_line_at_position(source: &str, position: u32) -> (usize, String, usize) {
    let pos = position as usize;

    let mut start = 0;
    let mut line_number = 1;
    let mut last_line = String::new();

    for line in source.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            let line_pos = pos - start;
            return (line_number, line.to_string(), line_pos);
        }

        start = end;
        line_number += 1;
        last_line = line.to_string();
    }

    if last_line.is_empty() {
        return (1, String::new(), 0);
    }

    // EOF sits after the final character. A trailing newline already moved
    // us onto a fresh (empty) line.
    if last_line.ends_with('\n') {
        (line_number, String::new(), 0)
    } else {
        let line_pos = last_line.len();
        (line_number - 1, last_line, line_pos)
    }
}

/// Renders an error the same way the binary prints it:
///
/// ```text
/// Error: UnexpectedToken (expected next token to be Assignment, got Integer instead)
/// -> shell
///   |
/// 1 | let x 5;
///   | ------^
/// ```
pub fn format_error(error: &Error, source: &str, file: &str) -> String {
    let position = error.get_position();
    let (line, line_text, line_pos) = get_line_at_position(source, position.0);

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    let mut out = String::new();

    // Writing into a String cannot fail.
    if let ErrorTip::None = error.get_tip() {
        let _ = writeln!(out, "Error: {}", error.get_error_name());
    } else {
        let _ = writeln!(out, "Error: {} ({})", error.get_error_name(), error.get_tip());
    }
    let _ = writeln!(out, "-> {}", file);
    let _ = writeln!(out, "{:>padding$}", "|");

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    let _ = writeln!(out, "{} | {}", line_string, line_text_removed.trim_end());

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;

    let _ = writeln!(out, "{:>padding$} {:->arrows$}", "|", "^");

    out
}

pub fn display_error(error: &Error, source: &str, file: &str) {
    print!("{}", format_error(error, source, file));
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' || c == '\t' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}
