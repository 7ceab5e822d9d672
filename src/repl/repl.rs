use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::{format_error, lexer::lexer::Lexer, parser::parser::parse};

use super::config::ReplMode;

pub const PROMPT: &str = ">> ";

/// Name used for interactive input in error displays.
pub const SHELL_FILE: &str = "shell";

/// Prompts, reads a line, and prints the result until `input` runs dry.
pub fn start<R: BufRead, W: Write>(mut input: R, mut output: W, mode: ReplMode) -> io::Result<()> {
    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            debug!("input closed, leaving loop");
            return Ok(());
        }

        run(&line, SHELL_FILE, mode, &mut output)?;
    }
}

/// Runs the front end once over `source` and writes the result.
///
/// Returns whether the source lexed/parsed without diagnostics.
pub fn run<W: Write>(source: &str, file: &str, mode: ReplMode, output: &mut W) -> io::Result<bool> {
    match mode {
        ReplMode::Tokens => {
            for token in Lexer::new(source.to_string()) {
                writeln!(output, "{}", token)?;
            }
            Ok(true)
        }
        ReplMode::Parse => {
            let (program, errors) = parse(source.to_string());

            if errors.is_empty() {
                writeln!(output, "{}", program)?;
                return Ok(true);
            }

            for error in &errors {
                write!(output, "{}", format_error(error, source, file))?;
            }
            Ok(false)
        }
    }
}
