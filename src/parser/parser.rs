//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the program-level loop.
//! The parser pulls tokens from a [`Lexer`] on demand and always holds two
//! of them: the token being parsed and the one after it.
//!
//! It maintains lookup tables for:
//! - Statement handlers
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix expressions
//!
//! Binding powers live in a shared table, see [`super::lookups::binding_power`].

use std::collections::HashMap;

use tracing::debug;

use crate::{
    ast::ast::Program,
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::Lexer,
        tokens::{Token, TokenKind},
    },
    Position,
};

use super::{
    lookups::{
        create_token_lookups, LEDHandler, LEDLookup, NUDHandler, NUDLookup, StmtHandler,
        StmtLookup,
    },
    stmt::parse_stmt,
};

/// The main parser structure that maintains parsing state.
pub struct Parser {
    /// Source of tokens, owned for the parser's lifetime
    lexer: Lexer,
    /// The token under examination
    current_token: Token,
    /// The token after `current_token`
    peek_token: Token,
    /// Diagnostics in the order they were found
    errors: Vec<Error>,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
}

impl Parser {
    /// Creates a new Parser reading from `lexer`, with both lookahead slots
    /// filled and the default handlers registered.
    pub fn new(mut lexer: Lexer) -> Self {
        let current_token = lexer.next_token();
        let peek_token = lexer.next_token();

        let mut parser = Parser {
            lexer,
            current_token,
            peek_token,
            errors: vec![],
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
        };
        create_token_lookups(&mut parser);

        parser
    }

    /// Parses statements until end of input.
    ///
    /// Always returns a program. Statements that failed to parse are left
    /// out and their errors are available from [`Parser::errors`]; a caller
    /// must not trust the tree while that list is non-empty.
    pub fn parse_program(&mut self) -> Program {
        let mut program = Program::new();

        while !self.current_token_is(TokenKind::EOF) {
            let start = self.current_token.position;
            match parse_stmt(self) {
                Ok(stmt) => {
                    program.statements.push(stmt);
                    self.advance();
                }
                Err(error) => {
                    self.record_error(error);
                    self.synchronize(start);
                }
            }
        }

        debug!(
            statements = program.len(),
            errors = self.errors.len(),
            "parsed program"
        );

        program
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.current_token
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token.kind
    }

    pub fn peek_token(&self) -> &Token {
        &self.peek_token
    }

    pub fn peek_token_kind(&self) -> TokenKind {
        self.peek_token.kind
    }

    pub fn current_token_is(&self, kind: TokenKind) -> bool {
        self.current_token.kind == kind
    }

    pub fn peek_token_is(&self, kind: TokenKind) -> bool {
        self.peek_token.kind == kind
    }

    /// Shifts the peek token into the current slot and pulls a new peek token.
    pub fn advance(&mut self) {
        let next = self.lexer.next_token();
        self.current_token = std::mem::replace(&mut self.peek_token, next);
    }

    /// Advances if the next token is `expected_kind` and returns the new
    /// current token, otherwise leaves the cursor alone and fails.
    pub fn expect_peek(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        if self.peek_token_is(expected_kind) {
            self.advance();
            Ok(self.current_token.clone())
        } else {
            Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    expected: expected_kind,
                    found: self.peek_token.kind,
                },
                self.peek_token.position,
            ))
        }
    }

    /// Steps onto the next token only if it is `kind`.
    pub fn skip_optional(&mut self, kind: TokenKind) {
        if self.peek_token_is(kind) {
            self.advance();
        }
    }

    /// Diagnostics collected so far, in source order.
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    /// Human-readable form of [`Parser::errors`].
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(|error| error.to_string()).collect()
    }

    pub fn into_errors(self) -> Vec<Error> {
        self.errors
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Returns a reference to the LED (left denotation) lookup table.
    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    /// Registers a left denotation (infix) handler for a token.
    pub fn led(&mut self, kind: TokenKind, led_fn: LEDHandler) {
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Returns the position of the current token.
    pub fn get_position(&self) -> Position {
        self.current_token.position
    }

    fn record_error(&mut self, error: Error) {
        debug!(
            name = error.get_error_name(),
            position = error.get_position().0,
            message = %error,
            "recorded parse error"
        );
        self.errors.push(error);
    }

    /// Skips the rest of a broken statement that began at `start`. Stops
    /// after a `;`, on a `let`/`return` other than the one that began the
    /// statement, or at EOF.
    fn synchronize(&mut self, start: Position) {
        loop {
            match self.current_token_kind() {
                TokenKind::Semicolon => {
                    self.advance();
                    break;
                }
                TokenKind::EOF => break,
                TokenKind::Let | TokenKind::Return if self.current_token.position != start => {
                    break
                }
                _ => self.advance(),
            }
        }

        debug!(
            kind = %self.current_token.kind,
            position = self.current_token.position.0,
            "resynchronised"
        );
    }
}

/// Parses source text into an Abstract Syntax Tree.
///
/// Convenience entry point that builds the lexer and parser, runs
/// [`Parser::parse_program`] and hands back the tree with its diagnostics.
pub fn parse(source: String) -> (Program, Vec<Error>) {
    let mut parser = Parser::new(Lexer::new(source));
    let program = parser.parse_program();

    (program, parser.into_errors())
}
