use tracing::trace;

use crate::{Position, MK_TOKEN};

use super::tokens::{lookup_identifier, Token, TokenKind, SINGLE_CHAR_LOOKUP};

/// Pull-based scanner over a source string.
///
/// `position` points at `ch`, `read_position` at the byte after it. Once the
/// cursor passes the last byte `ch` is NUL and every further call to
/// [`Lexer::next_token`] returns an EOF token.
#[derive(Clone, Debug)]
pub struct Lexer {
    source: String,
    position: usize,
    read_position: usize,
    ch: u8,
}

impl Lexer {
    pub fn new(source: String) -> Lexer {
        let mut lexer = Lexer {
            source,
            position: 0,
            read_position: 0,
            ch: 0,
        };
        lexer.read_char();
        lexer
    }

    /// Moves the cursor one byte forward. Never moves past the end of input.
    pub fn read_char(&mut self) {
        let len = self.source.len();

        self.ch = if self.read_position >= len {
            0
        } else {
            self.source.as_bytes()[self.read_position]
        };

        self.position = self.read_position.min(len);
        if self.read_position <= len {
            self.read_position += 1;
        }
    }

    pub fn peek_char(&self) -> u8 {
        self.source
            .as_bytes()
            .get(self.read_position)
            .copied()
            .unwrap_or(0)
    }

    pub fn at_eof(&self) -> bool {
        self.position >= self.source.len()
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let start = Position::from_offset(self.position);

        if self.at_eof() {
            return MK_TOKEN!(TokenKind::EOF, String::new(), start);
        }

        let ch = self.ch;
        let token = match ch {
            b'=' | b'!' if self.peek_char() == b'=' => {
                let first = ch;
                self.read_char();
                let literal = format!("{}{}", first as char, self.ch as char);
                let kind = if first == b'=' {
                    TokenKind::Equals
                } else {
                    TokenKind::NotEquals
                };
                MK_TOKEN!(kind, literal, start)
            }
            ch if is_letter(ch) => {
                let literal = self.read_identifier();
                let token = MK_TOKEN!(lookup_identifier(&literal), literal, start);
                trace!(kind = %token.kind, literal = %token.literal, "lexed token");
                return token;
            }
            ch if is_digit(ch) => {
                let literal = self.read_number();
                let token = MK_TOKEN!(TokenKind::Integer, literal, start);
                trace!(kind = %token.kind, literal = %token.literal, "lexed token");
                return token;
            }
            ch => match SINGLE_CHAR_LOOKUP.get(&ch) {
                Some(kind) => MK_TOKEN!(*kind, (ch as char).to_string(), start),
                None => self.read_illegal(start),
            },
        };

        self.read_char();
        trace!(kind = %token.kind, literal = %token.literal, "lexed token");
        token
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.ch, b' ' | b'\t' | b'\n' | b'\r') {
            self.read_char();
        }
    }

    fn read_identifier(&mut self) -> String {
        self.read_while(is_letter)
    }

    fn read_number(&mut self) -> String {
        self.read_while(is_digit)
    }

    fn read_while(&mut self, predicate: fn(u8) -> bool) -> String {
        let start = self.position;
        while !self.at_eof() && predicate(self.ch) {
            self.read_char();
        }
        self.source[start..self.position].to_string()
    }

    /// Builds an `Illegal` token for the character under the cursor. A
    /// multi-byte UTF-8 character is kept whole so the literal stays valid
    /// text; the cursor is left on its last byte for `next_token` to step past.
    fn read_illegal(&mut self, start: Position) -> Token {
        let literal = self.source[self.position..]
            .chars()
            .next()
            .map(String::from)
            .unwrap_or_default();

        for _ in 1..literal.len() {
            self.read_char();
        }

        MK_TOKEN!(TokenKind::Illegal, literal, start)
    }
}

impl Iterator for Lexer {
    type Item = Token;

    /// Yields tokens up to, but not including, end of input.
    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        if token.is_eof() {
            None
        } else {
            Some(token)
        }
    }
}

fn is_letter(ch: u8) -> bool {
    ch.is_ascii_alphabetic() || ch == b'_'
}

fn is_digit(ch: u8) -> bool {
    ch.is_ascii_digit()
}

/// Lexes the whole source, returning every token up to and including EOF.
pub fn tokenize(source: String) -> Vec<Token> {
    let mut lexer = Lexer::new(source);
    let mut tokens = vec![];

    loop {
        let token = lexer.next_token();
        let done = token.is_eof();
        tokens.push(token);

        if done {
            return tokens;
        }
    }
}
