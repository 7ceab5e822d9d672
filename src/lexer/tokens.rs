use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Position;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("fn", TokenKind::Fn);
        map.insert("let", TokenKind::Let);
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("return", TokenKind::Return);
        map
    };

    /// Every token that is exactly one byte long. `=` and `!` also start
    /// two-byte operators, which the lexer checks for before consulting this.
    pub static ref SINGLE_CHAR_LOOKUP: HashMap<u8, TokenKind> = {
        let mut map = HashMap::new();
        map.insert(b'=', TokenKind::Assignment);
        map.insert(b'+', TokenKind::Plus);
        map.insert(b'-', TokenKind::Dash);
        map.insert(b'!', TokenKind::Not);
        map.insert(b'*', TokenKind::Star);
        map.insert(b'/', TokenKind::Slash);
        map.insert(b'<', TokenKind::Less);
        map.insert(b'>', TokenKind::Greater);
        map.insert(b',', TokenKind::Comma);
        map.insert(b';', TokenKind::Semicolon);
        map.insert(b'(', TokenKind::OpenParen);
        map.insert(b')', TokenKind::CloseParen);
        map.insert(b'{', TokenKind::OpenCurly);
        map.insert(b'}', TokenKind::CloseCurly);
        map
    };
}

/// Classifies a run of identifier characters as a keyword or a plain identifier.
pub fn lookup_identifier(identifier: &str) -> TokenKind {
    RESERVED_LOOKUP
        .get(identifier)
        .copied()
        .unwrap_or(TokenKind::Identifier)
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Illegal,
    EOF,

    Identifier,
    Integer,

    Assignment, // =
    Equals,     // ==
    Not,        // !
    NotEquals,  // !=

    Plus,
    Dash,
    Star,
    Slash,

    Less,
    Greater,

    Comma,
    Semicolon,

    OpenParen,
    CloseParen,
    OpenCurly,
    CloseCurly,

    // Reserved
    Fn,
    Let,
    True,
    False,
    If,
    Else,
    Return,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    pub position: Position,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{ kind: {}, literal: {:?} }}", self.kind, self.literal)
    }
}

impl Token {
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::EOF
    }
}
