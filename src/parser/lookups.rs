use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::{
    ast::ast::{Expr, Stmt},
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{expr::*, parser::Parser, stmt::*};

/// Operator precedence, lowest first.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug)]
pub enum BindingPower {
    Default,
    Equality,
    Relational,
    Additive,
    Multiplicative,
    Unary,
    Call,
}

lazy_static! {
    static ref BINDING_POWER_LOOKUP: BPLookup = {
        let mut map = HashMap::new();
        map.insert(TokenKind::Equals, BindingPower::Equality);
        map.insert(TokenKind::NotEquals, BindingPower::Equality);
        map.insert(TokenKind::Less, BindingPower::Relational);
        map.insert(TokenKind::Greater, BindingPower::Relational);
        map.insert(TokenKind::Plus, BindingPower::Additive);
        map.insert(TokenKind::Dash, BindingPower::Additive);
        map.insert(TokenKind::Star, BindingPower::Multiplicative);
        map.insert(TokenKind::Slash, BindingPower::Multiplicative);
        map.insert(TokenKind::OpenParen, BindingPower::Call);
        map
    };
}

/// Binding power of a token in infix position. Unlisted kinds bind loosest.
pub fn binding_power(kind: TokenKind) -> BindingPower {
    BINDING_POWER_LOOKUP
        .get(&kind)
        .copied()
        .unwrap_or(BindingPower::Default)
}

pub type StmtHandler = fn(&mut Parser) -> Result<Stmt, Error>;
pub type NUDHandler = fn(&mut Parser) -> Result<Expr, Error>;
pub type LEDHandler = fn(&mut Parser, Expr, BindingPower) -> Result<Expr, Error>;

pub fn create_token_lookups(parser: &mut Parser) {
    // Equality and relational
    parser.led(TokenKind::Equals, parse_binary_expr);
    parser.led(TokenKind::NotEquals, parse_binary_expr);
    parser.led(TokenKind::Less, parse_binary_expr);
    parser.led(TokenKind::Greater, parse_binary_expr);

    // Additive and multiplicative
    parser.led(TokenKind::Plus, parse_binary_expr);
    parser.led(TokenKind::Dash, parse_binary_expr);
    parser.led(TokenKind::Star, parse_binary_expr);
    parser.led(TokenKind::Slash, parse_binary_expr);

    // Literals and symbols
    parser.nud(TokenKind::Identifier, parse_primary_expr);
    parser.nud(TokenKind::Integer, parse_primary_expr);
    parser.nud(TokenKind::Not, parse_prefix_expr);
    parser.nud(TokenKind::Dash, parse_prefix_expr);

    // Statements
    parser.stmt(TokenKind::Let, parse_let_stmt);
    parser.stmt(TokenKind::Return, parse_return_stmt);
}

// Lookup tables inside parser struct, so it's easier
pub type StmtLookup = HashMap<TokenKind, StmtHandler>;
pub type NUDLookup = HashMap<TokenKind, NUDHandler>;
pub type LEDLookup = HashMap<TokenKind, LEDHandler>;
pub type BPLookup = HashMap<TokenKind, BindingPower>;
