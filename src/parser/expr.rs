use crate::{
    ast::{
        ast::Expr,
        expressions::{IdentifierExpr, InfixExpr, IntegerExpr, PrefixExpr},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{
    lookups::{binding_power, BindingPower},
    parser::Parser,
};

/// Parses an expression whose operators all bind tighter than `bp`.
///
/// On return the current token is the last token of the expression.
pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud = match parser.get_nud_lookup().get(&token_kind).copied() {
        Some(nud) => nud,
        None => return Err(missing_nud_error(parser)),
    };

    let mut left = nud(parser)?;

    // While the next operator binds tighter than the caller, fold it into lhs
    while !parser.peek_token_is(TokenKind::Semicolon) && binding_power(parser.peek_token_kind()) > bp
    {
        let led = match parser.get_led_lookup().get(&parser.peek_token_kind()).copied() {
            Some(led) => led,
            None => return Ok(left),
        };

        parser.advance();
        let operator_bp = binding_power(parser.current_token_kind());
        left = led(parser, left, operator_bp)?;
    }

    Ok(left)
}

fn missing_nud_error(parser: &Parser) -> Error {
    let token = parser.current_token();

    let error = if token.kind == TokenKind::Illegal {
        ErrorImpl::IllegalToken {
            token: token.literal.clone(),
        }
    } else {
        ErrorImpl::NoPrefixParseFn { kind: token.kind }
    };

    Error::new(error, parser.get_position())
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.current_token().clone();

    match token.kind {
        TokenKind::Integer => match token.literal.parse::<i64>() {
            Ok(value) => Ok(Expr::Integer(IntegerExpr { token, value })),
            Err(_) => Err(Error::new(
                ErrorImpl::IntegerParseError {
                    token: token.literal,
                },
                parser.get_position(),
            )),
        },
        TokenKind::Identifier => Ok(Expr::Identifier(IdentifierExpr {
            value: token.literal.clone(),
            token,
        })),
        _ => Err(missing_nud_error(parser)),
    }
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator_token = parser.current_token().clone();
    parser.advance();

    let right = parse_expr(parser, BindingPower::Unary)?;

    Ok(Expr::Prefix(PrefixExpr {
        operator: operator_token.literal.clone(),
        token: operator_token,
        right: Box::new(right),
    }))
}

/// Right operand is parsed at the operator's own binding power, so a
/// following operator of equal power is left for the caller: `a - b - c`
/// groups as `(a - b) - c`.
pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let operator_token = parser.current_token().clone();
    parser.advance();

    let right = parse_expr(parser, bp)?;

    Ok(Expr::Infix(InfixExpr {
        operator: operator_token.literal.clone(),
        token: operator_token,
        left: Box::new(left),
        right: Box::new(right),
    }))
}
