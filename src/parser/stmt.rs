use tracing::trace;

use crate::{
    ast::{
        ast::Stmt,
        expressions::IdentifierExpr,
        statements::{ExpressionStmt, LetStmt, ReturnStmt},
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
};

use super::parser::Parser;

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let kind = parser.current_token_kind();
    trace!(%kind, "parsing statement");

    if let Some(handler) = parser.get_stmt_lookup().get(&kind).copied() {
        return handler(parser);
    }

    parse_expression_stmt(parser)
}

pub fn parse_let_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start_token = parser.current_token().clone();

    let name_token = parser.expect_peek(TokenKind::Identifier)?;
    let name = IdentifierExpr {
        value: name_token.literal.clone(),
        token: name_token,
    };

    parser.expect_peek(TokenKind::Assignment)?;
    parser.advance();

    let value = parse_expr(parser, BindingPower::Default)?;
    parser.skip_optional(TokenKind::Semicolon);

    Ok(Stmt::Let(LetStmt {
        token: start_token,
        name,
        value,
    }))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start_token = parser.current_token().clone();
    parser.advance();

    let value = parse_expr(parser, BindingPower::Default)?;
    parser.skip_optional(TokenKind::Semicolon);

    Ok(Stmt::Return(ReturnStmt {
        token: start_token,
        value,
    }))
}

pub fn parse_expression_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start_token = parser.current_token().clone();

    let expression = parse_expr(parser, BindingPower::Default)?;
    parser.skip_optional(TokenKind::Semicolon);

    Ok(Stmt::Expression(ExpressionStmt {
        token: start_token,
        expression,
    }))
}
