//! Unit tests for the parser module.
//!
//! This module contains tests for parsing various language constructs including:
//! - Let and return statements
//! - Identifier, integer, prefix and infix expressions
//! - Operator precedence and associativity
//! - Error reporting and recovery

use super::parser::{parse, Parser};
use crate::{
    ast::ast::{Expr, Node, Program, Stmt},
    errors::errors::{Error, ErrorImpl},
    lexer::{lexer::Lexer, tokens::TokenKind},
    Position,
};

fn parse_clean(source: &str) -> Program {
    let (program, errors) = parse(source.to_string());
    assert!(
        errors.is_empty(),
        "parser had {} errors: {:?}",
        errors.len(),
        errors.iter().map(Error::to_string).collect::<Vec<String>>()
    );
    program
}

fn single_expression(source: &str) -> Expr {
    let program = parse_clean(source);
    assert_eq!(program.len(), 1, "expected one statement in {:?}", source);

    match &program.statements[0] {
        Stmt::Expression(stmt) => stmt.expression.clone(),
        other => panic!("expected expression statement, got {:?}", other),
    }
}

fn assert_identifier(expr: &Expr, name: &str) {
    match expr {
        Expr::Identifier(identifier) => {
            assert_eq!(identifier.value, name);
            assert_eq!(identifier.token_literal(), name);
        }
        other => panic!("expected identifier {}, got {:?}", name, other),
    }
}

fn assert_integer(expr: &Expr, value: i64) {
    match expr {
        Expr::Integer(integer) => {
            assert_eq!(integer.value, value);
            assert_eq!(integer.token_literal(), value.to_string());
        }
        other => panic!("expected integer {}, got {:?}", value, other),
    }
}

#[test]
fn test_parse_let_statements() {
    let program = parse_clean("let x = 5; let y = 10; let foobar = 838383;");

    assert_eq!(program.len(), 3);

    let expected = [("x", 5), ("y", 10), ("foobar", 838383)];
    for (stmt, (name, value)) in program.iter().zip(expected.iter()) {
        assert_eq!(stmt.token_literal(), "let");
        match stmt {
            Stmt::Let(let_stmt) => {
                assert_eq!(let_stmt.name.value, *name);
                assert_eq!(let_stmt.name.token_literal(), *name);
                assert_integer(&let_stmt.value, *value);
            }
            other => panic!("expected let statement, got {:?}", other),
        }
    }
}

#[test]
fn test_parse_let_with_expression_value() {
    let program = parse_clean("let total = a + b * 2;");

    match &program.statements[0] {
        Stmt::Let(let_stmt) => {
            assert_eq!(let_stmt.name.value, "total");
            assert_eq!(let_stmt.value.to_string(), "(a + (b * 2))");
        }
        other => panic!("expected let statement, got {:?}", other),
    }
    assert_eq!(program.to_string(), "let total = (a + (b * 2));");
}

#[test]
fn test_parse_return_statements() {
    let program = parse_clean("return 5; return 10; return 993322;");

    assert_eq!(program.len(), 3);
    for stmt in program.iter() {
        assert!(matches!(stmt, Stmt::Return(_)));
        assert_eq!(stmt.token_literal(), "return");
    }

    match &program.statements[2] {
        Stmt::Return(return_stmt) => assert_integer(&return_stmt.value, 993322),
        other => panic!("expected return statement, got {:?}", other),
    }
}

#[test]
fn test_semicolons_are_optional() {
    let program = parse_clean("let x = 5");
    assert_eq!(program.len(), 1);

    let program = parse_clean("let x = 5 return x");
    assert_eq!(program.len(), 2);
    assert!(matches!(program.statements[0], Stmt::Let(_)));
    assert!(matches!(program.statements[1], Stmt::Return(_)));
}

#[test]
fn test_parse_identifier_expression() {
    let expr = single_expression("foobar;");
    assert_identifier(&expr, "foobar");
}

#[test]
fn test_parse_integer_expression() {
    let expr = single_expression("5;");
    assert_integer(&expr, 5);
}

#[test]
fn test_parse_largest_integer() {
    let expr = single_expression("9223372036854775807");
    assert_integer(&expr, i64::MAX);
}

#[test]
fn test_parse_prefix_expressions() {
    let cases = [("!5;", "!", 5), ("-15;", "-", 15)];

    for (source, operator, value) in cases {
        match single_expression(source) {
            Expr::Prefix(prefix) => {
                assert_eq!(prefix.operator, operator);
                assert_eq!(prefix.token_literal(), operator);
                assert_integer(&prefix.right, value);
            }
            other => panic!("expected prefix expression, got {:?}", other),
        }
    }
}

#[test]
fn test_parse_infix_expressions() {
    let operators = ["+", "-", "*", "/", ">", "<", "==", "!="];

    for operator in operators {
        let source = format!("5 {} 6;", operator);
        match single_expression(&source) {
            Expr::Infix(infix) => {
                assert_integer(&infix.left, 5);
                assert_eq!(infix.operator, operator);
                assert_eq!(infix.token_literal(), operator);
                assert_integer(&infix.right, 6);
            }
            other => panic!("expected infix expression, got {:?}", other),
        }
    }
}

#[test]
fn test_multiplication_binds_tighter_than_addition() {
    match single_expression("1 + 2 * 3") {
        Expr::Infix(root) => {
            assert_eq!(root.operator, "+");
            assert_integer(&root.left, 1);
            match root.right.as_ref() {
                Expr::Infix(right) => {
                    assert_eq!(right.operator, "*");
                    assert_integer(&right.left, 2);
                    assert_integer(&right.right, 3);
                }
                other => panic!("expected infix on the right, got {:?}", other),
            }
        }
        other => panic!("expected infix expression, got {:?}", other),
    }
}

#[test]
fn test_subtraction_is_left_associative() {
    match single_expression("a - b - c") {
        Expr::Infix(root) => {
            assert_eq!(root.operator, "-");
            assert_identifier(&root.right, "c");
            match root.left.as_ref() {
                Expr::Infix(left) => {
                    assert_eq!(left.operator, "-");
                    assert_identifier(&left.left, "a");
                    assert_identifier(&left.right, "b");
                }
                other => panic!("expected infix on the left, got {:?}", other),
            }
        }
        other => panic!("expected infix expression, got {:?}", other),
    }
}

#[test]
fn test_prefix_binds_tighter_than_infix() {
    match single_expression("-a * b") {
        Expr::Infix(root) => {
            assert_eq!(root.operator, "*");
            assert_identifier(&root.right, "b");
            match root.left.as_ref() {
                Expr::Prefix(prefix) => {
                    assert_eq!(prefix.operator, "-");
                    assert_identifier(&prefix.right, "a");
                }
                other => panic!("expected prefix on the left, got {:?}", other),
            }
        }
        other => panic!("expected infix expression, got {:?}", other),
    }
}

#[test]
fn test_operator_precedence_rendering() {
    let cases = [
        ("-a * b", "((-a) * b)"),
        ("!-a", "(!(-a))"),
        ("a + b + c", "((a + b) + c)"),
        ("a + b - c", "((a + b) - c)"),
        ("a * b * c", "((a * b) * c)"),
        ("a * b / c", "((a * b) / c)"),
        ("a + b / c", "(a + (b / c))"),
        ("a + b * c + d / e - f", "(((a + (b * c)) + (d / e)) - f)"),
        ("3 + 4; -5 * 5", "(3 + 4)((-5) * 5)"),
        ("5 > 4 == 3 < 4", "((5 > 4) == (3 < 4))"),
        ("5 < 4 != 3 > 4", "((5 < 4) != (3 > 4))"),
        (
            "3 + 4 * 5 == 3 * 1 + 4 * 5",
            "((3 + (4 * 5)) == ((3 * 1) + (4 * 5)))",
        ),
    ];

    for (source, expected) in cases {
        let program = parse_clean(source);
        assert_eq!(program.to_string(), expected, "source: {}", source);
    }
}

#[test]
fn test_let_missing_assignment() {
    let (program, errors) = parse("let x 5;".to_string());

    assert!(!errors.is_empty());
    assert_eq!(
        errors[0].get_error_impl(),
        &ErrorImpl::UnexpectedToken {
            expected: TokenKind::Assignment,
            found: TokenKind::Integer,
        }
    );
    assert_eq!(errors[0].get_position(), &Position(6));
    assert!(!program.iter().any(|stmt| matches!(stmt, Stmt::Let(_))));
}

#[test]
fn test_malformed_let_statements_each_report() {
    let source = "let x 5;\nlet = 10;\nlet 838383;";
    let mut parser = Parser::new(Lexer::new(source.to_string()));
    let program = parser.parse_program();

    assert!(program.is_empty());
    assert_eq!(
        parser.error_messages(),
        vec![
            "expected next token to be Assignment, got Integer instead",
            "expected next token to be Identifier, got Assignment instead",
            "expected next token to be Identifier, got Integer instead",
        ]
    );
}

#[test]
fn test_integer_overflow_is_reported() {
    let (program, errors) = parse("let x = 9223372036854775808;".to_string());

    assert!(program.is_empty());
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].to_string(),
        "could not parse \"9223372036854775808\" as integer"
    );
}

#[test]
fn test_missing_prefix_handler_is_reported() {
    let (program, errors) = parse("*5;".to_string());

    assert!(program.is_empty());
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].get_error_impl(),
        &ErrorImpl::NoPrefixParseFn {
            kind: TokenKind::Star
        }
    );
}

#[test]
fn test_illegal_token_in_expression_position() {
    let (program, errors) = parse("@".to_string());

    assert!(program.is_empty());
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].get_error_impl(),
        &ErrorImpl::IllegalToken {
            token: "@".to_string()
        }
    );
}

#[test]
fn test_dangling_prefix_operator_at_eof() {
    let (program, errors) = parse("-".to_string());

    assert!(program.is_empty());
    assert_eq!(
        errors[0].get_error_impl(),
        &ErrorImpl::NoPrefixParseFn {
            kind: TokenKind::EOF
        }
    );
}

#[test]
fn test_recovery_resumes_at_next_statement() {
    let (program, errors) = parse("let x = ; let y = 2; 5 + @ 3; z".to_string());

    assert_eq!(errors.len(), 2);
    assert_eq!(
        errors[0].get_error_impl(),
        &ErrorImpl::NoPrefixParseFn {
            kind: TokenKind::Semicolon
        }
    );
    assert_eq!(
        errors[1].get_error_impl(),
        &ErrorImpl::IllegalToken {
            token: "@".to_string()
        }
    );

    assert_eq!(program.len(), 2);
    assert_eq!(program.to_string(), "let y = 2;z");
}

#[test]
fn test_keyword_in_expression_position_starts_next_statement() {
    let (program, errors) = parse("let x = let y = 5;".to_string());

    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].get_error_impl(),
        &ErrorImpl::NoPrefixParseFn {
            kind: TokenKind::Let
        }
    );
    assert_eq!(program.len(), 1);
    match &program.statements[0] {
        Stmt::Let(let_stmt) => {
            assert_eq!(let_stmt.name.value, "y");
            assert_integer(&let_stmt.value, 5);
        }
        other => panic!("expected let statement, got {:?}", other),
    }
}

#[test]
fn test_broken_return_keeps_following_let() {
    let (program, errors) = parse("return let y = 5; y".to_string());

    assert_eq!(errors.len(), 1);
    assert_eq!(program.to_string(), "let y = 5;y");

    let (program, errors) = parse("1 + return 2; 3".to_string());

    assert_eq!(errors.len(), 1);
    assert_eq!(program.to_string(), "return 2;3");
}

#[test]
fn test_statement_keyword_that_failed_is_skipped() {
    // The broken statement's own `let` must not be retried forever.
    let (program, errors) = parse("let let y = 2;".to_string());

    assert_eq!(errors.len(), 1);
    assert_eq!(program.to_string(), "let y = 2;");
}

#[test]
fn test_infix_position_without_handler_ends_expression() {
    // `(` has call binding power but no infix handler yet.
    let (program, errors) = parse("a(b)".to_string());

    assert_eq!(program.len(), 1);
    assert_identifier(
        match &program.statements[0] {
            Stmt::Expression(stmt) => &stmt.expression,
            other => panic!("expected expression statement, got {:?}", other),
        },
        "a",
    );
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].get_error_impl(),
        &ErrorImpl::NoPrefixParseFn {
            kind: TokenKind::OpenParen
        }
    );
}

#[test]
fn test_empty_input() {
    let mut parser = Parser::new(Lexer::new(String::new()));
    let program = parser.parse_program();

    assert!(program.is_empty());
    assert!(parser.errors().is_empty());
}

#[test]
fn test_parser_lookahead_starts_filled() {
    let mut parser = Parser::new(Lexer::new("let x".to_string()));

    assert_eq!(parser.current_token_kind(), TokenKind::Let);
    assert_eq!(parser.peek_token_kind(), TokenKind::Identifier);

    parser.advance();
    assert_eq!(parser.current_token().literal, "x");
    assert!(parser.peek_token_is(TokenKind::EOF));

    parser.advance();
    parser.advance();
    assert!(parser.current_token_is(TokenKind::EOF));
    assert!(parser.peek_token().is_eof());
}

#[test]
fn test_registered_handlers() {
    let parser = Parser::new(Lexer::new(String::new()));

    for kind in [
        TokenKind::Identifier,
        TokenKind::Integer,
        TokenKind::Not,
        TokenKind::Dash,
    ] {
        assert!(parser.get_nud_lookup().contains_key(&kind), "{}", kind);
    }
    assert!(!parser.get_nud_lookup().contains_key(&TokenKind::Illegal));
    assert_eq!(parser.get_led_lookup().len(), 8);
    assert_eq!(parser.get_stmt_lookup().len(), 2);
}
