//! Unit tests for error handling.
//!
//! This module contains tests for error types and error reporting.

use crate::errors::errors::{Error, ErrorImpl, ErrorTip};
use crate::lexer::tokens::TokenKind;
use crate::Position;

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::IllegalToken {
            token: "@".to_string(),
        },
        Position(10),
    );

    assert_eq!(error.get_error_name(), "IllegalToken");
    assert_eq!(error.to_string(), "illegal token \"@\"");
}

#[test]
fn test_error_position() {
    let error = Error::new(
        ErrorImpl::NoPrefixParseFn {
            kind: TokenKind::Semicolon,
        },
        Position(42),
    );

    assert_eq!(error.get_position().0, 42);
}

#[test]
fn test_unexpected_token_error() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            expected: TokenKind::Identifier,
            found: TokenKind::Integer,
        },
        Position::null(),
    );

    assert_eq!(error.get_error_name(), "UnexpectedToken");
    assert_eq!(
        error.to_string(),
        "expected next token to be Identifier, got Integer instead"
    );
}

#[test]
fn test_no_prefix_parse_fn_error() {
    let error = Error::new(
        ErrorImpl::NoPrefixParseFn {
            kind: TokenKind::Star,
        },
        Position::null(),
    );

    assert_eq!(error.get_error_name(), "NoPrefixParseFn");
    assert_eq!(error.to_string(), "no prefix parse function for Star found");
}

#[test]
fn test_integer_parse_error() {
    let error = Error::new(
        ErrorImpl::IntegerParseError {
            token: "99999999999999999999".to_string(),
        },
        Position::null(),
    );

    assert_eq!(error.get_error_name(), "IntegerParseError");
    assert_eq!(
        error.to_string(),
        "could not parse \"99999999999999999999\" as integer"
    );
}

#[test]
fn test_error_tip_suggestion() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            expected: TokenKind::Assignment,
            found: TokenKind::Integer,
        },
        Position::null(),
    );

    match error.get_tip() {
        ErrorTip::Suggestion(tip) => assert!(tip.contains("Assignment")),
        _ => panic!("Expected suggestion tip"),
    }
}

#[test]
fn test_illegal_token_has_no_tip() {
    let error = Error::new(
        ErrorImpl::IllegalToken {
            token: "#".to_string(),
        },
        Position::null(),
    );

    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}

#[test]
fn test_error_impl_accessor() {
    let error = Error::new(
        ErrorImpl::IntegerParseError {
            token: "12a".to_string(),
        },
        Position(3),
    );

    assert!(matches!(
        error.get_error_impl(),
        ErrorImpl::IntegerParseError { token } if token == "12a"
    ));
}
