//! Parse error types.

use thiserror::Error;

/// What went wrong while parsing.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("unterminated list: missing ']'")]
    UnterminatedList,
    #[error("unterminated parenthesis: missing ')'")]
    UnterminatedParen,
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unexpected '{0}'")]
    UnexpectedClose(char),
    #[error("malformed number '{0}'")]
    MalformedNumber(String),
    #[error("missing variable name after ':'")]
    MissingVariableName,
    #[error("definition of '{0}' is missing 'end'")]
    UnterminatedDefinition(String),
}

/// A structural error in Logo source, with its location.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{kind} (line {line}, column {column})")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// Byte offset where the offending construct starts.
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}
