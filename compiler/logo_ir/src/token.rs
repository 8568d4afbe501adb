//! How the evaluator reads one element of a program list.
//!
//! The parser leaves every word in the program list as text with its
//! prefix intact. [`Token::classify`] turns an element back into its
//! syntactic role without allocating.

use crate::Value;

/// Prefix of a quoted word: `"hello` evaluates to the word `hello`.
pub const QUOTE: char = '"';

/// Prefix of a variable reference: `:size` evaluates to the value of `size`.
pub const VARIABLE_PREFIX: char = ':';

/// Syntactic role of a program-list element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Token<'a> {
    /// Self-evaluating: numbers, booleans, bracketed lists, procedure values.
    Literal(&'a Value),
    /// `"word`, carrying the text after the quote.
    Quoted(&'a str),
    /// `:name`, carrying the name after the colon.
    Variable(&'a str),
    OpenParen,
    CloseParen,
    Operator(BinaryOp),
    /// A bare word: the name of a procedure to call.
    Word(&'a str),
}

impl<'a> Token<'a> {
    pub fn classify(value: &'a Value) -> Token<'a> {
        let Value::Text(text) = value else {
            return Token::Literal(value);
        };
        match &**text {
            "(" => Token::OpenParen,
            ")" => Token::CloseParen,
            word => {
                if let Some(op) = BinaryOp::from_symbol(word) {
                    Token::Operator(op)
                } else if let Some(rest) = word.strip_prefix(QUOTE) {
                    Token::Quoted(rest)
                } else if let Some(rest) = word.strip_prefix(VARIABLE_PREFIX) {
                    Token::Variable(rest)
                } else {
                    Token::Word(word)
                }
            }
        }
    }
}

/// Infix operators, one character each.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Less,
    Greater,
    Equal,
}

impl BinaryOp {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Some(match symbol {
            "+" => BinaryOp::Add,
            "-" => BinaryOp::Sub,
            "*" => BinaryOp::Mul,
            "/" => BinaryOp::Div,
            "<" => BinaryOp::Less,
            ">" => BinaryOp::Greater,
            "=" => BinaryOp::Equal,
            _ => return None,
        })
    }

    /// Returns `true` for characters that form an operator token on their own.
    pub fn is_operator_char(c: char) -> bool {
        matches!(c, '+' | '-' | '*' | '/' | '<' | '>' | '=')
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Less => "<",
            BinaryOp::Greater => ">",
            BinaryOp::Equal => "=",
        }
    }

    /// Binding strength: comparisons 1, additive 2, multiplicative 3.
    pub fn precedence(self) -> u8 {
        match self {
            BinaryOp::Less | BinaryOp::Greater | BinaryOp::Equal => 1,
            BinaryOp::Add | BinaryOp::Sub => 2,
            BinaryOp::Mul | BinaryOp::Div => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_reads_prefixes() {
        let quoted = Value::text("\"hello");
        let var = Value::text(":size");
        let word = Value::text("forward");
        assert_eq!(Token::classify(&quoted), Token::Quoted("hello"));
        assert_eq!(Token::classify(&var), Token::Variable("size"));
        assert_eq!(Token::classify(&word), Token::Word("forward"));
    }

    #[test]
    fn classify_recognizes_punctuation() {
        assert_eq!(Token::classify(&Value::text("(")), Token::OpenParen);
        assert_eq!(Token::classify(&Value::text(")")), Token::CloseParen);
        assert_eq!(
            Token::classify(&Value::text("*")),
            Token::Operator(BinaryOp::Mul)
        );
    }

    #[test]
    fn non_text_values_are_literals() {
        let n = Value::Number(4.0);
        assert_eq!(Token::classify(&n), Token::Literal(&n));
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        assert!(BinaryOp::Mul.precedence() > BinaryOp::Add.precedence());
        assert!(BinaryOp::Add.precedence() > BinaryOp::Less.precedence());
        assert_eq!(BinaryOp::Div.precedence(), BinaryOp::Mul.precedence());
    }
}
