//! Character-level parser for Logo.
//!
//! Turns source text directly into a [`List`] program: the top-level list
//! holds one element per word, number, boolean or bracketed sub-list.
//! Nothing is grouped into calls here, because how many inputs a procedure
//! takes is only known once its name is bound at run time. The evaluator
//! does that grouping while it walks the list.
//!
//! # Lexical rules
//!
//! - digits start a number: `12`, `3.5`, `.5`, `1e3`, `2E-4`
//! - `"word` is a quoted word; it runs to whitespace or a bracket/paren,
//!   and `\` escapes the next character
//! - `:name` is a variable reference
//! - `[ ... ]` is a nested list, parsed with the same rules
//! - `(` and `)` stay in the list as their own words
//! - `+ - * / < > =` are single-character operator words
//! - `;` starts a comment that runs to the end of the line
//! - `true` and `false` become booleans, in any letter case
//!
//! # Negative numbers
//!
//! A `-` directly followed by a digit is a negative literal when nothing
//! that could be a left operand precedes it, or when whitespace precedes
//! it: `-3`, `(-3)`, `2 * -3` and `sum 1 -3` all contain the literal `-3`.
//! Otherwise it is the operator: `5-3`, `:n-1` and `5 - 3` subtract. A
//! lone `- 3` is the operator followed by `3`; the evaluator applies it as
//! unary negation when no left operand exists, so both spellings evaluate
//! to -3.
//!
//! # Procedure definitions
//!
//! At the top level `to NAME :a :b body... end` is rewritten into the call
//! `( to "NAME "a "b [body...] )`, so defining a procedure is an ordinary
//! call to the `to` primitive.

mod cursor;
mod error;

pub use error::{ParseError, ParseErrorKind};

use cursor::Cursor;
use logo_ir::{BinaryOp, List, ListBuilder, Value, QUOTE, VARIABLE_PREFIX};
use logo_stack::ensure_sufficient_stack;
use tracing::{debug, trace};

/// Parse Logo source into a program list.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn parse(source: &str) -> Result<List, ParseError> {
    let program = Parser::new(source).parse_program()?;
    debug!(instructions = program.len(), "parsed program");
    Ok(program)
}

/// What ends the list currently being parsed.
#[derive(Clone, Copy)]
enum Closer<'n> {
    /// End of input (the top-level program).
    Eof,
    /// A `]` matching the `[` at `open`.
    Bracket { open: usize },
    /// The word `end` closing the definition of `name` that began at `start`.
    End { start: usize, name: &'n str },
}

/// Parser state.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        Parser {
            cursor: Cursor::new(source),
        }
    }

    /// Parse the whole source as a top-level instruction list.
    pub fn parse_program(&mut self) -> Result<List, ParseError> {
        self.parse_items(Closer::Eof)
    }

    fn parse_items(&mut self, closer: Closer<'_>) -> Result<List, ParseError> {
        ensure_sufficient_stack(|| self.parse_items_inner(closer))
    }

    fn parse_items_inner(&mut self, closer: Closer<'_>) -> Result<List, ParseError> {
        let mut items = ListBuilder::new();
        let mut open_parens: Vec<usize> = Vec::new();
        // Whether the previous item could be the left operand of an infix operator.
        let mut after_operand = false;

        loop {
            self.skip_trivia();
            let start = self.cursor.position();

            let Some(c) = self.cursor.peek() else {
                return match closer {
                    Closer::Eof => self.close_list(items, &open_parens),
                    Closer::Bracket { open } => {
                        Err(self.error(ParseErrorKind::UnterminatedList, open))
                    }
                    Closer::End { start, name } => Err(self.error(
                        ParseErrorKind::UnterminatedDefinition(name.to_string()),
                        start,
                    )),
                };
            };

            match c {
                '[' => {
                    self.cursor.bump();
                    let nested = self.parse_items(Closer::Bracket { open: start })?;
                    items.push(Value::List(nested));
                    after_operand = true;
                }
                ']' => {
                    self.cursor.bump();
                    if let Closer::Bracket { .. } = closer {
                        return self.close_list(items, &open_parens);
                    }
                    return Err(self.error(ParseErrorKind::UnexpectedClose(']'), start));
                }
                '(' => {
                    self.cursor.bump();
                    open_parens.push(start);
                    items.push(Value::text("("));
                    after_operand = false;
                }
                ')' => {
                    self.cursor.bump();
                    if open_parens.pop().is_none() {
                        return Err(self.error(ParseErrorKind::UnexpectedClose(')'), start));
                    }
                    items.push(Value::text(")"));
                    after_operand = true;
                }
                QUOTE => {
                    self.cursor.bump();
                    let word = self.scan_run(start, is_delimiter)?;
                    items.push(Value::from(format!("{QUOTE}{word}")));
                    after_operand = true;
                }
                VARIABLE_PREFIX => {
                    items.push(self.scan_variable(start)?);
                    after_operand = true;
                }
                '-' if self.starts_negative_number(after_operand) => {
                    items.push(self.scan_number(start)?);
                    after_operand = true;
                }
                c if BinaryOp::is_operator_char(c) => {
                    self.cursor.bump();
                    items.push(Value::from(c.to_string()));
                    after_operand = false;
                }
                c if self.starts_number(c) => {
                    items.push(self.scan_number(start)?);
                    after_operand = true;
                }
                _ => {
                    let word = self.scan_run(start, is_word_terminator)?;
                    if let Closer::End { .. } = closer {
                        if word.eq_ignore_ascii_case("end") {
                            return self.close_list(items, &open_parens);
                        }
                    }
                    if matches!(closer, Closer::Eof)
                        && word.eq_ignore_ascii_case("to")
                        && self.at_definition_name()
                    {
                        self.parse_definition(start, &mut items)?;
                    } else {
                        items.push(word_value(word));
                    }
                    after_operand = true;
                }
            }
        }
    }

    /// Finish a list, rejecting any `(` left open inside it.
    fn close_list(&self, items: ListBuilder, open_parens: &[usize]) -> Result<List, ParseError> {
        match open_parens.last() {
            Some(&open) => Err(self.error(ParseErrorKind::UnterminatedParen, open)),
            None => Ok(items.finish()),
        }
    }

    /// Rewrite `to NAME :a :b body... end` into `( to "NAME "a "b [body...] )`.
    fn parse_definition(&mut self, start: usize, items: &mut ListBuilder) -> Result<(), ParseError> {
        let name_start = self.cursor.position();
        let name = self.scan_run(name_start, is_word_terminator)?;

        let mut params = Vec::new();
        loop {
            self.skip_trivia();
            let param_start = self.cursor.position();
            if self.cursor.peek() != Some(VARIABLE_PREFIX) {
                break;
            }
            self.cursor.bump();
            let param = self.scan_run(param_start, is_word_terminator)?;
            if param.is_empty() {
                return Err(self.error(ParseErrorKind::MissingVariableName, param_start));
            }
            params.push(param);
        }

        let body = self.parse_items(Closer::End { start, name: &name })?;
        trace!(name = %name, params = params.len(), "desugared procedure definition");

        items.push(Value::text("("));
        items.push(Value::text("to"));
        items.push(Value::from(format!("{QUOTE}{name}")));
        for param in params {
            items.push(Value::from(format!("{QUOTE}{param}")));
        }
        items.push(Value::List(body));
        items.push(Value::text(")"));
        Ok(())
    }

    /// After the word `to`: is the next thing a bare procedure name?
    fn at_definition_name(&mut self) -> bool {
        self.cursor.eat_while(char::is_whitespace);
        matches!(
            self.cursor.peek(),
            Some(c) if !is_word_terminator(c)
                && c != QUOTE
                && c != VARIABLE_PREFIX
                && !c.is_ascii_digit()
        )
    }

    fn scan_variable(&mut self, start: usize) -> Result<Value, ParseError> {
        self.cursor.bump();
        let name = self.scan_run(start, is_word_terminator)?;
        if name.is_empty() {
            return Err(self.error(ParseErrorKind::MissingVariableName, start));
        }
        Ok(Value::from(format!("{VARIABLE_PREFIX}{name}")))
    }

    /// Collect characters up to a terminator, resolving `\` escapes.
    fn scan_run(&mut self, start: usize, terminator: fn(char) -> bool) -> Result<String, ParseError> {
        let mut text = String::new();
        while let Some(c) = self.cursor.peek() {
            if terminator(c) {
                break;
            }
            self.cursor.bump();
            if c == '\\' {
                match self.cursor.bump() {
                    Some(escaped) => text.push(escaped),
                    None => return Err(self.error(ParseErrorKind::UnterminatedString, start)),
                }
            } else {
                text.push(c);
            }
        }
        Ok(text)
    }

    fn starts_number(&self, c: char) -> bool {
        c.is_ascii_digit() || (c == '.' && self.cursor.peek_nth(1).is_some_and(|d| d.is_ascii_digit()))
    }

    /// At a `-`: does it begin a negative literal rather than the operator?
    fn starts_negative_number(&self, after_operand: bool) -> bool {
        let digit_follows = match self.cursor.peek_nth(1) {
            Some(d) if d.is_ascii_digit() => true,
            Some('.') => self.cursor.peek_nth(2).is_some_and(|d| d.is_ascii_digit()),
            _ => false,
        };
        digit_follows
            && (!after_operand || self.cursor.previous().map_or(true, char::is_whitespace))
    }

    fn scan_number(&mut self, start: usize) -> Result<Value, ParseError> {
        self.cursor.eat_if(|c| c == '-');
        self.cursor.eat_while(|c| c.is_ascii_digit());
        if self.cursor.eat_if(|c| c == '.') {
            self.cursor.eat_while(|c| c.is_ascii_digit());
        }
        let mut well_formed = true;
        if self.cursor.eat_if(|c| c == 'e' || c == 'E') {
            self.cursor.eat_if(|c| c == '+' || c == '-');
            let digits = self.cursor.position();
            self.cursor.eat_while(|c| c.is_ascii_digit());
            well_formed = self.cursor.position() > digits;
        }
        if self.cursor.peek().is_some_and(|c| !is_word_terminator(c)) {
            self.cursor.eat_while(|c| !is_word_terminator(c));
            well_formed = false;
        }

        let text = self.cursor.slice(start, self.cursor.position());
        match text.parse::<f64>() {
            Ok(n) if well_formed => Ok(Value::Number(n)),
            _ => Err(self.error(ParseErrorKind::MalformedNumber(text.to_string()), start)),
        }
    }

    /// Skip whitespace and `;` comments.
    fn skip_trivia(&mut self) {
        loop {
            self.cursor.eat_while(char::is_whitespace);
            if self.cursor.peek() == Some(';') {
                self.cursor.eat_while(|c| c != '\n');
            } else {
                break;
            }
        }
    }

    fn error(&self, kind: ParseErrorKind, offset: usize) -> ParseError {
        let (line, column) = self.cursor.line_column(offset);
        ParseError {
            kind,
            offset,
            line,
            column,
        }
    }
}

/// Ends a quoted word.
fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || matches!(c, '[' | ']' | '(' | ')')
}

/// Ends a bare word, variable name or number.
fn is_word_terminator(c: char) -> bool {
    is_delimiter(c) || c == ';' || BinaryOp::is_operator_char(c)
}

/// Bare `true` and `false` are booleans in any case, like every other name.
fn word_value(word: String) -> Value {
    if word.eq_ignore_ascii_case("true") {
        Value::Boolean(true)
    } else if word.eq_ignore_ascii_case("false") {
        Value::Boolean(false)
    } else {
        Value::from(word)
    }
}

#[cfg(test)]
mod tests;
