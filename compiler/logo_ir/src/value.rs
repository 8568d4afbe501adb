//! Logo values.

use std::fmt;
use std::rc::Rc;

use crate::{List, Procedure};

/// A Logo value.
///
/// Words are stored as [`Value::Text`]. Inside a program list a word keeps
/// its prefix (`"hello`, `:size`, `forward`) so the evaluator can tell a
/// quoted word from a variable reference from a procedure name; see
/// [`Token`](crate::Token).
#[derive(Clone, Debug)]
pub enum Value {
    Number(f64),
    Text(Rc<str>),
    Boolean(bool),
    List(List),
    Procedure(Procedure),
}

impl Value {
    /// Create a text value.
    #[inline]
    pub fn text(s: &str) -> Self {
        Value::Text(Rc::from(s))
    }

    /// Short type name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Text(_) => "word",
            Value::Boolean(_) => "boolean",
            Value::List(_) => "list",
            Value::Procedure(_) => "procedure",
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&List> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    /// Numbers, text and booleans are all words to Logo.
    pub fn is_word(&self) -> bool {
        matches!(self, Value::Number(_) | Value::Text(_) | Value::Boolean(_))
    }

    /// Render the value the way `print` does: a list loses its outer brackets.
    pub fn to_print_string(&self) -> String {
        struct Contents<'a>(&'a List);

        impl fmt::Display for Contents<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt_contents(f)
            }
        }

        match self {
            Value::List(list) => Contents(list).to_string(),
            other => other.to_string(),
        }
    }
}

/// Numbers compare by value, words and booleans by content, lists
/// structurally, procedures by identity.
impl PartialEq for Value {
    #[allow(clippy::float_cmp, reason = "Logo equality is exact numeric equality")]
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Procedure(a), Value::Procedure(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => fmt_number(*n, f),
            Value::Text(s) => f.write_str(s),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::List(list) => write!(f, "{list}"),
            Value::Procedure(p) => write!(f, "<procedure {}>", p.name()),
        }
    }
}

/// Integral numbers print without a fractional part (`3`, not `3.0`).
fn fmt_number(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    /// Largest magnitude at which every integer is exactly representable.
    const EXACT_INT_LIMIT: f64 = 9_007_199_254_740_992.0;

    if n.is_finite() && n.fract() == 0.0 && n.abs() < EXACT_INT_LIMIT {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "guarded by EXACT_INT_LIMIT and fract() == 0"
        )]
        let int = n as i64;
        write!(f, "{int}")
    } else {
        write!(f, "{n}")
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::text(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(Rc::from(s))
    }
}

impl From<List> for Value {
    fn from(list: List) -> Self {
        Value::List(list)
    }
}

impl From<Procedure> for Value {
    fn from(p: Procedure) -> Self {
        Value::Procedure(p)
    }
}
