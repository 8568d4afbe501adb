//! Character cursor over the source text.
//!
//! Tracks a byte offset into the source and hands out `char`s. The parser
//! reads Logo one character at a time, so this is the only view of the
//! source it needs.

/// Cursor for navigating source characters.
pub(crate) struct Cursor<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        Cursor { source, pos: 0 }
    }

    /// Current byte offset.
    #[inline]
    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    /// The next character without consuming it.
    #[inline]
    pub(crate) fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    /// The character `n` positions ahead (`peek_nth(0)` is `peek()`).
    pub(crate) fn peek_nth(&self, n: usize) -> Option<char> {
        self.source[self.pos..].chars().nth(n)
    }

    /// The character just before the cursor.
    pub(crate) fn previous(&self) -> Option<char> {
        self.source[..self.pos].chars().next_back()
    }

    /// Consume and return the next character.
    #[inline]
    pub(crate) fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Consume the next character if it satisfies `pred`.
    pub(crate) fn eat_if(&mut self, pred: impl FnOnce(char) -> bool) -> bool {
        match self.peek() {
            Some(c) if pred(c) => {
                self.pos += c.len_utf8();
                true
            }
            _ => false,
        }
    }

    /// Consume characters while `pred` holds.
    pub(crate) fn eat_while(&mut self, mut pred: impl FnMut(char) -> bool) {
        while self.eat_if(&mut pred) {}
    }

    /// Source text between two offsets.
    pub(crate) fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.source[start..end]
    }

    /// One-based line and column of a byte offset.
    pub(crate) fn line_column(&self, offset: usize) -> (usize, usize) {
        let before = &self.source[..offset.min(self.source.len())];
        let line = before.matches('\n').count() + 1;
        let column = before
            .rfind('\n')
            .map_or(before.chars().count(), |nl| before[nl + 1..].chars().count())
            + 1;
        (line, column)
    }
}
