//! Immutable singly-linked lists with structural sharing.
//!
//! A [`List`] is either the empty list or a node holding a head [`Value`]
//! and a tail `List`. Tails are reference counted and shared freely: `fput`
//! on a list allocates one node and reuses the whole original list as its
//! tail. Nodes are never mutated once they are reachable from a `List`.
//!
//! The empty list is represented by the absence of a node, so there is
//! exactly one empty list value. Its tail is itself: [`List::tail`] on an
//! empty list returns an empty list, and every traversal stops there.

use std::fmt;
use std::rc::Rc;

use crate::Value;

/// An immutable, structurally shared Logo list.
#[derive(Clone, Default)]
pub struct List {
    node: Option<Rc<Node>>,
}

struct Node {
    head: Value,
    tail: List,
}

impl List {
    /// The empty list.
    #[inline]
    pub const fn empty() -> Self {
        List { node: None }
    }

    /// Build a list from `head` followed by the (shared) `tail`.
    pub fn cons(head: Value, tail: List) -> Self {
        List {
            node: Some(Rc::new(Node { head, tail })),
        }
    }

    /// Returns `true` for the empty list.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.node.is_none()
    }

    /// The first element, or `None` for the empty list.
    #[inline]
    pub fn head(&self) -> Option<&Value> {
        self.node.as_ref().map(|node| &node.head)
    }

    /// Everything after the first element.
    ///
    /// The tail of the empty list is the empty list.
    #[inline]
    pub fn tail(&self) -> List {
        match &self.node {
            Some(node) => node.tail.clone(),
            None => List::empty(),
        }
    }

    /// Number of elements. Walks the list.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Element at `index` (zero based).
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.iter().nth(index)
    }

    /// The last element, or `None` for the empty list.
    pub fn last(&self) -> Option<&Value> {
        self.iter().last()
    }

    /// Everything except the last element.
    pub fn without_last(&self) -> List {
        let mut builder = ListBuilder::new();
        let mut iter = self.iter().peekable();
        while let Some(value) = iter.next() {
            if iter.peek().is_some() {
                builder.push(value.clone());
            }
        }
        builder.finish()
    }

    /// A new list with `value` appended. Copies the spine, shares the elements.
    pub fn with_last(&self, value: Value) -> List {
        let mut builder = ListBuilder::new();
        builder.extend_from_list(self);
        builder.push(value);
        builder.finish()
    }

    /// Iterate over the elements by reference.
    #[inline]
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            node: self.node.as_deref(),
        }
    }

    /// Returns `true` if both lists are the same allocation (or both empty).
    pub fn ptr_eq(&self, other: &List) -> bool {
        match (&self.node, &other.node) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }

    /// Write the elements separated by spaces, without the outer brackets.
    ///
    /// Nested lists keep their brackets. This is the form `print` uses.
    pub fn fmt_contents(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{value}")?;
        }
        Ok(())
    }
}

impl Drop for List {
    // Unlink uniquely owned nodes one at a time so long lists don't recurse.
    fn drop(&mut self) {
        let mut next = self.node.take();
        while let Some(rc) = next {
            match Rc::try_unwrap(rc) {
                Ok(mut node) => next = node.tail.node.take(),
                Err(_) => break,
            }
        }
    }
}

impl PartialEq for List {
    fn eq(&self, other: &Self) -> bool {
        let (mut a, mut b) = (self.node.as_ref(), other.node.as_ref());
        loop {
            match (a, b) {
                (None, None) => return true,
                (Some(x), Some(y)) => {
                    if Rc::ptr_eq(x, y) {
                        return true;
                    }
                    if x.head != y.head {
                        return false;
                    }
                    a = x.tail.node.as_ref();
                    b = y.tail.node.as_ref();
                }
                _ => return false,
            }
        }
    }
}

impl fmt::Debug for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl fmt::Display for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        self.fmt_contents(f)?;
        f.write_str("]")
    }
}

impl FromIterator<Value> for List {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        let mut builder = ListBuilder::new();
        for value in iter {
            builder.push(value);
        }
        builder.finish()
    }
}

impl From<Vec<Value>> for List {
    fn from(values: Vec<Value>) -> Self {
        ListBuilder { items: values }.finish()
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Value;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Borrowing iterator over a [`List`].
pub struct Iter<'a> {
    node: Option<&'a Node>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Value;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.node?;
        self.node = node.tail.node.as_deref();
        Some(&node.head)
    }
}

impl std::iter::FusedIterator for Iter<'_> {}

/// Staging area for front-to-back list construction.
///
/// Elements are pushed in order; [`finish`](Self::finish) links them into
/// nodes once, so the published list is never mutated afterwards.
/// [`finish_onto`](Self::finish_onto) attaches an existing list as the tail
/// without copying it.
#[derive(Default)]
pub struct ListBuilder {
    items: Vec<Value>,
}

impl ListBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        ListBuilder { items: Vec::new() }
    }

    /// Create an empty builder with room for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        ListBuilder {
            items: Vec::with_capacity(capacity),
        }
    }

    /// Append one element.
    #[inline]
    pub fn push(&mut self, value: Value) {
        self.items.push(value);
    }

    /// Append every element of `list`.
    pub fn extend_from_list(&mut self, list: &List) {
        self.items.extend(list.iter().cloned());
    }

    /// The most recently pushed element.
    pub fn last(&self) -> Option<&Value> {
        self.items.last()
    }

    /// Number of staged elements.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if nothing has been pushed.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Publish the staged elements as a list.
    pub fn finish(self) -> List {
        self.finish_onto(List::empty())
    }

    /// Publish the staged elements followed by the shared `tail`.
    pub fn finish_onto(self, tail: List) -> List {
        self.items
            .into_iter()
            .rev()
            .fold(tail, |tail, head| List::cons(head, tail))
    }
}

/// Owning cursor that walks a list one element at a time.
///
/// The evaluator reads instructions through this: it peeks at the next
/// token to decide how to parse it, then consumes it.
#[derive(Clone, Debug, Default)]
pub struct ListCursor {
    rest: List,
}

impl ListCursor {
    /// Start at the beginning of `list`.
    pub fn new(list: List) -> Self {
        ListCursor { rest: list }
    }

    /// The next element without consuming it.
    #[inline]
    pub fn peek(&self) -> Option<&Value> {
        self.rest.head()
    }

    /// Returns `true` when every element has been consumed.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.rest.is_empty()
    }

    /// The unconsumed remainder.
    pub fn rest(&self) -> &List {
        &self.rest
    }
}

impl Iterator for ListCursor {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        let node = self.rest.node.clone()?;
        self.rest = node.tail.clone();
        Some(node.head.clone())
    }
}

#[cfg(test)]
mod tests;
