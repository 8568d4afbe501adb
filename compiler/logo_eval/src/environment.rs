//! Chained variable namespaces.
//!
//! A [`Scope`] is one frame of name → [`Binding`] entries plus a link to
//! its parent. Lookups walk outward until a binding is found; declarations
//! always land in the frame they are made in, shadowing outer bindings for
//! as long as that frame is alive.
//!
//! Procedures and variables share one namespace: `to square ...` binds the
//! word `square` to a procedure value in the same map `make` writes to.
//!
//! Names are compared case-insensitively (`PRINT` and `print` are the same
//! procedure); keys are stored lowercased.
//!
//! # Lifetimes
//!
//! Frames are reference counted. A child holds its parent alive, and the
//! evaluator's scope stack holds every frame of a live activation, so a
//! parent always outlives the children that resolve through it.

use std::borrow::Cow;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use logo_ir::Value;
use rustc_hash::FxHashMap;

/// A single mutable value cell.
///
/// Owned by the frame that declared it and shared (not copied) with every
/// frame that resolves the name to it, so assignment through any of them
/// is seen by all. A declared binding may hold no value yet (`local "x`).
#[derive(Clone, Default)]
pub struct Binding(Rc<RefCell<Option<Value>>>);

impl Binding {
    pub fn new(value: Option<Value>) -> Self {
        Binding(Rc::new(RefCell::new(value)))
    }

    /// The current value, if one has been assigned.
    #[inline]
    pub fn get(&self) -> Option<Value> {
        self.0.borrow().clone()
    }

    #[inline]
    pub fn set(&self, value: Value) {
        *self.0.borrow_mut() = Some(value);
    }

    /// Returns `true` if both handles are the same cell.
    pub fn ptr_eq(&self, other: &Binding) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.0.borrow() {
            Some(value) => write!(f, "Binding({value:?})"),
            None => f.write_str("Binding(<no value>)"),
        }
    }
}

struct Frame {
    bindings: RefCell<FxHashMap<Rc<str>, Binding>>,
    parent: Option<Scope>,
}

/// A namespace frame. Cloning shares the frame.
#[derive(Clone)]
pub struct Scope(Rc<Frame>);

impl Scope {
    /// Create a root scope with no parent.
    pub fn new() -> Self {
        Scope(Rc::new(Frame {
            bindings: RefCell::new(FxHashMap::default()),
            parent: None,
        }))
    }

    /// Create an empty frame whose lookups fall through to `self`.
    pub fn child(&self) -> Self {
        Scope(Rc::new(Frame {
            bindings: RefCell::new(FxHashMap::default()),
            parent: Some(self.clone()),
        }))
    }

    pub fn parent(&self) -> Option<&Scope> {
        self.0.parent.as_ref()
    }

    /// Create or replace a binding in this frame and return it.
    pub fn declare(&self, name: &str, value: Option<Value>) -> Binding {
        let binding = Binding::new(value);
        self.alias(name, binding.clone());
        binding
    }

    /// Bind `name` to `value` in this frame.
    #[inline]
    pub fn bind(&self, name: &str, value: Value) {
        self.declare(name, Some(value));
    }

    /// Make an existing binding visible under `name` in this frame.
    pub fn alias(&self, name: &str, binding: Binding) {
        self.0
            .bindings
            .borrow_mut()
            .insert(Rc::from(normalize(name)), binding);
    }

    /// Find the nearest binding for `name`, walking outward.
    pub fn resolve(&self, name: &str) -> Option<Binding> {
        let key = normalize(name);
        let mut scope = Some(self);
        while let Some(current) = scope {
            if let Some(binding) = current.0.bindings.borrow().get(&*key) {
                return Some(binding.clone());
            }
            scope = current.parent();
        }
        None
    }

    /// The value of the nearest binding for `name`.
    ///
    /// `None` if there is no binding or the binding holds no value.
    #[inline]
    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.resolve(name)?.get()
    }

    /// Assign to the nearest existing binding for `name`.
    ///
    /// Returns `false` without assigning if no binding is reachable.
    pub fn set(&self, name: &str, value: Value) -> bool {
        match self.resolve(name) {
            Some(binding) => {
                binding.set(value);
                true
            }
            None => false,
        }
    }

    /// The binding for `name` in this frame only, ignoring parents.
    pub fn local_binding(&self, name: &str) -> Option<Binding> {
        self.0.bindings.borrow().get(&*normalize(name)).cloned()
    }

    /// Returns `true` if both handles are the same frame.
    pub fn ptr_eq(&self, other: &Scope) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bindings = self.0.bindings.borrow();
        let mut names: Vec<&str> = bindings.keys().map(|name| &**name).collect();
        names.sort_unstable();
        f.debug_struct("Scope")
            .field("names", &names)
            .field("has_parent", &self.0.parent.is_some())
            .finish()
    }
}

fn normalize(name: &str) -> Cow<'_, str> {
    if name.bytes().any(|b| b.is_ascii_uppercase()) {
        Cow::Owned(name.to_ascii_lowercase())
    } else {
        Cow::Borrowed(name)
    }
}

#[cfg(test)]
mod tests;
