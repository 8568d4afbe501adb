//! Callable values.
//!
//! The value model only needs to know a procedure's name and arity (arity
//! drives argument gathering). The evaluator owns the concrete procedure
//! kinds and recovers them with [`Procedure::downcast_ref`].

use std::any::Any;
use std::fmt;
use std::rc::Rc;

/// Implemented by every concrete procedure representation.
pub trait Callable: fmt::Debug + Any {
    /// The name the procedure was bound under.
    fn name(&self) -> &str;

    /// Number of inputs gathered for an unparenthesized call.
    fn arity(&self) -> usize;

    /// Upcast for [`Procedure::downcast_ref`].
    fn as_any(&self) -> &dyn Any;
}

/// Shared handle to a callable. Equality is identity.
#[derive(Clone)]
pub struct Procedure(Rc<dyn Callable>);

impl Procedure {
    pub fn new<C: Callable>(callable: C) -> Self {
        Procedure(Rc::new(callable))
    }

    #[inline]
    pub fn name(&self) -> &str {
        self.0.name()
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.0.arity()
    }

    /// Recover the concrete procedure type.
    pub fn downcast_ref<C: Callable>(&self) -> Option<&C> {
        self.0.as_any().downcast_ref::<C>()
    }

    /// Returns `true` if both handles point at the same procedure.
    pub fn ptr_eq(&self, other: &Procedure) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Procedure {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Procedure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Procedure({}/{})", self.name(), self.arity())
    }
}
