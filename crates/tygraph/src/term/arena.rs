//! The term store: tagged nodes, handles, constructors, and zonking.
//!
//! # Design
//!
//! - Terms live in a single [`TermArena`], a flat `Vec` of [`Term`] nodes
//!   addressed by [`TermId`] handles. Copying a handle is how "many
//!   holders, one logical node" is expressed; handle equality *is*
//!   node identity.
//! - A [`Term`] is immutable once constructed, with two exceptions on
//!   unification variables: `forward` is set exactly once when the
//!   variable is bound, and `scope_limit` only ever decreases.
//! - Binding chains are resolved by [`TermArena::zonk`], which compresses
//!   paths the way union-find `find` does.

use std::fmt;

/// A handle to a term node in a [`TermArena`].
///
/// Handle equality is reference identity: two equal `TermId`s name the
/// same underlying node. Distinct handles may still denote equal terms
/// after resolution, so identity is only ever used for short-circuiting
/// and cycle detection, never to decide unification failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TermId(u32);

impl TermId {
    /// Index of this handle into the arena's node vector.
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TermId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A type term node.
///
/// The four variants mirror the four shapes of [`Shape`]. `Con`, `App`
/// and `Bound` never change after construction; `Var` carries the only
/// mutable state in the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Term {
    /// An atomic nominal type constructor, identified by an interned id.
    /// Two constructors are equal iff their ids are equal.
    Con(u32),

    /// Application of one type to another (curried constructor
    /// application). Children are shared handles; the slots are only
    /// rewritten to more-resolved handles for the same logical terms.
    App {
        /// The function position.
        fun: TermId,
        /// The argument position.
        arg: TermId,
    },

    /// A rigid, de Bruijn-indexed variable fixed by an enclosing
    /// polymorphic binder. Never substituted; matches only an identical
    /// index.
    Bound(u32),

    /// A unification variable: a slot for "not yet known".
    Var {
        /// Binding target, set at most once. `None` while unbound.
        forward: Option<TermId>,
        /// Only bound variables with index strictly below this limit are
        /// in scope for this variable. Monotonically non-increasing.
        scope_limit: u32,
    },
}

/// The shape tag of a term node.
///
/// Reflects the *current* representation: a bound [`Term::Var`] still
/// reports `Shape::Var` until the handle is zonked past it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// [`Term::Con`]
    Con,
    /// [`Term::App`]
    App,
    /// [`Term::Bound`]
    Bound,
    /// [`Term::Var`]
    Var,
}

/// The store all terms live in.
///
/// Terms are created bottom-up through the constructor methods and are
/// never removed; the arena owns every node for its whole lifetime.
/// All mutation (binding, narrowing, path compression) goes through
/// `&mut self`, so a term graph is confined to one owner at a time.
///
/// # Example
///
/// ```
/// use tygraph::{Shape, TermArena};
///
/// let mut arena = TermArena::new();
/// let list = arena.con(0);
/// let elem = arena.var(1);
/// let list_of_elem = arena.app(list, elem);
///
/// assert_eq!(arena.shape(list_of_elem), Shape::App);
/// ```
#[derive(Debug, Default)]
pub struct TermArena {
    terms: Vec<Term>,
}

impl TermArena {
    /// Creates an empty arena.
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Number of nodes allocated so far.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether the arena holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    fn push(&mut self, term: Term) -> TermId {
        let id = TermId(u32::try_from(self.terms.len()).expect("arena full"));
        self.terms.push(term);
        id
    }

    /// Allocates a constructor node with the given id.
    pub fn con(&mut self, name: u32) -> TermId {
        self.push(Term::Con(name))
    }

    /// Allocates an application node over two existing terms.
    ///
    /// # Panics
    ///
    /// Panics if either child handle does not belong to this arena.
    pub fn app(&mut self, fun: TermId, arg: TermId) -> TermId {
        assert!(
            fun.index() < self.terms.len() && arg.index() < self.terms.len(),
            "application child out of range"
        );
        self.push(Term::App { fun, arg })
    }

    /// Allocates a rigid bound variable with the given de Bruijn index.
    pub fn bound(&mut self, index: u32) -> TermId {
        self.push(Term::Bound(index))
    }

    /// Allocates a fresh, unbound unification variable.
    ///
    /// Only bound variables with index strictly below `scope_limit` may
    /// ever appear in a term this variable is bound to.
    pub fn var(&mut self, scope_limit: u32) -> TermId {
        self.push(Term::Var {
            forward: None,
            scope_limit,
        })
    }

    /// Returns the node behind a handle.
    pub fn term(&self, id: TermId) -> &Term {
        &self.terms[id.index()]
    }

    /// Copies the node behind a handle out of the store.
    #[inline]
    pub(crate) fn get(&self, id: TermId) -> Term {
        self.terms[id.index()]
    }

    /// Returns the shape tag of a term's current representation.
    ///
    /// A bound unification variable still reports [`Shape::Var`]; zonk
    /// the handle first to see through bindings.
    pub fn shape(&self, id: TermId) -> Shape {
        match self.terms[id.index()] {
            Term::Con(_) => Shape::Con,
            Term::App { .. } => Shape::App,
            Term::Bound(_) => Shape::Bound,
            Term::Var { .. } => Shape::Var,
        }
    }

    /// Returns the scope limit of a unification variable, or `None` for
    /// any other shape.
    pub fn scope_limit(&self, id: TermId) -> Option<u32> {
        match self.terms[id.index()] {
            Term::Var { scope_limit, .. } => Some(scope_limit),
            _ => None,
        }
    }

    /// Resolves a handle through any chain of variable bindings.
    ///
    /// If `*t` is a bound unification variable, the chain is followed to
    /// its most-resolved end, every `forward` slot along the way is
    /// rewritten to point there directly (path compression), and `*t`
    /// itself is rewritten to the final target. Unbound variables and
    /// the other shapes are left untouched.
    ///
    /// Idempotent; terminates because binding never creates cycles.
    pub fn zonk(&mut self, t: &mut TermId) {
        if let Term::Var {
            forward: Some(next),
            ..
        } = self.terms[t.index()]
        {
            let mut target = next;
            self.zonk(&mut target);
            if let Term::Var { forward, .. } = &mut self.terms[t.index()] {
                *forward = Some(target);
            }
            *t = target;
        }
    }

    /// Scope limit of the unification variable `v`.
    ///
    /// # Panics
    ///
    /// Panics if `v` is not a unification variable.
    pub(crate) fn var_limit(&self, v: TermId) -> u32 {
        match self.terms[v.index()] {
            Term::Var { scope_limit, .. } => scope_limit,
            _ => panic!("term [{v}] is not a unification variable"),
        }
    }

    /// Lowers `u`'s scope limit to at most `cap`. Narrowing is permanent:
    /// limits never widen again, even when the check that requested the
    /// narrowing goes on to fail.
    pub(crate) fn narrow_limit(&mut self, u: TermId, cap: u32) {
        if let Term::Var { scope_limit, .. } = &mut self.terms[u.index()]
            && *scope_limit > cap
        {
            tygraph_log::trace!("narrow [{u}] scope limit {} -> {cap}", *scope_limit);
            *scope_limit = cap;
        }
    }

    /// Binds the unbound variable `v` to `t`.
    ///
    /// # Panics
    ///
    /// Panics if `v` is not a unification variable or is already bound;
    /// bindings are set once and never reassigned.
    pub(crate) fn set_forward(&mut self, v: TermId, t: TermId) {
        match &mut self.terms[v.index()] {
            Term::Var {
                forward: forward @ None,
                ..
            } => *forward = Some(t),
            Term::Var { .. } => panic!("variable [{v}] is already bound"),
            _ => panic!("term [{v}] is not a unification variable"),
        }
    }

    /// Children of the application node `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not an application.
    pub(crate) fn app_children(&self, id: TermId) -> (TermId, TermId) {
        match self.terms[id.index()] {
            Term::App { fun, arg } => (fun, arg),
            _ => panic!("term [{id}] is not an application"),
        }
    }

    /// Rewrites the children of the application node `id` to
    /// more-resolved handles for the same logical terms.
    pub(crate) fn set_app_children(&mut self, id: TermId, fun: TermId, arg: TermId) {
        match &mut self.terms[id.index()] {
            Term::App { fun: f, arg: a } => {
                *f = fun;
                *a = arg;
            }
            _ => panic!("term [{id}] is not an application"),
        }
    }
}
