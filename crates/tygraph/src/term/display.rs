//! Debug rendering of term trees.
//!
//! The dump surfaces the three things the textual form must not hide:
//! node identity, shape, and forwarding. It deliberately does *not*
//! zonk, so a bound variable still shows up as itself plus its target;
//! zonk the handle first to render the resolved form.

use std::fmt;

use crate::term::{Term, TermArena, TermId};

/// A [`fmt::Display`] wrapper rendering a term as an indented tree.
///
/// One line per node, `[id] <tag>`, with application children indented
/// two spaces and bound variables showing their forwarding target.
///
/// # Example
///
/// ```
/// use tygraph::TermArena;
///
/// let mut arena = TermArena::new();
/// let head = arena.con(1);
/// let var = arena.var(0);
/// let app = arena.app(head, var);
///
/// let rendered = arena.dump(app).to_string();
/// assert_eq!(rendered, "[2] app\n  [0] con 1\n  [1] var\n");
/// ```
pub struct DumpTerm<'a> {
    arena: &'a TermArena,
    id: TermId,
}

impl TermArena {
    /// Returns a displayable dump of the term behind `id`.
    pub fn dump(&self, id: TermId) -> DumpTerm<'_> {
        DumpTerm { arena: self, id }
    }
}

impl fmt::Display for DumpTerm<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_node(self.id, 0, f)
    }
}

impl DumpTerm<'_> {
    fn write_node(&self, id: TermId, indent: usize, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:indent$}", "")?;
        match *self.arena.term(id) {
            Term::Con(name) => writeln!(f, "[{id}] con {name}"),
            Term::Bound(index) => writeln!(f, "[{id}] bound {index}"),
            Term::Var { forward: None, .. } => writeln!(f, "[{id}] var"),
            Term::Var {
                forward: Some(target),
                ..
            } => writeln!(f, "[{id}] var -> [{target}]"),
            Term::App { fun, arg } => {
                writeln!(f, "[{id}] app")?;
                self.write_node(fun, indent + 2, f)?;
                self.write_node(arg, indent + 2, f)
            }
        }
    }
}
