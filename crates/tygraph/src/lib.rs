//! `tygraph`: a mutable type-term graph with scope-sound unification.
//!
//! This crate provides the core term representation for Hindley-Milner
//! style inference:
//!
//! - **Term model**: constructors, applications, rigid (bound) variables,
//!   and scope-limited unification variables, stored in a [`TermArena`]
//!   and addressed by [`TermId`] handles
//! - **Zonking**: path-compressing resolution of variable-binding chains
//! - **Unification**: structural matching with an occurs check and
//!   scope-escape validation
//! - **Structural equality**: a pure comparison that shares
//!   representation as a side effect but never binds a variable
//!
//! # Example
//!
//! ```
//! use tygraph::TermArena;
//!
//! let mut arena = TermArena::new();
//! let int = arena.con(0);
//! let mut var = arena.var(0);
//! let mut expected = int;
//!
//! assert!(arena.unify(&mut var, &mut expected));
//! assert_eq!(var, int);
//! ```

#![warn(missing_docs)]

pub mod term;
mod unify;

pub use term::{DumpTerm, Shape, Term, TermArena, TermId};
