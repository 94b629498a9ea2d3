//! Term representation and operations.
//!
//! - **arena**: the term store, handles, constructors, and zonking
//! - **display**: indented debug rendering of term trees

pub mod arena;
pub mod display;

pub use arena::{Shape, Term, TermArena, TermId};
pub use display::DumpTerm;
