//! Unification with occurs check and scope-escape validation, plus pure
//! structural equality.
//!
//! # Design
//!
//! - Every entry point zonks its operands first, so dispatch always sees
//!   the most-resolved shape, and handle identity can short-circuit.
//! - Failure is an ordinary `false`; the caller decides what a failed
//!   unification means. Nothing here returns an error.
//! - The scope-escape check narrows the limits of variables it walks
//!   past, and those narrowings persist even when the check fails.
//!   They only ever tighten a legal constraint, so leaving them in
//!   place keeps later unifications sound.
//! - Operands are `&mut TermId` so that proofs propagate back to the
//!   caller's handle: after a successful `unify` or `equal`, both
//!   handles name the same node, and the next identity check is free.

use crate::term::{Shape, Term, TermArena, TermId};

impl TermArena {
    /// Checks that it is safe to bind the unbound unification variable
    /// `v` to the term `*t`.
    ///
    /// In particular:
    /// - `v` must not occur anywhere in `*t` (no cyclic terms);
    /// - every bound variable in `*t` must have an index strictly below
    ///   `v`'s scope limit;
    /// - every unification variable in `*t` gets its scope limit lowered
    ///   to at most `v`'s, so it can never later be instantiated with
    ///   something out of `v`'s scope. Limits may have been narrowed
    ///   even when this returns `false`.
    fn fits_in(&mut self, t: &mut TermId, v: TermId) -> bool {
        self.zonk(t);
        if *t == v {
            // Occurs check: binding v to a term containing v would
            // create an infinite type.
            return false;
        }
        match self.get(*t) {
            Term::App { fun, arg } => {
                let (mut fun, mut arg) = (fun, arg);
                let fits = self.fits_in(&mut fun, v) && self.fits_in(&mut arg, v);
                self.set_app_children(*t, fun, arg);
                fits
            }
            Term::Bound(index) => index < self.var_limit(v),
            Term::Var { .. } => {
                self.narrow_limit(*t, self.var_limit(v));
                true
            }
            Term::Con(_) => true,
        }
    }

    /// Binds the variable `*v` to `*t` if the scope-escape check allows
    /// it, rewriting `*v` to name `*t`'s node. Identical handles succeed
    /// without mutation. On failure the node behind `v` stays unbound.
    fn bind(&mut self, v: &mut TermId, t: &mut TermId) -> bool {
        if *v == *t {
            return true;
        }
        if !self.fits_in(t, *v) {
            return false;
        }
        tygraph_log::trace!("bind [{}] := [{}]", *v, *t);
        self.set_forward(*v, *t);
        *v = *t;
        true
    }

    /// Unifies two terms, returning whether a consistent binding of
    /// unification variables makes them identical.
    ///
    /// Both handles are zonked up front. An unbound variable on either
    /// side is bound to the other (the left operand is offered first, so
    /// when both sides are unbound variables the left one ends up
    /// bound). Applications unify their function components before their
    /// argument components and stop at the first failure, so a mismatch
    /// in function position never touches argument-side variables.
    ///
    /// On success both handles name the same node afterwards, making
    /// later identity short-circuits cheap. Failure is an expected,
    /// recoverable outcome; variables reached on a failing path keep any
    /// scope-limit narrowing but gain no bindings.
    pub fn unify(&mut self, a: &mut TermId, b: &mut TermId) -> bool {
        self.zonk(a);
        self.zonk(b);
        if *a == *b {
            return true;
        }

        match (self.shape(*a), self.shape(*b)) {
            (Shape::Var, _) => {
                if !self.bind(a, b) {
                    return false;
                }
            }
            (_, Shape::Var) => {
                if !self.bind(b, a) {
                    return false;
                }
            }
            (Shape::Bound, Shape::Bound) => {
                if self.get(*a) != self.get(*b) {
                    return false;
                }
            }
            (Shape::Con, Shape::Con) => {
                if self.get(*a) != self.get(*b) {
                    return false;
                }
            }
            (Shape::App, Shape::App) => {
                let (mut fun_a, mut arg_a) = self.app_children(*a);
                let (mut fun_b, mut arg_b) = self.app_children(*b);
                let unified =
                    self.unify(&mut fun_a, &mut fun_b) && self.unify(&mut arg_a, &mut arg_b);
                self.set_app_children(*a, fun_a, arg_a);
                self.set_app_children(*b, fun_b, arg_b);
                if !unified {
                    return false;
                }
            }
            _ => return false,
        }

        // The terms are proven identical; share the representation.
        *a = *b;
        true
    }

    /// Structural equality: whether two terms are already identical,
    /// without binding anything.
    ///
    /// Unlike [`TermArena::unify`], this never binds a variable, so two
    /// distinct unbound variables are equal only when the handles are
    /// identical. Both sides are zonked, and on success `*a` is aliased
    /// to `*b`; the sharing is safe because equality of all subterms has
    /// just been proven.
    pub fn equal(&mut self, a: &mut TermId, b: &mut TermId) -> bool {
        self.zonk(a);
        self.zonk(b);
        if *a == *b {
            return true;
        }

        match (self.shape(*a), self.shape(*b)) {
            (Shape::Bound, Shape::Bound) | (Shape::Con, Shape::Con) => {
                if self.get(*a) != self.get(*b) {
                    return false;
                }
            }
            (Shape::App, Shape::App) => {
                let (mut fun_a, mut arg_a) = self.app_children(*a);
                let (mut fun_b, mut arg_b) = self.app_children(*b);
                let same = self.equal(&mut fun_a, &mut fun_b) && self.equal(&mut arg_a, &mut arg_b);
                self.set_app_children(*a, fun_a, arg_a);
                self.set_app_children(*b, fun_b, arg_b);
                if !same {
                    return false;
                }
            }
            // Distinct unbound variables, or differing shapes.
            _ => return false,
        }

        *a = *b;
        true
    }
}

#[cfg(test)]
mod tests {
    use crate::term::{Shape, TermArena};

    #[test]
    fn reflexivity() {
        let mut arena = TermArena::new();
        let c = arena.con(3);
        let v = arena.var(1);
        let app = arena.app(c, v);

        for t in [c, v, app] {
            let (mut a, mut b) = (t, t);
            assert!(arena.unify(&mut a, &mut b));
            assert!(arena.equal(&mut a, &mut b));
        }

        // Nothing got bound along the way.
        assert_eq!(arena.shape(v), Shape::Var);
        assert_eq!(arena.scope_limit(v), Some(1));
    }

    #[test]
    fn constructor_match_and_mismatch() {
        let mut arena = TermArena::new();
        let mut a1 = arena.con(1);
        let mut a2 = arena.con(1);
        let mut b = arena.con(2);

        assert!(arena.unify(&mut a1, &mut a2));
        // Proven equal, so the handles now share a node.
        assert_eq!(a1, a2);

        assert!(!arena.unify(&mut a1, &mut b));
    }

    #[test]
    fn variable_binds_to_constructor() {
        let mut arena = TermArena::new();
        let con = arena.con(9);
        let var = arena.var(4);

        let (mut v, mut c) = (var, con);
        assert!(arena.unify(&mut v, &mut c));

        let mut resolved = var;
        arena.zonk(&mut resolved);
        assert_eq!(arena.shape(resolved), Shape::Con);
        assert_eq!(resolved, con);
    }

    #[test]
    fn both_sides_unbound_binds_the_left() {
        let mut arena = TermArena::new();
        let left = arena.var(2);
        let right = arena.var(7);

        let (mut a, mut b) = (left, right);
        assert!(arena.unify(&mut a, &mut b));
        assert_eq!(a, right);
        assert_eq!(b, right);

        let mut l = left;
        arena.zonk(&mut l);
        assert_eq!(l, right);
        // The surviving variable inherited the tighter limit.
        assert_eq!(arena.scope_limit(right), Some(2));
    }

    #[test]
    fn occurs_check_rejects_and_leaves_unbound() {
        let mut arena = TermArena::new();
        let var = arena.var(5);
        let con = arena.con(0);
        let cyclic = arena.app(var, con);

        let (mut v, mut t) = (var, cyclic);
        assert!(!arena.unify(&mut v, &mut t));

        // The variable survived untouched and still unifies normally.
        assert_eq!(arena.shape(var), Shape::Var);
        let (mut v, mut c) = (var, con);
        assert!(arena.unify(&mut v, &mut c));
    }

    #[test]
    fn occurs_check_sees_through_bindings() {
        let mut arena = TermArena::new();
        let var = arena.var(5);
        let alias = arena.var(5);
        let con = arena.con(0);

        // alias := var, then try var ~ App(alias, con).
        let (mut a, mut v) = (alias, var);
        assert!(arena.unify(&mut a, &mut v));

        let cyclic = arena.app(alias, con);
        let (mut v, mut t) = (var, cyclic);
        assert!(!arena.unify(&mut v, &mut t));
    }

    #[test]
    fn bound_variables_match_by_index_only() {
        let mut arena = TermArena::new();
        let mut b0 = arena.bound(0);
        let mut b0_again = arena.bound(0);
        let mut b1 = arena.bound(1);

        assert!(arena.unify(&mut b0, &mut b0_again));
        assert!(!arena.unify(&mut b0, &mut b1));
    }

    #[test]
    fn scope_escape_is_rejected() {
        let mut arena = TermArena::new();

        // Limit 0: no bound variable is in scope.
        let var = arena.var(0);
        let rigid = arena.bound(0);
        let (mut v, mut b) = (var, rigid);
        assert!(!arena.unify(&mut v, &mut b));
        assert_eq!(arena.shape(var), Shape::Var);

        // Limit 1: index 0 is in scope.
        let var = arena.var(1);
        let (mut v, mut b) = (var, rigid);
        assert!(arena.unify(&mut v, &mut b));
    }

    #[test]
    fn scope_narrowing_propagates() {
        let mut arena = TermArena::new();
        let u = arena.var(5);
        let v = arena.var(2);
        let x = arena.con(0);
        let app = arena.app(u, x);

        let (mut a, mut b) = (v, app);
        assert!(arena.unify(&mut a, &mut b));
        assert_eq!(arena.scope_limit(u), Some(2));

        // u may no longer mention indices at or above 2...
        let rigid2 = arena.bound(2);
        let (mut uu, mut bb) = (u, rigid2);
        assert!(!arena.unify(&mut uu, &mut bb));

        // ...but index 1 is still fine.
        let rigid1 = arena.bound(1);
        let (mut uu, mut bb) = (u, rigid1);
        assert!(arena.unify(&mut uu, &mut bb));
    }

    #[test]
    fn narrowing_persists_on_failure() {
        let mut arena = TermArena::new();
        let v = arena.var(1);
        let u = arena.var(9);
        let rigid = arena.bound(3);
        // App(u, Bound(3)): u is walked (and narrowed) before the rigid
        // variable fails the limit check.
        let app = arena.app(u, rigid);

        let (mut a, mut b) = (v, app);
        assert!(!arena.unify(&mut a, &mut b));

        assert_eq!(arena.shape(v), Shape::Var);
        assert_eq!(arena.scope_limit(u), Some(1));
    }

    #[test]
    fn application_recurses_structurally() {
        let mut arena = TermArena::new();
        let head = arena.con(1);
        let var = arena.var(0);
        let lhs = arena.app(head, var);

        let head2 = arena.con(1);
        let payload = arena.con(2);
        let rhs = arena.app(head2, payload);

        let (mut a, mut b) = (lhs, rhs);
        assert!(arena.unify(&mut a, &mut b));
        assert_eq!(a, b);

        let mut resolved = var;
        arena.zonk(&mut resolved);
        assert_eq!(resolved, payload);
    }

    #[test]
    fn app_mismatch_leaves_argument_untouched() {
        let mut arena = TermArena::new();
        let head = arena.con(1);
        let var = arena.var(0);
        let lhs = arena.app(head, var);

        let other_head = arena.con(2);
        let payload = arena.con(3);
        let rhs = arena.app(other_head, payload);

        let (mut a, mut b) = (lhs, rhs);
        assert!(!arena.unify(&mut a, &mut b));

        // Function position failed first; the argument variable was
        // never offered for binding.
        assert_eq!(arena.shape(var), Shape::Var);
    }

    #[test]
    fn unify_is_idempotent_to_retry() {
        let mut arena = TermArena::new();
        let con = arena.con(4);
        let var = arena.var(0);

        let (mut v, mut c) = (var, con);
        assert!(arena.unify(&mut v, &mut c));
        let (mut v, mut c) = (var, con);
        assert!(arena.unify(&mut v, &mut c));
    }

    #[test]
    fn equal_never_binds() {
        let mut arena = TermArena::new();
        let v1 = arena.var(0);
        let v2 = arena.var(0);
        let con = arena.con(1);

        let (mut a, mut b) = (v1, v2);
        assert!(!arena.equal(&mut a, &mut b));

        let (mut a, mut b) = (v1, con);
        assert!(!arena.equal(&mut a, &mut b));

        assert_eq!(arena.shape(v1), Shape::Var);
        assert_eq!(arena.shape(v2), Shape::Var);
    }

    #[test]
    fn equal_follows_bindings() {
        let mut arena = TermArena::new();
        let con = arena.con(6);
        let var = arena.var(0);

        let (mut v, mut c) = (var, con);
        assert!(arena.unify(&mut v, &mut c));

        let (mut a, mut b) = (var, con);
        assert!(arena.equal(&mut a, &mut b));
    }

    #[test]
    fn equal_compares_applications_structurally() {
        let mut arena = TermArena::new();
        let c1 = arena.con(1);
        let c2 = arena.con(2);
        let c1_again = arena.con(1);
        let c2_again = arena.con(2);
        let lhs = arena.app(c1, c2);
        let rhs = arena.app(c1_again, c2_again);

        let (mut a, mut b) = (lhs, rhs);
        assert!(arena.equal(&mut a, &mut b));
        // Proven equal, so the left handle now aliases the right node.
        assert_eq!(a, rhs);

        let c3 = arena.con(3);
        let mut other = arena.app(c1, c3);
        let mut a = lhs;
        assert!(!arena.equal(&mut a, &mut other));
    }
}
