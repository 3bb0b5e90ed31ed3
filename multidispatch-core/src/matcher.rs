//! The matching seam used by the relational scan.
//!
//! A [`Matcher`] decides whether a registered key (the *candidate*) accepts a
//! computed dispatch value (the *query*). [`BuiltinMatch`] implements the
//! baseline rules every relation starts from:
//!
//! 1. two type-like values match if the candidate is the query's type or one
//!    of its supertypes;
//! 2. two tuples of equal length match if every element pair matches;
//! 3. anything else matches on equality.

use crate::value::DispatchValue;

/// Decides whether a registered key accepts a dispatch value.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be used to match dispatch values",
    label = "missing `Matcher` implementation",
    note = "Implement `Matcher::matches` or use `MatchRelation`."
)]
pub trait Matcher: Send + Sync {
    /// Returns true if `candidate` accepts `query`.
    fn matches(&self, candidate: &DispatchValue, query: &DispatchValue) -> bool;
}

impl<F> Matcher for F
where
    F: Fn(&DispatchValue, &DispatchValue) -> bool + Send + Sync,
{
    fn matches(&self, candidate: &DispatchValue, query: &DispatchValue) -> bool {
        self(candidate, query)
    }
}

/// The baseline rules, with no extension point.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinMatch;

impl Matcher for BuiltinMatch {
    fn matches(&self, candidate: &DispatchValue, query: &DispatchValue) -> bool {
        structural_match(candidate, query, &|c, q| self.matches(c, q))
    }
}

/// Applies the baseline rules, delegating tuple elements to `element`.
///
/// Values are immutable trees, so recursion through `element` always
/// terminates as long as `element` itself only recurses structurally.
pub(crate) fn structural_match(
    candidate: &DispatchValue,
    query: &DispatchValue,
    element: &dyn Fn(&DispatchValue, &DispatchValue) -> bool,
) -> bool {
    match (candidate, query) {
        (DispatchValue::Type(candidate), DispatchValue::Type(query)) => {
            query.is_subtype_of(candidate)
        }
        (DispatchValue::Tuple(candidates), DispatchValue::Tuple(queries))
            if candidates.len() == queries.len() =>
        {
            candidates
                .iter()
                .zip(queries.iter())
                .all(|(c, q)| element(c, q))
        }
        _ => candidate == query,
    }
}
