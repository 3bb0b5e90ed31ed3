//! # The Match Relation
//!
//! [`MatchRelation`] decides whether a registered key matches a dispatch
//! value. It is itself a [`DispatchTable`]: its dispatch function is the
//! identity on the compared pair `(candidate, query)`, and its registrations
//! are comparison rules. The baseline rules of [`BuiltinMatch`] are installed
//! as the table's default method, so a pair without a rule still gets an
//! answer.
//!
//! A rule is keyed either by a value pair, which applies to exactly that
//! pair, or by a *shape*, a pair of types such as `(symbol, symbol)`, which
//! applies to every pair whose runtime types are subtypes of it. Exact pairs
//! are found first; shape keys are then tried in registration order, matched
//! with [`BuiltinMatch`] against [`shape`] of the pair. The relation never
//! needs itself to pick a rule.
//!
//! Rules extend the baseline, they never narrow it: a pair matches if its
//! rule accepts it or [`builtin`](MatchRelation::builtin) does. Several rules
//! registered under one key all apply.
//!
//! ```rust
//! use multidispatch_core::{DispatchValue, MatchRelation, Type};
//!
//! let relation = MatchRelation::new();
//! let symbols = (Type::symbol(), Type::symbol());
//! let sym = DispatchValue::symbol;
//!
//! relation.register_rule(symbols.clone(), move |_, candidate, query| {
//!     candidate == &sym("animal") && [sym("cat"), sym("dog")].contains(query)
//! });
//! relation.register_rule(symbols, move |_, candidate, query| {
//!     candidate == &sym("color") && query == &sym("red")
//! });
//!
//! assert!(relation.matches(&sym("animal"), &sym("cat")));
//! assert!(relation.matches(&sym("color"), &sym("red")));
//! assert!(!relation.matches(&sym("cat"), &sym("animal")));
//! ```

use crate::{
    call::Call,
    matcher::{BuiltinMatch, Matcher, structural_match},
    table::{DispatchTable, Method, method},
    value::DispatchValue,
};
use std::{
    fmt,
    sync::{Arc, LazyLock},
};

type Pair = (DispatchValue, DispatchValue);

/// The table backing a [`MatchRelation`].
pub type RelationTable = DispatchTable<Pair, bool, MatchRelation>;

static SHARED: LazyLock<MatchRelation> = LazyLock::new(MatchRelation::new);

/// The extensible relation deciding whether a key matches a dispatch value.
///
/// Cloning yields a handle to the same relation.
#[derive(Clone)]
pub struct MatchRelation {
    table: Arc<RelationTable>,
}

impl MatchRelation {
    /// Create an isolated relation with only the baseline rules.
    pub fn new() -> Self {
        let table: RelationTable =
            DispatchTable::builder("match_relation", |call: &Call<'_, MatchRelation, Pair>| {
                let (candidate, query) = call.args();
                DispatchValue::tuple([candidate.clone(), query.clone()])
            })
            .pass_context(true)
            .matcher(ShapeMatch)
            .default_method(|call| {
                let (candidate, query) = call.args();
                baseline(call.context(), candidate, query)
            })
            .build();

        Self {
            table: Arc::new(table),
        }
    }

    /// The process-wide relation used by tables built without an explicit
    /// relation or matcher.
    pub fn shared() -> Self {
        SHARED.clone()
    }

    /// Returns true if `candidate` accepts `query`.
    ///
    /// Total: a pair without a rule falls back to [`builtin`](Self::builtin).
    pub fn matches(&self, candidate: &DispatchValue, query: &DispatchValue) -> bool {
        self.table
            .invoke(Some(self), (candidate.clone(), query.clone()))
            .unwrap_or_else(|_| self.builtin(candidate, query))
    }

    /// The baseline rules. Tuple elements are compared with the full
    /// relation, so rules apply inside tuples too.
    pub fn builtin(&self, candidate: &DispatchValue, query: &DispatchValue) -> bool {
        structural_match(candidate, query, &|c, q| self.matches(c, q))
    }

    /// Register a comparison rule under `key`.
    ///
    /// `key` is a shape, `(candidate type, query type)`, or an exact value
    /// pair. A rule already registered under the same key stays in effect:
    /// the pair matches if any of them, or the baseline, accepts it. The
    /// rule receives the relation so it can recurse.
    pub fn register_rule<F>(&self, key: impl Into<DispatchValue>, rule: F)
    where
        F: Fn(&MatchRelation, &DispatchValue, &DispatchValue) -> bool + Send + Sync + 'static,
    {
        let key = key.into();
        let previous: Option<Method<Pair, bool, MatchRelation>> = self.table.get(&key);
        self.table.insert_method(
            key,
            method(move |call: Call<'_, MatchRelation, Pair>| {
                let accepted = match call.context() {
                    Some(relation) => {
                        let (candidate, query) = call.args();
                        rule(relation, candidate, query)
                    }
                    None => false,
                };
                if accepted {
                    return true;
                }
                match &previous {
                    Some(previous) => previous(call),
                    None => {
                        let (candidate, query) = call.args();
                        baseline(call.context(), candidate, query)
                    }
                }
            }),
        );
    }

    /// Remove every rule registered under `key`. Returns true if one existed.
    pub fn unregister_rule(&self, key: impl Into<DispatchValue>) -> bool {
        self.table.unregister(key).is_some()
    }

    /// The underlying table.
    pub fn table(&self) -> &RelationTable {
        &self.table
    }
}

impl Default for MatchRelation {
    fn default() -> Self {
        Self::new()
    }
}

impl Matcher for MatchRelation {
    fn matches(&self, candidate: &DispatchValue, query: &DispatchValue) -> bool {
        MatchRelation::matches(self, candidate, query)
    }
}

impl fmt::Debug for MatchRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatchRelation")
            .field("rules", &self.table.keys())
            .finish()
    }
}

fn baseline(
    relation: Option<&MatchRelation>,
    candidate: &DispatchValue,
    query: &DispatchValue,
) -> bool {
    match relation {
        Some(relation) => relation.builtin(candidate, query),
        None => BuiltinMatch.matches(candidate, query),
    }
}

/// Selects shape-keyed rules for a compared pair.
struct ShapeMatch;

impl Matcher for ShapeMatch {
    fn matches(&self, key: &DispatchValue, pair: &DispatchValue) -> bool {
        match pair.as_tuple() {
            Some([candidate, query]) => BuiltinMatch.matches(key, &shape(candidate, query)),
            _ => false,
        }
    }
}

/// The shape of a compared pair: the runtime types of both values.
pub fn shape(candidate: &DispatchValue, query: &DispatchValue) -> DispatchValue {
    DispatchValue::from((candidate.type_of(), query.type_of()))
}
