//! # multidispatch - Generalized Multiple Dispatch
//!
//! `multidispatch` selects an implementation by the result of an arbitrary
//! dispatch function instead of by argument types alone. A
//! [`DispatchTable`] computes a [`DispatchValue`] from each call and runs the
//! method registered under a key that matches it. Matching goes through a
//! [`MatchRelation`], which understands subtyping between [`Type`]s and
//! element-wise tuples out of the box and can be extended with new rules.
//!
//! ## Quick Start
//!
//! ```rust
//! use multidispatch::prelude::*;
//!
//! let combine: DispatchTable<(DispatchValue, DispatchValue), String> =
//!     DispatchTable::builder("combine", |call: &Call<'_, (), (DispatchValue, DispatchValue)>| {
//!         let (x, y) = call.args();
//!         DispatchValue::tuple([x.type_of(), y.type_of()])
//!     })
//!     .method((Type::int(), Type::int()), |call| {
//!         let (x, y) = call.into_args();
//!         format!("{x}*{y}")
//!     })
//!     .default_method(|_| "???".to_string())
//!     .build();
//!
//! assert_eq!(combine.call((21.into(), 2.into())).unwrap(), "21*2");
//! assert_eq!(combine.call((21.into(), "bar".into())).unwrap(), "???");
//! ```
//!
//! ## Crates
//!
//! - `multidispatch-core`: values, types, tables and the match relation
//! - `multidispatch-std`: namespaces, traced methods and testing utilities

#![deny(clippy::pub_use, clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use multidispatch_core::{
    // Invocation
    Bound,
    // Matching
    BuiltinMatch,
    Call,
    DEFAULT,
    // Errors
    DispatchError,
    DispatchFn,
    // Values
    DispatchKey,
    // Tables
    DispatchTable,
    DispatchValue,
    MatchRelation,
    Matcher,
    Method,
    MethodKey,
    Opaque,
    RelationTable,
    Resolution,
    ResolutionKind,
    // Configuration
    Settings,
    TableBuilder,
    Type,
    Typed,
    method,
    settings,
    shape,
};

pub use multidispatch_std::namespace::{Namespace, NamespaceError};

/// Named groups of dispatch tables.
pub mod namespace {
    pub use multidispatch_std::namespace::{Namespace, NamespaceError};
}

/// Method instrumentation.
pub mod traced {
    pub use multidispatch_std::traced::traced;
}

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use multidispatch_std::testing::*;
}

/// Prelude module - common imports for multidispatch.
///
/// # Usage
///
/// ```rust
/// use multidispatch::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Call, DEFAULT, DispatchError, DispatchTable, DispatchValue, MatchRelation, Method,
        Namespace, Type, Typed, method,
    };
}
