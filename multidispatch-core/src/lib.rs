//! # multidispatch-core
//!
//! Dispatch tables selected by arbitrary dispatch functions.
//!
//! A [`DispatchTable`] maps each call to a [`DispatchValue`] through a
//! user-supplied dispatch function, then picks the method registered for that
//! value. Values need not be equal to a key to select it: the table's
//! [`Matcher`], normally a [`MatchRelation`], may accept a key for a value
//! (a supertype for a type, a tuple of supertypes for a tuple of types, or
//! anything a user-registered rule decides).
//!
//! # Building Blocks
//!
//! - [`DispatchValue`] / [`Type`] - what dispatch functions return and methods
//!   are registered under
//! - [`Call`] - the arguments plus the optional context object
//! - [`DispatchTable`] / [`TableBuilder`] - registration and invocation
//! - [`MatchRelation`] - the extensible relation, itself a dispatch table
//! - [`Settings`] - the construction-time context-passing policy
//!
//! # Error Types
//!
//! - [`DispatchError`] - no method and no default for a dispatch value

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod call;
mod error;
mod matcher;
mod relation;
pub mod settings;
mod table;
mod types;
mod value;

// Re-exports
pub use call::Call;
pub use error::DispatchError;
pub use matcher::{BuiltinMatch, Matcher};
pub use relation::{MatchRelation, RelationTable, shape};
pub use settings::Settings;
pub use table::{
    Bound, DEFAULT, DispatchFn, DispatchTable, Method, MethodKey, Resolution, ResolutionKind,
    TableBuilder, method,
};
pub use types::Type;
pub use value::{DispatchKey, DispatchValue, Opaque, Typed};
