//! # multidispatch-std
//!
//! Standard additions on top of the multidispatch core.
//!
//! This crate provides:
//! - **Namespaces**: [`namespace::Namespace`], tables grouped under a qualified name
//! - **Instrumentation**: [`traced::traced`], a span around each method run
//! - **Testing**: recording methods and matchers in [`testing`]

#![deny(clippy::pub_use, clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core types
pub use multidispatch_core;

// Modules
pub mod namespace;
pub mod testing;
pub mod traced;
