//! Error types for multidispatch.
//!
//! The core originates exactly one error, [`DispatchError::NoMethod`]. Panics
//! and error values produced by dispatch functions or methods are never
//! wrapped; they reach the caller unchanged.

use crate::value::DispatchValue;
use thiserror::Error;

/// Errors raised while invoking a dispatch table.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DispatchError {
    /// No registration matched the dispatch value and the table has no
    /// default method.
    #[error("no method in `{table}` for dispatch value {value}")]
    NoMethod {
        /// Name of the table that was invoked.
        table: String,
        /// The value computed by the table's dispatch function.
        value: DispatchValue,
    },
}

impl DispatchError {
    pub(crate) fn no_method(table: &str, value: DispatchValue) -> Self {
        DispatchError::NoMethod {
            table: table.to_string(),
            value,
        }
    }

    /// Name of the table that failed to dispatch.
    pub fn table(&self) -> &str {
        match self {
            DispatchError::NoMethod { table, .. } => table,
        }
    }

    /// The dispatch value that had no method.
    pub fn value(&self) -> &DispatchValue {
        match self {
            DispatchError::NoMethod { value, .. } => value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DispatchError;
    use crate::{Type, value::DispatchValue};

    #[test]
    fn test_no_method_display() {
        let err = DispatchError::no_method(
            "area",
            DispatchValue::from((Type::int(), Type::str())),
        );
        assert_eq!(
            err.to_string(),
            "no method in `area` for dispatch value (<type int>, <type str>)"
        );
        assert_eq!(err.table(), "area");
    }
}
