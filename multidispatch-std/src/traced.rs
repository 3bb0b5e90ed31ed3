//! Tracing instrumentation for methods.

use multidispatch_core::{Call, Method, method};

/// Wrap a method so each execution runs inside a `tracing` span.
///
/// The span is named `method` and carries `label` and whether the call had a
/// context object. Without the `tracing` feature the wrapper only forwards
/// the call.
///
/// # Example
///
/// ```rust
/// use multidispatch_core::{Call, DispatchTable, DispatchValue, method};
/// use multidispatch_std::traced::traced;
///
/// let table: DispatchTable<i64, i64> =
///     DispatchTable::new("double", |_: &Call<'_, (), i64>| DispatchValue::None);
/// let double = method(|call: Call<'_, (), i64>| call.into_args() * 2);
/// table.insert_method(DispatchValue::None, traced("double", double));
///
/// assert_eq!(table.call(21).unwrap(), 42);
/// ```
pub fn traced<A, R, C>(label: &'static str, inner: Method<A, R, C>) -> Method<A, R, C>
where
    A: 'static,
    R: 'static,
    C: 'static,
{
    method(move |call: Call<'_, C, A>| {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "method",
            method = %label,
            has_context = call.context().is_some()
        )
        .entered();
        #[cfg(not(feature = "tracing"))]
        let _ = label;

        inner(call)
    })
}
