//! Testing utilities for multidispatch.
//!
//! This module provides utilities to make testing dispatch tables easier.
//!
//! # Features
//!
//! - [`RecordingMethod`]: A method that records every call it receives
//! - [`CountingMethod`]: A wrapper counting how often a method runs
//! - [`RecordingMatcher`]: A matcher that records the comparisons it makes

use multidispatch_core::{Call, DispatchValue, Matcher, Method, method};
use parking_lot::Mutex;
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

// ============================================================================
// Recording Method
// ============================================================================

/// A method that records all calls it receives and returns a fixed value.
///
/// # Example
///
/// ```rust
/// use multidispatch_core::{BuiltinMatch, Call, DispatchTable, DispatchValue};
/// use multidispatch_std::testing::RecordingMethod;
///
/// let recorder = RecordingMethod::<i64, &'static str>::new("seen");
/// let table: DispatchTable<i64, &'static str> =
///     DispatchTable::builder("t", |call: &Call<'_, (), i64>| DispatchValue::from(*call.args()))
///         .matcher(BuiltinMatch)
///         .build();
/// table.insert_method(DispatchValue::from(1), recorder.method());
///
/// assert_eq!(table.call(1).unwrap(), "seen");
/// assert_eq!(recorder.calls(), vec![1]);
/// ```
pub struct RecordingMethod<A, R> {
    calls: Arc<Mutex<Vec<RecordedCall<A>>>>,
    result: R,
}

/// One call seen by a [`RecordingMethod`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall<A> {
    /// The call arguments.
    pub args: A,
    /// Whether a context object was visible to the method.
    pub had_context: bool,
}

impl<A, R> RecordingMethod<A, R>
where
    A: Clone + Send + 'static,
    R: Clone + Send + Sync + 'static,
{
    /// Create a recording method that returns `result`.
    pub fn new(result: R) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            result,
        }
    }

    /// A method to register. All methods created from one recorder share its
    /// call log.
    pub fn method<C: 'static>(&self) -> Method<A, R, C> {
        let calls = self.calls.clone();
        let result = self.result.clone();
        method(move |call: Call<'_, C, A>| {
            let had_context = call.context().is_some();
            calls.lock().push(RecordedCall {
                args: call.into_args(),
                had_context,
            });
            result.clone()
        })
    }

    /// Arguments of all recorded calls.
    pub fn calls(&self) -> Vec<A> {
        self.calls.lock().iter().map(|c| c.args.clone()).collect()
    }

    /// All recorded calls.
    pub fn recorded(&self) -> Vec<RecordedCall<A>> {
        self.calls.lock().clone()
    }

    /// Number of recorded calls.
    pub fn count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Clear all recorded calls.
    pub fn clear(&self) {
        self.calls.lock().clear();
    }
}

impl<A, R: Clone> Clone for RecordingMethod<A, R> {
    fn clone(&self) -> Self {
        Self {
            calls: self.calls.clone(),
            result: self.result.clone(),
        }
    }
}

// ============================================================================
// Counting Method
// ============================================================================

/// Counts invocations of the methods it wraps.
///
/// # Example
///
/// ```rust
/// use multidispatch_core::{Call, method};
/// use multidispatch_std::testing::CountingMethod;
///
/// let counter = CountingMethod::new();
/// let wrapped = counter.wrap(method(|call: Call<'_, (), i64>| call.into_args() + 1));
///
/// assert_eq!(wrapped(Call::bare(1)), 2);
/// assert_eq!(counter.count(), 1);
/// ```
#[derive(Debug, Default, Clone)]
pub struct CountingMethod {
    count: Arc<AtomicUsize>,
}

impl CountingMethod {
    /// Create a new counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a method so every call increments this counter.
    pub fn wrap<A, R, C>(&self, inner: Method<A, R, C>) -> Method<A, R, C>
    where
        A: 'static,
        R: 'static,
        C: 'static,
    {
        let count = self.count.clone();
        method(move |call: Call<'_, C, A>| {
            count.fetch_add(1, Ordering::SeqCst);
            inner(call)
        })
    }

    /// Get the current count.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Reset the counter.
    pub fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
    }
}

// ============================================================================
// Recording Matcher
// ============================================================================

/// A matcher that records every `(candidate, query)` pair it is asked about
/// and delegates the answer to an inner matcher.
pub struct RecordingMatcher<M> {
    inner: M,
    comparisons: Arc<Mutex<Vec<(DispatchValue, DispatchValue)>>>,
}

impl<M: Matcher> RecordingMatcher<M> {
    /// Wrap a matcher.
    pub fn new(inner: M) -> Self {
        Self {
            inner,
            comparisons: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A handle to the comparison log, usable after the matcher has been
    /// moved into a table.
    pub fn log(&self) -> ComparisonLog {
        ComparisonLog(self.comparisons.clone())
    }
}

impl<M: Matcher> Matcher for RecordingMatcher<M> {
    fn matches(&self, candidate: &DispatchValue, query: &DispatchValue) -> bool {
        self.comparisons
            .lock()
            .push((candidate.clone(), query.clone()));
        self.inner.matches(candidate, query)
    }
}

/// Shared view of a [`RecordingMatcher`]'s comparisons.
#[derive(Clone)]
pub struct ComparisonLog(Arc<Mutex<Vec<(DispatchValue, DispatchValue)>>>);

impl ComparisonLog {
    /// Candidates compared so far, in order.
    pub fn candidates(&self) -> Vec<DispatchValue> {
        self.0.lock().iter().map(|(c, _)| c.clone()).collect()
    }

    /// Number of comparisons made.
    pub fn count(&self) -> usize {
        self.0.lock().len()
    }

    /// Clear the log.
    pub fn clear(&self) {
        self.0.lock().clear();
    }
}
