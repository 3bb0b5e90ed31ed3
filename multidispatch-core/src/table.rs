//! # Dispatch Tables
//!
//! A [`DispatchTable`] is a callable whose implementation is chosen at call
//! time. Its dispatch function maps the call to a [`DispatchValue`]; the value
//! then selects a method from the table's registrations.
//!
//! # Resolution
//!
//! 1. **Exact**: a method registered under a key equal to the value.
//! 2. **Matched**: the first key, in registration order, that the table's
//!    [`Matcher`] accepts for the value.
//! 3. **Default**: the method registered under [`MethodKey::Default`].
//!
//! If all three fail, invocation returns [`DispatchError::NoMethod`].
//!
//! # Example
//!
//! ```rust
//! use multidispatch_core::{Call, DispatchTable, DispatchValue};
//!
//! type Pair = (DispatchValue, DispatchValue);
//!
//! let combine: DispatchTable<Pair, String> =
//!     DispatchTable::new("combine", |call: &Call<'_, (), Pair>| {
//!         let (x, y) = call.args();
//!         DispatchValue::from((x.type_of(), y.type_of()))
//!     });
//!
//! combine.register_default(|_| "???".to_string());
//! assert_eq!(combine.call((1.into(), "a".into())).unwrap(), "???");
//! ```

use crate::{
    call::Call,
    error::DispatchError,
    matcher::Matcher,
    relation::MatchRelation,
    settings::Settings,
    value::DispatchValue,
};
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::{fmt, sync::Arc};

/// A registered implementation.
pub type Method<A, R, C = ()> = Arc<dyn for<'c> Fn(Call<'c, C, A>) -> R + Send + Sync>;

/// A table's dispatch function.
pub type DispatchFn<A, C = ()> =
    Arc<dyn for<'a, 'c> Fn(&'a Call<'c, C, A>) -> DispatchValue + Send + Sync>;

/// Turn a closure into a [`Method`].
///
/// Useful with [`DispatchTable::insert_method`] when one method is stored
/// under several keys, or when a method is wrapped before registration.
pub fn method<A, R, C, F>(f: F) -> Method<A, R, C>
where
    F: Fn(Call<'_, C, A>) -> R + Send + Sync + 'static,
{
    Arc::new(f)
}

/// The key a method is registered under.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MethodKey {
    /// The reserved fallback key. No dispatch value is ever equal to it.
    Default,
    /// A dispatch value.
    Value(DispatchValue),
}

/// The reserved fallback key.
pub const DEFAULT: MethodKey = MethodKey::Default;

impl From<DispatchValue> for MethodKey {
    fn from(value: DispatchValue) -> Self {
        MethodKey::Value(value)
    }
}

impl fmt::Display for MethodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MethodKey::Default => f.write_str("Default"),
            MethodKey::Value(value) => write!(f, "{value}"),
        }
    }
}

/// How a method was selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionKind {
    /// Registered under a key equal to the dispatch value.
    Exact,
    /// Registered under this key, which the matcher accepted.
    Matched(DispatchValue),
    /// The table's default method.
    Default,
}

/// A selected method together with how it was selected.
pub struct Resolution<A, R, C = ()> {
    kind: ResolutionKind,
    method: Method<A, R, C>,
}

impl<A, R, C> Resolution<A, R, C> {
    /// How the method was selected.
    pub fn kind(&self) -> &ResolutionKind {
        &self.kind
    }

    /// The selected method.
    pub fn method(&self) -> &Method<A, R, C> {
        &self.method
    }

    /// Take the selected method.
    pub fn into_method(self) -> Method<A, R, C> {
        self.method
    }
}

impl<A, R, C> fmt::Debug for Resolution<A, R, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolution")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

struct Methods<A, R, C> {
    entries: IndexMap<DispatchValue, Method<A, R, C>>,
    default: Option<Method<A, R, C>>,
}

impl<A, R, C> Methods<A, R, C> {
    fn new() -> Self {
        Self {
            entries: IndexMap::new(),
            default: None,
        }
    }

    fn insert(&mut self, key: MethodKey, method: Method<A, R, C>) -> Option<Method<A, R, C>> {
        match key {
            // Overwriting keeps the key's original position in the scan order.
            MethodKey::Value(value) => self.entries.insert(value, method),
            MethodKey::Default => self.default.replace(method),
        }
    }

    fn remove(&mut self, key: &MethodKey) -> Option<Method<A, R, C>> {
        match key {
            MethodKey::Value(value) => self.entries.shift_remove(value),
            MethodKey::Default => self.default.take(),
        }
    }
}

/// A callable that selects its implementation by dispatch value.
///
/// `A` is the argument type, `R` the result type of every method, and `C`
/// the type of the optional context object.
pub struct DispatchTable<A, R, C = ()> {
    name: String,
    dispatch: DispatchFn<A, C>,
    methods: RwLock<Methods<A, R, C>>,
    pass_context: bool,
    matcher: Arc<dyn Matcher>,
}

impl<A, R, C> DispatchTable<A, R, C> {
    /// Create a table using the process-wide settings and the shared
    /// [`MatchRelation`].
    pub fn new<F>(name: impl Into<String>, dispatch: F) -> Self
    where
        F: Fn(&Call<'_, C, A>) -> DispatchValue + Send + Sync + 'static,
    {
        Self::builder(name, dispatch).build()
    }

    /// Start building a table.
    ///
    /// The process-wide context-passing default is read here, once.
    pub fn builder<F>(name: impl Into<String>, dispatch: F) -> TableBuilder<A, R, C>
    where
        F: Fn(&Call<'_, C, A>) -> DispatchValue + Send + Sync + 'static,
    {
        TableBuilder {
            name: name.into(),
            dispatch: Arc::new(dispatch),
            pass_context: Settings::current().pass_context,
            matcher: None,
            methods: Methods::new(),
        }
    }

    /// The table's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the context object is passed through to dispatch function
    /// and methods.
    pub fn passes_context(&self) -> bool {
        self.pass_context
    }

    /// Register `method` under `value`, replacing any previous method.
    ///
    /// Returns the stored method so it stays callable on its own.
    pub fn register<F>(&self, value: impl Into<DispatchValue>, method: F) -> Method<A, R, C>
    where
        F: Fn(Call<'_, C, A>) -> R + Send + Sync + 'static,
    {
        let method = self::method(method);
        self.insert_method(MethodKey::Value(value.into()), method.clone());
        method
    }

    /// Register the default method, replacing any previous one.
    pub fn register_default<F>(&self, method: F) -> Method<A, R, C>
    where
        F: Fn(Call<'_, C, A>) -> R + Send + Sync + 'static,
    {
        let method = self::method(method);
        self.insert_method(MethodKey::Default, method.clone());
        method
    }

    /// Store an existing method under `key`, returning the one it replaced.
    pub fn insert_method(
        &self,
        key: impl Into<MethodKey>,
        method: Method<A, R, C>,
    ) -> Option<Method<A, R, C>> {
        let key = key.into();
        #[cfg(feature = "tracing")]
        tracing::trace!(table = %self.name, key = %key, "registering method");
        self.methods.write().insert(key, method)
    }

    /// Remove the method registered under `value`.
    pub fn unregister(&self, value: impl Into<DispatchValue>) -> Option<Method<A, R, C>> {
        self.remove_method(&MethodKey::Value(value.into()))
    }

    /// Remove the default method.
    pub fn unregister_default(&self) -> Option<Method<A, R, C>> {
        self.remove_method(&MethodKey::Default)
    }

    /// Remove the method registered under `key`.
    ///
    /// Later registrations keep their relative order.
    pub fn remove_method(&self, key: &MethodKey) -> Option<Method<A, R, C>> {
        self.methods.write().remove(key)
    }

    /// Number of non-default registrations.
    pub fn len(&self) -> usize {
        self.methods.read_recursive().entries.len()
    }

    /// Returns true if nothing but possibly a default is registered.
    pub fn is_empty(&self) -> bool {
        self.methods.read_recursive().entries.is_empty()
    }

    /// Returns true if a method is registered under exactly `value`.
    pub fn contains(&self, value: &DispatchValue) -> bool {
        self.methods.read_recursive().entries.contains_key(value)
    }

    /// The method registered under exactly `value`.
    pub fn get(&self, value: &DispatchValue) -> Option<Method<A, R, C>> {
        self.methods.read_recursive().entries.get(value).cloned()
    }

    /// Returns true if a default method is registered.
    pub fn has_default(&self) -> bool {
        self.methods.read_recursive().default.is_some()
    }

    /// Registered keys in scan order.
    pub fn keys(&self) -> Vec<DispatchValue> {
        self.methods.read_recursive().entries.keys().cloned().collect()
    }

    /// Select the method for a dispatch value without calling it.
    pub fn resolve(&self, value: &DispatchValue) -> Option<Resolution<A, R, C>> {
        // The matcher may call back into this table.
        let methods = self.methods.read_recursive();

        if let Some(method) = methods.entries.get(value) {
            return Some(Resolution {
                kind: ResolutionKind::Exact,
                method: method.clone(),
            });
        }

        if let Some((key, method)) = methods
            .entries
            .iter()
            .find(|(key, _)| self.matcher.matches(key, value))
        {
            return Some(Resolution {
                kind: ResolutionKind::Matched(key.clone()),
                method: method.clone(),
            });
        }

        methods.default.as_ref().map(|method| Resolution {
            kind: ResolutionKind::Default,
            method: method.clone(),
        })
    }

    /// Invoke the table, optionally on a context object.
    ///
    /// The context reaches the dispatch function and the method only if the
    /// table passes context.
    pub fn invoke(&self, context: Option<&C>, args: A) -> Result<R, DispatchError> {
        let call = Call::new(context.filter(|_| self.pass_context), args);
        let value = (self.dispatch)(&call);

        let Some(resolution) = self.resolve(&value) else {
            #[cfg(feature = "tracing")]
            tracing::debug!(table = %self.name, value = %value, "no method for dispatch value");
            return Err(DispatchError::no_method(&self.name, value));
        };

        #[cfg(feature = "tracing")]
        tracing::trace!(
            table = %self.name,
            value = %value,
            kind = ?resolution.kind,
            "resolved method"
        );

        Ok((resolution.method)(call))
    }

    /// Invoke the table without a context object.
    pub fn call(&self, args: A) -> Result<R, DispatchError> {
        self.invoke(None, args)
    }

    /// Bind the table to a context object.
    pub fn bind<'c>(&self, context: &'c C) -> Bound<'_, 'c, A, R, C> {
        Bound {
            table: self,
            context,
        }
    }
}

impl<A, R, C> fmt::Debug for DispatchTable<A, R, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let methods = self.methods.read_recursive();
        f.debug_struct("DispatchTable")
            .field("name", &self.name)
            .field("pass_context", &self.pass_context)
            .field("keys", &methods.entries.keys().collect::<Vec<_>>())
            .field("has_default", &methods.default.is_some())
            .finish_non_exhaustive()
    }
}

/// A table bound to a context object, as when invoked as a member of it.
pub struct Bound<'t, 'c, A, R, C> {
    table: &'t DispatchTable<A, R, C>,
    context: &'c C,
}

impl<'t, 'c, A, R, C> Bound<'t, 'c, A, R, C> {
    /// Invoke the table on the bound context.
    pub fn call(&self, args: A) -> Result<R, DispatchError> {
        self.table.invoke(Some(self.context), args)
    }

    /// The bound context object.
    pub fn context(&self) -> &'c C {
        self.context
    }

    /// The underlying table.
    pub fn table(&self) -> &'t DispatchTable<A, R, C> {
        self.table
    }
}

/// Builder for [`DispatchTable`].
///
/// # Example
/// ```rust
/// use multidispatch_core::{Call, DispatchTable, DispatchValue};
///
/// let sign = DispatchTable::<i64, &'static str>::builder("sign", |call: &Call<'_, (), i64>| {
///     DispatchValue::from(call.args().signum())
/// })
/// .method(-1, |_| "negative")
/// .method(1, |_| "positive")
/// .default_method(|_| "zero")
/// .build();
///
/// assert_eq!(sign.call(-7).unwrap(), "negative");
/// assert_eq!(sign.call(0).unwrap(), "zero");
/// ```
pub struct TableBuilder<A, R, C = ()> {
    name: String,
    dispatch: DispatchFn<A, C>,
    pass_context: bool,
    matcher: Option<Arc<dyn Matcher>>,
    methods: Methods<A, R, C>,
}

impl<A, R, C> TableBuilder<A, R, C> {
    /// Set whether the context object is passed through.
    pub fn pass_context(mut self, enabled: bool) -> Self {
        self.pass_context = enabled;
        self
    }

    /// Take the context-passing policy from explicit settings.
    pub fn settings(mut self, settings: &Settings) -> Self {
        self.pass_context = settings.pass_context;
        self
    }

    /// Match keys with this relation instead of the shared one.
    pub fn relation(self, relation: MatchRelation) -> Self {
        self.matcher(relation)
    }

    /// Match keys with an arbitrary matcher.
    pub fn matcher<M: Matcher + 'static>(mut self, matcher: M) -> Self {
        self.matcher = Some(Arc::new(matcher));
        self
    }

    /// Register a method.
    pub fn method<F>(mut self, value: impl Into<DispatchValue>, method: F) -> Self
    where
        F: Fn(Call<'_, C, A>) -> R + Send + Sync + 'static,
    {
        self.methods
            .insert(MethodKey::Value(value.into()), self::method(method));
        self
    }

    /// Register the default method.
    pub fn default_method<F>(mut self, method: F) -> Self
    where
        F: Fn(Call<'_, C, A>) -> R + Send + Sync + 'static,
    {
        self.methods.insert(MethodKey::Default, self::method(method));
        self
    }

    /// Build the table.
    pub fn build(self) -> DispatchTable<A, R, C> {
        let matcher = self
            .matcher
            .unwrap_or_else(|| Arc::new(MatchRelation::shared()));
        DispatchTable {
            name: self.name,
            dispatch: self.dispatch,
            methods: RwLock::new(self.methods),
            pass_context: self.pass_context,
            matcher,
        }
    }
}
