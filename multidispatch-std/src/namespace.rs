//! Named groups of dispatch tables.
//!
//! A [`Namespace`] owns tables under qualified names (`prefix.name`), so
//! tables defined in different places can be looked up and extended by name.
//! Two namespaces never share tables, even when their tables have the same
//! short name.
//!
//! # Example
//!
//! ```rust
//! use multidispatch_core::{Call, DispatchValue};
//! use multidispatch_std::namespace::Namespace;
//!
//! let shapes: Namespace<f64, String> = Namespace::new("shapes");
//! shapes
//!     .define("describe", |call: &Call<'_, (), f64>| {
//!         DispatchValue::from(*call.args() > 0.0)
//!     })
//!     .unwrap();
//!
//! shapes.register("describe", true, |call| format!("radius {}", call.args())).unwrap();
//!
//! assert_eq!(shapes.call("describe", 2.0).unwrap(), "radius 2");
//! assert_eq!(shapes.names(), vec!["shapes.describe".to_string()]);
//! ```

use indexmap::IndexMap;
use multidispatch_core::{Call, DispatchError, DispatchTable, DispatchValue, Method};
use parking_lot::RwLock;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised by [`Namespace`] operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NamespaceError {
    /// A table with this qualified name already exists.
    #[error("table already defined: {0}")]
    AlreadyDefined(String),

    /// No table with this qualified name exists.
    #[error("table not defined: {0}")]
    NotDefined(String),

    /// The table was found but could not dispatch.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

/// A registry of dispatch tables sharing one name prefix.
pub struct Namespace<A, R, C = ()> {
    prefix: String,
    tables: RwLock<IndexMap<String, Arc<DispatchTable<A, R, C>>>>,
}

impl<A, R, C> Namespace<A, R, C> {
    /// Create an empty namespace.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            tables: RwLock::new(IndexMap::new()),
        }
    }

    /// The namespace prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The qualified name for a short table name.
    pub fn qualified(&self, name: &str) -> String {
        format!("{}.{}", self.prefix, name)
    }

    /// Define a table named by its qualified name.
    pub fn define<F>(
        &self,
        name: &str,
        dispatch: F,
    ) -> Result<Arc<DispatchTable<A, R, C>>, NamespaceError>
    where
        F: Fn(&Call<'_, C, A>) -> DispatchValue + Send + Sync + 'static,
    {
        self.install(name, DispatchTable::new(self.qualified(name), dispatch))
    }

    /// Add an already built table under `name`.
    ///
    /// Use this for tables that need a builder, e.g. to pass context or use a
    /// private relation. Build them with [`qualified`](Self::qualified) as
    /// their name to keep diagnostics consistent.
    pub fn install(
        &self,
        name: &str,
        table: DispatchTable<A, R, C>,
    ) -> Result<Arc<DispatchTable<A, R, C>>, NamespaceError> {
        let mut tables = self.tables.write();
        if tables.contains_key(name) {
            return Err(NamespaceError::AlreadyDefined(self.qualified(name)));
        }
        let table = Arc::new(table);
        tables.insert(name.to_string(), table.clone());
        Ok(table)
    }

    /// Remove a table, returning it.
    pub fn remove(&self, name: &str) -> Option<Arc<DispatchTable<A, R, C>>> {
        self.tables.write().shift_remove(name)
    }

    /// Look up a table by short name.
    pub fn get(&self, name: &str) -> Option<Arc<DispatchTable<A, R, C>>> {
        self.tables.read().get(name).cloned()
    }

    /// Look up a table, failing with [`NamespaceError::NotDefined`].
    pub fn table(&self, name: &str) -> Result<Arc<DispatchTable<A, R, C>>, NamespaceError> {
        self.get(name)
            .ok_or_else(|| NamespaceError::NotDefined(self.qualified(name)))
    }

    /// Returns true if a table with this short name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.tables.read().contains_key(name)
    }

    /// Qualified names of all tables, in definition order.
    pub fn names(&self) -> Vec<String> {
        self.tables
            .read()
            .keys()
            .map(|name| self.qualified(name))
            .collect()
    }

    /// Number of tables.
    pub fn len(&self) -> usize {
        self.tables.read().len()
    }

    /// Returns true if no tables are defined.
    pub fn is_empty(&self) -> bool {
        self.tables.read().is_empty()
    }

    /// Register a method on the named table.
    pub fn register<F>(
        &self,
        name: &str,
        value: impl Into<DispatchValue>,
        method: F,
    ) -> Result<Method<A, R, C>, NamespaceError>
    where
        F: Fn(Call<'_, C, A>) -> R + Send + Sync + 'static,
    {
        Ok(self.table(name)?.register(value, method))
    }

    /// Register the default method on the named table.
    pub fn register_default<F>(
        &self,
        name: &str,
        method: F,
    ) -> Result<Method<A, R, C>, NamespaceError>
    where
        F: Fn(Call<'_, C, A>) -> R + Send + Sync + 'static,
    {
        Ok(self.table(name)?.register_default(method))
    }

    /// Invoke the named table, optionally on a context object.
    pub fn invoke(&self, name: &str, context: Option<&C>, args: A) -> Result<R, NamespaceError> {
        // The lock is released before the table runs user code.
        let table = self.table(name)?;
        Ok(table.invoke(context, args)?)
    }

    /// Invoke the named table without a context object.
    pub fn call(&self, name: &str, args: A) -> Result<R, NamespaceError> {
        self.invoke(name, None, args)
    }
}

impl<A, R, C> std::fmt::Debug for Namespace<A, R, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Namespace")
            .field("prefix", &self.prefix)
            .field("tables", &self.tables.read().keys().collect::<Vec<_>>())
            .finish()
    }
}
