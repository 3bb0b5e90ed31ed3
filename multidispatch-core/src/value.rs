//! Dispatch values.
//!
//! A [`DispatchValue`] is what a dispatch function returns and what methods
//! are registered under. Storage compares values by equality; matching beyond
//! equality is the job of a [`Matcher`](crate::Matcher).

use crate::types::Type;
use ordered_float::OrderedFloat;
use std::{
    any::Any,
    fmt,
    hash::{Hash, Hasher},
    sync::Arc,
};

/// A user type that can be used as a dispatch value.
///
/// Implemented automatically for every `Debug + Eq + Hash + Send + Sync`
/// type that implements [`Typed`].
pub trait DispatchKey: fmt::Debug + Send + Sync + 'static {
    /// The runtime type of this value.
    fn dispatch_type(&self) -> Type;

    /// Equality against another key of possibly different concrete type.
    fn key_eq(&self, other: &dyn DispatchKey) -> bool;

    /// Feed this key into a hasher.
    fn key_hash(&self, state: &mut dyn Hasher);

    /// Access the concrete value.
    fn as_any(&self) -> &dyn Any;
}

/// Associates a Rust type with its runtime [`Type`].
pub trait Typed {
    /// The runtime type of this value.
    fn runtime_type(&self) -> Type;
}

impl<T> DispatchKey for T
where
    T: Typed + fmt::Debug + Eq + Hash + Send + Sync + 'static,
{
    fn dispatch_type(&self) -> Type {
        self.runtime_type()
    }

    fn key_eq(&self, other: &dyn DispatchKey) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }

    fn key_hash(&self, mut state: &mut dyn Hasher) {
        self.hash(&mut state);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A shared handle to a user-defined dispatch value.
#[derive(Clone)]
pub struct Opaque(Arc<dyn DispatchKey>);

impl Opaque {
    /// Wrap a user value.
    pub fn new<K: DispatchKey>(key: K) -> Self {
        Self(Arc::new(key))
    }

    /// Downcast to the concrete value.
    pub fn downcast_ref<K: DispatchKey>(&self) -> Option<&K> {
        self.0.as_any().downcast_ref::<K>()
    }

    /// The runtime type of the wrapped value.
    pub fn dispatch_type(&self) -> Type {
        self.0.dispatch_type()
    }
}

impl PartialEq for Opaque {
    fn eq(&self, other: &Self) -> bool {
        self.0.key_eq(other.0.as_ref())
    }
}

impl Eq for Opaque {}

impl Hash for Opaque {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.as_any().type_id().hash(state);
        self.0.key_hash(state);
    }
}

impl fmt::Debug for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

/// A value produced by a dispatch function or used as a registration key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum DispatchValue {
    /// The absent value.
    None,
    /// A boolean.
    Bool(bool),
    /// An integer.
    Int(i64),
    /// A float; NaN compares equal to itself.
    Float(OrderedFloat<f64>),
    /// A string literal.
    Str(Arc<str>),
    /// A named sentinel.
    Symbol(Arc<str>),
    /// A type-like value.
    Type(Type),
    /// An ordered sequence of values.
    Tuple(Arc<[DispatchValue]>),
    /// A user-defined value.
    Opaque(Opaque),
}

impl DispatchValue {
    /// Create a named sentinel.
    pub fn symbol(name: impl Into<Arc<str>>) -> Self {
        DispatchValue::Symbol(name.into())
    }

    /// Create a tuple from any sequence of convertible values.
    pub fn tuple<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<DispatchValue>,
    {
        DispatchValue::Tuple(items.into_iter().map(Into::into).collect())
    }

    /// Wrap a user-defined value.
    pub fn opaque<K: DispatchKey>(key: K) -> Self {
        DispatchValue::Opaque(Opaque::new(key))
    }

    /// The runtime type of this value.
    pub fn type_of(&self) -> Type {
        match self {
            DispatchValue::None => Type::none(),
            DispatchValue::Bool(_) => Type::bool(),
            DispatchValue::Int(_) => Type::int(),
            DispatchValue::Float(_) => Type::float(),
            DispatchValue::Str(_) => Type::str(),
            DispatchValue::Symbol(_) => Type::symbol(),
            DispatchValue::Type(_) => Type::type_(),
            DispatchValue::Tuple(_) => Type::tuple(),
            DispatchValue::Opaque(opaque) => opaque.dispatch_type(),
        }
    }

    /// The runtime type of this value, as a type-like value.
    pub fn type_value(&self) -> DispatchValue {
        DispatchValue::Type(self.type_of())
    }

    /// The contained type, if this value is type-like.
    pub fn as_type(&self) -> Option<&Type> {
        match self {
            DispatchValue::Type(ty) => Some(ty),
            _ => None,
        }
    }

    /// The elements, if this value is a tuple.
    pub fn as_tuple(&self) -> Option<&[DispatchValue]> {
        match self {
            DispatchValue::Tuple(items) => Some(items),
            _ => None,
        }
    }

    /// Returns true for [`DispatchValue::None`].
    pub fn is_none(&self) -> bool {
        matches!(self, DispatchValue::None)
    }
}

impl fmt::Display for DispatchValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchValue::None => f.write_str("None"),
            DispatchValue::Bool(b) => write!(f, "{b}"),
            DispatchValue::Int(i) => write!(f, "{i}"),
            DispatchValue::Float(x) => write!(f, "{x}"),
            DispatchValue::Str(s) => write!(f, "{s:?}"),
            DispatchValue::Symbol(s) => f.write_str(s),
            DispatchValue::Type(ty) => write!(f, "<type {ty}>"),
            DispatchValue::Tuple(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                if items.len() == 1 {
                    f.write_str(",")?;
                }
                f.write_str(")")
            }
            DispatchValue::Opaque(opaque) => write!(f, "{opaque:?}"),
        }
    }
}

// Conversions

impl From<()> for DispatchValue {
    fn from(_: ()) -> Self {
        DispatchValue::None
    }
}

impl From<bool> for DispatchValue {
    fn from(value: bool) -> Self {
        DispatchValue::Bool(value)
    }
}

macro_rules! impl_from_int {
    ($($int:ty),+) => {
        $(
            impl From<$int> for DispatchValue {
                fn from(value: $int) -> Self {
                    DispatchValue::Int(i64::from(value))
                }
            }
        )+
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f64> for DispatchValue {
    fn from(value: f64) -> Self {
        DispatchValue::Float(OrderedFloat(value))
    }
}

impl From<&str> for DispatchValue {
    fn from(value: &str) -> Self {
        DispatchValue::Str(value.into())
    }
}

impl From<String> for DispatchValue {
    fn from(value: String) -> Self {
        DispatchValue::Str(value.into())
    }
}

impl From<Type> for DispatchValue {
    fn from(value: Type) -> Self {
        DispatchValue::Type(value)
    }
}

impl From<&Type> for DispatchValue {
    fn from(value: &Type) -> Self {
        DispatchValue::Type(value.clone())
    }
}

impl From<Opaque> for DispatchValue {
    fn from(value: Opaque) -> Self {
        DispatchValue::Opaque(value)
    }
}

impl<T: Into<DispatchValue>> From<Option<T>> for DispatchValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(DispatchValue::None, Into::into)
    }
}

impl From<Vec<DispatchValue>> for DispatchValue {
    fn from(value: Vec<DispatchValue>) -> Self {
        DispatchValue::Tuple(value.into())
    }
}

/// Implements `From<(T1, ..)>` for tuples of convertible values.
macro_rules! impl_from_tuple {
    ($($T:ident),+) => {
        impl<$($T,)+> From<($($T,)+)> for DispatchValue
        where
            $($T: Into<DispatchValue>,)+
        {
            #[allow(non_snake_case)]
            fn from(($($T,)+): ($($T,)+)) -> Self {
                DispatchValue::Tuple(Arc::from([$(Into::<DispatchValue>::into($T),)+]))
            }
        }
    };
}

impl_from_tuple!(T1);
impl_from_tuple!(T1, T2);
impl_from_tuple!(T1, T2, T3);
impl_from_tuple!(T1, T2, T3, T4);
impl_from_tuple!(T1, T2, T3, T4, T5);
impl_from_tuple!(T1, T2, T3, T4, T5, T6);
impl_from_tuple!(T1, T2, T3, T4, T5, T6, T7);
impl_from_tuple!(T1, T2, T3, T4, T5, T6, T7, T8);
