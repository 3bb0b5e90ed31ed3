//! Runtime types for type-like dispatch values.
//!
//! A [`Type`] is a nominal type with identity semantics: two types are equal
//! only if they were created by the same call. Each type has at most one
//! supertype, and every chain ends at [`Type::object`].
//!
//! ```rust
//! use multidispatch_core::Type;
//!
//! let shape = Type::subtype("Shape", &Type::object());
//! let circle = Type::subtype("Circle", &shape);
//!
//! assert!(circle.is_subtype_of(&shape));
//! assert!(circle.is_subtype_of(&Type::object()));
//! assert!(!shape.is_subtype_of(&circle));
//! ```

use std::{
    fmt,
    hash::{Hash, Hasher},
    sync::{Arc, LazyLock},
};

struct TypeInfo {
    name: String,
    supertype: Option<Type>,
}

/// A nominal runtime type.
///
/// Cloning is cheap; clones compare equal to the original.
#[derive(Clone)]
pub struct Type(Arc<TypeInfo>);

static OBJECT: LazyLock<Type> = LazyLock::new(|| {
    Type(Arc::new(TypeInfo {
        name: "object".to_string(),
        supertype: None,
    }))
});

macro_rules! builtin_types {
    ($(
        $(#[$doc:meta])*
        $fn_name:ident, $static_name:ident => $label:literal : $parent:ident;
    )+) => {
        $(
            static $static_name: LazyLock<Type> =
                LazyLock::new(|| Type::subtype($label, &$parent));
        )+

        impl Type {
            $(
                $(#[$doc])*
                pub fn $fn_name() -> Type {
                    $static_name.clone()
                }
            )+
        }
    };
}

builtin_types! {
    /// The type of [`DispatchValue::None`](crate::DispatchValue::None).
    none, NONE => "none": OBJECT;
    /// The type of boolean values.
    bool, BOOL => "bool": OBJECT;
    /// Abstract supertype of `int` and `float`.
    number, NUMBER => "number": OBJECT;
    /// The type of integer values.
    int, INT => "int": NUMBER;
    /// The type of floating point values.
    float, FLOAT => "float": NUMBER;
    /// The type of string values.
    str, STR => "str": OBJECT;
    /// The type of named sentinel values.
    symbol, SYMBOL => "symbol": OBJECT;
    /// The type of type-like values.
    type_, TYPE => "type": OBJECT;
    /// The type of tuple values.
    tuple, TUPLE => "tuple": OBJECT;
}

impl Type {
    /// The root of the type hierarchy.
    pub fn object() -> Type {
        OBJECT.clone()
    }

    /// Create a new type whose direct supertype is `supertype`.
    ///
    /// Every call creates a distinct type, even for an existing name.
    pub fn subtype(name: impl Into<String>, supertype: &Type) -> Type {
        Type(Arc::new(TypeInfo {
            name: name.into(),
            supertype: Some(supertype.clone()),
        }))
    }

    /// The name this type was created with.
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// The direct supertype, `None` only for `object`.
    pub fn supertype(&self) -> Option<&Type> {
        self.0.supertype.as_ref()
    }

    /// Iterate over this type and all of its supertypes, nearest first.
    pub fn ancestors(&self) -> impl Iterator<Item = &Type> {
        std::iter::successors(Some(self), |ty| ty.supertype())
    }

    /// Returns true if `self` is `other` or one of its subtypes.
    pub fn is_subtype_of(&self, other: &Type) -> bool {
        self.ancestors().any(|ty| ty == other)
    }
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Type {}

impl Hash for Type {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Arc::as_ptr(&self.0), state);
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Type({})", self.name())
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
