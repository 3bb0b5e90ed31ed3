#![allow(dead_code)]

use multidispatch::{Call, DispatchValue, Type, Typed};
use std::sync::LazyLock;

// ============================================================================
// Dispatch Functions
// ============================================================================

pub type Pair = (DispatchValue, DispatchValue);

/// Dispatch on the argument itself.
pub fn identity(call: &Call<'_, (), DispatchValue>) -> DispatchValue {
    call.args().clone()
}

/// Dispatch on the runtime type of the argument.
pub fn type_of(call: &Call<'_, (), DispatchValue>) -> DispatchValue {
    call.args().type_value()
}

/// Dispatch on the runtime types of both arguments.
pub fn pair_types(call: &Call<'_, (), Pair>) -> DispatchValue {
    let (x, y) = call.args();
    DispatchValue::tuple([x.type_of(), y.type_of()])
}

// ============================================================================
// Test Types
// ============================================================================

pub static SHAPE: LazyLock<Type> = LazyLock::new(|| Type::subtype("Shape", &Type::object()));
pub static CIRCLE: LazyLock<Type> = LazyLock::new(|| Type::subtype("Circle", &SHAPE));
pub static SQUARE: LazyLock<Type> = LazyLock::new(|| Type::subtype("Square", &SHAPE));

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Circle {
    pub radius: u32,
}

impl Typed for Circle {
    fn runtime_type(&self) -> Type {
        CIRCLE.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Square {
    pub side: u32,
}

impl Typed for Square {
    fn runtime_type(&self) -> Type {
        SQUARE.clone()
    }
}

pub fn circle(radius: u32) -> DispatchValue {
    DispatchValue::opaque(Circle { radius })
}

pub fn square(side: u32) -> DispatchValue {
    DispatchValue::opaque(Square { side })
}
