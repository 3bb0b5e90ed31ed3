//! Registration, invocation and removal through the facade.

use multidispatch::{
    Call, DEFAULT, DispatchError, DispatchTable, DispatchValue, ResolutionKind, Type, method,
};
use std::{
    panic::{self, AssertUnwindSafe},
    sync::{Arc, Weak},
};

mod common;
use common::{Pair, identity, pair_types};

fn combine() -> DispatchTable<Pair, String> {
    DispatchTable::builder("combine", pair_types)
        .method((Type::int(), Type::int()), |call| match call.into_args() {
            (DispatchValue::Int(x), DispatchValue::Int(y)) => (x * y).to_string(),
            other => unreachable!("int method called with {other:?}"),
        })
        .method((Type::str(), Type::str()), |call| {
            let (x, y) = call.into_args();
            match (x, y) {
                (DispatchValue::Str(x), DispatchValue::Str(y)) => format!("{x}&{y}"),
                other => unreachable!("str method called with {other:?}"),
            }
        })
        .default_method(|_| "???".to_string())
        .build()
}

#[test]
fn test_combine_by_argument_types() {
    let combine = combine();

    assert_eq!(combine.call((21.into(), 2.into())).unwrap(), "42");
    assert_eq!(combine.call(("foo".into(), "bar".into())).unwrap(), "foo&bar");
    assert_eq!(combine.call((21.into(), "bar".into())).unwrap(), "???");
}

#[test]
fn test_dispatch_on_computed_value() {
    let speaksum: DispatchTable<Vec<i64>, &'static str> =
        DispatchTable::new("speaksum", |call: &Call<'_, (), Vec<i64>>| {
            DispatchValue::from(call.args().iter().sum::<i64>())
        });
    speaksum.register(2, |_| "Two");
    speaksum.register(5, |_| "Five");
    speaksum.register_default(|_| "Another");

    assert_eq!(speaksum.call(vec![1, 1, 0]).unwrap(), "Two");
    assert_eq!(speaksum.call(vec![3, 2]).unwrap(), "Five");
    assert_eq!(speaksum.call(vec![9, 8, 2]).unwrap(), "Another");
    assert_eq!(speaksum.call(vec![3, 5, 6]).unwrap(), "Another");
}

#[test]
fn test_insert_prebuilt_methods() {
    let foomethod: DispatchTable<DispatchValue, &'static str> =
        DispatchTable::new("foomethod", identity);

    foomethod.insert_method(DispatchValue::from(42), method(|_| "The Answer"));
    foomethod.insert_method(DispatchValue::from(1024), method(|_| "2^10"));
    foomethod.insert_method(DEFAULT, method(|_| "Nothing"));

    assert_eq!(foomethod.call(42.into()).unwrap(), "The Answer");
    assert_eq!(foomethod.call(1024.into()).unwrap(), "2^10");
    assert_eq!(foomethod.call(DispatchValue::symbol("Default")).unwrap(), "Nothing");
}

#[test]
fn test_one_method_under_several_keys() {
    let parity: DispatchTable<DispatchValue, &'static str> = DispatchTable::new("parity", identity);
    let even = method(|_: Call<'_, (), DispatchValue>| "even");
    for n in [0, 2, 4] {
        parity.insert_method(DispatchValue::from(n), even.clone());
    }

    assert_eq!(parity.len(), 3);
    assert_eq!(parity.call(4.into()).unwrap(), "even");
    assert!(parity.call(3.into()).is_err());
}

#[test]
fn test_remove_methods() {
    let barmethod: DispatchTable<DispatchValue, i64> = DispatchTable::new("barmethod", identity);
    barmethod.register(1, |_| 123);
    assert_eq!(barmethod.call(1.into()).unwrap(), 123);

    assert!(barmethod.unregister(1).is_some());
    assert!(barmethod.call(1.into()).is_err());

    barmethod.register_default(|_| 42);
    assert_eq!(barmethod.call("whatever".into()).unwrap(), 42);
    assert_eq!(barmethod.call("something".into()).unwrap(), 42);

    assert!(barmethod.remove_method(&DEFAULT).is_some());
    assert!(barmethod.call("whatever".into()).is_err());
    assert!(barmethod.call(1.into()).is_err());
}

#[test]
fn test_removed_key_falls_to_default() {
    let table: DispatchTable<DispatchValue, &'static str> = DispatchTable::new("t", identity);
    table.register(1, |_| "one");
    table.register_default(|_| "default");

    table.unregister(1);
    assert_eq!(table.call(1.into()).unwrap(), "default");
    assert_eq!(
        table.resolve(&1.into()).map(|r| r.kind().clone()),
        Some(ResolutionKind::Default)
    );
}

#[test]
fn test_name_conflict() {
    let foobar1: DispatchTable<DispatchValue, &'static str> =
        DispatchTable::new("foobar", identity);
    let foobar2: DispatchTable<DispatchValue, &'static str> =
        DispatchTable::new("foobar", identity);
    foobar1.register(1, |_| "foobar1");
    foobar2.register(2, |_| "foobar2");

    assert_eq!(foobar1.call(1.into()).unwrap(), "foobar1");
    assert_eq!(foobar2.call(2.into()).unwrap(), "foobar2");
    assert!(foobar1.call(2.into()).is_err());
}

#[test]
fn test_no_method_error() {
    let table: DispatchTable<DispatchValue, ()> = DispatchTable::new("barmethod", identity);

    let err = table.call("whatever".into()).unwrap_err();
    assert_eq!(
        err,
        DispatchError::NoMethod {
            table: "barmethod".to_string(),
            value: "whatever".into(),
        }
    );
    assert_eq!(
        err.to_string(),
        "no method in `barmethod` for dispatch value \"whatever\""
    );
}

#[test]
fn test_method_panics_pass_through() {
    let table: DispatchTable<DispatchValue, ()> = DispatchTable::new("t", identity);
    table.register(0, |_| panic!("division by zero"));

    let result = panic::catch_unwind(AssertUnwindSafe(|| table.call(0.into())));
    assert!(result.is_err());
}

#[test]
fn test_method_results_pass_through() {
    let table: DispatchTable<DispatchValue, Result<i64, String>> =
        DispatchTable::new("t", identity);
    table.register(0, |_| Err("zero".to_string()));
    table.register_default(|_| Ok(1));

    assert_eq!(table.call(0.into()).unwrap(), Err("zero".to_string()));
    assert_eq!(table.call(5.into()).unwrap(), Ok(1));
}

#[test]
fn test_method_can_extend_its_own_table() {
    let table: Arc<DispatchTable<DispatchValue, &'static str>> =
        Arc::new(DispatchTable::new("learning", identity));
    let weak: Weak<DispatchTable<DispatchValue, &'static str>> = Arc::downgrade(&table);

    table.register_default(move |call| {
        if let Some(table) = weak.upgrade() {
            table.register(call.into_args(), |_| "known");
        }
        "learned"
    });

    assert_eq!(table.call(7.into()).unwrap(), "learned");
    assert_eq!(table.call(7.into()).unwrap(), "known");
    assert!(table.contains(&7.into()));
}
