//! Extending the match relation with user rules.

use multidispatch::{Call, DispatchTable, DispatchValue, MatchRelation, Type};

mod common;
use common::identity;

/// A relation where a string key accepts every path below it.
fn path_relation() -> MatchRelation {
    let relation = MatchRelation::new();
    relation.register_rule((Type::str(), Type::str()), |relation, candidate, query| {
        match (candidate, query) {
            (DispatchValue::Str(prefix), DispatchValue::Str(path)) => {
                path.strip_prefix(&**prefix).is_some_and(|rest| {
                    rest.is_empty() || rest.starts_with('/') || prefix.ends_with('/')
                })
            }
            _ => relation.builtin(candidate, query),
        }
    });
    relation
}

fn router(relation: &MatchRelation) -> DispatchTable<DispatchValue, &'static str> {
    DispatchTable::builder("router", identity)
        .relation(relation.clone())
        .method("/api/users", |_| "users")
        .method("/api", |_| "api")
        .method("/", |_| "root")
        .build()
}

#[test]
fn test_rule_selects_keys() {
    let router = router(&path_relation());

    assert_eq!(router.call("/api/users".into()).unwrap(), "users");
    assert_eq!(router.call("/api/users/7".into()).unwrap(), "users");
    assert_eq!(router.call("/api/items".into()).unwrap(), "api");
    assert_eq!(router.call("/static/app.js".into()).unwrap(), "root");
    assert_eq!(router.call("/apiary".into()).unwrap(), "root");
    assert!(router.call("relative".into()).is_err());
}

#[test]
fn test_rule_applies_inside_tuples() {
    let relation = path_relation();
    let routes: DispatchTable<(String, String), &'static str> = DispatchTable::builder(
        "routes",
        |call: &Call<'_, (), (String, String)>| {
            let (verb, path) = call.args();
            DispatchValue::from((verb.as_str(), path.as_str()))
        },
    )
    .relation(relation)
    .method(("GET", "/api"), |_| "read")
    .method(("POST", "/api"), |_| "write")
    .build();

    let request = |verb: &str, path: &str| (verb.to_string(), path.to_string());
    assert_eq!(routes.call(request("GET", "/api/users")).unwrap(), "read");
    assert_eq!(routes.call(request("POST", "/api/items/3")).unwrap(), "write");
    assert!(routes.call(request("DELETE", "/api/users")).is_err());
}

#[test]
fn test_rules_reach_existing_tables() {
    let relation = MatchRelation::new();
    let router = router(&relation);
    assert!(router.call("/api/users/7".into()).is_err());

    relation.register_rule((Type::str(), Type::str()), |_, candidate, query| {
        matches!(
            (candidate, query),
            (DispatchValue::Str(prefix), DispatchValue::Str(path)) if path.starts_with(&**prefix)
        )
    });
    assert_eq!(router.call("/api/users/7".into()).unwrap(), "users");

    assert!(relation.unregister_rule((Type::str(), Type::str())));
    assert!(router.call("/api/users/7".into()).is_err());
}

#[test]
fn test_private_relation_leaves_shared_alone() {
    let _custom = router(&path_relation());
    let shared: DispatchTable<DispatchValue, &'static str> = DispatchTable::new("shared", identity);
    shared.register("/api", |_| "api");

    assert!(shared.call("/api/users".into()).is_err());
    assert!(!MatchRelation::shared().matches(&"/api".into(), &"/api/users".into()));
}

#[test]
fn test_rule_for_object_shape_sees_every_pair() {
    let relation = MatchRelation::new();
    relation.register_rule((Type::object(), Type::object()), |relation, candidate, query| {
        candidate == &DispatchValue::symbol("any") || relation.builtin(candidate, query)
    });
    let table: DispatchTable<DispatchValue, &'static str> = DispatchTable::builder("t", identity)
        .relation(relation.clone())
        .method(DispatchValue::symbol("any"), |_| "anything")
        .build();

    assert_eq!(table.call(1.into()).unwrap(), "anything");
    assert_eq!(table.call((1, "a").into()).unwrap(), "anything");
    assert!(relation.matches(&Type::number().into(), &Type::int().into()));
}

#[test]
fn test_independent_rules_for_one_shape_both_hold() {
    let relation = MatchRelation::new();
    let symbols = (Type::symbol(), Type::symbol());
    fn sym(name: &str) -> DispatchValue {
        DispatchValue::symbol(name)
    }
    relation.register_rule(symbols.clone(), |_, candidate, query| {
        candidate == &sym("animal") && query == &sym("cat")
    });

    let table: DispatchTable<DispatchValue, &'static str> =
        DispatchTable::builder("kind", identity)
            .relation(relation.clone())
            .method(sym("animal"), |_| "animal")
            .method(sym("color"), |_| "color")
            .build();
    assert_eq!(table.call(sym("cat")).unwrap(), "animal");
    assert!(table.call(sym("red")).is_err());

    relation.register_rule(symbols, |_, candidate, query| {
        candidate == &sym("color") && query == &sym("red")
    });
    assert_eq!(table.call(sym("cat")).unwrap(), "animal");
    assert_eq!(table.call(sym("red")).unwrap(), "color");
    assert!(table.call(sym("dog")).is_err());
}

#[test]
fn test_rule_for_exact_value_pair() {
    let relation = MatchRelation::new();
    relation.register_rule(("/", "/index.html"), |_, _, _| true);
    let table: DispatchTable<DispatchValue, &'static str> =
        DispatchTable::builder("pages", identity)
            .relation(relation)
            .method("/", |_| "home")
            .build();

    assert_eq!(table.call("/index.html".into()).unwrap(), "home");
    assert!(table.call("/about.html".into()).is_err());
}
