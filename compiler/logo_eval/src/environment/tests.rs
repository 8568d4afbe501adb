use super::*;

#[test]
fn test_bind_and_lookup() {
    let scope = Scope::new();
    scope.bind("x", Value::Number(42.0));
    assert_eq!(scope.lookup("x"), Some(Value::Number(42.0)));
    assert_eq!(scope.lookup("y"), None);
}

#[test]
fn test_child_sees_parent() {
    let global = Scope::new();
    global.bind("x", Value::Number(1.0));
    let child = global.child();
    assert_eq!(child.lookup("x"), Some(Value::Number(1.0)));
    assert!(child.parent().is_some_and(|p| p.ptr_eq(&global)));
}

#[test]
fn test_shadowing_is_local_to_frame() {
    let global = Scope::new();
    global.bind("x", Value::Number(1.0));
    let child = global.child();
    child.bind("x", Value::Number(2.0));

    assert_eq!(child.lookup("x"), Some(Value::Number(2.0)));
    assert_eq!(global.lookup("x"), Some(Value::Number(1.0)));
}

#[test]
fn test_set_writes_through_to_owning_frame() {
    let global = Scope::new();
    global.bind("x", Value::Number(1.0));
    let child = global.child();

    assert!(child.set("x", Value::Number(5.0)));
    assert_eq!(global.lookup("x"), Some(Value::Number(5.0)));
    assert!(child.local_binding("x").is_none());
}

#[test]
fn test_set_without_binding_fails() {
    let scope = Scope::new();
    assert!(!scope.set("missing", Value::Number(1.0)));
    assert_eq!(scope.lookup("missing"), None);
}

#[test]
fn test_declared_binding_without_value() {
    let scope = Scope::new();
    scope.declare("x", None);
    assert!(scope.resolve("x").is_some());
    assert_eq!(scope.lookup("x"), None);
}

#[test]
fn test_alias_shares_the_cell() {
    let global = Scope::new();
    let cell = global.declare("x", Some(Value::Number(1.0)));
    let child = global.child();
    child.bind("x", Value::Number(2.0));

    // Re-expose the global cell, hiding the local shadow.
    child.alias("x", cell.clone());
    child.set("x", Value::Number(3.0));

    assert_eq!(global.lookup("x"), Some(Value::Number(3.0)));
    assert!(child.resolve("x").is_some_and(|b| b.ptr_eq(&cell)));
}

#[test]
fn test_redeclare_replaces_binding() {
    let scope = Scope::new();
    let first = scope.declare("f", Some(Value::Number(1.0)));
    scope.bind("f", Value::Number(2.0));

    assert_eq!(first.get(), Some(Value::Number(1.0)));
    assert_eq!(scope.lookup("f"), Some(Value::Number(2.0)));
}

#[test]
fn test_names_ignore_case() {
    let scope = Scope::new();
    scope.bind("Size", Value::Number(10.0));
    assert_eq!(scope.lookup("size"), Some(Value::Number(10.0)));
    assert_eq!(scope.lookup("SIZE"), Some(Value::Number(10.0)));
    assert!(scope.local_binding("sIzE").is_some());
}
