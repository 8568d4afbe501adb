use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn numbers(ns: &[f64]) -> List {
    ns.iter().copied().map(Value::Number).collect()
}

#[test]
fn empty_list_tail_is_empty() {
    let empty = List::empty();
    assert!(empty.is_empty());
    assert!(empty.tail().is_empty());
    assert!(empty.tail().tail().is_empty());
    assert_eq!(empty.head(), None);
    assert_eq!(empty.len(), 0);
}

#[test]
fn independently_built_lists_are_equal() {
    let a = numbers(&[1.0, 2.0, 3.0]);
    let b = List::cons(
        Value::Number(1.0),
        List::cons(Value::Number(2.0), List::cons(Value::Number(3.0), List::empty())),
    );
    assert_eq!(a, b);
    assert_eq!(b, a);
    assert!(!a.ptr_eq(&b));
}

#[test]
fn lists_of_different_length_differ() {
    assert_ne!(numbers(&[1.0, 2.0]), numbers(&[1.0, 2.0, 3.0]));
    assert_ne!(numbers(&[1.0, 2.0, 3.0]), numbers(&[1.0, 2.0]));
    assert_ne!(numbers(&[]), numbers(&[1.0]));
}

#[test]
fn lists_differing_in_one_element_differ() {
    assert_ne!(numbers(&[1.0, 2.0, 3.0]), numbers(&[1.0, 5.0, 3.0]));
}

#[test]
fn nested_lists_compare_structurally() {
    let a = List::from(vec![Value::text("a"), Value::List(numbers(&[1.0, 2.0]))]);
    let b = List::from(vec![Value::text("a"), Value::List(numbers(&[1.0, 2.0]))]);
    let c = List::from(vec![Value::text("a"), Value::List(numbers(&[1.0]))]);
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn cons_shares_the_tail() {
    let tail = numbers(&[2.0, 3.0]);
    let list = List::cons(Value::Number(1.0), tail.clone());
    assert!(list.tail().ptr_eq(&tail));
}

#[test]
fn builder_finish_onto_shares_the_tail() {
    let tail = numbers(&[3.0, 4.0]);
    let mut builder = ListBuilder::new();
    builder.push(Value::Number(1.0));
    builder.push(Value::Number(2.0));
    let list = builder.finish_onto(tail.clone());

    assert_eq!(list, numbers(&[1.0, 2.0, 3.0, 4.0]));
    assert!(list.tail().tail().ptr_eq(&tail));
}

#[test]
fn last_and_without_last() {
    let list = numbers(&[1.0, 2.0, 3.0]);
    assert_eq!(list.last(), Some(&Value::Number(3.0)));
    assert_eq!(list.without_last(), numbers(&[1.0, 2.0]));
    assert_eq!(List::empty().without_last(), List::empty());
    assert_eq!(list.with_last(Value::Number(4.0)), numbers(&[1.0, 2.0, 3.0, 4.0]));
}

#[test]
fn get_is_zero_based() {
    let list = numbers(&[10.0, 20.0]);
    assert_eq!(list.get(0), Some(&Value::Number(10.0)));
    assert_eq!(list.get(1), Some(&Value::Number(20.0)));
    assert_eq!(list.get(2), None);
}

#[test]
fn display_keeps_nested_brackets() {
    let list = List::from(vec![
        Value::Number(1.0),
        Value::List(List::from(vec![Value::text("a"), Value::text("b")])),
    ]);
    assert_eq!(list.to_string(), "[1 [a b]]");
}

#[test]
fn cursor_walks_and_peeks() {
    let mut cursor = ListCursor::new(numbers(&[1.0, 2.0]));
    assert_eq!(cursor.peek(), Some(&Value::Number(1.0)));
    assert_eq!(cursor.next(), Some(Value::Number(1.0)));
    assert!(!cursor.is_at_end());
    assert_eq!(cursor.next(), Some(Value::Number(2.0)));
    assert!(cursor.is_at_end());
    assert_eq!(cursor.next(), None);
}

#[test]
fn dropping_a_long_list_does_not_overflow() {
    let list: List = (0..200_000).map(f64::from).map(Value::Number).collect();
    assert_eq!(list.len(), 200_000);
    drop(list);
}

proptest! {
    #[test]
    fn equality_is_reflexive_and_symmetric(xs in prop::collection::vec(-1e6f64..1e6, 0..20),
                                           ys in prop::collection::vec(-1e6f64..1e6, 0..20)) {
        let a = numbers(&xs);
        let a2 = numbers(&xs);
        let b = numbers(&ys);
        prop_assert_eq!(&a, &a2);
        prop_assert_eq!(a == b, b == a);
        prop_assert_eq!(a == b, xs == ys);
    }
}
