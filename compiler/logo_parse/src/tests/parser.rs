use crate::parse;
use logo_ir::{List, Value};
use proptest::prelude::*;

fn items(source: &str) -> Vec<Value> {
    parse(source).unwrap().iter().cloned().collect()
}

fn w(text: &str) -> Value {
    Value::text(text)
}

fn n(value: f64) -> Value {
    Value::Number(value)
}

fn list(values: Vec<Value>) -> Value {
    Value::List(List::from(values))
}

mod literals {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn single_number() {
        assert_eq!(items("32"), vec![n(32.0)]);
    }

    #[test]
    fn number_forms() {
        assert_eq!(
            items("1.5 .5 1e3 2E-2"),
            vec![n(1.5), n(0.5), n(1000.0), n(0.02)]
        );
    }

    #[test]
    fn booleans_ignore_case() {
        assert_eq!(
            items("true false True FALSE tRuE"),
            vec![
                Value::Boolean(true),
                Value::Boolean(false),
                Value::Boolean(true),
                Value::Boolean(false),
                Value::Boolean(true),
            ]
        );
        // Only the whole word counts.
        assert_eq!(items("truth falsey"), vec![w("truth"), w("falsey")]);
    }

    #[test]
    fn empty_source_is_empty_program() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("  \n\t ").unwrap().is_empty());
    }
}

mod words {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn commands_and_inputs() {
        assert_eq!(
            items("forward 10 right 90"),
            vec![w("forward"), n(10.0), w("right"), n(90.0)]
        );
    }

    #[test]
    fn quoted_and_variable_words_keep_prefix() {
        assert_eq!(
            items("make \"size :size"),
            vec![w("make"), w("\"size"), w(":size")]
        );
    }

    #[test]
    fn quoted_word_runs_through_operator_characters() {
        assert_eq!(items("\"a+b"), vec![w("\"a+b")]);
    }

    #[test]
    fn quoted_word_stops_at_brackets() {
        assert_eq!(items("[\"a]"), vec![list(vec![w("\"a")])]);
    }

    #[test]
    fn backslash_escapes_next_character() {
        assert_eq!(items("\"a\\ b"), vec![w("\"a b")]);
        assert_eq!(items("\"x\\[y"), vec![w("\"x[y")]);
    }

    #[test]
    fn comments_run_to_end_of_line() {
        assert_eq!(
            items("print 1 ; ignored [ ( \nprint 2"),
            vec![w("print"), n(1.0), w("print"), n(2.0)]
        );
    }

    #[test]
    fn variable_stops_at_operator() {
        assert_eq!(items(":a*:b"), vec![w(":a"), w("*"), w(":b")]);
    }
}

mod nesting {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn bracketed_list() {
        assert_eq!(items("[1 2]"), vec![list(vec![n(1.0), n(2.0)])]);
    }

    #[test]
    fn nested_lists() {
        assert_eq!(
            items("[a [b [c]] []]"),
            vec![list(vec![
                w("a"),
                list(vec![w("b"), list(vec![w("c")])]),
                list(vec![]),
            ])]
        );
    }

    #[test]
    fn parens_stay_as_words() {
        assert_eq!(
            items("(sum 1 2 3)"),
            vec![w("("), w("sum"), n(1.0), n(2.0), n(3.0), w(")")]
        );
    }

    #[test]
    fn deeply_nested_lists_do_not_overflow() {
        let depth = 2_000;
        let source = format!("{}{}", "[".repeat(depth), "]".repeat(depth));
        let program = parse(&source).unwrap();
        assert_eq!(program.len(), 1);
    }
}

mod operators {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn operators_split_from_operands() {
        assert_eq!(
            items("3+4*2"),
            vec![n(3.0), w("+"), n(4.0), w("*"), n(2.0)]
        );
    }

    #[test]
    fn comparisons() {
        assert_eq!(
            items(":a<:b = true"),
            vec![w(":a"), w("<"), w(":b"), w("="), Value::Boolean(true)]
        );
    }

    #[test]
    fn leading_minus_is_a_literal() {
        assert_eq!(items("-3"), vec![n(-3.0)]);
        assert_eq!(items("-.5"), vec![n(-0.5)]);
    }

    #[test]
    fn spaced_minus_is_an_operator() {
        assert_eq!(items("- 3"), vec![w("-"), n(3.0)]);
        assert_eq!(items("5 - 3"), vec![n(5.0), w("-"), n(3.0)]);
    }

    #[test]
    fn glued_minus_after_operand_subtracts() {
        assert_eq!(items("5-3"), vec![n(5.0), w("-"), n(3.0)]);
        assert_eq!(items(":n-1"), vec![w(":n"), w("-"), n(1.0)]);
        assert_eq!(items("(2)-1"), vec![w("("), n(2.0), w(")"), w("-"), n(1.0)]);
    }

    #[test]
    fn minus_after_whitespace_starts_a_literal() {
        assert_eq!(items("5 -3"), vec![n(5.0), n(-3.0)]);
        assert_eq!(items("sum 1 -3"), vec![w("sum"), n(1.0), n(-3.0)]);
    }

    #[test]
    fn minus_after_operator_or_paren_starts_a_literal() {
        assert_eq!(items("2*-3"), vec![n(2.0), w("*"), n(-3.0)]);
        assert_eq!(items("(-3)"), vec![w("("), n(-3.0), w(")")]);
    }
}

mod definitions {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn to_end_becomes_a_call() {
        assert_eq!(
            items("to square :x\n  output :x * :x\nend\nprint square 3"),
            vec![
                w("("),
                w("to"),
                w("\"square"),
                w("\"x"),
                list(vec![w("output"), w(":x"), w("*"), w(":x")]),
                w(")"),
                w("print"),
                w("square"),
                n(3.0),
            ]
        );
    }

    #[test]
    fn keywords_are_case_insensitive() {
        assert_eq!(
            items("TO hi PRINT 1 END"),
            vec![
                w("("),
                w("to"),
                w("\"hi"),
                list(vec![w("PRINT"), n(1.0)]),
                w(")"),
            ]
        );
    }

    #[test]
    fn body_keeps_nested_lists() {
        assert_eq!(
            items("to loop :n repeat :n [print \"hi] end"),
            vec![
                w("("),
                w("to"),
                w("\"loop"),
                w("\"n"),
                list(vec![
                    w("repeat"),
                    w(":n"),
                    list(vec![w("print"), w("\"hi")]),
                ]),
                w(")"),
            ]
        );
    }

    #[test]
    fn to_inside_brackets_is_plain_data() {
        assert_eq!(
            items("[to foo end]"),
            vec![list(vec![w("to"), w("foo"), w("end")])]
        );
    }

    #[test]
    fn to_without_a_bare_name_is_a_word() {
        assert_eq!(items("to \"foo"), vec![w("to"), w("\"foo")]);
    }

    #[test]
    fn several_definitions() {
        let program = items("to a end to b :x end a");
        assert_eq!(program.len(), 12);
        assert_eq!(program[11], w("a"));
    }
}

fn plain_word() -> impl Strategy<Value = String> {
    "[a-z]{1,8}".prop_filter("reserved words", |word| {
        !["to", "true", "false"]
            .iter()
            .any(|reserved| word.eq_ignore_ascii_case(reserved))
    })
}

proptest! {
    #[test]
    fn integers_parse_to_numbers(value in -1_000_000i32..1_000_000) {
        let program = parse(&value.to_string()).unwrap();
        prop_assert_eq!(program.head().cloned(), Some(Value::Number(f64::from(value))));
    }

    #[test]
    fn plain_words_survive_unchanged(words in prop::collection::vec(plain_word(), 0..12)) {
        let program = items(&words.join(" "));
        let expected: Vec<Value> = words.iter().map(|word| Value::text(word)).collect();
        prop_assert_eq!(program, expected);
    }
}
