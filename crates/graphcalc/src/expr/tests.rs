use super::*;
use crate::cfg::{MAX_INPUT_CHARS, MAX_NESTING};
use proptest::prelude::*;

fn eval_at(text: &str, x: f64) -> f64 {
    parse(text).unwrap().eval(x)
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-12
}

#[test]
fn precedence_and_associativity() {
    assert!(close(eval_at("1 + 2 * 3", 0.0), 7.0));
    assert!(close(eval_at("(1 + 2) * 3", 0.0), 9.0));
    assert!(close(eval_at("10 - 4 - 3", 0.0), 3.0));
    assert!(close(eval_at("24 / 4 / 3", 0.0), 2.0));
    // right-assoc: 2^(3^2) = 512, not (2^3)^2 = 64
    assert!(close(eval_at("2^3^2", 0.0), 512.0));
    // unary binds tighter than '^'
    assert!(close(eval_at("-x^2", 3.0), 9.0));
    assert!(close(eval_at("-(x^2)", 3.0), -9.0));
    assert!(close(eval_at("2^-1", 0.0), 0.5));
    assert!(close(eval_at("--x", 4.0), 4.0));
}

#[test]
fn tree_shape_is_left_deep_for_subtraction() {
    let e = parse("x - 1 - 2").unwrap();
    match e.root() {
        Node::Binary {
            op: BinOp::Sub,
            lhs,
            rhs,
        } => {
            assert_eq!(**rhs, Node::Number(2.0));
            assert!(matches!(**lhs, Node::Binary { op: BinOp::Sub, .. }));
        }
        other => panic!("unexpected root {other:?}"),
    }
}

#[test]
fn functions_evaluate() {
    let x = 0.7;
    assert!(close(eval_at("sin(x)", x), x.sin()));
    assert!(close(eval_at("cos(x)", x), x.cos()));
    assert!(close(eval_at("tan(x)", x), x.tan()));
    assert!(close(eval_at("sqrt(x)", x), x.sqrt()));
    assert!(close(eval_at("abs(-x)", x), x));
    assert!(close(eval_at("log(x)", x), x.ln()));
    assert!(close(eval_at("log(8, 2)", x), 3.0));
    assert!(close(eval_at("log(100, 10)", x), 2.0));
    assert!(close(eval_at("pow(x, 2)", x), x * x));
    assert!(close(eval_at("pow(2, 10)", x), 1024.0));
}

#[test]
fn whitespace_is_ignored() {
    assert_eq!(parse("  sin ( x )*2 ").unwrap(), parse("sin(x)*2").unwrap());
}

#[test]
fn ieee_special_values_propagate() {
    assert_eq!(evaluate(&parse("1/x").unwrap(), 0.0), Ok(f64::INFINITY));
    assert_eq!(eval_at("-1/x", 0.0), f64::NEG_INFINITY);
    assert!(eval_at("sqrt(x)", -1.0).is_nan());
    assert!(eval_at("log(x)", -1.0).is_nan());
    assert_eq!(eval_at("log(x)", 0.0), f64::NEG_INFINITY);
    assert_eq!(eval_at("0^x", -1.0), f64::INFINITY);
    assert!(eval_at("x/x", 0.0).is_nan());
    // tan near π/2 is large but finite in doubles
    assert!(eval_at("tan(x)", std::f64::consts::FRAC_PI_2).abs() > 1e15);
}

#[test]
fn required_rejections() {
    assert_eq!(parse(""), Err(ParseError::Empty));
    assert_eq!(parse("   \t "), Err(ParseError::Empty));
    assert_eq!(
        parse("2x"),
        Err(ParseError::ImplicitMultiplication { offset: 1 })
    );
    assert!(matches!(
        parse("sin("),
        Err(ParseError::UnexpectedEnd { offset: 4, .. })
    ));
    // host-language call syntax is not part of the grammar
    assert!(parse("Math.sin(x)").is_err());
}

#[test]
fn implicit_multiplication_forms() {
    let cases = [
        ("2(x)", 1),
        ("x(1)", 1),
        ("(x)(x)", 3),
        ("2 sin(x)", 2),
        ("(2 x)", 3),
    ];
    for (text, offset) in cases {
        assert_eq!(
            parse(text),
            Err(ParseError::ImplicitMultiplication { offset }),
            "{text}"
        );
    }
}

#[test]
fn error_offsets_and_kinds() {
    assert_eq!(parse("(x + 1"), Err(ParseError::UnclosedParen { offset: 0 }));
    assert!(matches!(
        parse("x + 1)"),
        Err(ParseError::UnexpectedToken { offset: 5, .. })
    ));
    assert_eq!(
        parse("y + 1"),
        Err(ParseError::UnknownIdentifier {
            name: "y".into(),
            offset: 0
        })
    );
    assert!(matches!(
        parse("x + cosh(x)"),
        Err(ParseError::UnknownIdentifier { offset: 4, .. })
    ));
    assert!(matches!(
        parse("1 + sin(x, 2)"),
        Err(ParseError::WrongArity {
            func: "sin",
            found: 2,
            offset: 4,
            ..
        })
    ));
    assert!(matches!(
        parse("pow(x)"),
        Err(ParseError::WrongArity { func: "pow", found: 1, .. })
    ));
    assert!(matches!(
        parse("log(x, 2, 3)"),
        Err(ParseError::WrongArity { func: "log", found: 3, .. })
    ));
    assert!(matches!(
        parse("sin x"),
        Err(ParseError::UnexpectedToken { offset: 4, .. })
    ));
    assert!(matches!(parse("1 +"), Err(ParseError::UnexpectedEnd { offset: 3, .. })));
    assert!(matches!(parse("* 2"), Err(ParseError::UnexpectedToken { offset: 0, .. })));
    assert!(matches!(parse("+x"), Err(ParseError::UnexpectedToken { .. })));
    assert!(matches!(parse("sin()"), Err(ParseError::UnexpectedToken { offset: 4, .. })));
    assert_eq!(
        parse("x $ 2"),
        Err(ParseError::UnexpectedChar { ch: '$', offset: 2 })
    );
}

#[test]
fn offsets_are_characters_not_bytes() {
    // 'π' is two bytes in UTF-8 but one character
    assert_eq!(
        parse("π"),
        Err(ParseError::UnexpectedChar { ch: 'π', offset: 0 })
    );
    assert_eq!(
        parse("ü + √x"),
        Err(ParseError::UnexpectedChar { ch: 'ü', offset: 0 })
    );
    let err = parse("1 + 2 @").unwrap_err();
    assert_eq!(err.offset(), Some(6));
    assert_eq!(ParseError::Empty.offset(), None);
}

#[test]
fn identifiers_are_case_sensitive() {
    assert!(matches!(
        parse("X"),
        Err(ParseError::UnknownIdentifier { .. })
    ));
    assert!(matches!(
        parse("SIN(x)"),
        Err(ParseError::UnknownIdentifier { .. })
    ));
}

#[test]
fn resource_guards() {
    let long = "1+".repeat(MAX_INPUT_CHARS / 2) + "1";
    assert!(matches!(parse(&long), Err(ParseError::TooLong { .. })));

    let deep = "(".repeat(MAX_NESTING + 1) + "x" + &")".repeat(MAX_NESTING + 1);
    assert!(matches!(parse(&deep), Err(ParseError::TooDeep { .. })));

    let negs = "-".repeat(MAX_NESTING + 1) + "x";
    assert!(matches!(parse(&negs), Err(ParseError::TooDeep { .. })));

    let ok = "(".repeat(MAX_NESTING - 1) + "x" + &")".repeat(MAX_NESTING - 1);
    assert!(parse(&ok).is_ok());

    // long left-deep chains are built iteratively and stay within limits
    let chain = "x+".repeat(1000) + "x";
    assert!(close(eval_at(&chain, 1.0), 1001.0));
}

#[test]
fn error_messages_are_human_readable() {
    let msg = parse("2x").unwrap_err().to_string();
    assert!(msg.contains("implicit multiplication"), "{msg}");
    assert!(msg.contains("offset 1"), "{msg}");
    let msg = parse("foo(x)").unwrap_err().to_string();
    assert!(msg.contains("unknown identifier 'foo'"), "{msg}");
}

#[test]
fn constant_detection_and_size() {
    assert!(parse("pow(2, 3) + 1").unwrap().is_constant());
    assert!(!parse("sin(2 * x)").unwrap().is_constant());
    assert_eq!(parse("sin(2 * x)").unwrap().root().size(), 4);
}

#[test]
fn display_is_canonical() {
    let e = parse("-x^2 + log(x, 2)*3").unwrap();
    assert_eq!(e.to_string(), "-x ^ 2 + log(x, 2) * 3");
    // only the parentheses precedence needs survive
    let e = parse("((x - (1 - x)) / (2 * x)) ^ (1 ^ 2) ^ -(x ^ 2)").unwrap();
    assert_eq!(e.to_string(), "((x - (1 - x)) / (2 * x)) ^ (1 ^ 2) ^ -(x ^ 2)");
    assert_eq!(parse("(x - 1) - (x - 1)").unwrap().to_string(), "x - 1 - (x - 1)");
    assert_eq!(parse("(2^3)^2").unwrap().to_string(), "(2 ^ 3) ^ 2");
}

#[test]
fn display_of_long_chains_reparses() {
    let chain = parse(&("x+".repeat(200) + "x")).unwrap();
    let text = chain.to_string();
    assert!(!text.contains('('));
    assert_eq!(parse(&text).unwrap(), chain);

    let product = parse(&("x*".repeat(300) + "x")).unwrap();
    assert_eq!(parse(&product.to_string()).unwrap(), product);
}

#[test]
fn display_keeps_extreme_literals_short() {
    let src = "1e300+".repeat(20) + "x";
    let e = parse(&src).unwrap();
    let text = e.to_string();
    assert!(text.len() <= 2 * src.len(), "{text}");
    assert_eq!(parse(&text).unwrap(), e);

    for lit in ["1e-7", "2.5e20", "0.00001", "123456.75"] {
        let e = parse(lit).unwrap();
        assert_eq!(parse(&e.to_string()).unwrap(), e, "{lit}");
    }
    assert_eq!(parse("1e-7").unwrap().to_string(), "1e-7");
    assert_eq!(parse("0.5").unwrap().to_string(), "0.5");
}

fn formula() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        Just("x".to_string()),
        (0u32..100).prop_map(|n| n.to_string()),
        (0u32..1000).prop_map(|n| format!("{}.{}", n / 10, n % 10)),
    ];
    leaf.prop_recursive(4, 32, 2, |inner| {
        let op = prop::sample::select(vec!['+', '-', '*', '/', '^']);
        let func = prop::sample::select(vec!["sin", "cos", "tan", "sqrt", "abs", "log"]);
        prop_oneof![
            (inner.clone(), inner.clone(), op.clone())
                .prop_map(|(a, b, op)| format!("({a}) {op} ({b})")),
            // bare operands: the tree shape then comes from precedence alone
            (inner.clone(), inner.clone(), op).prop_map(|(a, b, op)| format!("{a} {op} {b}")),
            inner.clone().prop_map(|a| format!("-({a})")),
            (inner.clone(), func).prop_map(|(a, f)| format!("{f}({a})")),
            (inner.clone(), inner).prop_map(|(a, b)| format!("pow({a}, {b})")),
        ]
    })
}

proptest! {
    #[test]
    fn evaluation_is_pure(text in formula(), x in -1e3f64..1e3) {
        let e = parse(&text).unwrap();
        let a = e.eval(x);
        let b = e.eval(x);
        prop_assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn display_reparses_to_same_tree(text in formula()) {
        let e = parse(&text).unwrap();
        let again = parse(&e.to_string()).unwrap();
        prop_assert_eq!(e, again);
    }

    #[test]
    fn parser_never_panics_on_noise(text in "[x0-9+*/^().,a-z -]{0,40}") {
        let _ = parse(&text);
    }
}
