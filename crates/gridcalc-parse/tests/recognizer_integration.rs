use gridcalc_parse::{
    CellValue, FormulaExpr, FormulaShape, Operator, ParseError, classify, classify_and_build,
    extract,
};
use proptest::prelude::*;

fn operator() -> impl Strategy<Value = Operator> {
    prop::sample::select(Operator::ALL.to_vec())
}

fn token() -> impl Strategy<Value = String> {
    prop_oneof![
        any::<i64>().prop_map(|i| i.to_string()),
        (0u32..10_000, 0u32..1000).prop_map(|(i, f)| format!("{i}.{f}")),
        "[a-z ,\"\\\\]{0,12}".prop_map(|s| gridcalc_common::text::quote_text(&s)),
        (0u32..50, 0u32..50, operator(), 0u32..50, 0u32..50)
            .prop_map(|(a, b, op, c, d)| format!("=R{a}C{b}{op}R{c}C{d}")),
        (0u32..1000, operator(), 0u32..50, 0u32..50)
            .prop_map(|(l, op, r, c)| format!("={l} {op} R{r}C{c}")),
        (0u32..1000, operator(), 0u32..1000).prop_map(|(a, op, b)| format!("={a}{op}{b}")),
        oversized_digits(),
        (oversized_digits(), operator(), 0u32..50, 0u32..50)
            .prop_map(|(l, op, r, c)| format!("={l}{op}R{r}C{c}")),
        (0u32..1000, operator(), oversized_digits())
            .prop_map(|(a, op, b)| format!("={a}{op}{b}")),
    ]
}

/// Digit runs past `f64::MAX`.
fn oversized_digits() -> impl Strategy<Value = String> {
    "[1-9][0-9]{309,400}"
}

fn has_oversized_run(token: &str) -> bool {
    token
        .split(|c: char| !c.is_ascii_digit())
        .any(|run| run.len() > 309)
}

proptest! {
    #[test]
    fn coord_coord_extraction_recovers_fields(
        i in any::<u32>(),
        j in any::<u32>(),
        k in any::<u32>(),
        l in any::<u32>(),
        op in operator(),
    ) {
        let raw = format!("=R{i}C{j}{op}R{k}C{l}");
        prop_assert_eq!(classify(&raw), Some(FormulaShape::CoordCoord));
        prop_assert_eq!(
            extract(&raw),
            Ok(FormulaExpr::CoordCoord { row1: i, col1: j, row2: k, col2: l, op })
        );
    }

    #[test]
    fn plain_digit_runs_are_lit_lit(a in 0u64..1_000_000, b in 0u64..1_000_000, op in operator()) {
        let raw = format!("={a}{op}{b}");
        prop_assert_eq!(classify(&raw), Some(FormulaShape::LitLit));
        prop_assert_eq!(
            extract(&raw),
            Ok(FormulaExpr::LitLit { a: a as f64, b: b as f64, op })
        );
    }

    #[test]
    fn storage_form_rebuilds_the_same_value(t in token()) {
        match classify_and_build(&t) {
            Ok(value) => {
                let stored = value.to_storage();
                prop_assert_eq!(classify_and_build(&stored), Ok(value));
            }
            Err(err) => prop_assert!(has_oversized_run(&t), "{t:?} rejected: {err}"),
        }
    }

    #[test]
    fn letters_never_form_a_formula(s in "=[a-zA-QS-Z]{1,8}") {
        prop_assert_eq!(classify(&s), None);
    }
}

#[test]
fn accepted_and_rejected_examples() {
    for raw in ["=R1C1+R2C2", "=3+4", "=3+R1C1", "=R1C1+3"] {
        assert!(classify(raw).is_some(), "{raw}");
    }
    for raw in ["not a formula", "", "=RC"] {
        assert_eq!(classify(raw), None, "{raw:?}");
    }
}

#[test]
fn builder_reports_rejection_with_the_token() {
    let err = classify_and_build("=R1C1+").unwrap_err();
    assert_eq!(
        err,
        ParseError::Rejected {
            token: "=R1C1+".into()
        }
    );
    assert_eq!(err.to_string(), "unrecognised cell data \"=R1C1+\"");
}

#[test]
fn formula_cells_keep_literal_order() {
    let left = classify_and_build("=2-R0C0").unwrap();
    let right = classify_and_build("=R0C0-2").unwrap();
    assert_ne!(left, right);
    assert_eq!(left.to_storage(), "=2.0 - R0C0");
    assert_eq!(right.to_storage(), "=R0C0 - 2.0");
    assert!(matches!(right, CellValue::Formula(_)));
}
