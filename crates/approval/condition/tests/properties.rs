use approval_condition::{context, evaluate, Condition, ConditionError, Context, Value};
use proptest::prelude::*;

fn identifier() -> impl Strategy<Value = String> {
    "[a-z_][a-zA-Z0-9_]{0,12}".prop_filter("keywords are not identifiers", |s| {
        s != "true" && s != "false"
    })
}

proptest! {
    #[test]
    fn property_arbitrary_text_never_panics(input in ".{0,64}") {
        let ctx = context([("amount", 5000)]);
        let _ = evaluate(&input, &ctx);
    }

    #[test]
    fn property_operator_soup_never_panics(
        input in r#"[a-z0-9 ()<>=!&|'"\-.]{0,48}"#
    ) {
        let _ = evaluate(&input, &Context::new());
    }

    #[test]
    fn property_threshold_matches_float_comparison(
        name in identifier(),
        value in -1.0e9f64..1.0e9,
        threshold in 0u32..1_000_000,
    ) {
        let ctx = context([(name.clone(), Value::Number(value))]);
        let t = f64::from(threshold);

        prop_assert_eq!(evaluate(&format!("{} > {}", name, threshold), &ctx).unwrap(), value > t);
        prop_assert_eq!(evaluate(&format!("{} <= {}", name, threshold), &ctx).unwrap(), value <= t);
        prop_assert_eq!(
            evaluate(&format!("{} >= -{}", name, threshold), &ctx).unwrap(),
            value >= -t
        );
    }

    #[test]
    fn property_missing_variable_never_evaluates_true(
        name in identifier(),
        threshold in 0u32..1_000_000,
    ) {
        let condition = Condition::parse(&format!("{} > {}", name, threshold)).unwrap();
        let result = condition.evaluate(&Context::new());
        prop_assert_eq!(result, Err(ConditionError::UnknownVariable(name)));
    }

    #[test]
    fn property_string_equality_is_exact(a in "[a-zA-Z]{1,8}", b in "[a-zA-Z]{1,8}") {
        let ctx = context([("urgency", a.as_str())]);
        let result = evaluate(&format!("urgency === \"{}\"", b), &ctx).unwrap();
        prop_assert_eq!(result, a == b);
    }
}
