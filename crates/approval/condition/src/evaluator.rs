//! Evaluator: walks a parsed condition against a context
//!
//! Evaluation is a pure tree walk. Nothing in the condition text is
//! ever executed; the only thing a condition can do is read context
//! values and compare them.
//!
//! Rules:
//! - numbers compare with IEEE-754 semantics
//! - strings and booleans support `==` / `!=` only; ordering them is an error
//! - operands of different types compare `false` for every operator
//! - a variable missing from the context is an error
//! - `&&` / `||` short-circuit, so an unresolved variable on the
//!   untaken side does not fail the evaluation

use crate::ast::{CompareOp, Expr};
use crate::errors::{ConditionError, ConditionResult};
use crate::{Context, Value};
use std::borrow::Cow;

/// Evaluate an expression to a boolean
pub fn evaluate(expr: &Expr, context: &Context) -> ConditionResult<bool> {
    match &*eval_value(expr, context)? {
        Value::Bool(b) => Ok(*b),
        other => Err(ConditionError::NotBoolean(other.kind().to_string())),
    }
}

fn eval_value<'a>(expr: &'a Expr, context: &'a Context) -> ConditionResult<Cow<'a, Value>> {
    match expr {
        Expr::Literal(value) => Ok(Cow::Borrowed(value)),
        Expr::VarRef(name) => context
            .get(name)
            .map(Cow::Borrowed)
            .ok_or_else(|| ConditionError::UnknownVariable(name.clone())),
        Expr::Compare { op, left, right } => {
            let left = eval_value(left, context)?;
            let right = eval_value(right, context)?;
            compare(*op, &left, &right).map(|b| Cow::Owned(Value::Bool(b)))
        }
        Expr::And(terms) => all(terms, context).map(|b| Cow::Owned(Value::Bool(b))),
        Expr::Or(terms) => any(terms, context).map(|b| Cow::Owned(Value::Bool(b))),
    }
}

fn all(terms: &[Expr], context: &Context) -> ConditionResult<bool> {
    for term in terms {
        if !evaluate(term, context)? {
            return Ok(false);
        }
    }
    Ok(true)
}

fn any(terms: &[Expr], context: &Context) -> ConditionResult<bool> {
    for term in terms {
        if evaluate(term, context)? {
            return Ok(true);
        }
    }
    Ok(false)
}

fn compare(op: CompareOp, left: &Value, right: &Value) -> ConditionResult<bool> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(match op {
            CompareOp::Greater => a > b,
            CompareOp::Less => a < b,
            CompareOp::GreaterEq => a >= b,
            CompareOp::LessEq => a <= b,
            CompareOp::Equal => a == b,
            CompareOp::NotEqual => a != b,
        }),
        (Value::String(a), Value::String(b)) => equality(op, a == b, "string"),
        (Value::Bool(a), Value::Bool(b)) => equality(op, a == b, "boolean"),
        _ => Ok(false),
    }
}

fn equality(op: CompareOp, equal: bool, kind: &str) -> ConditionResult<bool> {
    if op.is_ordering() {
        return Err(ConditionError::UnsupportedComparison {
            op: op.to_string(),
            kind: kind.to_string(),
        });
    }
    Ok((op == CompareOp::Equal) == equal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;
    use crate::value::context;

    fn eval(input: &str, ctx: &Context) -> ConditionResult<bool> {
        evaluate(&Parser::parse(input).unwrap(), ctx)
    }

    #[test]
    fn test_numeric_thresholds() {
        let ctx = context([("amount", 50000)]);

        assert!(eval("amount > 10000", &ctx).unwrap());
        assert!(!eval("amount > 100000", &ctx).unwrap());
        assert!(eval("amount >= 50000", &ctx).unwrap());
        assert!(eval("amount <= 50000", &ctx).unwrap());
        assert!(!eval("amount < 50000", &ctx).unwrap());
        assert!(eval("amount == 50000", &ctx).unwrap());
        assert!(eval("amount !== 1", &ctx).unwrap());
    }

    #[test]
    fn test_string_equality() {
        let critical = context([("urgency", "critical")]);
        let low = context([("urgency", "low")]);

        assert!(eval(r#"urgency === "critical""#, &critical).unwrap());
        assert!(!eval(r#"urgency === "critical""#, &low).unwrap());
        assert!(eval(r#"urgency != 'critical'"#, &low).unwrap());
    }

    #[test]
    fn test_string_equality_is_case_sensitive() {
        let ctx = context([("urgency", "Critical")]);
        assert!(!eval("urgency == 'critical'", &ctx).unwrap());
    }

    #[test]
    fn test_string_ordering_fails() {
        let ctx = context([("tier", "gold")]);
        let err = eval("tier > 'silver'", &ctx).unwrap_err();
        assert!(matches!(err, ConditionError::UnsupportedComparison { .. }));
    }

    #[test]
    fn test_type_mismatch_is_false() {
        let ctx = context([("amount", "5000")]);

        assert!(!eval("amount > 1000", &ctx).unwrap());
        assert!(!eval("amount == 5000", &ctx).unwrap());
        assert!(!eval("amount != 5000", &ctx).unwrap());
    }

    #[test]
    fn test_missing_variable_is_error() {
        let ctx = Context::new();
        let err = eval("urgency === 'critical'", &ctx).unwrap_err();
        assert_eq!(err, ConditionError::UnknownVariable("urgency".into()));
    }

    #[test]
    fn test_short_circuit() {
        let ctx = context([("amount", 10)]);

        assert!(eval("amount > 1 || missing > 1", &ctx).unwrap());
        assert!(!eval("amount > 100 && missing > 1", &ctx).unwrap());
        assert!(eval("amount > 100 || missing > 1", &ctx).is_err());
    }

    #[test]
    fn test_boolean_values() {
        let ctx = context([("vip", true)]);

        assert!(eval("vip", &ctx).unwrap());
        assert!(eval("vip == true", &ctx).unwrap());
        assert!(!eval("vip != true", &ctx).unwrap());
        assert!(eval("vip && true", &ctx).unwrap());
        assert!(eval("vip > false", &ctx).is_err());
    }

    #[test]
    fn test_non_boolean_result_is_error() {
        let ctx = context([("amount", 10)]);

        assert_eq!(
            eval("amount", &ctx).unwrap_err(),
            ConditionError::NotBoolean("number".into())
        );
        assert!(eval("amount && true", &ctx).is_err());
        assert!(eval("'yes'", &ctx).is_err());
    }

    #[test]
    fn test_nan_comparisons_are_false() {
        let mut ctx = Context::new();
        ctx.insert("ratio".into(), Value::Number(f64::NAN));

        assert!(!eval("ratio > 0", &ctx).unwrap());
        assert!(!eval("ratio <= 0", &ctx).unwrap());
        assert!(!eval("ratio == ratio", &ctx).unwrap());
    }

    #[test]
    fn test_grouped_logic() {
        let ctx = context([("amount", 500), ("days", 7)]);
        assert!(eval("(amount > 1000 || days > 5) && amount > 100", &ctx).unwrap());
        assert!(!eval("amount > 1000 || (days > 5 && amount > 1000)", &ctx).unwrap());
    }

    #[test]
    fn test_long_and_chain() {
        let ctx = context([("amount", 50)]);
        let chain = vec!["amount > 1"; 100_000].join(" && ");

        assert!(eval(&chain, &ctx).unwrap());
        assert!(!eval(&format!("{} && amount > 100", chain), &ctx).unwrap());
        assert_eq!(
            eval(&format!("{} && missing > 1", chain), &ctx).unwrap_err(),
            ConditionError::UnknownVariable("missing".into())
        );
    }

    #[test]
    fn test_long_or_chain() {
        let ctx = context([("amount", 50)]);
        let chain = vec!["amount > 100"; 100_000].join(" || ");

        assert!(!eval(&chain, &ctx).unwrap());
        assert!(eval(&format!("{} || amount > 1", chain), &ctx).unwrap());
    }
}
