//! Defensive coercion of loosely-typed JSON values.
//!
//! Upstream payloads carry figures either as plain numbers or wrapped in an
//! object under one of several keys. [`unwrap_numeric`] is the single place
//! that resolves those shapes, driven by an explicit priority list.

use serde_json::Value;

/// Keys that may wrap a return figure, in priority order.
pub const RETURN_KEYS: &[&str] = &["returnPercent", "rateOfReturn", "return", "percent"];

/// Keys that may wrap a monetary amount, in priority order.
///
/// Dotted keys address nested objects.
pub const AMOUNT_KEYS: &[&str] = &["amount", "display.amount"];

/// Returns the value as `f64` when it is a finite JSON number.
#[must_use]
pub fn finite_number(value: &Value) -> Option<f64> {
    value.as_f64().filter(|v| v.is_finite())
}

/// Coerces a JSON number or numeric string into a finite `f64`.
#[must_use]
pub fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(_) => finite_number(value),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

/// Follows a dotted path (`"a.b.c"`) through nested objects.
#[must_use]
pub fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(value, |current, segment| current.as_object()?.get(segment))
}

/// Unwraps a numeric figure that is either a plain number or an object
/// carrying the number under one of `keys` (first match wins).
///
/// # Example
///
/// ```
/// use goalfolio_analytics::value::{unwrap_numeric, RETURN_KEYS};
/// use serde_json::json;
///
/// assert_eq!(unwrap_numeric(&json!(0.05), RETURN_KEYS), Some(0.05));
/// assert_eq!(unwrap_numeric(&json!({"rateOfReturn": 0.1}), RETURN_KEYS), Some(0.1));
/// assert_eq!(unwrap_numeric(&json!("0.1"), RETURN_KEYS), None);
/// ```
#[must_use]
pub fn unwrap_numeric(value: &Value, keys: &[&str]) -> Option<f64> {
    if let Some(n) = finite_number(value) {
        return Some(n);
    }
    if !value.is_object() {
        return None;
    }
    keys.iter()
        .find_map(|key| lookup(value, key).and_then(finite_number))
}

/// Tries each path in order and returns the first one that unwraps to a number.
#[must_use]
pub fn first_numeric(root: &Value, paths: &[&str], keys: &[&str]) -> Option<f64> {
    paths
        .iter()
        .find_map(|path| lookup(root, path).and_then(|v| unwrap_numeric(v, keys)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unwrap_plain_number() {
        assert_eq!(unwrap_numeric(&json!(12.5), AMOUNT_KEYS), Some(12.5));
        assert_eq!(unwrap_numeric(&json!(-3), AMOUNT_KEYS), Some(-3.0));
    }

    #[test]
    fn test_unwrap_respects_priority() {
        let value = json!({ "percent": 0.3, "return": 0.2, "returnPercent": 0.1 });
        assert_eq!(unwrap_numeric(&value, RETURN_KEYS), Some(0.1));

        let value = json!({ "percent": 0.3, "rateOfReturn": "bad" });
        assert_eq!(unwrap_numeric(&value, RETURN_KEYS), Some(0.3));
    }

    #[test]
    fn test_unwrap_nested_amount() {
        let value = json!({ "display": { "amount": 1500.0, "currency": "SGD" } });
        assert_eq!(unwrap_numeric(&value, AMOUNT_KEYS), Some(1500.0));
    }

    #[test]
    fn test_unwrap_rejects_other_shapes() {
        assert_eq!(unwrap_numeric(&json!(null), RETURN_KEYS), None);
        assert_eq!(unwrap_numeric(&json!([1, 2]), RETURN_KEYS), None);
        assert_eq!(unwrap_numeric(&json!({ "value": 1 }), RETURN_KEYS), None);
    }

    #[test]
    fn test_coerce_number_accepts_numeric_strings() {
        assert_eq!(coerce_number(&json!(" 42.5 ")), Some(42.5));
        assert_eq!(coerce_number(&json!("NaN")), None);
        assert_eq!(coerce_number(&json!("inf")), None);
        assert_eq!(coerce_number(&json!("abc")), None);
        assert_eq!(coerce_number(&json!(true)), None);
    }

    #[test]
    fn test_first_numeric_falls_through_paths() {
        let root = json!({
            "gainOrLossTable": { "netInvestment": { "allTimeValue": null } },
            "netInvestmentAmount": { "amount": 900 }
        });
        let value = first_numeric(
            &root,
            &["gainOrLossTable.netInvestment.allTimeValue", "netInvestmentAmount"],
            AMOUNT_KEYS,
        );
        assert_eq!(value, Some(900.0));
    }
}
