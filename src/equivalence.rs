//! Item identity.
//!
//! A multiset needs to know when two items are "the same key". That question
//! is answered by an [`Equivalence`], injected when the collection is built.
//!
//! - [`DeepEqual`]: structural equality over [`Value`] (the default).
//! - [`NativeEq`]: defer to the item type's `PartialEq`.
//! - any closure `Fn(&T, &T) -> bool`.
//!
//! A custom relation should be reflexive and symmetric. Lookup assumes it is
//! also transitive, but nothing checks that.

use crate::value::Value;

/// A binary "same item" predicate.
pub trait Equivalence<T: ?Sized> {
    fn equivalent(&self, a: &T, b: &T) -> bool;
}

impl<T: ?Sized, F> Equivalence<T> for F
where
    F: Fn(&T, &T) -> bool,
{
    #[inline]
    fn equivalent(&self, a: &T, b: &T) -> bool {
        self(a, b)
    }
}

/// Structural deep equality over [`Value`].
///
/// Sequences compare position by position; keyed structures compare by key
/// set and per-key value, ignoring key order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeepEqual;

impl Equivalence<Value> for DeepEqual {
    #[inline]
    fn equivalent(&self, a: &Value, b: &Value) -> bool {
        deep_equal(a, b)
    }
}

/// Equivalence through the item type's own `PartialEq`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NativeEq;

impl<T: PartialEq + ?Sized> Equivalence<T> for NativeEq {
    #[inline]
    fn equivalent(&self, a: &T, b: &T) -> bool {
        a == b
    }
}

/// Recursive structural comparison of two values.
///
/// - `Null` equals only `Null`.
/// - different variants are never equal (`1` is not `"1"`).
/// - numbers compare by value; `NaN` equals `NaN` so the relation is reflexive.
/// - sequences: same length, element-wise equal, in order.
/// - maps: same key set, each value recursively equal.
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => x == y || (x.is_nan() && y.is_nan()),
        (Value::Str(x), Value::Str(y)) => x == y,
        (Value::Seq(xs), Value::Seq(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| deep_equal(x, y))
        }
        (Value::Map(xs), Value::Map(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(k, x)| ys.get(k).is_some_and(|y| deep_equal(x, y)))
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn v(json: serde_json::Value) -> Value {
        Value::from(json)
    }

    #[test]
    fn key_order_is_irrelevant() {
        assert!(deep_equal(&v(json!({"a": 1, "b": 2})), &v(json!({"b": 2, "a": 1}))));
        assert!(deep_equal(
            &Value::map([("a", 1), ("b", 2)]),
            &Value::map([("b", 2), ("a", 1)])
        ));
    }

    #[test]
    fn sequence_order_matters() {
        assert!(!deep_equal(&v(json!([1, 2])), &v(json!([2, 1]))));
        assert!(deep_equal(&v(json!([1, 2])), &v(json!([1, 2]))));
        assert!(!deep_equal(&v(json!([1, 2])), &v(json!([1, 2, 3]))));
    }

    #[test]
    fn variants_never_cross() {
        assert!(!deep_equal(&Value::from(1), &Value::from("1")));
        assert!(!deep_equal(&Value::from(true), &Value::from(1)));
        assert!(!deep_equal(&Value::Null, &Value::from(0)));
        assert!(!deep_equal(&v(json!([])), &v(json!({}))));
        assert!(deep_equal(&Value::Null, &Value::Null));
    }

    #[test]
    fn numbers_compare_by_value() {
        assert!(deep_equal(&Value::from(1_i64), &Value::from(1.0_f64)));
        assert!(!deep_equal(&Value::from(1), &Value::from(2)));
        assert!(deep_equal(&Value::from(f64::NAN), &Value::from(f64::NAN)));
    }

    #[test]
    fn maps_need_identical_key_sets() {
        assert!(!deep_equal(&v(json!({"a": 1})), &v(json!({"a": 1, "b": 2}))));
        assert!(!deep_equal(&v(json!({"a": 1})), &v(json!({"b": 1}))));
        assert!(!deep_equal(&v(json!({"a": null})), &v(json!({}))));
    }

    #[test]
    fn nested_structures_recurse() {
        let a = v(json!({"xs": [1, {"k": [true, null]}], "name": "n"}));
        let b = v(json!({"name": "n", "xs": [1, {"k": [true, null]}]}));
        let c = v(json!({"name": "n", "xs": [1, {"k": [null, true]}]}));
        assert!(deep_equal(&a, &b));
        assert!(!deep_equal(&a, &c));
        assert_eq!(a, b);
    }

    #[test]
    fn closures_and_native_eq_are_equivalences() {
        let case_insensitive = |a: &String, b: &String| a.eq_ignore_ascii_case(b);
        assert!(case_insensitive.equivalent(&"Abc".to_owned(), &"aBC".to_owned()));
        assert!(NativeEq.equivalent(&3_u8, &3_u8));
        assert!(!NativeEq.equivalent("a", "b"));
        assert!(DeepEqual.equivalent(&Value::from("a"), &Value::from("a")));
    }
}
