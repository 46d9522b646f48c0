//! Typed attribute values
//!
//! `Value<T>` is what a plan modifier or default sees for a single attribute:
//! null, unknown (possibly refined) or a known payload of type `T`.

use crate::error::Result;
use crate::refinement::{BoundValue, NumberBound, Refinements};
use crate::types::{AttrValue, Dynamic, List, Map, Number, Object, Set};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Value<T> {
    Null,
    Unknown(Refinements),
    Known(T),
}

pub type BoolValue = Value<bool>;
pub type StringValue = Value<String>;
pub type Int32Value = Value<i32>;
pub type Int64Value = Value<i64>;
pub type Float32Value = Value<f32>;
pub type Float64Value = Value<f64>;
pub type NumberValue = Value<Number>;
pub type ListValue = Value<List>;
pub type SetValue = Value<Set>;
pub type MapValue = Value<Map>;
pub type ObjectValue = Value<Object>;
pub type DynamicAttributeValue = Value<Dynamic>;

impl<T: AttrValue> Value<T> {
    pub fn null() -> Self {
        Value::Null
    }

    pub fn unknown() -> Self {
        Value::Unknown(Refinements::default())
    }

    pub fn known(value: T) -> Self {
        Value::Known(value)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Value::Unknown(_))
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Value::Known(_))
    }

    pub fn as_known(&self) -> Option<&T> {
        match self {
            Value::Known(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_known(self) -> Option<T> {
        match self {
            Value::Known(v) => Some(v),
            _ => None,
        }
    }

    /// True for null values and for dynamic payloads wrapping a null
    pub fn is_underlying_null(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Unknown(_) => false,
            Value::Known(v) => v.is_underlying_null(),
        }
    }

    /// True for unknown values and for dynamic payloads wrapping an unknown
    pub fn is_underlying_unknown(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Unknown(_) => true,
            Value::Known(v) => v.is_underlying_unknown(),
        }
    }

    pub fn refinements(&self) -> Option<&Refinements> {
        match self {
            Value::Unknown(r) => Some(r),
            _ => None,
        }
    }

    pub fn to_dynamic(&self) -> Dynamic {
        match self {
            Value::Null => Dynamic::Null,
            Value::Unknown(r) => Dynamic::Unknown(r.clone()),
            Value::Known(v) => v.clone().into_dynamic(),
        }
    }

    pub fn from_dynamic(value: Dynamic) -> Result<Self> {
        match value {
            Dynamic::Null => Ok(Value::Null),
            Dynamic::Unknown(r) => Ok(Value::Unknown(r)),
            other => Ok(Value::Known(T::from_dynamic(other)?)),
        }
    }

    fn refine(&self, f: impl FnOnce(Refinements) -> Refinements) -> Self {
        match self {
            Value::Unknown(r) => Value::Unknown(f(r.clone())),
            other => other.clone(),
        }
    }

    pub fn refine_as_not_null(&self) -> Self {
        self.refine(Refinements::with_not_null)
    }

    pub fn not_null_refinement(&self) -> bool {
        self.refinements().is_some_and(|r| r.not_null)
    }

    pub fn prefix_refinement(&self) -> Option<&str> {
        self.refinements().and_then(|r| r.string_prefix.as_deref())
    }

    pub fn lower_bound_refinement(&self) -> Option<NumberBound> {
        self.refinements().and_then(|r| r.lower_bound)
    }

    pub fn upper_bound_refinement(&self) -> Option<NumberBound> {
        self.refinements().and_then(|r| r.upper_bound)
    }

    pub fn length_lower_bound_refinement(&self) -> Option<i64> {
        self.refinements().and_then(|r| r.length_lower_bound)
    }

    pub fn length_upper_bound_refinement(&self) -> Option<i64> {
        self.refinements().and_then(|r| r.length_upper_bound)
    }
}

impl Value<String> {
    pub fn refine_with_prefix(&self, prefix: &str) -> Self {
        self.refine(|r| r.with_prefix(prefix))
    }
}

impl<T: Numeric> Value<T> {
    pub fn refine_with_lower_bound(&self, min: T, inclusive: bool) -> Self {
        let bound = NumberBound {
            value: min.to_bound(),
            inclusive,
        };
        self.refine(|r| r.with_lower_bound(bound))
    }

    pub fn refine_with_upper_bound(&self, max: T, inclusive: bool) -> Self {
        let bound = NumberBound {
            value: max.to_bound(),
            inclusive,
        };
        self.refine(|r| r.with_upper_bound(bound))
    }
}

impl<T: Collection> Value<T> {
    pub fn refine_with_length_lower_bound(&self, min: i64) -> Self {
        self.refine(|r| r.with_length_lower_bound(min))
    }

    pub fn refine_with_length_upper_bound(&self, max: i64) -> Self {
        self.refine(|r| r.with_length_upper_bound(max))
    }
}

impl<T: AttrValue> From<T> for Value<T> {
    fn from(value: T) -> Self {
        Value::Known(value)
    }
}

impl From<&str> for Value<String> {
    fn from(value: &str) -> Self {
        Value::Known(value.to_string())
    }
}

impl<T: AttrValue> fmt::Display for Value<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "<null>"),
            Value::Unknown(r) if r.is_empty() => write!(f, "<unknown>"),
            Value::Unknown(r) => write!(f, "<unknown, {}>", r),
            Value::Known(v) => write!(f, "{}", v.clone().into_dynamic()),
        }
    }
}

/// Payloads that accept numeric bound refinements
pub trait Numeric: AttrValue + PartialOrd {
    fn to_bound(&self) -> BoundValue;
}

impl Numeric for i32 {
    fn to_bound(&self) -> BoundValue {
        BoundValue::Int(i64::from(*self))
    }
}

impl Numeric for i64 {
    fn to_bound(&self) -> BoundValue {
        BoundValue::Int(*self)
    }
}

impl Numeric for f32 {
    fn to_bound(&self) -> BoundValue {
        BoundValue::Float(f64::from(*self))
    }
}

impl Numeric for f64 {
    fn to_bound(&self) -> BoundValue {
        BoundValue::Float(*self)
    }
}

impl Numeric for Number {
    fn to_bound(&self) -> BoundValue {
        BoundValue::Float(self.0)
    }
}

/// Payloads that accept length refinements
pub trait Collection: AttrValue {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Collection for List {
    fn len(&self) -> usize {
        self.0.len()
    }
}

impl Collection for Set {
    fn len(&self) -> usize {
        self.0.len()
    }
}

impl Collection for Map {
    fn len(&self) -> usize {
        self.0.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refinements_only_apply_to_unknown_values() {
        let known = StringValue::known("hello".to_string());
        assert_eq!(known.refine_with_prefix("he"), known);

        let null = StringValue::null();
        assert_eq!(null.refine_as_not_null(), null);

        let refined = StringValue::unknown().refine_with_prefix("he");
        assert!(refined.not_null_refinement());
        assert_eq!(refined.prefix_refinement(), Some("he"));
    }

    #[test]
    fn unknowns_with_different_refinements_differ() {
        let plain = Int64Value::unknown();
        let refined = plain.refine_as_not_null();
        assert_ne!(plain, refined);
        assert_eq!(refined, Int64Value::unknown().refine_as_not_null());
    }

    #[test]
    fn numeric_bounds_keep_integer_precision() {
        let value = Int64Value::unknown().refine_with_lower_bound(i64::MAX - 1, true);
        assert_eq!(
            value.lower_bound_refinement(),
            Some(NumberBound::inclusive(BoundValue::Int(i64::MAX - 1)))
        );
        assert_eq!(value.upper_bound_refinement(), None);

        let value = Float64Value::unknown().refine_with_upper_bound(1.5, false);
        assert_eq!(
            value.upper_bound_refinement(),
            Some(NumberBound::exclusive(BoundValue::Float(1.5)))
        );
    }

    #[test]
    fn collection_length_bounds() {
        let value = ListValue::unknown()
            .refine_with_length_lower_bound(1)
            .refine_with_length_upper_bound(3);
        assert_eq!(value.length_lower_bound_refinement(), Some(1));
        assert_eq!(value.length_upper_bound_refinement(), Some(3));
        assert!(value.not_null_refinement());
    }

    #[test]
    fn underlying_null_for_dynamic_payloads() {
        assert!(DynamicAttributeValue::known(Dynamic::Null).is_underlying_null());
        assert!(DynamicAttributeValue::known(Dynamic::unknown()).is_underlying_unknown());
        assert!(!DynamicAttributeValue::known(Dynamic::from("x")).is_underlying_null());
        assert!(BoolValue::null().is_underlying_null());
        assert!(!BoolValue::known(false).is_underlying_null());
    }

    #[test]
    fn dynamic_conversion() {
        let value = Int64Value::from_dynamic(Dynamic::Number(7.0)).unwrap();
        assert_eq!(value, Int64Value::known(7));
        assert_eq!(value.to_dynamic(), Dynamic::Number(7.0));

        assert!(StringValue::from_dynamic(Dynamic::Null).unwrap().is_null());
        assert!(StringValue::from_dynamic(Dynamic::Number(1.0)).is_err());
    }

    #[test]
    fn int64_values_survive_dynamic_conversion() {
        let value = Int64Value::known(9_007_199_254_740_993);
        let back = Int64Value::from_dynamic(value.to_dynamic()).unwrap();
        assert_eq!(back, Int64Value::known(9_007_199_254_740_993));
    }

    #[test]
    fn display_forms() {
        assert_eq!(StringValue::null().to_string(), "<null>");
        assert_eq!(StringValue::unknown().to_string(), "<unknown>");
        assert_eq!(
            StringValue::unknown().refine_as_not_null().to_string(),
            "<unknown, not null>"
        );
        assert_eq!(StringValue::from("x").to_string(), "\"x\"");
    }
}
