//! Core type system for tfplan
//!
//! This module provides the raw Terraform value model (`Dynamic`), the
//! whole-resource data wrapper handed to plan modifiers (`DynamicValue`), the
//! known payload types used by typed attribute values, and provider private
//! state.

use crate::error::{Result, TfplanError};
use crate::path::{AttributePath, AttributePathStep};
use crate::refinement::Refinements;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Dynamic represents Terraform values that can be of any type
/// This is the raw representation of configuration, plan and state data
#[derive(Debug, Clone)]
pub enum Dynamic {
    /// Explicit null value
    Null,
    /// Value not yet known (during planning)
    Unknown(Refinements),
    /// Boolean value
    Bool(bool),
    /// Whole number, kept exact
    Int(i64),
    /// Any other number
    Number(f64),
    /// String value
    String(String),
    /// List of values (ordered, allows duplicates)
    List(Vec<Dynamic>),
    /// Set of values (unordered, no duplicates)
    Set(Vec<Dynamic>),
    /// Map of string keys to values of one type
    Map(HashMap<String, Dynamic>),
    /// Object with a fixed set of attributes
    Object(HashMap<String, Dynamic>),
}

impl Dynamic {
    pub fn unknown() -> Self {
        Dynamic::Unknown(Refinements::default())
    }

    pub fn object<K: Into<String>>(attributes: impl IntoIterator<Item = (K, Dynamic)>) -> Self {
        Dynamic::Object(
            attributes
                .into_iter()
                .map(|(k, v)| (k.into(), v))
                .collect(),
        )
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Dynamic::Null)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Dynamic::Unknown(_))
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            Dynamic::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Dynamic::Int(i) => Some(*i as f64),
            Dynamic::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Exact integer value of a number, if it holds one
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Dynamic::Int(i) => Some(*i),
            Dynamic::Number(n) => f64_to_i64(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Dynamic::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Attributes of an object or entries of a map
    pub fn as_attributes(&self) -> Option<&HashMap<String, Dynamic>> {
        match self {
            Dynamic::Object(m) | Dynamic::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Elements of a list or set
    pub fn as_elements(&self) -> Option<&[Dynamic]> {
        match self {
            Dynamic::List(l) | Dynamic::Set(l) => Some(l),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Dynamic::Null => "null",
            Dynamic::Unknown(_) => "unknown",
            Dynamic::Bool(_) => "bool",
            Dynamic::Int(_) | Dynamic::Number(_) => "number",
            Dynamic::String(_) => "string",
            Dynamic::List(_) => "list",
            Dynamic::Set(_) => "set",
            Dynamic::Map(_) => "map",
            Dynamic::Object(_) => "object",
        }
    }
}

impl PartialEq for Dynamic {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Dynamic::Null, Dynamic::Null) => true,
            (Dynamic::Unknown(a), Dynamic::Unknown(b)) => a == b,
            (Dynamic::Bool(a), Dynamic::Bool(b)) => a == b,
            (Dynamic::Int(a), Dynamic::Int(b)) => a == b,
            (Dynamic::Number(a), Dynamic::Number(b)) => a == b,
            (Dynamic::Int(a), Dynamic::Number(b)) | (Dynamic::Number(b), Dynamic::Int(a)) => {
                f64_to_i64(*b) == Some(*a)
            }
            (Dynamic::String(a), Dynamic::String(b)) => a == b,
            (Dynamic::List(a), Dynamic::List(b)) => a == b,
            (Dynamic::Set(a), Dynamic::Set(b)) => set_elements_equal(a, b),
            (Dynamic::Map(a), Dynamic::Map(b)) => a == b,
            (Dynamic::Object(a), Dynamic::Object(b)) => a == b,
            _ => false,
        }
    }
}

/// Converts a whole float inside the i64 range
fn f64_to_i64(n: f64) -> Option<i64> {
    // 2^63 is exactly representable, i64::MAX is not
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if n.fract() == 0.0 && n >= -LIMIT && n < LIMIT {
        Some(n as i64)
    } else {
        None
    }
}

/// Order-insensitive comparison of set elements
fn set_elements_equal(a: &[Dynamic], b: &[Dynamic]) -> bool {
    a.len() == b.len() && a.iter().all(|x| b.contains(x)) && b.iter().all(|y| a.contains(y))
}

impl fmt::Display for Dynamic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dynamic::Null => write!(f, "null"),
            Dynamic::Unknown(r) if r.is_empty() => write!(f, "<unknown>"),
            Dynamic::Unknown(r) => write!(f, "<unknown, {}>", r),
            Dynamic::Bool(b) => write!(f, "{}", b),
            Dynamic::Int(i) => write!(f, "{}", i),
            Dynamic::Number(n) => write!(f, "{}", n),
            Dynamic::String(s) => write!(f, "{:?}", s),
            Dynamic::List(items) | Dynamic::Set(items) => {
                write!(f, "[")?;
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Dynamic::Map(m) | Dynamic::Object(m) => {
                let mut keys: Vec<&String> = m.keys().collect();
                keys.sort();
                write!(f, "{{")?;
                for (idx, key) in keys.into_iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:?}: {}", key, m[key])?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<bool> for Dynamic {
    fn from(b: bool) -> Self {
        Dynamic::Bool(b)
    }
}

impl From<f64> for Dynamic {
    fn from(n: f64) -> Self {
        Dynamic::Number(n)
    }
}

impl From<i64> for Dynamic {
    fn from(n: i64) -> Self {
        Dynamic::Int(n)
    }
}

impl From<&str> for Dynamic {
    fn from(s: &str) -> Self {
        Dynamic::String(s.to_string())
    }
}

impl From<String> for Dynamic {
    fn from(s: String) -> Self {
        Dynamic::String(s)
    }
}

/// Marker used for unknown values in serialized form
const UNKNOWN_MARKER: &str = "__unknown__";

impl Serialize for Dynamic {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Dynamic::Null => serializer.serialize_unit(),
            Dynamic::Unknown(_) => serializer.serialize_str(UNKNOWN_MARKER),
            Dynamic::Bool(b) => serializer.serialize_bool(*b),
            Dynamic::Int(i) => serializer.serialize_i64(*i),
            Dynamic::Number(n) => serializer.serialize_f64(*n),
            Dynamic::String(s) => serializer.serialize_str(s),
            Dynamic::List(l) | Dynamic::Set(l) => l.serialize(serializer),
            Dynamic::Map(m) | Dynamic::Object(m) => m.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Dynamic {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct DynamicVisitor;

        impl<'de> Visitor<'de> for DynamicVisitor {
            type Value = Dynamic;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a valid Terraform value")
            }

            fn visit_unit<E>(self) -> std::result::Result<Dynamic, E>
            where
                E: de::Error,
            {
                Ok(Dynamic::Null)
            }

            fn visit_none<E>(self) -> std::result::Result<Dynamic, E>
            where
                E: de::Error,
            {
                Ok(Dynamic::Null)
            }

            fn visit_bool<E>(self, value: bool) -> std::result::Result<Dynamic, E>
            where
                E: de::Error,
            {
                Ok(Dynamic::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> std::result::Result<Dynamic, E>
            where
                E: de::Error,
            {
                Ok(Dynamic::Int(value))
            }

            fn visit_u64<E>(self, value: u64) -> std::result::Result<Dynamic, E>
            where
                E: de::Error,
            {
                match i64::try_from(value) {
                    Ok(i) => Ok(Dynamic::Int(i)),
                    Err(_) => Ok(Dynamic::Number(value as f64)),
                }
            }

            fn visit_f64<E>(self, value: f64) -> std::result::Result<Dynamic, E>
            where
                E: de::Error,
            {
                Ok(Dynamic::Number(value))
            }

            fn visit_str<E>(self, value: &str) -> std::result::Result<Dynamic, E>
            where
                E: de::Error,
            {
                if value == UNKNOWN_MARKER {
                    Ok(Dynamic::unknown())
                } else {
                    Ok(Dynamic::String(value.to_string()))
                }
            }

            fn visit_seq<V>(self, mut seq: V) -> std::result::Result<Dynamic, V::Error>
            where
                V: de::SeqAccess<'de>,
            {
                let mut vec = Vec::new();
                while let Some(elem) = seq.next_element()? {
                    vec.push(elem);
                }
                Ok(Dynamic::List(vec))
            }

            fn visit_map<V>(self, mut map: V) -> std::result::Result<Dynamic, V::Error>
            where
                V: de::MapAccess<'de>,
            {
                let mut hashmap = HashMap::new();
                while let Some((key, value)) = map.next_entry()? {
                    hashmap.insert(key, value);
                }
                Ok(Dynamic::Object(hashmap))
            }
        }

        deserializer.deserialize_any(DynamicVisitor)
    }
}

/// Arbitrary Terraform number
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Number(pub f64);

/// Known payload of a list attribute
#[derive(Debug, Clone, Default, PartialEq)]
pub struct List(pub Vec<Dynamic>);

/// Known payload of a set attribute; equality ignores element order
#[derive(Debug, Clone, Default)]
pub struct Set(pub Vec<Dynamic>);

impl PartialEq for Set {
    fn eq(&self, other: &Self) -> bool {
        set_elements_equal(&self.0, &other.0)
    }
}

/// Known payload of a map attribute
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Map(pub HashMap<String, Dynamic>);

/// Known payload of an object attribute
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Object(pub HashMap<String, Dynamic>);

impl<T: Into<Dynamic>> FromIterator<T> for List {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        List(iter.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Dynamic>> FromIterator<T> for Set {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Set(iter.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<String>> FromIterator<(K, Dynamic)> for Map {
    fn from_iter<I: IntoIterator<Item = (K, Dynamic)>>(iter: I) -> Self {
        Map(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl<K: Into<String>> FromIterator<(K, Dynamic)> for Object {
    fn from_iter<I: IntoIterator<Item = (K, Dynamic)>>(iter: I) -> Self {
        Object(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// AttrValue is implemented by every known payload type an attribute value
/// can carry. It ties the typed world of plan modifiers to raw `Dynamic`
/// resource data.
pub trait AttrValue: Clone + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Terraform type name used in diagnostics
    const TYPE_NAME: &'static str;

    fn into_dynamic(self) -> Dynamic;

    fn from_dynamic(value: Dynamic) -> Result<Self>;

    /// Only dynamic payloads can wrap a null value
    fn is_underlying_null(&self) -> bool {
        false
    }

    /// Only dynamic payloads can wrap an unknown value
    fn is_underlying_unknown(&self) -> bool {
        false
    }
}

impl AttrValue for bool {
    const TYPE_NAME: &'static str = "bool";

    fn into_dynamic(self) -> Dynamic {
        Dynamic::Bool(self)
    }

    fn from_dynamic(value: Dynamic) -> Result<Self> {
        match value {
            Dynamic::Bool(b) => Ok(b),
            other => Err(TfplanError::type_mismatch(Self::TYPE_NAME, other.type_name())),
        }
    }
}

impl AttrValue for String {
    const TYPE_NAME: &'static str = "string";

    fn into_dynamic(self) -> Dynamic {
        Dynamic::String(self)
    }

    fn from_dynamic(value: Dynamic) -> Result<Self> {
        match value {
            Dynamic::String(s) => Ok(s),
            other => Err(TfplanError::type_mismatch(Self::TYPE_NAME, other.type_name())),
        }
    }
}

impl AttrValue for i32 {
    const TYPE_NAME: &'static str = "int32";

    fn into_dynamic(self) -> Dynamic {
        Dynamic::Int(i64::from(self))
    }

    fn from_dynamic(value: Dynamic) -> Result<Self> {
        match value {
            Dynamic::Int(_) | Dynamic::Number(_) => value
                .as_i64()
                .and_then(|i| i32::try_from(i).ok())
                .ok_or_else(|| {
                    TfplanError::type_mismatch(Self::TYPE_NAME, format!("number {}", value))
                }),
            other => Err(TfplanError::type_mismatch(Self::TYPE_NAME, other.type_name())),
        }
    }
}

impl AttrValue for i64 {
    const TYPE_NAME: &'static str = "int64";

    fn into_dynamic(self) -> Dynamic {
        Dynamic::Int(self)
    }

    fn from_dynamic(value: Dynamic) -> Result<Self> {
        match value {
            Dynamic::Int(i) => Ok(i),
            Dynamic::Number(n) => f64_to_i64(n).ok_or_else(|| {
                TfplanError::type_mismatch(Self::TYPE_NAME, format!("number {}", n))
            }),
            other => Err(TfplanError::type_mismatch(Self::TYPE_NAME, other.type_name())),
        }
    }
}

impl AttrValue for f32 {
    const TYPE_NAME: &'static str = "float32";

    fn into_dynamic(self) -> Dynamic {
        Dynamic::Number(f64::from(self))
    }

    fn from_dynamic(value: Dynamic) -> Result<Self> {
        match value {
            Dynamic::Int(i) => Ok(i as f32),
            Dynamic::Number(n) => Ok(n as f32),
            other => Err(TfplanError::type_mismatch(Self::TYPE_NAME, other.type_name())),
        }
    }
}

impl AttrValue for f64 {
    const TYPE_NAME: &'static str = "float64";

    fn into_dynamic(self) -> Dynamic {
        Dynamic::Number(self)
    }

    fn from_dynamic(value: Dynamic) -> Result<Self> {
        match value {
            Dynamic::Int(i) => Ok(i as f64),
            Dynamic::Number(n) => Ok(n),
            other => Err(TfplanError::type_mismatch(Self::TYPE_NAME, other.type_name())),
        }
    }
}

impl AttrValue for Number {
    const TYPE_NAME: &'static str = "number";

    fn into_dynamic(self) -> Dynamic {
        Dynamic::Number(self.0)
    }

    fn from_dynamic(value: Dynamic) -> Result<Self> {
        match value {
            Dynamic::Int(i) => Ok(Number(i as f64)),
            Dynamic::Number(n) => Ok(Number(n)),
            other => Err(TfplanError::type_mismatch(Self::TYPE_NAME, other.type_name())),
        }
    }
}

impl AttrValue for List {
    const TYPE_NAME: &'static str = "list";

    fn into_dynamic(self) -> Dynamic {
        Dynamic::List(self.0)
    }

    fn from_dynamic(value: Dynamic) -> Result<Self> {
        match value {
            Dynamic::List(l) => Ok(List(l)),
            other => Err(TfplanError::type_mismatch(Self::TYPE_NAME, other.type_name())),
        }
    }
}

impl AttrValue for Set {
    const TYPE_NAME: &'static str = "set";

    fn into_dynamic(self) -> Dynamic {
        Dynamic::Set(self.0)
    }

    // Decoded JSON cannot tell sets from lists, so both are accepted
    fn from_dynamic(value: Dynamic) -> Result<Self> {
        match value {
            Dynamic::Set(s) | Dynamic::List(s) => Ok(Set(s)),
            other => Err(TfplanError::type_mismatch(Self::TYPE_NAME, other.type_name())),
        }
    }
}

impl AttrValue for Map {
    const TYPE_NAME: &'static str = "map";

    fn into_dynamic(self) -> Dynamic {
        Dynamic::Map(self.0)
    }

    fn from_dynamic(value: Dynamic) -> Result<Self> {
        match value {
            Dynamic::Map(m) | Dynamic::Object(m) => Ok(Map(m)),
            other => Err(TfplanError::type_mismatch(Self::TYPE_NAME, other.type_name())),
        }
    }
}

impl AttrValue for Object {
    const TYPE_NAME: &'static str = "object";

    fn into_dynamic(self) -> Dynamic {
        Dynamic::Object(self.0)
    }

    fn from_dynamic(value: Dynamic) -> Result<Self> {
        match value {
            Dynamic::Object(m) | Dynamic::Map(m) => Ok(Object(m)),
            other => Err(TfplanError::type_mismatch(Self::TYPE_NAME, other.type_name())),
        }
    }
}

impl AttrValue for Dynamic {
    const TYPE_NAME: &'static str = "dynamic";

    fn into_dynamic(self) -> Dynamic {
        self
    }

    fn from_dynamic(value: Dynamic) -> Result<Self> {
        Ok(value)
    }

    fn is_underlying_null(&self) -> bool {
        self.is_null()
    }

    fn is_underlying_unknown(&self) -> bool {
        self.is_unknown()
    }
}

/// DynamicValue wraps the whole config, plan or state of a resource
/// Plan modifiers receive these alongside the typed attribute values
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicValue {
    pub value: Dynamic,
}

impl DynamicValue {
    pub fn new(value: Dynamic) -> Self {
        Self { value }
    }

    pub fn null() -> Self {
        Self {
            value: Dynamic::Null,
        }
    }

    pub fn unknown() -> Self {
        Self {
            value: Dynamic::unknown(),
        }
    }

    /// Empty object, the usual starting point when building resource data
    pub fn empty_object() -> Self {
        Self {
            value: Dynamic::Object(HashMap::new()),
        }
    }

    pub fn is_null(&self) -> bool {
        self.value.is_null()
    }

    pub fn is_unknown(&self) -> bool {
        self.value.is_unknown()
    }

    pub fn encode_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(&self.value)
            .map_err(|e| TfplanError::EncodingError(format!("json encoding failed: {}", e)))
    }

    pub fn decode_json(data: &[u8]) -> Result<Self> {
        let value = serde_json::from_slice(data)
            .map_err(|e| TfplanError::DecodingError(format!("json decoding failed: {}", e)))?;
        Ok(Self { value })
    }

    /// Returns the value at `path`, failing when any step is missing
    pub fn get(&self, path: &AttributePath) -> Result<&Dynamic> {
        let mut current = &self.value;

        for step in &path.steps {
            current = match (current, step) {
                (Dynamic::Object(m) | Dynamic::Map(m), AttributePathStep::AttributeName(name)) => m
                    .get(name)
                    .ok_or_else(|| TfplanError::PathNotFound(path.to_string()))?,
                (Dynamic::Map(m), AttributePathStep::ElementKeyString(key)) => m
                    .get(key)
                    .ok_or_else(|| TfplanError::PathNotFound(path.to_string()))?,
                (Dynamic::List(l), AttributePathStep::ElementKeyInt(idx)) => usize::try_from(*idx)
                    .ok()
                    .and_then(|i| l.get(i))
                    .ok_or_else(|| TfplanError::PathNotFound(path.to_string()))?,
                (Dynamic::Set(s) | Dynamic::List(s), AttributePathStep::ElementKeyValue(v)) => s
                    .iter()
                    .find(|e| *e == v)
                    .ok_or_else(|| TfplanError::PathNotFound(path.to_string()))?,
                (other, _) => {
                    return Err(TfplanError::InvalidPath(format!(
                        "cannot walk into {} value at {}",
                        other.type_name(),
                        path
                    )))
                }
            };
        }

        Ok(current)
    }

    /// Returns the value at `path` the way Terraform reads attributes: a
    /// missing attribute or a null parent yields null, an unknown parent
    /// yields unknown. Only steps that do not fit the data are errors.
    pub fn get_or_null(&self, path: &AttributePath) -> Result<Dynamic> {
        let mut current = &self.value;

        for step in &path.steps {
            current = match (current, step) {
                (Dynamic::Null, _) => return Ok(Dynamic::Null),
                (Dynamic::Unknown(_), _) => return Ok(Dynamic::unknown()),
                (Dynamic::Object(m) | Dynamic::Map(m), AttributePathStep::AttributeName(name)) => {
                    match m.get(name) {
                        Some(v) => v,
                        None => return Ok(Dynamic::Null),
                    }
                }
                (Dynamic::Map(m), AttributePathStep::ElementKeyString(key)) => match m.get(key) {
                    Some(v) => v,
                    None => return Ok(Dynamic::Null),
                },
                (Dynamic::List(l), AttributePathStep::ElementKeyInt(idx)) => {
                    match usize::try_from(*idx).ok().and_then(|i| l.get(i)) {
                        Some(v) => v,
                        None => return Ok(Dynamic::Null),
                    }
                }
                (Dynamic::Set(s) | Dynamic::List(s), AttributePathStep::ElementKeyValue(v)) => {
                    match s.iter().find(|e| *e == v) {
                        Some(found) => found,
                        None => return Ok(Dynamic::Null),
                    }
                }
                (other, _) => {
                    return Err(TfplanError::InvalidPath(format!(
                        "cannot walk into {} value at {}",
                        other.type_name(),
                        path
                    )))
                }
            };
        }

        Ok(current.clone())
    }

    /// Replaces the value at `path`, creating missing attributes and map
    /// entries along the way
    pub fn set(&mut self, path: &AttributePath, new_value: Dynamic) -> Result<()> {
        set_at(&mut self.value, &path.steps, path, new_value)
    }

    /// Type-safe accessors
    pub fn get_string(&self, path: &AttributePath) -> Result<String> {
        match self.get(path)? {
            Dynamic::String(s) => Ok(s.clone()),
            other => Err(TfplanError::type_mismatch("string", other.type_name())),
        }
    }

    pub fn get_number(&self, path: &AttributePath) -> Result<f64> {
        let value = self.get(path)?;
        value
            .as_number()
            .ok_or_else(|| TfplanError::type_mismatch("number", value.type_name()))
    }

    pub fn get_bool(&self, path: &AttributePath) -> Result<bool> {
        match self.get(path)? {
            Dynamic::Bool(b) => Ok(*b),
            other => Err(TfplanError::type_mismatch("bool", other.type_name())),
        }
    }
}

fn set_at(
    current: &mut Dynamic,
    steps: &[AttributePathStep],
    path: &AttributePath,
    new_value: Dynamic,
) -> Result<()> {
    let Some((step, rest)) = steps.split_first() else {
        *current = new_value;
        return Ok(());
    };

    if current.is_null() {
        *current = match step {
            AttributePathStep::AttributeName(_) => Dynamic::Object(HashMap::new()),
            AttributePathStep::ElementKeyString(_) => Dynamic::Map(HashMap::new()),
            _ => {
                return Err(TfplanError::PathNotFound(path.to_string()));
            }
        };
    }

    let next = match (current, step) {
        (Dynamic::Object(m) | Dynamic::Map(m), AttributePathStep::AttributeName(name)) => {
            m.entry(name.clone()).or_insert(Dynamic::Null)
        }
        (Dynamic::Map(m), AttributePathStep::ElementKeyString(key)) => {
            m.entry(key.clone()).or_insert(Dynamic::Null)
        }
        (Dynamic::List(l), AttributePathStep::ElementKeyInt(idx)) => usize::try_from(*idx)
            .ok()
            .and_then(|i| l.get_mut(i))
            .ok_or_else(|| TfplanError::PathNotFound(path.to_string()))?,
        (Dynamic::Set(s) | Dynamic::List(s), AttributePathStep::ElementKeyValue(v)) => s
            .iter_mut()
            .find(|e| **e == *v)
            .ok_or_else(|| TfplanError::PathNotFound(path.to_string()))?,
        (other, _) => {
            return Err(TfplanError::InvalidPath(format!(
                "cannot walk into {} value at {}",
                other.type_name(),
                path
            )))
        }
    };

    set_at(next, rest, path, new_value)
}

/// Private state management - Provider-specific data not visible to users
/// The host stores it opaquely between plan and apply
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrivateStateData {
    data: HashMap<String, Vec<u8>>,
}

impl PrivateStateData {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
        }
    }

    pub fn get_key(&self, key: &str) -> Option<&[u8]> {
        self.data.get(key).map(|v| v.as_slice())
    }

    pub fn set_key(&mut self, key: &str, value: Vec<u8>) {
        self.data.insert(key.to_string(), value);
    }

    pub fn remove_key(&mut self, key: &str) {
        self.data.remove(key);
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(&self.data).map_err(|e| {
            TfplanError::EncodingError(format!("private state encoding failed: {}", e))
        })
    }

    pub fn decode(data: &[u8]) -> Result<Self> {
        if data.is_empty() {
            return Ok(Self::new());
        }
        let data = serde_json::from_slice(data).map_err(|e| {
            TfplanError::DecodingError(format!("private state decoding failed: {}", e))
        })?;
        Ok(Self { data })
    }
}

/// Config represents configuration values
pub type Config = DynamicValue;

/// Plan represents proposed new state values
pub type Plan = DynamicValue;

/// State represents prior resource state values
pub type State = DynamicValue;

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DynamicValue {
        DynamicValue::new(Dynamic::object([
            ("name", Dynamic::from("web")),
            (
                "rules",
                Dynamic::List(vec![
                    Dynamic::object([("id", Dynamic::from("r1")), ("port", Dynamic::from(80_i64))]),
                    Dynamic::object([("id", Dynamic::from("r2")), ("port", Dynamic::from(443_i64))]),
                ]),
            ),
            (
                "tags",
                Dynamic::Map(HashMap::from([("env".to_string(), Dynamic::from("prod"))])),
            ),
        ]))
    }

    #[test]
    fn dynamic_value_string_access() {
        let dv = sample();
        assert_eq!(dv.get_string(&AttributePath::new("name")).unwrap(), "web");
        assert_eq!(
            dv.get_string(&AttributePath::new("tags").key("env")).unwrap(),
            "prod"
        );
    }

    #[test]
    fn dynamic_value_nested_access() {
        let dv = sample();
        let path = AttributePath::new("rules").index(1).attribute("port");
        assert_eq!(dv.get_number(&path).unwrap(), 443.0);
    }

    #[test]
    fn get_reports_missing_attribute() {
        let dv = sample();
        let err = dv.get(&AttributePath::new("missing")).unwrap_err();
        assert!(matches!(err, TfplanError::PathNotFound(ref p) if p == "missing"));
    }

    #[test]
    fn get_rejects_wrong_step_kind() {
        let dv = sample();
        let err = dv.get(&AttributePath::new("name").index(0)).unwrap_err();
        assert!(matches!(err, TfplanError::InvalidPath(_)));
    }

    #[test]
    fn get_or_null_is_lenient_with_missing_data() {
        let dv = sample();
        assert_eq!(
            dv.get_or_null(&AttributePath::new("missing").attribute("deeper")).unwrap(),
            Dynamic::Null
        );
        assert_eq!(
            dv.get_or_null(&AttributePath::new("rules").index(5).attribute("id")).unwrap(),
            Dynamic::Null
        );
        assert_eq!(
            DynamicValue::unknown()
                .get_or_null(&AttributePath::new("anything"))
                .unwrap(),
            Dynamic::unknown()
        );
    }

    #[test]
    fn set_creates_intermediate_objects() {
        let mut dv = DynamicValue::null();
        let path = AttributePath::new("config").attribute("endpoint");
        dv.set(&path, Dynamic::from("https://example.com")).unwrap();

        assert_eq!(dv.get_string(&path).unwrap(), "https://example.com");
    }

    #[test]
    fn set_replaces_list_element_attribute() {
        let mut dv = sample();
        let path = AttributePath::new("rules").index(0).attribute("id");
        dv.set(&path, Dynamic::unknown()).unwrap();

        assert!(dv.get(&path).unwrap().is_unknown());
        assert!(dv.set(&AttributePath::new("rules").index(9), Dynamic::Null).is_err());
    }

    #[test]
    fn set_walks_into_set_elements_by_value() {
        let element = Dynamic::object([("id", Dynamic::from("a"))]);
        let mut dv = DynamicValue::new(Dynamic::object([(
            "items",
            Dynamic::Set(vec![element.clone()]),
        )]));

        let path = AttributePath::new("items").value(element).attribute("id");
        dv.set(&path, Dynamic::from("b")).unwrap();

        let items = dv.get(&AttributePath::new("items")).unwrap();
        assert_eq!(
            items,
            &Dynamic::Set(vec![Dynamic::object([("id", Dynamic::from("b"))])])
        );
    }

    #[test]
    fn set_equality_ignores_order() {
        let a = Dynamic::Set(vec![Dynamic::from("x"), Dynamic::from("y")]);
        let b = Dynamic::Set(vec![Dynamic::from("y"), Dynamic::from("x")]);
        assert_eq!(a, b);
        assert_ne!(
            Dynamic::List(vec![Dynamic::from("x"), Dynamic::from("y")]),
            Dynamic::List(vec![Dynamic::from("y"), Dynamic::from("x")])
        );
        assert_eq!(Set::from_iter(["x", "y"]), Set::from_iter(["y", "x"]));
    }

    #[test]
    fn integer_conversion_rejects_fractions() {
        assert_eq!(i64::from_dynamic(Dynamic::Number(42.0)).unwrap(), 42);
        assert!(i64::from_dynamic(Dynamic::Number(1.5)).is_err());
        assert!(i32::from_dynamic(Dynamic::Number(1e12)).is_err());
        assert!(String::from_dynamic(Dynamic::Bool(true)).is_err());
    }

    #[test]
    fn large_integers_keep_precision() {
        let big = 9_007_199_254_740_993_i64;
        assert_eq!(big.into_dynamic(), Dynamic::Int(big));
        assert_eq!(i64::from_dynamic(Dynamic::Int(big)).unwrap(), big);

        let dv = DynamicValue::decode_json(br#"{"id": 9007199254740993, "ratio": 0.5}"#).unwrap();
        let id = dv.get(&AttributePath::new("id")).unwrap();
        assert_eq!(id.as_i64(), Some(big));
        let encoded = String::from_utf8(dv.encode_json().unwrap()).unwrap();
        assert!(encoded.contains("9007199254740993"));
        assert_eq!(dv.get_number(&AttributePath::new("ratio")).unwrap(), 0.5);
    }

    #[test]
    fn whole_floats_equal_integers() {
        assert_eq!(Dynamic::Int(7), Dynamic::Number(7.0));
        assert_ne!(Dynamic::Int(7), Dynamic::Number(7.5));
        assert_eq!(i32::from_dynamic(Dynamic::Int(12)).unwrap(), 12);
        assert!(i32::from_dynamic(Dynamic::Int(i64::from(i32::MAX) + 1)).is_err());
        assert_eq!(f64::from_dynamic(Dynamic::Int(3)).unwrap(), 3.0);
    }

    #[test]
    fn json_round_trip_keeps_unknown_marker() {
        let dv = DynamicValue::new(Dynamic::object([
            ("id", Dynamic::unknown()),
            ("name", Dynamic::from("web")),
        ]));

        let decoded = DynamicValue::decode_json(&dv.encode_json().unwrap()).unwrap();
        assert!(decoded.get(&AttributePath::new("id")).unwrap().is_unknown());
        assert_eq!(decoded.get_string(&AttributePath::new("name")).unwrap(), "web");
    }

    #[test]
    fn private_state_encoding() {
        let mut ps = PrivateStateData::new();
        ps.set_key("etag", b"12345".to_vec());

        let encoded = ps.encode().unwrap();
        let decoded = PrivateStateData::decode(&encoded).unwrap();

        assert_eq!(decoded.get_key("etag"), Some(&b"12345"[..]));
        assert!(PrivateStateData::decode(&[]).unwrap().is_empty());
    }

    #[test]
    fn display_sorts_object_keys() {
        let value = Dynamic::object([("b", Dynamic::from(2_i64)), ("a", Dynamic::from("x"))]);
        assert_eq!(value.to_string(), "{\"a\": \"x\", \"b\": 2}");
    }
}
