//! Unknown value refinements
//!
//! A refinement narrows what an unknown value can become once it is known:
//! that it will not be null, that a string starts with a prefix, that a
//! number stays within bounds, or that a collection has a bounded size.

use std::fmt;

/// Maximum prefix length Terraform keeps for a string prefix refinement
pub const MAX_PREFIX_LENGTH: usize = 256;

/// A numeric bound value. Integers are kept as integers so that large
/// values do not lose precision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundValue {
    Int(i64),
    Float(f64),
}

impl BoundValue {
    pub fn as_f64(&self) -> f64 {
        match self {
            BoundValue::Int(i) => *i as f64,
            BoundValue::Float(f) => *f,
        }
    }
}

impl fmt::Display for BoundValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundValue::Int(i) => write!(f, "{}", i),
            BoundValue::Float(v) => write!(f, "{}", v),
        }
    }
}

/// Lower or upper bound of a number refinement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumberBound {
    pub value: BoundValue,
    pub inclusive: bool,
}

impl NumberBound {
    pub fn inclusive(value: BoundValue) -> Self {
        Self {
            value,
            inclusive: true,
        }
    }

    pub fn exclusive(value: BoundValue) -> Self {
        Self {
            value,
            inclusive: false,
        }
    }
}

impl fmt::Display for NumberBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.inclusive {
            "inclusive"
        } else {
            "exclusive"
        };
        write!(f, "{} ({})", self.value, kind)
    }
}

/// Refinements attached to an unknown value
///
/// Only unknown values carry refinements. The value wrappers take care of
/// ignoring refinement requests on null and known values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Refinements {
    pub not_null: bool,
    pub string_prefix: Option<String>,
    pub lower_bound: Option<NumberBound>,
    pub upper_bound: Option<NumberBound>,
    pub length_lower_bound: Option<i64>,
    pub length_upper_bound: Option<i64>,
}

impl Refinements {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn with_not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    /// Records a prefix. Empty prefixes carry no information and are dropped,
    /// long prefixes are cut at [`MAX_PREFIX_LENGTH`] characters.
    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.not_null = true;
        if !prefix.is_empty() {
            let truncated: String = prefix.chars().take(MAX_PREFIX_LENGTH).collect();
            self.string_prefix = Some(truncated);
        }
        self
    }

    pub fn with_lower_bound(mut self, bound: NumberBound) -> Self {
        self.not_null = true;
        self.lower_bound = Some(bound);
        self
    }

    pub fn with_upper_bound(mut self, bound: NumberBound) -> Self {
        self.not_null = true;
        self.upper_bound = Some(bound);
        self
    }

    pub fn with_length_lower_bound(mut self, min: i64) -> Self {
        self.not_null = true;
        self.length_lower_bound = Some(min);
        self
    }

    pub fn with_length_upper_bound(mut self, max: i64) -> Self {
        self.not_null = true;
        self.length_upper_bound = Some(max);
        self
    }
}

impl fmt::Display for Refinements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.not_null {
            parts.push("not null".to_string());
        }
        if let Some(prefix) = &self.string_prefix {
            parts.push(format!("prefix = {:?}", prefix));
        }
        if let Some(bound) = &self.lower_bound {
            parts.push(format!("lower bound = {}", bound));
        }
        if let Some(bound) = &self.upper_bound {
            parts.push(format!("upper bound = {}", bound));
        }
        if let Some(min) = self.length_lower_bound {
            parts.push(format!("length lower bound = {}", min));
        }
        if let Some(max) = self.length_upper_bound {
            parts.push(format!("length upper bound = {}", max));
        }
        write!(f, "{}", parts.join(", "))
    }
}
