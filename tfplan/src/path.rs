//! Attribute paths
//!
//! An AttributePath addresses a single value inside resource data, e.g.
//! `rules[0].id` or `tags["env"]`.

use crate::types::Dynamic;
use std::fmt;

/// AttributePath represents a path to an attribute within resource data
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AttributePath {
    pub steps: Vec<AttributePathStep>,
}

/// Individual step in an AttributePath
#[derive(Debug, Clone, PartialEq)]
pub enum AttributePathStep {
    /// Access attribute by name in object
    AttributeName(String),
    /// Access element by string key (for maps)
    ElementKeyString(String),
    /// Access element by integer index (for lists)
    ElementKeyInt(i64),
    /// Access element by its value (for sets)
    ElementKeyValue(Dynamic),
}

impl AttributePath {
    pub fn new(name: &str) -> Self {
        Self {
            steps: vec![AttributePathStep::AttributeName(name.to_string())],
        }
    }

    pub fn root() -> Self {
        Self { steps: Vec::new() }
    }

    pub fn attribute(mut self, name: &str) -> Self {
        self.steps
            .push(AttributePathStep::AttributeName(name.to_string()));
        self
    }

    pub fn index(mut self, idx: i64) -> Self {
        self.steps.push(AttributePathStep::ElementKeyInt(idx));
        self
    }

    pub fn key(mut self, key: &str) -> Self {
        self.steps
            .push(AttributePathStep::ElementKeyString(key.to_string()));
        self
    }

    pub fn value(mut self, value: Dynamic) -> Self {
        self.steps.push(AttributePathStep::ElementKeyValue(value));
        self
    }

    pub fn is_root(&self) -> bool {
        self.steps.is_empty()
    }

    /// Path without its last step. The parent of the root is the root.
    pub fn parent(&self) -> Self {
        let mut steps = self.steps.clone();
        steps.pop();
        Self { steps }
    }

    pub fn last_step(&self) -> Option<&AttributePathStep> {
        self.steps.last()
    }

    pub fn last_attribute_name(&self) -> Option<&str> {
        match self.steps.last() {
            Some(AttributePathStep::AttributeName(name)) => Some(name),
            _ => None,
        }
    }

    /// True when any step walks into a list element or a set element
    pub fn has_list_or_set_ancestor(&self) -> bool {
        self.steps.iter().any(|step| {
            matches!(
                step,
                AttributePathStep::ElementKeyInt(_) | AttributePathStep::ElementKeyValue(_)
            )
        })
    }
}

impl fmt::Display for AttributePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, step) in self.steps.iter().enumerate() {
            match step {
                AttributePathStep::AttributeName(name) => {
                    if idx > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{}", name)?;
                }
                AttributePathStep::ElementKeyString(key) => write!(f, "[{:?}]", key)?,
                AttributePathStep::ElementKeyInt(i) => write!(f, "[{}]", i)?,
                AttributePathStep::ElementKeyValue(value) => write!(f, "[Value({})]", value)?,
            }
        }
        Ok(())
    }
}
