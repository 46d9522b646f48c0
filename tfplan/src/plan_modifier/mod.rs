//! Attribute plan modifiers
//!
//! Plan modifiers run after Terraform has generated a plan and can:
//! - Modify the planned value
//! - Mark the resource as requiring replacement
//! - Add warnings or errors to the plan
//!
//! Every modifier shares one call contract: it receives a
//! [`PlanModifierRequest`] and mutates a [`PlanModifierResponse`] that starts
//! out as a copy of the request's plan value.

mod match_element;
mod refine;
mod requires_replace;
mod use_state_for_unknown;

pub use match_element::MatchElementStateForUnknown;
pub use refine::{
    WillBeAtLeast, WillBeAtMost, WillBeBetween, WillHavePrefix, WillHaveSizeAtLeast,
    WillHaveSizeAtMost, WillHaveSizeBetween, WillNotBeNull,
};
pub use requires_replace::{
    requires_replace, requires_replace_if_configured, RequiresReplaceIf,
    RequiresReplaceIfFuncResponse,
};
pub use use_state_for_unknown::{
    UseNonNullStateForUnknown, UseStateForUnknown, UseStateForUnknownIf,
    UseStateForUnknownIfFuncResponse,
};

use crate::diagnostics::Diagnostics;
use crate::path::{AttributePath, AttributePathStep};
use crate::types::{AttrValue, Dynamic, DynamicValue, PrivateStateData};
use crate::value::Value;
use std::collections::HashMap;

/// Trait for attribute plan modifiers over payload type `T`
pub trait PlanModifier<T: AttrValue>: Send + Sync {
    /// Plain text description, used in documentation and logs
    fn description(&self) -> String;

    fn markdown_description(&self) -> String {
        self.description()
    }

    fn plan_modify(&self, request: &PlanModifierRequest<T>, response: &mut PlanModifierResponse<T>);
}

#[derive(Debug, Clone)]
pub struct PlanModifierRequest<T> {
    pub path: AttributePath,
    /// Whole-resource configuration
    pub config: DynamicValue,
    /// Whole-resource proposed new state, null when the resource is destroyed
    pub plan: DynamicValue,
    /// Whole-resource prior state, null when the resource is created
    pub state: DynamicValue,
    pub config_value: Value<T>,
    pub plan_value: Value<T>,
    pub state_value: Value<T>,
    pub private: PrivateStateData,
    pub write_only: bool,
}

impl<T: AttrValue> PlanModifierRequest<T> {
    /// Builds a request for an update of an existing resource, with the
    /// attribute values placed at `path` inside otherwise empty resource data
    pub fn new(
        path: AttributePath,
        config_value: Value<T>,
        plan_value: Value<T>,
        state_value: Value<T>,
    ) -> Self {
        Self {
            config: resource_with(&path, config_value.to_dynamic()),
            plan: resource_with(&path, plan_value.to_dynamic()),
            state: resource_with(&path, state_value.to_dynamic()),
            path,
            config_value,
            plan_value,
            state_value,
            private: PrivateStateData::new(),
            write_only: false,
        }
    }

    /// Marks the request as a resource creation: no prior state exists
    pub fn creating(mut self) -> Self {
        self.state = DynamicValue::null();
        self.state_value = Value::Null;
        self
    }

    /// Marks the request as a resource destruction: no plan exists
    pub fn destroying(mut self) -> Self {
        self.plan = DynamicValue::null();
        self.plan_value = Value::Null;
        self
    }

    pub fn write_only(mut self) -> Self {
        self.write_only = true;
        self
    }

    pub fn with_resource_data(
        mut self,
        config: DynamicValue,
        plan: DynamicValue,
        state: DynamicValue,
    ) -> Self {
        self.config = config;
        self.plan = plan;
        self.state = state;
        self
    }

    pub fn with_private(mut self, private: PrivateStateData) -> Self {
        self.private = private;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlanModifierResponse<T> {
    pub plan_value: Value<T>,
    pub requires_replace: bool,
    pub private: PrivateStateData,
    pub diagnostics: Diagnostics,
}

impl<T: AttrValue> PlanModifierResponse<T> {
    /// Response seeded the way every modifier expects to find it
    pub fn from_request(request: &PlanModifierRequest<T>) -> Self {
        Self {
            plan_value: request.plan_value.clone(),
            requires_replace: false,
            private: request.private.clone(),
            diagnostics: Diagnostics::new(),
        }
    }
}

/// Builds resource data holding only `value` at `path`
fn resource_with(path: &AttributePath, value: Dynamic) -> DynamicValue {
    let mut current = value;
    for step in path.steps.iter().rev() {
        current = match step {
            AttributePathStep::AttributeName(name) => {
                Dynamic::Object(HashMap::from([(name.clone(), current)]))
            }
            AttributePathStep::ElementKeyString(key) => {
                Dynamic::Map(HashMap::from([(key.clone(), current)]))
            }
            AttributePathStep::ElementKeyInt(idx) => {
                let mut elements = vec![Dynamic::Null; usize::try_from(*idx).unwrap_or(0)];
                elements.push(current);
                Dynamic::List(elements)
            }
            AttributePathStep::ElementKeyValue(_) => Dynamic::Set(vec![current]),
        };
    }
    DynamicValue::new(current)
}

/// Runs a single modifier against a request, returning the response
pub fn run_plan_modifier<T, M>(modifier: &M, request: &PlanModifierRequest<T>) -> PlanModifierResponse<T>
where
    T: AttrValue,
    M: PlanModifier<T> + ?Sized,
{
    let mut response = PlanModifierResponse::from_request(request);
    modifier.plan_modify(request, &mut response);
    response
}
