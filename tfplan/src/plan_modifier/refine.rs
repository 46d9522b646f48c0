//! Modifiers that attach refinements to unknown plan values
//!
//! Each one only acts when the plan value is unknown and the configuration
//! value is not, i.e. when the provider computes the value itself.

use super::{PlanModifier, PlanModifierRequest, PlanModifierResponse};
use crate::types::AttrValue;
use crate::value::{Collection, Numeric};

fn should_refine<T: AttrValue>(request: &PlanModifierRequest<T>) -> bool {
    request.plan_value.is_unknown() && !request.config_value.is_unknown()
}

fn invalid_schema<T: AttrValue>(
    request: &PlanModifierRequest<T>,
    response: &mut PlanModifierResponse<T>,
    detail: String,
) {
    response.diagnostics.add_attribute_error(
        request.path.clone(),
        "Invalid Attribute Schema",
        format!(
            "{} This is always an issue with the provider and should be reported to the provider developers.\n\nPath: {}",
            detail, request.path
        ),
    );
}

/// The planned value will not be null once known
#[derive(Debug, Clone, Copy, Default)]
pub struct WillNotBeNull;

impl<T: AttrValue> PlanModifier<T> for WillNotBeNull {
    fn description(&self) -> String {
        "Promises Terraform that the value will not be null once it is known".to_string()
    }

    fn plan_modify(&self, request: &PlanModifierRequest<T>, response: &mut PlanModifierResponse<T>) {
        if !should_refine(request) {
            return;
        }
        response.plan_value = request.plan_value.refine_as_not_null();
    }
}

/// The planned string will start with a prefix once known
#[derive(Debug, Clone)]
pub struct WillHavePrefix {
    prefix: String,
}

impl WillHavePrefix {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl PlanModifier<String> for WillHavePrefix {
    fn description(&self) -> String {
        format!(
            "Promises Terraform that the value will start with {:?} once it is known",
            self.prefix
        )
    }

    fn markdown_description(&self) -> String {
        format!(
            "Promises Terraform that the value will start with `{}` once it is known",
            self.prefix
        )
    }

    fn plan_modify(
        &self,
        request: &PlanModifierRequest<String>,
        response: &mut PlanModifierResponse<String>,
    ) {
        if !should_refine(request) {
            return;
        }
        response.plan_value = request.plan_value.refine_with_prefix(&self.prefix);
    }
}

/// The planned number will be greater than or equal to `min` once known
#[derive(Debug, Clone)]
pub struct WillBeAtLeast<T> {
    min: T,
}

impl<T: Numeric> WillBeAtLeast<T> {
    pub fn new(min: T) -> Self {
        Self { min }
    }
}

impl<T: Numeric> PlanModifier<T> for WillBeAtLeast<T> {
    fn description(&self) -> String {
        format!(
            "Promises Terraform that the value will be at least {} once it is known",
            self.min.to_bound()
        )
    }

    fn plan_modify(&self, request: &PlanModifierRequest<T>, response: &mut PlanModifierResponse<T>) {
        if !should_refine(request) {
            return;
        }
        response.plan_value = request
            .plan_value
            .refine_with_lower_bound(self.min.clone(), true);
    }
}

/// The planned number will be less than or equal to `max` once known
#[derive(Debug, Clone)]
pub struct WillBeAtMost<T> {
    max: T,
}

impl<T: Numeric> WillBeAtMost<T> {
    pub fn new(max: T) -> Self {
        Self { max }
    }
}

impl<T: Numeric> PlanModifier<T> for WillBeAtMost<T> {
    fn description(&self) -> String {
        format!(
            "Promises Terraform that the value will be at most {} once it is known",
            self.max.to_bound()
        )
    }

    fn plan_modify(&self, request: &PlanModifierRequest<T>, response: &mut PlanModifierResponse<T>) {
        if !should_refine(request) {
            return;
        }
        response.plan_value = request
            .plan_value
            .refine_with_upper_bound(self.max.clone(), true);
    }
}

/// The planned number will fall inside `[min, max]` once known
#[derive(Debug, Clone)]
pub struct WillBeBetween<T> {
    min: T,
    max: T,
}

impl<T: Numeric> WillBeBetween<T> {
    pub fn new(min: T, max: T) -> Self {
        Self { min, max }
    }
}

impl<T: Numeric> PlanModifier<T> for WillBeBetween<T> {
    fn description(&self) -> String {
        format!(
            "Promises Terraform that the value will be between {} and {} once it is known",
            self.min.to_bound(),
            self.max.to_bound()
        )
    }

    fn plan_modify(&self, request: &PlanModifierRequest<T>, response: &mut PlanModifierResponse<T>) {
        if self.min > self.max {
            invalid_schema(
                request,
                response,
                format!(
                    "The WillBeBetween plan modifier was given a minimum ({}) greater than its maximum ({}).",
                    self.min.to_bound(),
                    self.max.to_bound()
                ),
            );
            return;
        }

        if !should_refine(request) {
            return;
        }
        response.plan_value = request
            .plan_value
            .refine_with_lower_bound(self.min.clone(), true)
            .refine_with_upper_bound(self.max.clone(), true);
    }
}

/// The planned collection will hold at least `min` elements once known
#[derive(Debug, Clone, Copy)]
pub struct WillHaveSizeAtLeast {
    min: i64,
}

impl WillHaveSizeAtLeast {
    pub fn new(min: i64) -> Self {
        Self { min }
    }
}

impl<T: Collection> PlanModifier<T> for WillHaveSizeAtLeast {
    fn description(&self) -> String {
        format!(
            "Promises Terraform that the collection will hold at least {} elements once it is known",
            self.min
        )
    }

    fn plan_modify(&self, request: &PlanModifierRequest<T>, response: &mut PlanModifierResponse<T>) {
        if self.min < 0 {
            invalid_schema(
                request,
                response,
                format!(
                    "The WillHaveSizeAtLeast plan modifier was given a negative size ({}).",
                    self.min
                ),
            );
            return;
        }

        if !should_refine(request) {
            return;
        }
        response.plan_value = request.plan_value.refine_with_length_lower_bound(self.min);
    }
}

/// The planned collection will hold at most `max` elements once known
#[derive(Debug, Clone, Copy)]
pub struct WillHaveSizeAtMost {
    max: i64,
}

impl WillHaveSizeAtMost {
    pub fn new(max: i64) -> Self {
        Self { max }
    }
}

impl<T: Collection> PlanModifier<T> for WillHaveSizeAtMost {
    fn description(&self) -> String {
        format!(
            "Promises Terraform that the collection will hold at most {} elements once it is known",
            self.max
        )
    }

    fn plan_modify(&self, request: &PlanModifierRequest<T>, response: &mut PlanModifierResponse<T>) {
        if self.max < 0 {
            invalid_schema(
                request,
                response,
                format!(
                    "The WillHaveSizeAtMost plan modifier was given a negative size ({}).",
                    self.max
                ),
            );
            return;
        }

        if !should_refine(request) {
            return;
        }
        response.plan_value = request.plan_value.refine_with_length_upper_bound(self.max);
    }
}

/// The planned collection size will fall inside `[min, max]` once known
#[derive(Debug, Clone, Copy)]
pub struct WillHaveSizeBetween {
    min: i64,
    max: i64,
}

impl WillHaveSizeBetween {
    pub fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }
}

impl<T: Collection> PlanModifier<T> for WillHaveSizeBetween {
    fn description(&self) -> String {
        format!(
            "Promises Terraform that the collection will hold between {} and {} elements once it is known",
            self.min, self.max
        )
    }

    fn plan_modify(&self, request: &PlanModifierRequest<T>, response: &mut PlanModifierResponse<T>) {
        if self.min < 0 || self.max < 0 || self.min > self.max {
            invalid_schema(
                request,
                response,
                format!(
                    "The WillHaveSizeBetween plan modifier was given an invalid range ({} to {}). \
                     Sizes must not be negative and the minimum must not exceed the maximum.",
                    self.min, self.max
                ),
            );
            return;
        }

        if !should_refine(request) {
            return;
        }
        response.plan_value = request
            .plan_value
            .refine_with_length_lower_bound(self.min)
            .refine_with_length_upper_bound(self.max);
    }
}
