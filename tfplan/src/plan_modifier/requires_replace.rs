use super::{PlanModifier, PlanModifierRequest, PlanModifierResponse};
use crate::diagnostics::Diagnostics;
use crate::types::AttrValue;

/// Output of a [`RequiresReplaceIf`] condition
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequiresReplaceIfFuncResponse {
    pub requires_replace: bool,
    pub diagnostics: Diagnostics,
}

type RequiresReplaceIfFunc<T> =
    dyn Fn(&PlanModifierRequest<T>, &mut RequiresReplaceIfFuncResponse) + Send + Sync;

/// Marks the resource for replacement when the attribute changes and the
/// given condition agrees
///
/// The condition is never consulted on resource creation or destruction, nor
/// when the planned value equals the prior state. Write-only attributes are
/// always null in plan and state, so for them only a null configuration
/// short-circuits.
pub struct RequiresReplaceIf<T> {
    func: Box<RequiresReplaceIfFunc<T>>,
    description: String,
    markdown_description: String,
}

impl<T: AttrValue> RequiresReplaceIf<T> {
    pub fn new<F>(
        func: F,
        description: impl Into<String>,
        markdown_description: impl Into<String>,
    ) -> Self
    where
        F: Fn(&PlanModifierRequest<T>, &mut RequiresReplaceIfFuncResponse) + Send + Sync + 'static,
    {
        Self {
            func: Box::new(func),
            description: description.into(),
            markdown_description: markdown_description.into(),
        }
    }
}

impl<T: AttrValue> PlanModifier<T> for RequiresReplaceIf<T> {
    fn description(&self) -> String {
        self.description.clone()
    }

    fn markdown_description(&self) -> String {
        self.markdown_description.clone()
    }

    fn plan_modify(&self, request: &PlanModifierRequest<T>, response: &mut PlanModifierResponse<T>) {
        // Creation
        if request.state.is_null() {
            return;
        }

        // Destruction
        if request.plan.is_null() {
            return;
        }

        if request.write_only {
            if request.config_value.is_null() {
                return;
            }
        } else if request.plan_value == request.state_value {
            return;
        }

        let mut func_response = RequiresReplaceIfFuncResponse::default();
        (self.func)(request, &mut func_response);

        response.diagnostics.extend(func_response.diagnostics);
        response.requires_replace = func_response.requires_replace;
    }
}

/// Replacement whenever the value changes
pub fn requires_replace<T: AttrValue>() -> RequiresReplaceIf<T> {
    let description =
        "If the value of this attribute changes, Terraform will destroy and recreate the resource.";
    RequiresReplaceIf::new(
        |_, response| response.requires_replace = true,
        description,
        description,
    )
}

/// Replacement when the value changes while configured; moving to an
/// unconfigured value keeps the resource
pub fn requires_replace_if_configured<T: AttrValue>() -> RequiresReplaceIf<T> {
    let description = "If the value of this attribute is configured and changes, Terraform will destroy and recreate the resource.";
    RequiresReplaceIf::new(
        |request: &PlanModifierRequest<T>, response| {
            response.requires_replace = !request.config_value.is_underlying_null();
        },
        description,
        description,
    )
}
