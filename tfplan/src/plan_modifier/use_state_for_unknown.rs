use super::{PlanModifier, PlanModifierRequest, PlanModifierResponse};
use crate::diagnostics::Diagnostics;
use crate::types::AttrValue;

const STATE_DESCRIPTION: &str = "Once set, the value of this attribute in state will not change.";

/// Copies the prior state value into an unknown plan value
///
/// Useful for computed attributes that never change once the resource exists,
/// so plans do not show them as "(known after apply)".
#[derive(Debug, Clone, Copy, Default)]
pub struct UseStateForUnknown;

impl<T: AttrValue> PlanModifier<T> for UseStateForUnknown {
    fn description(&self) -> String {
        STATE_DESCRIPTION.to_string()
    }

    fn plan_modify(&self, request: &PlanModifierRequest<T>, response: &mut PlanModifierResponse<T>) {
        // Elements of lists and sets can move between plans, so the prior
        // value at the same path may belong to a different element
        if request.path.has_list_or_set_ancestor() {
            response.diagnostics.add_attribute_error(
                request.path.clone(),
                "Invalid Attribute Schema",
                format!(
                    "The UseStateForUnknown plan modifier cannot be used on attributes \
                     nested under a list or set. Use MatchElementStateForUnknown instead. \
                     This is always an issue with the provider and should be reported to \
                     the provider developers.\n\nPath: {}",
                    request.path
                ),
            );
            return;
        }

        if !state_may_fill_unknown(request) {
            return;
        }

        response.plan_value = request.state_value.clone();
    }
}

/// Like [`UseStateForUnknown`] but never plans a null prior value, and
/// allowed under lists and sets
#[derive(Debug, Clone, Copy, Default)]
pub struct UseNonNullStateForUnknown;

impl<T: AttrValue> PlanModifier<T> for UseNonNullStateForUnknown {
    fn description(&self) -> String {
        STATE_DESCRIPTION.to_string()
    }

    fn plan_modify(&self, request: &PlanModifierRequest<T>, response: &mut PlanModifierResponse<T>) {
        if !state_may_fill_unknown(request) || request.state_value.is_null() {
            return;
        }

        response.plan_value = request.state_value.clone();
    }
}

/// Checks shared by the UseStateForUnknown family
fn state_may_fill_unknown<T: AttrValue>(request: &PlanModifierRequest<T>) -> bool {
    // Creation
    if request.state.is_null() {
        return false;
    }

    if !request.plan_value.is_unknown() {
        return false;
    }

    // Interpolated configuration must stay unknown
    !request.config_value.is_unknown()
}

/// Output of a [`UseStateForUnknownIf`] condition
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UseStateForUnknownIfFuncResponse {
    pub use_state: bool,
    pub diagnostics: Diagnostics,
}

type UseStateForUnknownIfFunc<T> =
    dyn Fn(&PlanModifierRequest<T>, &mut UseStateForUnknownIfFuncResponse) + Send + Sync;

/// Copies the prior state value into an unknown plan value when the
/// condition agrees
pub struct UseStateForUnknownIf<T> {
    func: Box<UseStateForUnknownIfFunc<T>>,
    description: String,
    markdown_description: String,
}

impl<T: AttrValue> UseStateForUnknownIf<T> {
    pub fn new<F>(
        func: F,
        description: impl Into<String>,
        markdown_description: impl Into<String>,
    ) -> Self
    where
        F: Fn(&PlanModifierRequest<T>, &mut UseStateForUnknownIfFuncResponse)
            + Send
            + Sync
            + 'static,
    {
        Self {
            func: Box::new(func),
            description: description.into(),
            markdown_description: markdown_description.into(),
        }
    }
}

impl<T: AttrValue> PlanModifier<T> for UseStateForUnknownIf<T> {
    fn description(&self) -> String {
        self.description.clone()
    }

    fn markdown_description(&self) -> String {
        self.markdown_description.clone()
    }

    fn plan_modify(&self, request: &PlanModifierRequest<T>, response: &mut PlanModifierResponse<T>) {
        if !state_may_fill_unknown(request) {
            return;
        }

        let mut func_response = UseStateForUnknownIfFuncResponse::default();
        (self.func)(request, &mut func_response);
        response.diagnostics.extend(func_response.diagnostics);

        if func_response.use_state {
            response.plan_value = request.state_value.clone();
        }
    }
}
