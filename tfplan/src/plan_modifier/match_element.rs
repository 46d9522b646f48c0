use super::{PlanModifier, PlanModifierRequest, PlanModifierResponse};
use crate::path::{AttributePath, AttributePathStep};
use crate::types::{AttrValue, Dynamic};
use crate::value::Value;

const REPORT_TO_DEVELOPERS: &str =
    "This is always an issue with the provider and should be reported to the provider developers.";

/// Prior state lookup for computed attributes of list or set elements
///
/// Elements can be reordered, added or removed between plans, so the prior
/// value is taken from the state element whose identifying sibling
/// attributes equal the planned element's, not from the same index.
#[derive(Debug, Clone)]
pub struct MatchElementStateForUnknown {
    identifying_attributes: Vec<String>,
}

impl MatchElementStateForUnknown {
    /// `identifying_attributes` name configurable siblings within the same
    /// nested object, e.g. `["name"]`
    pub fn new<I, S>(identifying_attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            identifying_attributes: identifying_attributes.into_iter().map(Into::into).collect(),
        }
    }

    fn invalid_attribute_diag<T: AttrValue>(
        &self,
        response: &mut PlanModifierResponse<T>,
        path: &AttributePath,
        name: &str,
    ) {
        response.diagnostics.add_attribute_error(
            path.clone(),
            "Invalid Attribute Schema",
            format!(
                "The MatchElementStateForUnknown plan modifier was given an invalid identifying attribute. \
                 Identifying attributes must name a different, configurable attribute within the same nested object. {}\n\n\
                 Path: {}\nGiven Attribute: {}",
                REPORT_TO_DEVELOPERS, path, name
            ),
        );
    }
}

impl<T: AttrValue> PlanModifier<T> for MatchElementStateForUnknown {
    fn description(&self) -> String {
        "Once set, the value of this attribute in state will not change.".to_string()
    }

    fn plan_modify(&self, request: &PlanModifierRequest<T>, response: &mut PlanModifierResponse<T>) {
        let path = &request.path;

        if !path.has_list_or_set_ancestor() {
            response.diagnostics.add_attribute_error(
                path.clone(),
                "Invalid Attribute Schema",
                format!(
                    "The MatchElementStateForUnknown plan modifier is only intended for nested object attributes under a list or set. \
                     Use the UseStateForUnknown plan modifier instead. {}\n\nPath: {}",
                    REPORT_TO_DEVELOPERS, path
                ),
            );
            return;
        }

        if self.identifying_attributes.is_empty() {
            response.diagnostics.add_attribute_error(
                path.clone(),
                "Invalid Attribute Schema",
                format!(
                    "The MatchElementStateForUnknown plan modifier has no identifying attributes. \
                     At least one attribute name must be given for matching the prior state. {}\n\nPath: {}",
                    REPORT_TO_DEVELOPERS, path
                ),
            );
            return;
        }

        let element_path = path.parent();
        let own_name = match (path.last_attribute_name(), element_path.last_step()) {
            (
                Some(name),
                Some(AttributePathStep::ElementKeyInt(_) | AttributePathStep::ElementKeyValue(_)),
            ) => name,
            _ => {
                response.diagnostics.add_attribute_error(
                    path.clone(),
                    "Invalid Attribute Schema",
                    format!(
                        "The MatchElementStateForUnknown plan modifier must be attached directly to an attribute \
                         of a list or set nested object. {}\n\nPath: {}",
                        REPORT_TO_DEVELOPERS, path
                    ),
                );
                return;
            }
        };

        let mut identifying_values: Vec<(&str, &Dynamic)> =
            Vec::with_capacity(self.identifying_attributes.len());

        for name in &self.identifying_attributes {
            if name == own_name {
                self.invalid_attribute_diag(response, path, name);
                continue;
            }

            match request.plan.get(&element_path.clone().attribute(name)) {
                Ok(value) => identifying_values.push((name.as_str(), value)),
                Err(_) => self.invalid_attribute_diag(response, path, name),
            }
        }

        if response.diagnostics.has_error() {
            return;
        }

        // Wait until every identifying value is known
        if identifying_values.iter().any(|(_, value)| value.is_unknown()) {
            return;
        }

        if !request.plan_value.is_unknown() {
            return;
        }

        // Interpolated configuration must stay unknown
        if request.config_value.is_unknown() {
            return;
        }

        let collection_path = element_path.parent();
        let prior = match request.state.get_or_null(&collection_path) {
            Ok(prior) => prior,
            Err(e) => {
                response.diagnostics.add_attribute_error(
                    path.clone(),
                    "Prior State Read Error",
                    format!("Unable to read prior state at {}: {}", collection_path, e),
                );
                return;
            }
        };

        let Some(elements) = prior.as_elements() else {
            return;
        };

        // Attributes missing from a prior element never match, new identifying
        // attributes may not be in state yet
        let matched = elements
            .iter()
            .filter_map(Dynamic::as_attributes)
            .find(|attributes| {
                identifying_values
                    .iter()
                    .all(|(name, value)| attributes.get(*name) == Some(*value))
            })
            .and_then(|attributes| attributes.get(own_name));

        let Some(prior_value) = matched else {
            return;
        };

        if prior_value.is_null() {
            return;
        }

        match Value::<T>::from_dynamic(prior_value.clone()) {
            Ok(value) => response.plan_value = value,
            Err(e) => response.diagnostics.add_attribute_error(
                path.clone(),
                "Value Conversion Error",
                format!("Unable to convert the prior state value: {}", e),
            ),
        }
    }
}
