//! Attribute plan runner
//!
//! Applies defaults and chains plan modifiers for every attribute of a
//! schema, the way a host runtime would during resource planning.

use crate::defaults::DefaultRequest;
use crate::diagnostics::Diagnostics;
use crate::path::AttributePath;
use crate::plan_modifier::{PlanModifierRequest, PlanModifierResponse};
use crate::schema::{Attribute, NestedAttribute, NestingMode, Schema, SchemaAttribute};
use crate::types::{AttrValue, Config, Dynamic, DynamicValue, Plan, PrivateStateData, State};
use crate::value::Value;

/// Resource-wide data shared by all attributes during one plan run
pub struct PlanContext<'a> {
    pub config: &'a DynamicValue,
    /// Proposed new state as received, before any modification
    pub plan: &'a DynamicValue,
    pub state: &'a DynamicValue,
    pub private: PrivateStateData,
    pub requires_replace: Vec<AttributePath>,
    pub diagnostics: Diagnostics,
}

/// Raw values of one attribute; missing data is null
#[derive(Debug, Clone)]
pub struct AttributeValues {
    pub path: AttributePath,
    pub config: Dynamic,
    pub plan: Dynamic,
    pub state: Dynamic,
}

/// Outcome of planning a whole resource
#[derive(Debug, Clone)]
pub struct SchemaPlanResponse {
    pub plan: DynamicValue,
    /// Attributes whose change forces the resource to be replaced
    pub requires_replace: Vec<AttributePath>,
    pub private: PrivateStateData,
    pub diagnostics: Diagnostics,
}

impl<T: AttrValue> Attribute<T> {
    /// Applies the default and then every plan modifier in order
    ///
    /// Each modifier sees the plan value and private data left by the
    /// previous one. Replacement is sticky once requested, and the chain
    /// stops at the first modifier reporting an error.
    pub fn modify_plan(&self, mut request: PlanModifierRequest<T>) -> PlanModifierResponse<T> {
        let mut diagnostics = Diagnostics::new();

        if !request.plan.is_null() && request.config_value.is_null() {
            if let Some(default) = &self.default {
                tracing::debug!(
                    "Applying default for {}: {}",
                    request.path,
                    default.description()
                );

                let default_response = default.default_value(&DefaultRequest {
                    path: request.path.clone(),
                });
                let failed = default_response.diagnostics.has_error();
                diagnostics.extend(default_response.diagnostics);

                if failed {
                    return PlanModifierResponse {
                        plan_value: request.plan_value,
                        requires_replace: false,
                        private: request.private,
                        diagnostics,
                    };
                }

                request.plan_value = default_response.value;
            }
        }

        let mut response = PlanModifierResponse {
            plan_value: request.plan_value.clone(),
            requires_replace: false,
            private: request.private.clone(),
            diagnostics,
        };

        for modifier in &self.plan_modifiers {
            let modifier_request = PlanModifierRequest {
                plan_value: response.plan_value.clone(),
                private: response.private.clone(),
                ..request.clone()
            };
            let mut modifier_response = PlanModifierResponse::from_request(&modifier_request);

            tracing::debug!(
                "Calling plan modifier for {}: {}",
                request.path,
                modifier.description()
            );
            modifier.plan_modify(&modifier_request, &mut modifier_response);
            if self.sensitive {
                tracing::trace!(
                    "Plan modifier for {} returned a sensitive plan value, requires replace: {}",
                    request.path,
                    modifier_response.requires_replace
                );
            } else {
                tracing::trace!(
                    "Plan modifier for {} returned plan value {}, requires replace: {}",
                    request.path,
                    modifier_response.plan_value,
                    modifier_response.requires_replace
                );
            }

            response.plan_value = modifier_response.plan_value;
            response.private = modifier_response.private;
            response.requires_replace |= modifier_response.requires_replace;
            response.diagnostics.extend(modifier_response.diagnostics);

            if response.diagnostics.has_error() {
                break;
            }
        }

        response
    }
}

impl<T: AttrValue> SchemaAttribute for Attribute<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn validate_implementation(&self, path: &AttributePath) -> Diagnostics {
        Attribute::validate_implementation(self, path)
    }

    fn modify_plan_value(&self, values: AttributeValues, context: &mut PlanContext<'_>) -> Dynamic {
        let AttributeValues {
            path,
            config,
            plan,
            state,
        } = values;

        let converted = (
            Value::<T>::from_dynamic(config),
            Value::<T>::from_dynamic(plan.clone()),
            Value::<T>::from_dynamic(state),
        );
        let (config_value, plan_value, state_value) = match converted {
            (Ok(c), Ok(p), Ok(s)) => (c, p, s),
            (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => {
                context.diagnostics.add_attribute_error(
                    path.clone(),
                    "Value Conversion Error",
                    format!("Unable to read {} attribute {}: {}", T::TYPE_NAME, path, e),
                );
                return plan;
            }
        };

        let request = PlanModifierRequest {
            path: path.clone(),
            config: context.config.clone(),
            plan: context.plan.clone(),
            state: context.state.clone(),
            config_value,
            plan_value,
            state_value,
            private: context.private.clone(),
            write_only: self.write_only,
        };

        let response = self.modify_plan(request);

        context.diagnostics.extend(response.diagnostics);
        context.private = response.private;
        if response.requires_replace {
            tracing::debug!("Attribute {} requires replacement", path);
            context.requires_replace.push(path);
        }

        response.plan_value.to_dynamic()
    }
}

impl SchemaAttribute for NestedAttribute {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn validate_implementation(&self, path: &AttributePath) -> Diagnostics {
        NestedAttribute::validate_implementation(self, path)
    }

    fn modify_plan_value(&self, values: AttributeValues, context: &mut PlanContext<'_>) -> Dynamic {
        let AttributeValues {
            path,
            config,
            plan,
            state,
        } = values;

        // Nothing to descend into
        if plan.is_null() || plan.is_unknown() {
            return plan;
        }

        match (self.nesting, &plan) {
            (NestingMode::Single, Dynamic::Object(_)) => {
                modify_object(&self.attributes, &path, &config, &plan, &state, context)
            }
            (NestingMode::List, Dynamic::List(elements)) => {
                let mut planned = Vec::with_capacity(elements.len());
                for (idx, element) in elements.iter().enumerate() {
                    let element_path = path.clone().index(idx as i64);
                    planned.push(modify_object(
                        &self.attributes,
                        &element_path,
                        &element_at(&config, idx),
                        element,
                        &element_at(&state, idx),
                        context,
                    ));
                }
                Dynamic::List(planned)
            }
            (NestingMode::Set, Dynamic::Set(elements) | Dynamic::List(elements)) => {
                // Set elements pair with config and state by position
                let mut planned = Vec::with_capacity(elements.len());
                for (idx, element) in elements.iter().enumerate() {
                    let element_path = path.clone().value(element.clone());
                    planned.push(modify_object(
                        &self.attributes,
                        &element_path,
                        &element_at(&config, idx),
                        element,
                        &element_at(&state, idx),
                        context,
                    ));
                }
                Dynamic::Set(planned)
            }
            (NestingMode::Map, Dynamic::Map(entries) | Dynamic::Object(entries)) => {
                let mut planned = entries.clone();
                for (key, element) in entries {
                    let element_path = path.clone().key(key);
                    let modified = modify_object(
                        &self.attributes,
                        &element_path,
                        &map_entry(&config, key),
                        element,
                        &map_entry(&state, key),
                        context,
                    );
                    planned.insert(key.clone(), modified);
                }
                Dynamic::Map(planned)
            }
            (nesting, other) => {
                context.diagnostics.add_attribute_error(
                    path.clone(),
                    "Value Conversion Error",
                    format!(
                        "Nested attribute {} expects {:?} nesting but the plan holds a {} value",
                        path,
                        nesting,
                        other.type_name()
                    ),
                );
                plan
            }
        }
    }
}

fn element_at(value: &Dynamic, idx: usize) -> Dynamic {
    value
        .as_elements()
        .and_then(|elements| elements.get(idx))
        .cloned()
        .unwrap_or(Dynamic::Null)
}

fn map_entry(value: &Dynamic, key: &str) -> Dynamic {
    match value {
        Dynamic::Map(entries) | Dynamic::Object(entries) => {
            entries.get(key).cloned().unwrap_or(Dynamic::Null)
        }
        _ => Dynamic::Null,
    }
}

/// Runs `attributes` against one object and returns the planned object
fn modify_object(
    attributes: &[Box<dyn SchemaAttribute>],
    parent_path: &AttributePath,
    config: &Dynamic,
    plan: &Dynamic,
    state: &Dynamic,
    context: &mut PlanContext<'_>,
) -> Dynamic {
    let Some(planned_attributes) = plan.as_attributes() else {
        return plan.clone();
    };

    let mut planned = planned_attributes.clone();
    for attr in attributes {
        let name = attr.name();
        let values = AttributeValues {
            path: parent_path.clone().attribute(name),
            config: map_entry(config, name),
            plan: planned_attributes.get(name).cloned().unwrap_or(Dynamic::Null),
            state: map_entry(state, name),
        };
        let modified = attr.modify_plan_value(values, context);
        planned.insert(name.to_string(), modified);
    }

    match plan {
        Dynamic::Map(_) => Dynamic::Map(planned),
        _ => Dynamic::Object(planned),
    }
}

impl Schema {
    /// Runs defaults and plan modifiers for every attribute of a resource
    ///
    /// A destroyed resource (null plan) is returned unchanged. Other
    /// attributes still run when one of them reports an error.
    pub fn modify_plan(
        &self,
        config: &Config,
        plan: &Plan,
        state: &State,
        private: PrivateStateData,
    ) -> SchemaPlanResponse {
        if plan.is_null() {
            tracing::debug!("Resource is being destroyed, skipping plan modification");
            return SchemaPlanResponse {
                plan: plan.clone(),
                requires_replace: Vec::new(),
                private,
                diagnostics: Diagnostics::new(),
            };
        }

        let mut context = PlanContext {
            config,
            plan,
            state,
            private,
            requires_replace: Vec::new(),
            diagnostics: Diagnostics::new(),
        };

        let planned = modify_object(
            &self.attributes,
            &AttributePath::root(),
            &config.value,
            &plan.value,
            &state.value,
            &mut context,
        );

        tracing::debug!(
            "Plan modification finished with {} diagnostics and {} replacement paths",
            context.diagnostics.len(),
            context.requires_replace.len()
        );

        SchemaPlanResponse {
            plan: DynamicValue::new(planned),
            requires_replace: context.requires_replace,
            private: context.private,
            diagnostics: context.diagnostics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::{static_int64, static_string, EnvDefault};
    use crate::plan_modifier::{
        requires_replace, PlanModifier, UseNonNullStateForUnknown, UseStateForUnknown,
        WillHavePrefix, WillNotBeNull,
    };
    use crate::schema::{AttributeBuilder, NestedAttributeBuilder, SchemaBuilder};
    use crate::value::{Int64Value, StringValue};
    use serial_test::serial;

    /// Writes a private key, used to check private data flows between modifiers
    struct RecordPrivate;

    impl PlanModifier<String> for RecordPrivate {
        fn description(&self) -> String {
            "records private data".to_string()
        }

        fn plan_modify(
            &self,
            _request: &PlanModifierRequest<String>,
            response: &mut PlanModifierResponse<String>,
        ) {
            response.private.set_key("seen", b"1".to_vec());
        }
    }

    /// Plans a known value only when the private key is present
    struct RequirePrivate;

    impl PlanModifier<String> for RequirePrivate {
        fn description(&self) -> String {
            "requires private data".to_string()
        }

        fn plan_modify(
            &self,
            request: &PlanModifierRequest<String>,
            response: &mut PlanModifierResponse<String>,
        ) {
            if request.private.get_key("seen").is_some() {
                response.plan_value = StringValue::from("from-private");
            }
        }
    }

    struct Failing;

    impl PlanModifier<String> for Failing {
        fn description(&self) -> String {
            "always fails".to_string()
        }

        fn plan_modify(
            &self,
            request: &PlanModifierRequest<String>,
            response: &mut PlanModifierResponse<String>,
        ) {
            response
                .diagnostics
                .add_attribute_error(request.path.clone(), "Failed", "modifier failed");
        }
    }

    fn string_request(config: StringValue, plan: StringValue, state: StringValue) -> PlanModifierRequest<String> {
        PlanModifierRequest::new(AttributePath::new("test"), config, plan, state)
    }

    #[test]
    fn default_applies_when_config_is_null() {
        let attr = AttributeBuilder::<i64>::new("port")
            .optional()
            .computed()
            .default(static_int64(443))
            .build();

        let request = PlanModifierRequest::new(
            AttributePath::new("port"),
            Int64Value::null(),
            Int64Value::unknown(),
            Int64Value::null(),
        )
        .creating();
        assert_eq!(attr.modify_plan(request).plan_value, Int64Value::known(443));

        let configured = PlanModifierRequest::new(
            AttributePath::new("port"),
            Int64Value::known(80),
            Int64Value::known(80),
            Int64Value::null(),
        );
        assert_eq!(attr.modify_plan(configured).plan_value, Int64Value::known(80));
    }

    #[test]
    fn default_is_skipped_on_destroy() {
        let attr = AttributeBuilder::<String>::new("test")
            .optional()
            .computed()
            .default(static_string("x"))
            .build();

        let request = string_request(StringValue::null(), StringValue::null(), "old".into()).destroying();
        assert!(attr.modify_plan(request).plan_value.is_null());
    }

    #[test]
    #[serial]
    fn default_warning_is_kept() {
        std::env::remove_var("TFPLAN_PLAN_TEST_UNSET");
        let attr = AttributeBuilder::<String>::new("test")
            .optional()
            .computed()
            .default(EnvDefault::create_required("TFPLAN_PLAN_TEST_UNSET"))
            .plan_modifier(WillNotBeNull)
            .build();

        let response = attr.modify_plan(string_request(
            StringValue::null(),
            StringValue::unknown(),
            StringValue::null(),
        ));
        assert!(response.plan_value.is_null());
        assert_eq!(response.diagnostics.warnings().len(), 1);
    }

    #[test]
    fn sensitive_attribute_is_planned_normally() {
        let attr = AttributeBuilder::<String>::new("password")
            .optional()
            .computed()
            .sensitive()
            .plan_modifier(UseStateForUnknown)
            .build();
        assert!(attr.sensitive);

        let response = attr.modify_plan(string_request(
            StringValue::null(),
            StringValue::unknown(),
            "hunter2".into(),
        ));
        assert_eq!(response.plan_value, StringValue::known("hunter2".to_string()));
    }

    #[test]
    fn modifiers_chain_plan_values() {
        let attr = AttributeBuilder::<String>::new("test")
            .computed()
            .plan_modifier(UseStateForUnknown)
            .plan_modifier(WillHavePrefix::new("id-"))
            .build();

        // State fills the unknown, so the prefix modifier sees a known value
        let response = attr.modify_plan(string_request(
            StringValue::null(),
            StringValue::unknown(),
            "id-123".into(),
        ));
        assert_eq!(response.plan_value, StringValue::from("id-123"));

        // On creation the prefix refinement applies
        let response = attr.modify_plan(
            string_request(StringValue::null(), StringValue::unknown(), StringValue::null()).creating(),
        );
        assert_eq!(response.plan_value.prefix_refinement(), Some("id-"));
    }

    #[test]
    fn requires_replace_is_sticky() {
        let attr = AttributeBuilder::<String>::new("test")
            .required()
            .plan_modifier(requires_replace())
            .plan_modifier(RecordPrivate)
            .build();

        let response = attr.modify_plan(string_request("new".into(), "new".into(), "old".into()));
        assert!(response.requires_replace);
    }

    #[test]
    fn private_data_flows_between_modifiers() {
        let attr = AttributeBuilder::<String>::new("test")
            .computed()
            .plan_modifier(RecordPrivate)
            .plan_modifier(RequirePrivate)
            .build();

        let response = attr.modify_plan(string_request(
            StringValue::null(),
            StringValue::unknown(),
            StringValue::null(),
        ));
        assert_eq!(response.plan_value, StringValue::from("from-private"));
        assert_eq!(response.private.get_key("seen"), Some(&b"1"[..]));
    }

    #[test]
    fn chain_stops_at_first_error() {
        let attr = AttributeBuilder::<String>::new("test")
            .computed()
            .plan_modifier(Failing)
            .plan_modifier(RecordPrivate)
            .build();

        let response = attr.modify_plan(string_request(
            StringValue::null(),
            StringValue::unknown(),
            StringValue::null(),
        ));
        assert!(response.diagnostics.has_error());
        assert!(response.private.is_empty());
    }

    fn resource(attrs: Vec<(&str, Dynamic)>) -> DynamicValue {
        DynamicValue::new(Dynamic::object(attrs))
    }

    fn test_schema() -> Schema {
        SchemaBuilder::new()
            .attribute(
                AttributeBuilder::<String>::new("id")
                    .computed()
                    .plan_modifier(UseStateForUnknown)
                    .build(),
            )
            .attribute(
                AttributeBuilder::<String>::new("name")
                    .required()
                    .plan_modifier(requires_replace())
                    .build(),
            )
            .attribute(
                AttributeBuilder::<i64>::new("port")
                    .optional()
                    .computed()
                    .default(static_int64(8080))
                    .build(),
            )
            .build()
    }

    #[test]
    fn schema_plan_updates_resource() {
        let schema = test_schema();

        let config = resource(vec![
            ("id", Dynamic::Null),
            ("name", Dynamic::from("web-2")),
            ("port", Dynamic::Null),
        ]);
        let plan = resource(vec![
            ("id", Dynamic::unknown()),
            ("name", Dynamic::from("web-2")),
            ("port", Dynamic::unknown()),
        ]);
        let state = resource(vec![
            ("id", Dynamic::from("i-1")),
            ("name", Dynamic::from("web-1")),
            ("port", Dynamic::from(8080_i64)),
        ]);

        let response = schema.modify_plan(&config, &plan, &state, PrivateStateData::new());

        assert!(response.diagnostics.is_empty());
        assert_eq!(response.plan.get_string(&AttributePath::new("id")).unwrap(), "i-1");
        assert_eq!(response.plan.get_number(&AttributePath::new("port")).unwrap(), 8080.0);
        assert_eq!(response.requires_replace, vec![AttributePath::new("name")]);
    }

    #[test]
    fn schema_plan_leaves_destroy_alone() {
        let schema = test_schema();
        let state = resource(vec![("id", Dynamic::from("i-1"))]);

        let response = schema.modify_plan(
            &DynamicValue::null(),
            &DynamicValue::null(),
            &state,
            PrivateStateData::new(),
        );
        assert!(response.plan.is_null());
        assert!(response.requires_replace.is_empty());
    }

    #[test]
    fn schema_plan_reports_type_mismatch() {
        let schema = test_schema();
        let plan = resource(vec![("id", Dynamic::from(1_i64)), ("name", Dynamic::from("a"))]);

        let response = schema.modify_plan(&plan, &plan, &DynamicValue::null(), PrivateStateData::new());
        assert_eq!(response.diagnostics.errors().len(), 1);
        assert_eq!(
            response.diagnostics.errors()[0].attribute,
            Some(AttributePath::new("id"))
        );
    }

    #[test]
    fn nested_list_elements_are_planned() {
        let schema = SchemaBuilder::new()
            .attribute(
                NestedAttributeBuilder::new("rules", NestingMode::List)
                    .optional()
                    .attribute(AttributeBuilder::<String>::new("name").required().build())
                    .attribute(
                        AttributeBuilder::<i64>::new("port")
                            .optional()
                            .computed()
                            .default(static_int64(443))
                            .build(),
                    )
                    .build(),
            )
            .build();

        let rule = |name: &str, port: Dynamic| Dynamic::object([("name", Dynamic::from(name)), ("port", port)]);
        let config = resource(vec![(
            "rules",
            Dynamic::List(vec![rule("a", Dynamic::Null), rule("b", Dynamic::from(80_i64))]),
        )]);
        let plan = resource(vec![(
            "rules",
            Dynamic::List(vec![rule("a", Dynamic::unknown()), rule("b", Dynamic::from(80_i64))]),
        )]);

        let response = schema.modify_plan(&config, &plan, &DynamicValue::null(), PrivateStateData::new());

        assert!(response.diagnostics.is_empty());
        let port = |idx: i64| {
            response
                .plan
                .get_number(&AttributePath::new("rules").index(idx).attribute("port"))
                .unwrap()
        };
        assert_eq!(port(0), 443.0);
        assert_eq!(port(1), 80.0);
    }

    fn set_rules_schema() -> Schema {
        SchemaBuilder::new()
            .attribute(
                NestedAttributeBuilder::new("rules", NestingMode::Set)
                    .optional()
                    .attribute(
                        AttributeBuilder::<String>::new("name")
                            .required()
                            .plan_modifier(requires_replace())
                            .build(),
                    )
                    .attribute(
                        AttributeBuilder::<i64>::new("port")
                            .optional()
                            .computed()
                            .default(static_int64(443))
                            .build(),
                    )
                    .attribute(
                        AttributeBuilder::<String>::new("id")
                            .computed()
                            .plan_modifier(UseNonNullStateForUnknown)
                            .build(),
                    )
                    .build(),
            )
            .build()
    }

    fn set_rule(name: &str, port: Dynamic, id: Dynamic) -> Dynamic {
        Dynamic::object([("name", Dynamic::from(name)), ("port", port), ("id", id)])
    }

    fn planned_rules(response: &SchemaPlanResponse) -> Vec<Dynamic> {
        response
            .plan
            .get(&AttributePath::new("rules"))
            .unwrap()
            .as_elements()
            .unwrap()
            .to_vec()
    }

    #[test]
    fn nested_set_keeps_configured_values() {
        let schema = set_rules_schema();
        let config = resource(vec![(
            "rules",
            Dynamic::Set(vec![
                set_rule("a", Dynamic::from(80_i64), Dynamic::Null),
                set_rule("b", Dynamic::Null, Dynamic::Null),
            ]),
        )]);
        let plan = resource(vec![(
            "rules",
            Dynamic::Set(vec![
                set_rule("a", Dynamic::from(80_i64), Dynamic::unknown()),
                set_rule("b", Dynamic::unknown(), Dynamic::unknown()),
            ]),
        )]);

        let response = schema.modify_plan(&config, &plan, &DynamicValue::null(), PrivateStateData::new());

        assert!(response.diagnostics.is_empty(), "{:?}", response.diagnostics);
        assert!(response.requires_replace.is_empty());
        let rules = planned_rules(&response);
        assert_eq!(rules[0].as_attributes().unwrap()["port"], Dynamic::from(80_i64));
        assert_eq!(rules[1].as_attributes().unwrap()["port"], Dynamic::from(443_i64));
        assert!(rules[0].as_attributes().unwrap()["id"].is_unknown());
    }

    #[test]
    fn nested_set_unchanged_element_is_not_replaced() {
        let schema = set_rules_schema();
        let config = resource(vec![(
            "rules",
            Dynamic::Set(vec![set_rule("a", Dynamic::from(80_i64), Dynamic::Null)]),
        )]);
        let plan = resource(vec![(
            "rules",
            Dynamic::Set(vec![set_rule("a", Dynamic::from(80_i64), Dynamic::unknown())]),
        )]);
        let state = resource(vec![(
            "rules",
            Dynamic::Set(vec![set_rule("a", Dynamic::from(80_i64), Dynamic::from("r-1"))]),
        )]);

        let response = schema.modify_plan(&config, &plan, &state, PrivateStateData::new());

        assert!(response.diagnostics.is_empty(), "{:?}", response.diagnostics);
        assert!(response.requires_replace.is_empty());
        let rules = planned_rules(&response);
        assert_eq!(rules[0].as_attributes().unwrap()["id"], Dynamic::from("r-1"));
        assert_eq!(rules[0].as_attributes().unwrap()["port"], Dynamic::from(80_i64));
    }

    #[test]
    fn nested_single_and_map_objects() {
        let inner = || {
            AttributeBuilder::<String>::new("mode")
                .optional()
                .computed()
                .default(static_string("auto"))
                .build()
        };
        let schema = SchemaBuilder::new()
            .attribute(
                NestedAttributeBuilder::new("settings", NestingMode::Single)
                    .optional()
                    .attribute(inner())
                    .build(),
            )
            .attribute(
                NestedAttributeBuilder::new("disks", NestingMode::Map)
                    .optional()
                    .attribute(inner())
                    .build(),
            )
            .attribute(
                NestedAttributeBuilder::new("unset", NestingMode::Single)
                    .optional()
                    .attribute(inner())
                    .build(),
            )
            .build();

        let mode = |m: Dynamic| Dynamic::object([("mode", m)]);
        let disks = |m: Dynamic| {
            Dynamic::Map(std::collections::HashMap::from([("root".to_string(), mode(m))]))
        };
        let config = resource(vec![
            ("settings", mode(Dynamic::Null)),
            ("disks", disks(Dynamic::Null)),
            ("unset", Dynamic::Null),
        ]);
        let plan = resource(vec![
            ("settings", mode(Dynamic::unknown())),
            ("disks", disks(Dynamic::unknown())),
            ("unset", Dynamic::Null),
        ]);

        let response = schema.modify_plan(&config, &plan, &DynamicValue::null(), PrivateStateData::new());

        assert!(response.diagnostics.is_empty());
        assert_eq!(
            response
                .plan
                .get_string(&AttributePath::new("settings").attribute("mode"))
                .unwrap(),
            "auto"
        );
        assert_eq!(
            response
                .plan
                .get_string(&AttributePath::new("disks").key("root").attribute("mode"))
                .unwrap(),
            "auto"
        );
        assert!(response.plan.get(&AttributePath::new("unset")).unwrap().is_null());
    }
}
