//! Schema types and builders for tfplan
//!
//! A schema lists the attributes of a resource together with the defaults
//! and plan modifiers attached to them. Attributes of different payload types
//! live side by side behind the object-safe [`SchemaAttribute`] trait.

use crate::defaults::Default;
use crate::diagnostics::Diagnostics;
use crate::path::AttributePath;
use crate::plan::{AttributeValues, PlanContext};
use crate::plan_modifier::PlanModifier;
use crate::types::{AttrValue, Dynamic};

/// Object-safe view of an attribute, used by [`Schema`] and
/// [`NestedAttribute`] to hold attributes of mixed types
pub trait SchemaAttribute: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// Reports schema definition mistakes, such as a default on a
    /// non-computed attribute
    fn validate_implementation(&self, path: &AttributePath) -> Diagnostics;

    /// Runs defaults and plan modifiers for the raw values at `values.path`
    /// and returns the new planned value
    fn modify_plan_value(&self, values: AttributeValues, context: &mut PlanContext<'_>) -> Dynamic;
}

/// Attribute represents a single attribute carrying payload type `T`
pub struct Attribute<T: AttrValue> {
    pub name: String,
    pub description: String,
    pub required: bool,
    pub optional: bool,
    pub computed: bool,
    pub sensitive: bool,
    pub write_only: bool,
    pub plan_modifiers: Vec<Box<dyn PlanModifier<T>>>,
    pub default: Option<Box<dyn Default<T>>>,
}

// Manual Debug implementation since modifiers/defaults don't implement Debug
impl<T: AttrValue> std::fmt::Debug for Attribute<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Attribute")
            .field("name", &self.name)
            .field("type", &T::TYPE_NAME)
            .field("description", &self.description)
            .field("required", &self.required)
            .field("optional", &self.optional)
            .field("computed", &self.computed)
            .field("sensitive", &self.sensitive)
            .field("write_only", &self.write_only)
            .field(
                "plan_modifiers",
                &format!("{} plan modifiers", self.plan_modifiers.len()),
            )
            .field("default", &self.default.is_some())
            .finish()
    }
}

impl<T: AttrValue> Attribute<T> {
    pub fn validate_implementation(&self, path: &AttributePath) -> Diagnostics {
        let mut diags = Diagnostics::new();

        if self.default.is_some() && !self.computed {
            diags.add_attribute_error(
                path.clone(),
                "Schema Using Attribute Default For Non-Computed Attribute",
                format!(
                    "Attribute \"{}\" must be computed when using default. \
                     This is an issue with the provider and should be reported to the provider developers.",
                    path
                ),
            );
        }

        if self.default.is_some() && self.required {
            diags.add_attribute_error(
                path.clone(),
                "Schema Using Attribute Default For Required Attribute",
                format!(
                    "Attribute \"{}\" is required and cannot have a default. \
                     This is an issue with the provider and should be reported to the provider developers.",
                    path
                ),
            );
        }

        if self.write_only && self.computed {
            diags.add_attribute_error(
                path.clone(),
                "Invalid Schema Implementation",
                format!(
                    "When validating the schema, an implementation issue was found. \
                     This is always an issue with the provider and should be reported to the provider developers.\n\n\
                     Attribute \"{}\" cannot be both write-only and computed.",
                    path
                ),
            );
        }

        if self.write_only && self.default.is_some() {
            diags.add_attribute_error(
                path.clone(),
                "Invalid Schema Implementation",
                format!(
                    "When validating the schema, an implementation issue was found. \
                     This is always an issue with the provider and should be reported to the provider developers.\n\n\
                     Attribute \"{}\" is write-only and cannot have a default.",
                    path
                ),
            );
        }

        diags
    }
}

/// AttributeBuilder provides fluent API for building attributes
pub struct AttributeBuilder<T: AttrValue> {
    attribute: Attribute<T>,
}

impl<T: AttrValue> AttributeBuilder<T> {
    pub fn new(name: &str) -> Self {
        Self {
            attribute: Attribute {
                name: name.to_string(),
                description: String::new(),
                required: false,
                optional: false,
                computed: false,
                sensitive: false,
                write_only: false,
                plan_modifiers: Vec::new(),
                default: None,
            },
        }
    }

    pub fn description(mut self, desc: &str) -> Self {
        self.attribute.description = desc.to_string();
        self
    }

    pub fn required(mut self) -> Self {
        self.attribute.required = true;
        self.attribute.optional = false;
        self
    }

    pub fn optional(mut self) -> Self {
        self.attribute.optional = true;
        self.attribute.required = false;
        self
    }

    pub fn computed(mut self) -> Self {
        self.attribute.computed = true;
        self
    }

    /// Mark as sensitive; planned values are kept out of trace output
    pub fn sensitive(mut self) -> Self {
        self.attribute.sensitive = true;
        self
    }

    /// Mark as write-only: never persisted to plan or state
    pub fn write_only(mut self) -> Self {
        self.attribute.write_only = true;
        self
    }

    /// Add plan modifier, modifiers run in the order they are added
    pub fn plan_modifier(mut self, modifier: impl PlanModifier<T> + 'static) -> Self {
        self.attribute.plan_modifiers.push(Box::new(modifier));
        self
    }

    pub fn default(mut self, default: Box<dyn Default<T>>) -> Self {
        self.attribute.default = Some(default);
        self
    }

    pub fn build(self) -> Attribute<T> {
        self.attribute
    }
}

/// NestingMode defines how a nested attribute holds its objects
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NestingMode {
    Single,
    List,
    Set,
    Map,
}

/// NestedAttribute groups attributes into an object, a list, set or map of
/// objects
pub struct NestedAttribute {
    pub name: String,
    pub description: String,
    pub required: bool,
    pub optional: bool,
    pub computed: bool,
    pub nesting: NestingMode,
    pub attributes: Vec<Box<dyn SchemaAttribute>>,
}

impl std::fmt::Debug for NestedAttribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.attributes.iter().map(|a| a.name()).collect();
        f.debug_struct("NestedAttribute")
            .field("name", &self.name)
            .field("nesting", &self.nesting)
            .field("required", &self.required)
            .field("optional", &self.optional)
            .field("computed", &self.computed)
            .field("attributes", &names)
            .finish()
    }
}

impl NestedAttribute {
    pub fn validate_implementation(&self, path: &AttributePath) -> Diagnostics {
        let mut diags = Diagnostics::new();
        for attr in &self.attributes {
            diags.extend(attr.validate_implementation(&path.clone().attribute(attr.name())));
        }
        diags
    }
}

pub struct NestedAttributeBuilder {
    nested: NestedAttribute,
}

impl NestedAttributeBuilder {
    pub fn new(name: &str, nesting: NestingMode) -> Self {
        Self {
            nested: NestedAttribute {
                name: name.to_string(),
                description: String::new(),
                required: false,
                optional: false,
                computed: false,
                nesting,
                attributes: Vec::new(),
            },
        }
    }

    pub fn description(mut self, desc: &str) -> Self {
        self.nested.description = desc.to_string();
        self
    }

    pub fn required(mut self) -> Self {
        self.nested.required = true;
        self.nested.optional = false;
        self
    }

    pub fn optional(mut self) -> Self {
        self.nested.optional = true;
        self.nested.required = false;
        self
    }

    pub fn computed(mut self) -> Self {
        self.nested.computed = true;
        self
    }

    pub fn attribute(mut self, attr: impl SchemaAttribute + 'static) -> Self {
        self.nested.attributes.push(Box::new(attr));
        self
    }

    pub fn build(self) -> NestedAttribute {
        self.nested
    }
}

/// Schema describes the attributes of a resource
///
/// `version` is informational; nothing in the plan runner reads it.
pub struct Schema {
    pub version: i64,
    pub description: String,
    pub attributes: Vec<Box<dyn SchemaAttribute>>,
}

impl std::fmt::Debug for Schema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.attributes.iter().map(|a| a.name()).collect();
        f.debug_struct("Schema")
            .field("version", &self.version)
            .field("description", &self.description)
            .field("attributes", &names)
            .finish()
    }
}

impl Schema {
    pub fn attribute(&self, name: &str) -> Option<&dyn SchemaAttribute> {
        self.attributes
            .iter()
            .find(|a| a.name() == name)
            .map(|a| &**a)
    }

    pub fn validate_implementation(&self) -> Diagnostics {
        let mut diags = Diagnostics::new();
        for attr in &self.attributes {
            diags.extend(attr.validate_implementation(&AttributePath::new(attr.name())));
        }
        diags
    }
}

/// SchemaBuilder provides fluent API for building schemas
pub struct SchemaBuilder {
    schema: Schema,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self {
            schema: Schema {
                version: 0,
                description: String::new(),
                attributes: Vec::new(),
            },
        }
    }

    pub fn version(mut self, version: i64) -> Self {
        self.schema.version = version;
        self
    }

    pub fn description(mut self, desc: &str) -> Self {
        self.schema.description = desc.to_string();
        self
    }

    pub fn attribute(mut self, attr: impl SchemaAttribute + 'static) -> Self {
        self.schema.attributes.push(Box::new(attr));
        self
    }

    pub fn build(self) -> Schema {
        self.schema
    }
}

impl std::default::Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::{static_int64, static_string};
    use crate::plan_modifier::{UseStateForUnknown, WillNotBeNull};

    #[test]
    fn attribute_builder_creates_required_string() {
        let attr = AttributeBuilder::<String>::new("name")
            .description("The name of the resource")
            .required()
            .build();

        assert_eq!(attr.name, "name");
        assert!(attr.required);
        assert!(!attr.optional);
        assert_eq!(attr.description, "The name of the resource");
        assert!(attr.validate_implementation(&AttributePath::new("name")).is_empty());
    }

    #[test]
    fn plan_modifiers_keep_order() {
        let attr = AttributeBuilder::<String>::new("id")
            .computed()
            .plan_modifier(UseStateForUnknown)
            .plan_modifier(WillNotBeNull)
            .build();

        let descriptions: Vec<String> = attr.plan_modifiers.iter().map(|m| m.description()).collect();
        assert_eq!(descriptions.len(), 2);
        assert!(descriptions[0].starts_with("Once set"));
        assert!(descriptions[1].contains("not be null"));
    }

    #[test]
    fn default_requires_computed() {
        let attr = AttributeBuilder::<i64>::new("port")
            .optional()
            .default(static_int64(80))
            .build();

        let diags = attr.validate_implementation(&AttributePath::new("port"));
        assert_eq!(diags.errors().len(), 1);
        assert_eq!(
            diags.errors()[0].summary,
            "Schema Using Attribute Default For Non-Computed Attribute"
        );
    }

    #[test]
    fn required_attribute_cannot_have_default() {
        let attr = AttributeBuilder::<String>::new("name")
            .required()
            .computed()
            .default(static_string("x"))
            .build();

        let diags = attr.validate_implementation(&AttributePath::new("name"));
        assert_eq!(diags.errors().len(), 1);
        assert_eq!(
            diags.errors()[0].summary,
            "Schema Using Attribute Default For Required Attribute"
        );
    }

    #[test]
    fn write_only_rules() {
        let attr = AttributeBuilder::<String>::new("password")
            .optional()
            .write_only()
            .computed()
            .default(static_string("changeme"))
            .build();

        let diags = attr.validate_implementation(&AttributePath::new("password"));
        assert_eq!(diags.errors().len(), 2);
    }

    #[test]
    fn schema_builder_creates_schema_with_attributes() {
        let schema = SchemaBuilder::new()
            .version(1)
            .description("Test resource schema")
            .attribute(AttributeBuilder::<String>::new("id").computed().build())
            .attribute(AttributeBuilder::<String>::new("name").required().build())
            .build();

        assert_eq!(schema.version, 1);
        assert_eq!(schema.attributes.len(), 2);
        assert_eq!(schema.description, "Test resource schema");
        assert!(schema.attribute("name").is_some());
        assert!(schema.attribute("missing").is_none());
        assert!(schema.validate_implementation().is_empty());
    }

    #[test]
    fn nested_validation_reports_child_paths() {
        let schema = SchemaBuilder::new()
            .attribute(
                NestedAttributeBuilder::new("rules", NestingMode::List)
                    .optional()
                    .attribute(
                        AttributeBuilder::<i64>::new("port")
                            .optional()
                            .default(static_int64(443))
                            .build(),
                    )
                    .build(),
            )
            .build();

        let diags = schema.validate_implementation();
        assert_eq!(diags.errors().len(), 1);
        assert_eq!(
            diags.errors()[0].attribute,
            Some(AttributePath::new("rules").attribute("port"))
        );
    }
}
