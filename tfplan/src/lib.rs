//! tfplan - plan modifiers and default values for Terraform providers in Rust
//!
//! Small, composable helpers that a provider attaches to schema attributes.
//! Each one looks at the configuration, plan and prior state of a single
//! attribute and adjusts the planned value under narrow conditions: copy the
//! prior state into an unknown value, refine an unknown value, or force the
//! resource to be replaced when the value changes.

// Core modules
pub mod diagnostics;
pub mod error;
pub mod path;
pub mod refinement;
pub mod types;
pub mod value;

// Helper modules
pub mod defaults;
pub mod plan_modifier;

// Schema and runner
pub mod plan;
pub mod schema;

// Re-exports for convenience
pub use diagnostics::{Diagnostic, DiagnosticSeverity, Diagnostics};
pub use error::{Result, TfplanError};
pub use path::{AttributePath, AttributePathStep};
pub use plan::SchemaPlanResponse;
pub use plan_modifier::{PlanModifier, PlanModifierRequest, PlanModifierResponse};
pub use refinement::{BoundValue, NumberBound, Refinements};
pub use schema::{AttributeBuilder, NestedAttributeBuilder, NestingMode, Schema, SchemaBuilder};
pub use types::{
    AttrValue, Config, Dynamic, DynamicValue, List, Map, Number, Object, Plan, PrivateStateData,
    Set, State,
};
pub use value::{
    BoolValue, Collection, DynamicAttributeValue, Float32Value, Float64Value, Int32Value,
    Int64Value, ListValue, MapValue, NumberValue, Numeric, ObjectValue, SetValue, StringValue,
    Value,
};
