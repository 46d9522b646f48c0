//! Example of using plan modifiers and defaults in tfplan
//!
//! Builds a small instance resource schema and plans an update against a
//! prior state, printing the resulting plan and replacement paths.

use tfplan::defaults::{static_int64, UuidDefault};
use tfplan::plan_modifier::{
    requires_replace, MatchElementStateForUnknown, PlanModifierRequest, RequiresReplaceIf,
    RequiresReplaceIfFuncResponse, UseStateForUnknown, WillBeBetween, WillHavePrefix,
};
use tfplan::{
    AttributeBuilder, Dynamic, DynamicValue, NestedAttributeBuilder, NestingMode, PrivateStateData,
    SchemaBuilder,
};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    // Changing to production requires a new instance
    let environment = AttributeBuilder::<String>::new("environment")
        .description("Environment (moving to production requires replacement)")
        .required()
        .plan_modifier(RequiresReplaceIf::new(
            |request: &PlanModifierRequest<String>, response: &mut RequiresReplaceIfFuncResponse| {
                let new_env = request.plan_value.as_known().map(String::as_str);
                let old_env = request.state_value.as_known().map(String::as_str);
                response.requires_replace =
                    new_env == Some("production") && old_env != Some("production");
            },
            "Moving to production requires replacement",
            "Moving to `production` requires replacement",
        ))
        .build();

    let schema = SchemaBuilder::new()
        .version(1)
        .description("Example compute instance")
        .attribute(
            AttributeBuilder::<String>::new("id")
                .computed()
                .plan_modifier(UseStateForUnknown)
                .plan_modifier(WillHavePrefix::new("i-"))
                .build(),
        )
        .attribute(
            AttributeBuilder::<String>::new("instance_type")
                .description("Instance type (changing requires replacement)")
                .required()
                .plan_modifier(requires_replace())
                .build(),
        )
        .attribute(environment)
        .attribute(
            AttributeBuilder::<String>::new("request_token")
                .optional()
                .computed()
                .default(UuidDefault::hyphenated())
                .build(),
        )
        .attribute(
            AttributeBuilder::<i64>::new("cpu_count")
                .optional()
                .computed()
                .default(static_int64(2))
                .plan_modifier(WillBeBetween::new(1_i64, 64_i64))
                .build(),
        )
        .attribute(
            NestedAttributeBuilder::new("disks", NestingMode::List)
                .optional()
                .attribute(AttributeBuilder::<String>::new("name").required().build())
                .attribute(
                    AttributeBuilder::<String>::new("volume_id")
                        .computed()
                        .plan_modifier(MatchElementStateForUnknown::new(["name"]))
                        .build(),
                )
                .build(),
        )
        .build();

    let diags = schema.validate_implementation();
    if diags.has_error() {
        for diag in &diags {
            eprintln!("{}", diag);
        }
        return;
    }

    let disk = |name: &str, volume: Dynamic| {
        Dynamic::object([("name", Dynamic::from(name)), ("volume_id", volume)])
    };

    let config = DynamicValue::new(Dynamic::object([
        ("id", Dynamic::Null),
        ("instance_type", Dynamic::from("large")),
        ("environment", Dynamic::from("production")),
        ("request_token", Dynamic::Null),
        ("cpu_count", Dynamic::Null),
        (
            "disks",
            Dynamic::List(vec![disk("data", Dynamic::Null), disk("root", Dynamic::Null)]),
        ),
    ]));
    let plan = DynamicValue::new(Dynamic::object([
        ("id", Dynamic::unknown()),
        ("instance_type", Dynamic::from("large")),
        ("environment", Dynamic::from("production")),
        ("request_token", Dynamic::unknown()),
        ("cpu_count", Dynamic::unknown()),
        (
            "disks",
            Dynamic::List(vec![
                disk("data", Dynamic::unknown()),
                disk("root", Dynamic::unknown()),
            ]),
        ),
    ]));
    let state = DynamicValue::new(Dynamic::object([
        ("id", Dynamic::from("i-0abc")),
        ("instance_type", Dynamic::from("small")),
        ("environment", Dynamic::from("staging")),
        ("request_token", Dynamic::from("previous-token")),
        ("cpu_count", Dynamic::from(2_i64)),
        (
            "disks",
            Dynamic::List(vec![disk("root", Dynamic::from("vol-root"))]),
        ),
    ]));

    let response = schema.modify_plan(&config, &plan, &state, PrivateStateData::new());

    println!("planned: {}", response.plan.value);
    for path in &response.requires_replace {
        println!("requires replace: {}", path);
    }
    for diag in &response.diagnostics {
        println!("{}", diag);
    }
}
