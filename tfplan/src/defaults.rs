//! Default value providers for attributes
//!
//! A default supplies the planned value of an attribute whose configuration
//! value is null. Defaults only apply to computed attributes and run before
//! the attribute's plan modifiers.
//!
//! # Examples
//!
//! ```no_run
//! use tfplan::defaults::{static_int64, EnvDefault};
//! use tfplan::schema::AttributeBuilder;
//!
//! // Static default value
//! let timeout = AttributeBuilder::<i64>::new("timeout")
//!     .optional()
//!     .computed()
//!     .default(static_int64(30))
//!     .build();
//!
//! // Default from environment variable
//! let region = AttributeBuilder::<String>::new("region")
//!     .optional()
//!     .computed()
//!     .default(EnvDefault::create("AWS_DEFAULT_REGION", "us-east-1"))
//!     .build();
//! ```

use crate::diagnostics::Diagnostics;
use crate::path::AttributePath;
use crate::types::{AttrValue, Dynamic, List, Map, Number, Object, Set};
use crate::value::Value;
use chrono::{SecondsFormat, Utc};
use std::env;
use uuid::Uuid;

/// Default provides default values for optional computed attributes
pub trait Default<T: AttrValue>: Send + Sync {
    fn description(&self) -> String;

    fn markdown_description(&self) -> String {
        self.description()
    }

    fn default_value(&self, request: &DefaultRequest) -> DefaultResponse<T>;
}

#[derive(Debug, Clone)]
pub struct DefaultRequest {
    pub path: AttributePath,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DefaultResponse<T> {
    pub value: Value<T>,
    pub diagnostics: Diagnostics,
}

impl<T: AttrValue> DefaultResponse<T> {
    pub fn new(value: Value<T>) -> Self {
        Self {
            value,
            diagnostics: Diagnostics::new(),
        }
    }
}

/// StaticValue provides a fixed default value
pub struct StaticValue<T> {
    value: T,
}

impl<T: AttrValue> StaticValue<T> {
    pub fn create(value: T) -> Box<dyn Default<T>> {
        Box::new(Self { value })
    }
}

impl<T: AttrValue> Default<T> for StaticValue<T> {
    fn description(&self) -> String {
        format!("value defaults to {}", self.value.clone().into_dynamic())
    }

    fn markdown_description(&self) -> String {
        format!("value defaults to `{}`", self.value.clone().into_dynamic())
    }

    fn default_value(&self, _request: &DefaultRequest) -> DefaultResponse<T> {
        DefaultResponse::new(Value::Known(self.value.clone()))
    }
}

pub fn static_bool(value: bool) -> Box<dyn Default<bool>> {
    StaticValue::create(value)
}

pub fn static_string(value: &str) -> Box<dyn Default<String>> {
    StaticValue::create(value.to_string())
}

pub fn static_int32(value: i32) -> Box<dyn Default<i32>> {
    StaticValue::create(value)
}

pub fn static_int64(value: i64) -> Box<dyn Default<i64>> {
    StaticValue::create(value)
}

pub fn static_float32(value: f32) -> Box<dyn Default<f32>> {
    StaticValue::create(value)
}

pub fn static_float64(value: f64) -> Box<dyn Default<f64>> {
    StaticValue::create(value)
}

pub fn static_number(value: f64) -> Box<dyn Default<Number>> {
    StaticValue::create(Number(value))
}

pub fn static_list(values: Vec<Dynamic>) -> Box<dyn Default<List>> {
    StaticValue::create(List(values))
}

pub fn static_set(values: Vec<Dynamic>) -> Box<dyn Default<Set>> {
    StaticValue::create(Set(values))
}

pub fn static_map(value: Map) -> Box<dyn Default<Map>> {
    StaticValue::create(value)
}

pub fn static_object(value: Object) -> Box<dyn Default<Object>> {
    StaticValue::create(value)
}

pub fn static_dynamic(value: Dynamic) -> Box<dyn Default<Dynamic>> {
    StaticValue::create(value)
}

/// EnvDefault gets the default value from an environment variable
pub struct EnvDefault {
    env_var: String,
    fallback: Option<String>,
}

impl EnvDefault {
    pub fn create(env_var: &str, fallback: &str) -> Box<dyn Default<String>> {
        Box::new(Self {
            env_var: env_var.to_string(),
            fallback: Some(fallback.to_string()),
        })
    }

    /// Without a fallback a missing variable leaves the value null and
    /// reports a warning
    pub fn create_required(env_var: &str) -> Box<dyn Default<String>> {
        Box::new(Self {
            env_var: env_var.to_string(),
            fallback: None,
        })
    }
}

impl Default<String> for EnvDefault {
    fn description(&self) -> String {
        match &self.fallback {
            Some(fallback) => format!(
                "default from environment variable {} (fallback: {})",
                self.env_var, fallback
            ),
            None => format!("default from environment variable {}", self.env_var),
        }
    }

    fn default_value(&self, request: &DefaultRequest) -> DefaultResponse<String> {
        if let Ok(val) = env::var(&self.env_var) {
            return DefaultResponse::new(Value::Known(val));
        }

        if let Some(fallback) = &self.fallback {
            return DefaultResponse::new(Value::Known(fallback.clone()));
        }

        let mut response = DefaultResponse::new(Value::Null);
        response.diagnostics.add_attribute_warning(
            request.path.clone(),
            "Missing Environment Variable",
            format!(
                "Environment variable {} is not set and no fallback is configured. The attribute is left null.",
                self.env_var
            ),
        );
        response
    }
}

/// Format for string timestamps
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimestampFormat {
    /// ISO 8601 with a `Z` suffix (e.g., "2023-04-15T10:30:00Z")
    Iso8601,
    /// RFC 3339 (e.g., "2023-04-15T10:30:00+00:00")
    Rfc3339,
}

/// TimestampDefault provides the current time as a string
pub struct TimestampDefault {
    format: TimestampFormat,
}

impl TimestampDefault {
    pub fn iso8601() -> Box<dyn Default<String>> {
        Box::new(Self {
            format: TimestampFormat::Iso8601,
        })
    }

    pub fn rfc3339() -> Box<dyn Default<String>> {
        Box::new(Self {
            format: TimestampFormat::Rfc3339,
        })
    }
}

impl Default<String> for TimestampDefault {
    fn description(&self) -> String {
        let format_desc = match self.format {
            TimestampFormat::Iso8601 => "ISO 8601",
            TimestampFormat::Rfc3339 => "RFC 3339",
        };
        format!("current timestamp in {} format", format_desc)
    }

    fn default_value(&self, _request: &DefaultRequest) -> DefaultResponse<String> {
        let now = Utc::now();
        let value = match self.format {
            TimestampFormat::Iso8601 => now.to_rfc3339_opts(SecondsFormat::Secs, true),
            TimestampFormat::Rfc3339 => now.to_rfc3339(),
        };
        DefaultResponse::new(Value::Known(value))
    }
}

/// Resolution of numeric timestamps
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UnixTimestampUnit {
    Seconds,
    Milliseconds,
}

/// UnixTimestampDefault provides the current time as a Unix timestamp
pub struct UnixTimestampDefault {
    unit: UnixTimestampUnit,
}

impl UnixTimestampDefault {
    pub fn seconds() -> Box<dyn Default<i64>> {
        Box::new(Self {
            unit: UnixTimestampUnit::Seconds,
        })
    }

    pub fn milliseconds() -> Box<dyn Default<i64>> {
        Box::new(Self {
            unit: UnixTimestampUnit::Milliseconds,
        })
    }
}

impl Default<i64> for UnixTimestampDefault {
    fn description(&self) -> String {
        match self.unit {
            UnixTimestampUnit::Seconds => "current timestamp in Unix seconds".to_string(),
            UnixTimestampUnit::Milliseconds => "current timestamp in Unix milliseconds".to_string(),
        }
    }

    fn default_value(&self, _request: &DefaultRequest) -> DefaultResponse<i64> {
        let now = Utc::now();
        let value = match self.unit {
            UnixTimestampUnit::Seconds => now.timestamp(),
            UnixTimestampUnit::Milliseconds => now.timestamp_millis(),
        };
        DefaultResponse::new(Value::Known(value))
    }
}

/// Format for UUID output
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UuidFormat {
    /// Standard hyphenated format (e.g., "550e8400-e29b-41d4-a716-446655440000")
    Hyphenated,
    /// Simple format without hyphens (e.g., "550e8400e29b41d4a716446655440000")
    Simple,
    /// URN format (e.g., "urn:uuid:550e8400-e29b-41d4-a716-446655440000")
    Urn,
}

/// UuidDefault generates a random (v4) UUID
pub struct UuidDefault {
    format: UuidFormat,
}

impl UuidDefault {
    pub fn hyphenated() -> Box<dyn Default<String>> {
        Box::new(Self {
            format: UuidFormat::Hyphenated,
        })
    }

    pub fn simple() -> Box<dyn Default<String>> {
        Box::new(Self {
            format: UuidFormat::Simple,
        })
    }

    pub fn urn() -> Box<dyn Default<String>> {
        Box::new(Self {
            format: UuidFormat::Urn,
        })
    }
}

impl Default<String> for UuidDefault {
    fn description(&self) -> String {
        let format_desc = match self.format {
            UuidFormat::Hyphenated => "hyphenated",
            UuidFormat::Simple => "simple",
            UuidFormat::Urn => "URN",
        };
        format!("generated UUID in {} format", format_desc)
    }

    fn default_value(&self, _request: &DefaultRequest) -> DefaultResponse<String> {
        let uuid = Uuid::new_v4();
        let value = match self.format {
            UuidFormat::Hyphenated => uuid.hyphenated().to_string(),
            UuidFormat::Simple => uuid.simple().to_string(),
            UuidFormat::Urn => uuid.urn().to_string(),
        };
        DefaultResponse::new(Value::Known(value))
    }
}

/// DefaultFunc computes the default from the request
pub struct DefaultFunc<T, F>
where
    F: Fn(&DefaultRequest) -> Value<T> + Send + Sync,
{
    func: F,
    description: String,
}

impl<T, F> DefaultFunc<T, F>
where
    T: AttrValue,
    F: Fn(&DefaultRequest) -> Value<T> + Send + Sync + 'static,
{
    pub fn create(description: &str, func: F) -> Box<dyn Default<T>> {
        Box::new(Self {
            func,
            description: description.to_string(),
        })
    }
}

impl<T, F> Default<T> for DefaultFunc<T, F>
where
    T: AttrValue,
    F: Fn(&DefaultRequest) -> Value<T> + Send + Sync,
{
    fn description(&self) -> String {
        self.description.clone()
    }

    fn default_value(&self, request: &DefaultRequest) -> DefaultResponse<T> {
        DefaultResponse::new((self.func)(request))
    }
}
