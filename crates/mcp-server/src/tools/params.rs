//! Typed argument parsing shared by every tool.
//!
//! Each tool's parameter struct derives `JsonSchema`; the schema doubles as the advertised input
//! schema and as the [`ParamDescriptor`] that `parse_arguments` checks before deserializing.

use std::collections::BTreeMap;
use std::fmt;
use std::net::IpAddr;

use rmcp::model::JsonObject;
use rmcp::schemars;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::ToolError;

/// A tool's parameter struct.
pub trait ToolParams: DeserializeOwned + schemars::JsonSchema + Send + 'static {
    /// Domain checks that the schema cannot express.
    fn validate(&self) -> Result<(), ToolError> {
        Ok(())
    }
}

/// Implement [`ToolParams`] with no extra validation.
macro_rules! plain_params {
    ($($ty:ty),+ $(,)?) => {
        $(impl $crate::tools::params::ToolParams for $ty {})+
    };
}
pub(crate) use plain_params;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    String,
    Integer,
    Number,
    Boolean,
    Array,
    Object,
    Null,
}

impl ValueKind {
    fn from_schema_name(name: &str) -> Option<Self> {
        Some(match name {
            "string" => Self::String,
            "integer" => Self::Integer,
            "number" => Self::Number,
            "boolean" => Self::Boolean,
            "array" => Self::Array,
            "object" => Self::Object,
            "null" => Self::Null,
            _ => return None,
        })
    }

    fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(n) if n.is_i64() || n.is_u64() => Self::Integer,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    fn accepts(self, actual: Self) -> bool {
        self == actual || (self == Self::Number && actual == Self::Integer)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Object => "object",
            Self::Null => "null",
        })
    }
}

/// Required fields and expected kinds, read from a parameter schema.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamDescriptor {
    pub required: Vec<String>,
    pub kinds: BTreeMap<String, Vec<ValueKind>>,
}

impl ParamDescriptor {
    pub fn from_schema(schema: &JsonObject) -> Self {
        let required = schema
            .get("required")
            .and_then(Value::as_array)
            .map(|fields| {
                fields
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let mut kinds = BTreeMap::new();
        if let Some(properties) = schema.get("properties").and_then(Value::as_object) {
            for (name, property) in properties {
                let declared: Vec<ValueKind> = match property.get("type") {
                    Some(Value::String(kind)) => {
                        ValueKind::from_schema_name(kind).into_iter().collect()
                    }
                    Some(Value::Array(list)) => list
                        .iter()
                        .filter_map(Value::as_str)
                        .filter_map(ValueKind::from_schema_name)
                        .collect(),
                    _ => Vec::new(),
                };
                if !declared.is_empty() {
                    kinds.insert(name.clone(), declared);
                }
            }
        }
        Self { required, kinds }
    }
}

/// JSON schema for a parameter struct, shaped for MCP `inputSchema`.
pub fn schema_object<P: schemars::JsonSchema>() -> JsonObject {
    let schema = schemars::schema_for!(P);
    let mut object = match serde_json::to_value(&schema) {
        Ok(Value::Object(object)) => object,
        _ => JsonObject::new(),
    };
    object.remove("$schema");
    object.remove("title");
    object
        .entry("type")
        .or_insert_with(|| Value::String("object".into()));
    object
        .entry("properties")
        .or_insert_with(|| Value::Object(JsonObject::new()));
    object
}

/// Check `arguments` against `descriptor`, deserialize, then run domain validation.
pub fn parse_arguments<P: ToolParams>(
    arguments: &JsonObject,
    descriptor: &ParamDescriptor,
) -> Result<P, ToolError> {
    for field in &descriptor.required {
        match arguments.get(field) {
            None => return Err(ToolError::invalid(field, "is required")),
            Some(Value::Null) => return Err(ToolError::invalid(field, "is required (got null)")),
            Some(_) => {}
        }
    }

    for (field, value) in arguments {
        let Some(expected) = descriptor.kinds.get(field) else {
            continue;
        };
        let actual = ValueKind::of(value);
        if !expected.iter().any(|kind| kind.accepts(actual)) {
            let expected = expected
                .iter()
                .filter(|kind| **kind != ValueKind::Null)
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" or ");
            return Err(ToolError::invalid(
                field,
                format!("expected {expected}, got {actual}"),
            ));
        }
    }

    let params: P = serde_json::from_value(Value::Object(arguments.clone())).map_err(|err| {
        let message = err.to_string();
        let field = serde_field(&message).unwrap_or("arguments").to_string();
        ToolError::invalid(field, message)
    })?;
    params.validate()?;
    Ok(params)
}

fn serde_field(message: &str) -> Option<&str> {
    for marker in ["missing field `", "unknown field `"] {
        if let Some(start) = message.find(marker) {
            let rest = &message[start + marker.len()..];
            return rest.split('`').next();
        }
    }
    None
}

pub fn require_non_empty(field: &str, value: &str) -> Result<(), ToolError> {
    if value.trim().is_empty() {
        return Err(ToolError::invalid(field, "must not be empty"));
    }
    Ok(())
}

pub fn require_positive(field: &str, value: u64) -> Result<(), ToolError> {
    if value == 0 {
        return Err(ToolError::invalid(field, "must be greater than zero"));
    }
    Ok(())
}

pub fn require_one_of(field: &str, value: &str, allowed: &[&str]) -> Result<(), ToolError> {
    if !allowed.contains(&value) {
        return Err(ToolError::invalid(
            field,
            format!("must be one of: {}", allowed.join(", ")),
        ));
    }
    Ok(())
}

pub fn require_ip(field: &str, value: &str) -> Result<IpAddr, ToolError> {
    value
        .trim()
        .parse::<IpAddr>()
        .map_err(|_| ToolError::invalid(field, format!("invalid IP address: {value}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, schemars::JsonSchema)]
    struct Sample {
        name: String,
        size: u64,
        tags: Option<Vec<String>>,
        enabled: Option<bool>,
    }

    impl ToolParams for Sample {
        fn validate(&self) -> Result<(), ToolError> {
            require_non_empty("name", &self.name)?;
            require_positive("size", self.size)
        }
    }

    fn args(value: Value) -> JsonObject {
        value.as_object().cloned().unwrap()
    }

    fn parse(value: Value) -> Result<Sample, ToolError> {
        let descriptor = ParamDescriptor::from_schema(&schema_object::<Sample>());
        parse_arguments(&args(value), &descriptor)
    }

    fn field_of(err: ToolError) -> String {
        match err {
            ToolError::InvalidArgument { field, .. } => field,
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn descriptor_reads_required_fields_and_kinds() {
        let descriptor = ParamDescriptor::from_schema(&schema_object::<Sample>());
        let mut required = descriptor.required.clone();
        required.sort();
        assert_eq!(required, vec!["name", "size"]);
        assert_eq!(descriptor.kinds["size"], vec![ValueKind::Integer]);
        assert!(descriptor.kinds["enabled"].contains(&ValueKind::Boolean));
    }

    #[test]
    fn schema_is_an_object_schema() {
        let schema = schema_object::<Sample>();
        assert_eq!(schema.get("type"), Some(&json!("object")));
        assert!(schema.get("$schema").is_none());
    }

    #[test]
    fn accepts_valid_arguments() {
        let parsed = parse(json!({"name": "web", "size": 20, "tags": ["a"], "enabled": null}))
            .unwrap();
        assert_eq!(parsed.name, "web");
        assert_eq!(parsed.size, 20);
        assert_eq!(parsed.tags, Some(vec!["a".to_string()]));
    }

    #[test]
    fn errors_name_the_offending_field() {
        assert_eq!(field_of(parse(json!({"size": 1})).unwrap_err()), "name");
        assert_eq!(
            field_of(parse(json!({"name": null, "size": 1})).unwrap_err()),
            "name"
        );
        assert_eq!(
            field_of(parse(json!({"name": "x", "size": "big"})).unwrap_err()),
            "size"
        );
        assert_eq!(
            field_of(parse(json!({"name": "x", "size": 1.5})).unwrap_err()),
            "size"
        );
        assert_eq!(
            field_of(parse(json!({"name": "x", "size": 1, "enabled": "yes"})).unwrap_err()),
            "enabled"
        );
    }

    #[test]
    fn domain_validation_runs_after_decoding() {
        let err = parse(json!({"name": "  ", "size": 1})).unwrap_err();
        assert_eq!(field_of(err), "name");
        let err = parse(json!({"name": "x", "size": 0})).unwrap_err();
        assert!(err.to_string().contains("greater than zero"));
    }

    #[test]
    fn ip_literals_are_checked() {
        assert!(require_ip("address", "192.0.2.10").is_ok());
        assert!(require_ip("address", "2600:3c00::1").is_ok());
        let err = require_ip("address", "not-an-ip").unwrap_err();
        assert!(err.to_string().contains("invalid IP address"));
    }
}
