//! Typed input schemas and argument validation.

use crate::{McpError, McpResult};
use serde_json::{Map, Value, json};

/// JSON type accepted for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum FieldKind {
    /// JSON string
    String,
    /// Any JSON number
    Number,
    /// JSON number without fraction
    Integer,
    /// JSON boolean
    Boolean,
    /// JSON array
    Array,
    /// JSON object
    Object,
}

impl FieldKind {
    fn accepts(&self, value: &Value) -> bool {
        match self {
            FieldKind::String => value.is_string(),
            FieldKind::Number => value.is_number(),
            FieldKind::Integer => value.is_i64() || value.is_u64(),
            FieldKind::Boolean => value.is_boolean(),
            FieldKind::Array => value.is_array(),
            FieldKind::Object => value.is_object(),
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// One declared input field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Argument name as the agent sends it
    pub name: String,
    /// Accepted JSON type
    pub kind: FieldKind,
    /// Description shown to the agent
    pub description: String,
    /// Whether the field must be present and non-null
    pub required: bool,
}

/// Declared input of a tool.
///
/// Only declared fields are checked; extra fields pass through untouched.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use tubescribe_mcp::{FieldKind, InputSchema};
///
/// let schema = InputSchema::new().required("videoId", FieldKind::String, "The video ID");
///
/// assert!(schema.validate(&json!({"videoId": "abc"})).is_ok());
/// assert!(schema.validate(&json!({"videoId": 42})).is_err());
/// assert!(schema.validate(&json!({})).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputSchema {
    fields: Vec<FieldSpec>,
}

impl InputSchema {
    /// Creates a schema with no fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a required field.
    pub fn required(
        mut self,
        name: impl Into<String>,
        kind: FieldKind,
        description: impl Into<String>,
    ) -> Self {
        self.fields.push(FieldSpec {
            name: name.into(),
            kind,
            description: description.into(),
            required: true,
        });
        self
    }

    /// Adds an optional field.
    pub fn optional(
        mut self,
        name: impl Into<String>,
        kind: FieldKind,
        description: impl Into<String>,
    ) -> Self {
        self.fields.push(FieldSpec {
            name: name.into(),
            kind,
            description: description.into(),
            required: false,
        });
        self
    }

    /// Declared fields in declaration order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Renders the schema as JSON Schema.
    pub fn to_json_schema(&self) -> Value {
        let mut properties = Map::new();
        for field in &self.fields {
            properties.insert(
                field.name.clone(),
                json!({
                    "type": field.kind.as_ref(),
                    "description": field.description,
                }),
            );
        }
        let required: Vec<&str> = self
            .fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name.as_str())
            .collect();

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    /// Checks `args` against the declared fields.
    ///
    /// A `null` value for a required field counts as missing. All violations
    /// are reported together.
    pub fn validate(&self, args: &Value) -> McpResult<()> {
        let Some(object) = args.as_object() else {
            return Err(McpError::InvalidArguments(format!(
                "expected an object, got {}",
                json_type_name(args)
            )));
        };

        let violations: Vec<String> = self
            .fields
            .iter()
            .filter_map(|field| match object.get(&field.name) {
                None | Some(Value::Null) if field.required => {
                    Some(format!("missing required field '{}'", field.name))
                }
                None | Some(Value::Null) => None,
                Some(value) if !field.kind.accepts(value) => Some(format!(
                    "field '{}' must be {}, got {}",
                    field.name,
                    field.kind,
                    json_type_name(value)
                )),
                Some(_) => None,
            })
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(McpError::InvalidArguments(violations.join("; ")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image_schema() -> InputSchema {
        InputSchema::new()
            .required("prompt", FieldKind::String, "The prompt")
            .required("videoId", FieldKind::String, "The video ID")
            .optional("count", FieldKind::Integer, "How many")
    }

    #[test]
    fn test_reports_every_violation() {
        let err = image_schema()
            .validate(&json!({"prompt": 1, "count": "two"}))
            .unwrap_err();
        let McpError::InvalidArguments(details) = err else {
            panic!("wrong error kind");
        };
        assert!(details.contains("field 'prompt' must be string, got number"));
        assert!(details.contains("missing required field 'videoId'"));
        assert!(details.contains("field 'count' must be integer, got string"));
    }

    #[test]
    fn test_null_required_field_is_missing() {
        let err = image_schema()
            .validate(&json!({"prompt": "cat", "videoId": null}))
            .unwrap_err();
        assert_eq!(
            err,
            McpError::InvalidArguments("missing required field 'videoId'".to_string())
        );
    }

    #[test]
    fn test_optional_and_extra_fields() {
        assert!(
            image_schema()
                .validate(&json!({"prompt": "cat", "videoId": "abc", "style": "noir"}))
                .is_ok()
        );
        assert!(
            image_schema()
                .validate(&json!({"prompt": "cat", "videoId": "abc", "count": null}))
                .is_ok()
        );
    }

    #[test]
    fn test_non_object_rejected() {
        assert!(image_schema().validate(&json!(["abc"])).is_err());
    }

    #[test]
    fn test_json_schema_shape() {
        let schema = image_schema().to_json_schema();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["videoId"]["type"], "string");
        assert_eq!(schema["properties"]["count"]["type"], "integer");
        assert_eq!(schema["required"], json!(["prompt", "videoId"]));
    }
}
