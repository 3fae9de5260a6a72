//! Tool descriptors
//!
//! A `Tool` is what the host sees on discovery: a name, a description and a
//! JSON schema for its arguments. Parameters are added through `ToolParam`,
//! which keeps `properties` and `required` in sync.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// JSON type of a tool parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    String,
    Number,
    /// Array of strings
    StringList,
}

impl ParamType {
    fn schema(&self) -> Map<String, Value> {
        let mut schema = Map::new();
        match self {
            Self::String => {
                schema.insert("type".to_string(), json!("string"));
            }
            Self::Number => {
                schema.insert("type".to_string(), json!("number"));
            }
            Self::StringList => {
                schema.insert("type".to_string(), json!("array"));
                schema.insert("items".to_string(), json!({ "type": "string" }));
            }
        }
        schema
    }
}

/// A single declared parameter
#[derive(Debug, Clone, PartialEq)]
pub struct ToolParam {
    pub name: String,
    pub param_type: ParamType,
    pub description: Option<String>,
    pub default: Option<Value>,
    pub required: bool,
}

impl ToolParam {
    pub fn new(name: impl Into<String>, param_type: ParamType) -> Self {
        Self {
            name: name.into(),
            param_type,
            description: None,
            default: None,
            required: false,
        }
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, ParamType::String)
    }

    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name, ParamType::Number)
    }

    pub fn string_list(name: impl Into<String>) -> Self {
        Self::new(name, ParamType::StringList)
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn default_value(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    fn property(&self) -> Value {
        let mut property = self.param_type.schema();
        if let Some(description) = &self.description {
            property.insert("description".to_string(), json!(description));
        }
        if let Some(default) = &self.default {
            property.insert("default".to_string(), default.clone());
        }
        Value::Object(property)
    }
}

/// A tool as advertised to the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    /// Unique tool name, used as the dispatch key
    pub name: String,
    /// Human-readable description for the LLM
    pub description: String,
    /// JSON schema for input parameters
    pub input_schema: Value,
}

impl Tool {
    /// Create a tool that takes no parameters
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema: json!({
                "type": "object",
                "properties": {}
            }),
        }
    }

    /// Declare a parameter. `required` is only emitted once something needs it.
    pub fn with_param(mut self, param: ToolParam) -> Self {
        let property = param.property();
        if let Some(schema) = self.input_schema.as_object_mut() {
            if let Some(properties) = schema
                .entry("properties")
                .or_insert_with(|| json!({}))
                .as_object_mut()
            {
                properties.insert(param.name.clone(), property);
            }
            if param.required {
                if let Some(required) = schema
                    .entry("required")
                    .or_insert_with(|| json!([]))
                    .as_array_mut()
                {
                    required.push(json!(param.name));
                }
            }
        }
        self
    }

    /// Names of the declared parameters
    #[cfg(test)]
    pub fn param_names(&self) -> Vec<&str> {
        self.input_schema["properties"]
            .as_object()
            .map(|props| props.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Names of the mandatory parameters
    #[cfg(test)]
    pub fn required_params(&self) -> Vec<&str> {
        self.input_schema["required"]
            .as_array()
            .map(|req| req.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }
}
