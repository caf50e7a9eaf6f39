//! Typed tool-parameter schemas.
//!
//! Tool arguments come from the model and are untrusted: fields may be
//! missing, mistyped, or extraneous. Each tool declares its parameters as a
//! [`ParamSchema`]; the registry validates the raw JSON payload against it
//! before dispatch, so tool implementations only ever see well-typed values.
//! The same declaration renders the JSON-schema object sent to the endpoint.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;

/// The JSON types a tool parameter can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    String,
    Integer,
    Boolean,
}

impl ParamType {
    fn json_name(self) -> &'static str {
        match self {
            ParamType::String => "string",
            ParamType::Integer => "integer",
            ParamType::Boolean => "boolean",
        }
    }
}

/// A validated parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    String(String),
    Integer(i64),
    Boolean(bool),
}

impl ParamValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ParamValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    fn type_of(&self) -> ParamType {
        match self {
            ParamValue::String(_) => ParamType::String,
            ParamValue::Integer(_) => ParamType::Integer,
            ParamValue::Boolean(_) => ParamType::Boolean,
        }
    }

    fn to_json(&self) -> Value {
        match self {
            ParamValue::String(s) => json!(s),
            ParamValue::Integer(n) => json!(n),
            ParamValue::Boolean(b) => json!(b),
        }
    }
}

/// One declared parameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamSpec {
    pub name: String,
    pub kind: ParamType,
    pub description: String,
    pub required: bool,
    /// Filled in for absent optional parameters during validation.
    pub default: Option<ParamValue>,
}

/// An ordered set of parameter declarations for one tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParamSchema {
    pub params: Vec<ParamSpec>,
}

impl ParamSchema {
    pub fn new() -> Self {
        Self { params: Vec::new() }
    }

    pub fn required(mut self, name: &str, kind: ParamType, description: &str) -> Self {
        self.params.push(ParamSpec {
            name: name.into(),
            kind,
            description: description.into(),
            required: true,
            default: None,
        });
        self
    }

    pub fn optional(
        mut self,
        name: &str,
        kind: ParamType,
        description: &str,
        default: ParamValue,
    ) -> Self {
        debug_assert_eq!(default.type_of(), kind);
        self.params.push(ParamSpec {
            name: name.into(),
            kind,
            description: description.into(),
            required: false,
            default: Some(default),
        });
        self
    }

    /// Validate a model-supplied argument payload.
    ///
    /// Unknown extra fields are ignored. Missing required fields and type
    /// mismatches produce a descriptive error string; absent optionals are
    /// filled with their declared default.
    pub fn validate(&self, args: &Value) -> std::result::Result<BTreeMap<String, ParamValue>, String> {
        let object = match args {
            Value::Object(map) => map.clone(),
            Value::Null => serde_json::Map::new(),
            other => {
                return Err(format!(
                    "expected a JSON object of arguments, got {other}"
                ))
            }
        };

        let mut out = BTreeMap::new();
        for spec in &self.params {
            match object.get(&spec.name) {
                Some(raw) => {
                    let value = coerce(raw, spec.kind).ok_or_else(|| {
                        format!(
                            "parameter '{}' must be a {}, got {raw}",
                            spec.name,
                            spec.kind.json_name()
                        )
                    })?;
                    out.insert(spec.name.clone(), value);
                }
                None if spec.required => {
                    return Err(format!("missing required parameter '{}'", spec.name));
                }
                None => {
                    if let Some(default) = &spec.default {
                        out.insert(spec.name.clone(), default.clone());
                    }
                }
            }
        }
        Ok(out)
    }

    /// Render the JSON-schema object advertised to the endpoint.
    pub fn to_json_schema(&self) -> Value {
        let mut properties = serde_json::Map::new();
        let mut required = Vec::new();
        for spec in &self.params {
            let mut prop = serde_json::Map::new();
            prop.insert("type".into(), json!(spec.kind.json_name()));
            prop.insert("description".into(), json!(spec.description));
            if let Some(default) = &spec.default {
                prop.insert("default".into(), default.to_json());
            }
            properties.insert(spec.name.clone(), Value::Object(prop));
            if spec.required {
                required.push(spec.name.clone());
            }
        }

        let mut schema = serde_json::Map::new();
        schema.insert("type".into(), json!("object"));
        schema.insert("properties".into(), Value::Object(properties));
        if !required.is_empty() {
            schema.insert("required".into(), json!(required));
        }
        Value::Object(schema)
    }
}

/// Coerce a raw JSON value into the declared type.
///
/// Integers arrive from some endpoints as floats with a zero fraction
/// (JSON has one number type); those are accepted.
fn coerce(raw: &Value, kind: ParamType) -> Option<ParamValue> {
    match kind {
        ParamType::String => raw.as_str().map(|s| ParamValue::String(s.to_string())),
        ParamType::Integer => raw
            .as_i64()
            .or_else(|| raw.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
            .map(ParamValue::Integer),
        ParamType::Boolean => raw.as_bool().map(ParamValue::Boolean),
    }
}
