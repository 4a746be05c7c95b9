// ABOUTME: Declarative parameter specs for tools and validated argument access
// ABOUTME: Checks presence and JSON type of each declared parameter and fills in defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

//! # Tool Arguments
//!
//! Each endpoint declares its parameters as [`ParamSpec`]s. Incoming
//! arguments are resolved against them once, producing a [`ToolArgs`] whose
//! accessors only fail when an endpoint reads a parameter it never declared.
//!
//! Numeric and boolean parameters also accept their string spelling
//! (`"42"`, `"true"`), which some MCP clients send.

use std::collections::HashMap;

use serde_json::{Map, Number, Value};

use crate::errors::AppResult;
use crate::mcp::schema::{JsonSchema, PropertySchema};

use super::errors::ToolError;

/// JSON type of a parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// JSON string
    String,
    /// Whole number
    Integer,
    /// Any number
    Number,
    /// `true` / `false`
    Boolean,
    /// JSON object
    Object,
}

impl ParamKind {
    /// JSON Schema type name
    #[must_use]
    pub const fn json_type(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Object => "object",
        }
    }

    /// Normalize a supplied value to this kind
    fn coerce(self, value: Value) -> Result<Value, &'static str> {
        match (self, value) {
            (Self::String, value @ Value::String(_))
            | (Self::Boolean, value @ Value::Bool(_))
            | (Self::Object, value @ Value::Object(_)) => Ok(value),
            (Self::Integer, Value::Number(n)) => integer(&n).ok_or("expected an integer"),
            (Self::Integer, Value::String(s)) => s
                .trim()
                .parse::<i64>()
                .map(Value::from)
                .map_err(|_| "expected an integer"),
            (Self::Number, value @ Value::Number(_)) => Ok(value),
            (Self::Number, Value::String(s)) => s
                .trim()
                .parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(Value::Number)
                .ok_or("expected a number"),
            (Self::Boolean, Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
                "true" => Ok(Value::Bool(true)),
                "false" => Ok(Value::Bool(false)),
                _ => Err("expected a boolean"),
            },
            (Self::String, _) => Err("expected a string"),
            (Self::Integer, _) => Err("expected an integer"),
            (Self::Number, _) => Err("expected a number"),
            (Self::Boolean, _) => Err("expected a boolean"),
            (Self::Object, _) => Err("expected an object"),
        }
    }
}

fn integer(n: &Number) -> Option<Value> {
    if let Some(i) = n.as_i64() {
        return Some(Value::from(i));
    }
    n.as_f64()
        .filter(|f| f.fract().abs() < f64::EPSILON && f.abs() < 9.0e15)
        .map(|f| Value::from(f as i64))
}

/// Default value of an optional parameter
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamDefault {
    /// Omitted means `null`
    Null,
    /// String default
    Str(&'static str),
    /// Integer default
    Int(i64),
    /// Boolean default
    Bool(bool),
}

impl ParamDefault {
    /// JSON value of the default
    #[must_use]
    pub fn to_value(self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Str(s) => Value::from(s),
            Self::Int(i) => Value::from(i),
            Self::Bool(b) => Value::Bool(b),
        }
    }
}

/// Whether a parameter must be supplied
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Requirement {
    /// Caller must supply a value
    Required,
    /// Value used when omitted
    Default(ParamDefault),
}

/// One declared tool parameter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSpec {
    /// Argument name as sent by the client
    pub name: &'static str,
    /// JSON type
    pub kind: ParamKind,
    /// Required or defaulted
    pub requirement: Requirement,
    /// Description shown in `tools/list`
    pub description: &'static str,
}

impl ParamSpec {
    /// Required parameter of any kind
    #[must_use]
    pub const fn required(name: &'static str, kind: ParamKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            requirement: Requirement::Required,
            description,
        }
    }

    /// Required string parameter
    #[must_use]
    pub const fn string(name: &'static str, description: &'static str) -> Self {
        Self::required(name, ParamKind::String, description)
    }

    /// Required integer parameter
    #[must_use]
    pub const fn integer(name: &'static str, description: &'static str) -> Self {
        Self::required(name, ParamKind::Integer, description)
    }

    /// Required number parameter
    #[must_use]
    pub const fn number(name: &'static str, description: &'static str) -> Self {
        Self::required(name, ParamKind::Number, description)
    }

    /// Required boolean parameter
    #[must_use]
    pub const fn boolean(name: &'static str, description: &'static str) -> Self {
        Self::required(name, ParamKind::Boolean, description)
    }

    /// Required object parameter
    #[must_use]
    pub const fn object(name: &'static str, description: &'static str) -> Self {
        Self::required(name, ParamKind::Object, description)
    }

    /// Make the parameter optional with the given default
    #[must_use]
    pub const fn or(mut self, default: ParamDefault) -> Self {
        self.requirement = Requirement::Default(default);
        self
    }

    /// Make the parameter optional, defaulting to `null`
    #[must_use]
    pub const fn optional(self) -> Self {
        self.or(ParamDefault::Null)
    }

    /// Whether the caller must supply the parameter
    #[must_use]
    pub const fn is_required(&self) -> bool {
        matches!(self.requirement, Requirement::Required)
    }

    fn property_schema(&self) -> PropertySchema {
        let default = match self.requirement {
            Requirement::Default(ParamDefault::Null) | Requirement::Required => None,
            Requirement::Default(default) => Some(default.to_value()),
        };
        PropertySchema {
            property_type: self.kind.json_type().to_owned(),
            description: Some(self.description.to_owned()),
            default,
        }
    }
}

/// Input schema for a parameter list
#[must_use]
pub fn input_schema(params: &[ParamSpec]) -> JsonSchema {
    let properties: HashMap<String, PropertySchema> = params
        .iter()
        .map(|p| (p.name.to_owned(), p.property_schema()))
        .collect();
    let required: Vec<String> = params
        .iter()
        .filter(|p| p.is_required())
        .map(|p| p.name.to_owned())
        .collect();

    JsonSchema {
        schema_type: "object".to_owned(),
        properties: Some(properties),
        required: (!required.is_empty()).then_some(required),
    }
}

/// Arguments validated against a tool's parameter list
#[derive(Debug, Clone, PartialEq)]
pub struct ToolArgs {
    tool: &'static str,
    values: Map<String, Value>,
}

impl ToolArgs {
    /// Validate `args` and fill defaults
    ///
    /// `null` counts as omitted. Undeclared keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::MissingParameter`] for an omitted required
    /// parameter and [`ToolError::InvalidParameter`] for a value of the
    /// wrong type or arguments that are not an object.
    pub fn resolve(tool: &'static str, params: &[ParamSpec], args: Value) -> Result<Self, ToolError> {
        let mut supplied = match args {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            _ => {
                return Err(ToolError::invalid_parameter(
                    tool,
                    "arguments",
                    "expected an object",
                ))
            }
        };

        let mut values = Map::new();
        for spec in params {
            let value = match (supplied.remove(spec.name), spec.requirement) {
                (Some(Value::Null) | None, Requirement::Required) => {
                    return Err(ToolError::missing_parameter(tool, spec.name));
                }
                (Some(Value::Null) | None, Requirement::Default(default)) => default.to_value(),
                (Some(value), _) => spec
                    .kind
                    .coerce(value)
                    .map_err(|reason| ToolError::invalid_parameter(tool, spec.name, reason))?,
            };
            values.insert(spec.name.to_owned(), value);
        }

        Ok(Self { tool, values })
    }

    /// Raw value of a parameter
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    fn undeclared(&self, name: &str) -> ToolError {
        ToolError::missing_parameter(self.tool, name)
    }

    /// String parameter
    ///
    /// # Errors
    ///
    /// Returns an error if the parameter is absent or not a string
    pub fn str(&self, name: &str) -> AppResult<&str> {
        self.value(name)
            .and_then(Value::as_str)
            .ok_or_else(|| self.undeclared(name).into())
    }

    /// Optional string parameter; `null` and `""` read as `None`
    #[must_use]
    pub fn opt_str(&self, name: &str) -> Option<&str> {
        self.value(name)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Integer parameter
    ///
    /// # Errors
    ///
    /// Returns an error if the parameter is absent or not an integer
    pub fn int(&self, name: &str) -> AppResult<i64> {
        self.value(name)
            .and_then(Value::as_i64)
            .ok_or_else(|| self.undeclared(name).into())
    }

    /// Number parameter
    ///
    /// # Errors
    ///
    /// Returns an error if the parameter is absent or not a number
    pub fn float(&self, name: &str) -> AppResult<f64> {
        self.opt_float(name)
            .ok_or_else(|| self.undeclared(name).into())
    }

    /// Optional number parameter; `null` reads as `None`
    #[must_use]
    pub fn opt_float(&self, name: &str) -> Option<f64> {
        self.value(name).and_then(Value::as_f64)
    }

    /// Boolean parameter
    ///
    /// # Errors
    ///
    /// Returns an error if the parameter is absent or not a boolean
    pub fn bool(&self, name: &str) -> AppResult<bool> {
        self.value(name)
            .and_then(Value::as_bool)
            .ok_or_else(|| self.undeclared(name).into())
    }

    /// Object parameter
    ///
    /// # Errors
    ///
    /// Returns an error if the parameter is absent or not an object
    pub fn object(&self, name: &str) -> AppResult<&Value> {
        self.value(name)
            .filter(|v| v.is_object())
            .ok_or_else(|| self.undeclared(name).into())
    }

    /// Parameter rendered for a message: strings bare, everything else as JSON
    #[must_use]
    pub fn display(&self, name: &str) -> String {
        match self.value(name) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        }
    }
}
