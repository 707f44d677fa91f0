//! Tool domain traits
//!
//! Contains the pure validation step that turns a [`ToolCall`] into
//! [`ResolvedArguments`]: required checks, type coercion and defaults.
//! The async execution port is defined in the application layer.

use chrono::{Duration, NaiveDate};
use serde_json::Value;
use thiserror::Error;

use super::arguments::ResolvedArguments;
use super::entities::{ParamDefault, ParamType, ToolCall, ToolDefinition, ToolParameter};
use crate::util::{format_date, parse_date};

/// Reasons a call is rejected before any request is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing required parameter '{parameter}' for tool '{tool}'")]
    MissingParameter { tool: String, parameter: String },

    #[error("Unknown parameter '{parameter}' for tool '{tool}'")]
    UnknownParameter { tool: String, parameter: String },

    #[error("Parameter '{parameter}' for tool '{tool}' must be {expected}")]
    InvalidType {
        tool: String,
        parameter: String,
        expected: String,
    },
}

impl ValidationError {
    pub fn parameter(&self) -> &str {
        match self {
            ValidationError::MissingParameter { parameter, .. }
            | ValidationError::UnknownParameter { parameter, .. }
            | ValidationError::InvalidType { parameter, .. } => parameter,
        }
    }
}

/// Validator for tool calls
///
/// Pure domain trait: no I/O. `today` anchors lookback defaults so the
/// result is deterministic for a given date.
pub trait ToolValidator {
    fn validate(
        &self,
        call: &ToolCall,
        definition: &ToolDefinition,
        today: NaiveDate,
    ) -> Result<ResolvedArguments, ValidationError>;
}

/// Default implementation of ToolValidator
#[derive(Debug, Clone, Default)]
pub struct DefaultToolValidator;

impl ToolValidator for DefaultToolValidator {
    fn validate(
        &self,
        call: &ToolCall,
        definition: &ToolDefinition,
        today: NaiveDate,
    ) -> Result<ResolvedArguments, ValidationError> {
        for arg_name in call.arguments.keys() {
            if definition.parameter(arg_name).is_none() {
                return Err(ValidationError::UnknownParameter {
                    tool: definition.name.clone(),
                    parameter: arg_name.clone(),
                });
            }
        }

        let mut resolved = ResolvedArguments::new();
        for param in &definition.parameters {
            let supplied = call.arguments.get(&param.name).filter(|v| !v.is_null());

            let value = match supplied {
                Some(raw) => coerce(raw, param).ok_or_else(|| ValidationError::InvalidType {
                    tool: definition.name.clone(),
                    parameter: param.name.clone(),
                    expected: expected_description(param.param_type),
                })?,
                None => match &param.default {
                    Some(default) => apply_default(default, today),
                    None if param.required => {
                        return Err(ValidationError::MissingParameter {
                            tool: definition.name.clone(),
                            parameter: param.name.clone(),
                        });
                    }
                    None => continue,
                },
            };

            resolved.insert(param.name.clone(), value);
        }

        Ok(resolved)
    }
}

fn apply_default(default: &ParamDefault, today: NaiveDate) -> Value {
    match default {
        ParamDefault::Value(v) => v.clone(),
        ParamDefault::LookbackDays(days) => Value::String(format_date(today - Duration::days(*days))),
        ParamDefault::Today => Value::String(format_date(today)),
    }
}

/// Coerce a supplied value to the declared type. Lenient where callers
/// commonly send the wrong JSON type (numbers as strings and vice versa).
fn coerce(raw: &Value, param: &ToolParameter) -> Option<Value> {
    match param.param_type {
        ParamType::String => match raw {
            Value::String(_) => Some(raw.clone()),
            Value::Number(n) => Some(Value::String(n.to_string())),
            _ => None,
        },
        ParamType::Integer => match raw {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
                .map(Value::from),
            Value::String(s) => s.trim().parse::<i64>().ok().map(Value::from),
            _ => None,
        },
        ParamType::Number => match raw {
            Value::Number(_) => Some(raw.clone()),
            Value::String(s) => s.trim().parse::<f64>().ok().map(Value::from),
            _ => None,
        },
        ParamType::Boolean => match raw {
            Value::Bool(_) => Some(raw.clone()),
            Value::String(s) => s.trim().parse::<bool>().ok().map(Value::Bool),
            _ => None,
        },
        ParamType::Date => raw
            .as_str()
            .and_then(parse_date)
            .map(|d| Value::String(format_date(d))),
    }
}

fn expected_description(param_type: ParamType) -> String {
    match param_type {
        ParamType::Date => "a date in YYYY-MM-DD format".to_string(),
        ParamType::Integer => "an integer".to_string(),
        ParamType::Number => "a number".to_string(),
        ParamType::Boolean => "a boolean".to_string(),
        ParamType::String => "a string".to_string(),
    }
}
