//! Text-to-value conversion for declared parameter defaults.
//!
//! Defaults are written as text in operation tables and catalogs. The registry
//! converts each one exactly once, through a [`TypeConverter`], when it builds
//! the descriptor. [`DefaultConverter`] covers the built-in [`ParamType`]s;
//! applications with custom types plug in their own converter.

use crate::error::ConversionError;
use crate::interface::ParamType;
use serde_json::{Map, Number, Value};

/// Converts default text into a value of the requested semantic type.
pub trait TypeConverter: Send + Sync {
    fn convert(&self, ty: &ParamType, text: &str) -> Result<Value, ConversionError>;
}

/// Conversions for the built-in semantic types.
///
/// Mappings are only accepted as JSON object text; empty text is rejected like
/// any other malformed mapping.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultConverter;

impl TypeConverter for DefaultConverter {
    fn convert(&self, ty: &ParamType, text: &str) -> Result<Value, ConversionError> {
        match ty {
            ParamType::Boolean => parse_bool(ty, text),
            ParamType::Integer => text
                .trim()
                .parse::<i64>()
                .map(Value::from)
                .map_err(|err| ConversionError::invalid(ty, text, err.to_string())),
            ParamType::Float => {
                let parsed = text
                    .trim()
                    .parse::<f64>()
                    .map_err(|err| ConversionError::invalid(ty, text, err.to_string()))?;
                Number::from_f64(parsed)
                    .map(Value::Number)
                    .ok_or_else(|| ConversionError::invalid(ty, text, "not a finite number"))
            }
            ParamType::String | ParamType::Any => Ok(Value::String(text.to_string())),
            ParamType::List(item) => {
                if text.trim().is_empty() {
                    return Ok(Value::Array(Vec::new()));
                }
                text.split(',')
                    .map(|part| self.convert(item, part.trim()))
                    .collect::<Result<Vec<_>, _>>()
                    .map(Value::Array)
            }
            ParamType::Map(value_ty) => self.convert_map(ty, value_ty, text),
            ParamType::Custom(_) => Err(ConversionError::Unsupported(ty.clone())),
        }
    }
}

impl DefaultConverter {
    fn convert_map(
        &self,
        ty: &ParamType,
        value_ty: &ParamType,
        text: &str,
    ) -> Result<Value, ConversionError> {
        let parsed: Value = serde_json::from_str(text)
            .map_err(|err| ConversionError::invalid(ty, text, err.to_string()))?;
        let Value::Object(entries) = parsed else {
            return Err(ConversionError::invalid(ty, text, "expected a JSON object"));
        };

        let mut converted = Map::new();
        for (key, value) in entries {
            converted.insert(key, self.check_value(value_ty, value)?);
        }
        Ok(Value::Object(converted))
    }

    /// Check a JSON value found inside a mapping against `ty`. String values
    /// are converted as default text; others must already have the right shape.
    fn check_value(&self, ty: &ParamType, value: Value) -> Result<Value, ConversionError> {
        match (ty, value) {
            (ParamType::String | ParamType::Any, value) => Ok(value),
            (ty, Value::String(raw)) => self.convert(ty, &raw),
            (ParamType::Integer, value) if value.is_i64() => Ok(value),
            (ParamType::Float, value) if value.is_number() => Ok(value),
            (ParamType::Boolean, value) if value.is_boolean() => Ok(value),
            (ParamType::List(item), Value::Array(items)) => items
                .into_iter()
                .map(|item_value| self.check_value(item, item_value))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            (ParamType::Map(inner), Value::Object(entries)) => {
                let mut converted = Map::new();
                for (key, entry) in entries {
                    converted.insert(key, self.check_value(inner, entry)?);
                }
                Ok(Value::Object(converted))
            }
            (ParamType::Custom(_), _) => Err(ConversionError::Unsupported(ty.clone())),
            (ty, value) => Err(ConversionError::invalid(
                ty,
                &value.to_string(),
                format!("expected a {ty} value"),
            )),
        }
    }
}

fn parse_bool(ty: &ParamType, text: &str) -> Result<Value, ConversionError> {
    let trimmed = text.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        Ok(Value::Bool(true))
    } else if trimmed.eq_ignore_ascii_case("false") {
        Ok(Value::Bool(false))
    } else {
        Err(ConversionError::invalid(ty, text, "expected true or false"))
    }
}
