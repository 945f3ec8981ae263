//! Parameter metadata resolution.

use crate::convert::TypeConverter;
use crate::descriptor::model::ParameterDescriptor;
use crate::error::ConversionError;
use crate::interface::ParameterSpec;
use serde_json::{Map, Value};
use tracing::warn;

/// Build the descriptor for the parameter at `position`.
///
/// A declared default is converted to the parameter type. Text converters
/// cannot express mapping literals, so an empty default on a mapping type
/// becomes an empty mapping when conversion fails; every other failure is
/// returned to the caller.
pub fn resolve_parameter(
    converter: &dyn TypeConverter,
    position: usize,
    spec: &ParameterSpec,
) -> Result<ParameterDescriptor, ConversionError> {
    let default = match spec.default.as_deref() {
        None => None,
        Some(text) => match converter.convert(&spec.ty, text) {
            Ok(value) => Some(value),
            Err(err) if spec.ty.is_mapping() && text.is_empty() => {
                warn!(
                    position,
                    ty = %spec.ty,
                    error = %err,
                    "empty default for mapping parameter; using an empty mapping"
                );
                Some(Value::Object(Map::new()))
            }
            Err(err) => return Err(err),
        },
    };

    Ok(ParameterDescriptor {
        position,
        name: spec.name.clone(),
        ty: spec.ty.clone(),
        default,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::DefaultConverter;
    use crate::interface::ParamType;
    use serde_json::json;

    /// Converter that accepts everything, used to prove a successful conversion
    /// of empty text is kept as-is.
    struct Verbatim;

    impl TypeConverter for Verbatim {
        fn convert(&self, _ty: &ParamType, text: &str) -> Result<Value, ConversionError> {
            Ok(Value::String(text.to_string()))
        }
    }

    #[test]
    fn missing_name_and_default_stay_unset() {
        let spec = ParameterSpec::new(ParamType::Integer);
        let resolved = resolve_parameter(&DefaultConverter, 3, &spec).unwrap();
        assert_eq!(resolved.position, 3);
        assert_eq!(resolved.name, None);
        assert_eq!(resolved.default, None);
    }

    #[test]
    fn default_text_is_converted() {
        let spec = ParameterSpec::new(ParamType::Integer)
            .named("level")
            .with_default("2");
        let resolved = resolve_parameter(&DefaultConverter, 0, &spec).unwrap();
        assert_eq!(resolved.name.as_deref(), Some("level"));
        assert_eq!(resolved.default, Some(json!(2)));
    }

    #[test]
    fn empty_mapping_default_becomes_empty_map() {
        let spec = ParameterSpec::new(ParamType::map_of(ParamType::String)).with_default("");
        let resolved = resolve_parameter(&DefaultConverter, 0, &spec).unwrap();
        assert_eq!(resolved.default, Some(json!({})));
    }

    #[test]
    fn mapping_exception_is_narrow() {
        let non_empty = ParameterSpec::new(ParamType::map_of(ParamType::String)).with_default("x");
        assert!(resolve_parameter(&DefaultConverter, 0, &non_empty).is_err());

        let empty_integer = ParameterSpec::new(ParamType::Integer).with_default("");
        assert!(resolve_parameter(&DefaultConverter, 0, &empty_integer).is_err());
    }

    #[test]
    fn successful_mapping_conversion_is_not_replaced() {
        let spec = ParameterSpec::new(ParamType::map_of(ParamType::Any)).with_default("");
        let resolved = resolve_parameter(&Verbatim, 0, &spec).unwrap();
        assert_eq!(resolved.default, Some(json!("")));
    }
}
