//! Per-interface descriptor construction.
//!
//! Operations are scanned in declaration order. Operations without a role
//! prefix are skipped. Within an element, each role binds the operation with
//! the most parameters (first seen wins ties), and the element's parameter list
//! is replaced whenever a longer operation of any role shows up.

use crate::convert::TypeConverter;
use crate::descriptor::model::{BoundOperation, Descriptor, ParameterDescriptor};
use crate::descriptor::parameter::resolve_parameter;
use crate::error::FilterError;
use crate::interface::{CapabilityInterface, OperationSpec, split_operation_name};
use tracing::trace;

/// Compute the descriptor of a single interface.
pub fn build_descriptor(
    interface: &CapabilityInterface,
    converter: &dyn TypeConverter,
) -> Result<Descriptor, FilterError> {
    let mut descriptor = Descriptor::new();

    for operation in &interface.operations {
        let Some((role, element)) = split_operation_name(&operation.name) else {
            trace!(
                interface = %interface.id,
                operation = %operation.name,
                "skipping operation without role prefix"
            );
            continue;
        };
        let key = element.to_lowercase();

        let parameters = match descriptor.parameter_count(&key) {
            Some(count) if operation.arity() <= count => None,
            _ => Some(resolve_parameters(interface, operation, converter)?),
        };

        let entry = descriptor.element_entry(key, &element);
        if let Some(parameters) = parameters {
            entry.replace_parameters(element, parameters);
        }
        entry.bind(
            role,
            BoundOperation {
                interface: interface.id.clone(),
                operation: operation.clone(),
            },
        );
    }

    Ok(descriptor)
}

fn resolve_parameters(
    interface: &CapabilityInterface,
    operation: &OperationSpec,
    converter: &dyn TypeConverter,
) -> Result<Vec<ParameterDescriptor>, FilterError> {
    operation
        .parameters
        .iter()
        .enumerate()
        .map(|(position, spec)| {
            resolve_parameter(converter, position, spec).map_err(|source| {
                FilterError::DescriptorBuild {
                    interface: interface.id.clone(),
                    operation: operation.name.clone(),
                    position,
                    source,
                }
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::DefaultConverter;
    use crate::interface::{ParamType, ParameterSpec, Role};
    use serde_json::json;

    fn string(name: &str) -> ParameterSpec {
        ParameterSpec::new(ParamType::String).named(name)
    }

    #[test]
    fn overloads_bind_the_widest_variant() {
        let iface = CapabilityInterface::builder("x")
            .operation("beginX", [string("a")])
            .operation("beginX", [string("a"), string("b")])
            .operation("endX", [string("a")])
            .build();
        let descriptor = build_descriptor(&iface, &DefaultConverter).unwrap();

        assert_eq!(descriptor.len(), 1);
        let x = descriptor.element("x").unwrap();
        assert_eq!(x.begin_operation().unwrap().arity(), 2);
        assert_eq!(x.end_operation().unwrap().arity(), 1);
        assert!(x.on_operation().is_none());
        assert_eq!(x.parameters().len(), 2);
    }

    #[test]
    fn ties_keep_first_declared_operation() {
        let iface = CapabilityInterface::builder("t")
            .operation("onItem", [string("first")])
            .operation("onItem", [string("second")])
            .build();
        let descriptor = build_descriptor(&iface, &DefaultConverter).unwrap();
        let item = descriptor.element("item").unwrap();
        let bound = item.on_operation().unwrap();
        assert_eq!(bound.operation.parameters[0].name.as_deref(), Some("first"));
        assert_eq!(item.parameters()[0].name.as_deref(), Some("first"));
    }

    #[test]
    fn parameter_list_follows_widest_operation_of_any_role() {
        let iface = CapabilityInterface::builder("shape")
            .operation("beginSection", [string("id")])
            .operation("onSection", [string("id"), string("title")])
            .operation("endSection", [string("id")])
            .build();
        let descriptor = build_descriptor(&iface, &DefaultConverter).unwrap();
        let section = descriptor.element("section").unwrap();
        let names: Vec<_> = section
            .parameters()
            .iter()
            .map(|p| p.name.as_deref().unwrap())
            .collect();
        assert_eq!(names, ["id", "title"]);
        for role in Role::ALL {
            assert!(section.operation(role).is_some(), "missing {role}");
        }
    }

    #[test]
    fn element_keys_are_case_folded_but_names_are_kept() {
        let iface = CapabilityInterface::builder("case")
            .operation("beginHTMLBlock", [])
            .operation("endHtmlBlock", [])
            .build();
        let descriptor = build_descriptor(&iface, &DefaultConverter).unwrap();
        assert_eq!(descriptor.len(), 1);
        let (key, element) = descriptor.elements().next().unwrap();
        assert_eq!(key, "htmlblock");
        assert_eq!(element.name(), "hTMLBlock");
        assert!(element.end_operation().is_some());
    }

    #[test]
    fn operations_without_prefix_are_ignored() {
        let iface = CapabilityInterface::builder("plain")
            .operation("flush", [])
            .operation("on", [])
            .build();
        let descriptor = build_descriptor(&iface, &DefaultConverter).unwrap();
        assert!(descriptor.is_empty());
    }

    #[test]
    fn defaults_are_converted_once_per_parameter() {
        let iface = CapabilityInterface::builder("macro")
            .operation(
                "onMacro",
                [
                    string("id"),
                    ParameterSpec::new(ParamType::map_of(ParamType::String))
                        .named("parameters")
                        .with_default(""),
                    ParameterSpec::new(ParamType::Boolean)
                        .named("inline")
                        .with_default("false"),
                ],
            )
            .build();
        let descriptor = build_descriptor(&iface, &DefaultConverter).unwrap();
        let defaults: Vec<_> = descriptor
            .element("macro")
            .unwrap()
            .parameters()
            .iter()
            .map(|p| p.default.clone())
            .collect();
        assert_eq!(defaults, vec![None, Some(json!({})), Some(json!(false))]);
    }

    #[test]
    fn conversion_failure_names_the_parameter() {
        let iface = CapabilityInterface::builder("broken")
            .operation(
                "onLevel",
                [
                    string("label"),
                    ParameterSpec::new(ParamType::Integer).with_default("high"),
                ],
            )
            .build();
        let err = build_descriptor(&iface, &DefaultConverter).unwrap_err();
        match err {
            FilterError::DescriptorBuild {
                interface,
                operation,
                position,
                ..
            } => {
                assert_eq!(interface.as_str(), "broken");
                assert_eq!(operation, "onLevel");
                assert_eq!(position, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
