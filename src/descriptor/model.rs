//! Descriptor types: what a set of interfaces means element by element.

use crate::error::FilterError;
use crate::interface::{InterfaceId, OperationSpec, ParamType, Role, element_name};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq, Serialize)]
/// Resolved metadata for one parameter of an element.
pub struct ParameterDescriptor {
    pub position: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub ty: ParamType,
    /// Converted default; `None` means no default was declared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
/// An operation bound to an element role, with the interface that declares it.
pub struct BoundOperation {
    pub interface: InterfaceId,
    #[serde(flatten)]
    pub operation: OperationSpec,
}

impl BoundOperation {
    pub fn name(&self) -> &str {
        &self.operation.name
    }

    pub fn arity(&self) -> usize {
        self.operation.arity()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
/// One element with its parameter shape and per-role operation bindings.
pub struct ElementDescriptor {
    name: String,
    parameters: Vec<ParameterDescriptor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    begin: Option<BoundOperation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end: Option<BoundOperation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    on: Option<BoundOperation>,
}

impl ElementDescriptor {
    pub fn new(name: impl Into<String>, parameters: Vec<ParameterDescriptor>) -> Self {
        Self {
            name: name.into(),
            parameters,
            begin: None,
            end: None,
            on: None,
        }
    }

    /// Element name as derived from the operation that last set the
    /// parameter shape (first character lower-cased, rest untouched).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameters(&self) -> &[ParameterDescriptor] {
        &self.parameters
    }

    pub fn operation(&self, role: Role) -> Option<&BoundOperation> {
        self.slot(role).as_ref()
    }

    pub fn begin_operation(&self) -> Option<&BoundOperation> {
        self.begin.as_ref()
    }

    pub fn end_operation(&self) -> Option<&BoundOperation> {
        self.end.as_ref()
    }

    pub fn on_operation(&self) -> Option<&BoundOperation> {
        self.on.as_ref()
    }

    /// Expand `arguments` to the full parameter list of this element.
    ///
    /// Missing trailing arguments are taken from parameter defaults. A missing
    /// argument without a default, or more arguments than parameters, is
    /// rejected.
    pub fn complete_arguments(&self, arguments: &[Value]) -> Result<Vec<Value>, FilterError> {
        if arguments.len() > self.parameters.len() {
            return Err(FilterError::InvalidArgument(format!(
                "element `{}` takes {} parameter(s), got {}",
                self.name,
                self.parameters.len(),
                arguments.len()
            )));
        }

        let mut completed = arguments.to_vec();
        for parameter in &self.parameters[arguments.len()..] {
            let Some(default) = &parameter.default else {
                return Err(FilterError::InvalidArgument(format!(
                    "element `{}` has no default for parameter {}{}",
                    self.name,
                    parameter.position,
                    parameter
                        .name
                        .as_deref()
                        .map(|name| format!(" ({name})"))
                        .unwrap_or_default()
                )));
            };
            completed.push(default.clone());
        }
        Ok(completed)
    }

    /// Bind `candidate` to `role` unless the current binding has at least as
    /// many parameters. Returns whether the binding changed.
    pub(crate) fn bind(&mut self, role: Role, candidate: BoundOperation) -> bool {
        let slot = self.slot_mut(role);
        let replace = match slot.as_ref() {
            Some(current) => current.arity() < candidate.arity(),
            None => true,
        };
        if replace {
            *slot = Some(candidate);
        }
        replace
    }

    pub(crate) fn replace_parameters(&mut self, name: String, parameters: Vec<ParameterDescriptor>) {
        self.name = name;
        self.parameters = parameters;
    }

    fn slot(&self, role: Role) -> &Option<BoundOperation> {
        match role {
            Role::Begin => &self.begin,
            Role::End => &self.end,
            Role::On => &self.on,
        }
    }

    fn slot_mut(&mut self, role: Role) -> &mut Option<BoundOperation> {
        match role {
            Role::Begin => &mut self.begin,
            Role::End => &mut self.end,
            Role::On => &mut self.on,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
/// Elements of one or more interfaces keyed by lower-cased element name.
pub struct Descriptor {
    elements: BTreeMap<String, ElementDescriptor>,
}

impl Descriptor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Case-insensitive element lookup.
    pub fn element(&self, name: &str) -> Option<&ElementDescriptor> {
        self.elements.get(&name.to_lowercase())
    }

    /// Element targeted by an operation name such as `beginParagraph`.
    pub fn element_for_operation(&self, operation: &str) -> Option<&ElementDescriptor> {
        self.element(&element_name(operation)?)
    }

    /// Elements in lower-cased name order, with their lookup keys.
    pub fn elements(&self) -> impl Iterator<Item = (&str, &ElementDescriptor)> {
        self.elements.iter().map(|(key, element)| (key.as_str(), element))
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Merge `other` into this descriptor.
    ///
    /// New elements are copied. For elements present on both sides each role
    /// keeps the binding with more parameters (ties keep the existing one), and
    /// the parameter list follows the longer side.
    pub fn merge(&mut self, other: &Descriptor) {
        for (key, incoming) in &other.elements {
            let Some(current) = self.elements.get_mut(key) else {
                self.elements.insert(key.clone(), incoming.clone());
                continue;
            };
            if incoming.parameters.len() > current.parameters.len() {
                current.replace_parameters(incoming.name.clone(), incoming.parameters.clone());
            }
            for role in Role::ALL {
                if let Some(operation) = incoming.operation(role) {
                    current.bind(role, operation.clone());
                }
            }
        }
    }

    pub(crate) fn element_entry(&mut self, key: String, name: &str) -> &mut ElementDescriptor {
        self.elements
            .entry(key)
            .or_insert_with(|| ElementDescriptor::new(name, Vec::new()))
    }

    pub(crate) fn parameter_count(&self, key: &str) -> Option<usize> {
        self.elements.get(key).map(|element| element.parameters.len())
    }
}
