//! Statically declared operation tables.
//!
//! A [`CapabilityInterface`] lists the operations a filter may implement. Each
//! [`OperationSpec`] carries its parameters in order; parameter names and
//! textual defaults are structured fields rather than attached markers. The
//! same types deserialize from catalog files (see [`crate::catalog`]).

use crate::interface::identity::{InterfaceId, ParamType};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
/// One declared parameter: semantic type plus optional name and default text.
pub struct ParameterSpec {
    #[serde(rename = "type")]
    pub ty: ParamType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

impl ParameterSpec {
    pub fn new(ty: ParamType) -> Self {
        Self {
            ty,
            name: None,
            default: None,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attach a default expressed as text; it is converted to `ty` when the
    /// descriptor is built.
    pub fn with_default(mut self, text: impl Into<String>) -> Self {
        self.default = Some(text.into());
        self
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
/// A named operation with its ordered parameter list.
pub struct OperationSpec {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<ParameterSpec>,
}

impl OperationSpec {
    pub fn new(name: impl Into<String>, parameters: impl IntoIterator<Item = ParameterSpec>) -> Self {
        Self {
            name: name.into(),
            parameters: parameters.into_iter().collect(),
        }
    }

    pub fn arity(&self) -> usize {
        self.parameters.len()
    }

    /// Whether this operation answers a call by `name` with `arity` arguments.
    pub fn matches(&self, name: &str, arity: usize) -> bool {
        self.name == name && self.arity() == arity
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Deserialize)]
/// A capability interface: an id and the operations it declares.
pub struct CapabilityInterface {
    pub id: InterfaceId,
    #[serde(default)]
    pub description: Option<String>,
    pub operations: Vec<OperationSpec>,
}

impl CapabilityInterface {
    pub fn builder(id: impl Into<String>) -> InterfaceBuilder {
        InterfaceBuilder {
            interface: CapabilityInterface {
                id: InterfaceId(id.into()),
                description: None,
                operations: Vec::new(),
            },
        }
    }

    /// Look up the operation matching a call signature.
    pub fn operation(&self, name: &str, arity: usize) -> Option<&OperationSpec> {
        self.operations.iter().find(|op| op.matches(name, arity))
    }

    pub fn declares(&self, name: &str, arity: usize) -> bool {
        self.operation(name, arity).is_some()
    }
}

/// Incremental construction of a [`CapabilityInterface`] in code.
pub struct InterfaceBuilder {
    interface: CapabilityInterface,
}

impl InterfaceBuilder {
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.interface.description = Some(description.into());
        self
    }

    pub fn operation(
        mut self,
        name: impl Into<String>,
        parameters: impl IntoIterator<Item = ParameterSpec>,
    ) -> Self {
        self.interface
            .operations
            .push(OperationSpec::new(name, parameters));
        self
    }

    pub fn build(self) -> CapabilityInterface {
        self.interface
    }
}
