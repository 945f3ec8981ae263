use crate::descriptor::Descriptor;
use crate::dispatch::FilterTarget;
use crate::error::FilterError;
use crate::interface::CapabilityInterface;
use anyhow::{Context, Result};
use serde_json::Value;
use std::sync::Arc;
use tracing::trace;

/// Presents several filters as one.
///
/// A call is delivered, with the same arguments, to each member that declares
/// the operation, in the order the members were supplied. Members that do not
/// declare it are skipped. The first member to fail stops the fan-out and its
/// error is returned with the member position attached.
///
/// Declared signatures decide routing, not the descriptor: narrower overloads
/// are dropped from the descriptor but still reach the members that declare
/// them. The descriptor is kept for callers that introspect the composite.
pub struct CompositeFilter {
    targets: Vec<Arc<dyn FilterTarget>>,
    interfaces: Vec<Arc<CapabilityInterface>>,
    descriptor: Arc<Descriptor>,
}

impl CompositeFilter {
    pub(crate) fn new(
        targets: Vec<Arc<dyn FilterTarget>>,
        interfaces: Vec<Arc<CapabilityInterface>>,
        descriptor: Arc<Descriptor>,
    ) -> Self {
        Self {
            targets,
            interfaces,
            descriptor,
        }
    }

    pub fn targets(&self) -> &[Arc<dyn FilterTarget>] {
        &self.targets
    }

    /// Descriptor of the union of the members' interfaces.
    pub fn descriptor(&self) -> &Arc<Descriptor> {
        &self.descriptor
    }
}

impl FilterTarget for CompositeFilter {
    fn interfaces(&self) -> &[Arc<CapabilityInterface>] {
        &self.interfaces
    }

    fn invoke(&self, operation: &str, arguments: &[Value]) -> Result<()> {
        let arity = arguments.len();
        if !self.declares(operation, arity) {
            return Err(FilterError::UnsupportedOperation {
                operation: operation.to_string(),
                arity,
            }
            .into());
        }

        for (index, target) in self.targets.iter().enumerate() {
            if !target.declares(operation, arity) {
                trace!(operation, index, "member does not declare operation");
                continue;
            }
            target
                .invoke(operation, arguments)
                .with_context(|| format!("filter #{index} failed handling `{operation}`"))?;
        }
        Ok(())
    }
}
