use crate::descriptor::Descriptor;
use crate::dispatch::FilterTarget;
use crate::error::FilterError;
use crate::interface::CapabilityInterface;
use anyhow::Result;
use serde_json::Value;
use std::sync::Arc;
use tracing::trace;

/// Forwards calls declared by a fixed interface set to a target that does not
/// declare them itself.
///
/// Arguments are passed through unchanged. Signatures outside the wrapped
/// interfaces are rejected with [`FilterError::UnsupportedOperation`] before
/// the target sees them.
///
/// Routing checks full signatures against the wrapped interfaces, since the
/// descriptor only keeps the widest overload per role. The descriptor is the
/// registry's cached entry for the same interface set and is held for callers
/// that introspect the proxy.
pub struct FilterProxy {
    target: Arc<dyn FilterTarget>,
    interfaces: Vec<Arc<CapabilityInterface>>,
    descriptor: Arc<Descriptor>,
}

impl FilterProxy {
    pub(crate) fn new(
        target: Arc<dyn FilterTarget>,
        interfaces: Vec<Arc<CapabilityInterface>>,
        descriptor: Arc<Descriptor>,
    ) -> Self {
        Self {
            target,
            interfaces,
            descriptor,
        }
    }

    pub fn target(&self) -> &Arc<dyn FilterTarget> {
        &self.target
    }

    /// Descriptor of the wrapped interface set.
    pub fn descriptor(&self) -> &Arc<Descriptor> {
        &self.descriptor
    }
}

impl FilterTarget for FilterProxy {
    fn interfaces(&self) -> &[Arc<CapabilityInterface>] {
        &self.interfaces
    }

    fn invoke(&self, operation: &str, arguments: &[Value]) -> Result<()> {
        if !self.declares(operation, arguments.len()) {
            return Err(FilterError::UnsupportedOperation {
                operation: operation.to_string(),
                arity: arguments.len(),
            }
            .into());
        }
        trace!(operation, arity = arguments.len(), "forwarding call");
        self.target.invoke(operation, arguments)
    }
}
