//! Call routing between filters and the interfaces they are used as.
//!
//! A [`FilterTarget`] is anything that natively implements a set of capability
//! interfaces and accepts operation calls by name. [`FilterProxy`] presents a
//! target under interfaces it does not declare itself; [`CompositeFilter`]
//! fans a call out to every member that declares it. Both are built through
//! [`DescriptorRegistry`](crate::registry::DescriptorRegistry).

pub mod composite;
pub mod proxy;

pub use composite::CompositeFilter;
pub use proxy::FilterProxy;

use crate::interface::{CapabilityInterface, InterfaceId};
use anyhow::Result;
use serde_json::Value;
use std::sync::Arc;

/// A filter that receives operation calls.
///
/// Operations are void: a call either succeeds or reports an error.
/// Implementations must be safe to call from several threads if they are
/// shared across threads; the dispatch layer adds no locking of its own.
pub trait FilterTarget: Send + Sync {
    /// Interfaces this target implements natively.
    fn interfaces(&self) -> &[Arc<CapabilityInterface>];

    /// Handle `operation` with positional `arguments`.
    fn invoke(&self, operation: &str, arguments: &[Value]) -> Result<()>;

    fn implements(&self, id: &InterfaceId) -> bool {
        self.interfaces().iter().any(|interface| &interface.id == id)
    }

    /// Whether one of the native interfaces declares `operation` with `arity`
    /// parameters.
    fn declares(&self, operation: &str, arity: usize) -> bool {
        self.interfaces()
            .iter()
            .any(|interface| interface.declares(operation, arity))
    }
}
