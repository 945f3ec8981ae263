//! Descriptor cache and adapter factory.
//!
//! The registry maps an ordered list of interface ids to the merged
//! [`Descriptor`] for those interfaces. Descriptors are computed on first use
//! and shared as `Arc`s afterwards; nothing is evicted. Concurrent misses on
//! the same key may both compute the descriptor, and the last insert wins the
//! slot. Both results are equal, so callers never observe a difference.
//!
//! The adapter constructors ([`DescriptorRegistry::wrap`] and
//! [`DescriptorRegistry::compose`]) live here because both route calls using
//! descriptors from this cache.

use crate::convert::{DefaultConverter, TypeConverter};
use crate::descriptor::{Descriptor, build_descriptor};
use crate::dispatch::{CompositeFilter, FilterProxy, FilterTarget};
use crate::error::FilterError;
use crate::interface::{CapabilityInterface, InterfaceId};
use dashmap::DashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Shared descriptor cache keyed by ordered interface ids.
pub struct DescriptorRegistry {
    converter: Arc<dyn TypeConverter>,
    descriptors: DashMap<Vec<InterfaceId>, Arc<Descriptor>>,
}

impl Default for DescriptorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DescriptorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DescriptorRegistry")
            .field("cached", &self.descriptors.len())
            .finish_non_exhaustive()
    }
}

impl DescriptorRegistry {
    /// Registry using [`DefaultConverter`] for parameter defaults.
    pub fn new() -> Self {
        Self::with_converter(Arc::new(DefaultConverter))
    }

    pub fn with_converter(converter: Arc<dyn TypeConverter>) -> Self {
        Self {
            converter,
            descriptors: DashMap::new(),
        }
    }

    pub fn converter(&self) -> &Arc<dyn TypeConverter> {
        &self.converter
    }

    /// Number of cached descriptors, including single-interface entries
    /// computed while merging.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Descriptor for `interfaces`, merged in the order given.
    ///
    /// Each interface's own descriptor is cached under its single-id key, so
    /// later combinations reuse it. An empty request yields an empty
    /// descriptor.
    pub fn get_descriptor(
        &self,
        interfaces: &[Arc<CapabilityInterface>],
    ) -> Result<Arc<Descriptor>, FilterError> {
        let key: Vec<InterfaceId> = interfaces.iter().map(|i| i.id.clone()).collect();
        if let Some(cached) = self.descriptors.get(&key) {
            return Ok(Arc::clone(cached.value()));
        }

        let descriptor = match interfaces {
            [single] => build_descriptor(single, self.converter.as_ref())?,
            _ => {
                let mut merged = Descriptor::new();
                for interface in interfaces {
                    let part = self.get_descriptor(std::slice::from_ref(interface))?;
                    merged.merge(&part);
                }
                merged
            }
        };

        debug!(
            interfaces = ?key,
            elements = descriptor.len(),
            "computed filter descriptor"
        );
        let descriptor = Arc::new(descriptor);
        self.descriptors.insert(key, Arc::clone(&descriptor));
        Ok(descriptor)
    }

    /// Present `target` as an implementation of `interfaces`.
    ///
    /// Returns `target` itself when it already implements every requested
    /// interface. Otherwise returns a [`FilterProxy`] that declares exactly
    /// `interfaces` and forwards calls to `target` unchanged.
    pub fn wrap(
        &self,
        target: Arc<dyn FilterTarget>,
        interfaces: &[Arc<CapabilityInterface>],
    ) -> Result<Arc<dyn FilterTarget>, FilterError> {
        if interfaces.is_empty() {
            return Err(FilterError::InvalidArgument(
                "cannot wrap a filter in zero interfaces".to_string(),
            ));
        }

        if interfaces.iter().all(|i| target.implements(&i.id)) {
            return Ok(target);
        }

        let descriptor = self.get_descriptor(interfaces)?;
        let ids: Vec<&str> = interfaces.iter().map(|i| i.id.as_str()).collect();
        debug!(interfaces = ?ids, "wrapping filter in forwarding proxy");
        Ok(Arc::new(FilterProxy::new(
            target,
            interfaces.to_vec(),
            descriptor,
        )))
    }

    /// Fan calls out to every target that implements them.
    ///
    /// The composite implements the union of the targets' interfaces, in
    /// first-seen order.
    pub fn compose(
        &self,
        targets: Vec<Arc<dyn FilterTarget>>,
    ) -> Result<Arc<CompositeFilter>, FilterError> {
        if targets.is_empty() {
            return Err(FilterError::InvalidArgument(
                "cannot compose zero filters".to_string(),
            ));
        }

        let mut interfaces: Vec<Arc<CapabilityInterface>> = Vec::new();
        for target in &targets {
            for interface in target.interfaces() {
                if !interfaces.iter().any(|known| known.id == interface.id) {
                    interfaces.push(Arc::clone(interface));
                }
            }
        }

        let descriptor = self.get_descriptor(&interfaces)?;
        debug!(
            targets = targets.len(),
            interfaces = interfaces.len(),
            "composed filters"
        );
        Ok(Arc::new(CompositeFilter::new(targets, interfaces, descriptor)))
    }
}
