//! Filter interface introspection and call routing.
//!
//! A filter interface is a table of operations named `begin<Element>`,
//! `end<Element>` and `on<Element>`. This crate derives element descriptors
//! from those tables (which operation plays each role, what the parameters are
//! called, what their defaults are), caches them in a [`DescriptorRegistry`],
//! and builds adapters that either forward calls to a single target
//! ([`FilterProxy`]) or fan them out across several ([`CompositeFilter`]).
//!
//! Interfaces can be declared in code with [`CapabilityInterface::builder`] or
//! loaded from a JSON catalog through [`InterfaceIndex`].

pub mod catalog;
pub mod convert;
pub mod descriptor;
pub mod dispatch;
pub mod error;
pub mod interface;
pub mod registry;
pub mod runtime;
mod schema_loader;

pub use catalog::{CATALOG_SCHEMA_VERSION, InterfaceCatalog, InterfaceIndex, load_catalog_from_path};
pub use convert::{DefaultConverter, TypeConverter};
pub use descriptor::{
    BoundOperation, Descriptor, ElementDescriptor, ParameterDescriptor, build_descriptor,
};
pub use dispatch::{CompositeFilter, FilterProxy, FilterTarget};
pub use error::{ConversionError, FilterError};
pub use interface::{
    CapabilityInterface, InterfaceId, OperationSpec, ParamType, ParameterSpec, Role, element_name,
};
pub use registry::DescriptorRegistry;
