//! Element descriptors derived from capability interfaces.
//!
//! `builder` turns one interface into a [`Descriptor`]; `parameter` resolves
//! parameter names and defaults; `model` holds the resulting types and the
//! merge rules the registry uses to combine interfaces.

pub mod builder;
pub mod model;
pub mod parameter;

pub use builder::build_descriptor;
pub use model::{BoundOperation, Descriptor, ElementDescriptor, ParameterDescriptor};
pub use parameter::resolve_parameter;
