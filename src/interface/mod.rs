//! Capability interfaces as explicit operation tables.
//!
//! Interfaces are plain data: an id plus ordered operations whose names encode
//! a role (`begin`/`end`/`on`) and an element. Everything downstream
//! (descriptors, dispatch adapters) reads these tables instead of inspecting
//! types at runtime.

pub mod identity;
pub mod model;
pub mod naming;

pub use identity::{InterfaceId, ParamType};
pub use model::{CapabilityInterface, InterfaceBuilder, OperationSpec, ParameterSpec};
pub use naming::{PREFIX_BEGIN, PREFIX_END, PREFIX_ON, Role, element_name, split_operation_name};
