//! Error types shared by descriptor construction and dispatch.
//!
//! Descriptor building and adapter construction report [`FilterError`] so
//! callers can match on the failure kind. Target invocations return
//! `anyhow::Result` instead; adapters surface a [`FilterError`] through it when
//! they reject a call themselves, and callers can `downcast_ref` to inspect it.

use crate::interface::{InterfaceId, ParamType};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FilterError {
    #[error(
        "cannot build descriptor for `{interface}`: default of parameter {position} of `{operation}` is invalid"
    )]
    DescriptorBuild {
        interface: InterfaceId,
        operation: String,
        position: usize,
        #[source]
        source: ConversionError,
    },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("operation `{operation}` with {arity} argument(s) is not declared by this adapter")]
    UnsupportedOperation { operation: String, arity: usize },
}

/// Failure reported by a [`TypeConverter`](crate::convert::TypeConverter).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("cannot convert {text:?} to {ty}: {reason}")]
    Invalid {
        ty: ParamType,
        text: String,
        reason: String,
    },

    #[error("no conversion from text to {0}")]
    Unsupported(ParamType),
}

impl ConversionError {
    pub(crate) fn invalid(ty: &ParamType, text: &str, reason: impl Into<String>) -> Self {
        ConversionError::Invalid {
            ty: ty.clone(),
            text: text.to_string(),
            reason: reason.into(),
        }
    }
}
