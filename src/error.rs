//! # Error Types
//!
//! Shared error enum for the exoviz pipeline and labeling layers.
//!
//! Construction-time type mismatches fail fast with [`VizError::InvalidArgument`];
//! everything else propagates from the collaborator that raised it (option
//! validation, missing variable metadata, pipeline wiring).

use thiserror::Error;

/// Errors raised by sources, filters, options, and label adapters
#[derive(Debug, Error)]
pub enum VizError {
    /// A source handle did not have the capability a constructor requires
    #[error("the supplied object of type '{found}' must be a {expected} object")]
    InvalidArgument {
        expected: &'static str,
        found: &'static str,
    },

    /// An override named an option that was never registered
    #[error("unknown option '{0}'")]
    UnknownOption(String),

    /// An override had the wrong type or a value outside the allow-list
    #[error("invalid value for option '{name}': {reason}")]
    InvalidOptionValue { name: String, reason: String },

    /// Variable labeling was requested but the source has no active variable
    #[error("no variable is active on the mesh source")]
    NoActiveVariable,

    /// A variable name that the mesh source does not carry
    #[error("unknown variable '{0}'")]
    UnknownVariable(String),

    /// A named data array the label mapper needs is missing from its input
    #[error("input dataset has no array named '{0}'")]
    MissingArray(String),

    /// A pipeline consumer was evaluated without its required input connection
    #[error("'{0}' has no input connection")]
    MissingInput(&'static str),
}
