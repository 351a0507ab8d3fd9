//! Error types surfaced by the picking pipeline.

use std::fmt;

/// Errors produced while configuring or running a [`crate::Picker`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerError {
    /// The requested range or segment layout cannot be operated on.
    Configuration(String),
    /// A structure holds fewer elements than an operation requires.
    EmptyStructure {
        structure: &'static str,
        needed: usize,
        len: usize,
    },
}

impl fmt::Display for PickerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration(msg) => write!(f, "invalid configuration: {msg}"),
            Self::EmptyStructure {
                structure,
                needed,
                len,
            } => {
                write!(f, "{structure} holds {len} elements ({needed} required)")
            }
        }
    }
}

impl std::error::Error for PickerError {}
