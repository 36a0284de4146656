// Copyright (C) 2025, NTNU
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

//! An implementation of a common error type that is used throughout the library.

use std::fmt;

use vortexmath::type_aliases::Float;

#[derive(Debug)]
/// A common error type intended to represent the various errors that can occur while using this
/// library.
pub enum Error {
    /// Interface to the standard library IO error
    IoError(std::io::Error),
    /// Interface to the Serde JSON error
    SerdeJsonError(serde_json::Error),
    /// Interface to the math library error, surfaced unchanged from the linear solver
    MathError(vortexmath::error::Error),
    /// An array argument does not have the length required by the operation
    ShapeMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },
    /// A post-processing operation was requested on a body that has not been solved yet
    UnsolvedBody { field: String },
    /// A post-processing operation requires a field that is not stored on the body
    MissingField { field: String },
    /// A direction that must have unit length does not
    NonUnitVector { name: String, length: Float },
    /// A shedding record refers to invalid indices, or its edges do not coincide
    InvalidTrailingEdge { index: usize, reason: String },
    /// A custom error that can be created from a string
    CustomStringError(String),
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::IoError(error)
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::SerdeJsonError(error)
    }
}

impl From<vortexmath::error::Error> for Error {
    fn from(error: vortexmath::error::Error) -> Self {
        Error::MathError(error)
    }
}

impl From<String> for Error {
    fn from(error: String) -> Self {
        Error::CustomStringError(error)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::IoError(error) => write!(f, "IO error: {}", error),
            Error::SerdeJsonError(error) => write!(f, "Serde JSON error: {}", error),
            Error::MathError(error) => write!(f, "Math error: {}", error),
            Error::ShapeMismatch { name, expected, actual } => {
                write!(f, "Shape mismatch for '{}': expected length {}, got {}", name, expected, actual)
            },
            Error::UnsolvedBody { field } => {
                write!(f, "Cannot compute '{}' on an unsolved body: call solve first", field)
            },
            Error::MissingField { field } => {
                write!(f, "Field '{}' is not stored on the body", field)
            },
            Error::NonUnitVector { name, length } => {
                write!(f, "Direction '{}' must have unit length, got {}", name, length)
            },
            Error::InvalidTrailingEdge { index, reason } => {
                write!(f, "Invalid trailing edge record {}: {}", index, reason)
            },
            Error::CustomStringError(error) => write!(f, "Custom string error: {}", error),
        }
    }
}

impl std::error::Error for Error {}

/// Validates the length of an array argument, reporting both the expected and the actual length
/// on mismatch.
pub(crate) fn check_length(name: &str, actual: usize, expected: usize) -> Result<(), Error> {
    if actual != expected {
        return Err(Error::ShapeMismatch {
            name: name.to_string(),
            expected,
            actual,
        });
    }

    Ok(())
}
