// Copyright (C) 2025, NTNU
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

//! A common error type for the math utilities.

use std::fmt;

#[derive(Debug, Clone)]
/// Errors that can occur in the linear algebra routines.
pub enum Error {
    /// The matrix handed to a direct solver is singular, or close enough that a pivot vanishes.
    SingularMatrix { pivot_row: usize },
    /// A vector or matrix argument does not have the length the operation requires.
    DimensionMismatch { expected: usize, actual: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::SingularMatrix { pivot_row } => {
                write!(f, "Matrix is singular or nearly singular (pivot row {})", pivot_row)
            },
            Error::DimensionMismatch { expected, actual } => {
                write!(f, "Dimension mismatch: expected length {}, got {}", expected, actual)
            },
        }
    }
}

impl std::error::Error for Error {}
