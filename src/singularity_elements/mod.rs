// Copyright (C) 2025, NTNU
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

//! Implementation of the necessary singularity elements for the panel method.
//!
//! All elements evaluate the quantity induced by a unit-strength singularity, with the actual
//! strength applied by the caller. The accumulating variants stream over the target points and
//! add into caller-provided buffers without allocating.

use serde::{Deserialize, Serialize};

use vortexmath::type_aliases::Float;

pub mod vortex_line;
pub mod vortex_ring;
pub mod horseshoe;
pub mod solid_angle;
pub mod vortex_sheet;
pub mod doublet;

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
/// Controls shared by all singularity elements to keep evaluations finite close to the elements
/// themselves.
pub struct Regularization {
    /// Distances entering denominators are evaluated as sqrt(r² + offset²), so the induced
    /// quantity has a well-defined limit for targets on the element itself.
    #[serde(default = "Regularization::default_offset")]
    pub offset: Float,
    /// Contributions from element parts closer to the target than this are skipped entirely. In
    /// particular, an edge touching the target at one of its end points does not contribute.
    #[serde(default = "Regularization::default_cutoff")]
    pub cutoff: Float,
}

impl Default for Regularization {
    fn default() -> Self {
        Self {
            offset: Self::default_offset(),
            cutoff: Self::default_cutoff(),
        }
    }
}

impl Regularization {
    pub fn default_offset() -> Float { 1.0e-8 }

    pub fn default_cutoff() -> Float { 1.0e-14 }

    #[inline(always)]
    /// The regularized length corresponding to a squared distance
    pub fn padded_length(&self, length_squared: Float) -> Float {
        (length_squared + self.offset * self.offset).sqrt()
    }
}

pub mod prelude {
    pub use super::Regularization;
    pub use super::vortex_line;
    pub use super::vortex_ring;
    pub use super::horseshoe;
    pub use super::vortex_sheet;
    pub use super::doublet;
}

#[cfg(test)]
mod tests;
