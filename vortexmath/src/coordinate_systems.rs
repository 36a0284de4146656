// Copyright (C) 2025, NTNU
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

//! An orthonormal coordinate frame, used to place a body in the global coordinate system.

use serde::{Deserialize, Serialize};

use crate::spatial_vector::SpatialVector;
use crate::type_aliases::Float;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
/// A right-handed orthonormal frame. The axes are the frame's basis vectors expressed in global
/// coordinates, and the origin is the location of the frame in global coordinates.
pub struct CoordinateFrame {
    pub axes: [SpatialVector; 3],
    pub origin: SpatialVector,
}

impl Default for CoordinateFrame {
    fn default() -> Self {
        Self {
            axes: [
                SpatialVector::unit_x(),
                SpatialVector::unit_y(),
                SpatialVector::unit_z(),
            ],
            origin: SpatialVector::default(),
        }
    }
}

impl CoordinateFrame {
    /// Checks that the axes have unit length and are mutually orthogonal within the given
    /// tolerance.
    pub fn is_orthonormal(&self, tolerance: Float) -> bool {
        for i in 0..3 {
            if (self.axes[i].length() - 1.0).abs() > tolerance {
                return false;
            }

            for j in (i + 1)..3 {
                if self.axes[i].dot(self.axes[j]).abs() > tolerance {
                    return false;
                }
            }
        }

        true
    }

    /// Transforms a point given in frame coordinates to global coordinates.
    pub fn point_to_global(&self, point: SpatialVector) -> SpatialVector {
        self.vector_to_global(point) + self.origin
    }

    /// Transforms a point given in global coordinates to frame coordinates.
    pub fn point_from_global(&self, point: SpatialVector) -> SpatialVector {
        self.vector_from_global(point - self.origin)
    }

    /// Transforms a direction given in frame coordinates to global coordinates.
    pub fn vector_to_global(&self, vector: SpatialVector) -> SpatialVector {
        self.axes[0] * vector[0] + self.axes[1] * vector[1] + self.axes[2] * vector[2]
    }

    /// Transforms a direction given in global coordinates to frame coordinates.
    pub fn vector_from_global(&self, vector: SpatialVector) -> SpatialVector {
        SpatialVector::new(
            self.axes[0].dot(vector),
            self.axes[1].dot(vector),
            self.axes[2].dot(vector),
        )
    }
}
