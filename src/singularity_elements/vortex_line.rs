// Copyright (C) 2025, NTNU
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

//! Functionality for straight vortex filaments and their induced velocities.

use vortexmath::spatial_vector::SpatialVector;
use vortexmath::type_aliases::Float;
use vortexmath::consts::PI;

use super::Regularization;

const FOUR_PI_INVERSE: Float = 1.0 / (4.0 * PI);

#[inline(always)]
/// Induced velocity from a finite straight vortex filament with unit circulation, running from
/// the first to the second line point.
///
/// Implementation of the induced velocity function based on the user manual for VSAERO.
/// Link: <https://ntrs.nasa.gov/api/citations/19900004884/downloads/19900004884.pdf>
pub fn induced_velocity_from_line_with_unit_strength(
    line_points: &[SpatialVector; 2],
    ctrl_point: SpatialVector,
    regularization: Regularization,
) -> SpatialVector {
    let r_1 = ctrl_point - line_points[0];
    let r_2 = ctrl_point - line_points[1];

    let r_1_length_sq = r_1.length_squared();
    let r_2_length_sq = r_2.length_squared();

    let cutoff_sq = regularization.cutoff * regularization.cutoff;

    // A filament end point touching the target does not contribute
    if r_1_length_sq < cutoff_sq || r_2_length_sq < cutoff_sq {
        return SpatialVector::default();
    }

    let r_1_length = regularization.padded_length(r_1_length_sq);
    let r_2_length = regularization.padded_length(r_2_length_sq);

    let r_1_r_2 = r_1_length * r_2_length;

    let denominator = r_1_r_2 * (r_1_r_2 + r_1.dot(r_2));

    if denominator > 0.0 {
        let k = (r_1_length + r_2_length) / denominator;

        r_1.cross(r_2) * (k * FOUR_PI_INVERSE)
    }
    else {
        SpatialVector::default()
    }
}

#[inline(always)]
/// Induced velocity from a semi-infinite straight vortex filament with unit circulation, starting
/// at the given point and extending to infinity along the given unit direction. The circulation
/// runs from the start point towards infinity.
///
/// The expression is the far-end limit of the finite filament formula:
/// u = (d̂ × r) / (4π · |r| · (|r| − r·d̂))
pub fn induced_velocity_from_semi_infinite_line_with_unit_strength(
    start_point: SpatialVector,
    direction: SpatialVector,
    ctrl_point: SpatialVector,
    regularization: Regularization,
) -> SpatialVector {
    let r = ctrl_point - start_point;

    let r_length_sq = r.length_squared();

    if r_length_sq < regularization.cutoff * regularization.cutoff {
        return SpatialVector::default();
    }

    let r_length = regularization.padded_length(r_length_sq);

    let denominator = r_length * (r_length - r.dot(direction));

    if denominator > 0.0 {
        direction.cross(r) * (FOUR_PI_INVERSE / denominator)
    }
    else {
        SpatialVector::default()
    }
}
