// Copyright (C) 2025, NTNU
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

//! Scalar potentials of constant-strength doublet panels.
//!
//! The potential of a constant doublet distribution is proportional to the signed solid angle the
//! panel subtends at the target, `φ = −μ Ω / 4π`, with the doublet axis along the right-hand
//! normal of the corner ordering. The same expression covers the semi-infinite wake strip behind
//! a trailing edge by closing the strip far downstream, where the remaining solid angle decays
//! quadratically with the truncation distance.

use vortexmath::spatial_vector::SpatialVector;
use vortexmath::type_aliases::Float;
use vortexmath::consts::PI;

use super::Regularization;
use super::solid_angle;

const FOUR_PI_INVERSE: Float = 1.0 / (4.0 * PI);

/// How far downstream, in trailing edge segment lengths, the semi-infinite wake strip is closed
const FAR_WAKE_EXTENT_RATIO: Float = 1.0e6;

#[inline(always)]
/// Potential of a constant-strength doublet panel with unit strength
pub fn potential_with_unit_strength(
    corner_points: &[SpatialVector],
    target: SpatialVector,
    regularization: Regularization,
) -> Float {
    -solid_angle::polygon_solid_angle(corner_points, target, regularization) * FOUR_PI_INVERSE
}

/// Accumulates the potential of a doublet panel of the given strength into the output buffer,
/// one entry per target point.
pub fn add_potentials(
    corner_points: &[SpatialVector],
    strength: Float,
    targets: &[SpatialVector],
    regularization: Regularization,
    out: &mut [Float],
) {
    for (i_target, &target) in targets.iter().enumerate() {
        out[i_target] +=
            potential_with_unit_strength(corner_points, target, regularization) * strength;
    }
}

#[inline(always)]
/// Potential of the semi-infinite constant-strength doublet strip shed from a trailing edge
/// segment, closed between the two semi-infinite edge directions.
pub fn wake_strip_potential_with_unit_strength(
    trailing_edge_points: &[SpatialVector; 2],
    start_direction: SpatialVector,
    end_direction: SpatialVector,
    target: SpatialVector,
    regularization: Regularization,
) -> Float {
    let extent =
        FAR_WAKE_EXTENT_RATIO * (trailing_edge_points[1] - trailing_edge_points[0]).length();

    let strip_points = [
        trailing_edge_points[0],
        trailing_edge_points[1],
        trailing_edge_points[1] + end_direction * extent,
        trailing_edge_points[0] + start_direction * extent,
    ];

    -solid_angle::polygon_solid_angle(&strip_points, target, regularization) * FOUR_PI_INVERSE
}

/// Accumulates the potential of a wake strip of the given strength into the output buffer, one
/// entry per target point.
pub fn add_wake_strip_potentials(
    trailing_edge_points: &[SpatialVector; 2],
    start_direction: SpatialVector,
    end_direction: SpatialVector,
    strength: Float,
    targets: &[SpatialVector],
    regularization: Regularization,
    out: &mut [Float],
) {
    for (i_target, &target) in targets.iter().enumerate() {
        out[i_target] += wake_strip_potential_with_unit_strength(
            trailing_edge_points, start_direction, end_direction, target, regularization
        ) * strength;
    }
}
