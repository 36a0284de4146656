// Copyright (C) 2025, NTNU
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

//! A semi-infinite horseshoe vortex: the rigid wake strip attached to a trailing edge segment.
//!
//! The strip consists of a semi-infinite filament arriving from infinity at the first trailing
//! edge node, the finite bound segment between the two nodes, and a second semi-infinite filament
//! leaving the second node towards infinity. The circulation of the bound segment therefore runs
//! in the same sense as the shedding panel's ring along the same edge.

use vortexmath::spatial_vector::SpatialVector;
use vortexmath::type_aliases::Float;

use super::Regularization;
use super::vortex_line;

#[inline(always)]
/// Induced velocity with unit circulation. `start_direction` and `end_direction` are the unit
/// directions of the two semi-infinite filaments, attached at the first and second trailing edge
/// point respectively.
pub fn induced_velocity_with_unit_strength(
    trailing_edge_points: &[SpatialVector; 2],
    start_direction: SpatialVector,
    end_direction: SpatialVector,
    ctrl_point: SpatialVector,
    regularization: Regularization,
) -> SpatialVector {
    let mut induced_velocity = SpatialVector::default();

    // Filament arriving from infinity at the first trailing edge point, traversed against its
    // outgoing direction
    induced_velocity -= vortex_line::induced_velocity_from_semi_infinite_line_with_unit_strength(
        trailing_edge_points[0],
        start_direction,
        ctrl_point,
        regularization,
    );

    // Bound segment along the trailing edge
    induced_velocity += vortex_line::induced_velocity_from_line_with_unit_strength(
        trailing_edge_points,
        ctrl_point,
        regularization,
    );

    // Filament leaving the second trailing edge point towards infinity
    induced_velocity += vortex_line::induced_velocity_from_semi_infinite_line_with_unit_strength(
        trailing_edge_points[1],
        end_direction,
        ctrl_point,
        regularization,
    );

    induced_velocity
}

/// Accumulates the induced velocity from a horseshoe of the given circulation into the output
/// buffer, one entry per target point.
pub fn add_induced_velocities(
    trailing_edge_points: &[SpatialVector; 2],
    start_direction: SpatialVector,
    end_direction: SpatialVector,
    circulation: Float,
    targets: &[SpatialVector],
    regularization: Regularization,
    out: &mut [SpatialVector],
) {
    for (i_target, &target) in targets.iter().enumerate() {
        out[i_target] += induced_velocity_with_unit_strength(
            trailing_edge_points, start_direction, end_direction, target, regularization
        ) * circulation;
    }
}

/// Accumulates the induced velocity projected on a per-target unit direction, writing scalars
/// instead of vectors.
pub fn add_projected_induced_velocities(
    trailing_edge_points: &[SpatialVector; 2],
    start_direction: SpatialVector,
    end_direction: SpatialVector,
    circulation: Float,
    targets: &[SpatialVector],
    directions: &[SpatialVector],
    regularization: Regularization,
    out: &mut [Float],
) {
    for (i_target, &target) in targets.iter().enumerate() {
        let u_i = induced_velocity_with_unit_strength(
            trailing_edge_points, start_direction, end_direction, target, regularization
        );

        out[i_target] += u_i.dot(directions[i_target]) * circulation;
    }
}
