// Copyright (C) 2025, NTNU
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

//! A uniform vortex sheet covering a flat panel.
//!
//! The sheet carries a constant in-plane vorticity with a component along the panel tangent and
//! one along the panel's oblique direction. Since the vorticity vector is constant over the
//! panel, the induced velocity is the vorticity crossed with the gradient integral of a
//! constant-strength source panel, for which the classical closed form exists: per-edge
//! logarithmic terms in the panel plane plus a solid angle term along the normal
//! (Katz & Plotkin, Low-Speed Aerodynamics, ch. 10).

use vortexmath::spatial_vector::SpatialVector;
use vortexmath::spatial_vector::geometry_functions;
use vortexmath::type_aliases::Float;
use vortexmath::consts::PI;

use super::Regularization;
use super::solid_angle;

const FOUR_PI_INVERSE: Float = 1.0 / (4.0 * PI);

#[inline(always)]
/// Gradient integral of a unit-strength constant source distribution over the panel,
/// `(1/4π) ∫ r/|r|³ dA`. The corner ordering defines the panel normal by the right-hand rule.
pub fn source_velocity_with_unit_strength(
    corner_points: &[SpatialVector],
    ctrl_point: SpatialVector,
    regularization: Regularization,
) -> SpatialVector {
    let normal = match corner_points.len() {
        3 => geometry_functions::normal_of_triangle(
            &[corner_points[0], corner_points[1], corner_points[2]]
        ),
        _ => geometry_functions::normal_of_quadrilateral(
            &[corner_points[0], corner_points[1], corner_points[2], corner_points[3]]
        ),
    };

    let mut in_plane = SpatialVector::default();

    for i_point in 0..corner_points.len() {
        let next = (i_point + 1) % corner_points.len();

        let edge = corner_points[next] - corner_points[i_point];
        let edge_length = edge.length();

        // Degenerate edges, as in a quadrilateral with a repeated corner, do not contribute
        if edge_length <= regularization.cutoff {
            continue;
        }

        let r_a_sq = (ctrl_point - corner_points[i_point]).length_squared();
        let r_b_sq = (ctrl_point - corner_points[next]).length_squared();

        let r_a = regularization.padded_length(r_a_sq);
        let r_b = regularization.padded_length(r_b_sq);

        let denominator = r_a + r_b - edge_length;

        // Target on the edge itself with zero offset
        if denominator <= regularization.cutoff {
            continue;
        }

        // In-plane normal of the edge, pointing out of the panel
        let edge_normal = (edge / edge_length).cross(normal);

        in_plane += edge_normal * ((r_a + r_b + edge_length) / denominator).ln();
    }

    let omega = solid_angle::polygon_solid_angle(corner_points, ctrl_point, regularization);

    (in_plane + normal * omega) * FOUR_PI_INVERSE
}

#[inline(always)]
/// Induced velocity from a uniform vortex sheet with tangential strength `gamma_t` along the
/// panel tangent and oblique strength `gamma_o` along the panel's second in-plane direction.
pub fn induced_velocity(
    corner_points: &[SpatialVector],
    tangent: SpatialVector,
    oblique: SpatialVector,
    gamma_t: Float,
    gamma_o: Float,
    ctrl_point: SpatialVector,
    regularization: Regularization,
) -> SpatialVector {
    let vorticity = tangent * gamma_t + oblique * gamma_o;

    vorticity.cross(
        source_velocity_with_unit_strength(corner_points, ctrl_point, regularization)
    )
}

/// Accumulates the induced velocity from a uniform vortex sheet into the output buffer, one
/// entry per target point.
pub fn add_induced_velocities(
    corner_points: &[SpatialVector],
    tangent: SpatialVector,
    oblique: SpatialVector,
    gamma_t: Float,
    gamma_o: Float,
    targets: &[SpatialVector],
    regularization: Regularization,
    out: &mut [SpatialVector],
) {
    for (i_target, &target) in targets.iter().enumerate() {
        out[i_target] += induced_velocity(
            corner_points, tangent, oblique, gamma_t, gamma_o, target, regularization
        );
    }
}

/// Accumulates the induced velocity projected on a per-target unit direction, writing scalars
/// instead of vectors.
pub fn add_projected_induced_velocities(
    corner_points: &[SpatialVector],
    tangent: SpatialVector,
    oblique: SpatialVector,
    gamma_t: Float,
    gamma_o: Float,
    targets: &[SpatialVector],
    directions: &[SpatialVector],
    regularization: Regularization,
    out: &mut [Float],
) {
    for (i_target, &target) in targets.iter().enumerate() {
        let u_i = induced_velocity(
            corner_points, tangent, oblique, gamma_t, gamma_o, target, regularization
        );

        out[i_target] += u_i.dot(directions[i_target]);
    }
}
