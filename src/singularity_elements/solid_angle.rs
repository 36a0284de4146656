// Copyright (C) 2025, NTNU
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

//! Signed solid angles of triangles and flat polygons, used by the doublet and vortex sheet
//! elements.

use vortexmath::spatial_vector::SpatialVector;
use vortexmath::type_aliases::Float;

use super::Regularization;

#[inline(always)]
/// Signed solid angle subtended by a triangle as seen from the target point, using the expression
/// from Van Oosterom & Strackee (1983). The sign is positive when the target lies on the side the
/// corner ordering's right-hand normal points to.
pub fn triangle_solid_angle(
    corner_points: &[SpatialVector; 3],
    target: SpatialVector,
    regularization: Regularization,
) -> Float {
    let r_1 = target - corner_points[0];
    let r_2 = target - corner_points[1];
    let r_3 = target - corner_points[2];

    let cutoff_sq = regularization.cutoff * regularization.cutoff;

    // The solid angle is ill-defined from a corner of the triangle itself
    if r_1.length_squared() < cutoff_sq ||
       r_2.length_squared() < cutoff_sq ||
       r_3.length_squared() < cutoff_sq
    {
        return 0.0;
    }

    let r_1_length = regularization.padded_length(r_1.length_squared());
    let r_2_length = regularization.padded_length(r_2.length_squared());
    let r_3_length = regularization.padded_length(r_3.length_squared());

    let numerator = r_1.dot(r_2.cross(r_3));

    let denominator =
        r_1_length * r_2_length * r_3_length +
        r_1.dot(r_2) * r_3_length +
        r_1.dot(r_3) * r_2_length +
        r_2.dot(r_3) * r_1_length;

    2.0 * numerator.atan2(denominator)
}

#[inline(always)]
/// Signed solid angle of a polygon with three or four corners, summed over a triangle fan from
/// the first corner. The corners do not have to be coplanar.
pub fn polygon_solid_angle(
    corner_points: &[SpatialVector],
    target: SpatialVector,
    regularization: Regularization,
) -> Float {
    let mut solid_angle = 0.0;

    for i_point in 1..corner_points.len() - 1 {
        let triangle = [
            corner_points[0],
            corner_points[i_point],
            corner_points[i_point + 1],
        ];

        solid_angle += triangle_solid_angle(&triangle, target, regularization);
    }

    solid_angle
}
