// Copyright (C) 2025, NTNU
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

//! A constant-strength vortex ring tracing the boundary of a flat panel.
//!
//! The induced velocity is the Biot-Savart sum over the closed polygonal loop formed by the
//! panel's corner points. For targets far from the panel the ring is equivalent to a point
//! doublet, which [RingPanel] exploits as an optional shortcut when sampling large off-body
//! point clouds.

use vortexmath::spatial_vector::SpatialVector;
use vortexmath::spatial_vector::geometry_functions;
use vortexmath::type_aliases::Float;
use vortexmath::consts::PI;

use super::Regularization;
use super::vortex_line;

const FOUR_PI_INVERSE: Float = 1.0 / (4.0 * PI);

#[inline(always)]
/// Induced velocity from a closed vortex ring with unit circulation around the given corner
/// points (three or four), in corner order.
pub fn induced_velocity_with_unit_strength(
    corner_points: &[SpatialVector],
    ctrl_point: SpatialVector,
    regularization: Regularization,
) -> SpatialVector {
    let mut u_i = SpatialVector::default();

    for i_point in 0..corner_points.len() {
        let line_points: [SpatialVector; 2] = if i_point == corner_points.len() - 1 {
            [corner_points[i_point], corner_points[0]]
        } else {
            [corner_points[i_point], corner_points[i_point + 1]]
        };

        u_i += vortex_line::induced_velocity_from_line_with_unit_strength(
            &line_points, ctrl_point, regularization
        );
    }

    u_i
}

/// Accumulates the induced velocity from a vortex ring of the given circulation into the output
/// buffer, one entry per target point.
pub fn add_induced_velocities(
    corner_points: &[SpatialVector],
    circulation: Float,
    targets: &[SpatialVector],
    regularization: Regularization,
    out: &mut [SpatialVector],
) {
    for (i_target, &target) in targets.iter().enumerate() {
        out[i_target] +=
            induced_velocity_with_unit_strength(corner_points, target, regularization) * circulation;
    }
}

/// Accumulates the induced velocity projected on a per-target unit direction, writing scalars
/// instead of vectors. Used to fill influence matrix entries directly.
pub fn add_projected_induced_velocities(
    corner_points: &[SpatialVector],
    circulation: Float,
    targets: &[SpatialVector],
    directions: &[SpatialVector],
    regularization: Regularization,
    out: &mut [Float],
) {
    for (i_target, &target) in targets.iter().enumerate() {
        let u_i = induced_velocity_with_unit_strength(corner_points, target, regularization);

        out[i_target] += u_i.dot(directions[i_target]) * circulation;
    }
}

#[derive(Clone, Debug)]
/// A vortex ring panel with precomputed geometry, switching between the exact Biot-Savart loop
/// and a point doublet representation depending on the target distance.
pub struct RingPanel {
    corner_points: [SpatialVector; 4],
    nr_corners: usize,
    center: SpatialVector,
    normal: SpatialVector,
    far_field_length_squared: Float,
    point_doublet_area_term: Float,
}

impl RingPanel {
    /// Builds a panel from its corner points (three or four). Targets beyond `far_field_ratio`
    /// times the largest edge length are evaluated with the point doublet shortcut.
    pub fn new(points: &[SpatialVector], far_field_ratio: Float) -> Self {
        let nr_corners = points.len();

        let mut corner_points = [SpatialVector::default(); 4];
        corner_points[..nr_corners].copy_from_slice(points);

        let center = geometry_functions::centroid(points);

        let (area, normal) = match nr_corners {
            3 => {
                let triangle = [points[0], points[1], points[2]];

                (
                    geometry_functions::area_of_triangle(&triangle),
                    geometry_functions::normal_of_triangle(&triangle),
                )
            },
            _ => {
                let quadrilateral = [points[0], points[1], points[2], points[3]];

                (
                    geometry_functions::area_of_quadrilateral(&quadrilateral),
                    geometry_functions::normal_of_quadrilateral(&quadrilateral),
                )
            },
        };

        let mut representative_length: Float = 0.0;

        for i_point in 0..nr_corners {
            let next = (i_point + 1) % nr_corners;

            representative_length =
                representative_length.max((points[next] - points[i_point]).length());
        }

        let far_field_length_squared = (representative_length * far_field_ratio).powi(2);

        Self {
            corner_points,
            nr_corners,
            center,
            normal,
            far_field_length_squared,
            point_doublet_area_term: area * FOUR_PI_INVERSE,
        }
    }

    #[inline(always)]
    pub fn necessary_with_full_vortex_line_computation(&self, ctrl_point: SpatialVector) -> bool {
        let distance_to_ctrl_point_sq = (ctrl_point - self.center).length_squared();

        distance_to_ctrl_point_sq <= self.far_field_length_squared
    }

    /// Induced velocity with unit circulation, using the exact loop close to the panel and the
    /// point doublet far from it.
    pub fn induced_velocity_with_unit_strength(
        &self,
        ctrl_point: SpatialVector,
        regularization: Regularization,
    ) -> SpatialVector {
        if self.necessary_with_full_vortex_line_computation(ctrl_point) {
            self.induced_velocity_as_vortex_lines_with_unit_strength(ctrl_point, regularization)
        } else {
            self.induced_velocity_as_point_doublet_with_unit_strength(ctrl_point)
        }
    }

    #[inline(always)]
    /// Simplified formulation for a distant panel, based on the equivalent point doublet.
    /// Based on the equations from:
    /// <https://ntrs.nasa.gov/api/citations/19900004884/downloads/19900004884.pdf>, page 38
    pub fn induced_velocity_as_point_doublet_with_unit_strength(
        &self,
        ctrl_point: SpatialVector,
    ) -> SpatialVector {
        let translated_point = ctrl_point - self.center;

        let distance_squared = translated_point.length_squared();
        let distance_pow_5 = distance_squared * distance_squared * distance_squared.sqrt();

        let normal_height = translated_point.dot(self.normal);

        self.point_doublet_area_term *
        (3.0 * normal_height * translated_point - distance_squared * self.normal) /
        distance_pow_5
    }

    #[inline(always)]
    pub fn induced_velocity_as_vortex_lines_with_unit_strength(
        &self,
        ctrl_point: SpatialVector,
        regularization: Regularization,
    ) -> SpatialVector {
        induced_velocity_with_unit_strength(
            &self.corner_points[..self.nr_corners], ctrl_point, regularization
        )
    }
}
