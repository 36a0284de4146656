// Copyright (C) 2025, NTNU
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

use vortexmath::spatial_vector::SpatialVector;
use vortexmath::type_aliases::Float;
use vortexmath::consts::PI;

use crate::singularity_elements::Regularization;
use crate::singularity_elements::vortex_ring;
use crate::singularity_elements::vortex_ring::RingPanel;

fn exact() -> Regularization {
    Regularization { offset: 0.0, cutoff: 0.0 }
}

fn unit_square() -> [SpatialVector; 4] {
    [
        SpatialVector::new(0.0, 0.0, 0.0),
        SpatialVector::new(1.0, 0.0, 0.0),
        SpatialVector::new(1.0, 1.0, 0.0),
        SpatialVector::new(0.0, 1.0, 0.0),
    ]
}

#[test]
/// Reversing the corner order reverses the circulation direction, and with it the induced
/// velocity.
fn reversed_corner_order_negates_the_velocity() {
    let corner_points = [
        SpatialVector::new(0.1, -0.2, 0.0),
        SpatialVector::new(1.2, 0.1, 0.3),
        SpatialVector::new(0.9, 1.1, 0.2),
        SpatialVector::new(-0.1, 0.8, -0.1),
    ];

    let reversed = [
        corner_points[3],
        corner_points[2],
        corner_points[1],
        corner_points[0],
    ];

    let ctrl_point = SpatialVector::new(0.4, 0.3, 0.8);

    let u_forward = vortex_ring::induced_velocity_with_unit_strength(
        &corner_points, ctrl_point, exact()
    );
    let u_reversed = vortex_ring::induced_velocity_with_unit_strength(
        &reversed, ctrl_point, exact()
    );

    assert!((u_forward + u_reversed).length() < 1e-14);
}

#[test]
/// At the center of a square ring with side a, each edge contributes √2/(2πa), all along the
/// normal of the corner ordering.
fn velocity_at_the_center_of_a_square_ring() {
    let corner_points = unit_square();

    let ctrl_point = SpatialVector::new(0.5, 0.5, 0.0);

    let u_i = vortex_ring::induced_velocity_with_unit_strength(&corner_points, ctrl_point, exact());

    let expected_magnitude: Float = 2.0 * (2.0 as Float).sqrt() / PI;

    let expected = SpatialVector::new(0.0, 0.0, expected_magnitude);

    dbg!(u_i);

    assert!((u_i - expected).length() < 1e-12);
}

#[test]
/// A quadrilateral with a repeated corner behaves as the triangle it degenerates to.
fn degenerate_quadrilateral_matches_the_triangle() {
    let triangle = [
        SpatialVector::new(0.0, 0.0, 0.0),
        SpatialVector::new(1.0, 0.0, 0.0),
        SpatialVector::new(0.5, 1.0, 0.0),
    ];

    let degenerate = [triangle[0], triangle[1], triangle[2], triangle[2]];

    let ctrl_point = SpatialVector::new(0.2, 0.4, 0.6);

    let u_triangle = vortex_ring::induced_velocity_with_unit_strength(
        &triangle, ctrl_point, exact()
    );
    let u_degenerate = vortex_ring::induced_velocity_with_unit_strength(
        &degenerate, ctrl_point, exact()
    );

    assert!((u_triangle - u_degenerate).length() < 1e-14);
}

#[test]
/// Tests that the near and far field calculations are similar for a panel with unit strength.
fn compare_near_and_far_field() {
    let panel = RingPanel::new(&unit_square(), 3.0);

    let ctrl_point = SpatialVector::new(5.0, 2.0, 1.0);

    assert!(!panel.necessary_with_full_vortex_line_computation(ctrl_point));

    let u_i_near = panel.induced_velocity_as_vortex_lines_with_unit_strength(ctrl_point, exact());
    let u_i_far = panel.induced_velocity_as_point_doublet_with_unit_strength(ctrl_point);

    let relative_error = (u_i_near - u_i_far).length() / u_i_near.length();

    dbg!(u_i_near);
    dbg!(u_i_far);
    dbg!(relative_error);

    assert!(relative_error < 0.02);
}

#[test]
/// The accumulating variants stream over targets and apply the circulation.
fn accumulating_variants_match_the_single_point_kernel() {
    let corner_points = unit_square();

    let circulation = 1.7;

    let targets = [
        SpatialVector::new(0.3, 0.1, 0.5),
        SpatialVector::new(-0.4, 0.8, -0.3),
    ];

    let directions = [SpatialVector::unit_z(), SpatialVector::unit_x()];

    let mut velocities = [SpatialVector::default(); 2];
    let mut projections = [0.0; 2];

    vortex_ring::add_induced_velocities(
        &corner_points, circulation, &targets, exact(), &mut velocities
    );
    vortex_ring::add_projected_induced_velocities(
        &corner_points, circulation, &targets, &directions, exact(), &mut projections
    );

    for i_target in 0..targets.len() {
        let expected = vortex_ring::induced_velocity_with_unit_strength(
            &corner_points, targets[i_target], exact()
        ) * circulation;

        assert!((velocities[i_target] - expected).length() < 1e-14);
        assert!((projections[i_target] - expected.dot(directions[i_target])).abs() < 1e-14);
    }
}
