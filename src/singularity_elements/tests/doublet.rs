// Copyright (C) 2025, NTNU
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

use vortexmath::spatial_vector::SpatialVector;
use vortexmath::consts::PI;

use crate::singularity_elements::Regularization;
use crate::singularity_elements::doublet;
use crate::singularity_elements::solid_angle;

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
/// Directly above the panel the solid angle approaches the full half space, 2π.
fn solid_angle_approaches_two_pi_at_the_surface() {
    let corner_points = unit_square();

    let target = SpatialVector::new(0.5, 0.5, 1.0e-6);

    let omega = solid_angle::polygon_solid_angle(&corner_points, target, exact());

    dbg!(omega);

    assert!((omega - 2.0 * PI).abs() < 1e-4);
}

#[test]
/// In the panel plane but outside the panel, the solid angle vanishes.
fn solid_angle_vanishes_in_plane_outside_the_panel() {
    let corner_points = unit_square();

    let target = SpatialVector::new(3.0, 0.5, 0.0);

    let omega = solid_angle::polygon_solid_angle(&corner_points, target, exact());

    assert!(omega.abs() < 1e-12);
}

#[test]
/// Far from the panel the potential matches the equivalent point doublet,
/// φ = −μ A cosθ / (4π d²).
fn potential_matches_a_point_doublet_far_away() {
    let corner_points = unit_square();

    let center = SpatialVector::new(0.5, 0.5, 0.0);

    let target = SpatialVector::new(0.2, 0.4, 30.0);

    let phi = doublet::potential_with_unit_strength(&corner_points, target, exact());

    let relative_position = target - center;
    let distance = relative_position.length();

    let phi_point = -relative_position[2] /
        (4.0 * PI * distance * distance * distance);

    let relative_error = (phi - phi_point).abs() / phi_point.abs();

    dbg!(phi);
    dbg!(phi_point);

    assert!(relative_error < 5e-3);
}

#[test]
/// The potential jumps by the doublet strength across the panel, from −μ/2 on the normal side to
/// +μ/2 on the other.
fn potential_jumps_across_the_panel() {
    let corner_points = unit_square();

    let above = SpatialVector::new(0.5, 0.5, 1.0e-6);
    let below = SpatialVector::new(0.5, 0.5, -1.0e-6);

    let phi_above = doublet::potential_with_unit_strength(&corner_points, above, exact());
    let phi_below = doublet::potential_with_unit_strength(&corner_points, below, exact());

    assert!((phi_above + 0.5).abs() < 1e-4);
    assert!((phi_below - 0.5).abs() < 1e-4);
}

#[test]
/// The wake strip potential jumps by the strength across the strip, far behind the trailing
/// edge.
fn wake_strip_potential_jumps_across_the_strip() {
    let trailing_edge = [
        SpatialVector::new(0.0, 0.0, 0.0),
        SpatialVector::new(0.0, 1.0, 0.0),
    ];

    let direction = SpatialVector::unit_x();

    let above = SpatialVector::new(5.0, 0.5, 1.0e-3);
    let below = SpatialVector::new(5.0, 0.5, -1.0e-3);

    let phi_above = doublet::wake_strip_potential_with_unit_strength(
        &trailing_edge, direction, direction, above, exact()
    );
    let phi_below = doublet::wake_strip_potential_with_unit_strength(
        &trailing_edge, direction, direction, below, exact()
    );

    dbg!(phi_above);
    dbg!(phi_below);

    // The strip's corner ordering points its right-hand normal along -z, so the potential is
    // -μ/2 just below and +μ/2 just above
    assert!((phi_below + 0.5).abs() < 1e-2);
    assert!((phi_above - 0.5).abs() < 1e-2);

    let mut accumulated = [0.0];

    doublet::add_wake_strip_potentials(
        &trailing_edge, direction, direction, 2.0, &[above], exact(), &mut accumulated
    );

    assert!((accumulated[0] - 2.0 * phi_above).abs() < 1e-14);
}

#[test]
fn accumulated_potentials_apply_the_strength() {
    let corner_points = unit_square();

    let targets = [
        SpatialVector::new(0.1, 0.2, 2.0),
        SpatialVector::new(1.4, -0.3, -1.0),
    ];

    let mut accumulated = [0.0; 2];

    doublet::add_potentials(&corner_points, -3.0, &targets, exact(), &mut accumulated);

    for i_target in 0..targets.len() {
        let expected =
            -3.0 * doublet::potential_with_unit_strength(&corner_points, targets[i_target], exact());

        assert!((accumulated[i_target] - expected).abs() < 1e-14);
    }
}
