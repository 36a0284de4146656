// Copyright (C) 2025, NTNU
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

//! Assembly and solution of the influence system.
//!
//! The influence matrix has one row per control point and one column per panel, with each entry
//! being the normal velocity a unit-strength panel induces at the control point. The wake strip
//! of every shedding record is folded back onto the columns of its shedding panels, since the
//! strip carries the circulation of those panels. The right-hand side is the no-flow-through
//! condition `b = −Uinf · n̂`.
//!
//! Prescribed panel strengths are moved to the right-hand side and their columns struck, turning
//! the system into a least squares problem solved through the normal equations. This is the rank
//! remedy for closed bodies, where shifting all ring circulations by a constant leaves the normal
//! velocity unchanged.

use vortexmath::matrix::Matrix;
use vortexmath::spatial_vector::SpatialVector;
use vortexmath::type_aliases::Float;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{check_length, Error};
use crate::lifting_body::{ElementFamily, LiftingBody};
use crate::lifting_body::fields::{FieldData, FieldLocation};
use crate::lifting_body::shedding::SheddingEdge;
use crate::panel_geometry::PanelGrid;
use crate::singularity_elements::{Regularization, horseshoe, vortex_ring, vortex_sheet};

/// A user-suppliable routine for the dense square solve at the heart of the method. It receives
/// the assembled coefficient matrix and right-hand side, and returns the solution vector.
pub type LinearSolver<'a> = &'a dyn Fn(&Matrix<Float>, &[Float]) -> Result<Vec<Float>, Error>;

/// The default linear solver: Gaussian elimination with partial pivoting.
pub fn gaussian_elimination(matrix: &Matrix<Float>, rhs: &[Float]) -> Result<Vec<Float>, Error> {
    Ok(matrix.solve_gaussian_elimination(rhs)?)
}

/// Solves the body for the given freestream and wake directions, and commits the strengths and
/// the canonical result fields. On any error the body is left unchanged.
pub fn solve(
    body: &mut LiftingBody,
    uinfs: &[SpatialVector],
    das: &[SpatialVector],
    dbs: &[SpatialVector],
    prescribed: &[(usize, Float)],
) -> Result<(), Error> {
    solve_with_solver(body, uinfs, das, dbs, prescribed, &gaussian_elimination)
}

/// Same as [solve], but with a caller-supplied routine for the dense linear solve.
pub fn solve_with_solver(
    body: &mut LiftingBody,
    uinfs: &[SpatialVector],
    das: &[SpatialVector],
    dbs: &[SpatialVector],
    prescribed: &[(usize, Float)],
    linear_solver: LinearSolver,
) -> Result<(), Error> {
    let nr_cells = body.nr_cells();
    let nr_shedding = body.shedding.len();

    check_length("Uinfs", uinfs.len(), nr_cells)?;
    check_length("Das", das.len(), nr_shedding)?;
    check_length("Dbs", dbs.len(), nr_shedding)?;

    let prescribed_sorted = sort_prescribed(prescribed, nr_cells)?;

    let grid = body.grid_in_global_frame();

    let normals = grid.calc_normals(false);
    let control_points = grid.calc_controlpoints(&normals, body.control_point_offset);

    let influence = influence_matrix(
        &grid,
        &body.shedding,
        das,
        dbs,
        &control_points,
        &normals,
        body.regularization,
    );

    let rhs: Vec<Float> = (0..nr_cells).map(|i_row| -uinfs[i_row].dot(normals[i_row])).collect();

    let strength = match body.element_family {
        ElementFamily::VortexRing => {
            solve_vortex_ring(influence, rhs, &prescribed_sorted, linear_solver)?
        },
        ElementFamily::VortexRingUniformSheet { tangential_weight, oblique_weight } => {
            solve_with_uniform_sheet(
                influence,
                rhs,
                &prescribed_sorted,
                &grid,
                &control_points,
                &normals,
                tangential_weight,
                oblique_weight,
                body.regularization,
                linear_solver,
            )?
        },
    };

    // Commit everything in one step, so the body never holds a partial result
    let circulations = (0..nr_cells).map(|i_cell| strength[[i_cell, 0]]).collect();

    body.strength = strength;
    body.add_field("Uinf", FieldData::Vector(uinfs.to_vec()), FieldLocation::Cell);
    body.add_field("Gamma", FieldData::Scalar(circulations), FieldLocation::Cell);
    body.add_field("Da", FieldData::Vector(das.to_vec()), FieldLocation::System);
    body.add_field("Db", FieldData::Vector(dbs.to_vec()), FieldLocation::System);
    body.solved = true;

    Ok(())
}

fn sort_prescribed(
    prescribed: &[(usize, Float)],
    nr_cells: usize,
) -> Result<Vec<(usize, Float)>, Error> {
    let mut sorted = prescribed.to_vec();

    sorted.sort_by_key(|(i_cell, _)| *i_cell);

    for pair in sorted.windows(2) {
        if pair[0].0 == pair[1].0 {
            return Err(Error::CustomStringError(
                format!("Panel {} is prescribed more than once", pair[0].0)
            ));
        }
    }

    if let Some(&(i_cell, _)) = sorted.last() {
        if i_cell >= nr_cells {
            return Err(Error::CustomStringError(
                format!("Prescribed panel index {} out of range ({} cells)", i_cell, nr_cells)
            ));
        }
    }

    Ok(sorted)
}

/// Assembles the vortex ring influence matrix, including the wake strips of all shedding
/// records. Rows are filled independently, so the assembly parallelizes over control points.
fn influence_matrix(
    grid: &PanelGrid,
    shedding: &[SheddingEdge],
    das: &[SpatialVector],
    dbs: &[SpatialVector],
    control_points: &[SpatialVector],
    normals: &[SpatialVector],
    regularization: Regularization,
) -> Matrix<Float> {
    let nr_cells = grid.nr_cells();

    let mut influence = Matrix::new([nr_cells, nr_cells]);

    let fill_row = |i_row: usize, row: &mut [Float]| {
        let ctrl_point = control_points[i_row];
        let normal = normals[i_row];

        let mut corner_buffer = [SpatialVector::default(); 4];

        for i_col in 0..nr_cells {
            let nr_corners = grid.cell_points(i_col, &mut corner_buffer);

            let u_i = vortex_ring::induced_velocity_with_unit_strength(
                &corner_buffer[..nr_corners], ctrl_point, regularization
            );

            row[i_col] = u_i.dot(normal);
        }

        for (i_shedding, edge) in shedding.iter().enumerate() {
            let te_points = [
                grid.nodes[edge.upper_edge[0]],
                grid.nodes[edge.upper_edge[1]],
            ];

            let u_upper = horseshoe::induced_velocity_with_unit_strength(
                &te_points, das[i_shedding], dbs[i_shedding], ctrl_point, regularization
            );

            row[edge.upper_panel] += u_upper.dot(normal);

            if let Some(partner) = &edge.lower {
                // The lower strip is the exact negation of the upper one: same segment traversed
                // the other way, with the leg directions swapped accordingly. A row dotted with
                // the circulations then carries the wake strength Γ_upper − Γ_lower.
                let te_reversed = [te_points[1], te_points[0]];

                let u_lower = horseshoe::induced_velocity_with_unit_strength(
                    &te_reversed, dbs[i_shedding], das[i_shedding], ctrl_point, regularization
                );

                row[partner.panel] += u_lower.dot(normal);
            }
        }
    };

    #[cfg(feature = "parallel")]
    influence.data
        .par_chunks_mut(nr_cells)
        .enumerate()
        .for_each(|(i_row, row)| fill_row(i_row, row));

    #[cfg(not(feature = "parallel"))]
    for (i_row, row) in influence.data.chunks_mut(nr_cells).enumerate() {
        fill_row(i_row, row);
    }

    influence
}

/// Solves the single-family system: a direct square solve without prescribed elements, and the
/// normal equations of the column-reduced least squares problem with them.
fn solve_vortex_ring(
    influence: Matrix<Float>,
    mut rhs: Vec<Float>,
    prescribed: &[(usize, Float)],
    linear_solver: LinearSolver,
) -> Result<Matrix<Float>, Error> {
    let nr_cells = influence.nr_rows();

    let circulations = if prescribed.is_empty() {
        linear_solver(&influence, &rhs)?
    } else {
        for &(i_col, value) in prescribed {
            for i_row in 0..nr_cells {
                rhs[i_row] -= influence[[i_row, i_col]] * value;
            }
        }

        let free_columns: Vec<usize> = (0..nr_cells)
            .filter(|i_col| !prescribed.iter().any(|(i_prescribed, _)| i_prescribed == i_col))
            .collect();

        let mut reduced = Matrix::new([nr_cells, free_columns.len()]);

        for i_row in 0..nr_cells {
            for (i_free, &i_col) in free_columns.iter().enumerate() {
                reduced[[i_row, i_free]] = influence[[i_row, i_col]];
            }
        }

        let normal_matrix = reduced.transposed_product();
        let normal_rhs = reduced.transposed_vector_product(&rhs);

        let solution = linear_solver(&normal_matrix, &normal_rhs)?;

        let mut circulations = vec![0.0; nr_cells];

        for &(i_cell, value) in prescribed {
            circulations[i_cell] = value;
        }

        for (i_free, &i_col) in free_columns.iter().enumerate() {
            circulations[i_col] = solution[i_free];
        }

        circulations
    };

    let mut strength = Matrix::new([nr_cells, 1]);

    for i_cell in 0..nr_cells {
        strength[[i_cell, 0]] = circulations[i_cell];
    }

    Ok(strength)
}

#[inline(always)]
/// The alternating sign that keeps neighbouring sheet panels aligned despite their alternating
/// tangent and oblique orientations. The first panel is negated.
pub(crate) fn checkerboard_sign(index: usize) -> Float {
    if index % 2 == 0 { -1.0 } else { 1.0 }
}

/// Solves the extended system where a single shared uniform-sheet strength occupies the column
/// of the one prescribed ring element.
#[allow(clippy::too_many_arguments)]
fn solve_with_uniform_sheet(
    mut influence: Matrix<Float>,
    mut rhs: Vec<Float>,
    prescribed: &[(usize, Float)],
    grid: &PanelGrid,
    control_points: &[SpatialVector],
    normals: &[SpatialVector],
    tangential_weight: Float,
    oblique_weight: Float,
    regularization: Regularization,
    linear_solver: LinearSolver,
) -> Result<Matrix<Float>, Error> {
    if prescribed.len() != 1 {
        return Err(Error::CustomStringError(
            format!(
                "The vortex ring + uniform sheet family requires exactly one prescribed element, got {}",
                prescribed.len()
            )
        ));
    }

    let (i_star, prescribed_value) = prescribed[0];

    let nr_cells = grid.nr_cells();

    // Move the prescribed ring column to the right-hand side and reuse the column for the shared
    // sheet strength
    for i_row in 0..nr_cells {
        rhs[i_row] -= influence[[i_row, i_star]] * prescribed_value;
        influence[[i_row, i_star]] = 0.0;
    }

    let tangents = grid.calc_tangents();
    let obliques = grid.calc_obliques();

    let mut sheet_column = vec![0.0; nr_cells];
    let mut corner_buffer = [SpatialVector::default(); 4];

    for i_col in 0..nr_cells {
        let sign = checkerboard_sign(i_col);

        let nr_corners = grid.cell_points(i_col, &mut corner_buffer);

        vortex_sheet::add_projected_induced_velocities(
            &corner_buffer[..nr_corners],
            tangents[i_col],
            obliques[i_col],
            sign * tangential_weight,
            sign * oblique_weight,
            control_points,
            normals,
            regularization,
            &mut sheet_column,
        );
    }

    for i_row in 0..nr_cells {
        influence[[i_row, i_star]] += sheet_column[i_row];
    }

    let solution = linear_solver(&influence, &rhs)?;

    let sheet_strength = solution[i_star];

    let mut strength = Matrix::new([nr_cells, 3]);

    for i_cell in 0..nr_cells {
        strength[[i_cell, 0]] = if i_cell == i_star { prescribed_value } else { solution[i_cell] };

        let sign = checkerboard_sign(i_cell);

        strength[[i_cell, 1]] = sign * sheet_strength * tangential_weight;
        strength[[i_cell, 2]] = sign * sheet_strength * oblique_weight;
    }

    Ok(strength)
}
