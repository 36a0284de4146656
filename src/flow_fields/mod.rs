// Copyright (C) 2025, NTNU
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

//! Post-processing of a solved body into flow and force fields.
//!
//! The calculations operate on explicit arrays so they can be used with arbitrary target points,
//! with thin wrappers that read the canonical named fields from the body and store their results
//! back on it. All wrappers require a solved body.

use vortexmath::spatial_vector::SpatialVector;
use vortexmath::type_aliases::Float;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{check_length, Error};
use crate::lifting_body::{ElementFamily, LiftingBody};
use crate::lifting_body::fields::{FieldData, FieldLocation};
use crate::panel_geometry::PanelGrid;
use crate::singularity_elements::{horseshoe, vortex_ring, vortex_sheet};


fn require_solved(body: &LiftingBody, field: &str) -> Result<(), Error> {
    if !body.is_solved() {
        return Err(Error::UnsolvedBody { field: field.to_string() });
    }

    Ok(())
}

fn vector_field<'a>(body: &'a LiftingBody, name: &str) -> Result<&'a [SpatialVector], Error> {
    body.get_field(name)?.data.as_vector().ok_or_else(|| Error::CustomStringError(
        format!("Field '{}' is not a vector field", name)
    ))
}

/// Accumulates the velocity induced by all of the body's singularity elements, at their solved
/// strengths, into the output buffer: the vortex rings, the wake strips of every shedding record
/// (carrying the circulation of their shedding panels), and the uniform vortex sheets when the
/// body carries that family.
pub fn induced_velocity(
    body: &LiftingBody,
    targets: &[SpatialVector],
    out: &mut [SpatialVector],
) -> Result<(), Error> {
    require_solved(body, "U")?;

    check_length("out", out.len(), targets.len())?;

    if targets.is_empty() {
        return Ok(());
    }

    let grid = body.grid_in_global_frame();
    let circulations = body.circulation_strengths();
    let regularization = body.regularization;

    let das = vector_field(body, "Da")?;
    let dbs = vector_field(body, "Db")?;

    let sheet_strengths = match body.element_family {
        ElementFamily::VortexRing => None,
        ElementFamily::VortexRingUniformSheet { .. } => Some((
            grid.calc_tangents(),
            grid.calc_obliques(),
            body.strength_column(1),
            body.strength_column(2),
        )),
    };

    let accumulate = |target_chunk: &[SpatialVector], out_chunk: &mut [SpatialVector]| {
        let mut corner_buffer = [SpatialVector::default(); 4];

        for i_cell in 0..grid.nr_cells() {
            let nr_corners = grid.cell_points(i_cell, &mut corner_buffer);

            vortex_ring::add_induced_velocities(
                &corner_buffer[..nr_corners],
                circulations[i_cell],
                target_chunk,
                regularization,
                out_chunk,
            );
        }

        for (i_shedding, edge) in body.shedding.iter().enumerate() {
            let te_points = [
                grid.nodes[edge.upper_edge[0]],
                grid.nodes[edge.upper_edge[1]],
            ];

            horseshoe::add_induced_velocities(
                &te_points,
                das[i_shedding],
                dbs[i_shedding],
                circulations[edge.upper_panel],
                target_chunk,
                regularization,
                out_chunk,
            );

            if let Some(partner) = &edge.lower {
                let te_reversed = [te_points[1], te_points[0]];

                horseshoe::add_induced_velocities(
                    &te_reversed,
                    dbs[i_shedding],
                    das[i_shedding],
                    circulations[partner.panel],
                    target_chunk,
                    regularization,
                    out_chunk,
                );
            }
        }

        if let Some((tangents, obliques, gamma_t, gamma_o)) = &sheet_strengths {
            for i_cell in 0..grid.nr_cells() {
                let nr_corners = grid.cell_points(i_cell, &mut corner_buffer);

                vortex_sheet::add_induced_velocities(
                    &corner_buffer[..nr_corners],
                    tangents[i_cell],
                    obliques[i_cell],
                    gamma_t[i_cell],
                    gamma_o[i_cell],
                    target_chunk,
                    regularization,
                    out_chunk,
                );
            }
        }
    };

    #[cfg(feature = "parallel")]
    {
        let chunk_size = targets.len().div_ceil(rayon::current_num_threads()).max(1);

        out.par_chunks_mut(chunk_size)
            .zip(targets.par_chunks(chunk_size))
            .for_each(|(out_chunk, target_chunk)| accumulate(target_chunk, out_chunk));
    }

    #[cfg(not(feature = "parallel"))]
    accumulate(targets, out);

    Ok(())
}

/// Accumulates the total velocity, freestream plus induced, into the output buffer.
pub fn velocity(
    body: &LiftingBody,
    targets: &[SpatialVector],
    uinfs: &[SpatialVector],
    out: &mut [SpatialVector],
) -> Result<(), Error> {
    check_length("Uinfs", uinfs.len(), targets.len())?;

    induced_velocity(body, targets, out)?;

    for (i_target, u_i) in out.iter_mut().enumerate() {
        *u_i += uinfs[i_target];
    }

    Ok(())
}

/// Evaluates the total velocity at the body's own control points, using the stored freestream,
/// and stores it as the `U` field.
pub fn add_velocity_field(body: &mut LiftingBody) -> Result<(), Error> {
    require_solved(body, "U")?;

    let grid = body.grid_in_global_frame();
    let normals = grid.calc_normals(false);
    let control_points = grid.calc_controlpoints(&normals, body.control_point_offset);

    let uinfs = vector_field(body, "Uinf")?.to_vec();

    let mut velocities = vec![SpatialVector::default(); body.nr_cells()];

    velocity(body, &control_points, &uinfs, &mut velocities)?;

    body.add_field("U", FieldData::Vector(velocities), FieldLocation::Cell);

    Ok(())
}

/// Computes the pressure coefficient `1 − (‖U‖/U_ref)²` from the `U` field and stores it as the
/// `Cp` field.
pub fn add_pressure_coefficient_field(
    body: &mut LiftingBody,
    reference_velocity: Float,
) -> Result<(), Error> {
    require_solved(body, "Cp")?;

    if reference_velocity <= 0.0 {
        return Err(Error::CustomStringError(
            format!("Reference velocity must be positive, got {}", reference_velocity)
        ));
    }

    let velocities = vector_field(body, "U")?;

    let pressure_coefficients: Vec<Float> = velocities.iter()
        .map(|u_i| 1.0 - (u_i.length() / reference_velocity).powi(2))
        .collect();

    body.add_field("Cp", FieldData::Scalar(pressure_coefficients), FieldLocation::Cell);

    Ok(())
}

/// Computes the pressure force on each panel, `F = ½ρ(‖U‖² − U∞²)·A·n̂`, from the `U` field and
/// stores it as the `F` field. The constant ambient pressure is left out, since it sums to zero
/// over a closed surface.
pub fn add_force_field(
    body: &mut LiftingBody,
    density: Float,
    freestream_speed: Float,
) -> Result<(), Error> {
    require_solved(body, "F")?;

    let grid = body.grid_in_global_frame();
    let areas = grid.calc_areas();
    let normals = grid.calc_normals(false);

    let velocities = vector_field(body, "U")?;

    check_length("U", velocities.len(), body.nr_cells())?;

    let freestream_speed_sq = freestream_speed * freestream_speed;

    let forces: Vec<SpatialVector> = (0..body.nr_cells())
        .map(|i_cell| {
            let dynamic_pressure =
                0.5 * density * (velocities[i_cell].length_squared() - freestream_speed_sq);

            normals[i_cell] * (dynamic_pressure * areas[i_cell])
        })
        .collect();

    body.add_field("F", FieldData::Vector(forces), FieldLocation::Cell);

    Ok(())
}

/// Collapses the per-cell forces of a structured grid into a force per unit span at each span
/// station.
///
/// The span coordinate of a station is the chord-averaged projection of its control points on the
/// span direction. The local span step is a one-sided difference at the first and last stations
/// and a centered difference in between, and the summed station force is divided by it.
pub fn sectional_force(
    grid: &PanelGrid,
    forces: &[SpatialVector],
    control_points: &[SpatialVector],
    span_dimension: usize,
    span_direction: SpatialVector,
) -> Result<(Vec<Float>, Vec<SpatialVector>), Error> {
    let dimensions = grid.dimensions.ok_or_else(|| Error::CustomStringError(
        "Sectional forces require a grid with structured dimensions".to_string()
    ))?;

    if span_dimension >= 2 {
        return Err(Error::CustomStringError(
            format!("Span dimension must be 0 or 1, got {}", span_dimension)
        ));
    }

    check_length("F", forces.len(), grid.nr_cells())?;
    check_length("controlpoints", control_points.len(), grid.nr_cells())?;

    let nr_span = dimensions[span_dimension];
    let nr_chord = dimensions[1 - span_dimension];

    if nr_span < 2 {
        return Err(Error::CustomStringError(
            format!("Sectional forces require at least two span stations, got {}", nr_span)
        ));
    }

    let mut span_positions = vec![0.0; nr_span];
    let mut station_forces = vec![SpatialVector::default(); nr_span];

    for i_span in 0..nr_span {
        for i_chord in 0..nr_chord {
            let indices = if span_dimension == 1 {
                [i_chord, i_span]
            } else {
                [i_span, i_chord]
            };

            let i_cell = grid.linear_index(indices)?;

            span_positions[i_span] += span_direction.dot(control_points[i_cell]);
            station_forces[i_span] += forces[i_cell];
        }

        span_positions[i_span] /= nr_chord as Float;
    }

    for i_span in 0..nr_span {
        let span_step = if i_span == 0 {
            span_positions[1] - span_positions[0]
        } else if i_span == nr_span - 1 {
            span_positions[i_span] - span_positions[i_span - 1]
        } else {
            0.5 * (span_positions[i_span + 1] - span_positions[i_span - 1])
        };

        if span_step == 0.0 {
            return Err(Error::CustomStringError(
                format!("Zero span step at station {}", i_span)
            ));
        }

        station_forces[i_span] /= span_step;
    }

    Ok((span_positions, station_forces))
}

/// Computes the sectional forces from the `F` field and stores them as the `sectionalforce`
/// field.
pub fn add_sectional_force_field(
    body: &mut LiftingBody,
    span_dimension: usize,
    span_direction: SpatialVector,
) -> Result<(), Error> {
    require_solved(body, "sectionalforce")?;

    let grid = body.grid_in_global_frame();
    let normals = grid.calc_normals(false);
    let control_points = grid.calc_controlpoints(&normals, body.control_point_offset);

    let forces = vector_field(body, "F")?;

    let (_, station_forces) =
        sectional_force(&grid, forces, &control_points, span_dimension, span_direction)?;

    body.add_field("sectionalforce", FieldData::Vector(station_forces), FieldLocation::System);

    Ok(())
}

/// The sum of all elemental forces
pub fn total_force(forces: &[SpatialVector]) -> SpatialVector {
    forces.iter().copied().sum()
}

/// Sums the `F` field and stores the result as the `Ftot` field.
pub fn add_total_force_field(body: &mut LiftingBody) -> Result<(), Error> {
    require_solved(body, "Ftot")?;

    let forces = vector_field(body, "F")?;

    let force_total = total_force(forces);

    body.add_field("Ftot", FieldData::Vector(vec![force_total]), FieldLocation::System);

    Ok(())
}

fn check_unit_length(name: &str, direction: SpatialVector) -> Result<(), Error> {
    let length = direction.length();

    if (length - 1.0).abs() > 2.0 * Float::EPSILON {
        return Err(Error::NonUnitVector { name: name.to_string(), length });
    }

    Ok(())
}

/// Projects a force on an orthonormal lift/drag/sideslip basis. The sideslip direction defaults
/// to lift cross drag. Returns the three projection vectors, whose sum recovers the input force
/// when the basis is orthonormal.
pub fn decompose(
    force: SpatialVector,
    lift_direction: SpatialVector,
    drag_direction: SpatialVector,
    side_direction: Option<SpatialVector>,
) -> Result<[SpatialVector; 3], Error> {
    check_unit_length("Lhat", lift_direction)?;
    check_unit_length("Dhat", drag_direction)?;

    let side_direction = side_direction.unwrap_or_else(|| lift_direction.cross(drag_direction));

    check_unit_length("Shat", side_direction)?;

    Ok([
        lift_direction * force.dot(lift_direction),
        drag_direction * force.dot(drag_direction),
        side_direction * force.dot(side_direction),
    ])
}

/// Decomposes the `Ftot` field on a lift/drag/sideslip basis and stores the components as the
/// `L`, `D` and `S` fields.
pub fn add_force_decomposition_field(
    body: &mut LiftingBody,
    lift_direction: SpatialVector,
    drag_direction: SpatialVector,
    side_direction: Option<SpatialVector>,
) -> Result<(), Error> {
    require_solved(body, "L")?;

    let force_total = *vector_field(body, "Ftot")?.first().ok_or_else(|| {
        Error::CustomStringError("Field 'Ftot' is empty".to_string())
    })?;

    let components = decompose(force_total, lift_direction, drag_direction, side_direction)?;

    body.add_field("L", FieldData::Vector(vec![components[0]]), FieldLocation::System);
    body.add_field("D", FieldData::Vector(vec![components[1]]), FieldLocation::System);
    body.add_field("S", FieldData::Vector(vec![components[2]]), FieldLocation::System);

    Ok(())
}
