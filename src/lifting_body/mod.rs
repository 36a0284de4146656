// Copyright (C) 2025, NTNU
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

//! The lifting body: a surface mesh carrying singularity elements, a wake shedding table, and the
//! solved result fields.
//!
//! A body starts out *unsolved*. Calling [LiftingBody::solve] assembles and solves the influence
//! system and commits the strengths, the canonical result fields and the solved flag in one step,
//! so a failed solve leaves the body unchanged. Post-processing (see [crate::flow_fields])
//! requires a solved body.

use serde::{Deserialize, Serialize};

use vortexmath::coordinate_systems::CoordinateFrame;
use vortexmath::matrix::Matrix;
use vortexmath::spatial_vector::SpatialVector;
use vortexmath::type_aliases::Float;

use crate::error::Error;
use crate::panel_geometry::PanelGrid;
use crate::singularity_elements::Regularization;

pub mod fields;
pub mod shedding;
pub mod builder;

use self::fields::{Field, FieldData, FieldLocation, FieldStore};
use self::shedding::SheddingEdge;

#[cfg(test)]
pub(crate) mod tests;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
/// The singularity elements a body carries, encoded as a solver strategy.
///
/// Every family includes constant-strength vortex rings on all panels. The extended family adds a
/// uniform vortex sheet on every panel, with a single shared sheet strength distributed over the
/// panels through the given tangential and oblique weights.
pub enum ElementFamily {
    #[default]
    VortexRing,
    VortexRingUniformSheet {
        tangential_weight: Float,
        oblique_weight: Float,
    },
}

impl ElementFamily {
    /// The number of strength columns stored per panel: circulation only, or circulation plus the
    /// tangential and oblique sheet strengths.
    pub fn nr_strength_columns(&self) -> usize {
        match self {
            ElementFamily::VortexRing => 1,
            ElementFamily::VortexRingUniformSheet { .. } => 3,
        }
    }
}

#[derive(Debug, Clone)]
/// A body discretized as vortex ring panels with a rigid semi-infinite wake.
pub struct LiftingBody {
    /// The surface mesh, in body coordinates
    pub grid: PanelGrid,
    pub element_family: ElementFamily,
    pub shedding: Vec<SheddingEdge>,
    /// Placement of the body in the global coordinate system
    pub frame: CoordinateFrame,
    /// Control point displacement along the panel normal, in units of the characteristic panel
    /// length `sqrt(area)`. Negative values place the control points on the opposite side.
    pub control_point_offset: Float,
    pub regularization: Regularization,
    pub(crate) strength: Matrix<Float>,
    pub(crate) fields: FieldStore,
    pub(crate) solved: bool,
}

impl LiftingBody {
    /// Creates an unsolved body. The grid's cell indices and all shedding records are validated
    /// here, so a constructed body is always geometrically consistent.
    pub fn new(
        grid: PanelGrid,
        element_family: ElementFamily,
        shedding: Vec<SheddingEdge>,
    ) -> Result<Self, Error> {
        if grid.nr_cells() == 0 {
            return Err(Error::CustomStringError("The grid has no cells".to_string()));
        }

        grid.check_cell_indices()?;

        shedding::check_trailing_edges(&grid, &shedding)?;

        let strength = Matrix::new([grid.nr_cells(), element_family.nr_strength_columns()]);

        Ok(Self {
            grid,
            element_family,
            shedding,
            frame: CoordinateFrame::default(),
            control_point_offset: Self::default_control_point_offset(),
            regularization: Regularization::default(),
            strength,
            fields: FieldStore::default(),
            solved: false,
        })
    }

    pub fn default_control_point_offset() -> Float { 0.005 }

    pub fn nr_cells(&self) -> usize {
        self.grid.nr_cells()
    }

    pub fn nr_nodes(&self) -> usize {
        self.grid.nr_nodes()
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    /// The solved strengths, one row per panel and one column per element type. Zero until the
    /// body is solved.
    pub fn strength(&self) -> &Matrix<Float> {
        &self.strength
    }

    /// A single strength column, copied out of the row-major storage
    pub fn strength_column(&self, column: usize) -> Vec<Float> {
        (0..self.nr_cells()).map(|i_cell| self.strength[[i_cell, column]]).collect()
    }

    /// The circulation strength of each panel's vortex ring
    pub fn circulation_strengths(&self) -> Vec<Float> {
        self.strength_column(0)
    }

    /// The surface mesh with its nodes transformed from body to global coordinates
    pub fn grid_in_global_frame(&self) -> PanelGrid {
        PanelGrid {
            nodes: self.grid.nodes.iter()
                .map(|&node| self.frame.point_to_global(node))
                .collect(),
            cells: self.grid.cells.clone(),
            dimensions: self.grid.dimensions,
        }
    }

    pub fn add_field(&mut self, name: &str, data: FieldData, location: FieldLocation) {
        self.fields.add(name, data, location);
    }

    pub fn get_field(&self, name: &str) -> Result<&Field, Error> {
        self.fields.get(name).ok_or_else(|| Error::MissingField { field: name.to_string() })
    }

    pub fn check_field(&self, name: &str) -> bool {
        self.fields.check(name)
    }

    /// Field names in insertion order
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.names()
    }

    /// Read-only access to the whole field store, in insertion order
    pub fn fields(&self) -> &FieldStore {
        &self.fields
    }

    /// Solves for the singularity strengths under the no-flow-through condition.
    ///
    /// # Arguments
    /// - `uinfs`: the freestream velocity at each panel, in global coordinates.
    /// - `das`, `dbs`: unit directions of the two semi-infinite wake filaments of each shedding
    ///   record, in global coordinates.
    /// - `prescribed`: panel indices with a fixed circulation strength. At least one entry is
    ///   needed on closed bodies, where a uniform circulation shift would otherwise leave the
    ///   normal velocity unchanged.
    pub fn solve(
        &mut self,
        uinfs: &[SpatialVector],
        das: &[SpatialVector],
        dbs: &[SpatialVector],
        prescribed: &[(usize, Float)],
    ) -> Result<(), Error> {
        crate::solver::solve(self, uinfs, das, dbs, prescribed)
    }

    /// Same as [LiftingBody::solve], but with a caller-supplied routine for the dense linear
    /// solve.
    pub fn solve_with_solver(
        &mut self,
        uinfs: &[SpatialVector],
        das: &[SpatialVector],
        dbs: &[SpatialVector],
        prescribed: &[(usize, Float)],
        linear_solver: crate::solver::LinearSolver,
    ) -> Result<(), Error> {
        crate::solver::solve_with_solver(self, uinfs, das, dbs, prescribed, linear_solver)
    }
}
