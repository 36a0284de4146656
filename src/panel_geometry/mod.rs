// Copyright (C) 2025, NTNU
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

//! A minimal surface mesh representation, together with the derived panel quantities the solver
//! and post-processors need: areas, normals, in-plane directions, centroids and control points.
//!
//! Mesh *generation* is outside the scope of this library. The grid is constructed directly from
//! node coordinates and cell index lists, typically produced by an external meshing tool.

use serde::{Deserialize, Serialize};

use vortexmath::spatial_vector::SpatialVector;
use vortexmath::spatial_vector::geometry_functions;
use vortexmath::type_aliases::Float;

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
/// A single flat face of the surface mesh, stored as node indices. Quadrilaterals are assumed to
/// be planar.
pub enum Cell {
    Triangle([usize; 3]),
    Quadrilateral([usize; 4]),
}

impl Cell {
    /// The node indices of the cell as a variable-length slice
    pub fn node_indices(&self) -> &[usize] {
        match self {
            Cell::Triangle(indices) => indices,
            Cell::Quadrilateral(indices) => indices,
        }
    }

    pub fn nr_nodes(&self) -> usize {
        self.node_indices().len()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// A surface mesh made of triangles and planar quadrilaterals.
pub struct PanelGrid {
    pub nodes: Vec<SpatialVector>,
    pub cells: Vec<Cell>,
    /// For structured grids, the number of cells along the two grid directions, with the first
    /// direction varying fastest in the cell ordering. `None` for unstructured meshes.
    pub dimensions: Option<[usize; 2]>,
}

impl PanelGrid {
    /// Creates a grid from nodes and cells. All cell node indices are validated against the node
    /// count.
    pub fn new(nodes: Vec<SpatialVector>, cells: Vec<Cell>) -> Result<Self, Error> {
        let grid = Self { nodes, cells, dimensions: None };

        grid.check_cell_indices()?;

        Ok(grid)
    }

    /// Creates a structured grid, where the linear cell ordering follows the first dimension
    /// fastest. The product of the dimensions must match the number of cells.
    pub fn new_structured(
        nodes: Vec<SpatialVector>,
        cells: Vec<Cell>,
        dimensions: [usize; 2],
    ) -> Result<Self, Error> {
        if dimensions[0] * dimensions[1] != cells.len() {
            return Err(Error::ShapeMismatch {
                name: "structured grid cells".to_string(),
                expected: dimensions[0] * dimensions[1],
                actual: cells.len(),
            });
        }

        let grid = Self { nodes, cells, dimensions: Some(dimensions) };

        grid.check_cell_indices()?;

        Ok(grid)
    }

    pub(crate) fn check_cell_indices(&self) -> Result<(), Error> {
        for (i_cell, cell) in self.cells.iter().enumerate() {
            for &i_node in cell.node_indices() {
                if i_node >= self.nodes.len() {
                    return Err(Error::CustomStringError(
                        format!("Cell {} refers to node {}, but the grid only has {} nodes",
                            i_cell, i_node, self.nodes.len())
                    ));
                }
            }
        }

        Ok(())
    }

    pub fn nr_cells(&self) -> usize {
        self.cells.len()
    }

    pub fn nr_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Writes the corner points of a cell into a pre-allocated buffer and returns the corner
    /// count. Intended for tight loops where allocating a vector per cell would be wasteful.
    #[inline(always)]
    pub fn cell_points(&self, cell_index: usize, buffer: &mut [SpatialVector; 4]) -> usize {
        let indices = self.cells[cell_index].node_indices();

        for (i, &i_node) in indices.iter().enumerate() {
            buffer[i] = self.nodes[i_node];
        }

        indices.len()
    }

    /// The average of a cell's corner points
    pub fn cell_centroid(&self, cell_index: usize) -> SpatialVector {
        let mut buffer = [SpatialVector::default(); 4];
        let nr_corners = self.cell_points(cell_index, &mut buffer);

        geometry_functions::centroid(&buffer[..nr_corners])
    }

    /// The area of each cell
    pub fn calc_areas(&self) -> Vec<Float> {
        let mut buffer = [SpatialVector::default(); 4];

        (0..self.nr_cells()).map(|i_cell| {
            let nr_corners = self.cell_points(i_cell, &mut buffer);

            match nr_corners {
                3 => geometry_functions::area_of_triangle(
                    &[buffer[0], buffer[1], buffer[2]]
                ),
                _ => geometry_functions::area_of_quadrilateral(&buffer),
            }
        }).collect()
    }

    /// The unit normal of each cell, following the right-hand rule on the corner ordering. With
    /// `flip` set, all normals are reversed, which places control points with a positive offset on
    /// the opposite side of the surface.
    pub fn calc_normals(&self, flip: bool) -> Vec<SpatialVector> {
        let sign = if flip { -1.0 } else { 1.0 };

        let mut buffer = [SpatialVector::default(); 4];

        (0..self.nr_cells()).map(|i_cell| {
            let nr_corners = self.cell_points(i_cell, &mut buffer);

            let normal = match nr_corners {
                3 => geometry_functions::normal_of_triangle(
                    &[buffer[0], buffer[1], buffer[2]]
                ),
                _ => geometry_functions::normal_of_quadrilateral(&buffer),
            };

            normal * sign
        }).collect()
    }

    /// The in-plane unit tangent of each cell, taken along the first edge
    pub fn calc_tangents(&self) -> Vec<SpatialVector> {
        let mut buffer = [SpatialVector::default(); 4];

        (0..self.nr_cells()).map(|i_cell| {
            self.cell_points(i_cell, &mut buffer);

            (buffer[1] - buffer[0]).normalize()
        }).collect()
    }

    /// A second in-plane unit direction of each cell, from the first to the third corner. Not
    /// necessarily orthogonal to the tangent, but the two always span the cell plane.
    pub fn calc_obliques(&self) -> Vec<SpatialVector> {
        let mut buffer = [SpatialVector::default(); 4];

        (0..self.nr_cells()).map(|i_cell| {
            self.cell_points(i_cell, &mut buffer);

            (buffer[2] - buffer[0]).normalize()
        }).collect()
    }

    /// The collocation points where the boundary condition is enforced: each cell's centroid,
    /// displaced along its normal by `offset` times the characteristic cell length `sqrt(area)`.
    /// A negative offset places the points on the opposite side of the surface.
    pub fn calc_controlpoints(
        &self,
        normals: &[SpatialVector],
        offset: Float,
    ) -> Vec<SpatialVector> {
        let areas = self.calc_areas();

        (0..self.nr_cells()).map(|i_cell| {
            let characteristic_length = areas[i_cell].sqrt();

            self.cell_centroid(i_cell) + normals[i_cell] * (offset * characteristic_length)
        }).collect()
    }

    /// Maps a structured grid index pair to the linear cell index, with the first dimension
    /// varying fastest.
    pub fn linear_index(&self, indices: [usize; 2]) -> Result<usize, Error> {
        let dimensions = self.dimensions.ok_or_else(|| Error::CustomStringError(
            "Grid has no structured dimensions".to_string()
        ))?;

        if indices[0] >= dimensions[0] || indices[1] >= dimensions[1] {
            return Err(Error::CustomStringError(
                format!("Structured index {:?} out of range for dimensions {:?}", indices, dimensions)
            ));
        }

        Ok(indices[0] + dimensions[0] * indices[1])
    }
}
