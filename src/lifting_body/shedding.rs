// Copyright (C) 2025, NTNU
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

//! Trailing edge definitions: which panel edges shed a wake, and their validation.

use serde::{Deserialize, Serialize};

use vortexmath::type_aliases::Float;

use crate::error::Error;
use crate::panel_geometry::PanelGrid;

/// Relative tolerance for how far apart two node positions may be while still counting as the
/// same trailing edge segment
const EDGE_COINCIDENCE_TOLERANCE: Float = 1.0e-10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// The second panel sharing a closed trailing edge segment
pub struct PartnerEdge {
    pub panel: usize,
    pub edge: [usize; 2],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// A trailing edge segment marked for wake shedding. The edge is identified by two node indices
/// on the shedding panel. A closed trailing edge has a partner panel on the other side of the
/// same segment; an open (half) trailing edge has none.
pub struct SheddingEdge {
    pub upper_panel: usize,
    pub upper_edge: [usize; 2],
    pub lower: Option<PartnerEdge>,
}

/// Validates all shedding records against the grid. Out-of-range indices, edges that are not
/// part of their panel, and partner edges that do not coincide geometrically with the upper edge
/// are all fatal.
pub fn check_trailing_edges(grid: &PanelGrid, shedding: &[SheddingEdge]) -> Result<(), Error> {
    for (index, edge) in shedding.iter().enumerate() {
        check_edge_on_panel(grid, edge.upper_panel, edge.upper_edge, index)?;

        if let Some(partner) = &edge.lower {
            check_edge_on_panel(grid, partner.panel, partner.edge, index)?;

            check_edges_coincide(grid, edge.upper_edge, partner.edge, index)?;
        }
    }

    Ok(())
}

fn check_edge_on_panel(
    grid: &PanelGrid,
    panel: usize,
    edge: [usize; 2],
    index: usize,
) -> Result<(), Error> {
    if panel >= grid.nr_cells() {
        return Err(Error::InvalidTrailingEdge {
            index,
            reason: format!("panel index {} out of range ({} cells)", panel, grid.nr_cells()),
        });
    }

    for &i_node in &edge {
        if i_node >= grid.nr_nodes() {
            return Err(Error::InvalidTrailingEdge {
                index,
                reason: format!("node index {} out of range ({} nodes)", i_node, grid.nr_nodes()),
            });
        }

        if !grid.cells[panel].node_indices().contains(&i_node) {
            return Err(Error::InvalidTrailingEdge {
                index,
                reason: format!("node {} is not a corner of panel {}", i_node, panel),
            });
        }
    }

    Ok(())
}

fn check_edges_coincide(
    grid: &PanelGrid,
    upper_edge: [usize; 2],
    lower_edge: [usize; 2],
    index: usize,
) -> Result<(), Error> {
    let a_upper = grid.nodes[upper_edge[0]];
    let b_upper = grid.nodes[upper_edge[1]];
    let a_lower = grid.nodes[lower_edge[0]];
    let b_lower = grid.nodes[lower_edge[1]];

    let tolerance = EDGE_COINCIDENCE_TOLERANCE * (b_upper - a_upper).length().max(1.0);

    // The two records describe the same segment regardless of node order
    let same_order =
        a_upper.distance(a_lower) < tolerance && b_upper.distance(b_lower) < tolerance;

    let reversed_order =
        a_upper.distance(b_lower) < tolerance && b_upper.distance(a_lower) < tolerance;

    if same_order || reversed_order {
        Ok(())
    } else {
        Err(Error::InvalidTrailingEdge {
            index,
            reason: format!(
                "upper edge {:?} and lower edge {:?} do not coincide", upper_edge, lower_edge
            ),
        })
    }
}
