// Copyright (C) 2025, NTNU
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

use vortexmath::spatial_vector::SpatialVector;

use crate::error::Error;
use crate::lifting_body::{ElementFamily, LiftingBody};
use crate::lifting_body::builder::LiftingBodyBuilder;
use crate::lifting_body::shedding::{PartnerEdge, SheddingEdge};
use crate::panel_geometry::{Cell, PanelGrid};

use super::test_setup::FlatPlate;

/// Two quadrilaterals in the z = 0 plane sharing the edge between nodes 1 and 2
fn two_quad_grid() -> PanelGrid {
    let nodes = vec![
        SpatialVector::new(0.0, 0.0, 0.0),
        SpatialVector::new(1.0, 0.0, 0.0),
        SpatialVector::new(1.0, 1.0, 0.0),
        SpatialVector::new(0.0, 1.0, 0.0),
        SpatialVector::new(2.0, 0.0, 0.0),
        SpatialVector::new(2.0, 1.0, 0.0),
    ];

    let cells = vec![
        Cell::Quadrilateral([0, 1, 2, 3]),
        Cell::Quadrilateral([1, 4, 5, 2]),
    ];

    PanelGrid::new(nodes, cells).unwrap()
}

#[test]
fn shared_edges_are_accepted_in_either_node_order() {
    let same_order = SheddingEdge {
        upper_panel: 0,
        upper_edge: [1, 2],
        lower: Some(PartnerEdge { panel: 1, edge: [1, 2] }),
    };

    let reversed_order = SheddingEdge {
        upper_panel: 0,
        upper_edge: [1, 2],
        lower: Some(PartnerEdge { panel: 1, edge: [2, 1] }),
    };

    assert!(LiftingBody::new(two_quad_grid(), ElementFamily::VortexRing, vec![same_order]).is_ok());
    assert!(LiftingBody::new(two_quad_grid(), ElementFamily::VortexRing, vec![reversed_order]).is_ok());
}

#[test]
fn out_of_range_shedding_panel_is_fatal() {
    let shedding = vec![SheddingEdge {
        upper_panel: 7,
        upper_edge: [1, 2],
        lower: None,
    }];

    let result = LiftingBody::new(two_quad_grid(), ElementFamily::VortexRing, shedding);

    assert!(matches!(result, Err(Error::InvalidTrailingEdge { index: 0, .. })));
}

#[test]
fn shedding_edge_must_be_part_of_its_panel() {
    let shedding = vec![SheddingEdge {
        upper_panel: 0,
        upper_edge: [1, 4],
        lower: None,
    }];

    let result = LiftingBody::new(two_quad_grid(), ElementFamily::VortexRing, shedding);

    assert!(matches!(result, Err(Error::InvalidTrailingEdge { .. })));
}

#[test]
fn non_coincident_partner_edges_are_fatal() {
    let shedding = vec![SheddingEdge {
        upper_panel: 0,
        upper_edge: [1, 2],
        lower: Some(PartnerEdge { panel: 1, edge: [4, 5] }),
    }];

    let result = LiftingBody::new(two_quad_grid(), ElementFamily::VortexRing, shedding);

    match result {
        Err(Error::InvalidTrailingEdge { index, reason }) => {
            assert_eq!(index, 0);
            assert!(reason.contains("coincide"));
        },
        other => panic!("Expected an invalid trailing edge error, got {:?}", other),
    }
}

#[test]
fn a_body_setup_survives_a_json_round_trip() {
    let plate = FlatPlate::default();

    let builder = LiftingBodyBuilder {
        grid: plate.grid(),
        element_family: ElementFamily::VortexRing,
        shedding: plate.open_trailing_edge(),
        frame: Default::default(),
        control_point_offset: 0.01,
        regularization: Default::default(),
    };

    let setup_string = serde_json::to_string(&builder).unwrap();

    let body = LiftingBodyBuilder::new_from_string(&setup_string)
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(body.nr_cells(), plate.nr_chordwise * plate.nr_spanwise);
    assert_eq!(body.shedding.len(), plate.nr_spanwise);
    assert_eq!(body.control_point_offset, 0.01);
    assert!(!body.is_solved());
}

#[test]
fn unknown_setup_fields_are_rejected() {
    let result = LiftingBodyBuilder::new_from_string("{\"unknown_field\": 1}");

    assert!(matches!(result, Err(Error::SerdeJsonError(_))));
}
