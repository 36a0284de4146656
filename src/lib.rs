// Copyright (C) 2025, NTNU
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

#![doc(html_no_source)]

#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

pub mod error;
pub mod panel_geometry;
pub mod singularity_elements;
pub mod lifting_body;
pub mod solver;
pub mod flow_fields;
pub mod io_utils;

/// Typical imports when using the panel method functionality
pub mod prelude {
    pub use vortexmath::type_aliases::Float;
    pub use vortexmath::spatial_vector::SpatialVector;
    pub use vortexmath::coordinate_systems::CoordinateFrame;
    pub use vortexmath::matrix::Matrix;

    pub use crate::error::Error;

    pub use crate::panel_geometry::{Cell, PanelGrid};

    pub use crate::singularity_elements::Regularization;

    pub use crate::lifting_body::{
        ElementFamily,
        LiftingBody,
        builder::LiftingBodyBuilder,
        fields::{Field, FieldData, FieldLocation},
        shedding::{PartnerEdge, SheddingEdge},
    };

    pub use crate::solver::{gaussian_elimination, LinearSolver};
}
