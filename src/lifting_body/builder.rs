// Copyright (C) 2025, NTNU
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

//! A serializable description of a lifting body, so a complete setup can be read from a JSON
//! string.

use serde::{Deserialize, Serialize};

use vortexmath::coordinate_systems::CoordinateFrame;
use vortexmath::type_aliases::Float;

use crate::error::Error;
use crate::panel_geometry::PanelGrid;
use crate::singularity_elements::Regularization;

use super::{ElementFamily, LiftingBody};
use super::shedding::SheddingEdge;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LiftingBodyBuilder {
    pub grid: PanelGrid,
    #[serde(default)]
    pub element_family: ElementFamily,
    #[serde(default)]
    pub shedding: Vec<SheddingEdge>,
    #[serde(default)]
    pub frame: CoordinateFrame,
    #[serde(default = "LiftingBody::default_control_point_offset")]
    pub control_point_offset: Float,
    #[serde(default)]
    pub regularization: Regularization,
}

impl LiftingBodyBuilder {
    /// Creates a new builder from a string that describes the setup in a JSON format.
    pub fn new_from_string(setup_string: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(setup_string)?)
    }

    pub fn build(self) -> Result<LiftingBody, Error> {
        let mut body = LiftingBody::new(self.grid, self.element_family, self.shedding)?;

        body.frame = self.frame;
        body.control_point_offset = self.control_point_offset;
        body.regularization = self.regularization;

        Ok(body)
    }
}
