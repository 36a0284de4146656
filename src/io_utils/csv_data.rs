// Copyright (C) 2025, NTNU
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

//! CSV export of per-cell result fields.

use crate::error::Error;
use crate::lifting_body::LiftingBody;
use crate::lifting_body::fields::{FieldData, FieldLocation};

/// Builds a CSV string with one row per cell and one column group per requested field. Scalar
/// fields get a single column; vector fields get three, suffixed `_x`, `_y` and `_z`. All
/// requested fields must be cell fields of the right length.
pub fn cell_fields_to_csv(body: &LiftingBody, field_names: &[&str]) -> Result<String, Error> {
    let nr_cells = body.nr_cells();

    let mut header = vec!["cell".to_string()];

    for &name in field_names {
        let field = body.get_field(name)?;

        if field.location != FieldLocation::Cell {
            return Err(Error::CustomStringError(
                format!("Field '{}' is not a cell field", name)
            ));
        }

        if field.data.len() != nr_cells {
            return Err(Error::ShapeMismatch {
                name: name.to_string(),
                expected: nr_cells,
                actual: field.data.len(),
            });
        }

        match field.data {
            FieldData::Scalar(_) => header.push(name.to_string()),
            FieldData::Vector(_) => {
                for suffix in ["x", "y", "z"] {
                    header.push(format!("{}_{}", name, suffix));
                }
            },
        }
    }

    let mut lines = vec![header.join(",")];

    for i_cell in 0..nr_cells {
        let mut entries = vec![i_cell.to_string()];

        for &name in field_names {
            match &body.get_field(name)?.data {
                FieldData::Scalar(data) => entries.push(format!("{}", data[i_cell])),
                FieldData::Vector(data) => {
                    for i in 0..3 {
                        entries.push(format!("{}", data[i_cell][i]));
                    }
                },
            }
        }

        lines.push(entries.join(","));
    }

    Ok(lines.join("\n"))
}
