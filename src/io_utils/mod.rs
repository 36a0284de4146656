// Copyright (C) 2025, NTNU
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

//! Thin helpers for exporting solved results to text formats. Mesh file formats and
//! visualization exports are left to external tooling.

use std::fs;
use std::io::Write;

use crate::error::Error;
use crate::lifting_body::LiftingBody;

pub mod csv_data;

pub fn write_text_to_file(file_path: &str, text: &str) -> std::io::Result<()> {
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(file_path)?;

    file.write_all(text.as_bytes())?;
    Ok(())
}

/// Serializes the body's whole field store, in insertion order, to a JSON string.
pub fn fields_to_json_string(body: &LiftingBody) -> Result<String, Error> {
    Ok(serde_json::to_string_pretty(body.fields())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::lifting_body::tests::test_setup::{uniform_freestream, FlatPlate};

    #[test]
    fn the_field_store_serializes_to_json() {
        let plate = FlatPlate::default();

        let mut body = plate.body();

        let uinfs = uniform_freestream(body.nr_cells(), 0.05);

        body.solve(&uinfs, &[], &[], &[]).unwrap();

        let json = fields_to_json_string(&body).unwrap();

        assert!(json.contains("\"Gamma\""));
        assert!(json.contains("\"Uinf\""));
    }

    #[test]
    fn text_files_round_trip() {
        let file_path = std::env::temp_dir().join("vortexpanel_io_utils_test.txt");
        let file_path = file_path.to_str().unwrap();

        write_text_to_file(file_path, "cell,Gamma\n0,0.5").unwrap();

        let read_back = fs::read_to_string(file_path).unwrap();

        assert_eq!(read_back, "cell,Gamma\n0,0.5");
    }
}
