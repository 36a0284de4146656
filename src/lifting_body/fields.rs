// Copyright (C) 2025, NTNU
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

//! A small store for named result fields on a body.
//!
//! The store is an association list keyed by field name. Insertion order is preserved, so
//! exported results come out in a deterministic order. Readers get immutable views of the data.

use serde::{Deserialize, Serialize};

use vortexmath::spatial_vector::SpatialVector;
use vortexmath::type_aliases::Float;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    Scalar,
    Vector,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// What the entries of a field refer to: one value per cell, one per node, or values describing
/// the system as a whole.
pub enum FieldLocation {
    Cell,
    Node,
    System,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldData {
    Scalar(Vec<Float>),
    Vector(Vec<SpatialVector>),
}

impl FieldData {
    pub fn field_type(&self) -> FieldType {
        match self {
            FieldData::Scalar(_) => FieldType::Scalar,
            FieldData::Vector(_) => FieldType::Vector,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            FieldData::Scalar(data) => data.len(),
            FieldData::Vector(data) => data.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_scalar(&self) -> Option<&[Float]> {
        match self {
            FieldData::Scalar(data) => Some(data),
            FieldData::Vector(_) => None,
        }
    }

    pub fn as_vector(&self) -> Option<&[SpatialVector]> {
        match self {
            FieldData::Scalar(_) => None,
            FieldData::Vector(data) => Some(data),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub location: FieldLocation,
    pub data: FieldData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldStore {
    entries: Vec<Field>,
}

impl FieldStore {
    /// Stores a field under the given name. An existing field with the same name is replaced in
    /// place, keeping its position in the insertion order.
    pub fn add(&mut self, name: &str, data: FieldData, location: FieldLocation) {
        let field = Field {
            name: name.to_string(),
            location,
            data,
        };

        match self.entries.iter_mut().find(|entry| entry.name == name) {
            Some(entry) => *entry = field,
            None => self.entries.push(field),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Field> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub fn check(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Field names in insertion order
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.entries.iter()
    }
}
