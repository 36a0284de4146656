// Copyright (C) 2025, NTNU
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

//! Geometric helper functions for flat triangular and quadrilateral faces.

use super::*;

#[inline(always)]
/// Area of a triangle from its corner points
pub fn area_of_triangle(vertices: &[SpatialVector; 3]) -> Float {
    let a = vertices[1] - vertices[0];
    let b = vertices[2] - vertices[0];

    0.5 * a.cross(b).length()
}

#[inline(always)]
/// Unit normal of a triangle from its corner points, following the right-hand rule on the corner
/// ordering
pub fn normal_of_triangle(vertices: &[SpatialVector; 3]) -> SpatialVector {
    let a = vertices[1] - vertices[0];
    let b = vertices[2] - vertices[0];

    a.cross(b).normalize()
}

#[inline(always)]
/// Area of a planar quadrilateral, calculated from the cross product of the diagonals
pub fn area_of_quadrilateral(vertices: &[SpatialVector; 4]) -> Float {
    let a = vertices[2] - vertices[0];
    let b = vertices[3] - vertices[1];

    0.5 * a.cross(b).length()
}

#[inline(always)]
/// Unit normal of a quadrilateral, calculated from the cross product of the diagonals
pub fn normal_of_quadrilateral(vertices: &[SpatialVector; 4]) -> SpatialVector {
    let a = vertices[2] - vertices[0];
    let b = vertices[3] - vertices[1];

    a.cross(b).normalize()
}

#[inline(always)]
/// Average of the corner points of a face with three or four corners
pub fn centroid(vertices: &[SpatialVector]) -> SpatialVector {
    let mut sum = SpatialVector::default();

    for vertex in vertices {
        sum += *vertex;
    }

    sum / vertices.len() as Float
}
