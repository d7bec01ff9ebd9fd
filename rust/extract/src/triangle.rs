// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Face-index grouping into renderable triangles.

use crate::error::{Error, Result};
use nalgebra::Point3;

/// One world-space triangle. Vertex order is the winding order supplied by
/// the tessellator; it determines the front-face normal downstream and is
/// never reordered here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub a: Point3<f64>,
    pub b: Point3<f64>,
    pub c: Point3<f64>,
}

impl Triangle {
    pub fn new(a: Point3<f64>, b: Point3<f64>, c: Point3<f64>) -> Self {
        Self { a, b, c }
    }
}

/// Group a flat face-index buffer into triangles over the given vertices.
///
/// Every consecutive index triple `(i, i+1, i+2)` yields one triangle, in
/// input order. Fails with `MalformedInput` when the index count is not a
/// multiple of 3 and with `IndexOutOfRange` when an index references a
/// vertex that does not exist; no partial output is returned in either case.
pub fn group_triangles(vertices: &[Point3<f64>], face_indices: &[u32]) -> Result<Vec<Triangle>> {
    if face_indices.len() % 3 != 0 {
        return Err(Error::MalformedInput(format!(
            "face index count {} is not a multiple of 3",
            face_indices.len()
        )));
    }

    let vertex_count = vertices.len();
    if let Some(&bad) = face_indices.iter().find(|&&i| i as usize >= vertex_count) {
        return Err(Error::IndexOutOfRange {
            index: bad,
            vertex_count,
        });
    }

    Ok(face_indices
        .chunks_exact(3)
        .map(|tri| {
            Triangle::new(
                vertices[tri[0] as usize],
                vertices[tri[1] as usize],
                vertices[tri[2] as usize],
            )
        })
        .collect())
}
