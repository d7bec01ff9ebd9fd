// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Element placement transforms.
//!
//! An element's tessellated shape arrives in its local coordinate frame
//! together with a 4x4 affine placement (orthonormal rotation block plus
//! translation, bottom row always `[0,0,0,1]`). Geometry providers hand the
//! coefficients over in more than one order, so every supported layout has
//! its own constructor with the index mapping spelled out; the canonical
//! internal form is always a row-major `Matrix4<f64>`.

use crate::error::{Error, Result};
use nalgebra::{Matrix4, Point3};

/// Coefficient ordering of a placement matrix as supplied by a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MatrixLayout {
    /// 12 coefficients, rows of `[R | t]`:
    /// `[r00 r01 r02 tx  r10 r11 r12 ty  r20 r21 r22 tz]`
    RowMajor3x4,
    /// 12 coefficients in axis-column order, the native output of common
    /// IFC geometry kernels:
    /// `[x_x x_y x_z  y_x y_y y_z  z_x z_y z_z  tx ty tz]`
    /// where `(x_x, x_y, x_z)` is the world direction of the local X axis.
    ColumnMajor3x4,
    /// 16 coefficients, full row-major 4x4. The bottom row is `[0,0,0,1]`
    /// by contract and is ignored.
    RowMajor4x4,
}

impl MatrixLayout {
    /// Coefficient count this layout requires.
    pub fn coefficient_count(&self) -> usize {
        match self {
            MatrixLayout::RowMajor3x4 | MatrixLayout::ColumnMajor3x4 => 12,
            MatrixLayout::RowMajor4x4 => 16,
        }
    }
}

/// An element's local-to-world placement.
///
/// The rotation block is assumed orthonormal and unscaled (IFC elements are
/// never non-uniformly scaled); it is not re-normalized or validated here.
/// NaN/Inf coefficients propagate through unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    matrix: Matrix4<f64>,
}

impl Placement {
    /// Identity placement (local frame equals world frame).
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Pure translation placement.
    pub fn from_translation(dx: f64, dy: f64, dz: f64) -> Self {
        let mut matrix = Matrix4::identity();
        matrix[(0, 3)] = dx;
        matrix[(1, 3)] = dy;
        matrix[(2, 3)] = dz;
        Self { matrix }
    }

    /// Build from 12 row-major coefficients.
    ///
    /// Input index `4*row + col` maps to matrix cell `(row, col)`; the last
    /// column of each row is the translation component.
    pub fn from_row_major_3x4(c: &[f64]) -> Result<Self> {
        check_count(c, 12, MatrixLayout::RowMajor3x4)?;
        #[rustfmt::skip]
        let matrix = Matrix4::new(
            c[0], c[1], c[2],  c[3],
            c[4], c[5], c[6],  c[7],
            c[8], c[9], c[10], c[11],
            0.0,  0.0,  0.0,   1.0,
        );
        Ok(Self { matrix })
    }

    /// Build from 12 axis-column coefficients.
    ///
    /// Input indices 0..3 are the local X axis, 3..6 the local Y axis,
    /// 6..9 the local Z axis, 9..12 the translation. Columns of the
    /// canonical matrix are the world-space directions of the local axes,
    /// so input index `3*col + row` maps to matrix cell `(row, col)`.
    pub fn from_column_major_3x4(c: &[f64]) -> Result<Self> {
        check_count(c, 12, MatrixLayout::ColumnMajor3x4)?;
        #[rustfmt::skip]
        let matrix = Matrix4::new(
            c[0], c[3], c[6], c[9],
            c[1], c[4], c[7], c[10],
            c[2], c[5], c[8], c[11],
            0.0,  0.0,  0.0,  1.0,
        );
        Ok(Self { matrix })
    }

    /// Build from 16 row-major coefficients. The bottom row is ignored.
    pub fn from_row_major_4x4(c: &[f64]) -> Result<Self> {
        check_count(c, 16, MatrixLayout::RowMajor4x4)?;
        #[rustfmt::skip]
        let matrix = Matrix4::new(
            c[0], c[1], c[2],  c[3],
            c[4], c[5], c[6],  c[7],
            c[8], c[9], c[10], c[11],
            0.0,  0.0,  0.0,   1.0,
        );
        Ok(Self { matrix })
    }

    /// Build from provider coefficients in the given layout.
    pub fn from_coefficients(layout: MatrixLayout, c: &[f64]) -> Result<Self> {
        match layout {
            MatrixLayout::RowMajor3x4 => Self::from_row_major_3x4(c),
            MatrixLayout::ColumnMajor3x4 => Self::from_column_major_3x4(c),
            MatrixLayout::RowMajor4x4 => Self::from_row_major_4x4(c),
        }
    }

    /// Transform one local vertex into world space: `world = R · local + t`.
    #[inline]
    pub fn apply(&self, local: Point3<f64>) -> Point3<f64> {
        self.matrix.transform_point(&local)
    }

    /// Transform a flat stride-3 local vertex buffer into world-space points.
    ///
    /// Fails with `MalformedInput` when the buffer length is not a multiple
    /// of 3.
    pub fn transform_vertices(&self, flat: &[f64]) -> Result<Vec<Point3<f64>>> {
        if flat.len() % 3 != 0 {
            return Err(Error::MalformedInput(format!(
                "vertex buffer length {} is not a multiple of 3",
                flat.len()
            )));
        }
        Ok(flat
            .chunks_exact(3)
            .map(|v| self.apply(Point3::new(v[0], v[1], v[2])))
            .collect())
    }

    /// The canonical 4x4 matrix.
    pub fn matrix(&self) -> &Matrix4<f64> {
        &self.matrix
    }
}

fn check_count(c: &[f64], expected: usize, layout: MatrixLayout) -> Result<()> {
    if c.len() != expected {
        return Err(Error::MalformedInput(format!(
            "placement layout {:?} expects {} coefficients, got {}",
            layout,
            expected,
            c.len()
        )));
    }
    Ok(())
}
