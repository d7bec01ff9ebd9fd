// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Collaborator seams toward the external IFC library and the host UI.
//!
//! The extraction core never parses IFC or tessellates BReps itself; it is
//! written against these traits and consumes whatever the host's geometry
//! kernel produces. Element handles and tessellation settings are opaque
//! associated types so any provider can plug in without conversion.

use crate::error::Result;
use crate::pipeline::MaterialGroup;
use crate::placement::MatrixLayout;

/// Raw tessellation output for one element, as handed over by a geometry
/// provider: flat local-space vertices, flat triangle indices, and the
/// element's placement coefficients in the provider's native layout.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TessellatedShape {
    /// Vertex coordinates, stride 3, element-local frame.
    pub vertices: Vec<f64>,
    /// Triangle vertex indices, stride 3, tessellator winding order.
    pub face_indices: Vec<u32>,
    /// Placement matrix coefficients (12 or 16 depending on `layout`).
    pub placement: Vec<f64>,
    /// Coefficient ordering of `placement`.
    pub layout: MatrixLayout,
}

/// Turns an element into a tessellated shape with a placement matrix.
///
/// `create_shape` returns [`Error::NoRepresentation`](crate::Error) for
/// elements without tessellatable geometry and
/// [`Error::Provider`](crate::Error) for element-specific kernel failures;
/// both are recovered locally by the pipeline.
pub trait GeometryProvider {
    /// Opaque element handle.
    type Element;
    /// Opaque tessellation settings, passed through uninterpreted.
    type Settings;

    fn create_shape(
        &self,
        settings: &Self::Settings,
        element: &Self::Element,
    ) -> Result<TessellatedShape>;
}

/// Enumerates model elements by declared IFC type and supports removing
/// elements ahead of serialization (the filter-and-download workflow; the
/// extraction core itself never removes anything).
pub trait ModelProvider {
    type Element;

    /// Declared type names present in the model.
    fn element_types(&self) -> Vec<String>;

    /// All elements declared as `type_name`, in model order.
    fn elements_by_type(&self, type_name: &str) -> Vec<Self::Element>;

    /// Remove one element from the in-memory model. Returns whether the
    /// element was present.
    fn remove_element(&mut self, element: &Self::Element) -> bool;
}

/// Accepts extraction output for interactive display, one drawable batch
/// per material group.
pub trait RenderSink {
    fn submit(&mut self, groups: &[MaterialGroup]);
}
