// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IFC-Facet triangle extraction
//!
//! Turns tessellated IFC element shapes into world-space, material-tagged
//! triangle batches ready for a rendering sink. IFC parsing and BRep
//! tessellation stay with the external geometry provider; this crate owns
//! the placement transform, face-index grouping, deterministic per-type
//! coloring, and the per-type extraction pipeline.

pub mod color;
pub mod error;
pub mod pipeline;
pub mod placement;
pub mod progress;
pub mod provider;
pub mod triangle;

// Re-export nalgebra types for convenience
pub use nalgebra::{Matrix4, Point3, Vector3};

pub use color::{color_for_type, Color, Material};
pub use error::{Error, Result};
pub use pipeline::{
    extract_selection, select_types, ExtractOptions, IndexPolicy, MaterialGroup, TypeSelection,
};
pub use placement::{MatrixLayout, Placement};
pub use progress::{NullProgress, ProgressSink, Throttle, ThrottledSink};
pub use provider::{GeometryProvider, ModelProvider, RenderSink, TessellatedShape};
pub use triangle::{group_triangles, Triangle};
