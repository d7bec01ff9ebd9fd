// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for extraction operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during triangle extraction
#[derive(Error, Debug)]
pub enum Error {
    /// The element has no tessellatable geometry. Recovered locally by the
    /// pipeline (the element is skipped), never surfaced to the caller.
    #[error("Element has no geometric representation")]
    NoRepresentation,

    /// Structurally invalid input data. Fatal to the whole extraction call;
    /// retrying cannot help.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// A face index references a vertex that does not exist.
    #[error("Face index {index} out of range (vertex count {vertex_count})")]
    IndexOutOfRange { index: u32, vertex_count: usize },

    /// The external geometry provider failed for one element.
    #[error("Geometry provider failure: {0}")]
    Provider(String),

    /// No element types were selected for extraction.
    #[error("No input selected: choose at least one element type")]
    EmptySelection,

    /// A stored selection no longer matches the loaded model.
    #[error("Selected elements not found in current model: {0}")]
    SelectionNotFound(String),
}
