// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-element-type extraction pipeline.
//!
//! Orchestrates shape extraction over a user's type selection: one material
//! per declared type, placement applied to every local vertex, faces grouped
//! into triangles, output ordered element-then-face. Single-threaded and
//! synchronous; identical input against a deterministic provider yields
//! identical output.

use crate::color::Material;
use crate::error::{Error, Result};
use crate::placement::Placement;
use crate::progress::ProgressSink;
use crate::provider::{GeometryProvider, ModelProvider};
use crate::triangle::{group_triangles, Triangle};

/// Elements the user selected under one declared type name.
#[derive(Debug, Clone)]
pub struct TypeSelection<E> {
    pub type_name: String,
    pub elements: Vec<E>,
}

impl<E> TypeSelection<E> {
    pub fn new(type_name: impl Into<String>, elements: Vec<E>) -> Self {
        Self {
            type_name: type_name.into(),
            elements,
        }
    }
}

/// What to do when an element's face indices reference missing vertices.
///
/// The data is provider-corrupt either way; `Abort` fails the whole call,
/// `SkipElement` drops the offending element and keeps going.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexPolicy {
    #[default]
    Abort,
    SkipElement,
}

/// Extraction tuning knobs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractOptions {
    pub index_policy: IndexPolicy,
}

/// One drawable batch: all triangles sharing a material tag.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialGroup {
    pub material: Material,
    pub triangles: Vec<Triangle>,
}

/// Resolve a stored type-name selection against a loaded model.
///
/// Types that no longer match any element resolve to empty entries; the
/// pipeline turns an entirely empty resolution into `SelectionNotFound`.
pub fn select_types<M: ModelProvider>(
    model: &M,
    type_names: &[String],
) -> Vec<TypeSelection<M::Element>> {
    type_names
        .iter()
        .map(|name| TypeSelection::new(name.clone(), model.elements_by_type(name)))
        .collect()
}

/// Extract world-space triangles for every element of every selected type.
///
/// Elements without a geometric representation are skipped silently;
/// element-specific provider failures are skipped with a warning. Structural
/// input errors (`MalformedInput`) abort the call with no partial output.
/// Out-of-range face indices abort or skip per [`ExtractOptions`].
pub fn extract_selection<P: GeometryProvider>(
    provider: &P,
    settings: &P::Settings,
    selection: &[TypeSelection<P::Element>],
    options: &ExtractOptions,
    progress: &mut dyn ProgressSink,
) -> Result<Vec<MaterialGroup>> {
    if selection.is_empty() {
        return Err(Error::EmptySelection);
    }

    let total: usize = selection.iter().map(|s| s.elements.len()).sum();
    if total == 0 {
        let names: Vec<&str> = selection.iter().map(|s| s.type_name.as_str()).collect();
        return Err(Error::SelectionNotFound(names.join(", ")));
    }

    let mut groups = Vec::with_capacity(selection.len());
    let mut processed = 0usize;

    for entry in selection {
        let material = Material::for_type(&entry.type_name);
        let mut triangles = Vec::new();

        for element in &entry.elements {
            processed += 1;

            match provider.create_shape(settings, element) {
                Ok(shape) => {
                    let placement =
                        Placement::from_coefficients(shape.layout, &shape.placement)?;
                    let world = placement.transform_vertices(&shape.vertices)?;
                    match group_triangles(&world, &shape.face_indices) {
                        Ok(tris) => triangles.extend(tris),
                        Err(err @ Error::IndexOutOfRange { .. })
                            if options.index_policy == IndexPolicy::SkipElement =>
                        {
                            tracing::warn!(
                                element_type = %entry.type_name,
                                error = %err,
                                "Skipping element with corrupt face indices"
                            );
                        }
                        Err(err) => return Err(err),
                    }
                }
                Err(Error::NoRepresentation) => {
                    tracing::debug!(
                        element_type = %entry.type_name,
                        "Skipping element without geometric representation"
                    );
                }
                Err(Error::Provider(message)) => {
                    tracing::warn!(
                        element_type = %entry.type_name,
                        %message,
                        "Geometry provider failed for element, skipping"
                    );
                }
                Err(err) => return Err(err),
            }

            progress.report(&format!(
                "Processed {processed} of {total} elements ({})",
                entry.type_name
            ));
        }

        if !triangles.is_empty() {
            groups.push(MaterialGroup {
                material,
                triangles,
            });
        }
    }

    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::MatrixLayout;
    use crate::progress::NullProgress;
    use crate::provider::TessellatedShape;
    use rustc_hash::FxHashMap;

    /// Minimal in-memory provider keyed by element name.
    struct MapProvider {
        shapes: FxHashMap<&'static str, Result<TessellatedShape>>,
    }

    impl GeometryProvider for MapProvider {
        type Element = &'static str;
        type Settings = ();

        fn create_shape(&self, _: &(), element: &&'static str) -> Result<TessellatedShape> {
            match self.shapes.get(element) {
                Some(Ok(shape)) => Ok(shape.clone()),
                Some(Err(Error::NoRepresentation)) => Err(Error::NoRepresentation),
                Some(Err(Error::Provider(m))) => Err(Error::Provider(m.clone())),
                Some(Err(_)) => unreachable!("unsupported stub error"),
                None => Err(Error::NoRepresentation),
            }
        }
    }

    fn unit_quad(placement: Vec<f64>, layout: MatrixLayout) -> TessellatedShape {
        TessellatedShape {
            vertices: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
            face_indices: vec![0, 1, 2, 0, 1, 3],
            placement,
            layout,
        }
    }

    fn identity_coeffs() -> Vec<f64> {
        vec![
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0,
        ]
    }

    #[test]
    fn empty_selection_is_an_error() {
        let provider = MapProvider {
            shapes: FxHashMap::default(),
        };
        let err = extract_selection::<MapProvider>(
            &provider,
            &(),
            &[],
            &ExtractOptions::default(),
            &mut NullProgress,
        );
        assert!(matches!(err, Err(Error::EmptySelection)));
    }

    #[test]
    fn stale_selection_is_distinguished_from_empty() {
        let provider = MapProvider {
            shapes: FxHashMap::default(),
        };
        let selection = vec![TypeSelection::new("IfcWall", Vec::new())];
        let err = extract_selection(
            &provider,
            &(),
            &selection,
            &ExtractOptions::default(),
            &mut NullProgress,
        );
        match err {
            Err(Error::SelectionNotFound(names)) => assert_eq!(names, "IfcWall"),
            other => panic!("expected SelectionNotFound, got {other:?}"),
        }
    }

    #[test]
    fn elements_without_representation_are_skipped() {
        let mut shapes = FxHashMap::default();
        shapes.insert(
            "wall-1",
            Ok(unit_quad(identity_coeffs(), MatrixLayout::RowMajor3x4)),
        );
        shapes.insert("wall-2", Err(Error::NoRepresentation));
        let provider = MapProvider { shapes };

        let selection = vec![TypeSelection::new("IfcWall", vec!["wall-1", "wall-2"])];
        let groups = extract_selection(
            &provider,
            &(),
            &selection,
            &ExtractOptions::default(),
            &mut NullProgress,
        )
        .unwrap();

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].triangles.len(), 2);
    }

    #[test]
    fn provider_failure_skips_the_element() {
        let mut shapes = FxHashMap::default();
        shapes.insert("roof-1", Err(Error::Provider("kernel choked".into())));
        shapes.insert(
            "roof-2",
            Ok(unit_quad(identity_coeffs(), MatrixLayout::RowMajor3x4)),
        );
        let provider = MapProvider { shapes };

        let selection = vec![TypeSelection::new("IfcRoof", vec!["roof-1", "roof-2"])];
        let groups = extract_selection(
            &provider,
            &(),
            &selection,
            &ExtractOptions::default(),
            &mut NullProgress,
        )
        .unwrap();

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].triangles.len(), 2);
    }

    #[test]
    fn bad_placement_coefficients_abort_the_call() {
        let mut shapes = FxHashMap::default();
        shapes.insert(
            "wall-1",
            Ok(unit_quad(vec![1.0; 7], MatrixLayout::RowMajor3x4)),
        );
        let provider = MapProvider { shapes };

        let selection = vec![TypeSelection::new("IfcWall", vec!["wall-1"])];
        let err = extract_selection(
            &provider,
            &(),
            &selection,
            &ExtractOptions::default(),
            &mut NullProgress,
        );
        assert!(matches!(err, Err(Error::MalformedInput(_))));
    }
}
