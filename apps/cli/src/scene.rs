// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JSON scene dumps: the serialized form of what a geometry provider hands
//! over per element. Used as the tool's input fixture format; it is not an
//! interchange format.

use ifc_facet_extract::{
    Error, GeometryProvider, MatrixLayout, ModelProvider, Result, TessellatedShape,
};
use serde::{Deserialize, Serialize};

fn identity_coefficients() -> Vec<f64> {
    vec![
        1.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0,
    ]
}

fn default_layout() -> MatrixLayout {
    MatrixLayout::RowMajor3x4
}

/// One dumped element: declared type plus raw tessellation output.
/// Elements without geometry (empty vertex list) have no representation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneElement {
    pub element_type: String,
    #[serde(default)]
    pub vertices: Vec<f64>,
    #[serde(default)]
    pub face_indices: Vec<u32>,
    #[serde(default = "identity_coefficients")]
    pub placement: Vec<f64>,
    #[serde(default = "default_layout")]
    pub layout: MatrixLayout,
}

/// A full scene dump.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneFile {
    pub elements: Vec<SceneElement>,
}

/// In-memory scene acting as both model and geometry provider. Elements are
/// addressed by stable ids assigned at load, so removal never invalidates
/// handles.
#[derive(Debug)]
pub struct JsonScene {
    elements: Vec<(u32, SceneElement)>,
}

impl JsonScene {
    pub fn new(file: SceneFile) -> Self {
        Self {
            elements: file
                .elements
                .into_iter()
                .enumerate()
                .map(|(i, e)| (i as u32, e))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Serialize the current (possibly filtered) scene back to a dump.
    pub fn to_file(&self) -> SceneFile {
        SceneFile {
            elements: self.elements.iter().map(|(_, e)| e.clone()).collect(),
        }
    }
}

impl ModelProvider for JsonScene {
    type Element = u32;

    fn element_types(&self) -> Vec<String> {
        let mut types = Vec::new();
        for (_, element) in &self.elements {
            if !types.contains(&element.element_type) {
                types.push(element.element_type.clone());
            }
        }
        types
    }

    fn elements_by_type(&self, type_name: &str) -> Vec<u32> {
        self.elements
            .iter()
            .filter(|(_, e)| e.element_type == type_name)
            .map(|(id, _)| *id)
            .collect()
    }

    fn remove_element(&mut self, element: &u32) -> bool {
        let before = self.elements.len();
        self.elements.retain(|(id, _)| id != element);
        self.elements.len() != before
    }
}

impl GeometryProvider for JsonScene {
    type Element = u32;
    /// Scene dumps are already tessellated; there is nothing to tune.
    type Settings = ();

    fn create_shape(&self, _settings: &(), element: &u32) -> Result<TessellatedShape> {
        let (_, entry) = self
            .elements
            .iter()
            .find(|(id, _)| id == element)
            .ok_or_else(|| Error::Provider(format!("unknown element id {element}")))?;

        if entry.vertices.is_empty() {
            return Err(Error::NoRepresentation);
        }

        Ok(TessellatedShape {
            vertices: entry.vertices.clone(),
            face_indices: entry.face_indices.clone(),
            placement: entry.placement.clone(),
            layout: entry.layout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_scene() -> JsonScene {
        JsonScene::new(SceneFile {
            elements: vec![
                SceneElement {
                    element_type: "IfcWall".into(),
                    vertices: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
                    face_indices: vec![0, 1, 2],
                    placement: identity_coefficients(),
                    layout: MatrixLayout::RowMajor3x4,
                },
                SceneElement {
                    element_type: "IfcSlab".into(),
                    vertices: Vec::new(),
                    face_indices: Vec::new(),
                    placement: identity_coefficients(),
                    layout: MatrixLayout::RowMajor3x4,
                },
            ],
        })
    }

    #[test]
    fn element_types_keep_model_order() {
        assert_eq!(sample_scene().element_types(), vec!["IfcWall", "IfcSlab"]);
    }

    #[test]
    fn geometry_free_elements_report_no_representation() {
        let scene = sample_scene();
        let slab = scene.elements_by_type("IfcSlab")[0];
        assert!(matches!(
            scene.create_shape(&(), &slab),
            Err(Error::NoRepresentation)
        ));
    }

    #[test]
    fn removal_filters_the_serialized_scene() {
        let mut scene = sample_scene();
        let slab = scene.elements_by_type("IfcSlab")[0];
        assert!(scene.remove_element(&slab));
        assert!(!scene.remove_element(&slab));
        assert_eq!(scene.to_file().elements.len(), 1);
        assert_eq!(scene.to_file().elements[0].element_type, "IfcWall");
    }

    #[test]
    fn missing_placement_defaults_to_identity() {
        let file: SceneFile = serde_json::from_str(
            r#"{"elements":[{"element_type":"IfcBeam","vertices":[0,0,0],"face_indices":[]}]}"#,
        )
        .unwrap();
        assert_eq!(file.elements[0].placement, identity_coefficients());
        assert_eq!(file.elements[0].layout, MatrixLayout::RowMajor3x4);
    }
}
