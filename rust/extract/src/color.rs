// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Deterministic per-element-type display colors.
//!
//! Well-known building element types get fixed palette entries; everything
//! else derives its color from a hash of the declared type name. `FxHasher`
//! is seed-free, so the same type name maps to the same color within a run,
//! across runs, and across processes.

use rustc_hash::FxHasher;
use std::hash::Hasher;

/// An RGB display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A material tag grouping triangles for batched rendering, one per
/// declared element type.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Material {
    pub name: String,
    pub color: Color,
}

impl Material {
    /// Material for a declared element type, colored per [`color_for_type`].
    pub fn for_type(type_name: &str) -> Self {
        Self {
            name: type_name.to_string(),
            color: color_for_type(type_name),
        }
    }
}

/// Fixed palette for the common filterable types.
const PALETTE: &[(&str, Color)] = &[
    ("IfcWall", Color::new(255, 204, 153)),
    ("IfcRoof", Color::new(255, 153, 153)),
    ("IfcSlab", Color::new(128, 128, 128)),
];

/// Map a declared element type name to a display color.
///
/// Palette types get their fixed color; other types get a hash-derived one.
/// Hash bytes are squeezed into the 64..=223 band per channel so derived
/// colors stay distinguishable from pure black or white viewer backgrounds.
pub fn color_for_type(type_name: &str) -> Color {
    if let Some((_, color)) = PALETTE.iter().find(|(name, _)| *name == type_name) {
        return *color;
    }

    let mut hasher = FxHasher::default();
    hasher.write(type_name.as_bytes());
    let digest = hasher.finish();

    let squeeze = |byte: u8| 64 + (byte % 160);
    Color::new(
        squeeze(digest as u8),
        squeeze((digest >> 8) as u8),
        squeeze((digest >> 16) as u8),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_types_use_fixed_colors() {
        assert_eq!(color_for_type("IfcWall"), Color::new(255, 204, 153));
        assert_eq!(color_for_type("IfcRoof"), Color::new(255, 153, 153));
        assert_eq!(color_for_type("IfcSlab"), Color::new(128, 128, 128));
    }

    #[test]
    fn derived_colors_are_deterministic() {
        let first = color_for_type("IfcCurtainWall");
        let second = color_for_type("IfcCurtainWall");
        assert_eq!(first, second);
    }

    #[test]
    fn derived_colors_stay_in_visible_band() {
        for name in ["IfcBeam", "IfcColumn", "IfcDoor", "IfcWindow", "IfcStair"] {
            let c = color_for_type(name);
            for channel in [c.r, c.g, c.b] {
                assert!((64..=223).contains(&channel), "{name}: channel {channel}");
            }
        }
    }

    #[test]
    fn different_types_usually_differ() {
        assert_ne!(color_for_type("IfcBeam"), color_for_type("IfcColumn"));
    }

    #[test]
    fn material_carries_type_name() {
        let m = Material::for_type("IfcSlab");
        assert_eq!(m.name, "IfcSlab");
        assert_eq!(m.color, Color::new(128, 128, 128));
    }
}
