// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IFC-Facet extraction tool.
//!
//! Reads a JSON scene dump (tessellated element shapes as a geometry
//! provider hands them over), extracts world-space triangles grouped by
//! element type, and writes the result as JSON to stdout.
//!
//! ```text
//! ifc-facet <scene.json> [TypeA,TypeB,...]
//! ```
//!
//! With no type list, every type present in the scene is extracted. Set
//! `FILTERED_OUT=<path>` to also write a copy of the scene containing only
//! the selected types (the filter-and-download workflow).

use anyhow::Context;
use ifc_facet_extract::{
    extract_selection, select_types, ExtractOptions, Material, MaterialGroup, ModelProvider,
    ProgressSink, RenderSink, Throttle, ThrottledSink,
};
use serde::Serialize;
use std::time::Duration;

mod config;
mod scene;

use config::Config;
use scene::{JsonScene, SceneFile};

/// Progress sink backed by the tracing pipeline.
struct TracingProgress;

impl ProgressSink for TracingProgress {
    fn report(&mut self, message: &str) {
        tracing::info!("{message}");
    }
}

#[derive(Serialize)]
struct GroupDump {
    material: Material,
    triangles: Vec<[[f64; 3]; 3]>,
}

/// Render sink that buffers drawable batches for JSON output.
#[derive(Default)]
struct JsonRenderSink {
    groups: Vec<GroupDump>,
}

impl RenderSink for JsonRenderSink {
    fn submit(&mut self, groups: &[MaterialGroup]) {
        for group in groups {
            self.groups.push(GroupDump {
                material: group.material.clone(),
                triangles: group
                    .triangles
                    .iter()
                    .map(|t| {
                        [
                            [t.a.x, t.a.y, t.a.z],
                            [t.b.x, t.b.y, t.b.z],
                            [t.c.x, t.c.y, t.c.z],
                        ]
                    })
                    .collect(),
            });
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env();

    let mut args = std::env::args().skip(1);
    let scene_path = args
        .next()
        .context("usage: ifc-facet <scene.json> [TypeA,TypeB,...]")?;
    let type_filter: Option<Vec<String>> = args
        .next()
        .map(|list| list.split(',').map(|s| s.trim().to_string()).collect());

    let raw = std::fs::read_to_string(&scene_path)
        .with_context(|| format!("reading scene dump {scene_path}"))?;
    let file: SceneFile =
        serde_json::from_str(&raw).with_context(|| format!("parsing scene dump {scene_path}"))?;
    let mut model = JsonScene::new(file);

    let selected = type_filter.unwrap_or_else(|| model.element_types());
    tracing::info!(
        elements = model.len(),
        types = ?selected,
        "Loaded scene dump"
    );

    let selection = select_types(&model, &selected);
    let options = ExtractOptions {
        index_policy: config.index_policy,
    };
    let mut progress = ThrottledSink::new(
        TracingProgress,
        Throttle::new(Duration::from_secs(config.progress_interval_secs)),
    );

    let groups = extract_selection(&model, &(), &selection, &options, &mut progress)
        .context("geometry computation failed")?;

    let triangle_count: usize = groups.iter().map(|g| g.triangles.len()).sum();
    tracing::info!(
        groups = groups.len(),
        triangles = triangle_count,
        "Extraction complete"
    );

    let mut sink = JsonRenderSink::default();
    sink.submit(&groups);
    println!("{}", serde_json::to_string_pretty(&sink.groups)?);

    if let Some(path) = &config.filtered_out {
        for type_name in model.element_types() {
            if selected.contains(&type_name) {
                continue;
            }
            for id in model.elements_by_type(&type_name) {
                model.remove_element(&id);
            }
        }
        let filtered = serde_json::to_string_pretty(&model.to_file())?;
        std::fs::write(path, filtered)
            .with_context(|| format!("writing filtered scene {path}"))?;
        tracing::info!(remaining = model.len(), path = %path, "Wrote filtered scene");
    }

    Ok(())
}
