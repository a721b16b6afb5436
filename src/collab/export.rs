use eframe::egui::Vec2;
use serde::Serialize;
use tracing::debug;

use crate::data::TrackRecord;

use super::graph::{CollabGraph, assemble};
use super::layout::{LayoutConfig, force_layout};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NodePoint {
    pub name: String,
    pub x: f32,
    pub y: f32,
    pub degree: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EdgeSegment {
    pub source: usize,
    pub target: usize,
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RenderBundle {
    pub nodes: Vec<NodePoint>,
    pub edges: Vec<EdgeSegment>,
}

impl RenderBundle {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

pub fn export(graph: &CollabGraph, positions: &[Vec2]) -> RenderBundle {
    if graph.is_empty() || positions.len() != graph.node_count() {
        return RenderBundle::default();
    }

    let nodes = graph
        .nodes
        .iter()
        .zip(positions)
        .enumerate()
        .map(|(index, (name, position))| NodePoint {
            name: name.clone(),
            x: position.x,
            y: position.y,
            degree: graph.degree(index),
        })
        .collect();

    let edges = graph
        .edges
        .iter()
        .filter_map(|&(source, target)| {
            let start = positions.get(source)?;
            let end = positions.get(target)?;
            Some(EdgeSegment {
                source,
                target,
                x0: start.x,
                y0: start.y,
                x1: end.x,
                y1: end.y,
            })
        })
        .collect();

    RenderBundle { nodes, edges }
}

pub fn collaboration_bundle<'a>(
    tracks: impl IntoIterator<Item = &'a TrackRecord>,
    config: &LayoutConfig,
) -> RenderBundle {
    let graph = assemble(tracks);
    if graph.is_empty() {
        debug!("no multi-artist tracks; collaboration graph is empty");
        return RenderBundle::default();
    }

    let positions = force_layout(&graph, config);
    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        seed = config.seed,
        "laid out collaboration graph"
    );
    export(&graph, &positions)
}
