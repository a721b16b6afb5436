//! Artist collaboration network: field normalization, graph assembly,
//! force-directed layout and a renderer-neutral export.

mod export;
mod graph;
mod layout;
mod normalize;

pub use export::{EdgeSegment, NodePoint, RenderBundle, collaboration_bundle, export};
pub use graph::{CollabGraph, assemble, assemble_from_fields};
pub use layout::{
    DEFAULT_LAYOUT_EPSILON, DEFAULT_LAYOUT_ITERATIONS, DEFAULT_LAYOUT_SEED, LayoutConfig,
    MAX_LAYOUT_ITERATIONS, force_layout, time_seed,
};
pub use normalize::normalize_artists;
