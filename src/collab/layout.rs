use std::f32::consts::TAU;

use chrono::Utc;
use eframe::egui::{Vec2, vec2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::graph::CollabGraph;

pub const DEFAULT_LAYOUT_SEED: u64 = 0x5EED_F00D;
pub const DEFAULT_LAYOUT_ITERATIONS: usize = 50;
pub const MAX_LAYOUT_ITERATIONS: usize = 1000;
pub const DEFAULT_LAYOUT_EPSILON: f32 = 1e-4;

const MIN_DISTANCE: f32 = 0.01;
const INITIAL_TEMPERATURE_RATIO: f32 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutConfig {
    pub seed: u64,
    pub iterations: usize,
    pub epsilon: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_LAYOUT_SEED,
            iterations: DEFAULT_LAYOUT_ITERATIONS,
            epsilon: DEFAULT_LAYOUT_EPSILON,
        }
    }
}

impl LayoutConfig {
    pub fn with_seed(self, seed: u64) -> Self {
        Self { seed, ..self }
    }

    pub fn with_time_seed(self) -> Self {
        self.with_seed(time_seed())
    }

    pub fn with_iterations(self, iterations: usize) -> Self {
        Self {
            iterations: iterations.min(MAX_LAYOUT_ITERATIONS),
            ..self
        }
    }
}

pub fn time_seed() -> u64 {
    let now = Utc::now();
    now.timestamp_nanos_opt()
        .map(|nanos| nanos as u64)
        .unwrap_or_else(|| now.timestamp() as u64)
}

/// Fruchterman-Reingold placement over a bounded number of iterations.
///
/// Returns one position per node, index-aligned with `graph.nodes`, centered on
/// the origin with the largest absolute coordinate scaled to 1.
pub fn force_layout(graph: &CollabGraph, config: &LayoutConfig) -> Vec<Vec2> {
    let n = graph.node_count();
    match n {
        0 => return Vec::new(),
        1 => return vec![Vec2::ZERO],
        2 => return vec![vec2(-1.0, 0.0), vec2(1.0, 0.0)],
        _ => {}
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut positions = (0..n)
        .map(|_| vec2(rng.random_range(-1.0..=1.0), rng.random_range(-1.0..=1.0)))
        .collect::<Vec<_>>();

    let k = (1.0 / n as f32).sqrt();
    let iterations = config.iterations.min(MAX_LAYOUT_ITERATIONS);
    let mut temperature = span(&positions).max(MIN_DISTANCE) * INITIAL_TEMPERATURE_RATIO;
    let cooling = temperature / (iterations as f32 + 1.0);
    let mut disp = vec![Vec2::ZERO; n];

    for iteration in 0..iterations {
        disp.fill(Vec2::ZERO);

        for i in 0..n {
            for j in (i + 1)..n {
                let delta = positions[i] - positions[j];
                let length = delta.length();
                let direction = if length > f32::EPSILON {
                    delta / length
                } else {
                    let angle = ((i as f32) * 0.618_034 + (j as f32) * 0.414_214) * TAU;
                    vec2(angle.cos(), angle.sin())
                };

                let force = (k * k) / length.max(MIN_DISTANCE);
                disp[i] += direction * force;
                disp[j] -= direction * force;
            }
        }

        for &(from, to) in &graph.edges {
            if from >= n || to >= n || from == to {
                continue;
            }

            let delta = positions[from] - positions[to];
            let distance = delta.length().max(MIN_DISTANCE);
            let direction = delta / distance;
            let force = (distance * distance) / k;

            disp[from] -= direction * force;
            disp[to] += direction * force;
        }

        let mut moved = 0.0;
        for (position, displacement) in positions.iter_mut().zip(&disp) {
            let length = displacement.length();
            if length > 0.0 {
                let step = *displacement / length * length.min(temperature);
                *position += step;
                moved += step.length();
            }
        }

        temperature = (temperature - cooling).max(0.0);
        if moved / (n as f32) < config.epsilon {
            debug!(iteration, nodes = n, "collaboration layout converged early");
            break;
        }
    }

    recenter_and_scale(&mut positions);
    positions
}

fn span(positions: &[Vec2]) -> f32 {
    let mut min = vec2(f32::INFINITY, f32::INFINITY);
    let mut max = vec2(f32::NEG_INFINITY, f32::NEG_INFINITY);
    for position in positions {
        min = min.min(*position);
        max = max.max(*position);
    }

    let extent = max - min;
    extent.x.max(extent.y)
}

fn recenter_and_scale(positions: &mut [Vec2]) {
    if positions.is_empty() {
        return;
    }

    let mut centroid = Vec2::ZERO;
    for position in positions.iter() {
        centroid += *position;
    }
    centroid /= positions.len() as f32;

    let mut extent = 0.0_f32;
    for position in positions.iter_mut() {
        *position -= centroid;
        extent = extent.max(position.x.abs()).max(position.y.abs());
    }

    if extent > f32::EPSILON {
        for position in positions.iter_mut() {
            *position /= extent;
        }
    }
}
