use std::collections::HashSet;

use eframe::egui::{self, Align2, Color32, FontId, Sense, Stroke, Ui, Vec2, vec2};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use music_analisa::collab::RenderBundle;
use music_analisa::util::short_label;

use super::super::render_utils::{
    blend_color, circle_visible, degree_color, dim_color, draw_background, fit_scale,
    node_radius, world_to_screen,
};
use super::super::{NetworkView, SearchMatchCache};

const LABEL_CHARS: usize = 28;

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_lowercase(), &query.to_lowercase()))
}

fn neighborhood(bundle: &RenderBundle, selected: usize) -> HashSet<usize> {
    let mut related = HashSet::from([selected]);
    for edge in &bundle.edges {
        if edge.source == selected {
            related.insert(edge.target);
        } else if edge.target == selected {
            related.insert(edge.source);
        }
    }
    related
}

impl NetworkView {
    pub(in crate::app) fn reset(&mut self) {
        *self = Self {
            search: std::mem::take(&mut self.search),
            ..Self::default()
        };
    }

    pub(in crate::app) fn draw_search(&mut self, ui: &mut Ui) {
        ui.label("Search artists")
            .on_hover_text("Fuzzy-highlight matching artists in the network.");
        ui.text_edit_singleline(&mut self.search);
        if let Some(selected) = self.selected.as_deref().map(|name| short_label(name, LABEL_CHARS)) {
            let mut clear = false;
            ui.horizontal(|ui| {
                ui.label(format!("selected: {selected}"));
                clear = ui.small_button("Clear").clicked();
            });
            if clear {
                self.selected = None;
            }
        }
        if ui.button("Fit view").clicked() {
            self.pan = Vec2::ZERO;
            self.zoom = 1.0;
        }
    }

    fn search_matches(&mut self, bundle: &RenderBundle) -> Option<&HashSet<usize>> {
        let query = self.search.trim();
        if query.is_empty() {
            return None;
        }

        let stale = self
            .search_cache
            .as_ref()
            .is_none_or(|cached| cached.query != query);
        if stale {
            let matcher = SkimMatcherV2::default();
            let matches = bundle
                .nodes
                .iter()
                .enumerate()
                .filter(|(_, node)| fuzzy_match_score(&matcher, &node.name, query).is_some())
                .map(|(index, _)| index)
                .collect();
            self.search_cache = Some(SearchMatchCache {
                query: query.to_owned(),
                matches,
            });
        }

        self.search_cache.as_ref().map(|cached| &cached.matches)
    }

    pub(in crate::app) fn show(&mut self, ui: &mut Ui, bundle: &RenderBundle) {
        ui.label(format!(
            "{} artists, {} collaborations. Scroll to zoom, drag to pan, click an artist to highlight collaborators.",
            bundle.nodes.len(),
            bundle.edges.len()
        ));

        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        self.handle_zoom(ui, rect, &response);
        self.handle_pan(&response);

        let zoom = self.zoom;
        let scale = fit_scale(rect) * zoom;
        let pan = self.pan;
        draw_background(&painter, rect, pan, zoom);

        let screen_positions = bundle
            .nodes
            .iter()
            .map(|node| world_to_screen(rect, pan, scale, vec2(node.x, node.y)))
            .collect::<Vec<_>>();
        let screen_radii = bundle
            .nodes
            .iter()
            .map(|node| node_radius(node.degree, zoom))
            .collect::<Vec<_>>();
        let max_degree = bundle.nodes.iter().map(|node| node.degree).max().unwrap_or(1);

        let hovered = Self::hovered_index(ui, rect, &screen_positions, &screen_radii);
        if hovered.is_some() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        }
        if response.clicked_by(egui::PointerButton::Primary) {
            self.selected = hovered.map(|index| bundle.nodes[index].name.clone());
        }

        let selected_index = self.selected.as_deref().and_then(|name| {
            bundle
                .nodes
                .binary_search_by(|node| node.name.as_str().cmp(name))
                .ok()
        });
        let related = selected_index.map(|index| neighborhood(bundle, index));
        let matches = self.search_matches(bundle).cloned();
        let search_active = matches.as_ref().is_some_and(|matches| !matches.is_empty());

        let edge_width = (1.0 * zoom.sqrt()).clamp(0.5, 3.0);
        for edge in &bundle.edges {
            let (Some(&start), Some(&end)) = (
                screen_positions.get(edge.source),
                screen_positions.get(edge.target),
            ) else {
                continue;
            };

            let is_related_edge = selected_index
                .is_some_and(|index| edge.source == index || edge.target == index);
            let stroke = if is_related_edge {
                Stroke::new(edge_width * 2.2, Color32::from_rgb(241, 146, 94))
            } else if related.is_some() {
                Stroke::new(edge_width, Color32::from_rgba_unmultiplied(80, 90, 104, 110))
            } else {
                Stroke::new(edge_width, Color32::from_rgba_unmultiplied(136, 136, 136, 170))
            };
            painter.line_segment([start, end], stroke);
        }

        for (index, node) in bundle.nodes.iter().enumerate() {
            let position = screen_positions[index];
            let radius = screen_radii[index];
            if !circle_visible(rect, position, radius) {
                continue;
            }

            let is_selected = selected_index == Some(index);
            let is_hovered = hovered == Some(index);
            let is_related = related.as_ref().is_some_and(|set| set.contains(&index));
            let is_match = matches.as_ref().is_some_and(|set| set.contains(&index));

            let base_color = degree_color(node.degree, max_degree);
            let color = if is_selected {
                Color32::from_rgb(245, 206, 93)
            } else if is_hovered {
                Color32::from_rgb(255, 164, 101)
            } else if is_related {
                blend_color(base_color, Color32::from_rgb(246, 137, 92), 0.60)
            } else if is_match {
                blend_color(base_color, Color32::from_rgb(103, 196, 255), 0.68)
            } else if related.is_some() {
                dim_color(base_color, 0.52)
            } else if search_active {
                dim_color(base_color, 0.38)
            } else {
                base_color
            };

            painter.circle_filled(position, radius, color);
            painter.circle_stroke(
                position,
                radius,
                Stroke::new(
                    if is_selected || is_match { 1.8 } else { 1.0 },
                    Color32::from_rgba_unmultiplied(15, 15, 15, 190),
                ),
            );

            let should_draw_label =
                is_selected || is_hovered || is_related || is_match || zoom > 1.6 || radius > 14.0;
            if should_draw_label {
                painter.text(
                    position + vec2(radius + 5.0, 0.0),
                    Align2::LEFT_CENTER,
                    short_label(&node.name, LABEL_CHARS),
                    FontId::proportional(12.0),
                    Color32::from_gray(238),
                );
            }
        }

        if let Some(index) = hovered {
            let node = &bundle.nodes[index];
            painter.text(
                rect.left_top() + vec2(10.0, 10.0),
                Align2::LEFT_TOP,
                format!("{}  |  collaborators {}", node.name, node.degree),
                FontId::proportional(13.0),
                Color32::from_gray(240),
            );
        }

        if response.dragged() {
            ui.ctx().request_repaint();
        }
    }
}

#[cfg(test)]
mod tests {
    use music_analisa::collab::{EdgeSegment, NodePoint};

    use super::*;

    fn node(name: &str, degree: usize) -> NodePoint {
        NodePoint {
            name: name.to_owned(),
            x: 0.0,
            y: 0.0,
            degree,
        }
    }

    fn edge(source: usize, target: usize) -> EdgeSegment {
        EdgeSegment {
            source,
            target,
            x0: 0.0,
            y0: 0.0,
            x1: 0.0,
            y1: 0.0,
        }
    }

    #[test]
    fn neighborhood_contains_direct_collaborators_only() {
        let bundle = RenderBundle {
            nodes: vec![node("A", 1), node("B", 2), node("C", 1)],
            edges: vec![edge(0, 1), edge(1, 2)],
        };

        assert_eq!(neighborhood(&bundle, 0), HashSet::from([0, 1]));
        assert_eq!(neighborhood(&bundle, 1), HashSet::from([0, 1, 2]));
    }

    #[test]
    fn search_is_case_insensitive_and_cached() {
        let bundle = RenderBundle {
            nodes: vec![node("Daft Punk", 1), node("Pharrell Williams", 1)],
            edges: vec![edge(0, 1)],
        };
        let mut view = NetworkView {
            search: "PHARRELL".to_owned(),
            ..NetworkView::default()
        };

        let matches = view.search_matches(&bundle).cloned();
        assert_eq!(matches, Some(HashSet::from([1])));
        assert_eq!(
            view.search_cache.as_ref().map(|cached| cached.query.as_str()),
            Some("PHARRELL")
        );
    }

    #[test]
    fn reset_keeps_the_search_query() {
        let mut view = NetworkView {
            zoom: 3.0,
            search: "daft".to_owned(),
            selected: Some("Daft Punk".to_owned()),
            ..NetworkView::default()
        };
        view.reset();

        assert_eq!(view.search, "daft");
        assert!(view.selected.is_none());
        assert_eq!(view.zoom, 1.0);
    }
}
