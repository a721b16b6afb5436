use eframe::egui::{self, Pos2, Rect, Ui};

use super::super::NetworkView;
use super::super::render_utils::{circle_visible, fit_scale, screen_to_world};

impl NetworkView {
    pub(in crate::app) fn handle_zoom(&mut self, ui: &Ui, rect: Rect, response: &egui::Response) {
        if !response.hovered() {
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() <= f32::EPSILON {
            return;
        }

        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .unwrap_or_else(|| rect.center());
        let fit = fit_scale(rect);
        let world_before = screen_to_world(rect, self.pan, fit * self.zoom, pointer);

        let zoom_factor = (1.0 + (scroll * 0.0018)).clamp(0.85, 1.15);
        self.zoom = (self.zoom * zoom_factor).clamp(0.2, 12.0);
        self.pan = pointer - rect.center() - (world_before * fit * self.zoom);
    }

    pub(in crate::app) fn handle_pan(&mut self, response: &egui::Response) {
        if response.dragged() {
            self.pan += response.drag_delta();
        }
    }

    pub(in crate::app) fn hovered_index(
        ui: &Ui,
        rect: Rect,
        screen_positions: &[Pos2],
        screen_radii: &[f32],
    ) -> Option<usize> {
        let pointer = ui.input(|input| input.pointer.hover_pos())?;
        if !rect.contains(pointer) {
            return None;
        }

        screen_positions
            .iter()
            .zip(screen_radii)
            .enumerate()
            .filter(|(_, (position, radius))| circle_visible(rect, **position, **radius))
            .filter_map(|(index, (position, radius))| {
                let distance = position.distance(pointer);
                (distance <= *radius).then_some((index, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(index, _)| index)
    }
}
