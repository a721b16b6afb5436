use eframe::egui::{self, Ui};

use music_analisa::analysis::{AudioFeature, Panel};
use music_analisa::collab::{DEFAULT_LAYOUT_SEED, MAX_LAYOUT_ITERATIONS, time_seed};

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        let mut changed = false;

        ui.heading("Panels");
        ui.separator();
        for panel in Panel::ALL {
            changed |= ui
                .selectable_value(&mut self.panel, panel, panel.title())
                .on_hover_text(panel.summary())
                .changed();
        }

        ui.add_space(8.0);
        ui.heading("Decades");
        ui.separator();
        if self.available_decades.is_empty() {
            ui.label("No release dates in this dataset.");
        } else {
            ui.horizontal(|ui| {
                if ui
                    .button("All")
                    .on_hover_text("Select every decade.")
                    .clicked()
                {
                    self.decades = self.available_decades.iter().copied().collect();
                    changed = true;
                }
                if ui
                    .button("None")
                    .on_hover_text("Clear the filter; an empty filter shows every song.")
                    .clicked()
                {
                    self.decades.clear();
                    changed = true;
                }
            });

            ui.horizontal_wrapped(|ui| {
                for decade in &self.available_decades {
                    let mut checked = self.decades.contains(decade);
                    if ui.checkbox(&mut checked, decade.label()).changed() {
                        if checked {
                            self.decades.insert(*decade);
                        } else {
                            self.decades.remove(decade);
                        }
                        changed = true;
                    }
                }
            });
        }

        if self.panel == Panel::AudioFeatures {
            ui.add_space(8.0);
            ui.heading("Feature");
            ui.separator();
            ui.horizontal_wrapped(|ui| {
                for feature in AudioFeature::ALL {
                    changed |= ui
                        .selectable_value(&mut self.feature, feature, feature.label())
                        .changed();
                }
            });
        }

        if self.panel == Panel::Network {
            ui.add_space(8.0);
            ui.heading("Layout");
            ui.separator();
            changed |= self.draw_layout_controls(ui);
            ui.add_space(6.0);
            self.network.draw_search(ui);
        }

        if changed {
            self.sections_dirty = true;
        }
    }

    fn draw_layout_controls(&mut self, ui: &mut Ui) -> bool {
        let mut changed = false;

        ui.horizontal(|ui| {
            ui.label("Seed");
            changed |= ui
                .add(egui::DragValue::new(&mut self.layout_seed).speed(1.0))
                .on_hover_text("Same seed and filters always produce the same layout.")
                .changed();
            if ui
                .button("Shuffle")
                .on_hover_text("Pick a fresh time-based seed.")
                .clicked()
            {
                self.layout_seed = time_seed();
                changed = true;
            }
            if ui
                .add_enabled(
                    self.layout_seed != DEFAULT_LAYOUT_SEED,
                    egui::Button::new("Reset"),
                )
                .clicked()
            {
                self.layout_seed = DEFAULT_LAYOUT_SEED;
                changed = true;
            }
        });

        changed |= ui
            .add(
                egui::Slider::new(&mut self.layout_iterations, 1..=MAX_LAYOUT_ITERATIONS)
                    .logarithmic(true)
                    .text("iterations"),
            )
            .on_hover_text("Upper bound on layout refinement steps.")
            .changed();

        changed
    }
}
