use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use eframe::egui::{self, Align, Context, Layout, RichText, Ui};
use tracing::debug;

use music_analisa::analysis::{
    AudioFeature, ChartBody, Panel, PanelOptions, SectionContent, build_panel,
};
use music_analisa::collab::LayoutConfig;
use music_analisa::data::Dataset;

use super::super::chart::draw_chart;
use super::super::{LayoutSettings, NetworkView, ViewModel};

impl ViewModel {
    pub(in crate::app) fn new(dataset: Dataset, layout: LayoutSettings) -> Self {
        let layout_seed = if layout.random_seed {
            music_analisa::collab::time_seed()
        } else {
            layout.seed
        };

        Self {
            available_decades: dataset.decades(),
            dataset,
            decades: BTreeSet::new(),
            panel: Panel::PopularityTrends,
            feature: AudioFeature::default(),
            layout_seed,
            layout_iterations: layout.iterations,
            tabs: HashMap::new(),
            sections: Vec::new(),
            sections_dirty: true,
            network: NetworkView::default(),
        }
    }

    pub(in crate::app) fn layout_config(&self) -> LayoutConfig {
        LayoutConfig::default()
            .with_seed(self.layout_seed)
            .with_iterations(self.layout_iterations)
    }

    fn recompute_sections(&mut self) {
        let selection = self.dataset.select(&self.decades);
        let options = PanelOptions {
            feature: self.feature,
            layout: self.layout_config(),
        };

        self.sections = build_panel(self.panel, &selection, &options);
        self.sections_dirty = false;
        self.network.reset();
        debug!(
            panel = %self.panel,
            tracks = selection.len(),
            sections = self.sections.len(),
            "recomputed panel"
        );
    }

    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        data_path: &Path,
        reload_requested: &mut bool,
        is_loading: bool,
    ) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("music-analisá");
                    ui.separator();
                    ui.label(format!("data: {}", data_path.display()));
                    ui.label(format!("songs: {}", self.dataset.len()))
                        .on_hover_text(format!(
                            "columns: {}",
                            self.dataset
                                .columns()
                                .iter()
                                .map(|column| column.header())
                                .collect::<Vec<_>>()
                                .join(", ")
                        ));
                    if self.dataset.skipped_rows > 0 {
                        ui.label(format!("skipped rows: {}", self.dataset.skipped_rows));
                    }
                    let reload_button =
                        ui.add_enabled(!is_loading, egui::Button::new("Reload CSV"));
                    if reload_button.clicked() {
                        *reload_requested = true;
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if is_loading {
                            ui.spinner();
                        }
                        ui.label(self.filter_summary());
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(280.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| self.draw_controls(ui));
            });

        if self.sections_dirty {
            self.recompute_sections();
        }

        egui::CentralPanel::default().show(ctx, |ui| self.draw_panel(ui));
    }

    fn filter_summary(&self) -> String {
        if self.decades.is_empty() {
            return "all decades".to_owned();
        }

        self.decades
            .iter()
            .map(|decade| decade.label())
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn draw_panel(&mut self, ui: &mut Ui) {
        ui.heading(self.panel.title());
        ui.label(RichText::new(self.panel.summary()).weak());
        ui.add_space(4.0);

        if self.sections.is_empty() {
            return;
        }

        let tab = self.tabs.entry(self.panel).or_insert(0);
        if *tab >= self.sections.len() {
            *tab = 0;
        }
        ui.horizontal(|ui| {
            for (index, section) in self.sections.iter().enumerate() {
                ui.selectable_value(tab, index, section.tab);
            }
        });
        ui.separator();

        let section = &self.sections[*tab];
        ui.label(section.caption.as_str());
        ui.add_space(6.0);

        match &section.content {
            SectionContent::Missing(missing) => {
                ui.colored_label(ui.visuals().error_fg_color, missing.to_string());
            }
            SectionContent::NoData(message) => {
                ui.colored_label(ui.visuals().warn_fg_color, message.as_str());
            }
            SectionContent::Chart(chart) => match &chart.body {
                ChartBody::Network { bundle } => {
                    ui.label(RichText::new(chart.title.as_str()).strong());
                    self.network.show(ui, bundle);
                }
                _ => draw_chart(ui, chart),
            },
        }
    }
}
