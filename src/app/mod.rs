use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context, Vec2};
use tracing::{info, warn};

use music_analisa::analysis::{AudioFeature, Panel, Section};
use music_analisa::data::{Dataset, Decade, load_dataset};

mod chart;
mod graph;
mod render_utils;
mod ui;

type LoadResult = Result<Dataset, String>;

pub struct MusicAnalyzeApp {
    data_path: PathBuf,
    layout: LayoutSettings,
    state: AppState,
    reload_rx: Option<Receiver<LoadResult>>,
}

enum AppState {
    Loading { rx: Receiver<LoadResult> },
    Ready(Box<ViewModel>),
    Error(String),
}

#[derive(Clone, Copy, Debug)]
pub struct LayoutSettings {
    pub seed: u64,
    pub random_seed: bool,
    pub iterations: usize,
}

struct ViewModel {
    dataset: Dataset,
    available_decades: Vec<Decade>,
    decades: BTreeSet<Decade>,
    panel: Panel,
    feature: AudioFeature,
    layout_seed: u64,
    layout_iterations: usize,
    tabs: HashMap<Panel, usize>,
    sections: Vec<Section>,
    sections_dirty: bool,
    network: NetworkView,
}

struct NetworkView {
    pan: Vec2,
    zoom: f32,
    search: String,
    selected: Option<String>,
    search_cache: Option<SearchMatchCache>,
}

impl Default for NetworkView {
    fn default() -> Self {
        Self {
            pan: Vec2::ZERO,
            zoom: 1.0,
            search: String::new(),
            selected: None,
            search_cache: None,
        }
    }
}

struct SearchMatchCache {
    query: String,
    matches: HashSet<usize>,
}

impl MusicAnalyzeApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, data_path: PathBuf, layout: LayoutSettings) -> Self {
        let state = Self::start_load(data_path.clone());
        Self {
            data_path,
            layout,
            state,
            reload_rx: None,
        }
    }

    fn spawn_load(data_path: PathBuf) -> Receiver<LoadResult> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = load_dataset(&data_path).map_err(|error| format!("{error:#}"));
            if let Err(error) = &result {
                warn!(%error, "dataset load failed");
            }
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(data_path: PathBuf) -> AppState {
        info!(path = %data_path.display(), "loading dataset");
        AppState::Loading {
            rx: Self::spawn_load(data_path),
        }
    }

    fn ready(&self, dataset: Dataset) -> AppState {
        AppState::Ready(Box::new(ViewModel::new(dataset, self.layout)))
    }
}

impl eframe::App for MusicAnalyzeApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                match rx.try_recv() {
                    Ok(Ok(dataset)) => transition = Some(Ok(dataset)),
                    Ok(Err(error)) => transition = Some(Err(error)),
                    Err(TryRecvError::Empty) => ctx.request_repaint(),
                    Err(TryRecvError::Disconnected) => {
                        transition = Some(Err("Background load worker disconnected".to_owned()));
                    }
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading song dataset...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                let mut retry = false;
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load song dataset");
                    ui.add_space(6.0);
                    ui.label(format!("path: {}", self.data_path.display()));
                    ui.colored_label(ui.visuals().error_fg_color, error.as_str());
                    ui.add_space(10.0);
                    retry = ui.button("Retry").clicked();
                });
                if retry {
                    self.state = Self::start_load(self.data_path.clone());
                    return;
                }
            }
            AppState::Ready(model) => {
                let mut reload_requested = false;
                let is_reloading = self.reload_rx.is_some();
                model.show(ctx, &self.data_path, &mut reload_requested, is_reloading);

                if reload_requested && self.reload_rx.is_none() {
                    info!(path = %self.data_path.display(), "reloading dataset");
                    self.reload_rx = Some(Self::spawn_load(self.data_path.clone()));
                }

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        Ok(result) => transition = Some(result),
                        Err(TryRecvError::Empty) => {
                            self.reload_rx = Some(rx);
                            ctx.request_repaint();
                        }
                        Err(TryRecvError::Disconnected) => {
                            transition =
                                Some(Err("Background load worker disconnected".to_owned()));
                        }
                    }
                }
            }
        }

        if let Some(result) = transition {
            self.reload_rx = None;
            self.state = match result {
                Ok(dataset) => self.ready(dataset),
                Err(error) => AppState::Error(error),
            };
        }
    }
}
