mod app;

use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use music_analisa::analysis::{AudioFeature, Panel, PanelOptions, panel_report};
use music_analisa::collab::{DEFAULT_LAYOUT_ITERATIONS, DEFAULT_LAYOUT_SEED, LayoutConfig};
use music_analisa::data::{Decade, load_dataset};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    #[arg(long, default_value = "data/music_data.csv", help = "Song metadata CSV to load.")]
    data: PathBuf,

    #[arg(long, default_value_t = DEFAULT_LAYOUT_SEED, help = "Seed for the collaboration network layout.")]
    seed: u64,

    #[arg(long, help = "Use a time-based layout seed instead of `--seed`.")]
    random_seed: bool,

    #[arg(long, default_value_t = DEFAULT_LAYOUT_ITERATIONS, help = "Layout iteration budget (capped at 1000).")]
    iterations: usize,

    #[arg(long, value_enum, value_name = "PANEL", help = "Print one panel as JSON and exit instead of opening the dashboard.")]
    export: Option<Panel>,

    #[arg(long = "decade", value_name = "DECADE", help = "Decade filter for `--export`, e.g. `1990s` or `unknown`. Repeatable.")]
    decades: Vec<Decade>,

    #[arg(long, value_enum, default_value_t = AudioFeature::Danceability, help = "Audio feature shown by the audio features panel.")]
    feature: AudioFeature,
}

impl Args {
    fn layout_config(&self) -> LayoutConfig {
        let config = LayoutConfig::default().with_iterations(self.iterations);
        if self.random_seed {
            config.with_time_seed()
        } else {
            config.with_seed(self.seed)
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match args.export {
        Some(panel) => export_panel(&args, panel),
        None => run_dashboard(args),
    }
}

fn export_panel(args: &Args, panel: Panel) -> Result<()> {
    let dataset = load_dataset(&args.data)?;
    let decades = args.decades.iter().copied().collect::<BTreeSet<_>>();
    let selection = dataset.select(&decades);
    let options = PanelOptions {
        feature: args.feature,
        layout: args.layout_config(),
    };

    info!(%panel, tracks = selection.len(), seed = options.layout.seed, "exporting panel");
    let report = panel_report(panel, &selection, &options);
    let json = serde_json::to_string_pretty(&report).context("failed to serialize panel")?;
    println!("{json}");
    Ok(())
}

fn run_dashboard(args: Args) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };
    let layout = app::LayoutSettings {
        seed: args.seed,
        random_seed: args.random_seed,
        iterations: args.iterations,
    };
    let data_path = args.data;

    eframe::run_native(
        "music-analisá",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::MusicAnalyzeApp::new(
                cc,
                data_path.clone(),
                layout,
            )))
        }),
    )
    .map_err(|error| anyhow!("failed to start the dashboard: {error}"))
}
