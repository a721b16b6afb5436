//! Chart panels computed from a decade-filtered selection of tracks.

mod catalog;
mod chart;
mod engagement;
mod features;
mod genres;
mod network;
mod popularity;
pub mod stats;

use std::fmt;

use clap::ValueEnum;
use serde::Serialize;

use crate::collab::LayoutConfig;
use crate::data::{Column, MissingColumns, Selection, TrackRecord};

pub use chart::{
    Bar, BoxStats, Chart, ChartBody, HistogramBin, Orientation, ScatterPoint, Series,
};

const NO_DATA_MESSAGE: &str = "No data for the current filters.";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum, Serialize)]
pub enum Panel {
    PopularityTrends,
    AudioFeatures,
    GenreArtist,
    ExplicitContent,
    AlbumLabel,
    TempoMood,
    TopArtistsSongs,
    ReleaseTrends,
    TrackDuration,
    Streaming,
    FeatureComparisons,
    Network,
}

impl Panel {
    pub const ALL: [Panel; 12] = [
        Panel::PopularityTrends,
        Panel::AudioFeatures,
        Panel::GenreArtist,
        Panel::ExplicitContent,
        Panel::AlbumLabel,
        Panel::TempoMood,
        Panel::TopArtistsSongs,
        Panel::ReleaseTrends,
        Panel::TrackDuration,
        Panel::Streaming,
        Panel::FeatureComparisons,
        Panel::Network,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Self::PopularityTrends => "Popularity Trends Over Time",
            Self::AudioFeatures => "Audio Features Analysis",
            Self::GenreArtist => "Genre & Artist Analysis",
            Self::ExplicitContent => "Explicit Content Trends",
            Self::AlbumLabel => "Album & Label Insights",
            Self::TempoMood => "Tempo & Mood Analysis",
            Self::TopArtistsSongs => "Top Artists and Songs",
            Self::ReleaseTrends => "Album Release Trends",
            Self::TrackDuration => "Track Duration Analysis",
            Self::Streaming => "Streaming and Engagement Insights",
            Self::FeatureComparisons => "Feature Comparisons Across Decades",
            Self::Network => "Network Analysis",
        }
    }

    pub fn summary(self) -> &'static str {
        match self {
            Self::PopularityTrends => "Tracks popularity changes over time.",
            Self::AudioFeatures => "Shows feature distributions.",
            Self::GenreArtist => "Highlights top genres.",
            Self::ExplicitContent => "Compares explicit songs.",
            Self::AlbumLabel => "Displays top labels.",
            Self::TempoMood => "Tracks tempo trends.",
            Self::TopArtistsSongs => "Lists top artists and songs.",
            Self::ReleaseTrends => "Shows release patterns.",
            Self::TrackDuration => "Displays track durations.",
            Self::Streaming => "Explores engagement trends.",
            Self::FeatureComparisons => "Compares features across decades.",
            Self::Network => "Visualizes artist connections.",
        }
    }
}

impl fmt::Display for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, ValueEnum, Serialize)]
pub enum AudioFeature {
    #[default]
    Danceability,
    Energy,
    Tempo,
    Loudness,
}

impl AudioFeature {
    pub const ALL: [AudioFeature; 4] = [
        AudioFeature::Danceability,
        AudioFeature::Energy,
        AudioFeature::Tempo,
        AudioFeature::Loudness,
    ];

    pub fn column(self) -> Column {
        match self {
            Self::Danceability => Column::Danceability,
            Self::Energy => Column::Energy,
            Self::Tempo => Column::Tempo,
            Self::Loudness => Column::Loudness,
        }
    }

    pub fn label(self) -> &'static str {
        self.column().header()
    }

    pub fn value(self, track: &TrackRecord) -> Option<f64> {
        track.numeric(self.column())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PanelOptions {
    pub feature: AudioFeature,
    pub layout: LayoutConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum SectionContent {
    Chart(Chart),
    Missing(MissingColumns),
    NoData(String),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Section {
    pub tab: &'static str,
    pub caption: String,
    pub content: SectionContent,
}

impl Section {
    pub fn chart(&self) -> Option<&Chart> {
        match &self.content {
            SectionContent::Chart(chart) => Some(chart),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PanelReport {
    pub panel: &'static str,
    pub summary: &'static str,
    pub tracks: usize,
    pub sections: Vec<Section>,
}

pub fn build_panel(panel: Panel, selection: &Selection<'_>, options: &PanelOptions) -> Vec<Section> {
    match panel {
        Panel::PopularityTrends => popularity::popularity_trends(selection),
        Panel::AudioFeatures => features::audio_features(selection, options.feature),
        Panel::GenreArtist => genres::genre_analysis(selection),
        Panel::ExplicitContent => catalog::explicit_trends(selection),
        Panel::AlbumLabel => catalog::album_insights(selection),
        Panel::TempoMood => features::tempo_mood(selection),
        Panel::TopArtistsSongs => genres::top_artists_songs(selection),
        Panel::ReleaseTrends => catalog::release_trends(selection),
        Panel::TrackDuration => engagement::duration_analysis(selection),
        Panel::Streaming => engagement::streaming_insights(selection),
        Panel::FeatureComparisons => features::feature_comparisons(selection),
        Panel::Network => network::network_analysis(selection, &options.layout),
    }
}

pub fn panel_report(panel: Panel, selection: &Selection<'_>, options: &PanelOptions) -> PanelReport {
    PanelReport {
        panel: panel.title(),
        summary: panel.summary(),
        tracks: selection.len(),
        sections: build_panel(panel, selection, options),
    }
}

fn guarded(
    tab: &'static str,
    caption: impl Into<String>,
    selection: &Selection<'_>,
    required: &[Column],
    empty_message: &str,
    build: impl FnOnce() -> Chart,
) -> Section {
    let content = match selection.require(required) {
        Err(missing) => SectionContent::Missing(missing),
        Ok(()) => {
            let chart = build();
            if chart.is_empty() {
                SectionContent::NoData(empty_message.to_owned())
            } else {
                SectionContent::Chart(chart)
            }
        }
    };

    Section {
        tab,
        caption: caption.into(),
        content,
    }
}

fn section(
    tab: &'static str,
    caption: impl Into<String>,
    selection: &Selection<'_>,
    required: &[Column],
    build: impl FnOnce() -> Chart,
) -> Section {
    guarded(tab, caption, selection, required, NO_DATA_MESSAGE, build)
}

fn song_label(track: &TrackRecord) -> String {
    if track.track_name.is_empty() {
        "(untitled)".to_owned()
    } else {
        track.track_name.clone()
    }
}

#[cfg(test)]
mod tests {
    use crate::data::{ColumnSet, Dataset};

    use super::*;

    #[test]
    fn every_panel_degrades_per_section_on_a_bare_dataset() {
        let dataset = Dataset {
            columns: ColumnSet::from_headers(["Track Name"]),
            tracks: vec![TrackRecord {
                track_name: "Lonely".to_owned(),
                ..TrackRecord::default()
            }],
            ..Dataset::default()
        };
        let selection = dataset.select_all();

        for panel in Panel::ALL {
            let sections = build_panel(panel, &selection, &PanelOptions::default());
            assert!(!sections.is_empty(), "{panel} has no sections");
            for section in sections {
                assert!(
                    matches!(section.content, SectionContent::Missing(_)),
                    "{panel} / {} should report a missing column",
                    section.tab
                );
            }
        }
    }

    #[test]
    fn section_content_serializes_with_status_tag() {
        let content = SectionContent::NoData("nothing".to_owned());
        let json = serde_json::to_value(&content).unwrap();
        assert_eq!(json["status"], "no_data");
        assert_eq!(json["data"], "nothing");
    }
}
