use crate::data::{Column, Selection};

use super::stats::{box_stats, group_mean_by_value, histogram};
use super::{Bar, Chart, ChartBody, Orientation, ScatterPoint, Section, section, song_label};

const DURATION_BINS: usize = 30;

pub(super) fn duration_analysis(selection: &Selection<'_>) -> Vec<Section> {
    vec![
        section(
            "Distribution",
            "Track Duration Distribution: how long the songs are.",
            selection,
            &[Column::TrackDurationMs],
            || duration_distribution(selection),
        ),
        section(
            "By Decade",
            "Duration by Decade: track durations compared across decades.",
            selection,
            &[Column::Decade, Column::TrackDurationMs],
            || duration_by_decade(selection),
        ),
    ]
}

pub(super) fn streaming_insights(selection: &Selection<'_>) -> Vec<Section> {
    vec![
        section(
            "Popularity vs Duration",
            "Popularity vs Duration: whether song length relates to popularity.",
            selection,
            &[Column::TrackDurationMs, Column::Popularity],
            || duration_vs_popularity(selection),
        ),
        section(
            "Time Signature",
            "Popularity by Time Signature: average popularity per time signature.",
            selection,
            &[Column::TimeSignature, Column::Popularity],
            || popularity_by_time_signature(selection),
        ),
    ]
}

fn duration_distribution(selection: &Selection<'_>) -> Chart {
    let bins = histogram(
        selection.iter().filter_map(|track| track.duration_ms),
        DURATION_BINS,
    );

    Chart::new("Distribution of Track Durations", ChartBody::Histogram { bins })
        .axes("Track Duration (ms)", "Songs")
}

fn duration_by_decade(selection: &Selection<'_>) -> Chart {
    let mut decades = selection.iter().map(|track| track.decade).collect::<Vec<_>>();
    decades.sort();
    decades.dedup();

    let boxes = decades
        .into_iter()
        .filter_map(|decade| {
            box_stats(
                decade.label(),
                selection
                    .iter()
                    .filter(|track| track.decade == decade)
                    .filter_map(|track| track.duration_ms),
            )
        })
        .collect();

    Chart::new("Track Duration by Decade", ChartBody::Boxes { boxes })
        .axes("Decade", "Track Duration (ms)")
}

fn duration_vs_popularity(selection: &Selection<'_>) -> Chart {
    let points = selection
        .iter()
        .filter_map(|track| {
            Some(ScatterPoint {
                x: track.duration_ms?,
                y: track.popularity,
                label: song_label(track),
            })
        })
        .collect();

    Chart::new("Popularity vs Track Duration", ChartBody::Scatter { points })
        .axes("Track Duration (ms)", "Popularity")
}

fn popularity_by_time_signature(selection: &Selection<'_>) -> Chart {
    let groups = group_mean_by_value(
        selection
            .iter()
            .filter_map(|track| Some((track.time_signature?, track.popularity))),
    );

    let bars = groups
        .into_iter()
        .map(|(signature, mean, count)| {
            Bar::new(signature.to_string(), mean).with_detail(format!("{count} songs"))
        })
        .collect();

    Chart::new(
        "Average Popularity by Time Signature",
        ChartBody::Bars {
            orientation: Orientation::Vertical,
            bars,
        },
    )
    .axes("Time Signature", "Popularity")
}
