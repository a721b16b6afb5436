use crate::data::{Column, Selection};

use super::stats::{group_mean, top_n_by};
use super::{
    Bar, Chart, ChartBody, Orientation, ScatterPoint, Section, Series, section, song_label,
};

pub(super) const TOP_SONGS: usize = 10;
const TOP_DECADES: usize = 10;

pub(super) fn popularity_trends(selection: &Selection<'_>) -> Vec<Section> {
    vec![
        section(
            "Average Popularity",
            "Average Popularity by Decade: how the average popularity of songs has changed over different decades.",
            selection,
            &[Column::Decade, Column::Popularity],
            || decade_popularity(selection),
        ),
        section(
            "Individual Songs",
            "Top 10 Individual Songs: popularity of the most popular songs over time.",
            selection,
            &[Column::Year, Column::Popularity],
            || top_songs_by_year(selection),
        ),
        section(
            "Top 10 Songs",
            "Top 10 Most Popular Songs: the songs with the highest popularity scores.",
            selection,
            &[Column::TrackName, Column::Popularity],
            || top_songs(selection, "Top 10 Most Popular Songs"),
        ),
    ]
}

fn decade_popularity(selection: &Selection<'_>) -> Chart {
    let mut decades = group_mean(selection.iter().map(|track| (track.decade, track.popularity)));
    decades.sort_by(|a, b| b.1.total_cmp(&a.1));
    decades.truncate(TOP_DECADES);
    decades.sort_by_key(|(decade, _, _)| *decade);

    let categories = decades
        .iter()
        .map(|(decade, _, _)| decade.label())
        .collect::<Vec<_>>();
    let values = decades.iter().map(|(_, mean, _)| *mean).collect();

    Chart::new(
        "Top 10 Decades by Average Popularity",
        ChartBody::Line {
            categories,
            series: vec![Series::new("Popularity", values)],
        },
    )
    .axes("Decade", "Average Popularity Score")
}

fn top_songs_by_year(selection: &Selection<'_>) -> Chart {
    let points = top_n_by(selection.iter(), TOP_SONGS, |track| Some(track.popularity))
        .into_iter()
        .filter_map(|track| {
            Some(ScatterPoint {
                x: f64::from(track.release_year?),
                y: track.popularity,
                label: format!("{} ({})", song_label(track), track.artist_field()),
            })
        })
        .collect();

    Chart::new("Top 10 Individual Songs by Popularity", ChartBody::Scatter { points })
        .axes("Release Year", "Popularity Score")
}

pub(super) fn top_songs(selection: &Selection<'_>, title: &str) -> Chart {
    let bars = top_n_by(selection.iter(), TOP_SONGS, |track| Some(track.popularity))
        .into_iter()
        .map(|track| {
            let bar = Bar::new(song_label(track), track.popularity);
            match track.artist_names.as_deref() {
                Some(artists) => bar.with_detail(artists),
                None => bar,
            }
        })
        .collect();

    Chart::new(
        title,
        ChartBody::Bars {
            orientation: Orientation::Horizontal,
            bars,
        },
    )
    .axes("Popularity Score", "Song Title")
}
