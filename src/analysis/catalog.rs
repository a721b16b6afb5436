use std::collections::{BTreeMap, BTreeSet};

use crate::data::{Column, Decade, Selection};

use super::stats::{group_mean, value_counts};
use super::{Bar, Chart, ChartBody, Orientation, Section, Series, section};

const TOP_LABELS: usize = 10;
const TOP_ALBUMS: usize = 10;
const HEATMAP_ARTISTS: usize = 25;

pub(super) fn explicit_trends(selection: &Selection<'_>) -> Vec<Section> {
    vec![section(
        "Explicit vs Non-Explicit",
        "Explicit vs Non-Explicit Songs Over Time: number of explicit and non-explicit songs per decade.",
        selection,
        &[Column::Decade, Column::Explicit],
        || explicit_by_decade(selection),
    )]
}

pub(super) fn album_insights(selection: &Selection<'_>) -> Vec<Section> {
    vec![
        section(
            "Top Labels",
            "Top Record Labels: the labels with the most released songs.",
            selection,
            &[Column::Label],
            || top_labels(selection),
        ),
        section(
            "Album Popularity",
            "Album Popularity: albums ranked by average popularity, then by number of songs.",
            selection,
            &[Column::AlbumName, Column::Popularity],
            || album_popularity(selection),
        ),
    ]
}

pub(super) fn release_trends(selection: &Selection<'_>) -> Vec<Section> {
    vec![
        section(
            "Albums per Year",
            "Albums per Year: number of released tracks per year.",
            selection,
            &[Column::Year],
            || tracks_per_year(selection),
        ),
        section(
            "Artist-Year Heatmap",
            "Songs by Artists and Years: release counts of the 25 most frequent artist credits.",
            selection,
            &[Column::ArtistNames, Column::Year],
            || artist_year_heatmap(selection),
        ),
    ]
}

fn explicit_by_decade(selection: &Selection<'_>) -> Chart {
    let mut counts: BTreeMap<Decade, [f64; 2]> = BTreeMap::new();
    for track in selection.iter() {
        let Some(explicit) = track.explicit else {
            continue;
        };
        counts.entry(track.decade).or_default()[usize::from(explicit)] += 1.0;
    }

    let categories = counts.keys().map(|decade| decade.label()).collect();
    let clean = counts.values().map(|pair| pair[0]).collect();
    let explicit = counts.values().map(|pair| pair[1]).collect();

    Chart::new(
        "Explicit vs Non-Explicit Songs Over Time",
        ChartBody::Line {
            categories,
            series: vec![
                Series::new("Explicit", explicit),
                Series::new("Non-explicit", clean),
            ],
        },
    )
    .axes("Decade", "Number of Songs")
}

fn top_labels(selection: &Selection<'_>) -> Chart {
    let mut counts = value_counts(selection.iter().filter_map(|track| track.label.as_deref()));
    counts.truncate(TOP_LABELS);

    Chart::new(
        "Top Record Labels by Song Count",
        ChartBody::Bars {
            orientation: Orientation::Horizontal,
            bars: counts
                .into_iter()
                .map(|(label, count)| Bar::new(label, count as f64))
                .collect(),
        },
    )
    .axes("Number of Songs", "Record Label")
}

fn album_popularity(selection: &Selection<'_>) -> Chart {
    let mut albums = group_mean(selection.iter().filter_map(|track| {
        Some((track.album_name.as_deref()?, track.popularity))
    }));
    albums.sort_by(|a, b| b.1.total_cmp(&a.1).then(b.2.cmp(&a.2)));
    albums.truncate(TOP_ALBUMS);

    let bars = albums
        .into_iter()
        .map(|(album, mean, count)| Bar::new(album, mean).with_detail(format!("{count} songs")))
        .collect();

    Chart::new(
        "Top 10 Albums by Popularity",
        ChartBody::Bars {
            orientation: Orientation::Horizontal,
            bars,
        },
    )
    .axes("Average Popularity Score", "Album")
}

fn tracks_per_year(selection: &Selection<'_>) -> Chart {
    let mut years: BTreeMap<i32, usize> = BTreeMap::new();
    for year in selection.iter().filter_map(|track| track.release_year) {
        *years.entry(year).or_default() += 1;
    }

    Chart::new(
        "Number of Albums Released per Year",
        ChartBody::Line {
            categories: years.keys().map(i32::to_string).collect(),
            series: vec![Series::new(
                "Tracks",
                years.values().map(|count| *count as f64).collect(),
            )],
        },
    )
    .axes("Year", "Count")
}

fn artist_year_heatmap(selection: &Selection<'_>) -> Chart {
    let dated = selection
        .iter()
        .filter_map(|track| Some((track.artist_names.as_deref()?, track.release_year?)))
        .collect::<Vec<_>>();

    let mut artists = value_counts(dated.iter().map(|(artist, _)| *artist));
    artists.truncate(HEATMAP_ARTISTS);
    let rows = artists.into_iter().map(|(artist, _)| artist).collect::<Vec<_>>();

    let years = dated
        .iter()
        .filter(|(artist, _)| rows.contains(artist))
        .map(|(_, year)| *year)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect::<Vec<_>>();

    let mut cells = vec![vec![0.0; years.len()]; rows.len()];
    for (artist, year) in &dated {
        let (Some(row), Ok(column)) = (
            rows.iter().position(|candidate| candidate == artist),
            years.binary_search(year),
        ) else {
            continue;
        };
        cells[row][column] += 1.0;
    }

    Chart::new(
        "Songs Released by Artists Across Years",
        ChartBody::Heatmap {
            rows: rows.into_iter().map(str::to_owned).collect(),
            columns: years.iter().map(i32::to_string).collect(),
            cells,
        },
    )
    .axes("Year", "Artist Name(s)")
}

#[cfg(test)]
mod tests {
    use crate::data::{ColumnSet, Dataset, TrackRecord};

    use super::*;

    fn dataset(tracks: Vec<TrackRecord>) -> Dataset {
        Dataset {
            columns: ColumnSet::from_headers([
                "Track Name",
                "Artist Name(s)",
                "Album Name",
                "Album Release Date",
                "Explicit",
                "Popularity",
                "Label",
            ]),
            tracks,
            ..Dataset::default()
        }
    }

    fn dated(artist: &str, year: Option<i32>) -> TrackRecord {
        TrackRecord {
            artist_names: Some(artist.to_owned()),
            release_year: year,
            decade: Decade::from_year(year),
            ..TrackRecord::default()
        }
    }

    #[test]
    fn explicit_counts_split_per_decade() {
        let dataset = dataset(vec![
            TrackRecord {
                explicit: Some(true),
                ..dated("A", Some(2001))
            },
            TrackRecord {
                explicit: Some(false),
                ..dated("A", Some(2003))
            },
            TrackRecord {
                explicit: Some(true),
                ..dated("A", Some(2010))
            },
            dated("A", Some(1980)),
        ]);
        let chart = explicit_by_decade(&dataset.select_all());

        let ChartBody::Line { categories, series } = chart.body else {
            panic!("expected a line chart");
        };
        assert_eq!(categories, vec!["2000s", "2010s"]);
        assert_eq!(series[0].name, "Explicit");
        assert_eq!(series[0].values, vec![1.0, 1.0]);
        assert_eq!(series[1].values, vec![1.0, 0.0]);
    }

    #[test]
    fn albums_tie_break_on_song_count() {
        let album = |name: &str, popularity: f64| TrackRecord {
            album_name: Some(name.to_owned()),
            popularity,
            ..TrackRecord::default()
        };
        let dataset = dataset(vec![
            album("Single", 50.0),
            album("Double", 50.0),
            album("Double", 50.0),
            album("Best", 90.0),
        ]);
        let chart = album_popularity(&dataset.select_all());

        let ChartBody::Bars { bars, .. } = chart.body else {
            panic!("expected bars");
        };
        let labels = bars.iter().map(|bar| bar.label.as_str()).collect::<Vec<_>>();
        assert_eq!(labels, vec!["Best", "Double", "Single"]);
        assert_eq!(bars[1].detail.as_deref(), Some("2 songs"));
    }

    #[test]
    fn top_labels_are_capped_at_ten() {
        let tracks = (0..12)
            .flat_map(|index| {
                (0..=index).map(move |_| TrackRecord {
                    label: Some(format!("label {index:02}")),
                    ..TrackRecord::default()
                })
            })
            .collect();
        let dataset = dataset(tracks);
        let chart = top_labels(&dataset.select_all());

        let ChartBody::Bars { bars, .. } = chart.body else {
            panic!("expected bars");
        };
        assert_eq!(bars.len(), 10);
        assert_eq!(bars[0].label, "label 11");
        assert_eq!(bars[0].value, 12.0);
    }

    #[test]
    fn heatmap_counts_releases_per_artist_and_year() {
        let dataset = dataset(vec![
            dated("Alice", Some(2000)),
            dated("Alice", Some(2000)),
            dated("Alice", Some(2002)),
            dated("Bob", Some(2002)),
            dated("Bob", None),
        ]);
        let chart = artist_year_heatmap(&dataset.select_all());

        let ChartBody::Heatmap {
            rows,
            columns,
            cells,
        } = chart.body
        else {
            panic!("expected a heatmap");
        };
        assert_eq!(rows, vec!["Alice", "Bob"]);
        assert_eq!(columns, vec!["2000", "2002"]);
        assert_eq!(cells, vec![vec![2.0, 1.0], vec![0.0, 1.0]]);
    }

    #[test]
    fn tracks_per_year_skip_unknown_years() {
        let dataset = dataset(vec![
            dated("A", Some(1999)),
            dated("A", None),
            dated("A", Some(1999)),
        ]);
        let chart = tracks_per_year(&dataset.select_all());

        let ChartBody::Line { categories, series } = chart.body else {
            panic!("expected a line chart");
        };
        assert_eq!(categories, vec!["1999"]);
        assert_eq!(series[0].values, vec![2.0]);
    }
}
