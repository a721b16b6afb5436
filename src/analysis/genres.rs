use std::collections::{BTreeMap, BTreeSet};

use crate::data::{Column, Selection, TrackRecord};

use super::popularity::{TOP_SONGS, top_songs};
use super::stats::{top_n_by, value_counts};
use super::{Bar, Chart, ChartBody, Orientation, Section, Series, section, song_label};

const TOP_ARTISTS: usize = 10;

pub(super) fn genre_analysis(selection: &Selection<'_>) -> Vec<Section> {
    vec![
        section(
            "Top Genres",
            "Top Genres in Top 10 Songs: the most common genres among the most popular songs.",
            selection,
            &[Column::Popularity, Column::Genres],
            || top_genres(selection),
        ),
        section(
            "Genre Distribution",
            "Genre Distribution in Top 10 Songs: how different genres contribute to the top songs.",
            selection,
            &[Column::TrackName, Column::Popularity, Column::Genres],
            || genre_distribution(selection),
        ),
        section(
            "Artist Popularity",
            "Artist Popularity in Top 10 Songs: total popularity and song count per artist credit.",
            selection,
            &[Column::ArtistNames, Column::Popularity, Column::TrackName],
            || artist_popularity(selection),
        ),
    ]
}

pub(super) fn top_artists_songs(selection: &Selection<'_>) -> Vec<Section> {
    vec![
        section(
            "Top Artists",
            "Most Featured Artists: artist credits with the most songs.",
            selection,
            &[Column::ArtistNames],
            || top_artists(selection),
        ),
        section(
            "Top Songs",
            "Top 10 Songs: the most popular songs.",
            selection,
            &[Column::TrackName, Column::Popularity],
            || top_songs(selection, "Top 10 Songs by Popularity"),
        ),
    ]
}

fn top_tracks<'a>(selection: &Selection<'a>) -> Vec<&'a TrackRecord> {
    top_n_by(selection.iter(), TOP_SONGS, |track| Some(track.popularity))
}

fn top_genres(selection: &Selection<'_>) -> Chart {
    let counts = value_counts(
        top_tracks(selection)
            .into_iter()
            .flat_map(|track| track.genres.iter().map(String::as_str)),
    );
    let bars = counts
        .into_iter()
        .map(|(genre, count)| Bar::new(genre, count as f64))
        .collect();

    Chart::new(
        "Top Genres in Top 10 Songs",
        ChartBody::Bars {
            orientation: Orientation::Horizontal,
            bars,
        },
    )
    .axes("Number of Songs", "Genre Name")
}

fn genre_distribution(selection: &Selection<'_>) -> Chart {
    let top = top_tracks(selection);
    let genres = top
        .iter()
        .flat_map(|track| track.genres.iter().map(String::as_str))
        .collect::<BTreeSet<_>>();

    let series = genres
        .into_iter()
        .map(|genre| {
            let values = top
                .iter()
                .map(|track| {
                    if track.genres.iter().any(|candidate| candidate == genre) {
                        track.popularity
                    } else {
                        0.0
                    }
                })
                .collect();
            Series::new(genre, values)
        })
        .collect();

    Chart::new(
        "Genre Distribution in Top 10 Songs",
        ChartBody::Stacked {
            categories: top.iter().map(|track| song_label(track)).collect(),
            series,
        },
    )
    .axes("Song Title", "Popularity Score")
}

fn artist_popularity(selection: &Selection<'_>) -> Chart {
    let mut artists: BTreeMap<&str, (f64, Vec<String>)> = BTreeMap::new();
    for track in top_tracks(selection) {
        let Some(artist) = track.artist_names.as_deref() else {
            continue;
        };
        let entry = artists.entry(artist).or_default();
        entry.0 += track.popularity;
        entry.1.push(song_label(track));
    }

    let mut artists = artists.into_iter().collect::<Vec<_>>();
    artists.sort_by(|a, b| b.1.0.total_cmp(&a.1.0));

    let bars = artists
        .into_iter()
        .map(|(artist, (popularity, songs))| {
            Bar::new(artist, popularity)
                .with_detail(format!("{} songs: {}", songs.len(), songs.join(", ")))
        })
        .collect();

    Chart::new(
        "Artist Popularity in Top 10 Songs",
        ChartBody::Bars {
            orientation: Orientation::Horizontal,
            bars,
        },
    )
    .axes("Total Popularity Score", "Artist Name")
}

fn top_artists(selection: &Selection<'_>) -> Chart {
    let mut counts = value_counts(
        selection
            .iter()
            .filter_map(|track| track.artist_names.as_deref()),
    );
    counts.truncate(TOP_ARTISTS);

    let bars = counts
        .into_iter()
        .map(|(artist, count)| Bar::new(artist, count as f64))
        .collect();

    Chart::new(
        "Most Featured Artists",
        ChartBody::Bars {
            orientation: Orientation::Vertical,
            bars,
        },
    )
    .axes("Artist Name(s)", "Songs")
}

#[cfg(test)]
mod tests {
    use crate::data::{ColumnSet, Dataset};

    use super::*;

    fn dataset(tracks: Vec<TrackRecord>) -> Dataset {
        Dataset {
            columns: ColumnSet::from_headers([
                "Track Name",
                "Artist Name(s)",
                "Popularity",
                "Artist Genres",
            ]),
            tracks,
            ..Dataset::default()
        }
    }

    fn track(name: &str, artists: &str, popularity: f64, genres: &[&str]) -> TrackRecord {
        TrackRecord {
            track_name: name.to_owned(),
            artist_names: Some(artists.to_owned()),
            popularity,
            genres: genres.iter().map(|genre| (*genre).to_owned()).collect(),
            ..TrackRecord::default()
        }
    }

    #[test]
    fn genre_counts_come_from_top_songs_only() {
        let mut tracks = (0..10)
            .map(|index| track(&format!("hit {index}"), "A", 90.0, &["pop"]))
            .collect::<Vec<_>>();
        tracks.push(track("flop", "B", 1.0, &["polka"]));
        tracks[0].genres.push("dance".to_owned());
        let dataset = dataset(tracks);

        let chart = top_genres(&dataset.select_all());
        let ChartBody::Bars { bars, .. } = chart.body else {
            panic!("expected bars");
        };
        let counts = bars
            .iter()
            .map(|bar| (bar.label.as_str(), bar.value))
            .collect::<Vec<_>>();
        assert_eq!(counts, vec![("pop", 10.0), ("dance", 1.0)]);
    }

    #[test]
    fn stacked_segments_follow_song_genres() {
        let dataset = dataset(vec![
            track("one", "A", 80.0, &["pop", "rock"]),
            track("two", "B", 60.0, &["rock"]),
        ]);
        let chart = genre_distribution(&dataset.select_all());

        let ChartBody::Stacked { categories, series } = chart.body else {
            panic!("expected stacked bars");
        };
        assert_eq!(categories, vec!["one", "two"]);
        assert_eq!(series[0].name, "pop");
        assert_eq!(series[0].values, vec![80.0, 0.0]);
        assert_eq!(series[1].name, "rock");
        assert_eq!(series[1].values, vec![80.0, 60.0]);
    }

    #[test]
    fn artist_popularity_sums_per_credit() {
        let dataset = dataset(vec![
            track("x", "Alice", 50.0, &[]),
            track("y", "Bob", 70.0, &[]),
            track("z", "Alice", 40.0, &[]),
        ]);
        let chart = artist_popularity(&dataset.select_all());

        let ChartBody::Bars { bars, .. } = chart.body else {
            panic!("expected bars");
        };
        assert_eq!(bars[0].label, "Alice");
        assert_eq!(bars[0].value, 90.0);
        assert_eq!(bars[0].detail.as_deref(), Some("2 songs: x, z"));
        assert_eq!(bars[1].label, "Bob");
    }

    #[test]
    fn top_artists_use_the_raw_credit() {
        let dataset = dataset(vec![
            track("a", "Alice, Bob", 1.0, &[]),
            track("b", "Alice, Bob", 1.0, &[]),
            track("c", "Alice", 1.0, &[]),
        ]);
        let chart = top_artists(&dataset.select_all());

        let ChartBody::Bars { bars, .. } = chart.body else {
            panic!("expected bars");
        };
        assert_eq!(bars[0].label, "Alice, Bob");
        assert_eq!(bars[0].value, 2.0);
        assert_eq!(bars[1].label, "Alice");
    }
}
