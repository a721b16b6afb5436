use std::collections::BTreeSet;

use crate::collab::{LayoutConfig, collaboration_bundle};
use crate::data::{Column, Selection, UNKNOWN_GENRE};

use super::stats::value_counts;
use super::{Chart, ChartBody, NO_DATA_MESSAGE, Section, guarded};

const CROSSOVER_GENRES: usize = 15;

pub(super) fn network_analysis(selection: &Selection<'_>, layout: &LayoutConfig) -> Vec<Section> {
    vec![
        guarded(
            "Artist Collaborations",
            "Artist Collaborations: artists linked when they share a track.",
            selection,
            &[Column::ArtistNames],
            "No artist collaborations to display.",
            || {
                Chart::new(
                    "Artist Collaborations",
                    ChartBody::Network {
                        bundle: collaboration_bundle(selection.iter(), layout),
                    },
                )
            },
        ),
        guarded(
            "Genre Crossover",
            "Genre Crossover: how often the most common genres appear on the same track.",
            selection,
            &[Column::Genres],
            NO_DATA_MESSAGE,
            || genre_crossover(selection),
        ),
    ]
}

fn genre_crossover(selection: &Selection<'_>) -> Chart {
    let mut genres = value_counts(
        selection
            .iter()
            .flat_map(|track| track.genres.iter().map(String::as_str))
            .filter(|genre| *genre != UNKNOWN_GENRE),
    );
    genres.truncate(CROSSOVER_GENRES);
    let mut names = genres.into_iter().map(|(genre, _)| genre).collect::<Vec<_>>();
    // A lone genre has nothing to cross over with.
    if names.len() < 2 {
        names.clear();
    }

    let mut cells = vec![vec![0.0; names.len()]; names.len()];
    for track in selection.iter() {
        let present = track
            .genres
            .iter()
            .filter_map(|genre| names.iter().position(|name| name == genre))
            .collect::<BTreeSet<_>>();
        for &row in &present {
            for &column in &present {
                if row != column {
                    cells[row][column] += 1.0;
                }
            }
        }
    }

    let labels = names.iter().map(|name| (*name).to_owned()).collect::<Vec<_>>();

    Chart::new(
        "Genre Crossover",
        ChartBody::Heatmap {
            rows: labels.clone(),
            columns: labels,
            cells,
        },
    )
    .axes("Genre", "Genre")
}

#[cfg(test)]
mod tests {
    use crate::data::{ColumnSet, Dataset, TrackRecord};

    use super::super::SectionContent;
    use super::*;

    fn dataset(tracks: Vec<TrackRecord>) -> Dataset {
        Dataset {
            columns: ColumnSet::from_headers(["Artist Name(s)", "Artist Genres"]),
            tracks,
            ..Dataset::default()
        }
    }

    fn track(artists: &str, genres: &[&str]) -> TrackRecord {
        TrackRecord {
            artist_names: Some(artists.to_owned()),
            genres: genres.iter().map(|genre| (*genre).to_owned()).collect(),
            ..TrackRecord::default()
        }
    }

    #[test]
    fn solo_tracks_show_no_collaborations() {
        let dataset = dataset(vec![track("Alice", &["pop"]), track("Bob", &["rock"])]);
        let sections = network_analysis(&dataset.select_all(), &LayoutConfig::default());

        assert_eq!(
            sections[0].content,
            SectionContent::NoData("No artist collaborations to display.".to_owned())
        );
    }

    #[test]
    fn collaborations_become_a_network_chart() {
        let dataset = dataset(vec![track("Alice, Bob", &["pop"])]);
        let sections = network_analysis(&dataset.select_all(), &LayoutConfig::default());

        let Some(Chart {
            body: ChartBody::Network { bundle },
            ..
        }) = sections[0].chart()
        else {
            panic!("expected a network chart");
        };
        assert_eq!(bundle.nodes.len(), 2);
        assert_eq!(bundle.edges.len(), 1);
    }

    #[test]
    fn crossover_counts_shared_tracks_and_skips_unknown() {
        let dataset = dataset(vec![
            track("A", &["pop", "rock"]),
            track("B", &["pop", "rock", "jazz"]),
            track("C", &["pop"]),
            track("D", &[UNKNOWN_GENRE]),
        ]);
        let chart = genre_crossover(&dataset.select_all());

        let ChartBody::Heatmap {
            rows,
            columns,
            cells,
        } = chart.body
        else {
            panic!("expected a heatmap");
        };
        assert_eq!(rows, vec!["pop", "rock", "jazz"]);
        assert_eq!(rows, columns);
        assert_eq!(cells[0], vec![0.0, 2.0, 1.0]);
        assert_eq!(cells[1], vec![2.0, 0.0, 1.0]);
        assert_eq!(cells[2][2], 0.0);
    }
}
