use crate::data::{Column, Decade, Selection, TrackRecord};
use crate::util::format_value;

use super::popularity::TOP_SONGS;
use super::stats::{box_stats, group_mean, group_mean_by_value, histogram, top_n_by};
use super::{AudioFeature, Bar, Chart, ChartBody, Orientation, Section, Series, section};

const TOP_FEATURE_VALUES: usize = 20;
const FEATURE_BINS: usize = 20;
const DECADE_FEATURES: [Column; 3] = [Column::Danceability, Column::Energy, Column::Valence];

pub(super) fn audio_features(selection: &Selection<'_>, feature: AudioFeature) -> Vec<Section> {
    let label = feature.label();
    vec![
        section(
            "Distribution",
            format!("Top 20 {label} Values: distribution of the top 20 songs by {label}."),
            selection,
            &[feature.column()],
            || feature_distribution(selection, feature),
        ),
        section(
            "By Decade",
            format!("{label} by Decade: the top 20 {label} values compared across decades."),
            selection,
            &[Column::Decade, feature.column()],
            || feature_by_decade(selection, feature),
        ),
    ]
}

pub(super) fn tempo_mood(selection: &Selection<'_>) -> Vec<Section> {
    vec![
        section(
            "Tempo Trends",
            "Tempo Trends: average tempo of releases per year.",
            selection,
            &[Column::Year, Column::Tempo],
            || {
                yearly_mean(selection, Column::Tempo, "Average Tempo Over Time")
                    .axes("Year", "Tempo")
            },
        ),
        section(
            "Mood Scatter",
            "Mood Analysis (Valence & Energy): average energy of the top songs by valence.",
            selection,
            &[Column::Valence, Column::Energy, Column::Popularity],
            || mood_by_valence(selection),
        ),
    ]
}

pub(super) fn feature_comparisons(selection: &Selection<'_>) -> Vec<Section> {
    vec![
        section(
            "Feature Comparison",
            "Feature Comparison: mean danceability, energy and valence per decade.",
            selection,
            &[Column::Decade, Column::Danceability, Column::Energy, Column::Valence],
            || decade_features(selection),
        ),
        section(
            "Loudness Trends",
            "Loudness Over Time: average loudness of releases per year.",
            selection,
            &[Column::Year, Column::Loudness],
            || {
                yearly_mean(selection, Column::Loudness, "Average Loudness Over Time")
                    .axes("Year", "Loudness")
            },
        ),
    ]
}

fn top_by_feature<'a>(selection: &Selection<'a>, feature: AudioFeature) -> Vec<&'a TrackRecord> {
    top_n_by(selection.iter(), TOP_FEATURE_VALUES, |track| feature.value(track))
}

fn feature_distribution(selection: &Selection<'_>, feature: AudioFeature) -> Chart {
    let values = top_by_feature(selection, feature)
        .into_iter()
        .filter_map(|track| feature.value(track));

    Chart::new(
        format!("Top 20 Songs by {}", feature.label()),
        ChartBody::Histogram {
            bins: histogram(values, FEATURE_BINS),
        },
    )
    .axes(feature.label(), "Songs")
}

fn feature_by_decade(selection: &Selection<'_>, feature: AudioFeature) -> Chart {
    let top = top_by_feature(selection, feature);
    let mut decades = top.iter().map(|track| track.decade).collect::<Vec<Decade>>();
    decades.sort();
    decades.dedup();

    let boxes = decades
        .into_iter()
        .filter_map(|decade| {
            let values = top
                .iter()
                .filter(|track| track.decade == decade)
                .filter_map(|track| feature.value(track));
            box_stats(decade.label(), values)
        })
        .collect();

    Chart::new(
        format!("Top 20 {} Values by Decade", feature.label()),
        ChartBody::Boxes { boxes },
    )
    .axes("Decade", feature.label())
}

fn yearly_mean(selection: &Selection<'_>, column: Column, title: &str) -> Chart {
    let years = group_mean(selection.iter().filter_map(|track| {
        Some((track.release_year?, track.numeric(column)?))
    }));

    Chart::new(
        title,
        ChartBody::Line {
            categories: years.iter().map(|(year, _, _)| year.to_string()).collect(),
            series: vec![Series::new(
                column.header(),
                years.iter().map(|(_, mean, _)| *mean).collect(),
            )],
        },
    )
}

fn mood_by_valence(selection: &Selection<'_>) -> Chart {
    let top = top_n_by(selection.iter(), TOP_SONGS, |track| Some(track.popularity));
    let groups = group_mean_by_value(
        top.into_iter()
            .filter_map(|track| Some((track.valence?, track.energy?))),
    );

    let bars = groups
        .into_iter()
        .map(|(valence, energy, count)| {
            Bar::new(format_value(valence), energy).with_detail(format!("{count} songs"))
        })
        .collect();

    Chart::new(
        "Average Energy Levels by Valence (Mood Analysis)",
        ChartBody::Bars {
            orientation: Orientation::Vertical,
            bars,
        },
    )
    .axes("Valence", "Energy")
}

fn decade_features(selection: &Selection<'_>) -> Chart {
    let mut decades = selection.iter().map(|track| track.decade).collect::<Vec<_>>();
    decades.sort();
    decades.dedup();

    let series = DECADE_FEATURES
        .into_iter()
        .map(|column| {
            let means = group_mean(
                selection
                    .iter()
                    .filter_map(|track| Some((track.decade, track.numeric(column)?))),
            );
            let values = decades
                .iter()
                .map(|decade| {
                    means
                        .iter()
                        .find(|(key, _, _)| key == decade)
                        .map_or(f64::NAN, |(_, mean, _)| *mean)
                })
                .collect();
            Series::new(column.header(), values)
        })
        .collect();

    Chart::new(
        "Feature Comparison by Decade",
        ChartBody::Grouped {
            categories: decades.iter().map(|decade| decade.label()).collect(),
            series,
        },
    )
    .axes("Decade", "Mean Value")
}

#[cfg(test)]
mod tests {
    use crate::data::{ColumnSet, Dataset};

    use super::super::SectionContent;
    use super::*;

    fn dataset(tracks: Vec<TrackRecord>) -> Dataset {
        Dataset {
            columns: ColumnSet::from_headers([
                "Track Name",
                "Popularity",
                "Album Release Date",
                "Danceability",
                "Energy",
                "Valence",
                "Tempo",
                "Loudness",
            ]),
            tracks,
            ..Dataset::default()
        }
    }

    fn track(year: Option<i32>, popularity: f64) -> TrackRecord {
        TrackRecord {
            popularity,
            release_year: year,
            decade: Decade::from_year(year),
            ..TrackRecord::default()
        }
    }

    #[test]
    fn distribution_uses_only_the_top_twenty_values() {
        let tracks = (0..30)
            .map(|index| TrackRecord {
                energy: Some(f64::from(index) / 30.0),
                ..track(Some(2000), 50.0)
            })
            .collect();
        let dataset = dataset(tracks);
        let chart = feature_distribution(&dataset.select_all(), AudioFeature::Energy);

        let ChartBody::Histogram { bins } = chart.body else {
            panic!("expected a histogram");
        };
        assert_eq!(bins.len(), FEATURE_BINS);
        assert_eq!(bins.iter().map(|bin| bin.count).sum::<usize>(), 20);
        assert!((bins[0].start - 10.0 / 30.0).abs() < 1e-9);
    }

    #[test]
    fn decade_boxes_follow_decade_order() {
        let dataset = dataset(vec![
            TrackRecord {
                tempo: Some(120.0),
                ..track(Some(2015), 10.0)
            },
            TrackRecord {
                tempo: Some(90.0),
                ..track(Some(1984), 10.0)
            },
            TrackRecord {
                tempo: Some(100.0),
                ..track(None, 10.0)
            },
        ]);
        let chart = feature_by_decade(&dataset.select_all(), AudioFeature::Tempo);

        let ChartBody::Boxes { boxes } = chart.body else {
            panic!("expected box plots");
        };
        let labels = boxes.iter().map(|stats| stats.label.as_str()).collect::<Vec<_>>();
        assert_eq!(labels, vec!["Unknown", "1980s", "2010s"]);
    }

    #[test]
    fn yearly_mean_skips_unknown_years() {
        let dataset = dataset(vec![
            TrackRecord {
                loudness: Some(-8.0),
                ..track(Some(1999), 0.0)
            },
            TrackRecord {
                loudness: Some(-4.0),
                ..track(Some(1999), 0.0)
            },
            TrackRecord {
                loudness: Some(-20.0),
                ..track(None, 0.0)
            },
        ]);
        let chart = yearly_mean(&dataset.select_all(), Column::Loudness, "Loudness");

        let ChartBody::Line { categories, series } = chart.body else {
            panic!("expected a line chart");
        };
        assert_eq!(categories, vec!["1999"]);
        assert_eq!(series[0].values, vec![-6.0]);
    }

    #[test]
    fn decade_comparison_leaves_gaps_for_missing_values() {
        let dataset = dataset(vec![
            TrackRecord {
                danceability: Some(0.5),
                energy: Some(0.7),
                valence: Some(0.2),
                ..track(Some(1990), 0.0)
            },
            TrackRecord {
                danceability: Some(0.9),
                ..track(Some(2000), 0.0)
            },
        ]);
        let chart = decade_features(&dataset.select_all());

        let ChartBody::Grouped { categories, series } = chart.body else {
            panic!("expected grouped bars");
        };
        assert_eq!(categories, vec!["1990s", "2000s"]);
        assert_eq!(series[0].name, "Danceability");
        assert_eq!(series[0].values, vec![0.5, 0.9]);
        assert_eq!(series[1].values[0], 0.7);
        assert!(series[1].values[1].is_nan());
    }

    #[test]
    fn mood_groups_top_songs_by_valence() {
        let dataset = dataset(vec![
            TrackRecord {
                valence: Some(0.5),
                energy: Some(0.2),
                ..track(Some(2000), 90.0)
            },
            TrackRecord {
                valence: Some(0.5),
                energy: Some(0.4),
                ..track(Some(2000), 80.0)
            },
            TrackRecord {
                valence: Some(0.1),
                energy: Some(1.0),
                ..track(Some(2000), 70.0)
            },
        ]);
        let chart = mood_by_valence(&dataset.select_all());

        let ChartBody::Bars { bars, .. } = chart.body else {
            panic!("expected bars");
        };
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].value, 1.0);
        assert!((bars[1].value - 0.3).abs() < 1e-9);
        assert_eq!(bars[1].detail.as_deref(), Some("2 songs"));
    }

    #[test]
    fn missing_feature_column_only_affects_its_sections() {
        let dataset = Dataset {
            columns: ColumnSet::from_headers(["Popularity", "Album Release Date", "Tempo"]),
            tracks: vec![TrackRecord {
                tempo: Some(100.0),
                ..track(Some(2000), 1.0)
            }],
            ..Dataset::default()
        };
        let sections = tempo_mood(&dataset.select_all());
        assert!(matches!(sections[0].content, SectionContent::Chart(_)));
        assert!(matches!(sections[1].content, SectionContent::Missing(_)));
    }
}
