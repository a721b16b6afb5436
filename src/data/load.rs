use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, info, warn};

use super::columns::{Column, ColumnSet};
use super::parse::{
    coerce_bool, coerce_number, coerce_popularity, coerce_text, release_year, split_genres,
};
use super::record::{Dataset, Decade, TrackRecord};

#[derive(Debug, Default, Deserialize)]
struct RawTrack {
    #[serde(default, rename = "Track Name")]
    track_name: Option<String>,
    #[serde(default, rename = "Artist Name(s)")]
    artist_names: Option<String>,
    #[serde(default, rename = "Album Name")]
    album_name: Option<String>,
    #[serde(default, rename = "Album Release Date")]
    release_date: Option<String>,
    #[serde(default, rename = "Track Duration (ms)")]
    duration_ms: Option<String>,
    #[serde(default, rename = "Explicit")]
    explicit: Option<String>,
    #[serde(default, rename = "Popularity")]
    popularity: Option<String>,
    #[serde(default, rename = "Artist Genres")]
    artist_genres: Option<String>,
    #[serde(default, rename = "Danceability")]
    danceability: Option<String>,
    #[serde(default, rename = "Energy")]
    energy: Option<String>,
    #[serde(default, rename = "Loudness")]
    loudness: Option<String>,
    #[serde(default, rename = "Valence")]
    valence: Option<String>,
    #[serde(default, rename = "Tempo")]
    tempo: Option<String>,
    #[serde(default, rename = "Time Signature")]
    time_signature: Option<String>,
    #[serde(default, rename = "Label")]
    label: Option<String>,
}

impl RawTrack {
    fn into_record(self, columns: &ColumnSet) -> TrackRecord {
        let release_year = release_year(self.release_date.as_deref());
        let genres = if columns.contains(Column::ArtistGenres) {
            split_genres(self.artist_genres.as_deref())
        } else {
            Vec::new()
        };

        TrackRecord {
            track_name: coerce_text(self.track_name).unwrap_or_default(),
            artist_names: self.artist_names,
            album_name: coerce_text(self.album_name),
            label: coerce_text(self.label),
            popularity: coerce_popularity(self.popularity.as_deref()),
            release_year,
            decade: Decade::from_year(release_year),
            explicit: coerce_bool(self.explicit.as_deref()),
            genres,
            danceability: coerce_number(self.danceability.as_deref()),
            energy: coerce_number(self.energy.as_deref()),
            loudness: coerce_number(self.loudness.as_deref()),
            valence: coerce_number(self.valence.as_deref()),
            tempo: coerce_number(self.tempo.as_deref()),
            duration_ms: coerce_number(self.duration_ms.as_deref()),
            time_signature: coerce_number(self.time_signature.as_deref()),
        }
    }
}

pub fn load_dataset(path: impl AsRef<Path>) -> Result<Dataset> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("failed to open song CSV at {}", path.display()))?;
    load_from_reader(file, path)
        .with_context(|| format!("failed to read song CSV at {}", path.display()))
}

pub fn load_from_reader(reader: impl Read, source: impl AsRef<Path>) -> Result<Dataset> {
    let source = source.as_ref().to_path_buf();
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .context("failed to read CSV header row")?
        .clone();
    let columns = ColumnSet::from_headers(headers.iter());
    debug!(
        columns = ?columns.iter().map(Column::header).collect::<Vec<_>>(),
        "recognized CSV columns"
    );

    let mut tracks = Vec::new();
    let mut skipped_rows = 0usize;
    for (row, result) in csv_reader.records().enumerate() {
        let line = row + 2;
        let mut record = match result {
            Ok(record) => record,
            Err(error) => {
                skipped_rows += 1;
                warn!(row = line, %error, "skipping malformed CSV row");
                continue;
            }
        };

        if record.len() > headers.len() {
            skipped_rows += 1;
            warn!(
                row = line,
                fields = record.len(),
                expected = headers.len(),
                "skipping CSV row with too many fields"
            );
            continue;
        }

        // Short rows read as if their trailing fields were empty.
        while record.len() < headers.len() {
            record.push_field("");
        }

        match record.deserialize::<RawTrack>(Some(&headers)) {
            Ok(raw) => tracks.push(raw.into_record(&columns)),
            Err(error) => {
                skipped_rows += 1;
                warn!(row = line, %error, "skipping malformed CSV row");
            }
        }
    }

    if tracks.is_empty() {
        warn!(source = %source.display(), "loaded song CSV contains no tracks");
    }

    if !columns.contains(Column::AlbumReleaseDate) {
        warn!("'Album Release Date' column missing; decade filters are unavailable");
    }

    let unknown_years = tracks
        .iter()
        .filter(|track| track.release_year.is_none())
        .count();
    info!(
        source = %source.display(),
        tracks = tracks.len(),
        skipped_rows,
        unknown_years,
        "loaded song dataset"
    );

    Ok(Dataset {
        source,
        columns,
        tracks,
        skipped_rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Track Name,Artist Name(s),Album Release Date,Popularity,Explicit,Artist Genres,Tempo
Song A,\"Alice, Bob\",1992-08-03,71,true,\"pop, rock\",120.5
Song B,Carol,not a date,abc,false,,
";

    #[test]
    fn rows_are_coerced_instead_of_rejected() {
        let dataset = load_from_reader(SAMPLE.as_bytes(), "sample.csv").unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.skipped_rows, 0);

        let first = &dataset.tracks[0];
        assert_eq!(first.track_name, "Song A");
        assert_eq!(first.artist_names.as_deref(), Some("Alice, Bob"));
        assert_eq!(first.decade, Decade::Known(1990));
        assert_eq!(first.popularity, 71.0);
        assert_eq!(first.explicit, Some(true));
        assert_eq!(first.genres, vec!["pop", "rock"]);
        assert_eq!(first.tempo, Some(120.5));

        let second = &dataset.tracks[1];
        assert_eq!(second.release_year, None);
        assert_eq!(second.decade, Decade::Unknown);
        assert_eq!(second.popularity, 0.0);
        assert_eq!(second.genres, vec!["Unknown"]);
        assert_eq!(second.tempo, None);
    }

    #[test]
    fn short_rows_are_padded_and_long_rows_skipped() {
        let csv = "\
Track Name,Artist Name(s),Album Release Date,Popularity,Extra
S1,\"Alice, Bob\",1999-01-01,5
S2,Carol
S3,Dave,2001-01-01,9,x,overflow
S4,Erin,2010-05-05,7,x
";
        let dataset = load_from_reader(csv.as_bytes(), "ragged.csv").unwrap();
        assert_eq!(dataset.skipped_rows, 1);

        let names = dataset
            .tracks
            .iter()
            .map(|track| track.track_name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["S1", "S2", "S4"]);

        let first = &dataset.tracks[0];
        assert_eq!(first.artist_names.as_deref(), Some("Alice, Bob"));
        assert_eq!(first.decade, Decade::Known(1990));
        assert_eq!(first.popularity, 5.0);

        let second = &dataset.tracks[1];
        assert_eq!(second.artist_names.as_deref(), Some("Carol"));
        assert_eq!(second.decade, Decade::Unknown);
        assert_eq!(second.popularity, 0.0);
    }

    #[test]
    fn missing_columns_are_recorded_not_fatal() {
        let dataset = load_from_reader("Track Name\nOnly\n".as_bytes(), "min.csv").unwrap();
        assert_eq!(dataset.len(), 1);
        assert!(dataset.has_column(Column::TrackName));
        assert!(!dataset.has_column(Column::Decade));
        assert!(dataset.decades().is_empty());
        assert!(dataset.tracks[0].genres.is_empty());
    }

    #[test]
    fn empty_input_yields_empty_dataset() {
        let dataset = load_from_reader("".as_bytes(), "empty.csv").unwrap();
        assert!(dataset.is_empty());
    }

    #[test]
    fn missing_file_is_a_contextual_error() {
        let error = load_dataset("/definitely/not/here.csv").unwrap_err();
        assert!(error.to_string().contains("failed to open song CSV"));
    }
}
