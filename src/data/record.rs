use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use thiserror::Error;

use super::columns::{Column, ColumnSet, MissingColumns};

/// Ten-year release bucket. Tracks whose release date could not be read land
/// in `Unknown`, which is never merged with a real decade such as `Known(0)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Decade {
    #[default]
    Unknown,
    Known(i32),
}

impl Decade {
    pub fn from_year(year: Option<i32>) -> Self {
        match year {
            Some(year) => Self::Known(year.div_euclid(10) * 10),
            None => Self::Unknown,
        }
    }

    pub fn label(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Decade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => f.write_str("Unknown"),
            Self::Known(decade) => write!(f, "{decade}s"),
        }
    }
}

impl Serialize for Decade {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("invalid decade {0:?}; expected a multiple of ten such as 1990 or 1990s, or unknown")]
pub struct DecadeParseError(String);

impl FromStr for Decade {
    type Err = DecadeParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case("unknown") {
            return Ok(Self::Unknown);
        }

        let digits = trimmed.strip_suffix('s').unwrap_or(trimmed);
        match digits.parse::<i32>() {
            Ok(year) if year.rem_euclid(10) == 0 => Ok(Self::Known(year)),
            _ => Err(DecadeParseError(value.to_owned())),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrackRecord {
    pub track_name: String,
    pub artist_names: Option<String>,
    pub album_name: Option<String>,
    pub label: Option<String>,
    pub popularity: f64,
    pub release_year: Option<i32>,
    pub decade: Decade,
    pub explicit: Option<bool>,
    pub genres: Vec<String>,
    pub danceability: Option<f64>,
    pub energy: Option<f64>,
    pub loudness: Option<f64>,
    pub valence: Option<f64>,
    pub tempo: Option<f64>,
    pub duration_ms: Option<f64>,
    pub time_signature: Option<f64>,
}

impl TrackRecord {
    pub fn numeric(&self, column: Column) -> Option<f64> {
        match column {
            Column::Popularity => Some(self.popularity),
            Column::Danceability => self.danceability,
            Column::Energy => self.energy,
            Column::Loudness => self.loudness,
            Column::Valence => self.valence,
            Column::Tempo => self.tempo,
            Column::TrackDurationMs => self.duration_ms,
            Column::TimeSignature => self.time_signature,
            Column::Year => self.release_year.map(f64::from),
            _ => None,
        }
    }

    pub fn artist_field(&self) -> &str {
        self.artist_names.as_deref().unwrap_or("")
    }
}

#[derive(Clone, Debug, Default)]
pub struct Dataset {
    pub source: PathBuf,
    pub columns: ColumnSet,
    pub tracks: Vec<TrackRecord>,
    pub skipped_rows: usize,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn columns(&self) -> &ColumnSet {
        &self.columns
    }

    pub fn has_column(&self, column: Column) -> bool {
        self.columns.contains(column)
    }

    pub fn require(&self, required: &[Column]) -> Result<(), MissingColumns> {
        self.columns.require(required)
    }

    pub fn decades(&self) -> Vec<Decade> {
        if !self.has_column(Column::Decade) {
            return Vec::new();
        }

        self.tracks
            .iter()
            .map(|track| track.decade)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn select(&self, decades: &BTreeSet<Decade>) -> Selection<'_> {
        let tracks = self
            .tracks
            .iter()
            .filter(|track| decades.is_empty() || decades.contains(&track.decade))
            .collect();

        Selection {
            dataset: self,
            tracks,
        }
    }

    pub fn select_all(&self) -> Selection<'_> {
        self.select(&BTreeSet::new())
    }
}

#[derive(Clone, Debug)]
pub struct Selection<'a> {
    pub dataset: &'a Dataset,
    pub tracks: Vec<&'a TrackRecord>,
}

impl<'a> Selection<'a> {
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn require(&self, required: &[Column]) -> Result<(), MissingColumns> {
        self.dataset.require(required)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a TrackRecord> + '_ {
        self.tracks.iter().copied()
    }
}
