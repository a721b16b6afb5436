use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Column {
    TrackName,
    ArtistNames,
    AlbumName,
    AlbumReleaseDate,
    TrackDurationMs,
    Explicit,
    Popularity,
    ArtistGenres,
    Danceability,
    Energy,
    Loudness,
    Valence,
    Tempo,
    TimeSignature,
    Label,
    Year,
    Decade,
    Genres,
}

impl Column {
    pub const SOURCE: [Column; 15] = [
        Column::TrackName,
        Column::ArtistNames,
        Column::AlbumName,
        Column::AlbumReleaseDate,
        Column::TrackDurationMs,
        Column::Explicit,
        Column::Popularity,
        Column::ArtistGenres,
        Column::Danceability,
        Column::Energy,
        Column::Loudness,
        Column::Valence,
        Column::Tempo,
        Column::TimeSignature,
        Column::Label,
    ];

    pub fn header(self) -> &'static str {
        match self {
            Self::TrackName => "Track Name",
            Self::ArtistNames => "Artist Name(s)",
            Self::AlbumName => "Album Name",
            Self::AlbumReleaseDate => "Album Release Date",
            Self::TrackDurationMs => "Track Duration (ms)",
            Self::Explicit => "Explicit",
            Self::Popularity => "Popularity",
            Self::ArtistGenres => "Artist Genres",
            Self::Danceability => "Danceability",
            Self::Energy => "Energy",
            Self::Loudness => "Loudness",
            Self::Valence => "Valence",
            Self::Tempo => "Tempo",
            Self::TimeSignature => "Time Signature",
            Self::Label => "Label",
            Self::Year => "Year",
            Self::Decade => "Decade",
            Self::Genres => "Genres",
        }
    }

    pub fn from_header(header: &str) -> Option<Self> {
        let header = header.trim();
        Self::SOURCE
            .into_iter()
            .find(|column| column.header() == header)
    }

    fn derived_from(self) -> Option<Column> {
        match self {
            Self::Year | Self::Decade => Some(Self::AlbumReleaseDate),
            Self::Genres => Some(Self::ArtistGenres),
            _ => None,
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize)]
#[error("Cannot plot: {} column missing.", quoted_list(&.columns))]
pub struct MissingColumns {
    pub columns: Vec<Column>,
}

fn quoted_list(columns: &[Column]) -> String {
    columns
        .iter()
        .map(|column| format!("'{}'", column.header()))
        .collect::<Vec<_>>()
        .join(" or ")
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ColumnSet {
    present: BTreeSet<Column>,
}

impl ColumnSet {
    pub fn from_headers<'a>(headers: impl IntoIterator<Item = &'a str>) -> Self {
        let mut present = headers
            .into_iter()
            .filter_map(Column::from_header)
            .collect::<BTreeSet<_>>();

        for derived in [Column::Year, Column::Decade, Column::Genres] {
            if derived
                .derived_from()
                .is_some_and(|source| present.contains(&source))
            {
                present.insert(derived);
            }
        }

        Self { present }
    }

    pub fn contains(&self, column: Column) -> bool {
        self.present.contains(&column)
    }

    pub fn iter(&self) -> impl Iterator<Item = Column> + '_ {
        self.present.iter().copied()
    }

    pub fn require(&self, required: &[Column]) -> Result<(), MissingColumns> {
        let mut columns = Vec::new();
        for &column in required {
            if !self.contains(column) && !columns.contains(&column) {
                columns.push(column);
            }
        }

        if columns.is_empty() {
            Ok(())
        } else {
            Err(MissingColumns { columns })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_columns_follow_their_source() {
        let set = ColumnSet::from_headers(["Track Name", "Album Release Date"]);
        assert!(set.contains(Column::Year));
        assert!(set.contains(Column::Decade));
        assert!(!set.contains(Column::Genres));

        let set = ColumnSet::from_headers([" Artist Genres "]);
        assert!(set.contains(Column::Genres));
        assert!(!set.contains(Column::Decade));
    }

    #[test]
    fn require_names_every_missing_column_once() {
        let set = ColumnSet::from_headers(["Popularity"]);
        assert_eq!(set.require(&[Column::Popularity]), Ok(()));

        let error = set
            .require(&[Column::Decade, Column::Popularity, Column::Explicit, Column::Decade])
            .unwrap_err();
        assert_eq!(error.columns, vec![Column::Decade, Column::Explicit]);
        assert_eq!(
            error.to_string(),
            "Cannot plot: 'Decade' or 'Explicit' column missing."
        );
    }

    #[test]
    fn unknown_headers_are_ignored() {
        let set = ColumnSet::from_headers(["Track URI", "ISRC"]);
        assert_eq!(set.iter().count(), 0);
    }
}
