mod columns;
mod load;
mod parse;
mod record;

pub use columns::{Column, ColumnSet, MissingColumns};
pub use load::{load_dataset, load_from_reader};
pub use parse::UNKNOWN_GENRE;
pub use record::{Dataset, Decade, DecadeParseError, Selection, TrackRecord};
