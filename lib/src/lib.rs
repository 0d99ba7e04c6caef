use parse_display::{Display, FromStr};

mod error;
pub mod export;
pub mod fetch;
pub mod merge;
pub mod scoring;
pub mod season;
pub mod table;
pub use error::Error;
pub use scoring::{MvpCandidatesDf, Scoring};

pub type Result<T> = std::result::Result<T, error::Error>;

/// How to treat a player who appears under more than one team
/// (traded mid-season): rank every team-stint row separately, or
/// keep only the first stint per player name.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Display, FromStr)]
#[display(style = "lowercase")]
pub enum DedupeMode {
    Stints,
    Players,
}

/// Columns of the final ranked table, in export order.
pub const OUTPUT_COLUMNS: [&str; 13] = [
    "Player", "Tm", "G", "MP", "PTS", "AST", "TRB", "Win_Pct", "PER", "WS", "BPM", "VORP",
    "MVP_Score",
];
