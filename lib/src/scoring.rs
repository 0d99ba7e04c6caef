use crate::{DedupeMode, Result};
use derive_deref::Deref;
use polars::prelude::*;

/// Weights of the composite MVP score. Fixed design constants, kept in
/// one place so the formula is auditable without touching merge logic.
#[derive(Debug, Clone, Copy)]
pub struct Scoring {
    pub pts_weight: f64,
    pub win_pct_weight: f64,
    pub per_weight: f64,
    pub ws_weight: f64,
    pub vorp_weight: f64,
    pub bpm_weight: f64,
}

impl Default for Scoring {
    /// The hand-tuned emphasis: team success dominates, then
    /// value-over-replacement and win shares, then raw counting and
    /// efficiency stats.
    fn default() -> Self {
        Self {
            pts_weight: 0.3,
            win_pct_weight: 30.0,
            per_weight: 0.7,
            ws_weight: 1.5,
            vorp_weight: 2.0,
            bpm_weight: 0.8,
        }
    }
}

/// The merged row-per-player-stint set, ready for scoring.
#[derive(Clone, Deref)]
pub struct MvpCandidatesDf(DataFrame);

impl MvpCandidatesDf {
    pub fn new(df: DataFrame) -> Self {
        Self(df)
    }

    /// Settles the traded-player question per configuration: `Stints`
    /// ranks every team-stint row separately, `Players` keeps only the
    /// first stint seen for each player name.
    pub fn dedupe(self, mode: DedupeMode) -> Result<Self> {
        match mode {
            DedupeMode::Stints => Ok(self),
            DedupeMode::Players => {
                let df = self
                    .0
                    .lazy()
                    .filter(col("Player").is_first_distinct())
                    .collect()?;
                Ok(Self(df))
            }
        }
    }

    /// Adds the `MVP_Score` column and sorts on it descending.
    ///
    /// Every input column is strict-cast to a float first: a value
    /// that refuses to parse fails the whole invocation instead of
    /// silently dropping the row. The sort keeps input order for
    /// equal scores.
    pub fn score(self, scoring: Scoring) -> Result<DataFrame> {
        let df = self
            .0
            .lazy()
            .with_column(scoring_cols(scoring).alias("MVP_Score"))
            .sort(
                ["MVP_Score"],
                SortMultipleOptions::default()
                    .with_order_descending(true)
                    .with_nulls_last(true)
                    .with_maintain_order(true),
            )
            .collect()?;
        Ok(df)
    }
}

fn scoring_cols(scoring: Scoring) -> Expr {
    numeric("PTS") * lit(scoring.pts_weight)
        + numeric("Win_Pct") * lit(scoring.win_pct_weight)
        + numeric("PER") * lit(scoring.per_weight)
        + numeric("WS") * lit(scoring.ws_weight)
        + numeric("VORP") * lit(scoring.vorp_weight)
        + numeric("BPM") * lit(scoring.bpm_weight)
}

fn numeric(name: &str) -> Expr {
    col(name).strict_cast(DataType::Float64)
}
