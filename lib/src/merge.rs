use crate::scoring::MvpCandidatesDf;
use crate::Result;
use polars::prelude::*;

/// Locates the team-identity column of a standings table.
///
/// The source site names it inconsistently across layouts ("Team",
/// "Eastern Conference", ...), so the match is an ordered list of
/// case-insensitive substring predicates that can be swapped out when
/// the layout drifts again.
pub struct TeamColumnMatcher {
    needles: Vec<String>,
}

impl Default for TeamColumnMatcher {
    fn default() -> Self {
        Self::new(["team", "eastern", "western"])
    }
}

impl TeamColumnMatcher {
    pub fn new<I, S>(needles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            needles: needles.into_iter().map(Into::into).collect(),
        }
    }

    pub fn locate(&self, df: &DataFrame) -> Option<String> {
        df.get_column_names().iter().find_map(|name| {
            let lower = name.to_lowercase();
            self.needles
                .iter()
                .any(|needle| lower.contains(needle))
                .then(|| name.to_string())
        })
    }
}

/// Merges the three season tables into one row-per-player-stint set.
///
/// Left-outer semantics throughout: every surviving per-game row is in
/// the output, whether or not it found an advanced-stats or standings
/// match. Advanced stats absent as a whole are replaced by degraded
/// placeholders; a missing standings match falls back to a 0.5 win
/// percentage. Structural failures (a column the tables are supposed
/// to carry being absent, a value refusing to parse) propagate.
pub fn merge_sources(
    per_game: DataFrame,
    advanced: Option<DataFrame>,
    standings: Vec<DataFrame>,
    matcher: &TeamColumnMatcher,
) -> Result<MvpCandidatesDf> {
    let df = filter_header_rows(per_game)?
        .lazy()
        .filter(col("Player").is_not_null().and(col("Player").neq(lit(""))))
        .collect()?;
    log::debug!("{} per-game rows after header/blank filtering", df.height());

    let df = match advanced {
        Some(advanced) => {
            let advanced = filter_header_rows(advanced)?
                .lazy()
                .select([cols(["Player", "PER", "WS", "BPM", "VORP"])])
                .collect()?;
            let join_args =
                JoinArgs::new(JoinType::Left).with_coalesce(JoinCoalesce::CoalesceColumns);
            df.join(&advanced, ["Player"], ["Player"], join_args)?
        }
        None => {
            log::warn!("advanced stats unavailable; fabricating placeholder metrics");
            df.lazy()
                .with_columns([
                    (col("PTS").strict_cast(DataType::Float64) / lit(30.0)).alias("PER"),
                    lit(0.0).alias("WS"),
                    lit(0.0).alias("BPM"),
                    lit(0.0).alias("VORP"),
                ])
                .collect()?
        }
    };

    let df = match standings_win_pct(standings, matcher)? {
        Some((team_col, win_pct)) => {
            let join_args =
                JoinArgs::new(JoinType::Left).with_coalesce(JoinCoalesce::CoalesceColumns);
            df.join(&win_pct, ["Tm"], [team_col.as_str()], join_args)?
        }
        None => df.lazy().with_column(lit(0.5).alias("Win_Pct")).collect()?,
    };

    // Rows whose team had no standings match still need a number here.
    let df = df
        .lazy()
        .with_column(col("Win_Pct").fill_null(lit(0.5)))
        .collect()?;

    log::debug!("{} merged candidate rows", df.height());
    Ok(MvpCandidatesDf::new(df))
}

/// Concatenates the standings groupings and reduces them to a
/// team-name/win-percentage lookup. `None` means standings are
/// unusable (no tables, or no recognizable team column) and the
/// caller should fall back to default win percentages.
fn standings_win_pct(
    standings: Vec<DataFrame>,
    matcher: &TeamColumnMatcher,
) -> Result<Option<(String, DataFrame)>> {
    if standings.is_empty() {
        return Ok(None);
    }

    let frames: Vec<LazyFrame> = standings.into_iter().map(DataFrame::lazy).collect();
    let combined = concat_lf_diagonal(frames, UnionArgs::default())?.collect()?;

    let Some(team_col) = matcher.locate(&combined) else {
        log::warn!("could not find a team column in standings; using default win percentages");
        return Ok(None);
    };
    log::debug!("standings team column: '{team_col}'");

    let wins = col("W").strict_cast(DataType::Float64);
    let losses = col("L").strict_cast(DataType::Float64);
    let win_pct = combined
        .lazy()
        // Playoff teams are decorated with a trailing asterisk.
        .with_column(
            col(&team_col)
                .str()
                .replace_all(lit("*"), lit(""), true)
                .str()
                .strip_chars(lit(NULL))
                .alias(&team_col),
        )
        .with_column((wins.clone() / (wins + losses)).alias("Win_Pct"))
        .select([col(&team_col), col("Win_Pct")])
        .collect()?;

    Ok(Some((team_col, win_pct)))
}

// The source tables repeat their header row mid-body; those rows come
// through with "Rk" in the rank column.
fn filter_header_rows(df: DataFrame) -> Result<DataFrame> {
    let df = df.lazy().filter(col("Rk").neq(lit("Rk"))).collect()?;
    Ok(df)
}
