use crate::fetch::{fetch_document, fetch_table};
use crate::merge::{merge_sources, TeamColumnMatcher};
use crate::table::{find_table, list_table_ids, table_to_dataframe};
use crate::{DedupeMode, Error, Result, Scoring, OUTPUT_COLUMNS};
use polars::prelude::*;
use std::thread;
use std::time::Duration;

pub const DEFAULT_SEASON: u16 = 2023;

const BASE_URL: &str = "https://www.basketball-reference.com";
const PACING_DELAY: Duration = Duration::from_secs(1);

const PER_GAME_TABLE_IDS: [&str; 1] = ["per_game_stats"];
const ADVANCED_TABLE_IDS: [&str; 2] = ["advanced_stats", "advanced"];
const STANDINGS_TABLE_IDS: [&str; 3] =
    ["divs_standings_E", "divs_standings_W", "confs_standings_E"];

/// The three season endpoints, templated over a base host so tests can
/// point somewhere local.
pub struct SeasonUrls {
    base: String,
}

impl Default for SeasonUrls {
    fn default() -> Self {
        Self::new(BASE_URL)
    }
}

impl SeasonUrls {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    pub fn per_game(&self, year: u16) -> String {
        format!("{}/leagues/NBA_{}_per_game.html", self.base, year)
    }

    pub fn advanced(&self, year: u16) -> String {
        format!("{}/leagues/NBA_{}_advanced.html", self.base, year)
    }

    pub fn standings(&self, year: u16) -> String {
        format!("{}/leagues/NBA_{}.html", self.base, year)
    }
}

/// Fetches, merges and scores one season against the live site.
pub fn get_season_data(year: u16, dedupe: DedupeMode) -> Result<DataFrame> {
    get_season_data_from(&SeasonUrls::default(), year, dedupe)
}

/// Pipeline driver: three sequential fetches, merge, score, column
/// selection. The per-game table is required; a missing advanced or
/// standings table degrades to the merger's fallbacks instead of
/// aborting.
pub fn get_season_data_from(
    urls: &SeasonUrls,
    year: u16,
    dedupe: DedupeMode,
) -> Result<DataFrame> {
    log::info!("fetching regular season stats...");
    let per_game = fetch_table(&urls.per_game(year), &PER_GAME_TABLE_IDS)?.ok_or_else(|| {
        Error::RequiredTableMissing(PER_GAME_TABLE_IDS.iter().map(|id| id.to_string()).collect())
    })?;
    log::info!("retrieved regular season stats ({} rows)", per_game.height());

    // Courtesy pacing before hitting the site again.
    thread::sleep(PACING_DELAY);

    log::info!("fetching advanced stats...");
    let advanced = fetch_table(&urls.advanced(year), &ADVANCED_TABLE_IDS)?;

    log::info!("fetching team standings...");
    let standings_doc = fetch_document(&urls.standings(year))?;
    log::debug!(
        "standings page table ids: [{}]",
        list_table_ids(&standings_doc).join(", ")
    );
    let mut standings = Vec::new();
    for id in STANDINGS_TABLE_IDS {
        match find_table(&standings_doc, id) {
            Some(table) => match table_to_dataframe(table) {
                Ok(df) => standings.push(df),
                // A grouping that fails to convert is skipped, not fatal.
                Err(err) => log::warn!("error parsing standings table '{id}': {err}"),
            },
            None => log::debug!("no standings table with id '{id}'"),
        }
    }
    if standings.is_empty() {
        log::warn!("no standings tables found; using default win percentages");
    }

    let candidates =
        merge_sources(per_game, advanced, standings, &TeamColumnMatcher::default())?
            .dedupe(dedupe)?;

    log::info!("calculating MVP scores...");
    let scored = candidates.score(Scoring::default())?;
    let df = scored.lazy().select([cols(OUTPUT_COLUMNS)]).collect()?;
    Ok(df)
}
