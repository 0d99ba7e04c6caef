use crate::Result;
use itertools::{EitherOrBoth, Itertools};
use once_cell::sync::Lazy;
use polars::prelude::*;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;

static TABLE: Lazy<Selector> = Lazy::new(|| Selector::parse("table").unwrap());
static TR: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").unwrap());
static THEAD_TR: Lazy<Selector> = Lazy::new(|| Selector::parse("thead tr").unwrap());
static CELL: Lazy<Selector> = Lazy::new(|| Selector::parse("th, td").unwrap());

/// Ids of every `<table>` on the page. Used to report what was
/// actually there when a sought table is missing.
pub fn list_table_ids(doc: &Html) -> Vec<String> {
    doc.select(&TABLE)
        .filter_map(|table| table.value().attr("id"))
        .map(str::to_string)
        .collect()
}

/// First `<table>` whose id attribute matches exactly.
pub fn find_table<'a>(doc: &'a Html, table_id: &str) -> Option<ElementRef<'a>> {
    doc.select(&TABLE)
        .find(|table| table.value().attr("id") == Some(table_id))
}

/// Tries the candidate ids in priority order and converts the first
/// match. A total miss is not an error: the available ids are logged
/// for diagnostics and the caller decides whether `None` is fatal.
pub fn extract_table(doc: &Html, candidate_ids: &[&str]) -> Result<Option<DataFrame>> {
    for id in candidate_ids {
        if let Some(table) = find_table(doc, id) {
            let df = table_to_dataframe(table)?;
            log::debug!("located table '{}' ({} rows)", id, df.height());
            return Ok(Some(df));
        }
        log::debug!("no table with id '{}'", id);
    }
    log::warn!(
        "no table matched any of [{}]; available table ids: [{}]",
        candidate_ids.join(", "),
        list_table_ids(doc).join(", ")
    );
    Ok(None)
}

/// Reads a `<table>` element into a DataFrame of string columns.
///
/// The header comes from the last `<thead>` row (or the first row when
/// there is no `<thead>`); every remaining row becomes a data row.
/// Repeated header rows embedded mid-body are kept as data and left for
/// the merge step to filter, matching how the source site emits them.
pub fn table_to_dataframe(table: ElementRef) -> Result<DataFrame> {
    let (header_row, header_from_thead) = match table.select(&THEAD_TR).last() {
        Some(row) => (Some(row), true),
        None => (table.select(&TR).next(), false),
    };
    let Some(header_row) = header_row else {
        return Ok(DataFrame::empty());
    };
    let headers = dedupe_names(header_row.select(&CELL).map(cell_text).collect());

    let body = table.select(&TR).filter(|row| !in_thead(row));
    let body: Vec<ElementRef> = if header_from_thead {
        body.collect()
    } else {
        body.skip(1).collect()
    };

    // Ragged rows are padded with nulls and over-long rows truncated
    // to the header width.
    let mut columns: Vec<Vec<Option<String>>> = vec![Vec::with_capacity(body.len()); headers.len()];
    for row in body {
        let cells: Vec<String> = row.select(&CELL).map(cell_text).collect();
        for pair in columns.iter_mut().zip_longest(cells) {
            match pair {
                EitherOrBoth::Both(column, cell) => column.push(Some(cell)),
                EitherOrBoth::Left(column) => column.push(None),
                EitherOrBoth::Right(_) => {}
            }
        }
    }

    let series: Vec<Series> = headers
        .iter()
        .zip(columns)
        .map(|(name, values)| Series::new(name, values))
        .collect();
    let df = DataFrame::new(series)?;
    Ok(df)
}

fn cell_text(cell: ElementRef) -> String {
    cell.text().collect::<String>().trim().to_string()
}

fn in_thead(row: &ElementRef) -> bool {
    row.parent()
        .and_then(|parent| parent.value().as_element().map(|el| el.name() == "thead"))
        .unwrap_or(false)
}

// Duplicate header names would be rejected by DataFrame::new, so
// repeats get a numeric suffix.
fn dedupe_names(raw: Vec<String>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    raw.into_iter()
        .map(|name| {
            let count = seen.entry(name.clone()).or_insert(0);
            *count += 1;
            if *count == 1 {
                name
            } else {
                format!("{name}_{count}")
            }
        })
        .collect()
}
