use crate::table::extract_table;
use crate::Result;
use once_cell::sync::OnceCell;
use polars::prelude::DataFrame;
use reqwest::blocking::Client;
use scraper::Html;
use std::time::Duration;

const REQUEST_TIMEOUT_SECS: u64 = 10;

// The stats site rejects unidentified clients, so present a browser UA.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

static CLIENT: OnceCell<Client> = OnceCell::new();

fn http_client() -> Result<&'static Client> {
    CLIENT.get_or_try_init(|| {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(client)
    })
}

/// Single GET of `url`, failing on connection errors or an error
/// status, parsed into a navigable document tree.
pub fn fetch_document(url: &str) -> Result<Html> {
    log::debug!("GET {url}");
    let body = http_client()?
        .get(url)
        .send()?
        .error_for_status()?
        .text()?;
    Ok(Html::parse_document(&body))
}

/// Fetches `url` and extracts the first table matching any of
/// `candidate_ids` (in priority order). `Ok(None)` means the page
/// loaded but no candidate matched; only transport/status failures
/// are errors.
pub fn fetch_table(url: &str, candidate_ids: &[&str]) -> Result<Option<DataFrame>> {
    let doc = fetch_document(url)?;
    extract_table(&doc, candidate_ids)
}
