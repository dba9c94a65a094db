//! Tournament listing acquisition.
//!
//! The listing is the first `<table>` on the events page. Its first body row
//! is a header; every other row is one tournament laid out as:
//!
//! | col | content          |
//! |-----|------------------|
//! | 1   | name             |
//! | 3   | start date       |
//! | 4   | end date         |
//! | 5   | city             |
//! | 6   | brochure `<a>`   |
//!
//! Column positions are a contract with the source site. A row that does not
//! fit it fails the whole acquisition rather than yielding a partial list.

use crate::{Error, Fetcher, Result, TournamentRecord};
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info};

const NAME_COL: usize = 1;
const START_COL: usize = 3;
const END_COL: usize = 4;
const CITY_COL: usize = 5;
const BROCHURE_COL: usize = 6;
const MIN_COLUMNS: usize = BROCHURE_COL + 1;

/// Placeholder the site uses for dates that are not fixed yet.
pub const TBD_MARKER: &str = "TBD";

const SOURCE_DATE_FORMAT: &str = "%d %m %Y";

/// Fetch the listing at `url` and parse it.
pub async fn fetch_tournaments<F>(fetcher: &F, url: &str) -> Result<Vec<TournamentRecord>>
where
    F: Fetcher + ?Sized,
{
    let html = fetcher.fetch(url).await?;
    debug!(bytes = html.len(), "Fetched tournament listing");
    let records = parse_tournaments(&html)?;
    info!("Acquired {} tournaments from {url}", records.len());
    Ok(records)
}

/// Parse a listing, resolving `TBD` dates to the current local time.
pub fn parse_tournaments(html: &str) -> Result<Vec<TournamentRecord>> {
    parse_tournaments_at(html, Local::now().naive_local())
}

/// Parse a listing with an explicit "now" for `TBD` dates.
pub fn parse_tournaments_at(html: &str, now: NaiveDateTime) -> Result<Vec<TournamentRecord>> {
    let document = Html::parse_document(html);
    let table_sel = selector("table")?;
    let body_sel = selector("tbody")?;
    let anchor_sel = selector("a[href]")?;

    let table = document
        .select(&table_sel)
        .next()
        .ok_or_else(|| Error::parse("no table found in tournament listing"))?;

    // html5ever wraps bare rows in a synthesized <tbody>, so a table with
    // rows always has one. No header row means the layout changed.
    let mut rows = table
        .select(&body_sel)
        .next()
        .into_iter()
        .flat_map(|body| child_elements(body, "tr"));
    if rows.next().is_none() {
        return Err(Error::parse("listing table has no header row"));
    }

    rows
        .enumerate()
        .map(|(index, row)| parse_row(index + 1, row, &anchor_sel, now))
        .collect()
}

fn parse_row(
    row_number: usize,
    row: ElementRef<'_>,
    anchor_sel: &Selector,
    now: NaiveDateTime,
) -> Result<TournamentRecord> {
    let cells: Vec<ElementRef<'_>> = child_elements(row, "td").collect();
    if cells.len() < MIN_COLUMNS {
        return Err(Error::parse(format!(
            "row {row_number} has {} columns, expected at least {MIN_COLUMNS}",
            cells.len()
        )));
    }

    let start_date = parse_date(&cell_text(cells[START_COL]), now)
        .map_err(|raw| bad_date(row_number, "start", &raw))?;
    let end_date = parse_date(&cell_text(cells[END_COL]), now)
        .map_err(|raw| bad_date(row_number, "end", &raw))?;

    let brochure = cells[BROCHURE_COL]
        .select(anchor_sel)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(str::to_string);

    Ok(TournamentRecord {
        name: cell_text(cells[NAME_COL]).trim().to_string(),
        start_date,
        end_date,
        city: cell_text(cells[CITY_COL]).trim().to_string(),
        brochure,
    })
}

/// Parse a date cell. On failure the normalized text is returned for the
/// error message.
fn parse_date(raw: &str, now: NaiveDateTime) -> std::result::Result<NaiveDateTime, String> {
    let text = normalize_date_text(raw);
    if text == TBD_MARKER {
        return Ok(now);
    }
    NaiveDate::parse_from_str(&text, SOURCE_DATE_FORMAT)
        .map(|date| date.and_time(NaiveTime::MIN))
        .map_err(|_| text)
}

/// `" 01-03-\n2025 "` becomes `"01 03 2025"`.
pub(crate) fn normalize_date_text(raw: &str) -> String {
    raw.trim()
        .replace(['\r', '\n'], "")
        .replace(['-', '/', '.'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn bad_date(row_number: usize, which: &str, text: &str) -> Error {
    Error::parse(format!(
        "row {row_number} has an unparseable {which} date: {text:?}"
    ))
}

fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().collect()
}

fn child_elements<'a>(
    parent: ElementRef<'a>,
    tag: &'static str,
) -> impl Iterator<Item = ElementRef<'a>> {
    parent
        .children()
        .filter_map(ElementRef::wrap)
        .filter(move |el| el.value().name() == tag)
}

pub(crate) fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| Error::parse(format!("invalid selector {css:?}: {e:?}")))
}
