// src/pipeline/extract.rs

//! Page extraction stage.
//!
//! Navigates to the target page, waits for the content table to render, and
//! extracts header and row cell text from an HTML snapshot of the live DOM.
//! The browser does the rendering; `scraper` does the parsing.

use std::time::Duration;

use chromiumoxide::browser::Browser;
use chromiumoxide::page::Page;
use scraper::{ElementRef, Html, Selector};
use tokio::time::Instant;
use tracing::{debug, info};

use crate::config::ScrapeConfig;
use crate::error::ScrapeError;
use crate::models::Extraction;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Navigate to the configured URL and extract the target table.
///
/// Failure reasons stay distinguishable through [`ScrapeError`]; all of them
/// are fatal to the run and none are retried at this layer.
pub async fn extract_table(
    browser: &Browser,
    config: &ScrapeConfig,
) -> Result<Extraction, ScrapeError> {
    // Reject a broken selector before paying for navigation.
    parse_selector(&config.table_selector)?;

    let page = browser
        .new_page(config.data_url.as_str())
        .await
        .map_err(ScrapeError::cdp)?;

    let timeout = Duration::from_secs(config.wait_timeout_secs);
    wait_for_element(&page, &config.table_selector, timeout).await?;

    let html = page.content().await.map_err(ScrapeError::cdp)?;

    // The session teardown closes all pages; this just frees the tab early.
    if let Err(e) = page.close().await {
        debug!("Failed to close page: {e}");
    }

    let extraction = match parse_table(&html, &config.table_selector, config.max_rows) {
        // The wait saw the table, the snapshot does not have it: the DOM
        // changed underneath us.
        Err(ScrapeError::TableNotFound { .. }) => Err(ScrapeError::Stale),
        other => other,
    }?;

    info!(
        columns = extraction.header.len(),
        rows = extraction.row_count(),
        "Extracted table from {}",
        config.data_url
    );
    Ok(extraction)
}

/// Poll until an element matching `selector` is present, up to `timeout`.
async fn wait_for_element(
    page: &Page,
    selector: &str,
    timeout: Duration,
) -> Result<(), ScrapeError> {
    let deadline = Instant::now() + timeout;
    loop {
        // find_element reports missing nodes and transport failures the same
        // way; both read as not-ready until the deadline decides.
        if page.find_element(selector).await.is_ok() {
            return Ok(());
        }
        if Instant::now() >= deadline {
            return Err(ScrapeError::Timeout {
                selector: selector.to_string(),
                waited: timeout,
            });
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
}

/// Extract header and capped rows from an HTML document.
///
/// Header cells come from `thead th`, rows from `tbody tr` / `td`, all in
/// document order with each cell's text trimmed. Extraction stops once
/// `max_rows` rows have been collected.
pub fn parse_table(
    html: &str,
    table_selector: &str,
    max_rows: usize,
) -> Result<Extraction, ScrapeError> {
    let table_sel = parse_selector(table_selector)?;
    let header_sel = parse_selector("thead th")?;
    let row_sel = parse_selector("tbody tr")?;
    let cell_sel = parse_selector("td")?;

    let document = Html::parse_document(html);
    let table = document
        .select(&table_sel)
        .next()
        .ok_or_else(|| ScrapeError::TableNotFound {
            selector: table_selector.to_string(),
        })?;

    let header: Vec<String> = table.select(&header_sel).map(cell_text).collect();
    if header.is_empty() {
        return Err(ScrapeError::EmptyHeader);
    }

    let mut rows = Vec::new();
    for tr in table.select(&row_sel) {
        if rows.len() >= max_rows {
            break;
        }
        rows.push(tr.select(&cell_sel).map(cell_text).collect());
    }
    if rows.is_empty() {
        return Err(ScrapeError::NoRows);
    }

    Ok(Extraction { header, rows })
}

fn cell_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn parse_selector(s: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(s).map_err(|e| ScrapeError::selector(s, format!("{e:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r##"
        <html><body>
        <table class="wpr-table">
          <thead>
            <tr><th> Rank </th><th><a href="#">City</a></th><th>Population</th></tr>
          </thead>
          <tbody>
            <tr><td>1</td><td>
                Los Angeles
            </td><td>3,898,747</td></tr>
            <tr><td>2</td><td>San Diego</td><td>1,386,932</td></tr>
            <tr><td>3</td><td>San Jose</td><td>1,013,240</td></tr>
          </tbody>
        </table>
        </body></html>
    "##;

    #[test]
    fn test_parse_table_extracts_trimmed_cells() {
        let extraction = parse_table(PAGE, "table.wpr-table", 100).unwrap();
        assert_eq!(extraction.header, vec!["Rank", "City", "Population"]);
        assert_eq!(extraction.rows.len(), 3);
        assert_eq!(
            extraction.rows[0],
            vec!["1", "Los Angeles", "3,898,747"]
        );
    }

    #[test]
    fn test_parse_table_caps_rows() {
        let extraction = parse_table(PAGE, "table.wpr-table", 2).unwrap();
        assert_eq!(extraction.rows.len(), 2);
        assert_eq!(extraction.rows[1][1], "San Diego");
    }

    #[test]
    fn test_parse_table_missing_table() {
        let err = parse_table("<html><body><p>nope</p></body></html>", "table.wpr-table", 10)
            .unwrap_err();
        assert!(matches!(err, ScrapeError::TableNotFound { .. }));
    }

    #[test]
    fn test_parse_table_empty_header() {
        let html = r#"
            <table class="wpr-table">
              <tbody><tr><td>1</td></tr></tbody>
            </table>
        "#;
        let err = parse_table(html, "table.wpr-table", 10).unwrap_err();
        assert!(matches!(err, ScrapeError::EmptyHeader));
    }

    #[test]
    fn test_parse_table_no_rows() {
        let html = r#"
            <table class="wpr-table">
              <thead><tr><th>Rank</th></tr></thead>
              <tbody></tbody>
            </table>
        "#;
        let err = parse_table(html, "table.wpr-table", 10).unwrap_err();
        assert!(matches!(err, ScrapeError::NoRows));
    }

    #[test]
    fn test_parse_table_invalid_selector() {
        let err = parse_table(PAGE, "[[invalid", 10).unwrap_err();
        assert!(matches!(err, ScrapeError::Selector { .. }));
    }

    #[test]
    fn test_parse_table_is_idempotent() {
        let first = parse_table(PAGE, "table.wpr-table", 100).unwrap();
        let second = parse_table(PAGE, "table.wpr-table", 100).unwrap();
        assert_eq!(first, second);
    }
}
