//! Helpers shared by the page parsers

use crate::domain::{LegTrackError, Result};
use scraper::{ElementRef, Html, Selector};

/// Normalizes scraped text: newlines become spaces, runs of spaces collapse to one
pub fn clean(text: &str) -> String {
    let flattened = text.replace('\n', " ");
    let mut out = String::with_capacity(flattened.len());
    let mut last_space = false;
    for c in flattened.trim().chars() {
        if c == ' ' {
            if !last_space {
                out.push(c);
            }
            last_space = true;
        } else {
            out.push(c);
            last_space = false;
        }
    }
    out
}

/// Cleaned text content of `element` and its descendants
pub fn text_of(element: ElementRef<'_>) -> String {
    clean(&element.text().collect::<String>())
}

pub fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|e| LegTrackError::Parse(format!("Invalid selector '{css}': {e:?}")))
}

/// Data rows of the table matching `table_css`, skipping header rows
///
/// # Errors
///
/// Returns a parse error if the page has no such table.
pub fn table_rows<'a>(document: &'a Html, table_css: &str) -> Result<Vec<ElementRef<'a>>> {
    let table_sel = selector(table_css)?;
    let row_sel = selector("tr")?;
    let header_sel = selector("th")?;

    let table = document
        .select(&table_sel)
        .next()
        .ok_or_else(|| LegTrackError::Parse(format!("Table '{table_css}' not found in page")))?;

    Ok(table
        .select(&row_sel)
        .filter(|tr| tr.select(&header_sel).next().is_none())
        .collect())
}

/// Direct `td` children of a row, in order
pub fn cells<'a>(tr: ElementRef<'a>) -> Vec<ElementRef<'a>> {
    tr.children()
        .filter_map(ElementRef::wrap)
        .filter(|e| e.value().name() == "td")
        .collect()
}

/// Elements under `scope` matching `sel`, in document order
pub fn all<'a>(scope: ElementRef<'a>, sel: &Selector) -> Vec<ElementRef<'a>> {
    scope.select(sel).collect()
}

pub fn href(element: ElementRef<'_>) -> String {
    element
        .value()
        .attr("href")
        .map(clean)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean() {
        assert_eq!(clean("\n   ( S )\n  3/13/2020 -  STATUS.\n"), "( S ) 3/13/2020 - STATUS.");
        assert_eq!(clean("\u{a0}\n COMPANION "), "COMPANION");
        assert_eq!(clean(""), "");
    }

    #[test]
    fn test_table_rows_skips_headers() {
        let html = Html::parse_document(
            "<table id=\"t\"><tr><th>H</th></tr><tr><td>a</td><td>b</td></tr></table>",
        );
        let rows = table_rows(&html, "table#t").unwrap();
        assert_eq!(rows.len(), 1);
        let tds = cells(rows[0]);
        assert_eq!(tds.len(), 2);
        assert_eq!(text_of(tds[1]), "b");
    }

    #[test]
    fn test_missing_table_is_parse_error() {
        let html = Html::parse_document("<p>maintenance</p>");
        let err = table_rows(&html, "table#t").unwrap_err();
        assert!(matches!(err, LegTrackError::Parse(_)));
    }
}
