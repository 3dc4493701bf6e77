//! Deadline report parser

use super::text::{all, cells, href, selector, table_rows, text_of};
use super::Parser;
use crate::domain::{LegTrackError, Measure, MeasureType, Result};
use regex::Regex;
use scraper::{ElementRef, Html};

const TABLE: &str = "table#GridViewReports";
const ARCHIVE_URL: &str = r"\.aspx\?billtype=(\w+)&billnumber=(\d+)&year=(\d+)$";

/// Parses the measure rows of a deadline report
///
/// Row layout: pdf link, code link with title spans, status, introducer, current
/// referral, companion.
pub struct MeasureParser {
    archive_url: Regex,
}

impl MeasureParser {
    /// # Errors
    ///
    /// Returns a parse error if the URL pattern fails to compile.
    pub fn new() -> Result<Self> {
        Ok(Self {
            archive_url: Regex::new(ARCHIVE_URL)
                .map_err(|e| LegTrackError::Parse(e.to_string()))?,
        })
    }

    fn key_from_url(&self, url: &str) -> Option<(i32, MeasureType, i32)> {
        let caps = self.archive_url.captures(url)?;
        let measure_type = MeasureType::from_code(&caps[1]);
        let number = caps[2].parse().ok()?;
        let year = caps[3].parse().ok()?;
        Some((year, measure_type, number))
    }

    fn parse_row(&self, tr: ElementRef<'_>) -> Result<Option<Measure>> {
        let tds = cells(tr);
        if tds.len() < 6 {
            return Ok(None);
        }

        let link_sel = selector("a")?;
        let span_sel = selector("font > span")?;

        let pdf_url = all(tds[0], &link_sel).first().map(|a| href(*a)).unwrap_or_default();
        let Some(code_link) = all(tds[1], &link_sel).first().copied() else {
            return Ok(None);
        };
        let archive_url = href(code_link);
        let Some((year, measure_type, number)) = self.key_from_url(&archive_url) else {
            tracing::warn!(url = %archive_url, "Dropping measure row without a derivable key");
            return Ok(None);
        };

        let spans = all(tds[1], &span_sel);
        let span_text = |i: usize| spans.get(i).map(|s| text_of(*s)).unwrap_or_default();

        Ok(Some(Measure {
            code: text_of(code_link),
            report_title: span_text(0),
            bit_appropriation: span_text(1).contains('$'),
            measure_title: span_text(2),
            description: span_text(3),
            measure_pdf_url: pdf_url,
            measure_archive_url: archive_url,
            status: text_of(tds[2]),
            introducer: text_of(tds[3]),
            current_referral: text_of(tds[4]),
            companion: text_of(tds[5]),
            ..Measure::new(year, measure_type, number)
        }))
    }
}

impl Parser<Measure> for MeasureParser {
    fn parse_all(&self, html: &str) -> Result<Vec<Measure>> {
        let document = Html::parse_document(html);
        let mut measures = Vec::new();
        for tr in table_rows(&document, TABLE)? {
            if let Some(measure) = self.parse_row(tr)? {
                measures.push(measure);
            }
        }
        Ok(measures)
    }
}
