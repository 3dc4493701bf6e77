//! Upcoming hearings parser

use super::text::{all, cells, clean, href, selector, table_rows, text_of};
use super::Parser;
use crate::domain::{Hearing, LegTrackError, MeasureType, Result};
use chrono::{Datelike, FixedOffset, NaiveDateTime};
use regex::Regex;
use scraper::{ElementRef, Html};

const TABLE: &str = "table#ctl00_ContentPlaceHolderCol1_GridView1";
const MEASURE_URL: &str = r"measure_indiv\.aspx\?billtype=(\w+)&billnumber=(\d+)$";
const DATETIME_FORMAT: &str = "%m/%d/%Y %I:%M %p";
const NO_HEARINGS: &str = "No Hearings";

/// Listed hearing times are local to the legislature (HST, no daylight saving)
const SOURCE_UTC_OFFSET_SECS: i32 = -10 * 3600;

/// Parses the upcoming hearings table
///
/// Row layout: committee, measure link with description, date and time, room,
/// notice link followed by the notice pdf link.
pub struct HearingParser {
    measure_url: Regex,
    offset: FixedOffset,
}

impl HearingParser {
    /// # Errors
    ///
    /// Returns a parse error if the URL pattern fails to compile.
    pub fn new() -> Result<Self> {
        let offset = FixedOffset::east_opt(SOURCE_UTC_OFFSET_SECS)
            .ok_or_else(|| LegTrackError::Parse("Invalid source UTC offset".to_string()))?;
        Ok(Self {
            measure_url: Regex::new(MEASURE_URL).map_err(|e| LegTrackError::Parse(e.to_string()))?,
            offset,
        })
    }

    /// Year and epoch milliseconds of a listed `M/D/YYYY h:mm AM` time
    fn when(&self, datetime: &str) -> Option<(i32, i64)> {
        let naive = NaiveDateTime::parse_from_str(datetime, DATETIME_FORMAT).ok()?;
        let local = naive.and_local_timezone(self.offset).single()?;
        Some((local.year(), local.timestamp_millis()))
    }

    fn parse_row(&self, tr: ElementRef<'_>) -> Result<Option<Hearing>> {
        let tds = cells(tr);
        if tds.is_empty() || text_of(tds[0]) == NO_HEARINGS {
            return Ok(None);
        }
        if tds.len() < 5 {
            tracing::warn!(cells = tds.len(), "Dropping short hearing row");
            return Ok(None);
        }

        let span_sel = selector("font > span")?;
        let link_sel = selector("font > a")?;
        let first_span = |td: ElementRef<'_>| {
            all(td, &span_sel)
                .first()
                .map(|s| text_of(*s))
                .unwrap_or_default()
        };

        let measure_link = all(tds[1], &link_sel).first().copied();
        let measure_relative_url = measure_link.map(href).unwrap_or_default();
        let Some(caps) = self.measure_url.captures(&measure_relative_url) else {
            tracing::warn!(url = %measure_relative_url, "Dropping hearing row without a derivable key");
            return Ok(None);
        };
        let measure_type = MeasureType::from_code(&caps[1]);
        let Ok(measure_number) = caps[2].parse::<i32>() else {
            return Ok(None);
        };

        let datetime = first_span(tds[2]);
        let Some((year, timestamp)) = self.when(&datetime) else {
            tracing::warn!(datetime = %datetime, "Dropping hearing row with an unreadable time");
            return Ok(None);
        };

        let notice_links = all(tds[4], &link_sel);
        let notice = notice_links
            .first()
            .map(|a| clean(&a.text().collect::<String>()))
            .unwrap_or_default();

        Ok(Some(Hearing {
            measure_relative_url,
            code: measure_link.map(text_of).unwrap_or_default(),
            committee: first_span(tds[0]),
            description: first_span(tds[1]),
            datetime,
            timestamp,
            room: first_span(tds[3]),
            notice_url: notice_links.first().map(|a| href(*a)).unwrap_or_default(),
            notice_pdf_url: notice_links.get(1).map(|a| href(*a)).unwrap_or_default(),
            ..Hearing::new(year, measure_type, measure_number, notice)
        }))
    }
}

impl Parser<Hearing> for HearingParser {
    fn parse_all(&self, html: &str) -> Result<Vec<Hearing>> {
        let document = Html::parse_document(html);
        let mut hearings = Vec::new();
        for tr in table_rows(&document, TABLE)? {
            if let Some(hearing) = self.parse_row(tr)? {
                hearings.push(hearing);
            }
        }
        Ok(hearings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROW: &str = r##"<tr>
  <td align="center">
      <font color="#124D79" size="1">
          <span id="ctl00_ContentPlaceHolderCol1_GridView1_ctl02_Label17"><b>
                  <font size="2">EEP</font>
              </b></span>
      </font>
  </td>
  <td>
      <font color="#124D79" size="1">
          <a id="ctl00_ContentPlaceHolderCol1_GridView1_ctl02_HyperLink" class="visited" href="https://www.capitol.hawaii.gov/measure_indiv.aspx?billtype=SB&amp;billnumber=2629"><b>
                  <font size="2">SB2629 SD2</font>
              </b></a>
          -
          <span id="ctl00_ContentPlaceHolderCol1_GridView1_ctl02_Label17">
              <font size="1">RELATING TO THE ENVIRONMENT.</font>
          </span>
      </font>
  </td>
  <td align="left" width="125">
      <font color="#124D79" size="2">
          <span id="ctl00_ContentPlaceHolderCol1_GridView1_ctl02_Label27">6/22/2020 9:30 AM</span>
      </font>
  </td>
  <td align="center">
      <font color="#124D79" size="2">
          <span id="ctl00_ContentPlaceHolderCol1_GridView1_ctl02_Label27">325</span>
      </font>
  </td>
  <td align="left" width="175">
      <font color="#124D79" size="3">
          <a id="ctl00_ContentPlaceHolderCol1_GridView1_ctl02_HyperLink2" class="visited" href="https://www.capitol.hawaii.gov/session2020/hearingnotices/HEARING_EEP_06-22-20_.HTM" target="_blank">HEARING_EEP_06-22-20</a>
          <a id="ctl00_ContentPlaceHolderCol1_GridView1_ctl02_HyperLink3" href="https://www.capitol.hawaii.gov/session2020/hearingnotices/HEARING_EEP_06-22-20_.pdf" target="_blank"><img src="Images/pdf_icon_small.gif" alt border="0"></a>
      </font>
  </td>
</tr>"##;

    const NO_HEARINGS_ROW: &str =
        r#"<tr><td colspan="5"><font size="2">No Hearings</font></td></tr>"#;

    fn page(rows: &str) -> String {
        format!(
            "<html><body><table id=\"ctl00_ContentPlaceHolderCol1_GridView1\">\
             <tr><th>Committee</th><th>Measure</th></tr>{rows}</table></body></html>"
        )
    }

    #[test]
    fn test_parse_hearing_row() {
        let parser = HearingParser::new().unwrap();
        let hearings = parser.parse_all(&page(ROW)).unwrap();
        assert_eq!(hearings.len(), 1);

        let h = &hearings[0];
        assert_eq!(h.year, 2020);
        assert_eq!(h.measure_type, MeasureType::Sb);
        assert_eq!(h.measure_number, 2629);
        assert_eq!(
            h.measure_relative_url,
            "https://www.capitol.hawaii.gov/measure_indiv.aspx?billtype=SB&billnumber=2629"
        );
        assert_eq!(h.committee, "EEP");
        assert_eq!(h.code, "SB2629 SD2");
        assert_eq!(h.description, "RELATING TO THE ENVIRONMENT.");
        assert_eq!(h.datetime, "6/22/2020 9:30 AM");
        assert_eq!(h.timestamp, 1_592_854_200_000);
        assert_eq!(h.room, "325");
        assert_eq!(h.notice, "HEARING_EEP_06-22-20");
        assert_eq!(
            h.notice_url,
            "https://www.capitol.hawaii.gov/session2020/hearingnotices/HEARING_EEP_06-22-20_.HTM"
        );
        assert_eq!(
            h.notice_pdf_url,
            "https://www.capitol.hawaii.gov/session2020/hearingnotices/HEARING_EEP_06-22-20_.pdf"
        );
    }

    #[test]
    fn test_no_hearings_row_is_skipped() {
        let parser = HearingParser::new().unwrap();
        assert!(parser.parse_all(&page(NO_HEARINGS_ROW)).unwrap().is_empty());
    }

    #[test]
    fn test_unreadable_time_drops_row() {
        let parser = HearingParser::new().unwrap();
        let row = ROW.replace("6/22/2020 9:30 AM", "TBA");
        assert!(parser.parse_all(&page(&row)).unwrap().is_empty());
    }

    #[test]
    fn test_afternoon_time() {
        let parser = HearingParser::new().unwrap();
        let (year, ts) = parser.when("12/31/2019 2:05 PM").unwrap();
        assert_eq!(year, 2019);
        // 2020-01-01T00:05:00Z
        assert_eq!(ts, 1_577_837_100_000);
    }
}
