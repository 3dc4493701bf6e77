//! Special session listing parser

use super::text::{all, cells, href, selector, table_rows, text_of};
use super::Parser;
use crate::domain::{LegTrackError, MeasureType, Result, SessionId, SpecialSessionMeasure};
use regex::Regex;
use scraper::{ElementRef, Html};
use url::Url;

const TABLE: &str = "table#ctl00_ContentPlaceHolderCol1_GridViewReports";
const MEASURE_URL: &str = r"aspx\?billtype=(\w+)&billnumber=(\d+)&year=(\d+)(\w)$";

/// Parses the measure rows of a special session listing
///
/// Measure links on this page are site-relative and are resolved against `base_url`.
pub struct SpecialSessionParser {
    measure_url: Regex,
    base_url: Url,
}

impl SpecialSessionParser {
    /// # Errors
    ///
    /// Returns a configuration error if `base_url` is not an absolute URL.
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| {
            LegTrackError::Configuration(format!("Invalid source base URL '{base_url}': {e}"))
        })?;
        Ok(Self {
            measure_url: Regex::new(MEASURE_URL).map_err(|e| LegTrackError::Parse(e.to_string()))?,
            base_url,
        })
    }

    fn parse_row(&self, tr: ElementRef<'_>) -> Result<Option<SpecialSessionMeasure>> {
        let tds = cells(tr);
        if tds.len() < 4 {
            return Ok(None);
        }

        let link_sel = selector("a")?;
        let span_sel = selector("span")?;

        let pdf_url = all(tds[0], &link_sel).first().map(|a| href(*a)).unwrap_or_default();
        let Some(code_link) = all(tds[1], &link_sel).first().copied() else {
            return Ok(None);
        };
        let relative_url = href(code_link);

        let Some(caps) = self.measure_url.captures(&relative_url) else {
            tracing::warn!(url = %relative_url, "Dropping special session row without a derivable key");
            return Ok(None);
        };
        let measure_type = MeasureType::from_code(&caps[1]);
        let (Ok(number), Ok(year)) = (caps[2].parse::<i32>(), caps[3].parse::<i32>()) else {
            return Ok(None);
        };
        let Ok(session) = caps[4].parse::<SessionId>() else {
            tracing::warn!(url = %relative_url, "Dropping special session row with unknown session");
            return Ok(None);
        };

        let archive_url = self
            .base_url
            .join(&relative_url)
            .map(String::from)
            .unwrap_or(relative_url);

        let titles = all(tds[2], &span_sel);
        let title = |i: usize| titles.get(i).map(|s| text_of(*s)).unwrap_or_default();

        Ok(Some(SpecialSessionMeasure {
            code: text_of(code_link),
            measure_pdf_url: pdf_url,
            measure_archive_url: archive_url,
            report_title: title(0),
            measure_title: title(1),
            current_referral: all(tds[3], &span_sel)
                .first()
                .map(|s| text_of(*s))
                .unwrap_or_default(),
            ..SpecialSessionMeasure::new(year, session, measure_type, number)
        }))
    }
}

impl Parser<SpecialSessionMeasure> for SpecialSessionParser {
    fn parse_all(&self, html: &str) -> Result<Vec<SpecialSessionMeasure>> {
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

#[cfg(test)]
mod tests {
    use super::*;

    const ROW: &str = r##"<tr>
		<td width="25">
      <font face="Tahoma" color="#3A5078">
        <a id="ctl00_ContentPlaceHolderCol1_GridViewReports_ctl04_HyperLink2" href="http://www.capitol.hawaii.gov/aaaa/AAA.pdf" target="_blank">
          <img src="Images/pdf_icon.gif" alt border="0">
        </a>
      </font>
    </td>
    <td>
      <font face="Tahoma" color="Red">
        <a id="ctl00_ContentPlaceHolderCol1_GridViewReports_ctl04_reportsStatusLink" href="/bbbb.aspx?billtype=SR&amp;billnumber=3&amp;year=2017a" target="_blank">
          <b><font color="Blue">CODE</font></b>
        </a>
      </font>
     </td>
     <td>
       <font face="Tahoma" color="#3A5078"><br>
         <span id="ctl00_ContentPlaceHolderCol1_GridViewReports_ctl04_Label1">
           <u><font size="2">REPORT TITLE</font></u>
         </span><br>
         <span id="ctl00_ContentPlaceHolderCol1_GridViewReports_ctl04_Label7">
           <font size="1">MEASURE TITLE</font>
         </span><br>
       </font>
      </td>
      <td>
        <font face="Tahoma" color="#3A5078">
          <span id="ctl00_ContentPlaceHolderCol1_GridViewReports_ctl04_Label9">
            <font size="1">REFERRAL</font></span>
          </font>
      </td>
    </tr>"##;

    fn page(rows: &str) -> String {
        format!(
            "<html><body><table id=\"ctl00_ContentPlaceHolderCol1_GridViewReports\">\
             <tr><th>Measure</th></tr>{rows}</table></body></html>"
        )
    }

    #[test]
    fn test_parse_special_session_row() {
        let parser = SpecialSessionParser::new("http://www.capitol.hawaii.gov").unwrap();
        let measures = parser.parse_all(&page(ROW)).unwrap();
        assert_eq!(measures.len(), 1);

        let m = &measures[0];
        assert_eq!(m.year, 2017);
        assert_eq!(m.session, SessionId::new('a').unwrap());
        assert_eq!(m.measure_type, MeasureType::Sr);
        assert_eq!(m.measure_number, 3);
        assert_eq!(m.code, "CODE");
        assert_eq!(m.measure_pdf_url, "http://www.capitol.hawaii.gov/aaaa/AAA.pdf");
        assert_eq!(
            m.measure_archive_url,
            "http://www.capitol.hawaii.gov/bbbb.aspx?billtype=SR&billnumber=3&year=2017a"
        );
        assert_eq!(m.report_title, "REPORT TITLE");
        assert_eq!(m.measure_title, "MEASURE TITLE");
        assert_eq!(m.current_referral, "REFERRAL");
    }

    #[test]
    fn test_unknown_session_drops_row() {
        let parser = SpecialSessionParser::new("http://www.capitol.hawaii.gov").unwrap();
        let row = ROW.replace("year=2017a", "year=2017c");
        assert!(parser.parse_all(&page(&row)).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(SpecialSessionParser::new("not a url").is_err());
    }
}
