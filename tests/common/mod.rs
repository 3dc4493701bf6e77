//! Shared fakes for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use legtrack::adapters::database::create_local_store;
use legtrack::adapters::database::traits::{LocalStore, PushReceipt, RemoteStore};
use legtrack::adapters::http::Fetcher;
use legtrack::adapters::sqlite::{SqliteClient, SqliteRecord};
use legtrack::domain::{FetchError, LegTrackError, Record, Result, StoreError};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Fresh local database inside `dir`
pub fn local_client(dir: &TempDir) -> SqliteClient {
    let client = SqliteClient::new(dir.path().join("legtrack.sqlite3"));
    client.ensure_schema().unwrap();
    client
}

pub fn local_store<R: SqliteRecord>(client: &SqliteClient) -> Arc<dyn LocalStore<R>> {
    create_local_store::<R>(client)
}

/// Remote store that records every call
pub struct FakeRemote<R> {
    calls: Mutex<Vec<Vec<R>>>,
    fail_on_call: Option<usize>,
    rows_per_record: u64,
}

impl<R: Record> FakeRemote<R> {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_on_call: None,
            rows_per_record: 1,
        }
    }

    /// Fails the `n`th call (0-based)
    pub fn failing_on(n: usize) -> Self {
        Self {
            fail_on_call: Some(n),
            ..Self::new()
        }
    }

    /// Reports fewer rows than records, like an upsert that found identical rows
    pub fn reporting_no_rows() -> Self {
        Self {
            rows_per_record: 0,
            ..Self::new()
        }
    }

    pub fn chunk_sizes(&self) -> Vec<usize> {
        self.calls.lock().unwrap().iter().map(Vec::len).collect()
    }

    pub fn pushed(&self) -> Vec<R> {
        self.calls.lock().unwrap().iter().flatten().cloned().collect()
    }
}

#[async_trait]
impl<R: Record> RemoteStore<R> for FakeRemote<R> {
    async fn push(&self, records: &[R]) -> Result<PushReceipt> {
        let mut calls = self.calls.lock().unwrap();
        if self.fail_on_call == Some(calls.len()) {
            calls.push(Vec::new());
            return Err(LegTrackError::Store(StoreError::Remote(
                "connection reset".to_string(),
            )));
        }
        calls.push(records.to_vec());
        Ok(PushReceipt {
            rows_affected: records.len() as u64 * self.rows_per_record,
        })
    }
}

/// Fetcher serving fixed pages by URL
#[derive(Default)]
pub struct FakeFetcher {
    pages: Mutex<HashMap<String, String>>,
    requests: Mutex<Vec<String>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn serve(&self, url: impl Into<String>, body: impl Into<String>) {
        self.pages.lock().unwrap().insert(url.into(), body.into());
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Fetcher for FakeFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        self.requests.lock().unwrap().push(url.to_string());
        self.pages
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| {
                LegTrackError::Fetch(FetchError::HttpStatus {
                    status: 404,
                    url: url.to_string(),
                })
            })
    }
}

/// Deadline report page with one row per `(type, number, title)`
pub fn measure_page(year: i32, rows: &[(&str, i32, &str)]) -> String {
    let rows: String = rows
        .iter()
        .map(|(code, number, title)| {
            format!(
                r#"<tr>
<td><a href="https://www.capitol.hawaii.gov/session{year}/bills/{code}{number}_.pdf">pdf</a></td>
<td><font>
  <a class="report" href="https://www.capitol.hawaii.gov/measure_indiv.aspx?billtype={code}&amp;billnumber={number}&amp;year={year}">{code}{number}</a>
  <span>REPORT TITLE</span>
  <span>(none)</span>
  <span>{title}</span>
  <span>DESCRIPTION</span>
</font></td>
<td><span>STATUS</span></td>
<td><span>INTRODUCERS</span></td>
<td><span>REFERRAL</span></td>
<td><span></span></td>
</tr>"#
            )
        })
        .collect();
    format!(
        "<html><body><table id=\"GridViewReports\"><tr><th>Measure</th></tr>{rows}</table></body></html>"
    )
}

/// Upcoming hearings page with one row per `(measure type, number, datetime, room)`
pub fn hearing_page(rows: &[(&str, i32, &str, &str)]) -> String {
    let rows: String = rows
        .iter()
        .map(|(code, number, datetime, room)| {
            format!(
                r#"<tr>
<td><font><span>FIN</span></font></td>
<td><font>
  <a href="https://www.capitol.hawaii.gov/measure_indiv.aspx?billtype={code}&amp;billnumber={number}">{code}{number}</a>
  - <span>RELATING TO TESTS.</span>
</font></td>
<td><font><span>{datetime}</span></font></td>
<td><font><span>{room}</span></font></td>
<td><font>
  <a href="https://www.capitol.hawaii.gov/hearingnotices/HEARING_FIN_{number}_.HTM">HEARING_FIN_{number}</a>
  <a href="https://www.capitol.hawaii.gov/hearingnotices/HEARING_FIN_{number}_.pdf">pdf</a>
</font></td>
</tr>"#
            )
        })
        .collect();
    format!(
        "<html><body><table id=\"ctl00_ContentPlaceHolderCol1_GridView1\">\
         <tr><th>Committee</th></tr>{rows}</table></body></html>"
    )
}
