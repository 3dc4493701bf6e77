//! Per data type bindings of stores and parsers

use crate::adapters::database::traits::{LocalStore, RemoteStore};
use crate::adapters::html::Parser;
use crate::adapters::http::{Fetcher, SourceUrls};
use crate::adapters::sqlite::SqliteClient;
use crate::core::detect::ChangeDetector;
use crate::core::forward::Forwarder;
use crate::core::scrape::ScrapeRunner;
use crate::domain::{Hearing, Measure, Record, Result, SpecialSessionMeasure};
use std::sync::Arc;

/// Collaborators of one record kind
pub struct Binding<R: Record> {
    pub local: Arc<dyn LocalStore<R>>,
    pub remote: Arc<dyn RemoteStore<R>>,
    pub parser: Arc<dyn Parser<R>>,
}

impl<R: Record> Binding<R> {
    pub fn new(
        local: Arc<dyn LocalStore<R>>,
        remote: Arc<dyn RemoteStore<R>>,
        parser: Arc<dyn Parser<R>>,
    ) -> Self {
        Self {
            local,
            remote,
            parser,
        }
    }
}

/// One binding per data type
pub struct BindingTable {
    pub measures: Binding<Measure>,
    pub hearings: Binding<Hearing>,
    pub special_sessions: Binding<SpecialSessionMeasure>,
}

/// Shared pieces every lane is built from
pub(super) struct LaneContext<'a> {
    pub client: &'a SqliteClient,
    pub fetcher: &'a Arc<dyn Fetcher>,
    pub detector: &'a ChangeDetector,
    pub urls: &'a SourceUrls,
    pub max_records_per_push: usize,
}

/// Scrape runner, forwarder and local store of one record kind
pub(super) struct Lane<R: Record> {
    pub runner: ScrapeRunner<R>,
    pub forwarder: Forwarder<R>,
    pub local: Arc<dyn LocalStore<R>>,
}

impl<R: Record> Lane<R> {
    pub fn build(binding: Binding<R>, context: &LaneContext<'_>) -> Result<Self> {
        let runner = ScrapeRunner::new(
            context.client.clone(),
            Arc::clone(context.fetcher),
            binding.parser,
            Arc::clone(&binding.local),
            context.detector.clone(),
            context.urls.clone(),
        );
        let forwarder = Forwarder::new(
            context.client.clone(),
            Arc::clone(&binding.local),
            binding.remote,
            context.max_records_per_push,
        )?;
        Ok(Self {
            runner,
            forwarder,
            local: binding.local,
        })
    }
}
