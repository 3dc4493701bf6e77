//! Pipeline: every data type wired to its stores, parser, runner and forwarder
//!
//! The closed set of data types is resolved once, at construction, into one lane per
//! type. Scraping and forwarding are independent entry points meant to be triggered by
//! an external scheduler; at most one run per data type may be in flight.
//!
//! # Example
//!
//! ```rust,no_run
//! use legtrack::config::load_config;
//! use legtrack::core::pipeline::Pipeline;
//! use legtrack::domain::DataType;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("legtrack.toml")?;
//! let pipeline = Pipeline::from_config(&config)?;
//! pipeline.ensure_remote_schema().await?;
//!
//! let scraped = pipeline.scrape(&pipeline.measures_target(2024)).await?;
//! println!("scrape: {scraped}");
//!
//! let forwarded = pipeline.forward(DataType::Measure).await?;
//! println!("forward: {forwarded}");
//! # Ok(())
//! # }
//! ```

pub mod status;
pub mod table;

pub use status::{DataTypeStatus, StatusReport};
pub use table::{Binding, BindingTable};

use crate::adapters::database::{
    create_local_client, create_local_store, create_remote_client, create_remote_store,
};
use crate::adapters::html::{HearingParser, MeasureParser, SpecialSessionParser};
use crate::adapters::http::{Fetcher, HttpFetcher, SourceUrls};
use crate::adapters::postgresql::PostgresClient;
use crate::adapters::sqlite::SqliteClient;
use crate::config::LegTrackConfig;
use crate::core::detect::ChangeDetector;
use crate::core::forward::ForwardOutcome;
use crate::core::ledger::{PushJobLedger, ScrapeJobLedger};
use crate::core::scrape::{ScrapeOutcome, ScrapeTarget};
use crate::domain::{DataType, Hearing, Measure, MeasureType, Result, SpecialSessionMeasure};
use std::sync::Arc;
use table::{Lane, LaneContext};

pub struct Pipeline {
    client: SqliteClient,
    remote: Option<Arc<PostgresClient>>,
    measure_types: Vec<MeasureType>,
    measures: Lane<Measure>,
    hearings: Lane<Hearing>,
    special_sessions: Lane<SpecialSessionMeasure>,
}

impl Pipeline {
    /// Builds the pipeline from configuration
    ///
    /// The local database and its schema are created here. The remote pool connects
    /// lazily on the first push.
    ///
    /// # Errors
    ///
    /// Returns an error if the local database cannot be opened or a client cannot be
    /// built from the configured settings.
    pub fn from_config(config: &LegTrackConfig) -> Result<Self> {
        let client = create_local_client(config)?;
        let remote = create_remote_client(config)?;
        let fetcher: Arc<dyn Fetcher> = Arc::new(HttpFetcher::new(&config.source)?);
        let detector = ChangeDetector::new(&config.local.snapshot_dir);
        let urls = SourceUrls::new(&config.source.base_url);

        let table = BindingTable {
            measures: Binding::<Measure>::new(
                create_local_store(&client),
                create_remote_store(&remote),
                Arc::new(MeasureParser::new()?),
            ),
            hearings: Binding::<Hearing>::new(
                create_local_store(&client),
                create_remote_store(&remote),
                Arc::new(HearingParser::new()?),
            ),
            special_sessions: Binding::<SpecialSessionMeasure>::new(
                create_local_store(&client),
                create_remote_store(&remote),
                Arc::new(SpecialSessionParser::new(&config.source.base_url)?),
            ),
        };

        let mut pipeline = Self::new(
            client,
            fetcher,
            detector,
            urls,
            table,
            config.push.max_records_per_push,
        )?;
        pipeline.remote = Some(remote);
        pipeline.measure_types = config.source.measure_types.clone();

        tracing::info!(
            database = %config.local.database_path,
            snapshots = %config.local.snapshot_dir,
            source = %config.source.base_url,
            "Pipeline ready"
        );
        Ok(pipeline)
    }

    /// Builds the pipeline from explicit collaborators
    ///
    /// `client` must point at a database whose schema exists.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `max_records_per_push` is 0.
    pub fn new(
        client: SqliteClient,
        fetcher: Arc<dyn Fetcher>,
        detector: ChangeDetector,
        urls: SourceUrls,
        table: BindingTable,
        max_records_per_push: usize,
    ) -> Result<Self> {
        let context = LaneContext {
            client: &client,
            fetcher: &fetcher,
            detector: &detector,
            urls: &urls,
            max_records_per_push,
        };
        let measures = Lane::build(table.measures, &context)?;
        let hearings = Lane::build(table.hearings, &context)?;
        let special_sessions = Lane::build(table.special_sessions, &context)?;

        Ok(Self {
            client,
            remote: None,
            measure_types: MeasureType::REPORTED.to_vec(),
            measures,
            hearings,
            special_sessions,
        })
    }

    /// Measures of `year` for the configured measure types
    pub fn measures_target(&self, year: i32) -> ScrapeTarget {
        ScrapeTarget::Measures {
            year,
            types: self.measure_types.clone(),
        }
    }

    /// Creates the remote tables when a remote client is configured
    pub async fn ensure_remote_schema(&self) -> Result<()> {
        match &self.remote {
            Some(remote) => remote.ensure_schema().await,
            None => {
                tracing::debug!("No remote client configured, skipping schema setup");
                Ok(())
            }
        }
    }

    /// Runs one scrape job
    ///
    /// # Errors
    ///
    /// Returns a validation error for an invalid target. Other failures are reported
    /// as a `failed` outcome.
    pub async fn scrape(&self, target: &ScrapeTarget) -> Result<ScrapeOutcome> {
        match target.data_type() {
            DataType::Measure => self.measures.runner.run(target).await,
            DataType::Hearing => self.hearings.runner.run(target).await,
            DataType::SpecialSessionMeasure => self.special_sessions.runner.run(target).await,
        }
    }

    /// Runs one forwarding job for `data_type`
    pub async fn forward(&self, data_type: DataType) -> Result<ForwardOutcome> {
        match data_type {
            DataType::Measure => self.measures.forwarder.run().await,
            DataType::Hearing => self.hearings.forwarder.run().await,
            DataType::SpecialSessionMeasure => self.special_sessions.forwarder.run().await,
        }
    }

    /// Ledger counts, local record counts and watermarks
    pub fn status(&self) -> Result<StatusReport> {
        let scrape_jobs = ScrapeJobLedger::new(self.client.clone());
        let push_jobs = PushJobLedger::new(self.client.clone());

        let mut data_types = Vec::with_capacity(DataType::ALL.len());
        for data_type in DataType::ALL {
            let local_records = match data_type {
                DataType::Measure => self.measures.local.count()?,
                DataType::Hearing => self.hearings.local.count()?,
                DataType::SpecialSessionMeasure => self.special_sessions.local.count()?,
            };
            let watermark = push_jobs.watermark(data_type)?;
            let pending_scrape_job = scrape_jobs
                .select_job_updated_after(data_type, watermark)?
                .map(|job| job.id);

            data_types.push(DataTypeStatus {
                data_type,
                local_records,
                watermark,
                pending_scrape_job,
            });
        }

        Ok(StatusReport {
            scrape_jobs: scrape_jobs.count()?,
            push_jobs: push_jobs.count()?,
            data_types,
        })
    }
}
