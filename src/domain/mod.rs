//! Domain models and types for LegTrack.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Closed enumerations** ([`DataType`], [`JobStatus`], [`MeasureType`], [`SessionId`])
//! - **Records** ([`Measure`], [`Hearing`], [`SpecialSessionMeasure`]) behind the [`Record`] trait
//! - **Error types** ([`LegTrackError`], [`FetchError`], [`StoreError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, LegTrackError>`]:
//!
//! ```rust
//! use legtrack::domain::{LegTrackError, Result, SessionId};
//!
//! fn session(raw: &str) -> Result<SessionId> {
//!     raw.parse().map_err(LegTrackError::Validation)
//! }
//!
//! assert!(session("c").is_err());
//! ```

pub mod errors;
pub mod hearing;
pub mod ids;
pub mod measure;
pub mod record;
pub mod result;
pub mod special_session;

// Re-export commonly used types for convenience
pub use errors::{FetchError, LegTrackError, StoreError};
pub use hearing::{Hearing, HearingKey};
pub use ids::{DataType, JobStatus, MeasureType, SessionId};
pub use measure::{Measure, MeasureKey};
pub use record::{now_millis, Record, Scope};
pub use result::Result;
pub use special_session::{SpecialSessionKey, SpecialSessionMeasure};
