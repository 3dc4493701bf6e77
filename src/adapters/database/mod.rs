//! Store abstraction layer
//!
//! This module provides the traits shared by the local staging store and the remote
//! system-of-record, plus factory functions that build them from configuration.

pub mod factory;
pub mod traits;

pub use factory::{
    create_local_client, create_local_store, create_remote_client, create_remote_store,
};
pub use traits::{LocalStore, PushReceipt, RemoteStore, UpsertCounts};
