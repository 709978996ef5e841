//! CropLens Dashboard Orchestration
//!
//! Client-side orchestration for the CropLens dashboard:
//! - Submission: validate and upload a bulk readings file, yielding a tracked
//!   background job
//! - Polling: a cancellable repeating task that follows one job to a terminal
//!   outcome, reporting progress along the way
//! - Aggregation: concurrent fetches of the dashboard's data sources with
//!   per-source failure isolation and a staleness guard across refresh cycles
//!
//! All components take their collaborators explicitly: remote operations go
//! through the [`api`] port traits and user-facing events through a
//! [`notify::NotificationSink`], so nothing here relies on ambient globals.

pub mod aggregate;
pub mod api;
pub mod config;
pub mod error;
pub mod notify;
pub mod poller;
pub mod submit;

pub use aggregate::{AggregationSnapshot, DataAggregator, SourceSlot};
pub use api::{DataApi, JobApi};
pub use config::Config;
pub use error::SubmitError;
pub use notify::{NotificationSink, NullSink};
pub use poller::{DataChanged, PollOutcome, PollerState, TaskPoller};
pub use submit::{BulkUpload, JobSubmitter};
