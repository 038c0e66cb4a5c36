//! GitHub crate - Read-only client for the GitHub notifications API
//!
//! This crate provides:
//! - Notification thread listing, global or scoped to a repository
//! - Single thread lookup and subscription checks
//! - A pluggable request executor (blocking HTTP or in-memory)
//! - Client configuration from the octofeed config directory or environment
//!
//! All calls are synchronous and stateless.

pub mod activity;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod params;

pub use activity::{Activity, Notifications};
pub use client::{GithubClient, HttpExecutor, RecordedCall, RecordingExecutor, RequestExecutor};
pub use config::{ClientConfig, Credentials};
pub use error::{Error, Result, TransportError, ValidationError};
pub use models::{Notification, Owner, Repository, Subject, Subscription, SubscriptionStatus, ThreadId};
pub use params::{ListParams, Params};
