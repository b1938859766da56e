//! # Builders
//!
//! Fluent configuration for decryption jobs.
//!
//! ## Modules
//!
//! - [`job_builder`] - Builder for [`DecryptionJob`](crate::DecryptionJob)

pub mod job_builder;

pub use job_builder::DecryptJobBuilder;
