//! # Presensi Client
//!
//! A blocking HTTP client for the presensi attendance backend: typed CRUD
//! over JSON documents, field projection with server-side filters, and the
//! key-resolution chain attendance devices rely on.
//!
//! ## Design Principles
//!
//! - **One call at a time**: every operation takes `&mut self` and runs a
//!   full request/response cycle before returning. No retries, no queues.
//! - **Conservative failure values**: operations fold errors into `false`,
//!   `None` or an empty result, while [`TableClient::last_status`] and
//!   [`TableClient::last_diagnostic`] keep the underlying failure queryable.
//! - **Documents, not structs**: records cross the wire as
//!   [`AssociativeStore`] documents, so callers add fields without touching
//!   this crate.
//! - **Device seams are traits**: hardware concerns ([`CardReader`],
//!   [`DisplaySink`], [`TimeSource`], [`SettingsStore`]) stay behind traits
//!   so firmware and tests plug in freely.
//!
//! ## Core Concepts
//!
//! - [`TableClient`] - the blocking client; one instance per backend.
//! - [`Resource`] - a backend table plus how its records are addressed.
//! - [`FieldFilter`] - server-side projection mirroring the backend's
//!   filter syntax.
//! - [`ProjectionSpec`] / [`ReadResult`] - remote-path to local-name maps
//!   going into and coming out of [`TableClient::read`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use presensi_client::{ClientConfig, ProjectionSpec, Resource, TableClient};
//!
//! fn main() -> presensi_client::Result<()> {
//!     // 1. Configure and connect
//!     let config = ClientConfig::new("https://backend.example.com");
//!     let mut client = TableClient::new(config)?;
//!
//!     // 2. Address the members table
//!     let members = Resource::members();
//!
//!     // 3. Project two fields of one member, keyed by card UID
//!     let mut projection = ProjectionSpec::new();
//!     projection.append("nama".to_string(), "Name".to_string());
//!     projection.append("tanggal_masuk".to_string(), "Checked In".to_string());
//!
//!     let record = client.read(&members, "AB12CD34", &projection);
//!     for (label, value) in record.iter() {
//!         println!("{}: {}", label, value.as_deref().unwrap_or("-"));
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod device;
pub mod error;
pub mod projection;
pub mod resource;

// Re-export main types at crate root
pub use client::TableClient;
pub use config::{ClientConfig, ConfigError};
pub use device::{split_date_time, CardReader, DisplaySink, SettingsStore, TimeSource};
pub use error::{ClientError, Result};
pub use projection::FieldFilter;
pub use resource::{fields, Resource, ResourceKind};

pub use presensi_collections::AssociativeStore;

/// Type aliases for clarity
pub type ProjectionSpec = presensi_collections::AssociativeStore<String, String>;
pub type ReadResult = presensi_collections::AssociativeStore<String, Option<String>>;
