//! # Presensi Collections
//!
//! Ordered generic containers with JSON document serialization.
//!
//! This crate provides the in-memory data model for the Presensi attendance
//! tools: a growable [`Sequence`] and an insertion-ordered
//! [`AssociativeStore`], plus the [`DocumentValue`] capability that turns a
//! store into a JSON document for the wire.
//!
//! ## Design Principles
//!
//! - **No IO**: containers know nothing about files or the network
//! - **Predictable layout**: contiguous backing stores, observable capacity,
//!   insertion order preserved everywhere
//! - **First-match semantics**: duplicated keys are allowed; lookups always
//!   act on the earliest entry
//! - **Serialization never fails**: values too deeply nested to express
//!   become a marker, not an error
//!
//! ## Core Concepts
//!
//! ### Sequence
//!
//! A contiguous container that starts with a small capacity and doubles when
//! full, keeping appends amortized constant time. Out-of-range indexing is a
//! contract violation and panics.
//!
//! ### AssociativeStore
//!
//! Key-value entries in insertion order. [`AssociativeStore::append`] always
//! adds an entry, [`AssociativeStore::upsert`] replaces the first match, and
//! lookups return the first matching entry.
//!
//! ### Documents
//!
//! [`AssociativeStore::to_document`] serializes a store into a JSON object.
//! Each value picks its node shape through [`DocumentValue::kind`], resolved
//! per type: scalars become leaves, sequences of scalars become lists, stores
//! of scalars become nested objects, and anything deeper becomes the
//! [`UNSUPPORTED_MARKER`].
//!
//! ## Quick Start
//!
//! ```rust
//! use presensi_collections::{AssociativeStore, Sequence};
//!
//! // 1. Collect card scans in order
//! let mut scans = Sequence::new();
//! scans.push("AB12CD34".to_string());
//! scans.push("99FF00AA".to_string());
//! assert_eq!(scans.len(), 2);
//! assert_eq!(scans[0], "AB12CD34");
//!
//! // 2. Describe a member as keyed fields
//! let mut member = AssociativeStore::new();
//! member.append("nim".to_string(), "2210512034".to_string());
//! member.append("nama".to_string(), "Alice".to_string());
//! assert_eq!(member.get("nama"), Some(&"Alice".to_string()));
//!
//! // 3. Serialize to a JSON document, keys in insertion order
//! let document = member.to_document();
//! assert_eq!(
//!     serde_json::to_string(&document).unwrap(),
//!     r#"{"nim":"2210512034","nama":"Alice"}"#
//! );
//! ```

pub mod document;
pub mod sequence;
pub mod store;

// Re-export main types at crate root
pub use document::{DocumentValue, ValueKind, UNSUPPORTED_MARKER};
pub use sequence::{Sequence, DEFAULT_CAPACITY};
pub use store::AssociativeStore;
