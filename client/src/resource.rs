//! Remote table descriptors and the backend field schema.

/// Field names used by the attendance backend.
pub mod fields {
    /// Envelope wrapper on every success body.
    pub const DATA: &str = "data";
    /// Error description on JSON failure bodies.
    pub const MESSAGE: &str = "message";
    /// Primary record id.
    pub const ID: &str = "id";
    /// Member number.
    pub const NIM: &str = "nim";
    /// Member display name.
    pub const NAME: &str = "nama";
    /// Member division.
    pub const DIVISION: &str = "divisi";
    /// Card sub-record on a member.
    pub const CARD: &str = "kartu";
    /// Card unique identifier inside the card sub-record.
    pub const CARD_UID: &str = "uid";
    /// Append-only attendance log list inside the card sub-record.
    pub const LOGS: &str = "logs";
    /// Check-in timestamp on a log entry.
    pub const CHECK_IN: &str = "tanggal_masuk";
    /// Event title.
    pub const TITLE: &str = "judul";
    /// Active-event flag.
    pub const IS_ACTIVE: &str = "isActive";

    /// Dotted path to the card UID from a member record.
    pub const CARD_UID_PATH: &str = "kartu.uid";
}

/// How records in a remote table are addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    /// Rows are entities addressed by primary id, resolvable from a
    /// secondary key.
    Entity,
    /// Reads target the collection itself; no key resolution.
    Collection,
}

/// A remote table reachable under the client's base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    /// Path segment under the base URL
    pub path: String,
    /// Addressing mode
    pub kind: ResourceKind,
    /// Dotted path of the secondary key, for entity tables
    pub secondary_key: Option<String>,
}

impl Resource {
    /// Describe an entity table whose rows resolve from `secondary_key`.
    pub fn entity(path: impl Into<String>, secondary_key: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: ResourceKind::Entity,
            secondary_key: Some(secondary_key.into()),
        }
    }

    /// Describe a table whose reads target the collection directly.
    pub fn collection(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: ResourceKind::Collection,
            secondary_key: None,
        }
    }

    /// The member table, keyed by card UID.
    pub fn members() -> Self {
        Resource::entity("mahasiswa", fields::CARD_UID_PATH)
    }

    /// The event table.
    pub fn events() -> Self {
        Resource::collection("event")
    }
}
