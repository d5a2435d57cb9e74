//! Blocking CRUD client for the attendance backend.
//!
//! Every operation issues at most two sequential HTTP round trips and fully
//! completes or fails before returning. Failures fold into conservative
//! return values - `false`, `None` or an empty store - while the HTTP status
//! and extracted diagnostic of the last response stay queryable.

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::projection::FieldFilter;
use crate::resource::{fields, Resource, ResourceKind};
use crate::{ProjectionSpec, ReadResult};
use presensi_collections::{AssociativeStore, DocumentValue};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::Method;
use serde::Deserialize;
use serde_json::Value;

/// Success envelope holding a single record.
#[derive(Debug, Deserialize)]
struct EntityEnvelope {
    data: Value,
}

/// Success envelope holding a list of records.
#[derive(Debug, Deserialize)]
struct CollectionEnvelope {
    data: Vec<Value>,
}

/// JSON failure body shape.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Blocking client for one attendance backend.
///
/// All operations take `&mut self`, so a client instance runs one call at a
/// time; wrap it in a mutex to share it across threads. The client never
/// retries - callers own any retry policy.
#[derive(Debug)]
pub struct TableClient {
    config: ClientConfig,
    http: Client,
    update_verb: Method,
    last_status: Option<u16>,
    last_diagnostic: Option<String>,
}

impl TableClient {
    /// Build a client from configuration.
    ///
    /// Fails only when the HTTP transport cannot be constructed.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        // The backend routes record mutations through a custom verb
        let update_verb = Method::from_bytes(b"UPDATE")
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        Ok(Self {
            config,
            http,
            update_verb,
            last_status: None,
            last_diagnostic: None,
        })
    }

    /// Base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// HTTP status of the most recent response, if one arrived.
    pub fn last_status(&self) -> Option<u16> {
        self.last_status
    }

    /// Extracted diagnostic of the most recent failure, if any.
    pub fn last_diagnostic(&self) -> Option<&str> {
        self.last_diagnostic.as_deref()
    }

    /// Probe the backend root, true when it answers 200.
    pub fn ping(&mut self) -> bool {
        let request = self.http.get(self.config.base_url.clone());
        match self.expect_status(request, &[200]) {
            Ok(_) => true,
            Err(e) => {
                self.note_failure(&e);
                false
            }
        }
    }

    /// Check whether `resource` holds at least one record.
    ///
    /// Runs with the longer probe timeout; the backend is slow to wake.
    pub fn exists(&mut self, resource: &Resource) -> bool {
        let mut filter = FieldFilter::new();
        filter.keep(fields::ID);

        let request = self
            .http
            .get(self.url(&resource.path))
            .timeout(self.config.probe_timeout)
            .query(&[("filter", filter.for_collection().to_string())]);

        match self.fetch_records(request) {
            Ok(records) => !records.is_empty(),
            Err(e) => {
                self.note_failure(&e);
                false
            }
        }
    }

    /// Create a record, true when the backend stores it.
    ///
    /// The backend answers 201 on create; a plain 200 is tolerated.
    pub fn create<V: DocumentValue>(
        &mut self,
        resource: &Resource,
        record: &AssociativeStore<String, V>,
    ) -> bool {
        match self.try_create(resource, record) {
            Ok(()) => true,
            Err(e) => {
                self.note_failure(&e);
                false
            }
        }
    }

    /// Read the fields named by `projection` for the record addressed by
    /// `key`.
    ///
    /// Result keys are the projection's local names in projection order,
    /// with `None` for every field the fallback chain could not resolve.
    /// Failed resolution or a failed request produces an empty store.
    pub fn read(
        &mut self,
        resource: &Resource,
        key: &str,
        projection: &ProjectionSpec,
    ) -> ReadResult {
        match self.try_read(resource, key, projection) {
            Ok(result) => result,
            Err(e) => {
                self.note_failure(&e);
                AssociativeStore::new()
            }
        }
    }

    /// Update the record addressed by `key`, true when the backend accepts
    /// the change.
    ///
    /// Entity resources resolve `key` through their secondary key first and
    /// fail fast when nothing matches.
    pub fn update<V: DocumentValue>(
        &mut self,
        resource: &Resource,
        key: &str,
        changes: &AssociativeStore<String, V>,
    ) -> bool {
        match self.try_update(resource, key, changes) {
            Ok(()) => true,
            Err(e) => {
                self.note_failure(&e);
                false
            }
        }
    }

    /// Delete the record with primary id `primary_key`, true on 200.
    ///
    /// No resolution step: the caller must already hold the primary id.
    pub fn delete(&mut self, resource: &Resource, primary_key: &str) -> bool {
        let url = self.url(&format!("{}/{}", resource.path, primary_key));
        let request = self.http.request(Method::DELETE, url);

        match self.expect_status(request, &[200]) {
            Ok(_) => true,
            Err(e) => {
                self.note_failure(&e);
                false
            }
        }
    }

    /// Find the primary id of the record whose secondary key equals
    /// `secondary`. Resources without a secondary key resolve nothing.
    pub fn lookup_primary_by_secondary(
        &mut self,
        resource: &Resource,
        secondary: &str,
    ) -> Option<String> {
        let match_path = resource.secondary_key.clone()?;
        self.lookup(resource, &match_path, fields::ID, secondary)
    }

    /// Find the secondary key of the record whose display name equals
    /// `name`.
    pub fn lookup_secondary_by_name(
        &mut self,
        resource: &Resource,
        name: &str,
    ) -> Option<String> {
        let want_path = resource.secondary_key.clone()?;
        self.lookup(resource, fields::NAME, &want_path, name)
    }

    /// Find the primary id of the record whose title equals `title`.
    pub fn lookup_id_by_title(&mut self, resource: &Resource, title: &str) -> Option<String> {
        self.lookup(resource, fields::TITLE, fields::ID, title)
    }

    fn try_create<V: DocumentValue>(
        &mut self,
        resource: &Resource,
        record: &AssociativeStore<String, V>,
    ) -> Result<()> {
        let document = record.to_document();
        let request = self.http.post(self.url(&resource.path)).json(&document);
        self.expect_status(request, &[201, 200]).map(|_| ())
    }

    fn try_read(
        &mut self,
        resource: &Resource,
        key: &str,
        projection: &ProjectionSpec,
    ) -> Result<ReadResult> {
        let filter = read_filter(projection);

        let record = match resource.kind {
            ResourceKind::Entity => {
                let id = self.resolve_primary(resource, key)?;
                let url = self.url(&format!("{}/{}", resource.path, id));
                let request = self
                    .http
                    .get(url)
                    .query(&[("filter", filter.for_entity().to_string())]);

                let body = self.expect_status(request, &[200])?;
                let envelope: EntityEnvelope = serde_json::from_str(&body)
                    .map_err(|e| ClientError::Deserialization(e.to_string()))?;
                envelope.data
            }
            ResourceKind::Collection => {
                let request = self
                    .http
                    .get(self.url(&resource.path))
                    .query(&[("filter", filter.for_collection().to_string())]);

                let mut records = self.fetch_records(request)?;
                if records.is_empty() {
                    return Err(ClientError::NotFound {
                        resource: resource.path.clone(),
                        key: key.to_string(),
                    });
                }
                records.swap_remove(0)
            }
        };

        let mut result = AssociativeStore::new();
        for (remote, local) in projection.iter() {
            result.append(local.clone(), resolve_field(&record, remote));
        }
        Ok(result)
    }

    fn try_update<V: DocumentValue>(
        &mut self,
        resource: &Resource,
        key: &str,
        changes: &AssociativeStore<String, V>,
    ) -> Result<()> {
        let id = self.resolve_primary(resource, key)?;
        let document = changes.to_document();
        let url = self.url(&format!("{}/{}", resource.path, id));
        let request = self
            .http
            .request(self.update_verb.clone(), url)
            .json(&document);
        self.expect_status(request, &[200]).map(|_| ())
    }

    /// Resolve a caller-facing key to the backend's primary id.
    ///
    /// Entity resources translate their secondary key through a collection
    /// scan; other resources are addressed by primary id directly.
    fn resolve_primary(&mut self, resource: &Resource, key: &str) -> Result<String> {
        match (resource.kind, resource.secondary_key.as_deref()) {
            (ResourceKind::Entity, Some(secondary)) => {
                self.try_lookup(resource, secondary, fields::ID, key)
            }
            _ => Ok(key.to_string()),
        }
    }

    fn lookup(
        &mut self,
        resource: &Resource,
        match_path: &str,
        want_path: &str,
        needle: &str,
    ) -> Option<String> {
        match self.try_lookup(resource, match_path, want_path, needle) {
            Ok(found) => Some(found),
            Err(e) => {
                self.note_failure(&e);
                None
            }
        }
    }

    /// Scan a collection for the first record whose `match_path` equals
    /// `needle` and return the scalar at its `want_path`.
    fn try_lookup(
        &mut self,
        resource: &Resource,
        match_path: &str,
        want_path: &str,
        needle: &str,
    ) -> Result<String> {
        let mut filter = FieldFilter::new();
        filter.keep(match_path);
        filter.keep(want_path);

        let request = self
            .http
            .get(self.url(&resource.path))
            .query(&[("filter", filter.for_collection().to_string())]);
        let records = self.fetch_records(request)?;

        records
            .iter()
            .find(|record| scalar_at(record, match_path).as_deref() == Some(needle))
            .and_then(|record| scalar_at(record, want_path))
            .ok_or_else(|| ClientError::NotFound {
                resource: resource.path.clone(),
                key: needle.to_string(),
            })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url, path)
    }

    /// Send a prepared request, recording the response status.
    fn send(&mut self, request: RequestBuilder) -> Result<(u16, String)> {
        self.last_status = None;
        self.last_diagnostic = None;

        let request = request
            .build()
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        tracing::debug!("{} {}", request.method(), request.url());

        let response = self
            .http
            .execute(request)
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        self.last_status = Some(status);

        let body = response
            .text()
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        Ok((status, body))
    }

    /// Send a request and return its body when the status is accepted.
    fn expect_status(&mut self, request: RequestBuilder, accepted: &[u16]) -> Result<String> {
        let (status, body) = self.send(request)?;
        if accepted.contains(&status) {
            Ok(body)
        } else {
            Err(ClientError::Status {
                code: status,
                diagnostic: extract_diagnostic(&body),
            })
        }
    }

    /// Send a collection request and parse its record list.
    fn fetch_records(&mut self, request: RequestBuilder) -> Result<Vec<Value>> {
        let body = self.expect_status(request, &[200])?;
        let envelope: CollectionEnvelope = serde_json::from_str(&body)
            .map_err(|e| ClientError::Deserialization(e.to_string()))?;
        Ok(envelope.data)
    }

    fn note_failure(&mut self, error: &ClientError) {
        tracing::warn!("request failed: {}", error);
        let diagnostic = match error {
            ClientError::Status { diagnostic, .. } => diagnostic.clone(),
            other => other.to_string(),
        };
        self.last_diagnostic = Some(diagnostic);
    }
}

/// Build the read filter: every projected path is kept at all three
/// fallback locations, skipping card-qualified paths that mirror nowhere.
fn read_filter(projection: &ProjectionSpec) -> FieldFilter {
    let card_prefix = format!("{}.", fields::CARD);
    let log_list = format!("{}.{}", fields::CARD, fields::LOGS);

    let mut filter = FieldFilter::new();
    for (remote, _) in projection.iter() {
        filter.keep(remote);
        if !remote.starts_with(&card_prefix) {
            filter.keep(&format!("{}.{}", fields::CARD, remote));
            filter.keep_each(&log_list, remote);
        }
    }
    filter
}

/// Resolve `path` against a record through the fallback chain: the record
/// itself, then its card sub-record, then the last entry of the card's logs.
fn resolve_field(record: &Value, path: &str) -> Option<String> {
    if let Some(text) = scalar_at(record, path) {
        return Some(text);
    }

    let card = record.get(fields::CARD)?;
    if let Some(text) = scalar_at(card, path) {
        return Some(text);
    }

    let last_log = card.get(fields::LOGS)?.as_array()?.last()?;
    scalar_at(last_log, path)
}

/// Walk a dotted path and render the value when it is a scalar.
fn scalar_at(node: &Value, path: &str) -> Option<String> {
    let mut current = node;
    for segment in path.split('.') {
        current = current.get(segment)?;
    }
    scalar_text(current)
}

/// Render a scalar JSON value as text; null, arrays and objects resolve
/// to nothing.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

/// Pull a human-readable diagnostic out of a failure body.
///
/// Error bodies arrive either as HTML with a `<pre>` block or as JSON with
/// a `message` field; anything else is reported verbatim.
fn extract_diagnostic(body: &str) -> String {
    if let (Some(start), Some(end)) = (body.find("<pre>"), body.find("</pre>")) {
        let start = start + "<pre>".len();
        if start <= end {
            return body[start..end].to_string();
        }
    }

    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(message) = parsed.message {
            return message;
        }
    }

    body.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // ------------------------------------------------------------------
    // Diagnostic extraction
    // ------------------------------------------------------------------

    #[test]
    fn diagnostic_from_html_pre_block() {
        let body = "<html><head></head><body><pre>boom</pre></body></html>";
        assert_eq!(extract_diagnostic(body), "boom");
    }

    #[test]
    fn diagnostic_from_json_message() {
        let body = r#"{"message":"collection not found"}"#;
        assert_eq!(extract_diagnostic(body), "collection not found");
    }

    #[test]
    fn diagnostic_falls_back_to_raw_body() {
        assert_eq!(extract_diagnostic("plain text"), "plain text");
        assert_eq!(extract_diagnostic(""), "");
    }

    #[test]
    fn diagnostic_ignores_unclosed_pre_tag() {
        assert_eq!(extract_diagnostic("<pre>half open"), "<pre>half open");
    }

    #[test]
    fn diagnostic_ignores_reversed_pre_tags() {
        let body = "</pre>backwards<pre>";
        assert_eq!(extract_diagnostic(body), body);
    }

    #[test]
    fn diagnostic_ignores_non_string_message() {
        let body = r#"{"message":42}"#;
        assert_eq!(extract_diagnostic(body), body);
    }

    #[test]
    fn diagnostic_empty_pre_block() {
        assert_eq!(extract_diagnostic("<pre></pre>"), "");
    }

    // ------------------------------------------------------------------
    // Fallback resolution
    // ------------------------------------------------------------------

    fn sample_member() -> Value {
        json!({
            "id": "1",
            "nama": "Alice",
            "kartu": {
                "uid": "AB12CD34",
                "logs": [
                    {"tanggal_masuk": "2026-08-20T08:00:00"},
                    {"tanggal_masuk": "2026-08-21T09:15:00"}
                ]
            }
        })
    }

    #[test]
    fn resolve_direct_field() {
        let record = sample_member();
        assert_eq!(resolve_field(&record, "nama"), Some("Alice".to_string()));
        assert_eq!(
            resolve_field(&record, "kartu.uid"),
            Some("AB12CD34".to_string())
        );
    }

    #[test]
    fn resolve_falls_back_to_card() {
        let record = sample_member();
        assert_eq!(resolve_field(&record, "uid"), Some("AB12CD34".to_string()));
    }

    #[test]
    fn resolve_falls_back_to_last_log_entry() {
        let record = sample_member();
        assert_eq!(
            resolve_field(&record, "tanggal_masuk"),
            Some("2026-08-21T09:15:00".to_string())
        );
    }

    #[test]
    fn resolve_missing_field_is_none() {
        let record = sample_member();
        assert_eq!(resolve_field(&record, "divisi"), None);
    }

    #[test]
    fn resolve_skips_null_values() {
        let record = json!({"uid": null, "kartu": {"uid": "AB12"}});
        assert_eq!(resolve_field(&record, "uid"), Some("AB12".to_string()));
    }

    #[test]
    fn resolve_without_card_stops_early() {
        let record = json!({"id": "1"});
        assert_eq!(resolve_field(&record, "uid"), None);
    }

    #[test]
    fn resolve_with_empty_logs() {
        let record = json!({"kartu": {"uid": "AB12", "logs": []}});
        assert_eq!(resolve_field(&record, "tanggal_masuk"), None);
    }

    #[test]
    fn scalar_rendering() {
        assert_eq!(scalar_text(&json!("text")), Some("text".to_string()));
        assert_eq!(scalar_text(&json!(42)), Some("42".to_string()));
        assert_eq!(scalar_text(&json!(2.5)), Some("2.5".to_string()));
        assert_eq!(scalar_text(&json!(true)), Some("true".to_string()));
        assert_eq!(scalar_text(&json!(null)), None);
        assert_eq!(scalar_text(&json!([1])), None);
        assert_eq!(scalar_text(&json!({"a": 1})), None);
    }

    // ------------------------------------------------------------------
    // Read filter shape
    // ------------------------------------------------------------------

    #[test]
    fn read_filter_mirrors_fallback_locations() {
        let mut projection = ProjectionSpec::new();
        projection.append("uid".to_string(), "Member UID".to_string());

        let filter = read_filter(&projection);
        assert_eq!(
            filter.for_entity().to_string(),
            r#"{"data":{"uid":true,"kartu":{"uid":true,"logs":[{"uid":true}]}}}"#
        );
    }

    #[test]
    fn read_filter_skips_mirroring_card_paths() {
        let mut projection = ProjectionSpec::new();
        projection.append("kartu.uid".to_string(), "Card UID".to_string());

        let filter = read_filter(&projection);
        assert_eq!(
            filter.for_entity().to_string(),
            r#"{"data":{"kartu":{"uid":true}}}"#
        );
    }
}
