//! Idempotency records for safely retried write requests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Processing state of an idempotent request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdempotencyStatus {
    InProgress,
    Completed,
    Failed,
}

/// Stored outcome of a request keyed by its `Idempotency-Key`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdempotencyRecord {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub idempotency_key: String,
    /// Hash of the request body, used to reject key reuse with a different payload
    pub request_hash: String,
    pub status: IdempotencyStatus,
    pub response_status: Option<u16>,
    pub response_body: Option<serde_json::Value>,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl IdempotencyRecord {
    /// Check if a retry with the given request hash may replay the stored response
    pub fn matches_request(&self, request_hash: &str) -> bool {
        self.request_hash == request_hash
    }

    pub fn is_replayable(&self) -> bool {
        self.status == IdempotencyStatus::Completed && self.response_status.is_some()
    }
}
