//! Consent terms and the users' acceptance of them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Versioned terms a user must accept (privacy policy, marketing, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsentTerm {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub version: String,
    pub title: String,
    pub body: String,
    pub is_mandatory: bool,
    pub effective_from: DateTime<Utc>,
    pub effective_until: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ConsentTerm {
    pub fn is_effective(&self, at: DateTime<Utc>) -> bool {
        self.effective_from <= at && self.effective_until.map_or(true, |until| until > at)
    }
}

/// A user's acceptance of a consent term
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserConsent {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub user_id: Uuid,
    pub consent_term_id: Uuid,
    pub granted_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserConsent {
    pub fn is_granted(&self) -> bool {
        self.revoked_at.is_none()
    }
}
