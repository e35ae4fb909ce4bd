//! Token and key material entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Rotating refresh token; tokens issued from the same login share a family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshToken {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub user_id: Uuid,
    pub session_id: Option<Uuid>,
    pub family_id: Uuid,
    #[serde(skip_serializing)]
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
    /// Token issued when this one was rotated
    pub replaced_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RefreshToken {
    pub fn is_active(&self, at: DateTime<Utc>) -> bool {
        self.revoked_at.is_none() && self.expires_at > at
    }

    /// A rotated token presented again signals replay of a stolen token
    pub fn is_rotated(&self) -> bool {
        self.replaced_by.is_some()
    }
}

/// Revoked access token identifier (JWT `jti`) kept until the token expires
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenyListEntry {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub jti: String,
    pub reason: Option<String>,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DenyListEntry {
    pub fn is_expired(&self, at: DateTime<Utc>) -> bool {
        self.expires_at <= at
    }
}

/// Lifecycle of a signing key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SigningKeyStatus {
    /// Published in JWKS but not yet used for signing
    Pending,
    /// Used for signing new tokens
    Active,
    /// Only used for verifying tokens signed earlier
    Retired,
    Revoked,
}

/// Asymmetric key used to sign issued tokens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SigningKey {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub key_chain_id: Option<Uuid>,
    /// `kid` header value
    pub key_id: String,
    pub algorithm: String,
    pub public_key_pem: String,
    /// Private key, encrypted at rest
    #[serde(skip_serializing)]
    pub encrypted_private_key: Vec<u8>,
    pub status: SigningKeyStatus,
    pub not_before: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SigningKey {
    pub fn can_sign(&self, at: DateTime<Utc>) -> bool {
        self.status == SigningKeyStatus::Active && self.not_before <= at && self.expires_at > at
    }

    pub fn can_verify(&self, at: DateTime<Utc>) -> bool {
        matches!(self.status, SigningKeyStatus::Active | SigningKeyStatus::Retired)
            && self.expires_at > at
    }
}

/// Named group of signing keys rotated together
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyChain {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub name: String,
    pub algorithm: String,
    /// How often a new key is promoted
    pub rotation_interval_days: u32,
    pub is_active: bool,
    pub last_rotated_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl KeyChain {
    pub fn is_rotation_due(&self, at: DateTime<Utc>) -> bool {
        let interval = chrono::Duration::days(i64::from(self.rotation_interval_days));
        match self.last_rotated_at {
            Some(last) => at - last >= interval,
            None => true,
        }
    }
}

/// Client public key bound to tokens via DPoP (RFC 9449)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DpopKey {
    pub id: Uuid,
    pub tenant_id: Uuid,
    /// JWK SHA-256 thumbprint (`jkt`)
    pub thumbprint: String,
    pub public_jwk: serde_json::Value,
    pub session_id: Option<Uuid>,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
