//! Credential entities: API keys, service clients, external logins,
//! password reset tokens and recovery codes.
//!
//! Secrets are only ever stored as hashes; none of these types carries
//! plaintext key material.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Long-lived API key issued to a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiKey {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    /// Short visible prefix shown in UIs (e.g. "sk_live_ab12")
    pub prefix: String,
    #[serde(skip_serializing)]
    pub key_hash: String,
    pub scopes: Vec<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub last_used_at: Option<DateTime<Utc>>,
    pub revoked_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ApiKey {
    pub fn is_expired(&self, at: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= at)
    }

    /// Usable keys are neither revoked nor expired
    pub fn is_usable(&self, at: DateTime<Utc>) -> bool {
        self.revoked_at.is_none() && !self.is_expired(at)
    }

    pub fn has_scope(&self, scope: &str) -> bool {
        self.scopes.iter().any(|s| s == scope)
    }
}

/// Machine-to-machine OAuth client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceClient {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub client_id: String,
    #[serde(skip_serializing)]
    pub secret_hash: String,
    pub name: String,
    pub allowed_scopes: Vec<String>,
    pub is_enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ServiceClient {
    pub fn allows_scope(&self, scope: &str) -> bool {
        self.is_enabled && self.allowed_scopes.iter().any(|s| s == scope)
    }
}

/// Link between a local user and an external identity provider account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalLogin {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub user_id: Uuid,
    /// Provider name (e.g. "google", "github")
    pub provider: String,
    /// Subject identifier issued by the provider
    pub provider_key: String,
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Single-use password reset token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PasswordResetToken {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub user_id: Uuid,
    #[serde(skip_serializing)]
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PasswordResetToken {
    pub fn is_redeemable(&self, at: DateTime<Utc>) -> bool {
        self.used_at.is_none() && self.expires_at > at
    }
}

/// MFA recovery code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecoveryCode {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub user_id: Uuid,
    #[serde(skip_serializing)]
    pub code_hash: String,
    pub used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RecoveryCode {
    pub fn is_used(&self) -> bool {
        self.used_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn api_key(expires_at: Option<DateTime<Utc>>) -> ApiKey {
        let now = Utc::now();
        ApiKey {
            id: Uuid::new_v4(),
            tenant_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "ci".to_string(),
            prefix: "sk_test_0001".to_string(),
            key_hash: "hash".to_string(),
            scopes: vec!["orders:read".to_string()],
            expires_at,
            last_used_at: None,
            revoked_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_api_key_expiry() {
        let now = Utc::now();
        assert!(!api_key(None).is_expired(now));
        assert!(api_key(Some(now - Duration::minutes(1))).is_expired(now));
        assert!(api_key(Some(now + Duration::days(1))).is_usable(now));
    }

    #[test]
    fn test_revoked_api_key_is_unusable() {
        let now = Utc::now();
        let mut key = api_key(None);
        key.revoked_at = Some(now);
        assert!(!key.is_usable(now));
        assert!(key.has_scope("orders:read"));
    }

    #[test]
    fn test_password_reset_token_single_use() {
        let now = Utc::now();
        let mut token = PasswordResetToken {
            id: Uuid::new_v4(),
            tenant_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            token_hash: "hash".to_string(),
            expires_at: now + Duration::hours(1),
            used_at: None,
            created_at: now,
            updated_at: now,
        };
        assert!(token.is_redeemable(now));
        token.used_at = Some(now);
        assert!(!token.is_redeemable(now));
    }
}
