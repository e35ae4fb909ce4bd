//! Request-scoped execution context.
//!
//! Every repository call receives the context explicitly; nothing is read
//! from thread-local or ambient state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::SYSTEM_TENANT_IDENTIFIER;

/// Tenant the current request is executing for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantInfo {
    pub id: Uuid,
    /// Human-readable tenant code (e.g. "acme")
    pub identifier: String,
}

impl TenantInfo {
    pub fn new(id: Uuid, identifier: impl Into<String>) -> Self {
        Self {
            id,
            identifier: identifier.into(),
        }
    }

    /// Platform tenant used by background jobs
    pub fn system() -> Self {
        Self::new(Uuid::nil(), SYSTEM_TENANT_IDENTIFIER)
    }

    pub fn is_system(&self) -> bool {
        self.id.is_nil()
    }
}

/// Immutable metadata threaded through every repository operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionContext {
    pub tenant: TenantInfo,
    pub correlation_id: Uuid,
    /// Acting user, if the request is authenticated
    pub user_id: Option<Uuid>,
    pub started_at: DateTime<Utc>,
}

impl ExecutionContext {
    /// Create a context for the given tenant with a fresh correlation ID
    pub fn new(tenant: TenantInfo) -> Self {
        Self {
            tenant,
            correlation_id: Uuid::new_v4(),
            user_id: None,
            started_at: Utc::now(),
        }
    }

    /// Context for system jobs (maintenance, cleanup)
    pub fn system() -> Self {
        Self::new(TenantInfo::system())
    }

    pub fn with_user(mut self, user_id: Uuid) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn with_correlation_id(mut self, correlation_id: Uuid) -> Self {
        self.correlation_id = correlation_id;
        self
    }

    pub fn tenant_id(&self) -> Uuid {
        self.tenant.id
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }
}
