//! Role-based access entities: roles, role hierarchy, claims and assignments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DomainError, DomainResult};

/// Named role within a tenant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub name: String,
    /// Upper-cased name used for case-insensitive lookups
    pub normalized_name: String,
    pub description: Option<String>,
    /// System roles cannot be renamed or deleted
    pub is_system: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Role {
    pub fn new(tenant_id: Uuid, name: impl Into<String>) -> Self {
        let name = name.into();
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            tenant_id,
            normalized_name: name.to_uppercase(),
            name,
            description: None,
            is_system: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn rename(&mut self, name: impl Into<String>) -> DomainResult<()> {
        if self.is_system {
            return Err(DomainError::SystemRoleImmutable(self.name.clone()));
        }
        let name = name.into();
        self.normalized_name = name.to_uppercase();
        self.name = name;
        self.updated_at = Utc::now();
        Ok(())
    }
}

/// Parent/child edge between two roles (child inherits parent's claims)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleHierarchy {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub parent_role_id: Uuid,
    pub child_role_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RoleHierarchy {
    pub fn new(tenant_id: Uuid, parent_role_id: Uuid, child_role_id: Uuid) -> DomainResult<Self> {
        if parent_role_id == child_role_id {
            return Err(DomainError::SelfReferentialRole(child_role_id));
        }
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            tenant_id,
            parent_role_id,
            child_role_id,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Claim attached directly to a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub user_id: Uuid,
    pub claim_type: String,
    pub claim_value: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Claim {
    pub fn new(
        tenant_id: Uuid,
        user_id: Uuid,
        claim_type: impl Into<String>,
        claim_value: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            tenant_id,
            user_id,
            claim_type: claim_type.into(),
            claim_value: claim_value.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Claim granted to every holder of a role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleClaim {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub role_id: Uuid,
    pub claim_type: String,
    pub claim_value: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RoleClaim {
    pub fn new(
        tenant_id: Uuid,
        role_id: Uuid,
        claim_type: impl Into<String>,
        claim_value: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            tenant_id,
            role_id,
            claim_type: claim_type.into(),
            claim_value: claim_value.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Assignment of a role to a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRole {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub user_id: Uuid,
    pub role_id: Uuid,
    /// User who granted the role, if not system-assigned
    pub assigned_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRole {
    pub fn new(tenant_id: Uuid, user_id: Uuid, role_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            tenant_id,
            user_id,
            role_id,
            assigned_by: None,
            created_at: now,
            updated_at: now,
        }
    }
}
