//! Tenant (storefront) entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::context::TenantInfo;

/// Storefront owning its own users, roles and keys
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tenant {
    pub id: Uuid,
    /// Short unique code (e.g. "acme")
    pub identifier: String,
    pub name: String,
    /// Custom storefront domains routed to this tenant
    pub domains: Vec<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Tenant {
    pub fn serves_domain(&self, domain: &str) -> bool {
        self.domains.iter().any(|d| d.eq_ignore_ascii_case(domain))
    }

    /// Context-level view of this tenant
    pub fn info(&self) -> TenantInfo {
        TenantInfo::new(self.id, self.identifier.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_match_is_case_insensitive() {
        let now = Utc::now();
        let tenant = Tenant {
            id: Uuid::new_v4(),
            identifier: "acme".to_string(),
            name: "Acme".to_string(),
            domains: vec!["shop.acme.test".to_string()],
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        assert!(tenant.serves_domain("SHOP.acme.test"));
        assert!(!tenant.serves_domain("acme.test"));
        assert_eq!(tenant.info().identifier, "acme");
    }
}
