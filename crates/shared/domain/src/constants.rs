//! Domain-level constants.
//!
//! These constants define paging limits and identity lifecycle defaults.

// =============================================================================
// Pagination
// =============================================================================

/// First page number (pages are 1-based)
pub const DEFAULT_PAGE_NUMBER: u64 = 1;

/// Default number of items per enumeration page
pub const DEFAULT_PAGE_SIZE: u64 = 100;

/// Upper bound for a single enumeration page
pub const MAX_PAGE_SIZE: u64 = 1000;

// =============================================================================
// Tenancy
// =============================================================================

/// Identifier of the platform-level tenant used by system jobs
pub const SYSTEM_TENANT_IDENTIFIER: &str = "system";
