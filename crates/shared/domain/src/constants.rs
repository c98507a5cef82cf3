//! Domain-level constants.

// =============================================================================
// Store layout
// =============================================================================

/// Database used when none is configured
pub const DEFAULT_DATABASE_NAME: &str = "linkedin_scraper";

/// Collection holding job postings
pub const JOBS_COLLECTION: &str = "jobs";

/// Collection holding user accounts
pub const USERS_COLLECTION: &str = "users";

// =============================================================================
// Users
// =============================================================================

/// Role assigned when the producer does not supply one
pub const ROLE_USER: &str = "user";

/// Minimum plain-text password length accepted for hashing
pub const MIN_PASSWORD_LENGTH: usize = 8;

// =============================================================================
// Deadlines
// =============================================================================

/// Deadline for establishing and probing the store connection at startup
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Deadline applied to every individual store operation
pub const DEFAULT_OPERATION_TIMEOUT_SECS: u64 = 5;
