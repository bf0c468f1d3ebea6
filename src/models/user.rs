//! User model for storage and API.

use serde::{Deserialize, Serialize};

/// Registered user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique username (also the login credential)
    pub username: String,
    /// When the user signed up (RFC3339)
    pub created_at: String,
}
