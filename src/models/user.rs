//! Customer and administrator profile models.

use serde::{Deserialize, Serialize};

/// Role granted to newly onboarded customers. Administrator profiles
/// (`ADMIN`) are provisioned out of band.
pub const ROLE_CUSTOMER: &str = "CUSTOMER";

/// A user profile record.
///
/// Cards reference profiles through `customer_id`; authentication resolves
/// a card to its profile to obtain the username and role carried by the
/// authenticated identity.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,

    pub username: String,

    /// SHA-256 hex digest; plaintext passwords are never stored
    pub password_hash: String,

    /// `ADMIN` or `CUSTOMER`
    pub role: String,

    /// Business identifier (e.g. "CUST001"), unique per profile
    pub customer_id: String,

    /// Inactive profiles fail authentication
    pub active: bool,
}

/// A profile prior to insertion. The store assigns the id.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub role: String,
    pub customer_id: String,
    pub active: bool,
}

/// Request body for onboarding a new customer.
///
/// # JSON Example
///
/// ```json
/// {
///   "username": "john_doe",
///   "password": "password123",
///   "firstName": "John",
///   "lastName": "Doe"
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerRequest {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// Profile representation returned to API clients. The password digest is
/// never serialized.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub role: String,
    pub customer_id: String,
    pub active: bool,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            role: user.role,
            customer_id: user.customer_id,
            active: user.active,
        }
    }
}
