//! User types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User account
///
/// The password is stored as supplied and never serialized back out.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

/// User creation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub is_admin: Option<bool>,
}

impl NewUser {
    pub fn into_user(self, id: String, now: DateTime<Utc>) -> User {
        User {
            id,
            username: self.username,
            email: self.email,
            password: self.password,
            is_admin: self.is_admin.unwrap_or(false),
            created_at: now,
        }
    }
}
