//! Server-side records that never cross the domain boundary into
//! `cartwheel-core` (core is shared with clients, which must not see
//! password hashes).

use chrono::{DateTime, Utc};
use serde::Serialize;

use cartwheel_core::{Email, UserId};

/// An account, as exposed to handlers. The password hash stays inside the
/// store layer (see [`crate::store::UserRecord`]).
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: UserId,
    pub name: Option<String>,
    pub email: Email,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}
