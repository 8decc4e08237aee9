use serde::{Deserialize, Serialize};

use crate::model::ids::UserId;

/// The signed-in user as reported by the auth endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: UserId,
    pub username: String,
}

/// Body of `POST /api/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
}

/// Body of `POST /api/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
}
