//! Account roles and login payloads.

use crate::ids::UserId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The four kinds of account on the marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Cliente,
    Negocio,
    Repartidor,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Cliente => "cliente",
            Role::Negocio => "negocio",
            Role::Repartidor => "repartidor",
            Role::Admin => "admin",
        }
    }

    /// Only clients shop; the cart is meaningless for other roles.
    pub fn can_order(&self) -> bool {
        matches!(self, Role::Cliente)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `POST /auth/login`.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Successful login.
#[derive(Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub token: String,
    #[serde(rename = "rol")]
    pub role: Role,
    #[serde(rename = "usuario_id")]
    pub user_id: UserId,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("role", &self.role)
            .field("user_id", &self.user_id)
            .finish()
    }
}
