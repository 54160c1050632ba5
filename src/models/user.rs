//! Users, roles and login payloads

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Id;

/// Role of a platform user
///
/// Gates which console actions are visible: category management and the
/// full user picker of the enrollment form are reserved to administrators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Rol {
    #[serde(rename = "Administrador")]
    Administrador,
    #[default]
    #[serde(rename = "Cliente")]
    Cliente,
}

impl Rol {
    /// Wire name of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            Rol::Administrador => "Administrador",
            Rol::Cliente => "Cliente",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Rol::Administrador)
    }
}

impl fmt::Display for Rol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "administrador" | "admin" => Ok(Rol::Administrador),
            "cliente" | "client" => Ok(Rol::Cliente),
            other => Err(format!("Rol desconocido: {}", other)),
        }
    }
}

/// A platform user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Id,
    pub nombre: String,
    pub email: String,
    pub rol: Rol,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.rol.is_admin()
    }
}

/// Body of `POST /usuarios`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserInput {
    pub nombre: String,
    pub email: String,
    pub rol: Rol,
    pub password: String,
}

/// Body of `PUT /usuarios/:id`
///
/// Passwords are only set at creation time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserUpdate {
    pub nombre: String,
    pub email: String,
    pub rol: Rol,
}

/// Body of `POST /auth/login`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

/// Successful login response
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub user: User,
}

fn default_token_type() -> String {
    "bearer".to_string()
}
