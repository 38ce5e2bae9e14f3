//! Registration approval queues.
//!
//! Newly registered negocios and repartidores wait for an administrator
//! to approve or reject them. The queues live on the server; these are
//! the records the admin views poll for.

use crate::ids::{NegocioId, RepartidorId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which queue an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalKind {
    Negocio,
    Repartidor,
}

impl ApprovalKind {
    /// Path segment used by the admin endpoints.
    pub fn path_segment(&self) -> &'static str {
        match self {
            ApprovalKind::Negocio => "negocios",
            ApprovalKind::Repartidor => "repartidores",
        }
    }
}

impl fmt::Display for ApprovalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApprovalKind::Negocio => f.write_str("negocio"),
            ApprovalKind::Repartidor => f.write_str("repartidor"),
        }
    }
}

/// Admin verdict on a pending registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalDecision {
    Approve,
    Reject,
}

impl ApprovalDecision {
    pub fn path_segment(&self) -> &'static str {
        match self {
            ApprovalDecision::Approve => "aprobar",
            ApprovalDecision::Reject => "rechazar",
        }
    }
}

/// A negocio awaiting approval.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PendingNegocio {
    pub id: NegocioId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "direccion", default)]
    pub address: Option<String>,
    #[serde(rename = "categoria", default)]
    pub category: Option<String>,
    /// Registration time as sent by the server.
    #[serde(rename = "creado_en", default)]
    pub registered_at: Option<String>,
}

/// A repartidor awaiting approval.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PendingRepartidor {
    pub id: RepartidorId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "telefono", default)]
    pub phone: Option<String>,
    #[serde(rename = "vehiculo", default)]
    pub vehicle: Option<String>,
    #[serde(rename = "creado_en", default)]
    pub registered_at: Option<String>,
}
