// Wire types for the backend's JSON bodies.
//
// Field names follow the backend exactly (camelCase). Responses are
// deserialized leniently: counters and optional strings default when absent.

use serde::{Deserialize, Serialize};

const SUCCESS: &str = "success";

/// Generic `{ status, message }` acknowledgement returned by most endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl StatusResponse {
    pub fn is_success(&self) -> bool {
        self.status.eq_ignore_ascii_case(SUCCESS)
    }

    /// The backend message, or a synthesized one naming the status.
    pub fn message_or_status(&self) -> String {
        self.message
            .clone()
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("status={}", self.status))
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct RegisterRequest<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

/// `POST /user/login` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl LoginResponse {
    pub fn is_success(&self) -> bool {
        self.status.eq_ignore_ascii_case(SUCCESS)
    }

    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some("admin")
    }
}

/// `GET /user/profile` response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileResponse {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// The ticket record as the backend and the QR payload carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketPayload {
    pub ticket_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub rider_type: String,
    pub start_location: String,
    pub end_location: String,
    pub duration: String,
    pub start_date: String,
    pub end_date: String,
    pub price: u32,
    pub payment: String,
    pub issued: String,
    pub valid_until: String,
    pub status: String,
    pub created_by: u64,
}

/// `GET /stats` response. Missing counters read as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub active_users: u64,
    #[serde(default)]
    pub total_orders: u64,
    #[serde(default)]
    pub revenue: f64,
}

/// One row of `GET /admin/tickets`.
///
/// The admin listing joins tickets with their owner, so it carries
/// `route`, `username` and `email` rather than the full record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminTicket {
    #[serde(default)]
    pub ticket_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub rider_type: Option<String>,
    #[serde(default)]
    pub route: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct AdminTicketsResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Vec<AdminTicket>,
}
