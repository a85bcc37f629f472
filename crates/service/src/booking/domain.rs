use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::domain::ServiceOffer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Accepted,
    Rejected,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => models::request::STATUS_PENDING,
            RequestStatus::Accepted => models::request::STATUS_ACCEPTED,
            RequestStatus::Rejected => models::request::STATUS_REJECTED,
        }
    }

    /// Only the two owner decisions are valid targets of a status change.
    pub fn is_decision(&self) -> bool { !matches!(self, RequestStatus::Pending) }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for RequestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            models::request::STATUS_PENDING => Ok(RequestStatus::Pending),
            models::request::STATUS_ACCEPTED => Ok(RequestStatus::Accepted),
            models::request::STATUS_REJECTED => Ok(RequestStatus::Rejected),
            other => Err(format!("unknown request status '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub id: Uuid,
    pub user_id: Uuid,
    pub service_id: Uuid,
    pub status: RequestStatus,
    pub paid: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Incoming request as a business owner sees it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnerRequestView {
    #[serde(flatten)]
    pub request: BookingRequest,
    pub service: ServiceOffer,
    pub user_full_name: String,
}

/// A customer's own booking; `service` is `None` once the service is deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerRequestView {
    #[serde(flatten)]
    pub request: BookingRequest,
    pub service: Option<ServiceOffer>,
}

pub const UNKNOWN_USER: &str = "Unknown User";

/// Lifecycle switches, loaded from the `[booking]` config section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingPolicy {
    /// Clear `paid` whenever the owner changes the status.
    pub reset_paid_on_status_change: bool,
    /// Refuse payment until the request is accepted.
    pub require_accepted_for_payment: bool,
}

impl Default for BookingPolicy {
    fn default() -> Self {
        Self { reset_paid_on_status_change: true, require_accepted_for_payment: false }
    }
}

impl BookingPolicy {
    pub fn strict() -> Self {
        Self { reset_paid_on_status_change: true, require_accepted_for_payment: true }
    }
}
