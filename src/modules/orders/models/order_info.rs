use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::{AppError, Result};
use crate::modules::locations::{Location, Route};
use crate::modules::tariffs::{Contact, Package};

/// Order type code for online-store shipments
pub const ONLINE_STORE_ORDER: u8 = 1;

/// State of an asynchronous request on an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RequestState {
    Accepted,
    Waiting,
    Successful,
    Invalid,
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for RequestState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            RequestState::Accepted => "ACCEPTED",
            RequestState::Waiting => "WAITING",
            RequestState::Successful => "SUCCESSFUL",
            RequestState::Invalid => "INVALID",
            RequestState::Unknown => "UNKNOWN",
        };
        f.write_str(text)
    }
}

/// Body of `POST v2/orders`
#[derive(Debug, Clone, Serialize)]
pub struct OrderRequest {
    #[serde(rename = "type")]
    pub order_type: u8,
    pub tariff_code: u32,
    pub from_location: Location,
    pub to_location: Location,
    pub packages: Vec<Package>,
    pub recipient: Contact,
    pub sender: Contact,
}

impl OrderRequest {
    pub fn new(
        tariff_code: u32,
        route: Route,
        packages: Vec<Package>,
        recipient: Contact,
        sender: Contact,
    ) -> Self {
        Self {
            order_type: ONLINE_STORE_ORDER,
            tariff_code,
            from_location: route.from,
            to_location: route.to,
            packages,
            recipient,
            sender,
        }
    }
}

/// Response of order registration and order lookups
#[derive(Debug, Clone, Deserialize)]
pub struct OrderInfo {
    pub entity: OrderEntity,
    #[serde(default)]
    pub requests: Vec<RequestStatus>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderEntity {
    pub uuid: String,
    /// Tracking number, assigned once the order is processed
    pub cdek_number: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RequestStatus {
    pub request_uuid: Option<String>,
    #[serde(rename = "type")]
    pub request_type: Option<String>,
    pub state: RequestState,
    pub date_time: Option<String>,
    #[serde(default)]
    pub errors: Vec<Value>,
}

impl OrderInfo {
    /// State of the first request on the order
    pub fn state(&self) -> Result<RequestState> {
        self.requests
            .first()
            .map(|request| request.state)
            .ok_or_else(|| {
                AppError::malformed(format!("order {} has no requests", self.entity.uuid))
            })
    }

    pub fn tracking_number(&self) -> Option<&str> {
        self.entity
            .cdek_number
            .as_deref()
            .filter(|number| !number.is_empty())
    }
}
