use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::order_info::RequestState;
use crate::core::Entity;

/// Stored outcome of an order registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "VARCHAR(16)", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderState {
    Accepted,
    Invalid,
}

impl std::fmt::Display for OrderState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderState::Accepted => write!(f, "ACCEPTED"),
            OrderState::Invalid => write!(f, "INVALID"),
        }
    }
}

impl std::str::FromStr for OrderState {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "ACCEPTED" => Ok(OrderState::Accepted),
            "INVALID" => Ok(OrderState::Invalid),
            _ => Err(format!("Invalid order state: {}", s)),
        }
    }
}

impl From<RequestState> for OrderState {
    /// Only a rejected registration is stored as invalid
    fn from(state: RequestState) -> Self {
        match state {
            RequestState::Invalid => OrderState::Invalid,
            _ => OrderState::Accepted,
        }
    }
}

/// Order registered during a run, reused by later scenarios
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub uuid: String,
    pub created_at: DateTime<Utc>,
    pub state: OrderState,
}

impl Order {
    pub fn new(uuid: impl Into<String>, state: OrderState) -> Self {
        Self {
            uuid: uuid.into(),
            created_at: Utc::now().trunc_subsecs(0),
            state,
        }
    }
}

impl Entity for Order {
    type Id = String;
    const KIND: &'static str = "order";

    fn id(&self) -> String {
        self.uuid.clone()
    }
}
