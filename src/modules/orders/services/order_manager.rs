use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::super::models::{Order, OrderInfo, OrderRequest, OrderState, RequestState};
use super::super::repositories::OrderRepository;
use crate::core::{AppError, Repository, Result};
use crate::modules::auth::TokenManager;

/// Bound on how long an order state is polled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl PollPolicy {
    pub fn new(interval: Duration, max_attempts: u32) -> Self {
        Self {
            interval,
            max_attempts,
        }
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self::new(Duration::from_secs(5), 24)
    }
}

/// Registers orders and follows their processing state
pub struct OrderManager {
    tokens: Arc<TokenManager>,
    orders: Arc<dyn OrderRepository>,
}

impl OrderManager {
    pub fn new(tokens: Arc<TokenManager>, orders: Arc<dyn OrderRepository>) -> Self {
        Self { tokens, orders }
    }

    /// Register an order upstream and store its uuid with the reported state
    pub async fn register_order(&self, request: &OrderRequest) -> Result<Order> {
        let url = self.tokens.client().endpoints().orders();
        let header = self.tokens.auth_header().await?;
        let info: OrderInfo = self
            .tokens
            .client()
            .post_json(&url, Some(&header), request)
            .await?;

        let state = OrderState::from(info.state()?);
        info!(uuid = %info.entity.uuid, state = %state, "Order registered");

        self.orders
            .write_many(vec![Order::new(info.entity.uuid, state)])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::internal("order write returned no row"))
    }

    /// Uuid of the first stored order; registers a new one built by `build`
    /// when none is stored
    pub async fn order_uuid<F, Fut>(&self, build: F) -> Result<String>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<OrderRequest>>,
    {
        if let Some(order) = self.orders.first().await? {
            debug!(uuid = %order.uuid, "Reusing stored order");
            return Ok(order.uuid);
        }

        let request = build().await?;
        Ok(self.register_order(&request).await?.uuid)
    }

    pub async fn order_info(&self, uuid: &str) -> Result<OrderInfo> {
        let url = self.tokens.client().endpoints().order(uuid);
        let header = self.tokens.auth_header().await?;
        self.tokens
            .client()
            .get_json(&url, Some(&header), &[] as &[(&str, &str)])
            .await
    }

    /// State of the order's first request
    pub async fn order_state(&self, uuid: &str) -> Result<RequestState> {
        self.order_info(uuid).await?.state()
    }

    /// Tracking number, once the upstream has assigned one
    pub async fn tracking_number(&self, uuid: &str) -> Result<String> {
        self.order_info(uuid)
            .await?
            .tracking_number()
            .map(str::to_string)
            .ok_or_else(|| AppError::not_found(format!("tracking number of order {}", uuid)))
    }

    pub async fn find_by_tracking_number(&self, number: &str) -> Result<OrderInfo> {
        let url = self.tokens.client().endpoints().orders();
        let header = self.tokens.auth_header().await?;
        self.tokens
            .client()
            .get_json(&url, Some(&header), &[("cdek_number", number)])
            .await
    }

    /// Poll until the order reaches `target`, giving up after
    /// `policy.max_attempts` lookups
    pub async fn wait_for_state(
        &self,
        uuid: &str,
        target: RequestState,
        policy: &PollPolicy,
    ) -> Result<OrderInfo> {
        let mut last = None;
        for attempt in 1..=policy.max_attempts {
            let info = self.order_info(uuid).await?;
            let state = info.state()?;
            if state == target {
                info!(uuid = %uuid, state = %state, attempt, "Order reached target state");
                return Ok(info);
            }

            debug!(uuid = %uuid, state = %state, target = %target, attempt, "Order not ready");
            last = Some(state);
            if attempt < policy.max_attempts {
                tokio::time::sleep(policy.interval).await;
            }
        }

        warn!(uuid = %uuid, target = %target, attempts = policy.max_attempts, "Order poll exhausted");
        Err(AppError::Timeout(format!(
            "order {} did not reach {} after {} attempts (last state: {})",
            uuid,
            target,
            policy.max_attempts,
            last.map(|state| state.to_string())
                .unwrap_or_else(|| "none".to_string())
        )))
    }
}
