pub mod models;
pub mod repositories;
pub mod services;

pub use models::{Order, OrderInfo, OrderRequest, OrderState, RequestState};
pub use repositories::{MySqlOrderRepository, OrderRepository};
pub use services::{OrderManager, PollPolicy};
