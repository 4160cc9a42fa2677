pub mod order;
pub mod order_info;

pub use order::{Order, OrderState};
pub use order_info::{OrderEntity, OrderInfo, OrderRequest, RequestState, RequestStatus};
