pub mod order_manager;

pub use order_manager::{OrderManager, PollPolicy};
