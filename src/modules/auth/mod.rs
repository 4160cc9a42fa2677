pub mod models;
pub mod repositories;
pub mod services;

pub use models::{AuthToken, TokenPayload};
pub use repositories::{MySqlTokenRepository, TokenRepository};
pub use services::TokenManager;
