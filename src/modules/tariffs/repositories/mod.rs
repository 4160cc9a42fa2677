pub mod delivery_mode_repository;
pub mod tariff_quote_repository;
pub mod tariff_repository;

pub use delivery_mode_repository::{DeliveryModeRepository, MySqlDeliveryModeRepository};
pub use tariff_quote_repository::{MySqlTariffQuoteRepository, TariffQuoteRepository};
pub use tariff_repository::{MySqlTariffRepository, TariffRepository};
