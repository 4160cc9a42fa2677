pub mod models;
pub mod repositories;
pub mod services;

pub use models::{
    AdditionalService, Contact, DeliveryMode, Package, PackageItem, Payment, Phone, Tariff,
    TariffCalculation, TariffQuote,
};
pub use repositories::{
    DeliveryModeRepository, MySqlDeliveryModeRepository, MySqlTariffQuoteRepository,
    MySqlTariffRepository, TariffQuoteRepository, TariffRepository,
};
pub use services::{
    PackageFactory, TariffCalculator, WeightRange, DEFAULT_WEIGHT_MAX_G, DEFAULT_WEIGHT_MIN_G,
};
