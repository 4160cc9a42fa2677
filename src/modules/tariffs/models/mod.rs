pub mod package;
pub mod tariff;
pub mod tariff_quote;

pub use package::{Contact, Package, PackageItem, Payment, Phone};
pub use tariff::{AllTariffsPayload, DeliveryMode, DeliveryModePayload, Tariff, TariffPayload};
pub use tariff_quote::{
    AdditionalService, TariffCalculation, TariffListPayload, TariffQuote, TariffQuotePayload,
};
