pub mod package_factory;
pub mod tariff_calculator;
pub mod weight_range;

pub use package_factory::PackageFactory;
pub use tariff_calculator::TariffCalculator;
pub use weight_range::{WeightRange, DEFAULT_WEIGHT_MAX_G, DEFAULT_WEIGHT_MIN_G};
