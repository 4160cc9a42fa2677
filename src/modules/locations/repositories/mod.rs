pub mod city_repository;
pub mod delivery_point_repository;
pub mod listing_marker_repository;
pub mod postal_code_repository;

pub use city_repository::{CityRepository, MySqlCityRepository};
pub use delivery_point_repository::{DeliveryPointRepository, MySqlDeliveryPointRepository};
pub use listing_marker_repository::{ListingMarkerRepository, MySqlListingMarkerRepository};
pub use postal_code_repository::{MySqlPostalCodeRepository, PostalCodeRepository};
