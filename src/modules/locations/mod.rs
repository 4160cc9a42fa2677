pub mod models;
pub mod repositories;
pub mod services;

pub use models::{City, CityCriteria, DeliveryPoint, ListingMarker, Location, PostalCode, Region};
pub use repositories::{
    CityRepository, DeliveryPointRepository, ListingMarkerRepository, MySqlCityRepository,
    MySqlDeliveryPointRepository, MySqlListingMarkerRepository, MySqlPostalCodeRepository,
    PostalCodeRepository,
};
pub use services::{LocationManager, Route};
