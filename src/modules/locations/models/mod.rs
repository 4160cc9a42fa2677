pub mod city;
pub mod delivery_point;
pub mod listing_marker;
pub mod postal_code;

pub use city::{City, CityCriteria, CityPayload, Region, SuggestedCityPayload};
pub use delivery_point::{DeliveryPoint, DeliveryPointPayload, Location};
pub use listing_marker::ListingMarker;
pub use postal_code::{PostalCode, PostalCodesPayload};
