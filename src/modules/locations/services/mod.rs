pub mod location_manager;

pub use location_manager::{LocationManager, Route};
