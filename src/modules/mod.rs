pub mod auth;
pub mod locations;
pub mod orders;
pub mod tariffs;
pub mod upstream;
