//! Shipping API end-to-end harness library
//!
//! Read-through caches over the upstream API (token, locations, tariffs,
//! orders) backed by MySQL, shared by the scenario tests through
//! [`context::SuiteContext`].

pub mod config;
pub mod context;
pub mod core;
pub mod modules;

pub use context::{Repositories, SuiteContext};
pub use modules::{auth, locations, orders, tariffs, upstream};
