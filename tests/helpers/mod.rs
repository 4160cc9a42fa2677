// Test helper modules
//
// Shared by unit, integration and contract targets through
// `#[path = "../helpers/mod.rs"] mod helpers;`. Every target uses a different
// subset, so unused items are expected.
//
// Example:
//   #[tokio::test]
//   async fn test_city_lookup() {
//       let upstream = TestUpstream::start().await;
//       upstream.mount_token(1).await;
//       let context = upstream.memory_context();
//       let cities = context.locations.get_cities().await.unwrap();
//   }

#![allow(dead_code)]

pub mod test_data;

pub use assertions::*;
pub use test_data::*;
#[allow(unused_imports)]
pub use test_database::*;
pub use test_upstream::*;
