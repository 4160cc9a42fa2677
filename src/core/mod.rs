pub mod error;
pub mod memory;
pub mod traits;

pub use error::{AppError, Result};
pub use memory::MemoryStore;
pub use traits::{Entity, Repository};
