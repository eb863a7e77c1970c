pub mod catalog;
pub mod error;
#[cfg(any(test, feature = "memory"))]
pub mod memory;
pub mod models;
pub mod queries;
pub mod resolver;
pub mod store;

pub use error::ContentError;
pub use store::{ContentStore, PgContentStore};
