//! Business logic between the HTTP handlers and the repository traits.

pub use errors::{ServiceError, ServiceResult};

pub mod categories;
pub mod errors;
pub mod products;
pub mod tags;
