//! Relational storage for DNS checks and their findings.
//!
//! [`store::CheckStore`] wraps a SeaORM [`sea_orm::DatabaseConnection`] and
//! runs the `migration` crate on connect. A check owns its findings; deleting
//! a check removes them as well.

pub mod entities;
pub mod error;
pub mod store;


pub use error::{Result, StorageError};
pub use store::CheckStore;
