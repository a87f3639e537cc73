pub mod driver;
pub use driver::{Connection, Driver};

mod error;
pub use error::Error;

pub mod mapping;
pub use mapping::FieldMapper;

pub mod schema;
pub use schema::Catalog;

pub mod stmt;

/// A Result type alias that uses Kiri's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

pub use async_trait::async_trait;
