//! Runtime description of the store's tables, built by introspection.

mod catalog;
pub use catalog::Catalog;

mod column;
pub use column::Column;

mod fk;
pub use fk::{ForeignKey, OnDelete};

mod pk;
pub use pk::PrimaryKey;

mod table;
pub use table::Table;

mod ty;
pub use ty::Type;
