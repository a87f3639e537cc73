pub mod db;
pub use db::Db;

mod filter;
pub use filter::FieldWarning;

mod outcome;
pub use outcome::{Created, Updated};

pub mod page;
pub use page::Page;

pub use kiri_core::{
    driver::Driver,
    err,
    mapping::{FieldMapper, Inbound},
    schema::{self, Catalog},
    stmt::{Key, Record, Value},
    Error, Result,
};
