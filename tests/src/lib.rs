#[macro_use]
mod macros;

mod db_test;
pub use db_test::DbTest;

pub use exec_log::ExecLog;

pub mod fixture;

pub use logging_driver::{DriverOp, LoggingDriver};

pub mod prelude {
    pub use crate::{fixture, DbTest};
    pub use kiri::{Db, Error, Key, Page, Record, Value};
}
