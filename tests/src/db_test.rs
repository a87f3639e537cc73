use crate::{exec_log::ExecLog, fixture, logging_driver::LoggingDriver};
use kiri::Db;
use kiri_core::driver::Driver;
use kiri_driver_sqlite::Sqlite;
use std::{future::Future, pin::Pin};

/// Per-test harness that logs every statement the driver executes.
pub struct DbTest {
    driver: Option<Box<dyn Driver>>,
    ops_log: Option<ExecLog>,
}

impl DbTest {
    /// An in-memory SQLite database holding the marketplace tables.
    pub fn sqlite() -> Self {
        Self::new(Box::new(Sqlite::in_memory().on_connect(fixture::MARKETPLACE)))
    }

    pub fn new(driver: Box<dyn Driver>) -> Self {
        Self {
            driver: Some(driver),
            ops_log: None,
        }
    }

    /// Opens the database through `builder`, returning any build error.
    pub async fn try_setup_db(&mut self, builder: &mut kiri::db::Builder) -> kiri::Result<Db> {
        let driver = self.driver.take().expect("database already set up");
        let driver = LoggingDriver::new(driver);
        self.ops_log = Some(ExecLog::new(driver.ops_log_handle()));

        builder.build(driver).await
    }

    pub async fn setup_db(&mut self, builder: &mut kiri::db::Builder) -> Db {
        self.try_setup_db(builder).await.unwrap()
    }

    /// Statements executed since setup.
    pub fn log(&self) -> &ExecLog {
        self.ops_log.as_ref().expect("database not set up")
    }

    /// Runs `test_fn` to completion on a current-thread runtime.
    pub fn run_test<F>(&mut self, test_fn: F)
    where
        F: for<'a> FnOnce(&'a mut DbTest) -> Pin<Box<dyn Future<Output = ()> + 'a>>,
    {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("Failed to create Tokio runtime");

        runtime.block_on(test_fn(self));
    }
}
