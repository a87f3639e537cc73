mod response;
pub use response::{Response, Rows};

use crate::{async_trait, schema::Table, stmt::Statement, Catalog, Result};

use std::fmt::Debug;

/// Opens connections to one store.
#[async_trait]
pub trait Driver: Debug + Send + Sync + 'static {
    /// The URL the driver was configured with.
    fn url(&self) -> String;

    /// Opens a new connection.
    async fn connect(&self) -> Result<Box<dyn Connection>>;

    /// Upper bound on simultaneously open connections, if the store has one.
    fn max_connections(&self) -> Option<usize> {
        None
    }
}

/// One live connection to the store.
#[async_trait]
pub trait Connection: Debug + Send + 'static {
    /// Reads the store's schema and builds a catalog from it.
    async fn introspect(&mut self) -> Result<Catalog>;

    /// Executes a single statement against `table`.
    ///
    /// Inserts, selects and updates return the affected rows with every
    /// column of `table`; deletes return the affected row count.
    async fn exec(&mut self, table: &Table, stmt: Statement) -> Result<Response>;
}
