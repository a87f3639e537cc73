mod error;
use error::classify;

mod introspect;

mod value;
pub(crate) use value::Value;

use kiri_core::{
    async_trait,
    driver::{Driver, Response},
    schema::Table,
    stmt::{Record, Statement},
    Catalog, Error, Result,
};
use kiri_sql::Serializer;
use rusqlite::Connection as RusqliteConnection;
use std::path::{Path, PathBuf};
use url::Url;

/// Statements run on every new connection before it is handed out.
const CONNECTION_PRAGMAS: &str = "PRAGMA foreign_keys = ON;";

#[derive(Debug, Clone)]
pub struct Sqlite {
    location: Location,

    /// SQL run once per new connection, after the pragmas.
    on_connect: Option<String>,
}

#[derive(Debug, Clone)]
enum Location {
    File(PathBuf),
    InMemory,
}

impl Sqlite {
    /// Create a new SQLite driver from a `sqlite:` connection URL.
    ///
    /// `sqlite::memory:` opens an in-memory database; any other path is
    /// opened as a file.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url = Url::parse(&url_str).map_err(Error::driver)?;

        if url.scheme() != "sqlite" {
            return Err(kiri_core::err!(
                "connection URL does not have a `sqlite` scheme; url={url_str}"
            ));
        }

        if url.path() == ":memory:" {
            Ok(Self::in_memory())
        } else {
            Ok(Self::open(url.path()))
        }
    }

    /// Create an in-memory SQLite database
    pub fn in_memory() -> Self {
        Self {
            location: Location::InMemory,
            on_connect: None,
        }
    }

    /// Open a SQLite database at the specified file path
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self {
            location: Location::File(path.as_ref().to_path_buf()),
            on_connect: None,
        }
    }

    /// Runs `sql` on every new connection.
    ///
    /// Each in-memory connection starts empty, so this is how an in-memory
    /// database receives its tables.
    pub fn on_connect(mut self, sql: impl Into<String>) -> Self {
        self.on_connect = Some(sql.into());
        self
    }
}

#[async_trait]
impl Driver for Sqlite {
    fn url(&self) -> String {
        match &self.location {
            Location::InMemory => "sqlite::memory:".to_string(),
            Location::File(path) => format!("sqlite:{}", path.display()),
        }
    }

    async fn connect(&self) -> Result<Box<dyn kiri_core::Connection>> {
        let mut connection = match &self.location {
            Location::File(path) => Connection::open(path)?,
            Location::InMemory => Connection::in_memory()?,
        };

        if let Some(sql) = &self.on_connect {
            connection.execute_batch(sql)?;
        }

        tracing::debug!(url = %self.url(), "opened sqlite connection");
        Ok(Box::new(connection))
    }

    fn max_connections(&self) -> Option<usize> {
        matches!(self.location, Location::InMemory).then_some(1)
    }
}

#[derive(Debug)]
pub struct Connection {
    connection: RusqliteConnection,
}

impl Connection {
    pub fn in_memory() -> Result<Self> {
        let connection = RusqliteConnection::open_in_memory().map_err(classify)?;
        Self::init(connection)
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = RusqliteConnection::open(path).map_err(classify)?;
        Self::init(connection)
    }

    fn init(connection: RusqliteConnection) -> Result<Self> {
        let mut sqlite = Self { connection };
        sqlite.execute_batch(CONNECTION_PRAGMAS)?;
        Ok(sqlite)
    }

    /// Runs one or more statements that produce no rows.
    pub fn execute_batch(&mut self, sql: &str) -> Result<()> {
        self.connection.execute_batch(sql).map_err(classify)
    }
}

#[async_trait]
impl kiri_core::Connection for Connection {
    async fn introspect(&mut self) -> Result<Catalog> {
        introspect::catalog(&self.connection)
            .map_err(|err| err.context(Error::schema_introspection("sqlite")))
    }

    async fn exec(&mut self, table: &Table, stmt: Statement) -> Result<Response> {
        let mut params: Vec<kiri_core::stmt::Value> = vec![];
        let sql_str = Serializer::sqlite().serialize(&stmt, &mut params);

        tracing::trace!(sql = %sql_str, params = params.len(), "executing statement");

        let mut prepared = self.connection.prepare_cached(&sql_str).map_err(classify)?;

        let params = params.into_iter().map(Value::from).collect::<Vec<_>>();

        if !stmt.returns_rows() {
            let count = prepared
                .execute(rusqlite::params_from_iter(params.iter()))
                .map_err(classify)?;

            return Ok(Response::count(count as _));
        }

        let names: Vec<String> = prepared
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect();
        let types: Vec<_> = names
            .iter()
            .map(|name| table.column(name).map(|column| &column.ty))
            .collect();

        let mut rows = prepared
            .query(rusqlite::params_from_iter(params.iter()))
            .map_err(classify)?;

        let mut ret = vec![];

        while let Some(row) = rows.next().map_err(classify)? {
            let mut record = Record::new();

            for (index, name) in names.iter().enumerate() {
                let value = Value::from_sql(row, index, types[index]).map_err(classify)?;
                record.insert(name.clone(), value.into_inner());
            }

            ret.push(record);
        }

        Ok(Response::records(ret))
    }
}
