use crate::Result;

use kiri_core::{async_trait, driver::Driver, Connection};
use url::Url;

/// A driver chosen by the scheme of a connection URL.
#[derive(Debug)]
pub struct Connect {
    url: Url,

    /// SQL run on every new connection
    on_connect: Option<String>,
}

impl Connect {
    pub fn new(url: &str) -> Result<Self> {
        let url = Url::parse(url).map_err(kiri_core::Error::driver)?;
        Ok(Self {
            url,
            on_connect: None,
        })
    }

    /// Runs `sql` on every new connection, e.g. to create the tables of an
    /// in-memory database.
    pub fn on_connect(mut self, sql: impl Into<String>) -> Self {
        self.on_connect = Some(sql.into());
        self
    }

    fn is_in_memory(&self) -> bool {
        self.url.scheme() == "sqlite" && self.url.path() == ":memory:"
    }
}

#[async_trait]
impl Driver for Connect {
    fn url(&self) -> String {
        self.url.to_string()
    }

    async fn connect(&self) -> Result<Box<dyn Connection>> {
        match self.url.scheme() {
            "sqlite" => connect_sqlite(&self.url, self.on_connect.as_deref()).await,
            scheme => Err(kiri_core::err!(
                "unsupported database; scheme={scheme}; url={}",
                self.url
            )),
        }
    }

    fn max_connections(&self) -> Option<usize> {
        self.is_in_memory().then_some(1)
    }
}

#[cfg(feature = "sqlite")]
async fn connect_sqlite(url: &Url, on_connect: Option<&str>) -> Result<Box<dyn Connection>> {
    let mut driver = kiri_driver_sqlite::Sqlite::new(url.as_str())?;
    if let Some(sql) = on_connect {
        driver = driver.on_connect(sql);
    }
    driver.connect().await
}

#[cfg(not(feature = "sqlite"))]
async fn connect_sqlite(_url: &Url, _on_connect: Option<&str>) -> Result<Box<dyn Connection>> {
    Err(kiri_core::err!("`sqlite` feature not enabled"))
}
