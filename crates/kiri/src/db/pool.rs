//! Connection pooling for database connections.

use std::ops::{Deref, DerefMut};

use kiri_core::{driver::Driver, Connection, Error};

/// A connection pool that manages database connections.
#[derive(Debug)]
pub struct Pool {
    inner: deadpool::managed::Pool<Manager>,
}

impl Pool {
    /// Creates a new connection pool from the given driver.
    ///
    /// `max_connections` overrides the pool size, but never exceeds the
    /// driver's own limit.
    pub async fn new(driver: impl Driver, max_connections: Option<usize>) -> crate::Result<Self> {
        let limit = match (driver.max_connections(), max_connections) {
            (Some(driver), Some(requested)) => Some(driver.min(requested)),
            (driver, requested) => driver.or(requested),
        };

        let mut builder = deadpool::managed::Pool::builder(Manager {
            driver: Box::new(driver),
        })
        .runtime(deadpool::Runtime::Tokio1);

        if let Some(limit) = limit {
            builder = builder.max_size(limit.max(1));
        }

        let inner = builder.build().map_err(Error::store_unavailable)?;

        Ok(Self { inner })
    }

    /// Retrieves a connection from the pool.
    pub async fn get(&self) -> crate::Result<PoolConnection> {
        let connection = self.inner.get().await.map_err(|err| match err {
            deadpool::managed::PoolError::Backend(err) => err,
            err => Error::store_unavailable(err),
        })?;
        Ok(PoolConnection { inner: connection })
    }
}

#[derive(Debug)]
struct Manager {
    driver: Box<dyn Driver>,
}

impl deadpool::managed::Manager for Manager {
    type Type = Box<dyn Connection>;
    type Error = Error;

    async fn create(&self) -> Result<Self::Type, Self::Error> {
        self.driver.connect().await
    }

    async fn recycle(
        &self,
        _obj: &mut Self::Type,
        _metrics: &deadpool::managed::Metrics,
    ) -> deadpool::managed::RecycleResult<Self::Error> {
        Ok(())
    }
}

/// A connection retrieved from a pool.
///
/// When dropped, the connection is returned to the pool for reuse.
pub struct PoolConnection {
    inner: deadpool::managed::Object<Manager>,
}

impl Deref for PoolConnection {
    type Target = Box<dyn Connection>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for PoolConnection {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}
