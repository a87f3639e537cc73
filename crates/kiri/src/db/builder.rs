use super::{Connect, Db, Pool, Shared};
use crate::{Driver, FieldMapper, Result};

use std::sync::{Arc, RwLock};

/// Configures and opens a [`Db`].
#[derive(Debug, Default)]
pub struct Builder {
    /// Field mappings, registered against the catalog once it is built
    mappings: Vec<Mapping>,

    /// Pool size override
    max_connections: Option<usize>,
}

#[derive(Debug)]
enum Mapping {
    Exact {
        table: String,
        external: String,
        internal: String,
    },
    FirstOf {
        table: String,
        external: String,
        candidates: Vec<String>,
    },
}

impl Builder {
    /// Maps `external` payload fields of `table` onto column `internal`.
    pub fn map(
        &mut self,
        table: impl Into<String>,
        external: impl Into<String>,
        internal: impl Into<String>,
    ) -> &mut Self {
        self.mappings.push(Mapping::Exact {
            table: table.into(),
            external: external.into(),
            internal: internal.into(),
        });
        self
    }

    /// Maps `external` onto the first of `candidates` that the table
    /// declares, unless `external` is itself a column.
    pub fn map_first_of<I, S>(
        &mut self,
        table: impl Into<String>,
        external: impl Into<String>,
        candidates: I,
    ) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.mappings.push(Mapping::FirstOf {
            table: table.into(),
            external: external.into(),
            candidates: candidates.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Caps the number of pooled connections.
    pub fn max_connections(&mut self, max_connections: usize) -> &mut Self {
        self.max_connections = Some(max_connections);
        self
    }

    pub async fn connect(&mut self, url: &str) -> Result<Db> {
        self.build(Connect::new(url)?).await
    }

    /// Opens the pool, introspects the schema, and validates every mapping
    /// against it.
    pub async fn build(&mut self, driver: impl Driver) -> Result<Db> {
        let url = driver.url();
        let pool = Pool::new(driver, self.max_connections).await?;

        let catalog = super::introspect(&pool).await?;

        let mut mapper = FieldMapper::new();
        for mapping in &self.mappings {
            match mapping {
                Mapping::Exact {
                    table,
                    external,
                    internal,
                } => mapper.register(&catalog, table, external, internal)?,
                Mapping::FirstOf {
                    table,
                    external,
                    candidates,
                } => {
                    let candidates: Vec<&str> = candidates.iter().map(String::as_str).collect();
                    let column = mapper.register_first_of(&catalog, table, external, &candidates)?;
                    tracing::debug!(%table, %external, %column, "resolved field alias");
                }
            }
        }

        tracing::info!(
            %url,
            tables = catalog.len(),
            mappings = self.mappings.len(),
            "database ready"
        );

        Ok(Db {
            shared: Arc::new(Shared {
                pool,
                catalog: RwLock::new(Arc::new(catalog)),
                mapper: Arc::new(mapper),
            }),
        })
    }
}
