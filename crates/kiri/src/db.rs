mod builder;
mod connect;
mod pool;

pub use builder::Builder;
pub use connect::Connect;
pub use pool::{Pool, PoolConnection};

use crate::{
    filter::{self, Mode},
    page::Page,
    schema::Table,
    Created, Error, FieldMapper, Key, Record, Result, Updated,
};

use kiri_core::{
    stmt::{Delete, Filter, Insert, Limit, OrderBy, Select, Statement, Update},
    Catalog, Connection as _,
};

use std::sync::{Arc, PoisonError, RwLock};

/// Shared state between all `Db` clones.
#[derive(Debug)]
pub(crate) struct Shared {
    pub(crate) pool: Pool,

    /// Current schema snapshot, replaced whole on refresh
    pub(crate) catalog: RwLock<Arc<Catalog>>,

    pub(crate) mapper: Arc<FieldMapper>,
}

/// The generic record gateway.
///
/// Every operation loads the current catalog snapshot once and uses it for
/// the whole call, so a concurrent refresh never changes the schema an
/// operation sees halfway through. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct Db {
    shared: Arc<Shared>,
}

impl Db {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// The current catalog snapshot.
    pub fn catalog(&self) -> Arc<Catalog> {
        self.shared
            .catalog
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn mapper(&self) -> &FieldMapper {
        &self.shared.mapper
    }

    /// Names of every table, in introspection order.
    pub fn tables(&self) -> Vec<String> {
        self.catalog().list_tables()
    }

    /// Re-introspects the store and swaps in the new catalog.
    ///
    /// On failure the previous catalog stays in place. Callers holding the
    /// previous snapshot keep a consistent view of it.
    pub async fn refresh(&self) -> Result<Arc<Catalog>> {
        let catalog = Arc::new(introspect(&self.shared.pool).await?);

        for stale in self.shared.mapper.stale(&catalog) {
            tracing::warn!(
                table = %stale.table,
                external = %stale.external,
                internal = %stale.internal,
                "field mapping targets a column that no longer exists"
            );
        }

        *self
            .shared
            .catalog
            .write()
            .unwrap_or_else(PoisonError::into_inner) = catalog.clone();

        tracing::info!(tables = catalog.len(), "catalog refreshed");
        Ok(catalog)
    }

    /// Inserts one row built from `payload`.
    ///
    /// Unknown fields and values that do not fit their column are dropped
    /// with a warning. Fails if a required column is still missing.
    pub async fn create(&self, table: &str, payload: Record) -> Result<Created> {
        let catalog = self.catalog();
        let schema = catalog.lookup(table)?;

        self.insert(&catalog, schema, payload, None).await
    }

    /// Inserts a row into `child` that belongs to the `parent` row `key`.
    ///
    /// The child's foreign key column is set from the parent row, replacing
    /// any value the payload supplied for it.
    pub async fn create_child(
        &self,
        parent: &str,
        key: Key,
        child: &str,
        payload: Record,
    ) -> Result<Created> {
        let catalog = self.catalog();
        let parent_schema = catalog.lookup(parent)?;
        let child_schema = catalog.lookup(child)?;

        let Some(fk) = child_schema.references_to(parent) else {
            return Err(Error::unknown_table(child).context(crate::err!(
                "`{child}` has no foreign key referencing `{parent}`"
            )));
        };

        let parent_row = self.fetch(parent_schema, key).await?;
        let Some(value) = parent_row.get(&fk.references_column).cloned() else {
            return Err(crate::err!(
                "`{parent}` has no column `{}`",
                fk.references_column
            ));
        };

        self.insert(&catalog, child_schema, payload, Some((fk.column.clone(), value)))
            .await
    }

    async fn insert(
        &self,
        catalog: &Catalog,
        schema: &Table,
        payload: Record,
        fixed: Option<(String, crate::Value)>,
    ) -> Result<Created> {
        let table = schema.name.as_str();
        tracing::debug!(%table, fields = payload.len(), "create");

        let inbound = self.shared.mapper.translate_inbound(catalog, table, payload)?;
        let mut filtered = filter::filter(schema, &self.shared.mapper, inbound, Mode::Create);

        if let Some((column, value)) = fixed {
            filtered.record.insert(column, value);
        }

        log_warnings(table, "create", &filtered.warnings);

        let missing = filter::missing_required(schema, &filtered.record);
        if !missing.is_empty() {
            return Err(Error::required_field_missing(table, missing));
        }

        let row = self
            .exec_one(schema, Insert::new(table, filtered.record).into())
            .await?
            .ok_or_else(|| crate::err!("insert into `{table}` returned no row"))?;

        let key = schema
            .key_of(&row)
            .ok_or_else(|| crate::err!("insert into `{table}` returned a row without its key"))?;

        Ok(Created {
            key,
            record: self.shared.mapper.translate_outbound(table, row),
            warnings: filtered.warnings,
        })
    }

    /// Reads the row with primary key `key`.
    pub async fn read(&self, table: &str, key: Key) -> Result<Record> {
        let catalog = self.catalog();
        let schema = catalog.lookup(table)?;
        tracing::debug!(%table, %key, "read");

        let row = self.fetch(schema, key).await?;
        Ok(self.shared.mapper.translate_outbound(table, row))
    }

    /// Lists one page of rows in natural order, falling back to key order.
    pub async fn list(&self, table: &str, page: Page) -> Result<Vec<Record>> {
        let catalog = self.catalog();
        let schema = catalog.lookup(table)?;
        tracing::debug!(%table, skip = page.skip, limit = page.limit, "list");

        let order_by = OrderBy::asc(
            schema
                .ordering_column()
                .into_iter()
                .chain(schema.primary_key_columns())
                .map(|column| column.name.clone()),
        );

        let stmt = Select::page(table, order_by, Limit::new(page.skip, page.limit));
        let rows = self.exec(schema, stmt.into()).await?;

        Ok(rows
            .into_iter()
            .map(|row| self.shared.mapper.translate_outbound(table, row))
            .collect())
    }

    /// Updates the fields of `payload` on the row with primary key `key`.
    ///
    /// Key columns are never updated. If nothing in the payload survives
    /// filtering, the row is read back unchanged.
    pub async fn update(&self, table: &str, key: Key, payload: Record) -> Result<Updated> {
        let catalog = self.catalog();
        let schema = catalog.lookup(table)?;
        tracing::debug!(%table, %key, fields = payload.len(), "update");

        let inbound = self.shared.mapper.translate_inbound(&catalog, table, payload)?;
        let filtered = filter::filter(schema, &self.shared.mapper, inbound, Mode::Update);
        log_warnings(table, "update", &filtered.warnings);

        let row = if filtered.record.is_empty() {
            self.fetch(schema, key).await?
        } else {
            let filter = key_filter(schema, key)?;
            let stmt = Update::new(table, filtered.record, filter.clone());

            self.exec_one(schema, stmt.into())
                .await?
                .ok_or_else(|| not_found(schema, &filter.key))?
        };

        Ok(Updated {
            record: self.shared.mapper.translate_outbound(table, row),
            warnings: filtered.warnings,
        })
    }

    /// Deletes the row with primary key `key`.
    ///
    /// Rows referencing it are handled as the schema declares: cascaded,
    /// nulled, or the delete fails with an integrity constraint error.
    pub async fn delete(&self, table: &str, key: Key) -> Result<()> {
        let catalog = self.catalog();
        let schema = catalog.lookup(table)?;
        tracing::debug!(%table, %key, "delete");

        let filter = key_filter(schema, key)?;
        let response = self
            .conn_exec(schema, Delete::new(table, filter.clone()).into())
            .await?;

        match response.rows.into_count() {
            0 => Err(not_found(schema, &filter.key)),
            _ => Ok(()),
        }
    }

    async fn fetch(&self, schema: &Table, key: Key) -> Result<Record> {
        let filter = key_filter(schema, key)?;
        let stmt = Select::by_key(&schema.name, filter.clone());

        self.exec_one(schema, stmt.into())
            .await?
            .ok_or_else(|| not_found(schema, &filter.key))
    }

    async fn exec_one(&self, schema: &Table, stmt: Statement) -> Result<Option<Record>> {
        Ok(self.exec(schema, stmt).await?.into_iter().next())
    }

    async fn exec(&self, schema: &Table, stmt: Statement) -> Result<Vec<Record>> {
        Ok(self.conn_exec(schema, stmt).await?.rows.into_records())
    }

    async fn conn_exec(
        &self,
        schema: &Table,
        stmt: Statement,
    ) -> Result<kiri_core::driver::Response> {
        let mut connection = self.shared.pool.get().await?;
        connection.exec(schema, stmt).await
    }
}

/// Builds a primary key filter, coercing each component to its column type.
///
/// A key of the wrong arity or type cannot match any row.
fn key_filter(schema: &Table, key: Key) -> Result<Filter> {
    let display = key.to_string();
    match schema.coerce_key(key) {
        Some(key) => Ok(Filter::new(schema.primary_key_names(), key)),
        None => Err(Error::record_not_found(format!(
            "table={} key={display}",
            schema.name
        ))),
    }
}

fn not_found(schema: &Table, key: &Key) -> Error {
    Error::record_not_found(format!("table={} key={key}", schema.name))
}

fn log_warnings(table: &str, op: &str, warnings: &[crate::FieldWarning]) {
    for warning in warnings {
        tracing::warn!(%table, op, field = warning.field(), "dropped field: {warning}");
    }
}

/// Builds a catalog from a pooled connection.
///
/// Failing to reach the store counts as an introspection failure; the store
/// error stays in the chain as the cause.
pub(crate) async fn introspect(pool: &Pool) -> Result<Catalog> {
    let mut connection = pool.get().await.map_err(|err| {
        err.context(Error::schema_introspection(
            "unable to connect to the store",
        ))
    })?;

    connection.introspect().await
}
