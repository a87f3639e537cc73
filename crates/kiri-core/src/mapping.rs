//! Translation between the field names clients use and the column names
//! the store declares.

use crate::{stmt::Record, Catalog, Error, Result};

use indexmap::IndexMap;
use std::collections::HashMap;

/// Per-table external name to column name mappings.
///
/// Fields without a registered mapping use their own name as the column
/// name. Mappings are validated against a catalog when registered; the
/// mapper only borrows the catalog for that check.
#[derive(Debug, Clone, Default)]
pub struct FieldMapper {
    tables: HashMap<String, TableMapping>,
}

#[derive(Debug, Clone, Default)]
struct TableMapping {
    /// external name -> column name, in registration order
    fields: IndexMap<String, String>,
}

/// The result of translating a client payload into storage names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inbound {
    /// Fields that resolved to a column of the table, keyed by column name.
    pub record: Record,

    /// External keys that were discarded, in payload order.
    pub dropped: Vec<String>,
}

/// A registered mapping whose column no longer exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaleMapping {
    pub table: String,
    pub external: String,
    pub internal: String,
}

impl FieldMapper {
    pub fn new() -> FieldMapper {
        FieldMapper::default()
    }

    /// Registers `external` as an alias for column `internal` of `table`.
    ///
    /// Registering the same pair twice is a no-op.
    pub fn register(
        &mut self,
        catalog: &Catalog,
        table: &str,
        external: &str,
        internal: &str,
    ) -> Result<()> {
        let Some(schema) = catalog.get(table) else {
            return Err(Error::invalid_mapping(format!(
                "{table}.{external} -> {internal}: unknown table"
            )));
        };

        if !schema.has_column(internal) {
            return Err(Error::invalid_mapping(format!(
                "{table}.{external} -> {internal}: no such column"
            )));
        }

        if external != internal && schema.has_column(external) {
            return Err(Error::invalid_mapping(format!(
                "{table}.{external} -> {internal}: {external} is already a column"
            )));
        }

        let mapping = self.tables.entry(table.to_string()).or_default();

        match mapping.fields.get(external) {
            Some(existing) if existing == internal => Ok(()),
            Some(existing) => Err(Error::invalid_mapping(format!(
                "{table}.{external} -> {internal}: already mapped to {existing}"
            ))),
            None => {
                mapping
                    .fields
                    .insert(external.to_string(), internal.to_string());
                Ok(())
            }
        }
    }

    /// Maps `external` onto the first of `candidates` the table declares.
    ///
    /// If `external` is itself a column, identity applies and nothing is
    /// registered. Returns the column the name resolves to.
    pub fn register_first_of(
        &mut self,
        catalog: &Catalog,
        table: &str,
        external: &str,
        candidates: &[&str],
    ) -> Result<String> {
        let Some(schema) = catalog.get(table) else {
            return Err(Error::invalid_mapping(format!(
                "{table}.{external}: unknown table"
            )));
        };

        if schema.has_column(external) {
            return Ok(external.to_string());
        }

        let Some(internal) = candidates
            .iter()
            .find(|candidate| schema.has_column(candidate))
        else {
            return Err(Error::invalid_mapping(format!(
                "{table}.{external}: none of [{}] exist",
                candidates.join(", ")
            )));
        };

        self.register(catalog, table, external, internal)?;
        Ok(internal.to_string())
    }

    /// Resolves an external name to the column it maps to.
    pub fn resolve<'a>(&'a self, table: &str, external: &'a str) -> &'a str {
        self.explicit(table, external).unwrap_or(external)
    }

    /// The name a column is reported under: its first registered alias,
    /// or the column name itself.
    pub fn external<'a>(&'a self, table: &str, column: &'a str) -> &'a str {
        self.tables
            .get(table)
            .and_then(|mapping| {
                mapping
                    .fields
                    .iter()
                    .find(|(_, internal)| *internal == column)
            })
            .map(|(external, _)| external.as_str())
            .unwrap_or(column)
    }

    fn explicit<'a>(&'a self, table: &str, external: &str) -> Option<&'a str> {
        self.tables
            .get(table)
            .and_then(|mapping| mapping.fields.get(external))
            .map(String::as_str)
    }

    /// Translates a client payload into column names.
    ///
    /// Keys that do not resolve to a column of the table are dropped and
    /// reported, never rejected. When two keys resolve to the same column,
    /// an explicit alias wins over a key that matched by identity;
    /// otherwise the first key wins.
    pub fn translate_inbound(
        &self,
        catalog: &Catalog,
        table: &str,
        external: Record,
    ) -> Result<Inbound> {
        let schema = catalog.lookup(table)?;

        // column -> (external key, explicit)
        let mut sources: IndexMap<String, (String, bool)> = IndexMap::new();
        let mut inbound = Inbound::default();

        for (key, value) in external {
            let explicit = self.explicit(table, &key);
            let internal = explicit.unwrap_or(&key).to_string();

            if !schema.has_column(&internal) {
                inbound.dropped.push(key);
                continue;
            }

            match sources.get(&internal) {
                Some((_, true)) => {
                    inbound.dropped.push(key);
                    continue;
                }
                Some((_, false)) if explicit.is_none() => {
                    inbound.dropped.push(key);
                    continue;
                }
                Some((previous, false)) => inbound.dropped.push(previous.clone()),
                None => {}
            }

            sources.insert(internal.clone(), (key, explicit.is_some()));
            inbound.record.insert(internal, value);
        }

        Ok(inbound)
    }

    /// Translates a stored row into client names.
    ///
    /// Columns with a registered alias are renamed to the first alias
    /// registered for them; every other column passes through.
    pub fn translate_outbound(&self, table: &str, row: Record) -> Record {
        if !self.tables.contains_key(table) {
            return row;
        }

        row.into_iter()
            .map(|(column, value)| (self.external(table, &column).to_string(), value))
            .collect()
    }

    /// Registered mappings for `table`, as (external, column) pairs.
    pub fn mappings(&self, table: &str) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.tables
            .get(table)
            .into_iter()
            .flat_map(|mapping| mapping.fields.iter())
            .map(|(external, internal)| (external.as_str(), internal.as_str()))
    }

    /// Mappings whose table or column is absent from `catalog`.
    pub fn stale(&self, catalog: &Catalog) -> Vec<StaleMapping> {
        let mut stale = vec![];

        for (table, mapping) in &self.tables {
            for (external, internal) in &mapping.fields {
                let present = catalog
                    .get(table)
                    .is_some_and(|schema| schema.has_column(internal));

                if !present {
                    stale.push(StaleMapping {
                        table: table.clone(),
                        external: external.clone(),
                        internal: internal.clone(),
                    });
                }
            }
        }

        stale
    }
}
