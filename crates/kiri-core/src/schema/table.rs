use super::{Column, ForeignKey, PrimaryKey};
use crate::{
    stmt::{Key, Record, Value},
    Error, Result,
};

use std::collections::HashSet;

/// Column names that, when numeric, give a table its natural row order.
/// Earlier names take precedence.
pub const ORDERING_COLUMNS: &[&str] = &[
    "order",
    "position",
    "sequence",
    "sort_order",
    "order_index",
    "seq",
];

/// A table as introspected from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Name of the table
    pub name: String,

    /// The table's columns, in declaration order
    pub columns: Vec<Column>,

    pub primary_key: PrimaryKey,

    pub foreign_keys: Vec<ForeignKey>,
}

impl Table {
    /// Builds a table, validating its shape.
    ///
    /// `primary_key` lists column names in key order. Each named column is
    /// flagged as part of the key. Fails when the table has no columns,
    /// repeats a column name, or has an empty or dangling primary key.
    pub fn new(
        name: impl Into<String>,
        mut columns: Vec<Column>,
        primary_key: &[&str],
        foreign_keys: Vec<ForeignKey>,
    ) -> Result<Table> {
        let name = name.into();

        if columns.is_empty() {
            return Err(Error::schema_introspection(format!(
                "table `{name}` reports zero columns"
            )));
        }

        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.name.as_str()) {
                return Err(Error::schema_introspection(format!(
                    "table `{name}` declares column `{}` twice",
                    column.name
                )));
            }
        }

        if primary_key.is_empty() {
            return Err(Error::schema_introspection(format!(
                "table `{name}` has no primary key"
            )));
        }

        let mut pk = PrimaryKey { columns: vec![] };
        for pk_name in primary_key {
            let Some(index) = columns.iter().position(|column| column.name == *pk_name) else {
                return Err(Error::schema_introspection(format!(
                    "table `{name}` primary key names missing column `{pk_name}`"
                )));
            };
            columns[index].primary_key = true;
            columns[index].nullable = false;
            pk.columns.push(index);
        }

        Ok(Table {
            name,
            columns,
            primary_key: pk,
            foreign_keys,
        })
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn primary_key_columns(&self) -> impl ExactSizeIterator<Item = &Column> + '_ {
        self.primary_key
            .columns
            .iter()
            .map(|index| &self.columns[*index])
    }

    pub fn primary_key_names(&self) -> Vec<String> {
        self.primary_key_columns()
            .map(|column| column.name.clone())
            .collect()
    }

    /// The column giving the table a natural order, if it declares one.
    pub fn ordering_column(&self) -> Option<&Column> {
        ORDERING_COLUMNS.iter().find_map(|candidate| {
            self.column(candidate)
                .filter(|column| column.ty.is_numeric() && !column.primary_key)
        })
    }

    /// The foreign key through which this table references `table`.
    pub fn references_to(&self, table: &str) -> Option<&ForeignKey> {
        self.foreign_keys
            .iter()
            .find(|fk| fk.references_table == table)
    }

    /// Parses a key from a resource path segment.
    ///
    /// Returns `None` if the number of components differs from the primary
    /// key's arity or a component does not fit its column.
    pub fn parse_key(&self, segment: &str) -> Option<Key> {
        let parts = Key::split_path(segment);
        if parts.len() != self.primary_key.columns.len() {
            return None;
        }

        self.primary_key_columns()
            .zip(parts)
            .map(|(column, part)| column.ty.coerce(Value::from(part)))
            .collect::<Option<Vec<_>>>()
            .map(Key::new)
    }

    /// Coerces each component of `key` to its primary-key column's type.
    pub fn coerce_key(&self, key: Key) -> Option<Key> {
        if key.len() != self.primary_key.columns.len() {
            return None;
        }

        self.primary_key_columns()
            .zip(key.into_values())
            .map(|(column, value)| column.ty.coerce(value).filter(|value| !value.is_null()))
            .collect::<Option<Vec<_>>>()
            .map(Key::new)
    }

    /// Extracts the primary key of a stored row.
    pub fn key_of(&self, row: &Record) -> Option<Key> {
        self.primary_key_columns()
            .map(|column| row.get(&column.name).cloned())
            .collect::<Option<Vec<_>>>()
            .map(Key::new)
    }
}
