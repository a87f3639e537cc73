use super::Table;
use crate::{Error, Result};

use indexmap::IndexMap;

/// Every table the store exposes, keyed by name in introspection order.
///
/// A catalog is never mutated. Re-introspection builds a new one which
/// replaces the previous snapshot wholesale.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    tables: IndexMap<String, Table>,
}

impl Catalog {
    pub fn from_tables(tables: impl IntoIterator<Item = Table>) -> Result<Catalog> {
        let mut map = IndexMap::new();

        for table in tables {
            if map.contains_key(&table.name) {
                return Err(Error::schema_introspection(format!(
                    "table `{}` reported twice",
                    table.name
                )));
            }
            map.insert(table.name.clone(), table);
        }

        Ok(Catalog { tables: map })
    }

    /// Finds a table by its exact, case-sensitive name.
    pub fn lookup(&self, name: &str) -> Result<&Table> {
        self.tables
            .get(name)
            .ok_or_else(|| Error::unknown_table(name))
    }

    pub fn get(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    /// Table names in introspection order.
    pub fn list_tables(&self) -> Vec<String> {
        self.tables.keys().cloned().collect()
    }

    pub fn tables(&self) -> impl ExactSizeIterator<Item = &Table> + '_ {
        self.tables.values()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
