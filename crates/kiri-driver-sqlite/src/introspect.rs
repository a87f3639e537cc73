use crate::error::classify;

use kiri_core::{
    schema::{Column, ForeignKey, OnDelete, Table, Type},
    Catalog, Error, Result,
};
use regex::Regex;
use rusqlite::Connection;
use std::collections::HashMap;

/// Builds a catalog from `sqlite_master` and the table pragmas.
pub(crate) fn catalog(connection: &Connection) -> Result<Catalog> {
    let patterns = Patterns::new()?;
    let mut tables = vec![];

    for (name, ddl) in user_tables(connection)? {
        let enums = patterns.check_enums(ddl.as_deref().unwrap_or(""));

        match table(connection, &patterns, &name, &enums)? {
            Some(table) => tables.push(table),
            None => tracing::warn!(table = %name, "skipping table without a primary key"),
        }
    }

    let catalog = Catalog::from_tables(tables)?;
    tracing::info!(tables = catalog.len(), "introspected sqlite schema");
    Ok(catalog)
}

fn user_tables(connection: &Connection) -> Result<Vec<(String, Option<String>)>> {
    let mut stmt = connection
        .prepare(
            "SELECT name, sql FROM sqlite_master \
             WHERE type = 'table' AND name NOT LIKE 'sqlite\\_%' ESCAPE '\\' \
             ORDER BY rowid",
        )
        .map_err(classify)?;

    let rows = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
        .map_err(classify)?;

    rows.collect::<rusqlite::Result<Vec<_>>>().map_err(classify)
}

struct RawColumn {
    name: String,
    declared: String,
    not_null: bool,
    has_default: bool,
    pk: i64,
}

fn table(
    connection: &Connection,
    patterns: &Patterns,
    name: &str,
    enums: &HashMap<String, Vec<String>>,
) -> Result<Option<Table>> {
    let mut stmt = connection
        .prepare(r#"SELECT name, type, "notnull", dflt_value IS NOT NULL, pk FROM pragma_table_info(?1) ORDER BY cid"#)
        .map_err(classify)?;

    let raw = stmt
        .query_map([name], |row| {
            Ok(RawColumn {
                name: row.get(0)?,
                declared: row.get(1)?,
                not_null: row.get(2)?,
                has_default: row.get(3)?,
                pk: row.get(4)?,
            })
        })
        .map_err(classify)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .map_err(classify)?;

    if raw.is_empty() {
        return Err(Error::schema_introspection(format!(
            "table `{name}` reports zero columns"
        )));
    }

    let mut pk: Vec<&RawColumn> = raw.iter().filter(|column| column.pk > 0).collect();
    if pk.is_empty() {
        return Ok(None);
    }
    pk.sort_by_key(|column| column.pk);

    // Only a lone `INTEGER PRIMARY KEY` aliases the rowid.
    let rowid_alias = match &pk[..] {
        [column] if column.declared.eq_ignore_ascii_case("INTEGER") => Some(column.name.as_str()),
        _ => None,
    };

    let columns = raw
        .iter()
        .map(|raw| {
            let ty = match enums.get(&raw.name) {
                Some(variants) => Type::Enum(variants.clone()),
                None => match patterns.declared_enum(&raw.declared) {
                    Some(variants) => Type::Enum(variants),
                    None => Type::from_declared(&raw.declared),
                },
            };

            let mut column = Column::new(raw.name.clone(), ty);
            column.nullable = !raw.not_null;
            column.has_default = raw.has_default;
            column.auto_increment = rowid_alias == Some(raw.name.as_str());
            column
        })
        .collect();

    let pk_names: Vec<&str> = pk.iter().map(|column| column.name.as_str()).collect();
    let foreign_keys = foreign_keys(connection, name)?;

    Table::new(name, columns, &pk_names, foreign_keys)
        .map(Some)
        .map_err(|err| err.context(Error::schema_introspection(format!("table `{name}`"))))
}

fn foreign_keys(connection: &Connection, name: &str) -> Result<Vec<ForeignKey>> {
    let mut stmt = connection
        .prepare(
            r#"SELECT "table", "from", "to", on_delete FROM pragma_foreign_key_list(?1) ORDER BY id, seq"#,
        )
        .map_err(classify)?;

    let raw = stmt
        .query_map([name], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, Option<String>>(2)?,
                row.get::<_, String>(3)?,
            ))
        })
        .map_err(classify)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .map_err(classify)?;

    let mut foreign_keys = vec![];

    for (references_table, column, to, on_delete) in raw {
        // `REFERENCES parent` without a column targets the parent's key.
        let references_column = match to {
            Some(to) => to,
            None => referenced_pk(connection, &references_table)?.unwrap_or_default(),
        };

        foreign_keys.push(ForeignKey {
            column,
            references_table,
            references_column,
            on_delete: OnDelete::from_sql(&on_delete),
        });
    }

    Ok(foreign_keys)
}

fn referenced_pk(connection: &Connection, table: &str) -> Result<Option<String>> {
    let mut stmt = connection
        .prepare("SELECT name FROM pragma_table_info(?1) WHERE pk = 1")
        .map_err(classify)?;

    let mut rows = stmt.query([table]).map_err(classify)?;
    match rows.next().map_err(classify)? {
        Some(row) => Ok(Some(row.get(0).map_err(classify)?)),
        None => Ok(None),
    }
}

struct Patterns {
    check_in: Regex,
    declared_enum: Regex,
    literal: Regex,
}

impl Patterns {
    fn new() -> Result<Patterns> {
        Ok(Patterns {
            check_in: Regex::new(
                r#"(?is)CHECK\s*\(\s*["`\[]?(\w+)["`\]]?\s+IN\s*\(((?:\s*'(?:[^']|'')*'\s*,?)+)\)\s*\)"#,
            )
            .map_err(Error::driver)?,
            declared_enum: Regex::new(r"(?is)^\s*ENUM\s*\((.*)\)\s*$").map_err(Error::driver)?,
            literal: Regex::new(r"'((?:[^']|'')*)'").map_err(Error::driver)?,
        })
    }

    /// Columns constrained by `CHECK (column IN ('a', 'b'))`.
    fn check_enums(&self, ddl: &str) -> HashMap<String, Vec<String>> {
        self.check_in
            .captures_iter(ddl)
            .map(|captures| (captures[1].to_string(), self.literals(&captures[2])))
            .collect()
    }

    /// Variants of an `ENUM('a', 'b')` declared type.
    fn declared_enum(&self, declared: &str) -> Option<Vec<String>> {
        let captures = self.declared_enum.captures(declared)?;
        let variants = self.literals(&captures[1]);
        (!variants.is_empty()).then_some(variants)
    }

    fn literals(&self, list: &str) -> Vec<String> {
        self.literal
            .captures_iter(list)
            .map(|captures| captures[1].replace("''", "'"))
            .collect()
    }
}
