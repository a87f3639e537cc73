//! Partitions a translated payload into the fields written to the store and
//! the fields dropped with a warning.

use crate::{schema::Table, FieldMapper, Inbound, Record, Value};

use serde::Serialize;
use std::fmt;

/// A payload field the gateway did not write.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum FieldWarning {
    /// The field names no column of the table.
    UnknownField { field: String },

    /// The field targets a key column the store generates.
    GeneratedKey { field: String },

    /// The field targets a key column of an existing row.
    KeyImmutable { field: String },

    /// The value cannot be stored in the column's type.
    TypeMismatch {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    /// The value is null but the column is not nullable.
    NullNotAllowed { field: String },

    /// The value is an array or object.
    NotScalar { field: String },
}

impl FieldWarning {
    /// The payload field the warning is about.
    pub fn field(&self) -> &str {
        match self {
            FieldWarning::UnknownField { field }
            | FieldWarning::GeneratedKey { field }
            | FieldWarning::KeyImmutable { field }
            | FieldWarning::TypeMismatch { field, .. }
            | FieldWarning::NullNotAllowed { field }
            | FieldWarning::NotScalar { field } => field,
        }
    }
}

impl fmt::Display for FieldWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldWarning::UnknownField { field } => write!(f, "unknown field `{field}`"),
            FieldWarning::GeneratedKey { field } => {
                write!(f, "`{field}` is generated by the store")
            }
            FieldWarning::KeyImmutable { field } => write!(f, "`{field}` is part of the key"),
            FieldWarning::TypeMismatch {
                field,
                expected,
                found,
            } => write!(f, "`{field}` expects {expected}, found {found}"),
            FieldWarning::NullNotAllowed { field } => write!(f, "`{field}` cannot be null"),
            FieldWarning::NotScalar { field } => write!(f, "`{field}` is not a scalar"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
    Create,
    Update,
}

#[derive(Debug, Default)]
pub(crate) struct Filtered {
    pub(crate) record: Record,
    pub(crate) warnings: Vec<FieldWarning>,
}

/// Applies key, type, and nullability rules to a translated payload.
pub(crate) fn filter(table: &Table, mapper: &FieldMapper, inbound: Inbound, mode: Mode) -> Filtered {
    let mut filtered = Filtered {
        record: Record::new(),
        warnings: inbound
            .dropped
            .into_iter()
            .map(|field| FieldWarning::UnknownField { field })
            .collect(),
    };

    for (name, value) in inbound.record {
        let Some(column) = table.column(&name) else {
            filtered.warnings.push(FieldWarning::UnknownField { field: name });
            continue;
        };

        let field = mapper.external(&table.name, &name).to_string();

        if column.auto_increment {
            filtered.warnings.push(FieldWarning::GeneratedKey { field });
            continue;
        }

        if column.primary_key && mode == Mode::Update {
            filtered.warnings.push(FieldWarning::KeyImmutable { field });
            continue;
        }

        let found = value.kind_name();
        let Some(value) = column.ty.coerce(value) else {
            filtered.warnings.push(FieldWarning::TypeMismatch {
                field,
                expected: column.ty.name(),
                found,
            });
            continue;
        };

        if value == Value::Null && !column.nullable {
            filtered.warnings.push(FieldWarning::NullNotAllowed { field });
            continue;
        }

        filtered.record.insert(name, value);
    }

    filtered
}

/// Required columns absent from `record`, in column order.
pub(crate) fn missing_required(table: &Table, record: &Record) -> Vec<String> {
    table
        .columns
        .iter()
        .filter(|column| column.is_required() && !record.contains(&column.name))
        .map(|column| column.name.clone())
        .collect()
}
