//! Values, records, and the small set of statements the gateway issues.

mod delete;
pub use delete::Delete;

mod filter;
pub use filter::Filter;

mod insert;
pub use insert::Insert;

mod key;
pub use key::Key;

mod limit;
pub use limit::Limit;

mod order_by;
pub use order_by::{Direction, OrderBy};

mod record;
pub use record::Record;

mod select;
pub use select::Select;

mod update;
pub use update::Update;

mod value;
pub use value::Value;

/// A statement understood by every driver.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Insert one row and return it as stored.
    Insert(Insert),

    /// Select rows, optionally filtered by primary key.
    Select(Select),

    /// Update one row by primary key and return it as stored.
    Update(Update),

    /// Delete one row by primary key, returning the affected count.
    Delete(Delete),
}

impl Statement {
    /// The table the statement targets.
    pub fn table(&self) -> &str {
        match self {
            Statement::Insert(stmt) => &stmt.table,
            Statement::Select(stmt) => &stmt.table,
            Statement::Update(stmt) => &stmt.table,
            Statement::Delete(stmt) => &stmt.table,
        }
    }

    /// True if executing the statement yields rows rather than a count.
    pub fn returns_rows(&self) -> bool {
        !matches!(self, Statement::Delete(_))
    }
}

impl From<Insert> for Statement {
    fn from(value: Insert) -> Self {
        Statement::Insert(value)
    }
}

impl From<Select> for Statement {
    fn from(value: Select) -> Self {
        Statement::Select(value)
    }
}

impl From<Update> for Statement {
    fn from(value: Update) -> Self {
        Statement::Update(value)
    }
}

impl From<Delete> for Statement {
    fn from(value: Delete) -> Self {
        Statement::Delete(value)
    }
}
