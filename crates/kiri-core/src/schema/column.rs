use super::Type;

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// The column name as stored
    pub name: String,

    /// Declared type category
    pub ty: Type,

    /// True if the column accepts `NULL`
    pub nullable: bool,

    /// True if the store supplies a value when the column is omitted
    pub has_default: bool,

    /// True if the column is part of the primary key
    pub primary_key: bool,

    /// True if the store generates the column's value on insert
    pub auto_increment: bool,
}

impl Column {
    /// A nullable column with no default, outside the primary key.
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
            nullable: true,
            has_default: false,
            primary_key: false,
            auto_increment: false,
        }
    }

    /// True if a create payload must supply a value for this column.
    pub fn is_required(&self) -> bool {
        !self.nullable && !self.has_default && !self.auto_increment
    }
}
