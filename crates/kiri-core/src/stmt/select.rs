use super::{Filter, Limit, OrderBy};

/// Selects every column of a table.
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub table: String,

    /// When set, only the row matching the key is returned.
    pub filter: Option<Filter>,

    pub order_by: Option<OrderBy>,

    pub limit: Option<Limit>,
}

impl Select {
    /// Selects the single row identified by `filter`.
    pub fn by_key(table: impl Into<String>, filter: Filter) -> Self {
        Self {
            table: table.into(),
            filter: Some(filter),
            order_by: None,
            limit: None,
        }
    }

    /// Selects one page of rows in a stable order.
    pub fn page(table: impl Into<String>, order_by: OrderBy, limit: Limit) -> Self {
        Self {
            table: table.into(),
            filter: None,
            order_by: Some(order_by),
            limit: Some(limit),
        }
    }
}
