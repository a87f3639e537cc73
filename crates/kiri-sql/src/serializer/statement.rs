use super::{Comma, Delimited, Formatter, Ident, Params, ToSql};

use kiri_core::stmt::{
    Delete, Direction, Filter, Insert, Limit, OrderBy, Select, Statement, Update, Value,
};

impl ToSql for &Statement {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self {
            Statement::Insert(stmt) => stmt.to_sql(f),
            Statement::Select(stmt) => stmt.to_sql(f),
            Statement::Update(stmt) => stmt.to_sql(f),
            Statement::Delete(stmt) => stmt.to_sql(f),
        }
    }
}

impl ToSql for &Insert {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let table = Ident(&self.table);

        if self.values.is_empty() {
            fmt!(f, "INSERT INTO ", table, " DEFAULT VALUES RETURNING *");
            return;
        }

        let columns = Comma(self.values.names().map(Ident));
        let values = Comma(self.values.iter().map(|(_, value)| value));

        fmt!(f, "INSERT INTO ", table, " (", columns, ") VALUES (", values, ") RETURNING *");
    }
}

impl ToSql for &Select {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let table = Ident(&self.table);
        let filter = self.filter.as_ref().map(Where);
        let order_by = self.order_by.as_ref().filter(|order_by| !order_by.is_empty());

        fmt!(f, "SELECT * FROM ", table, filter, order_by, self.limit);
    }
}

impl ToSql for &Update {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let table = Ident(&self.table);
        let assignments = Comma(self.assignments.iter().map(Assignment));
        let filter = Where(&self.filter);

        fmt!(f, "UPDATE ", table, " SET ", assignments, filter, " RETURNING *");
    }
}

impl ToSql for &Delete {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let table = Ident(&self.table);
        let filter = Where(&self.filter);

        fmt!(f, "DELETE FROM ", table, filter);
    }
}

/// `"column" = ?n`
struct Assignment<'a>((&'a str, &'a Value));

impl ToSql for Assignment<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let (column, value) = self.0;
        fmt!(f, Ident(column), " = ", value);
    }
}

/// ` WHERE "a" = ?1 AND "b" = ?2`
struct Where<'a>(&'a Filter);

impl ToSql for Where<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let conditions = Delimited(self.0.pairs().map(Assignment), " AND ");
        fmt!(f, " WHERE ", conditions);
    }
}

impl ToSql for &OrderBy {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let exprs = Comma(self.exprs.iter().map(|(column, direction)| {
            let direction = match direction {
                Direction::Asc => " ASC",
                Direction::Desc => " DESC",
            };
            OrderExpr(column, direction)
        }));

        fmt!(f, " ORDER BY ", exprs);
    }
}

struct OrderExpr<'a>(&'a str, &'static str);

impl ToSql for OrderExpr<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, Ident(self.0), self.1);
    }
}

impl ToSql for Limit {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let limit = Value::I64(i64::try_from(self.limit).unwrap_or(i64::MAX));
        let offset = Value::I64(i64::try_from(self.offset).unwrap_or(i64::MAX));

        fmt!(f, " LIMIT ", &limit, " OFFSET ", &offset);
    }
}
