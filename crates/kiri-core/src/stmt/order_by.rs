#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub exprs: Vec<(String, Direction)>,
}

impl OrderBy {
    /// Ascending order over the given columns, most significant first.
    pub fn asc<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            exprs: columns
                .into_iter()
                .map(|column| (column.into(), Direction::Asc))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }
}
