#[derive(Debug, Clone, PartialEq)]
pub struct PrimaryKey {
    /// Positions in the table's column list, in key order
    pub columns: Vec<usize>,
}
