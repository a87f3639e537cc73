/// Offset pagination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limit {
    /// Rows to skip.
    pub offset: u64,

    /// Maximum rows to return.
    pub limit: u64,
}

impl Limit {
    pub fn new(offset: u64, limit: u64) -> Self {
        Self { offset, limit }
    }
}
