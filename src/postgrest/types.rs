//! Types for the PostgREST builders

/// Direction of an `order` clause
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Smallest first
    Ascending,

    /// Largest (or newest) first
    Descending,
}

impl SortOrder {
    /// Convert the order to its string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        }
    }
}
