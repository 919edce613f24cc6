//! Filter operations for the PostgREST builders

use std::fmt;

/// Operator for filter expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    /// Equal to
    Eq,
}

impl FilterOperator {
    /// Convert the operator to its string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperator::Eq => "eq",
        }
    }

    /// Render `operator.value` as PostgREST expects it in the query string
    pub fn expression(&self, value: impl fmt::Display) -> String {
        format!("{}.{}", self.as_str(), value)
    }
}
