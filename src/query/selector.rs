//! Selector structures for document lookups
//!
//! A selector is a conjunction of predicates; all predicates must hold for a
//! document to match.

use serde_json::Value;

/// Filter operation types
#[derive(Debug, Clone, PartialEq)]
pub enum FilterOp {
    /// Equality: field = value
    Eq(Value),
    /// Greater than or equal: field >= value
    Gte(Value),
    /// Less than: field < value
    Lt(Value),
}

impl FilterOp {
    /// Returns true if this is an equality operation
    pub fn is_equality(&self) -> bool {
        matches!(self, FilterOp::Eq(_))
    }
}

/// A single predicate (field + operation)
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    /// Field name
    pub field: String,
    /// Filter operation
    pub op: FilterOp,
}

impl Predicate {
    /// Create an equality predicate
    pub fn eq(field: impl Into<String>, value: Value) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::Eq(value),
        }
    }

    /// Create a lower-bound predicate (gte)
    pub fn gte(field: impl Into<String>, value: Value) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::Gte(value),
        }
    }

    /// Create an upper-bound predicate (lt)
    pub fn lt(field: impl Into<String>, value: Value) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::Lt(value),
        }
    }
}

/// A conjunction of predicates (AND semantics)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selector {
    /// Predicates, all of which must match
    pub predicates: Vec<Predicate>,
}

impl Selector {
    /// Creates an empty selector (matches every document)
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an equality predicate
    pub fn eq(mut self, field: impl Into<String>, value: Value) -> Self {
        self.predicates.push(Predicate::eq(field, value));
        self
    }

    /// Adds a lower-bound predicate
    pub fn gte(mut self, field: impl Into<String>, value: Value) -> Self {
        self.predicates.push(Predicate::gte(field, value));
        self
    }

    /// Adds an upper-bound predicate
    pub fn lt(mut self, field: impl Into<String>, value: Value) -> Self {
        self.predicates.push(Predicate::lt(field, value));
        self
    }

    /// Returns true if the selector has no predicates
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Sort specification (single field)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    /// Field to sort by
    pub field: String,
    /// Sort direction
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_selector_builder() {
        let selector = Selector::new()
            .eq("_id", json!("file_123"))
            .gte("n", json!(0));

        assert_eq!(selector.predicates.len(), 2);
        assert!(selector.predicates[0].op.is_equality());
        assert!(!selector.predicates[1].op.is_equality());
    }

    #[test]
    fn test_empty_selector() {
        let selector = Selector::new();
        assert!(selector.is_empty());

        let selector = selector.eq("filename", json!("a.txt"));
        assert!(!selector.is_empty());
    }

    #[test]
    fn test_predicate_constructors() {
        let eq = Predicate::eq("filename", json!("report.pdf"));
        assert_eq!(eq.field, "filename");
        assert!(eq.op.is_equality());

        let lt = Predicate::lt("n", json!(4));
        assert_eq!(lt.op, FilterOp::Lt(json!(4)));
    }

    #[test]
    fn test_sort_spec() {
        let asc = SortSpec::asc("n");
        assert_eq!(asc.field, "n");
        assert_eq!(asc.direction, SortDirection::Asc);

        let desc = SortSpec::desc("uploaded_at");
        assert_eq!(desc.direction, SortDirection::Desc);
    }
}
