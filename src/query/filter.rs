//! Strict selector evaluation against documents
//!
//! No type coercion, exact match only. A missing field never matches, and a
//! null value never matches.

use serde_json::Value;

use super::selector::{FilterOp, Selector};

/// Evaluates selectors against documents
pub struct SelectorFilter;

impl SelectorFilter {
    /// Checks if a document matches every predicate of the selector
    pub fn matches(document: &Value, selector: &Selector) -> bool {
        selector
            .predicates
            .iter()
            .all(|pred| Self::matches_field(document, &pred.field, &pred.op))
    }

    fn matches_field(document: &Value, field: &str, op: &FilterOp) -> bool {
        let field_value = match document.get(field) {
            Some(v) => v,
            None => return false,
        };

        if field_value.is_null() {
            return false;
        }

        match op {
            FilterOp::Eq(expected) => field_value == expected,
            FilterOp::Gte(bound) => Self::gte_match(field_value, bound),
            FilterOp::Lt(bound) => Self::lt_match(field_value, bound),
        }
    }

    /// Greater than or equal (numbers and strings only)
    fn gte_match(actual: &Value, bound: &Value) -> bool {
        match (actual, bound) {
            (Value::Number(a), Value::Number(b)) => {
                if let (Some(af), Some(bf)) = (a.as_f64(), b.as_f64()) {
                    return af >= bf;
                }
                false
            }
            (Value::String(a), Value::String(b)) => a >= b,
            _ => false,
        }
    }

    /// Less than (numbers and strings only)
    fn lt_match(actual: &Value, bound: &Value) -> bool {
        match (actual, bound) {
            (Value::Number(a), Value::Number(b)) => {
                if let (Some(af), Some(bf)) = (a.as_f64(), b.as_f64()) {
                    return af < bf;
                }
                false
            }
            (Value::String(a), Value::String(b)) => a < b,
            _ => false,
        }
    }
}
