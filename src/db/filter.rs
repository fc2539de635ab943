//! Query predicates shared by the SQLite repos and document-shaped callers.
//!
//! A [`Filter`] is a conjunction of conditions over named fields. It can be
//! rendered as a SQL `WHERE` clause, evaluated against a JSON document, or
//! serialized in the `{"field": value, "other": {"$ne": value}}` form that
//! document stores accept.
//!
//! `NeOrAbsent` is satisfied when the field holds a different value *or* has
//! no value at all. In SQL that is `IS NOT` rather than `!=`, since
//! `NULL != 'x'` evaluates to NULL and would drop the row.

use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    Eq { field: &'static str, value: String },
    NeOrAbsent { field: &'static str, value: String },
}

impl Condition {
    pub fn field(&self) -> &'static str {
        match self {
            Condition::Eq { field, .. } | Condition::NeOrAbsent { field, .. } => *field,
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Condition::Eq { value, .. } | Condition::NeOrAbsent { value, .. } => value,
        }
    }

    fn matches(&self, doc: &Value) -> bool {
        match self {
            Condition::Eq { field, value } => {
                doc.get(*field).and_then(Value::as_str) == Some(value.as_str())
            }
            Condition::NeOrAbsent { field, value } => match doc.get(*field) {
                None | Some(Value::Null) => true,
                Some(Value::String(s)) => s != value,
                Some(_) => true,
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    conditions: Vec<Condition>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, field: &'static str, value: impl Into<String>) -> Self {
        self.conditions.push(Condition::Eq {
            field,
            value: value.into(),
        });
        self
    }

    pub fn ne_or_absent(mut self, field: &'static str, value: impl Into<String>) -> Self {
        self.conditions.push(Condition::NeOrAbsent {
            field,
            value: value.into(),
        });
        self
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Render as a SQL predicate with numbered placeholders starting at `?1`.
    ///
    /// Field names come from code, never from input, so they are inlined.
    pub fn to_sql(&self) -> (String, Vec<String>) {
        if self.conditions.is_empty() {
            return ("1 = 1".to_string(), Vec::new());
        }

        let mut clauses = Vec::with_capacity(self.conditions.len());
        let mut values = Vec::with_capacity(self.conditions.len());
        for (idx, condition) in self.conditions.iter().enumerate() {
            let param_idx = idx + 1;
            let clause = match condition {
                Condition::Eq { field, .. } => format!("{field} = ?{param_idx}"),
                Condition::NeOrAbsent { field, .. } => format!("{field} IS NOT ?{param_idx}"),
            };
            clauses.push(clause);
            values.push(condition.value().to_string());
        }

        (clauses.join(" AND "), values)
    }

    /// Evaluate against a JSON object. Missing fields and nulls count as absent.
    pub fn matches(&self, doc: &Value) -> bool {
        self.conditions.iter().all(|c| c.matches(doc))
    }

    /// Document-store form of the filter.
    pub fn to_document(&self) -> Value {
        let mut doc = Map::new();
        for condition in &self.conditions {
            let clause = match condition {
                Condition::Eq { value, .. } => Value::String(value.clone()),
                Condition::NeOrAbsent { value, .. } => {
                    let mut ne = Map::new();
                    ne.insert("$ne".to_string(), Value::String(value.clone()));
                    Value::Object(ne)
                }
            };
            doc.insert(condition.field().to_string(), clause);
        }
        Value::Object(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn status_filter() -> Filter {
        Filter::new().eq("user_id", "u1").ne_or_absent("status", "left")
    }

    #[test]
    fn renders_sql_with_is_not() {
        let (sql, values) = status_filter().to_sql();
        assert_eq!(sql, "user_id = ?1 AND status IS NOT ?2");
        assert_eq!(values, vec!["u1".to_string(), "left".to_string()]);
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = Filter::new();
        assert_eq!(filter.to_sql().0, "1 = 1");
        assert!(filter.matches(&json!({})));
    }

    #[test]
    fn ne_or_absent_accepts_missing_and_null() {
        let filter = status_filter();
        assert!(filter.matches(&json!({"user_id": "u1"})));
        assert!(filter.matches(&json!({"user_id": "u1", "status": null})));
        assert!(filter.matches(&json!({"user_id": "u1", "status": "active"})));
        assert!(!filter.matches(&json!({"user_id": "u1", "status": "left"})));
    }

    #[test]
    fn ne_or_absent_accepts_non_string_values() {
        assert!(status_filter().matches(&json!({"user_id": "u1", "status": 3})));
    }

    #[test]
    fn eq_requires_exact_string() {
        let filter = status_filter();
        assert!(!filter.matches(&json!({"user_id": "u2"})));
        assert!(!filter.matches(&json!({"status": "active"})));
        assert!(!filter.matches(&json!({"user_id": null})));
    }

    #[test]
    fn document_form_uses_ne_operator() {
        assert_eq!(
            status_filter().to_document(),
            json!({"user_id": "u1", "status": {"$ne": "left"}})
        );
    }
}
