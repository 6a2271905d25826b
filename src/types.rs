//! Request and definition payloads passed through to the remote collection.
//!
//! Documents inside these types are opaque to the adapter; it forwards them
//! unexamined.

use bson::Document;
use serde::{Deserialize, Serialize};

/// Full parameter surface of a collection query.
///
/// The default request selects every document with no projection, order,
/// hint, skip, or limit.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct QueryRequest {
    /// Match condition; `None` selects everything.
    pub condition: Option<Document>,
    /// Field selection; `None` returns whole documents.
    pub selection: Option<Document>,
    /// Sort order.
    pub order_by: Option<Document>,
    /// Access-path hint.
    pub hint: Option<Document>,
    /// Documents to skip before the first returned one.
    #[serde(default)]
    pub skip: u64,
    /// Cap on returned documents; `None` is unbounded.
    pub limit: Option<i64>,
    /// Driver-defined query flags, forwarded verbatim.
    #[serde(default)]
    pub flags: i32,
}

impl QueryRequest {
    /// Request matching `condition`, otherwise default settings.
    pub fn with_condition(condition: Document) -> Self {
        Self {
            condition: Some(condition),
            ..Self::default()
        }
    }

    /// Same request capped at `limit` documents.
    pub fn limited(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Definition of one collection index.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IndexSpec {
    /// Index name, unique within the collection.
    pub name: String,
    /// Indexed keys and their directions, e.g. `doc! { "email": 1 }`.
    pub keys: Document,
    /// Reject documents that duplicate an existing key.
    #[serde(default)]
    pub unique: bool,
    /// Reject documents missing one of the indexed fields.
    #[serde(default)]
    pub enforced: bool,
}

impl IndexSpec {
    /// Non-unique, non-enforced index over `keys`.
    pub fn new(name: impl Into<String>, keys: Document) -> Self {
        Self {
            name: name.into(),
            keys,
            unique: false,
            enforced: false,
        }
    }

    /// Same index, marked unique.
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    #[test]
    fn default_request_is_unrestricted() {
        let request = QueryRequest::default();
        assert!(request.condition.is_none());
        assert_eq!(request.skip, 0);
        assert!(request.limit.is_none());
    }

    #[test]
    fn limited_keeps_the_condition() {
        let request = QueryRequest::with_condition(doc! { "qty": { "$gt": 1 } }).limited(1);
        assert_eq!(request.limit, Some(1));
        assert!(request.condition.is_some());
    }

    #[test]
    fn index_spec_deserializes_with_defaulted_flags() {
        let spec: IndexSpec =
            bson::from_document(doc! { "name": "ix_email", "keys": { "email": 1 } }).unwrap();
        assert_eq!(spec.name, "ix_email");
        assert!(!spec.unique);
        assert!(!spec.enforced);
    }
}
