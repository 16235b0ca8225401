//! Paged operation tags and their call arguments.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::clients::{Headers, QueryParams};

/// A paged search operation.
///
/// Tags can be parsed from their method name in either `PascalCase` or
/// `snake_case`.
///
/// # Example
///
/// ```rust
/// use salesforce_ocapi::endpoints::Operation;
///
/// assert_eq!("Search".parse::<Operation>().unwrap(), Operation::Search);
/// assert_eq!("customer_search".parse::<Operation>().unwrap(), Operation::CustomerSearch);
/// assert!("Delete".parse::<Operation>().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `search` on `OrderSearch`, `ProductSearch` and `JobExecutionSearch`.
    Search,
    /// `search` on `CustomObjectsSearch`; takes the object type as a path argument.
    SearchCustomObjects,
    /// `customer_search` on `CustomerLists`; takes the list ID as a path argument.
    CustomerSearch,
}

impl Operation {
    /// Returns the method name of this operation.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Search => "Search",
            Self::SearchCustomObjects => "SearchCustomObjects",
            Self::CustomerSearch => "CustomerSearch",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a name does not match any [`Operation`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("Unknown operation \"{0}\"")]
pub struct UnknownOperation(pub String);

impl FromStr for Operation {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Search" | "search" => Ok(Self::Search),
            "SearchCustomObjects" | "search_custom_objects" => Ok(Self::SearchCustomObjects),
            "CustomerSearch" | "customer_search" => Ok(Self::CustomerSearch),
            other => Err(UnknownOperation(other.to_string())),
        }
    }
}

/// Arguments forwarded to every call of a paged operation.
///
/// # Example
///
/// ```rust
/// use salesforce_ocapi::endpoints::CallArgs;
/// use serde_json::json;
///
/// let args = CallArgs::new()
///     .path_arg("MyObjectType")
///     .body(json!({"query": {"match_all_query": {}}, "select": "(**)"}))
///     .param("count", "200");
///
/// assert_eq!(args.path_arg_at(0), Some("MyObjectType"));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CallArgs {
    /// Positional path arguments, e.g. an object type or list ID.
    pub path: Vec<String>,
    /// The request body template for POST-style operations.
    pub body: Option<Value>,
    /// Query parameters for GET-style operations.
    pub params: QueryParams,
    /// Extra request headers.
    pub headers: Headers,
}

impl CallArgs {
    /// Creates empty call arguments.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a positional path argument.
    #[must_use]
    pub fn path_arg(mut self, value: impl Into<String>) -> Self {
        self.path.push(value.into());
        self
    }

    /// Sets the request body template.
    #[must_use]
    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Adds a request header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Returns the positional path argument at `index`.
    #[must_use]
    pub fn path_arg_at(&self, index: usize) -> Option<&str> {
        self.path.get(index).map(String::as_str)
    }

    /// Returns the body template, or an empty JSON object.
    #[must_use]
    pub fn body_or_empty(&self) -> Value {
        self.body
            .clone()
            .unwrap_or_else(|| Value::Object(serde_json::Map::new()))
    }

    /// Returns the first value of a query parameter.
    #[must_use]
    pub fn param_value(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_operation_names_round_trip() {
        for op in [
            Operation::Search,
            Operation::SearchCustomObjects,
            Operation::CustomerSearch,
        ] {
            assert_eq!(op.name().parse::<Operation>().unwrap(), op);
        }
    }

    #[test]
    fn test_unknown_operation() {
        let err = "GetOrder".parse::<Operation>().unwrap_err();
        assert_eq!(err.0, "GetOrder");
    }

    #[test]
    fn test_body_or_empty() {
        assert_eq!(CallArgs::new().body_or_empty(), json!({}));
        assert_eq!(
            CallArgs::new().body(json!({"count": 5})).body_or_empty(),
            json!({"count": 5})
        );
    }

    #[test]
    fn test_param_value_returns_first_match() {
        let args = CallArgs::new().param("count", "25").param("count", "50");
        assert_eq!(args.param_value("count"), Some("25"));
        assert_eq!(args.param_value("start"), None);
    }
}
