//! Request body and cursor helpers for the paginator.

use std::borrow::Cow;

use serde_json::{Map, Value};

use crate::clients::QueryParams;

/// Fields every paged request must select for the cursor to work.
pub const REQUIRED_FIELDS: [&str; 3] = ["next", "count", "total"];

/// Adds the cursor fields to a `select` expression.
///
/// The outer parentheses are stripped, the remainder split on top-level
/// commas, the cursor fields appended and duplicates dropped, keeping the
/// first occurrence.
///
/// ```rust
/// use salesforce_ocapi::pagination::normalize_select;
///
/// assert_eq!(normalize_select("(a,b,total)"), "(a,b,total,next,count)");
/// ```
#[must_use]
pub fn normalize_select(select: &str) -> String {
    let trimmed = select.trim();
    let inner = trimmed
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .unwrap_or(trimmed);

    let mut fields: Vec<&str> = Vec::new();
    for field in split_top_level(inner) {
        if !field.is_empty() && !fields.contains(&field) {
            fields.push(field);
        }
    }
    for field in REQUIRED_FIELDS {
        if !fields.contains(&field) {
            fields.push(field);
        }
    }
    format!("({})", fields.join(","))
}

fn split_top_level(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (index, ch) in text.char_indices() {
        match ch {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(text[start..index].trim());
                start = index + 1;
            }
            _ => {}
        }
    }
    parts.push(text[start..].trim());
    parts
}

/// Prepares a POST body template for paging.
///
/// Normalizes a string `select`, and copies a `count` query parameter into
/// the body, as an integer when it parses as one.
pub fn prepare_body(body: &mut Value, count: Option<&str>) {
    let Some(object) = body.as_object_mut() else {
        return;
    };
    if let Some(select) = object.get("select").and_then(Value::as_str) {
        let normalized = normalize_select(select);
        object.insert("select".to_string(), Value::String(normalized));
    }
    if let Some(count) = count {
        let value = count
            .parse::<i64>()
            .map_or_else(|_| Value::String(count.to_string()), Value::from);
        object.insert("count".to_string(), value);
    }
}

/// Sets the body's `start` to the cursor value, creating a body if needed.
pub fn set_start(body: &mut Option<Value>, start: Value) {
    let target = body.get_or_insert_with(|| Value::Object(Map::new()));
    if let Some(object) = target.as_object_mut() {
        object.insert("start".to_string(), start);
    }
}

/// Parses the query string of a GET `next` URL into parameters.
///
/// `+` decodes to a space and parameters with blank values are dropped.
///
/// ```rust
/// use salesforce_ocapi::pagination::parse_cursor_query;
///
/// let params = parse_cursor_query("https://host/dw/shop/v20_4/product_search?q=red+shoes&start=25&count=25");
/// assert_eq!(params[0], ("q".to_string(), "red shoes".to_string()));
/// ```
#[must_use]
pub fn parse_cursor_query(next: &str) -> QueryParams {
    let query = next.split_once('?').map_or("", |(_, query)| query);
    let query = query.split_once('#').map_or(query, |(query, _)| query);

    query
        .split('&')
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            let value = decode(value);
            if value.is_empty() {
                return None;
            }
            Some((decode(key), value))
        })
        .collect()
}

fn decode(text: &str) -> String {
    let spaced = text.replace('+', " ");
    let decoded = urlencoding::decode(&spaced).map(Cow::into_owned);
    decoded.unwrap_or(spaced)
}

/// Returns `true` for JSON values that count as present: not null, false,
/// zero, or empty.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}
