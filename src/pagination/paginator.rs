//! The cursor-following paginator.

use std::collections::VecDeque;

use futures::stream::{self, LocalBoxStream, StreamExt};
use jmespath::Expression;
use serde_json::Value;

use crate::clients::{HttpMethod, QueryParams};
use crate::endpoints::{CallArgs, Operation, PaginatedEndpoint};
use crate::pagination::select::{is_truthy, parse_cursor_query, prepare_body, set_start};
use crate::pagination::{PaginatorError, Progress};

/// Where the next call picks up.
#[derive(Clone, Debug, PartialEq)]
enum Cursor {
    /// POST style: the value for the body's `start`.
    Start(Value),
    /// GET style: the query parameters parsed from the `next` URL.
    Query(QueryParams),
}

#[derive(Clone, Debug, PartialEq)]
enum State {
    Start,
    Next(Cursor),
    Done,
}

/// Drives one paged operation of an endpoint until its cursor runs out.
///
/// Pages are fetched lazily, one call per page. A page with no hits ends
/// the run: the first such page is yielded once, later ones are dropped.
/// Runs are not restartable; build a new paginator to start over.
///
/// # Example
///
/// ```rust,ignore
/// use futures::StreamExt;
/// use salesforce_ocapi::endpoints::{CallArgs, Operation};
/// use salesforce_ocapi::Paginator;
/// use serde_json::json;
///
/// let args = CallArgs::new().body(json!({
///     "query": {"match_all_query": {}},
///     "select": "(hits.(data.(order_no)))",
/// }));
/// let mut paginator = Paginator::new(&order_search, Operation::Search, args, true)?;
///
/// let mut hits = paginator.hits();
/// while let Some(hit) = hits.next().await {
///     println!("{}", hit?["data"]["order_no"]);
/// }
/// ```
pub struct Paginator<'a, E: PaginatedEndpoint> {
    endpoint: &'a E,
    operation: Operation,
    args: CallArgs,
    progress: Progress,
    state: State,
    pending_hits: VecDeque<Value>,
}

impl<'a, E: PaginatedEndpoint> Paginator<'a, E> {
    /// Creates a paginator over `operation` of `endpoint`.
    ///
    /// The body's `select`, if any, is extended with the cursor fields, and
    /// a `count` query parameter overrides the body's `count`.
    ///
    /// # Errors
    ///
    /// Returns [`PaginatorError::NotOcapiEndpoint`] if the endpoint has no
    /// resource, or [`PaginatorError::OcapiMethodNotFound`] if it does not
    /// support `operation`.
    pub fn new(
        endpoint: &'a E,
        operation: Operation,
        mut args: CallArgs,
        progress: bool,
    ) -> Result<Self, PaginatorError> {
        if endpoint.resource().is_empty() {
            return Err(PaginatorError::NotOcapiEndpoint {
                endpoint: endpoint.name().to_string(),
            });
        }
        if !endpoint.supports(operation) {
            return Err(PaginatorError::OcapiMethodNotFound {
                endpoint: endpoint.name().to_string(),
                method: operation.name().to_string(),
            });
        }

        let count = args.param_value("count").map(str::to_string);
        if let Some(body) = args.body.as_mut() {
            prepare_body(body, count.as_deref());
        }

        Ok(Self {
            endpoint,
            operation,
            args,
            progress: Progress::new(progress),
            state: State::Start,
            pending_hits: VecDeque::new(),
        })
    }

    /// Creates a paginator from an operation's method name, e.g. `"Search"`.
    ///
    /// # Errors
    ///
    /// Returns [`PaginatorError::OcapiMethodNotFound`] for unknown names,
    /// plus the errors of [`new`](Self::new).
    pub fn by_name(
        endpoint: &'a E,
        method: &str,
        args: CallArgs,
        progress: bool,
    ) -> Result<Self, PaginatorError> {
        let operation =
            method
                .parse::<Operation>()
                .map_err(|_| PaginatorError::OcapiMethodNotFound {
                    endpoint: endpoint.name().to_string(),
                    method: method.to_string(),
                })?;
        Self::new(endpoint, operation, args, progress)
    }

    /// Returns the operation being paged.
    #[must_use]
    pub const fn operation(&self) -> Operation {
        self.operation
    }

    /// Returns the current call arguments, including cursor updates.
    #[must_use]
    pub const fn args(&self) -> &CallArgs {
        &self.args
    }

    /// Returns a handle to the progress bar.
    #[must_use]
    pub fn progress(&self) -> Progress {
        self.progress.clone()
    }

    /// Prints a message above the progress bar.
    ///
    /// # Errors
    ///
    /// Returns [`PaginatorError::ProgressHidden`] if progress is disabled.
    pub fn write(&self, message: impl AsRef<str>) -> Result<(), PaginatorError> {
        self.progress.write(message)
    }

    /// Returns `true` once the cursor is exhausted or a call failed.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.state == State::Done
    }

    /// Fetches the next page.
    ///
    /// Returns `Ok(None)` when the run is over. After an error the run is
    /// over as well.
    ///
    /// # Errors
    ///
    /// Returns [`PaginatorError`] if the call fails, the status is not 2xx,
    /// or the body is not JSON.
    pub async fn next_page(&mut self) -> Result<Option<Value>, PaginatorError> {
        let first = match std::mem::replace(&mut self.state, State::Done) {
            State::Done => return Ok(None),
            State::Start => true,
            State::Next(cursor) => {
                self.apply(cursor);
                false
            }
        };

        let (method, page) = match self.fetch().await {
            Ok(fetched) => fetched,
            Err(error) => {
                self.progress.finish();
                return Err(error);
            }
        };

        let hits = hit_count(&page);
        if hits == 0 {
            self.progress.finish();
            if first {
                return Ok(Some(page));
            }
            tracing::debug!(
                endpoint = self.endpoint.name(),
                "Page without hits, stopping"
            );
            return Ok(None);
        }

        if first {
            if let Some(total) = page.get("total").and_then(Value::as_u64) {
                self.progress.set_total(total);
            }
        }
        self.progress.advance(hits as u64);

        match next_cursor(method, &page) {
            Some(cursor) => self.state = State::Next(cursor),
            None => self.progress.finish(),
        }
        Ok(Some(page))
    }

    /// Returns the next hit, fetching pages as needed.
    ///
    /// # Errors
    ///
    /// Returns [`PaginatorError`] if a page fetch fails.
    pub async fn next_hit(&mut self) -> Result<Option<Value>, PaginatorError> {
        loop {
            if let Some(hit) = self.pending_hits.pop_front() {
                return Ok(Some(hit));
            }
            match self.next_page().await? {
                Some(page) => self.pending_hits.extend(take_hits(page)),
                None => return Ok(None),
            }
        }
    }

    /// Applies `expression` to the next page that has hits.
    ///
    /// # Errors
    ///
    /// Returns [`PaginatorError`] if a page fetch fails or the expression
    /// cannot be evaluated.
    pub async fn next_match(
        &mut self,
        expression: &Expression<'_>,
    ) -> Result<Option<Value>, PaginatorError> {
        loop {
            let Some(page) = self.next_page().await? else {
                return Ok(None);
            };
            if hit_count(&page) == 0 {
                continue;
            }
            let result = expression
                .search(page)
                .map_err(|e| expression_error(expression.as_str(), &e))?;
            return Ok(Some(serde_json::to_value(&*result)?));
        }
    }

    /// Streams raw pages.
    pub fn pages(&mut self) -> LocalBoxStream<'_, Result<Value, PaginatorError>> {
        stream::unfold(self, |paginator| async move {
            paginator.next_page().await.transpose().map(|item| (item, paginator))
        })
        .boxed_local()
    }

    /// Streams hits across all pages, in order.
    pub fn hits(&mut self) -> LocalBoxStream<'_, Result<Value, PaginatorError>> {
        stream::unfold(self, |paginator| async move {
            paginator.next_hit().await.transpose().map(|item| (item, paginator))
        })
        .boxed_local()
    }

    /// Streams the result of a JMESPath `expression` applied to each page
    /// with hits.
    ///
    /// # Errors
    ///
    /// Returns [`PaginatorError::Expression`] if the expression does not
    /// compile.
    pub fn search(
        &mut self,
        expression: &str,
    ) -> Result<LocalBoxStream<'_, Result<Value, PaginatorError>>, PaginatorError> {
        let compiled =
            jmespath::compile(expression).map_err(|e| expression_error(expression, &e))?;
        Ok(stream::unfold(
            (self, compiled),
            |(paginator, compiled)| async move {
                paginator
                    .next_match(&compiled)
                    .await
                    .transpose()
                    .map(|item| (item, (paginator, compiled)))
            },
        )
        .boxed_local())
    }

    async fn fetch(&self) -> Result<(HttpMethod, Value), PaginatorError> {
        let response = self.endpoint.invoke(self.operation, &self.args).await?;
        response.error_for_status()?;
        let page = response.json_value()?;
        tracing::debug!(
            endpoint = self.endpoint.name(),
            operation = %self.operation,
            status = response.code,
            hits = hit_count(&page),
            "Fetched page"
        );
        Ok((response.method, page))
    }

    fn apply(&mut self, cursor: Cursor) {
        match cursor {
            Cursor::Start(start) => set_start(&mut self.args.body, start),
            Cursor::Query(params) => self.args.params = params,
        }
    }
}

impl<E: PaginatedEndpoint> std::fmt::Debug for Paginator<'_, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Paginator")
            .field("endpoint", &self.endpoint.name())
            .field("operation", &self.operation)
            .field("state", &self.state)
            .field("progress", &self.progress)
            .finish_non_exhaustive()
    }
}

impl<E: PaginatedEndpoint> Drop for Paginator<'_, E> {
    fn drop(&mut self) {
        self.progress.finish();
    }
}

fn hit_count(page: &Value) -> usize {
    page.get("hits").and_then(Value::as_array).map_or(0, Vec::len)
}

fn take_hits(mut page: Value) -> Vec<Value> {
    match page.get_mut("hits").map(Value::take) {
        Some(Value::Array(hits)) => hits,
        _ => Vec::new(),
    }
}

/// Reads the continuation cursor for the style of `method`.
fn next_cursor(method: HttpMethod, page: &Value) -> Option<Cursor> {
    let next = page.get("next").filter(|next| is_truthy(next))?;
    match method {
        HttpMethod::Post => next.get("start").cloned().map(Cursor::Start),
        HttpMethod::Get => next
            .as_str()
            .map(|url| Cursor::Query(parse_cursor_query(url))),
        _ => None,
    }
}

fn expression_error(expression: &str, error: &jmespath::JmespathError) -> PaginatorError {
    PaginatorError::Expression {
        expression: expression.to_string(),
        reason: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_post_cursor_reads_start() {
        let page = json!({"hits": [1], "next": {"start": 25}});
        assert_eq!(
            next_cursor(HttpMethod::Post, &page),
            Some(Cursor::Start(json!(25)))
        );
    }

    #[test]
    fn test_post_cursor_without_start_ends() {
        let page = json!({"hits": [1], "next": {"count": 25}});
        assert_eq!(next_cursor(HttpMethod::Post, &page), None);
    }

    #[test]
    fn test_get_cursor_parses_query() {
        let page = json!({"hits": [1], "next": "https://x/product_search?q=shoes&start=25"});
        assert_eq!(
            next_cursor(HttpMethod::Get, &page),
            Some(Cursor::Query(vec![
                ("q".to_string(), "shoes".to_string()),
                ("start".to_string(), "25".to_string()),
            ]))
        );
    }

    #[test]
    fn test_falsy_next_ends() {
        assert_eq!(next_cursor(HttpMethod::Get, &json!({"next": ""})), None);
        assert_eq!(next_cursor(HttpMethod::Post, &json!({"next": null})), None);
        assert_eq!(next_cursor(HttpMethod::Post, &json!({})), None);
    }

    #[test]
    fn test_take_hits() {
        let page = json!({"hits": [{"id": 1}, {"id": 2}], "total": 2});
        assert_eq!(take_hits(page), vec![json!({"id": 1}), json!({"id": 2})]);
        assert!(take_hits(json!({"total": 0})).is_empty());
    }
}
