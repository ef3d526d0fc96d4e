use crate::admission::Operation;

/// The facts an admission decision is made from.
///
/// Built fresh for every query call. Construction only copies and lower-cases
/// the query text, so it performs no I/O and cannot fail. An empty query text
/// is stored as absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryDescriptor {
    operation: Operation,
    start_time: i64,
    end_time: i64,
    query: Option<String>,
    unbounded_window: bool,
}

impl QueryDescriptor {
    pub fn new(
        operation: Operation,
        start_time: i64,
        end_time: i64,
        query_text: Option<&str>,
    ) -> Self {
        let query = query_text
            .filter(|q| !q.is_empty())
            .map(|q| q.to_lowercase());

        Self {
            operation,
            start_time,
            end_time,
            query,
            unbounded_window: false,
        }
    }

    /// Grants the caller-held capability to skip window width checks.
    pub fn with_unbounded_window(mut self, unbounded: bool) -> Self {
        self.unbounded_window = unbounded;
        self
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn start_time(&self) -> i64 {
        self.start_time
    }

    pub fn end_time(&self) -> i64 {
        self.end_time
    }

    /// Lower-cased query text, `None` when the caller sent none.
    pub fn normalized_query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn unbounded_window(&self) -> bool {
        self.unbounded_window
    }

    /// Both ends of the window are present (non-zero).
    pub fn is_time_bounded(&self) -> bool {
        self.start_time != 0 && self.end_time != 0
    }

    /// `end_time - start_time` in seconds. Negative for inverted windows.
    pub fn width(&self) -> i64 {
        self.end_time.saturating_sub(self.start_time)
    }
}
