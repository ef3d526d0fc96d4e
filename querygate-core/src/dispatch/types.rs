use crate::admission::{Operation, QueryDescriptor};
use serde::{Deserialize, Serialize};

/// Parameters forwarded to the backend untouched by admission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryExtras {
    pub page_size: Option<u32>,
    pub page: Option<u32>,
    pub alarm_mode: Option<u8>,
    #[serde(default)]
    pub filters: Vec<String>,
}

/// A search or histogram call as issued by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryRequest {
    pub table_id: u64,
    pub start_time: i64,
    pub end_time: i64,
    pub query: Option<String>,
    pub extras: QueryExtras,
    /// Caller holds the capability to skip window width checks.
    pub unbounded_window: bool,
}

impl QueryRequest {
    pub fn new(table_id: u64, start_time: i64, end_time: i64) -> Self {
        Self {
            table_id,
            start_time,
            end_time,
            ..Default::default()
        }
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn with_extras(mut self, extras: QueryExtras) -> Self {
        self.extras = extras;
        self
    }

    pub fn with_unbounded_window(mut self, unbounded: bool) -> Self {
        self.unbounded_window = unbounded;
        self
    }

    pub fn descriptor(&self, operation: Operation) -> QueryDescriptor {
        QueryDescriptor::new(
            operation,
            self.start_time,
            self.end_time,
            self.query.as_deref(),
        )
        .with_unbounded_window(self.unbounded_window)
    }

    /// Query-string parameters in the backend's naming.
    ///
    /// Absent values are omitted and each filter becomes its own `filters`
    /// pair. The query text is sent as written, not lower-cased.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("st", self.start_time.to_string()),
            ("et", self.end_time.to_string()),
        ];

        if let Some(query) = self.query.as_ref().filter(|q| !q.is_empty()) {
            params.push(("query", query.clone()));
        }
        if let Some(page_size) = self.extras.page_size {
            params.push(("pageSize", page_size.to_string()));
        }
        if let Some(page) = self.extras.page {
            params.push(("page", page.to_string()));
        }
        if let Some(alarm_mode) = self.extras.alarm_mode {
            params.push(("alarmMode", alarm_mode.to_string()));
        }
        for filter in &self.extras.filters {
            params.push(("filters", filter.clone()));
        }

        params
    }
}

/// Response wrapper used by every backend endpoint.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub code: i32,
    #[serde(default)]
    pub msg: String,
    pub data: Option<T>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LogsResponse {
    pub count: u64,
    pub cost: u64,
    pub logs: Vec<serde_json::Value>,
    pub hidden_fields: Vec<String>,
    pub default_fields: Vec<String>,
    pub keys: Vec<serde_json::Value>,
    pub limited: u64,
    pub terms: Vec<Vec<String>>,
    pub query: String,
    #[serde(rename = "where")]
    pub where_clause: String,
    pub is_trace: i32,
    pub is_need_sort: bool,
    pub sort_rule: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HistogramResponse {
    pub count: u64,
    pub progress: String,
    pub histograms: Vec<HistogramBucket>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HistogramBucket {
    pub count: u64,
    pub from: i64,
    pub to: i64,
    pub progress: String,
}
