use crate::admission::Operation;
use crate::dispatch::*;
use pretty_assertions::assert_eq;

#[test]
fn params_omit_absent_values_and_keep_query_case() {
    // Arrange
    let request = QueryRequest::new(3, 100, 200).with_query("Msg LIKE '%X%'");

    // Act
    let params = request.to_params();

    // Assert
    assert_eq!(
        params,
        vec![
            ("st", "100".to_string()),
            ("et", "200".to_string()),
            ("query", "Msg LIKE '%X%'".to_string()),
        ]
    );
}

#[test]
fn params_include_extras_and_repeat_filters() {
    let request = QueryRequest::new(3, 100, 200).with_extras(QueryExtras {
        page_size: Some(50),
        page: Some(1),
        alarm_mode: Some(0),
        filters: vec!["a=1".to_string(), "b=2".to_string()],
    });

    let params = request.to_params();

    assert_eq!(
        params,
        vec![
            ("st", "100".to_string()),
            ("et", "200".to_string()),
            ("pageSize", "50".to_string()),
            ("page", "1".to_string()),
            ("alarmMode", "0".to_string()),
            ("filters", "a=1".to_string()),
            ("filters", "b=2".to_string()),
        ]
    );
}

#[test]
fn descriptor_is_lower_cased_copy() {
    let request = QueryRequest::new(3, 100, 200)
        .with_query("Msg LIKE 'X'")
        .with_unbounded_window(true);

    let descriptor = request.descriptor(Operation::Histogram);

    assert_eq!(descriptor.normalized_query(), Some("msg like 'x'"));
    assert_eq!(descriptor.operation(), Operation::Histogram);
    assert_eq!(descriptor.width(), 100);
    assert!(descriptor.unbounded_window());
    assert_eq!(request.query.as_deref(), Some("Msg LIKE 'X'"));
}

#[test]
fn decode_logs_envelope() {
    let body = r#"{
        "code": 0,
        "msg": "succ",
        "data": {
            "count": 2,
            "cost": 13,
            "logs": [{"_raw_log_": "a"}, {"_raw_log_": "b"}],
            "hiddenFields": ["_source_"],
            "defaultFields": ["_time_second_"],
            "limited": 100,
            "query": "status=500",
            "where": "status=500",
            "isTrace": 0
        }
    }"#;

    let envelope: Envelope<LogsResponse> = serde_json::from_str(body).unwrap();
    let data = envelope.data.unwrap();

    assert_eq!(envelope.code, 0);
    assert_eq!(data.count, 2);
    assert_eq!(data.logs.len(), 2);
    assert_eq!(data.hidden_fields, vec!["_source_".to_string()]);
    assert_eq!(data.where_clause, "status=500");
    assert!(data.terms.is_empty());
}

#[test]
fn decode_histogram_envelope() {
    let body = r#"{
        "code": 0,
        "msg": "succ",
        "data": {
            "count": 5,
            "progress": "",
            "histograms": [
                {"count": 2, "from": 100, "to": 160, "progress": ""},
                {"count": 3, "from": 160, "to": 220}
            ]
        }
    }"#;

    let envelope: Envelope<HistogramResponse> = serde_json::from_str(body).unwrap();
    let data = envelope.data.unwrap();

    assert_eq!(data.histograms.len(), 2);
    assert_eq!(data.histograms[1].from, 160);
    assert_eq!(
        data.histograms.iter().map(|h| h.count).sum::<u64>(),
        data.count
    );
}
