//! Property-based tests for apicatalog using proptest
//!
//! These tests generate random schemas and call logs to check the renderer
//! and the analytics over a wide range of inputs.

use apicatalog::analytics::{CallLogRecorder, aggregate};
use apicatalog::catalog::schema::{nesting_depth, render_schema, unresolved_references};
use apicatalog::catalog::seed::seed_apis;
use apicatalog::core::constants::{limits, storage_keys};
use apicatalog::core::{
    ApiCallLogRecord, HttpMethod, NewCallLog, OrderedMap, SchemaNode, SchemaType,
};
use apicatalog::storage::{CallLogRepository, KeyValueStore, MemoryStore};
use chrono::{TimeZone, Utc};
use proptest::prelude::*;

fn primitive_strategy() -> impl Strategy<Value = SchemaNode> {
    prop_oneof![
        Just(SchemaNode::primitive(SchemaType::String)),
        Just(SchemaNode::primitive(SchemaType::Integer)),
        Just(SchemaNode::primitive(SchemaType::Number)),
        Just(SchemaNode::primitive(SchemaType::Boolean)),
        Just(SchemaNode::default()),
        "[A-D]".prop_map(|name| SchemaNode::reference(&name)),
    ]
}

/// Arbitrary schema trees, at most a few levels deep
fn schema_strategy() -> impl Strategy<Value = SchemaNode> {
    primitive_strategy().prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            inner.clone().prop_map(SchemaNode::array),
            prop::collection::vec(("[a-z]{1,8}", inner), 0..4).prop_map(SchemaNode::object),
        ]
    })
}

/// Schema tables naming some of A-D; each entry may reference the others
fn schema_table_strategy() -> impl Strategy<Value = OrderedMap<SchemaNode>> {
    prop::collection::vec(("[A-D]", schema_strategy()), 0..4)
        .prop_map(|entries| entries.into_iter().collect())
}

fn log_strategy() -> impl Strategy<Value = Vec<ApiCallLogRecord>> {
    let api_ids = prop_oneof![
        Just("user-api"),
        Just("payments-api"),
        Just("inventory-api"),
        Just("retired-api"),
    ];
    let users = prop_oneof![Just("user-a"), Just("user-b"), Just("user-c")];

    prop::collection::vec((api_ids, users, 0i64..100_000), 0..60).prop_map(|entries| {
        entries
            .into_iter()
            .enumerate()
            .map(|(index, (api_id, user_id, offset))| ApiCallLogRecord {
                id: format!("log_{index}"),
                api_id: api_id.to_string(),
                endpoint_path: "/users".to_string(),
                endpoint_method: HttpMethod::Get,
                user_id: user_id.to_string(),
                timestamp: Utc
                    .timestamp_opt(1_700_000_000 + offset, 0)
                    .single()
                    .unwrap_or_else(Utc::now),
            })
            .collect()
    })
}

/// Deepest level of open `{`/`[` blocks while scanning the rendering
fn max_delimiter_depth(rendered: &str) -> usize {
    let mut depth = 0usize;
    let mut deepest = 0;
    for c in rendered.chars() {
        match c {
            '{' | '[' => {
                depth += 1;
                deepest = deepest.max(depth);
            }
            '}' | ']' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    deepest
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_render_nests_delimiters_to_tree_depth(
        node in schema_strategy(),
        schemas in schema_table_strategy(),
    ) {
        let rendered = render_schema(&node, &schemas);

        prop_assert_eq!(rendered.matches('{').count(), rendered.matches('}').count());
        prop_assert_eq!(rendered.matches('[').count(), rendered.matches(']').count());
        prop_assert_eq!(max_delimiter_depth(&rendered), nesting_depth(&node));
    }

    #[test]
    fn test_render_table_entries_terminate(schemas in schema_table_strategy()) {
        // Every entry may reference every other one, including itself.
        for (_, node) in schemas.iter() {
            let rendered = render_schema(node, &schemas);
            prop_assert_eq!(max_delimiter_depth(&rendered), nesting_depth(node));
        }
    }

    #[test]
    fn test_unresolved_references_are_missing_from_table(
        node in schema_strategy(),
        schemas in schema_table_strategy(),
    ) {
        let missing = unresolved_references(&node, &schemas);

        for name in &missing {
            prop_assert!(!schemas.contains_key(name));
        }
        let mut deduplicated = missing.clone();
        deduplicated.sort_unstable();
        deduplicated.dedup();
        prop_assert_eq!(deduplicated.len(), missing.len());
    }

    #[test]
    fn test_aggregate_counts_are_consistent(logs in log_strategy()) {
        let apis = seed_apis();
        let summary = aggregate(&logs, &apis);

        prop_assert_eq!(summary.total_calls, logs.len());
        prop_assert!(summary.unique_users <= summary.total_calls);
        prop_assert_eq!(
            summary.api_usage.iter().map(|usage| usage.count).sum::<usize>(),
            logs.len()
        );
        prop_assert!(summary.chart_data.len() <= limits::CHART_ENTRIES);
        prop_assert!(summary.recent_calls.len() <= limits::RECENT_CALLS);

        let max_label = limits::CHART_NAME_MAX_CHARS + limits::CHART_NAME_ELLIPSIS.len();
        for point in &summary.chart_data {
            prop_assert!(point.name.chars().count() <= max_label);
        }
        for pair in summary.api_usage.windows(2) {
            prop_assert!(pair[0].count >= pair[1].count);
        }
    }

    #[test]
    fn test_recorder_keeps_newest_records(existing in 0usize..520) {
        let store = MemoryStore::new();
        let logs: Vec<ApiCallLogRecord> = (0..existing)
            .map(|index| ApiCallLogRecord {
                id: format!("old_{index}"),
                api_id: "user-api".to_string(),
                endpoint_path: "/users".to_string(),
                endpoint_method: HttpMethod::Get,
                user_id: "user-a".to_string(),
                timestamp: Utc::now(),
            })
            .collect();
        store
            .set(storage_keys::CALL_LOGS, &serde_json::to_string(&logs).unwrap())
            .unwrap();

        let mut recorder = CallLogRecorder::load(CallLogRepository::new(store));
        let record = recorder
            .record(NewCallLog {
                api_id: "user-api".to_string(),
                endpoint_path: "/users".to_string(),
                endpoint_method: HttpMethod::Get,
                user_id: "user-b".to_string(),
            })
            .unwrap();

        let kept = recorder.logs();
        prop_assert_eq!(kept.len(), (existing + 1).min(limits::MAX_CALL_LOGS));
        prop_assert_eq!(&kept[0].id, &record.id);
        if existing > 0 {
            prop_assert_eq!(&kept[1].id, "old_0");
        }
    }
}
