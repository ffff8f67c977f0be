use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;
use std::sync::Arc;

use crate::core::constants::{labels, limits};
use crate::core::types::{ApiCallLogRecord, ApiDefinition};
use crate::reporting::logging;

/// Call count of one API
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiUsage {
    pub id: String,
    pub name: String,
    pub count: usize,
}

/// One bar of the usage chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    pub name: String,
    pub calls: usize,
}

/// A log record annotated with the display name of its API
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentCall {
    #[serde(flatten)]
    pub record: ApiCallLogRecord,
    pub api_name: String,
}

/// Summary statistics over the call log
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub total_calls: usize,
    pub unique_users: usize,
    pub api_usage: Vec<ApiUsage>,
    pub chart_data: Vec<ChartPoint>,
    pub recent_calls: Vec<RecentCall>,
}

impl AnalyticsSummary {
    /// The API with the most calls, if any call was logged.
    pub fn most_popular(&self) -> Option<&ApiUsage> {
        self.api_usage.first()
    }
}

/// Cut a chart label to 15 characters plus an ellipsis.
pub fn truncate_label(name: &str) -> String {
    if name.chars().count() > limits::CHART_NAME_MAX_CHARS {
        let mut label: String = name.chars().take(limits::CHART_NAME_MAX_CHARS).collect();
        label.push_str(limits::CHART_NAME_ELLIPSIS);
        label
    } else {
        name.to_string()
    }
}

/// Fold the call log (newest first) into summary statistics.
///
/// Usage entries are ordered by descending count; entries with equal counts
/// keep the order in which their API first appears in `logs`.
pub fn aggregate(logs: &[ApiCallLogRecord], apis: &[ApiDefinition]) -> AnalyticsSummary {
    let names: FxHashMap<&str, &str> = apis
        .iter()
        .map(|api| (api.id.as_str(), api.name.as_str()))
        .collect();
    let display_name = |api_id: &str| -> String {
        names
            .get(api_id)
            .copied()
            .unwrap_or(labels::UNKNOWN_API)
            .to_string()
    };

    let unique_users = logs
        .iter()
        .map(|log| log.user_id.as_str())
        .collect::<FxHashSet<_>>()
        .len();

    let mut api_usage: Vec<ApiUsage> = Vec::new();
    let mut positions: FxHashMap<&str, usize> = FxHashMap::default();
    for log in logs {
        let position = *positions.entry(log.api_id.as_str()).or_insert_with(|| {
            api_usage.push(ApiUsage {
                id: log.api_id.clone(),
                name: display_name(&log.api_id),
                count: 0,
            });
            api_usage.len() - 1
        });
        api_usage[position].count += 1;
    }
    // Stable sort keeps first-seen order among equal counts.
    api_usage.sort_by(|a, b| b.count.cmp(&a.count));

    let chart_data = api_usage
        .iter()
        .take(limits::CHART_ENTRIES)
        .map(|usage| ChartPoint {
            name: truncate_label(&usage.name),
            calls: usage.count,
        })
        .collect();

    let recent_calls = logs
        .iter()
        .take(limits::RECENT_CALLS)
        .map(|log| RecentCall {
            record: log.clone(),
            api_name: display_name(&log.api_id),
        })
        .collect();

    AnalyticsSummary {
        total_calls: logs.len(),
        unique_users,
        api_usage,
        chart_data,
        recent_calls,
    }
}

struct CachedSummary {
    logs: Arc<Vec<ApiCallLogRecord>>,
    apis: Arc<Vec<ApiDefinition>>,
    summary: Arc<AnalyticsSummary>,
}

/// Memoizes [`aggregate`] against the identity of its two inputs.
///
/// The summary is recomputed only when either collection handle differs from
/// the one used for the cached result.
#[derive(Default)]
pub struct MemoizedAnalytics {
    cached: Option<CachedSummary>,
    computations: usize,
}

impl MemoizedAnalytics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(
        &mut self,
        logs: &Arc<Vec<ApiCallLogRecord>>,
        apis: &Arc<Vec<ApiDefinition>>,
    ) -> Arc<AnalyticsSummary> {
        if let Some(cached) = &self.cached
            && Arc::ptr_eq(&cached.logs, logs)
            && Arc::ptr_eq(&cached.apis, apis)
        {
            return Arc::clone(&cached.summary);
        }

        let summary = Arc::new(aggregate(logs, apis));
        self.computations += 1;
        logging::log_analytics_computed(summary.total_calls, summary.unique_users);

        self.cached = Some(CachedSummary {
            logs: Arc::clone(logs),
            apis: Arc::clone(apis),
            summary: Arc::clone(&summary),
        });
        summary
    }

    /// Number of times the summary was actually computed.
    pub fn computations(&self) -> usize {
        self.computations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::seed::seed_apis;
    use crate::core::types::HttpMethod;
    use chrono::{Duration, TimeZone, Utc};

    fn record(index: usize, api_id: &str, user_id: &str) -> ApiCallLogRecord {
        ApiCallLogRecord {
            id: format!("log_{index}"),
            api_id: api_id.to_string(),
            endpoint_path: "/users".to_string(),
            endpoint_method: HttpMethod::Get,
            user_id: user_id.to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
                - Duration::minutes(index as i64),
        }
    }

    #[test]
    fn test_aggregate_three_record_scenario() {
        let logs = vec![
            record(0, "user-api", "a"),
            record(1, "user-api", "b"),
            record(2, "payments-api", "a"),
        ];
        let summary = aggregate(&logs, &seed_apis());

        assert_eq!(summary.total_calls, 3);
        assert_eq!(summary.unique_users, 2);
        let usage: Vec<(&str, usize)> = summary
            .api_usage
            .iter()
            .map(|u| (u.id.as_str(), u.count))
            .collect();
        assert_eq!(usage, vec![("user-api", 2), ("payments-api", 1)]);
        assert_eq!(summary.api_usage[0].name, "User Management API");
    }

    #[test]
    fn test_aggregate_empty_log() {
        let summary = aggregate(&[], &seed_apis());
        assert_eq!(summary, AnalyticsSummary::default());
        assert!(summary.most_popular().is_none());
    }

    #[test]
    fn test_unknown_api_fallback() {
        let logs = vec![record(0, "ghost-api", "a")];
        let summary = aggregate(&logs, &seed_apis());
        assert_eq!(summary.api_usage[0].name, labels::UNKNOWN_API);
        assert_eq!(summary.recent_calls[0].api_name, labels::UNKNOWN_API);

        let without_catalog = aggregate(&logs, &[]);
        assert_eq!(without_catalog.total_calls, 1);
        assert_eq!(without_catalog.api_usage[0].name, labels::UNKNOWN_API);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let logs = vec![
            record(0, "inventory-api", "a"),
            record(1, "payments-api", "a"),
            record(2, "payments-api", "a"),
            record(3, "inventory-api", "a"),
            record(4, "user-api", "a"),
        ];
        let summary = aggregate(&logs, &seed_apis());
        let ids: Vec<&str> = summary.api_usage.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, vec!["inventory-api", "payments-api", "user-api"]);
    }

    #[test]
    fn test_chart_data_top_five_and_truncated() {
        let logs: Vec<ApiCallLogRecord> = (0..7)
            .flat_map(|api| (0..=api).map(move |n| (api, n)))
            .map(|(api, n)| record(api * 10 + n, &format!("api-{api}"), "a"))
            .collect();
        let summary = aggregate(&logs, &seed_apis());

        assert_eq!(summary.api_usage.len(), 7);
        assert_eq!(summary.chart_data.len(), 5);
        assert_eq!(summary.chart_data[0].calls, 7);
        assert_eq!(summary.chart_data[0].name, "Unknown API");

        assert_eq!(truncate_label("User Management API"), "User Management...");
        assert_eq!(truncate_label("User Management API").len(), 18);
        assert_eq!(truncate_label("Payments API"), "Payments API");
        assert_eq!(truncate_label("Exactly 15 char"), "Exactly 15 char");
    }

    #[test]
    fn test_truncate_label_counts_characters() {
        let label = truncate_label("Zahlungsübersicht API");
        assert_eq!(label.chars().count(), 18);
        assert!(label.starts_with("Zahlungsübersic"));
    }

    #[test]
    fn test_recent_calls_first_ten_in_order() {
        let logs: Vec<ApiCallLogRecord> = (0..15).map(|i| record(i, "user-api", "a")).collect();
        let summary = aggregate(&logs, &seed_apis());

        assert_eq!(summary.recent_calls.len(), 10);
        assert_eq!(summary.recent_calls[0].record.id, "log_0");
        assert_eq!(summary.recent_calls[9].record.id, "log_9");
        assert_eq!(summary.recent_calls[0].api_name, "User Management API");
    }

    #[test]
    fn test_summary_json_shape() {
        let logs = vec![record(0, "user-api", "a")];
        let value = serde_json::to_value(aggregate(&logs, &seed_apis())).unwrap();

        assert_eq!(value["totalCalls"], 1);
        assert_eq!(value["uniqueUsers"], 1);
        assert_eq!(value["apiUsage"][0]["id"], "user-api");
        assert_eq!(value["chartData"][0]["calls"], 1);
        assert_eq!(value["recentCalls"][0]["apiName"], "User Management API");
        assert_eq!(value["recentCalls"][0]["endpointMethod"], "GET");
    }

    #[test]
    fn test_memoized_analytics_reuses_result_for_same_inputs() {
        let logs = Arc::new(vec![record(0, "user-api", "a")]);
        let apis = Arc::new(seed_apis());
        let mut memo = MemoizedAnalytics::new();

        let first = memo.get(&logs, &apis);
        let second = memo.get(&logs, &apis);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(memo.computations(), 1);
    }

    #[test]
    fn test_memoized_analytics_recomputes_when_input_changes() {
        let logs = Arc::new(vec![record(0, "user-api", "a")]);
        let apis = Arc::new(seed_apis());
        let mut memo = MemoizedAnalytics::new();
        memo.get(&logs, &apis);

        let more_logs = Arc::new(vec![record(1, "user-api", "b"), record(0, "user-api", "a")]);
        let summary = memo.get(&more_logs, &apis);
        assert_eq!(summary.total_calls, 2);
        assert_eq!(memo.computations(), 2);

        // Equal content behind a new handle still counts as a change.
        let same_apis_new_handle = Arc::new(seed_apis());
        memo.get(&more_logs, &same_apis_new_handle);
        assert_eq!(memo.computations(), 3);
    }
}
