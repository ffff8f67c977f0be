//! Call log recording and usage analytics

pub mod aggregator;
pub mod recorder;

pub use aggregator::{
    AnalyticsSummary, ApiUsage, ChartPoint, MemoizedAnalytics, RecentCall, aggregate,
    truncate_label,
};
pub use recorder::CallLogRecorder;
