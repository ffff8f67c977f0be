use crate::analytics::AnalyticsSummary;
use crate::catalog::schema::escape_html;
use crate::core::constants::labels;
use crate::core::types::HttpMethod;
use crate::ui::output::format_relative_time;
use chrono::{DateTime, Utc};
use std::fs;
use std::io;

/// Constants for dashboard styling and layout
mod dashboard_constants {
    /// Chart.js CDN URL for rendering charts
    pub const CHART_JS_CDN: &str = "https://cdn.jsdelivr.net/npm/chart.js";

    /// Bar colour of the usage chart
    pub const BAR_COLOR: &str = "#2563eb";
}

/// Data structure containing all information needed for dashboard generation
#[derive(Debug, Clone)]
pub struct DashboardData {
    /// Aggregated call statistics
    pub summary: AnalyticsSummary,
    /// Number of API definitions in the catalog
    pub api_count: usize,
    /// Moment the dashboard was generated, used for relative times
    pub generated_at: DateTime<Utc>,
}

/// Error type for dashboard generation
#[derive(Debug)]
pub enum DashboardError {
    FileWrite(io::Error),
    Serialization(String),
}

impl std::fmt::Display for DashboardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DashboardError::FileWrite(e) => write!(f, "Failed to write dashboard file: {e}"),
            DashboardError::Serialization(e) => write!(f, "Failed to serialize data: {e}"),
        }
    }
}

impl std::error::Error for DashboardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DashboardError::FileWrite(e) => Some(e),
            DashboardError::Serialization(_) => None,
        }
    }
}

impl From<io::Error> for DashboardError {
    fn from(e: io::Error) -> Self {
        DashboardError::FileWrite(e)
    }
}

/// HTML dashboard generator for API usage analytics
pub struct HtmlDashboard;

impl HtmlDashboard {
    /// Generate and write an HTML dashboard to the specified path
    pub fn generate_dashboard(
        data: &DashboardData,
        output_path: &str,
    ) -> Result<(), DashboardError> {
        let html_content = Self::generate_html_content(data)?;
        fs::write(output_path, html_content)?;
        Ok(())
    }

    /// Generate the complete HTML document content
    fn generate_html_content(data: &DashboardData) -> Result<String, DashboardError> {
        let body_content = Self::generate_body_content(data)?;

        Ok(format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>API Analytics Dashboard - apicatalog</title>
    <script src="{}"></script>
    <style>{}</style>
</head>
<body>
    {}
    <script>{}</script>
</body>
</html>"#,
            dashboard_constants::CHART_JS_CDN,
            Self::generate_css(),
            body_content,
            Self::generate_javascript()
        ))
    }

    fn generate_css() -> &'static str {
        r#"
        :root {
            --primary-color: #2563eb;
            --success-color: #059669;
            --warning-color: #d97706;
            --error-color: #dc2626;
            --bg-color: #f8fafc;
            --card-bg: #ffffff;
            --border-color: #e2e8f0;
            --text-primary: #1e293b;
            --text-secondary: #64748b;
        }

        * { margin: 0; padding: 0; box-sizing: border-box; }

        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            background-color: var(--bg-color);
            color: var(--text-primary);
            line-height: 1.6;
        }

        .container { max-width: 1200px; margin: 0 auto; padding: 2rem; }

        .header {
            text-align: center;
            margin-bottom: 3rem;
            padding: 2rem;
            background: linear-gradient(135deg, var(--primary-color), #3b82f6);
            color: white;
            border-radius: 12px;
        }

        .header h1 { font-size: 2.5rem; margin-bottom: 0.5rem; font-weight: 700; }

        .stats-grid {
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(250px, 1fr));
            gap: 1.5rem;
            margin-bottom: 3rem;
        }

        .stat-card, .chart-container, .calls-section {
            background: var(--card-bg);
            border-radius: 12px;
            border: 1px solid var(--border-color);
            box-shadow: 0 2px 4px -1px rgba(0, 0, 0, 0.06);
        }

        .stat-card { padding: 1.5rem; }
        .chart-container { padding: 2rem; margin-bottom: 2rem; }
        .calls-section { overflow: hidden; }

        .stat-icon { font-size: 1.5rem; margin-bottom: 1rem; }
        .stat-value { font-size: 2rem; font-weight: 700; margin-bottom: 0.5rem; }
        .stat-detail { color: var(--text-secondary); font-size: 0.85rem; }

        .stat-label {
            color: var(--text-secondary);
            font-size: 0.9rem;
            text-transform: uppercase;
            letter-spacing: 0.5px;
        }

        .chart-title, .section-title { font-size: 1.25rem; font-weight: 600; margin-bottom: 1rem; }

        .section-header {
            background: var(--bg-color);
            padding: 1.5rem;
            border-bottom: 1px solid var(--border-color);
        }

        table { width: 100%; border-collapse: collapse; }
        th, td { text-align: left; padding: 0.75rem 1.5rem; border-bottom: 1px solid var(--border-color); }
        th { color: var(--text-secondary); font-size: 0.8rem; text-transform: uppercase; }

        .method-badge {
            display: inline-block;
            padding: 0.2rem 0.5rem;
            border-radius: 6px;
            font-size: 0.75rem;
            font-weight: 600;
            color: white;
        }

        .method-get { background-color: #3b82f6; }
        .method-post { background-color: #10b981; }
        .method-put { background-color: #f97316; }
        .method-delete { background-color: #ef4444; }
        .method-patch { background-color: #eab308; }

        .empty { padding: 2rem; text-align: center; color: var(--text-secondary); }

        @media (max-width: 768px) {
            .container { padding: 1rem; }
            .header h1 { font-size: 2rem; }
            .stats-grid { grid-template-columns: 1fr; }
        }
        "#
    }

    /// Generate the main body content of the dashboard
    fn generate_body_content(data: &DashboardData) -> Result<String, DashboardError> {
        Ok(format!(
            r#"
            <div class="container">
                {}
                {}
                {}
                {}
            </div>
            "#,
            Self::generate_header_section(&data.generated_at),
            Self::generate_stats_section(data),
            Self::generate_charts_section(&data.summary)?,
            Self::generate_recent_calls_section(data)
        ))
    }

    fn generate_header_section(generated_at: &DateTime<Utc>) -> String {
        format!(
            r#"
            <div class="header">
                <h1>📊 API Analytics Dashboard</h1>
                <p>Generated on {} by apicatalog</p>
            </div>
            "#,
            generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )
    }

    /// Generate the statistics cards section
    fn generate_stats_section(data: &DashboardData) -> String {
        let (popular_name, popular_count) = match data.summary.most_popular() {
            Some(usage) => (usage.name.as_str(), usage.count),
            None => (labels::NOT_AVAILABLE, 0),
        };

        format!(
            r#"
            <div class="stats-grid">
                {}
                {}
                {}
                {}
            </div>
            "#,
            Self::generate_stat_card(
                "📞",
                &data.summary.total_calls.to_string(),
                "Total API Calls",
                None
            ),
            Self::generate_stat_card(
                "👥",
                &data.summary.unique_users.to_string(),
                "Unique Users",
                None
            ),
            Self::generate_stat_card(
                "⭐",
                popular_name,
                "Most Popular API",
                Some(&format!("{popular_count} calls"))
            ),
            Self::generate_stat_card("📚", &data.api_count.to_string(), "APIs in Catalog", None),
        )
    }

    /// Generate a single statistics card
    fn generate_stat_card(icon: &str, value: &str, label: &str, detail: Option<&str>) -> String {
        let detail_html = detail
            .map(|d| format!(r#"<div class="stat-detail">{}</div>"#, escape_html(d)))
            .unwrap_or_default();
        format!(
            r#"
            <div class="stat-card">
                <div class="stat-icon">{}</div>
                <div class="stat-value">{}</div>
                <div class="stat-label">{}</div>
                {}
            </div>
            "#,
            icon,
            escape_html(value),
            escape_html(label),
            detail_html
        )
    }

    /// Generate the top-five usage bar chart
    fn generate_charts_section(summary: &AnalyticsSummary) -> Result<String, DashboardError> {
        let chart_data_json = serde_json::to_string(&summary.chart_data)
            .map_err(|e| DashboardError::Serialization(e.to_string()))?
            // Keep the JSON from closing the surrounding script element
            .replace("</", "<\\/");

        Ok(format!(
            r#"
            <div class="chart-container">
                <h3 class="chart-title">API Usage (Top 5)</h3>
                <canvas id="usageChart" width="400" height="200"></canvas>
            </div>

            <script>
                window.chartData = {chart_data_json};
            </script>
            "#
        ))
    }

    fn generate_recent_calls_section(data: &DashboardData) -> String {
        if data.summary.recent_calls.is_empty() {
            return r#"
                <div class="calls-section">
                    <div class="section-header">
                        <h3 class="section-title">Recent API Calls</h3>
                    </div>
                    <div class="empty">No API calls recorded yet.</div>
                </div>
                "#
            .to_string();
        }

        let rows = data
            .summary
            .recent_calls
            .iter()
            .map(|call| {
                format!(
                    r#"
                    <tr>
                        <td>{}</td>
                        <td><span class="method-badge {}">{}</span> {}</td>
                        <td>{}</td>
                        <td>{}</td>
                    </tr>
                    "#,
                    escape_html(&call.api_name),
                    Self::method_class(call.record.endpoint_method),
                    call.record.endpoint_method,
                    escape_html(&call.record.endpoint_path),
                    escape_html(&call.record.user_id),
                    format_relative_time(call.record.timestamp, data.generated_at)
                )
            })
            .collect::<Vec<_>>()
            .join("");

        format!(
            r#"
            <div class="calls-section">
                <div class="section-header">
                    <h3 class="section-title">Recent API Calls ({})</h3>
                </div>
                <table>
                    <thead><tr><th>API</th><th>Endpoint</th><th>User</th><th>Time</th></tr></thead>
                    <tbody>{}</tbody>
                </table>
            </div>
            "#,
            data.summary.recent_calls.len(),
            rows
        )
    }

    fn method_class(method: HttpMethod) -> &'static str {
        match method {
            HttpMethod::Get => "method-get",
            HttpMethod::Post => "method-post",
            HttpMethod::Put => "method-put",
            HttpMethod::Delete => "method-delete",
            HttpMethod::Patch => "method-patch",
        }
    }

    fn generate_javascript() -> String {
        format!(
            r#"
        document.addEventListener('DOMContentLoaded', function() {{
            if (typeof Chart !== 'undefined' && window.chartData) {{
                const ctx = document.getElementById('usageChart');
                if (ctx) {{
                    new Chart(ctx, {{
                        type: 'bar',
                        data: {{
                            labels: window.chartData.map(p => p.name),
                            datasets: [{{
                                label: 'Calls',
                                data: window.chartData.map(p => p.calls),
                                backgroundColor: '{}',
                                borderRadius: 4
                            }}]
                        }},
                        options: {{
                            responsive: true,
                            plugins: {{ legend: {{ display: false }} }},
                            scales: {{ y: {{ beginAtZero: true, ticks: {{ precision: 0 }} }} }}
                        }}
                    }});
                }}
            }}
        }});
        "#,
            dashboard_constants::BAR_COLOR
        )
    }
}
