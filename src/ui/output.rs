//! Output formatting and display logic for apicatalog
//!
//! Every view has a `render_*` function producing the text and a
//! `display_*` function choosing the output format and printing it.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::analytics::AnalyticsSummary;
use crate::catalog::schema::escape_html;
use crate::catalog::{FieldErrors, SchemaView, schema_anchor};
use crate::core::constants::{display, labels, output_formats};
use crate::core::error::Result;
use crate::core::types::{ApiCallLogRecord, ApiDefinition, Endpoint, SchemaNode};
use crate::policy::PolicyState;
use crate::ui::color::{Colors, colorize, colorize_method, emphasize};

/// Human-readable distance between `timestamp` and `now`, e.g. "5 minutes ago".
pub fn format_relative_time(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - timestamp).num_seconds().max(0);
    let minutes = (seconds + 30) / 60;

    let distance = match minutes {
        0 => "less than a minute".to_string(),
        1 => "1 minute".to_string(),
        2..45 => format!("{minutes} minutes"),
        45..90 => "about 1 hour".to_string(),
        90..1440 => format!("about {} hours", (minutes + 30) / 60),
        1440..2520 => "1 day".to_string(),
        2520..43200 => format!("{} days", (minutes + 720) / 1440),
        43200..86400 => "about 1 month".to_string(),
        86400..525600 => format!("{} months", (minutes + 21600) / 43200),
        _ => {
            let years = (minutes + 262800) / 525600;
            if years == 1 {
                "about 1 year".to_string()
            } else {
                format!("about {years} years")
            }
        }
    };
    format!("{distance} ago")
}

fn indent(text: &str, spaces: usize) -> String {
    let pad = " ".repeat(spaces);
    text.lines()
        .map(|line| format!("{pad}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn plural(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// --- Catalog list ---------------------------------------------------------

/// Catalog cards
pub fn render_api_list(apis: &[&ApiDefinition], query: Option<&str>) -> String {
    let mut out = String::new();

    if apis.is_empty() {
        match query {
            Some(q) if !q.trim().is_empty() => {
                out.push_str(&format!("No APIs match '{}'.", q.trim()));
            }
            _ => out.push_str("The catalog is empty."),
        }
        return out;
    }

    out.push_str(&emphasize(
        &format!("📚 API Catalog ({})", apis.len()),
        Colors::BRIGHT_CYAN,
    ));
    out.push('\n');

    for api in apis {
        out.push('\n');
        out.push_str(&format!(
            "{}  {}\n",
            emphasize(&api.name, Colors::BRIGHT_WHITE),
            colorize(&format!("v{}", api.version), Colors::DIM)
        ));
        if !api.description.is_empty() {
            out.push_str(&indent(&api.description, 2));
            out.push('\n');
        }
        out.push_str(&format!(
            "  {} · id: {}\n",
            plural(api.endpoints.len(), "endpoint", "endpoints"),
            colorize(&api.id, Colors::CYAN)
        ));
    }

    out.trim_end().to_string()
}

/// Display the catalog list in the requested format
pub fn display_api_list(
    apis: &[&ApiDefinition],
    query: Option<&str>,
    output_format: &str,
) -> Result<()> {
    match output_format {
        output_formats::JSON => print_json(apis),
        output_formats::MINIMAL => {
            for api in apis {
                println!("{}\t{}\t{}", api.id, api.name, api.version);
            }
            Ok(())
        }
        _ => {
            println!("{}", render_api_list(apis, query));
            Ok(())
        }
    }
}

// --- Documentation view ---------------------------------------------------

fn render_schema_block(out: &mut String, node: &SchemaNode, api: &ApiDefinition, spaces: usize) {
    let rendered = SchemaView::new(node, &api.schemas).to_string();
    if !rendered.is_empty() {
        out.push_str(&indent(&rendered, spaces));
        out.push('\n');
    }
}

fn render_endpoint(out: &mut String, endpoint: &Endpoint, api: &ApiDefinition) {
    out.push_str(&format!(
        "\n{} {}\n",
        colorize_method(endpoint.method),
        emphasize(&endpoint.path, Colors::BRIGHT_WHITE)
    ));
    if !endpoint.summary.is_empty() {
        out.push_str(&format!("  {}\n", endpoint.summary));
    }
    if !endpoint.description.is_empty() {
        out.push_str(&format!("  {}\n", colorize(&endpoint.description, Colors::DIM)));
    }

    if !endpoint.parameters.is_empty() {
        out.push_str("  Parameters:\n");
        for param in &endpoint.parameters {
            let marker = if param.required { "*" } else { "" };
            let mut line = format!(
                "    {}{} ({}, {})",
                param.name,
                colorize(marker, Colors::RED),
                param.location,
                param.schema.type_label()
            );
            if !param.description.is_empty() {
                line.push_str(&format!(" - {}", param.description));
            }
            out.push_str(&line);
            out.push('\n');
        }
    }

    if let Some(body) = &endpoint.request_body {
        let required = if body.required { " (required)" } else { "" };
        out.push_str(&format!("  Request body{required}:"));
        if !body.description.is_empty() {
            out.push_str(&format!(" {}", body.description));
        }
        out.push('\n');
        if let Some(schema) = body.json_schema() {
            render_schema_block(out, schema, api, 4);
        }
    }

    if !endpoint.responses.is_empty() {
        out.push_str("  Responses:\n");
        for (status, response) in endpoint.responses.iter() {
            let color = if status.starts_with('2') {
                Colors::GREEN
            } else {
                Colors::RED
            };
            out.push_str(&format!(
                "    {}  {}\n",
                colorize(status, color),
                response.description
            ));
            if let Some(schema) = response.json_schema() {
                render_schema_block(out, schema, api, 6);
            }
        }
    }
}

/// Documentation view of one API
pub fn render_api_documentation(api: &ApiDefinition) -> String {
    let mut out = format!(
        "{}  {}\n",
        emphasize(&api.name, Colors::BRIGHT_CYAN),
        colorize(&format!("v{}", api.version), Colors::DIM)
    );
    if !api.description.is_empty() {
        out.push_str(&api.description);
        out.push('\n');
    }
    out.push_str(&format!("id: {}\n", api.id));

    out.push_str(&format!(
        "\n{}\n",
        emphasize(
            &format!("Endpoints ({})", api.endpoints.len()),
            Colors::BRIGHT_WHITE
        )
    ));
    if api.endpoints.is_empty() {
        out.push_str("  No endpoints defined.\n");
    }
    for endpoint in &api.endpoints {
        render_endpoint(&mut out, endpoint, api);
    }

    if !api.schemas.is_empty() {
        out.push_str(&format!("\n{}\n", emphasize("Schemas", Colors::BRIGHT_WHITE)));
        for (name, schema) in api.schemas.iter() {
            out.push_str(&format!(
                "\n  {}  {}\n",
                emphasize(name, Colors::BRIGHT_WHITE),
                colorize(&format!("#{}", schema_anchor(name)), Colors::DIM)
            ));
            if let Some(description) = &schema.description {
                out.push_str(&format!("  {description}\n"));
            }
            render_schema_block(&mut out, schema, api, 4);
        }
    }

    out.trim_end().to_string()
}

/// Standalone HTML documentation page with linked schema references
pub fn render_api_documentation_html(api: &ApiDefinition) -> String {
    let mut endpoints = String::new();
    for endpoint in &api.endpoints {
        endpoints.push_str(&format!(
            "<section class=\"endpoint\"><h3><span class=\"method method-{}\">{}</span> <code>{}</code></h3><p>{}</p>",
            endpoint.method.as_str().to_lowercase(),
            endpoint.method,
            escape_html(&endpoint.path),
            escape_html(&endpoint.summary)
        ));
        if let Some(schema) = endpoint.request_body.as_ref().and_then(|b| b.json_schema()) {
            endpoints.push_str(&format!(
                "<h4>Request body</h4><pre>{}</pre>",
                SchemaView::new(schema, &api.schemas).html()
            ));
        }
        for (status, response) in endpoint.responses.iter() {
            endpoints.push_str(&format!(
                "<h4>{} {}</h4>",
                escape_html(status),
                escape_html(&response.description)
            ));
            if let Some(schema) = response.json_schema() {
                endpoints.push_str(&format!(
                    "<pre>{}</pre>",
                    SchemaView::new(schema, &api.schemas).html()
                ));
            }
        }
        endpoints.push_str("</section>\n");
    }

    let mut schemas = String::new();
    for (name, schema) in api.schemas.iter() {
        schemas.push_str(&format!(
            "<section id=\"{}\" class=\"schema\"><h3>{}</h3><pre>{}</pre></section>\n",
            escape_html(&schema_anchor(name)),
            escape_html(name),
            SchemaView::new(schema, &api.schemas).html()
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>{name} v{version} - apicatalog</title>
    <style>
        body {{ font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; max-width: 960px; margin: 2rem auto; color: #1e293b; }}
        pre {{ background: #f8fafc; border: 1px solid #e2e8f0; border-radius: 8px; padding: 1rem; }}
        .method {{ color: white; border-radius: 6px; padding: 0.1rem 0.5rem; font-size: 0.8rem; }}
        .method-get {{ background: #3b82f6; }} .method-post {{ background: #10b981; }}
        .method-put {{ background: #f97316; }} .method-delete {{ background: #ef4444; }}
        .method-patch {{ background: #eab308; }}
        .schema-key {{ color: #7c3aed; }} .schema-type {{ color: #059669; }}
        .schema-ref {{ color: #2563eb; }} .schema-ref.unresolved {{ color: #dc2626; }}
    </style>
</head>
<body>
    <h1>{name} <small>v{version}</small></h1>
    <p>{description}</p>
    <h2>Endpoints</h2>
    {endpoints}
    <h2>Schemas</h2>
    {schemas}
</body>
</html>"#,
        name = escape_html(&api.name),
        version = escape_html(&api.version),
        description = escape_html(&api.description),
    )
}

/// Display one API in the requested format
pub fn display_api_documentation(api: &ApiDefinition, output_format: &str) -> Result<()> {
    match output_format {
        output_formats::JSON => print_json(api),
        output_formats::MINIMAL => {
            for endpoint in &api.endpoints {
                println!(
                    "{} {}\t{}",
                    endpoint.method, endpoint.path, endpoint.summary
                );
            }
            Ok(())
        }
        _ => {
            println!("{}", render_api_documentation(api));
            Ok(())
        }
    }
}

// --- Simulated calls and created APIs -------------------------------------

/// Confirmation shown after a simulated call
pub fn render_call_simulated(record: &ApiCallLogRecord) -> String {
    format!(
        "{} {}: {} {} was called.",
        colorize(display::SUCCESS_EMOJI, Colors::BRIGHT_GREEN),
        emphasize("API Call Simulated", Colors::BRIGHT_GREEN),
        record.endpoint_method,
        record.endpoint_path
    )
}

pub fn display_call_simulated(record: &ApiCallLogRecord, output_format: &str) -> Result<()> {
    match output_format {
        output_formats::JSON => print_json(record),
        output_formats::MINIMAL => {
            println!("{}", record.id);
            Ok(())
        }
        _ => {
            println!("{}", render_call_simulated(record));
            Ok(())
        }
    }
}

pub fn display_api_created(api: &ApiDefinition, output_format: &str) -> Result<()> {
    match output_format {
        output_formats::JSON => print_json(api),
        output_formats::MINIMAL => {
            println!("{}", api.id);
            Ok(())
        }
        _ => {
            println!(
                "{} {} {}",
                colorize(display::SUCCESS_EMOJI, Colors::BRIGHT_GREEN),
                emphasize(&format!("Created {}", api.name), Colors::BRIGHT_GREEN),
                colorize(&format!("(id: {})", api.id), Colors::DIM)
            );
            Ok(())
        }
    }
}

/// Field-keyed validation messages, one per line
pub fn render_field_errors(errors: &FieldErrors) -> String {
    let mut out = format!(
        "{} {}",
        colorize(display::ERROR_EMOJI, Colors::BRIGHT_RED),
        emphasize("Please fix the following fields:", Colors::BRIGHT_RED)
    );
    for (field, messages) in errors.iter() {
        for message in messages {
            out.push_str(&format!("\n  {}: {}", colorize(field, Colors::YELLOW), message));
        }
    }
    out
}

pub fn display_field_errors(errors: &FieldErrors, output_format: &str) -> Result<()> {
    match output_format {
        output_formats::JSON => print_json(&serde_json::json!({ "errors": errors })),
        output_formats::MINIMAL => {
            eprintln!("{errors}");
            Ok(())
        }
        _ => {
            eprintln!("{}", render_field_errors(errors));
            Ok(())
        }
    }
}

// --- Monitoring -----------------------------------------------------------

fn render_bar(calls: usize, max_calls: usize) -> String {
    let width = if max_calls == 0 {
        0
    } else {
        (calls * display::BAR_WIDTH / max_calls).max(1)
    };
    display::BAR_CHAR.repeat(width)
}

/// Monitoring page: stat cards, top-five chart and recent calls
pub fn render_stats(summary: &AnalyticsSummary, now: DateTime<Utc>) -> String {
    let mut out = emphasize(
        &format!("{} API Analytics", display::CHART_EMOJI),
        Colors::BRIGHT_CYAN,
    );
    out.push_str("\n\n");

    let (popular_name, popular_count) = match summary.most_popular() {
        Some(usage) => (usage.name.as_str(), usage.count),
        None => (labels::NOT_AVAILABLE, 0),
    };
    out.push_str(&format!(
        "Total API Calls:   {}\n",
        emphasize(&summary.total_calls.to_string(), Colors::BRIGHT_WHITE)
    ));
    out.push_str(&format!(
        "Unique Users:      {}\n",
        emphasize(&summary.unique_users.to_string(), Colors::BRIGHT_WHITE)
    ));
    out.push_str(&format!(
        "Most Popular API:  {} {}\n",
        emphasize(popular_name, Colors::BRIGHT_WHITE),
        colorize(
            &format!("({})", plural(popular_count, "call", "calls")),
            Colors::DIM,
        )
    ));

    out.push_str(&format!(
        "\n{}\n",
        emphasize("API Usage (Top 5)", Colors::BRIGHT_WHITE)
    ));
    if summary.chart_data.is_empty() {
        out.push_str("  No API calls recorded yet.\n");
    } else {
        let label_width = summary
            .chart_data
            .iter()
            .map(|point| point.name.chars().count())
            .max()
            .unwrap_or(0);
        let max_calls = summary
            .chart_data
            .iter()
            .map(|p| p.calls)
            .max()
            .unwrap_or(0);
        for point in &summary.chart_data {
            let padding = " ".repeat(label_width - point.name.chars().count());
            out.push_str(&format!(
                "  {}{}  {} {}\n",
                point.name,
                padding,
                colorize(&render_bar(point.calls, max_calls), Colors::BRIGHT_BLUE),
                point.calls
            ));
        }
    }

    out.push_str(&format!(
        "\n{}\n",
        emphasize("Recent API Calls", Colors::BRIGHT_WHITE)
    ));
    if summary.recent_calls.is_empty() {
        out.push_str("  No API calls recorded yet.\n");
    }
    for call in &summary.recent_calls {
        out.push_str(&format!(
            "  {} {}  {} · {} · {}\n",
            colorize_method(call.record.endpoint_method),
            call.record.endpoint_path,
            call.api_name,
            colorize(&call.record.user_id, Colors::CYAN),
            colorize(
                &format_relative_time(call.record.timestamp, now),
                Colors::DIM,
            )
        ));
    }

    out.trim_end().to_string()
}

pub fn display_stats(
    summary: &AnalyticsSummary,
    now: DateTime<Utc>,
    output_format: &str,
) -> Result<()> {
    match output_format {
        output_formats::JSON => print_json(summary),
        output_formats::MINIMAL => {
            println!(
                "total_calls={} unique_users={}",
                summary.total_calls, summary.unique_users
            );
            for usage in &summary.api_usage {
                println!("{}\t{}", usage.id, usage.count);
            }
            Ok(())
        }
        _ => {
            println!("{}", render_stats(summary, now));
            Ok(())
        }
    }
}

// --- Policy assistant -----------------------------------------------------

pub fn render_policy_state(state: &PolicyState) -> String {
    match (&state.policy, &state.errors) {
        (Some(policy), _) => format!(
            "{} {}\n\n{}",
            colorize(display::SPARKLES_EMOJI, Colors::BRIGHT_YELLOW),
            emphasize(&state.message, Colors::BRIGHT_GREEN),
            policy.trim()
        ),
        (None, Some(errors)) => format!(
            "{} {}\n{}",
            colorize(display::ERROR_EMOJI, Colors::BRIGHT_RED),
            emphasize(&state.message, Colors::BRIGHT_RED),
            errors
                .iter()
                .flat_map(|(field, messages)| {
                    messages
                        .iter()
                        .map(move |m| format!("  {}: {}", colorize(field, Colors::YELLOW), m))
                })
                .collect::<Vec<_>>()
                .join("\n")
        ),
        (None, None) => format!(
            "{} {}",
            colorize(display::WARNING_EMOJI, Colors::BRIGHT_YELLOW),
            emphasize(&state.message, Colors::BRIGHT_YELLOW)
        ),
    }
}

pub fn display_policy_state(state: &PolicyState, output_format: &str) -> Result<()> {
    match output_format {
        output_formats::JSON => print_json(state),
        output_formats::MINIMAL => {
            match &state.policy {
                Some(policy) => println!("{}", policy.trim()),
                None => eprintln!("{}", state.message),
            }
            Ok(())
        }
        _ => {
            println!("{}", render_policy_state(state));
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::aggregate;
    use crate::catalog::seed::{seed_apis, seed_call_logs};
    use crate::core::constants::messages;
    use crate::core::types::HttpMethod;
    use chrono::Duration;
    use serial_test::serial;

    fn at(minutes_ago: i64, now: DateTime<Utc>) -> DateTime<Utc> {
        now - Duration::minutes(minutes_ago)
    }

    #[test]
    #[serial]
    fn test_format_relative_time() {
        let now = Utc::now();
        assert_eq!(format_relative_time(now, now), "less than a minute ago");
        assert_eq!(
            format_relative_time(now - Duration::seconds(20), now),
            "less than a minute ago"
        );
        assert_eq!(format_relative_time(at(1, now), now), "1 minute ago");
        assert_eq!(format_relative_time(at(5, now), now), "5 minutes ago");
        assert_eq!(format_relative_time(at(30, now), now), "30 minutes ago");
        assert_eq!(format_relative_time(at(60, now), now), "about 1 hour ago");
        assert_eq!(format_relative_time(at(180, now), now), "about 3 hours ago");
        assert_eq!(format_relative_time(at(1500, now), now), "1 day ago");
        assert_eq!(format_relative_time(at(3 * 1440, now), now), "3 days ago");
        assert_eq!(
            format_relative_time(at(2 * 525600, now), now),
            "about 2 years ago"
        );
    }

    #[test]
    #[serial]
    fn test_format_relative_time_future_is_clamped() {
        let now = Utc::now();
        assert_eq!(
            format_relative_time(now + Duration::minutes(10), now),
            "less than a minute ago"
        );
    }

    #[test]
    #[serial]
    fn test_render_api_list() {
        let apis = seed_apis();
        let refs: Vec<&ApiDefinition> = apis.iter().collect();
        let out = render_api_list(&refs, None);

        assert!(out.starts_with("📚 API Catalog (3)"));
        assert!(out.contains("User Management API  v1.2.0"));
        assert!(out.contains("2 endpoints · id: user-api"));
        assert!(out.contains("1 endpoint · id: payments-api"));
    }

    #[test]
    #[serial]
    fn test_render_api_list_empty() {
        assert_eq!(
            render_api_list(&[], Some("graphql")),
            "No APIs match 'graphql'."
        );
        assert_eq!(render_api_list(&[], None), "The catalog is empty.");
    }

    #[test]
    #[serial]
    fn test_render_api_documentation() {
        let apis = seed_apis();
        let out = render_api_documentation(&apis[0]);

        assert!(out.starts_with("User Management API  v1.2.0"));
        assert!(out.contains("Endpoints (2)"));
        assert!(out.contains("GET    /users"));
        assert!(out.contains("Parameters:"));
        assert!(out.contains("userId* (path, string)"));
        assert!(out.contains("    200  A list of users"));
        assert!(out.contains("      [\n        User\n      ]"));
        assert!(out.contains("  User  #schema-User"));
        assert!(out.contains("    404  User not found"));
    }

    #[test]
    #[serial]
    fn test_render_api_documentation_request_body() {
        let apis = seed_apis();
        let out = render_api_documentation(&apis[1]);
        assert!(out.contains("POST   /payment_intents"));
        assert!(out.contains("Request body (required):"));
        assert!(out.contains("\"amount\": integer"));
    }

    #[test]
    #[serial]
    fn test_render_api_documentation_html_links_schemas() {
        let apis = seed_apis();
        let html = render_api_documentation_html(&apis[0]);
        assert!(html.contains(r#"<section id="schema-User" class="schema">"#));
        assert!(html.contains(r##"<a href="#schema-User" class="schema-ref">User</a>"##));
        assert!(html.contains("method-get"));
    }

    #[test]
    #[serial]
    fn test_render_call_simulated() {
        let record = ApiCallLogRecord {
            id: "x".to_string(),
            api_id: "user-api".to_string(),
            endpoint_path: "/users".to_string(),
            endpoint_method: HttpMethod::Get,
            user_id: "user-john-doe".to_string(),
            timestamp: Utc::now(),
        };
        let rendered = render_call_simulated(&record);
        assert!(rendered.ends_with("API Call Simulated: GET /users was called."));
    }

    #[test]
    #[serial]
    fn test_render_field_errors() {
        let mut errors = FieldErrors::new();
        errors.add("name", messages::NAME_TOO_SHORT);
        errors.add("endpoints.0.path", messages::PATH_MUST_START_WITH_SLASH);
        let out = render_field_errors(&errors);
        assert!(out.contains("  name: API name must be at least 3 characters"));
        assert!(out.contains("  endpoints.0.path: Path must start with /"));
    }

    #[test]
    #[serial]
    fn test_render_stats() {
        let now = Utc::now();
        let summary = aggregate(&seed_call_logs(now), &seed_apis());
        let out = render_stats(&summary, now);

        assert!(out.contains("Total API Calls:   4"));
        assert!(out.contains("Unique Users:      3"));
        assert!(out.contains("Most Popular API:  User Management API (2 calls)"));
        assert!(out.contains("User Management...  "));
        assert!(out.contains("5 minutes ago"));
        assert!(out.contains("30 minutes ago"));
    }

    #[test]
    #[serial]
    fn test_render_stats_empty() {
        let out = render_stats(&AnalyticsSummary::default(), Utc::now());
        assert!(out.contains("Total API Calls:   0"));
        assert!(out.contains("Most Popular API:  N/A (0 calls)"));
        assert!(out.contains("No API calls recorded yet."));
    }

    #[test]
    #[serial]
    fn test_render_bar_scales_to_width() {
        assert_eq!(render_bar(4, 4).chars().count(), display::BAR_WIDTH);
        assert_eq!(render_bar(2, 4).chars().count(), display::BAR_WIDTH / 2);
        assert_eq!(render_bar(1, 1000).chars().count(), 1);
        assert_eq!(render_bar(0, 0), "");
    }

    #[test]
    #[serial]
    fn test_render_policy_state_variants() {
        let success = PolicyState {
            message: messages::POLICY_GENERATED.to_string(),
            policy: Some("1. Require OAuth2.\n".to_string()),
            errors: None,
        };
        assert!(render_policy_state(&success).ends_with("1. Require OAuth2."));

        let mut errors = FieldErrors::new();
        errors.add("dataSensitivity", messages::SENSITIVITY_TOO_SHORT);
        let invalid = PolicyState {
            message: messages::POLICY_VALIDATION_FAILED.to_string(),
            policy: None,
            errors: Some(errors),
        };
        let out = render_policy_state(&invalid);
        assert!(out.contains(messages::POLICY_VALIDATION_FAILED));
        assert!(out.contains("dataSensitivity: Please describe the data sensitivity"));

        let failed = PolicyState {
            message: messages::POLICY_EMPTY.to_string(),
            ..Default::default()
        };
        assert!(render_policy_state(&failed).contains(messages::POLICY_EMPTY));
    }
}
