//! Built-in catalog used at first start and whenever persisted data is unusable.

use chrono::{DateTime, Duration, Utc};
use serde_json::json;

use crate::core::types::{
    ApiCallLogRecord, ApiDefinition, Endpoint, HttpMethod, OrderedMap, Parameter,
    ParameterLocation, RequestBody, ResponseObject, SchemaNode, SchemaType,
};

fn string() -> SchemaNode {
    SchemaNode::primitive(SchemaType::String)
}

fn integer() -> SchemaNode {
    SchemaNode::primitive(SchemaType::Integer)
}

fn error_schema() -> SchemaNode {
    SchemaNode::object([("code", string()), ("message", string())])
}

fn parameter(
    name: &str,
    location: ParameterLocation,
    description: &str,
    required: bool,
    schema: SchemaNode,
) -> Parameter {
    Parameter {
        name: name.to_string(),
        location,
        description: description.to_string(),
        required,
        schema,
    }
}

fn responses<const N: usize>(entries: [(&str, ResponseObject); N]) -> OrderedMap<ResponseObject> {
    entries.into_iter().collect()
}

fn user_api() -> ApiDefinition {
    let user = SchemaNode::object([
        (
            "id",
            string()
                .with_description("Unique identifier for the user.")
                .with_example(json!("usr_123")),
        ),
        (
            "email",
            string()
                .with_description("User's email address.")
                .with_example(json!("john.doe@example.com")),
        ),
        (
            "name",
            string()
                .with_description("Full name of the user.")
                .with_example(json!("John Doe")),
        ),
        (
            "createdAt",
            string().with_description("ISO 8601 date string of when the user was created."),
        ),
    ])
    .with_required(["id", "email", "createdAt"]);

    ApiDefinition {
        id: "user-api".to_string(),
        name: "User Management API".to_string(),
        version: "1.2.0".to_string(),
        description:
            "Provides endpoints for creating, reading, updating, and deleting user accounts and profiles."
                .to_string(),
        schemas: [("User", user), ("Error", error_schema())]
            .into_iter()
            .collect(),
        endpoints: vec![
            Endpoint {
                path: "/users".to_string(),
                method: HttpMethod::Get,
                summary: "List all users".to_string(),
                description: "Retrieves a list of all user accounts, with pagination support."
                    .to_string(),
                parameters: vec![
                    parameter(
                        "limit",
                        ParameterLocation::Query,
                        "Number of users to return.",
                        false,
                        integer().with_example(json!(20)),
                    ),
                    parameter(
                        "offset",
                        ParameterLocation::Query,
                        "Offset for pagination.",
                        false,
                        integer().with_example(json!(0)),
                    ),
                ],
                request_body: None,
                responses: responses([(
                    "200",
                    ResponseObject::json(
                        "A list of users.",
                        SchemaNode::array(SchemaNode::reference("User")),
                    ),
                )]),
            },
            Endpoint {
                path: "/users/{userId}".to_string(),
                method: HttpMethod::Get,
                summary: "Get a single user".to_string(),
                description: "Fetches the details of a specific user by their ID.".to_string(),
                parameters: vec![parameter(
                    "userId",
                    ParameterLocation::Path,
                    "The ID of the user to retrieve.",
                    true,
                    string(),
                )],
                request_body: None,
                responses: responses([
                    (
                        "200",
                        ResponseObject::json("The user object.", SchemaNode::reference("User")),
                    ),
                    (
                        "404",
                        ResponseObject::json("User not found.", SchemaNode::reference("Error")),
                    ),
                ]),
            },
        ],
    }
}

fn payments_api() -> ApiDefinition {
    let payment_intent = SchemaNode::object([
        ("id", string().with_example(json!("pi_abc123"))),
        ("amount", integer().with_example(json!(2000))),
        ("currency", string().with_example(json!("usd"))),
        ("status", string().with_example(json!("succeeded"))),
    ]);

    let create_body = SchemaNode::object([
        ("amount", integer().with_example(json!(2000))),
        ("currency", string().with_example(json!("usd"))),
    ])
    .with_required(["amount", "currency"]);

    ApiDefinition {
        id: "payments-api".to_string(),
        name: "Payments API".to_string(),
        version: "2.0.1".to_string(),
        description:
            "A secure API for processing payments, managing subscriptions, and handling refunds."
                .to_string(),
        schemas: [("PaymentIntent", payment_intent), ("Error", error_schema())]
            .into_iter()
            .collect(),
        endpoints: vec![Endpoint {
            path: "/payment_intents".to_string(),
            method: HttpMethod::Post,
            summary: "Create a payment intent".to_string(),
            description: "Creates a PaymentIntent to start a new payment.".to_string(),
            parameters: vec![],
            request_body: Some(RequestBody::json("Payment details.", true, create_body)),
            responses: responses([
                (
                    "201",
                    ResponseObject::json(
                        "PaymentIntent created.",
                        SchemaNode::reference("PaymentIntent"),
                    ),
                ),
                (
                    "400",
                    ResponseObject::json("Bad request.", SchemaNode::reference("Error")),
                ),
            ]),
        }],
    }
}

fn inventory_api() -> ApiDefinition {
    let stock_level = SchemaNode::object([
        ("productId", string().with_example(json!("prod_xyz"))),
        ("warehouseId", string().with_example(json!("wh_1"))),
        ("quantity", integer().with_example(json!(150))),
    ]);

    ApiDefinition {
        id: "inventory-api".to_string(),
        name: "Inventory API".to_string(),
        version: "0.8.0-beta".to_string(),
        description:
            "Manages product stock levels across multiple warehouses. Internal use only."
                .to_string(),
        schemas: [("StockLevel", stock_level)].into_iter().collect(),
        endpoints: vec![Endpoint {
            path: "/inventory/{productId}".to_string(),
            method: HttpMethod::Get,
            summary: "Get stock level".to_string(),
            description:
                "Retrieves the current stock level for a given product across all warehouses."
                    .to_string(),
            parameters: vec![parameter(
                "productId",
                ParameterLocation::Path,
                "ID of the product.",
                true,
                string(),
            )],
            request_body: None,
            responses: responses([(
                "200",
                ResponseObject::json(
                    "Stock levels for the product.",
                    SchemaNode::array(SchemaNode::reference("StockLevel")),
                ),
            )]),
        }],
    }
}

/// The built-in API definitions.
pub fn seed_apis() -> Vec<ApiDefinition> {
    vec![user_api(), payments_api(), inventory_api()]
}

fn call_log(
    id: &str,
    api_id: &str,
    method: HttpMethod,
    path: &str,
    user_id: &str,
    timestamp: DateTime<Utc>,
) -> ApiCallLogRecord {
    ApiCallLogRecord {
        id: id.to_string(),
        api_id: api_id.to_string(),
        endpoint_path: path.to_string(),
        endpoint_method: method,
        user_id: user_id.to_string(),
        timestamp,
    }
}

/// The built-in call logs, newest first, dated relative to `now`.
pub fn seed_call_logs(now: DateTime<Utc>) -> Vec<ApiCallLogRecord> {
    vec![
        call_log(
            "log_1",
            "user-api",
            HttpMethod::Get,
            "/users",
            "user-john-doe",
            now - Duration::minutes(5),
        ),
        call_log(
            "log_2",
            "payments-api",
            HttpMethod::Post,
            "/payment_intents",
            "user-jane-smith",
            now - Duration::minutes(10),
        ),
        call_log(
            "log_3",
            "user-api",
            HttpMethod::Get,
            "/users/{userId}",
            "user-john-doe",
            now - Duration::minutes(12),
        ),
        call_log(
            "log_4",
            "inventory-api",
            HttpMethod::Get,
            "/inventory/{productId}",
            "service-account-internal",
            now - Duration::minutes(30),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_apis_ids() {
        let ids: Vec<String> = seed_apis().into_iter().map(|api| api.id).collect();
        assert_eq!(ids, vec!["user-api", "payments-api", "inventory-api"]);
    }

    #[test]
    fn test_seed_references_resolve() {
        for api in seed_apis() {
            for endpoint in &api.endpoints {
                for (_, response) in endpoint.responses.iter() {
                    let Some(schema) = response.json_schema() else {
                        continue;
                    };
                    let target = schema
                        .reference_name()
                        .or_else(|| schema.items.as_ref().and_then(|i| i.reference_name()));
                    if let Some(name) = target {
                        assert!(
                            api.schemas.contains_key(name),
                            "{} references missing schema {name}",
                            api.id
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_seed_call_logs_newest_first() {
        let now = Utc::now();
        let logs = seed_call_logs(now);
        assert_eq!(logs.len(), 4);
        assert!(logs.windows(2).all(|pair| pair[0].timestamp > pair[1].timestamp));
        assert_eq!(logs[0].timestamp, now - Duration::minutes(5));
    }
}
