use chrono::{DateTime, Utc};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use crate::core::constants::labels;

/// A string-keyed map that keeps entries in document order.
///
/// Schema properties, responses and named schemas are displayed in the order
/// they were authored, so the map never re-sorts its keys. Inserting an
/// existing key replaces the value in place.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedMap<V> {
    entries: Vec<(String, V)>,
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<V> OrderedMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<K: Into<String>>(&mut self, key: K, value: V) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for OrderedMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = OrderedMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl<V: Serialize> Serialize for OrderedMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct OrderedMapVisitor<V>(PhantomData<V>);

impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedMapVisitor<V> {
    type Value = OrderedMap<V>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map with string keys")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = OrderedMap::new();
        while let Some((key, value)) = access.next_entry::<String, V>()? {
            map.insert(key, value);
        }
        Ok(map)
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(OrderedMapVisitor(PhantomData))
    }
}

/// Primitive and structural types a schema node can declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    Object,
    String,
    Integer,
    Array,
    Boolean,
    Number,
}

impl SchemaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaType::Object => "object",
            SchemaType::String => "string",
            SchemaType::Integer => "integer",
            SchemaType::Array => "array",
            SchemaType::Boolean => "boolean",
            SchemaType::Number => "number",
        }
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node in a JSON-Schema-like type description.
///
/// Every field is optional: definitions are user-authored and may be
/// incomplete, and the renderer degrades to empty output instead of failing.
/// A node carrying `$ref` names another schema in the enclosing definition's
/// schema table and owns no children of its own.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaNode {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<SchemaType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<OrderedMap<SchemaNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl SchemaNode {
    /// A leaf node of the given primitive type.
    pub fn primitive(schema_type: SchemaType) -> Self {
        Self {
            schema_type: Some(schema_type),
            ..Default::default()
        }
    }

    pub fn object<K: Into<String>>(properties: impl IntoIterator<Item = (K, SchemaNode)>) -> Self {
        Self {
            schema_type: Some(SchemaType::Object),
            properties: Some(properties.into_iter().collect()),
            ..Default::default()
        }
    }

    pub fn array(items: SchemaNode) -> Self {
        Self {
            schema_type: Some(SchemaType::Array),
            items: Some(Box::new(items)),
            ..Default::default()
        }
    }

    /// A reference to a named schema of the enclosing definition.
    pub fn reference(name: &str) -> Self {
        Self {
            reference: Some(format!("#/components/schemas/{name}")),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_example(mut self, example: serde_json::Value) -> Self {
        self.example = Some(example);
        self
    }

    pub fn with_required<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.required = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Name of the referenced schema, the last `/` segment of `$ref`.
    pub fn reference_name(&self) -> Option<&str> {
        self.reference
            .as_deref()
            .map(|reference| reference.rsplit('/').next().unwrap_or(reference))
    }

    /// Short label for tables: the type name or the referenced schema name.
    pub fn type_label(&self) -> &str {
        match (self.reference_name(), self.schema_type) {
            (Some(name), _) => name,
            (None, Some(schema_type)) => schema_type.as_str(),
            (None, None) => "",
        }
    }
}

/// HTTP methods an endpoint can declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 5] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Patch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur when parsing an HTTP method
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMethodError(pub String);

impl fmt::Display for UnknownMethodError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown HTTP method '{}'. Expected one of: GET, POST, PUT, DELETE, PATCH",
            self.0
        )
    }
}

impl std::error::Error for UnknownMethodError {}

impl FromStr for HttpMethod {
    type Err = UnknownMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HttpMethod::ALL
            .into_iter()
            .find(|method| method.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownMethodError(s.to_string()))
    }
}

/// Where a parameter is carried in the request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Query,
    Header,
    Path,
    Cookie,
}

impl fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParameterLocation::Query => "query",
            ParameterLocation::Header => "header",
            ParameterLocation::Path => "path",
            ParameterLocation::Cookie => "cookie",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub schema: SchemaNode,
}

/// Schema wrapper of a single media type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaType {
    #[serde(default)]
    pub schema: SchemaNode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestBody {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub content: OrderedMap<MediaType>,
}

impl RequestBody {
    /// Request body carrying a JSON document of the given shape.
    pub fn json(description: &str, required: bool, schema: SchemaNode) -> Self {
        let mut content = OrderedMap::new();
        content.insert(labels::JSON_MEDIA_TYPE, MediaType { schema });
        Self {
            description: description.to_string(),
            required,
            content,
        }
    }

    pub fn json_schema(&self) -> Option<&SchemaNode> {
        self.content
            .get(labels::JSON_MEDIA_TYPE)
            .map(|media| &media.schema)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseObject {
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<OrderedMap<MediaType>>,
}

impl ResponseObject {
    pub fn new(description: &str) -> Self {
        Self {
            description: description.to_string(),
            content: None,
        }
    }

    pub fn json(description: &str, schema: SchemaNode) -> Self {
        let mut content = OrderedMap::new();
        content.insert(labels::JSON_MEDIA_TYPE, MediaType { schema });
        Self {
            description: description.to_string(),
            content: Some(content),
        }
    }

    pub fn json_schema(&self) -> Option<&SchemaNode> {
        self.content
            .as_ref()
            .and_then(|content| content.get(labels::JSON_MEDIA_TYPE))
            .map(|media| &media.schema)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    pub path: String,
    pub method: HttpMethod,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBody>,
    #[serde(default)]
    pub responses: OrderedMap<ResponseObject>,
}

impl Endpoint {
    /// Stable key of an endpoint within its definition.
    pub fn key(&self) -> String {
        format!("{}{}", self.method, self.path)
    }
}

/// A named, versioned description of an API's endpoints and schemas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiDefinition {
    pub id: String,
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub endpoints: Vec<Endpoint>,
    #[serde(default)]
    pub schemas: OrderedMap<SchemaNode>,
}

impl ApiDefinition {
    pub fn find_endpoint(&self, method: HttpMethod, path: &str) -> Option<&Endpoint> {
        self.endpoints
            .iter()
            .find(|endpoint| endpoint.method == method && endpoint.path == path)
    }
}

/// One simulated invocation event used for analytics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCallLogRecord {
    pub id: String,
    pub api_id: String,
    pub endpoint_path: String,
    pub endpoint_method: HttpMethod,
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
}

/// Input of the call-log recorder; id and timestamp are assigned on record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCallLog {
    pub api_id: String,
    pub endpoint_path: String,
    pub endpoint_method: HttpMethod,
    pub user_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ordered_map_keeps_document_order() {
        let map: OrderedMap<u32> =
            serde_json::from_str(r#"{"zeta": 1, "alpha": 2, "mid": 3}"#).expect("valid map");
        let keys: Vec<&str> = map.keys().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);

        let back = serde_json::to_string(&map).expect("serializable");
        assert_eq!(back, r#"{"zeta":1,"alpha":2,"mid":3}"#);
    }

    #[test]
    fn test_ordered_map_insert_replaces_in_place() {
        let mut map = OrderedMap::new();
        map.insert("a", 1);
        map.insert("b", 2);
        map.insert("a", 3);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("a"), Some(&3));
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_schema_node_parses_reference() {
        let node: SchemaNode =
            serde_json::from_value(json!({"$ref": "#/components/schemas/User"})).unwrap();
        assert_eq!(node.reference_name(), Some("User"));
        assert_eq!(node.schema_type, None);
        assert_eq!(node.type_label(), "User");
    }

    #[test]
    fn test_schema_node_reference_without_slashes() {
        let node = SchemaNode {
            reference: Some("User".to_string()),
            ..Default::default()
        };
        assert_eq!(node.reference_name(), Some("User"));
    }

    #[test]
    fn test_schema_node_tolerates_missing_fields() {
        let node: SchemaNode = serde_json::from_value(json!({})).unwrap();
        assert_eq!(node, SchemaNode::default());
        assert_eq!(node.type_label(), "");
    }

    #[test]
    fn test_schema_node_round_trips_camel_fields() {
        let node = SchemaNode::object([("id", SchemaNode::primitive(SchemaType::String))])
            .with_required(["id"]);
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(
            value,
            json!({"type": "object", "properties": {"id": {"type": "string"}}, "required": ["id"]})
        );
    }

    #[test]
    fn test_http_method_from_str() {
        assert_eq!("get".parse::<HttpMethod>(), Ok(HttpMethod::Get));
        assert_eq!(" PATCH ".parse::<HttpMethod>(), Ok(HttpMethod::Patch));
        assert!("TRACE".parse::<HttpMethod>().is_err());
    }

    #[test]
    fn test_http_method_serializes_uppercase() {
        assert_eq!(
            serde_json::to_value(HttpMethod::Delete).unwrap(),
            json!("DELETE")
        );
    }

    #[test]
    fn test_call_log_record_wire_format() {
        let record: ApiCallLogRecord = serde_json::from_value(json!({
            "id": "log_1",
            "apiId": "user-api",
            "endpointPath": "/users",
            "endpointMethod": "GET",
            "userId": "user-john-doe",
            "timestamp": "2024-05-01T12:00:00.000Z"
        }))
        .unwrap();
        assert_eq!(record.api_id, "user-api");
        assert_eq!(record.endpoint_method, HttpMethod::Get);
        assert_eq!(record.timestamp.to_rfc3339(), "2024-05-01T12:00:00+00:00");
    }

    #[test]
    fn test_endpoint_request_body_field_name() {
        let endpoint = Endpoint {
            path: "/payment_intents".to_string(),
            method: HttpMethod::Post,
            summary: String::new(),
            description: String::new(),
            parameters: vec![],
            request_body: Some(RequestBody::json(
                "Payment details.",
                true,
                SchemaNode::primitive(SchemaType::Integer),
            )),
            responses: OrderedMap::new(),
        };
        let value = serde_json::to_value(&endpoint).unwrap();
        assert!(value.get("requestBody").is_some());
        assert_eq!(
            endpoint.request_body.unwrap().json_schema(),
            Some(&SchemaNode::primitive(SchemaType::Integer))
        );
    }

    #[test]
    fn test_parameter_location_field() {
        let parameter: Parameter = serde_json::from_value(json!({
            "name": "limit",
            "in": "query",
            "description": "Number of users to return.",
            "required": false,
            "schema": {"type": "integer", "example": 20}
        }))
        .unwrap();
        assert_eq!(parameter.location, ParameterLocation::Query);
        assert_eq!(parameter.schema.type_label(), "integer");
    }
}
