//! Reading schema nodes from OpenAPI / JSON Schema documents.
//!
//! Accepts both the OpenAPI 3.0 boolean `exclusiveMinimum`/`exclusiveMaximum`
//! and the JSON Schema (OpenAPI 3.1) numeric form. `$ref`s are not resolved.

use crate::options::TagOptions;
use crate::schema::{ArraySchema, Kind, Scalar, SchemaNode};
use crate::translate::translate_with;
use serde_json::{Map, Value};
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("schema node must be a JSON object")]
    NotAnObject,
    #[error("`{keyword}` must be {expected}")]
    InvalidKeyword {
        keyword: &'static str,
        expected: &'static str,
    },
    #[error("enum value at index {index} is not a string: {value}")]
    NonStringEnum { index: usize, value: Value },
}

/// Validation tag for one property of an object schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldTag {
    /// Property name as it appears in the schema.
    pub name: String,
    /// Comma-joined directives; empty when nothing applies.
    pub tag: String,
}

/// Parse one property schema into a [`SchemaNode`].
pub fn parse_schema_node(input: &Value) -> Result<SchemaNode, ParseError> {
    let obj = input.as_object().ok_or(ParseError::NotAnObject)?;

    let kind = parse_kind(obj);
    if kind != Kind::Array {
        return Ok(SchemaNode::Scalar(parse_scalar(obj, kind)?));
    }

    let items = match obj.get("items") {
        Some(items) => {
            let items = items.as_object().ok_or(ParseError::InvalidKeyword {
                keyword: "items",
                expected: "a schema object",
            })?;
            let item_kind = parse_kind(items);
            if item_kind == Kind::Array {
                debug!("nested array element, inner cardinality is not carried");
            }
            parse_scalar(items, item_kind)?
        }
        None => Scalar::default(),
    };

    Ok(SchemaNode::Array(ArraySchema {
        items,
        min_items: get_count(obj, "minItems")?,
        max_items: get_count(obj, "maxItems")?,
        unique_items: get_flag(obj, "uniqueItems")?,
    }))
}

/// Tags for every property of an object schema, in document order.
pub fn property_tags(input: &Value, options: &TagOptions) -> Result<Vec<FieldTag>, ParseError> {
    let obj = input.as_object().ok_or(ParseError::NotAnObject)?;

    let required: Vec<&str> = obj
        .get("required")
        .and_then(|r| r.as_array())
        .map(|arr| arr.iter().filter_map(|v| v.as_str()).collect())
        .unwrap_or_default();

    let Some(props) = obj.get("properties").and_then(|p| p.as_object()) else {
        return Ok(Vec::new());
    };

    props
        .iter()
        .map(|(name, prop)| {
            let node = parse_schema_node(prop)?;
            let is_required = required.contains(&name.as_str());
            Ok(FieldTag {
                name: name.clone(),
                tag: translate_with(&node, is_required, options),
            })
        })
        .collect()
}

fn parse_kind(obj: &Map<String, Value>) -> Kind {
    if obj.contains_key("$ref") {
        debug!("unresolved $ref, treating as unspecified");
        return Kind::Unspecified;
    }

    let name = match obj.get("type") {
        Some(Value::String(s)) => Some(s.as_str()),
        // ["string", "null"] and friends: nullability is not a constraint here.
        Some(Value::Array(types)) => {
            let mut names = types.iter().filter_map(|t| t.as_str());
            let has_null = names.clone().any(|t| t == "null");
            names.find(|t| *t != "null").or(has_null.then_some("null"))
        }
        _ => None,
    };

    match name {
        Some("string") => Kind::String,
        Some("integer") => Kind::Integer,
        Some("number") => Kind::Number,
        Some("boolean") => Kind::Boolean,
        Some("array") => Kind::Array,
        Some("object") => Kind::Object,
        Some("null") => Kind::Null,
        Some(other) => {
            debug!(schema_type = other, "unknown schema type");
            Kind::Unspecified
        }
        None => Kind::Unspecified,
    }
}

fn parse_scalar(obj: &Map<String, Value>, kind: Kind) -> Result<Scalar, ParseError> {
    let (minimum, exclusive_minimum) = parse_bound(obj, "minimum", "exclusiveMinimum")?;
    let (maximum, exclusive_maximum) = parse_bound(obj, "maximum", "exclusiveMaximum")?;

    Ok(Scalar {
        kind,
        minimum,
        maximum,
        exclusive_minimum,
        exclusive_maximum,
        min_length: get_count(obj, "minLength")?,
        max_length: get_count(obj, "maxLength")?,
        multiple_of: get_number(obj, "multipleOf")?,
        format: get_string(obj, "format")?.filter(|f| !f.is_empty()),
        pattern: get_string(obj, "pattern")?,
        enum_values: parse_enum(obj)?,
        min_properties: get_count(obj, "minProperties")?,
        max_properties: get_count(obj, "maxProperties")?,
    })
}

/// A bound and its exclusivity. A numeric exclusive keyword replaces the
/// inclusive one.
fn parse_bound(
    obj: &Map<String, Value>,
    inclusive: &'static str,
    exclusive: &'static str,
) -> Result<(Option<f64>, bool), ParseError> {
    let value = get_number(obj, inclusive)?;
    match obj.get(exclusive) {
        None | Some(Value::Null) => Ok((value, false)),
        Some(Value::Bool(flag)) => Ok((value, *flag)),
        Some(Value::Number(n)) => Ok((n.as_f64(), true)),
        Some(_) => Err(ParseError::InvalidKeyword {
            keyword: exclusive,
            expected: "a boolean or a number",
        }),
    }
}

fn parse_enum(obj: &Map<String, Value>) -> Result<Vec<String>, ParseError> {
    let Some(values) = obj.get("enum") else {
        return Ok(Vec::new());
    };
    let values = values.as_array().ok_or(ParseError::InvalidKeyword {
        keyword: "enum",
        expected: "an array",
    })?;

    values
        .iter()
        .enumerate()
        .map(|(index, value)| match value {
            Value::String(s) => Ok(s.clone()),
            other => Err(ParseError::NonStringEnum {
                index,
                value: other.clone(),
            }),
        })
        .collect()
}

fn get_number(obj: &Map<String, Value>, keyword: &'static str) -> Result<Option<f64>, ParseError> {
    match obj.get(keyword) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v.as_f64().map(Some).ok_or(ParseError::InvalidKeyword {
            keyword,
            expected: "a number",
        }),
    }
}

fn get_count(obj: &Map<String, Value>, keyword: &'static str) -> Result<Option<u64>, ParseError> {
    match obj.get(keyword) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v.as_u64().map(Some).ok_or(ParseError::InvalidKeyword {
            keyword,
            expected: "a non-negative integer",
        }),
    }
}

fn get_string(
    obj: &Map<String, Value>,
    keyword: &'static str,
) -> Result<Option<String>, ParseError> {
    match obj.get(keyword) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(ParseError::InvalidKeyword {
            keyword,
            expected: "a string",
        }),
    }
}

fn get_flag(obj: &Map<String, Value>, keyword: &'static str) -> Result<bool, ParseError> {
    match obj.get(keyword) {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(b)) => Ok(*b),
        Some(_) => Err(ParseError::InvalidKeyword {
            keyword,
            expected: "a boolean",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_integer_with_bounds() {
        let node = parse_schema_node(&json!({
            "type": "integer",
            "format": "int64",
            "minimum": 1,
            "maximum": 100,
            "exclusiveMaximum": true
        }))
        .unwrap();

        let SchemaNode::Scalar(s) = node else {
            panic!("expected scalar");
        };
        assert_eq!(s.kind, Kind::Integer);
        assert_eq!(s.minimum, Some(1.0));
        assert_eq!(s.maximum, Some(100.0));
        assert!(!s.exclusive_minimum);
        assert!(s.exclusive_maximum);
        assert_eq!(s.format.as_deref(), Some("int64"));
    }

    #[test]
    fn numeric_exclusive_bound_replaces_inclusive() {
        let node = parse_schema_node(&json!({
            "type": "number",
            "minimum": 0,
            "exclusiveMinimum": 5
        }))
        .unwrap();

        let s = node.element();
        assert_eq!(s.minimum, Some(5.0));
        assert!(s.exclusive_minimum);
    }

    #[test]
    fn parse_array_splits_array_level_fields() {
        let node = parse_schema_node(&json!({
            "type": "array",
            "minItems": 1,
            "uniqueItems": true,
            "items": { "type": "string", "minLength": 3 }
        }))
        .unwrap();

        let SchemaNode::Array(a) = node else {
            panic!("expected array");
        };
        assert_eq!(a.items.kind, Kind::String);
        assert_eq!(a.items.min_length, Some(3));
        assert_eq!(a.min_items, Some(1));
        assert!(a.unique_items);
    }

    #[test]
    fn array_without_items_has_unspecified_element() {
        let node = parse_schema_node(&json!({ "type": "array" })).unwrap();
        assert_eq!(node.element().kind, Kind::Unspecified);
    }

    #[test]
    fn null_only_type_list_is_null() {
        let node = parse_schema_node(&json!({ "type": ["null"] })).unwrap();
        assert_eq!(node.element().kind, Kind::Null);
    }

    #[test]
    fn empty_format_reads_as_absent() {
        let node = parse_schema_node(&json!({ "type": "string", "format": "" })).unwrap();
        assert_eq!(node.element().format, None);
        assert_eq!(crate::translate(&node, false), "");
        assert_eq!(crate::translate(&node, true), "required");
    }

    #[test]
    fn nullable_type_list_uses_non_null_entry() {
        let node = parse_schema_node(&json!({ "type": ["null", "boolean"] })).unwrap();
        assert_eq!(node.element().kind, Kind::Boolean);
    }

    #[test]
    fn ref_is_unspecified() {
        let node = parse_schema_node(&json!({ "$ref": "#/components/schemas/Pet" })).unwrap();
        assert_eq!(node.element().kind, Kind::Unspecified);
    }

    #[test]
    fn reject_non_string_enum() {
        let err = parse_schema_node(&json!({
            "type": "integer",
            "enum": [1, 2, 3]
        }))
        .unwrap_err();

        assert!(matches!(err, ParseError::NonStringEnum { index: 0, .. }));
        assert_eq!(err.to_string(), "enum value at index 0 is not a string: 1");
    }

    #[test]
    fn reject_mixed_enum_at_first_offender() {
        let err = parse_schema_node(&json!({ "enum": ["a", "b", null] })).unwrap_err();
        assert!(matches!(err, ParseError::NonStringEnum { index: 2, value: Value::Null }));
    }

    #[test]
    fn reject_negative_length() {
        let err = parse_schema_node(&json!({ "type": "string", "minLength": -1 })).unwrap_err();
        assert!(matches!(
            err,
            ParseError::InvalidKeyword {
                keyword: "minLength",
                ..
            }
        ));
    }

    #[test]
    fn reject_non_object() {
        assert!(matches!(
            parse_schema_node(&json!("string")),
            Err(ParseError::NotAnObject)
        ));
    }

    #[test]
    fn property_tags_follow_document_order() {
        let tags = property_tags(
            &json!({
                "type": "object",
                "required": ["name", "active"],
                "properties": {
                    "name": { "type": "string", "maxLength": 64 },
                    "active": { "type": "boolean" },
                    "nickname": { "type": "string" }
                }
            }),
            &TagOptions::default(),
        )
        .unwrap();

        let pairs: Vec<(&str, &str)> = tags
            .iter()
            .map(|t| (t.name.as_str(), t.tag.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![("name", "required,lte=64"), ("active", ""), ("nickname", "")]
        );
    }

    #[test]
    fn property_tags_without_properties() {
        let tags = property_tags(&json!({ "type": "object" }), &TagOptions::default()).unwrap();
        assert!(tags.is_empty());
    }
}
