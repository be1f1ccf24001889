//! Typed schema node model.
//!
//! A property schema is either a scalar or an array wrapping an element
//! scalar. Array-level cardinality fields live on [`ArraySchema`]; everything
//! else is read from the element.

use serde::{Deserialize, Serialize};

/// A single property schema as supplied by the document reader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SchemaNode {
    Scalar(Scalar),
    Array(ArraySchema),
}

/// Primitive or structural type of a schema node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    String,
    Integer,
    Number,
    Boolean,
    /// Only seen on an element scalar (array of arrays).
    Array,
    Object,
    Null,
    /// No `type` keyword, an unknown type name, or an unresolved `$ref`.
    #[default]
    Unspecified,
}

/// Constraints of a non-array schema, or of an array's element schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scalar {
    pub kind: Kind,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    /// Whether `minimum` is exclusive.
    pub exclusive_minimum: bool,
    /// Whether `maximum` is exclusive.
    pub exclusive_maximum: bool,
    pub min_length: Option<u64>,
    pub max_length: Option<u64>,
    pub multiple_of: Option<f64>,
    /// Semantic subtype (e.g. "email", "int64", "date-time").
    pub format: Option<String>,
    pub pattern: Option<String>,
    /// Allowed values. Empty means unconstrained.
    pub enum_values: Vec<String>,
    pub min_properties: Option<u64>,
    pub max_properties: Option<u64>,
}

/// An array schema: cardinality constraints plus the element schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArraySchema {
    /// Element schema (`items`). Unspecified kind when the array has none.
    pub items: Scalar,
    pub min_items: Option<u64>,
    pub max_items: Option<u64>,
    pub unique_items: bool,
}

impl SchemaNode {
    /// The schema whose type, bounds, format and enum drive translation.
    pub fn element(&self) -> &Scalar {
        match self {
            SchemaNode::Scalar(scalar) => scalar,
            SchemaNode::Array(array) => &array.items,
        }
    }

    /// Array-level constraints, if this node is an array.
    pub fn array(&self) -> Option<&ArraySchema> {
        match self {
            SchemaNode::Scalar(_) => None,
            SchemaNode::Array(array) => Some(array),
        }
    }
}

impl From<Scalar> for SchemaNode {
    fn from(scalar: Scalar) -> Self {
        SchemaNode::Scalar(scalar)
    }
}

impl From<ArraySchema> for SchemaNode {
    fn from(array: ArraySchema) -> Self {
        SchemaNode::Array(array)
    }
}

impl Scalar {
    pub fn new(kind: Kind) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }
}

impl ArraySchema {
    pub fn of(items: Scalar) -> Self {
        Self {
            items,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_dereferences_to_items() {
        let mut items = Scalar::new(Kind::String);
        items.min_length = Some(3);
        let node = SchemaNode::from(ArraySchema {
            unique_items: true,
            ..ArraySchema::of(items.clone())
        });

        assert_eq!(node.element(), &items);
        assert!(node.array().is_some_and(|a| a.unique_items));
    }

    #[test]
    fn scalar_is_its_own_element() {
        let node = SchemaNode::from(Scalar::new(Kind::Boolean));
        assert_eq!(node.element().kind, Kind::Boolean);
        assert!(node.array().is_none());
    }
}
