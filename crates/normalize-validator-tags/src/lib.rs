//! Struct validation tags from schema nodes.
//!
//! `normalize-validator-tags` turns one OpenAPI / JSON Schema property schema
//! into the comma-joined constraint list that go-playground/validator style
//! engines read from a `validate:"..."` field tag on generated DTOs.
//!
//! # Architecture
//!
//! ```text
//! JSON schema node ──> SchemaNode ──> stages ──> Directives ──> "required,gte=1,email"
//!  (input.rs)          (schema.rs)   (translate.rs)  (directive.rs)
//! ```
//!
//! Arrays are translated through their element schema, except for
//! `minItems`/`maxItems`/`uniqueItems`, which stay on the array.
//!
//! # Example
//!
//! ```
//! use normalize_validator_tags::{input, translate};
//!
//! let tags = serde_json::json!({
//!     "type": "array",
//!     "uniqueItems": true,
//!     "items": { "type": "string", "minLength": 3, "format": "email" }
//! });
//!
//! let node = input::parse_schema_node(&tags).unwrap();
//! assert_eq!(translate(&node, true), "required,gte=3,email,unique");
//! assert_eq!(translate(&node, false), "omitempty,gte=3,email,unique");
//! ```

pub mod directive;
pub mod input;
pub mod options;
pub mod schema;
pub mod translate;

pub use directive::{Directive, Directives, format_general};
pub use input::{FieldTag, ParseError, parse_schema_node, property_tags};
pub use options::{ConfigError, DEFAULT_IGNORED_FORMATS, TagOptions};
pub use schema::{ArraySchema, Kind, Scalar, SchemaNode};
pub use translate::{directives, translate, translate_with};
