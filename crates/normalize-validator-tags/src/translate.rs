//! Schema node → validation tag translation.
//!
//! Translation runs a fixed sequence of stages over one [`Directives`]
//! accumulator. Stage order is the directive order of the emitted tag:
//!
//! ```text
//! presence → lower bound → upper bound → multipleOf → format
//!          → pattern → enum → unique → property counts
//! ```
//!
//! `multipleOf`, `pattern` and the property-count stages hold their slots but
//! emit nothing yet.

use crate::directive::{Directive, Directives};
use crate::options::TagOptions;
use crate::schema::{ArraySchema, Kind, Scalar, SchemaNode};
use std::sync::OnceLock;
use tracing::trace;

static DEFAULT_OPTIONS: OnceLock<TagOptions> = OnceLock::new();

/// Translate a schema node into a validation tag using default options.
///
/// ```
/// use normalize_validator_tags::{Kind, Scalar, translate};
///
/// let mut age = Scalar::new(Kind::Integer);
/// age.minimum = Some(1.5);
/// age.maximum = Some(120.0);
///
/// assert_eq!(translate(&age.into(), true), "required,gte=2,lte=120");
/// ```
pub fn translate(schema: &SchemaNode, required: bool) -> String {
    translate_with(schema, required, DEFAULT_OPTIONS.get_or_init(TagOptions::default))
}

/// Translate a schema node into a validation tag.
pub fn translate_with(schema: &SchemaNode, required: bool, options: &TagOptions) -> String {
    assemble(schema, required, options).to_string()
}

/// The ordered directive list [`translate_with`] renders.
pub fn directives(schema: &SchemaNode, required: bool, options: &TagOptions) -> Vec<Directive> {
    assemble(schema, required, options).into_vec()
}

struct Context<'a> {
    /// Drives type, bounds, format and enum.
    element: &'a Scalar,
    /// Array-level cardinality and uniqueness, read from the original node.
    array: Option<&'a ArraySchema>,
    required: bool,
    options: &'a TagOptions,
}

type Stage = fn(&Context<'_>, &mut Directives);

const STAGES: &[Stage] = &[
    presence,
    lower_bound,
    upper_bound,
    multiple_of,
    format,
    pattern,
    one_of,
    unique,
    property_count,
];

fn assemble(schema: &SchemaNode, required: bool, options: &TagOptions) -> Directives {
    let ctx = Context {
        element: schema.element(),
        array: schema.array(),
        required,
        options,
    };

    let mut out = Directives::new();
    for stage in STAGES {
        stage(&ctx, &mut out);
    }
    out.collapse_lone_omitempty();
    out
}

// ============================================================================
// Presence
// ============================================================================

/// Zero is indistinguishable from absent for booleans and zero-floored
/// integers, so `required` would reject `false` and `0`.
fn suppresses_required(element: &Scalar) -> bool {
    match element.kind {
        Kind::Boolean => true,
        Kind::Integer => element.minimum == Some(0.0),
        _ => false,
    }
}

fn presence(ctx: &Context<'_>, out: &mut Directives) {
    if !ctx.required {
        out.push(Directive::OmitEmpty);
    } else if !suppresses_required(ctx.element) {
        out.push(Directive::Required);
    }
}

// ============================================================================
// Bounds
// ============================================================================

type BoundExtractor = fn(&Context<'_>) -> Option<f64>;

/// Lower bound sources, highest priority first.
const LOWER_BOUNDS: &[BoundExtractor] = &[numeric_minimum, min_length, min_items];

/// Upper bound sources, highest priority first.
const UPPER_BOUNDS: &[BoundExtractor] = &[numeric_maximum, max_length, max_items];

fn first_bound(extractors: &[BoundExtractor], ctx: &Context<'_>) -> Option<f64> {
    extractors.iter().find_map(|extract| extract(ctx))
}

fn numeric_minimum(ctx: &Context<'_>) -> Option<f64> {
    ctx.element.minimum
}

// A zero minLength/minItems is the keyword's default and constrains nothing.
fn min_length(ctx: &Context<'_>) -> Option<f64> {
    ctx.element.min_length.filter(|&n| n > 0).map(|n| n as f64)
}

fn min_items(ctx: &Context<'_>) -> Option<f64> {
    ctx.array
        .and_then(|a| a.min_items)
        .filter(|&n| n > 0)
        .map(|n| n as f64)
}

fn numeric_maximum(ctx: &Context<'_>) -> Option<f64> {
    ctx.element.maximum
}

fn max_length(ctx: &Context<'_>) -> Option<f64> {
    ctx.element.max_length.map(|n| n as f64)
}

fn max_items(ctx: &Context<'_>) -> Option<f64> {
    ctx.array.and_then(|a| a.max_items).map(|n| n as f64)
}

// Fractional bounds on integer fields are rounded inward and made inclusive:
// the validator cannot compare an integer field against a float.

fn lower_bound(ctx: &Context<'_>, out: &mut Directives) {
    let Some(mut value) = first_bound(LOWER_BOUNDS, ctx) else {
        return;
    };
    let mut exclusive = ctx.element.exclusive_minimum;

    if ctx.element.kind == Kind::Integer && value != value.ceil() {
        trace!(minimum = value, "rounding fractional integer minimum up");
        value = value.ceil();
        exclusive = false;
    }

    out.push(if exclusive {
        Directive::Gt(value)
    } else {
        Directive::Gte(value)
    });
}

fn upper_bound(ctx: &Context<'_>, out: &mut Directives) {
    let Some(mut value) = first_bound(UPPER_BOUNDS, ctx) else {
        return;
    };
    let mut exclusive = ctx.element.exclusive_maximum;

    if ctx.element.kind == Kind::Integer && value != value.floor() {
        trace!(maximum = value, "rounding fractional integer maximum down");
        value = value.floor();
        exclusive = false;
    }

    out.push(if exclusive {
        Directive::Lt(value)
    } else {
        Directive::Lte(value)
    });
}

// ============================================================================
// Format, enum, uniqueness
// ============================================================================

// An empty format name is the same as no format.
fn format(ctx: &Context<'_>, out: &mut Directives) {
    if let Some(name) = ctx.element.format.as_deref().filter(|f| !f.is_empty()) {
        if !ctx.options.is_ignored_format(name) {
            out.push(Directive::Format(name.to_string()));
        }
    }
}

fn one_of(ctx: &Context<'_>, out: &mut Directives) {
    if !ctx.element.enum_values.is_empty() {
        out.push(Directive::OneOf(ctx.element.enum_values.clone()));
    }
}

fn unique(ctx: &Context<'_>, out: &mut Directives) {
    if ctx.array.is_some_and(|a| a.unique_items) {
        out.push(Directive::Unique);
    }
}

// ============================================================================
// Reserved
// ============================================================================

// TODO: emit a custom multiple-of rule once the generator registers one.
fn multiple_of(ctx: &Context<'_>, _out: &mut Directives) {
    if let Some(step) = ctx.element.multiple_of {
        trace!(multiple_of = step, "multipleOf has no directive, skipping");
    }
}

fn pattern(ctx: &Context<'_>, _out: &mut Directives) {
    if let Some(pattern) = &ctx.element.pattern {
        trace!(pattern = %pattern, "pattern has no directive, skipping");
    }
}

fn property_count(ctx: &Context<'_>, _out: &mut Directives) {
    let element = ctx.element;
    if element.min_properties.is_some() || element.max_properties.is_some() {
        trace!(
            min_properties = ?element.min_properties,
            max_properties = ?element.max_properties,
            "property count bounds have no directive, skipping"
        );
    }
}
