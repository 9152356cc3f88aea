//! Per-field coercion and constraint checks.
//!
//! Invariants:
//! - Issue messages never contain the offending raw value, so a failure can
//!   be logged even when the field holds a secret.
//! - `Null` is treated the same as an absent key.

use super::failure::{Issue, IssueKind};
use super::{Coercion, Constraint, FieldKind, FieldSpec, Presence};
use super::typed::Value;
use crate::constants::{FALSE_LITERALS, LIST_SEPARATOR, TRUE_LITERALS};
use crate::value::RawValue;

/// Evaluate one field. Returns `None` when the field is absent and optional,
/// or when an issue was recorded.
pub(crate) fn evaluate_field(
    spec: &FieldSpec,
    raw: Option<&RawValue>,
    path: &str,
    issues: &mut Vec<Issue>,
) -> Option<Value> {
    let present = raw
        .filter(|value| !matches!(value, RawValue::Null))
        .filter(|value| !(spec.blank_as_missing && value.is_blank()));

    let input = match (present, &spec.presence) {
        (Some(value), _) => value,
        (None, Presence::Default(default)) => default,
        (None, Presence::Optional) => return None,
        (None, Presence::Required) => {
            issues.push(Issue::field(path, IssueKind::Missing));
            return None;
        }
    };

    let value = coerce(&spec.kind, spec.coercion, input, path, issues)?;

    let mut valid = true;
    for constraint in &spec.constraints {
        if let Err(kind) = check_constraint(constraint, &value) {
            issues.push(Issue::field(path, kind));
            valid = false;
        }
    }
    valid.then_some(value)
}

fn coerce(
    kind: &FieldKind,
    coercion: Coercion,
    raw: &RawValue,
    path: &str,
    issues: &mut Vec<Issue>,
) -> Option<Value> {
    let lenient = coercion == Coercion::Lenient;
    let result = match (kind, raw) {
        (FieldKind::String, RawValue::String(s)) => Ok(Value::String(s.clone())),
        (FieldKind::String, RawValue::Number(n)) if lenient => Ok(Value::String(n.to_string())),
        (FieldKind::String, RawValue::Bool(b)) if lenient => Ok(Value::String(b.to_string())),

        (FieldKind::Integer, RawValue::Number(n)) => number_to_i64(n)
            .map(Value::Integer)
            .ok_or(IssueKind::InvalidInteger),
        (FieldKind::Integer, RawValue::String(s)) if lenient => parse_i64(s)
            .map(Value::Integer)
            .ok_or(IssueKind::InvalidInteger),

        (FieldKind::Float, RawValue::Number(n)) => n
            .as_f64()
            .filter(|f| f.is_finite())
            .map(Value::Float)
            .ok_or(IssueKind::InvalidFloat),
        (FieldKind::Float, RawValue::String(s)) if lenient => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(Value::Float)
            .ok_or(IssueKind::InvalidFloat),

        (FieldKind::Bool, RawValue::Bool(b)) => Ok(Value::Bool(*b)),
        (FieldKind::Bool, RawValue::String(s)) if lenient => {
            parse_bool(s).map(Value::Bool).ok_or(IssueKind::InvalidBool)
        }

        (FieldKind::Url, RawValue::String(s)) => normalize_url(s).map(Value::String),

        (FieldKind::List(item), RawValue::Array(items)) => {
            return coerce_items(item, coercion, items.iter(), path, issues);
        }
        (FieldKind::List(item), RawValue::String(s)) if lenient => {
            let items: Vec<RawValue> = split_list(s).map(RawValue::from).collect();
            return coerce_items(item, coercion, items.iter(), path, issues);
        }

        (FieldKind::Object(schema), RawValue::Map(map)) => {
            let before = issues.len();
            let typed = schema.evaluate_scope(map, Some(path), issues);
            return (issues.len() == before).then_some(Value::Object(typed));
        }

        (kind, other) => Err(IssueKind::InvalidType {
            expected: kind.describe(),
            found: other.type_name(),
        }),
    };

    match result {
        Ok(value) => Some(value),
        Err(kind) => {
            issues.push(Issue::field(path, kind));
            None
        }
    }
}

fn coerce_items<'a>(
    item: &FieldKind,
    coercion: Coercion,
    items: impl Iterator<Item = &'a RawValue>,
    path: &str,
    issues: &mut Vec<Issue>,
) -> Option<Value> {
    let before = issues.len();
    let values: Vec<Value> = items
        .enumerate()
        .filter_map(|(index, raw)| coerce(item, coercion, raw, &format!("{path}[{index}]"), issues))
        .collect();
    (issues.len() == before).then_some(Value::List(values))
}

/// 2^63, the first float above `i64::MAX`. `i64::MAX as f64` rounds up to
/// this value, so the upper bound must be exclusive.
const I64_UPPER_BOUND: f64 = 9_223_372_036_854_775_808.0;

fn float_to_i64(f: f64) -> Option<i64> {
    (f.fract() == 0.0 && f >= i64::MIN as f64 && f < I64_UPPER_BOUND).then_some(f as i64)
}

fn number_to_i64(n: &serde_json::Number) -> Option<i64> {
    if n.is_u64() {
        return n.as_u64().and_then(|u| i64::try_from(u).ok());
    }
    n.as_i64().or_else(|| n.as_f64().and_then(float_to_i64))
}

/// Integer literals go through `i128` so out-of-range values are rejected
/// instead of saturating; only non-integer literals fall back to `f64`.
fn parse_i64(s: &str) -> Option<i64> {
    let trimmed = s.trim();
    match trimmed.parse::<i128>() {
        Ok(wide) => i64::try_from(wide).ok(),
        Err(_) => trimmed
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .and_then(float_to_i64),
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    let normalized = s.trim().to_ascii_lowercase();
    if TRUE_LITERALS.contains(&normalized.as_str()) {
        Some(true)
    } else if FALSE_LITERALS.contains(&normalized.as_str()) {
        Some(false)
    } else {
        None
    }
}

fn split_list(s: &str) -> impl Iterator<Item = &str> {
    s.split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|item| !item.is_empty())
}

/// Validates and normalizes an absolute URL.
///
/// Rules:
/// - Trim surrounding whitespace
/// - Parse as an absolute URL
/// - Require a host for hierarchical schemes (http, https, postgres, ...)
/// - Normalize by stripping the trailing slash, unless the URL carries a
///   query or fragment, or has no host (`file:///`)
fn normalize_url(raw: &str) -> Result<String, IssueKind> {
    let parsed = url::Url::parse(raw.trim()).map_err(|e| IssueKind::InvalidUrl(e.to_string()))?;

    if !parsed.cannot_be_a_base() && parsed.host_str().is_none() && parsed.scheme() != "file" {
        return Err(IssueKind::InvalidUrl("host is required".to_string()));
    }

    // Only a bare base URL loses its trailing slash; a slash inside a query
    // or fragment is data.
    if parsed.host_str().is_some() && parsed.query().is_none() && parsed.fragment().is_none() {
        Ok(parsed.as_str().trim_end_matches('/').to_string())
    } else {
        Ok(parsed.as_str().to_string())
    }
}

fn check_constraint(constraint: &Constraint, value: &Value) -> Result<(), IssueKind> {
    match constraint {
        Constraint::Range { min, max } => {
            let Some(number) = value.as_f64() else {
                return Ok(());
            };
            let below = min.is_some_and(|min| number < min);
            let above = max.is_some_and(|max| number > max);
            if below || above {
                Err(IssueKind::OutOfRange {
                    min: *min,
                    max: *max,
                })
            } else {
                Ok(())
            }
        }
        Constraint::Length { min, max } => {
            let len = match value {
                Value::String(s) => s.chars().count(),
                Value::List(items) => items.len(),
                _ => return Ok(()),
            };
            let short = min.is_some_and(|min| len < min);
            let long = max.is_some_and(|max| len > max);
            if short || long {
                Err(IssueKind::InvalidLength {
                    min: *min,
                    max: *max,
                })
            } else {
                Ok(())
            }
        }
        Constraint::OneOf(allowed) => {
            let rendered = match value {
                Value::String(s) => s.clone(),
                Value::Integer(i) => i.to_string(),
                Value::Float(f) => f.to_string(),
                Value::Bool(b) => b.to_string(),
                Value::List(_) | Value::Object(_) => return Ok(()),
            };
            if allowed.iter().any(|candidate| *candidate == rendered) {
                Ok(())
            } else {
                Err(IssueKind::NotOneOf(allowed.clone()))
            }
        }
    }
}
