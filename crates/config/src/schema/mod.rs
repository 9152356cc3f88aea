//! Schema descriptors and the validation capability.
//!
//! Responsibilities:
//! - Describe expected configuration as a tree of `FieldSpec`s.
//! - Evaluate a `RawConfig` against that tree, coercing values and
//!   collecting every issue instead of stopping at the first.
//! - Expose the `Validate` trait so the pipeline can accept any capability.
//!
//! Does NOT handle:
//! - Gathering raw values (see `loader`).
//! - Masking secrets in the result (see `secrets` and `TypedConfig::masked`).
//!
//! Invariants:
//! - Only declared fields appear in the output; undeclared keys are dropped.
//! - Cross-field rules run only when every field of their scope is valid.
//! - A schema round-trips through serde, except for rules, which are code.

mod coerce;
mod failure;
mod typed;
mod validate;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::value::{RawConfig, RawValue};

pub use failure::{Issue, IssueKind, ValidationFailure};
pub use typed::{TypedConfig, Value};
pub use validate::{FailurePolicy, Typed, Validate, validate};

/// Target type of a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    String,
    Integer,
    Float,
    Bool,
    /// Absolute URL, normalized without a trailing slash.
    Url,
    /// A JSON array, or a comma-separated string under lenient coercion.
    List(Box<FieldKind>),
    Object(Schema),
}

impl FieldKind {
    pub(crate) fn describe(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Integer => "integer",
            FieldKind::Float => "number",
            FieldKind::Bool => "boolean",
            FieldKind::Url => "url",
            FieldKind::List(_) => "array",
            FieldKind::Object(_) => "object",
        }
    }
}

/// What happens when a field is absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Presence {
    #[default]
    Required,
    Optional,
    /// Validated as if the raw input had contained this value.
    Default(RawValue),
}

/// How far the validator may go converting between raw variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Coercion {
    /// Parse strings into numbers, booleans and lists; render scalars as strings.
    #[default]
    Lenient,
    /// The raw variant must already match the target type.
    Strict,
}

/// Extra checks applied after coercion succeeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Constraint {
    /// Inclusive numeric bounds.
    Range { min: Option<f64>, max: Option<f64> },
    /// Inclusive bounds on string length (in characters) or list length.
    Length {
        min: Option<usize>,
        max: Option<usize>,
    },
    /// The value, rendered as a string, must be one of these.
    OneOf(Vec<String>),
}

/// Descriptor for one named field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    #[serde(default)]
    pub presence: Presence,
    #[serde(default)]
    pub coercion: Coercion,
    /// Treat empty or whitespace-only strings as if the key were absent.
    #[serde(default)]
    pub blank_as_missing: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constraints: Vec<Constraint>,
}

impl FieldSpec {
    /// A required, leniently coerced field.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            presence: Presence::Required,
            coercion: Coercion::Lenient,
            blank_as_missing: false,
            constraints: Vec::new(),
        }
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::String)
    }

    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Integer)
    }

    pub fn float(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Float)
    }

    pub fn bool(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Bool)
    }

    pub fn url(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Url)
    }

    pub fn list(name: impl Into<String>, item: FieldKind) -> Self {
        Self::new(name, FieldKind::List(Box::new(item)))
    }

    pub fn object(name: impl Into<String>, schema: Schema) -> Self {
        Self::new(name, FieldKind::Object(schema))
    }

    pub fn optional(mut self) -> Self {
        self.presence = Presence::Optional;
        self
    }

    /// Use `value` when the field is absent.
    pub fn with_default(mut self, value: impl Into<RawValue>) -> Self {
        self.presence = Presence::Default(value.into());
        self
    }

    pub fn strict(mut self) -> Self {
        self.coercion = Coercion::Strict;
        self
    }

    pub fn treat_blank_as_missing(mut self) -> Self {
        self.blank_as_missing = true;
        self
    }

    pub fn with_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.constraints.push(Constraint::Range { min, max });
        self
    }

    pub fn with_length(mut self, min: Option<usize>, max: Option<usize>) -> Self {
        self.constraints.push(Constraint::Length { min, max });
        self
    }

    pub fn one_of<I, S>(mut self, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.constraints
            .push(Constraint::OneOf(allowed.into_iter().map(Into::into).collect()));
        self
    }
}

type RuleFn = dyn Fn(&TypedConfig) -> Result<(), String> + Send + Sync;

/// A named cross-field check over a validated scope.
#[derive(Clone)]
pub struct Rule {
    name: String,
    check: Arc<RuleFn>,
}

impl Rule {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn check(&self, config: &TypedConfig) -> Result<(), String> {
        (self.check)(config)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish()
    }
}

/// An ordered set of field descriptors plus cross-field rules.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Schema {
    #[serde(default)]
    fields: Vec<FieldSpec>,
    #[serde(skip)]
    rules: Vec<Rule>,
}

impl PartialEq for Schema {
    /// Rules are opaque closures, so equality only compares fields.
    fn eq(&self, other: &Self) -> bool {
        self.fields == other.fields
    }
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field. A later field with the same name replaces the earlier one.
    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.fields.retain(|existing| existing.name != spec.name);
        self.fields.push(spec);
        self
    }

    /// Add a cross-field rule. Its error message becomes a form error at
    /// the top level, or a field error on the enclosing object when nested.
    pub fn rule<F>(mut self, name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&TypedConfig) -> Result<(), String> + Send + Sync + 'static,
    {
        self.rules.push(Rule {
            name: name.into(),
            check: Arc::new(check),
        });
        self
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Evaluate `raw` against the schema.
    pub fn evaluate(&self, raw: &RawConfig) -> Result<TypedConfig, ValidationFailure> {
        let mut issues = Vec::new();
        let typed = self.evaluate_scope(raw, None, &mut issues);
        if issues.is_empty() {
            Ok(typed)
        } else {
            Err(ValidationFailure::from_issues(issues))
        }
    }

    /// Evaluate one object scope, appending issues. `scope` is the dotted
    /// path of the enclosing object, `None` at the top level.
    pub(crate) fn evaluate_scope(
        &self,
        raw: &RawConfig,
        scope: Option<&str>,
        issues: &mut Vec<Issue>,
    ) -> TypedConfig {
        let issues_before = issues.len();
        let mut typed = TypedConfig::new();

        for spec in &self.fields {
            let path = match scope {
                Some(prefix) => format!("{prefix}.{}", spec.name),
                None => spec.name.clone(),
            };
            if let Some(value) = coerce::evaluate_field(spec, raw.get(&spec.name), &path, issues) {
                typed.insert(spec.name.clone(), value);
            }
        }

        if issues.len() == issues_before {
            for rule in &self.rules {
                if let Err(message) = rule.check(&typed) {
                    issues.push(Issue {
                        path: scope.map(str::to_string),
                        kind: IssueKind::Rule(message),
                    });
                }
            }
        }

        typed
    }
}
