//! Structured validation failures.
//!
//! Responsibilities:
//! - Define `IssueKind`, the typed reason a value was rejected.
//! - Flatten issues into per-field and form-level message lists.
//!
//! Invariants:
//! - A `ValidationFailure` always holds at least one issue.
//! - Field paths are dotted for nested objects and indexed for list items.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Why a value was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum IssueKind {
    Missing,
    InvalidType {
        expected: &'static str,
        found: &'static str,
    },
    InvalidInteger,
    InvalidFloat,
    InvalidBool,
    InvalidUrl(String),
    OutOfRange {
        min: Option<f64>,
        max: Option<f64>,
    },
    InvalidLength {
        min: Option<usize>,
        max: Option<usize>,
    },
    NotOneOf(Vec<String>),
    /// A cross-field rule rejected the scope.
    Rule(String),
    /// The validated tree did not fit the caller's target type.
    Deserialize(String),
}

fn describe_bounds<T: fmt::Display>(min: &Option<T>, max: &Option<T>) -> String {
    match (min, max) {
        (Some(min), Some(max)) => format!("between {min} and {max}"),
        (Some(min), None) => format!("at least {min}"),
        (None, Some(max)) => format!("at most {max}"),
        (None, None) => "within bounds".to_string(),
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueKind::Missing => write!(f, "Required"),
            IssueKind::InvalidType { expected, found } => {
                write!(f, "Expected {expected}, received {found}")
            }
            IssueKind::InvalidInteger => write!(f, "Expected an integer"),
            IssueKind::InvalidFloat => write!(f, "Expected a finite number"),
            IssueKind::InvalidBool => {
                write!(f, "Expected a boolean (true/false, 1/0, yes/no, on/off)")
            }
            IssueKind::InvalidUrl(reason) => write!(f, "Invalid URL: {reason}"),
            IssueKind::OutOfRange { min, max } => {
                write!(f, "Must be {}", describe_bounds(min, max))
            }
            IssueKind::InvalidLength { min, max } => {
                write!(f, "Length must be {}", describe_bounds(min, max))
            }
            IssueKind::NotOneOf(allowed) => {
                write!(f, "Must be one of: {}", allowed.join(", "))
            }
            IssueKind::Rule(message) | IssueKind::Deserialize(message) => {
                write!(f, "{message}")
            }
        }
    }
}

/// One validation issue. `path == None` marks a form-level issue.
#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    pub path: Option<String>,
    pub kind: IssueKind,
}

impl Issue {
    pub fn field(path: impl Into<String>, kind: IssueKind) -> Self {
        Self {
            path: Some(path.into()),
            kind,
        }
    }

    pub fn form(kind: IssueKind) -> Self {
        Self { path: None, kind }
    }
}

/// Every reason a configuration failed validation.
///
/// Serializes as `{ "message", "fieldErrors", "formErrors" }` so callers can
/// hand it straight to a JSON consumer.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct ValidationFailure {
    message: String,
    field_errors: BTreeMap<String, Vec<String>>,
    form_errors: Vec<String>,
    #[serde(skip)]
    issues: Vec<Issue>,
}

impl ValidationFailure {
    /// Build a failure from collected issues.
    ///
    /// An empty list yields a single generic form error so the invariant
    /// of "at least one issue" holds.
    pub fn from_issues(mut issues: Vec<Issue>) -> Self {
        if issues.is_empty() {
            issues.push(Issue::form(IssueKind::Rule(
                "Configuration was rejected".to_string(),
            )));
        }

        let mut field_errors: BTreeMap<String, Vec<String>> = BTreeMap::new();
        let mut form_errors = Vec::new();
        for issue in &issues {
            match &issue.path {
                Some(path) => field_errors
                    .entry(path.clone())
                    .or_default()
                    .push(issue.kind.to_string()),
                None => form_errors.push(issue.kind.to_string()),
            }
        }

        let details: Vec<String> = field_errors
            .iter()
            .map(|(path, messages)| format!("{path}: {}", messages.join(", ")))
            .chain(form_errors.iter().cloned())
            .collect();
        let message = format!("Invalid configuration: {}", details.join("; "));

        Self {
            message,
            field_errors,
            form_errors,
            issues,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn field_errors(&self) -> &BTreeMap<String, Vec<String>> {
        &self.field_errors
    }

    pub fn form_errors(&self) -> &[String] {
        &self.form_errors
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Messages recorded for `path`, empty when the field passed.
    pub fn errors_for(&self, path: &str) -> &[String] {
        self.field_errors
            .get(path)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Names of every field with at least one error.
    pub fn failed_fields(&self) -> impl Iterator<Item = &str> {
        self.field_errors.keys().map(String::as_str)
    }
}
