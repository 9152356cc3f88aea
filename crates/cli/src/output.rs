//! Output formats for validated configuration.
//!
//! Responsibilities:
//! - Parse the `--output` value.
//! - Render a (masked) `TypedConfig` as `KEY=value` lines or pretty JSON.
//!
//! Does NOT handle:
//! - Masking (callers pass an already-masked config).

use anyhow::Result;
use strata_config::{TypedConfig, Value};

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    /// Parse from string.
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => anyhow::bail!("Invalid output format: {}. Valid options: text, json", s),
        }
    }
}

/// Render `config` in the requested format.
pub fn render(config: &TypedConfig, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(config)?),
        OutputFormat::Text => {
            let mut lines = Vec::new();
            push_lines(config, None, &mut lines);
            Ok(lines.join("\n"))
        }
    }
}

fn push_lines(config: &TypedConfig, prefix: Option<&str>, lines: &mut Vec<String>) {
    for (key, value) in config.iter() {
        let path = match prefix {
            Some(prefix) => format!("{prefix}.{key}"),
            None => key.clone(),
        };
        match value {
            Value::Object(nested) => push_lines(nested, Some(&path), lines),
            other => lines.push(format!("{path}={}", scalar_text(other))),
        }
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Integer(i) => i.to_string(),
        Value::Float(f) => f.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::List(items) => items.iter().map(scalar_text).collect::<Vec<_>>().join(","),
        Value::Object(_) => "{..}".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_config::{FieldKind, FieldSpec, RawConfig, Schema};

    fn sample() -> TypedConfig {
        let schema = Schema::new()
            .field(FieldSpec::integer("PORT"))
            .field(FieldSpec::list("HOSTS", FieldKind::String))
            .field(FieldSpec::object(
                "NESTED",
                Schema::new().field(FieldSpec::bool("FEATURE_FLAG")),
            ));
        let raw: RawConfig = serde_json::from_value(serde_json::json!({
            "PORT": "8080",
            "HOSTS": "a,b",
            "NESTED": { "FEATURE_FLAG": "yes" }
        }))
        .unwrap();
        schema.evaluate(&raw).unwrap()
    }

    #[test]
    fn test_parse_output_format() {
        assert_eq!(OutputFormat::parse("JSON").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::parse("text").unwrap(), OutputFormat::Text);
        assert!(OutputFormat::parse("yaml").is_err());
    }

    #[test]
    fn test_text_output_flattens_nested_objects() {
        let text = render(&sample(), OutputFormat::Text).unwrap();
        assert_eq!(text, "HOSTS=a,b\nNESTED.FEATURE_FLAG=true\nPORT=8080");
    }

    #[test]
    fn test_json_output_is_typed() {
        let json = render(&sample(), OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["PORT"], 8080);
        assert_eq!(parsed["NESTED"]["FEATURE_FLAG"], true);
    }
}
