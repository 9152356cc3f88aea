//! The validation capability and its failure-reporting policies.
//!
//! Responsibilities:
//! - Define `Validate`, the seam between the pipeline and a schema engine.
//! - Run a validator, reporting failures to the diagnostics capability.
//! - Map a failure to the caller's chosen error shape (`FailurePolicy`).
//!
//! Does NOT handle:
//! - Deciding whether to log (the caller picks the `Diagnostics`).

use serde::de::DeserializeOwned;
use std::fmt;
use std::marker::PhantomData;

use super::failure::{Issue, IssueKind, ValidationFailure};
use super::typed::TypedConfig;
use super::Schema;
use crate::diagnostics::Diagnostics;
use crate::loader::ConfigError;
use crate::value::RawConfig;

/// Something that turns raw configuration into a typed value or a
/// structured failure.
pub trait Validate {
    type Output;

    fn validate(&self, raw: &RawConfig) -> Result<Self::Output, ValidationFailure>;
}

impl Validate for Schema {
    type Output = TypedConfig;

    fn validate(&self, raw: &RawConfig) -> Result<TypedConfig, ValidationFailure> {
        self.evaluate(raw)
    }
}

impl<V: Validate + ?Sized> Validate for &V {
    type Output = V::Output;

    fn validate(&self, raw: &RawConfig) -> Result<Self::Output, ValidationFailure> {
        (**self).validate(raw)
    }
}

/// A schema paired with the caller's struct. Validation runs the schema,
/// then deserializes the result into `T`.
pub struct Typed<T> {
    schema: Schema,
    target: PhantomData<fn() -> T>,
}

impl<T> Typed<T> {
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            target: PhantomData,
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }
}

impl<T> fmt::Debug for Typed<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Typed")
            .field("schema", &self.schema)
            .field("target", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T: DeserializeOwned> Validate for Typed<T> {
    type Output = T;

    fn validate(&self, raw: &RawConfig) -> Result<T, ValidationFailure> {
        let typed = self.schema.evaluate(raw)?;
        typed.to_typed().map_err(|e| {
            ValidationFailure::from_issues(vec![Issue::form(IssueKind::Deserialize(format!(
                "Validated configuration does not match {}: {e}",
                std::any::type_name::<T>()
            )))])
        })
    }
}

/// Run `validator` over `raw`, reporting any failure to `diagnostics`.
pub fn validate<V>(
    validator: &V,
    raw: &RawConfig,
    diagnostics: &dyn Diagnostics,
) -> Result<V::Output, ValidationFailure>
where
    V: Validate + ?Sized,
{
    validator.validate(raw).inspect_err(|failure| {
        diagnostics.validation_failed(failure);
    })
}

/// How a validation failure is surfaced to the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// `ConfigError::InvalidConfiguration`, without field detail.
    Generic,
    /// `ConfigError::Validation` carrying the full `ValidationFailure`.
    #[default]
    Structured,
}

impl FailurePolicy {
    pub fn into_error(self, failure: ValidationFailure) -> ConfigError {
        match self {
            FailurePolicy::Generic => ConfigError::InvalidConfiguration,
            FailurePolicy::Structured => ConfigError::Validation(failure),
        }
    }
}
