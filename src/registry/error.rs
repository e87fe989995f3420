//! Error types for registration, hook invocation, and admission.

use thiserror::Error;

/// Failure to populate the registry from a provider.
///
/// Registration never leaves the registry partially updated: when this is
/// returned nothing was published. Startup code is expected to treat it as
/// fatal.
#[derive(Error, Debug)]
pub enum RegistrationError {
    /// The provider could not enumerate its instance types.
    #[error("failed to retrieve instance types from provider '{provider}'")]
    CatalogRetrieval {
        provider: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Errors from invoking the installed validation hooks.
#[derive(Error, Debug)]
pub enum HookError {
    /// Registration has not completed, so no provider validators exist.
    #[error("no validation hooks installed; register a cloud provider first")]
    NotRegistered,

    /// The provider's validator returned an error. The inner error is the
    /// provider's result, unmodified.
    #[error(transparent)]
    Rejected(anyhow::Error),
}

/// Errors from admitting user-supplied constraints or specs.
#[derive(Error, Debug)]
pub enum AdmissionError {
    #[error("no validation hooks installed; register a cloud provider first")]
    NotRegistered,

    /// One or more requested values are not in the published capability sets.
    #[error("unsupported values requested:\n{}", .errors.join("\n"))]
    Unsupported { errors: Vec<String> },

    /// A spec field is out of range before provider validation runs.
    #[error("invalid spec: {0}")]
    InvalidSpec(String),

    /// The provider's validator rejected the input.
    #[error("rejected by provider validation")]
    Rejected(#[source] anyhow::Error),
}

impl From<HookError> for AdmissionError {
    fn from(err: HookError) -> Self {
        match err {
            HookError::NotRegistered => AdmissionError::NotRegistered,
            HookError::Rejected(source) => AdmissionError::Rejected(source),
        }
    }
}
