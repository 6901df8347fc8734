mod authorization;
pub mod resource_id;

pub use authorization::{scope_for_resource, Authorization, BearerToken, DEFAULT_RESOURCE};
pub use resource_id::{IdComponent, IdError};

/// One failed attempt in the credential chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFailure {
    pub strategy: String,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Missing environment variables: {}", .0.join(", "))]
    MissingEnvironment(Vec<&'static str>),

    #[error("Credential error ({strategy}): {message}")]
    Credential {
        strategy: &'static str,
        message: String,
    },

    #[error("Authorization failed: {}", describe_failures(.attempts))]
    AuthorizationFailed { attempts: Vec<SourceFailure> },

    #[error("Token request for scope '{scope}' failed: {message}")]
    Token { scope: String, message: String },
}

fn describe_failures(attempts: &[SourceFailure]) -> String {
    if attempts.is_empty() {
        return "no credential sources configured".to_string();
    }
    attempts
        .iter()
        .map(|a| format!("{}: {}", a.strategy, a.message))
        .collect::<Vec<_>>()
        .join("; ")
}
