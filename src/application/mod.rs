use std::sync::Arc;

use crate::{
    domain::{Authorization, DomainError, SourceFailure, DEFAULT_RESOURCE},
    ports::CredentialSource,
};

/// Tries credential sources in order until one authorizes.
pub struct AuthorizationService {
    sources: Vec<Arc<dyn CredentialSource>>,
}

impl AuthorizationService {
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    pub fn with_sources(sources: Vec<Arc<dyn CredentialSource>>) -> Self {
        Self { sources }
    }

    pub fn add_source(&mut self, source: Arc<dyn CredentialSource>) {
        self.sources.push(source);
    }

    pub fn list_sources(&self) -> Vec<&'static str> {
        self.sources.iter().map(|s| s.source_name()).collect()
    }

    /// Authorizes against Azure Resource Manager.
    pub async fn authorize(&self) -> Result<Authorization, DomainError> {
        self.authorize_with_resource(DEFAULT_RESOURCE).await
    }

    pub async fn authorize_with_resource(
        &self,
        resource: &str,
    ) -> Result<Authorization, DomainError> {
        let mut attempts = Vec::new();

        for source in &self.sources {
            match source.authorize(resource).await {
                Ok(authorization) => {
                    tracing::debug!(
                        source = source.source_name(),
                        resource,
                        "Authorization successfully created"
                    );
                    return Ok(authorization);
                }
                Err(e) => {
                    tracing::debug!(
                        source = source.source_name(),
                        resource,
                        "Unable to authorize, trying the next credential source: {}",
                        e
                    );
                    attempts.push(SourceFailure {
                        strategy: source.source_name().to_string(),
                        message: e.to_string(),
                    });
                }
            }
        }

        Err(DomainError::AuthorizationFailed { attempts })
    }
}

impl Default for AuthorizationService {
    fn default() -> Self {
        Self::new()
    }
}
