use std::env;
use std::sync::Arc;

use async_trait::async_trait;
use azure_identity::{ManagedIdentityCredential, ManagedIdentityCredentialOptions, UserAssignedId};

use crate::{
    domain::{Authorization, DomainError},
    infrastructure::adapters::environment::CLIENT_ID_VAR,
    ports::CredentialSource,
};

const SOURCE_NAME: &str = "managed-identity";

/// Managed identity of the Azure host (VM, App Service, AKS pod).
///
/// A client ID selects a user-assigned identity; without one the
/// system-assigned identity is used.
#[derive(Debug, Default, Clone)]
pub struct ManagedIdentityCredentialSource {
    client_id: Option<String>,
}

impl ManagedIdentityCredentialSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `AZURE_CLIENT_ID` as the user-assigned identity when it is set.
    pub fn from_env() -> Self {
        Self {
            client_id: env::var(CLIENT_ID_VAR)
                .ok()
                .filter(|v| !v.trim().is_empty()),
        }
    }

    pub fn with_client_id(client_id: impl Into<String>) -> Self {
        Self {
            client_id: Some(client_id.into()),
        }
    }

    pub fn client_id(&self) -> Option<&str> {
        self.client_id.as_deref()
    }

    fn credential(&self) -> Result<Arc<ManagedIdentityCredential>, DomainError> {
        let options = self.client_id.as_ref().map(|client_id| {
            let mut options = ManagedIdentityCredentialOptions::default();
            options.user_assigned_id = Some(UserAssignedId::ClientId(client_id.clone()));
            options
        });

        ManagedIdentityCredential::new(options).map_err(|e| DomainError::Credential {
            strategy: SOURCE_NAME,
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl CredentialSource for ManagedIdentityCredentialSource {
    async fn authorize(&self, resource: &str) -> Result<Authorization, DomainError> {
        tracing::debug!(client_id = ?self.client_id, "Creating managed identity credential");

        let credential = self.credential()?;
        Authorization::verified(credential, SOURCE_NAME, resource).await
    }

    fn source_name(&self) -> &'static str {
        SOURCE_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_assigned_by_default() {
        let source = ManagedIdentityCredentialSource::new();
        assert_eq!(source.client_id(), None);
        assert_eq!(source.source_name(), "managed-identity");
        assert!(source.credential().is_ok());
    }

    #[test]
    fn user_assigned_client_id() {
        let source = ManagedIdentityCredentialSource::with_client_id("00000000-0000-0000-0000-000000000001");
        assert_eq!(source.client_id(), Some("00000000-0000-0000-0000-000000000001"));
        assert!(source.credential().is_ok());
    }
}
