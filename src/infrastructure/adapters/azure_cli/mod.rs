use std::sync::Arc;

use async_trait::async_trait;
use azure_identity::{AzureCliCredential, AzureCliCredentialOptions};

use crate::{
    domain::{Authorization, DomainError},
    ports::CredentialSource,
};

const SOURCE_NAME: &str = "azure-cli";

/// Credential taken from the local `az login` session.
#[derive(Debug, Default, Clone)]
pub struct AzureCliCredentialSource {
    tenant_id: Option<String>,
}

impl AzureCliCredentialSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests tokens for `tenant_id` instead of the CLI's default tenant.
    pub fn with_tenant(tenant_id: impl Into<String>) -> Self {
        Self {
            tenant_id: Some(tenant_id.into()),
        }
    }

    pub fn tenant_id(&self) -> Option<&str> {
        self.tenant_id.as_deref()
    }

    fn credential(&self) -> Result<Arc<AzureCliCredential>, DomainError> {
        let options = self.tenant_id.as_ref().map(|tenant_id| {
            let mut options = AzureCliCredentialOptions::default();
            options.tenant_id = Some(tenant_id.clone());
            options
        });

        AzureCliCredential::new(options).map_err(|e| DomainError::Credential {
            strategy: SOURCE_NAME,
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl CredentialSource for AzureCliCredentialSource {
    async fn authorize(&self, resource: &str) -> Result<Authorization, DomainError> {
        tracing::debug!(tenant_id = ?self.tenant_id, "Creating credential from the Azure CLI");

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
    fn tenant_is_optional() {
        assert_eq!(AzureCliCredentialSource::new().tenant_id(), None);
        assert_eq!(
            AzureCliCredentialSource::with_tenant("contoso").tenant_id(),
            Some("contoso")
        );
        assert_eq!(AzureCliCredentialSource::new().source_name(), "azure-cli");
    }

    #[test]
    fn builds_credential_for_tenant() {
        let source = AzureCliCredentialSource::with_tenant("72f988bf-86f1-41af-91ab-2d7cd011db47");
        assert!(source.credential().is_ok());
    }

    #[test]
    fn builds_credential_without_tenant() {
        assert!(AzureCliCredentialSource::new().credential().is_ok());
    }
}
