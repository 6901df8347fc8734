pub mod azure_cli;
pub mod environment;
pub mod managed_identity;

use std::sync::Arc;

use crate::ports::CredentialSource;

use self::{
    azure_cli::AzureCliCredentialSource, environment::EnvironmentCredentialSource,
    managed_identity::ManagedIdentityCredentialSource,
};

/// Service principal from the environment, then the host's managed identity,
/// then the Azure CLI session. `tenant_id` pins the CLI credential to a tenant.
pub fn default_sources(tenant_id: Option<&str>) -> Vec<Arc<dyn CredentialSource>> {
    let cli = match tenant_id {
        Some(tenant_id) => AzureCliCredentialSource::with_tenant(tenant_id),
        None => AzureCliCredentialSource::new(),
    };

    vec![
        Arc::new(EnvironmentCredentialSource::new()),
        Arc::new(ManagedIdentityCredentialSource::from_env()),
        Arc::new(cli),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_source_order() {
        let names: Vec<_> = default_sources(None).iter().map(|s| s.source_name()).collect();
        assert_eq!(names, vec!["environment", "managed-identity", "azure-cli"]);
    }

    #[test]
    fn tenant_does_not_change_order() {
        let names: Vec<_> = default_sources(Some("contoso"))
            .iter()
            .map(|s| s.source_name())
            .collect();
        assert_eq!(names, vec!["environment", "managed-identity", "azure-cli"]);
    }
}
