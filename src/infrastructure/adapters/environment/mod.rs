use std::env;
use std::sync::Arc;

use async_trait::async_trait;
use azure_core::credentials::{Secret, TokenCredential};
use azure_identity::{ClientSecretCredential, ClientSecretCredentialOptions, TokenCredentialOptions};

use crate::{
    domain::{Authorization, DomainError},
    ports::CredentialSource,
};

pub const TENANT_ID_VAR: &str = "AZURE_TENANT_ID";
pub const CLIENT_ID_VAR: &str = "AZURE_CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "AZURE_CLIENT_SECRET";
pub const AUTHORITY_HOST_VAR: &str = "AZURE_AUTHORITY_HOST";

/// Every variable the environment source reads, required ones first.
pub const ENVIRONMENT_VARS: [&str; 4] = [
    TENANT_ID_VAR,
    CLIENT_ID_VAR,
    CLIENT_SECRET_VAR,
    AUTHORITY_HOST_VAR,
];

const SOURCE_NAME: &str = "environment";

/// Service principal settings taken from `AZURE_*` variables.
#[derive(Clone)]
pub struct EnvironmentSettings {
    pub tenant_id: String,
    pub client_id: String,
    client_secret: String,
    pub authority_host: Option<String>,
}

impl EnvironmentSettings {
    pub fn from_env() -> Result<Self, DomainError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Reads settings through `lookup`; empty values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let tenant_id = read(TENANT_ID_VAR);
        let client_id = read(CLIENT_ID_VAR);
        let client_secret = read(CLIENT_SECRET_VAR);

        match (tenant_id, client_id, client_secret) {
            (Some(tenant_id), Some(client_id), Some(client_secret)) => Ok(Self {
                tenant_id,
                client_id,
                client_secret,
                authority_host: read(AUTHORITY_HOST_VAR),
            }),
            (tenant_id, client_id, client_secret) => {
                let mut missing = Vec::new();
                if tenant_id.is_none() {
                    missing.push(TENANT_ID_VAR);
                }
                if client_id.is_none() {
                    missing.push(CLIENT_ID_VAR);
                }
                if client_secret.is_none() {
                    missing.push(CLIENT_SECRET_VAR);
                }
                Err(DomainError::MissingEnvironment(missing))
            }
        }
    }

    fn credential(&self) -> Result<Arc<dyn TokenCredential>, DomainError> {
        let mut credential_options = TokenCredentialOptions::default();
        if let Some(host) = &self.authority_host {
            credential_options.set_authority_host(host.clone());
        }

        let credential = ClientSecretCredential::new(
            &self.tenant_id,
            self.client_id.clone(),
            Secret::new(self.client_secret.clone()),
            Some(ClientSecretCredentialOptions { credential_options }),
        )
        .map_err(|e| DomainError::Credential {
            strategy: SOURCE_NAME,
            message: e.to_string(),
        })?;

        Ok(credential)
    }
}

/// Client-secret credential configured from the process environment.
///
/// Settings are read on every `authorize` call.
#[derive(Debug, Default, Clone)]
pub struct EnvironmentCredentialSource;

impl EnvironmentCredentialSource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CredentialSource for EnvironmentCredentialSource {
    async fn authorize(&self, resource: &str) -> Result<Authorization, DomainError> {
        let settings = EnvironmentSettings::from_env()?;
        tracing::debug!(
            tenant_id = %settings.tenant_id,
            client_id = %settings.client_id,
            "Creating client secret credential from the environment"
        );

        let credential = settings.credential()?;
        Authorization::verified(credential, SOURCE_NAME, resource).await
    }

    fn source_name(&self) -> &'static str {
        SOURCE_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn complete_settings() {
        let settings = EnvironmentSettings::from_lookup(lookup(&[
            (TENANT_ID_VAR, "tenant"),
            (CLIENT_ID_VAR, "client"),
            (CLIENT_SECRET_VAR, "secret"),
        ]))
        .unwrap();

        assert_eq!(settings.tenant_id, "tenant");
        assert_eq!(settings.client_id, "client");
        assert_eq!(settings.authority_host, None);
    }

    #[test]
    fn authority_host_is_optional() {
        let settings = EnvironmentSettings::from_lookup(lookup(&[
            (TENANT_ID_VAR, "tenant"),
            (CLIENT_ID_VAR, "client"),
            (CLIENT_SECRET_VAR, "secret"),
            (AUTHORITY_HOST_VAR, "https://login.microsoftonline.us"),
        ]))
        .unwrap();

        assert_eq!(
            settings.authority_host.as_deref(),
            Some("https://login.microsoftonline.us")
        );
    }

    #[test]
    fn reports_every_missing_variable() {
        let err = EnvironmentSettings::from_lookup(lookup(&[
            (CLIENT_ID_VAR, "client"),
            (CLIENT_SECRET_VAR, "  "),
        ]))
        .err()
        .unwrap();

        match err {
            DomainError::MissingEnvironment(missing) => {
                assert_eq!(missing, vec![TENANT_ID_VAR, CLIENT_SECRET_VAR]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn source_fails_without_environment() {
        let source = EnvironmentCredentialSource::new();
        // Only meaningful when the test process has no service principal configured.
        if EnvironmentSettings::from_env().is_ok() {
            return;
        }
        let err = source.authorize("https://management.azure.com/").await.unwrap_err();
        assert!(matches!(err, DomainError::MissingEnvironment(_)));
    }
}
