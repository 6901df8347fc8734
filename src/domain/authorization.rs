use std::fmt;
use std::sync::Arc;

use azure_core::credentials::TokenCredential;
use chrono::{DateTime, Utc};
use reqwest::RequestBuilder;

use super::DomainError;

/// Azure Resource Manager, the resource targeted when none is given.
pub const DEFAULT_RESOURCE: &str = "https://management.azure.com/";

const DEFAULT_SUFFIX: &str = "/.default";

/// Turns a resource URI into the `.default` token scope for it.
pub fn scope_for_resource(resource: &str) -> String {
    let resource = resource.trim();
    if resource.ends_with(DEFAULT_SUFFIX) {
        return resource.to_string();
    }
    format!("{}{}", resource.trim_end_matches('/'), DEFAULT_SUFFIX)
}

/// Handle produced by a successful credential source.
#[derive(Clone)]
pub struct Authorization {
    credential: Arc<dyn TokenCredential>,
    source: &'static str,
    scope: String,
}

impl Authorization {
    pub fn new(credential: Arc<dyn TokenCredential>, source: &'static str, resource: &str) -> Self {
        Self {
            credential,
            source,
            scope: scope_for_resource(resource),
        }
    }

    /// Builds the handle and requests one token to confirm the credential works.
    pub async fn verified(
        credential: Arc<dyn TokenCredential>,
        source: &'static str,
        resource: &str,
    ) -> Result<Self, DomainError> {
        let authorization = Self::new(credential, source, resource);
        authorization.access_token().await?;
        Ok(authorization)
    }

    /// Name of the credential source that produced this handle.
    pub fn source(&self) -> &'static str {
        self.source
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub async fn access_token(&self) -> Result<BearerToken, DomainError> {
        let token = self
            .credential
            .get_token(&[self.scope.as_str()], None)
            .await
            .map_err(|e| DomainError::Token {
                scope: self.scope.clone(),
                message: e.to_string(),
            })?;

        Ok(BearerToken {
            secret: token.token.secret().to_string(),
            expires_on: DateTime::<Utc>::from_timestamp(token.expires_on.unix_timestamp(), 0),
        })
    }

    /// Adds an `Authorization: Bearer` header to the request.
    pub async fn authorize_request(
        &self,
        request: RequestBuilder,
    ) -> Result<RequestBuilder, DomainError> {
        let token = self.access_token().await?;
        Ok(request.bearer_auth(token.secret()))
    }
}

impl fmt::Debug for Authorization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Authorization")
            .field("source", &self.source)
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

#[derive(Clone)]
pub struct BearerToken {
    secret: String,
    pub expires_on: Option<DateTime<Utc>>,
}

impl BearerToken {
    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerToken")
            .field("secret", &"<redacted>")
            .field("expires_on", &self.expires_on)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_from_resource_with_trailing_slash() {
        assert_eq!(
            scope_for_resource(DEFAULT_RESOURCE),
            "https://management.azure.com/.default"
        );
    }

    #[test]
    fn scope_from_bare_resource() {
        assert_eq!(
            scope_for_resource("https://vault.azure.net"),
            "https://vault.azure.net/.default"
        );
    }

    #[test]
    fn scope_kept_when_already_default() {
        assert_eq!(
            scope_for_resource("https://graph.microsoft.com/.default"),
            "https://graph.microsoft.com/.default"
        );
    }

    #[derive(Debug)]
    struct RejectingCredential;

    #[async_trait::async_trait]
    impl TokenCredential for RejectingCredential {
        async fn get_token(
            &self,
            _scopes: &[&str],
            _options: Option<azure_core::credentials::TokenRequestOptions>,
        ) -> azure_core::Result<azure_core::credentials::AccessToken> {
            Err(azure_core::Error::message(
                azure_core::error::ErrorKind::Credential,
                "login required",
            ))
        }
    }

    #[tokio::test]
    async fn token_failure_names_scope() {
        let authorization =
            Authorization::new(Arc::new(RejectingCredential), "test", "https://vault.azure.net");
        let request = reqwest::Client::new().get("http://localhost/");

        let err = authorization.authorize_request(request).await.unwrap_err();

        match err {
            DomainError::Token { scope, message } => {
                assert_eq!(scope, "https://vault.azure.net/.default");
                assert!(message.contains("login required"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn verified_rejects_failing_credential() {
        let result =
            Authorization::verified(Arc::new(RejectingCredential), "test", DEFAULT_RESOURCE).await;
        assert!(matches!(result, Err(DomainError::Token { .. })));
    }

    #[test]
    fn bearer_token_debug_hides_secret() {
        let token = BearerToken {
            secret: "very-secret".to_string(),
            expires_on: None,
        };
        let rendered = format!("{token:?}");
        assert!(!rendered.contains("very-secret"));
        assert_eq!(token.secret(), "very-secret");
    }
}
